use clap::Parser as _;

mod args;
mod check;
mod debug;
mod error;
mod new;

fn main() {
    human_panic::setup_panic!();
    let result = run();
    proc_exit::exit(result);
}

fn run() -> proc_exit::ExitResult {
    let cli = args::Cli::parse();

    cli.color.write_global();
    let colored_stderr = !matches!(
        anstream::AutoStream::choice(&std::io::stderr()),
        anstream::ColorChoice::Never
    );
    args::init_logging(cli.verbose.log_level_filter(), colored_stderr);

    if let Err(err) = cli.command.run() {
        log::error!("{err:#}");
        return Err(proc_exit::Exit::new(proc_exit::Code::FAILURE));
    }

    Ok(())
}
