#[test]
fn cli_tests() {
    let t = trycmd::TestCases::new();
    t.case("tests/cmd/*.toml");
    t.case("tests/cmd/*.md");
}
