mod assets;
mod config;
mod environment;
mod feeds;
mod links;
mod markdown;
mod pagination;

pub use self::assets::*;
pub use self::config::*;
pub use self::environment::*;
pub use self::feeds::*;
pub use self::links::*;
pub use self::markdown::*;
pub use self::pagination::*;

pub type RelPath = relative_path::RelativePathBuf;

pub type Status = status::Status;
pub type Result<T, E = Status> = std::result::Result<T, E>;
