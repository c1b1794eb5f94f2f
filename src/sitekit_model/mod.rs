mod assets;
mod dates;
mod feeds;
mod settings;
mod validate;

pub use self::assets::StaticFile;
pub use self::dates::DEFAULT_DATE_FORMAT;
pub use self::feeds::FeedTarget;
pub use self::settings::Settings;
