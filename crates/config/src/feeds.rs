use std::fmt;

use crate::Result;
use crate::Status;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FeedKind {
    /// Every article, regardless of category or language.
    AllAtom,
    CategoryAtom,
    TranslationAtom,
    AuthorAtom,
    AuthorRss,
}

impl FeedKind {
    pub const ALL: [FeedKind; 5] = [
        FeedKind::AllAtom,
        FeedKind::CategoryAtom,
        FeedKind::TranslationAtom,
        FeedKind::AuthorAtom,
        FeedKind::AuthorRss,
    ];

    /// Key under `feeds:` in the settings file.
    pub fn key(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "all_atom",
            FeedKind::CategoryAtom => "category_atom",
            FeedKind::TranslationAtom => "translation_atom",
            FeedKind::AuthorAtom => "author_atom",
            FeedKind::AuthorRss => "author_rss",
        }
    }

    /// Output path used when the feed is enabled with `true`.
    pub fn default_path(self) -> &'static str {
        match self {
            FeedKind::AllAtom => "feeds/all.atom.xml",
            FeedKind::CategoryAtom => "feeds/{slug}.atom.xml",
            FeedKind::TranslationAtom => "feeds/all-{lang}.atom.xml",
            FeedKind::AuthorAtom => "feeds/{slug}.atom.xml",
            FeedKind::AuthorRss => "feeds/{slug}.rss.xml",
        }
    }

    /// Placeholder the path template may reference.
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            FeedKind::AllAtom => None,
            FeedKind::CategoryAtom | FeedKind::AuthorAtom | FeedKind::AuthorRss => Some("slug"),
            FeedKind::TranslationAtom => Some("lang"),
        }
    }

    pub fn is_rss(self) -> bool {
        self == FeedKind::AuthorRss
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A single feed toggle.
///
/// Written as `~`/`false` (disabled), `true` (enabled at the kind's default
/// path) or a path template.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Feed {
    #[default]
    Disabled,
    Default,
    Path(String),
}

impl Feed {
    pub fn is_enabled(&self) -> bool {
        !matches!(self, Feed::Disabled)
    }

    /// The path template for `kind`, `None` when disabled.
    pub fn path(&self, kind: FeedKind) -> Option<&str> {
        match self {
            Feed::Disabled => None,
            Feed::Default => Some(kind.default_path()),
            Feed::Path(path) => Some(path.as_str()),
        }
    }
}

impl serde::Serialize for Feed {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Feed::Disabled => serializer.serialize_none(),
            Feed::Default => serializer.serialize_bool(true),
            Feed::Path(path) => serializer.serialize_str(path),
        }
    }
}

impl<'de> serde::Deserialize<'de> for Feed {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Flag(bool),
            Path(String),
        }

        let feed = match <Option<Repr> as serde::Deserialize<'de>>::deserialize(deserializer)? {
            None | Some(Repr::Flag(false)) => Feed::Disabled,
            Some(Repr::Flag(true)) => Feed::Default,
            Some(Repr::Path(path)) => Feed::Path(path),
        };
        Ok(feed)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct Feeds {
    pub all_atom: Feed,
    pub category_atom: Feed,
    pub translation_atom: Feed,
    pub author_atom: Feed,
    pub author_rss: Feed,
}

impl Feeds {
    pub fn get(&self, kind: FeedKind) -> &Feed {
        match kind {
            FeedKind::AllAtom => &self.all_atom,
            FeedKind::CategoryAtom => &self.category_atom,
            FeedKind::TranslationAtom => &self.translation_atom,
            FeedKind::AuthorAtom => &self.author_atom,
            FeedKind::AuthorRss => &self.author_rss,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FeedKind, &Feed)> + '_ {
        FeedKind::ALL.into_iter().map(move |kind| (kind, self.get(kind)))
    }

    pub fn enabled(&self) -> impl Iterator<Item = (FeedKind, &str)> + '_ {
        self.iter().filter_map(|(kind, feed)| feed.path(kind).map(|p| (kind, p)))
    }

    pub fn all_disabled(&self) -> bool {
        self.iter().all(|(_, feed)| !feed.is_enabled())
    }
}

static PLACEHOLDER: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"\{([^{}]*)\}").unwrap());

/// Check a feed path template against the placeholders `kind` supports.
pub fn check_feed_path(kind: FeedKind, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(Status::new("Feed path must not be empty"));
    }

    let stripped = PLACEHOLDER.replace_all(path, "");
    if stripped.contains('{') || stripped.contains('}') {
        return Err(Status::new("Unbalanced braces in feed path")
            .context_with(|c| c.insert("Path", path.to_owned())));
    }

    for caps in PLACEHOLDER.captures_iter(path) {
        let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        if Some(name) != kind.placeholder() {
            return Err(Status::new("Unsupported placeholder in feed path")
                .context_with(|c| c.insert("Path", path.to_owned()))
                .context_with(|c| c.insert("Placeholder", format!("{{{name}}}"))));
        }
    }
    Ok(())
}
