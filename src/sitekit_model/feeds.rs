use sitekit_config::FeedKind;

/// An enabled feed and where it would be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTarget {
    kind: FeedKind,
    template: String,
}

impl FeedTarget {
    pub(crate) fn new(kind: FeedKind, template: impl Into<String>) -> Self {
        Self {
            kind,
            template: template.into(),
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    /// Output path template, possibly containing `{slug}` or `{lang}`.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn format(&self) -> &'static str {
        if self.kind.is_rss() { "rss" } else { "atom" }
    }

    /// Output path for one category, author or language.
    ///
    /// `value` is ignored for feeds without a placeholder.
    pub fn path_for(&self, value: &str) -> String {
        match self.kind.placeholder() {
            Some(name) => self.template.replace(&format!("{{{name}}}"), value),
            None => self.template.clone(),
        }
    }
}
