/// A `(label, url)` entry of the blogroll or social widget.
///
/// Accepts either a two-element sequence or a `{label, url}` mapping and is
/// always written back as a sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

impl Link {
    pub fn new(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
        }
    }

    /// Fragment-only targets like `#` are placeholders rather than real links.
    pub fn is_placeholder(&self) -> bool {
        self.url.starts_with('#')
    }
}

impl serde::Serialize for Link {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&(&self.label, &self.url), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Link {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(serde::Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Pair(String, String),
            Named { label: String, url: String },
        }

        let link = match <Repr as serde::Deserialize<'de>>::deserialize(deserializer)? {
            Repr::Pair(label, url) | Repr::Named { label, url } => Link { label, url },
        };
        Ok(link)
    }
}
