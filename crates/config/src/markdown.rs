use std::fmt;
use std::str::FromStr;

use crate::Result;
use crate::Status;

/// A Markdown extension identifier, optionally parameterized.
///
/// Written as `extra` or `codehilite(css_class=highlight, linenums=false)`.
/// Parameters are split on commas outside brackets and quotes, so a value
/// may itself be a list such as `toc(marker=[a, b])`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarkdownExtension {
    name: String,
    params: Vec<(String, String)>,
}

impl MarkdownExtension {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parameters in declaration order.
    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

static EXTENSION: once_cell::sync::Lazy<regex::Regex> = once_cell::sync::Lazy::new(|| {
    regex::Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_.]*)\s*(?:\((.*)\))?\s*$").unwrap()
});

static IDENTIFIER: once_cell::sync::Lazy<regex::Regex> =
    once_cell::sync::Lazy::new(|| regex::Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

impl FromStr for MarkdownExtension {
    type Err = Status;

    fn from_str(s: &str) -> Result<Self> {
        let caps = EXTENSION.captures(s).ok_or_else(|| {
            Status::new("Invalid markdown extension")
                .context_with(|c| c.insert("Extension", s.to_owned()))
        })?;
        let name = caps.get(1).expect("unconditional capture").as_str();
        let params = caps
            .get(2)
            .map(|args| parse_params(s, args.as_str()))
            .transpose()?
            .unwrap_or_default();
        Ok(Self {
            name: name.to_owned(),
            params,
        })
    }
}

fn parse_params(ext: &str, args: &str) -> Result<Vec<(String, String)>> {
    if args.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut params: Vec<(String, String)> = Vec::new();
    for arg in split_top_level(args) {
        let (key, value) = arg.split_once('=').ok_or_else(|| {
            Status::new("Markdown extension parameter must be `key=value`")
                .context_with(|c| c.insert("Extension", ext.to_owned()))
                .context_with(|c| c.insert("Parameter", arg.trim().to_owned()))
        })?;
        let key = key.trim();
        if !IDENTIFIER.is_match(key) {
            return Err(Status::new("Invalid markdown extension parameter name")
                .context_with(|c| c.insert("Extension", ext.to_owned()))
                .context_with(|c| c.insert("Parameter", key.to_owned())));
        }
        if params.iter().any(|(k, _)| k == key) {
            return Err(Status::new("Duplicate markdown extension parameter")
                .context_with(|c| c.insert("Extension", ext.to_owned()))
                .context_with(|c| c.insert("Parameter", key.to_owned())));
        }
        params.push((key.to_owned(), value.trim().to_owned()));
    }
    Ok(params)
}

/// Split on `,` at nesting depth zero, ignoring commas inside `()`, `[]`,
/// `{}` or quotes.
fn split_top_level(args: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote = None;
    let mut start = 0;
    for (i, c) in args.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, '(' | '[' | '{') => depth += 1,
            (None, ')' | ']' | '}') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                parts.push(&args[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&args[start..]);
    parts
}

impl fmt::Display for MarkdownExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if !self.params.is_empty() {
            f.write_str("(")?;
            for (i, (key, value)) in self.params.iter().enumerate() {
                if i != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

impl serde::Serialize for MarkdownExtension {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for MarkdownExtension {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize<'de>>::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
