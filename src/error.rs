use std::fmt;

pub use anyhow::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A setting that is missing or failed validation.
///
/// Carried inside [`Error`]; use `downcast_ref` to recover the offending key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingError {
    key: String,
    reason: Option<String>,
}

impl SettingError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            reason: None,
        }
    }

    pub fn invalid(key: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            key: key.into(),
            reason: Some(reason.to_string()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn is_missing(&self) -> bool {
        self.reason.is_none()
    }
}

impl fmt::Display for SettingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            None => write!(f, "Missing required key `{}`", self.key),
            Some(reason) => write!(f, "Invalid `{}`: {}", self.key, reason),
        }
    }
}

impl std::error::Error for SettingError {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_names_key() {
        let err = SettingError::missing("theme");
        assert!(err.is_missing());
        assert_eq!(err.to_string(), "Missing required key `theme`");
    }

    #[test]
    fn invalid_names_key_and_reason() {
        let err = SettingError::invalid("timezone", "unknown time zone `Mars/Olympus`");
        assert_eq!(err.key(), "timezone");
        assert_eq!(
            err.to_string(),
            "Invalid `timezone`: unknown time zone `Mars/Olympus`"
        );
    }

    #[test]
    fn survives_anyhow() {
        let err: Error = SettingError::missing("author").into();
        let setting = err.downcast_ref::<SettingError>().unwrap();
        assert_eq!(setting.key(), "author");
    }
}
