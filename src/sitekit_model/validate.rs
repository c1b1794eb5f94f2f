//! Checks applied while freezing a [`Config`](sitekit_config::Config).
//!
//! Each check takes the raw value and either returns the typed value or a
//! [`SettingError`] naming the offending key.

use std::path;

use sitekit_config::RelPath;

use crate::error::SettingError;

type Result<T> = std::result::Result<T, SettingError>;

pub(crate) fn required(key: &str, value: Option<String>) -> Result<String> {
    let value = value.ok_or_else(|| SettingError::missing(key))?;
    if value.trim().is_empty() {
        return Err(SettingError::invalid(key, "must not be empty"));
    }
    Ok(value)
}

/// `site_url` must be absolute unless relative URLs are requested.
///
/// The trailing `/` is dropped so paths can be joined with a single `/`.
pub(crate) fn site_url(value: Option<String>, relative_urls: bool) -> Result<String> {
    const KEY: &str = "site_url";
    let value = value.ok_or_else(|| SettingError::missing(KEY))?;
    if value.chars().any(char::is_whitespace) {
        return Err(SettingError::invalid(KEY, "must not contain whitespace"));
    }
    let trimmed = value.trim_end_matches('/').to_owned();
    if relative_urls {
        return Ok(trimmed);
    }

    let url = url::Url::parse(&value)
        .map_err(|e| SettingError::invalid(KEY, format!("`{value}` is not an absolute URL ({e})")))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(SettingError::invalid(
            KEY,
            format!("`{value}` has no host to serve from"),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(SettingError::invalid(
            KEY,
            format!("`{value}` must not carry a query or fragment"),
        ));
    }
    Ok(trimmed)
}

pub(crate) fn timezone(value: Option<String>) -> Result<chrono_tz::Tz> {
    const KEY: &str = "timezone";
    let value = required(KEY, value)?;
    value
        .trim()
        .parse::<chrono_tz::Tz>()
        .map_err(|_| SettingError::invalid(KEY, format!("unknown IANA time zone `{value}`")))
}

/// Accepts BCP 47 style tags: `en`, `pt-BR`, `zh_Hant_TW`.
pub(crate) fn language(value: Option<String>) -> Result<String> {
    const KEY: &str = "default_language";
    let value = required(KEY, value)?;
    let mut subtags = value.split(['-', '_']);
    let primary = subtags.next().unwrap_or_default();
    let primary_ok = (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
    let rest_ok = subtags.all(|s| (1..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()));
    if !(primary_ok && rest_ok) {
        return Err(SettingError::invalid(
            KEY,
            format!("`{value}` is not a language code"),
        ));
    }
    Ok(value)
}

pub(crate) fn date_format(value: Option<String>) -> Result<Option<String>> {
    const KEY: &str = "date_format";
    let Some(value) = value else {
        return Ok(None);
    };
    if value.is_empty() {
        return Err(SettingError::invalid(KEY, "must not be empty"));
    }
    let malformed = chrono::format::StrftimeItems::new(&value)
        .any(|item| matches!(item, chrono::format::Item::Error));
    if malformed {
        return Err(SettingError::invalid(
            KEY,
            format!("`{value}` is not a valid strftime pattern"),
        ));
    }
    Ok(Some(value))
}

/// Resolve the theme directory against the site root.
pub(crate) fn theme(root: &path::Path, value: Option<String>) -> Result<(String, path::PathBuf)> {
    const KEY: &str = "theme";
    let value = required(KEY, value)?;
    let dir = root.join(&value);
    if !dir.is_dir() {
        return Err(SettingError::invalid(
            KEY,
            format!("theme directory `{}` does not exist", dir.display()),
        ));
    }
    let dir = dunce::canonicalize(&dir).map_err(|e| {
        SettingError::invalid(
            KEY,
            format!("theme directory `{}` cannot be resolved ({e})", dir.display()),
        )
    })?;
    Ok((value, dir))
}

/// A site-relative path that must stay inside the site.
pub(crate) fn rel_path(key: &str, path: &RelPath) -> Result<()> {
    if path.as_str().trim().is_empty() {
        return Err(SettingError::invalid(key, "path must not be empty"));
    }
    if path.as_str().starts_with('/') || path.as_str().starts_with('\\') {
        return Err(SettingError::invalid(
            key,
            format!("`{path}` must be relative"),
        ));
    }
    let normalized = path.normalize();
    if normalized.as_str().is_empty() || normalized.starts_with("..") {
        return Err(SettingError::invalid(
            key,
            format!("`{path}` points outside of the site"),
        ));
    }
    Ok(())
}
