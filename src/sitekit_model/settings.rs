use std::collections::BTreeMap;
use std::fmt;
use std::num::NonZeroU32;
use std::path;

use sitekit_config::Config;
use sitekit_config::Environment;
use sitekit_config::Feeds;
use sitekit_config::Link;
use sitekit_config::MarkdownExtension;
use sitekit_config::Pagination;
use sitekit_config::PathMetadata;
use sitekit_config::PathMetadataMap;
use sitekit_config::RelPath;

use super::assets::StaticFile;
use super::dates;
use super::feeds::FeedTarget;
use super::validate;
use crate::error::Result;
use crate::error::SettingError;

/// Validated site settings.
///
/// Built once by [`Settings::from_config`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    root: path::PathBuf,
    environment: Environment,
    author: String,
    site_name: String,
    site_url: String,
    timezone: chrono_tz::Tz,
    default_language: String,
    date_format: Option<String>,
    theme: String,
    theme_dir: path::PathBuf,
    feeds: Feeds,
    static_paths: Vec<RelPath>,
    extra_path_metadata: PathMetadataMap,
    links: Vec<Link>,
    social: Vec<Link>,
    pagination: Pagination,
    markdown_extensions: Vec<MarkdownExtension>,
    relative_urls: bool,
}

impl Settings {
    pub fn from_config(source: Config) -> Result<Self> {
        let Config {
            root,
            environment,
            author,
            site_name,
            site_url,
            timezone,
            default_language,
            date_format,
            theme,
            feeds,
            static_paths,
            extra_path_metadata,
            links,
            social,
            pagination,
            markdown_extensions,
            relative_urls,
        } = source;

        let author = validate::required("author", author)?;
        let site_name = validate::required("site_name", site_name)?;
        let site_url = validate::site_url(site_url, relative_urls)?;
        let timezone = validate::timezone(timezone)?;
        let default_language = validate::language(default_language)?;
        let date_format = validate::date_format(date_format)?;
        let (theme, theme_dir) = validate::theme(&root, theme)?;
        check_feeds(&feeds)?;
        check_static_paths(&root, &static_paths, &extra_path_metadata)?;
        check_links("links", &links)?;
        check_links("social", &social)?;
        check_pagination(pagination)?;
        check_markdown_extensions(&markdown_extensions)?;

        log::debug!(
            "Loaded {} settings for `{}` using theme `{}`",
            environment,
            site_name,
            theme_dir.display()
        );

        Ok(Self {
            root,
            environment,
            author,
            site_name,
            site_url,
            timezone,
            default_language,
            date_format,
            theme,
            theme_dir,
            feeds,
            static_paths,
            extra_path_metadata,
            links,
            social,
            pagination,
            markdown_extensions,
            relative_urls,
        })
    }

    /// Write the settings back out in settings-file form.
    pub fn to_config(&self) -> Config {
        Config {
            root: self.root.clone(),
            environment: self.environment,
            author: Some(self.author.clone()),
            site_name: Some(self.site_name.clone()),
            site_url: Some(self.site_url.clone()),
            timezone: Some(self.timezone.name().to_owned()),
            default_language: Some(self.default_language.clone()),
            date_format: self.date_format.clone(),
            theme: Some(self.theme.clone()),
            feeds: self.feeds.clone(),
            static_paths: self.static_paths.clone(),
            extra_path_metadata: self.extra_path_metadata.clone(),
            links: self.links.clone(),
            social: self.social.clone(),
            pagination: self.pagination,
            markdown_extensions: self.markdown_extensions.clone(),
            relative_urls: self.relative_urls,
        }
    }

    /// Directory the settings file was found in.
    pub fn root(&self) -> &path::Path {
        &self.root
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }

    /// Base URL without a trailing `/`.
    pub fn site_url(&self) -> &str {
        &self.site_url
    }

    pub fn timezone(&self) -> chrono_tz::Tz {
        self.timezone
    }

    pub fn default_language(&self) -> &str {
        &self.default_language
    }

    pub fn date_format(&self) -> &str {
        self.date_format
            .as_deref()
            .unwrap_or(dates::DEFAULT_DATE_FORMAT)
    }

    /// The theme as written in the settings file.
    pub fn theme(&self) -> &str {
        &self.theme
    }

    pub fn theme_dir(&self) -> &path::Path {
        &self.theme_dir
    }

    pub fn feeds(&self) -> &Feeds {
        &self.feeds
    }

    pub fn static_paths(&self) -> &[RelPath] {
        &self.static_paths
    }

    pub fn extra_path_metadata(&self) -> &PathMetadataMap {
        &self.extra_path_metadata
    }

    /// Blogroll, in declaration order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn social(&self) -> &[Link] {
        &self.social
    }

    pub fn is_paginated(&self) -> bool {
        self.pagination.is_enabled()
    }

    pub fn per_page(&self) -> Option<NonZeroU32> {
        self.pagination.per_page().and_then(NonZeroU32::new)
    }

    pub fn markdown_extensions(&self) -> &[MarkdownExtension] {
        &self.markdown_extensions
    }

    pub fn relative_urls(&self) -> bool {
        self.relative_urls
    }

    /// Every static path with its output location, followed by remapped
    /// files that live inside a static directory.
    pub fn static_files(&self) -> Vec<StaticFile> {
        let mut files: Vec<_> = self
            .static_paths
            .iter()
            .map(|source| {
                let output = self.metadata_for(source).map(|meta| meta.path.clone());
                StaticFile::new(source.clone(), output)
            })
            .collect();
        files.extend(
            self.extra_path_metadata
                .iter()
                .filter(|(source, _)| {
                    let source = source.normalize();
                    !self
                        .static_paths
                        .iter()
                        .any(|path| path.normalize() == source)
                })
                .map(|(source, meta)| StaticFile::new(source.clone(), Some(meta.path.clone()))),
        );
        files
    }

    /// Output location of a site-relative file, `None` if it is not static.
    pub fn output_path(&self, source: &relative_path::RelativePath) -> Option<RelPath> {
        if !sitekit_config::is_static(&self.static_paths, source) {
            return None;
        }
        let output = self
            .metadata_for(source)
            .map(|meta| meta.path.clone())
            .unwrap_or_else(|| source.normalize());
        Some(output)
    }

    fn metadata_for(&self, source: &relative_path::RelativePath) -> Option<&PathMetadata> {
        let source = source.normalize();
        self.extra_path_metadata
            .iter()
            .find(|(key, _)| key.normalize() == source)
            .map(|(_, meta)| meta)
    }

    pub fn feed_targets(&self) -> Vec<FeedTarget> {
        self.feeds
            .enabled()
            .map(|(kind, template)| FeedTarget::new(kind, template))
            .collect()
    }

    /// Link to a site-relative path, honoring `relative_urls`.
    pub fn url_for(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        if self.relative_urls || self.site_url.is_empty() {
            path.to_owned()
        } else {
            format!("{}/{}", self.site_url, path)
        }
    }

    pub fn localize(
        &self,
        date: chrono::DateTime<chrono::Utc>,
    ) -> chrono::DateTime<chrono_tz::Tz> {
        dates::localize(self.timezone, date)
    }

    /// Render `date` in the site's zone with `date_format`.
    pub fn format_date(&self, date: chrono::DateTime<chrono::Utc>) -> String {
        dates::format(self.timezone, self.date_format.as_deref(), date)
    }
}

impl fmt::Display for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.to_config(), f)
    }
}

fn check_feeds(feeds: &Feeds) -> Result<(), SettingError> {
    for (kind, template) in feeds.enabled() {
        sitekit_config::check_feed_path(kind, template)
            .map_err(|e| SettingError::invalid(format!("feeds.{kind}"), e))?;
    }
    Ok(())
}

fn check_static_paths(
    root: &path::Path,
    static_paths: &[RelPath],
    extra_path_metadata: &PathMetadataMap,
) -> Result<(), SettingError> {
    for (i, path) in static_paths.iter().enumerate() {
        let key = format!("static_paths[{i}]");
        validate::rel_path(&key, path)?;
        if static_paths[..i]
            .iter()
            .any(|other| other.normalize() == path.normalize())
        {
            return Err(SettingError::invalid(key, format!("`{path}` is listed twice")));
        }
        if !path.to_logical_path(root).exists() {
            log::warn!("Static path `{path}` does not exist under `{}`", root.display());
        }
    }

    let mut sources: BTreeMap<RelPath, &RelPath> = BTreeMap::new();
    let mut outputs: BTreeMap<RelPath, &RelPath> = BTreeMap::new();
    for (source, meta) in extra_path_metadata {
        let key = format!("extra_path_metadata.{source}");
        validate::rel_path(&key, source)?;
        validate::rel_path(&format!("{key}.path"), &meta.path)?;
        if let Some(other) = sources.insert(source.normalize(), source) {
            return Err(SettingError::invalid(
                key,
                format!("`{source}` is the same file as `{other}`"),
            ));
        }
        if !sitekit_config::is_static(static_paths, source) {
            return Err(SettingError::invalid(
                key,
                format!("`{source}` is not covered by `static_paths`"),
            ));
        }
        if let Some(other) = outputs.insert(meta.path.normalize(), source) {
            return Err(SettingError::invalid(
                format!("{key}.path"),
                format!("`{}` is also the output of `{other}`", meta.path),
            ));
        }
    }
    Ok(())
}

fn check_links(key: &str, links: &[Link]) -> Result<(), SettingError> {
    for (i, link) in links.iter().enumerate() {
        if link.label.trim().is_empty() {
            return Err(SettingError::invalid(
                format!("{key}[{i}]"),
                "label must not be empty",
            ));
        }
        if link.url.trim().is_empty() {
            return Err(SettingError::invalid(
                format!("{key}[{i}]"),
                format!("`{}` has no URL", link.label),
            ));
        }
    }
    Ok(())
}

fn check_pagination(pagination: Pagination) -> Result<(), SettingError> {
    if pagination.per_page() == Some(0) {
        return Err(SettingError::invalid(
            "pagination",
            "page size must be at least 1",
        ));
    }
    Ok(())
}

fn check_markdown_extensions(extensions: &[MarkdownExtension]) -> Result<(), SettingError> {
    for (i, ext) in extensions.iter().enumerate() {
        if extensions[..i].iter().any(|other| other.name() == ext.name()) {
            return Err(SettingError::invalid(
                format!("markdown_extensions[{i}]"),
                format!("`{}` is enabled more than once", ext.name()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    const FIXTURE: &str = "tests/fixtures/site/_site.yml";

    fn development() -> Settings {
        Settings::from_config(Config::from_file(FIXTURE).unwrap()).unwrap()
    }

    fn production() -> Settings {
        let config = Config::from_file_for(FIXTURE, Environment::Production).unwrap();
        Settings::from_config(config).unwrap()
    }

    /// Parse `yaml` on top of the minimal valid settings, rooted at the fixture site.
    fn with(yaml: &str) -> Result<Settings> {
        let base = "author: A\nsite_name: S\nsite_url: http://localhost:8000\ntimezone: UTC\ndefault_language: en\ntheme: themes/commentout\n";
        let mut value: serde_yaml::Mapping = serde_yaml::from_str(base).unwrap();
        if !yaml.trim().is_empty() {
            let extra: serde_yaml::Mapping = serde_yaml::from_str(yaml).unwrap();
            for (k, v) in extra {
                if v.is_null() {
                    value.remove(&k);
                } else {
                    value.insert(k, v);
                }
            }
        }
        let text = serde_yaml::to_string(&value).unwrap();
        let mut config: Config = text.parse().unwrap();
        config.root = path::Path::new("tests/fixtures/site").to_owned();
        Settings::from_config(config)
    }

    fn setting_error(result: Result<Settings>) -> SettingError {
        result
            .unwrap_err()
            .downcast::<SettingError>()
            .unwrap()
    }

    #[test]
    fn development_variant() {
        let settings = development();
        assert_eq!(settings.environment(), Environment::Development);
        assert_eq!(settings.site_url(), "http://localhost:8000");
        assert!(settings.feeds().all_disabled());
        assert!(settings.feed_targets().is_empty());
        assert!(settings.static_files().is_empty());
        assert_eq!(settings.author(), "Andy Gocke");
        assert_eq!(settings.site_name(), "comment out");
        assert_eq!(settings.timezone(), chrono_tz::America::Los_Angeles);
        assert_eq!(settings.default_language(), "en");
        assert_eq!(settings.theme(), "themes/commentout");
        assert!(!settings.is_paginated());
        assert_eq!(settings.per_page(), None);
        assert!(!settings.relative_urls());
    }

    #[test]
    fn production_variant() {
        let settings = production();
        assert_eq!(settings.environment(), Environment::Production);
        assert_eq!(settings.site_url(), "http://commentout.com");
        assert!(settings.feeds().all_disabled());
        let files: Vec<_> = settings
            .static_files()
            .iter()
            .map(|f| (f.source().as_str().to_owned(), f.output().as_str().to_owned()))
            .collect();
        assert_eq!(
            files,
            [
                ("extra/CNAME".to_owned(), "CNAME".to_owned()),
                ("extra/favicon.ico".to_owned(), "favicon.ico".to_owned()),
            ]
        );
        assert!(settings.static_files().iter().all(StaticFile::is_remapped));
    }

    #[test]
    fn variants_share_everything_else() {
        let dev = development();
        let prod = production();
        assert_eq!(dev.author(), prod.author());
        assert_eq!(dev.site_name(), prod.site_name());
        assert_eq!(dev.timezone(), prod.timezone());
        assert_eq!(dev.theme_dir(), prod.theme_dir());
        assert_eq!(dev.links(), prod.links());
        assert_eq!(dev.social(), prod.social());
        assert_eq!(dev.markdown_extensions(), prod.markdown_extensions());
    }

    #[test]
    fn links_keep_order() {
        let settings = development();
        let links: Vec<_> = settings
            .links()
            .iter()
            .map(|l| (l.label.as_str(), l.url.as_str()))
            .collect();
        assert_eq!(
            links,
            [
                ("Pelican", "http://getpelican.com/"),
                ("Python.org", "http://python.org/"),
                ("Jinja2", "http://jinja.pocoo.org/"),
                ("You can modify those links in your config file", "#"),
            ]
        );
        let social: Vec<_> = settings.social().iter().map(|l| l.label.as_str()).collect();
        assert_eq!(
            social,
            ["You can add links in your config file", "Another social link"]
        );
    }

    #[test]
    fn display_reloads_to_same_settings() {
        let settings = production();
        let mut config: Config = settings.to_string().parse().unwrap();
        config.root = settings.root().to_owned();
        config.environment = settings.environment();
        assert_eq!(Settings::from_config(config).unwrap(), settings);
    }

    #[test]
    fn missing_required_key() {
        for key in [
            "author",
            "site_name",
            "site_url",
            "timezone",
            "default_language",
            "theme",
        ] {
            let err = setting_error(with(&format!("{key}: ~\n")));
            assert_eq!(err.key(), key);
            assert!(err.is_missing());
        }
    }

    #[test]
    fn invalid_site_url() {
        let err = setting_error(with("site_url: localhost:8000/blog\n"));
        assert_eq!(err.key(), "site_url");
    }

    #[test]
    fn relative_urls_skip_url_check() {
        let settings = with("site_url: ''\nrelative_urls: true\n").unwrap();
        assert!(settings.relative_urls());
        assert_eq!(settings.url_for("/theme/css/main.css"), "theme/css/main.css");
    }

    #[test]
    fn url_for_joins_site_url() {
        let settings = with("site_url: 'http://commentout.com/'\n").unwrap();
        assert_eq!(
            settings.url_for("/feeds/all.atom.xml"),
            "http://commentout.com/feeds/all.atom.xml"
        );
    }

    #[test]
    fn invalid_timezone() {
        let err = setting_error(with("timezone: Pacific/Atlantis\n"));
        assert_eq!(err.key(), "timezone");
    }

    #[test]
    fn missing_theme_dir() {
        let err = setting_error(with("theme: themes/missing\n"));
        assert_eq!(err.key(), "theme");
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn date_format_drives_format_date() {
        let settings = with("date_format: '%Y-%m-%d'\ntimezone: America/Los_Angeles\n").unwrap();
        let date = chrono::DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .unwrap()
            .with_timezone(&chrono::Utc);
        assert_eq!(settings.format_date(date), "2023-12-31");
        assert_eq!(settings.localize(date).to_rfc3339(), "2023-12-31T16:00:00-08:00");
    }

    #[test]
    fn default_date_format() {
        let settings = with("").unwrap();
        assert_eq!(settings.date_format(), "%a %d %B %Y");
    }

    #[test]
    fn feeds_enabled_independently() {
        let settings =
            with("feeds: {category_atom: true, author_rss: 'feeds/authors/{slug}.xml'}\n").unwrap();
        let targets = settings.feed_targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].path_for("rust"), "feeds/rust.atom.xml");
        assert_eq!(targets[1].path_for("andy"), "feeds/authors/andy.xml");
    }

    #[test]
    fn feed_with_wrong_placeholder() {
        let err = setting_error(with("feeds: {all_atom: 'feeds/{slug}.xml'}\n"));
        assert_eq!(err.key(), "feeds.all_atom");
    }

    #[test]
    fn pagination_page_size() {
        let settings = with("pagination: 5\n").unwrap();
        assert_eq!(settings.per_page().map(NonZeroU32::get), Some(5));
        let settings = with("pagination: true\n").unwrap();
        assert_eq!(settings.per_page().map(NonZeroU32::get), Some(10));
        let err = setting_error(with("pagination: 0\n"));
        assert_eq!(err.key(), "pagination");
    }

    #[test]
    fn static_paths_default_placement() {
        let settings = with("static_paths: [images, extra]\nextra_path_metadata: {extra/CNAME: {path: CNAME}}\n").unwrap();
        let files = settings.static_files();
        assert_eq!(files.len(), 3);
        assert!(!files[0].is_remapped());
        assert_eq!(files[2].source().as_str(), "extra/CNAME");
        assert_eq!(files[2].output().as_str(), "CNAME");

        assert_eq!(
            settings
                .output_path(relative_path::RelativePath::new("images/logo.png"))
                .unwrap()
                .as_str(),
            "images/logo.png"
        );
        assert_eq!(
            settings
                .output_path(relative_path::RelativePath::new("extra/CNAME"))
                .unwrap()
                .as_str(),
            "CNAME"
        );
        assert_eq!(
            settings.output_path(relative_path::RelativePath::new("content/post.md")),
            None
        );
    }

    #[test]
    fn static_files_match_metadata_by_normalized_path() {
        let settings = with(
            "static_paths: [./extra/CNAME]\nextra_path_metadata: {extra/CNAME: {path: CNAME}}\n",
        )
        .unwrap();
        let files = settings.static_files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].source().as_str(), "./extra/CNAME");
        assert_eq!(files[0].output().as_str(), "CNAME");
        assert_eq!(
            settings
                .output_path(relative_path::RelativePath::new("extra/CNAME"))
                .unwrap()
                .as_str(),
            "CNAME"
        );
    }

    #[test]
    fn metadata_listed_twice() {
        let err = setting_error(with(
            "static_paths: [extra]\nextra_path_metadata: {extra/CNAME: {path: CNAME}, ./extra/CNAME: {path: cname.txt}}\n",
        ));
        assert_eq!(err.key(), "extra_path_metadata.extra/CNAME");
        assert!(err.to_string().contains("same file"));
    }

    #[test]
    fn metadata_outside_static_paths() {
        let err = setting_error(with(
            "static_paths: [images]\nextra_path_metadata: {extra/CNAME: {path: CNAME}}\n",
        ));
        assert_eq!(err.key(), "extra_path_metadata.extra/CNAME");
    }

    #[test]
    fn metadata_conflicting_outputs() {
        let err = setting_error(with(
            "static_paths: [extra]\nextra_path_metadata: {extra/a: {path: CNAME}, extra/b: {path: CNAME}}\n",
        ));
        assert_eq!(err.key(), "extra_path_metadata.extra/b.path");
    }

    #[test]
    fn static_path_escaping_site() {
        let err = setting_error(with("static_paths: [../outside]\n"));
        assert_eq!(err.key(), "static_paths[0]");
    }

    #[test]
    fn static_path_listed_twice() {
        let err = setting_error(with("static_paths: [images, ./images]\n"));
        assert_eq!(err.key(), "static_paths[1]");
    }

    #[test]
    fn link_without_url() {
        let err = setting_error(with("links: [[Pelican, '']]\n"));
        assert_eq!(err.key(), "links[0]");
    }

    #[test]
    fn duplicate_markdown_extension() {
        let err = setting_error(with("markdown_extensions: [extra, toc, extra]\n"));
        assert_eq!(err.key(), "markdown_extensions[2]");
    }
}
