use std::fs;
use std::io::Write;
use std::path;

use anyhow::Context as _;

use crate::error::Result;

const SITE_YML: &str = "author: Your Name
site_name: My Site
site_url: http://localhost:8000

timezone: UTC

default_language: en

theme: themes/default

# Feed generation is usually not desired when developing
feeds:
  all_atom: ~
  category_atom: ~
  translation_atom: ~
  author_atom: ~
  author_rss: ~

# Blogroll
links:
  - [You can modify those links in your config file, \"#\"]

# Social widget
social:
  - [You can add links in your config file, \"#\"]
  - [Another social link, \"#\"]

pagination: false

markdown_extensions:
  - codehilite(css_class=highlight)
  - extra

# Uncomment following line if you want document-relative URLs when developing
#relative_urls: true
";

const SITE_PRODUCTION_YML: &str = "# Applied on top of _site.yml with `--env production`
site_url: https://example.com
relative_urls: false

static_paths:
  - extra/CNAME
  - extra/favicon.ico

extra_path_metadata:
  extra/CNAME: {path: CNAME}
  extra/favicon.ico: {path: favicon.ico}
";

const BASE_HTML: &str = "<!DOCTYPE html>
<html lang=\"{{ DEFAULT_LANG }}\">
  <head>
    <meta charset=\"utf-8\">
    <title>{% block title %}{{ SITENAME }}{% endblock %}</title>
  </head>
  <body>
    {% block content %}{% endblock %}
  </body>
</html>
";

const CNAME: &str = "example.com\n";

const STARTER_FILES: &[(&str, &str)] = &[
    (sitekit_config::CONFIG_FILE, SITE_YML),
    ("_site.production.yml", SITE_PRODUCTION_YML),
    ("themes/default/templates/base.html", BASE_HTML),
    ("extra/CNAME", CNAME),
    ("extra/favicon.ico", ""),
];

pub fn create_new_project<P: AsRef<path::Path>>(dest: P) -> Result<()> {
    create_new_project_for_path(dest.as_ref())
}

fn create_new_project_for_path(dest: &path::Path) -> Result<()> {
    // Nothing is written if any starter file is already present.
    if let Some(existing) = STARTER_FILES
        .iter()
        .map(|(rel, _)| dest.join(rel))
        .find(|p| p.exists())
    {
        anyhow::bail!(
            "Refusing to initialize {}: {} already exists",
            dest.display(),
            existing.display()
        );
    }

    for (rel, content) in STARTER_FILES {
        let file = dest.join(rel);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent)?;
        }
        create_file(&file, content)?;
    }

    Ok(())
}

fn create_file<P: AsRef<path::Path>>(path: P, content: &str) -> Result<()> {
    create_file_for_path(path.as_ref(), content)
}

fn create_file_for_path(path: &path::Path, content: &str) -> Result<()> {
    log::trace!("Creating file {}", path.display());

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .with_context(|| format!("Failed to create file {}", path.display()))?;

    file.write_all(content.as_bytes())?;

    Ok(())
}
