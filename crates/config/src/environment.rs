use std::fmt;
use std::path;
use std::str::FromStr;

use crate::Status;

/// Deployment variant the settings are resolved for.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    Development,
    Production,
}

impl Environment {
    pub const ALL: [Environment; 2] = [Environment::Development, Environment::Production];

    pub fn variants() -> [&'static str; 2] {
        ["development", "production"]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }

    /// Overlay file applied on top of `base`, if this variant has one.
    ///
    /// `_site.yml` becomes `_site.production.yml`.
    pub fn overlay_path(self, base: &path::Path) -> Option<path::PathBuf> {
        match self {
            Environment::Development => None,
            Environment::Production => {
                let stem = base.file_stem()?.to_str()?;
                let name = match base.extension().and_then(|e| e.to_str()) {
                    Some(ext) => format!("{stem}.{}.{ext}", self.as_str()),
                    None => format!("{stem}.{}", self.as_str()),
                };
                Some(base.with_file_name(name))
            }
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Status;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(Status::new("Unknown environment")
                .context_with(|c| c.insert("Environment", s.to_owned()))
                .context_with(|c| c.insert("Expected", Environment::variants().join(", ")))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parse_aliases() {
        assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Development);
        assert_eq!(
            "Production".parse::<Environment>().unwrap(),
            Environment::Production
        );
        assert_eq!("prod".parse::<Environment>().unwrap(), Environment::Production);
    }

    #[test]
    fn parse_unknown() {
        assert!("staging".parse::<Environment>().is_err());
    }

    #[test]
    fn display_round_trips() {
        for name in Environment::variants() {
            let env: Environment = name.parse().unwrap();
            assert_eq!(env.to_string(), name);
        }
    }

    #[test]
    fn development_has_no_overlay() {
        let base = path::Path::new("site/_site.yml");
        assert_eq!(Environment::Development.overlay_path(base), None);
    }

    #[test]
    fn production_overlay_sits_beside_base() {
        let base = path::Path::new("site/_site.yml");
        assert_eq!(
            Environment::Production.overlay_path(base).unwrap(),
            path::Path::new("site/_site.production.yml")
        );
    }

    #[test]
    fn production_overlay_without_extension() {
        let base = path::Path::new("settings");
        assert_eq!(
            Environment::Production.overlay_path(base).unwrap(),
            path::Path::new("settings.production")
        );
    }
}
