use sitekit_config::RelPath;

/// A static file or directory and where it lands in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticFile {
    source: RelPath,
    output: RelPath,
}

impl StaticFile {
    pub(crate) fn new(source: RelPath, output: Option<RelPath>) -> Self {
        let output = output.unwrap_or_else(|| source.clone());
        Self { source, output }
    }

    pub fn source(&self) -> &relative_path::RelativePath {
        &self.source
    }

    pub fn output(&self) -> &relative_path::RelativePath {
        &self.output
    }

    /// Whether `extra_path_metadata` moved this file.
    pub fn is_remapped(&self) -> bool {
        self.source.normalize() != self.output.normalize()
    }
}
