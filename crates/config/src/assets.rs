use std::collections::BTreeMap;

use crate::RelPath;

/// Per-file overrides for static paths, keyed by source path.
pub type PathMetadataMap = BTreeMap<RelPath, PathMetadata>;

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[serde(deny_unknown_fields)]
pub struct PathMetadata {
    /// Output location, relative to the output root.
    pub path: RelPath,
}

impl PathMetadata {
    pub fn new(path: impl Into<RelPath>) -> Self {
        Self { path: path.into() }
    }
}

/// Whether `path` is one of `static_paths` or lives beneath one of them.
pub fn is_static(static_paths: &[RelPath], path: &relative_path::RelativePath) -> bool {
    let path = path.normalize();
    static_paths
        .iter()
        .any(|dir| path.starts_with(dir.normalize()))
}
