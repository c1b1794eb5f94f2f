pub const DEFAULT_PER_PAGE: u32 = 10;

/// Listing pagination: `false`, `true` or a page size.
#[derive(Copy, Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Pagination {
    Enabled(bool),
    PerPage(u32),
}

impl Pagination {
    pub fn is_enabled(self) -> bool {
        match self {
            Pagination::Enabled(enabled) => enabled,
            Pagination::PerPage(_) => true,
        }
    }

    /// Requested page size, `None` when pagination is off.
    ///
    /// A page size of zero is passed through; callers reject it.
    pub fn per_page(self) -> Option<u32> {
        match self {
            Pagination::Enabled(false) => None,
            Pagination::Enabled(true) => Some(DEFAULT_PER_PAGE),
            Pagination::PerPage(per_page) => Some(per_page),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination::Enabled(false)
    }
}
