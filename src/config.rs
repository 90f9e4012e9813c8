//! Where the raw datasets live.

use std::path::PathBuf;

/// Location table the binaries read when no path is given
pub const DEFAULT_LOCATIONS: &str = "data/locations.csv";

/// Paths to the raw record sources for one load cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub locations: PathBuf,
    /// Categories are optional; without them the directory has no category index
    pub categories: Option<PathBuf>,
    /// Businesses feed the per-city and per-state aggregates
    pub businesses: Option<PathBuf>,
}

impl SourceConfig {
    pub fn new(locations: impl Into<PathBuf>) -> Self {
        Self {
            locations: locations.into(),
            categories: None,
            businesses: None,
        }
    }

    pub fn with_categories(mut self, path: impl Into<PathBuf>) -> Self {
        self.categories = Some(path.into());
        self
    }

    pub fn with_businesses(mut self, path: impl Into<PathBuf>) -> Self {
        self.businesses = Some(path.into());
        self
    }

    /// Attach whichever optional tables were supplied
    pub fn with_optional(mut self, categories: Option<PathBuf>, businesses: Option<PathBuf>) -> Self {
        self.categories = categories;
        self.businesses = businesses;
        self
    }
}
