//! Shared, atomically replaceable directory snapshot
//!
//! Readers clone an `Arc` to the current snapshot and keep using it for as
//! long as they like. A reload builds the next snapshot completely before
//! swapping the pointer, so readers observe either the old snapshot or the
//! new one, never a mix.

use std::sync::{Arc, PoisonError, RwLock};
use tracing::{info, warn};

use crate::categories::CategoryIndex;
use crate::config::SourceConfig;
use crate::error::LoadError;
use crate::loader::{load_categories, load_taxonomy};
use crate::taxonomy::Taxonomy;

/// Everything page generation needs from one point-in-time read
#[derive(Debug, Clone)]
pub struct Directory {
    pub taxonomy: Taxonomy,
    pub categories: CategoryIndex,
}

impl Directory {
    pub fn load(config: &SourceConfig) -> Result<Self, LoadError> {
        let taxonomy = load_taxonomy(config)?;
        let categories = match &config.categories {
            Some(path) => load_categories(path)?,
            None => CategoryIndex::default(),
        };
        Ok(Self {
            taxonomy,
            categories,
        })
    }
}

#[derive(Debug)]
pub struct DirectoryStore {
    current: RwLock<Arc<Directory>>,
}

impl DirectoryStore {
    pub fn new(directory: Directory) -> Self {
        Self {
            current: RwLock::new(Arc::new(directory)),
        }
    }

    /// Build the initial snapshot from the configured sources
    pub fn open(config: &SourceConfig) -> Result<Self, LoadError> {
        Ok(Self::new(Directory::load(config)?))
    }

    /// The snapshot in effect right now
    pub fn current(&self) -> Arc<Directory> {
        // The guarded value is a plain pointer; a poisoned lock still holds a whole snapshot
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replace the snapshot with an already-built one
    pub fn replace(&self, directory: Directory) -> Arc<Directory> {
        self.swap(Arc::new(directory))
    }

    fn swap(&self, next: Arc<Directory>) -> Arc<Directory> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, next)
    }

    /// Rebuild from the sources and swap the new snapshot in.
    ///
    /// On failure the previous snapshot stays in place.
    pub fn reload(&self, config: &SourceConfig) -> Result<Arc<Directory>, LoadError> {
        match Directory::load(config) {
            Ok(directory) => {
                info!(
                    "Reloaded directory: {} states, {} cities, {} categories",
                    directory.taxonomy.states().len(),
                    directory.taxonomy.city_count(),
                    directory.categories.len()
                );
                let next = Arc::new(directory);
                self.swap(Arc::clone(&next));
                Ok(next)
            }
            Err(e) => {
                warn!("Reload failed, keeping previous snapshot: {}", e);
                Err(e)
            }
        }
    }
}
