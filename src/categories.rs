//! Validated category set with slug lookups and parent/child navigation.

use std::collections::{HashMap, HashSet};

use crate::error::CategoryError;
use crate::models::CategoryRecord;
use crate::normalize::{is_valid_slug, pluralize};

#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    by_slug: HashMap<String, CategoryRecord>,
}

impl CategoryIndex {
    /// Validate and index a category set.
    ///
    /// Every slug must be URL-safe and unique, and every `parent_category`
    /// must name another category in the set.
    pub fn new(records: Vec<CategoryRecord>) -> Result<Self, CategoryError> {
        let mut by_slug = HashMap::with_capacity(records.len());

        for record in records {
            if !is_valid_slug(&record.slug) {
                return Err(CategoryError::InvalidCategorySlug(record.slug));
            }
            if by_slug.contains_key(&record.slug) {
                return Err(CategoryError::DuplicateCategorySlug(record.slug));
            }
            by_slug.insert(record.slug.clone(), record);
        }

        for record in by_slug.values() {
            if let Some(parent) = &record.parent_category {
                if parent == &record.slug || !by_slug.contains_key(parent) {
                    return Err(CategoryError::UnknownParentCategory {
                        slug: record.slug.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }

        Ok(Self { by_slug })
    }

    pub fn len(&self) -> usize {
        self.by_slug.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slug.is_empty()
    }

    /// Exact slug lookup; surrounding whitespace and case are ignored
    pub fn get(&self, slug: &str) -> Option<&CategoryRecord> {
        self.by_slug.get(&slug.trim().to_lowercase())
    }

    /// Plural display name for a category ("Moving Companies")
    pub fn display_plural(&self, slug: &str) -> Option<String> {
        self.get(slug).map(|c| pluralize(&c.name))
    }

    /// Direct children of a category, sorted by name
    pub fn children(&self, slug: &str) -> Vec<&CategoryRecord> {
        let Some(parent) = self.get(slug) else {
            return Vec::new();
        };
        let mut children: Vec<_> = self
            .by_slug
            .values()
            .filter(|c| c.parent_category.as_deref() == Some(parent.slug.as_str()))
            .collect();
        children.sort_by(|a, b| a.name.cmp(&b.name));
        children
    }

    /// Categories without a parent, sorted by name
    pub fn roots(&self) -> Vec<&CategoryRecord> {
        let mut roots: Vec<_> = self
            .by_slug
            .values()
            .filter(|c| c.parent_category.is_none())
            .collect();
        roots.sort_by(|a, b| a.name.cmp(&b.name));
        roots
    }

    /// Chain of ancestors from the direct parent upwards
    pub fn ancestors(&self, slug: &str) -> Vec<&CategoryRecord> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = self.get(slug);

        while let Some(parent_slug) = current.and_then(|c| c.parent_category.as_deref()) {
            // Parent cycles end the walk
            if !seen.insert(parent_slug) {
                break;
            }
            current = self.by_slug.get(parent_slug);
            if let Some(parent) = current {
                chain.push(parent);
            }
        }

        chain
    }

    /// All categories sorted by name
    pub fn sorted(&self) -> Vec<&CategoryRecord> {
        let mut all: Vec<_> = self.by_slug.values().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str, slug: &str, parent: Option<&str>) -> CategoryRecord {
        CategoryRecord {
            name: name.to_string(),
            slug: slug.to_string(),
            description: None,
            aliases: vec![format!("{} near me", name.to_lowercase())],
            parent_category: parent.map(str::to_string),
        }
    }

    fn sample() -> CategoryIndex {
        CategoryIndex::new(vec![
            category("Auto Service", "auto-services", None),
            category("Tire Shop", "tire-shops", Some("auto-services")),
            category("Body Shop", "body-shops", Some("auto-services")),
            category("Moving Company", "moving-companies", None),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_and_plural() {
        let index = sample();
        assert_eq!(index.len(), 4);
        assert_eq!(index.get(" Tire-Shops ").map(|c| c.name.as_str()), Some("Tire Shop"));
        assert_eq!(index.display_plural("moving-companies").as_deref(), Some("Moving Companies"));
        assert!(index.get("tire shops").is_none());
    }

    #[test]
    fn test_hierarchy() {
        let index = sample();
        let roots: Vec<_> = index.roots().into_iter().map(|c| c.slug.as_str()).collect();
        assert_eq!(roots, vec!["auto-services", "moving-companies"]);

        let children: Vec<_> = index
            .children("auto-services")
            .into_iter()
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(children, vec!["body-shops", "tire-shops"]);

        let ancestors: Vec<_> = index
            .ancestors("tire-shops")
            .into_iter()
            .map(|c| c.slug.as_str())
            .collect();
        assert_eq!(ancestors, vec!["auto-services"]);
        assert!(index.children("missing").is_empty());
    }

    #[test]
    fn test_invalid_slug_rejected() {
        let err = CategoryIndex::new(vec![category("Tire Shop", "Tire Shops", None)]).unwrap_err();
        assert_eq!(err, CategoryError::InvalidCategorySlug("Tire Shops".to_string()));

        assert!(CategoryIndex::new(vec![category("Empty", "", None)]).is_err());
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let err = CategoryIndex::new(vec![
            category("Tire Shop", "tire-shops", None),
            category("Tire Store", "tire-shops", None),
        ])
        .unwrap_err();
        assert_eq!(err, CategoryError::DuplicateCategorySlug("tire-shops".to_string()));
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let err = CategoryIndex::new(vec![category("Tire Shop", "tire-shops", Some("auto"))])
            .unwrap_err();
        assert_eq!(
            err,
            CategoryError::UnknownParentCategory {
                slug: "tire-shops".to_string(),
                parent: "auto".to_string(),
            }
        );

        let self_parent = CategoryIndex::new(vec![category("Loop", "loop", Some("loop"))]);
        assert!(self_parent.is_err());
    }

    #[test]
    fn test_ancestor_cycle_terminates() {
        let index = CategoryIndex::new(vec![
            category("A", "a", Some("b")),
            category("B", "b", Some("a")),
        ])
        .unwrap();
        assert_eq!(index.ancestors("a").len(), 2);
    }
}
