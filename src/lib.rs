//! Location and category taxonomy for a local-business directory.
//!
//! Flat location, category and business tables go in; an immutable
//! `state → city` structure with slug-addressable nodes and aggregates comes
//! out, together with the pure naming and routing helpers page generation
//! uses to build canonical paths.

pub mod categories;
pub mod config;
pub mod error;
pub mod jurisdictions;
pub mod loader;
pub mod models;
pub mod normalize;
pub mod resolver;
pub mod store;
pub mod taxonomy;

pub use categories::CategoryIndex;
pub use config::SourceConfig;
pub use error::{CategoryError, InvalidJurisdictionError, LoadError};
pub use jurisdictions::{Jurisdiction, JurisdictionKind};
pub use loader::load_taxonomy;
pub use models::{BusinessRecord, CategoryRecord, CityNode, LocationRecord, StateNode};
pub use normalize::{pluralize, slugify};
pub use resolver::{build_location_path, resolve_jurisdiction, validate_jurisdiction};
pub use store::{Directory, DirectoryStore};
pub use taxonomy::{transform_to_state_city, SlugCollision, Taxonomy, TaxonomyBuilder};
