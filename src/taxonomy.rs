//! State → city taxonomy built from flat location records
//!
//! Construction happens in two passes: every record's jurisdiction is
//! validated first, then records are folded into state and city nodes. A
//! single bad abbreviation aborts the build before any node exists.
//!
//! Business aggregates are supplied at build time through
//! [`TaxonomyBuilder::with_businesses`]; a finished [`Taxonomy`] is never
//! mutated.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

use crate::error::InvalidJurisdictionError;
use crate::jurisdictions::{self, Jurisdiction};
use crate::models::{ordered_map, BusinessRecord, CityNode, LocationRecord, StateNode};
use crate::normalize::slugify;
use crate::resolver::build_location_path;

/// Two distinct raw city names that normalize to the same slug in one state.
///
/// The first-seen name stays the display name; the later spelling is merged
/// into the same node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlugCollision {
    pub state_abbr: String,
    pub slug: String,
    pub kept_name: String,
    pub merged_name: String,
    /// Location record that introduced `merged_name`
    pub record_id: String,
}

/// Immutable snapshot of the directory's location structure
#[derive(Debug, Clone, Serialize)]
pub struct Taxonomy {
    #[serde(serialize_with = "ordered_map")]
    states: HashMap<String, StateNode>,
    collisions: Vec<SlugCollision>,
    unmatched_businesses: usize,
    skipped_locations: usize,
    built_at: DateTime<Utc>,
}

impl Taxonomy {
    /// The `state_abbr → StateNode` mapping; iteration order is unspecified
    pub fn states(&self) -> &HashMap<String, StateNode> {
        &self.states
    }

    pub fn into_states(self) -> HashMap<String, StateNode> {
        self.states
    }

    /// Case-insensitive state lookup
    pub fn state(&self, abbr: &str) -> Option<&StateNode> {
        self.states.get(&abbr.trim().to_ascii_uppercase())
    }

    /// Look up a city by state abbreviation and display name or slug
    pub fn city(&self, abbr: &str, name_or_slug: &str) -> Option<&CityNode> {
        self.state(abbr)?.city(name_or_slug)
    }

    /// States sorted alphabetically by full name
    pub fn sorted_states(&self) -> Vec<&StateNode> {
        let mut states: Vec<_> = self.states.values().collect();
        states.sort_by(|a, b| a.name.cmp(&b.name));
        states
    }

    pub fn collisions(&self) -> &[SlugCollision] {
        &self.collisions
    }

    /// Businesses that did not land on any city node
    pub fn unmatched_businesses(&self) -> usize {
        self.unmatched_businesses
    }

    /// Location records dropped because their city name has no usable slug
    pub fn skipped_locations(&self) -> usize {
        self.skipped_locations
    }

    pub fn built_at(&self) -> DateTime<Utc> {
        self.built_at
    }

    pub fn city_count(&self) -> usize {
        self.states.values().map(|s| s.cities.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Canonical path of every state and city page, sorted
    pub fn location_paths(&self) -> Vec<String> {
        let mut paths = Vec::with_capacity(self.states.len() + self.city_count());
        for state in self.states.values() {
            paths.push(build_location_path(&state.abbr, None));
            for city in state.cities.values().filter(|c| !c.slug.is_empty()) {
                paths.push(build_location_path(&state.abbr, Some(&city.slug)));
            }
        }
        paths.sort();
        paths
    }
}

#[derive(Debug, Default, Clone, Copy)]
struct RatingTally {
    count: u64,
    rated: u64,
    rating_sum: f64,
}

impl RatingTally {
    fn add(&mut self, rating: Option<f64>) {
        self.count += 1;
        if let Some(r) = rating {
            self.rated += 1;
            self.rating_sum += r;
        }
    }

    fn merge(&mut self, other: RatingTally) {
        self.count += other.count;
        self.rated += other.rated;
        self.rating_sum += other.rating_sum;
    }

    fn average(&self) -> f64 {
        if self.rated == 0 {
            0.0
        } else {
            self.rating_sum / self.rated as f64
        }
    }
}

/// Builds a [`Taxonomy`] from location records, optionally folding in
/// business aggregates
#[derive(Debug, Default, Clone, Copy)]
pub struct TaxonomyBuilder<'a> {
    businesses: &'a [BusinessRecord],
}

impl<'a> TaxonomyBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Businesses whose counts and ratings feed the city and state aggregates
    pub fn with_businesses(mut self, businesses: &'a [BusinessRecord]) -> Self {
        self.businesses = businesses;
        self
    }

    pub fn build(&self, locations: &[LocationRecord]) -> Result<Taxonomy, InvalidJurisdictionError> {
        let resolved = validate_all(locations)?;

        let mut states: HashMap<String, StateNode> = HashMap::new();
        let mut collisions = Vec::new();

        let mut skipped = 0;

        for (jurisdiction, record) in resolved {
            let slug = slugify(&record.city);
            if slug.is_empty() {
                warn!(
                    "Skipping location {} in {}: city {:?} has no usable slug",
                    record.id, jurisdiction.abbr, record.city
                );
                skipped += 1;
                continue;
            }

            let state = states
                .entry(jurisdiction.abbr.to_string())
                .or_insert_with(|| StateNode {
                    name: jurisdiction.name.to_string(),
                    abbr: jurisdiction.abbr.to_string(),
                    cities: HashMap::new(),
                    total_businesses: 0,
                    average_rating: 0.0,
                });

            let city = state.cities.entry(slug.clone()).or_insert_with(|| CityNode {
                name: record.city.clone(),
                slug: slug.clone(),
                business_count: 0,
                average_rating: 0.0,
                variants: Vec::new(),
                location_ids: Vec::new(),
                zips: BTreeSet::new(),
            });

            if city.name != record.city && !city.variants.contains(&record.city) {
                warn!(
                    "Slug collision in {}: {:?} merged into {:?} ({})",
                    jurisdiction.abbr, record.city, city.name, slug
                );
                collisions.push(SlugCollision {
                    state_abbr: jurisdiction.abbr.to_string(),
                    slug: slug.clone(),
                    kept_name: city.name.clone(),
                    merged_name: record.city.clone(),
                    record_id: record.id.clone(),
                });
                city.variants.push(record.city.clone());
            } else if !city.location_ids.is_empty() {
                debug!(
                    "Merging location {} into {}/{}",
                    record.id, jurisdiction.abbr, slug
                );
            }

            city.location_ids.push(record.id.clone());
            city.zips.extend(record.zips.iter().cloned());
        }

        let unmatched_businesses = apply_businesses(&mut states, self.businesses);

        info!(
            "Built taxonomy: {} states, {} cities from {} locations ({} collisions, {} skipped)",
            states.len(),
            states.values().map(|s| s.cities.len()).sum::<usize>(),
            locations.len(),
            collisions.len(),
            skipped
        );

        Ok(Taxonomy {
            states,
            collisions,
            unmatched_businesses,
            skipped_locations: skipped,
            built_at: Utc::now(),
        })
    }
}

/// Resolve every record's jurisdiction up front so a bad record fails the
/// build before any node is created
fn validate_all(
    locations: &[LocationRecord],
) -> Result<Vec<(&'static Jurisdiction, &LocationRecord)>, InvalidJurisdictionError> {
    locations
        .iter()
        .map(|record| {
            jurisdictions::lookup(&record.state_abbr)
                .map(|j| (j, record))
                .ok_or_else(|| {
                    InvalidJurisdictionError::for_record(record.state_abbr.trim(), &record.id)
                })
        })
        .collect()
}

/// Fold business counts and ratings into city and state nodes.
/// Returns the number of businesses that matched no city.
fn apply_businesses(states: &mut HashMap<String, StateNode>, businesses: &[BusinessRecord]) -> usize {
    if businesses.is_empty() {
        return 0;
    }

    let mut tallies: HashMap<(String, String), RatingTally> = HashMap::new();
    let mut unmatched = 0;

    for business in businesses {
        let abbr = business.state_abbr.trim().to_ascii_uppercase();
        let slug = slugify(&business.city);
        let known = states
            .get(&abbr)
            .is_some_and(|state| state.cities.contains_key(&slug));

        if !known {
            if unmatched < 5 {
                warn!(
                    "Business {:?} in {}, {} matches no city",
                    business.name, business.city, abbr
                );
            }
            unmatched += 1;
            continue;
        }

        tallies.entry((abbr, slug)).or_default().add(business.rating);
    }

    if unmatched > 0 {
        warn!("{} businesses matched no city", unmatched);
    }

    let mut state_tallies: HashMap<String, RatingTally> = HashMap::new();
    for ((abbr, slug), tally) in tallies {
        if let Some(city) = states.get_mut(&abbr).and_then(|s| s.cities.get_mut(&slug)) {
            city.business_count = tally.count;
            city.average_rating = tally.average();
        }
        state_tallies.entry(abbr).or_default().merge(tally);
    }

    for (abbr, tally) in state_tallies {
        if let Some(state) = states.get_mut(&abbr) {
            state.total_businesses = tally.count;
            state.average_rating = tally.average();
        }
    }

    unmatched
}

/// Build a taxonomy with zeroed aggregates
pub fn build(locations: &[LocationRecord]) -> Result<Taxonomy, InvalidJurisdictionError> {
    TaxonomyBuilder::new().build(locations)
}

/// Fold location records into the `state_abbr → StateNode` mapping.
///
/// Fails fast, producing nothing, if any record has an unrecognized
/// jurisdiction.
pub fn transform_to_state_city(
    locations: &[LocationRecord],
) -> Result<HashMap<String, StateNode>, InvalidJurisdictionError> {
    build(locations).map(Taxonomy::into_states)
}
