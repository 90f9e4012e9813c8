use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::normalize::slugify;

/// Raw row from the location CSV
#[derive(Debug, Deserialize)]
pub struct CsvLocationRecord {
    pub city: String,
    pub state: String,
    pub state_abbr: String,
    #[serde(default)]
    pub county_fips: String,
    #[serde(default)]
    pub county_name: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub zips: String,
    pub id: String,
}

/// Raw row from the category CSV
#[derive(Debug, Deserialize)]
pub struct CsvCategoryRecord {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub aliases: Option<String>,
    #[serde(default)]
    pub parent_category: Option<String>,
}

/// Raw row from the business CSV
#[derive(Debug, Deserialize)]
pub struct CsvBusinessRecord {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category_slug: String,
    pub city: String,
    pub state_abbr: String,
    #[serde(default)]
    pub rating: Option<f64>,
}

/// A place that gets its own pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub city: String,
    /// Full state name as given by the source
    pub state: String,
    pub state_abbr: String,
    pub county_fips: String,
    pub county_name: String,
    pub lat: f64,
    pub lng: f64,
    pub zips: BTreeSet<String>,
    pub id: String,
}

/// A business category, e.g. "Tire Shop"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Slug of the parent category
    #[serde(default)]
    pub parent_category: Option<String>,
}

/// A listed business, used only to compute aggregates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub name: String,
    pub category_slug: String,
    pub city: String,
    pub state_abbr: String,
    pub rating: Option<f64>,
}

/// A state (or DC / territory) and its cities
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateNode {
    pub name: String,
    pub abbr: String,
    #[serde(serialize_with = "ordered_map")]
    pub cities: HashMap<String, CityNode>,
    pub total_businesses: u64,
    pub average_rating: f64,
}

/// A city within a state, addressed by its slug
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityNode {
    /// First-seen display name
    pub name: String,
    pub slug: String,
    pub business_count: u64,
    pub average_rating: f64,
    /// Other spellings merged into this node because they share the slug
    pub variants: Vec<String>,
    pub location_ids: Vec<String>,
    pub zips: BTreeSet<String>,
}

impl CsvLocationRecord {
    pub fn to_location(&self) -> Result<LocationRecord, String> {
        let city = self.city.trim();
        if slugify(city).is_empty() {
            return Err(format!("city {:?} has no usable slug", self.city));
        }
        let id = self.id.trim();
        if id.is_empty() {
            return Err(format!("location {city:?} has no id"));
        }
        if !self.lat.is_finite() || !self.lng.is_finite() {
            return Err(format!("location {id} has non-finite coordinates"));
        }

        Ok(LocationRecord {
            city: city.to_string(),
            state: self.state.trim().to_string(),
            state_abbr: self.state_abbr.trim().to_ascii_uppercase(),
            county_fips: self.county_fips.trim().to_string(),
            county_name: self.county_name.trim().to_string(),
            lat: self.lat,
            lng: self.lng,
            zips: split_zips(&self.zips),
            id: id.to_string(),
        })
    }
}

impl CsvCategoryRecord {
    pub fn to_category(&self) -> CategoryRecord {
        CategoryRecord {
            name: self.name.trim().to_string(),
            slug: self.slug.trim().to_string(),
            description: non_blank(self.description.as_deref()),
            aliases: self
                .aliases
                .as_deref()
                .unwrap_or_default()
                .split('|')
                .map(str::trim)
                .filter(|a| !a.is_empty())
                .map(str::to_string)
                .collect(),
            parent_category: non_blank(self.parent_category.as_deref()),
        }
    }
}

impl CsvBusinessRecord {
    pub fn to_business(&self) -> BusinessRecord {
        BusinessRecord {
            name: self.name.trim().to_string(),
            category_slug: self.category_slug.trim().to_string(),
            city: self.city.trim().to_string(),
            state_abbr: self.state_abbr.trim().to_ascii_uppercase(),
            rating: self.rating.filter(|r| r.is_finite()),
        }
    }
}

impl StateNode {
    /// Cities sorted alphabetically by display name, for rendering
    pub fn sorted_cities(&self) -> Vec<&CityNode> {
        let mut cities: Vec<_> = self.cities.values().collect();
        cities.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
        cities
    }

    /// Look up a city by display name or slug
    pub fn city(&self, name_or_slug: &str) -> Option<&CityNode> {
        self.cities.get(&slugify(name_or_slug))
    }
}

/// Zip codes are separated by whitespace or commas
fn split_zips(raw: &str) -> BTreeSet<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|z| !z.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Serialize a map with sorted keys so exports are stable
pub(crate) fn ordered_map<S, V>(map: &HashMap<String, V>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    V: Serialize,
{
    let ordered: BTreeMap<_, _> = map.iter().collect();
    ordered.serialize(serializer)
}
