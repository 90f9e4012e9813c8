//! US jurisdiction table for route validation and display
//! Maps 2-letter USPS abbreviations to full English names

use serde::Serialize;
use std::collections::HashMap;
use std::sync::LazyLock;

/// What kind of jurisdiction an abbreviation names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JurisdictionKind {
    State,
    FederalDistrict,
    Territory,
}

/// A recognized jurisdiction: (abbreviation, full name, kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Jurisdiction {
    pub abbr: &'static str,
    pub name: &'static str,
    pub kind: JurisdictionKind,
}

/// Fixed abbreviation table: 50 states, DC and 5 territories
pub static JURISDICTIONS: LazyLock<HashMap<&'static str, Jurisdiction>> = LazyLock::new(|| {
    use JurisdictionKind::{FederalDistrict, State, Territory};

    let mut m = HashMap::with_capacity(56);
    let mut add = |abbr: &'static str, name: &'static str, kind: JurisdictionKind| {
        m.insert(abbr, Jurisdiction { abbr, name, kind });
    };

    // Northeast
    add("CT", "Connecticut", State);
    add("ME", "Maine", State);
    add("MA", "Massachusetts", State);
    add("NH", "New Hampshire", State);
    add("NJ", "New Jersey", State);
    add("NY", "New York", State);
    add("PA", "Pennsylvania", State);
    add("RI", "Rhode Island", State);
    add("VT", "Vermont", State);

    // Midwest
    add("IL", "Illinois", State);
    add("IN", "Indiana", State);
    add("IA", "Iowa", State);
    add("KS", "Kansas", State);
    add("MI", "Michigan", State);
    add("MN", "Minnesota", State);
    add("MO", "Missouri", State);
    add("NE", "Nebraska", State);
    add("ND", "North Dakota", State);
    add("OH", "Ohio", State);
    add("SD", "South Dakota", State);
    add("WI", "Wisconsin", State);

    // South
    add("AL", "Alabama", State);
    add("AR", "Arkansas", State);
    add("DE", "Delaware", State);
    add("FL", "Florida", State);
    add("GA", "Georgia", State);
    add("KY", "Kentucky", State);
    add("LA", "Louisiana", State);
    add("MD", "Maryland", State);
    add("MS", "Mississippi", State);
    add("NC", "North Carolina", State);
    add("OK", "Oklahoma", State);
    add("SC", "South Carolina", State);
    add("TN", "Tennessee", State);
    add("TX", "Texas", State);
    add("VA", "Virginia", State);
    add("WV", "West Virginia", State);

    // West
    add("AK", "Alaska", State);
    add("AZ", "Arizona", State);
    add("CA", "California", State);
    add("CO", "Colorado", State);
    add("HI", "Hawaii", State);
    add("ID", "Idaho", State);
    add("MT", "Montana", State);
    add("NV", "Nevada", State);
    add("NM", "New Mexico", State);
    add("OR", "Oregon", State);
    add("UT", "Utah", State);
    add("WA", "Washington", State);
    add("WY", "Wyoming", State);

    add("DC", "District of Columbia", FederalDistrict);

    // Territories
    add("AS", "American Samoa", Territory);
    add("GU", "Guam", Territory);
    add("MP", "Northern Mariana Islands", Territory);
    add("PR", "Puerto Rico", Territory);
    add("VI", "U.S. Virgin Islands", Territory);

    m
});

/// Look up a jurisdiction by abbreviation, ignoring case and surrounding whitespace
pub fn lookup(abbr: &str) -> Option<&'static Jurisdiction> {
    let key = abbr.trim().to_ascii_uppercase();
    JURISDICTIONS.get(key.as_str())
}

/// Look up a jurisdiction by full name (case-insensitive equality, no prefix matching)
pub fn lookup_by_name(name: &str) -> Option<&'static Jurisdiction> {
    let name = name.trim();
    JURISDICTIONS
        .values()
        .find(|j| j.name.eq_ignore_ascii_case(name))
}

/// All jurisdictions sorted by abbreviation
pub fn all() -> Vec<&'static Jurisdiction> {
    let mut all: Vec<_> = JURISDICTIONS.values().collect();
    all.sort_by_key(|j| j.abbr);
    all
}
