//! Jurisdiction lookups and canonical route paths
//!
//! Every function here is a pure lookup over the static jurisdiction table.
//! Paths are deterministic for a given `(state, city)` pair regardless of
//! casing or whitespace, so canonical URLs and sitemap entries never
//! diverge.

use crate::error::InvalidJurisdictionError;
use crate::jurisdictions::{self, Jurisdiction};
use crate::normalize::{pluralize, slugify};

/// Resolve an abbreviation or a full name to its jurisdiction.
///
/// Abbreviations are tried first, then a case-insensitive equality scan over
/// full names. There is no prefix or fuzzy matching.
pub fn resolve_jurisdiction(abbr_or_name: &str) -> Option<&'static Jurisdiction> {
    jurisdictions::lookup(abbr_or_name).or_else(|| jurisdictions::lookup_by_name(abbr_or_name))
}

/// Full name for an abbreviation ("il" → "Illinois")
pub fn jurisdiction_name(abbr: &str) -> Option<&'static str> {
    jurisdictions::lookup(abbr).map(|j| j.name)
}

/// Abbreviation for a full name ("illinois" → "IL")
pub fn jurisdiction_abbr(name: &str) -> Option<&'static str> {
    jurisdictions::lookup_by_name(name).map(|j| j.abbr)
}

/// True iff the upper-cased abbreviation is in the jurisdiction table
pub fn validate_jurisdiction(abbr: &str) -> bool {
    jurisdictions::lookup(abbr).is_some()
}

/// Canonical location path: lower-cased state, then the slugified city.
///
/// ```
/// use directory_taxonomy::resolver::build_location_path;
///
/// assert_eq!(build_location_path("IL", Some("Downers Grove")), "il/downers-grove");
/// assert_eq!(build_location_path(" ca ", None), "ca");
/// ```
pub fn build_location_path(state: &str, city: Option<&str>) -> String {
    let state = state.trim().to_ascii_lowercase();
    match city.map(slugify).filter(|slug| !slug.is_empty()) {
        Some(city) => format!("{state}/{city}"),
        None => state,
    }
}

/// [`build_location_path`] guarded by [`validate_jurisdiction`]
pub fn checked_location_path(
    state: &str,
    city: Option<&str>,
) -> Result<String, InvalidJurisdictionError> {
    if !validate_jurisdiction(state) {
        return Err(InvalidJurisdictionError::new(state.trim()));
    }
    Ok(build_location_path(state, city))
}

/// Route of a category page scoped to a state or city,
/// e.g. `/tire-shops/il/downers-grove`
pub fn category_location_path(
    category_slug: &str,
    state: &str,
    city: Option<&str>,
) -> Result<String, InvalidJurisdictionError> {
    let location = checked_location_path(state, city)?;
    Ok(format!("/{}/{}", slugify(category_slug), location))
}

/// Page heading such as "Tire Shops in Downers Grove, IL".
///
/// State-level pages use the full jurisdiction name ("Tire Shops in Illinois").
pub fn page_heading(
    category_name: &str,
    state: &str,
    city: Option<&str>,
) -> Result<String, InvalidJurisdictionError> {
    let jurisdiction = jurisdictions::lookup(state)
        .ok_or_else(|| InvalidJurisdictionError::new(state.trim()))?;
    let plural = pluralize(category_name.trim());

    Ok(match city.map(str::trim).filter(|c| !c.is_empty()) {
        Some(city) => format!("{plural} in {city}, {}", jurisdiction.abbr),
        None => format!("{plural} in {}", jurisdiction.name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jurisdictions::JURISDICTIONS;

    #[test]
    fn test_resolve_both_directions() {
        assert_eq!(resolve_jurisdiction("IL").map(|j| j.name), Some("Illinois"));
        assert_eq!(resolve_jurisdiction("illinois").map(|j| j.abbr), Some("IL"));
        assert_eq!(jurisdiction_name("ca"), Some("California"));
        assert_eq!(jurisdiction_abbr("District Of Columbia"), Some("DC"));
        assert!(resolve_jurisdiction("Illin").is_none());
        assert!(resolve_jurisdiction("ZZ").is_none());
    }

    #[test]
    fn test_jurisdiction_round_trip() {
        for abbr in JURISDICTIONS.keys() {
            let name = jurisdiction_name(&abbr.to_lowercase()).unwrap();
            let back = jurisdiction_abbr(&name.to_uppercase()).unwrap();
            assert!(back.eq_ignore_ascii_case(abbr), "{abbr} -> {name} -> {back}");

            let resolved = resolve_jurisdiction(name).unwrap();
            assert_eq!(resolved.abbr, *abbr);
        }
    }

    #[test]
    fn test_validate_jurisdiction() {
        assert!(validate_jurisdiction("IL"));
        assert!(validate_jurisdiction("pr"));
        assert!(validate_jurisdiction("Dc"));
        assert!(!validate_jurisdiction("ZZ"));
        assert!(!validate_jurisdiction("Illinois"));
        assert!(!validate_jurisdiction(""));
    }

    #[test]
    fn test_deterministic_path() {
        assert_eq!(
            build_location_path("il", Some("Downers Grove")),
            build_location_path("IL", Some("downers grove"))
        );
        assert_eq!(
            build_location_path(" IL ", Some("  Downers   Grove ")),
            "il/downers-grove"
        );
    }

    #[test]
    fn test_path_without_city() {
        assert_eq!(build_location_path("TX", None), "tx");
        assert_eq!(build_location_path("TX", Some("  ")), "tx");
    }

    #[test]
    fn test_checked_path_rejects_unknown_state() {
        assert_eq!(
            checked_location_path("CA", Some("Azusa")).unwrap(),
            "ca/azusa"
        );
        let err = checked_location_path("ZZ", Some("Azusa")).unwrap_err();
        assert_eq!(err.abbr, "ZZ");
    }

    #[test]
    fn test_category_location_path() {
        assert_eq!(
            category_location_path("tire-shops", "IL", Some("Downers Grove")).unwrap(),
            "/tire-shops/il/downers-grove"
        );
        assert_eq!(
            category_location_path("Tire Shops", "il", None).unwrap(),
            "/tire-shops/il"
        );
        assert!(category_location_path("tire-shops", "XX", None).is_err());
    }

    #[test]
    fn test_page_heading() {
        assert_eq!(
            page_heading("Tire Shop", "il", Some("Downers Grove")).unwrap(),
            "Tire Shops in Downers Grove, IL"
        );
        assert_eq!(
            page_heading("Family Law Attorney", "IL", None).unwrap(),
            "Family Law Attorneys in Illinois"
        );
        assert!(page_heading("Tire Shop", "ZZ", None).is_err());
    }
}
