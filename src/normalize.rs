//! Name normalization: URL slugs and plural display names

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Irregular plural suffixes, checked in order; first match wins
pub const PLURAL_EXCEPTIONS: [(&str, &str); 5] = [
    ("Company", "Companies"),
    ("Attorney", "Attorneys"),
    ("Agency", "Agencies"),
    ("Factory", "Factories"),
    ("Business", "Businesses"),
];

/// Letters with no canonical decomposition and their ASCII spelling
const LETTER_FOLDS: [(char, &str); 10] = [
    ('ß', "ss"),
    ('ø', "o"),
    ('ł', "l"),
    ('đ', "d"),
    ('ð', "d"),
    ('þ', "th"),
    ('æ', "ae"),
    ('œ', "oe"),
    ('ı', "i"),
    ('ħ', "h"),
];

fn fold_letter(ch: char) -> Option<&'static str> {
    LETTER_FOLDS
        .iter()
        .find(|(letter, _)| *letter == ch)
        .map(|(_, ascii)| *ascii)
}

/// Turn a free-form name into a URL-safe slug.
///
/// Diacritics are stripped by canonical decomposition, a few letters without
/// a decomposition (ß, ø, ł, æ, ...) are spelled out in ASCII, everything is
/// lower-cased, and every run of characters other than ASCII letters and
/// digits collapses into a single hyphen. Leading and trailing hyphens never
/// appear, so the output is a fixed point: `slugify(&slugify(s)) == slugify(s)`.
///
/// Input with no letters or digits left to keep yields an empty string.
///
/// ```
/// use directory_taxonomy::normalize::slugify;
///
/// assert_eq!(slugify("Downers Grove"), "downers-grove");
/// assert_eq!(slugify("St. Louis Park"), "st-louis-park");
/// assert_eq!(slugify("Cañon City"), "canon-city");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for ch in name.nfd().filter(|c| !is_combining_mark(*c)) {
        for lower in ch.to_lowercase() {
            if lower.is_ascii_alphanumeric() || fold_letter(lower).is_some() {
                if pending_dash && !slug.is_empty() {
                    slug.push('-');
                }
                match fold_letter(lower) {
                    Some(ascii) => slug.push_str(ascii),
                    None => slug.push(lower),
                }
                pending_dash = false;
            } else {
                pending_dash = true;
            }
        }
    }

    slug
}

/// True when `value` is a non-empty slug that `slugify` leaves unchanged
pub fn is_valid_slug(value: &str) -> bool {
    !value.is_empty() && slugify(value) == value
}

/// Plural display form of a singular category name.
///
/// ```
/// use directory_taxonomy::normalize::pluralize;
///
/// assert_eq!(pluralize("Moving Company"), "Moving Companies");
/// assert_eq!(pluralize("Tire Shop"), "Tire Shops");
/// ```
pub fn pluralize(name: &str) -> String {
    for (suffix, replacement) in PLURAL_EXCEPTIONS {
        if let Some(prefix) = name.strip_suffix(suffix) {
            return format!("{prefix}{replacement}");
        }
    }
    format!("{name}s")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_slugify_basic() {
        assert_eq!(slugify("Downers Grove"), "downers-grove");
        assert_eq!(slugify("  Azusa  "), "azusa");
        assert_eq!(slugify("Winston-Salem"), "winston-salem");
        assert_eq!(slugify("O'Fallon"), "o-fallon");
        assert_eq!(slugify("Tire Shops & Auto -- Repair"), "tire-shops-auto-repair");
    }

    #[test]
    fn test_slugify_strips_diacritics() {
        assert_eq!(slugify("Española"), "espanola");
        assert_eq!(slugify("Mayagüez"), "mayaguez");
        assert_eq!(slugify("CAÑON CITY"), "canon-city");
    }

    #[test]
    fn test_slugify_folds_undecomposable_letters() {
        assert_eq!(slugify("Łódź"), "lodz");
        assert_eq!(slugify("Ørsted"), "orsted");
        assert_eq!(slugify("Straße"), "strasse");
        assert_eq!(slugify("Æbeltoft Œuvre"), "aebeltoft-oeuvre");
        assert_eq!(slugify(&slugify("Đakovo")), "dakovo");
    }

    #[test]
    fn test_slugify_degenerate_input() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify("!!!---..."), "");
    }

    #[test]
    fn test_slugify_collision_pairs() {
        assert_eq!(slugify("St. Louis Park"), slugify("St Louis Park"));
        assert_eq!(slugify("Coeur d'Alene"), slugify("Coeur D Alene"));
    }

    #[test]
    fn test_slugify_idempotent_fixed_cases() {
        let samples = [
            "Downers Grove",
            "St. Louis Park",
            "--leading and trailing--",
            "Ünïcödé   Cïty",
            "123 Main St.",
            "a--b__c  d",
            "",
        ];
        for s in samples {
            let once = slugify(s);
            assert_eq!(slugify(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn test_slugify_idempotent_random() {
        let mut rng = StdRng::seed_from_u64(42);
        let alphabet: Vec<char> = "aZ09 -_.,'&éÑüß東\t\n!?/".chars().collect();

        for _ in 0..2000 {
            let len = rng.gen_range(0..24);
            let s: String = (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();
            let once = slugify(&s);
            assert_eq!(slugify(&once), once, "not idempotent for {s:?}");
            assert!(!once.starts_with('-') && !once.ends_with('-'));
            assert!(!once.contains("--"));
        }
    }

    #[test]
    fn test_is_valid_slug() {
        assert!(is_valid_slug("tire-shops"));
        assert!(is_valid_slug("24-hour-plumbers"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("Tire-Shops"));
        assert!(!is_valid_slug("tire--shops"));
        assert!(!is_valid_slug("-tire"));
        assert!(!is_valid_slug("tire shops"));
    }

    #[test]
    fn test_pluralize_exceptions() {
        assert_eq!(pluralize("Moving Company"), "Moving Companies");
        assert_eq!(pluralize("Family Law Attorney"), "Family Law Attorneys");
        assert_eq!(pluralize("Insurance Agency"), "Insurance Agencies");
        assert_eq!(pluralize("Cabinet Factory"), "Cabinet Factories");
        assert_eq!(pluralize("Small Business"), "Small Businesses");
    }

    #[test]
    fn test_pluralize_default() {
        assert_eq!(pluralize("Dollar Store"), "Dollar Stores");
        assert_eq!(pluralize("Tire Shop"), "Tire Shops");
    }

    #[test]
    fn test_pluralize_only_replaces_suffix() {
        // "Company" in the middle of the name is left alone
        assert_eq!(pluralize("Company Store"), "Company Stores");
        assert_eq!(pluralize("Company"), "Companies");
    }

    #[test]
    fn test_pluralize_total() {
        for name in ["x", "Shops", "?", "Agency Agency", "ß"] {
            assert!(!pluralize(name).is_empty());
        }
        assert_eq!(pluralize("Shops"), "Shopss");
    }
}
