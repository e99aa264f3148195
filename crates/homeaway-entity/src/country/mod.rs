//! Country reference table.
//!
//! The table is parsed once, on first access, from the JSON dataset
//! bundled at `data/countries.json`.

pub mod model;

use std::sync::LazyLock;

pub use model::Country;

use model::CountryRecord;

static COUNTRIES: LazyLock<Vec<Country>> = LazyLock::new(|| {
    match serde_json::from_str::<Vec<CountryRecord>>(include_str!("../../data/countries.json")) {
        Ok(records) => records.into_iter().map(Country::from).collect(),
        Err(e) => {
            tracing::error!(error = %e, "Bundled country dataset is malformed");
            Vec::new()
        }
    }
});

/// All known countries, in dataset order.
pub fn all() -> &'static [Country] {
    &COUNTRIES
}

/// Look up a country by its two-letter code (case-insensitive).
pub fn find(code: &str) -> Option<&'static Country> {
    COUNTRIES
        .iter()
        .find(|country| country.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_parses() {
        assert!(all().len() > 200);
    }

    #[test]
    fn test_codes_are_unique() {
        let mut codes: Vec<&str> = all().iter().map(|c| c.code.as_str()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), all().len());
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let us = find("us").expect("US present");
        assert_eq!(us.name, "United States");
        assert_eq!(us.region, "Americas");
        assert_eq!(us.flag, "🇺🇸");
        assert_eq!(us.location, [38.0, -97.0]);
    }

    #[test]
    fn test_find_unknown_is_none() {
        assert!(find("ZZ").is_none());
    }
}
