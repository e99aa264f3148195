//! Country value object.

use serde::{Deserialize, Serialize};

/// One entry of the country reference table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: String,
    /// Common English name.
    pub name: String,
    /// Emoji flag built from the code's regional indicator symbols.
    pub flag: String,
    /// Approximate centre as `[latitude, longitude]`.
    pub location: [f64; 2],
    /// Continent-level region.
    pub region: String,
}

/// Shape of a record in the bundled dataset.
#[derive(Debug, Deserialize)]
pub(crate) struct CountryRecord {
    code: String,
    name: String,
    location: [f64; 2],
    region: String,
}

impl From<CountryRecord> for Country {
    fn from(record: CountryRecord) -> Self {
        Self {
            flag: flag_emoji(&record.code),
            code: record.code,
            name: record.name,
            location: record.location,
            region: record.region,
        }
    }
}

/// Map `"FR"` to 🇫🇷. Non-letters are skipped.
pub fn flag_emoji(code: &str) -> String {
    code.chars()
        .filter(char::is_ascii_alphabetic)
        .filter_map(|c| {
            let offset = c.to_ascii_uppercase() as u32 - 'A' as u32;
            char::from_u32(0x1F1E6 + offset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_emoji() {
        assert_eq!(flag_emoji("FR"), "🇫🇷");
        assert_eq!(flag_emoji("gb"), "🇬🇧");
    }
}
