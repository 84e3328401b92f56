#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Census geography types for the fiber map.
//!
//! The FCC availability dataset keys every plan row by its 2020 census
//! block GEOID. This crate defines the decomposed block GEOID value type
//! and the state FIPS utilities shared across the workspace.

pub mod fips;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A 2020 census block GEOID decomposed into its hierarchical components.
///
/// Block GEOIDs are 15-digit strings laid out as state FIPS (2 digits) +
/// county FIPS (3) + tract (6) + block (4). Concatenating the components
/// in that order always reconstructs the full identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockGeoid {
    /// The full 15-digit block GEOID.
    pub block_geoid: String,
    /// Two-digit state FIPS code.
    pub state: String,
    /// Three-digit county FIPS code.
    pub county: String,
    /// Six-digit census tract code.
    pub tract: String,
    /// Four-digit block code.
    pub block: String,
}

impl BlockGeoid {
    /// Parses and decomposes a block GEOID string.
    ///
    /// # Errors
    ///
    /// Returns [`GeoidError::Malformed`] unless the input is exactly 15
    /// ASCII digits.
    pub fn parse(geoid: &str) -> Result<Self, GeoidError> {
        if geoid.len() != 15 || !geoid.bytes().all(|b| b.is_ascii_digit()) {
            return Err(GeoidError::Malformed {
                geoid: geoid.to_string(),
            });
        }

        Ok(Self {
            block_geoid: geoid.to_string(),
            state: geoid[0..2].to_string(),
            county: geoid[2..5].to_string(),
            tract: geoid[5..11].to_string(),
            block: geoid[11..15].to_string(),
        })
    }

    /// Returns the USPS abbreviation for the state FIPS component.
    ///
    /// Returns `"??"` for codes outside the 50 states + DC.
    #[must_use]
    pub fn state_abbr(&self) -> &'static str {
        fips::state_abbr(&self.state)
    }
}

/// Errors from block GEOID parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoidError {
    /// The input is not a 15-digit block GEOID.
    #[error("malformed block GEOID '{geoid}': expected exactly 15 digits")]
    Malformed {
        /// The rejected input.
        geoid: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decomposes_seattle_block() {
        let parsed = BlockGeoid::parse("530330001001000").unwrap();
        assert_eq!(parsed.state, "53");
        assert_eq!(parsed.county, "033");
        assert_eq!(parsed.tract, "000100");
        assert_eq!(parsed.block, "1000");
        assert_eq!(parsed.state_abbr(), "WA");
    }

    #[test]
    fn components_reconstruct_geoid() {
        for geoid in ["530330001001000", "110010001011000", "482015421001234"] {
            let parsed = BlockGeoid::parse(geoid).unwrap();
            let rebuilt = format!(
                "{}{}{}{}",
                parsed.state, parsed.county, parsed.tract, parsed.block
            );
            assert_eq!(rebuilt, geoid);
        }
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(BlockGeoid::parse("53033000100100").is_err());
        assert!(BlockGeoid::parse("5303300010010000").is_err());
        assert!(BlockGeoid::parse("").is_err());
    }

    #[test]
    fn rejects_non_digits() {
        assert!(BlockGeoid::parse("53033000100100A").is_err());
        assert!(BlockGeoid::parse("5303300010010-0").is_err());
    }

    #[test]
    fn serializes_camel_case() {
        let parsed = BlockGeoid::parse("530330001001000").unwrap();
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["blockGeoid"], "530330001001000");
        assert_eq!(json["county"], "033");
    }
}
