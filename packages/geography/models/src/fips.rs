//! US state FIPS code utilities.
//!
//! Maps between two-digit state FIPS codes (the leading component of a
//! block GEOID) and two-letter USPS abbreviations for the 50 states + DC.

/// (FIPS code, USPS abbreviation) pairs for the 50 states + DC, ordered
/// by FIPS code.
pub const STATE_FIPS: &[(&str, &str)] = &[
    ("01", "AL"),
    ("02", "AK"),
    ("04", "AZ"),
    ("05", "AR"),
    ("06", "CA"),
    ("08", "CO"),
    ("09", "CT"),
    ("10", "DE"),
    ("11", "DC"),
    ("12", "FL"),
    ("13", "GA"),
    ("15", "HI"),
    ("16", "ID"),
    ("17", "IL"),
    ("18", "IN"),
    ("19", "IA"),
    ("20", "KS"),
    ("21", "KY"),
    ("22", "LA"),
    ("23", "ME"),
    ("24", "MD"),
    ("25", "MA"),
    ("26", "MI"),
    ("27", "MN"),
    ("28", "MS"),
    ("29", "MO"),
    ("30", "MT"),
    ("31", "NE"),
    ("32", "NV"),
    ("33", "NH"),
    ("34", "NJ"),
    ("35", "NM"),
    ("36", "NY"),
    ("37", "NC"),
    ("38", "ND"),
    ("39", "OH"),
    ("40", "OK"),
    ("41", "OR"),
    ("42", "PA"),
    ("44", "RI"),
    ("45", "SC"),
    ("46", "SD"),
    ("47", "TN"),
    ("48", "TX"),
    ("49", "UT"),
    ("50", "VT"),
    ("51", "VA"),
    ("53", "WA"),
    ("54", "WV"),
    ("55", "WI"),
    ("56", "WY"),
];

/// Maps a two-digit FIPS code to the corresponding USPS abbreviation.
///
/// Returns `"??"` for unrecognized codes.
#[must_use]
pub fn state_abbr(fips: &str) -> &'static str {
    STATE_FIPS
        .iter()
        .find(|(code, _)| *code == fips)
        .map_or("??", |(_, abbr)| abbr)
}

/// Maps a USPS abbreviation to the corresponding FIPS code.
///
/// Matching is case-insensitive; returns `None` for unrecognized
/// abbreviations.
#[must_use]
pub fn abbr_to_fips(abbr: &str) -> Option<&'static str> {
    STATE_FIPS
        .iter()
        .find(|(_, a)| a.eq_ignore_ascii_case(abbr))
        .map(|(code, _)| *code)
}
