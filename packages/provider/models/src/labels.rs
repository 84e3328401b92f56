//! Human-readable labels for FCC availability codes.

/// Maps an FCC technology code to its display label.
///
/// Unknown codes render as `"Technology {code}"` rather than failing —
/// the dataset grows codes faster than this table does.
#[must_use]
pub fn technology_name(code: u32) -> String {
    match code {
        0 => "All Other",
        10 => "Asymmetric DSL",
        20 => "Symmetric DSL",
        30 => "Other Copper Wireline",
        40 => "Cable Modem - DOCSIS 3.0",
        41 => "Cable Modem - DOCSIS 3.1",
        42 => "Cable Modem - Other",
        43 => "Cable Modem - DOCSIS 3.1 and Other",
        50 => "Optical Carrier / Fiber to the End User",
        60 => "Satellite",
        70 => "Terrestrial Fixed Wireless",
        71 => "Licensed Terrestrial Fixed Wireless",
        72 => "Licensed-by-Rule Terrestrial Fixed Wireless",
        80 => "Terrestrial Mobile Wireless",
        90 => "Electric Power Line",
        other => return format!("Technology {other}"),
    }
    .to_string()
}

/// Maps a business/residential code to its display label.
///
/// Matching is case-insensitive; anything outside R/B/X is `"Unknown"`.
#[must_use]
pub fn availability_type(code: &str) -> &'static str {
    match code.to_uppercase().as_str() {
        "R" => "Residential Only",
        "B" => "Business Only",
        "X" => "Residential and Business",
        _ => "Unknown",
    }
}
