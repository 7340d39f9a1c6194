/// Timezone fragments treated as EU for the consent banner. This is a
/// guess from the browser's timezone, not a legal determination.
pub const EU_TIMEZONE_MARKERS: [&str; 6] = ["Europe/", "EET", "CET", "WET", "GMT", "BST"];

/// An unknown timezone counts as EU.
pub fn is_eu_timezone(timezone: Option<&str>) -> bool {
    match timezone.map(str::trim).filter(|tz| !tz.is_empty()) {
        Some(tz) => EU_TIMEZONE_MARKERS.iter().any(|marker| tz.contains(marker)),
        None => true,
    }
}

pub fn should_show_banner(has_stored_consent: bool, is_eu: bool) -> bool {
    !has_stored_consent && is_eu
}
