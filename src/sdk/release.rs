//! Platform release table and SDK list parser
//!
//! Maps release codenames (`KITKAT`, `LOLLIPOP`, ...) to the API level they
//! introduced, and parses textual SDK lists such as `"17, 18"` or
//! `"KITKAT, LOLLIPOP"` into API levels.

use std::sync::LazyLock;

use regex::Regex;

use crate::sdk::error::ReleaseNameError;
use crate::sdk::types::ApiLevel;

/// A known platform release
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Release {
    pub api_level: ApiLevel,
    pub codename: &'static str,
    pub version_name: &'static str,
}

const fn release(level: u32, codename: &'static str, version_name: &'static str) -> Release {
    Release {
        api_level: ApiLevel(level),
        codename,
        version_name,
    }
}

/// Known releases, ascending by API level
pub const RELEASES: &[Release] = &[
    release(1, "BASE", "1.0"),
    release(2, "BASE_1_1", "1.1"),
    release(3, "CUPCAKE", "1.5"),
    release(4, "DONUT", "1.6"),
    release(5, "ECLAIR", "2.0"),
    release(6, "ECLAIR_0_1", "2.0.1"),
    release(7, "ECLAIR_MR1", "2.1"),
    release(8, "FROYO", "2.2"),
    release(9, "GINGERBREAD", "2.3"),
    release(10, "GINGERBREAD_MR1", "2.3.3"),
    release(11, "HONEYCOMB", "3.0"),
    release(12, "HONEYCOMB_MR1", "3.1"),
    release(13, "HONEYCOMB_MR2", "3.2"),
    release(14, "ICE_CREAM_SANDWICH", "4.0"),
    release(15, "ICE_CREAM_SANDWICH_MR1", "4.0.3"),
    release(16, "JELLY_BEAN", "4.1"),
    release(17, "JELLY_BEAN_MR1", "4.2"),
    release(18, "JELLY_BEAN_MR2", "4.3"),
    release(19, "KITKAT", "4.4"),
    release(20, "KITKAT_WATCH", "4.4W"),
    release(21, "LOLLIPOP", "5.0"),
    release(22, "LOLLIPOP_MR1", "5.1"),
    release(23, "M", "6.0"),
    release(24, "N", "7.0"),
    release(25, "N_MR1", "7.1"),
    release(26, "O", "8.0"),
    release(27, "O_MR1", "8.1"),
    release(28, "P", "9"),
    release(29, "Q", "10"),
    release(30, "R", "11"),
    release(31, "S", "12"),
    release(32, "S_V2", "12L"),
    release(33, "TIRAMISU", "13"),
    release(34, "UPSIDE_DOWN_CAKE", "14"),
    release(35, "VANILLA_ICE_CREAM", "15"),
    release(36, "BAKLAVA", "16"),
];

// Tokens are separated by commas, whitespace, or both.
static SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\s]+").expect("separator regex is valid"));

/// Look up the release that introduced `level`
pub fn release_for_level(level: ApiLevel) -> Option<&'static Release> {
    RELEASES
        .binary_search_by_key(&level, |release| release.api_level)
        .ok()
        .map(|index| &RELEASES[index])
}

/// Look up a release by codename, ignoring case and surrounding whitespace
pub fn release_for_name(name: &str) -> Option<&'static Release> {
    let name = name.trim();
    RELEASES
        .iter()
        .find(|release| release.codename.eq_ignore_ascii_case(name))
}

/// Parse a single SDK token: either a numeric API level or a release codename
pub fn parse_sdk_token(token: &str) -> Result<ApiLevel, ReleaseNameError> {
    let token = token.trim();

    if token.bytes().all(|b| b.is_ascii_digit()) && !token.is_empty() {
        return match token.parse::<u32>() {
            Ok(0) | Err(_) => Err(ReleaseNameError::InvalidApiLevel(token.to_string())),
            Ok(level) => Ok(ApiLevel(level)),
        };
    }

    release_for_name(token)
        .map(|release| release.api_level)
        .ok_or_else(|| ReleaseNameError::UnknownReleaseName(token.to_string()))
}

/// Parse a comma and/or whitespace separated SDK list
///
/// Order is preserved and duplicates are kept, since callers may build an
/// ordered catalog from the result.
///
/// Examples:
/// - "17,18" -> [17, 18]
/// - "KITKAT, lollipop" -> [19, 21]
pub fn parse_sdk_list(text: &str) -> Result<Vec<ApiLevel>, ReleaseNameError> {
    SEPARATOR_RE
        .split(text)
        .filter(|token| !token.is_empty())
        .map(parse_sdk_token)
        .collect()
}
