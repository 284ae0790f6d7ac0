//! Canonical town labels.

use crate::chargers::UNKNOWN_TOWN;

/// Canonical label for the capital.
pub const CAPITAL_TOWN: &str = "Belgrade";

/// Spellings and transliterations of the capital seen in upstream data.
const CAPITAL_SPELLINGS: &[&str] = &["Belgrad", "Belgrade", "Beograd"];

/// Postal codes in the capital region start with this prefix.
const CAPITAL_POSTCODE_PREFIX: &str = "11";

/// Maps an upstream town name and postcode to a canonical town label.
///
/// Surrounding whitespace is trimmed first. A recognised capital spelling
/// wins; otherwise a capital-region postcode maps to the capital. Anything
/// else passes through, and an absent or blank town becomes [`UNKNOWN_TOWN`].
#[must_use]
pub fn normalize_town(raw_town: Option<&str>, postcode: Option<&str>) -> String {
    let town = raw_town.unwrap_or_default().trim();

    if CAPITAL_SPELLINGS.contains(&town) {
        return CAPITAL_TOWN.to_string();
    }

    if postcode.is_some_and(|p| p.trim_start().starts_with(CAPITAL_POSTCODE_PREFIX)) {
        return CAPITAL_TOWN.to_string();
    }

    if town.is_empty() {
        UNKNOWN_TOWN.to_string()
    } else {
        town.to_string()
    }
}
