use crate::guidelines::domain::{Outcome, Tier};

/// One row of a category lookup table (Bosniak, BI-RADS, O-RADS).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry {
    pub(crate) key: &'static str,
    pub(crate) tier: Tier,
    pub(crate) recommendation: &'static str,
    pub(crate) notes: &'static [&'static str],
}

/// Exact-key lookup; unknown or blank keys yield no outcome.
pub(crate) fn lookup(table: &[Entry], key: &str) -> Option<Outcome> {
    table
        .iter()
        .find(|entry| entry.key == key)
        .map(|entry| Outcome::new(entry.tier, entry.recommendation).with_notes(entry.notes.iter().copied()))
}
