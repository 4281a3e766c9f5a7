//! `proptest` strategies for catalog records.

use proptest::prelude::*;

use super::{RsoRecord, SatcatNumber};

/// Printable identifier, non-ASCII included.
pub(crate) fn identifier() -> impl Strategy<Value = String> {
    "\\PC{0,12}"
}

/// Mostly short ASCII so queries hit now and then, sometimes anything.
pub(crate) fn text() -> impl Strategy<Value = String> {
    prop_oneof![3 => "[a-zA-Z0-9 -]{0,10}", 1 => "\\PC{0,8}"]
}

pub(crate) fn record_with_id(id: String) -> impl Strategy<Value = RsoRecord> {
    let list = || prop::option::of(prop::collection::vec(text(), 0..3));
    (text(), text(), list(), list()).prop_map(move |(name, designator, aliases, tags)| {
        let mut rec = RsoRecord::new(SatcatNumber::new(id.clone()), name, designator);
        rec.aliases = aliases;
        rec.tags = tags;
        rec
    })
}

/// Collections with pairwise distinct catalog numbers.
pub(crate) fn record_sets() -> impl Strategy<Value = Vec<RsoRecord>> {
    prop::collection::hash_set(identifier(), 0..8).prop_flat_map(|ids| {
        ids.into_iter()
            .map(record_with_id)
            .collect::<Vec<_>>()
    })
}
