//! Identifier → entity handle index.
//!
//! The index is only ever rebuilt whole: the render target is cleared, every
//! record is re-added in collection order, and the map is repopulated from
//! the returned handles. Nothing from a previous collection survives.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::catalog::coords::derive_for;
use crate::catalog::{RsoRecord, SatcatNumber};
use crate::render::RenderTarget;

/// Non-owning lookup from catalog number to the render target's handle.
#[derive(Debug, Clone)]
pub struct CatalogIndex<H> {
    entries: HashMap<SatcatNumber, H>,
}

impl<H> Default for CatalogIndex<H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<H: Copy + Eq + Hash + std::fmt::Debug> CatalogIndex<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard everything and re-add one entity per record.
    ///
    /// Entities are created in `records` order, which is the order the target
    /// uses for draw stacking and hit-test precedence. A repeated catalog
    /// number gets no entity of its own; the first record keeps the entry.
    pub fn rebuild<R>(&mut self, records: &[RsoRecord], target: &mut R)
    where
        R: RenderTarget<Handle = H>,
    {
        self.entries.clear();
        target.clear_all_entities();

        for rec in records {
            match self.entries.entry(rec.satcat_number.clone()) {
                Entry::Occupied(_) => {
                    log::warn!(
                        "Duplicate SatCat {} in collection; keeping the first record",
                        rec.satcat_number
                    );
                }
                Entry::Vacant(slot) => {
                    let position = derive_for(&rec.satcat_number);
                    let handle =
                        target.add_entity(position, &rec.display_name, &rec.description_markup());
                    slot.insert(handle);
                }
            }
        }
        log::debug!("Catalog index rebuilt: {} entities", self.entries.len());
    }

    pub fn lookup(&self, id: &SatcatNumber) -> Option<H> {
        self.entries.get(id).copied()
    }

    /// Reverse lookup. Linear in the index size.
    pub fn identifier_of(&self, handle: H) -> Option<&SatcatNumber> {
        self.entries
            .iter()
            .find_map(|(id, h)| (*h == handle).then_some(id))
    }

    /// Drop every entry without touching a render target.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &SatcatNumber> {
        self.entries.keys()
    }
}
