//! Merging accumulated batches into one table per output.
//!
//! Compilation concatenates every batch in append order, re-applies the
//! canonical forms (state labels, HSN codes) and optionally groups rows.
//! Both steps are idempotent, so compiling already-compiled rows changes
//! nothing.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::core::{
    B2bInvoiceRow, B2csRow, HsnB2bRow, HsnRow, PlaceOfSupply, canonicalize_state, normalize_hsn,
};

/// A row that can be brought back to canonical form.
pub trait Canonical: Clone {
    fn canonicalize(&mut self);
}

/// A row that can be merged with others sharing its key.
pub trait Groupable: Canonical {
    type Key: Ord;

    fn group_key(&self) -> Self::Key;

    /// Add `other`'s amounts into `self`. Non-summed columns keep the
    /// first row's value.
    fn absorb(&mut self, other: Self);
}

fn recanonicalize(place: &PlaceOfSupply) -> PlaceOfSupply {
    canonicalize_state(&place.to_string())
}

/// Concatenate batches and canonicalise every row. Empty input gives an
/// empty table.
pub fn compile<T: Canonical>(batches: &[Vec<T>]) -> Vec<T> {
    batches
        .iter()
        .flatten()
        .cloned()
        .map(|mut row| {
            row.canonicalize();
            row
        })
        .collect()
}

/// [`compile`], then sum rows sharing a group key. Output is sorted by key.
pub fn compile_grouped<T: Groupable>(batches: &[Vec<T>]) -> Vec<T> {
    let mut groups: BTreeMap<T::Key, T> = BTreeMap::new();
    for row in compile(batches) {
        match groups.entry(row.group_key()) {
            Entry::Vacant(slot) => {
                slot.insert(row);
            }
            Entry::Occupied(mut slot) => {
                slot.get_mut().absorb(row);
            }
        }
    }
    groups.into_values().collect()
}

impl Canonical for B2csRow {
    fn canonicalize(&mut self) {
        self.state = recanonicalize(&self.state);
    }
}

impl Groupable for B2csRow {
    type Key = (PlaceOfSupply, i32);

    fn group_key(&self) -> Self::Key {
        (self.state.clone(), self.rate)
    }

    fn absorb(&mut self, other: Self) {
        self.taxable_value += other.taxable_value;
    }
}

impl Canonical for HsnRow {
    fn canonicalize(&mut self) {
        self.hsn = normalize_hsn(&self.hsn);
    }
}

impl Groupable for HsnRow {
    type Key = (String, i32);

    fn group_key(&self) -> Self::Key {
        (self.hsn.clone(), self.rate)
    }

    fn absorb(&mut self, other: Self) {
        self.quantity += other.quantity;
        self.invoice_amount += other.invoice_amount;
        self.taxable_value += other.taxable_value;
        self.igst += other.igst;
        self.cgst += other.cgst;
        self.sgst += other.sgst;
    }
}

impl Canonical for B2bInvoiceRow {
    fn canonicalize(&mut self) {
        self.place_of_supply = recanonicalize(&self.place_of_supply);
    }
}

impl Canonical for HsnB2bRow {
    fn canonicalize(&mut self) {
        self.hsn = normalize_hsn(&self.hsn);
    }
}

impl Groupable for HsnB2bRow {
    type Key = (String, i32);

    fn group_key(&self) -> Self::Key {
        (self.hsn.clone(), self.rate)
    }

    fn absorb(&mut self, other: Self) {
        self.total_quantity += other.total_quantity;
        self.total_value += other.total_value;
        self.taxable_value += other.taxable_value;
        self.integrated_tax += other.integrated_tax;
        self.central_tax += other.central_tax;
        self.state_tax += other.state_tax;
        self.cess_amount += other.cess_amount;
    }
}
