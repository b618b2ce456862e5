// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::collections::BTreeSet;

use log::warn;
use nalgebra::Point2;

use crate::element;
use crate::formula::Composition;

/// A single atom of a molecule being built.
///
/// Atoms live in a `Vec` owned by one formula evaluation; `neighbors` holds
/// indices into that same `Vec`.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    pub symbol: String,
    /// Bonding capacity left, starts at the element valence
    pub remaining_capacity: f64,
    pub neighbors: BTreeSet<usize>,
    pub charge: i32,
    pub lone_pairs: u32,
    /// 2D coordinates, `None` until the layout places this atom
    pub position: Option<Point2<f64>>,
}

impl Atom {
    pub fn new(symbol: &str) -> Self {
        let valence = element::valence(symbol);
        Self {
            symbol: symbol.to_string(),
            remaining_capacity: f64::from(valence),
            neighbors: BTreeSet::new(),
            charge: 0,
            lone_pairs: lone_pairs(valence),
            position: None,
        }
    }

    pub fn valence(&self) -> u8 {
        element::valence(&self.symbol)
    }

    pub fn electronegativity(&self) -> f64 {
        element::electronegativity(&self.symbol)
    }

    pub fn display_radius(&self) -> f64 {
        element::display_radius(&self.symbol)
    }

    /// Can this atom still take part in a new bond?
    pub fn has_capacity(&self) -> bool {
        self.remaining_capacity > 0.0
    }
}

/// Lone pairs derived from the group number, which is taken to be the
/// valence up to 4 and `8 - valence` above.
pub fn lone_pairs(valence: u8) -> u32 {
    let valence = i32::from(valence);
    let group = if valence <= 4 { valence } else { 8 - valence };
    u32::try_from((group - valence) / 2).unwrap_or(0)
}

/// Expand element counts into a fresh pool of unbonded atoms.
///
/// Atoms come out grouped by element, in the order elements first appear in
/// the formula.
pub fn create_atoms(composition: &Composition) -> Vec<Atom> {
    let mut atoms = Vec::with_capacity(composition.total_atoms());
    for (symbol, count) in composition.iter() {
        if !element::is_known(symbol) {
            warn!("unknown element '{symbol}', its {count} atom(s) will not bond");
        }
        let template = Atom::new(symbol);
        atoms.extend(std::iter::repeat(template).take(count));
    }
    atoms
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::formula::parse;

    #[test]
    fn new_atom_starts_unbonded() {
        let atom = Atom::new("N");
        assert_eq!(atom.symbol, "N");
        assert_approx_eq!(atom.remaining_capacity, 3.0);
        assert!(atom.neighbors.is_empty());
        assert_eq!(atom.charge, 0);
        assert!(atom.position.is_none());
        assert!(atom.has_capacity());
    }

    #[test]
    fn unknown_element_has_no_capacity() {
        let atom = Atom::new("Xx");
        assert_approx_eq!(atom.remaining_capacity, 0.0);
        assert!(!atom.has_capacity());
        assert_approx_eq!(atom.display_radius(), 0.0);
    }

    #[test]
    fn lone_pairs_from_group_arithmetic() {
        // group equals valence up to 4, above that the difference is negative
        for valence in 0..=8 {
            assert_eq!(lone_pairs(valence), 0);
        }
        assert_eq!(Atom::new("C").lone_pairs, 0);
        assert_eq!(Atom::new("P").lone_pairs, 0);
    }

    #[test]
    fn atom_count_is_conserved() {
        for formula in ["C6H12O6", "Ca(OH)2", "Mg3(PO4)2", "Na", "XxH2", ""] {
            let composition = parse(formula);
            let atoms = create_atoms(&composition);
            assert_eq!(atoms.len(), composition.total_atoms(), "{formula}");
        }
    }

    #[test]
    fn atoms_are_grouped_by_first_appearance() {
        let atoms = create_atoms(&parse("Ca(OH)2"));
        let symbols = atoms.iter().map(|a| a.symbol.as_str()).collect::<Vec<_>>();
        assert_eq!(symbols, ["Ca", "O", "O", "H", "H"]);
        assert_approx_eq!(atoms[0].remaining_capacity, 2.0);
        assert_approx_eq!(atoms[3].remaining_capacity, 1.0);
    }
}
