// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Greedy bond graph synthesis.
//!
//! Atoms are paired one bond at a time: the atom with the most remaining
//! capacity picks the partner that maximises
//! `min(capacity_a, capacity_b) - |electronegativity_a - electronegativity_b|`.
//! This gives a presentable graph, not a chemically correct one.

use std::collections::BTreeMap;

use log::debug;

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};

/// Elements for which every bond between two of them is aromatic
pub const AROMATIC_ELEMENTS: &[&str] = &["C", "N", "O", "S"];

#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// A bond between two of these elements is always aromatic
    pub aromatic: &'static [&'static str],
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            aromatic: AROMATIC_ELEMENTS,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BondSynthesizer {
    config: SynthesisConfig,
}

impl BondSynthesizer {
    pub fn new(config: SynthesisConfig) -> Self {
        BondSynthesizer { config }
    }

    /// Bond the atoms of `atoms` together, updating their remaining capacity
    /// and neighbors in place.
    ///
    /// On every step the atoms that can still bond are sorted by decreasing
    /// remaining capacity (ties keep their previous order) and the first one
    /// becomes the pivot. Among all the other atoms that can still bond, the
    /// first one with the best score becomes its partner. Bonding a pair that
    /// is already bonded raises the order of their existing bond, see
    /// [`BondOrder::combine`]. This stops once at most one atom can still bond.
    ///
    /// Capacities are multiples of 0.5, so every step removes at least 1.0 of
    /// the total capacity of the pool and the loop always terminates.
    pub fn synthesize(&self, atoms: &mut [Atom]) -> Vec<Bond> {
        let mut working = (0..atoms.len())
            .filter(|&i| atoms[i].has_capacity())
            .collect::<Vec<_>>();
        let mut bonds: Vec<Bond> = Vec::new();
        let mut bond_index: BTreeMap<[usize; 2], usize> = BTreeMap::new();

        while working.len() > 1 {
            working.sort_by(|&a, &b| {
                atoms[b]
                    .remaining_capacity
                    .total_cmp(&atoms[a].remaining_capacity)
            });

            let pivot = working[0];
            let Some(partner) = best_partner(atoms, pivot, &working[1..]) else {
                break;
            };

            let order = self.bond_order(&atoms[pivot], &atoms[partner]);
            let bond = form_bond(atoms, pivot, partner, order);
            match bond_index.get(&bond.data).copied() {
                Some(index) => {
                    let existing = &mut bonds[index];
                    existing.order = existing.order.combine(order);
                    debug!(
                        "{}#{} and {}#{} bonded again, now {}",
                        atoms[pivot].symbol, pivot, atoms[partner].symbol, partner, existing.order
                    );
                }
                None => {
                    debug!(
                        "{} bond between {}#{} and {}#{}",
                        order, atoms[pivot].symbol, pivot, atoms[partner].symbol, partner
                    );
                    bond_index.insert(bond.data, bonds.len());
                    bonds.push(bond);
                }
            }
            working.retain(|&i| atoms[i].has_capacity());
        }

        debug!("formed {} bonds between {} atoms", bonds.len(), atoms.len());
        bonds
    }

    /// Order of a new bond between `a` and `b`, given their current capacity.
    pub fn bond_order(&self, a: &Atom, b: &Atom) -> BondOrder {
        if self.is_aromatic(&a.symbol) && self.is_aromatic(&b.symbol) {
            return BondOrder::Aromatic;
        }
        BondOrder::from_capacity(a.remaining_capacity + b.remaining_capacity)
    }

    fn is_aromatic(&self, symbol: &str) -> bool {
        self.config.aromatic.iter().any(|&a| a == symbol)
    }
}

/// Score of a bond between `a` and `b`, higher is better
pub fn score(a: &Atom, b: &Atom) -> f64 {
    let capacity = a.remaining_capacity.min(b.remaining_capacity);
    capacity - (a.electronegativity() - b.electronegativity()).abs()
}

/// First candidate with the highest score.
fn best_partner(atoms: &[Atom], pivot: usize, candidates: &[usize]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for &candidate in candidates {
        if candidate == pivot {
            continue;
        }
        let value = score(&atoms[pivot], &atoms[candidate]);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((candidate, value)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Connect `i` and `j`, consuming the bond strength from both atoms.
///
/// The consumed capacity is capped by what each atom has left, so
/// `remaining_capacity` never goes below zero.
fn form_bond(atoms: &mut [Atom], i: usize, j: usize, order: BondOrder) -> Bond {
    let bond = Bond::new(i, j, order);
    let strength = order.strength();
    for (atom, other) in [(i, j), (j, i)] {
        let atom = &mut atoms[atom];
        atom.remaining_capacity = (atom.remaining_capacity - strength).max(0.0);
        atom.neighbors.insert(other);
    }
    bond
}
