// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::ops::Index;

use nalgebra::Point2;

use crate::atom::{create_atoms, Atom};
use crate::bond::Bond;
use crate::error::CError;
use crate::formula::{self, Composition};
use crate::layout::{LayoutConfig, LayoutEngine, LayoutStats};
use crate::synthesis::{BondSynthesizer, SynthesisConfig};

/// Default ceiling on the number of atoms a formula may expand to
pub const MAX_ATOMS: usize = 500;

#[derive(Debug, Clone)]
pub struct Options {
    /// Formulas expanding to more atoms are rejected, `None` disables the check
    pub max_atoms: Option<usize>,
    pub synthesis: SynthesisConfig,
    pub layout: LayoutConfig,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            max_atoms: Some(MAX_ATOMS),
            synthesis: SynthesisConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

/// Atoms, bonds and 2D coordinates built from a single formula.
#[derive(Debug, Clone)]
pub struct Molecule {
    composition: Composition,
    atoms: Vec<Atom>,
    bonds: Vec<Bond>,
    layout: LayoutStats,
}

impl Molecule {
    /// Build a molecule from `formula` with the default options.
    ///
    /// # Errors
    ///
    /// Returns an error if the formula is malformed, names an unknown element
    /// or expands to more than [`MAX_ATOMS`] atoms.
    pub fn from_formula(formula: &str) -> Result<Self, CError> {
        Self::with_options(formula, &Options::default())
    }

    /// Build a molecule from `formula`.
    ///
    /// # Errors
    ///
    /// Returns an error if the formula is malformed, names an unknown element
    /// or expands to more atoms than `options.max_atoms`.
    pub fn with_options(formula: &str, options: &Options) -> Result<Self, CError> {
        let composition = formula::parse_strict(formula)?;
        if let Some(limit) = options.max_atoms {
            let count = composition.total_atoms();
            if count > limit {
                return Err(CError::TooManyAtoms { count, limit });
            }
        }
        Ok(Self::build(composition, options))
    }

    /// Build a molecule from whatever can be read from `formula`, without
    /// any validation. Unknown elements are kept but never bond.
    ///
    /// Nothing bounds the size of the result, callers handling untrusted
    /// input should prefer [`Molecule::from_formula`].
    pub fn sketch(formula: &str) -> Self {
        Self::build(formula::parse(formula), &Options::default())
    }

    fn build(composition: Composition, options: &Options) -> Self {
        let mut atoms = create_atoms(&composition);
        let bonds = BondSynthesizer::new(options.synthesis.clone()).synthesize(&mut atoms);
        let layout = LayoutEngine::new(options.layout.clone()).layout(&mut atoms, &bonds);
        Molecule {
            composition,
            atoms,
            bonds,
            layout,
        }
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn size(&self) -> usize {
        self.atoms.len()
    }

    pub fn layout_stats(&self) -> LayoutStats {
        self.layout
    }

    pub fn positions(&self) -> Vec<Option<Point2<f64>>> {
        self.atoms.iter().map(|a| a.position).collect()
    }

    /// Smallest box containing the center of every placed atom
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        self.atoms
            .iter()
            .filter_map(|a| a.position)
            .fold(None, |bounds, p| match bounds {
                None => Some((p, p)),
                Some((min, max)) => Some((min.inf(&p), max.sup(&p))),
            })
    }
}

impl Index<usize> for Molecule {
    type Output = Atom;

    fn index(&self, index: usize) -> &Self::Output {
        &self.atoms[index]
    }
}
