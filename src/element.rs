// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! Static per-element data used while building and laying out molecules.

use phf::phf_map;

/// Bonding and display data of a single element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElementProperties {
    /// Number of bond-strength units the element can take part in
    pub valence: u8,
    /// Pauling electronegativity, `0.0` where it is undefined
    pub electronegativity: f64,
    /// Radius used to space atoms in the 2D layout (covalent radius, Å)
    pub display_radius: f64,
}

const fn element(valence: u8, electronegativity: f64, display_radius: f64) -> ElementProperties {
    ElementProperties {
        valence,
        electronegativity,
        display_radius,
    }
}

static ELEMENTS: phf::Map<&'static str, ElementProperties> = phf_map! {
    "H" => element(1, 2.20, 0.31),
    "He" => element(0, 0.0, 0.28),
    "Li" => element(1, 0.98, 1.28),
    "Be" => element(2, 1.57, 0.96),
    "B" => element(3, 2.04, 0.84),
    "C" => element(4, 2.55, 0.76),
    "N" => element(3, 3.04, 0.71),
    "O" => element(2, 3.44, 0.66),
    "F" => element(1, 3.98, 0.57),
    "Ne" => element(0, 0.0, 0.58),
    "Na" => element(1, 0.93, 1.66),
    "Mg" => element(2, 1.31, 1.41),
    "Al" => element(3, 1.61, 1.21),
    "Si" => element(4, 1.90, 1.11),
    "P" => element(5, 2.19, 1.07),
    "S" => element(2, 2.58, 1.05),
    "Cl" => element(1, 3.16, 1.02),
    "Ar" => element(0, 0.0, 1.06),
    "K" => element(1, 0.82, 2.03),
    "Ca" => element(2, 1.00, 1.76),
    "Ti" => element(4, 1.54, 1.60),
    "Cr" => element(3, 1.66, 1.39),
    "Mn" => element(2, 1.55, 1.39),
    "Fe" => element(3, 1.83, 1.32),
    "Co" => element(3, 1.88, 1.26),
    "Ni" => element(2, 1.91, 1.24),
    "Cu" => element(2, 1.90, 1.32),
    "Zn" => element(2, 1.65, 1.22),
    "Ga" => element(3, 1.81, 1.22),
    "Ge" => element(4, 2.01, 1.20),
    "As" => element(3, 2.18, 1.19),
    "Se" => element(2, 2.55, 1.20),
    "Br" => element(1, 2.96, 1.20),
    "Kr" => element(0, 3.00, 1.16),
    "Rb" => element(1, 0.82, 2.20),
    "Sr" => element(2, 0.95, 1.95),
    "Ag" => element(1, 1.93, 1.45),
    "Cd" => element(2, 1.69, 1.44),
    "Sn" => element(4, 1.96, 1.39),
    "Sb" => element(3, 2.05, 1.39),
    "I" => element(1, 2.66, 1.39),
    "Xe" => element(0, 2.60, 1.40),
    "Cs" => element(1, 0.79, 2.44),
    "Ba" => element(2, 0.89, 2.15),
    "Pt" => element(2, 2.28, 1.36),
    "Au" => element(1, 2.54, 1.36),
    "Hg" => element(2, 2.00, 1.32),
    "Pb" => element(2, 2.33, 1.46),
};

/// Look up the properties of the element with the given `symbol`.
pub fn properties(symbol: &str) -> Option<&'static ElementProperties> {
    ELEMENTS.get(symbol)
}

pub fn is_known(symbol: &str) -> bool {
    ELEMENTS.contains_key(symbol)
}

/// Valence of `symbol`, `0` for elements missing from the table.
pub fn valence(symbol: &str) -> u8 {
    properties(symbol).map_or(0, |p| p.valence)
}

/// Electronegativity of `symbol`, `0.0` for elements missing from the table.
pub fn electronegativity(symbol: &str) -> f64 {
    properties(symbol).map_or(0.0, |p| p.electronegativity)
}

/// Display radius of `symbol`, `0.0` for elements missing from the table.
pub fn display_radius(symbol: &str) -> f64 {
    properties(symbol).map_or(0.0, |p| p.display_radius)
}
