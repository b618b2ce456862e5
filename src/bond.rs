// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

use std::{fmt, ops::Index};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BondOrder {
    /// Single bond
    Single,

    /// Double bond
    Double,

    /// Triple bond
    Triple,

    /// Aromatic bond, drawn as a line plus a decorative curve
    Aromatic,
}

impl BondOrder {
    /// Bonding capacity this bond consumes from each of its atoms.
    pub fn strength(&self) -> f64 {
        match self {
            BondOrder::Single => 1.0,
            BondOrder::Double => 2.0,
            BondOrder::Triple => 3.0,
            BondOrder::Aromatic => 1.5,
        }
    }

    /// Pick the order from the summed remaining capacity of both atoms.
    pub fn from_capacity(total: f64) -> Self {
        if total >= 6.0 {
            BondOrder::Triple
        } else if total >= 4.0 {
            BondOrder::Double
        } else {
            BondOrder::Single
        }
    }

    /// Order of a bond formed again between two atoms already bonded with
    /// `self`. Aromatic bonds stay aromatic, others go up to triple.
    pub fn combine(self, other: BondOrder) -> Self {
        match (self, other) {
            (BondOrder::Aromatic, _) | (_, BondOrder::Aromatic) => BondOrder::Aromatic,
            _ if self.strength() + other.strength() >= 3.0 => BondOrder::Triple,
            _ => BondOrder::Double,
        }
    }
}

impl fmt::Display for BondOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BondOrder::Single => "single",
            BondOrder::Double => "double",
            BondOrder::Triple => "triple",
            BondOrder::Aromatic => "aromatic",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Bond {
    pub data: [usize; 2],
    pub order: BondOrder,
}

impl Index<usize> for Bond {
    type Output = usize;

    /// Access one of the two atom indices in the bond.
    ///
    /// # Panics
    ///
    /// Panics if `index >= 2`.
    fn index(&self, index: usize) -> &Self::Output {
        if index >= 2 {
            panic!("can not access atom n° {} in bond", index);
        }
        &self.data[index]
    }
}

impl Bond {
    /// Create a new bond between `i` and `j`.
    ///
    /// # Panics
    ///
    /// Panics if `i == j`.
    pub fn new(i: usize, j: usize, order: BondOrder) -> Self {
        if i == j {
            panic!("can not have a bond between an atom and itself");
        }
        let (a, b) = if i < j { (i, j) } else { (j, i) };
        Bond {
            data: [a, b],
            order,
        }
    }

    pub fn contains(&self, atom: usize) -> bool {
        self.data.contains(&atom)
    }
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;

    #[test]
    fn indices_are_sorted() {
        let bond = Bond::new(5, 2, BondOrder::Double);
        assert_eq!(bond[0], 2);
        assert_eq!(bond[1], 5);
        assert_eq!(bond, Bond::new(2, 5, BondOrder::Double));
        assert!(bond.contains(5));
        assert!(!bond.contains(3));
    }

    #[test]
    #[should_panic(expected = "between an atom and itself")]
    fn self_bond() {
        let _ = Bond::new(1, 1, BondOrder::Single);
    }

    #[test]
    #[should_panic(expected = "can not access atom n° 2")]
    fn out_of_bounds_index() {
        let bond = Bond::new(0, 1, BondOrder::Single);
        let _ = bond[2];
    }

    #[test]
    fn strengths() {
        assert_approx_eq!(BondOrder::Single.strength(), 1.0);
        assert_approx_eq!(BondOrder::Double.strength(), 2.0);
        assert_approx_eq!(BondOrder::Triple.strength(), 3.0);
        assert_approx_eq!(BondOrder::Aromatic.strength(), 1.5);
    }

    #[test]
    fn order_thresholds() {
        assert_eq!(BondOrder::from_capacity(8.0), BondOrder::Triple);
        assert_eq!(BondOrder::from_capacity(6.0), BondOrder::Triple);
        assert_eq!(BondOrder::from_capacity(5.5), BondOrder::Double);
        assert_eq!(BondOrder::from_capacity(4.0), BondOrder::Double);
        assert_eq!(BondOrder::from_capacity(3.5), BondOrder::Single);
        assert_eq!(BondOrder::from_capacity(2.0), BondOrder::Single);
    }

    #[test]
    fn combined_orders() {
        use BondOrder::*;
        assert_eq!(Single.combine(Single), Double);
        assert_eq!(Single.combine(Double), Triple);
        assert_eq!(Double.combine(Single), Triple);
        assert_eq!(Triple.combine(Triple), Triple);
        assert_eq!(Aromatic.combine(Aromatic), Aromatic);
        assert_eq!(Single.combine(Aromatic), Aromatic);
    }
}
