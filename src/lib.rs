pub mod atom;
pub mod bond;
pub mod element;
pub mod error;
pub mod formula;
pub mod layout;
pub mod molecule;
pub mod synthesis;

pub use error::CError;
pub use molecule::{Molecule, Options};

use std::hint::black_box;

/// Build every formula of `formulas` and return the total number of bonds
pub fn synthesize_all(formulas: &[&str]) -> usize {
    let mut total_bonds = 0;
    for formula in formulas {
        total_bonds += Molecule::sketch(formula).bonds().len();
    }
    black_box(total_bonds)
}
