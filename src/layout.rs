// SPDX-License-Identifier: BSD-3-Clause
// Copyright (c) 2025 William Bro-Jørgensen
// Copyright (c) 2020 Guillaume Fraux and contributors
//
// See LICENSE at the project root for full text.

//! 2D coordinates for a bonded atom pool.
//!
//! The best connected atom is put at the origin, its neighbors are fanned
//! out around it and the same is done recursively for every newly placed
//! atom. A few passes of pairwise repulsion then push overlapping atoms
//! apart.

use std::f64::consts::TAU;

use log::{debug, trace};
use nalgebra::{Point2, Vector2};

use crate::atom::Atom;
use crate::bond::Bond;

/// Distance from a depth 0 atom to its neighbors, before adding their radius
pub const BASE_RADIUS: f64 = 1.5;
/// Fraction of the overlap each atom of an overlapping pair is moved by
pub const REPULSION: f64 = 0.25;
/// Upper bound on the number of relaxation passes
pub const MAX_PASSES: usize = 50;

/// What to do with atoms that can not be reached from the layout root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FragmentPolicy {
    /// Only the fragment containing the root is placed, other atoms keep
    /// `position == None`
    #[default]
    RootOnly,
    /// Every fragment is laid out around its own root, and fragments are
    /// lined up from left to right
    Tiled,
}

#[derive(Debug, Clone)]
pub struct LayoutConfig {
    pub base_radius: f64,
    pub repulsion: f64,
    pub max_passes: usize,
    /// Relaxation stops once no atom moved by more than this in a pass
    pub tolerance: f64,
    pub fragments: FragmentPolicy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            base_radius: BASE_RADIUS,
            repulsion: REPULSION,
            max_passes: MAX_PASSES,
            tolerance: 1e-4,
            fragments: FragmentPolicy::default(),
        }
    }
}

/// Summary of a layout run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutStats {
    pub placed: usize,
    pub unplaced: usize,
    pub passes: usize,
}

#[derive(Debug, Clone, Default)]
pub struct LayoutEngine {
    config: LayoutConfig,
}

impl LayoutEngine {
    pub fn new(config: LayoutConfig) -> Self {
        LayoutEngine { config }
    }

    /// Assign a position to the atoms of `atoms` connected by `bonds`.
    ///
    /// Any previous position is discarded. With [`FragmentPolicy::RootOnly`]
    /// atoms outside of the root fragment are left without a position.
    pub fn layout(&self, atoms: &mut [Atom], bonds: &[Bond]) -> LayoutStats {
        for atom in atoms.iter_mut() {
            atom.position = None;
        }

        if atoms.is_empty() {
            return LayoutStats {
                placed: 0,
                unplaced: 0,
                passes: 0,
            };
        }

        let bonded_to = bonded_to(atoms.len(), bonds);
        let all = (0..atoms.len()).collect::<Vec<_>>();
        let root = find_root(&bonded_to, &all);
        self.place_fragment(atoms, &bonded_to, root, Point2::origin());

        if self.config.fragments == FragmentPolicy::Tiled {
            self.tile_fragments(atoms, &bonded_to);
        }

        let passes = self.relax(atoms);
        let placed = atoms.iter().filter(|a| a.position.is_some()).count();
        let stats = LayoutStats {
            placed,
            unplaced: atoms.len() - placed,
            passes,
        };
        debug!(
            "placed {} atoms ({} unplaced) with {} relaxation passes",
            stats.placed, stats.unplaced, stats.passes
        );
        stats
    }

    /// Put `root` at `origin` and recursively place everything reachable
    /// from it.
    fn place_fragment(
        &self,
        atoms: &mut [Atom],
        bonded_to: &[Vec<usize>],
        root: usize,
        origin: Point2<f64>,
    ) {
        atoms[root].position = Some(origin);
        self.place_neighbors(atoms, bonded_to, root, 0);
    }

    /// Spread the unplaced neighbors of `atom` evenly on a circle around it,
    /// then recurse into each of them.
    ///
    /// The angular step is computed for at least three neighbors, so one or
    /// two neighbors do not end up on a straight line with their parent.
    fn place_neighbors(
        &self,
        atoms: &mut [Atom],
        bonded_to: &[Vec<usize>],
        atom: usize,
        depth: usize,
    ) {
        let Some(center) = atoms[atom].position else {
            return;
        };

        let pending = bonded_to[atom]
            .iter()
            .copied()
            .filter(|&n| atoms[n].position.is_none())
            .collect::<Vec<_>>();
        if pending.is_empty() {
            return;
        }

        let step = TAU / pending.len().max(3) as f64;
        let spacing = self.config.base_radius / (depth + 1) as f64;
        for (k, &neighbor) in pending.iter().enumerate() {
            let angle = k as f64 * step;
            let distance = spacing + atoms[neighbor].display_radius();
            atoms[neighbor].position =
                Some(center + Vector2::new(angle.cos(), angle.sin()) * distance);
        }

        for &neighbor in &pending {
            self.place_neighbors(atoms, bonded_to, neighbor, depth + 1);
        }
    }

    /// Lay out every fragment not placed yet to the right of what is already
    /// placed.
    fn tile_fragments(&self, atoms: &mut [Atom], bonded_to: &[Vec<usize>]) {
        let gap = self.config.base_radius;
        for fragment in fragments(bonded_to) {
            if atoms[fragment[0]].position.is_some() {
                continue;
            }

            let Some((_, placed_max)) = extent(atoms, 0..atoms.len()) else {
                continue;
            };

            let root = find_root(bonded_to, &fragment);
            self.place_fragment(atoms, bonded_to, root, Point2::origin());

            if let Some((fragment_min, _)) = extent(atoms, fragment.iter().copied()) {
                let shift = Vector2::new(placed_max.x + gap - fragment_min.x, 0.0);
                for &i in &fragment {
                    if let Some(position) = atoms[i].position.as_mut() {
                        *position += shift;
                    }
                }
            }
        }
    }

    /// Push apart every pair of placed atoms that are closer than the sum of
    /// their display radii. Returns the number of passes that ran.
    ///
    /// Stops early once the largest move in a pass is below the configured
    /// tolerance. Two atoms at the exact same spot are separated along a
    /// direction derived from their indices.
    pub fn relax(&self, atoms: &mut [Atom]) -> usize {
        let placed = (0..atoms.len())
            .filter(|&i| atoms[i].position.is_some())
            .collect::<Vec<_>>();

        for pass in 0..self.config.max_passes {
            let mut largest_shift: f64 = 0.0;

            for (a, &i) in placed.iter().enumerate() {
                for &j in &placed[a + 1..] {
                    let (Some(pi), Some(pj)) = (atoms[i].position, atoms[j].position) else {
                        continue;
                    };

                    let min_distance = atoms[i].display_radius() + atoms[j].display_radius();
                    let delta = pj - pi;
                    let distance = delta.norm();
                    if distance >= min_distance {
                        continue;
                    }

                    let direction = if distance > f64::EPSILON {
                        delta / distance
                    } else {
                        let angle = (i + j) as f64;
                        Vector2::new(angle.cos(), angle.sin())
                    };
                    let shift = direction * ((min_distance - distance) * self.config.repulsion);
                    atoms[i].position = Some(pi - shift);
                    atoms[j].position = Some(pj + shift);
                    largest_shift = largest_shift.max(shift.norm());
                }
            }

            trace!("relaxation pass {pass}: largest shift {largest_shift:.6}");
            if largest_shift < self.config.tolerance {
                return pass + 1;
            }
        }
        self.config.max_passes
    }
}

/// Sorted list of bonded atoms for every atom
fn bonded_to(size: usize, bonds: &[Bond]) -> Vec<Vec<usize>> {
    let mut bonded_to = vec![Vec::new(); size];
    for bond in bonds {
        debug_assert!(bond[0] < size && bond[1] < size);
        bonded_to[bond[0]].push(bond[1]);
        bonded_to[bond[1]].push(bond[0]);
    }
    for list in &mut bonded_to {
        list.sort_unstable();
        list.dedup();
    }
    bonded_to
}

/// Atom with the most neighbors among `candidates`, the first one on ties.
fn find_root(bonded_to: &[Vec<usize>], candidates: &[usize]) -> usize {
    let mut root = candidates[0];
    for &i in candidates {
        if bonded_to[i].len() > bonded_to[root].len() {
            root = i;
        }
    }
    root
}

/// Connected fragments, each sorted and ordered by their first atom.
fn fragments(bonded_to: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let mut seen = vec![false; bonded_to.len()];
    let mut fragments = Vec::new();

    for start in 0..bonded_to.len() {
        if seen[start] {
            continue;
        }
        seen[start] = true;
        let mut fragment = vec![start];
        let mut stack = vec![start];
        while let Some(i) = stack.pop() {
            for &j in &bonded_to[i] {
                if !seen[j] {
                    seen[j] = true;
                    fragment.push(j);
                    stack.push(j);
                }
            }
        }
        fragment.sort_unstable();
        fragments.push(fragment);
    }
    fragments
}

/// Bounding box of the placed atoms in `indices`, including their radius.
fn extent(
    atoms: &[Atom],
    indices: impl IntoIterator<Item = usize>,
) -> Option<(Point2<f64>, Point2<f64>)> {
    let mut bounds: Option<(Point2<f64>, Point2<f64>)> = None;
    for i in indices {
        let Some(p) = atoms[i].position else {
            continue;
        };
        let r = atoms[i].display_radius();
        let (lo, hi) = (
            Point2::new(p.x - r, p.y - r),
            Point2::new(p.x + r, p.y + r),
        );
        bounds = Some(match bounds {
            None => (lo, hi),
            Some((min, max)) => (min.inf(&lo), max.sup(&hi)),
        });
    }
    bounds
}

#[cfg(test)]
mod tests {
    use assert_approx_eq::assert_approx_eq;

    use super::*;
    use crate::bond::BondOrder;

    fn atoms(symbols: &[&str]) -> Vec<Atom> {
        symbols.iter().map(|s| Atom::new(s)).collect()
    }

    fn bonds(pairs: &[(usize, usize)]) -> Vec<Bond> {
        pairs
            .iter()
            .map(|&(i, j)| Bond::new(i, j, BondOrder::Single))
            .collect()
    }

    fn distance(a: &Atom, b: &Atom) -> f64 {
        (a.position.unwrap() - b.position.unwrap()).norm()
    }

    fn unrelaxed() -> LayoutEngine {
        LayoutEngine::new(LayoutConfig {
            max_passes: 0,
            ..Default::default()
        })
    }

    #[test]
    fn single_atom_at_origin() {
        let mut atoms = atoms(&["Na"]);
        let stats = LayoutEngine::default().layout(&mut atoms, &[]);
        assert_eq!(atoms[0].position, Some(Point2::origin()));
        assert_eq!(stats.placed, 1);
        assert_eq!(stats.unplaced, 0);
    }

    #[test]
    fn empty_pool() {
        let stats = LayoutEngine::default().layout(&mut [], &[]);
        assert_eq!(stats.placed, 0);
        assert_eq!(stats.passes, 0);
    }

    #[test]
    fn root_is_best_connected_atom() {
        let mut atoms = atoms(&["H", "H", "C", "H", "H"]);
        let bonds = bonds(&[(2, 0), (2, 1), (2, 3), (2, 4)]);
        LayoutEngine::default().layout(&mut atoms, &bonds);

        let carbon = atoms[2].position.unwrap();
        assert_approx_eq!(carbon.x, 0.0);
        assert_approx_eq!(carbon.y, 0.0);

        // four hydrogens on a circle, a quarter turn apart
        let r = BASE_RADIUS + 0.31;
        let expected = [(r, 0.0), (0.0, r), (-r, 0.0), (0.0, -r)];
        for (atom, (x, y)) in [0, 1, 3, 4].iter().zip(expected) {
            let p = atoms[*atom].position.unwrap();
            assert_approx_eq!(p.x, x, 1e-9);
            assert_approx_eq!(p.y, y, 1e-9);
        }
    }

    #[test]
    fn two_neighbors_use_a_third_of_the_circle() {
        let mut atoms = atoms(&["O", "H", "H"]);
        let bonds = bonds(&[(0, 1), (0, 2)]);
        unrelaxed().layout(&mut atoms, &bonds);

        let r = BASE_RADIUS + 0.31;
        let angle = TAU / 3.0;
        let second = atoms[2].position.unwrap();
        assert_approx_eq!(second.x, r * angle.cos(), 1e-9);
        assert_approx_eq!(second.y, r * angle.sin(), 1e-9);
    }

    #[test]
    fn spacing_shrinks_with_depth() {
        let mut atoms = atoms(&["C", "C", "C", "C"]);
        let bonds = bonds(&[(0, 1), (1, 2), (2, 3)]);
        unrelaxed().layout(&mut atoms, &bonds);

        // atom 1 is the first atom with two neighbors
        assert_eq!(atoms[1].position, Some(Point2::origin()));
        assert_approx_eq!(distance(&atoms[1], &atoms[0]), BASE_RADIUS + 0.76, 1e-9);
        assert_approx_eq!(distance(&atoms[1], &atoms[2]), BASE_RADIUS + 0.76, 1e-9);
        assert_approx_eq!(distance(&atoms[2], &atoms[3]), BASE_RADIUS / 2.0 + 0.76, 1e-9);
    }

    #[test]
    fn every_reachable_atom_is_placed() {
        let mut atoms = atoms(&["C", "C", "O", "H", "H", "H", "H", "H", "H"]);
        let bonds = bonds(&[(0, 1), (1, 2), (0, 3), (0, 4), (0, 5), (1, 6), (1, 7), (2, 8)]);
        let stats = LayoutEngine::default().layout(&mut atoms, &bonds);
        assert_eq!(stats.unplaced, 0);
        for atom in &atoms {
            let p = atom.position.unwrap();
            assert!(p.x.is_finite() && p.y.is_finite());
        }
    }

    #[test]
    fn disconnected_fragments_stay_unplaced() {
        // two separate H2 molecules: only the fragment of the root is placed
        let mut atoms = atoms(&["H", "H", "H", "H"]);
        let bonds = bonds(&[(0, 1), (2, 3)]);
        let stats = LayoutEngine::default().layout(&mut atoms, &bonds);

        assert!(atoms[0].position.is_some());
        assert!(atoms[1].position.is_some());
        assert!(atoms[2].position.is_none());
        assert!(atoms[3].position.is_none());
        assert_eq!(stats.placed, 2);
        assert_eq!(stats.unplaced, 2);
    }

    #[test]
    fn tiled_fragments_are_all_placed() {
        let mut atoms = atoms(&["H", "H", "Na", "H", "H"]);
        let bonds = bonds(&[(0, 1), (3, 4)]);
        let engine = LayoutEngine::new(LayoutConfig {
            fragments: FragmentPolicy::Tiled,
            ..Default::default()
        });
        let stats = engine.layout(&mut atoms, &bonds);
        assert_eq!(stats.unplaced, 0);

        // fragments are lined up from left to right without overlapping
        let first = extent(&atoms, [0, 1]).unwrap();
        let second = extent(&atoms, [2]).unwrap();
        let third = extent(&atoms, [3, 4]).unwrap();
        assert!(first.1.x < second.0.x);
        assert!(second.1.x < third.0.x);
    }

    #[test]
    fn relaxation_separates_overlapping_atoms() {
        let engine = LayoutEngine::new(LayoutConfig {
            base_radius: 0.0,
            ..Default::default()
        });
        let mut atoms = atoms(&["C", "C"]);
        let stats = engine.layout(&mut atoms, &bonds(&[(0, 1)]));

        // placed 0.76 apart, relaxed towards 2 * 0.76
        assert_approx_eq!(distance(&atoms[0], &atoms[1]), 1.52, 1e-3);
        assert!(stats.passes < MAX_PASSES);
    }

    #[test]
    fn coincident_atoms_are_pushed_apart() {
        let engine = LayoutEngine::default();
        let mut atoms = atoms(&["C", "C"]);
        atoms[0].position = Some(Point2::origin());
        atoms[1].position = Some(Point2::origin());
        engine.relax(&mut atoms);
        assert!(distance(&atoms[0], &atoms[1]) > 1.5);
    }

    #[test]
    fn relaxation_respects_pass_ceiling() {
        let engine = LayoutEngine::new(LayoutConfig {
            max_passes: 3,
            tolerance: 0.0,
            ..Default::default()
        });
        let mut atoms = atoms(&["C", "C"]);
        atoms[0].position = Some(Point2::origin());
        atoms[1].position = Some(Point2::new(0.1, 0.0));
        assert_eq!(engine.relax(&mut atoms), 3);
    }

    #[test]
    fn zero_radius_atoms_do_not_break_layout() {
        let mut atoms = atoms(&["Xx", "Xx", "Xx"]);
        let bonds = bonds(&[(0, 1), (0, 2)]);
        LayoutEngine::default().layout(&mut atoms, &bonds);
        for atom in &atoms {
            let p = atom.position.unwrap();
            assert!(p.x.is_finite() && p.y.is_finite());
        }
        assert_approx_eq!(distance(&atoms[0], &atoms[1]), BASE_RADIUS, 1e-9);
    }

    #[test]
    fn fragments_are_found_in_order() {
        let bonded_to = bonded_to(5, &bonds(&[(3, 1), (0, 4)]));
        assert_eq!(fragments(&bonded_to), vec![vec![0, 4], vec![1, 3], vec![2]]);
    }
}
