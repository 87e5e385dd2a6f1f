// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Incremental re-energizing
//!
//! Rebuilding the entire min-path matrix after every seam is absurdly
//! wasteful: removing a seam only changes the neighborhoods of the
//! pixels that were next to it.  So after the cut we re-energize a
//! five-pixel-wide band around where the seam used to be, and then
//! push any resulting change in a cumulative sum up toward the top of
//! the image, one row at a time, until nothing else changes.
//!
//! Every dependency in the matrix points strictly downward, so the
//! worklist is drained strictly bottom-to-top: a row is only relaxed
//! once everything below it has settled, and each cell of a row is
//! relaxed at most once per pass.

use crate::energy::dual_gradient;
use crate::minpath::MinPathMatrix;
use crate::pixelbuffer::PixelBuffer;
use crate::seam::Seam;
use std::collections::VecDeque;

// How far either side of the old seam a pixel's neighborhood can have
// changed.
const BAND: u32 = 2;

/// Pixels waiting to have their cumulative sums recomputed, bucketed
/// by row.
#[derive(Debug, Clone)]
pub struct Worklist {
    rows: Vec<Vec<u32>>,
}

impl Worklist {
    pub fn new(height: u32) -> Self {
        Worklist {
            rows: vec![Vec::new(); height as usize],
        }
    }

    pub fn push(&mut self, x: u32, y: u32) {
        self.rows[y as usize].push(x);
    }

    /// How many entries are pending, duplicates included.
    pub fn len(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(Vec::is_empty)
    }

    /// The pending pixels, in the order they were added within each
    /// row, bottom row first.
    pub fn pending(&self) -> Vec<(u32, u32)> {
        self.rows
            .iter()
            .enumerate()
            .rev()
            .flat_map(|(y, cols)| cols.iter().map(move |&x| (x, y as u32)))
            .collect()
    }
}

/// What one propagation pass did.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct Propagation {
    /// Cells whose sum and child were recomputed.
    pub relaxed: usize,
    /// Of those, how many came out with a different sum.
    pub changed: usize,
}

/// After `seam` has been cut out of both `image` and `matrix`,
/// recompute the energy (only the energy) of every pixel within two
/// columns of where the seam ran, on every row but the bottom one.
/// Returns those pixels as a worklist, seeded bottom row first.
pub fn recompute_local_energies(
    image: &PixelBuffer,
    matrix: &mut MinPathMatrix,
    seam: &Seam,
) -> Worklist {
    let (width, height) = (matrix.width(), matrix.height());
    let mut worklist = Worklist::new(height);
    for y in (0..height.saturating_sub(1)).rev() {
        let s = seam[y as usize];
        let first = s.saturating_sub(BAND);
        let last = s.saturating_add(BAND).min(width - 1);
        for x in first..=last {
            matrix.set_energy(x, y, dual_gradient(image, x, y));
            worklist.push(x, y);
        }
    }
    worklist
}

/// Drain the worklist, recomputing sums and children bottom-up.  A
/// cell whose sum changes puts its (up to three) parents on the
/// worklist for the row above.
pub fn propagate_min_sums(matrix: &mut MinPathMatrix, mut worklist: Worklist) -> Propagation {
    let width = matrix.width();
    let mut stats = Propagation::default();
    let mut seen = vec![false; width as usize];
    let mut queue: VecDeque<u32> = VecDeque::with_capacity(3 * width as usize);

    for y in (0..worklist.rows.len() as u32).rev() {
        queue.extend(worklist.rows[y as usize].drain(..));
        if queue.is_empty() {
            continue;
        }
        for s in seen.iter_mut() {
            *s = false;
        }
        while let Some(x) = queue.pop_front() {
            if seen[x as usize] {
                continue;
            }
            seen[x as usize] = true;
            stats.relaxed += 1;
            if matrix.relax(x, y) {
                stats.changed += 1;
                if y > 0 {
                    let first = cq!(x == 0, 0, x - 1);
                    let last = cq!(x + 1 >= width, width - 1, x + 1);
                    for parent in first..=last {
                        worklist.push(parent, y - 1);
                    }
                }
            }
        }
    }
    stats
}
