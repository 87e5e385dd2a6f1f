// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The min-path matrix
//!
//! For every pixel, the energy of that pixel, the least total energy
//! of any seam running from that pixel down to the bottom of the
//! image, and which of the (up to) three pixels below it that seam
//! passes through next.  It's the seam digraph, kept around between
//! carves so that it can be patched rather than rebuilt.
//!
//! Rather than a vector of little records, the three fields are kept
//! in three parallel vectors, all addressed by the same row-major
//! index.

use crate::energy::{dual_gradient, fill_row};
use crate::error::Result;
use crate::pixelbuffer::PixelBuffer;
use crate::seam::Seam;

// Marks "no child": only the bottom row carries it.
const NO_CHILD: u32 = u32::max_value();

/// One cell of the matrix, as a value.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EnergyCell {
    pub energy: f64,
    pub cumulative_min_sum: f64,
    pub best_child: Option<u32>,
}

/// The seam digraph for an image, bottom-up.
#[derive(Debug, Clone, PartialEq)]
pub struct MinPathMatrix {
    width: u32,
    height: u32,
    energy: Vec<f64>,
    sum: Vec<f64>,
    child: Vec<u32>,
}

impl MinPathMatrix {
    // Absolutely, the number one name of this game is keep the index
    // math in a singular location and never, ever mess with it.
    fn get_index(&self, x: u32, y: u32) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside the {}x{} matrix",
            x,
            y,
            self.width,
            self.height
        );
        (y as usize) * (self.width as usize) + (x as usize)
    }

    // The public accessors check in every build: a column past the
    // edge would otherwise land on the next row.
    fn checked_index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({}, {}) is outside the {}x{} matrix",
            x,
            y,
            self.width,
            self.height
        );
        self.get_index(x, y)
    }

    /// Compute the whole matrix for an image.  Rows are built from
    /// the bottom up, since each row's sums are read off the row
    /// below it; within a row the order doesn't matter.
    pub fn build(image: &PixelBuffer) -> Result<Self> {
        let (width, height) = image.dimensions();
        let size = width as usize * height as usize;
        let mut matrix = MinPathMatrix {
            width,
            height,
            energy: vec![0.0; size],
            sum: vec![0.0; size],
            child: vec![NO_CHILD; size],
        };
        for y in (0..height).rev() {
            let start = matrix.get_index(0, y);
            fill_row(image, y, &mut matrix.energy[start..start + width as usize])?;
            for x in 0..width {
                matrix.relax(x, y);
            }
        }
        Ok(matrix)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn energy(&self, x: u32, y: u32) -> f64 {
        self.energy[self.checked_index(x, y)]
    }

    pub fn cumulative_min_sum(&self, x: u32, y: u32) -> f64 {
        self.sum[self.checked_index(x, y)]
    }

    /// The column in row `y + 1` the cheapest seam through (x, y)
    /// continues to; `None` on the bottom row.
    pub fn best_child(&self, x: u32, y: u32) -> Option<u32> {
        match self.child[self.checked_index(x, y)] {
            NO_CHILD => None,
            c => Some(c),
        }
    }

    pub fn cell(&self, x: u32, y: u32) -> EnergyCell {
        EnergyCell {
            energy: self.energy(x, y),
            cumulative_min_sum: self.cumulative_min_sum(x, y),
            best_child: self.best_child(x, y),
        }
    }

    /// A whole row of energies.
    pub fn energy_row(&self, y: u32) -> &[f64] {
        let start = self.checked_index(0, y);
        &self.energy[start..start + self.width as usize]
    }

    /// A whole row of cumulative sums.
    pub fn sum_row(&self, y: u32) -> &[f64] {
        let start = self.checked_index(0, y);
        &self.sum[start..start + self.width as usize]
    }

    pub(crate) fn set_energy(&mut self, x: u32, y: u32, e: f64) {
        let index = self.get_index(x, y);
        self.energy[index] = e;
    }

    /// Recompute one cell from scratch: its energy from the image, and
    /// its sum and child from the row below, which must already be
    /// final.  (x, y) outside the matrix is a bug in the caller, and
    /// panics.
    pub fn recalculate(&mut self, image: &PixelBuffer, x: u32, y: u32) {
        assert!(
            x < self.width && y < self.height,
            "recalculate({}, {}) outside the {}x{} matrix",
            x,
            y,
            self.width,
            self.height
        );
        let e = dual_gradient(image, x, y);
        self.set_energy(x, y, e);
        self.relax(x, y);
    }

    // Recompute the sum and child of (x, y) from its current energy
    // and the row below.  Children are the closed range x-1..=x+1,
    // clipped to the image, examined left to right; a later child
    // only wins if it is strictly cheaper.  Returns true if the sum
    // changed.
    pub(crate) fn relax(&mut self, x: u32, y: u32) -> bool {
        let index = self.get_index(x, y);
        let energy = self.energy[index];
        let (sum, child) = if y + 1 == self.height {
            (energy, NO_CHILD)
        } else {
            let below = y + 1;
            let first = cq!(x == 0, 0, x - 1);
            let last = cq!(x + 1 >= self.width, self.width - 1, x + 1);
            let mut best = first;
            let mut best_sum = self.sum[self.get_index(first, below)];
            for c in (first + 1)..=last {
                let s = self.sum[self.get_index(c, below)];
                if s < best_sum {
                    best = c;
                    best_sum = s;
                }
            }
            (energy + best_sum, best)
        };
        let changed = self.sum[index] != sum;
        self.sum[index] = sum;
        self.child[index] = child;
        changed
    }

    /// The same matrix with the seam's cell dropped from every row and
    /// everything to its right shifted one column left.  Child
    /// pointers are renumbered against the seam's column in the row
    /// they point into: any pointer at or past that column moves left
    /// by one, any pointer before it is left alone.  Cells whose
    /// neighborhood changed are stale until re-energized.
    pub(crate) fn without_seam(&self, seam: &Seam) -> MinPathMatrix {
        let (width, height) = (self.width as usize, self.height as usize);
        let size = (width - 1) * height;
        let mut energy = Vec::with_capacity(size);
        let mut sum = Vec::with_capacity(size);
        let mut child = Vec::with_capacity(size);

        for y in 0..height {
            let start = y * width;
            let cut = start + seam[y] as usize;
            let end = start + width;
            energy.extend_from_slice(&self.energy[start..cut]);
            energy.extend_from_slice(&self.energy[cut + 1..end]);
            sum.extend_from_slice(&self.sum[start..cut]);
            sum.extend_from_slice(&self.sum[cut + 1..end]);

            let next_cut = seam.as_slice().get(y + 1).cloned();
            let shift = |c: &u32| match (*c, next_cut) {
                (c, Some(next)) if c != NO_CHILD && c >= next => c.saturating_sub(1),
                (c, _) => c,
            };
            child.extend(self.child[start..cut].iter().map(shift));
            child.extend(self.child[cut + 1..end].iter().map(shift));
        }

        MinPathMatrix {
            width: self.width - 1,
            height: self.height,
            energy,
            sum,
            child,
        }
    }

    /// The first cell, in row-major order, where this matrix and
    /// `other` disagree by more than `tolerance` (or in child), if any.
    pub fn first_difference(&self, other: &MinPathMatrix, tolerance: f64) -> Option<(u32, u32)> {
        if self.width != other.width || self.height != other.height {
            return Some((self.width.min(other.width), 0));
        }
        (0..self.energy.len())
            .find(|&i| {
                (self.energy[i] - other.energy[i]).abs() > tolerance
                    || (self.sum[i] - other.sum[i]).abs() > tolerance
                    || self.child[i] != other.child[i]
            })
            .map(|i| {
                let w = self.width as usize;
                ((i % w) as u32, (i / w) as u32)
            })
    }
}
