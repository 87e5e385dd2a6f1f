// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A vertical seam: one column index per row, top to bottom.

use crate::error::Result;
use std::ops::Index;

/// The list of x-coordinates that, when mapped with the range
/// (0..height), give the XY coordinates of each pixel to be removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seam(Vec<u32>);

impl Seam {
    pub fn new(columns: Vec<u32>) -> Self {
        Seam(columns)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, u32> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn into_inner(self) -> Vec<u32> {
        self.0
    }

    /// Check that this seam can be cut out of a `width` x `height`
    /// image: exactly one column per row, every column inside the
    /// image, and no jump of more than one column between rows.
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        if self.0.len() != height as usize {
            reject_seam!("length {}, expected {}", self.0.len(), height);
        }
        if let Some(row) = self.0.iter().position(|&c| c >= width) {
            reject_seam!(
                "column {} at row {} is outside width {}",
                self.0[row],
                row,
                width
            );
        }
        if let Some(row) = (1..self.0.len()).find(|&r| {
            let (a, b) = (self.0[r - 1], self.0[r]);
            let gap = cq!(a > b, a - b, b - a);
            gap > 1
        }) {
            reject_seam!(
                "rows {} and {} jump from column {} to {}",
                row - 1,
                row,
                self.0[row - 1],
                self.0[row]
            );
        }
        Ok(())
    }
}

impl Index<usize> for Seam {
    type Output = u32;

    fn index(&self, row: usize) -> &u32 {
        &self.0[row]
    }
}

impl From<Vec<u32>> for Seam {
    fn from(columns: Vec<u32>) -> Self {
        Seam(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CarveError;

    #[test]
    fn connected_seam_validates() {
        assert_eq!(Seam::new(vec![2, 3, 4, 3]).validate(5, 4), Ok(()));
        assert_eq!(Seam::new(vec![0]).validate(1, 1), Ok(()));
    }

    #[test]
    fn malformed_seams_are_rejected() {
        let short = Seam::new(vec![1, 1]).validate(3, 3);
        assert_eq!(
            short,
            Err(CarveError::MalformedSeam("length 2, expected 3".into()))
        );

        match Seam::new(vec![1, 2, 3]).validate(3, 3) {
            Err(CarveError::MalformedSeam(msg)) => assert!(msg.contains("outside width 3")),
            other => panic!("expected an out-of-range rejection, got {:?}", other),
        }

        match Seam::new(vec![0, 2, 2]).validate(3, 3) {
            Err(CarveError::MalformedSeam(msg)) => assert!(msg.contains("jump")),
            other => panic!("expected a disconnected-seam rejection, got {:?}", other),
        }
    }
}
