// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use crate::minpath::MinPathMatrix;
use crate::seam::Seam;

/// This trait defines how we will return seams from an image.  It's a
/// primitive interface, just enough to make room for multiple seam
/// carvers as well as caching.
pub trait SeamFinder {
    /// Once a SeamFinder has an image (or whatever it needs to make a
    /// rational decision), request a vertical seam.
    fn find_vertical_seam(&self) -> Seam;
}

impl SeamFinder for MinPathMatrix {
    // The matrix already knows, for every pixel, the cheapest way down
    // to the bottom.  Pick the cheapest starting point on the top row
    // (first one wins a tie), then follow the child pointers down.
    fn find_vertical_seam(&self) -> Seam {
        let top = self.sum_row(0);
        let start = (1..top.len()).fold(0, |best, x| cq!(top[x] < top[best], x, best)) as u32;

        let mut seam_col = start;
        Seam::new((0..self.height()).fold(
            Vec::with_capacity(self.height() as usize),
            |mut acc, y| {
                acc.push(seam_col);
                seam_col = self.best_child(seam_col, y).unwrap_or(seam_col);
                acc
            },
        ))
    }
}
