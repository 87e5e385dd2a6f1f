// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Seamcarve - The main session
//!
//! A `SeamCarver` owns an image and its min-path matrix, and keeps the
//! two the same width at all times.  Each carve is one transaction:
//! find the seam, cut it out of both, re-energize around the cut, and
//! propagate the changed sums.  The new image and matrix are only
//! swapped in once all of that is done.

use crate::dump::{dump, Field};
use crate::error::{CarveError, Result};
use crate::minpath::MinPathMatrix;
use crate::pixelbuffer::PixelBuffer;
use crate::reenergize::{propagate_min_sums, recompute_local_energies};
use crate::seam::Seam;
use crate::seamfinder::SeamFinder;
use image::{GenericImageView, Pixel, Primitive, RgbImage};
use log::{debug, info, trace};

/// Knobs for a carving session.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct CarveOptions {
    /// After every incremental update, rebuild the matrix from scratch
    /// and fail if the two disagree.  Slow; meant for debugging.
    pub verify: bool,
}

/// A struct for holding the image to be carved.
#[derive(Debug, Clone)]
pub struct SeamCarver {
    image: PixelBuffer,
    matrix: MinPathMatrix,
    options: CarveOptions,
}

impl SeamCarver {
    /// Creates a new SeamCarver with an image to be carved.
    pub fn new(image: PixelBuffer) -> Result<Self> {
        SeamCarver::with_options(image, CarveOptions::default())
    }

    pub fn with_options(image: PixelBuffer, options: CarveOptions) -> Result<Self> {
        let matrix = MinPathMatrix::build(&image)?;
        trace!("built {}x{} min-path matrix", matrix.width(), matrix.height());
        Ok(SeamCarver {
            image,
            matrix,
            options,
        })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.image
    }

    pub fn matrix(&self) -> &MinPathMatrix {
        &self.matrix
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.image
    }

    /// The diagnostic text dump of one field of the session.
    pub fn dump(&self, field: Field) -> String {
        dump(self, field)
    }

    /// The cheapest top-to-bottom seam through the current image.
    pub fn find_vertical_seam(&self) -> Seam {
        self.matrix.find_vertical_seam()
    }

    /// Cut `seam` out of the image, and patch the matrix to match.  The
    /// seam is checked first; a bad one leaves the session untouched.
    pub fn remove_seam(&mut self, seam: &Seam) -> Result<()> {
        if self.width() < 2 {
            return Err(CarveError::TooNarrow);
        }
        seam.validate(self.width(), self.height())?;

        let image = self.image.without_seam(seam);
        let mut matrix = self.matrix.without_seam(seam);
        let worklist = recompute_local_energies(&image, &mut matrix, seam);
        let seeded = worklist.len();
        let stats = propagate_min_sums(&mut matrix, worklist);
        debug!(
            "removed seam at column {}; width now {}, {} re-energized, {} relaxed, {} changed",
            seam[0],
            image.width(),
            seeded,
            stats.relaxed,
            stats.changed
        );

        if self.options.verify {
            let rebuilt = MinPathMatrix::build(&image)?;
            if let Some((x, y)) = matrix.first_difference(&rebuilt, 1e-9) {
                return Err(CarveError::Diverged { x, y });
            }
        }

        self.image = image;
        self.matrix = matrix;
        Ok(())
    }

    /// Find and remove the cheapest seam, returning it.
    pub fn carve_once(&mut self) -> Result<Seam> {
        let seam = self.find_vertical_seam();
        trace!(
            "seam cost {}: {:?}",
            self.matrix.cumulative_min_sum(seam[0], 0),
            seam
        );
        self.remove_seam(&seam)?;
        Ok(seam)
    }

    /// Remove seams until the image is `newwidth` columns wide.
    pub fn carve_to(&mut self, newwidth: u32) -> Result<()> {
        let width = self.width();
        if newwidth > width {
            return Err(CarveError::CannotUpscale {
                width,
                target: newwidth,
            });
        }
        if newwidth == 0 {
            return Err(CarveError::EmptyImage);
        }
        info!(
            "carving {}x{} down to {}x{}",
            width,
            self.height(),
            newwidth,
            self.height()
        );
        while self.width() > newwidth {
            self.carve_once()?;
        }
        Ok(())
    }

    /// Remove `count` seams.
    pub fn carve_columns(&mut self, count: u32) -> Result<()> {
        if count >= self.width() {
            return Err(CarveError::TooNarrow);
        }
        let target = self.width() - count;
        self.carve_to(target)
    }
}

/// Given an image and a desired new width, repeatedly carve seams out
/// of the image.
pub fn seamcarve<I, P, S>(image: &I, newwidth: u32) -> Result<RgbImage>
where
    I: GenericImageView<Pixel = P>,
    P: Pixel<Subpixel = S> + 'static,
    S: Primitive + 'static,
{
    let mut carver = SeamCarver::new(PixelBuffer::from_view(image)?)?;
    carver.carve_to(newwidth)?;
    Ok(carver.into_buffer().to_image())
}
