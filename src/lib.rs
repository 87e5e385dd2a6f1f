// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Incremental seam carving
//!
//! Narrow an image by repeatedly removing the top-to-bottom path of
//! pixels that contributes least to its structure.  The min-path
//! matrix is built once, then patched around each removed seam rather
//! than rebuilt.

#[macro_use]
mod ternary;

pub mod error;
pub use error::{CarveError, Result};

pub mod pixelbuffer;
pub use pixelbuffer::{Channel, PixelBuffer};

mod surface;

pub mod seam;
pub use seam::Seam;

pub mod energy;
pub use energy::{energy, BORDER_ENERGY};

pub mod minpath;
pub use minpath::{EnergyCell, MinPathMatrix};

pub mod seamfinder;
pub use seamfinder::SeamFinder;

pub mod reenergize;
pub use reenergize::{propagate_min_sums, recompute_local_energies, Propagation, Worklist};

pub mod dump;
pub use dump::{dump, energy_to_image, Field};

pub mod seamcarver;
pub use seamcarver::{seamcarve, CarveOptions, SeamCarver};
