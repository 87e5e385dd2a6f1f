// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Errors
//!
//! Everything that can go wrong in a carving session.  All of these
//! are invariant violations of one sort or another: the caller handed
//! us a coordinate, a buffer, or a seam that doesn't fit the image.
//! None of them are retried; continuing after one would leave the
//! min-path matrix lying about the image.

use failure::Fail;

/// The one error type for the crate.
#[derive(Debug, Fail, PartialEq)]
pub enum CarveError {
    #[fail(
        display = "coordinate ({}, {}) is outside the {}x{} image",
        x, y, width, height
    )]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[fail(display = "an image must be at least one pixel wide and tall")]
    EmptyImage,

    #[fail(
        display = "expected {} samples for the image, got {}",
        expected, actual
    )]
    BufferSize { expected: usize, actual: usize },

    #[fail(display = "malformed seam: {}", _0)]
    MalformedSeam(String),

    #[fail(
        display = "seamcarve cannot upscale an image ({} columns to {})",
        width, target
    )]
    CannotUpscale { width: u32, target: u32 },

    #[fail(display = "cannot remove a seam from a one-column image")]
    TooNarrow,

    #[fail(display = "a subpixel could not be converted to an 8-bit sample")]
    SampleConversion,

    #[fail(display = "energy worker failed: {}", _0)]
    Worker(String),

    #[fail(
        display = "incremental update diverged from a full rebuild at ({}, {})",
        x, y
    )]
    Diverged { x: u32, y: u32 },
}

/// Shorthand used throughout the crate.
pub type Result<T> = std::result::Result<T, CarveError>;
