// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Calculate the energy of a pixel
//!
//! The energy model is the classic dual gradient: for the pixels to
//! the left and right, and above and below, sum the squared
//! differences of each color channel, then take the square root of
//! the total.  Border pixels don't get a gradient at all; they get a
//! flat `BORDER_ENERGY`, which is high enough that a seam will almost
//! never choose to run down the edge of the image.

use crate::error::Result;
use crate::pixelbuffer::PixelBuffer;
use itertools::zip;

/// The energy assigned to every pixel on the outer edge of the image.
pub const BORDER_ENERGY: f64 = 1000.0;

// Takes the channels (R,G,B) from two pixels and maps the difference
// between each channel, squares it, and then sums them all up.  This
// is the rusty expression of:
//
//        |Δx|² = (Δrx)²+(Δgx)²+(Δbx)²
//
// Only using map for the channels, and fold for the final summation.
fn gradient_of_pair(p1: &[u8; 3], p2: &[u8; 3]) -> f64 {
    zip(p1.iter(), p2.iter())
        .map(|(c1, c2)| {
            let d = f64::from(*c1) - f64::from(*c2);
            d * d
        })
        .fold(0.0, |a, c| a + c)
}

//       e(x,y) = √(|Δx|²+|Δy|²)
//
// The caller guarantees (x, y) is inside the buffer.
pub(crate) fn dual_gradient(image: &PixelBuffer, x: u32, y: u32) -> f64 {
    if image.is_border(x, y) {
        return BORDER_ENERGY;
    }
    let (left, right, up, down) = (
        image.rgb(x - 1, y),
        image.rgb(x + 1, y),
        image.rgb(x, y - 1),
        image.rgb(x, y + 1),
    );
    (gradient_of_pair(&right, &left) + gradient_of_pair(&down, &up)).sqrt()
}

/// The energy of a single pixel.  Fails if (x, y) isn't in the image.
pub fn energy(image: &PixelBuffer, x: u32, y: u32) -> Result<f64> {
    image.pixel(x, y)?;
    Ok(dual_gradient(image, x, y))
}

/// Fill `row` with the energies of every pixel in row `y`.
#[cfg(not(feature = "threaded"))]
pub(crate) fn fill_row(image: &PixelBuffer, y: u32, row: &mut [f64]) -> Result<()> {
    for (x, e) in row.iter_mut().enumerate() {
        *e = dual_gradient(image, x as u32, y);
    }
    Ok(())
}

// The pixels of a row don't depend on each other, only on the
// (immutable) image, so the row is carved into one chunk per CPU.
// Leaving the scope is the barrier between rows.
/// Fill `row` with the energies of every pixel in row `y`.
#[cfg(feature = "threaded")]
pub(crate) fn fill_row(image: &PixelBuffer, y: u32, row: &mut [f64]) -> Result<()> {
    use crate::error::CarveError;

    let workers = num_cpus::get().max(1);
    let chunk = ((row.len() + workers - 1) / workers).max(1);
    crossbeam::scope(|s| {
        for (i, part) in row.chunks_mut(chunk).enumerate() {
            s.spawn(move |_| {
                let x0 = i * chunk;
                for (dx, e) in part.iter_mut().enumerate() {
                    *e = dual_gradient(image, (x0 + dx) as u32, y);
                }
            });
        }
    })
    .map_err(|_| CarveError::Worker(format!("row {} panicked", y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CarveError;

    // 3 wide, 4 tall: the two interior pixels are (1,1) and (1,2).
    const IMAGE_DATA: [[u8; 3]; 12] = [
        [255, 101, 51],
        [255, 101, 153],
        [255, 101, 255],
        [255, 153, 51],
        [255, 153, 153],
        [255, 153, 255],
        [255, 203, 51],
        [255, 204, 153],
        [255, 205, 255],
        [255, 255, 51],
        [255, 255, 153],
        [255, 255, 255],
    ];

    fn sample() -> PixelBuffer {
        PixelBuffer::from_fn(3, 4, |x, y| IMAGE_DATA[(y * 3 + x) as usize]).unwrap()
    }

    #[test]
    fn interior_pixel_is_the_dual_gradient() {
        let image = sample();
        // Δx = (255-255, 205-203, 255-51), Δy = (255-255, 255-153, 153-153)
        let expected = ((2.0f64 * 2.0 + 204.0 * 204.0) + (102.0 * 102.0)).sqrt();
        let e = energy(&image, 1, 2).unwrap();
        assert!((e - expected).abs() < 1e-9);
        assert!((e - 52024.0f64.sqrt()).abs() < 1e-9);

        let e = energy(&image, 1, 1).unwrap();
        assert!((e - 52225.0f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn border_pixels_are_flat_regardless_of_color() {
        let image = sample();
        for &(x, y) in &[(0, 0), (2, 0), (0, 3), (1, 0), (0, 2), (2, 1), (1, 3)] {
            assert_eq!(energy(&image, x, y), Ok(BORDER_ENERGY));
        }
    }

    #[test]
    fn uniform_interior_has_no_energy() {
        let image = PixelBuffer::from_fn(3, 3, |_, _| [7, 7, 7]).unwrap();
        assert_eq!(energy(&image, 1, 1), Ok(0.0));
    }

    #[test]
    fn energy_outside_the_image_is_an_error() {
        let image = sample();
        assert_eq!(
            energy(&image, 3, 0),
            Err(CarveError::OutOfBounds {
                x: 3,
                y: 0,
                width: 3,
                height: 4
            })
        );
    }

    #[test]
    fn a_filled_row_matches_pixel_by_pixel() {
        let image = PixelBuffer::from_fn(9, 3, |x, y| [(x * 31) as u8, (y * 17) as u8, 3]).unwrap();
        let mut row = vec![0.0; 9];
        fill_row(&image, 1, &mut row).unwrap();
        for x in 0..9 {
            assert_eq!(row[x as usize], energy(&image, x, 1).unwrap());
        }
    }
}
