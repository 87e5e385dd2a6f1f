// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The pixel buffer
//!
//! A width x height grid of RGB samples, stored row-major in one
//! contiguous vector, three bytes per pixel.  The only way to change
//! one after construction is to remove a seam from it, which
//! reallocates the whole thing one column narrower.

use crate::error::{CarveError, Result};
use crate::seam::Seam;

/// Which of the three samples of a pixel.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Channel {
    Red = 0,
    Green = 1,
    Blue = 2,
}

impl Channel {
    /// All three, in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];
}

/// An owned RGB image.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap a row-major vector of RGB bytes.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(CarveError::EmptyImage);
        }
        let expected = width as usize * height as usize * 3;
        if samples.len() != expected {
            return Err(CarveError::BufferSize {
                expected,
                actual: samples.len(),
            });
        }
        Ok(PixelBuffer {
            width,
            height,
            samples,
        })
    }

    /// Build an image by asking `f` for the color of every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> [u8; 3],
    {
        let mut samples = Vec::with_capacity(width as usize * height as usize * 3);
        for y in 0..height {
            for x in 0..width {
                samples.extend_from_slice(&f(x, y));
            }
        }
        PixelBuffer::from_raw(width, height, samples)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// The raw row-major RGB bytes.
    pub fn as_raw(&self) -> &[u8] {
        &self.samples
    }

    // Same rule as the min-path matrix: all of the index math lives
    // here and nowhere else.
    fn get_index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 3
    }

    fn check(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(CarveError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// A single sample.  Never clamps; asking for a pixel that isn't
    /// there is an error.
    pub fn channel(&self, x: u32, y: u32, c: Channel) -> Result<u8> {
        self.check(x, y)?;
        Ok(self.samples[self.get_index(x, y) + c as usize])
    }

    /// All three samples of a pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Result<[u8; 3]> {
        self.check(x, y)?;
        Ok(self.rgb(x, y))
    }

    // Unchecked twin of `pixel`, for callers that have already proven
    // the coordinate is inside the image.
    pub(crate) fn rgb(&self, x: u32, y: u32) -> [u8; 3] {
        let i = self.get_index(x, y);
        [self.samples[i], self.samples[i + 1], self.samples[i + 2]]
    }

    /// True for any pixel on the outer edge of the image.
    pub fn is_border(&self, x: u32, y: u32) -> bool {
        x == 0
            || y == 0
            || x >= self.width.saturating_sub(1)
            || y >= self.height.saturating_sub(1)
    }

    /// Drop one pixel per row, shifting everything to the right of the
    /// seam one column left.  The seam must already have been
    /// validated against this buffer.
    pub(crate) fn without_seam(&self, seam: &Seam) -> PixelBuffer {
        let (width, height) = (self.width as usize, self.height as usize);
        let mut samples = Vec::with_capacity((width - 1) * height * 3);
        for (row, &col) in self.samples.chunks(width * 3).zip(seam.iter()) {
            let cut = col as usize * 3;
            samples.extend_from_slice(&row[..cut]);
            samples.extend_from_slice(&row[cut + 3..]);
        }
        PixelBuffer {
            width: self.width - 1,
            height: self.height,
            samples,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> PixelBuffer {
        PixelBuffer::from_fn(4, 3, |x, y| [x as u8, y as u8, (x * 10 + y) as u8]).unwrap()
    }

    #[test]
    fn raw_length_must_match_dimensions() {
        assert_eq!(
            PixelBuffer::from_raw(2, 2, vec![0; 11]),
            Err(CarveError::BufferSize {
                expected: 12,
                actual: 11
            })
        );
        assert_eq!(
            PixelBuffer::from_raw(0, 2, vec![]),
            Err(CarveError::EmptyImage)
        );
    }

    #[test]
    fn channel_access_is_bounds_checked() {
        let buf = ramp();
        assert_eq!(buf.channel(3, 2, Channel::Blue), Ok(32));
        assert_eq!(buf.pixel(1, 2), Ok([1, 2, 12]));
        assert_eq!(
            buf.channel(4, 0, Channel::Red),
            Err(CarveError::OutOfBounds {
                x: 4,
                y: 0,
                width: 4,
                height: 3
            })
        );
        assert!(buf.pixel(0, 3).is_err());
    }

    #[test]
    fn border_classification() {
        let buf = ramp();
        let borders: Vec<(u32, u32)> = (0..3)
            .flat_map(|y| (0..4).map(move |x| (x, y)))
            .filter(|&(x, y)| buf.is_border(x, y))
            .collect();
        assert_eq!(borders.len(), 10);
        assert!(!buf.is_border(1, 1));
        assert!(!buf.is_border(2, 1));
        assert!(buf.is_border(u32::max_value(), 1));
        assert!(buf.is_border(1, u32::max_value()));
    }

    #[test]
    fn removing_a_seam_shifts_the_right_hand_side() {
        let buf = ramp();
        let seam = Seam::new(vec![0, 1, 3]);
        let out = buf.without_seam(&seam);
        assert_eq!(out.dimensions(), (3, 3));
        let reds: Vec<u8> = (0..3)
            .flat_map(|y| (0..3).map(move |x| (x, y)))
            .map(|(x, y)| out.channel(x, y, Channel::Red).unwrap())
            .collect();
        assert_eq!(reds, vec![1, 2, 3, 0, 2, 3, 0, 1, 2]);
        assert_eq!(out.pixel(2, 1), Ok([3, 1, 31]));
    }
}
