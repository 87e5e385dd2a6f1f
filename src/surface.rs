// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Pixel sources and sinks
//!
//! The carver only ever works on its own `PixelBuffer`.  This is the
//! adapter layer between that and the ImageRS world: any
//! `GenericImageView` whose pixels can be read as RGB goes in, an
//! `RgbImage` comes out, and a `PixelBuffer` can itself be handed to
//! anything that reads a `GenericImageView`.

use crate::error::{CarveError, Result};
use crate::pixelbuffer::PixelBuffer;
use image::{GenericImageView, ImageBuffer, Pixel, Primitive, Rgb, RgbImage};
use itertools::iproduct;
use num_traits::NumCast;

impl PixelBuffer {
    /// Copy any image into a pixel buffer, converting each pixel to
    /// RGB and rescaling its subpixels into the 0..=255 range.
    pub fn from_view<I, P, S>(image: &I) -> Result<PixelBuffer>
    where
        I: GenericImageView<Pixel = P>,
        P: Pixel<Subpixel = S> + 'static,
        S: Primitive + 'static,
    {
        let (width, height) = image.dimensions();
        let scale = <f64 as NumCast>::from(S::max_value()).ok_or(CarveError::SampleConversion)?;
        let mut samples = Vec::with_capacity(width as usize * height as usize * 3);
        for (y, x) in iproduct!(0..height, 0..width) {
            let rgb = image.get_pixel(x, y).to_rgb();
            for c in rgb.channels() {
                let v = <f64 as NumCast>::from(*c).ok_or(CarveError::SampleConversion)?;
                let v = (v / scale * 255.0).round();
                samples.push(<u8 as NumCast>::from(v).ok_or(CarveError::SampleConversion)?);
            }
        }
        PixelBuffer::from_raw(width, height, samples)
    }

    /// Hand the pixels back as an ImageRS image.
    pub fn to_image(&self) -> RgbImage {
        ImageBuffer::from_fn(self.width(), self.height(), |x, y| Rgb(self.rgb(x, y)))
    }
}

impl GenericImageView for PixelBuffer {
    type Pixel = Rgb<u8>;
    type InnerImageView = Self;

    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn bounds(&self) -> (u32, u32, u32, u32) {
        (0, 0, self.width(), self.height())
    }

    fn get_pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        match self.pixel(x, y) {
            Ok(p) => Rgb(p),
            Err(e) => panic!("{}", e),
        }
    }

    fn inner(&self) -> &Self::InnerImageView {
        self
    }
}
