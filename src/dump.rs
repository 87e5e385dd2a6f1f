// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Diagnostics
//!
//! Ways to look at what the carver thinks of an image: a text grid of
//! any one field, for tests and for squinting at in a terminal, and a
//! grayscale rendering of the energy map.  Neither is an interchange
//! format.

use crate::minpath::MinPathMatrix;
use crate::pixelbuffer::Channel;
use crate::seamcarver::SeamCarver;
use image::{GrayImage, ImageBuffer, Luma};
use itertools::{iproduct, Itertools};
use num_traits::clamp;
use std::str::FromStr;

/// Which per-pixel value to dump.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Field {
    Energy,
    CumulativeMinSum,
    Color(Channel),
}

impl FromStr for Field {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s {
            "energy" => Ok(Field::Energy),
            "sum" => Ok(Field::CumulativeMinSum),
            "red" => Ok(Field::Color(Channel::Red)),
            "green" => Ok(Field::Color(Channel::Green)),
            "blue" => Ok(Field::Color(Channel::Blue)),
            _ => Err(format!("unknown field '{}'", s)),
        }
    }
}

/// The names `Field::from_str` accepts.
pub const FIELD_NAMES: [&str; 5] = ["energy", "sum", "red", "green", "blue"];

/// Render one field of a session as a row-major grid: one line per
/// row, values separated by single spaces.  Energies and sums get two
/// decimals, colors are printed as integers.  The session keeps its
/// image and matrix the same size, so the two are read in lockstep.
pub fn dump(carver: &SeamCarver, field: Field) -> String {
    let (image, matrix) = (carver.buffer(), carver.matrix());
    let (width, height) = image.dimensions();
    let cell = |x: u32, y: u32| match field {
        Field::Energy => format!("{:.2}", matrix.energy(x, y)),
        Field::CumulativeMinSum => format!("{:.2}", matrix.cumulative_min_sum(x, y)),
        Field::Color(c) => format!("{}", image.rgb(x, y)[c as usize]),
    };
    let rows = iproduct!(0..height, 0..width)
        .map(|(y, x)| cell(x, y))
        .chunks(width as usize);
    let text = rows.into_iter().map(|mut row| row.join(" ")).join("\n");
    text
}

/// Render the energy map as a grayscale image, scaled so the most
/// energetic pixel is white.
pub fn energy_to_image(matrix: &MinPathMatrix) -> GrayImage {
    let (width, height) = (matrix.width(), matrix.height());
    let factor = iproduct!(0..height, 0..width)
        .map(|(y, x)| matrix.energy(x, y))
        .fold(0.0, f64::max);
    let factor = cq!(factor > 0.0, factor, 1.0);
    ImageBuffer::from_fn(width, height, |x, y| {
        let c = clamp((matrix.energy(x, y) * 255.0 / factor).round(), 0.0, 255.0);
        Luma([c as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::pixelbuffer::PixelBuffer;
    use crate::seam::Seam;

    fn tiny() -> SeamCarver {
        let image = PixelBuffer::from_fn(3, 3, |x, y| [(x * 10 + y) as u8, 5, 200]).unwrap();
        SeamCarver::new(image).unwrap()
    }

    #[test]
    fn field_names_parse() {
        for name in FIELD_NAMES.iter() {
            assert!(name.parse::<Field>().is_ok());
        }
        assert_eq!("sum".parse(), Ok(Field::CumulativeMinSum));
        assert!("alpha".parse::<Field>().is_err());
    }

    #[test]
    fn colors_dump_as_integers() {
        let carver = tiny();
        assert_eq!(
            dump(&carver, Field::Color(Channel::Red)),
            "0 10 20\n1 11 21\n2 12 22"
        );
        assert_eq!(
            dump(&carver, Field::Color(Channel::Blue)),
            "200 200 200\n200 200 200\n200 200 200"
        );
    }

    #[test]
    fn energies_dump_with_two_decimals() {
        let carver = tiny();
        // Only (1,1) is interior: Δx = 20 in red, Δy = 2 in red.
        assert_eq!(
            dump(&carver, Field::Energy),
            "1000.00 1000.00 1000.00\n1000.00 20.10 1000.00\n1000.00 1000.00 1000.00"
        );
        assert_eq!(
            dump(&carver, Field::CumulativeMinSum),
            "2020.10 2020.10 2020.10\n2000.00 1020.10 2000.00\n1000.00 1000.00 1000.00"
        );
    }

    #[test]
    fn energy_image_is_normalized() {
        let carver = tiny();
        let gray = energy_to_image(carver.matrix());
        assert_eq!(gray.dimensions(), (3, 3));
        assert_eq!(gray.get_pixel(0, 0), &Luma([255]));
        assert_eq!(gray.get_pixel(1, 1), &Luma([5]));
    }

    #[test]
    fn dump_follows_the_session_as_it_narrows() {
        let mut carver = tiny();
        carver.remove_seam(&Seam::new(vec![1, 1, 1])).unwrap();
        assert_eq!(
            dump(&carver, Field::Color(Channel::Red)),
            "0 20\n1 21\n2 22"
        );
        assert_eq!(
            dump(&carver, Field::Energy),
            "1000.00 1000.00\n1000.00 1000.00\n1000.00 1000.00"
        );
    }
}
