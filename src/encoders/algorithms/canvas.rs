//! Square, row-major layout of pixels on an image.
//!
//! Pixel storage and file formats are delegated to the `image` crate through
//! the [`PixelBuffer`] trait.

use super::errors::Error;
use super::packer::Rgb;
use image::{ImageFormat, RgbImage};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the square side is derived from the pixel count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sizing {
    /// `ceil(sqrt(n))`: every pixel fits.
    #[default]
    Ceil,
    /// `floor(sqrt(n))`: legacy layout. Pixels past `side * side` are dropped.
    Floor,
}

impl Sizing {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sizing::Ceil => "ceil",
            Sizing::Floor => "floor",
        }
    }
}

/// The pixel storage the layout writes to and reads from.
pub trait PixelBuffer: Sized {
    fn new_image(width: u32, height: u32, background: Rgb) -> Self;
    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb);
    fn get_pixel(&self, x: u32, y: u32) -> Rgb;
    fn dimensions(&self) -> (u32, u32);

    fn pixels_row_major(&self) -> Vec<Rgb> {
        let (width, height) = self.dimensions();
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(self.get_pixel(x, y));
            }
        }
        pixels
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Rgb(pixel.0)
    }
}

impl From<Rgb> for image::Rgb<u8> {
    fn from(pixel: Rgb) -> Self {
        image::Rgb(pixel.0)
    }
}

impl PixelBuffer for RgbImage {
    fn new_image(width: u32, height: u32, background: Rgb) -> Self {
        RgbImage::from_pixel(width, height, background.into())
    }

    fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        self.put_pixel(x, y, color.into());
    }

    fn get_pixel(&self, x: u32, y: u32) -> Rgb {
        (*RgbImage::get_pixel(self, x, y)).into()
    }

    fn dimensions(&self) -> (u32, u32) {
        RgbImage::dimensions(self)
    }

    fn pixels_row_major(&self) -> Vec<Rgb> {
        self.pixels().map(|p| (*p).into()).collect()
    }
}

/// Side length of the square holding `count` pixels. Never less than 1, so an
/// empty payload still yields a one-cell background image.
pub fn side_length(count: usize, sizing: Sizing) -> u32 {
    let root = count.isqrt();
    let side = match sizing {
        Sizing::Ceil if root * root < count => root + 1,
        _ => root,
    };
    u32::try_from(side.max(1)).unwrap_or(u32::MAX)
}

/// Lays `pixels` out row-major on a square canvas filled with `background`.
///
/// With [`Sizing::Floor`], pixels that do not fit are dropped.
pub fn assemble<B: PixelBuffer>(pixels: &[Rgb], sizing: Sizing, background: Rgb) -> B {
    let side = side_length(pixels.len(), sizing);
    let mut buffer = B::new_image(side, side, background);
    let capacity = side as usize * side as usize;

    for (i, &pixel) in pixels.iter().take(capacity).enumerate() {
        let x = (i % side as usize) as u32;
        let y = (i / side as usize) as u32;
        buffer.set_pixel(x, y, pixel);
    }

    if pixels.len() > capacity {
        tracing::warn!(
            dropped = pixels.len() - capacity,
            side,
            sizing = sizing.as_str(),
            "canvas too small; trailing pixels were not drawn"
        );
    }

    buffer
}

/// Reads every cell row-major, background cells included.
pub fn disassemble<B: PixelBuffer>(buffer: &B) -> Vec<Rgb> {
    buffer.pixels_row_major()
}

/// Writes `image` to `path`, in the format named by its extension (PNG when
/// there is none). Only lossless encoders are compiled in.
pub fn save(image: &RgbImage, path: &Path) -> Result<(), Error> {
    let format = ImageFormat::from_path(path).unwrap_or(ImageFormat::Png);
    image
        .save_with_format(path, format)
        .map_err(|source| Error::FileAccess {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads an image and converts it to 8-bit RGB.
pub fn load(path: &Path) -> Result<RgbImage, Error> {
    let image = image::open(path).map_err(|source| Error::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.into_rgb8())
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb = Rgb([255, 255, 255]);

    fn ramp(n: u32) -> Vec<Rgb> {
        (0..n).map(Rgb::from_value).collect()
    }

    #[test]
    fn test_side_length_ceil() {
        assert_eq!(side_length(0, Sizing::Ceil), 1);
        assert_eq!(side_length(1, Sizing::Ceil), 1);
        assert_eq!(side_length(2, Sizing::Ceil), 2);
        assert_eq!(side_length(4, Sizing::Ceil), 2);
        assert_eq!(side_length(5, Sizing::Ceil), 3);
        assert_eq!(side_length(260, Sizing::Ceil), 17);
    }

    #[test]
    fn test_side_length_floor() {
        assert_eq!(side_length(0, Sizing::Floor), 1);
        assert_eq!(side_length(3, Sizing::Floor), 1);
        assert_eq!(side_length(8, Sizing::Floor), 2);
        assert_eq!(side_length(9, Sizing::Floor), 3);
        assert_eq!(side_length(260, Sizing::Floor), 16);
    }

    #[test]
    fn test_row_major_layout() {
        let pixels = ramp(5);
        let image: RgbImage = assemble(&pixels, Sizing::Ceil, WHITE);
        assert_eq!(image.dimensions(), (3, 3));
        assert_eq!(PixelBuffer::get_pixel(&image, 2, 0), Rgb::from_value(2));
        assert_eq!(PixelBuffer::get_pixel(&image, 0, 1), Rgb::from_value(3));
        assert_eq!(PixelBuffer::get_pixel(&image, 1, 1), Rgb::from_value(4));
        assert_eq!(PixelBuffer::get_pixel(&image, 2, 2), WHITE);
    }

    #[test]
    fn test_disassemble_includes_background() {
        let pixels = ramp(5);
        let image: RgbImage = assemble(&pixels, Sizing::Ceil, WHITE);
        let read = disassemble(&image);
        assert_eq!(read.len(), 9);
        assert_eq!(&read[..5], &pixels[..]);
        assert!(read[5..].iter().all(|&p| p == WHITE));
    }

    #[test]
    fn test_floor_sizing_truncates() {
        let pixels = ramp(5);
        let image: RgbImage = assemble(&pixels, Sizing::Floor, WHITE);
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(disassemble(&image), pixels[..4].to_vec());
    }

    #[test]
    fn test_empty_is_single_background_cell() {
        let image: RgbImage = assemble(&[], Sizing::Ceil, Rgb([1, 2, 3]));
        assert_eq!(disassemble(&image), vec![Rgb([1, 2, 3])]);
    }

    #[test]
    fn test_default_pixels_row_major_matches_override() {
        struct Grid(RgbImage);

        impl PixelBuffer for Grid {
            fn new_image(width: u32, height: u32, background: Rgb) -> Self {
                Grid(RgbImage::new_image(width, height, background))
            }
            fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
                PixelBuffer::set_pixel(&mut self.0, x, y, color);
            }
            fn get_pixel(&self, x: u32, y: u32) -> Rgb {
                PixelBuffer::get_pixel(&self.0, x, y)
            }
            fn dimensions(&self) -> (u32, u32) {
                PixelBuffer::dimensions(&self.0)
            }
        }

        let pixels = ramp(7);
        let grid: Grid = assemble(&pixels, Sizing::Ceil, WHITE);
        assert_eq!(disassemble(&grid), disassemble(&grid.0));
    }

    #[test]
    fn test_save_and_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid.png");
        let pixels = ramp(10);
        let image: RgbImage = assemble(&pixels, Sizing::Ceil, WHITE);

        save(&image, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_save_without_extension_uses_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grid");
        let image: RgbImage = assemble(&ramp(3), Sizing::Ceil, WHITE);

        save(&image, &path).unwrap();
        assert_eq!(load(&path).unwrap(), image);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");
        match load(&path) {
            Err(Error::FileAccess { path: p, .. }) => assert_eq!(p, path),
            other => panic!("unexpected result: {:?}", other.map(|i| i.dimensions())),
        }
    }

    #[test]
    fn test_save_to_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no").join("such").join("dir.png");
        let image: RgbImage = assemble(&ramp(1), Sizing::Ceil, WHITE);
        assert!(matches!(save(&image, &path), Err(Error::FileAccess { .. })));
    }
}
