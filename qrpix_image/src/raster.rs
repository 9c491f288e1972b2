use std::io::Write;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgb, RgbImage, Rgba, RgbaImage};

use qrpix_core::{Geometry, PixelBox};

use crate::{Backend, Color};

/// Backend drawing into an in-memory RGBA pixel buffer.
pub struct Raster;

/// Encoding used when saving a [RasterSurface].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RasterFormat {
    #[default]
    Png,
    /// JPEG has no alpha channel: translucent pixels are composited onto white when saving.
    Jpeg,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterOptions {
    pub fill_color: Color,
    pub back_color: Color,
    pub format: RasterFormat,
}

impl RasterOptions {
    /// Set the color of dark modules.
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    /// Set the color of light modules and of the quiet zone.
    pub fn with_back_color(mut self, color: Color) -> Self {
        self.back_color = color;
        self
    }

    pub fn with_format(mut self, format: RasterFormat) -> Self {
        self.format = format;
        self
    }
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            back_color: Color::WHITE,
            format: RasterFormat::Png,
        }
    }
}

/// Pixel buffer produced by the [Raster] backend.
#[derive(Debug, Clone)]
pub struct RasterSurface {
    buffer: RgbaImage,
    fill: Rgba<u8>,
    format: RasterFormat,
}

impl RasterSurface {
    /// Peek at the pixel buffer.
    pub fn buffer(&self) -> &RgbaImage {
        &self.buffer
    }

    /// Take the pixel buffer.
    pub fn into_buffer(self) -> RgbaImage {
        self.buffer
    }

    pub fn format(&self) -> RasterFormat {
        self.format
    }
}

/// Largest number of pixels a [RasterSurface] may hold (1 GiB of RGBA data).
pub const MAX_RASTER_PIXELS: usize = 1 << 28;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("cannot allocate a raster image of {0}x{0} pixels")]
    TooLarge(usize),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

impl Backend for Raster {
    type Options = RasterOptions;
    type Surface = RasterSurface;
    type Error = RasterError;

    fn new_image(
        geometry: &Geometry,
        options: RasterOptions,
    ) -> Result<RasterSurface, RasterError> {
        let pixel_size = geometry.pixel_size();
        let too_large = || RasterError::TooLarge(pixel_size);
        let side = u32::try_from(pixel_size).map_err(|_| too_large())?;
        let pixels = pixel_size.checked_mul(pixel_size).ok_or_else(too_large)?;
        if pixels > MAX_RASTER_PIXELS {
            return Err(too_large());
        }
        Ok(RasterSurface {
            buffer: RgbaImage::from_pixel(side, side, options.back_color.into()),
            fill: options.fill_color.into(),
            format: options.format,
        })
    }

    /// # Panics
    /// Panics if `pixel_box` does not lie inside the buffer.
    fn draw_box(surface: &mut RasterSurface, pixel_box: PixelBox) {
        let (width, height) = surface.buffer.dimensions();
        let (x, y, size) = (pixel_box.x, pixel_box.y, pixel_box.size);
        if x + size > width as usize || y + size > height as usize {
            panic!(
                "box out of bounds: the size is {} but the box is {:?}",
                width, pixel_box
            );
        }
        // In bounds, so every coordinate fits `u32`.
        let (x, y, size) = (x as u32, y as u32, size as u32);
        for j in y..(y + size) {
            for i in x..(x + size) {
                surface.buffer.put_pixel(i, j, surface.fill);
            }
        }
    }

    fn save<W: Write>(surface: &RasterSurface, output: &mut W) -> Result<(), RasterError> {
        let (width, height) = surface.buffer.dimensions();
        match surface.format {
            RasterFormat::Png => PngEncoder::new(output).write_image(
                surface.buffer.as_raw(),
                width,
                height,
                ExtendedColorType::Rgba8,
            )?,
            RasterFormat::Jpeg => {
                let rgb = flatten_onto_white(&surface.buffer);
                JpegEncoder::new(output).write_image(
                    rgb.as_raw(),
                    width,
                    height,
                    ExtendedColorType::Rgb8,
                )?
            }
        }
        Ok(())
    }
}

/// Composite `buffer` onto an opaque white background.
fn flatten_onto_white(buffer: &RgbaImage) -> RgbImage {
    RgbImage::from_fn(buffer.width(), buffer.height(), |x, y| {
        let Rgba([r, g, b, a]) = *buffer.get_pixel(x, y);
        let blend = |c: u8| ((c as u16 * a as u16 + 255 * (255 - a as u16) + 127) / 255) as u8;
        Rgb([blend(r), blend(g), blend(b)])
    })
}
