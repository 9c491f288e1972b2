//! Render QR code module matrices into images.
//!
//! [QrCode] holds the validated rendering configuration and draws a [Canvas] of modules through
//! any [Backend]:
//!
//! ```
//! use qrpix::{Canvas, QrCode, Svg, SvgOptions};
//!
//! let canvas: Canvas = "#.#\n.#.\n#.#\n".parse().unwrap();
//! let qrcode = QrCode::new(4, 1).unwrap();
//! let image = qrcode.make_image::<Svg>(&canvas, SvgOptions::default()).unwrap();
//! assert_eq!(image.pixel_size(), 20);
//! assert_eq!(image.get_image().boxes().len(), 5);
//! ```

pub use qrpix_core::{check_border, check_box_size};
pub use qrpix_core::{Canvas, CanvasParseError, Module};
pub use qrpix_core::{ConfigError, ConversionError, Dimension, Parameter};
pub use qrpix_core::{Geometry, PixelBox};
pub use qrpix_image::{Backend, Color, ColorParseError, Image};
pub use qrpix_image::{Raster, RasterError, RasterFormat, RasterOptions, RasterSurface};
pub use qrpix_image::MAX_RASTER_PIXELS;
pub use qrpix_image::{Svg, SvgDocument, SvgError, SvgOptions, SvgStyle};
pub use qrpix_image::{Text, TextError, TextOptions, TextSurface};

/// Rendering configuration of a QR code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QrCode {
    box_size: u32,
    border: u32,
}

impl QrCode {
    pub const DEFAULT_BOX_SIZE: u32 = 10;
    pub const DEFAULT_BORDER: u32 = 2;

    /// Construct a new [QrCode] with `box_size` pixels per module and a quiet zone of `border`
    /// modules. Both must be strictly positive integers.
    /// # Example
    /// ```
    /// use qrpix::{ConfigError, Parameter, QrCode};
    /// assert!(QrCode::new(10, 2).is_ok());
    /// assert_eq!(QrCode::new(0, 2).unwrap_err().parameter(), Parameter::BoxSize);
    /// assert!(matches!(QrCode::new(10, 0), Err(ConfigError::InvalidConfiguration { .. })));
    /// ```
    pub fn new<S: Dimension, B: Dimension>(box_size: S, border: B) -> Result<Self, ConfigError> {
        let box_size = check_box_size(box_size)?;
        let border = check_border(border)?;
        Ok(Self { box_size, border })
    }

    /// Pixels per module.
    pub fn box_size(&self) -> u32 {
        self.box_size
    }

    /// Quiet zone width in modules.
    pub fn border(&self) -> u32 {
        self.border
    }

    /// Build an [Image] sized for `canvas` and draw all its dark modules on it.
    pub fn make_image<B: Backend>(
        &self,
        canvas: &Canvas,
        options: B::Options,
    ) -> Result<Image<B>, B::Error> {
        let mut image = Image::<B>::new(
            self.border as usize,
            canvas.size(),
            self.box_size as usize,
            options,
        )?;
        let mut drawn = 0;
        for (row, col) in canvas.dark_modules() {
            image.draw_rect(row, col);
            drawn += 1;
        }
        log::debug!("drew {} dark modules of {}", drawn, canvas.size().pow(2));
        Ok(image)
    }
}

impl Default for QrCode {
    fn default() -> Self {
        Self {
            box_size: Self::DEFAULT_BOX_SIZE,
            border: Self::DEFAULT_BORDER,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn checkerboard(size: usize) -> Canvas {
        let mut canvas = Canvas::filled(size, Module::Light);
        for i in 0..size {
            for j in 0..size {
                if (i + j) % 2 == 0 {
                    canvas.set(i, j, Module::Dark);
                }
            }
        }
        canvas
    }

    #[test]
    fn test_validation() {
        assert_eq!(
            QrCode::new(0, 2),
            Err(ConfigError::InvalidConfiguration {
                param: Parameter::BoxSize,
                value: 0
            })
        );
        assert_eq!(
            QrCode::new(10, 0),
            Err(ConfigError::InvalidConfiguration {
                param: Parameter::Border,
                value: 0
            })
        );
        let qrcode = QrCode::new(10, 2).unwrap();
        assert_eq!((qrcode.box_size(), qrcode.border()), (10, 2));
    }

    #[test]
    fn test_box_size_is_checked_first() {
        assert_eq!(
            QrCode::new(-1, -1).unwrap_err().parameter(),
            Parameter::BoxSize
        );
        assert!(matches!(
            QrCode::new("10", "two"),
            Err(ConfigError::Conversion {
                param: Parameter::Border,
                ..
            })
        ));
    }

    #[test]
    fn test_default() {
        assert_eq!(QrCode::default(), QrCode::new(10, 2).unwrap());
    }

    #[test]
    fn test_make_raster_image() {
        let canvas = checkerboard(21);
        let image = QrCode::default()
            .make_image::<Raster>(&canvas, RasterOptions::default())
            .unwrap();
        assert_eq!(image.pixel_size(), 250);
        let buffer = image.get_image().buffer();
        // Quiet zone is light, module (0, 0) is dark and module (0, 1) is light.
        assert_eq!(buffer.get_pixel(0, 0).0, [255, 255, 255, 255]);
        assert_eq!(buffer.get_pixel(20, 20).0, [0, 0, 0, 255]);
        assert_eq!(buffer.get_pixel(29, 29).0, [0, 0, 0, 255]);
        assert_eq!(buffer.get_pixel(30, 20).0, [255, 255, 255, 255]);
    }

    #[test]
    fn test_make_text_image() {
        let canvas: Canvas = "#.\n.#".parse().unwrap();
        let options = TextOptions::new()
            .with_light_pattern(" ")
            .with_dark_pattern("X");
        let image = QrCode::new(1, 1).unwrap().make_image::<Text>(&canvas, options).unwrap();
        let mut output = Vec::new();
        image.save(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "    \n X  \n  X \n    \n");
    }

    #[test]
    fn test_make_image_propagates_backend_error() {
        let canvas = checkerboard(3);
        let options = TextOptions::new().with_light_pattern("");
        let result = QrCode::default().make_image::<Text>(&canvas, options);
        assert!(matches!(result, Err(TextError::EmptyPattern(Module::Light))));
    }
}
