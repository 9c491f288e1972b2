use std::io::Write;

use qrpix_core::{Canvas, Geometry, Module, PixelBox};

use crate::Backend;

/// Backend drawing pixels as text patterns, one line per row of pixels.
pub struct Text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextOptions {
    light_pattern: Box<str>,
    dark_pattern: Box<str>,
}

impl TextOptions {
    /// Construct new [TextOptions] that use "██" to render dark pixels and "  " to render light ones.
    pub fn new() -> Self {
        Self {
            light_pattern: "  ".into(),
            dark_pattern: "██".into(),
        }
    }

    /// Set the light pixel `pattern` to be used when rendering.
    pub fn with_light_pattern(mut self, pattern: &str) -> Self {
        self.light_pattern = pattern.into();
        self
    }

    /// Set the dark pixel `pattern` to be used when rendering.
    pub fn with_dark_pattern(mut self, pattern: &str) -> Self {
        self.dark_pattern = pattern.into();
        self
    }

    /// Invert the light and dark patterns.
    pub fn inverted(mut self) -> Self {
        std::mem::swap(&mut self.light_pattern, &mut self.dark_pattern);
        self
    }

    /// Peek at the pattern used to render light pixels.
    pub fn light_pattern(&self) -> &str {
        self.light_pattern.as_ref()
    }

    /// Peek at the pattern used to render dark pixels.
    pub fn dark_pattern(&self) -> &str {
        self.dark_pattern.as_ref()
    }
}

impl Default for TextOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel grid produced by the [Text] backend.
#[derive(Debug, Clone)]
pub struct TextSurface {
    pixels: Canvas,
    options: TextOptions,
}

impl TextSurface {
    /// Peek at the pixels, one [Module] per pixel.
    pub fn pixels(&self) -> &Canvas {
        &self.pixels
    }

    /// Render the pixels into `output`.
    pub fn render<W: Write>(&self, output: &mut W) -> std::io::Result<()> {
        let pixels = &self.pixels;
        for i in 0..pixels.size() {
            for j in 0..pixels.size() {
                let pattern = match pixels.get(i, j) {
                    Some(Module::Dark) => self.options.dark_pattern(),
                    _ => self.options.light_pattern(),
                };
                write!(output, "{}", pattern)?;
            }
            writeln!(output)?;
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("the {0} pattern is empty")]
    EmptyPattern(Module),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Backend for Text {
    type Options = TextOptions;
    type Surface = TextSurface;
    type Error = TextError;

    fn new_image(geometry: &Geometry, options: TextOptions) -> Result<TextSurface, TextError> {
        if options.light_pattern().is_empty() {
            return Err(TextError::EmptyPattern(Module::Light));
        }
        if options.dark_pattern().is_empty() {
            return Err(TextError::EmptyPattern(Module::Dark));
        }
        Ok(TextSurface {
            pixels: Canvas::filled(geometry.pixel_size(), Module::Light),
            options,
        })
    }

    fn draw_box(surface: &mut TextSurface, pixel_box: PixelBox) {
        let PixelBox { x, y, size } = pixel_box;
        surface.pixels.fill(Module::Dark, y, x, size, size);
    }

    fn save<W: Write>(surface: &TextSurface, output: &mut W) -> Result<(), TextError> {
        Ok(surface.render(output)?)
    }
}
