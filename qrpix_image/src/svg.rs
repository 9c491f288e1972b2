use std::io::Write;

use itertools::Itertools;

use qrpix_core::{Geometry, PixelBox};

use crate::{Backend, Color};

/// Backend producing an SVG 1.1 document, one pixel per user unit.
pub struct Svg;

/// How dark modules are written into the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SvgStyle {
    /// One `<rect>` element per module.
    #[default]
    Rects,
    /// A single `<path>` element tracing all the modules.
    Path,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SvgOptions {
    pub fill_color: Color,
    /// Background color; `None` leaves the background transparent.
    pub back_color: Option<Color>,
    pub style: SvgStyle,
}

impl SvgOptions {
    pub fn with_fill_color(mut self, color: Color) -> Self {
        self.fill_color = color;
        self
    }

    pub fn with_back_color(mut self, color: Option<Color>) -> Self {
        self.back_color = color;
        self
    }

    pub fn with_style(mut self, style: SvgStyle) -> Self {
        self.style = style;
        self
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            back_color: Some(Color::WHITE),
            style: SvgStyle::Rects,
        }
    }
}

/// Vector document produced by the [Svg] backend.
#[derive(Debug, Clone)]
pub struct SvgDocument {
    size: usize,
    options: SvgOptions,
    boxes: Vec<PixelBox>,
}

impl SvgDocument {
    /// Side of the document in pixels.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the boxes drawn so far, in drawing order.
    pub fn boxes(&self) -> &[PixelBox] {
        &self.boxes
    }

    /// Write out the document. Lines always end with `\n`.
    pub fn to_svg_string(&self) -> String {
        let size = self.size;
        let mut result = String::new();
        result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
        result += &format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" width=\"{0}\" height=\"{0}\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n",
            size
        );
        if let Some(back) = self.options.back_color {
            result += &format!("\t<rect width=\"100%\" height=\"100%\" {}/>\n", paint(back));
        }
        let fill = paint(self.options.fill_color);
        match self.options.style {
            SvgStyle::Rects => {
                for b in &self.boxes {
                    result += &format!(
                        "\t<rect x=\"{}\" y=\"{}\" width=\"{2}\" height=\"{2}\" {3}/>\n",
                        b.x, b.y, b.size, fill
                    );
                }
            }
            SvgStyle::Path if self.boxes.is_empty() => {}
            SvgStyle::Path => {
                let d = self
                    .boxes
                    .iter()
                    .map(|b| format!("M{},{}h{2}v{2}h-{2}z", b.x, b.y, b.size))
                    .join(" ");
                result += &format!("\t<path d=\"{}\" {}/>\n", d, fill);
            }
        }
        result += "</svg>\n";
        result
    }
}

/// Get the `fill` attributes painting with `color`.
fn paint(color: Color) -> String {
    if color.is_opaque() {
        format!("fill=\"{}\"", color.to_hex())
    } else {
        format!(
            "fill=\"{}\" fill-opacity=\"{:.3}\"",
            color.to_hex(),
            color.opacity()
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SvgError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Backend for Svg {
    type Options = SvgOptions;
    type Surface = SvgDocument;
    type Error = SvgError;

    fn new_image(geometry: &Geometry, options: SvgOptions) -> Result<SvgDocument, SvgError> {
        Ok(SvgDocument {
            size: geometry.pixel_size(),
            options,
            boxes: Vec::new(),
        })
    }

    fn draw_box(surface: &mut SvgDocument, pixel_box: PixelBox) {
        surface.boxes.push(pixel_box);
    }

    fn save<W: Write>(surface: &SvgDocument, output: &mut W) -> Result<(), SvgError> {
        output.write_all(surface.to_svg_string().as_bytes())?;
        Ok(())
    }
}
