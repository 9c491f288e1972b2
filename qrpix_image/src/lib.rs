//! Image backends for rendering QR code module matrices.
//!
//! An [Image] computes the pixel [Geometry] of a QR code and delegates the creation of the
//! drawable surface to a [Backend]. Three backends are provided:
//!
//! - [Raster]: an in-memory RGBA buffer, saved as PNG or JPEG.
//! - [Svg]: a vector document made of rects or of a single path.
//! - [Text]: a grid of character patterns, one per pixel.

use std::io::Write;

use qrpix_core::{Geometry, PixelBox};

mod color;
mod raster;
mod svg;
mod text;

pub use color::{Color, ColorParseError};
pub use raster::{
    Raster, RasterError, RasterFormat, RasterOptions, RasterSurface, MAX_RASTER_PIXELS,
};
pub use svg::{Svg, SvgDocument, SvgError, SvgOptions, SvgStyle};
pub use text::{Text, TextError, TextOptions, TextSurface};

/// A rendering target for QR codes.
///
/// Implementors must provide [Backend::new_image]; there is no default surface, so an [Image]
/// cannot be built without a concrete backend:
/// ```compile_fail
/// use qrpix_image::Image;
/// struct NoBackend;
/// let image = Image::<NoBackend>::new(2, 21, 10, ());
/// ```
/// ```compile_fail
/// use qrpix_core::{Geometry, PixelBox};
/// use qrpix_image::Backend;
/// struct Incomplete;
/// impl Backend for Incomplete {
///     type Options = ();
///     type Surface = ();
///     type Error = std::io::Error;
///     fn draw_box(_: &mut (), _: PixelBox) {}
///     fn save<W: std::io::Write>(_: &(), _: &mut W) -> std::io::Result<()> { Ok(()) }
/// }
/// ```
pub trait Backend {
    /// Backend specific configuration, such as colors or output format.
    type Options: Default;
    /// The drawable surface produced by the backend.
    type Surface;
    type Error: std::error::Error + 'static;

    /// Create a fully initialized surface of at least `geometry.pixel_size()` pixels per side.
    fn new_image(geometry: &Geometry, options: Self::Options) -> Result<Self::Surface, Self::Error>;

    /// Paint the pixels of `pixel_box` as a dark module.
    ///
    /// Implementations may panic if `pixel_box` does not lie inside the surface; [Image::draw_rect]
    /// only passes boxes of the symbol.
    fn draw_box(surface: &mut Self::Surface, pixel_box: PixelBox);

    /// Serialize `surface` into `output`.
    fn save<W: Write>(surface: &Self::Surface, output: &mut W) -> Result<(), Self::Error>;
}

/// A QR code image: the pixel geometry together with the one surface created for it.
pub struct Image<B: Backend> {
    geometry: Geometry,
    surface: B::Surface,
}

impl<B: Backend> Image<B> {
    /// Construct a new [Image] for a symbol `width` modules wide, surrounded by `border` modules of
    /// quiet zone, with `box_size` pixels per module. Errors from [Backend::new_image] are returned
    /// as they are.
    /// # Example
    /// ```
    /// use qrpix_image::{Image, Raster, RasterOptions};
    /// let image = Image::<Raster>::new(2, 21, 10, RasterOptions::default()).unwrap();
    /// assert_eq!(image.pixel_size(), 250);
    /// assert_eq!(image.get_image().buffer().dimensions(), (250, 250));
    /// ```
    /// # Panics
    /// Panics if the pixel size overflows `usize`.
    pub fn new(
        border: usize,
        width: usize,
        box_size: usize,
        options: B::Options,
    ) -> Result<Self, B::Error> {
        Self::with_geometry(Geometry::new(border, width, box_size), options)
    }

    /// Construct a new [Image] with an already computed `geometry`.
    pub fn with_geometry(geometry: Geometry, options: B::Options) -> Result<Self, B::Error> {
        log::debug!(
            "creating {}x{} px image for {} modules (border {}, box size {})",
            geometry.pixel_size(),
            geometry.pixel_size(),
            geometry.width(),
            geometry.border(),
            geometry.box_size()
        );
        let surface = B::new_image(&geometry, options)?;
        Ok(Self { geometry, surface })
    }

    /// Get the geometry of the image.
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Quiet zone width in modules.
    pub fn border(&self) -> usize {
        self.geometry.border()
    }

    /// Symbol width in modules.
    pub fn width(&self) -> usize {
        self.geometry.width()
    }

    /// Pixels per module.
    pub fn box_size(&self) -> usize {
        self.geometry.box_size()
    }

    /// Side of the image in pixels.
    pub fn pixel_size(&self) -> usize {
        self.geometry.pixel_size()
    }

    /// Get the surface created at construction. Every call returns the same surface.
    pub fn get_image(&self) -> &B::Surface {
        &self.surface
    }

    /// Consume the image and take its surface.
    pub fn into_image(self) -> B::Surface {
        self.surface
    }

    /// Get the box of pixels covering the module at `(row, col)`.
    pub fn pixel_box(&self, row: usize, col: usize) -> PixelBox {
        self.geometry.pixel_box(row, col)
    }

    /// Paint the module at `(row, col)` of the symbol dark.
    /// # Panics
    /// Panics if `(row, col)` lies outside the symbol.
    pub fn draw_rect(&mut self, row: usize, col: usize) {
        let width = self.width();
        if row >= width || col >= width {
            panic!(
                "index out of bounds: the size is {} but the index is ({}, {})",
                width, row, col
            );
        }
        let pixel_box = self.pixel_box(row, col);
        log::trace!("drawing module ({}, {}) at {:?}", row, col, pixel_box);
        B::draw_box(&mut self.surface, pixel_box);
    }

    /// Serialize the surface into `output`.
    pub fn save<W: Write>(&self, output: &mut W) -> Result<(), B::Error> {
        B::save(&self.surface, output)
    }
}

impl<B> std::fmt::Debug for Image<B>
where
    B: Backend,
    B::Surface: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Image")
            .field("geometry", &self.geometry)
            .field("surface", &self.surface)
            .finish()
    }
}
