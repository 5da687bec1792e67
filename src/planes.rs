//! Contains the PlaneMapper struct, which describes a relationship
//! between a rectangle on the integral pixel plane with an origin at
//! 0,0, and a rectangle on the complex plane given by its two corners.
//! Every sample the renderers consume comes out of this mapping.

use errors::FractalError;
use itertools::iproduct;
use num::Complex;

/// Describes the x, y of a point on the pixel plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// Maps pixels to points on the complex plane.  The mapping is linear
/// and left-edge aligned: pixel (0, 0) lands exactly on the origin
/// corner, and the rightmost and bottommost samples stop one step
/// short of the far corner.  The corners are not required to be in
/// ascending order; a reversed rectangle simply mirrors the image.
#[derive(Copy, Clone, Debug)]
pub struct PlaneMapper {
    width: usize,
    height: usize,
    origin: Complex<f64>,
    step: Complex<f64>,
}

impl PlaneMapper {
    /// Constructor.  Takes the pixel dimensions and the two corners of
    /// the complex rectangle, `origin` being the corner pixel (0, 0)
    /// maps to.  A zero-area image is refused before any computation.
    pub fn new(
        width: usize,
        height: usize,
        origin: Complex<f64>,
        corner: Complex<f64>,
    ) -> Result<PlaneMapper, FractalError> {
        if width == 0 || height == 0 {
            return Err(FractalError::EmptyImage { width, height });
        }
        Ok(PlaneMapper {
            width,
            height,
            origin,
            step: Complex::new(
                (corner.re - origin.re) / (width as f64),
                (corner.im - origin.im) / (height as f64),
            ),
        })
    }

    /// Width of the pixel plane.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the pixel plane.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The total number of points in the pixel grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    /// True when the grid holds no points.  `new` refuses to build
    /// such a mapper, so this only answers honestly for callers
    /// holding one.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Row-major offset of a pixel into a flat result buffer.
    pub fn index_of(&self, pixel: &Pixel) -> usize {
        pixel.1 * self.width + pixel.0
    }

    /// Given a pixel on the pixel plane, the corresponding point on
    /// the complex plane.
    pub fn point_at(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.origin.re + (pixel.0 as f64) * self.step.re,
            self.origin.im + (pixel.1 as f64) * self.step.im,
        )
    }

    /// Every pixel of the plane, row by row, in the same order as
    /// `index_of`.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> {
        iproduct!(0..self.height, 0..self.width).map(|(y, x)| Pixel(x, y))
    }

    /// Materialize the whole grid of sample points, row-major.
    pub fn grid(&self) -> Vec<Complex<f64>> {
        let plane = *self;
        self.pixels().map(move |p| plane.point_at(&p)).collect()
    }
}
