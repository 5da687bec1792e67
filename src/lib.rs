#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot and Newton fractal renderer
//!
//! Two classic ways of painting the complex plane.  The Mandelbrot
//! takes a point on the complex plane and repeatedly multiplies it by
//! itself, measuring how quickly that number goes to infinity.  This
//! "velocity" is the number used to render the image.
//!
//! The Newton fractal instead asks where a point *ends up*: running
//! Newton-Raphson on a polynomial from every point of the plane, each
//! point is painted by the root its iteration falls into.  The roots
//! aren't known up front, so the finished grid of converged values is
//! clustered by rounding, and each cluster claims the next color of a
//! caller-supplied palette.  Points where the iteration breaks down,
//! either because the derivative vanished or because it ran out of
//! iterations, are painted a reserved black.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate log;
extern crate crossbeam;
extern crate itertools;
extern crate num;

pub mod color;
pub mod errors;
pub mod escape;
pub mod newton;
pub mod planes;
pub mod render;
pub mod roots;

pub use color::{escape_color, hsv_to_rgb, root_color, Palette, Rgb};
pub use errors::FractalError;
pub use escape::escape_count;
pub use newton::{newton_root, NewtonResult, NewtonSettings};
pub use planes::{Pixel, PlaneMapper};
pub use render::{evaluate_grid, MandelbrotRenderer, NewtonImage, NewtonRenderer, RgbBuffer};
pub use roots::{classify, Classification, PalettePadding, PointClass};
