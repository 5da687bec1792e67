// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Grid evaluation and image synthesis.  Every per-point kernel is a
//! pure function of its sample, so the grid is carved into bands of
//! rows and handed to scoped worker threads; the bands are joined back
//! in row order, which makes the output independent of the thread
//! count.  The Newton pipeline inserts its one synchronization point
//! here: classification has to see the whole grid before a single
//! pixel can be painted.

use crossbeam::thread::ScopedJoinHandle;
use num::Complex;

use color::{escape_color, root_color, Palette, Rgb};
use escape::escape_count;
use newton::{newton_root, NewtonSettings};
use planes::{Pixel, PlaneMapper};
use roots::{classify, PalettePadding};

/// Evaluate `kernel` at every sample point of the plane, row-major.
///
/// With `threads` at or below 1 the grid is walked inline; otherwise
/// the rows are split into one band per thread and joined back in
/// order.  Either way the result vector is identical.
pub fn evaluate_grid<R, F>(plane: &PlaneMapper, kernel: F, threads: usize) -> Vec<R>
where
    R: Send,
    F: Fn(Complex<f64>) -> R + Sync,
{
    if threads <= 1 {
        return plane
            .pixels()
            .map(|p| kernel(plane.point_at(&p)))
            .collect();
    }

    let band = (plane.height() + threads - 1) / threads;
    let kernel = &kernel;
    let mut results = Vec::with_capacity(plane.len());
    crossbeam::scope(|spawner| {
        let handles: Vec<ScopedJoinHandle<Vec<R>>> = (0..threads)
            .map(|t| {
                let rows = (t * band)..((t + 1) * band).min(plane.height());
                spawner.spawn(move |_| {
                    let mut out = Vec::with_capacity(rows.len() * plane.width());
                    for y in rows {
                        for x in 0..plane.width() {
                            out.push(kernel(plane.point_at(&Pixel(x, y))));
                        }
                    }
                    out
                })
            })
            .collect();
        for handle in handles {
            results.extend(handle.join().unwrap());
        }
    })
    .unwrap();
    results
}

/// A fully-populated RGB image, three bytes per pixel, row-major.
/// This is where the pipeline ends; encoding it into a file format is
/// the caller's business.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RgbBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbBuffer {
    /// Walk a grid of per-point results once, painting each pixel with
    /// the supplied color rule.
    pub fn synthesize<R, C>(width: usize, height: usize, results: &[R], colorize: C) -> RgbBuffer
    where
        C: Fn(&R) -> Rgb,
    {
        assert_eq!(results.len(), width * height);
        let mut data = Vec::with_capacity(results.len() * 3);
        for result in results {
            let color = colorize(result);
            data.push(color.r);
            data.push(color.g);
            data.push(color.b);
        }
        RgbBuffer {
            width,
            height,
            data,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The raw bytes, ready for an encoder.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The color of one pixel.
    pub fn color_at(&self, x: usize, y: usize) -> Rgb {
        let offset = (y * self.width + x) * 3;
        Rgb {
            r: self.data[offset],
            g: self.data[offset + 1],
            b: self.data[offset + 2],
        }
    }
}

/// The escape-time pipeline: plane in, hue-swept image out.
pub struct MandelbrotRenderer {
    plane: PlaneMapper,
    max_iter: u32,
}

impl MandelbrotRenderer {
    /// Requires the plane mapping and the per-point iteration budget.
    pub fn new(plane: PlaneMapper, max_iter: u32) -> MandelbrotRenderer {
        MandelbrotRenderer { plane, max_iter }
    }

    /// Evaluate and paint the whole grid.
    pub fn render(&self, threads: usize) -> RgbBuffer {
        let max_iter = self.max_iter;
        let counts = evaluate_grid(&self.plane, move |c| escape_count(c, max_iter), threads);
        RgbBuffer::synthesize(self.plane.width(), self.plane.height(), &counts, |n| {
            escape_color(*n, max_iter)
        })
    }
}

/// A finished Newton render: the image, the palette as actually used
/// (possibly grown), and the padding report if growth happened.
pub struct NewtonImage {
    /// The painted grid.
    pub image: RgbBuffer,
    /// The palette after any filler was appended.
    pub palette: Palette,
    /// Present iff the supplied palette was too short.
    pub padding: Option<PalettePadding>,
}

/// The Newton pipeline: evaluate every point, classify the landings,
/// then paint.  The polynomial and its derivative are opaque
/// functions; nothing here knows or cares what they compute.
pub struct NewtonRenderer<F, G> {
    plane: PlaneMapper,
    f: F,
    f_prime: G,
    settings: NewtonSettings,
    palette: Palette,
}

impl<F, G> NewtonRenderer<F, G>
where
    F: Fn(Complex<f64>) -> Complex<f64> + Sync,
    G: Fn(Complex<f64>) -> Complex<f64> + Sync,
{
    /// Requires the plane mapping, the polynomial with its derivative,
    /// the iteration settings, and the palette to hand out to roots.
    pub fn new(
        plane: PlaneMapper,
        f: F,
        f_prime: G,
        settings: NewtonSettings,
        palette: Palette,
    ) -> NewtonRenderer<F, G> {
        NewtonRenderer {
            plane,
            f,
            f_prime,
            settings,
            palette,
        }
    }

    /// Evaluate, classify, paint.  Classification is the barrier
    /// between the parallel evaluation and the final walk: the palette
    /// is settled before the first pixel is colored.
    pub fn render(&self, threads: usize) -> NewtonImage {
        let s = self.settings;
        let f = &self.f;
        let f_prime = &self.f_prime;
        let results = evaluate_grid(
            &self.plane,
            move |c| newton_root(c, f, f_prime, s.max_err, s.max_iter, s.decimals),
            threads,
        );
        let classified = classify(&results, &self.palette);
        let image = RgbBuffer::synthesize(
            self.plane.width(),
            self.plane.height(),
            &classified.classes,
            |class| root_color(*class, &classified.palette),
        );
        NewtonImage {
            image,
            palette: classified.palette,
            padding: classified.padding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roots::PointClass;

    fn cube(x: Complex<f64>) -> Complex<f64> {
        x * x * x - Complex::new(1.0, 0.0)
    }

    fn cube_der(x: Complex<f64>) -> Complex<f64> {
        Complex::new(3.0, 0.0) * x * x
    }

    fn blues() -> Palette {
        Palette::parse(&["#023E8A", "#0077B6", "#90E0EF"]).unwrap()
    }

    #[test]
    fn evaluation_is_identical_across_thread_counts() {
        let plane =
            PlaneMapper::new(16, 11, Complex::new(-2.0, -1.5), Complex::new(1.0, 1.5)).unwrap();
        let serial = evaluate_grid(&plane, |c| escape_count(c, 64), 1);
        for threads in &[2usize, 3, 8, 16] {
            let banded = evaluate_grid(&plane, |c| escape_count(c, 64), *threads);
            assert_eq!(serial, banded);
        }
    }

    #[test]
    fn a_tiny_mandelbrot_grid_has_the_expected_counts() {
        // 3x3 over (-1,-1)..(2,2) puts the origin, which never
        // escapes, at the center pixel.  The corner samples (-1,-1)
        // and (1,1) leave after exactly three and two steps, all in
        // exact arithmetic.
        let plane =
            PlaneMapper::new(3, 3, Complex::new(-1.0, -1.0), Complex::new(2.0, 2.0)).unwrap();
        let counts = evaluate_grid(&plane, |c| escape_count(c, 10), 1);
        assert_eq!(counts[plane.index_of(&Pixel(1, 1))], 10);
        assert_eq!(counts[plane.index_of(&Pixel(0, 0))], 3);
        assert_eq!(counts[plane.index_of(&Pixel(2, 2))], 2);
    }

    #[test]
    fn mandelbrot_interior_renders_black() {
        let plane =
            PlaneMapper::new(3, 3, Complex::new(-1.0, -1.0), Complex::new(2.0, 2.0)).unwrap();
        let image = MandelbrotRenderer::new(plane, 10).render(1);
        assert_eq!(image.color_at(1, 1), Rgb::BLACK);
        assert_ne!(image.color_at(0, 0), Rgb::BLACK);
    }

    #[test]
    fn newton_on_the_cube_finds_exactly_three_basins() {
        // A grid spanning all three cube roots of unity, with a
        // three-color palette: every point converges, three clusters
        // come back, and no padding is needed.
        let plane =
            PlaneMapper::new(9, 9, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        let settings = NewtonSettings {
            max_err: 1e-10,
            max_iter: 500,
            decimals: 6,
        };
        let renderer = NewtonRenderer::new(plane, cube, cube_der, settings, blues());

        let results = evaluate_grid(
            &plane,
            |c| newton_root(c, &cube, &cube_der, 1e-10, 500, 6),
            1,
        );
        let classified = classify(&results, &blues());
        let mut slots: Vec<usize> = classified
            .classes
            .iter()
            .map(|class| match *class {
                PointClass::Root(slot) => slot,
                PointClass::Reserved => panic!("no point of this grid should fail to converge"),
            })
            .collect();
        slots.sort();
        slots.dedup();
        assert_eq!(slots, vec![0, 1, 2]);
        assert!(classified.padding.is_none());

        let out = renderer.render(1);
        assert!(out.padding.is_none());
        assert_eq!(out.palette.len(), 3);
    }

    #[test]
    fn newton_render_is_identical_across_thread_counts() {
        let plane =
            PlaneMapper::new(9, 9, Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0)).unwrap();
        let settings = NewtonSettings {
            max_err: 1e-10,
            max_iter: 500,
            decimals: 6,
        };
        let serial = NewtonRenderer::new(plane, cube, cube_der, settings, blues()).render(1);
        let banded = NewtonRenderer::new(plane, cube, cube_der, settings, blues()).render(4);
        assert_eq!(serial.image, banded.image);
    }

    #[test]
    fn synthesize_packs_pixels_row_major() {
        let results = [0u32, 1, 2, 3];
        let image = RgbBuffer::synthesize(2, 2, &results, |n| Rgb {
            r: *n as u8,
            g: 0,
            b: 0,
        });
        assert_eq!(image.as_bytes().len(), 12);
        assert_eq!(image.color_at(0, 0), Rgb { r: 0, g: 0, b: 0 });
        assert_eq!(image.color_at(1, 0), Rgb { r: 1, g: 0, b: 0 });
        assert_eq!(image.color_at(0, 1), Rgb { r: 2, g: 0, b: 0 });
        assert_eq!(image.color_at(1, 1), Rgb { r: 3, g: 0, b: 0 });
    }
}
