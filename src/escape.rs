// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time kernel.  Iterating `z = z*z + c` from zero, a point
//! `c` either shoots off to infinity or it doesn't; the number of
//! steps it takes to cross the escape circle is the point's velocity,
//! and the velocity is what gets painted.

use num::Complex;

/// How many iterations of `z = z*z + c` it takes for the orbit of `c`
/// to leave the circle of radius 2 around the origin, capped at
/// `max_iter`.  A return of `max_iter` means the orbit never escaped
/// and the point is treated as a member of the set.  The comparison is
/// against the squared magnitude, which spares a square root per step.
pub fn escape_count(c: Complex<f64>, max_iter: u32) -> u32 {
    let mut z = Complex::new(0.0, 0.0);
    let mut n = 0;
    while z.norm_sqr() <= 4.0 && n < max_iter {
        z = z * z + c;
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_origin_never_escapes() {
        assert_eq!(escape_count(Complex::new(0.0, 0.0), 100), 100);
    }

    #[test]
    fn points_outside_the_escape_circle_leave_at_once() {
        // |c| > 2, so the very first step crosses the circle.
        assert_eq!(escape_count(Complex::new(-2.0, -1.0), 10), 1);
        assert_eq!(escape_count(Complex::new(3.0, 0.0), 10), 1);
    }

    #[test]
    fn a_nearby_exterior_point_takes_a_few_steps() {
        // 1+i -> 1+3i on the second step, which is well outside.
        assert_eq!(escape_count(Complex::new(1.0, 1.0), 10), 2);
    }

    #[test]
    fn count_never_exceeds_the_cap() {
        for n in &[0u32, 1, 7, 50] {
            assert!(escape_count(Complex::new(-1.0, 0.3), *n) <= *n);
        }
    }
}
