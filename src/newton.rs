// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The Newton-Raphson kernel.  From a starting point on the plane,
//! ride `x = x - f(x)/f'(x)` downhill until the residual of `f` is
//! small enough in both components, and report where the ride ended.
//! Not every ride ends at a root: the derivative can vanish under us,
//! and some orbits just never settle.  Both of those are ordinary
//! outcomes here, not errors.

use num::Complex;

/// Converged values whose imaginary part is at most this are snapped
/// onto the real axis before rounding.  Without the snap, a real root
/// approached from above and below the axis can round to two values
/// that differ in the sign of a vanishing imaginary part and be
/// counted as two roots.
const SNAP_TO_REAL: f64 = 1e-10;

/// Where a single Newton iteration ended up.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum NewtonResult {
    /// The residual bound was met at this value, rounded per the
    /// settings so that numerically-close landings compare equal.
    Root(Complex<f64>),
    /// The derivative vanished at this (rounded) point before the
    /// residual bound was met.  The point is carried so the outcome
    /// stays distinct from every true root; no division is attempted.
    ZeroDerivative(Complex<f64>),
    /// The iteration budget ran out first.  The variant itself is the
    /// sentinel, disjoint from any value a root could take.
    Diverged,
}

/// Tolerances and budget for the Newton iteration.
#[derive(Copy, Clone, Debug)]
pub struct NewtonSettings {
    /// Residual bound; iteration stops once both |Re f(x)| and
    /// |Im f(x)| fall below it.
    pub max_err: f64,
    /// Iteration cap, after which the point counts as divergent.
    pub max_iter: u32,
    /// Decimal digits kept when rounding the landing point.  This is
    /// the clustering tolerance: two landings are the same root
    /// exactly when they round to the same value.
    pub decimals: i32,
}

impl Default for NewtonSettings {
    fn default() -> NewtonSettings {
        NewtonSettings {
            max_err: 1e-5,
            max_iter: 10_000,
            decimals: 8,
        }
    }
}

/// Run the Newton iteration for `f` (with derivative `f_prime`)
/// starting at `c`.
///
/// Checked each round, in order: a vanished derivative stops the
/// iteration at the current point; a spent budget yields `Diverged`;
/// otherwise the step is taken and the residual re-examined.  Any
/// value carried out of the loop is snapped to the real axis when its
/// imaginary part is below a fixed tolerance and then rounded to
/// `decimals` digits per component.
pub fn newton_root<F, G>(
    c: Complex<f64>,
    f: &F,
    f_prime: &G,
    max_err: f64,
    max_iter: u32,
    decimals: i32,
) -> NewtonResult
where
    F: Fn(Complex<f64>) -> Complex<f64>,
    G: Fn(Complex<f64>) -> Complex<f64>,
{
    let mut x = c;
    let mut residual = f(x);
    let mut count = 0;
    while residual.re.abs() >= max_err || residual.im.abs() >= max_err {
        let slope = f_prime(x);
        if slope == Complex::new(0.0, 0.0) {
            return NewtonResult::ZeroDerivative(settle(x, decimals));
        }
        x = x - residual / slope;
        residual = f(x);
        count += 1;
        if count >= max_iter {
            return NewtonResult::Diverged;
        }
    }
    NewtonResult::Root(settle(x, decimals))
}

/// Snap-to-real, then round both components.
fn settle(x: Complex<f64>, decimals: i32) -> Complex<f64> {
    let x = if x.im.abs() <= SNAP_TO_REAL {
        Complex::new(x.re, 0.0)
    } else {
        x
    };
    Complex::new(round_to(x.re, decimals), round_to(x.im, decimals))
}

fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    let rounded = (v * scale).round() / scale;
    // collapse -0 so a root straddling the axis stays one root
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
