//! Root clustering for the Newton fractal.  Which roots a polynomial
//! has, and how many basins the picture will show, is only knowable
//! once every point of the grid has been evaluated, so this is a
//! whole-grid batch step: collect the distinct landing values, give
//! each one a stable palette slot, and grow the palette with black
//! filler if the polynomial turned out to have more roots than the
//! caller supplied colors for.

use std::collections::{HashMap, HashSet};

use color::Palette;
use newton::NewtonResult;

/// What a single grid point should be painted with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PointClass {
    /// Converged to the root holding this palette slot.
    Root(usize),
    /// Divergence or a vanished derivative; painted the reserved
    /// black, never charged against the palette.
    Reserved,
}

/// Emitted once when the palette had to be grown.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PalettePadding {
    /// How many colors the caller supplied.
    pub supplied: usize,
    /// How many distinct roots were found.
    pub roots: usize,
    /// How many black entries were appended.
    pub padded: usize,
}

/// The outcome of classifying a full grid of Newton results.
#[derive(Clone, Debug)]
pub struct Classification {
    /// Per-point classes, aligned with the input results.
    pub classes: Vec<PointClass>,
    /// The palette, extended if the roots outnumbered its entries.
    /// Existing entries are never reordered or dropped.
    pub palette: Palette,
    /// Present iff the palette was extended.
    pub padding: Option<PalettePadding>,
}

/// Cluster the converged values of a finished grid and assign palette
/// slots.
///
/// Equality is by the already-rounded value, so clustering happened
/// the moment the kernel rounded; this step only dedupes.  Slots are
/// handed out in sorted order (real part, then imaginary part), which
/// makes the assignment reproducible run over run no matter how the
/// grid was traversed.  Divergent and zero-derivative points map to
/// [`PointClass::Reserved`] and consume nothing.
pub fn classify(results: &[NewtonResult], palette: &Palette) -> Classification {
    let mut seen: HashSet<(u64, u64)> = HashSet::new();
    let mut roots: Vec<(u64, u64)> = Vec::new();
    for result in results {
        if let NewtonResult::Root(v) = *result {
            let key = (v.re.to_bits(), v.im.to_bits());
            if seen.insert(key) {
                roots.push(key);
            }
        }
    }

    roots.sort_by(|a, b| {
        let (a, b) = (unkey(*a), unkey(*b));
        a.0.total_cmp(&b.0).then(a.1.total_cmp(&b.1))
    });
    let lookup: HashMap<(u64, u64), usize> = roots
        .iter()
        .enumerate()
        .map(|(slot, key)| (*key, slot))
        .collect();

    let classes = results
        .iter()
        .map(|result| match *result {
            NewtonResult::Root(v) => {
                PointClass::Root(lookup[&(v.re.to_bits(), v.im.to_bits())])
            }
            NewtonResult::ZeroDerivative(_) | NewtonResult::Diverged => PointClass::Reserved,
        })
        .collect();

    let mut palette = palette.clone();
    let padding = if roots.len() > palette.len() {
        let shortfall = roots.len() - palette.len();
        let report = PalettePadding {
            supplied: palette.len(),
            roots: roots.len(),
            padded: shortfall,
        };
        palette.pad_with_black(shortfall);
        warn!(
            "palette provided had length {}, but there were {} roots; padded with {} black entries",
            report.supplied, report.roots, report.padded
        );
        Some(report)
    } else {
        None
    };

    Classification {
        classes,
        palette,
        padding,
    }
}

fn unkey(key: (u64, u64)) -> (f64, f64) {
    (f64::from_bits(key.0), f64::from_bits(key.1))
}
