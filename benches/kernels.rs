#[macro_use]
extern crate criterion;
extern crate newtonbrot;
extern crate num;

use criterion::Criterion;
use newtonbrot::{escape_count, newton_root};
use num::Complex;

fn cube(x: Complex<f64>) -> Complex<f64> {
    x * x * x - Complex::new(1.0, 0.0)
}

fn cube_der(x: Complex<f64>) -> Complex<f64> {
    Complex::new(3.0, 0.0) * x * x
}

fn escape_kernel(c: &mut Criterion) {
    // An interior point, so the full budget is always spent.
    c.bench_function("escape interior point", |b| {
        b.iter(|| escape_count(Complex::new(-0.5, 0.25), 1000))
    });
}

fn newton_kernel(c: &mut Criterion) {
    c.bench_function("newton cube root", |b| {
        b.iter(|| newton_root(Complex::new(0.7, 0.9), &cube, &cube_der, 1e-10, 100, 9))
    });
}

criterion_group!(benches, escape_kernel, newton_kernel);
criterion_main!(benches);
