extern crate clap;
extern crate image;
extern crate newtonbrot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use image::jpeg::JPEGEncoder;
use image::png::PNGEncoder;
use image::ColorType;
use num::Complex;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use newtonbrot::{
    MandelbrotRenderer, NewtonRenderer, NewtonSettings, Palette, PlaneMapper, RgbBuffer,
};

fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

type Poly = fn(Complex<f64>) -> Complex<f64>;

// The built-in example polynomials.  The library takes any pair of
// complex functions; these are just the ones worth having on tap.

fn cube(x: Complex<f64>) -> Complex<f64> {
    x * x * x - Complex::new(1.0, 0.0)
}

fn cube_der(x: Complex<f64>) -> Complex<f64> {
    Complex::new(3.0, 0.0) * x * x
}

fn cubemix(x: Complex<f64>) -> Complex<f64> {
    x * x * x - Complex::new(2.0, 0.0) * x + Complex::new(2.0, 0.0)
}

fn cubemix_der(x: Complex<f64>) -> Complex<f64> {
    Complex::new(3.0, 0.0) * x * x - Complex::new(2.0, 0.0)
}

fn quintic(x: Complex<f64>) -> Complex<f64> {
    x * x * x * x * x - Complex::new(0.0, 3.0) * x * x * x + x - Complex::new(5.0, 2.0)
}

fn quintic_der(x: Complex<f64>) -> Complex<f64> {
    Complex::new(5.0, 0.0) * x * x * x * x - Complex::new(0.0, 9.0) * x * x
        + Complex::new(1.0, 0.0)
}

fn function_by_name(name: &str) -> (Poly, Poly) {
    match name {
        "cubemix" => (cubemix as Poly, cubemix_der as Poly),
        "quintic" => (quintic as Poly, quintic_der as Poly),
        _ => (cube as Poly, cube_der as Poly),
    }
}

const FRACTAL: &str = "fractal";
const OUTPUT: &str = "output";
const SIZE: &str = "size";
const LEFTLOWER: &str = "leftlower";
const RIGHTUPPER: &str = "rightupper";
const THREADS: &str = "threads";
const ITERATIONS: &str = "iterations";
const FUNCTION: &str = "function";
const PALETTE: &str = "palette";
const MAXERR: &str = "max-err";
const DECIMALS: &str = "decimals";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("newt")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Mandelbrot and Newton fractal renderer")
        .arg(
            Arg::with_name(FRACTAL)
                .required(false)
                .long(FRACTAL)
                .short("f")
                .takes_value(true)
                .default_value("mandelbrot")
                .possible_values(&["mandelbrot", "newton"])
                .help("Which fractal to render"),
        )
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file; .png gets PNG, anything else JPEG"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("600x400")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(LEFTLOWER)
                .required(false)
                .long(LEFTLOWER)
                .short("l")
                .takes_value(true)
                .default_value("-2.0,-1.0")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse left lower corner"))
                .help("Corner of the plane that pixel 0,0 maps to"),
        )
        .arg(
            Arg::with_name(RIGHTUPPER)
                .required(false)
                .long(RIGHTUPPER)
                .short("r")
                .takes_value(true)
                .default_value("1.0,1.0")
                .allow_hyphen_values(true)
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse right upper corner"))
                .help("Far corner of the plane"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("0")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 0 and {}", max_threads),
                    )
                })
                .help("Number of threads to use in solver; 0 means all cores"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("100")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Per-point iteration budget"),
        )
        .arg(
            Arg::with_name(FUNCTION)
                .required(false)
                .long(FUNCTION)
                .takes_value(true)
                .default_value("cube")
                .possible_values(&["cube", "cubemix", "quintic"])
                .help("Built-in polynomial for the newton fractal"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .takes_value(true)
                .default_value("#023E8A,#0077B6,#90E0EF,#CAF0F8,#03045E")
                .help("Comma-separated #RRGGBB colors for the newton roots"),
        )
        .arg(
            Arg::with_name(MAXERR)
                .required(false)
                .long(MAXERR)
                .takes_value(true)
                .default_value("1e-5")
                .validator(|s| match f64::from_str(&s) {
                    Ok(_) => Ok(()),
                    Err(_) => Err("Could not parse residual bound".to_string()),
                })
                .help("Residual bound for newton convergence"),
        )
        .arg(
            Arg::with_name(DECIMALS)
                .required(false)
                .long(DECIMALS)
                .takes_value(true)
                .default_value("8")
                .validator(move |s| {
                    validate_range(
                        &s,
                        0,
                        12,
                        "Could not parse decimals",
                        "Decimals must be between 0 and 12",
                    )
                })
                .help("Decimal digits kept when clustering newton roots"),
        )
        .get_matches()
}

fn write_image(outfile: &str, image: &RgbBuffer) -> Result<(), std::io::Error> {
    let path = Path::new(outfile);
    let mut output = File::create(&path)?;
    let (width, height) = (image.width() as u32, image.height() as u32);
    match path.extension().and_then(|e| e.to_str()) {
        Some("png") => {
            let encoder = PNGEncoder::new(output);
            encoder.encode(image.as_bytes(), width, height, ColorType::RGB(8))?;
        }
        _ => {
            let mut encoder = JPEGEncoder::new(&mut output);
            encoder.encode(image.as_bytes(), width, height, ColorType::RGB(8))?;
        }
    }
    Ok(())
}

fn main() {
    let matches = args();
    let image_size = parse_pair::<usize>(matches.value_of(SIZE).unwrap(), 'x')
        .expect("Error parsing image dimensions");
    let leftlower = parse_complex(matches.value_of(LEFTLOWER).unwrap())
        .expect("Error parsing left lower point");
    let rightupper = parse_complex(matches.value_of(RIGHTUPPER).unwrap())
        .expect("Error parsing right upper point");
    let threads = usize::from_str(matches.value_of(THREADS).unwrap())
        .expect("Could not parse thread count.");
    let iterations = u32::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Could not parse iteration count.");

    let threads = if threads == 0 {
        num_cpus::get()
    } else {
        threads
    };

    let plane = match PlaneMapper::new(image_size.0, image_size.1, leftlower, rightupper) {
        Ok(plane) => plane,
        Err(e) => {
            eprintln!("Render failure: {}", e);
            std::process::exit(1);
        }
    };

    let image = match matches.value_of(FRACTAL).unwrap() {
        "newton" => {
            let specs: Vec<&str> = matches.value_of(PALETTE).unwrap().split(',').collect();
            let palette = match Palette::parse(&specs) {
                Ok(palette) => palette,
                Err(e) => {
                    eprintln!("Render failure: {}", e);
                    std::process::exit(1);
                }
            };
            let settings = NewtonSettings {
                max_err: f64::from_str(matches.value_of(MAXERR).unwrap())
                    .expect("Could not parse residual bound."),
                max_iter: iterations,
                decimals: i32::from_str(matches.value_of(DECIMALS).unwrap())
                    .expect("Could not parse decimals."),
            };
            let (f, f_prime) = function_by_name(matches.value_of(FUNCTION).unwrap());
            let out = NewtonRenderer::new(plane, f, f_prime, settings, palette).render(threads);
            if let Some(pad) = out.padding {
                eprintln!(
                    "warning: palette provided had length {}, but there were {} roots; \
                     padded with {} black entries",
                    pad.supplied, pad.roots, pad.padded
                );
            }
            out.image
        }
        _ => MandelbrotRenderer::new(plane, iterations).render(threads),
    };

    if let Err(e) = write_image(matches.value_of(OUTPUT).unwrap(), &image) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
