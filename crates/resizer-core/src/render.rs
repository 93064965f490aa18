//! Compositing a source image onto an opaque square surface.
//!
//! The renderer uses inverse mapping: for each destination pixel it finds
//! the source position under the current [`ViewportTransform`] and samples
//! the image there.
//!
//! # Algorithm
//!
//! Pixel centers are aligned, so with `scale = 1` and an integral offset
//! every destination pixel lands exactly on a source pixel:
//!
//! ```text
//! src_x = (dst_x + 0.5 - offset_x) / scale - 0.5
//! src_y = (dst_y + 0.5 - offset_y) / scale - 0.5
//! ```
//!
//! A destination pixel is covered when its center maps inside the source
//! rectangle `[0, W) x [0, H)`. Uncovered pixels keep
//! the background color. Covered pixels are sampled in premultiplied alpha and
//! composited over the background, so the output is always opaque.

use image::{Rgb, RgbImage};

use crate::config::InterpolationFilter;
use crate::decode::SourceImage;
use crate::viewport::{Point, ViewportTransform};

/// Where one destination column (or row) samples the source.
#[derive(Debug, Clone, Copy)]
struct AxisSample {
    covered: bool,
    src: f64,
}

/// Precompute source positions along one axis.
///
/// `to_source` maps a destination pixel center to source space; the pixel
/// is covered when that position lies inside `[0, src_len)`.
fn axis_samples(dst_len: u32, src_len: u32, to_source: impl Fn(f64) -> f64) -> Vec<AxisSample> {
    let extent = src_len as f64;
    (0..dst_len)
        .map(|d| {
            let local = to_source(d as f64 + 0.5);
            AxisSample {
                covered: local >= 0.0 && local < extent,
                src: local - 0.5,
            }
        })
        .collect()
}

/// Composite `image` under `transform` onto a `size x size` surface.
///
/// The caller guarantees `size > 0`, a positive finite scale and a
/// well-formed, non-empty image.
pub fn composite(
    image: &SourceImage,
    transform: &ViewportTransform,
    size: u32,
    background: [u8; 3],
    filter: InterpolationFilter,
) -> RgbImage {
    let cols = axis_samples(size, image.width, |x| {
        transform.unmap_point(Point::new(x, 0.0)).x
    });
    let rows = axis_samples(size, image.height, |y| {
        transform.unmap_point(Point::new(0.0, y)).y
    });
    let bg = background.map(f64::from);

    let mut output = RgbImage::from_pixel(size, size, Rgb(background));

    for (y, row) in rows.iter().enumerate() {
        if !row.covered {
            continue;
        }
        for (x, col) in cols.iter().enumerate() {
            if !col.covered {
                continue;
            }

            let premul = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, col.src, row.src),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, col.src, row.src),
            };

            output.put_pixel(x as u32, y as u32, Rgb(over(premul, bg)));
        }
    }

    output
}

/// Source-over compositing of a premultiplied sample onto an opaque color.
#[inline]
fn over(premul: [f64; 4], bg: [f64; 3]) -> [u8; 3] {
    let alpha = premul[3].clamp(0.0, 1.0);
    let inv = 1.0 - alpha;
    let mut out = [0u8; 3];
    for i in 0..3 {
        let v = premul[i].clamp(0.0, 255.0 * alpha) + bg[i] * inv;
        out[i] = v.clamp(0.0, 255.0).round() as u8;
    }
    out
}

/// Get a pixel as premultiplied `[r, g, b, a]` with `a` in `0.0..=1.0`.
#[inline]
fn get_premultiplied(image: &SourceImage, px: usize, py: usize) -> [f64; 4] {
    let idx = (py * image.width as usize + px) * 4;
    let p = &image.pixels[idx..idx + 4];
    let a = p[3] as f64 / 255.0;
    [p[0] as f64 * a, p[1] as f64 * a, p[2] as f64 * a, a]
}

/// Sample a pixel using bilinear interpolation, clamping to the image edge.
fn sample_bilinear(image: &SourceImage, x: f64, y: f64) -> [f64; 4] {
    let max_x = (image.width - 1) as f64;
    let max_y = (image.height - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let x1 = (x0 + 1).min(image.width as usize - 1);
    let y1 = (y0 + 1).min(image.height as usize - 1);

    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = get_premultiplied(image, x0, y0);
    // Exact hits skip the blend so unscaled copies stay bit-exact
    if fx == 0.0 && fy == 0.0 {
        return p00;
    }
    let p10 = get_premultiplied(image, x1, y0);
    let p01 = get_premultiplied(image, x0, y1);
    let p11 = get_premultiplied(image, x1, y1);

    let mut result = [0.0f64; 4];
    for i in 0..4 {
        result[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }
    result
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighborhood.
///
/// Neighbors outside the image repeat the edge pixel.
fn sample_lanczos3(image: &SourceImage, x: f64, y: f64) -> [f64; 4] {
    let (w, h) = (image.width as i64, image.height as i64);
    let x = x.clamp(0.0, (w - 1) as f64);
    let y = y.clamp(0.0, (h - 1) as f64);

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    if x == x0 as f64 && y == y0 as f64 {
        return get_premultiplied(image, x0 as usize, y0 as usize);
    }

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        let py = (y0 + ky).clamp(0, h - 1);
        let wy = lanczos_weight(y - (y0 + ky) as f64, 3.0);
        for kx in -2..=3 {
            let px = (x0 + kx).clamp(0, w - 1);
            let weight = lanczos_weight(x - (x0 + kx) as f64, 3.0) * wy;

            let pixel = get_premultiplied(image, px as usize, py as usize);
            for i in 0..4 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return get_premultiplied(image, x0 as usize, y0 as usize);
    }
    sum.map(|v| v / weight_sum)
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
