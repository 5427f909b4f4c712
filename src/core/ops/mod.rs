//! # Ops Module
//!
//! Shared pixel math used by the detector bank: convolution kernels,
//! histograms, entropy, correlation, connected components, and a 2-D FFT
//! for spectrum analysis. All routines operate on plain `f64` buffers or
//! `image` crate buffers and guard against degenerate inputs by returning
//! empty/neutral values instead of erroring.

use image::{GrayImage, RgbImage};

/// Sobel magnitude above this value marks a pixel as an edge (0-255 map).
pub const EDGE_THRESHOLD: f64 = 150.0;

/// Mean of a slice, 0.0 for empty input
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population variance, 0.0 for empty input
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation
pub fn std_dev(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Laplacian response for every interior pixel.
///
/// Kernel: [0, 1, 0; 1, -4, 1; 0, 1, 0]. Sharp edges produce large
/// magnitudes; flat regions produce zeros. Images smaller than 3x3 yield
/// an empty buffer.
pub fn laplacian_map(gray: &GrayImage) -> Vec<f64> {
    let (width, height) = gray.dimensions();

    if width < 3 || height < 3 {
        return Vec::new();
    }

    let mut values: Vec<f64> = Vec::with_capacity(((width - 2) * (height - 2)) as usize);

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let center = gray.get_pixel(x, y)[0] as f64;
            let top = gray.get_pixel(x, y - 1)[0] as f64;
            let bottom = gray.get_pixel(x, y + 1)[0] as f64;
            let left = gray.get_pixel(x - 1, y)[0] as f64;
            let right = gray.get_pixel(x + 1, y)[0] as f64;

            values.push(top + bottom + left + right - 4.0 * center);
        }
    }

    values
}

/// Sobel gradient magnitude for every interior pixel.
///
/// Uses the standard 3x3 horizontal/vertical kernels and returns
/// sqrt(gx^2 + gy^2) per pixel. Images smaller than 3x3 yield an empty
/// buffer.
pub fn sobel_magnitude(gray: &GrayImage) -> Vec<f64> {
    let (width, height) = gray.dimensions();

    if width < 3 || height < 3 {
        return Vec::new();
    }

    let mut values: Vec<f64> = Vec::with_capacity(((width - 2) * (height - 2)) as usize);

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let p = |dx: i32, dy: i32| -> f64 {
                gray.get_pixel((x as i32 + dx) as u32, (y as i32 + dy) as u32)[0] as f64
            };

            let gx = -p(-1, -1) - 2.0 * p(-1, 0) - p(-1, 1) + p(1, -1) + 2.0 * p(1, 0) + p(1, 1);
            let gy = -p(-1, -1) - 2.0 * p(0, -1) - p(1, -1) + p(-1, 1) + 2.0 * p(0, 1) + p(1, 1);

            values.push((gx * gx + gy * gy).sqrt());
        }
    }

    values
}

/// Binary edge map from thresholded Sobel magnitude.
///
/// Edge pixels are 255, everything else 0, so mean differences between
/// per-channel edge maps land on the same 0-255 scale the decision bands
/// expect. The border ring is always 0.
pub fn edge_map(gray: &GrayImage) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut edges = GrayImage::new(width, height);

    if width < 3 || height < 3 {
        return edges;
    }

    let magnitudes = sobel_magnitude(gray);
    let inner_width = (width - 2) as usize;

    for (i, &m) in magnitudes.iter().enumerate() {
        if m > EDGE_THRESHOLD {
            let x = (i % inner_width) as u32 + 1;
            let y = (i / inner_width) as u32 + 1;
            edges.put_pixel(x, y, image::Luma([255]));
        }
    }

    edges
}

/// Sizes (pixel areas) of 8-connected components of edge pixels.
///
/// Returns an empty vector when the map contains no edge pixels.
pub fn connected_component_sizes(edges: &GrayImage) -> Vec<f64> {
    let (width, height) = edges.dimensions();
    let w = width as usize;
    let h = height as usize;
    let mut visited = vec![false; w * h];
    let mut sizes = Vec::new();
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for start_y in 0..h {
        for start_x in 0..w {
            let idx = start_y * w + start_x;
            if visited[idx] || edges.get_pixel(start_x as u32, start_y as u32)[0] == 0 {
                continue;
            }

            // Flood-fill one component
            let mut area = 0u64;
            visited[idx] = true;
            stack.push((start_x, start_y));

            while let Some((x, y)) = stack.pop() {
                area += 1;
                for dy in -1i64..=1 {
                    for dx in -1i64..=1 {
                        if dx == 0 && dy == 0 {
                            continue;
                        }
                        let nx = x as i64 + dx;
                        let ny = y as i64 + dy;
                        if nx < 0 || ny < 0 || nx >= w as i64 || ny >= h as i64 {
                            continue;
                        }
                        let nidx = ny as usize * w + nx as usize;
                        if !visited[nidx] && edges.get_pixel(nx as u32, ny as u32)[0] != 0 {
                            visited[nidx] = true;
                            stack.push((nx as usize, ny as usize));
                        }
                    }
                }
            }

            sizes.push(area as f64);
        }
    }

    sizes
}

/// Equal-width histogram over [min, max] of the input values.
///
/// All values land in bin 0 when the input range is empty (flat input).
pub fn histogram(values: &[f64], bins: usize) -> Vec<u64> {
    let mut counts = vec![0u64; bins];
    if values.is_empty() || bins == 0 {
        return counts;
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;

    if range <= 0.0 {
        counts[0] = values.len() as u64;
        return counts;
    }

    for &v in values {
        let mut bin = ((v - min) / range * bins as f64) as usize;
        if bin >= bins {
            bin = bins - 1;
        }
        counts[bin] += 1;
    }

    counts
}

/// Shannon entropy (natural log) of a histogram with +1 smoothing.
///
/// Matches the original measurement convention: each count is incremented
/// before normalization so empty bins contribute rather than being skipped.
pub fn shannon_entropy(hist: &[u64]) -> f64 {
    if hist.is_empty() {
        return 0.0;
    }

    let total: f64 = hist.iter().map(|&c| (c + 1) as f64).sum();
    let mut entropy = 0.0;

    for &count in hist {
        let p = (count + 1) as f64 / total;
        entropy -= p * p.ln();
    }

    entropy
}

/// Pearson correlation coefficient between two equally sized samples.
///
/// Returns `None` when either sample has zero variance (the coefficient is
/// undefined there, and callers treat it as "no signal").
pub fn pearson_correlation(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let mean_a = mean(a);
    let mean_b = mean(b);

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;

    for (&x, &y) in a.iter().zip(b.iter()) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        cov += dx * dy;
        var_a += dx * dx;
        var_b += dy * dy;
    }

    let denom = (var_a * var_b).sqrt();
    if denom < f64::EPSILON {
        return None;
    }

    Some(cov / denom)
}

/// HSV saturation channel on the 0-255 scale: S = (max - min) * 255 / max.
pub fn saturation_channel(rgb: &RgbImage) -> Vec<f64> {
    rgb.pixels()
        .map(|p| {
            let r = p[0] as f64;
            let g = p[1] as f64;
            let b = p[2] as f64;
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            if max <= 0.0 {
                0.0
            } else {
                (max - min) * 255.0 / max
            }
        })
        .collect()
}

/// In-place iterative radix-2 FFT over one complex line.
///
/// `data` length must be a power of two.
fn fft_line(data: &mut [(f64, f64)]) {
    let n = data.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two());

    // Bit-reversal permutation
    let mut j = 0usize;
    for i in 1..n {
        let mut bit = n >> 1;
        while j & bit != 0 {
            j ^= bit;
            bit >>= 1;
        }
        j |= bit;
        if i < j {
            data.swap(i, j);
        }
    }

    // Butterfly passes
    let mut len = 2;
    while len <= n {
        let angle = -2.0 * std::f64::consts::PI / len as f64;
        let (w_re, w_im) = (angle.cos(), angle.sin());

        for start in (0..n).step_by(len) {
            let mut cur = (1.0f64, 0.0f64);
            for k in 0..len / 2 {
                let (a_re, a_im) = data[start + k];
                let (b_re, b_im) = data[start + k + len / 2];
                let t_re = b_re * cur.0 - b_im * cur.1;
                let t_im = b_re * cur.1 + b_im * cur.0;

                data[start + k] = (a_re + t_re, a_im + t_im);
                data[start + k + len / 2] = (a_re - t_re, a_im - t_im);

                cur = (cur.0 * w_re - cur.1 * w_im, cur.0 * w_im + cur.1 * w_re);
            }
        }
        len <<= 1;
    }
}

/// Centered log-magnitude spectrum, ln(|F| + 1), of a grayscale grid.
///
/// Both dimensions must be powers of two. The output is fft-shifted so the
/// DC component sits at (height/2, width/2), row-major `[y][x]`.
pub fn log_magnitude_spectrum(gray: &GrayImage) -> Vec<Vec<f64>> {
    let width = gray.width() as usize;
    let height = gray.height() as usize;
    debug_assert!(width.is_power_of_two() && height.is_power_of_two());

    // Row transforms
    let mut field: Vec<Vec<(f64, f64)>> = (0..height)
        .map(|y| {
            let mut row: Vec<(f64, f64)> = (0..width)
                .map(|x| (gray.get_pixel(x as u32, y as u32)[0] as f64, 0.0))
                .collect();
            fft_line(&mut row);
            row
        })
        .collect();

    // Column transforms
    let mut column = vec![(0.0f64, 0.0f64); height];
    for x in 0..width {
        for (y, slot) in column.iter_mut().enumerate() {
            *slot = field[y][x];
        }
        fft_line(&mut column);
        for (y, &value) in column.iter().enumerate() {
            field[y][x] = value;
        }
    }

    // Shifted log-magnitude
    let mut spectrum = vec![vec![0.0f64; width]; height];
    for y in 0..height {
        for x in 0..width {
            let (re, im) = field[y][x];
            let magnitude = (re * re + im * im).sqrt();
            let shifted_y = (y + height / 2) % height;
            let shifted_x = (x + width / 2) % width;
            spectrum[shifted_y][shifted_x] = (magnitude + 1.0).ln();
        }
    }

    spectrum
}
