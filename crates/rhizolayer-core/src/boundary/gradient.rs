use ndarray::{Array2, ArrayView2};

use crate::consts::{SOBEL5_DERIV, SOBEL5_SMOOTH};

use super::config::GradientPolarity;

/// Compute the 5x5 Sobel d/dy response of `strip`.
///
/// The kernel is the outer product of `SOBEL5_DERIV` (rows) and
/// `SOBEL5_SMOOTH` (columns), applied as a correlation with reflect-101
/// borders. A dark-above/bright-below edge gives a positive response.
pub fn sobel5_dy(strip: ArrayView2<f32>) -> Array2<f64> {
    let (h, w) = strip.dim();
    let mut smoothed = Array2::<f64>::zeros((h, w));
    if h == 0 || w == 0 {
        return smoothed;
    }

    // Horizontal smoothing pass.
    for row in 0..h {
        for col in 0..w {
            let mut acc = 0.0f64;
            for (k, &weight) in SOBEL5_SMOOTH.iter().enumerate() {
                let c = reflect101(col as isize + k as isize - 2, w);
                acc += weight * strip[[row, c]] as f64;
            }
            smoothed[[row, col]] = acc;
        }
    }

    // Vertical derivative pass.
    let mut result = Array2::<f64>::zeros((h, w));
    for row in 0..h {
        for col in 0..w {
            let mut acc = 0.0f64;
            for (k, &weight) in SOBEL5_DERIV.iter().enumerate() {
                if weight == 0.0 {
                    continue;
                }
                let r = reflect101(row as isize + k as isize - 2, h);
                acc += weight * smoothed[[r, col]];
            }
            result[[row, col]] = acc;
        }
    }

    result
}

/// Average the Sobel d/dy response of `strip` across its columns, giving one
/// value per row.
pub fn row_gradient_profile(strip: ArrayView2<f32>, polarity: GradientPolarity) -> Vec<f64> {
    let response = sobel5_dy(strip);
    let (h, w) = response.dim();
    if w == 0 {
        return vec![0.0; h];
    }

    response
        .rows()
        .into_iter()
        .map(|row| {
            let sum: f64 = match polarity {
                GradientPolarity::Signed => row.iter().sum(),
                GradientPolarity::Absolute => row.iter().map(|v| v.abs()).sum(),
            };
            sum / w as f64
        })
        .collect()
}

/// Mirror an out-of-range index back into `0..n` without repeating the edge
/// sample (`dcb|abcd|cba`).
pub(crate) fn reflect101(mut i: isize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let last = n as isize - 1;
    loop {
        if i < 0 {
            i = -i;
        } else if i > last {
            i = 2 * last - i;
        } else {
            return i as usize;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect101_mirrors_without_edge_repeat() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(-2, 5), 2);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(6, 5), 2);
        assert_eq!(reflect101(3, 5), 3);
        assert_eq!(reflect101(-3, 1), 0);
    }

    #[test]
    fn flat_strip_has_zero_response() {
        let strip = Array2::<f32>::from_elem((20, 8), 0.4);
        let profile = row_gradient_profile(strip.view(), GradientPolarity::Signed);
        assert!(profile.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn step_edge_response_sign() {
        let mut strip = Array2::<f32>::zeros((20, 8));
        for row in 10..20 {
            for col in 0..8 {
                strip[[row, col]] = 1.0;
            }
        }
        let response = sobel5_dy(strip.view());
        // Each column sums the 16-weight smoothing kernel; the step contributes 2+1.
        assert!((response[[9, 3]] - 48.0).abs() < 1e-9);
        assert!((response[[10, 3]] - 48.0).abs() < 1e-9);

        let mut inverted = strip.clone();
        inverted.mapv_inplace(|v| 1.0 - v);
        let signed = row_gradient_profile(inverted.view(), GradientPolarity::Signed);
        let absolute = row_gradient_profile(inverted.view(), GradientPolarity::Absolute);
        assert!(signed[10] < 0.0);
        assert!(absolute[10] > 0.0);
    }
}
