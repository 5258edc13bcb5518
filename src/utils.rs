use crate::error::{check_len, Result};

/// A trait that provides easy access to the first element of a slice.
pub trait Front<T> {
    fn front(&self) -> &T;
}

/// A trait that provides easy access to the last element of a slice.
pub trait Back<T> {
    fn back(&self) -> &T;
    fn mut_back(&mut self) -> &mut T;
}

impl<T> Front<T> for [T] {
    #[inline(always)]
    fn front(&self) -> &T {
        &self[0]
    }
}

impl<T> Back<T> for [T] {
    #[inline(always)]
    fn back(&self) -> &T {
        &self[self.len() - 1]
    }
    #[inline(always)]
    fn mut_back(&mut self) -> &mut T {
        let i = self.len() - 1;
        &mut self[i]
    }
}

/// Computes `Σ a[i] * b[i]`.
pub fn dot_product(a: &[f64], b: &[f64]) -> Result<f64> {
    check_len("dot product operand", a.len(), b.len())?;
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Rescales every column of `dataset` into `[0, 1]` in place.
///
/// A column holding a single repeated value is mapped to zero.
pub fn normalize_by_feature_scaling(dataset: &mut [Vec<f64>]) -> Result<()> {
    let width = match dataset.first() {
        Some(row) => row.len(),
        None => return Ok(()),
    };
    for row in dataset.iter() {
        check_len("dataset row", width, row.len())?;
    }

    for column in 0..width {
        let (min, max) = dataset
            .iter()
            .map(|row| row[column])
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        let range = max - min;
        for row in dataset.iter_mut() {
            row[column] = if range > 0.0 {
                (row[column] - min) / range
            } else {
                0.0
            };
        }
    }
    Ok(())
}

/// Computes the mean squared error between `actual` and `expected`.
pub fn mean_square_error(actual: &[f64], expected: &[f64]) -> Result<f64> {
    check_len("expected output", actual.len(), expected.len())?;
    let error: f64 = actual
        .iter()
        .zip(expected)
        .map(|(a, e)| (a - e) * (a - e))
        .sum();
    Ok(error / actual.len() as f64)
}
