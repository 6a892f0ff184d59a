use ndarray::Array2;
use num_traits::Float;
use single_utilities::traits::FloatOps;

use crate::error::EnrichmentError;

/// Divide every score by the global range `max - min` of the matrix.
///
/// Non-finite cells are skipped when computing the range and are left as they
/// are. Fails when the finite scores span no range at all.
pub fn normalize_range<T>(scores: &mut Array2<T>) -> Result<(), EnrichmentError>
where
    T: FloatOps,
{
    let (min, max) = scores
        .iter()
        .filter(|v| Float::is_finite(**v))
        .fold(None, |acc: Option<(T, T)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((Float::min(lo, v), Float::max(hi, v))),
        })
        .ok_or_else(|| EnrichmentError::invalid("no finite score to normalize"))?;

    let range = max - min;
    if !(range > T::zero()) || !Float::is_finite(range) {
        return Err(EnrichmentError::DegenerateNormalization {
            value: max.to_f64().unwrap_or(f64::NAN),
        });
    }

    scores.mapv_inplace(|v| v / range);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn divides_by_global_range() {
        let mut scores = array![[1.0, -1.0], [3.0, 0.5]];
        normalize_range(&mut scores).unwrap();
        let expected = array![[0.25, -0.25], [0.75, 0.125]];
        for (a, e) in scores.iter().zip(expected.iter()) {
            assert_abs_diff_eq!(*a, *e, epsilon = 1e-12);
        }
    }

    #[test]
    fn constant_matrix_is_degenerate() {
        let mut scores = array![[2.0, 2.0], [2.0, 2.0]];
        let err = normalize_range(&mut scores).unwrap_err();
        assert_eq!(err, EnrichmentError::DegenerateNormalization { value: 2.0 });
        assert_eq!(scores, array![[2.0, 2.0], [2.0, 2.0]]);
    }

    #[test]
    fn ignores_nan_cells() {
        let mut scores = array![[f64::NAN, 2.0], [-2.0, 1.0]];
        normalize_range(&mut scores).unwrap();
        assert!(scores[[0, 0]].is_nan());
        assert_abs_diff_eq!(scores[[0, 1]], 0.5);
        assert_abs_diff_eq!(scores[[1, 0]], -0.5);
    }

    #[test]
    fn second_pass_leaves_matrix_unchanged() {
        let mut scores = array![[0.3, -1.7, 2.2], [0.9, 1.1, -0.4]];
        normalize_range(&mut scores).unwrap();
        let once = scores.clone();
        normalize_range(&mut scores).unwrap();
        for (a, e) in scores.iter().zip(once.iter()) {
            assert_abs_diff_eq!(*a, *e, epsilon = 1e-12);
        }
    }
}
