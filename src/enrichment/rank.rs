use std::cmp::Ordering;

use ndarray::ArrayView2;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use single_utilities::traits::{FloatOps, FloatOpsTS};

use crate::enrichment::utils::as_float;

/// Ascending fractional ranking: the smallest value gets rank 1 and tied values
/// share the mean of the ranks they occupy.
///
/// Values must be comparable; NaN is rejected before ranking by the engine.
pub fn rank_data<T>(values: &[T]) -> Vec<T>
where
    T: FloatOps,
{
    let mut indexed_values: Vec<(usize, T)> = values
        .iter()
        .enumerate()
        .map(|(i, &v)| (i, v))
        .collect();

    indexed_values.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal));

    let two: T = as_float(2);
    let mut ranks = vec![T::zero(); values.len()];
    let mut i = 0;
    while i < indexed_values.len() {
        let val = indexed_values[i].1;
        let mut j = i + 1;
        while j < indexed_values.len() && indexed_values[j].1 == val {
            j += 1;
        }

        // positions i..j hold ranks i+1..=j
        let rank = as_float::<T, _>(i + j + 1) / two;
        for &(original_idx, _) in &indexed_values[i..j] {
            ranks[original_idx] = rank;
        }

        i = j;
    }

    ranks
}

/// Rank every column (sample) of a genes x samples matrix independently.
pub fn rank_columns<T>(values: ArrayView2<T>) -> Vec<Vec<T>>
where
    T: FloatOpsTS,
{
    (0..values.ncols())
        .into_par_iter()
        .map(|col| {
            let column: Vec<T> = values.column(col).iter().copied().collect();
            rank_data(&column)
        })
        .collect()
}

/// Gene indices from highest to lowest rank. The sort is stable, so tied genes
/// keep ascending index order.
pub fn descending_order<T>(ranks: &[T]) -> Vec<usize>
where
    T: FloatOps,
{
    let mut order: Vec<usize> = (0..ranks.len()).collect();
    order.sort_by(|&a, &b| ranks[b].partial_cmp(&ranks[a]).unwrap_or(Ordering::Equal));
    order
}
