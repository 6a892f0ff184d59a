use single_utilities::traits::FloatOps;

/// Lossless for any realistic gene or sample count; NaN if the cast fails.
pub(crate) fn as_float<T, N>(value: N) -> T
where
    T: FloatOps,
    N: num_traits::NumCast,
{
    num_traits::cast::<N, T>(value).unwrap_or_else(<T as num_traits::Float>::nan)
}

/// Minimum number of samples a rayon task should score in one go.
pub(crate) fn compute_chunk_size(n_samples: usize, n_genes: usize) -> usize {
    let n_cores = rayon::current_num_threads().max(1);

    let base_chunk_size = if n_genes > 20000 {
        8
    } else if n_genes > 10000 {
        16
    } else {
        64
    };

    let max_chunk_size = n_samples.div_ceil(n_cores);
    base_chunk_size.min(max_chunk_size).max(1)
}
