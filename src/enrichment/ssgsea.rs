use ndarray::{Array2, ArrayView2};
use num_traits::Float;
use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
use single_utilities::traits::{FloatOps, FloatOpsTS};
use tracing::{debug, warn};

use crate::enrichment::config::{DegeneratePolicy, ScoreConfig};
use crate::enrichment::gene_sets::GeneSetIndex;
use crate::enrichment::normalize::normalize_range;
use crate::enrichment::rank::{descending_order, rank_columns};
use crate::enrichment::utils::{as_float, compute_chunk_size};
use crate::error::{DegenerateReason, EnrichmentError};

/// Running-sum profile of one gene set in one sample.
///
/// Walks genes along `order` (highest rank first) and returns, at every step,
/// the weighted CDF of set members minus the unweighted CDF of non-members.
/// Member weights are `rank^alpha`. `in_set` is indexed by gene, not by
/// position in `order`.
pub fn running_sum_profile<T>(
    ranks: &[T],
    order: &[usize],
    in_set: &[bool],
    alpha: T,
) -> Result<Vec<T>, DegenerateReason>
where
    T: FloatOps,
{
    let weights: Vec<T> = order
        .iter()
        .map(|&g| {
            if in_set[g] {
                Float::powf(ranks[g], alpha)
            } else {
                T::zero()
            }
        })
        .collect();

    let n_hit = order.iter().filter(|&&g| in_set[g]).count();
    let n_miss = order.len() - n_hit;
    if n_hit == 0 {
        return Err(DegenerateReason::NoMembers);
    }
    if n_miss == 0 {
        return Err(DegenerateReason::AllMembers);
    }

    let total_weight = weights.iter().fold(T::zero(), |acc, &w| acc + w);
    if !(total_weight > T::zero()) || !Float::is_finite(total_weight) {
        return Err(DegenerateReason::NonFiniteWeights);
    }
    let n_miss: T = as_float(n_miss);

    let mut pos = T::zero();
    let mut neg = T::zero();
    let profile = order
        .iter()
        .zip(weights.iter())
        .map(|(&g, &w)| {
            if in_set[g] {
                pos += w;
            } else {
                neg += T::one();
            }
            pos / total_weight - neg / n_miss
        })
        .collect();

    Ok(profile)
}

/// Reduce a running-sum profile to one score.
///
/// With `scale` every step is divided by `n_genes` first. `single` sums the
/// profile (ssGSEA); otherwise the step furthest from zero is returned with its
/// sign (classic GSEA).
pub fn select_score<T>(profile: &[T], n_genes: usize, scale: bool, single: bool) -> T
where
    T: FloatOps,
{
    let divisor: T = if scale { as_float(n_genes) } else { T::one() };

    if single {
        return profile.iter().fold(T::zero(), |acc, &v| acc + v / divisor);
    }

    profile
        .iter()
        .map(|&v| v / divisor)
        .fold(T::zero(), |best, v| {
            if Float::abs(v) > Float::abs(best) {
                v
            } else {
                best
            }
        })
}

fn validate_values<T>(values: &ArrayView2<T>) -> Result<(), EnrichmentError>
where
    T: FloatOps,
{
    let (n_genes, n_samples) = values.dim();
    if n_genes == 0 || n_samples == 0 {
        return Err(EnrichmentError::invalid(format!(
            "expression matrix is empty ({} genes x {} samples)",
            n_genes, n_samples
        )));
    }

    if let Some(((row, col), _)) = values
        .indexed_iter()
        .find(|(_, v)| !Float::is_finite(**v))
    {
        return Err(EnrichmentError::invalid(format!(
            "non-finite expression value at gene {} sample {}",
            row, col
        )));
    }
    Ok(())
}

/// Score every gene set of `gene_sets` in every column of `values`.
///
/// Returns a gene sets x samples matrix. Samples are scored in parallel; global
/// normalization, if enabled, runs once all scores are known.
pub fn ssgsea_compute<T>(
    values: ArrayView2<T>,
    gene_sets: &GeneSetIndex,
    config: &ScoreConfig,
) -> anyhow::Result<Array2<T>>
where
    T: FloatOpsTS,
{
    config.validate()?;
    validate_values(&values)?;
    if gene_sets.is_empty() {
        return Err(EnrichmentError::invalid("gene set collection is empty").into());
    }

    let (n_genes, n_samples) = values.dim();
    let n_sets = gene_sets.len();

    let mut masks = Vec::with_capacity(n_sets);
    for j in 0..n_sets {
        match gene_sets.degeneracy(j, n_genes) {
            None => masks.push(Some(gene_sets.membership_mask(j, n_genes))),
            Some(reason) => match config.degenerate {
                DegeneratePolicy::Fail => {
                    return Err(EnrichmentError::DegenerateGeneSet {
                        name: gene_sets.names()[j].clone(),
                        reason,
                    }
                    .into());
                }
                DegeneratePolicy::Propagate => {
                    warn!(
                        "Gene set {} is degenerate ({}), its scores are NaN",
                        gene_sets.names()[j],
                        reason
                    );
                    masks.push(None);
                }
            },
        }
    }

    debug!(
        "Scoring {} gene sets over {} genes x {} samples",
        n_sets, n_genes, n_samples
    );

    let alpha: T = as_float(config.alpha);
    let ranks = rank_columns(values);
    let chunk_size = compute_chunk_size(n_samples, n_genes);

    // weights can still overflow or underflow for extreme alpha, so every cell
    // goes through the policy again
    let columns: Vec<Vec<T>> = ranks
        .into_par_iter()
        .with_min_len(chunk_size)
        .map(|sample_ranks| -> Result<Vec<T>, EnrichmentError> {
            let order = descending_order(&sample_ranks);
            masks
                .iter()
                .enumerate()
                .map(|(j, mask)| {
                    let Some(in_set) = mask else {
                        return Ok(<T as Float>::nan());
                    };
                    match running_sum_profile(&sample_ranks, &order, in_set, alpha) {
                        Ok(profile) => {
                            Ok(select_score(&profile, n_genes, config.scale, config.single))
                        }
                        Err(reason) => match config.degenerate {
                            DegeneratePolicy::Fail => Err(EnrichmentError::DegenerateGeneSet {
                                name: gene_sets.names()[j].clone(),
                                reason,
                            }),
                            DegeneratePolicy::Propagate => Ok(<T as Float>::nan()),
                        },
                    }
                })
                .collect()
        })
        .collect::<Result<_, _>>()?;

    let mut scores = Array2::from_shape_fn((n_sets, n_samples), |(set, sample)| {
        columns[sample][set]
    });

    if config.norm {
        if let Err(err) = normalize_range(&mut scores) {
            match config.degenerate {
                DegeneratePolicy::Fail => return Err(err.into()),
                DegeneratePolicy::Propagate => {
                    warn!("{}, every score is set to NaN", err);
                    scores.fill(<T as Float>::nan());
                }
            }
        }
    }

    Ok(scores)
}
