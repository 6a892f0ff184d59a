//! Single-sample gene set enrichment scoring.
//!
//! The pipeline has three stages, each usable on its own:
//!
//! 1. **Rank Transform** (`rank`): every sample is ranked independently, ties share their mean rank
//! 2. **Scoring** (`ssgsea`): per sample and gene set, a running sum over genes ordered from
//!    highest to lowest rank is reduced to one score
//! 3. **Post-Processing** (`normalize`): optional division of the whole score matrix by its range
//!
//! Gene set identifiers that do not occur in the matrix are ignored. A set left with no members,
//! or one covering every gene, has no defined score; [`DegeneratePolicy`] decides whether that is
//! an error or a NaN row.
//!
//! ## Quick Example
//!
//! ```rust
//! use ndarray::array;
//! use single_enrichment::enrichment::{EnrichmentScoring, GeneSetCollection, ScoreConfig};
//!
//! let values = array![[5.0, 1.0], [3.0, 2.0], [1.0, 3.0]];
//! let genes: Vec<String> = vec!["g1".into(), "g2".into(), "g3".into()];
//! let sets = GeneSetCollection::from_pairs([("up", ["g1", "g2"])]).unwrap();
//!
//! let config = ScoreConfig::default().with_scale(false);
//! let scores = values.ssgsea(&genes, &sets, &config).unwrap();
//! assert!(scores[[0, 0]] > 0.0);
//! assert!(scores[[0, 1]] < 0.0);
//! ```

use nalgebra_sparse::CsrMatrix;
use ndarray::Array2;
use single_utilities::traits::FloatOpsTS;

use crate::error::EnrichmentError;

mod config;
mod gene_sets;
mod matrix;
mod normalize;
mod rank;
mod ssgsea;
pub(crate) mod utils;

pub use config::{DegeneratePolicy, ScoreConfig};
pub use gene_sets::{GeneSetCollection, GeneSetIndex};
pub use matrix::{ExpressionMatrix, ScoreMatrix};
pub use normalize::normalize_range;
pub use rank::{descending_order, rank_columns, rank_data};
pub use ssgsea::{running_sum_profile, select_score, ssgsea_compute};

/// Enrichment scoring on a genes x samples matrix whose rows are labelled by
/// `gene_ids`. The result has one row per gene set and one column per sample.
pub trait EnrichmentScoring<T>
where
    T: FloatOpsTS,
{
    fn ssgsea(
        &self,
        gene_ids: &[String],
        gene_sets: &GeneSetCollection,
        config: &ScoreConfig,
    ) -> anyhow::Result<Array2<T>>;
}

fn check_gene_ids(n_rows: usize, gene_ids: &[String]) -> Result<(), EnrichmentError> {
    if n_rows != gene_ids.len() {
        return Err(EnrichmentError::invalid(format!(
            "matrix has {} rows but {} gene identifiers were given",
            n_rows,
            gene_ids.len()
        )));
    }
    Ok(())
}

impl<T> EnrichmentScoring<T> for Array2<T>
where
    T: FloatOpsTS,
{
    fn ssgsea(
        &self,
        gene_ids: &[String],
        gene_sets: &GeneSetCollection,
        config: &ScoreConfig,
    ) -> anyhow::Result<Array2<T>> {
        check_gene_ids(self.nrows(), gene_ids)?;
        let index = gene_sets.resolve(gene_ids);
        ssgsea_compute(self.view(), &index, config)
    }
}

impl<T> EnrichmentScoring<T> for CsrMatrix<T>
where
    T: FloatOpsTS,
{
    fn ssgsea(
        &self,
        gene_ids: &[String],
        gene_sets: &GeneSetCollection,
        config: &ScoreConfig,
    ) -> anyhow::Result<Array2<T>> {
        check_gene_ids(self.nrows(), gene_ids)?;
        let dense = matrix::dense_from_csr(self);
        let index = gene_sets.resolve(gene_ids);
        ssgsea_compute(dense.view(), &index, config)
    }
}
