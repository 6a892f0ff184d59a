use nalgebra_sparse::CsrMatrix;
use ndarray::{Array2, ArrayView1};
use single_utilities::traits::FloatOpsTS;

use crate::enrichment::config::ScoreConfig;
use crate::enrichment::gene_sets::GeneSetCollection;
use crate::enrichment::EnrichmentScoring;
use crate::error::EnrichmentError;

/// Genes x samples expression values with row and column labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionMatrix<T> {
    values: Array2<T>,
    gene_ids: Vec<String>,
    sample_ids: Vec<String>,
}

impl<T> ExpressionMatrix<T>
where
    T: FloatOpsTS,
{
    pub fn new(
        values: Array2<T>,
        gene_ids: Vec<String>,
        sample_ids: Vec<String>,
    ) -> anyhow::Result<Self> {
        if values.nrows() != gene_ids.len() {
            return Err(EnrichmentError::invalid(format!(
                "matrix has {} rows but {} gene identifiers were given",
                values.nrows(),
                gene_ids.len()
            ))
            .into());
        }
        if values.ncols() != sample_ids.len() {
            return Err(EnrichmentError::invalid(format!(
                "matrix has {} columns but {} sample identifiers were given",
                values.ncols(),
                sample_ids.len()
            ))
            .into());
        }
        Ok(ExpressionMatrix {
            values,
            gene_ids,
            sample_ids,
        })
    }

    /// Densify a genes x samples sparse matrix; implicit entries become zero.
    pub fn from_csr(
        matrix: &CsrMatrix<T>,
        gene_ids: Vec<String>,
        sample_ids: Vec<String>,
    ) -> anyhow::Result<Self> {
        Self::new(dense_from_csr(matrix), gene_ids, sample_ids)
    }

    pub fn values(&self) -> &Array2<T> {
        &self.values
    }

    pub fn gene_ids(&self) -> &[String] {
        &self.gene_ids
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    pub fn n_genes(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_samples(&self) -> usize {
        self.values.ncols()
    }

    /// Score every gene set in every sample.
    pub fn ssgsea(
        &self,
        gene_sets: &GeneSetCollection,
        config: &ScoreConfig,
    ) -> anyhow::Result<ScoreMatrix<T>> {
        let scores = self.values.ssgsea(&self.gene_ids, gene_sets, config)?;
        Ok(ScoreMatrix {
            scores,
            set_names: gene_sets.names().to_vec(),
            sample_ids: self.sample_ids.clone(),
        })
    }
}

pub(crate) fn dense_from_csr<T>(matrix: &CsrMatrix<T>) -> Array2<T>
where
    T: FloatOpsTS,
{
    let mut dense = Array2::zeros((matrix.nrows(), matrix.ncols()));
    for (row, col, &value) in matrix.triplet_iter() {
        dense[[row, col]] = value;
    }
    dense
}

/// Gene sets x samples scores. Rows follow gene set insertion order, columns
/// follow the input matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix<T> {
    scores: Array2<T>,
    set_names: Vec<String>,
    sample_ids: Vec<String>,
}

impl<T> ScoreMatrix<T>
where
    T: Copy,
{
    pub fn scores(&self) -> &Array2<T> {
        &self.scores
    }

    pub fn into_scores(self) -> Array2<T> {
        self.scores
    }

    pub fn set_names(&self) -> &[String] {
        &self.set_names
    }

    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }

    pub fn get(&self, set_name: &str, sample_id: &str) -> Option<T> {
        let row = self.set_names.iter().position(|n| n == set_name)?;
        let col = self.sample_ids.iter().position(|s| s == sample_id)?;
        Some(self.scores[[row, col]])
    }

    /// Scores of one gene set across all samples
    pub fn row(&self, set_name: &str) -> Option<ArrayView1<'_, T>> {
        let row = self.set_names.iter().position(|n| n == set_name)?;
        Some(self.scores.row(row))
    }
}
