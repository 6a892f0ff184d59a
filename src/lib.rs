//! # single-enrichment
//!
//! Single-sample gene set enrichment scoring for expression matrices, part of the single-rust ecosystem.
//!
//! For every (gene set, sample) pair this crate computes one score summarizing whether the genes of
//! the set sit toward the high-expression end of that sample's ranking. Both the single-sample
//! variant (ssGSEA, area under the running-sum curve) and the classic GSEA statistic (signed peak
//! of the running sum) are available.
//!
//! ## Core Features
//!
//! - **Rank Transform**: per-sample fractional ranking with averaged ties
//! - **Running-Sum Scoring**: weighted member CDF against unweighted non-member CDF
//! - **Post-Processing**: optional scaling by gene count and global range normalization
//! - **Dense and Sparse Input**: `ndarray::Array2` and `CsrMatrix` from nalgebra-sparse
//!
//! ## Quick Start
//!
//! ```rust
//! use ndarray::array;
//! use single_enrichment::enrichment::{ExpressionMatrix, GeneSetCollection, ScoreConfig};
//!
//! let matrix = ExpressionMatrix::new(
//!     array![[5.0, 1.0], [3.0, 2.0], [1.0, 3.0]],
//!     vec!["g1".into(), "g2".into(), "g3".into()],
//!     vec!["s1".into(), "s2".into()],
//! ).unwrap();
//!
//! let gene_sets = GeneSetCollection::from_pairs([("up", ["g1", "g2"])]).unwrap();
//! let scores = matrix.ssgsea(&gene_sets, &ScoreConfig::default()).unwrap();
//! assert_eq!(scores.scores().dim(), (1, 2));
//! ```
//!
//! ## Module Organization
//!
//! - **[`enrichment`]**: ranking, scoring, normalization and the matrix/gene set types
//! - **[`error`]**: the error taxonomy shared by all entry points

pub mod enrichment;
pub mod error;
