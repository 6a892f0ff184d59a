use crate::error::EnrichmentError;

/// What to do when a score cannot be defined.
///
/// Applies to gene sets without members (or with every gene as a member) and to
/// normalization of a matrix whose scores are all identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegeneratePolicy {
    /// Abort the computation with an [`EnrichmentError`].
    #[default]
    Fail,
    /// Write NaN into the affected cells and keep going.
    Propagate,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreConfig {
    /// Exponent applied to member ranks when weighting the running sum
    pub alpha: f64,
    /// Divide the running-sum profile by the number of genes in the matrix
    pub scale: bool,
    /// Divide the finished score matrix by its global range
    pub norm: bool,
    /// ssGSEA (area under the running sum) instead of classic GSEA (signed peak)
    pub single: bool,
    pub degenerate: DegeneratePolicy,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        ScoreConfig {
            alpha: 0.25,
            scale: true,
            norm: false,
            single: true,
            degenerate: DegeneratePolicy::Fail,
        }
    }
}

impl ScoreConfig {
    /// Classic GSEA statistic with otherwise default settings
    pub fn classic() -> Self {
        ScoreConfig {
            single: false,
            ..Default::default()
        }
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_scale(mut self, scale: bool) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_norm(mut self, norm: bool) -> Self {
        self.norm = norm;
        self
    }

    pub fn with_single(mut self, single: bool) -> Self {
        self.single = single;
        self
    }

    pub fn with_degenerate(mut self, degenerate: DegeneratePolicy) -> Self {
        self.degenerate = degenerate;
        self
    }

    pub fn validate(&self) -> Result<(), EnrichmentError> {
        if !self.alpha.is_finite() {
            return Err(EnrichmentError::invalid(format!(
                "alpha must be finite, got {}",
                self.alpha
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_ssgsea() {
        let config = ScoreConfig::default();
        assert_eq!(config.alpha, 0.25);
        assert!(config.scale);
        assert!(!config.norm);
        assert!(config.single);
        assert_eq!(config.degenerate, DegeneratePolicy::Fail);
    }

    #[test]
    fn builder_overrides_fields() {
        let config = ScoreConfig::classic()
            .with_alpha(1.0)
            .with_scale(false)
            .with_norm(true)
            .with_degenerate(DegeneratePolicy::Propagate);
        assert!(!config.single);
        assert_eq!(config.alpha, 1.0);
        assert!(!config.scale);
        assert!(config.norm);
        assert_eq!(config.degenerate, DegeneratePolicy::Propagate);
    }

    #[test]
    fn rejects_non_finite_alpha() {
        assert!(ScoreConfig::default().with_alpha(f64::NAN).validate().is_err());
        assert!(ScoreConfig::default().with_alpha(f64::INFINITY).validate().is_err());
        assert!(ScoreConfig::default().with_alpha(0.0).validate().is_ok());
    }
}
