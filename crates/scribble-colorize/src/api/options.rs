//! Request-scoped configuration for one colorization.

use super::ColorizeError;
use crate::affinity::{AffinityOptions, MAX_RADIUS};
use crate::constraint::ConstraintOptions;
use crate::solver::SolverOptions;

/// Every tunable of the pipeline, grouped by stage.
///
/// Passed explicitly to [`Colorizer::from_options`](crate::Colorizer::from_options);
/// the crate keeps no global settings.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ColorizeOptions {
    pub constraint: ConstraintOptions,
    pub affinity: AffinityOptions,
    pub solver: SolverOptions,
}

impl ColorizeOptions {
    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// [`ColorizeError::InvalidOptions`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ColorizeError> {
        let invalid = |msg: String| Err(ColorizeError::InvalidOptions(msg));

        let c = &self.constraint;
        if !(c.white_tolerance.is_finite() && c.white_tolerance >= 0.0) {
            return invalid(format!(
                "white_tolerance must be >= 0, got {}",
                c.white_tolerance
            ));
        }
        if !(c.mark_threshold.is_finite() && c.mark_threshold >= 0.0) {
            return invalid(format!(
                "mark_threshold must be >= 0, got {}",
                c.mark_threshold
            ));
        }

        let a = &self.affinity;
        if a.radius == 0 {
            return invalid("radius must be at least 1".to_string());
        }
        if a.radius > MAX_RADIUS {
            return invalid(format!(
                "radius must be at most {MAX_RADIUS}, got {}",
                a.radius
            ));
        }
        if !(a.variance_scale.is_finite() && a.variance_scale > 0.0) {
            return invalid(format!(
                "variance_scale must be > 0, got {}",
                a.variance_scale
            ));
        }
        if !(a.min_variance.is_finite() && a.min_variance > 0.0) {
            return invalid(format!("min_variance must be > 0, got {}", a.min_variance));
        }

        let s = &self.solver;
        if !(s.tolerance.is_finite() && s.tolerance > 0.0) {
            return invalid(format!("tolerance must be > 0, got {}", s.tolerance));
        }
        if s.max_iterations == 0 {
            return invalid("max_iterations must be at least 1".to_string());
        }
        Ok(())
    }
}
