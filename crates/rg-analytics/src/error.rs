//! Analysis error types.

use thiserror::Error;

/// Errors from analysis computations.
///
/// All of these are recoverable by policy: callers fold them into a report
/// error field or an empty result instead of aborting a build.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsError {
    /// Eigenvector power iteration did not converge.
    #[error("eigenvector centrality failed to converge within {iterations} iterations")]
    Convergence {
        /// Iteration budget that was exhausted.
        iterations: usize,
    },
}
