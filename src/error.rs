use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Transform failed: {0}")]
    TransformFailed(String),

    /// Mirrors PROJ error -18 ("non-convergent inverse phi2").
    #[error("Inverse latitude did not converge after {iterations} iterations")]
    NonConvergence { iterations: usize },
}
