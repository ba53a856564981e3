use thiserror::Error;

#[derive(Error, Debug)]
pub enum OrreryError {
    #[error("Invalid orbital elements: {0}")]
    InvalidElements(String),

    #[error("Non-finite value produced by the {0} stage")]
    NonFinite(&'static str),

    #[error("Hyperbolic Kepler solver did not converge after {iterations} iterations (residual {residual:e})")]
    NonConvergence { iterations: usize, residual: f64 },

    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Body already present in the catalog: {0}")]
    DuplicateBody(String),

    #[error("Invalid sampling grid: {0}")]
    InvalidSamplingGrid(String),

    #[error("Invalid solver parameters: {0}")]
    InvalidSolverParams(String),

    #[error("Unable to perform file operation: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unable to parse the body catalog: {0}")]
    CatalogParse(#[from] serde_json::Error),
}

impl PartialEq for OrreryError {
    fn eq(&self, other: &Self) -> bool {
        use OrreryError::*;
        match (self, other) {
            (InvalidElements(a), InvalidElements(b)) => a == b,
            (NonFinite(a), NonFinite(b)) => a == b,
            (
                NonConvergence {
                    iterations: i1,
                    residual: r1,
                },
                NonConvergence {
                    iterations: i2,
                    residual: r2,
                },
            ) => i1 == i2 && r1 == r2,
            (UnknownBody(a), UnknownBody(b)) => a == b,
            (DuplicateBody(a), DuplicateBody(b)) => a == b,
            (InvalidSamplingGrid(a), InvalidSamplingGrid(b)) => a == b,
            (InvalidSolverParams(a), InvalidSolverParams(b)) => a == b,

            // foreign errors are not comparable: same variant is enough
            (Io(_), Io(_)) => true,
            (CatalogParse(_), CatalogParse(_)) => true,

            _ => false,
        }
    }
}
