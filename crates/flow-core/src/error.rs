use thiserror::Error;

/// Which registry rejected a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryKind {
    Source(usize),
    Output,
}

impl std::fmt::Display for RegistryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(i) => write!(f, "source {i}"),
            Self::Output => f.write_str("output"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FlowError {
    /// Tuning values that cannot drive the engine.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A registry is already holding its maximum number of live particles.
    #[error("{registry} registry at capacity ({cap})")]
    CapacityExceeded { registry: RegistryKind, cap: usize },

    #[error("unknown data source {0}")]
    UnknownSource(usize),

    /// Paths have not been computed yet (no viewport seen).
    #[error("path geometry not available")]
    MissingGeometry,
}

pub type FlowResult<T> = Result<T, FlowError>;
