use lsys_catalog::CatalogError;
use lsys_core::LsysError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("fractal error: {0}")]
    Lsys(#[from] LsysError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl CliError {
    /// 2 for bad input, 3 for a fractal that cannot be drawn, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } | Self::Catalog(CatalogError::UnknownFractal { .. }) => 2,
            Self::Lsys(_) | Self::Catalog(CatalogError::Core(_)) => 3,
            Self::Io(_) | Self::Json(_) => 1,
        }
    }

    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }
}
