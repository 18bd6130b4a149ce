use lsys_core::LsysError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("no fractal named {slug:?}")]
    UnknownFractal { slug: String },

    #[error(transparent)]
    Core(#[from] LsysError),
}

impl CatalogError {
    pub fn unknown(slug: impl Into<String>) -> Self {
        Self::UnknownFractal { slug: slug.into() }
    }
}
