use thiserror::Error;

use crate::grammar::Symbol;

pub type Result<T> = std::result::Result<T, LsysError>;

/// Errors raised by grammar construction, projection and interpretation.
///
/// Every variant except [`LsysError::SessionFailed`] describes a malformed
/// fractal definition. None of them are transient: the same grammar and depth
/// always fail the same way, so callers should surface them instead of
/// retrying.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LsysError {
    #[error("symbol {symbol:?} has no interpretation")]
    UnknownSymbol { symbol: Symbol },

    #[error("non-terminal {symbol:?} is left unexpanded at depth {depth} but has no interpretation")]
    Unresolved { symbol: Symbol, depth: u32 },

    #[error("command for symbol {symbol:?} draws more than once")]
    MultipleDraws { symbol: Symbol },

    #[error("pop with an empty state stack (drawing step {step})")]
    UnbalancedPop { step: u64 },

    #[error("step projection overflows at depth {depth}")]
    ProjectionOverflow { depth: u32 },

    #[error("rendering session already failed")]
    SessionFailed,
}

impl LsysError {
    /// True for errors caused by the fractal definition itself.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Self::SessionFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_symbol() {
        let err = LsysError::UnknownSymbol { symbol: 'Q' };
        assert_eq!(err.to_string(), "symbol 'Q' has no interpretation");
    }

    #[test]
    fn session_failed_is_not_configuration() {
        assert!(!LsysError::SessionFailed.is_configuration());
        assert!(LsysError::UnbalancedPop { step: 3 }.is_configuration());
        assert!(LsysError::ProjectionOverflow { depth: 90 }.is_configuration());
    }
}
