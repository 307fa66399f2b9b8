use crate::dimension::Dimension;

pub type Result<T, E = UnitError> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    #[error("{context}: {lhs} and {rhs}")]
    DimensionMismatch {
        lhs: Dimension,
        rhs: Dimension,
        context: &'static str,
    },
    #[error("Unsupported operand types for {op}: {lhs} and {rhs}")]
    UnsupportedOperands {
        op: &'static str,
        lhs: &'static str,
        rhs: &'static str,
    },
    #[error("No unit with symbol '{symbol}'")]
    NotFound { symbol: String },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Cannot {op} units with a nonzero offset")]
    AffineUnsupported { op: &'static str },
}

impl UnitError {
    /// Fails with [`UnitError::DimensionMismatch`] unless both dimensions are equal.
    pub(crate) fn check_dimensions(
        lhs: Dimension,
        rhs: Dimension,
        context: &'static str,
    ) -> Result<()> {
        if lhs != rhs {
            return Err(UnitError::DimensionMismatch { lhs, rhs, context });
        }
        Ok(())
    }
}
