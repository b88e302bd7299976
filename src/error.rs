use smol_str::SmolStr;
use thiserror::Error;

use crate::kind::OperatorKind;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while rendering a tree or preparing placeholders.
///
/// Rendering stops at the first error; whatever was written to the output
/// before it is not meaningful.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no precedence defined for operator {0:?}")]
    PrecedenceUndefined(OperatorKind),

    #[error("no associativity defined for operator {0:?}")]
    AssociativityUndefined(OperatorKind),

    #[error("unary operator {0:?} cannot be non-associative")]
    NonAssociativeUnary(OperatorKind),

    #[error("{0} has none of its expected parts")]
    UnknownStructuralVariant(&'static str),

    #[error("placeholder request of zero length")]
    ZeroLengthPlaceholderRequest,

    #[error("unbound placeholder: {0}")]
    UnboundPlaceholder(SmolStr),

    #[error("float literal is NaN or infinite")]
    NonFiniteFloat,

    #[error("expression nested deeper than {0} levels")]
    DepthLimitExceeded(usize),

    #[error("formatter error")]
    Format(#[from] std::fmt::Error),
}
