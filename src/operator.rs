use std::num::NonZeroU16;

use crate::{
    dialect::SqlDialect,
    error::{Error, Result},
    kind::OperatorKind,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    Unary,
    Binary,
    Ternary,
}

/// Binding strength of an operator, higher binds tighter.
///
/// Zero is not a precedence: an operator without its own value falls back to
/// the dialect table, so "unset" is spelled `Option::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Precedence(NonZeroU16);

impl Precedence {
    pub const fn new(value: u16) -> Option<Self> {
        match NonZeroU16::new(value) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    NonAssociative,
}

/// Capability shared by the unary, binary and ternary operator nodes.
pub trait Operator {
    fn kind(&self) -> OperatorKind;

    /// Per-instance override, consulted before the dialect table.
    fn custom_precedence(&self) -> Option<Precedence>;

    fn custom_associativity(&self) -> Option<Associativity>;

    fn negatable(&self) -> bool {
        self.kind().negated().is_some()
    }
}

pub(crate) fn resolve_precedence(
    op: &dyn Operator,
    dialect: &dyn SqlDialect,
) -> Result<Precedence> {
    op.custom_precedence()
        .or_else(|| dialect.precedence(op.kind()))
        .ok_or(Error::PrecedenceUndefined(op.kind()))
}

pub(crate) fn resolve_associativity(
    op: &dyn Operator,
    dialect: &dyn SqlDialect,
) -> Result<Associativity> {
    op.custom_associativity()
        .or_else(|| dialect.associativity(op.kind()))
        .ok_or(Error::AssociativityUndefined(op.kind()))
}

/// Side of a binary operator a child sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Left,
    Right,
}

/// Operand of a unary operator only needs wrapping when it binds looser.
pub(crate) fn unary_needs_parens(own: Precedence, child: Precedence) -> bool {
    child < own
}

/// A non-associative operator wraps any child of equal or lower precedence.
/// Otherwise a tie only forces parentheses on the side opposite the
/// operator's associativity.
pub(crate) fn binary_needs_parens(
    assoc: Associativity,
    own: Precedence,
    child: Precedence,
    side: Side,
) -> bool {
    let tie_break = match side {
        Side::Left => Associativity::Right,
        Side::Right => Associativity::Left,
    };
    match assoc {
        Associativity::NonAssociative => child <= own,
        _ => child < own || (child == own && assoc == tie_break),
    }
}

/// Ternary operators have no associativity to break a tie with.
pub(crate) fn ternary_needs_parens(own: Precedence, child: Precedence) -> bool {
    child <= own
}
