use std::fmt::Write;

use crate::{
    error::{Error, Result},
    kind::OperatorKind,
    operator::{self, Associativity, Operator, Precedence},
    writer::{FormatContext, FormatWriter},
};

use super::{Expr, Rewrite};

/// Prefix or suffix operator: right associative kinds print as
/// `SYMBOL operand`, left associative ones as `operand SYMBOL`.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryOperator {
    pub(crate) kind: OperatorKind,
    pub(crate) expr: Expr,
    pub(crate) precedence: Option<Precedence>,
    pub(crate) associativity: Option<Associativity>,
}

impl UnaryOperator {
    pub(crate) fn new(kind: OperatorKind, expr: Expr) -> Self {
        Self {
            kind,
            expr,
            precedence: None,
            associativity: None,
        }
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = Some(precedence);
        self
    }

    pub fn with_associativity(mut self, associativity: Associativity) -> Self {
        self.associativity = Some(associativity);
        self
    }

    pub fn operand(&self) -> &Expr {
        &self.expr
    }

    fn is_not(&self) -> bool {
        self.kind == OperatorKind::Not
    }

    /// Negating NOT yields its operand, any other kind swaps to its negated
    /// counterpart keeping operand and overrides.
    pub(crate) fn negate(self) -> Expr {
        if self.is_not() {
            return self.expr;
        }
        match self.kind.negated() {
            Some(kind) => Expr::Unary(Box::new(Self { kind, ..self })),
            None => Expr::Unary(Box::new(self)),
        }
    }

    /// `NOT op` collapses into the negation of `op` when it has one. The
    /// check runs on the operand before it is rewritten.
    pub(crate) fn rewrite(mut self) -> Expr {
        if self.is_not() {
            match self.expr.into_negated() {
                Ok(negated) => {
                    tracing::trace!("collapsed NOT into its operand");
                    return negated.rewrite();
                }
                Err(expr) => self.expr = expr,
            }
        }
        self.expr = self.expr.rewrite();
        Expr::Unary(Box::new(self))
    }
}

impl Operator for UnaryOperator {
    fn kind(&self) -> OperatorKind {
        self.kind
    }

    fn custom_precedence(&self) -> Option<Precedence> {
        self.precedence
    }

    fn custom_associativity(&self) -> Option<Associativity> {
        self.associativity
    }

    fn negatable(&self) -> bool {
        self.is_not() || self.kind.negated().is_some()
    }
}

impl FormatWriter for UnaryOperator {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        let associativity = context.associativity(self)?;
        if associativity == Associativity::NonAssociative {
            return Err(Error::NonAssociativeUnary(self.kind));
        }
        let ours = context.precedence(self)?;

        if associativity == Associativity::Right {
            context.write_str(self.kind.symbol())?;
            context.write_char(' ')?;
        }
        self.expr
            .write_operand(context, |theirs| operator::unary_needs_parens(ours, theirs))?;
        if associativity == Associativity::Left {
            context.write_char(' ')?;
            context.write_str(self.kind.symbol())?;
        }
        Ok(())
    }
}
