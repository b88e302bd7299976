use std::fmt::Write;

use crate::{
    error::{Error, Result},
    kind::OperatorKind,
    operator::{self, Associativity, Operator, Precedence},
    writer::{FormatContext, FormatWriter},
};

use super::{Expr, Rewrite};

/// `first SYMBOL second SYMBOL2 third`, such as `x BETWEEN a AND b`.
#[derive(Debug, Clone, PartialEq)]
pub struct TernaryOperator {
    pub(crate) kind: OperatorKind,
    pub(crate) first: Expr,
    pub(crate) second: Expr,
    pub(crate) third: Expr,
    pub(crate) precedence: Option<Precedence>,
}

impl TernaryOperator {
    pub(crate) fn new(kind: OperatorKind, first: Expr, second: Expr, third: Expr) -> Self {
        Self {
            kind,
            first,
            second,
            third,
            precedence: None,
        }
    }

    pub fn with_precedence(mut self, precedence: Precedence) -> Self {
        self.precedence = Some(precedence);
        self
    }

    pub(crate) fn negate(self) -> Self {
        match self.kind.negated() {
            Some(kind) => Self { kind, ..self },
            None => self,
        }
    }
}

impl Operator for TernaryOperator {
    fn kind(&self) -> OperatorKind {
        self.kind
    }

    fn custom_precedence(&self) -> Option<Precedence> {
        self.precedence
    }

    // never consulted when printing
    fn custom_associativity(&self) -> Option<Associativity> {
        None
    }
}

impl Rewrite for TernaryOperator {
    fn rewrite(self) -> Self {
        Self {
            first: self.first.rewrite(),
            second: self.second.rewrite(),
            third: self.third.rewrite(),
            ..self
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        self.first.check_depth(depth)?;
        self.second.check_depth(depth)?;
        self.third.check_depth(depth)
    }
}

impl FormatWriter for TernaryOperator {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        let ours = context.precedence(self)?;
        let Some(second_symbol) = self.kind.second_symbol() else {
            return Err(Error::UnknownStructuralVariant("ternary operator"));
        };
        let needs_parens = |theirs| operator::ternary_needs_parens(ours, theirs);

        self.first.write_operand(context, needs_parens)?;
        context.write_char(' ')?;
        context.write_str(self.kind.symbol())?;
        context.write_char(' ')?;
        self.second.write_operand(context, needs_parens)?;
        context.write_char(' ')?;
        context.write_str(second_symbol)?;
        context.write_char(' ')?;
        self.third.write_operand(context, needs_parens)
    }
}
