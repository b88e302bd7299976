use std::fmt::Write;

use crate::{
    error::Result,
    kind::OperatorKind,
    operator::{self, Associativity, Operator, Precedence, Side},
    writer::{FormatContext, FormatWriter},
};

use super::{Expr, Rewrite};

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperator {
    pub(crate) kind: OperatorKind,
    pub(crate) lhs: Expr,
    pub(crate) rhs: Expr,
    pub(crate) precedence: Option<Precedence>,
    pub(crate) associativity: Option<Associativity>,
    pub(crate) glued: bool,
}

impl BinaryOperator {
    pub(crate) fn new(kind: OperatorKind, lhs: Expr, rhs: Expr) -> Self {
        Self {
            kind,
            lhs,
            rhs,
            precedence: None,
            associativity: None,
            glued: kind.is_glued(),
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

    /// Prints the symbol directly between the operands, without spaces.
    pub fn glued(mut self, glued: bool) -> Self {
        self.glued = glued;
        self
    }

    pub fn lhs(&self) -> &Expr {
        &self.lhs
    }

    pub fn rhs(&self) -> &Expr {
        &self.rhs
    }

    pub(crate) fn negate(self) -> Self {
        match self.kind.negated() {
            Some(kind) => Self { kind, ..self },
            None => self,
        }
    }
}

impl Operator for BinaryOperator {
    fn kind(&self) -> OperatorKind {
        self.kind
    }

    fn custom_precedence(&self) -> Option<Precedence> {
        self.precedence
    }

    fn custom_associativity(&self) -> Option<Associativity> {
        self.associativity
    }
}

impl Rewrite for BinaryOperator {
    fn rewrite(self) -> Self {
        Self {
            lhs: self.lhs.rewrite(),
            rhs: self.rhs.rewrite(),
            ..self
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        self.lhs.check_depth(depth)?;
        self.rhs.check_depth(depth)
    }
}

impl FormatWriter for BinaryOperator {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        let associativity = context.associativity(self)?;
        let ours = context.precedence(self)?;

        self.lhs.write_operand(context, |theirs| {
            operator::binary_needs_parens(associativity, ours, theirs, Side::Left)
        })?;
        if self.glued {
            context.write_str(self.kind.symbol())?;
        } else {
            context.write_char(' ')?;
            context.write_str(self.kind.symbol())?;
            context.write_char(' ')?;
        }
        self.rhs.write_operand(context, |theirs| {
            operator::binary_needs_parens(associativity, ours, theirs, Side::Right)
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        SqlType, add, and, col, concat, dialect::Dialect, eq, error::Error, is_null, lit, lt, mul,
        not_eq, or, placeholder, sub, tests::format_writer, typecast,
    };

    use super::*;

    fn prec(value: u16) -> Precedence {
        Precedence::new(value).unwrap()
    }

    #[test]
    fn test_left_associative_chain() {
        let sql = format_writer(sub(sub(col("a"), col("b")), col("c")), Dialect::Postgres);
        assert_eq!("\"a\" - \"b\" - \"c\"", sql);
        let sql = format_writer(sub(col("a"), sub(col("b"), col("c"))), Dialect::Postgres);
        assert_eq!("\"a\" - (\"b\" - \"c\")", sql);
    }

    #[test]
    fn test_right_associative_chain() {
        let pow = |l: Expr, r: Expr| sub(l, r).with_associativity(Associativity::Right);
        let right = pow(col("b").into(), col("c").into());
        let sql = format_writer(pow(col("a").into(), right.into()), Dialect::Postgres);
        assert_eq!("\"a\" - \"b\" - \"c\"", sql);
        let left = pow(col("a").into(), col("b").into());
        let sql = format_writer(pow(left.into(), col("c").into()), Dialect::Postgres);
        assert_eq!("(\"a\" - \"b\") - \"c\"", sql);
    }

    #[test]
    fn test_precedence_ordering() {
        let sql = format_writer(mul(add(col("a"), 1), col("b")), Dialect::Postgres);
        assert_eq!("(\"a\" + 1) * \"b\"", sql);
        let sql = format_writer(add(mul(col("a"), 1), col("b")), Dialect::Postgres);
        assert_eq!("\"a\" * 1 + \"b\"", sql);
    }

    #[test]
    fn test_non_associative_wraps_ties() {
        let sql = format_writer(eq(eq(col("a"), col("b")), lit(true)), Dialect::Postgres);
        assert_eq!("(\"a\" = \"b\") = TRUE", sql);
        let sql = format_writer(eq(lit(true), lt(col("a"), col("b"))), Dialect::Postgres);
        assert_eq!("TRUE = (\"a\" < \"b\")", sql);
        let sql = format_writer(eq(add(col("a"), 1), col("b")), Dialect::Postgres);
        assert_eq!("\"a\" + 1 = \"b\"", sql);
    }

    #[test]
    fn test_and_or_grouping() {
        let expr = and(eq(col("a"), 1), or(eq(col("b"), 2), eq(col("c"), 3)));
        let sql = format_writer(expr, Dialect::Postgres);
        assert_eq!("\"a\" = 1 AND (\"b\" = 2 OR \"c\" = 3)", sql);
        let expr = or(and(col("a"), col("b")), col("c"));
        assert_eq!("\"a\" AND \"b\" OR \"c\"", format_writer(expr, Dialect::Postgres));
    }

    #[test]
    fn test_unary_child_of_binary() {
        let expr = and(is_null(col("a")), is_null(col("b")));
        assert_eq!("\"a\" IS NULL AND \"b\" IS NULL", format_writer(expr, Dialect::Postgres));
        let expr = eq(is_null(col("a")), lit(false));
        assert_eq!("(\"a\" IS NULL) = FALSE", format_writer(expr, Dialect::Postgres));
    }

    #[test]
    fn test_glued_symbol() {
        let expr = concat(typecast(col("id"), SqlType::TEXT), placeholder("suffix"));
        assert_eq!("\"id\"::TEXT || $1", format_writer(expr, Dialect::Postgres));
        let expr = add(col("a"), col("b")).glued(true);
        assert_eq!("\"a\"+\"b\"", format_writer(expr, Dialect::Postgres));
    }

    #[test]
    fn test_override_precedence() {
        let loose = or(col("a"), col("b")).with_precedence(prec(50));
        let sql = format_writer(and(loose, col("c")), Dialect::Postgres);
        assert_eq!("\"a\" OR \"b\" AND \"c\"", sql);
    }

    #[test]
    fn test_negate_swaps_kind_only() {
        let op = eq(col("a"), col("b")).with_precedence(prec(3)).glued(true);
        let negated = op.clone().negate();
        assert_eq!(OperatorKind::NotEq, negated.kind);
        assert_eq!(op.lhs, negated.lhs);
        assert_eq!(op.rhs, negated.rhs);
        assert_eq!(Some(prec(3)), negated.precedence);
        assert!(negated.glued);
        assert_eq!(op, negated.negate());
        assert_eq!(not_eq(col("x"), 1).negate(), eq(col("x"), 1));
    }

    #[test]
    fn test_child_without_precedence_fails() {
        struct NoArithmetic;

        impl crate::dialect::SqlDialect for NoArithmetic {
            fn identifier_quote(&self) -> Option<char> {
                None
            }

            fn precedence(&self, kind: OperatorKind) -> Option<Precedence> {
                match kind {
                    OperatorKind::Eq => Precedence::new(5),
                    _ => None,
                }
            }

            fn associativity(&self, _kind: OperatorKind) -> Option<Associativity> {
                Some(Associativity::NonAssociative)
            }

            fn write_placeholder(
                &self,
                writer: &mut dyn std::fmt::Write,
                _name: &str,
                _position: usize,
            ) -> std::fmt::Result {
                writer.write_char('?')
            }
        }

        let expr = eq(add(col("a"), 1), col("b"));
        let result = crate::to_sql(&expr, &NoArithmetic);
        assert_eq!(Err(Error::PrecedenceUndefined(OperatorKind::Add)), result);
        let result = crate::to_sql(&eq(col("a"), col("b")), &NoArithmetic).unwrap();
        assert_eq!("a = b", result.text);
    }
}
