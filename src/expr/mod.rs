use std::fmt::Write;

use crate::{
    bind::Placeholder,
    builder::Select,
    error::Result,
    ident::Column,
    operator::{Operator, Precedence},
    raw::Raw,
    writer::{self, FormatContext, FormatWriter},
};

pub mod binary;
pub mod case;
pub mod cast;
pub mod fncall;
pub mod literal;
pub mod order;
pub mod ternary;
pub mod tuple;
pub mod unary;

pub use binary::BinaryOperator;
pub use case::CaseExpr;
pub use cast::{CastExpr, SqlType};
pub use fncall::FuncCall;
pub use literal::Literal;
pub use order::{Nulls, OrderItem, Ordering};
pub use ternary::TernaryOperator;
pub use tuple::Tuple;
pub use unary::UnaryOperator;

/// Canonicalizing pass run once before rendering.
///
/// Consumes the tree and returns the rewritten one. Rewriting an already
/// rewritten tree returns it unchanged. The pass recurses without a limit,
/// run [`Rewrite::check_depth`] first on untrusted trees (as
/// [`compile`](crate::compile) does).
pub trait Rewrite: Sized {
    fn rewrite(self) -> Self;

    /// Fails with `DepthLimitExceeded` when the expressions below `depth`
    /// nest past [`MAX_DEPTH`](crate::MAX_DEPTH). Stops descending at the
    /// limit.
    fn check_depth(&self, depth: usize) -> Result<()>;
}

/// Any SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Raw(Raw),
    Type(SqlType),
    Column(Column),
    Placeholder(Placeholder),
    Unary(Box<UnaryOperator>),
    Binary(Box<BinaryOperator>),
    Ternary(Box<TernaryOperator>),
    Tuple(Tuple),
    Case(Box<CaseExpr>),
    Cast(Box<CastExpr>),
    Func(FuncCall),
    Subquery(Box<Select>),
}

impl Expr {
    pub(crate) fn as_operator(&self) -> Option<&dyn Operator> {
        match self {
            Expr::Unary(op) => Some(&**op),
            Expr::Binary(op) => Some(&**op),
            Expr::Ternary(op) => Some(&**op),
            _ => None,
        }
    }

    /// The negated operator, or the untouched expression when it has none.
    pub(crate) fn into_negated(self) -> std::result::Result<Expr, Expr> {
        match self {
            Expr::Unary(op) if op.negatable() => Ok((*op).negate()),
            Expr::Binary(op) if op.negatable() => Ok(Expr::Binary(Box::new((*op).negate()))),
            Expr::Ternary(op) if op.negatable() => Ok(Expr::Ternary(Box::new((*op).negate()))),
            other => Err(other),
        }
    }

    /// Writes this expression as the operand of an operator, wrapped in
    /// parentheses when it is itself an operator and `needs_parens` holds
    /// for its resolved precedence. Negative numbers are always wrapped so
    /// their sign cannot bind to a neighbouring operator.
    pub(crate) fn write_operand<W, F>(
        &self,
        context: &mut FormatContext<'_, W>,
        needs_parens: F,
    ) -> Result<()>
    where
        W: Write,
        F: FnOnce(Precedence) -> bool,
    {
        let Some(op) = self.as_operator() else {
            return match self {
                Expr::Literal(literal) if literal.is_negative() => context.write_paren(self),
                _ => self.format_writer(context),
            };
        };
        let theirs = context.precedence(op)?;
        if needs_parens(theirs) {
            context.write_paren(self)
        } else {
            self.format_writer(context)
        }
    }
}

impl Rewrite for Expr {
    fn rewrite(self) -> Self {
        match self {
            Expr::Unary(op) => (*op).rewrite(),
            Expr::Binary(op) => Expr::Binary(Box::new((*op).rewrite())),
            Expr::Ternary(op) => Expr::Ternary(Box::new((*op).rewrite())),
            Expr::Tuple(tuple) => Expr::Tuple(tuple.rewrite()),
            Expr::Case(case) => Expr::Case(Box::new((*case).rewrite())),
            Expr::Cast(cast) => Expr::Cast(Box::new((*cast).rewrite())),
            Expr::Func(func) => Expr::Func(func.rewrite()),
            Expr::Subquery(select) => Expr::Subquery(Box::new((*select).rewrite())),
            leaf @ (Expr::Literal(_)
            | Expr::Raw(_)
            | Expr::Type(_)
            | Expr::Column(_)
            | Expr::Placeholder(_)) => leaf,
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        let depth = writer::deeper(depth)?;
        match self {
            Expr::Unary(op) => op.expr.check_depth(depth),
            Expr::Binary(op) => op.check_depth(depth),
            Expr::Ternary(op) => op.check_depth(depth),
            Expr::Tuple(tuple) => tuple.check_depth(depth),
            Expr::Case(case) => case.check_depth(depth),
            Expr::Cast(cast) => cast.check_depth(depth),
            Expr::Func(func) => func.check_depth(depth),
            Expr::Subquery(select) => select.check_depth(depth),
            Expr::Literal(_)
            | Expr::Raw(_)
            | Expr::Type(_)
            | Expr::Column(_)
            | Expr::Placeholder(_) => Ok(()),
        }
    }
}

impl FormatWriter for Expr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.nested(|context| match self {
            Expr::Literal(literal) => literal.format_writer(context),
            Expr::Raw(raw) => raw.format_writer(context),
            Expr::Type(ty) => ty.format_writer(context),
            Expr::Column(column) => column.format_writer(context),
            Expr::Placeholder(placeholder) => placeholder.format_writer(context),
            Expr::Unary(op) => op.format_writer(context),
            Expr::Binary(op) => op.format_writer(context),
            Expr::Ternary(op) => op.format_writer(context),
            Expr::Tuple(tuple) => tuple.format_writer(context),
            Expr::Case(case) => case.format_writer(context),
            Expr::Cast(cast) => cast.format_writer(context),
            Expr::Func(func) => func.format_writer(context),
            Expr::Subquery(select) => context.write_paren(select),
        })
    }
}

pub trait IntoExpr {
    fn into_expr(self) -> Expr;
}

impl<T> IntoExpr for T
where
    T: Into<Expr>,
{
    fn into_expr(self) -> Expr {
        self.into()
    }
}

impl From<Literal> for Expr {
    fn from(value: Literal) -> Self {
        Expr::Literal(value)
    }
}

impl From<Raw> for Expr {
    fn from(value: Raw) -> Self {
        Expr::Raw(value)
    }
}

impl From<SqlType> for Expr {
    fn from(value: SqlType) -> Self {
        Expr::Type(value)
    }
}

impl From<Column> for Expr {
    fn from(value: Column) -> Self {
        Expr::Column(value)
    }
}

impl From<Placeholder> for Expr {
    fn from(value: Placeholder) -> Self {
        Expr::Placeholder(value)
    }
}

impl From<UnaryOperator> for Expr {
    fn from(value: UnaryOperator) -> Self {
        Expr::Unary(Box::new(value))
    }
}

impl From<BinaryOperator> for Expr {
    fn from(value: BinaryOperator) -> Self {
        Expr::Binary(Box::new(value))
    }
}

impl From<TernaryOperator> for Expr {
    fn from(value: TernaryOperator) -> Self {
        Expr::Ternary(Box::new(value))
    }
}

impl From<Tuple> for Expr {
    fn from(value: Tuple) -> Self {
        Expr::Tuple(value)
    }
}

impl From<CaseExpr> for Expr {
    fn from(value: CaseExpr) -> Self {
        Expr::Case(Box::new(value))
    }
}

impl From<CastExpr> for Expr {
    fn from(value: CastExpr) -> Self {
        Expr::Cast(Box::new(value))
    }
}

impl From<FuncCall> for Expr {
    fn from(value: FuncCall) -> Self {
        Expr::Func(value)
    }
}

impl From<Select> for Expr {
    fn from(value: Select) -> Self {
        Expr::Subquery(Box::new(value))
    }
}

macro_rules! literal_into_expr {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for Expr {
                fn from(value: $ty) -> Self {
                    Expr::Literal(Literal::from(value))
                }
            }
        )+
    };
}

literal_into_expr!(bool, i32, i64, u32, f64);

impl<T> From<Option<T>> for Expr
where
    T: Into<Expr>,
{
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => value.into(),
            None => Expr::Literal(Literal::Null),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        and, col, dialect::Dialect, eq, is_not_null, is_null, lit, not, or, tests::format_writer,
    };

    use super::*;

    #[test]
    fn test_into_negated() {
        let negated = Expr::from(is_null(col("a"))).into_negated().unwrap();
        assert_eq!(Expr::from(is_not_null(col("a"))), negated);

        let not_negatable = Expr::from(and(col("a"), col("b")));
        assert_eq!(Err(not_negatable.clone()), not_negatable.into_negated());

        assert!(Expr::from(col("a")).into_negated().is_err());
    }

    #[test]
    fn test_not_unwraps_on_negate() {
        let inner = Expr::from(or(col("a"), col("b")));
        let negated = Expr::from(not(inner.clone())).into_negated().unwrap();
        assert_eq!(inner, negated);
    }

    #[test]
    fn test_rewrite_reaches_every_child() {
        let expr = Expr::from(eq(
            Tuple::new(vec![not(is_null(col("a"))).into_expr(), lit(1).into_expr()]),
            Some(2),
        ));
        let sql = format_writer(expr.rewrite(), Dialect::Postgres);
        assert_eq!("(\"a\" IS NOT NULL,1) = 2", sql);
    }

    #[test]
    fn test_negative_operands_are_wrapped() {
        use crate::{SqlType, cast, sub, typecast};

        let sql = format_writer(typecast(lit(-1), SqlType::TEXT), Dialect::Postgres);
        assert_eq!("(-1)::TEXT", sql);
        let sql = format_writer(sub(col("a"), lit(-2.5)), Dialect::Postgres);
        assert_eq!("\"a\" - (-2.5)", sql);
        let sql = format_writer(eq(col("a"), 1), Dialect::Postgres);
        assert_eq!("\"a\" = 1", sql);
        // not an operand
        let sql = format_writer(cast(lit(-1), SqlType::TEXT), Dialect::Postgres);
        assert_eq!("CAST(-1 AS TEXT)", sql);
    }

    #[test]
    fn test_option_into_null() {
        let none: Option<i64> = None;
        let sql = format_writer(eq(col("a"), none), Dialect::Postgres);
        assert_eq!("\"a\" = NULL", sql);
    }
}
