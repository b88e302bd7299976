use std::fmt::Write;

use crate::{
    error::{Error, Result},
    writer::{FormatContext, FormatWriter},
};

use super::{Expr, IntoExpr, Rewrite};

/// Parenthesized, comma separated list such as the right side of `IN`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple(pub(crate) Vec<Expr>);

impl Tuple {
    pub fn new(exprs: Vec<Expr>) -> Self {
        Self(exprs)
    }

    pub fn push<E: IntoExpr>(&mut self, expr: E) -> &mut Self {
        self.0.push(expr.into_expr());
        self
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<E> FromIterator<E> for Tuple
where
    E: IntoExpr,
{
    fn from_iter<T: IntoIterator<Item = E>>(iter: T) -> Self {
        Self(iter.into_iter().map(IntoExpr::into_expr).collect())
    }
}

impl Rewrite for Tuple {
    fn rewrite(self) -> Self {
        Self(self.0.into_iter().map(Rewrite::rewrite).collect())
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        self.0.iter().try_for_each(|expr| expr.check_depth(depth))
    }
}

impl FormatWriter for Tuple {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        if self.0.is_empty() {
            return Err(Error::UnknownStructuralVariant("tuple"));
        }
        context.write_char('(')?;
        context.write_comma_separated(&self.0)?;
        context.write_char(')')
    }
}
