use std::fmt::Write;

use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

use super::{Expr, Rewrite};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Ordering {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nulls {
    First,
    Last,
}

/// One `ORDER BY` entry.
///
/// Only non default null placement is printed: `NULLS LAST` after
/// `DESC`, `NULLS FIRST` after an ascending key.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    expr: Expr,
    ordering: Ordering,
    nulls: Option<Nulls>,
}

impl OrderItem {
    pub fn new(expr: Expr, ordering: Ordering) -> Self {
        Self {
            expr,
            ordering,
            nulls: None,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls = Some(Nulls::First);
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls = Some(Nulls::Last);
        self
    }

    pub fn ordering(&self) -> Ordering {
        self.ordering
    }
}

impl Rewrite for OrderItem {
    fn rewrite(self) -> Self {
        Self {
            expr: self.expr.rewrite(),
            ..self
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        self.expr.check_depth(depth)
    }
}

impl FormatWriter for OrderItem {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.expr.format_writer(context)?;
        match (self.ordering, self.nulls) {
            (Ordering::Desc, Some(Nulls::Last)) => context.write_str(" DESC NULLS LAST"),
            (Ordering::Desc, _) => context.write_str(" DESC"),
            (Ordering::Asc, Some(Nulls::First)) => context.write_str(" NULLS FIRST"),
            (Ordering::Asc, _) => Ok(()),
        }
    }
}
