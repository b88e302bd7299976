use std::fmt::Write;

use crate::{
    builder::Select,
    error::Result,
    expr::{Expr, IntoExpr, Rewrite},
    ident::{Ident, IntoIdent, Table},
    writer::{self, FormatContext, FormatWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Inner,
    Left,
    Right,
    Full,
}

impl FormatWriter for JoinType {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            JoinType::Inner => context.write_str("JOIN"),
            JoinType::Left => context.write_str("LEFT JOIN"),
            JoinType::Right => context.write_str("RIGHT JOIN"),
            JoinType::Full => context.write_str("FULL JOIN"),
        }
    }
}

/// Anything that can follow `FROM`.
#[derive(Debug, Clone, PartialEq)]
pub enum FromItem {
    Table(Table),
    Subquery(Box<Select>, Ident),
    Join(Box<JoinClause>),
}

impl FromItem {
    /// `(SELECT ...) AS alias`
    pub fn subquery<A: IntoIdent>(select: Select, alias: A) -> Self {
        FromItem::Subquery(Box::new(select), alias.into_ident())
    }
}

impl Rewrite for FromItem {
    fn rewrite(self) -> Self {
        match self {
            FromItem::Table(table) => FromItem::Table(table),
            FromItem::Subquery(select, alias) => {
                FromItem::Subquery(Box::new((*select).rewrite()), alias)
            }
            FromItem::Join(join) => FromItem::Join(Box::new((*join).rewrite())),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        let depth = writer::deeper(depth)?;
        match self {
            FromItem::Table(_) => Ok(()),
            FromItem::Subquery(select, _) => select.check_depth(depth),
            FromItem::Join(join) => join.check_depth(depth),
        }
    }
}

impl FormatWriter for FromItem {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.nested(|context| match self {
            FromItem::Table(table) => table.format_writer(context),
            FromItem::Subquery(select, alias) => {
                context.write_paren(select)?;
                context.write_alias(Some(alias.as_str()))
            }
            FromItem::Join(join) => join.format_writer(context),
        })
    }
}

/// `left JOIN right ON condition`; chains nest on the left.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    ty: JoinType,
    left: FromItem,
    right: FromItem,
    on: Expr,
}

impl JoinClause {
    pub fn new(ty: JoinType, left: FromItem, right: FromItem, on: Expr) -> Self {
        Self { ty, left, right, on }
    }

    pub fn ty(&self) -> JoinType {
        self.ty
    }
}

impl Rewrite for JoinClause {
    fn rewrite(self) -> Self {
        Self {
            ty: self.ty,
            left: self.left.rewrite(),
            right: self.right.rewrite(),
            on: self.on.rewrite(),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        self.left.check_depth(depth)?;
        self.right.check_depth(depth)?;
        self.on.check_depth(depth)
    }
}

impl FormatWriter for JoinClause {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.left.format_writer(context)?;
        context.write_char(' ')?;
        self.ty.format_writer(context)?;
        context.write_char(' ')?;
        self.right.format_writer(context)?;
        context.write_str(" ON ")?;
        self.on.format_writer(context)
    }
}

pub trait IntoFromItem: Sized {
    fn into_from_item(self) -> FromItem;

    fn join<R: IntoFromItem, E: IntoExpr>(self, right: R, on: E) -> JoinClause {
        self.join_as(JoinType::Inner, right, on)
    }

    fn left_join<R: IntoFromItem, E: IntoExpr>(self, right: R, on: E) -> JoinClause {
        self.join_as(JoinType::Left, right, on)
    }

    fn right_join<R: IntoFromItem, E: IntoExpr>(self, right: R, on: E) -> JoinClause {
        self.join_as(JoinType::Right, right, on)
    }

    fn full_join<R: IntoFromItem, E: IntoExpr>(self, right: R, on: E) -> JoinClause {
        self.join_as(JoinType::Full, right, on)
    }

    fn join_as<R: IntoFromItem, E: IntoExpr>(self, ty: JoinType, right: R, on: E) -> JoinClause {
        JoinClause::new(ty, self.into_from_item(), right.into_from_item(), on.into_expr())
    }
}

impl<T> IntoFromItem for T
where
    T: Into<FromItem>,
{
    fn into_from_item(self) -> FromItem {
        self.into()
    }
}

impl From<Table> for FromItem {
    fn from(value: Table) -> Self {
        FromItem::Table(value)
    }
}

impl From<JoinClause> for FromItem {
    fn from(value: JoinClause) -> Self {
        FromItem::Join(Box::new(value))
    }
}

impl From<&str> for FromItem {
    fn from(value: &str) -> Self {
        FromItem::Table(Table::new(value))
    }
}
