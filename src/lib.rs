//! Composable SQL expressions and SELECT statements rendered to
//! parameterized text, with parentheses placed from operator precedence.

mod bind;
mod builder;
mod dialect;
mod error;
mod expr;
mod ident;
mod join;
mod kind;
mod operator;
mod raw;
mod writer;

use smol_str::SmolStr;

pub use bind::{Bindings, Placeholder, generate_placeholders, placeholder_tuple};
pub use builder::{Select, SelectItem};
pub use dialect::{
    Dialect, HasDialect, MySql, Postgres, SqlDialect, Sqlite, default_associativity,
    default_precedence,
};
pub use error::{Error, Result};
pub use expr::{
    BinaryOperator, CaseExpr, CastExpr, Expr, FuncCall, IntoExpr, Literal, Nulls, OrderItem,
    Ordering, Rewrite, SqlType, TernaryOperator, Tuple, UnaryOperator,
};
pub use ident::{Column, Ident, IntoIdent, Table};
pub use join::{FromItem, IntoFromItem, JoinClause, JoinType};
pub use kind::*;
pub use operator::{Arity, Associativity, Operator, Precedence};
pub use raw::{IntoRaw, Raw};
pub use writer::{FormatContext, FormatWriter, MAX_DEPTH, Sql, compile, to_sql};

pub fn ident_static(value: &'static str) -> Ident {
    Ident::new_static(value)
}

pub fn ident(value: &str) -> Ident {
    Ident::new(value)
}

/// Column reference, dotted names are qualified: `col("u.id")`.
pub fn col<T: IntoIdent>(name: T) -> Column {
    Column::new(name)
}

pub fn table<T: IntoIdent>(name: T) -> Table {
    Table::new(name)
}

pub fn lit<T: Into<Literal>>(value: T) -> Literal {
    value.into()
}

pub fn raw<T: IntoRaw>(value: T) -> Raw {
    value.into_raw()
}

pub fn placeholder<T: Into<SmolStr>>(name: T) -> Placeholder {
    Placeholder::new(name)
}

pub fn tuple<I>(exprs: I) -> Tuple
where
    I: IntoIterator,
    I::Item: IntoExpr,
{
    exprs.into_iter().collect()
}

pub fn case_when<C, R>(condition: C, result: R) -> CaseExpr
where
    C: IntoExpr,
    R: IntoExpr,
{
    CaseExpr::default().when(condition, result)
}

pub fn cast<E: IntoExpr>(expr: E, ty: SqlType) -> CastExpr {
    CastExpr::new(expr.into_expr(), ty)
}

/// Function call, arguments are added with [`FuncCall::arg`].
///
/// # Panics
///
/// When `name` is not a plain, optionally dotted, identifier.
pub fn func<T: Into<SmolStr>>(name: T) -> FuncCall {
    FuncCall::new(name)
}

/// Function printed without parentheses, like `CURRENT_DATE`.
///
/// # Panics
///
/// Same as [`func`].
pub fn func0<T: Into<SmolStr>>(name: T) -> FuncCall {
    FuncCall::bare(name)
}

pub fn asc<E: IntoExpr>(expr: E) -> OrderItem {
    OrderItem::new(expr.into_expr(), Ordering::Asc)
}

pub fn desc<E: IntoExpr>(expr: E) -> OrderItem {
    OrderItem::new(expr.into_expr(), Ordering::Desc)
}

/// Builds a nested statement, for `IN (SELECT ..)` or a FROM subquery.
pub fn subquery<F>(build: F) -> Select
where
    F: FnOnce(&mut Select),
{
    let mut select = Select::new();
    build(&mut select);
    select
}
