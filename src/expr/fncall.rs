use std::fmt::Write;

use once_cell::sync::Lazy;
use regex::Regex;
use smol_str::SmolStr;

use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

use super::{Expr, IntoExpr, Rewrite};

static FUNC_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_.]*$").unwrap());

fn check_name(name: &str) {
    if !FUNC_NAME.is_match(name) {
        panic!("illegal function name: {name}");
    }
}

/// `name(arg,...)`, or a bare `name` for niladic calls like
/// `CURRENT_TIMESTAMP`.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncCall {
    name: SmolStr,
    args: Vec<Expr>,
    bare: bool,
}

impl FuncCall {
    /// # Panics
    ///
    /// When `name` is not a plain, optionally dotted, identifier.
    pub fn new<T>(name: T) -> Self
    where
        T: Into<SmolStr>,
    {
        let name = name.into();
        check_name(&name);
        Self {
            name,
            args: Vec::new(),
            bare: false,
        }
    }

    /// Like [`FuncCall::new`], printed without parentheses while it has no
    /// arguments.
    pub fn bare<T>(name: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self {
            bare: true,
            ..Self::new(name)
        }
    }

    pub fn arg<E: IntoExpr>(mut self, arg: E) -> Self {
        self.args.push(arg.into_expr());
        self
    }

    pub fn args<I>(mut self, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.args.extend(args.into_iter().map(IntoExpr::into_expr));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Rewrite for FuncCall {
    fn rewrite(self) -> Self {
        Self {
            args: self.args.into_iter().map(Rewrite::rewrite).collect(),
            ..self
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        self.args.iter().try_for_each(|arg| arg.check_depth(depth))
    }
}

impl FormatWriter for FuncCall {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_str(&self.name)?;
        if self.args.is_empty() && self.bare {
            return Ok(());
        }
        context.write_char('(')?;
        context.write_comma_separated(&self.args)?;
        context.write_char(')')
    }
}

#[cfg(test)]
mod tests {
    use crate::{col, dialect::Dialect, func, func0, lit, not, is_null, tests::format_writer};

    use super::*;

    #[test]
    fn test_call() {
        let sql = format_writer(func("coalesce").arg(col("a")).arg(0), Dialect::Postgres);
        assert_eq!("coalesce(\"a\",0)", sql);
        let sql = format_writer(func("pg_catalog.now"), Dialect::Postgres);
        assert_eq!("pg_catalog.now()", sql);
        let sql = format_writer(func0("CURRENT_TIMESTAMP"), Dialect::Postgres);
        assert_eq!("CURRENT_TIMESTAMP", sql);
    }

    #[test]
    fn test_args_are_rewritten() {
        let call = func("count").args([not(is_null(col("a"))), not(is_null(col("b")))]);
        let sql = format_writer(call.rewrite(), Dialect::Sqlite);
        assert_eq!("count(\"a\" IS NOT NULL,\"b\" IS NOT NULL)", sql);
        let sql = format_writer(func("lower").arg(lit("X")), Dialect::MySql);
        assert_eq!("lower('X')", sql);
    }

    #[test]
    #[should_panic(expected = "illegal function name")]
    fn test_illegal_name_panics() {
        func("drop table x;--");
    }

    #[test]
    #[should_panic(expected = "illegal function name")]
    fn test_leading_digit_panics() {
        FuncCall::bare("1st");
    }
}
