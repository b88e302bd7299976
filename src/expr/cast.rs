use std::fmt::Write;

use smol_str::{SmolStr, format_smolstr};

use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

use super::{Expr, Rewrite};

/// SQL type name, written verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SqlType(SmolStr);

impl SqlType {
    pub const SMALLINT: SqlType = SqlType(SmolStr::new_static("SMALLINT"));
    pub const INTEGER: SqlType = SqlType(SmolStr::new_static("INTEGER"));
    pub const BIGINT: SqlType = SqlType(SmolStr::new_static("BIGINT"));
    pub const BOOLEAN: SqlType = SqlType(SmolStr::new_static("BOOLEAN"));
    pub const REAL: SqlType = SqlType(SmolStr::new_static("REAL"));
    pub const DOUBLE_PRECISION: SqlType = SqlType(SmolStr::new_static("DOUBLE PRECISION"));
    pub const TEXT: SqlType = SqlType(SmolStr::new_static("TEXT"));
    pub const TIMESTAMP: SqlType = SqlType(SmolStr::new_static("TIMESTAMP"));

    pub fn new<T>(name: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(name.into())
    }

    /// `DECIMAL(precision,scale)`
    pub fn decimal(precision: u32, scale: u32) -> Self {
        Self(format_smolstr!("DECIMAL({},{})", precision, scale))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FormatWriter for SqlType {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_str(&self.0)
    }
}

/// `CAST(expr AS type)`
#[derive(Debug, Clone, PartialEq)]
pub struct CastExpr {
    expr: Expr,
    ty: SqlType,
}

impl CastExpr {
    pub fn new(expr: Expr, ty: SqlType) -> Self {
        Self { expr, ty }
    }
}

impl Rewrite for CastExpr {
    fn rewrite(self) -> Self {
        Self {
            expr: self.expr.rewrite(),
            ty: self.ty,
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        self.expr.check_depth(depth)
    }
}

impl FormatWriter for CastExpr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_str("CAST(")?;
        self.expr.format_writer(context)?;
        context.write_str(" AS ")?;
        self.ty.format_writer(context)?;
        context.write_char(')')
    }
}
