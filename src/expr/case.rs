use std::fmt::Write;

use crate::{
    error::{Error, Result},
    writer::{FormatContext, FormatWriter},
};

use super::{Expr, IntoExpr, Rewrite};

/// Searched `CASE WHEN .. THEN .. [ELSE ..] END`.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CaseExpr {
    branches: Vec<(Expr, Expr)>,
    otherwise: Option<Expr>,
}

impl CaseExpr {
    pub fn when<C, R>(mut self, condition: C, result: R) -> Self
    where
        C: IntoExpr,
        R: IntoExpr,
    {
        self.branches.push((condition.into_expr(), result.into_expr()));
        self
    }

    pub fn otherwise<E: IntoExpr>(mut self, result: E) -> Self {
        self.otherwise = Some(result.into_expr());
        self
    }
}

impl Rewrite for CaseExpr {
    fn rewrite(self) -> Self {
        Self {
            branches: self
                .branches
                .into_iter()
                .map(|(condition, result)| (condition.rewrite(), result.rewrite()))
                .collect(),
            otherwise: self.otherwise.map(Rewrite::rewrite),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        for (condition, result) in &self.branches {
            condition.check_depth(depth)?;
            result.check_depth(depth)?;
        }
        match self.otherwise {
            Some(ref otherwise) => otherwise.check_depth(depth),
            None => Ok(()),
        }
    }
}

impl FormatWriter for CaseExpr {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        if self.branches.is_empty() {
            return Err(Error::UnknownStructuralVariant("CASE expression"));
        }
        context.write_str("CASE")?;
        for (condition, result) in &self.branches {
            context.write_str(" WHEN ")?;
            condition.format_writer(context)?;
            context.write_str(" THEN ")?;
            result.format_writer(context)?;
        }
        if let Some(ref otherwise) = self.otherwise {
            context.write_str(" ELSE ")?;
            otherwise.format_writer(context)?;
        }
        context.write_str(" END")
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        case_when, col, dialect::Dialect, gt, is_null, lit, not, tests::format_writer, to_sql,
    };

    use super::*;

    #[test]
    fn test_case() {
        let expr = case_when(gt(col("age"), 17), lit("adult"))
            .when(gt(col("age"), 12), lit("teen"))
            .otherwise(lit("child"));
        assert_eq!(
            "CASE WHEN \"age\" > 17 THEN 'adult' WHEN \"age\" > 12 THEN 'teen' ELSE 'child' END",
            format_writer(expr, Dialect::Postgres)
        );
    }

    #[test]
    fn test_case_rewrites_branches() {
        let expr = case_when(not(is_null(col("a"))), 1).otherwise(0).rewrite();
        assert_eq!(
            "CASE WHEN `a` IS NOT NULL THEN 1 ELSE 0 END",
            format_writer(expr, Dialect::MySql)
        );
    }

    #[test]
    fn test_case_without_branches_fails() {
        let result = to_sql(&CaseExpr::default().otherwise(1), &Dialect::Postgres);
        assert_eq!(Err(Error::UnknownStructuralVariant("CASE expression")), result);
    }
}
