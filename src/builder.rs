use std::fmt::Write;

use crate::{
    dialect::HasDialect,
    error::{Error, Result},
    expr::{Expr, IntoExpr, OrderItem, Rewrite},
    ident::{Ident, IntoIdent},
    join::{FromItem, IntoFromItem},
    kind::{and, or},
    writer::{self, FormatContext, FormatWriter, Sql},
};

/// Entry of the `SELECT` list with an optional output label.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectItem {
    expr: Expr,
    label: Option<Ident>,
}

impl Rewrite for SelectItem {
    fn rewrite(self) -> Self {
        Self {
            expr: self.expr.rewrite(),
            label: self.label,
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        self.expr.check_depth(depth)
    }
}

impl FormatWriter for SelectItem {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.expr.format_writer(context)?;
        context.write_alias(self.label.as_ref().map(Ident::as_str))
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct Select {
    distinct: bool,
    columns: Vec<SelectItem>,
    from: Option<FromItem>,
    filter: Option<Expr>,
    group_by: Option<Vec<Expr>>,
    having: Option<Expr>,
    order_by: Option<Vec<OrderItem>>,
    limit: Option<Expr>,
    offset: Option<Expr>,
}

impl Select {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn table<T: IntoFromItem>(table: T) -> Self {
        Self {
            from: Some(table.into_from_item()),
            ..Default::default()
        }
    }

    pub fn from<T: IntoFromItem>(&mut self, table: T) -> &mut Self {
        self.from = Some(table.into_from_item());
        self
    }

    // select list

    pub fn select<E: IntoExpr>(&mut self, expr: E) -> &mut Self {
        self.columns.push(SelectItem {
            expr: expr.into_expr(),
            label: None,
        });
        self
    }

    pub fn select_as<E, L>(&mut self, expr: E, label: L) -> &mut Self
    where
        E: IntoExpr,
        L: IntoIdent,
    {
        self.columns.push(SelectItem {
            expr: expr.into_expr(),
            label: Some(label.into_ident()),
        });
        self
    }

    pub fn select_all<I>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        for expr in exprs {
            self.select(expr);
        }
        self
    }

    pub fn reset_select(&mut self) -> &mut Self {
        self.columns.clear();
        self
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self
    }

    // where stuff

    /// Adds a condition, joined to any earlier one with `AND`.
    pub fn where_clause<E: IntoExpr>(&mut self, condition: E) -> &mut Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => and(existing, condition).into(),
            None => condition.into_expr(),
        });
        self
    }

    /// Adds a condition, joined to any earlier one with `OR`.
    pub fn or_where_clause<E: IntoExpr>(&mut self, condition: E) -> &mut Self {
        self.filter = Some(match self.filter.take() {
            Some(existing) => or(existing, condition).into(),
            None => condition.into_expr(),
        });
        self
    }

    // grouping and ordering

    pub fn group_by<I>(&mut self, exprs: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: IntoExpr,
    {
        self.group_by
            .get_or_insert_default()
            .extend(exprs.into_iter().map(IntoExpr::into_expr));
        self
    }

    pub fn having<E: IntoExpr>(&mut self, condition: E) -> &mut Self {
        self.having = Some(condition.into_expr());
        self
    }

    pub fn order_by<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = OrderItem>,
    {
        self.order_by.get_or_insert_default().extend(items);
        self
    }

    pub fn limit<E: IntoExpr>(&mut self, limit: E) -> &mut Self {
        self.limit = Some(limit.into_expr());
        self
    }

    pub fn offset<E: IntoExpr>(&mut self, offset: E) -> &mut Self {
        self.offset = Some(offset.into_expr());
        self
    }

    // building the query

    /// Canonicalizes a copy of the statement and renders it for `D`.
    pub fn to_sql<D: HasDialect>(&self) -> Result<Sql> {
        writer::compile(self.clone(), &D::DIALECT)
    }
}

impl Rewrite for Select {
    fn rewrite(self) -> Self {
        Self {
            distinct: self.distinct,
            columns: self.columns.into_iter().map(Rewrite::rewrite).collect(),
            from: self.from.map(Rewrite::rewrite),
            filter: self.filter.map(Rewrite::rewrite),
            group_by: self
                .group_by
                .map(|exprs| exprs.into_iter().map(Rewrite::rewrite).collect()),
            having: self.having.map(Rewrite::rewrite),
            order_by: self
                .order_by
                .map(|items| items.into_iter().map(Rewrite::rewrite).collect()),
            limit: self.limit.map(Rewrite::rewrite),
            offset: self.offset.map(Rewrite::rewrite),
        }
    }

    fn check_depth(&self, depth: usize) -> Result<()> {
        self.columns.iter().try_for_each(|item| item.check_depth(depth))?;
        if let Some(ref from) = self.from {
            from.check_depth(depth)?;
        }
        let exprs = self
            .filter
            .iter()
            .chain(self.group_by.iter().flatten())
            .chain(self.having.iter())
            .chain(self.limit.iter())
            .chain(self.offset.iter());
        for expr in exprs {
            expr.check_depth(depth)?;
        }
        self.order_by
            .iter()
            .flatten()
            .try_for_each(|item| item.check_depth(depth))
    }
}

impl FormatWriter for Select {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        if self.columns.is_empty() {
            return Err(Error::UnknownStructuralVariant("SELECT list"));
        }
        context.write_str("SELECT ")?;
        if self.distinct {
            context.write_str("DISTINCT ")?;
        }
        context.write_comma_separated(&self.columns)?;

        if let Some(ref from) = self.from {
            context.write_str(" FROM ")?;
            from.format_writer(context)?;
        }
        if let Some(ref filter) = self.filter {
            context.write_str(" WHERE ")?;
            filter.format_writer(context)?;
        }
        if let Some(ref group_by) = self.group_by {
            if group_by.is_empty() {
                return Err(Error::UnknownStructuralVariant("GROUP BY list"));
            }
            context.write_str(" GROUP BY ")?;
            context.write_comma_separated(group_by)?;
        }
        if let Some(ref having) = self.having {
            context.write_str(" HAVING ")?;
            having.format_writer(context)?;
        }
        if let Some(ref order_by) = self.order_by {
            if order_by.is_empty() {
                return Err(Error::UnknownStructuralVariant("ORDER BY list"));
            }
            context.write_str(" ORDER BY ")?;
            context.write_comma_separated(order_by)?;
        }
        if let Some(ref limit) = self.limit {
            context.write_str(" LIMIT ")?;
            limit.format_writer(context)?;
        }
        if let Some(ref offset) = self.offset {
            context.write_str(" OFFSET ")?;
            offset.format_writer(context)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        IntoFromItem, asc, col, desc,
        dialect::{MySql, Postgres, Sqlite},
        eq, expr::FuncCall, func, gt, is_in, is_null,
        join::FromItem,
        lit, not, placeholder, raw, subquery, table,
    };

    use super::*;

    fn count_star() -> FuncCall {
        func("count").arg(raw("*"))
    }

    #[test]
    fn test_basic_select() {
        let mut builder = Select::table("users");
        builder.select(col("i\"d"));
        assert_eq!(
            "SELECT \"i\"\"d\" FROM \"users\"",
            builder.to_sql::<Postgres>().unwrap().text
        );
        builder.reset_select().select(col("username")).select(col("id"));
        assert_eq!(
            "SELECT \"username\",\"id\" FROM \"users\"",
            builder.to_sql::<Postgres>().unwrap().text
        );
        builder.reset_select().select(col("*")).distinct();
        assert_eq!("SELECT DISTINCT * FROM `users`", builder.to_sql::<MySql>().unwrap().text);
    }

    #[test]
    fn test_every_clause_in_order() {
        let mut builder = Select::table(table("orders").alias("o"));
        builder
            .select(col("o.customer"))
            .select_as(count_star(), "n")
            .where_clause(gt(col("o.total"), placeholder("min")))
            .group_by([col("o.customer")])
            .having(gt(count_star(), 1))
            .order_by([desc(col("n")).nulls_last(), asc(col("o.customer"))])
            .limit(placeholder("limit"))
            .offset(placeholder("offset"));
        let sql = builder.to_sql::<Postgres>().unwrap();
        assert_eq!(
            "SELECT \"o\".\"customer\",count(*) AS \"n\" FROM \"orders\" AS \"o\" \
             WHERE \"o\".\"total\" > $1 GROUP BY \"o\".\"customer\" HAVING count(*) > 1 \
             ORDER BY \"n\" DESC NULLS LAST,\"o\".\"customer\" LIMIT $2 OFFSET $3",
            sql.text
        );
        assert_eq!(vec!["min", "limit", "offset"], sql.bindings.names().collect::<Vec<_>>());
    }

    #[test]
    fn test_where_conditions_chain() {
        let mut builder = Select::table("users");
        builder
            .select(col("id"))
            .where_clause(eq(col("a"), 1))
            .where_clause(eq(col("b"), 2))
            .or_where_clause(eq(col("c"), 3));
        assert_eq!(
            "SELECT \"id\" FROM \"users\" WHERE \"a\" = 1 AND \"b\" = 2 OR \"c\" = 3",
            builder.to_sql::<Sqlite>().unwrap().text
        );
        let mut builder = Select::table("users");
        builder
            .select(col("id"))
            .or_where_clause(eq(col("a"), 1))
            .where_clause(eq(col("b"), 2));
        assert_eq!(
            "SELECT \"id\" FROM \"users\" WHERE \"a\" = 1 AND \"b\" = 2",
            builder.to_sql::<Sqlite>().unwrap().text
        );
    }

    #[test]
    fn test_to_sql_rewrites() {
        let mut builder = Select::table("users");
        builder.select(col("id")).where_clause(not(is_null(col("email"))));
        assert_eq!(
            "SELECT `id` FROM `users` WHERE `email` IS NOT NULL",
            builder.to_sql::<MySql>().unwrap().text
        );
    }

    #[test]
    fn test_scalar_subquery() {
        let roles = subquery(|builder| {
            builder
                .select(col("user_id"))
                .from("roles")
                .where_clause(eq(col("name"), placeholder("role")));
        });
        let mut builder = Select::table("users");
        builder
            .select(col("*"))
            .where_clause(is_in(col("id"), roles))
            .where_clause(eq(col("active"), placeholder("active")));
        let sql = builder.to_sql::<Sqlite>().unwrap();
        assert_eq!(
            "SELECT * FROM \"users\" WHERE \"id\" IN \
             (SELECT \"user_id\" FROM \"roles\" WHERE \"name\" = ?1) \
             AND \"active\" = ?2",
            sql.text
        );
    }

    #[test]
    fn test_from_subquery_and_join() {
        let recent = subquery(|builder| {
            builder.select(col("id")).select(col("user_id")).from("posts").limit(10);
        });
        let from = table("users")
            .alias("u")
            .join(FromItem::subquery(recent, "p"), eq(col("u.id"), col("p.user_id")));
        let mut builder = Select::table(from);
        builder.select(col("u.name")).select(func("lower").arg(lit("X")));
        assert_eq!(
            "SELECT \"u\".\"name\",lower('X') FROM \"users\" AS \"u\" JOIN \
             (SELECT \"id\",\"user_id\" FROM \"posts\" LIMIT 10) AS \"p\" \
             ON \"u\".\"id\" = \"p\".\"user_id\"",
            builder.to_sql::<Postgres>().unwrap().text
        );
    }

    #[test]
    fn test_structural_errors() {
        let builder = Select::table("users");
        assert_eq!(
            Err(Error::UnknownStructuralVariant("SELECT list")),
            builder.to_sql::<Postgres>()
        );
        let mut builder = Select::table("users");
        builder.select(col("id")).group_by(Vec::<Expr>::new());
        assert_eq!(
            Err(Error::UnknownStructuralVariant("GROUP BY list")),
            builder.to_sql::<Postgres>()
        );
        let mut builder = Select::table("users");
        builder.select(col("id")).order_by(Vec::new());
        assert_eq!(
            Err(Error::UnknownStructuralVariant("ORDER BY list")),
            builder.to_sql::<Postgres>()
        );
    }

    #[test]
    fn test_select_without_from() {
        let mut builder = Select::new();
        builder.select_all([lit(1), lit(2)]);
        assert_eq!("SELECT 1,2", builder.to_sql::<Postgres>().unwrap().text);
    }
}
