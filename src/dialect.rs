use std::fmt::Write;

use crate::{
    kind::OperatorKind,
    operator::{Associativity, Precedence},
};

/// What the renderer needs to know about a target database.
///
/// Implement this to render for a database the built-in [`Dialect`] does not
/// cover, or to change precedence, quoting or placeholder syntax.
pub trait SqlDialect {
    /// Quote wrapped around identifiers, `None` writes them bare.
    fn identifier_quote(&self) -> Option<char>;

    fn precedence(&self, kind: OperatorKind) -> Option<Precedence>;

    fn associativity(&self, kind: OperatorKind) -> Option<Associativity>;

    /// Writes the placeholder text for `name`, bound at 1-based `position`.
    fn write_placeholder(
        &self,
        writer: &mut dyn Write,
        name: &str,
        position: usize,
    ) -> std::fmt::Result;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
}

impl SqlDialect for Dialect {
    fn identifier_quote(&self) -> Option<char> {
        match self {
            Dialect::Postgres | Dialect::Sqlite => Some('"'),
            Dialect::MySql => Some('`'),
        }
    }

    /// The shared table, minus the kinds the database lacks. MySQL reads
    /// `||` as logical OR by default and neither MySQL nor SQLite knows `::`
    /// or `ILIKE`.
    fn precedence(&self, kind: OperatorKind) -> Option<Precedence> {
        let unsupported = match self {
            Dialect::Postgres => false,
            Dialect::MySql => matches!(
                kind,
                OperatorKind::Concat
                    | OperatorKind::Typecast
                    | OperatorKind::ILike
                    | OperatorKind::NotILike
            ),
            Dialect::Sqlite => matches!(
                kind,
                OperatorKind::Typecast | OperatorKind::ILike | OperatorKind::NotILike
            ),
        };
        if unsupported {
            return None;
        }
        default_precedence(kind)
    }

    fn associativity(&self, kind: OperatorKind) -> Option<Associativity> {
        Some(default_associativity(kind))
    }

    fn write_placeholder(
        &self,
        writer: &mut dyn Write,
        _name: &str,
        position: usize,
    ) -> std::fmt::Result {
        match self {
            Dialect::Postgres => write!(writer, "${}", position),
            Dialect::MySql => writer.write_char('?'),
            // numbered so a reused name needs a single value
            Dialect::Sqlite => write!(writer, "?{}", position),
        }
    }
}

/// Precedence table shared by the built-in dialects, following the
/// PostgreSQL operator precedence ordering.
pub fn default_precedence(kind: OperatorKind) -> Option<Precedence> {
    let level = match kind {
        OperatorKind::Or => 1,
        OperatorKind::And => 2,
        OperatorKind::Not => 3,
        OperatorKind::IsNull
        | OperatorKind::IsNotNull
        | OperatorKind::IsTrue
        | OperatorKind::IsNotTrue
        | OperatorKind::IsFalse
        | OperatorKind::IsNotFalse => 4,
        OperatorKind::Eq
        | OperatorKind::NotEq
        | OperatorKind::Lt
        | OperatorKind::Lte
        | OperatorKind::Gt
        | OperatorKind::Gte => 5,
        OperatorKind::Between
        | OperatorKind::NotBetween
        | OperatorKind::In
        | OperatorKind::NotIn
        | OperatorKind::Like
        | OperatorKind::NotLike
        | OperatorKind::ILike
        | OperatorKind::NotILike => 6,
        OperatorKind::Concat => 7,
        OperatorKind::Add | OperatorKind::Sub => 8,
        OperatorKind::Mul | OperatorKind::Div | OperatorKind::Mod => 9,
        OperatorKind::Neg => 10,
        OperatorKind::Typecast => 11,
    };
    Precedence::new(level)
}

pub fn default_associativity(kind: OperatorKind) -> Associativity {
    match kind {
        OperatorKind::Not | OperatorKind::Neg => Associativity::Right,
        OperatorKind::Eq
        | OperatorKind::NotEq
        | OperatorKind::Lt
        | OperatorKind::Lte
        | OperatorKind::Gt
        | OperatorKind::Gte
        | OperatorKind::Between
        | OperatorKind::NotBetween
        | OperatorKind::In
        | OperatorKind::NotIn
        | OperatorKind::Like
        | OperatorKind::NotLike
        | OperatorKind::ILike
        | OperatorKind::NotILike => Associativity::NonAssociative,
        // IS tests are suffix operators
        _ => Associativity::Left,
    }
}

pub trait HasDialect {
    const DIALECT: Dialect;
}

pub struct Postgres;

impl HasDialect for Postgres {
    const DIALECT: Dialect = Dialect::Postgres;
}

pub struct MySql;

impl HasDialect for MySql {
    const DIALECT: Dialect = Dialect::MySql;
}

pub struct Sqlite;

impl HasDialect for Sqlite {
    const DIALECT: Dialect = Dialect::Sqlite;
}

#[cfg(feature = "postgres")]
impl HasDialect for sqlx::Postgres {
    const DIALECT: Dialect = Dialect::Postgres;
}

#[cfg(feature = "mysql")]
impl HasDialect for sqlx::MySql {
    const DIALECT: Dialect = Dialect::MySql;
}

#[cfg(feature = "sqlite")]
impl HasDialect for sqlx::Sqlite {
    const DIALECT: Dialect = Dialect::Sqlite;
}
