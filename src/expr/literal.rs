use std::fmt::Write;

use smol_str::SmolStr;

use crate::{
    error::{Error, Result},
    writer::{FormatContext, FormatWriter},
};

/// Value written inline into the SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(SmolStr),
}

impl Literal {
    /// Numbers whose text starts with a minus sign.
    pub fn is_negative(&self) -> bool {
        match self {
            Literal::Int(value) => *value < 0,
            Literal::Float(value) => value.is_sign_negative(),
            _ => false,
        }
    }
}

impl FormatWriter for Literal {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            Literal::Null => context.write_str("NULL"),
            Literal::Bool(true) => context.write_str("TRUE"),
            Literal::Bool(false) => context.write_str("FALSE"),
            Literal::Int(value) => {
                write!(context.writer, "{}", value)?;
                Ok(())
            }
            Literal::Float(value) => {
                // NaN and inf have no portable literal form
                if !value.is_finite() {
                    return Err(Error::NonFiniteFloat);
                }
                write!(context.writer, "{}", value)?;
                Ok(())
            }
            Literal::String(value) => {
                context.write_char('\'')?;
                // double embedded quotes
                for (index, part) in value.split('\'').enumerate() {
                    if index > 0 {
                        context.write_str("''")?;
                    }
                    context.write_str(part)?;
                }
                context.write_char('\'')
            }
        }
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Int(value.into())
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<u32> for Literal {
    fn from(value: u32) -> Self {
        Literal::Int(value.into())
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Float(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::String(SmolStr::new(value))
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::String(SmolStr::new(value))
    }
}

#[cfg(test)]
mod tests {
    use crate::{dialect::Dialect, tests::format_writer};

    use super::*;

    #[test]
    fn test_scalars() {
        assert_eq!("NULL", format_writer(Literal::Null, Dialect::Postgres));
        assert_eq!("TRUE", format_writer(Literal::from(true), Dialect::MySql));
        assert_eq!("-12", format_writer(Literal::from(-12), Dialect::Sqlite));
        assert_eq!("1.5", format_writer(Literal::from(1.5), Dialect::Postgres));
    }

    #[test]
    fn test_non_finite_floats_fail() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = crate::to_sql(&Literal::from(value), &Dialect::Postgres);
            assert_eq!(Err(Error::NonFiniteFloat), result);
        }
    }

    #[test]
    fn test_sign() {
        assert!(Literal::from(-1).is_negative());
        assert!(Literal::from(-0.5).is_negative());
        assert!(!Literal::from(0).is_negative());
        assert!(!Literal::from("-1").is_negative());
    }

    #[test]
    fn test_string_quotes_are_doubled() {
        let sql = format_writer(Literal::from("it's"), Dialect::Postgres);
        assert_eq!("'it''s'", sql);
        let sql = format_writer(Literal::from(""), Dialect::Postgres);
        assert_eq!("''", sql);
    }
}
