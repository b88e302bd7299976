use indexmap::IndexMap;
use smol_str::{SmolStr, format_smolstr};

use crate::{
    error::{Error, Result},
    expr::{Expr, Tuple},
    writer::{FormatContext, FormatWriter},
};

/// Name to position table filled while rendering, in binding order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Bindings(IndexMap<SmolStr, usize>);

impl Bindings {
    /// Position of `name`, assigning the next 1-based one on first use.
    pub fn bind(&mut self, name: &str) -> usize {
        if let Some(&position) = self.0.get(name) {
            return position;
        }
        let position = self.0.len() + 1;
        self.0.insert(SmolStr::new(name), position);
        position
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.0.get(name).copied()
    }

    /// Like [`Bindings::position`] but an unknown name is an error.
    pub fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| Error::UnboundPlaceholder(SmolStr::new(name)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names in position order; the nth value to send is for the nth name.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(SmolStr::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(name, position)| (name.as_str(), *position))
    }
}

/// Named parameter. Every occurrence of a name within one rendering shares
/// a position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Placeholder(SmolStr);

impl Placeholder {
    pub fn new<T>(name: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        self.0.as_str()
    }
}

impl FormatWriter for Placeholder {
    fn format_writer<W: std::fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_placeholder(self.0.as_str())
    }
}

/// `prefix1` up to `prefix{length}`.
pub fn generate_placeholders(prefix: &str, length: i64) -> Result<Vec<Placeholder>> {
    if length <= 0 {
        return Err(Error::ZeroLengthPlaceholderRequest);
    }
    Ok((1..=length)
        .map(|i| Placeholder(format_smolstr!("{}{}", prefix, i)))
        .collect())
}

fn make_placeholder_tuple(placeholders: &[Placeholder]) -> Result<Tuple> {
    if placeholders.is_empty() {
        return Err(Error::ZeroLengthPlaceholderRequest);
    }
    Ok(Tuple::new(
        placeholders.iter().cloned().map(Expr::Placeholder).collect(),
    ))
}

/// Placeholders for a multi-value test such as `x IN ($1,$2,$3)`, with the
/// tuple that holds them.
pub fn placeholder_tuple(prefix: &str, length: i64) -> Result<(Vec<Placeholder>, Tuple)> {
    let placeholders = generate_placeholders(prefix, length)?;
    let tuple = make_placeholder_tuple(&placeholders)?;
    Ok((placeholders, tuple))
}

#[cfg(test)]
mod tests {
    use crate::{col, dialect::Dialect, is_in, tests::format_writer};

    use super::*;

    #[test]
    fn test_bind_reuses_positions() {
        let mut bindings = Bindings::default();
        assert_eq!(1, bindings.bind("a"));
        assert_eq!(2, bindings.bind("b"));
        assert_eq!(1, bindings.bind("a"));
        assert_eq!(2, bindings.len());
        assert_eq!(vec!["a", "b"], bindings.names().collect::<Vec<_>>());
        assert_eq!(Some(2), bindings.position("b"));
        assert_eq!(Err(Error::UnboundPlaceholder("c".into())), bindings.require("c"));
    }

    #[test]
    fn test_generate_placeholders() {
        let placeholders = generate_placeholders("p", 3).unwrap();
        let names: Vec<&str> = placeholders.iter().map(Placeholder::name).collect();
        assert_eq!(vec!["p1", "p2", "p3"], names);
    }

    #[test]
    fn test_generate_zero_length() {
        assert_eq!(Err(Error::ZeroLengthPlaceholderRequest), generate_placeholders("p", 0));
        assert_eq!(Err(Error::ZeroLengthPlaceholderRequest), generate_placeholders("p", -1));
        assert_eq!(
            Err(Error::ZeroLengthPlaceholderRequest),
            placeholder_tuple("p", 0).map(|(_, tuple)| tuple)
        );
    }

    #[test]
    fn test_placeholder_tuple() {
        let (placeholders, tuple) = placeholder_tuple("id", 3).unwrap();
        assert_eq!(3, placeholders.len());
        let sql = format_writer(is_in(col("id"), tuple), Dialect::Postgres);
        assert_eq!("\"id\" IN ($1,$2,$3)", sql);
    }

    #[test]
    fn test_same_name_same_position() {
        let sql = format_writer(
            crate::and(
                crate::eq(col("a"), Placeholder::new("x")),
                crate::eq(col("b"), Placeholder::new("x")),
            ),
            Dialect::Postgres,
        );
        assert_eq!("\"a\" = $1 AND \"b\" = $1", sql);
    }
}
