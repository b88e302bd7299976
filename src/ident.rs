use std::{borrow::Cow, sync::Arc};

use smol_str::SmolStr;

use crate::{
    error::Result,
    writer::{FormatContext, FormatWriter},
};

/// Identifier, possibly dotted (`schema.table`, `alias.column`). Every
/// segment is quoted on its own.
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ident(SmolStr);

impl Ident {
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    #[inline]
    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FormatWriter for Ident {
    fn format_writer<W: std::fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_table(self.0.as_str())
    }
}

pub trait IntoIdent {
    fn into_ident(self) -> Ident;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> Ident {
        self
    }
}

impl IntoIdent for char {
    fn into_ident(self) -> Ident {
        Ident::new(smol_str::format_smolstr!("{}", self))
    }
}

impl IntoIdent for &str {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for &String {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for String {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Box<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Arc<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl<'a> IntoIdent for Cow<'a, str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for SmolStr {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

/// Column reference such as `"u"."id"` or `*`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Column(Ident);

impl Column {
    pub fn new<T: IntoIdent>(name: T) -> Self {
        Self(name.into_ident())
    }

    pub fn ident(&self) -> &Ident {
        &self.0
    }
}

impl FormatWriter for Column {
    fn format_writer<W: std::fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.0.format_writer(context)
    }
}

/// Table reference with an optional alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Table {
    name: Ident,
    alias: Option<Ident>,
}

impl Table {
    pub fn new<T: IntoIdent>(name: T) -> Self {
        Self {
            name: name.into_ident(),
            alias: None,
        }
    }

    pub fn alias<T: IntoIdent>(mut self, alias: T) -> Self {
        self.alias = Some(alias.into_ident());
        self
    }

    /// Name other clauses refer to this table by.
    pub fn table_name(&self) -> &str {
        match self.alias {
            Some(ref alias) => alias.as_str(),
            None => self.name.as_str(),
        }
    }

    /// Column of this table, qualified by its alias when it has one.
    pub fn col<T: AsRef<str>>(&self, column: T) -> Column {
        Column::new(smol_str::format_smolstr!("{}.{}", self.table_name(), column.as_ref()))
    }
}

impl FormatWriter for Table {
    fn format_writer<W: std::fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.name.format_writer(context)?;
        context.write_alias(self.alias.as_ref().map(Ident::as_str))
    }
}
