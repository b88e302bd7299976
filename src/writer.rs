use std::{fmt::Write, ops::Deref};

use crate::{
    bind::Bindings,
    dialect::SqlDialect,
    error::{Error, Result},
    expr::Rewrite,
    operator::{self, Associativity, Operator, Precedence},
};

/// Deepest expression nesting the renderer descends into.
pub const MAX_DEPTH: usize = 512;

pub trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()>;
}

/// Output of a single print pass.
pub struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) dialect: &'a dyn SqlDialect,
    pub(crate) bindings: Bindings,
    depth: usize,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, dialect: &'a dyn SqlDialect) -> Self {
        Self {
            writer,
            dialect,
            bindings: Bindings::default(),
            depth: 0,
        }
    }

    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    pub fn into_bindings(self) -> Bindings {
        self.bindings
    }

    pub fn write_str(&mut self, value: &str) -> Result<()> {
        self.writer.write_str(value)?;
        Ok(())
    }

    pub fn write_char(&mut self, value: char) -> Result<()> {
        self.writer.write_char(value)?;
        Ok(())
    }

    pub fn write_table(&mut self, ident: &str) -> Result<()> {
        for (i, part) in ident.split('.').enumerate() {
            if i > 0 {
                self.writer.write_char('.')?;
            }
            self.write_ident(part)?;
        }
        Ok(())
    }

    pub fn write_ident(&mut self, part: &str) -> Result<()> {
        if part == "*" {
            return self.write_char('*');
        }

        let Some(quote) = self.dialect.identifier_quote() else {
            return self.write_str(part);
        };
        self.writer.write_char(quote)?;

        // duplicate the quote if present
        let mut last = 0;
        for (index, char) in part.char_indices() {
            if char == quote {
                self.writer.write_str(&part[last..index])?;
                self.writer.write_char(quote)?;
                self.writer.write_char(quote)?;
                last = index + char.len_utf8();
            }
        }

        // write trailing slice
        if last < part.len() {
            self.writer.write_str(&part[last..])?;
        }

        self.writer.write_char(quote)?;
        Ok(())
    }

    pub fn write_alias(&mut self, alias: Option<&str>) -> Result<()> {
        if let Some(alias) = alias {
            self.writer.write_str(" AS ")?;
            self.write_ident(alias)?;
        }
        Ok(())
    }

    /// Position of `name` in this pass, assigning the next one on first use.
    pub fn bind_placeholder(&mut self, name: &str) -> usize {
        let position = self.bindings.bind(name);
        tracing::trace!(name, position, "bound placeholder");
        position
    }

    /// Binds `name` and writes the dialect's placeholder for it.
    pub fn write_placeholder(&mut self, name: &str) -> Result<()> {
        let position = self.bind_placeholder(name);
        self.dialect
            .write_placeholder(&mut *self.writer, name, position)?;
        Ok(())
    }

    pub fn precedence(&self, op: &dyn Operator) -> Result<Precedence> {
        operator::resolve_precedence(op, self.dialect)
    }

    pub fn associativity(&self, op: &dyn Operator) -> Result<Associativity> {
        operator::resolve_associativity(op, self.dialect)
    }

    /// Writes `node` wrapped in parentheses.
    pub fn write_paren<N>(&mut self, node: &N) -> Result<()>
    where
        N: FormatWriter + ?Sized,
    {
        self.write_char('(')?;
        node.format_writer(self)?;
        self.write_char(')')
    }

    pub fn write_comma_separated<N>(&mut self, nodes: &[N]) -> Result<()>
    where
        N: FormatWriter,
    {
        for (index, node) in nodes.iter().enumerate() {
            if index > 0 {
                self.write_char(',')?;
            }
            node.format_writer(self)?;
        }
        Ok(())
    }

    /// Runs `f` one nesting level deeper, failing past [`MAX_DEPTH`].
    pub(crate) fn nested<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let depth = deeper(self.depth)?;
        let outer = std::mem::replace(&mut self.depth, depth);
        let result = f(self);
        self.depth = outer;
        result
    }
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer<W: Write>(&self, ctx: &mut FormatContext<'_, W>) -> Result<()> {
        self.deref().format_writer(ctx)
    }
}

/// Level below `depth`, or the depth error once [`MAX_DEPTH`] is reached.
pub(crate) fn deeper(depth: usize) -> Result<usize> {
    if depth >= MAX_DEPTH {
        return Err(Error::DepthLimitExceeded(MAX_DEPTH));
    }
    Ok(depth + 1)
}

/// Rendered SQL text with the placeholder names it binds, in position order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sql {
    pub text: String,
    pub bindings: Bindings,
}

/// Renders `node` as it is. Call [`compile`] to canonicalize it first.
pub fn to_sql<N>(node: &N, dialect: &dyn SqlDialect) -> Result<Sql>
where
    N: FormatWriter + ?Sized,
{
    let mut text = String::with_capacity(64);
    let mut context = FormatContext::new(&mut text, dialect);
    node.format_writer(&mut context)?;
    let bindings = context.into_bindings();
    tracing::debug!(len = text.len(), bindings = bindings.len(), "rendered sql");
    Ok(Sql { text, bindings })
}

/// Rewrites `node` into canonical form, then renders it.
///
/// Trees nested deeper than [`MAX_DEPTH`] are rejected before the rewrite.
pub fn compile<N>(node: N, dialect: &dyn SqlDialect) -> Result<Sql>
where
    N: Rewrite + FormatWriter,
{
    node.check_depth(0)?;
    let node = node.rewrite();
    to_sql(&node, dialect)
}
