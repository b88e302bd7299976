use darling::{FromDeriveInput, FromVariant, ast};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

use crate::builder;

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_unit))]
struct OperatorInput {
    ident: syn::Ident,
    data: ast::Data<OperatorVariant, ()>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(operator))]
pub(crate) struct OperatorVariant {
    pub(crate) ident: syn::Ident,
    #[darling(default)]
    pub(crate) unary: bool,
    #[darling(default)]
    pub(crate) binary: bool,
    #[darling(default)]
    pub(crate) ternary: bool,
    pub(crate) symbol: String,
    pub(crate) symbol2: Option<String>,
    pub(crate) negated: Option<String>,
    #[darling(default)]
    pub(crate) glued: bool,
    pub(crate) builder: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Arity {
    Unary,
    Binary,
    Ternary,
}

impl OperatorVariant {
    pub(crate) fn arity(&self) -> darling::Result<Arity> {
        match (self.unary, self.binary, self.ternary) {
            (true, false, false) => Ok(Arity::Unary),
            (false, true, false) => Ok(Arity::Binary),
            (false, false, true) => Ok(Arity::Ternary),
            _ => Err(darling::Error::custom(
                "exactly one of `unary`, `binary` or `ternary` is required",
            )
            .with_span(&self.ident)),
        }
    }

    fn validate(&self) -> darling::Result<Arity> {
        let arity = self.arity()?;
        if arity == Arity::Ternary && self.symbol2.is_none() {
            return Err(darling::Error::custom("ternary operators need `symbol2`")
                .with_span(&self.ident));
        }
        if arity != Arity::Ternary && self.symbol2.is_some() {
            return Err(darling::Error::custom("`symbol2` is only valid on ternary operators")
                .with_span(&self.ident));
        }
        if self.glued && arity != Arity::Binary {
            return Err(darling::Error::custom("`glued` is only valid on binary operators")
                .with_span(&self.ident));
        }
        Ok(arity)
    }
}

pub fn operator_kind_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let op = match OperatorInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let enum_name = &op.ident;
    let variants = match op.data.take_enum() {
        Some(variants) => variants,
        None => {
            return darling::Error::custom("only enums are supported")
                .with_span(enum_name)
                .write_errors()
                .into();
        }
    };

    let mut errors = darling::Error::accumulator();
    let mut arities = Vec::with_capacity(variants.len());
    for var in &variants {
        if let Some(arity) = errors.handle(var.validate()) {
            arities.push(arity);
        }
    }
    if let Err(e) = errors.finish() {
        return e.write_errors().into();
    }

    let tables = kind_tables(enum_name, &variants, &arities);
    let builders = variants
        .iter()
        .zip(arities.iter())
        .map(|(var, arity)| builder::builder_fn(enum_name, var, *arity));

    quote! {
        #tables
        #(#builders)*
    }
    .into()
}

fn kind_tables(
    enum_name: &syn::Ident,
    variants: &[OperatorVariant],
    arities: &[Arity],
) -> TokenStream2 {
    let symbols = variants.iter().map(|v| {
        let var = &v.ident;
        let symbol = &v.symbol;
        quote! { #enum_name::#var => #symbol, }
    });

    let second_symbols = variants.iter().map(|v| {
        let var = &v.ident;
        match v.symbol2 {
            Some(ref symbol) => quote! { #enum_name::#var => Some(#symbol), },
            None => quote! { #enum_name::#var => None, },
        }
    });

    let negations = variants.iter().map(|v| {
        let var = &v.ident;
        match v.negated {
            Some(ref negated) => {
                let negated = format_ident!("{}", negated);
                quote! { #enum_name::#var => Some(#enum_name::#negated), }
            }
            None => quote! { #enum_name::#var => None, },
        }
    });

    let arity_arms = variants.iter().zip(arities.iter()).map(|(v, arity)| {
        let var = &v.ident;
        let arity = match arity {
            Arity::Unary => quote! { crate::operator::Arity::Unary },
            Arity::Binary => quote! { crate::operator::Arity::Binary },
            Arity::Ternary => quote! { crate::operator::Arity::Ternary },
        };
        quote! { #enum_name::#var => #arity, }
    });

    let glued = variants.iter().map(|v| {
        let var = &v.ident;
        let glued = v.glued;
        quote! { #enum_name::#var => #glued, }
    });

    quote! {
        impl #enum_name {
            /// Symbol printed for this kind. For ternary kinds this is the
            /// symbol between the first and second operand.
            pub const fn symbol(self) -> &'static str {
                match self {
                    #(#symbols)*
                }
            }

            /// Symbol between the second and third operand of a ternary kind.
            pub const fn second_symbol(self) -> Option<&'static str> {
                match self {
                    #(#second_symbols)*
                }
            }

            /// Kind expressing the logical negation of this one, if any.
            pub const fn negated(self) -> Option<Self> {
                match self {
                    #(#negations)*
                }
            }

            pub const fn arity(self) -> crate::operator::Arity {
                match self {
                    #(#arity_arms)*
                }
            }

            /// Binary kinds whose symbol is printed without surrounding spaces.
            pub const fn is_glued(self) -> bool {
                match self {
                    #(#glued)*
                }
            }
        }
    }
}
