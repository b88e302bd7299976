use heck::ToSnakeCase;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};

use crate::operator::{Arity, OperatorVariant};

/// Builder function for a single kind, named after the variant in snake case
/// unless `builder = ".."` overrides it (needed for `in`, `mod`, ...).
pub(crate) fn builder_fn(
    enum_name: &syn::Ident,
    var: &OperatorVariant,
    arity: Arity,
) -> TokenStream2 {
    let kind = &var.ident;
    let fn_name = match var.builder {
        Some(ref name) => format_ident!("{}", name),
        None => format_ident!("{}", kind.to_string().to_snake_case()),
    };

    match arity {
        Arity::Unary => {
            let doc = format!("Builds a `{}` unary operator.", var.symbol);
            quote! {
                #[doc = #doc]
                pub fn #fn_name<E>(expr: E) -> crate::expr::UnaryOperator
                where
                    E: crate::expr::IntoExpr,
                {
                    crate::expr::UnaryOperator::new(#enum_name::#kind, expr.into_expr())
                }
            }
        }
        Arity::Binary => {
            let doc = format!("Builds a `{}` binary operator.", var.symbol);
            quote! {
                #[doc = #doc]
                pub fn #fn_name<L, R>(left: L, right: R) -> crate::expr::BinaryOperator
                where
                    L: crate::expr::IntoExpr,
                    R: crate::expr::IntoExpr,
                {
                    crate::expr::BinaryOperator::new(
                        #enum_name::#kind,
                        left.into_expr(),
                        right.into_expr(),
                    )
                }
            }
        }
        Arity::Ternary => {
            let doc = format!(
                "Builds a `{} .. {}` ternary operator.",
                var.symbol,
                var.symbol2.as_deref().unwrap_or_default()
            );
            quote! {
                #[doc = #doc]
                pub fn #fn_name<A, B, C>(
                    first: A,
                    second: B,
                    third: C,
                ) -> crate::expr::TernaryOperator
                where
                    A: crate::expr::IntoExpr,
                    B: crate::expr::IntoExpr,
                    C: crate::expr::IntoExpr,
                {
                    crate::expr::TernaryOperator::new(
                        #enum_name::#kind,
                        first.into_expr(),
                        second.into_expr(),
                        third.into_expr(),
                    )
                }
            }
        }
    }
}
