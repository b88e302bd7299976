use proc_macro::TokenStream;

mod builder;
mod operator;

/// Derives the symbol tables of an operator kind enum and one builder
/// function per variant.
///
/// Each variant carries `#[operator(unary | binary | ternary, symbol = "..")]`
/// plus the optional `symbol2`, `negated`, `glued` and `builder` keys.
#[proc_macro_derive(Operator, attributes(operator))]
pub fn operator_kind(input: TokenStream) -> TokenStream {
    operator::operator_kind_impl(input)
}
