//! Operator kinds and their builder functions.
//!
//! The `Operator` derive generates `symbol`, `second_symbol`, `negated`,
//! `arity` and `is_glued` on [`OperatorKind`], plus one free builder
//! function per variant (`eq`, `between`, `is_null`, ...).

use flexsql_derive::Operator;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Operator)]
pub enum OperatorKind {
    #[operator(binary, symbol = "*")]
    Mul,
    #[operator(binary, symbol = "/")]
    Div,
    #[operator(binary, symbol = "%", builder = "modulo")]
    Mod,
    #[operator(binary, symbol = "+")]
    Add,
    #[operator(binary, symbol = "-")]
    Sub,
    #[operator(binary, symbol = "||")]
    Concat,
    #[operator(unary, symbol = "-")]
    Neg,
    #[operator(binary, symbol = "::", glued)]
    Typecast,
    #[operator(unary, symbol = "IS NULL", negated = "IsNotNull")]
    IsNull,
    #[operator(unary, symbol = "IS NOT NULL", negated = "IsNull")]
    IsNotNull,
    #[operator(unary, symbol = "IS TRUE", negated = "IsNotTrue")]
    IsTrue,
    #[operator(unary, symbol = "IS NOT TRUE", negated = "IsTrue")]
    IsNotTrue,
    #[operator(unary, symbol = "IS FALSE", negated = "IsNotFalse")]
    IsFalse,
    #[operator(unary, symbol = "IS NOT FALSE", negated = "IsFalse")]
    IsNotFalse,
    #[operator(binary, symbol = "IN", negated = "NotIn", builder = "is_in")]
    In,
    #[operator(binary, symbol = "NOT IN", negated = "In")]
    NotIn,
    #[operator(ternary, symbol = "BETWEEN", symbol2 = "AND", negated = "NotBetween")]
    Between,
    #[operator(ternary, symbol = "NOT BETWEEN", symbol2 = "AND", negated = "Between")]
    NotBetween,
    #[operator(binary, symbol = "LIKE", negated = "NotLike")]
    Like,
    #[operator(binary, symbol = "NOT LIKE", negated = "Like")]
    NotLike,
    #[operator(binary, symbol = "ILIKE", negated = "NotILike", builder = "ilike")]
    ILike,
    #[operator(binary, symbol = "NOT ILIKE", negated = "ILike", builder = "not_ilike")]
    NotILike,
    #[operator(binary, symbol = "<")]
    Lt,
    #[operator(binary, symbol = "<=")]
    Lte,
    #[operator(binary, symbol = ">")]
    Gt,
    #[operator(binary, symbol = ">=")]
    Gte,
    #[operator(binary, symbol = "=", negated = "NotEq")]
    Eq,
    #[operator(binary, symbol = "<>", negated = "Eq")]
    NotEq,
    // NOT negates by unwrapping its operand, see `UnaryOperator::negate`
    #[operator(unary, symbol = "NOT")]
    Not,
    #[operator(binary, symbol = "AND")]
    And,
    #[operator(binary, symbol = "OR")]
    Or,
}

impl OperatorKind {
    /// Every kind, in declaration order.
    pub const ALL: [OperatorKind; 31] = [
        OperatorKind::Mul,
        OperatorKind::Div,
        OperatorKind::Mod,
        OperatorKind::Add,
        OperatorKind::Sub,
        OperatorKind::Concat,
        OperatorKind::Neg,
        OperatorKind::Typecast,
        OperatorKind::IsNull,
        OperatorKind::IsNotNull,
        OperatorKind::IsTrue,
        OperatorKind::IsNotTrue,
        OperatorKind::IsFalse,
        OperatorKind::IsNotFalse,
        OperatorKind::In,
        OperatorKind::NotIn,
        OperatorKind::Between,
        OperatorKind::NotBetween,
        OperatorKind::Like,
        OperatorKind::NotLike,
        OperatorKind::ILike,
        OperatorKind::NotILike,
        OperatorKind::Lt,
        OperatorKind::Lte,
        OperatorKind::Gt,
        OperatorKind::Gte,
        OperatorKind::Eq,
        OperatorKind::NotEq,
        OperatorKind::Not,
        OperatorKind::And,
        OperatorKind::Or,
    ];
}

#[cfg(test)]
mod tests {
    use crate::operator::Arity;

    use super::*;

    #[test]
    fn test_negations_are_symmetric() {
        for kind in OperatorKind::ALL {
            if let Some(negated) = kind.negated() {
                assert_eq!(Some(kind), negated.negated(), "{kind:?}");
                assert_eq!(kind.arity(), negated.arity());
            }
        }
    }

    #[test]
    fn test_symbols() {
        assert_eq!("IS NOT NULL", OperatorKind::IsNotNull.symbol());
        assert_eq!("NOT BETWEEN", OperatorKind::NotBetween.symbol());
        assert_eq!(Some("AND"), OperatorKind::NotBetween.second_symbol());
        assert_eq!(None, OperatorKind::Eq.second_symbol());
        assert_eq!(None, OperatorKind::Not.negated());
        assert!(OperatorKind::Typecast.is_glued());
        assert!(!OperatorKind::Concat.is_glued());
    }

    #[test]
    fn test_arity() {
        assert_eq!(Arity::Unary, OperatorKind::Not.arity());
        assert_eq!(Arity::Binary, OperatorKind::In.arity());
        assert_eq!(Arity::Ternary, OperatorKind::Between.arity());
        let ternaries = OperatorKind::ALL
            .iter()
            .filter(|kind| kind.arity() == Arity::Ternary)
            .count();
        assert_eq!(2, ternaries);
    }
}
