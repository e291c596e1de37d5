use crate::language::FloatType;
use crate::runtime::Variant;
use crate::runtime::errors::{ExecResult, ErrorKind};


// Unary operators

pub fn eval_neg(operand: &Variant) -> ExecResult<Variant> {
    match operand {
        Variant::Integer(value) => Ok(Variant::Integer(-value)),
        Variant::Float(value) => Ok(Variant::Float(-value)),
        _ => Err(ErrorKind::UnsupportedUnaryOperand(operand.type_name()).into()),
    }
}

pub fn eval_not(operand: &Variant) -> Variant {
    Variant::from(!operand.truth_value())
}

// Binary operators

fn float_value(operand: &Variant) -> Option<FloatType> {
    match operand {
        Variant::Integer(value) => Some(*value as FloatType),
        Variant::Float(value) => Some(*value),
        _ => None,
    }
}

fn binary_error(lhs: &Variant, rhs: &Variant) -> Box<crate::runtime::RuntimeError> {
    ErrorKind::UnsupportedBinaryOperand(lhs.type_name(), rhs.type_name()).into()
}

macro_rules! eval_arithmetic {
    ($name:ident, $int_fn:expr, $float_fn:expr) => {
        pub fn $name(lhs: &Variant, rhs: &Variant) -> ExecResult<Variant> {
            match (lhs, rhs) {
                (Variant::Integer(lhs), Variant::Integer(rhs)) => $int_fn(*lhs, *rhs),

                _ => match (float_value(lhs), float_value(rhs)) {
                    (Some(lhs), Some(rhs)) => Ok(Variant::Float($float_fn(lhs, rhs))),
                    _ => Err(binary_error(lhs, rhs)),
                },
            }
        }
    };
}

type IntType = crate::language::IntType;

eval_arithmetic!(eval_add,
    |lhs: IntType, rhs: IntType| Ok(Variant::Integer(lhs.wrapping_add(rhs))),
    |lhs, rhs| lhs + rhs
);

eval_arithmetic!(eval_sub,
    |lhs: IntType, rhs: IntType| Ok(Variant::Integer(lhs.wrapping_sub(rhs))),
    |lhs, rhs| lhs - rhs
);

eval_arithmetic!(eval_mul,
    |lhs: IntType, rhs: IntType| Ok(Variant::Integer(lhs.wrapping_mul(rhs))),
    |lhs, rhs| lhs * rhs
);

eval_arithmetic!(eval_div,
    |lhs: IntType, rhs: IntType| {
        if rhs == 0 {
            Err(ErrorKind::DivideByZero.into())
        } else {
            Ok(Variant::Integer(lhs.wrapping_div(rhs)))
        }
    },
    |lhs, rhs| lhs / rhs
);

eval_arithmetic!(eval_mod,
    |lhs: IntType, rhs: IntType| {
        if rhs == 0 {
            Err(ErrorKind::DivideByZero.into())
        } else {
            Ok(Variant::Integer(lhs.wrapping_rem(rhs)))
        }
    },
    |lhs, rhs| lhs % rhs
);

macro_rules! eval_comparison {
    ($name:ident, $int_fn:expr, $float_fn:expr) => {
        pub fn $name(lhs: &Variant, rhs: &Variant) -> ExecResult<Variant> {
            match (lhs, rhs) {
                (Variant::Integer(lhs), Variant::Integer(rhs)) =>
                    Ok(Variant::from($int_fn(lhs, rhs))),

                _ => match (float_value(lhs), float_value(rhs)) {
                    (Some(lhs), Some(rhs)) => Ok(Variant::from($float_fn(lhs, rhs))),
                    _ => Err(binary_error(lhs, rhs)),
                },
            }
        }
    };
}

eval_comparison!(eval_lt, |lhs, rhs| lhs < rhs, |lhs, rhs| lhs < rhs);
eval_comparison!(eval_le, |lhs, rhs| lhs <= rhs, |lhs, rhs| lhs <= rhs);
eval_comparison!(eval_gt, |lhs, rhs| lhs > rhs, |lhs, rhs| lhs > rhs);
eval_comparison!(eval_ge, |lhs, rhs| lhs >= rhs, |lhs, rhs| lhs >= rhs);

pub fn eval_eq(lhs: &Variant, rhs: &Variant) -> Variant {
    Variant::from(lhs.cmp_eq(rhs))
}

pub fn eval_ne(lhs: &Variant, rhs: &Variant) -> Variant {
    Variant::from(!lhs.cmp_eq(rhs))
}
