//! Literal folding for module constants.
//!
//! A constant built purely from literals (and from earlier literal
//! constants) is evaluated here so its substitution text is a single
//! literal. Anything whose evaluation would hit undefined or
//! platform-dependent behavior (integer overflow, division by zero,
//! float-to-half rounding) is not folded.

use ctl_ir::{BinaryOp, ExprId, ExprKind, TypeData, TypeId, UnaryOp};

use crate::config::Precision;
use crate::context::CodegenContext;
use crate::literal::{float_literal, half_literal};

/// A compile-time scalar value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum ConstValue {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Half(f32),
    Float(f32),
}

impl ConstValue {
    /// C++ literal text of the value.
    pub fn render(self) -> String {
        match self {
            ConstValue::Bool(b) => if b { "true" } else { "false" }.to_string(),
            ConstValue::Int(i) => i.to_string(),
            ConstValue::UInt(u) => u.to_string(),
            ConstValue::Half(f) => half_literal(f),
            ConstValue::Float(f) => float_literal(f),
        }
    }
}

/// Evaluate a literal-only expression, converted to its node type.
pub(crate) fn evaluate(ctx: &CodegenContext<'_>, id: ExprId) -> Option<ConstValue> {
    let expr = ctx.expr(id);
    match &expr.kind {
        ExprKind::Bool(b) => Some(ConstValue::Bool(*b)),
        ExprKind::Int(i) => Some(ConstValue::Int(*i)),
        ExprKind::UInt(u) => Some(ConstValue::UInt(*u)),
        ExprKind::Half(bits) => Some(ConstValue::Half(f32::from_bits(*bits))),
        ExprKind::Float(bits) => Some(ConstValue::Float(f32::from_bits(*bits))),
        ExprKind::Name(symbol) => ctx.tables.folded.get(symbol).copied(),
        ExprKind::Unary { op, operand } => {
            let value = convert(ctx, evaluate(ctx, *operand)?, expr.ty)?;
            fold_unary(*op, value)
        }
        ExprKind::Binary {
            op,
            operand_ty,
            left,
            right,
        } => {
            let left = convert(ctx, evaluate(ctx, *left)?, *operand_ty)?;
            let right = convert(ctx, evaluate(ctx, *right)?, *operand_ty)?;
            // Folding runs in f32; double-precision arithmetic stays verbatim.
            if is_double(ctx) && matches!(left, ConstValue::Float(_)) && !op.is_comparison() {
                return None;
            }
            let result = fold_binary(*op, left, right)?;
            convert(ctx, result, expr.ty)
        }
        _ => None,
    }
}

/// Convert a value to a scalar type.
pub(crate) fn convert(ctx: &CodegenContext<'_>, value: ConstValue, ty: TypeId) -> Option<ConstValue> {
    let converted = convert_to(value, ctx.program.types.get(ty))?;
    if is_double(ctx) {
        let exact = match (value, converted) {
            (ConstValue::Int(i), ConstValue::Float(f)) => f64::from(f) == f64::from(i),
            (ConstValue::UInt(u), ConstValue::Float(f)) => f64::from(f) == f64::from(u),
            _ => true,
        };
        if !exact {
            return None;
        }
    }
    Some(converted)
}

#[inline]
fn is_double(ctx: &CodegenContext<'_>) -> bool {
    ctx.config.precision == Precision::Double
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "float/int conversions mirror C++ semantics after range checks"
)]
fn convert_to(value: ConstValue, ty: &TypeData) -> Option<ConstValue> {
    use ConstValue::{Bool, Float, Half, Int, UInt};

    match (ty, value) {
        (TypeData::Bool, Bool(b)) => Some(Bool(b)),
        (TypeData::Bool, Int(i)) => Some(Bool(i != 0)),
        (TypeData::Bool, UInt(u)) => Some(Bool(u != 0)),
        (TypeData::Bool, Half(f) | Float(f)) => Some(Bool(f != 0.0)),

        (TypeData::Int, Bool(b)) => Some(Int(i32::from(b))),
        (TypeData::Int, Int(i)) => Some(Int(i)),
        (TypeData::Int, UInt(u)) => i32::try_from(u).ok().map(Int),
        (TypeData::Int, Half(f) | Float(f)) => {
            let t = f.trunc();
            (t >= -2_147_483_648.0 && t < 2_147_483_648.0).then(|| Int(t as i32))
        }

        (TypeData::UInt, Bool(b)) => Some(UInt(u32::from(b))),
        (TypeData::UInt, Int(i)) => u32::try_from(i).ok().map(UInt),
        (TypeData::UInt, UInt(u)) => Some(UInt(u)),
        (TypeData::UInt, Half(f) | Float(f)) => {
            let t = f.trunc();
            (t >= 0.0 && t < 4_294_967_296.0).then(|| UInt(t as u32))
        }

        (TypeData::Float, Bool(b)) => Some(Float(f32::from(u8::from(b)))),
        (TypeData::Float, Int(i)) => Some(Float(i as f32)),
        (TypeData::Float, UInt(u)) => Some(Float(u as f32)),
        (TypeData::Float, Half(f) | Float(f)) => Some(Float(f)),

        // Narrowing to half rounds; only exact halves fold.
        (TypeData::Half, Half(f)) => Some(Half(f)),

        _ => None,
    }
}

fn fold_unary(op: UnaryOp, value: ConstValue) -> Option<ConstValue> {
    match (op, value) {
        (UnaryOp::Neg, ConstValue::Int(i)) => i.checked_neg().map(ConstValue::Int),
        (UnaryOp::Neg, ConstValue::Float(f)) => Some(ConstValue::Float(-f)),
        (UnaryOp::Neg, ConstValue::Half(f)) => Some(ConstValue::Half(-f)),
        (UnaryOp::Not, ConstValue::Bool(b)) => Some(ConstValue::Bool(!b)),
        (UnaryOp::BitNot, ConstValue::Int(i)) => Some(ConstValue::Int(!i)),
        (UnaryOp::BitNot, ConstValue::UInt(u)) => Some(ConstValue::UInt(!u)),
        _ => None,
    }
}

/// Evaluate a binary operation on two values of the same type.
///
/// Returns `None` on overflow, division by zero, or an operand
/// combination with no folding rule.
pub(crate) fn fold_binary(op: BinaryOp, left: ConstValue, right: ConstValue) -> Option<ConstValue> {
    use ConstValue::{Bool, Float, Half, Int, UInt};

    match (left, right) {
        (Int(a), Int(b)) => match op {
            BinaryOp::Add => a.checked_add(b).map(Int),
            BinaryOp::Sub => a.checked_sub(b).map(Int),
            BinaryOp::Mul => a.checked_mul(b).map(Int),
            BinaryOp::Div => a.checked_div(b).map(Int),
            BinaryOp::Mod => a.checked_rem(b).map(Int),
            BinaryOp::BitAnd => Some(Int(a & b)),
            BinaryOp::BitOr => Some(Int(a | b)),
            BinaryOp::BitXor => Some(Int(a ^ b)),
            BinaryOp::Shl => {
                let shift = u32::try_from(b).ok().filter(|&s| s < 31)?;
                let result = a.checked_shl(shift)?;
                (result >> shift == a).then_some(Int(result))
            }
            BinaryOp::Shr => {
                let shift = u32::try_from(b).ok().filter(|&s| s < 32)?;
                Some(Int(a >> shift))
            }
            _ => compare(op, a, b),
        },
        (UInt(a), UInt(b)) => match op {
            BinaryOp::Add => a.checked_add(b).map(UInt),
            BinaryOp::Sub => a.checked_sub(b).map(UInt),
            BinaryOp::Mul => a.checked_mul(b).map(UInt),
            BinaryOp::Div => a.checked_div(b).map(UInt),
            BinaryOp::Mod => a.checked_rem(b).map(UInt),
            BinaryOp::BitAnd => Some(UInt(a & b)),
            BinaryOp::BitOr => Some(UInt(a | b)),
            BinaryOp::BitXor => Some(UInt(a ^ b)),
            BinaryOp::Shl => a.checked_shl(b).map(UInt),
            BinaryOp::Shr => a.checked_shr(b).map(UInt),
            _ => compare(op, a, b),
        },
        (Float(a), Float(b)) => match op {
            BinaryOp::Add => Some(Float(a + b)),
            BinaryOp::Sub => Some(Float(a - b)),
            BinaryOp::Mul => Some(Float(a * b)),
            BinaryOp::Div if b != 0.0 => Some(Float(a / b)),
            _ => compare(op, a, b),
        },
        // Half arithmetic rounds to half precision at runtime; only compare.
        (Half(a), Half(b)) => compare(op, a, b),
        (Bool(a), Bool(b)) => match op {
            BinaryOp::And => Some(Bool(a && b)),
            BinaryOp::Or => Some(Bool(a || b)),
            BinaryOp::Eq => Some(Bool(a == b)),
            BinaryOp::NotEq => Some(Bool(a != b)),
            _ => None,
        },
        _ => None,
    }
}

fn compare<T: PartialOrd>(op: BinaryOp, a: T, b: T) -> Option<ConstValue> {
    let result = match op {
        BinaryOp::Eq => a == b,
        BinaryOp::NotEq => a != b,
        BinaryOp::Lt => a < b,
        BinaryOp::LtEq => a <= b,
        BinaryOp::Gt => a > b,
        BinaryOp::GtEq => a >= b,
        _ => return None,
    };
    Some(ConstValue::Bool(result))
}
