//! Expression nodes.
//!
//! A closed set of node kinds; consumers match exhaustively. Float and half
//! literals are stored as `f32` bits so nodes stay `Eq + Hash`.

use crate::{ExprId, ExprRange, Name, SymbolId, TypeId};

use super::{BinaryOp, UnaryOp};

/// An expression with its resolved type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Expr {
    pub kind: ExprKind,
    pub ty: TypeId,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, ty: TypeId) -> Self {
        Self { kind, ty }
    }
}

/// Expression variants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Bool(bool),
    Int(i32),
    UInt(u32),
    /// Half literal, widened to `f32` and stored as bits.
    Half(u32),
    /// Float literal stored as `f32` bits.
    Float(u32),
    String(Name),

    /// Reference to a variable or function.
    Name(SymbolId),

    /// Binary operation. Both operands are coerced to `operand_ty`.
    Binary {
        op: BinaryOp,
        operand_ty: TypeId,
        left: ExprId,
        right: ExprId,
    },

    /// Unary operation on an operand of the node's type.
    Unary { op: UnaryOp, operand: ExprId },

    Index { array: ExprId, index: ExprId },

    Member { object: ExprId, member: Name },

    /// Call; `callee` is a `Name` expression resolving to a function.
    Call { callee: ExprId, args: ExprRange },

    /// Aggregate literal. `elements` are the flattened scalar leaves in
    /// declaration order of the node's (array or struct) type.
    Value { elements: ExprRange },

    /// Runtime size of an array.
    Size { array: ExprId },
}

impl ExprKind {
    /// Float literal from an `f32`.
    pub fn float(value: f32) -> Self {
        ExprKind::Float(value.to_bits())
    }

    /// Half literal from its `f32` widening.
    pub fn half(value: f32) -> Self {
        ExprKind::Half(value.to_bits())
    }

    /// True for literal leaves (bool, int, uint, half, float, string).
    pub const fn is_literal(&self) -> bool {
        matches!(
            self,
            ExprKind::Bool(_)
                | ExprKind::Int(_)
                | ExprKind::UInt(_)
                | ExprKind::Half(_)
                | ExprKind::Float(_)
                | ExprKind::String(_)
        )
    }
}
