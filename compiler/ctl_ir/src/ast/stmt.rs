//! Statement nodes.

use crate::{ExprId, StmtRange, SymbolId};

/// A variable declaration: module constant or function local.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct VarDecl {
    pub symbol: SymbolId,
    pub init: Option<ExprId>,
}

impl VarDecl {
    pub fn new(symbol: SymbolId, init: Option<ExprId>) -> Self {
        Self { symbol, init }
    }
}

/// A statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Stmt {
    pub kind: StmtKind,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind) -> Self {
        Self { kind }
    }
}

/// Statement variants.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StmtKind {
    Var(VarDecl),
    Assign { lhs: ExprId, rhs: ExprId },
    Expr(ExprId),
    /// Conditional. An empty `else_branch` means no else.
    If {
        cond: ExprId,
        then_branch: StmtRange,
        else_branch: StmtRange,
    },
    While { cond: ExprId, body: StmtRange },
    Return(Option<ExprId>),
}
