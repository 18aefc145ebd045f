//! Checked AST nodes.

mod expr;
mod items;
mod operators;
mod stmt;

pub use expr::{Expr, ExprKind};
pub use items::{Function, Module, StructDef};
pub use operators::{BinaryOp, UnaryOp};
pub use stmt::{Stmt, StmtKind, VarDecl};
