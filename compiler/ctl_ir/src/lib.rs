//! CTL IR - the checked program model.
//!
//! This crate holds what semantic analysis hands to a code emitter:
//! - Names for interned identifiers
//! - Types in a structural type pool
//! - Symbols (variables and functions, with their owning module)
//! - A flat arena of expressions and statements
//! - Modules with their structs, constants and functions
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: Strings → Name(u32), Types → TypeId(u32)
//! - **Flatten Everything**: No Box<Expr>, use ExprId(u32) indices
//! - **Read-only downstream**: emitters never mutate the program

mod arena;
pub mod ast;
mod expr_id;
mod interner;
mod name;
mod program;
mod symbol;
mod types;

pub use arena::ExprArena;
pub use ast::{
    BinaryOp, Expr, ExprKind, Function, Module, Stmt, StmtKind, StructDef, UnaryOp, VarDecl,
};
pub use expr_id::{ExprId, ExprRange, StmtId, StmtRange};
pub use interner::{InternError, StringInterner};
pub use name::Name;
pub use program::CheckedProgram;
pub use symbol::{
    is_default_placeholder, FunctionSig, ModuleId, Param, ParamAccess, Symbol, SymbolId,
    SymbolError, SymbolKind, SymbolTable, DEFAULT_PLACEHOLDER_MARKER,
};
pub use types::{Member, TypeData, TypeId, TypePool};
