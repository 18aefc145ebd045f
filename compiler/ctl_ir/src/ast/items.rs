//! Module-level items.

use crate::{Name, StmtRange, SymbolId, TypeId};

use super::VarDecl;

/// A struct definition. `ty` is the interned struct type holding members.
#[derive(Clone, Debug, PartialEq)]
pub struct StructDef {
    pub name: Name,
    pub ty: TypeId,
}

/// A function definition. The signature lives on the symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Function {
    pub symbol: SymbolId,
    pub body: StmtRange,
}

/// A checked module.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    pub name: Name,
    /// Originating source file.
    pub file_name: String,
    pub structs: Vec<StructDef>,
    /// Module-level constants in declaration order.
    pub constants: Vec<VarDecl>,
    pub functions: Vec<Function>,
}

impl Module {
    pub fn new(name: Name, file_name: impl Into<String>) -> Self {
        Self {
            name,
            file_name: file_name.into(),
            structs: Vec::new(),
            constants: Vec::new(),
            functions: Vec::new(),
        }
    }
}
