//! Symbol table entries produced by semantic analysis.
//!
//! Every name reference in the arena points at a `SymbolId`. The symbol
//! records the owning module (or `None` for the implicit built-in scope),
//! and whether it names a variable or a function.

use crate::{ExprId, Name, StringInterner, TypeId};

/// Marker character the semantic stage puts in the names of synthesized
/// parameter-default variables.
pub const DEFAULT_PLACEHOLDER_MARKER: char = '$';

/// Check whether a variable name follows the synthesized-default convention.
#[inline]
pub fn is_default_placeholder(name: &str) -> bool {
    name.contains(DEFAULT_PLACEHOLDER_MARKER)
}

/// Index of a module within a [`CheckedProgram`](crate::CheckedProgram).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct ModuleId(u32);

impl ModuleId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        ModuleId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into the [`SymbolTable`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct SymbolId(u32);

impl SymbolId {
    #[inline]
    pub const fn new(index: u32) -> Self {
        SymbolId(index)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Parameter passing direction.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ParamAccess {
    /// Input only.
    Read,
    /// Output only.
    Write,
    /// Input and output.
    ReadWrite,
}

impl ParamAccess {
    /// Whether the callee may write through this parameter.
    #[inline]
    pub const fn is_output(self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }
}

/// A function parameter.
#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub ty: TypeId,
    pub access: ParamAccess,
    /// Default value expression, when the parameter has one.
    pub default: Option<ExprId>,
}

impl Param {
    pub fn new(name: Name, ty: TypeId, access: ParamAccess) -> Self {
        Self {
            name,
            ty,
            access,
            default: None,
        }
    }

    #[must_use]
    pub fn with_default(mut self, default: ExprId) -> Self {
        self.default = Some(default);
        self
    }
}

/// Signature of a function symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionSig {
    pub params: Vec<Param>,
    pub ret: TypeId,
}

/// What a symbol names.
#[derive(Clone, Debug, PartialEq)]
pub enum SymbolKind {
    Variable { ty: TypeId, writable: bool },
    Function(FunctionSig),
}

/// A resolved symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Symbol {
    pub name: Name,
    /// Owning module; `None` for the implicit built-in scope.
    pub module: Option<ModuleId>,
    pub kind: SymbolKind,
}

impl Symbol {
    pub fn variable(name: Name, module: Option<ModuleId>, ty: TypeId, writable: bool) -> Self {
        Self {
            name,
            module,
            kind: SymbolKind::Variable { ty, writable },
        }
    }

    pub fn function(name: Name, module: Option<ModuleId>, sig: FunctionSig) -> Self {
        Self {
            name,
            module,
            kind: SymbolKind::Function(sig),
        }
    }

    #[inline]
    pub fn is_function(&self) -> bool {
        matches!(self.kind, SymbolKind::Function(_))
    }

    /// Function signature, if this symbol is a function.
    pub fn signature(&self) -> Option<&FunctionSig> {
        match &self.kind {
            SymbolKind::Function(sig) => Some(sig),
            SymbolKind::Variable { .. } => None,
        }
    }

    /// Declared type of a variable; the return type of a function.
    pub fn ty(&self) -> TypeId {
        match &self.kind {
            SymbolKind::Variable { ty, .. } => *ty,
            SymbolKind::Function(sig) => sig.ret,
        }
    }

    /// Whether this is a synthesized parameter-default variable.
    pub fn is_default_placeholder(&self, interner: &StringInterner) -> bool {
        !self.is_function() && is_default_placeholder(interner.lookup(self.name))
    }

    /// Whether a variable may be assigned after declaration.
    pub fn is_writable(&self) -> bool {
        matches!(self.kind, SymbolKind::Variable { writable: true, .. })
    }
}

/// Error when allocating a symbol fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolError {
    /// More than `u32::MAX` symbols were allocated.
    Overflow { count: usize },
}

impl std::fmt::Display for SymbolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolError::Overflow { count } => {
                write!(f, "symbol table exceeded capacity: {count} symbols")
            }
        }
    }
}

impl std::error::Error for SymbolError {}

/// All symbols of a checked program.
#[derive(Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol, returning its id.
    pub fn try_alloc(&mut self, symbol: Symbol) -> Result<SymbolId, SymbolError> {
        let index = u32::try_from(self.symbols.len()).map_err(|_| SymbolError::Overflow {
            count: self.symbols.len(),
        })?;
        self.symbols.push(symbol);
        Ok(SymbolId::new(index))
    }

    /// Add a symbol, returning its id.
    ///
    /// # Panics
    /// Panics if the table exceeds capacity. Use `try_alloc` for fallible
    /// allocation.
    #[track_caller]
    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        self.try_alloc(symbol).unwrap_or_else(|e| panic!("{}", e))
    }

    /// # Panics
    /// Panics if `id` did not come from this table.
    #[inline]
    #[track_caller]
    pub fn get(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.index()]
    }
}
