//! Code generation context and emission-side tables.
//!
//! `EmissionTables` lives for a whole generation run and is keyed by
//! symbol. `ModuleScope` is created at module entry and consumed at exit.
//! `CodegenContext` bundles both with the program being lowered and the
//! output streams, and is threaded by reference through every emitter.

use ctl_ir::{CheckedProgram, Expr, ExprId, ModuleId, Name, Stmt, StmtId, Symbol, SymbolId, TypeId};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::config::CodegenConfig;
use crate::fold::ConstValue;
use crate::names::clean_name;
use crate::output::CodeWriter;
use crate::types::{InitStrategy, TypeLowering};

/// A module's externally callable function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntryRoutine {
    /// Emitted (unqualified) function name.
    pub name: String,
    /// `Module::name`.
    pub qualified_name: String,
    pub symbol: SymbolId,
}

/// Tables accumulated across a generation run.
///
/// A global symbol is in at most one of `literals` and `globals`.
#[derive(Default, Clone, Debug)]
pub(crate) struct EmissionTables {
    /// Constants replaced by literal text at every reference.
    pub literals: FxHashMap<SymbolId, String>,
    /// Folded values of literal constants, for folding later constants.
    pub folded: FxHashMap<SymbolId, ConstValue>,
    /// Declared module-level variables.
    pub globals: FxHashSet<SymbolId>,
    /// Strategy each declared global was given.
    pub strategies: FxHashMap<SymbolId, InitStrategy>,
    /// Functions called from some constant's initializer.
    pub used_in_init: FxHashSet<SymbolId>,
    /// Constants whose initializer calls a same-module function.
    pub needs_module_init: FxHashSet<SymbolId>,
    /// Placeholder default variable → initializer text.
    pub defaults: FxHashMap<SymbolId, String>,
    /// Rendered complex default expressions, per calling module.
    pub default_exprs: FxHashMap<(ExprId, ModuleId), String>,
    pub entry_routines: Vec<EntryRoutine>,
}

impl EmissionTables {
    pub fn register_literal(&mut self, symbol: SymbolId, text: String, value: Option<ConstValue>) {
        debug_assert!(!self.globals.contains(&symbol), "literal constant already declared");
        if let Some(value) = value {
            self.folded.insert(symbol, value);
        }
        self.literals.insert(symbol, text);
    }

    pub fn register_global(&mut self, symbol: SymbolId, strategy: InitStrategy) {
        debug_assert!(!self.literals.contains_key(&symbol), "declared constant is a literal");
        self.globals.insert(symbol);
        self.strategies.insert(symbol, strategy);
    }

    #[inline]
    pub fn is_deferred(&self, symbol: SymbolId) -> bool {
        self.strategies.get(&symbol) == Some(&InitStrategy::Deferred)
    }
}

/// State of the module being generated.
#[derive(Debug)]
pub(crate) struct ModuleScope {
    pub id: ModuleId,
    /// C++ namespace of the module.
    pub namespace: String,
    /// Statements for the synthesized module initializer, in source order.
    pub deferred_inits: Vec<String>,
}

/// Code generation context.
pub(crate) struct CodegenContext<'a> {
    pub program: &'a CheckedProgram,
    pub config: &'a CodegenConfig,
    pub lowering: TypeLowering<'a>,
    pub tables: &'a mut EmissionTables,
    /// Body stream.
    pub out: &'a mut CodeWriter,
    /// Public declarations stream.
    pub header: &'a mut CodeWriter,
    pub module: ModuleScope,
    /// Return type of the function being emitted.
    pub return_ty: TypeId,
    /// Qualify same-module names too; set while rendering text that may be
    /// pasted into another module.
    pub qualify_all: bool,
}

impl<'a> CodegenContext<'a> {
    pub fn new(
        program: &'a CheckedProgram,
        config: &'a CodegenConfig,
        tables: &'a mut EmissionTables,
        out: &'a mut CodeWriter,
        header: &'a mut CodeWriter,
        module: ModuleId,
    ) -> Self {
        Self {
            program,
            config,
            lowering: TypeLowering::new(&program.types, &program.interner, config),
            tables,
            out,
            header,
            module: ModuleScope {
                id: module,
                namespace: clean_name(program.module_name(module)),
                deferred_inits: Vec::new(),
            },
            return_ty: TypeId::VOID,
            qualify_all: false,
        }
    }

    #[inline]
    pub fn name(&self, name: Name) -> &'static str {
        self.program.interner.lookup(name)
    }

    #[inline]
    pub fn symbol(&self, id: SymbolId) -> &'a Symbol {
        self.program.symbols.get(id)
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &'a Expr {
        self.program.arena.get_expr(id)
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &'a Stmt {
        self.program.arena.get_stmt(id)
    }

    /// Whether `module` is the module being generated.
    #[inline]
    pub fn is_current(&self, module: Option<ModuleId>) -> bool {
        module == Some(self.module.id)
    }

    /// C++ namespace of a module.
    pub fn namespace_of(&self, module: ModuleId) -> String {
        clean_name(self.program.module_name(module))
    }
}
