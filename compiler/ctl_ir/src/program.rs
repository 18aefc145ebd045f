//! The checked program handed to code emitters.

use crate::ast::Module;
use crate::{ExprArena, ModuleId, StringInterner, SymbolTable, TypePool};

/// Output of semantic analysis: every table an emitter needs, plus the
/// modules in dependency order.
#[derive(Default)]
pub struct CheckedProgram {
    pub interner: StringInterner,
    pub types: TypePool,
    pub symbols: SymbolTable,
    pub arena: ExprArena,
    modules: Vec<Module>,
}

impl CheckedProgram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty module and return its id.
    ///
    /// Symbols carry their owning `ModuleId`, so a module is registered
    /// before its symbols are allocated and filled in afterwards.
    pub fn add_module(&mut self, name: &str, file_name: &str) -> ModuleId {
        let id = ModuleId::new(u32::try_from(self.modules.len()).unwrap_or(u32::MAX));
        let name = self.interner.intern(name);
        self.modules.push(Module::new(name, file_name));
        id
    }

    /// # Panics
    /// Panics if `id` did not come from this program.
    #[track_caller]
    pub fn module(&self, id: ModuleId) -> &Module {
        &self.modules[id.index()]
    }

    #[track_caller]
    pub fn module_mut(&mut self, id: ModuleId) -> &mut Module {
        &mut self.modules[id.index()]
    }

    /// Module ids in registration order.
    pub fn module_ids(&self) -> impl Iterator<Item = ModuleId> {
        (0..self.modules.len()).map(|i| ModuleId::new(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    /// Name of a module as a string.
    pub fn module_name(&self, id: ModuleId) -> &'static str {
        self.interner.lookup(self.module(id).name)
    }
}
