//! Shared test utilities: a builder for checked programs and a way to run
//! emitters against one module. Only compiled in test builds.

#![allow(clippy::unwrap_used, dead_code)]

use ctl_ir::{
    BinaryOp, CheckedProgram, Expr, ExprId, ExprKind, Function, FunctionSig, Member, ModuleId,
    Name, Param, ParamAccess, Stmt, StmtId, StmtKind, StructDef, Symbol, SymbolId, TypeId,
    VarDecl,
};

use crate::config::CodegenConfig;
use crate::context::{CodegenContext, EmissionTables};
use crate::error::Result;
use crate::generator::{generate, GeneratedCode};
use crate::output::CodeWriter;

/// Builds a `CheckedProgram` the way semantic analysis would hand it over.
#[derive(Default)]
pub(crate) struct Fixture {
    pub program: CheckedProgram,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a module read from `<name>.ctl`.
    pub fn module(&mut self, name: &str) -> ModuleId {
        self.program.add_module(name, &format!("{name}.ctl"))
    }

    pub fn name(&self, text: &str) -> Name {
        self.program.interner.intern(text)
    }

    pub fn array(&mut self, elem: TypeId, size: u32) -> TypeId {
        self.program.types.array(elem, size)
    }

    // ===== Expressions =====

    pub fn expr(&mut self, kind: ExprKind, ty: TypeId) -> ExprId {
        self.program.arena.alloc_expr(Expr::new(kind, ty))
    }

    pub fn int(&mut self, value: i32) -> ExprId {
        self.expr(ExprKind::Int(value), TypeId::INT)
    }

    pub fn uint(&mut self, value: u32) -> ExprId {
        self.expr(ExprKind::UInt(value), TypeId::UINT)
    }

    pub fn float(&mut self, value: f32) -> ExprId {
        self.expr(ExprKind::float(value), TypeId::FLOAT)
    }

    pub fn half(&mut self, value: f32) -> ExprId {
        self.expr(ExprKind::half(value), TypeId::HALF)
    }

    pub fn boolean(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Bool(value), TypeId::BOOL)
    }

    pub fn string(&mut self, value: &str) -> ExprId {
        let name = self.name(value);
        self.expr(ExprKind::String(name), TypeId::STRING)
    }

    /// Reference to a symbol, typed by the symbol.
    pub fn name_ref(&mut self, symbol: SymbolId) -> ExprId {
        let ty = self.program.symbols.get(symbol).ty();
        self.expr(ExprKind::Name(symbol), ty)
    }

    /// Binary operation on operands of the left operand's type.
    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        let operand_ty = self.program.arena.get_expr(left).ty;
        let ty = if op.is_comparison() || matches!(op, BinaryOp::And | BinaryOp::Or) {
            TypeId::BOOL
        } else {
            operand_ty
        };
        self.expr(
            ExprKind::Binary {
                op,
                operand_ty,
                left,
                right,
            },
            ty,
        )
    }

    pub fn call(&mut self, function: SymbolId, args: &[ExprId]) -> ExprId {
        let callee = self.name_ref(function);
        let ty = self.program.symbols.get(function).ty();
        let args = self.program.arena.alloc_expr_list(args.iter().copied());
        self.expr(ExprKind::Call { callee, args }, ty)
    }

    /// Aggregate literal of `ty` from its flattened leaves.
    pub fn value(&mut self, ty: TypeId, leaves: &[ExprId]) -> ExprId {
        let elements = self.program.arena.alloc_expr_list(leaves.iter().copied());
        self.expr(ExprKind::Value { elements }, ty)
    }

    // ===== Symbols and items =====

    pub fn variable(
        &mut self,
        module: Option<ModuleId>,
        name: &str,
        ty: TypeId,
        writable: bool,
    ) -> SymbolId {
        let name = self.name(name);
        self.program
            .symbols
            .alloc(Symbol::variable(name, module, ty, writable))
    }

    /// Read-only module constant, appended to the module's constants.
    pub fn constant(
        &mut self,
        module: ModuleId,
        name: &str,
        ty: TypeId,
        init: Option<ExprId>,
    ) -> SymbolId {
        let symbol = self.variable(Some(module), name, ty, false);
        self.program
            .module_mut(module)
            .constants
            .push(VarDecl::new(symbol, init));
        symbol
    }

    pub fn param(&self, name: &str, ty: TypeId, access: ParamAccess) -> Param {
        Param::new(self.name(name), ty, access)
    }

    /// Function symbol without a body (runtime builtins, other modules).
    pub fn function_symbol(
        &mut self,
        module: Option<ModuleId>,
        name: &str,
        params: Vec<Param>,
        ret: TypeId,
    ) -> SymbolId {
        let name = self.name(name);
        self.program
            .symbols
            .alloc(Symbol::function(name, module, FunctionSig { params, ret }))
    }

    /// Function defined in `module` with body `body`.
    pub fn function(
        &mut self,
        module: ModuleId,
        name: &str,
        params: Vec<Param>,
        ret: TypeId,
        body: &[StmtId],
    ) -> SymbolId {
        let symbol = self.function_symbol(Some(module), name, params, ret);
        let body = self.stmts(body);
        self.program
            .module_mut(module)
            .functions
            .push(Function { symbol, body });
        symbol
    }

    pub fn stmt(&mut self, kind: StmtKind) -> StmtId {
        self.program.arena.alloc_stmt(Stmt::new(kind))
    }

    pub fn stmts(&mut self, ids: &[StmtId]) -> ctl_ir::StmtRange {
        self.program.arena.alloc_stmt_list(ids.iter().copied())
    }

    pub fn ret(&mut self, value: ExprId) -> StmtId {
        self.stmt(StmtKind::Return(Some(value)))
    }

    /// Struct type defined in `module`.
    pub fn struct_def(&mut self, module: ModuleId, name: &str, members: &[(&str, TypeId)]) -> TypeId {
        let members = members
            .iter()
            .map(|&(member, ty)| Member::new(self.name(member), ty))
            .collect();
        let name = self.name(name);
        let ty = self.program.types.struct_type(name, members);
        self.program
            .module_mut(module)
            .structs
            .push(StructDef { name, ty });
        ty
    }

    // ===== Running =====

    pub fn generate(&self, config: CodegenConfig) -> Result<GeneratedCode> {
        generate(&self.program, config)
    }

    /// Body text of a successful run, without the preamble.
    pub fn module_code(&self, config: CodegenConfig) -> String {
        let preamble = crate::runtime::preamble(&config);
        let code = self.generate(config).unwrap();
        code.body[preamble.len()..].to_string()
    }

    /// Run `f` with a context positioned in `module`, using `tables`.
    pub fn with_context<R>(
        &self,
        config: &CodegenConfig,
        tables: &mut EmissionTables,
        module: ModuleId,
        f: impl FnOnce(&mut CodegenContext<'_>) -> R,
    ) -> (R, String) {
        let mut out = CodeWriter::new();
        let mut header = CodeWriter::new();
        let result = {
            let mut ctx =
                CodegenContext::new(&self.program, config, tables, &mut out, &mut header, module);
            f(&mut ctx)
        };
        (result, out.into_string())
    }
}
