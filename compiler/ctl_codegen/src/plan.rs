//! Global Initialization Planner
//!
//! Runs over a module's constants before anything is emitted:
//!
//! 1. Constants built purely from literals become literal substitutions
//!    and are never declared.
//! 2. Every other initializer is scanned for calls to functions of the
//!    current module. Those functions are forward-declared, and the
//!    constant is marked as needing the module initializer.
//!
//! During constant emission, `uses_deferred_globals` upgrades constants
//! that depend on deferred same-module globals in the legacy dialect.

use ctl_ir::{ExprId, ExprKind, Module, SymbolId};

use crate::context::CodegenContext;
use crate::error::Result;
use crate::expr::coerce;
use crate::fold;

/// Whether an expression is built only from literals and literal constants.
pub(crate) fn is_all_literals(ctx: &CodegenContext<'_>, id: ExprId) -> bool {
    let expr = ctx.expr(id);
    match &expr.kind {
        kind if kind.is_literal() => true,
        ExprKind::Name(symbol) => ctx.tables.literals.contains_key(symbol),
        ExprKind::Value { elements } => ctx
            .program
            .arena
            .get_expr_list(*elements)
            .iter()
            .all(|&e| is_all_literals(ctx, e)),
        ExprKind::Binary { left, right, .. } => {
            is_all_literals(ctx, *left) && is_all_literals(ctx, *right)
        }
        ExprKind::Unary { operand, .. } => is_all_literals(ctx, *operand),
        _ => false,
    }
}

/// Record every same-module function called from `id` as used in init.
///
/// Returns whether any such call exists. Always visits the whole tree so
/// that every reachable function is recorded.
pub(crate) fn scan_initializer_calls(ctx: &mut CodegenContext<'_>, id: ExprId) -> bool {
    let program = ctx.program;
    match &program.arena.get_expr(id).kind {
        ExprKind::Call { callee, args } => {
            let mut needed = false;
            if let ExprKind::Name(function) = program.arena.get_expr(*callee).kind {
                if ctx.is_current(program.symbols.get(function).module) {
                    ctx.tables.used_in_init.insert(function);
                    needed = true;
                }
            }
            for &arg in program.arena.get_expr_list(*args) {
                needed |= scan_initializer_calls(ctx, arg);
            }
            needed
        }
        ExprKind::Value { elements } => {
            let mut needed = false;
            for &element in program.arena.get_expr_list(*elements) {
                needed |= scan_initializer_calls(ctx, element);
            }
            needed
        }
        ExprKind::Binary { left, right, .. } => {
            let left = scan_initializer_calls(ctx, *left);
            let right = scan_initializer_calls(ctx, *right);
            left || right
        }
        ExprKind::Index { array, index } => {
            let array = scan_initializer_calls(ctx, *array);
            let index = scan_initializer_calls(ctx, *index);
            array || index
        }
        ExprKind::Unary { operand, .. } => scan_initializer_calls(ctx, *operand),
        ExprKind::Member { object, .. } => scan_initializer_calls(ctx, *object),
        ExprKind::Size { array } => scan_initializer_calls(ctx, *array),
        _ => false,
    }
}

/// Whether `id` references a same-module global given deferred initialization.
pub(crate) fn uses_deferred_globals(ctx: &CodegenContext<'_>, id: ExprId) -> bool {
    let program = ctx.program;
    let any = |ids: &[ExprId]| ids.iter().any(|&e| uses_deferred_globals(ctx, e));
    match &program.arena.get_expr(id).kind {
        ExprKind::Name(symbol) => {
            ctx.is_current(program.symbols.get(*symbol).module) && ctx.tables.is_deferred(*symbol)
        }
        ExprKind::Value { elements } => any(program.arena.get_expr_list(*elements)),
        ExprKind::Call { args, .. } => any(program.arena.get_expr_list(*args)),
        ExprKind::Binary { left, right, .. } => any(&[*left, *right][..]),
        ExprKind::Index { array, index } => any(&[*array, *index][..]),
        ExprKind::Unary { operand, .. } => uses_deferred_globals(ctx, *operand),
        ExprKind::Member { object, .. } => uses_deferred_globals(ctx, *object),
        ExprKind::Size { array } => uses_deferred_globals(ctx, *array),
        _ => false,
    }
}

/// Classify the current module's constants before emission.
#[tracing::instrument(level = "debug", skip_all, fields(module = %ctx.module.namespace))]
pub(crate) fn plan_module_constants(ctx: &mut CodegenContext<'_>, module: &Module) -> Result<()> {
    for decl in &module.constants {
        let Some(init) = decl.init else {
            continue;
        };

        let is_value = matches!(ctx.expr(init).kind, ExprKind::Value { .. });
        if !is_value && is_all_literals(ctx, init) {
            register_literal(ctx, decl.symbol, init)?;
        } else if scan_initializer_calls(ctx, init) {
            let symbol = ctx.symbol(decl.symbol);
            // Placeholders run at call sites, not in the initializer.
            if !symbol.is_default_placeholder(&ctx.program.interner) {
                tracing::trace!(constant = ctx.name(symbol.name), "calls module function");
                ctx.tables.needs_module_init.insert(decl.symbol);
            }
        }
    }
    Ok(())
}

fn register_literal(ctx: &mut CodegenContext<'_>, symbol: SymbolId, init: ExprId) -> Result<()> {
    let ty = ctx.symbol(symbol).ty();
    let folded = fold::evaluate(ctx, init).and_then(|value| fold::convert(ctx, value, ty));
    let text = match folded {
        Some(value) => value.render(),
        None => coerce(ctx, ty, init)?,
    };
    tracing::debug!(
        constant = ctx.name(ctx.symbol(symbol).name),
        text = %text,
        folded = folded.is_some(),
        "literal substitution"
    );
    ctx.tables.register_literal(symbol, text, folded);
    Ok(())
}
