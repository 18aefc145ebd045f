//! Module driver.
//!
//! Layout of one module inside the body stream:
//!
//! ```text
//! // Module M (file)
//! namespace M {
//! structs
//! forward declarations of functions called from initializers
//! constants
//! struct __ctlcc_InitVals_M { ... };  (deferred initialization)
//! function bodies
//! } // namespace M
//! ```

use ctl_ir::{Module, VarDecl};

use crate::context::CodegenContext;
use crate::error::{CodegenError, Result};
use crate::function;
use crate::init::{placeholder_text, render_initializer, Initializer};
use crate::names::unqualified;
use crate::plan;
use crate::types::{DeclMode, InitStrategy};

/// Emit one module.
pub(crate) fn emit_module(ctx: &mut CodegenContext<'_>, module: &Module) -> Result<()> {
    plan::plan_module_constants(ctx, module)?;

    let namespace = ctx.module.namespace.clone();
    let banner = format!("// Module {} ({})", ctx.name(module.name), module.file_name);
    ctx.out.blank();
    ctx.out.line(&banner);
    ctx.out.blank();
    ctx.out.line(&format!("namespace {namespace} {{"));
    ctx.out.blank();

    emit_structs(ctx, module);
    function::emit_forward_declarations(ctx, module)?;
    emit_constants(ctx, module)?;
    emit_module_initializer(ctx);
    function::emit_function_bodies(ctx, module)?;

    ctx.out.line(&format!("}} // namespace {namespace}"));
    Ok(())
}

fn emit_structs(ctx: &mut CodegenContext<'_>, module: &Module) {
    let program = ctx.program;
    for def in &module.structs {
        let Some((name, members)) = program.types.as_struct(def.ty) else {
            continue;
        };
        let head = format!("struct {}", unqualified(ctx.name(name)));
        ctx.out.line(&head);
        ctx.out.open_block();
        for member in members {
            let decl = ctx
                .lowering
                .declare(ctx.name(member.name), member.ty, DeclMode::default());
            let line = format!("{};", decl.text);
            ctx.out.line(&line);
        }
        ctx.out.close_block_with(";");
        ctx.out.blank();
    }
}

#[tracing::instrument(level = "debug", skip_all)]
fn emit_constants(ctx: &mut CodegenContext<'_>, module: &Module) -> Result<()> {
    for decl in &module.constants {
        emit_constant(ctx, *decl)?;
    }
    if !module.constants.is_empty() {
        ctx.out.blank();
    }
    Ok(())
}

fn emit_constant(ctx: &mut CodegenContext<'_>, decl: VarDecl) -> Result<()> {
    if ctx.tables.literals.contains_key(&decl.symbol) {
        return Ok(());
    }

    let symbol = ctx.symbol(decl.symbol);
    let name = unqualified(ctx.name(symbol.name));
    let ty = symbol.ty();

    // Legacy dialect: initializers that call module functions, or read
    // deferred globals, run inside the module initializer.
    let is_placeholder = symbol.is_default_placeholder(&ctx.program.interner);
    let forced = !ctx.config.is_modern()
        && decl.init.is_some_and(|init| {
            (!is_placeholder && ctx.tables.needs_module_init.contains(&decl.symbol))
                || plan::uses_deferred_globals(ctx, init)
        });
    let is_const = !symbol.is_writable() && !forced;

    let declaration = ctx.lowering.declare(name, ty, DeclMode::variable(is_const));
    let strategy = if forced {
        Some(InitStrategy::Deferred)
    } else {
        declaration.strategy
    };
    let Some(strategy) = strategy else {
        return Err(CodegenError::UnresolvedInitStrategy {
            name: name.to_string(),
        });
    };

    if is_placeholder {
        if let Some(init) = decl.init {
            let text = placeholder_text(ctx, name, strategy, ty, init)?;
            tracing::trace!(placeholder = name, text = %text, "default value");
            ctx.tables.defaults.insert(decl.symbol, text);
        }
        return Ok(());
    }

    let Some(init) = decl.init else {
        ctx.tables.register_global(decl.symbol, strategy);
        ctx.out.line(&format!("{};", declaration.text));
        return Ok(());
    };

    match render_initializer(ctx, strategy, ty, init, name)? {
        Initializer::Inline(text) => {
            ctx.tables.register_global(decl.symbol, strategy);
            ctx.out.line(&format!("{}{text}", declaration.text));
        }
        Initializer::Deferred(statements) => {
            tracing::debug!(constant = name, "deferred to module initializer");
            ctx.tables.register_global(decl.symbol, InitStrategy::Deferred);
            let declaration = ctx.lowering.declare(name, ty, DeclMode::variable(false));
            ctx.out.line(&format!("{};", declaration.text));
            ctx.module.deferred_inits.extend(statements);
        }
    }
    Ok(())
}

/// One static instance whose constructor runs the deferred statements.
fn emit_module_initializer(ctx: &mut CodegenContext<'_>) {
    if ctx.module.deferred_inits.is_empty() {
        return;
    }
    let namespace = ctx.module.namespace.clone();
    let statements = std::mem::take(&mut ctx.module.deferred_inits);

    ctx.out.line(&format!("struct __ctlcc_InitVals_{namespace}"));
    ctx.out.open_block();
    ctx.out.line(&format!("__ctlcc_InitVals_{namespace}( void )"));
    ctx.out.open_block();
    for statement in &statements {
        ctx.out.line(statement);
    }
    ctx.out.close_block();
    ctx.out.close_block_with(";");
    ctx.out.line(&format!(
        "static __ctlcc_InitVals_{namespace} __ctlcc_GlobalInitializer_{namespace};"
    ));
    ctx.out.blank();
}

#[cfg(test)]
mod tests;
