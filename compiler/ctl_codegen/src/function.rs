//! Function emission.
//!
//! Two passes over a module's functions: `emit_forward_declarations` runs
//! before the constants and declares only the functions some initializer
//! calls; `emit_function_bodies` runs last and emits every body.

use ctl_ir::{Function, FunctionSig, Module, Symbol};

use crate::context::{CodegenContext, EntryRoutine};
use crate::error::{CodegenError, Result};
use crate::names::{function_name, is_entry_routine};
use crate::stmt;
use crate::types::DeclMode;

fn signature_of<'a>(ctx: &CodegenContext<'a>, symbol: &'a Symbol) -> Result<&'a FunctionSig> {
    symbol
        .signature()
        .ok_or_else(|| CodegenError::UnexpectedSymbol {
            name: ctx.name(symbol.name).to_string(),
        })
}

/// `( const float x, float &y )`, or `()` without parameters.
fn parameter_list(ctx: &CodegenContext<'_>, sig: &FunctionSig) -> String {
    if sig.params.is_empty() {
        return "()".to_string();
    }
    let params: Vec<String> = sig
        .params
        .iter()
        .map(|param| {
            ctx.lowering
                .declare(ctx.name(param.name), param.ty, DeclMode::param(param.access))
                .text
        })
        .collect();
    format!("( {} )", params.join(", "))
}

/// Forward-declare the functions called from constant initializers.
#[tracing::instrument(level = "debug", skip_all)]
pub(crate) fn emit_forward_declarations(ctx: &mut CodegenContext<'_>, module: &Module) -> Result<()> {
    let mut emitted = false;
    for function in &module.functions {
        if !ctx.tables.used_in_init.contains(&function.symbol) {
            continue;
        }
        let symbol = ctx.symbol(function.symbol);
        let sig = signature_of(ctx, symbol)?;
        let name = function_name(ctx, symbol);
        let storage = if is_entry_routine(ctx, symbol) { "" } else { "static " };
        let line = format!(
            "{storage}{} {name}{};",
            ctx.lowering.spelling(sig.ret),
            parameter_list(ctx, sig)
        );
        tracing::trace!(function = %name, "forward declaration");
        ctx.out.line(&line);
        emitted = true;
    }
    if emitted {
        ctx.out.blank();
    }
    Ok(())
}

/// Emit the full body of every function.
pub(crate) fn emit_function_bodies(ctx: &mut CodegenContext<'_>, module: &Module) -> Result<()> {
    for function in &module.functions {
        emit_function(ctx, function)?;
    }
    Ok(())
}

#[tracing::instrument(level = "debug", skip_all, fields(function = ctx.name(ctx.symbol(function.symbol).name)))]
fn emit_function(ctx: &mut CodegenContext<'_>, function: &Function) -> Result<()> {
    let symbol = ctx.symbol(function.symbol);
    let sig = signature_of(ctx, symbol)?;
    let name = function_name(ctx, symbol);
    let ret = ctx.lowering.spelling(sig.ret);
    let params = parameter_list(ctx, sig);
    let is_entry = is_entry_routine(ctx, symbol);

    if is_entry {
        let namespace = ctx.module.namespace.clone();
        let declaration = format!("namespace {namespace} {{\n{ret} {name}{params};\n}} // namespace {namespace}");
        ctx.header.line(&declaration);
        tracing::debug!(entry = %name, "entry routine");
        ctx.tables.entry_routines.push(EntryRoutine {
            qualified_name: format!("{namespace}::{name}"),
            name: name.clone(),
            symbol: function.symbol,
        });
    }

    let storage = match (is_entry, ctx.tables.used_in_init.contains(&function.symbol)) {
        (true, _) => "",
        (false, true) => "static ",
        (false, false) => "static inline ",
    };
    let head = format!("{storage}{ret}\n{name}{params}");
    ctx.out.line(&head);
    ctx.out.open_block();
    ctx.return_ty = sig.ret;
    stmt::emit_block(ctx, function.body)?;
    ctx.out.close_block();
    ctx.out.blank();
    Ok(())
}
