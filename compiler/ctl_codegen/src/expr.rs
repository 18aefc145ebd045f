//! Expression emission.
//!
//! Every expression lowers to a `String`. Binary operations are always
//! fully parenthesized; the AST keeps no source parentheses.

use ctl_ir::{ExprId, ExprKind, ExprRange, Param, TypeId};

use crate::aggregate;
use crate::context::CodegenContext;
use crate::error::{CodegenError, Result};
use crate::literal::{float_literal, half_literal, string_literal};
use crate::names;
use crate::types::TypeOps;

/// Emit `id` converted to `to`.
pub(crate) fn coerce(ctx: &mut CodegenContext<'_>, to: TypeId, id: ExprId) -> Result<String> {
    let text = emit_expr(ctx, id)?;
    let from = ctx.expr(id).ty;
    Ok(ctx.lowering.cast(to, from, text))
}

/// Emit an expression.
pub(crate) fn emit_expr(ctx: &mut CodegenContext<'_>, id: ExprId) -> Result<String> {
    let program = ctx.program;
    let expr = program.arena.get_expr(id);
    match &expr.kind {
        ExprKind::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
        ExprKind::Int(i) => Ok(i.to_string()),
        ExprKind::UInt(u) => Ok(u.to_string()),
        ExprKind::Half(bits) => Ok(half_literal(f32::from_bits(*bits))),
        ExprKind::Float(bits) => Ok(float_literal(f32::from_bits(*bits))),
        ExprKind::String(s) => Ok(string_literal(ctx.name(*s))),

        ExprKind::Name(symbol) => Ok(names::resolve(ctx, *symbol)),

        ExprKind::Binary {
            op,
            operand_ty,
            left,
            right,
        } => {
            let left = coerce(ctx, *operand_ty, *left)?;
            let right = coerce(ctx, *operand_ty, *right)?;
            Ok(format!("({left} {} {right})", ctx.lowering.binary_token(*op)))
        }

        ExprKind::Unary { op, operand } => {
            let token = ctx.lowering.unary_token(*op);
            let operand = coerce(ctx, expr.ty, *operand)?;
            // `- -1.5` must not become `--1.5`
            if operand.starts_with(token) {
                Ok(format!("{token}({operand})"))
            } else {
                Ok(format!("{token}{operand}"))
            }
        }

        ExprKind::Index { array, index } => {
            let array = emit_expr(ctx, *array)?;
            let index = coerce(ctx, TypeId::INT, *index)?;
            Ok(format!("{array}[{index}]"))
        }

        ExprKind::Member { object, member } => {
            let object = emit_expr(ctx, *object)?;
            Ok(format!("{object}.{}", ctx.name(*member)))
        }

        ExprKind::Call { callee, args } => emit_call(ctx, *callee, *args),

        ExprKind::Value { elements } => aggregate::lower_value_expression(ctx, expr.ty, *elements),

        ExprKind::Size { array } => {
            let array_ty = program.arena.get_expr(*array).ty;
            match program.types.as_array(array_ty) {
                Some((_, size)) if size > 0 => Ok(size.to_string()),
                _ => Err(CodegenError::Unimplemented("runtime size of an unsized array")),
            }
        }
    }
}

/// Emit a call, filling omitted trailing arguments from parameter defaults.
fn emit_call(ctx: &mut CodegenContext<'_>, callee: ExprId, args: ExprRange) -> Result<String> {
    let program = ctx.program;
    let ExprKind::Name(function) = program.arena.get_expr(callee).kind else {
        return Err(CodegenError::Unimplemented("call through a computed callee"));
    };
    let symbol = program.symbols.get(function);
    let Some(sig) = symbol.signature() else {
        return Err(CodegenError::UnexpectedSymbol {
            name: ctx.name(symbol.name).to_string(),
        });
    };

    let function_text = names::resolve(ctx, function);
    let args = program.arena.get_expr_list(args);
    if args.len() > sig.params.len() {
        return Err(CodegenError::TooManyArguments {
            function: function_text,
            supplied: args.len(),
            expected: sig.params.len(),
        });
    }

    let mut rendered = Vec::with_capacity(sig.params.len());
    for (i, param) in sig.params.iter().enumerate() {
        let text = match args.get(i) {
            Some(&arg) => coerce(ctx, param.ty, arg)?,
            None => default_argument(ctx, &function_text, param)?,
        };
        rendered.push(text);
    }

    if rendered.is_empty() {
        Ok(format!("{function_text}()"))
    } else {
        Ok(format!("{function_text}( {} )", rendered.join(", ")))
    }
}

/// Text of a parameter's default value at a call site.
fn default_argument(ctx: &mut CodegenContext<'_>, function: &str, param: &Param) -> Result<String> {
    let Some(default) = param.default else {
        return Err(CodegenError::MissingArgument {
            function: function.to_string(),
            param: ctx.name(param.name).to_string(),
        });
    };

    let default_expr = ctx.expr(default);
    if let ExprKind::Name(placeholder) = default_expr.kind {
        if let Some(text) = ctx.tables.defaults.get(&placeholder) {
            return Ok(text.clone());
        }
        let text = names::resolve(ctx, placeholder);
        return Ok(ctx.lowering.cast(param.ty, default_expr.ty, text));
    }

    let key = (default, ctx.module.id);
    if let Some(text) = ctx.tables.default_exprs.get(&key) {
        return Ok(text.clone());
    }
    let text = coerce(ctx, param.ty, default)?;
    ctx.tables.default_exprs.insert(key, text.clone());
    Ok(text)
}
