//! Statement emission.

use ctl_ir::{ExprId, StmtId, StmtKind, StmtRange, TypeId, VarDecl};

use crate::context::CodegenContext;
use crate::error::{CodegenError, Result};
use crate::expr::{coerce, emit_expr};
use crate::init::{render_initializer, Initializer};
use crate::names::unqualified;
use crate::types::DeclMode;

/// Emit every statement of `range`.
pub(crate) fn emit_block(ctx: &mut CodegenContext<'_>, range: StmtRange) -> Result<()> {
    let program = ctx.program;
    for &id in program.arena.get_stmt_list(range) {
        emit_stmt(ctx, id)?;
    }
    Ok(())
}

pub(crate) fn emit_stmt(ctx: &mut CodegenContext<'_>, id: StmtId) -> Result<()> {
    match &ctx.stmt(id).kind {
        StmtKind::Var(decl) => emit_local(ctx, *decl),
        StmtKind::Assign { lhs, rhs } => {
            let target_ty = ctx.expr(*lhs).ty;
            let lhs = emit_expr(ctx, *lhs)?;
            let rhs = coerce(ctx, target_ty, *rhs)?;
            ctx.out.line(&format!("{lhs} = {rhs};"));
            Ok(())
        }
        StmtKind::Expr(expr) => {
            let text = emit_expr(ctx, *expr)?;
            ctx.out.line(&format!("{text};"));
            Ok(())
        }
        StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } => emit_if(ctx, "if", *cond, *then_branch, *else_branch),
        StmtKind::While { cond, body } => {
            let cond = coerce(ctx, TypeId::BOOL, *cond)?;
            ctx.out.line(&format!("while ( {cond} )"));
            ctx.out.open_block();
            emit_block(ctx, *body)?;
            ctx.out.close_block();
            Ok(())
        }
        StmtKind::Return(None) => {
            ctx.out.line("return;");
            Ok(())
        }
        StmtKind::Return(Some(value)) => {
            let return_ty = ctx.return_ty;
            let value = coerce(ctx, return_ty, *value)?;
            ctx.out.line(&format!("return {value};"));
            Ok(())
        }
    }
}

/// `if`/`else if` chain; an else branch holding a single `if` stays flat.
fn emit_if(
    ctx: &mut CodegenContext<'_>,
    keyword: &str,
    cond: ExprId,
    then_branch: StmtRange,
    else_branch: StmtRange,
) -> Result<()> {
    let cond = coerce(ctx, TypeId::BOOL, cond)?;
    ctx.out.line(&format!("{keyword} ( {cond} )"));
    emit_branch(ctx, then_branch)?;

    if else_branch.is_empty() {
        return Ok(());
    }
    let program = ctx.program;
    if let [single] = program.arena.get_stmt_list(else_branch) {
        if let StmtKind::If {
            cond,
            then_branch,
            else_branch,
        } = program.arena.get_stmt(*single).kind
        {
            return emit_if(ctx, "else if", cond, then_branch, else_branch);
        }
    }
    ctx.out.line("else");
    emit_branch(ctx, else_branch)
}

/// A single non-declaration statement goes unbraced on its own line.
fn emit_branch(ctx: &mut CodegenContext<'_>, range: StmtRange) -> Result<()> {
    let program = ctx.program;
    if let [single] = program.arena.get_stmt_list(range) {
        if !matches!(program.arena.get_stmt(*single).kind, StmtKind::Var(_)) {
            ctx.out.indent();
            emit_stmt(ctx, *single)?;
            ctx.out.dedent();
            return Ok(());
        }
    }
    ctx.out.open_block();
    emit_block(ctx, range)?;
    ctx.out.close_block();
    Ok(())
}

/// Local variable declaration.
fn emit_local(ctx: &mut CodegenContext<'_>, decl: VarDecl) -> Result<()> {
    let symbol = ctx.symbol(decl.symbol);
    let name = unqualified(ctx.name(symbol.name));
    let ty = symbol.ty();
    let declaration = ctx
        .lowering
        .declare(name, ty, DeclMode::variable(!symbol.is_writable()));

    let Some(init) = decl.init else {
        ctx.out.line(&format!("{};", declaration.text));
        return Ok(());
    };
    let Some(strategy) = declaration.strategy else {
        return Err(CodegenError::UnresolvedInitStrategy {
            name: name.to_string(),
        });
    };

    match render_initializer(ctx, strategy, ty, init, name)? {
        Initializer::Inline(text) => ctx.out.line(&format!("{}{text}", declaration.text)),
        Initializer::Deferred(statements) => {
            ctx.out.line(&format!("{};", declaration.text));
            ctx.out.open_block();
            for statement in &statements {
                ctx.out.line(statement);
            }
            ctx.out.close_block();
        }
    }
    Ok(())
}
