//! Initializer forms for declarations.

use ctl_ir::{ExprId, ExprKind, TypeId};

use crate::aggregate;
use crate::context::CodegenContext;
use crate::error::{CodegenError, Result};
use crate::expr::coerce;
use crate::names;
use crate::types::InitStrategy;

/// How an initializer attaches to its declaration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Initializer {
    /// Text following the declared name: ` = x;` or `( x );`.
    Inline(String),
    /// Statements run after a bare declaration.
    Deferred(Vec<String>),
}

/// Render the initializer of a variable named `target`.
pub(crate) fn render_initializer(
    ctx: &mut CodegenContext<'_>,
    strategy: InitStrategy,
    ty: TypeId,
    init: ExprId,
    target: &str,
) -> Result<Initializer> {
    let kind = &ctx.expr(init).kind;
    let initializer = match (strategy, kind) {
        (InitStrategy::Assign, ExprKind::Value { elements }) => {
            Initializer::Inline(format!(" = {};", aggregate::lower_direct(ctx, ty, *elements, target)?))
        }
        (InitStrategy::Assign, _) => Initializer::Inline(format!(" = {};", coerce(ctx, ty, init)?)),
        (InitStrategy::Construct, ExprKind::Value { elements }) if ctx.lowering.is_native(ty) => {
            let args = aggregate::lower_constructor_args(ctx, ty, *elements, target)?;
            Initializer::Inline(format!("( {args} );"))
        }
        (InitStrategy::Construct | InitStrategy::Deferred, ExprKind::Value { elements }) => {
            Initializer::Deferred(aggregate::lower_deferred(ctx, ty, *elements, target)?)
        }
        (InitStrategy::Construct, _) => Initializer::Inline(format!("( {} );", coerce(ctx, ty, init)?)),
        (InitStrategy::Deferred, _) => {
            Initializer::Deferred(vec![format!("{target} = {};", coerce(ctx, ty, init)?)])
        }
    };
    Ok(initializer)
}

/// Text substituted at call sites for a parameter-default placeholder.
///
/// Names are module-qualified so the text is valid in any module.
pub(crate) fn placeholder_text(
    ctx: &mut CodegenContext<'_>,
    name: &str,
    strategy: InitStrategy,
    ty: TypeId,
    init: ExprId,
) -> Result<String> {
    let saved = ctx.qualify_all;
    ctx.qualify_all = true;
    let text = render_placeholder(ctx, name, strategy, ty, init);
    ctx.qualify_all = saved;
    text
}

fn render_placeholder(
    ctx: &mut CodegenContext<'_>,
    name: &str,
    strategy: InitStrategy,
    ty: TypeId,
    init: ExprId,
) -> Result<String> {
    let kind = &ctx.expr(init).kind;
    match (strategy, kind) {
        (InitStrategy::Deferred, ExprKind::Name(symbol)) => Ok(names::resolve(ctx, *symbol)),
        (InitStrategy::Deferred, _) => Err(CodegenError::UnsupportedPlaceholderInit {
            name: name.to_string(),
        }),
        (_, ExprKind::Value { elements }) => aggregate::lower_value_expression(ctx, ty, *elements),
        (InitStrategy::Construct, _) => {
            let value = coerce(ctx, ty, init)?;
            Ok(format!("{}( {value} )", ctx.lowering.spelling(ty)))
        }
        (InitStrategy::Assign, _) => coerce(ctx, ty, init),
    }
}
