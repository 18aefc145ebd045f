//! Aggregate Value Lowering
//!
//! An aggregate literal stores its scalar leaves flattened; lowering walks
//! them in lock-step with the array/struct type. Three forms:
//!
//! - direct: `{ a, b, { c, d } }`, one element per line past four
//! - constructor: `a, b, c` for the argument list of a native type
//! - deferred: one assignment per leaf (or per native sub-vector),
//!   addressed through an [`AccessPath`]

use std::fmt;

use ctl_ir::{ExprId, ExprRange, TypeId};
use smallvec::SmallVec;

use crate::context::CodegenContext;
use crate::error::{CodegenError, Result};
use crate::expr::coerce;
use crate::types::{ArrayLowering, NativeShape};

/// Lists longer than this are laid out one element per line.
const MAX_INLINE_ELEMENTS: usize = 4;

/// One step of an access path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PathStep {
    Index(u32),
    Member(&'static str),
}

/// `root[2].member[1]`, kept structured until it is written out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct AccessPath {
    root: String,
    steps: SmallVec<[PathStep; 4]>,
}

impl AccessPath {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            steps: SmallVec::new(),
        }
    }

    fn child(&self, step: PathStep) -> Self {
        let mut path = self.clone();
        path.steps.push(step);
        path
    }

    #[must_use]
    pub fn index(&self, index: u32) -> Self {
        self.child(PathStep::Index(index))
    }

    #[must_use]
    pub fn member(&self, name: &'static str) -> Self {
        self.child(PathStep::Member(name))
    }

    pub fn is_root(&self) -> bool {
        self.steps.is_empty()
    }
}

impl fmt::Display for AccessPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.root)?;
        for step in &self.steps {
            match step {
                PathStep::Index(i) => write!(f, "[{i}]")?,
                PathStep::Member(name) => write!(f, ".{name}")?,
            }
        }
        Ok(())
    }
}

/// Cursor over the flattened leaves of one literal.
struct Leaves<'e> {
    ids: &'e [ExprId],
    next: usize,
}

impl Leaves<'_> {
    fn take(&mut self) -> Result<ExprId> {
        let id = self
            .ids
            .get(self.next)
            .copied()
            .ok_or(CodegenError::AggregateLeafMismatch {
                target: String::new(),
                expected: self.next + 1,
                found: self.ids.len(),
            })?;
        self.next += 1;
        Ok(id)
    }
}

/// Leaves of `elements`, checked against the leaf count of `ty`.
fn leaves<'e>(
    ctx: &CodegenContext<'e>,
    ty: TypeId,
    elements: ExprRange,
    target: &str,
) -> Result<Leaves<'e>> {
    let program = ctx.program;
    let ids = program.arena.get_expr_list(elements);
    let expected = program.types.leaf_count(ty);
    if ids.len() != expected {
        return Err(CodegenError::AggregateLeafMismatch {
            target: target.to_string(),
            expected,
            found: ids.len(),
        });
    }
    Ok(Leaves { ids, next: 0 })
}

/// Brace-delimited initializer list.
pub(crate) fn lower_direct(
    ctx: &mut CodegenContext<'_>,
    ty: TypeId,
    elements: ExprRange,
    target: &str,
) -> Result<String> {
    let mut leaves = leaves(ctx, ty, elements, target)?;
    direct(ctx, ty, &mut leaves)
}

fn direct(ctx: &mut CodegenContext<'_>, ty: TypeId, leaves: &mut Leaves<'_>) -> Result<String> {
    let program = ctx.program;
    if let Some(ArrayLowering::Native { spelling, .. }) = ctx.lowering.array_lowering(ty, true) {
        let mut args = Vec::new();
        flat(ctx, ty, leaves, &mut args)?;
        return Ok(format!("{spelling}( {} )", args.join(", ")));
    }
    if let Some((elem, size)) = program.types.as_array(ty) {
        let items = (0..size)
            .map(|_| direct(ctx, elem, leaves))
            .collect::<Result<Vec<_>>>()?;
        return Ok(brace_list(&items));
    }
    if let Some((_, members)) = program.types.as_struct(ty) {
        let items = members
            .iter()
            .map(|member| direct(ctx, member.ty, leaves))
            .collect::<Result<Vec<_>>>()?;
        return Ok(brace_list(&items));
    }
    let leaf = leaves.take()?;
    coerce(ctx, ty, leaf)
}

fn brace_list(items: &[String]) -> String {
    if items.is_empty() {
        return "{}".to_string();
    }
    if items.len() <= MAX_INLINE_ELEMENTS {
        return format!("{{ {} }}", items.join(", "));
    }
    let mut out = String::from("{\n");
    for (i, item) in items.iter().enumerate() {
        for (j, line) in item.lines().enumerate() {
            if j > 0 {
                out.push('\n');
            }
            out.push_str("    ");
            out.push_str(line);
        }
        if i + 1 < items.len() {
            out.push(',');
        }
        out.push('\n');
    }
    out.push('}');
    out
}

/// Comma-separated constructor arguments, one per leaf.
pub(crate) fn lower_constructor_args(
    ctx: &mut CodegenContext<'_>,
    ty: TypeId,
    elements: ExprRange,
    target: &str,
) -> Result<String> {
    let mut leaves = leaves(ctx, ty, elements, target)?;
    let mut args = Vec::new();
    flat(ctx, ty, &mut leaves, &mut args)?;
    Ok(args.join(", "))
}

fn flat(
    ctx: &mut CodegenContext<'_>,
    ty: TypeId,
    leaves: &mut Leaves<'_>,
    out: &mut Vec<String>,
) -> Result<()> {
    let program = ctx.program;
    if let Some((elem, size)) = program.types.as_array(ty) {
        for _ in 0..size {
            flat(ctx, elem, leaves, out)?;
        }
    } else if let Some((_, members)) = program.types.as_struct(ty) {
        for member in members {
            flat(ctx, member.ty, leaves, out)?;
        }
    } else {
        let leaf = leaves.take()?;
        out.push(coerce(ctx, ty, leaf)?);
    }
    Ok(())
}

/// Assignment statements initializing `root` leaf by leaf.
pub(crate) fn lower_deferred(
    ctx: &mut CodegenContext<'_>,
    ty: TypeId,
    elements: ExprRange,
    root: &str,
) -> Result<Vec<String>> {
    let mut leaves = leaves(ctx, ty, elements, root)?;
    let mut out = Vec::new();
    let position = Position {
        in_matrix: false,
        in_container: false,
    };
    deferred(ctx, ty, &AccessPath::new(root), position, &mut leaves, &mut out)?;
    Ok(out)
}

/// Where a sub-value sits within its parent.
#[derive(Copy, Clone)]
struct Position {
    /// Row of a native matrix: filled element by element.
    in_matrix: bool,
    /// Element of a `std::vector`.
    in_container: bool,
}

fn deferred(
    ctx: &mut CodegenContext<'_>,
    ty: TypeId,
    path: &AccessPath,
    position: Position,
    leaves: &mut Leaves<'_>,
    out: &mut Vec<String>,
) -> Result<()> {
    let program = ctx.program;

    if let Some((elem, size)) = program.types.as_array(ty) {
        let mut child = Position {
            in_matrix: false,
            in_container: position.in_container,
        };
        match ctx.lowering.array_lowering(ty, position.in_container) {
            Some(ArrayLowering::Container { .. }) => {
                out.push(format!("{path}.resize( {size} );"));
                child.in_container = true;
            }
            Some(ArrayLowering::Native {
                spelling,
                shape: NativeShape::Vector { .. },
            }) if !path.is_root() && !position.in_matrix => {
                let mut args = Vec::new();
                flat(ctx, ty, leaves, &mut args)?;
                out.push(format!("{path} = {spelling}( {} );", args.join(", ")));
                return Ok(());
            }
            Some(ArrayLowering::Native {
                shape: NativeShape::Matrix { .. },
                ..
            }) => {
                child.in_matrix = true;
            }
            _ => {}
        }
        for i in 0..size {
            deferred(ctx, elem, &path.index(i), child, leaves, out)?;
        }
        return Ok(());
    }

    if let Some((_, members)) = program.types.as_struct(ty) {
        let child = Position {
            in_matrix: false,
            in_container: false,
        };
        for member in members {
            let name = program.interner.lookup(member.name);
            deferred(ctx, member.ty, &path.member(name), child, leaves, out)?;
        }
        return Ok(());
    }

    let leaf = leaves.take()?;
    out.push(format!("{path} = {};", coerce(ctx, ty, leaf)?));
    Ok(())
}

/// An aggregate literal used as a value (argument, operand, return).
pub(crate) fn lower_value_expression(
    ctx: &mut CodegenContext<'_>,
    ty: TypeId,
    elements: ExprRange,
) -> Result<String> {
    if let Some(ArrayLowering::Native { spelling, .. }) = ctx.lowering.lower_array(ty) {
        let args = lower_constructor_args(ctx, ty, elements, &spelling)?;
        return Ok(format!("{spelling}( {args} )"));
    }
    if !ctx.config.is_modern() {
        return Err(CodegenError::Unimplemented(
            "aggregate temporaries in the legacy dialect",
        ));
    }
    let spelling = ctx.lowering.spelling(ty);
    let list = lower_direct(ctx, ty, elements, &spelling)?;
    Ok(format!("{spelling}{list}"))
}

#[cfg(test)]
mod tests;
