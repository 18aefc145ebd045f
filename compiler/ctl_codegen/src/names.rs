//! Name & Scope Resolver
//!
//! Every identifier reference resolves, in order, to:
//! 1. a literal substitution,
//! 2. a function, unqualified in its own module and `Module::f` elsewhere
//!    (`_ctlcc_::f` for runtime builtins),
//! 3. a declared global, unqualified in its own module and `Module::x`
//!    elsewhere (builtin-scope globals are never qualified),
//! 4. a plain local or parameter name.

use ctl_ir::{Symbol, SymbolId};

use crate::context::CodegenContext;

/// Namespace of the runtime preamble.
pub const RUNTIME_NAMESPACE: &str = "_ctlcc_";

/// Make a string a valid C++ identifier.
pub fn clean_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 1);
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        result.push('_');
    }
    for c in name.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            result.push(c);
        } else {
            result.push('_');
        }
    }
    result
}

/// Strip namespace qualifiers (`A::B::x` → `x`).
pub fn unqualified(name: &str) -> &str {
    match name.rfind("::") {
        Some(pos) => &name[pos + 2..],
        None => name,
    }
}

/// Whether a function symbol is the entry routine of its module.
pub(crate) fn is_entry_routine(ctx: &CodegenContext<'_>, symbol: &Symbol) -> bool {
    let Some(module) = symbol.module else {
        return false;
    };
    let name = unqualified(ctx.name(symbol.name));
    name == "main" || name == ctx.program.module_name(module)
}

/// Emitted name of a function; `main` takes its module's name.
pub(crate) fn function_name(ctx: &CodegenContext<'_>, symbol: &Symbol) -> String {
    let name = unqualified(ctx.name(symbol.name));
    match symbol.module {
        Some(module) if name == "main" => ctx.namespace_of(module),
        _ => name.to_string(),
    }
}

/// Resolve a reference to `id` to its C++ text.
pub(crate) fn resolve(ctx: &CodegenContext<'_>, id: SymbolId) -> String {
    if let Some(literal) = ctx.tables.literals.get(&id) {
        return literal.clone();
    }

    let symbol = ctx.symbol(id);
    if symbol.is_function() {
        let name = function_name(ctx, symbol);
        return match symbol.module {
            Some(module) if ctx.is_current(Some(module)) && !ctx.qualify_all => name,
            Some(module) => format!("{}::{name}", ctx.namespace_of(module)),
            None => format!("{RUNTIME_NAMESPACE}::{name}"),
        };
    }

    let name = unqualified(ctx.name(symbol.name));
    if ctx.tables.globals.contains(&id) {
        return match symbol.module {
            Some(module) if !ctx.is_current(Some(module)) || ctx.qualify_all => {
                format!("{}::{name}", ctx.namespace_of(module))
            }
            _ => name.to_string(),
        };
    }
    name.to_string()
}
