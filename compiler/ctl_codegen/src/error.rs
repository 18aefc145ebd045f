//! Code generation errors.
//!
//! Every variant is a logic error: either semantic checking let through
//! something the emitter cannot lower, or the lowering is not implemented.
//! None of them are retried; the module being generated is abandoned.

use thiserror::Error;

/// A code generation error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodegenError {
    /// A call supplies more positional arguments than the callee declares.
    #[error("too many arguments in call to `{function}`: {supplied} supplied, {expected} declared")]
    TooManyArguments {
        function: String,
        supplied: usize,
        expected: usize,
    },

    /// A parameter has neither an argument nor a default value.
    #[error("missing argument `{param}` in call to `{function}` (no default value)")]
    MissingArgument { function: String, param: String },

    /// A parameter default needing function-style initialization whose
    /// initializer is not a plain name.
    #[error("complex default value `{name}` cannot use function-style initialization")]
    UnsupportedPlaceholderInit { name: String },

    /// A variable with an initializer whose type has no initialization form.
    #[error("no initialization strategy resolved for `{name}`")]
    UnresolvedInitStrategy { name: String },

    /// An aggregate literal whose leaf count does not match its type.
    #[error("aggregate literal for `{target}` has {found} leaves, its type needs {expected}")]
    AggregateLeafMismatch {
        target: String,
        expected: usize,
        found: usize,
    },

    /// A symbol of the wrong kind where a function was required.
    #[error("`{name}` does not name a function")]
    UnexpectedSymbol { name: String },

    /// A construct with no lowering yet.
    #[error("not yet implemented: {0}")]
    Unimplemented(&'static str),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CodegenError>;
