//! Generation settings, fixed for a whole run.

/// Which aggregate-initialization syntax the target compiler accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AggregateSyntax {
    /// Brace/initializer-list initialization is available for every
    /// aggregate, so structs and containers initialize at declaration.
    #[default]
    Modern,
    /// No initializer lists: structs and containers are filled in by
    /// statements inside the synthesized module initializer.
    Legacy,
}

impl AggregateSyntax {
    #[must_use]
    pub fn is_modern(self) -> bool {
        matches!(self, Self::Modern)
    }
}

/// Precision of the CTL `float` type in emitted code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Precision {
    #[default]
    Single,
    Double,
}

impl Precision {
    /// Scalar type keyword.
    pub const fn scalar_type(self) -> &'static str {
        match self {
            Self::Single => "float",
            Self::Double => "double",
        }
    }

    /// Suffix of the C math library variant (`sinf` vs `sin`).
    pub const fn libm_suffix(self) -> &'static str {
        match self {
            Self::Single => "f",
            Self::Double => "",
        }
    }

    /// Suffix of the native vector and matrix families (`V3f` vs `V3d`).
    pub const fn native_suffix(self) -> &'static str {
        match self {
            Self::Single => "f",
            Self::Double => "d",
        }
    }
}

/// Configuration for a C++ generation run.
#[derive(Debug, Clone)]
pub struct CodegenConfig {
    pub aggregate_syntax: AggregateSyntax,
    pub precision: Precision,
    /// Namespace of the native vector/matrix types.
    pub imath_namespace: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            aggregate_syntax: AggregateSyntax::Modern,
            precision: Precision::Single,
            imath_namespace: "Imath".to_string(),
        }
    }
}

impl CodegenConfig {
    /// Default configuration for the legacy dialect.
    pub fn legacy() -> Self {
        Self::default().with_aggregate_syntax(AggregateSyntax::Legacy)
    }

    #[must_use]
    pub fn with_aggregate_syntax(mut self, syntax: AggregateSyntax) -> Self {
        self.aggregate_syntax = syntax;
        self
    }

    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    #[must_use]
    pub fn with_imath_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.imath_namespace = namespace.into();
        self
    }

    #[inline]
    pub fn is_modern(&self) -> bool {
        self.aggregate_syntax.is_modern()
    }
}
