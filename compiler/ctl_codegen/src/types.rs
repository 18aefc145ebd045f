//! Type Lowering Table: CTL types → C++ types
//!
//! Decides the C++ spelling of every CTL type and how a declaration of
//! that type attaches its initializer:
//!
//! - Scalars map to keywords (`half` is the OpenEXR half type)
//! - Small float/int arrays map to native Imath vectors and matrices
//! - Other float/int arrays become raw `T[N]` arrays
//! - Everything else becomes a `std::vector` container

use ctl_ir::{BinaryOp, ParamAccess, StringInterner, TypeData, TypeId, TypePool, UnaryOp};

use crate::config::CodegenConfig;
use crate::names::unqualified;

/// How a declared value's initializer attaches to its declaration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShapeClass {
    /// Assignable via `=`.
    Direct,
    /// Needs constructor-argument syntax.
    Constructible,
    /// Struct or container; resolved per dialect.
    Aggregate,
}

/// Initialization strategy a declaration ends up with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InitStrategy {
    /// `T x = init;`
    Assign,
    /// `T x( init );`
    Construct,
    /// `T x;` followed by assignment statements elsewhere.
    Deferred,
}

/// Native fixed-arity numeric shapes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NativeShape {
    Vector { arity: u32 },
    Matrix { order: u32 },
}

/// How an array type lowers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayLowering {
    /// Imath vector or matrix.
    Native { spelling: String, shape: NativeShape },
    /// `scalar name[size]`.
    Raw { scalar: &'static str, size: u32 },
    /// `std::vector< elem >`.
    Container { elem: TypeId },
}

/// A lowered type: spelling, post-declaration suffix and shape class.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoweredType {
    pub spelling: String,
    /// `[N]` for raw arrays, empty otherwise.
    pub suffix: String,
    pub shape: ShapeClass,
}

/// Declaration flags.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DeclMode {
    pub is_const: bool,
    /// Function parameter.
    pub is_input: bool,
    /// Written through by the callee.
    pub is_writable: bool,
}

impl DeclMode {
    /// Module-level or local variable.
    pub fn variable(is_const: bool) -> Self {
        Self {
            is_const,
            ..Self::default()
        }
    }

    pub fn param(access: ParamAccess) -> Self {
        Self {
            is_const: access == ParamAccess::Read,
            is_input: true,
            is_writable: access.is_output(),
        }
    }
}

/// Rendered declaration text (without initializer) and its strategy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub text: String,
    /// `None` for `void`, which has no initialization form.
    pub strategy: Option<InitStrategy>,
}

/// Per-type operations the emitter delegates to.
pub trait TypeOps {
    /// Type keyword or spelling.
    fn keyword(&self, ty: TypeId) -> String;

    /// Wrap `expr`, of type `from`, in a conversion to `to`.
    ///
    /// Returns `expr` unchanged when no conversion is needed.
    fn cast(&self, to: TypeId, from: TypeId, expr: String) -> String;

    fn binary_token(&self, op: BinaryOp) -> &'static str;

    fn unary_token(&self, op: UnaryOp) -> &'static str;
}

/// Type lowering for one generation run.
#[derive(Clone, Copy)]
pub struct TypeLowering<'a> {
    types: &'a TypePool,
    interner: &'a StringInterner,
    config: &'a CodegenConfig,
}

impl<'a> TypeLowering<'a> {
    pub fn new(types: &'a TypePool, interner: &'a StringInterner, config: &'a CodegenConfig) -> Self {
        Self {
            types,
            interner,
            config,
        }
    }

    /// The scalar precision type (`float` or `double`).
    #[inline]
    pub fn scalar_type(&self) -> &'static str {
        self.config.precision.scalar_type()
    }

    fn float_vector(&self, arity: u32) -> String {
        format!(
            "{}::V{arity}{}",
            self.config.imath_namespace,
            self.config.precision.native_suffix()
        )
    }

    fn int_vector(&self, arity: u32) -> String {
        format!("{}::V{arity}i", self.config.imath_namespace)
    }

    fn matrix(&self, order: u32) -> String {
        format!(
            "{}::M{order}{order}{}",
            self.config.imath_namespace,
            self.config.precision.native_suffix()
        )
    }

    /// Array lowering of `ty` at declaration level; `None` if not an array.
    pub fn lower_array(&self, ty: TypeId) -> Option<ArrayLowering> {
        self.array_lowering(ty, false)
    }

    /// Array lowering, where `in_container` marks the element position of a
    /// `std::vector`. Raw arrays cannot be container elements, so they lower
    /// to nested containers there.
    pub fn array_lowering(&self, ty: TypeId, in_container: bool) -> Option<ArrayLowering> {
        let (elem, size) = self.types.as_array(ty)?;
        let lowering = match self.types.get(elem) {
            TypeData::Float => match size {
                2..=4 => ArrayLowering::Native {
                    spelling: self.float_vector(size),
                    shape: NativeShape::Vector { arity: size },
                },
                0 => ArrayLowering::Container { elem },
                _ => ArrayLowering::Raw {
                    scalar: self.scalar_type(),
                    size,
                },
            },
            TypeData::Int => match size {
                2..=4 => ArrayLowering::Native {
                    spelling: self.int_vector(size),
                    shape: NativeShape::Vector { arity: size },
                },
                0 => ArrayLowering::Container { elem },
                _ => ArrayLowering::Raw { scalar: "int", size },
            },
            TypeData::Array {
                elem: inner,
                size: inner_size,
            } if *inner == TypeId::FLOAT && *inner_size == size && matches!(size, 3 | 4) => {
                ArrayLowering::Native {
                    spelling: self.matrix(size),
                    shape: NativeShape::Matrix { order: size },
                }
            }
            _ => ArrayLowering::Container { elem },
        };
        Some(match lowering {
            ArrayLowering::Raw { .. } if in_container => ArrayLowering::Container { elem },
            other => other,
        })
    }

    /// True if `ty` lowers to an Imath vector or matrix.
    pub fn is_native(&self, ty: TypeId) -> bool {
        matches!(self.lower_array(ty), Some(ArrayLowering::Native { .. }))
    }

    /// Spelling and suffix of `ty`.
    fn spell(&self, ty: TypeId, in_container: bool) -> (String, String) {
        let spelling = match self.types.get(ty) {
            TypeData::Void => "void".to_string(),
            TypeData::Bool => "bool".to_string(),
            TypeData::Int => "int".to_string(),
            TypeData::UInt => "unsigned int".to_string(),
            TypeData::Half => "half".to_string(),
            TypeData::Float => self.scalar_type().to_string(),
            TypeData::String => "std::string".to_string(),
            TypeData::Struct { name, .. } => unqualified(self.interner.lookup(*name)).to_string(),
            TypeData::Array { elem, .. } => match self.array_lowering(ty, in_container) {
                Some(ArrayLowering::Native { spelling, .. }) => spelling,
                Some(ArrayLowering::Raw { scalar, size }) => {
                    return (scalar.to_string(), format!("[{size}]"));
                }
                Some(ArrayLowering::Container { .. }) | None => {
                    format!("std::vector< {} >", self.spell(*elem, true).0)
                }
            },
        };
        (spelling, String::new())
    }

    /// Spelling of `ty` where it appears without a declared name
    /// (casts, temporaries, container elements).
    pub fn spelling(&self, ty: TypeId) -> String {
        self.spell(ty, true).0
    }

    pub fn shape(&self, ty: TypeId) -> ShapeClass {
        match self.types.get(ty) {
            TypeData::String => ShapeClass::Constructible,
            TypeData::Struct { .. } => ShapeClass::Aggregate,
            TypeData::Array { .. } => match self.lower_array(ty) {
                Some(ArrayLowering::Native { .. }) => ShapeClass::Constructible,
                Some(ArrayLowering::Raw { .. }) => ShapeClass::Direct,
                Some(ArrayLowering::Container { .. }) | None => ShapeClass::Aggregate,
            },
            _ => ShapeClass::Direct,
        }
    }

    /// Spelling, suffix and shape of `ty` at declaration level.
    pub fn lower(&self, ty: TypeId) -> LoweredType {
        let (spelling, suffix) = self.spell(ty, false);
        LoweredType {
            spelling,
            suffix,
            shape: self.shape(ty),
        }
    }

    /// Resolve a shape class under the configured dialect.
    pub fn strategy_for(&self, shape: ShapeClass) -> InitStrategy {
        match shape {
            ShapeClass::Direct => InitStrategy::Assign,
            ShapeClass::Constructible => InitStrategy::Construct,
            ShapeClass::Aggregate if self.config.is_modern() => InitStrategy::Assign,
            ShapeClass::Aggregate => InitStrategy::Deferred,
        }
    }

    /// Initialization strategy of a declaration of `ty`.
    pub fn strategy(&self, ty: TypeId) -> Option<InitStrategy> {
        if ty == TypeId::VOID {
            return None;
        }
        Some(self.strategy_for(self.shape(ty)))
    }

    /// Render a declaration of `name` (empty for an unnamed parameter).
    pub fn declare(&self, name: &str, ty: TypeId, mode: DeclMode) -> Declaration {
        let lowered = self.lower(ty);
        let strategy = self.strategy(ty);

        let (is_const, by_ref) = match self.types.get(ty) {
            TypeData::Struct { .. } => (
                mode.is_const && self.config.is_modern(),
                mode.is_input || mode.is_writable,
            ),
            TypeData::Array { .. } => match self.lower_array(ty) {
                Some(ArrayLowering::Raw { .. }) => (mode.is_const, false),
                Some(ArrayLowering::Native { .. }) => {
                    (mode.is_const, mode.is_input || mode.is_writable)
                }
                Some(ArrayLowering::Container { .. }) | None => (
                    mode.is_const && strategy == Some(InitStrategy::Assign),
                    mode.is_input || mode.is_writable,
                ),
            },
            TypeData::Void => (false, false),
            _ => (mode.is_const, mode.is_writable),
        };

        let mut text = String::with_capacity(lowered.spelling.len() + name.len() + 8);
        if is_const {
            text.push_str("const ");
        }
        text.push_str(&lowered.spelling);
        if by_ref {
            text.push_str(" &");
        }
        if !name.is_empty() {
            if !by_ref {
                text.push(' ');
            }
            text.push_str(unqualified(name));
        }
        text.push_str(&lowered.suffix);

        Declaration { text, strategy }
    }
}

impl TypeOps for TypeLowering<'_> {
    fn keyword(&self, ty: TypeId) -> String {
        self.spelling(ty)
    }

    fn cast(&self, to: TypeId, from: TypeId, expr: String) -> String {
        if to == from || !to.is_scalar() || !from.is_scalar() {
            return expr;
        }
        match self.types.get(to) {
            TypeData::Bool => format!("static_cast<bool>( {expr} )"),
            TypeData::Int => format!("static_cast<int>( {expr} )"),
            TypeData::UInt => format!("static_cast<unsigned int>( {expr} )"),
            TypeData::Half => format!("half( {expr} )"),
            TypeData::Float => format!("static_cast<{}>( {expr} )", self.scalar_type()),
            _ => expr,
        }
    }

    fn binary_token(&self, op: BinaryOp) -> &'static str {
        op.as_symbol()
    }

    fn unary_token(&self, op: UnaryOp) -> &'static str {
        op.as_symbol()
    }
}
