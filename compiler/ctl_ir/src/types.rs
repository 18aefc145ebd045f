//! Semantic data types of checked CTL programs.
//!
//! Primitive types are pre-interned at fixed ids so the common case never
//! touches the pool. Arrays and structs are interned structurally: two
//! identical array shapes share one `TypeId`.

use rustc_hash::FxHashMap;

use crate::Name;

/// Interned type identifier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    pub const VOID: TypeId = TypeId(0);
    pub const BOOL: TypeId = TypeId(1);
    pub const INT: TypeId = TypeId(2);
    pub const UINT: TypeId = TypeId(3);
    pub const HALF: TypeId = TypeId(4);
    pub const FLOAT: TypeId = TypeId(5);
    pub const STRING: TypeId = TypeId(6);

    /// First id handed out for compound types.
    pub const FIRST_COMPOUND: u32 = 7;

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// True for void, the scalar types and string.
    #[inline]
    pub const fn is_primitive(self) -> bool {
        self.0 < Self::FIRST_COMPOUND
    }

    /// True for bool, int, unsigned int, half and float.
    #[inline]
    pub const fn is_scalar(self) -> bool {
        self.0 >= Self::BOOL.0 && self.0 <= Self::FLOAT.0
    }
}

/// A named struct member.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Member {
    pub name: Name,
    pub ty: TypeId,
}

impl Member {
    pub fn new(name: Name, ty: TypeId) -> Self {
        Self { name, ty }
    }
}

/// Structure of an interned type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum TypeData {
    Void,
    Bool,
    Int,
    UInt,
    Half,
    Float,
    String,
    /// Fixed-size array. `size` is the declared element count.
    Array { elem: TypeId, size: u32 },
    /// Struct with ordered members.
    Struct { name: Name, members: Vec<Member> },
}

/// Type pool: owns every `TypeData` of a checked program.
pub struct TypePool {
    types: Vec<TypeData>,
    map: FxHashMap<TypeData, TypeId>,
}

impl TypePool {
    /// Create a pool with the primitive types pre-interned.
    pub fn new() -> Self {
        let mut pool = Self {
            types: Vec::with_capacity(32),
            map: FxHashMap::default(),
        };
        for data in [
            TypeData::Void,
            TypeData::Bool,
            TypeData::Int,
            TypeData::UInt,
            TypeData::Half,
            TypeData::Float,
            TypeData::String,
        ] {
            pool.intern(data);
        }
        debug_assert_eq!(pool.types.len(), TypeId::FIRST_COMPOUND as usize);
        pool
    }

    /// Intern a type, returning the existing id for structurally equal data.
    pub fn intern(&mut self, data: TypeData) -> TypeId {
        if let Some(&id) = self.map.get(&data) {
            return id;
        }
        let raw = u32::try_from(self.types.len()).unwrap_or(u32::MAX);
        let id = TypeId(raw);
        self.types.push(data.clone());
        self.map.insert(data, id);
        id
    }

    /// Intern `elem[size]`.
    pub fn array(&mut self, elem: TypeId, size: u32) -> TypeId {
        self.intern(TypeData::Array { elem, size })
    }

    /// Intern a struct type.
    pub fn struct_type(&mut self, name: Name, members: Vec<Member>) -> TypeId {
        self.intern(TypeData::Struct { name, members })
    }

    /// Look up the structure of a type.
    ///
    /// # Panics
    /// Panics if `id` did not come from this pool.
    #[track_caller]
    pub fn get(&self, id: TypeId) -> &TypeData {
        &self.types[id.index()]
    }

    /// Element type and size if `id` is an array.
    pub fn as_array(&self, id: TypeId) -> Option<(TypeId, u32)> {
        match self.get(id) {
            TypeData::Array { elem, size } => Some((*elem, *size)),
            _ => None,
        }
    }

    /// Name and members if `id` is a struct.
    pub fn as_struct(&self, id: TypeId) -> Option<(Name, &[Member])> {
        match self.get(id) {
            TypeData::Struct { name, members } => Some((*name, members.as_slice())),
            _ => None,
        }
    }

    /// Number of scalar leaves a literal of this type flattens to.
    pub fn leaf_count(&self, id: TypeId) -> usize {
        match self.get(id) {
            TypeData::Array { elem, size } => self.leaf_count(*elem) * (*size as usize),
            TypeData::Struct { members, .. } => {
                members.iter().map(|m| self.leaf_count(m.ty)).sum()
            }
            _ => 1,
        }
    }
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}
