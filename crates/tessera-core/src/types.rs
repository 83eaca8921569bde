//! Opaque types and constant payloads.
//!
//! The IR core never looks inside a [`Type`] or an [`Attribute`]: it only
//! clones, compares and prints them. Operation kinds interpret them.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// The structure behind an interned [`Type`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// Signless integer of the given bit width (`i1`, `i32`, `i64`, ...).
    Integer { width: u32 },

    /// IEEE float of the given bit width (`f32`, `f64`).
    Float { width: u32 },

    /// Target-sized integer used for loop bounds and indexing.
    Index,

    /// A type owned by some dialect the core knows nothing about.
    Opaque(String),
}

/// Shared handle to an interned type.
///
/// Cloning is a reference-count bump. Two handles compare equal when they
/// describe the same [`TypeKind`].
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Type(Arc<TypeKind>);

impl Type {
    pub fn kind(&self) -> &TypeKind {
        &self.0
    }

    /// Check if this is an integer or index type.
    pub fn is_integer_like(&self) -> bool {
        matches!(*self.0, TypeKind::Integer { .. } | TypeKind::Index)
    }

    pub fn is_float(&self) -> bool {
        matches!(*self.0, TypeKind::Float { .. })
    }

    /// Bit width of integer and float types. `index` is treated as 64 bits.
    pub fn bit_width(&self) -> Option<u32> {
        match *self.0 {
            TypeKind::Integer { width } | TypeKind::Float { width } => Some(width),
            TypeKind::Index => Some(64),
            TypeKind::Opaque(_) => None,
        }
    }

    /// Check whether two handles share the same interned storage.
    pub fn ptr_eq(&self, other: &Type) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &*self.0 {
            TypeKind::Integer { width } => write!(f, "i{}", width),
            TypeKind::Float { width } => write!(f, "f{}", width),
            TypeKind::Index => write!(f, "index"),
            TypeKind::Opaque(name) => write!(f, "!{}", name),
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({})", self)
    }
}

/// Interner handing out one shared [`Type`] per distinct [`TypeKind`].
#[derive(Debug, Default)]
pub struct TypeContext {
    interned: HashMap<TypeKind, Type>,
}

impl TypeContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the unique handle for `kind`, interning it on first request.
    pub fn get(&mut self, kind: TypeKind) -> Type {
        self.interned
            .entry(kind)
            .or_insert_with_key(|kind| Type(Arc::new(kind.clone())))
            .clone()
    }

    pub fn integer(&mut self, width: u32) -> Type {
        self.get(TypeKind::Integer { width })
    }

    pub fn float(&mut self, width: u32) -> Type {
        self.get(TypeKind::Float { width })
    }

    pub fn index(&mut self) -> Type {
        self.get(TypeKind::Index)
    }

    pub fn opaque(&mut self, name: &str) -> Type {
        self.get(TypeKind::Opaque(name.to_string()))
    }

    /// Number of distinct types interned so far.
    pub fn len(&self) -> usize {
        self.interned.len()
    }

    pub fn is_empty(&self) -> bool {
        self.interned.is_empty()
    }
}

/// Compile-time constant payload carried by constant operations and produced
/// by folding.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Attribute {
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Attribute::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Attribute::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Attribute::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attribute::Integer(v) => write!(f, "{}", v),
            Attribute::Float(v) => write!(f, "{:?}", v),
            Attribute::Bool(v) => write!(f, "{}", v),
        }
    }
}
