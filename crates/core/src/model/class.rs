//! Introspected-class model.
//!
//! These are pure data types produced by a [`crate::introspect::ClassStore`]
//! implementation; the services never touch a concrete introspection backend.

use super::types::TypeRef;
use super::visibility::{modifiers, Visibility};
use serde::{Deserialize, Serialize};

/// Kind of type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
    Primitive,
}

/// A generic type parameter declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeParameter {
    /// Parameter name, e.g., "T"
    pub name: String,
    /// Upper bounds, e.g., `T extends Comparable<T> & Serializable`
    pub bounds: Vec<TypeRef>,
}

/// A loadable Java type, immutable once constructed.
///
/// `fqn` uses the binary naming convention with `.` between packages and `$`
/// before nested class segments (e.g., `com.example.Outer$Inner`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaClass {
    pub fqn: String,
    pub package_name: String,
    pub simple_name: String,
    pub kind: ClassKind,
    /// Raw access-flag bitmask as reported by the introspection backend.
    pub modifiers: u32,
    pub is_anonymous: bool,
    pub is_member: bool,
    pub is_static_member: bool,
    pub type_parameters: Vec<TypeParameter>,
    /// Generic superclass reference; `None` at the root of the hierarchy.
    pub superclass: Option<TypeRef>,
    /// Directly implemented interfaces as generic references, declaration order.
    pub interfaces: Vec<TypeRef>,
    pub methods: Vec<JavaMethod>,
    pub constructors: Vec<JavaConstructor>,
}

impl JavaClass {
    pub fn is_interface(&self) -> bool {
        self.kind == ClassKind::Interface
    }

    pub fn is_enum(&self) -> bool {
        self.kind == ClassKind::Enum
    }

    pub fn is_primitive(&self) -> bool {
        self.kind == ClassKind::Primitive
    }

    pub fn is_abstract(&self) -> bool {
        self.modifiers & modifiers::ABSTRACT != 0
    }

    pub fn visibility(&self) -> Visibility {
        Visibility::from_modifiers(self.modifiers)
    }

    /// Erasure of the direct superclass, if any.
    pub fn superclass_fqn(&self) -> Option<&str> {
        self.superclass.as_ref().and_then(TypeRef::erasure_fqn)
    }
}

/// A method directly declared on a class, with its declared (possibly
/// generic) parameter and return types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaMethod {
    pub name: String,
    pub modifiers: u32,
    pub is_bridge: bool,
    pub parameters: Vec<TypeRef>,
    pub return_type: TypeRef,
}

impl JavaMethod {
    pub fn visibility(&self) -> Visibility {
        Visibility::from_modifiers(self.modifiers)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JavaConstructor {
    pub modifiers: u32,
    pub parameters: Vec<TypeRef>,
}

impl JavaConstructor {
    pub fn visibility(&self) -> Visibility {
        Visibility::from_modifiers(self.modifiers)
    }
}
