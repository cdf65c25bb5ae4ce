//! Resolved-type representation.
//!
//! The two comparison special cases (name-based equality for type variables,
//! always-equal wildcards) live here and nowhere else.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Qualified name of the universal supertype used as the erased fallback.
pub const OBJECT: &str = "java.lang.Object";

/// A Java type as seen from a concrete class after generic resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// Primitive type name (e.g., "int", "boolean")
    Primitive(String),

    /// Reference to a class or interface by qualified name (the raw erasure)
    Class(String),

    /// Generic instantiation (e.g., List<String>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[][])
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    /// A type variable that could not be bound to a concrete type.
    /// Two occurrences of the same name are the same type.
    Variable(String),

    /// Wildcard type (e.g., ? extends Number)
    Wildcard {
        bound: Option<Box<TypeRef>>,
        is_upper: bool, // true: extends, false: super
    },
}

impl TypeRef {
    pub fn class(fqn: impl Into<String>) -> Self {
        TypeRef::Class(fqn.into())
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        TypeRef::Primitive(name.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        TypeRef::Variable(name.into())
    }

    /// The erased fallback type, `java.lang.Object`.
    pub fn object() -> Self {
        TypeRef::Class(OBJECT.to_string())
    }

    pub fn generic(base: TypeRef, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: Box::new(base),
            args,
        }
    }

    pub fn array(element: TypeRef, dimensions: usize) -> Self {
        TypeRef::Array {
            element: Box::new(element),
            dimensions,
        }
    }

    pub fn unbounded_wildcard() -> Self {
        TypeRef::Wildcard {
            bound: None,
            is_upper: true,
        }
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array { .. })
    }

    /// Qualified name of the erasure, if this type erases to a class.
    ///
    /// Arrays, primitives, wildcards and free type variables have no class
    /// erasure from the caller's point of view and yield `None`.
    pub fn erasure_fqn(&self) -> Option<&str> {
        match self {
            TypeRef::Class(fqn) => Some(fqn),
            TypeRef::Generic { base, .. } => base.erasure_fqn(),
            _ => None,
        }
    }

    /// The raw type underlying this reference: strips type arguments but
    /// keeps the structural shape (arrays stay arrays).
    pub fn erasure(&self) -> TypeRef {
        match self {
            TypeRef::Generic { base, .. } => base.erasure(),
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element: Box::new(element.erasure()),
                dimensions: *dimensions,
            },
            other => other.clone(),
        }
    }
}

impl PartialEq for TypeRef {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Any two wildcards are interchangeable for comparison purposes.
            (TypeRef::Wildcard { .. }, TypeRef::Wildcard { .. }) => true,
            (TypeRef::Primitive(a), TypeRef::Primitive(b)) => a == b,
            (TypeRef::Class(a), TypeRef::Class(b)) => a == b,
            // Free type variables compare by name, not by declaration site.
            (TypeRef::Variable(a), TypeRef::Variable(b)) => a == b,
            (
                TypeRef::Generic { base: b1, args: a1 },
                TypeRef::Generic { base: b2, args: a2 },
            ) => b1 == b2 && a1 == a2,
            (
                TypeRef::Array {
                    element: e1,
                    dimensions: d1,
                },
                TypeRef::Array {
                    element: e2,
                    dimensions: d2,
                },
            ) => d1 == d2 && e1 == e2,
            _ => false,
        }
    }
}

impl Eq for TypeRef {}

impl Hash for TypeRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            TypeRef::Primitive(name) => {
                0u8.hash(state);
                name.hash(state);
            }
            TypeRef::Class(fqn) => {
                1u8.hash(state);
                fqn.hash(state);
            }
            TypeRef::Generic { base, args } => {
                2u8.hash(state);
                base.hash(state);
                args.hash(state);
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                3u8.hash(state);
                element.hash(state);
                dimensions.hash(state);
            }
            TypeRef::Variable(name) => {
                4u8.hash(state);
                name.hash(state);
            }
            // All wildcards are equal, so they must share one hash.
            TypeRef::Wildcard { .. } => {
                5u8.hash(state);
            }
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(name) | TypeRef::Class(name) | TypeRef::Variable(name) => {
                write!(f, "{}", name)
            }
            TypeRef::Generic { base, args } => {
                write!(f, "{}<", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ">")
            }
            TypeRef::Array {
                element,
                dimensions,
            } => {
                write!(f, "{}", element)?;
                for _ in 0..*dimensions {
                    write!(f, "[]")?;
                }
                Ok(())
            }
            TypeRef::Wildcard { bound, is_upper } => match bound {
                Some(bound) if *is_upper => write!(f, "? extends {}", bound),
                Some(bound) => write!(f, "? super {}", bound),
                None => write!(f, "?"),
            },
        }
    }
}
