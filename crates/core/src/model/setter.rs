//! Setter metadata records.

use super::types::TypeRef;
use super::visibility::Visibility;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Shape-specific payload of a setter record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum SetterVariant {
    /// Scalar or plain object parameter.
    Simple,
    /// Array parameter; carries the element type.
    Array { component: TypeRef },
    /// Collection parameter; carries the resolved element type argument.
    Collection { type_arg: TypeRef },
    /// Map parameter; carries the resolved key and value type arguments.
    Map { key: TypeRef, value: TypeRef },
    /// Synthesized from a read-only collection getter rather than a setter.
    CollectionGetAndAdd { type_arg: TypeRef },
}

impl SetterVariant {
    /// Secondary sort key. Keeps a collection setter and a get-and-adder for
    /// the same property distinguishable in ordered sets.
    fn rank(&self) -> u8 {
        match self {
            SetterVariant::Simple => 0,
            SetterVariant::Array { .. } => 1,
            SetterVariant::Collection { .. } => 2,
            SetterVariant::Map { .. } => 3,
            SetterVariant::CollectionGetAndAdd { .. } => 4,
        }
    }
}

/// One settable property of a built type.
///
/// Immutable value; renaming on collision goes through [`Setter::with_param_name`],
/// which produces a fresh record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Setter {
    /// Name of the originating mutator (or getter, for get-and-adders).
    pub method_name: String,
    /// Derived property name after prefix stripping and collision resolution.
    pub param_name: String,
    /// Resolved type of the single parameter (return type for get-and-adders).
    pub param_type: TypeRef,
    pub visibility: Visibility,
    /// Cleared during gathering so that overrides of the same method collapse
    /// into one record; tests may populate it.
    pub declaring_class: Option<String>,
    pub variant: SetterVariant,
}

impl Setter {
    /// Copy of this setter under a different property name.
    pub fn with_param_name(&self, param_name: impl Into<String>) -> Setter {
        Setter {
            param_name: param_name.into(),
            ..self.clone()
        }
    }

    pub fn is_get_and_add(&self) -> bool {
        matches!(self.variant, SetterVariant::CollectionGetAndAdd { .. })
    }
}

impl PartialOrd for Setter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Setter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.param_name
            .cmp(&other.param_name)
            .then_with(|| self.variant.rank().cmp(&other.variant.rank()))
            .then_with(|| self.method_name.cmp(&other.method_name))
            .then_with(|| {
                self.param_type
                    .to_string()
                    .cmp(&other.param_type.to_string())
            })
            .then_with(|| self.visibility.cmp(&other.visibility))
            .then_with(|| self.declaring_class.cmp(&other.declaring_class))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection_setter(method: &str, param: &str) -> Setter {
        Setter {
            method_name: method.to_string(),
            param_name: param.to_string(),
            param_type: TypeRef::class("java.util.List"),
            visibility: Visibility::Private,
            declaring_class: Some("com.example.Sth".to_string()),
            variant: SetterVariant::Collection {
                type_arg: TypeRef::object(),
            },
        }
    }

    #[test]
    fn with_param_name_renames_and_keeps_everything_else() {
        let setter = collection_setter("setSth", "aName");
        let renamed = setter.with_param_name("otherName");
        assert_eq!(renamed.param_name, "otherName");
        assert_eq!(renamed.method_name, setter.method_name);
        assert_eq!(renamed.param_type, setter.param_type);
        assert_eq!(renamed.visibility, setter.visibility);
        assert_eq!(renamed.variant, setter.variant);
    }

    #[test]
    fn get_and_adder_never_compares_equal_to_equivalent_setter() {
        let setter = collection_setter("setSth", "aName");
        let adder = Setter {
            method_name: "getSth".to_string(),
            variant: SetterVariant::CollectionGetAndAdd {
                type_arg: TypeRef::object(),
            },
            ..setter.clone()
        };
        assert_ne!(setter, adder);
        let forward = setter.cmp(&adder);
        let backward = adder.cmp(&setter);
        assert_ne!(forward, Ordering::Equal);
        assert_eq!(forward, backward.reverse());
    }

    #[test]
    fn ordered_by_param_name_first() {
        let a = collection_setter("setB", "alpha");
        let b = collection_setter("setA", "beta");
        assert!(a < b);
    }
}
