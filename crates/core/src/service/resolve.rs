//! Generic type resolution.
//!
//! Resolves a member's declared type against the concrete class it is viewed
//! from, by walking the generic supertype chain and substituting bound type
//! variables. Variables the chain never binds stay as variables.

use crate::error::{CoreError, Result};
use crate::introspect::ClassStore;
use crate::model::{JavaClass, TypeRef};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A map from type-variable names to the types they are bound to.
#[derive(Debug, Default, Clone)]
pub struct Substitution {
    map: HashMap<String, TypeRef>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, var: String, ty: TypeRef) {
        self.map.insert(var, ty);
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Apply this substitution to a type. Unbound variables are preserved.
    pub fn apply(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Variable(name) => {
                self.map.get(name).cloned().unwrap_or_else(|| ty.clone())
            }
            TypeRef::Generic { base, args } => TypeRef::Generic {
                base: Box::new(self.apply(base)),
                args: args.iter().map(|arg| self.apply(arg)).collect(),
            },
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element: Box::new(self.apply(element)),
                dimensions: *dimensions,
            },
            TypeRef::Wildcard { bound, is_upper } => TypeRef::Wildcard {
                bound: bound.as_ref().map(|bound| Box::new(self.apply(bound))),
                is_upper: *is_upper,
            },
            _ => ty.clone(),
        }
    }
}

/// Resolves declared types against concrete classes via a [`ClassStore`].
pub struct TypeResolver<'a> {
    store: &'a dyn ClassStore,
}

impl<'a> TypeResolver<'a> {
    pub fn new(store: &'a dyn ClassStore) -> Self {
        TypeResolver { store }
    }

    /// View `declared`, taken from a member of `declaring_fqn`, from the
    /// concrete class `context`.
    ///
    /// `declaring_fqn` must be `context` itself or one of its supertypes;
    /// type variables bound anywhere along the parameterization chain are
    /// substituted, the rest are preserved.
    pub fn resolve(
        &self,
        context: &JavaClass,
        declaring_fqn: &str,
        declared: &TypeRef,
    ) -> Result<TypeRef> {
        if context.fqn == declaring_fqn {
            return Ok(declared.clone());
        }
        let substitution = self
            .substitution_for(context, declaring_fqn)?
            .ok_or_else(|| CoreError::UnresolvableType {
                type_name: declared.to_string(),
                context: format!("{} (declared in {})", context.fqn, declaring_fqn),
            })?;
        Ok(substitution.apply(declared))
    }

    /// View a resolved collection/map type as its parameterization of
    /// `target_fqn` (e.g. `java.util.Collection` or `java.util.Map`).
    ///
    /// A raw (unparameterized) input yields the raw target; type-argument
    /// extraction then falls back to `java.lang.Object`.
    pub fn resolve_as_supertype(&self, ty: &TypeRef, target_fqn: &str) -> Result<TypeRef> {
        let TypeRef::Generic { base, args } = ty else {
            return Ok(TypeRef::class(target_fqn));
        };
        let Some(base_fqn) = base.erasure_fqn() else {
            return Ok(TypeRef::class(target_fqn));
        };
        if base_fqn == target_fqn {
            return Ok(ty.clone());
        }
        let Some(class) = self.store.load(base_fqn)? else {
            debug!(
                "cannot view {} as {}: {} is not loadable, falling back to the raw type",
                ty, target_fqn, base_fqn
            );
            return Ok(TypeRef::class(target_fqn));
        };
        let substitution = bind_parameters(&class, args);
        match self.supertype_view(&class, &substitution, target_fqn, 0)? {
            Some(view) => Ok(view),
            None => {
                debug!(
                    "{} has no supertype {}, falling back to the raw type",
                    base_fqn, target_fqn
                );
                Ok(TypeRef::class(target_fqn))
            }
        }
    }

    /// Extract the `index`-th type argument of a parameterized type; raw
    /// types yield the erased object type for every index.
    pub fn type_arg(ty: &TypeRef, index: usize) -> TypeRef {
        match ty {
            TypeRef::Generic { args, .. } => args
                .get(index)
                .cloned()
                .unwrap_or_else(TypeRef::object),
            _ => TypeRef::object(),
        }
    }

    /// Compose the variable bindings along a path from `context` down to
    /// `declaring_fqn`. `Ok(None)` if no supertype path reaches it.
    fn substitution_for(
        &self,
        context: &JavaClass,
        declaring_fqn: &str,
    ) -> Result<Option<Substitution>> {
        // The context class's own parameters stay free.
        self.find_path(context, &Substitution::new(), declaring_fqn, 0)
    }

    fn find_path(
        &self,
        class: &JavaClass,
        bindings: &Substitution,
        declaring_fqn: &str,
        depth: usize,
    ) -> Result<Option<Substitution>> {
        if class.fqn == declaring_fqn {
            return Ok(Some(bindings.clone()));
        }
        if depth > MAX_SUPERTYPE_DEPTH {
            return Err(CoreError::Reflection(format!(
                "supertype chain of {} exceeds depth limit",
                class.fqn
            )));
        }
        let supertypes = class.superclass.iter().chain(class.interfaces.iter());
        for reference in supertypes {
            let Some(super_fqn) = reference.erasure_fqn() else {
                continue;
            };
            let Some(super_class) = self.store.load(super_fqn)? else {
                continue;
            };
            let applied = bindings.apply(reference);
            let super_bindings = match &applied {
                TypeRef::Generic { args, .. } => bind_parameters(&super_class, args),
                // Raw supertype reference: the supertype's variables stay
                // free and are preserved in resolved member types.
                _ => Substitution::new(),
            };
            if let Some(found) =
                self.find_path(&super_class, &super_bindings, declaring_fqn, depth + 1)?
            {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }

    fn supertype_view(
        &self,
        class: &Arc<JavaClass>,
        bindings: &Substitution,
        target_fqn: &str,
        depth: usize,
    ) -> Result<Option<TypeRef>> {
        if depth > MAX_SUPERTYPE_DEPTH {
            return Err(CoreError::Reflection(format!(
                "supertype chain of {} exceeds depth limit",
                class.fqn
            )));
        }
        let supertypes = class.superclass.iter().chain(class.interfaces.iter());
        for reference in supertypes {
            let Some(super_fqn) = reference.erasure_fqn() else {
                continue;
            };
            let applied = bindings.apply(reference);
            if super_fqn == target_fqn {
                return Ok(Some(applied));
            }
            let Some(super_class) = self.store.load(super_fqn)? else {
                continue;
            };
            let super_bindings = match &applied {
                TypeRef::Generic { args, .. } => bind_parameters(&super_class, args),
                _ => Substitution::new(),
            };
            if let Some(found) =
                self.supertype_view(&super_class, &super_bindings, target_fqn, depth + 1)?
            {
                return Ok(Some(found));
            }
        }
        Ok(None)
    }
}

const MAX_SUPERTYPE_DEPTH: usize = 256;

/// Bind a class's declared type parameters to the given arguments, position
/// by position. Missing arguments leave the parameter unbound.
fn bind_parameters(class: &JavaClass, args: &[TypeRef]) -> Substitution {
    let mut substitution = Substitution::new();
    for (parameter, arg) in class.type_parameters.iter().zip(args.iter()) {
        substitution.insert(parameter.name.clone(), arg.clone());
    }
    substitution
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitution_reaches_into_nested_types() {
        let mut substitution = Substitution::new();
        substitution.insert("T".to_string(), TypeRef::class("java.lang.String"));

        let declared = TypeRef::generic(
            TypeRef::class("java.util.List"),
            vec![TypeRef::array(TypeRef::variable("T"), 1)],
        );
        let resolved = substitution.apply(&declared);
        assert_eq!(
            resolved,
            TypeRef::generic(
                TypeRef::class("java.util.List"),
                vec![TypeRef::array(TypeRef::class("java.lang.String"), 1)],
            )
        );
    }

    #[test]
    fn unbound_variables_are_preserved() {
        let substitution = Substitution::new();
        let declared = TypeRef::variable("T");
        assert_eq!(substitution.apply(&declared), TypeRef::variable("T"));
    }

    #[test]
    fn wildcard_bounds_are_substituted() {
        let mut substitution = Substitution::new();
        substitution.insert("T".to_string(), TypeRef::class("java.lang.Number"));
        let declared = TypeRef::Wildcard {
            bound: Some(Box::new(TypeRef::variable("T"))),
            is_upper: true,
        };
        let applied = substitution.apply(&declared);
        let TypeRef::Wildcard { bound, is_upper } = applied else {
            panic!("expected a wildcard");
        };
        assert!(is_upper);
        assert_eq!(*bound.unwrap(), TypeRef::class("java.lang.Number"));
    }
}
