//! Setter discovery and classification.

use crate::config::GeneratorConfig;
use crate::error::{CoreError, Result};
use crate::introspect::ClassStore;
use crate::model::{JavaClass, JavaMethod, Setter, SetterVariant, TypeRef};
use crate::service::access::is_accessible_from;
use crate::service::hierarchy::collect_full_class_hierarchy;
use crate::service::resolve::TypeResolver;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::trace;

pub const COLLECTION_FQN: &str = "java.util.Collection";
pub const MAP_FQN: &str = "java.util.Map";

/// Discovers and classifies the setters of a class across its full hierarchy.
pub struct SetterService<'a> {
    store: &'a dyn ClassStore,
    config: &'a GeneratorConfig,
}

impl<'a> SetterService<'a> {
    pub fn new(store: &'a dyn ClassStore, config: &'a GeneratorConfig) -> Self {
        SetterService { store, config }
    }

    /// All setters of `class`, gathered across its hierarchy, classified and
    /// resolved, ordered by property name. Collision resolution happens
    /// later, in the metadata service.
    pub fn gather_all_setters(&self, class: &Arc<JavaClass>) -> Result<BTreeSet<Setter>> {
        if class.fqn.is_empty() {
            return Err(CoreError::InvalidArgument(
                "class to gather setters for must have a name".to_string(),
            ));
        }
        let builder_package = self.config.resolve_builder_package(&class.package_name);
        let hierarchy =
            collect_full_class_hierarchy(self.store, class, &self.config.hierarchy_excludes)?;
        let resolver = TypeResolver::new(self.store);

        let mut methods: Vec<(&Arc<JavaClass>, &JavaMethod)> = Vec::new();
        for level in &hierarchy {
            for method in &level.methods {
                if method.is_bridge {
                    continue;
                }
                if !is_accessible_from(
                    method.visibility(),
                    &level.package_name,
                    &builder_package,
                ) {
                    continue;
                }
                methods.push((level, method));
            }
        }

        let mut setters: BTreeSet<Setter> = BTreeSet::new();
        for (declaring, method) in methods.iter().copied() {
            if !self.is_setter(method) {
                continue;
            }
            setters.insert(self.to_setter(class, declaring, method, &resolver)?);
        }

        if self.config.get_and_add_enabled {
            for (declaring, method) in methods.iter().copied() {
                if !self.is_collection_getter(method) {
                    continue;
                }
                if self.has_corresponding_setter(method, &setters) {
                    trace!(
                        "suppressing get-and-adder for {}#{}: setter already present",
                        declaring.fqn, method.name
                    );
                    continue;
                }
                setters.insert(self.to_get_and_adder(class, declaring, method, &resolver)?);
            }
        }

        Ok(setters)
    }

    /// Strip the configured setter prefix from a method name and lower-case
    /// the first remaining character. A name no longer than the prefix is
    /// returned unchanged.
    pub fn drop_setter_prefix(&self, name: &str) -> String {
        drop_prefix(&self.config.setter_prefix, name)
    }

    pub fn drop_getter_prefix(&self, name: &str) -> String {
        drop_prefix(&self.config.getter_prefix, name)
    }

    fn is_setter(&self, method: &JavaMethod) -> bool {
        method.parameters.len() == 1 && method.name.starts_with(&self.config.setter_prefix)
    }

    fn is_collection_getter(&self, method: &JavaMethod) -> bool {
        method.parameters.is_empty()
            && method.name.starts_with(&self.config.getter_prefix)
            && self.erases_to_subtype_of(&method.return_type, COLLECTION_FQN)
    }

    /// A getter has a corresponding setter when some setter shares both its
    /// derived property name and its raw return erasure.
    fn has_corresponding_setter(&self, getter: &JavaMethod, setters: &BTreeSet<Setter>) -> bool {
        let property = self.drop_getter_prefix(&getter.name);
        let getter_erasure = getter.return_type.erasure();
        setters.iter().any(|setter| {
            setter.param_name == property && setter.param_type.erasure() == getter_erasure
        })
    }

    fn erases_to_subtype_of(&self, ty: &TypeRef, super_fqn: &str) -> bool {
        ty.erasure_fqn()
            .is_some_and(|fqn| self.store.is_assignable(fqn, super_fqn))
    }

    fn to_setter(
        &self,
        class: &Arc<JavaClass>,
        declaring: &Arc<JavaClass>,
        method: &JavaMethod,
        resolver: &TypeResolver<'_>,
    ) -> Result<Setter> {
        let declared = &method.parameters[0];
        let param_type = resolver.resolve(class, &declaring.fqn, declared)?;
        // Classification follows the erasure of the declared parameter: a
        // free type variable erases to Object and stays a simple setter even
        // when the chain happens to bind it to a collection.
        let variant = if let TypeRef::Array { .. } = declared {
            match &param_type {
                TypeRef::Array {
                    element,
                    dimensions,
                } if *dimensions > 1 => SetterVariant::Array {
                    component: TypeRef::Array {
                        element: element.clone(),
                        dimensions: dimensions - 1,
                    },
                },
                TypeRef::Array { element, .. } => SetterVariant::Array {
                    component: element.as_ref().clone(),
                },
                other => {
                    return Err(CoreError::UnresolvableType {
                        type_name: other.to_string(),
                        context: format!("array parameter of {}#{}", declaring.fqn, method.name),
                    });
                }
            }
        } else if self.erases_to_subtype_of(declared, COLLECTION_FQN) {
            let view = resolver.resolve_as_supertype(&param_type, COLLECTION_FQN)?;
            SetterVariant::Collection {
                type_arg: TypeResolver::type_arg(&view, 0),
            }
        } else if self.erases_to_subtype_of(declared, MAP_FQN) {
            let view = resolver.resolve_as_supertype(&param_type, MAP_FQN)?;
            SetterVariant::Map {
                key: TypeResolver::type_arg(&view, 0),
                value: TypeResolver::type_arg(&view, 1),
            }
        } else {
            SetterVariant::Simple
        };
        Ok(Setter {
            method_name: method.name.clone(),
            param_name: self.drop_setter_prefix(&method.name),
            param_type,
            visibility: method.visibility(),
            declaring_class: None,
            variant,
        })
    }

    fn to_get_and_adder(
        &self,
        class: &Arc<JavaClass>,
        declaring: &Arc<JavaClass>,
        method: &JavaMethod,
        resolver: &TypeResolver<'_>,
    ) -> Result<Setter> {
        let param_type = resolver.resolve(class, &declaring.fqn, &method.return_type)?;
        let view = resolver.resolve_as_supertype(&param_type, COLLECTION_FQN)?;
        Ok(Setter {
            method_name: method.name.clone(),
            param_name: self.drop_getter_prefix(&method.name),
            param_type,
            visibility: method.visibility(),
            declaring_class: None,
            variant: SetterVariant::CollectionGetAndAdd {
                type_arg: TypeResolver::type_arg(&view, 0),
            },
        })
    }
}

/// Strip `prefix` from `name` and lower-case the first remaining character.
///
/// Returns `name` unchanged when the prefix is empty or the name is no
/// longer than the prefix; a name not carrying the prefix only has its first
/// character lower-cased.
pub fn drop_prefix(prefix: &str, name: &str) -> String {
    if prefix.is_empty() || name.len() <= prefix.len() {
        return name.to_string();
    }
    let stripped = name.strip_prefix(prefix).unwrap_or(name);
    uncapitalize(stripped)
}

fn uncapitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
