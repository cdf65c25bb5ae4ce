//! Builder metadata orchestration.

use crate::config::GeneratorConfig;
use crate::error::{CoreError, Result};
use crate::introspect::ClassStore;
use crate::model::{BuilderMetadata, BuiltType, JavaClass, Setter};
use crate::service::access::is_accessible_from;
use crate::service::setters::SetterService;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Composes hierarchy collection, setter discovery and collision resolution
/// into complete per-class builder metadata, and pre-filters candidate sets.
pub struct BuilderMetadataService<'a> {
    store: &'a dyn ClassStore,
    config: &'a GeneratorConfig,
}

impl<'a> BuilderMetadataService<'a> {
    pub fn new(store: &'a dyn ClassStore, config: &'a GeneratorConfig) -> Self {
        BuilderMetadataService { store, config }
    }

    /// Complete builder metadata for one target class.
    pub fn collect_builder_metadata(&self, class: &Arc<JavaClass>) -> Result<BuilderMetadata> {
        if class.fqn.is_empty() {
            return Err(CoreError::InvalidArgument(
                "class to collect builder metadata for must have a name".to_string(),
            ));
        }
        let builder_package = self.config.resolve_builder_package(&class.package_name);
        let setter_service = SetterService::new(self.store, self.config);
        let gathered = setter_service.gather_all_setters(class)?;
        let accessible: BTreeSet<Setter> = gathered
            .into_iter()
            .filter(|setter| {
                is_accessible_from(setter.visibility, &class.package_name, &builder_package)
            })
            .collect();
        let setters = avoid_name_collisions(accessible);
        Ok(BuilderMetadata {
            name: format!("{}{}", class.simple_name, self.config.builder_suffix),
            package_name: builder_package.clone(),
            built_type: BuiltType {
                class: Arc::clone(class),
                accessible_no_args_constructor: self
                    .has_accessible_no_args_constructor(class, &builder_package),
                setters: setters.into_iter().collect(),
            },
        })
    }

    /// Drop candidates a builder cannot be generated for: interfaces,
    /// abstract classes, anonymous classes, enums, primitives, non-static
    /// member classes, and classes inaccessible from the builder's package.
    pub fn filter_out_non_buildable_classes(
        &self,
        classes: Vec<Arc<JavaClass>>,
    ) -> Vec<Arc<JavaClass>> {
        classes
            .into_iter()
            .filter(|class| {
                let buildable = !class.is_interface()
                    && !class.is_abstract()
                    && !class.is_anonymous
                    && !class.is_enum()
                    && !class.is_primitive()
                    && (!class.is_member || class.is_static_member)
                    && is_accessible_from(
                        class.visibility(),
                        &class.package_name,
                        &self.config.resolve_builder_package(&class.package_name),
                    );
                if !buildable {
                    debug!("filtering out non-buildable class {}", class.fqn);
                }
                buildable
            })
            .collect()
    }

    /// Drop candidates matching the configured exclusion predicates, plus any
    /// candidate that looks like a pre-existing builder of another candidate
    /// (its simple name equals another candidate's simple name with the
    /// builder suffix appended).
    pub fn filter_out_configured_excludes(
        &self,
        classes: Vec<Arc<JavaClass>>,
    ) -> Vec<Arc<JavaClass>> {
        let remaining: Vec<Arc<JavaClass>> = classes
            .into_iter()
            .filter(|class| {
                let excluded = self
                    .config
                    .excludes
                    .iter()
                    .any(|matcher| matcher.matches(class));
                if excluded {
                    debug!("filtering out excluded class {}", class.fqn);
                }
                !excluded
            })
            .collect();

        let simple_names: HashSet<&str> = remaining
            .iter()
            .map(|class| class.simple_name.as_str())
            .collect();
        remaining
            .iter()
            .filter(|class| {
                let looks_like_builder = class
                    .simple_name
                    .strip_suffix(&self.config.builder_suffix)
                    .is_some_and(|stem| !stem.is_empty() && simple_names.contains(stem));
                if looks_like_builder {
                    debug!("filtering out pre-existing builder {}", class.fqn);
                }
                !looks_like_builder
            })
            .cloned()
            .collect()
    }

    fn has_accessible_no_args_constructor(
        &self,
        class: &JavaClass,
        builder_package: &str,
    ) -> bool {
        class.constructors.iter().any(|constructor| {
            constructor.parameters.is_empty()
                && is_accessible_from(
                    constructor.visibility(),
                    &class.package_name,
                    builder_package,
                )
        })
    }
}

/// Rename colliding property names deterministically.
///
/// Processes setters in their natural order; the first taker keeps its name,
/// later ones probe `name0`, `name1`, … until an unused name is found. The
/// output size always equals the input size.
pub fn avoid_name_collisions(setters: BTreeSet<Setter>) -> BTreeSet<Setter> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut resolved: BTreeSet<Setter> = BTreeSet::new();
    for setter in setters {
        if taken.insert(setter.param_name.clone()) {
            resolved.insert(setter);
            continue;
        }
        for index in 0.. {
            let candidate = format!("{}{}", setter.param_name, index);
            if taken.insert(candidate.clone()) {
                resolved.insert(setter.with_param_name(candidate));
                break;
            }
        }
    }
    resolved
}
