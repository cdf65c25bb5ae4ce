//! Full class hierarchy collection.

use crate::config::ExcludeMatcher;
use crate::error::{CoreError, Result};
use crate::introspect::ClassStore;
use crate::model::JavaClass;
use indexmap::IndexMap;
use std::sync::Arc;
use tracing::debug;

/// Walk the superclass chain of `class`, collecting every visited class and
/// its directly declared interfaces.
///
/// The walk stops at the first superclass matching an exclusion predicate;
/// that class and everything above it are left out. Interfaces matching a
/// predicate are skipped individually. The result is deduplicated by
/// qualified name, first encounter wins, and is stable for a fixed input —
/// downstream name-collision resolution depends on this order.
pub fn collect_full_class_hierarchy(
    store: &dyn ClassStore,
    class: &Arc<JavaClass>,
    excludes: &[ExcludeMatcher],
) -> Result<Vec<Arc<JavaClass>>> {
    if class.fqn.is_empty() {
        return Err(CoreError::InvalidArgument(
            "class to collect the hierarchy of must have a name".to_string(),
        ));
    }

    let excluded = |class: &JavaClass| excludes.iter().any(|matcher| matcher.matches(class));

    let mut ordered: IndexMap<String, Arc<JavaClass>> = IndexMap::new();
    let mut current = Some(Arc::clone(class));
    while let Some(level) = current {
        if excluded(&level) {
            break;
        }
        ordered
            .entry(level.fqn.clone())
            .or_insert_with(|| Arc::clone(&level));
        for interface in &level.interfaces {
            let Some(interface_fqn) = interface.erasure_fqn() else {
                continue;
            };
            if ordered.contains_key(interface_fqn) {
                continue;
            }
            let loaded = load_required(store, interface_fqn, &level.fqn)?;
            if !excluded(&loaded) {
                ordered.insert(interface_fqn.to_string(), loaded);
            }
        }
        current = match level.superclass_fqn() {
            Some(superclass_fqn) => Some(load_required(store, superclass_fqn, &level.fqn)?),
            None => None,
        };
    }

    debug!(
        "collected hierarchy of {}: {} classes",
        class.fqn,
        ordered.len()
    );
    Ok(ordered.into_values().collect())
}

fn load_required(
    store: &dyn ClassStore,
    fqn: &str,
    referenced_from: &str,
) -> Result<Arc<JavaClass>> {
    store.load(fqn)?.ok_or_else(|| {
        CoreError::Reflection(format!(
            "class {} referenced from {} cannot be loaded",
            fqn, referenced_from
        ))
    })
}
