//! Type-introspection capability.
//!
//! The services depend only on this trait, never on a concrete introspection
//! backend, so the same logic works whether metadata comes from parsed class
//! files or from a mock in tests.

use crate::error::Result;
use crate::model::JavaClass;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Provides class metadata by qualified name, plus recursive class discovery.
pub trait ClassStore: Send + Sync {
    /// Load a class by fully qualified name.
    ///
    /// Returns `Ok(None)` if the store does not know the class; an `Err` means
    /// the class exists but could not be read or parsed.
    fn load(&self, fqn: &str) -> Result<Option<Arc<JavaClass>>>;

    /// Recursively enumerate all classes under `package`, including classes in
    /// subpackages and static nested classes. Pass-through input for the
    /// orchestrator; ordering must be deterministic.
    fn collect_package(&self, package: &str) -> Result<Vec<Arc<JavaClass>>>;

    /// Erasure-level assignability: can a value of class `sub_fqn` be used
    /// where `super_fqn` is expected?
    ///
    /// The default walks superclass and interface links of loaded classes,
    /// deduplicating by identity. Unknown classes are not assignable.
    fn is_assignable(&self, sub_fqn: &str, super_fqn: &str) -> bool {
        if sub_fqn == super_fqn {
            return true;
        }
        let mut visited: HashSet<String> = HashSet::new();
        let mut queue: Vec<String> = vec![sub_fqn.to_string()];
        while let Some(fqn) = queue.pop() {
            if !visited.insert(fqn.clone()) {
                continue;
            }
            if fqn == super_fqn {
                return true;
            }
            let class = match self.load(&fqn) {
                Ok(Some(class)) => class,
                Ok(None) => continue,
                Err(err) => {
                    debug!("skipping unreadable class {} during assignability walk: {}", fqn, err);
                    continue;
                }
            };
            if let Some(superclass) = class.superclass_fqn() {
                queue.push(superclass.to_string());
            }
            for interface in &class.interfaces {
                if let Some(interface_fqn) = interface.erasure_fqn() {
                    queue.push(interface_fqn.to_string());
                }
            }
        }
        false
    }
}
