use super::class::JavaClass;
use super::setter::Setter;
use std::sync::Arc;

/// Everything the code emitter needs to know about the class being built.
#[derive(Debug, Clone)]
pub struct BuiltType {
    pub class: Arc<JavaClass>,
    /// Whether the class exposes a no-argument constructor usable from the
    /// builder's package.
    pub accessible_no_args_constructor: bool,
    /// Final setter set: ordered by property name, names pairwise distinct.
    pub setters: Vec<Setter>,
}

/// Complete metadata for one generated builder. Created fresh per generation
/// request and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct BuilderMetadata {
    /// Target package of the generated builder.
    pub package_name: String,
    /// Simple name of the generated builder class.
    pub name: String,
    pub built_type: BuiltType,
}
