pub mod config;
pub mod error;
pub mod introspect;
pub mod model;
pub mod service;

pub use config::{ExcludeMatcher, ExcludeRule, GeneratorConfig, RawConfig, PACKAGE_PLACEHOLDER};
pub use error::{CoreError, Result};
pub use introspect::ClassStore;
