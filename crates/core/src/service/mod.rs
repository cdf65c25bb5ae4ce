pub mod access;
pub mod hierarchy;
pub mod metadata;
pub mod resolve;
pub mod setters;

pub use access::is_accessible_from;
pub use hierarchy::collect_full_class_hierarchy;
pub use metadata::{avoid_name_collisions, BuilderMetadataService};
pub use resolve::{Substitution, TypeResolver};
pub use setters::{drop_prefix, SetterService};
