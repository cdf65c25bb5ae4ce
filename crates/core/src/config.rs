//! Generator configuration.
//!
//! [`RawConfig`] is the serde-facing shape loaded from a JSON file or built
//! from CLI flags; [`GeneratorConfig`] is the compiled, immutable form the
//! services consume (exclusion regexes compiled once, up front).

use crate::error::Result;
use crate::model::JavaClass;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Placeholder in `builder_package` meaning "same package as the built class".
pub const PACKAGE_PLACEHOLDER: &str = "<PACKAGE_NAME>";

pub const DEFAULT_BUILDER_SUFFIX: &str = "Builder";
pub const DEFAULT_SETTER_PREFIX: &str = "set";
pub const DEFAULT_GETTER_PREFIX: &str = "get";

/// One exclusion rule; every populated field is a predicate, and the rule
/// matches when any of them does.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExcludeRule {
    pub class_name: Option<String>,
    pub class_regex: Option<String>,
    pub package_name: Option<String>,
    pub package_regex: Option<String>,
}

impl ExcludeRule {
    pub fn class(name: impl Into<String>) -> Self {
        ExcludeRule {
            class_name: Some(name.into()),
            ..ExcludeRule::default()
        }
    }

    pub fn package(name: impl Into<String>) -> Self {
        ExcludeRule {
            package_name: Some(name.into()),
            ..ExcludeRule::default()
        }
    }

    pub fn compile(&self) -> Result<ExcludeMatcher> {
        Ok(ExcludeMatcher {
            class_name: self.class_name.clone(),
            class_regex: self.class_regex.as_deref().map(Regex::new).transpose()?,
            package_name: self.package_name.clone(),
            package_regex: self.package_regex.as_deref().map(Regex::new).transpose()?,
        })
    }
}

/// Compiled form of an [`ExcludeRule`].
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    class_name: Option<String>,
    class_regex: Option<Regex>,
    package_name: Option<String>,
    package_regex: Option<Regex>,
}

impl ExcludeMatcher {
    pub fn class(name: impl Into<String>) -> Self {
        ExcludeMatcher {
            class_name: Some(name.into()),
            class_regex: None,
            package_name: None,
            package_regex: None,
        }
    }

    pub fn matches(&self, class: &JavaClass) -> bool {
        if self
            .class_name
            .as_deref()
            .is_some_and(|name| name == class.fqn)
        {
            return true;
        }
        if self
            .class_regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(&class.fqn))
        {
            return true;
        }
        if self
            .package_name
            .as_deref()
            .is_some_and(|name| name == class.package_name)
        {
            return true;
        }
        self.package_regex
            .as_ref()
            .is_some_and(|regex| regex.is_match(&class.package_name))
    }
}

/// Serde-facing configuration with the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawConfig {
    pub builder_package: String,
    pub builder_suffix: String,
    pub setter_prefix: String,
    pub getter_prefix: String,
    pub get_and_add_enabled: bool,
    pub hierarchy_excludes: Vec<ExcludeRule>,
    #[serde(alias = "generalExcludes")]
    pub excludes: Vec<ExcludeRule>,
}

impl Default for RawConfig {
    fn default() -> Self {
        RawConfig {
            builder_package: PACKAGE_PLACEHOLDER.to_string(),
            builder_suffix: DEFAULT_BUILDER_SUFFIX.to_string(),
            setter_prefix: DEFAULT_SETTER_PREFIX.to_string(),
            getter_prefix: DEFAULT_GETTER_PREFIX.to_string(),
            get_and_add_enabled: false,
            hierarchy_excludes: vec![ExcludeRule::class("java.lang.Object")],
            excludes: vec![],
        }
    }
}

/// Compiled configuration consumed by the services.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub builder_package: String,
    pub builder_suffix: String,
    pub setter_prefix: String,
    pub getter_prefix: String,
    pub get_and_add_enabled: bool,
    pub hierarchy_excludes: Vec<ExcludeMatcher>,
    pub excludes: Vec<ExcludeMatcher>,
}

impl GeneratorConfig {
    pub fn from_raw(raw: &RawConfig) -> Result<Self> {
        Ok(GeneratorConfig {
            builder_package: raw.builder_package.clone(),
            builder_suffix: raw.builder_suffix.clone(),
            setter_prefix: raw.setter_prefix.clone(),
            getter_prefix: raw.getter_prefix.clone(),
            get_and_add_enabled: raw.get_and_add_enabled,
            hierarchy_excludes: raw
                .hierarchy_excludes
                .iter()
                .map(ExcludeRule::compile)
                .collect::<Result<_>>()?,
            excludes: raw
                .excludes
                .iter()
                .map(ExcludeRule::compile)
                .collect::<Result<_>>()?,
        })
    }

    /// Target package for a builder of a class living in `class_package`.
    pub fn resolve_builder_package(&self, class_package: &str) -> String {
        self.builder_package
            .replace(PACKAGE_PLACEHOLDER, class_package)
    }

    /// Whether builders are placed in the same package as the built class.
    pub fn builders_in_package_of(&self, class_package: &str) -> bool {
        self.builder_package == PACKAGE_PLACEHOLDER || self.builder_package == class_package
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            builder_package: PACKAGE_PLACEHOLDER.to_string(),
            builder_suffix: DEFAULT_BUILDER_SUFFIX.to_string(),
            setter_prefix: DEFAULT_SETTER_PREFIX.to_string(),
            getter_prefix: DEFAULT_GETTER_PREFIX.to_string(),
            get_and_add_enabled: false,
            hierarchy_excludes: vec![ExcludeMatcher::class("java.lang.Object")],
            excludes: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClassKind, JavaClass};

    fn class(fqn: &str) -> JavaClass {
        let package = fqn.rsplit_once('.').map(|(p, _)| p).unwrap_or("").to_string();
        JavaClass {
            fqn: fqn.to_string(),
            package_name: package,
            simple_name: fqn.rsplit(['.', '$']).next().unwrap().to_string(),
            kind: ClassKind::Class,
            modifiers: 0,
            is_anonymous: false,
            is_member: false,
            is_static_member: false,
            type_parameters: vec![],
            superclass: None,
            interfaces: vec![],
            methods: vec![],
            constructors: vec![],
        }
    }

    #[test]
    fn placeholder_resolves_to_class_package() {
        let config = GeneratorConfig::default();
        assert_eq!(config.resolve_builder_package("com.example"), "com.example");

        let fixed = GeneratorConfig {
            builder_package: "com.example.builders".to_string(),
            ..GeneratorConfig::default()
        };
        assert_eq!(
            fixed.resolve_builder_package("com.example"),
            "com.example.builders"
        );
    }

    #[test]
    fn exclude_rule_matches_by_name_package_and_regex() {
        let by_name = ExcludeRule::class("java.lang.Object").compile().unwrap();
        assert!(by_name.matches(&class("java.lang.Object")));
        assert!(!by_name.matches(&class("java.lang.String")));

        let by_package = ExcludeRule::package("java.lang").compile().unwrap();
        assert!(by_package.matches(&class("java.lang.String")));
        assert!(!by_package.matches(&class("java.util.List")));

        let by_regex = ExcludeRule {
            class_regex: Some(r"^com\.example\..*Dto$".to_string()),
            ..ExcludeRule::default()
        }
        .compile()
        .unwrap();
        assert!(by_regex.matches(&class("com.example.PersonDto")));
        assert!(!by_regex.matches(&class("com.example.Person")));
    }

    #[test]
    fn invalid_regex_is_rejected() {
        let rule = ExcludeRule {
            class_regex: Some("(".to_string()),
            ..ExcludeRule::default()
        };
        assert!(rule.compile().is_err());
    }

    #[test]
    fn raw_config_defaults() {
        let raw = RawConfig::default();
        assert_eq!(raw.builder_suffix, "Builder");
        assert_eq!(raw.setter_prefix, "set");
        assert_eq!(raw.getter_prefix, "get");
        assert!(!raw.get_and_add_enabled);
        assert_eq!(raw.hierarchy_excludes, vec![ExcludeRule::class("java.lang.Object")]);
    }

    #[test]
    fn raw_config_round_trips_through_json() {
        let json = r#"{
            "builderSuffix": "Factory",
            "getAndAddEnabled": true,
            "excludes": [{"packageRegex": "^internal\\."}]
        }"#;
        let raw: RawConfig = serde_json::from_str(json).unwrap();
        assert_eq!(raw.builder_suffix, "Factory");
        assert!(raw.get_and_add_enabled);
        assert_eq!(raw.setter_prefix, "set");
        let compiled = GeneratorConfig::from_raw(&raw).unwrap();
        assert_eq!(compiled.excludes.len(), 1);
    }
}
