use crate::Selection;
use anyhow::Context;
use builderscope_core::config::{ExcludeRule, GeneratorConfig, RawConfig};
use builderscope_core::model::JavaClass;
use builderscope_core::service::BuilderMetadataService;
use builderscope_core::ClassStore;
use builderscope_java::ClasspathStore;
use std::sync::Arc;
use tracing::info;

pub fn run(selection: &Selection) -> anyhow::Result<()> {
    let config = load_config(selection)?;
    let store = ClasspathStore::open(&selection.classpath)?;
    let service = BuilderMetadataService::new(&store, &config);

    let targets = select_candidates(&store, &service, selection)?;
    info!("{} buildable classes", targets.len());
    for class in &targets {
        println!("{}", class.fqn);
    }
    Ok(())
}

/// Merge the config file with command-line overrides and compile it.
pub fn load_config(selection: &Selection) -> anyhow::Result<GeneratorConfig> {
    let mut raw: RawConfig = match &selection.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("cannot read config file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("invalid config file {}", path.display()))?
        }
        None => RawConfig::default(),
    };
    if let Some(builder_package) = &selection.builder_package {
        raw.builder_package = builder_package.clone();
    }
    if let Some(builder_suffix) = &selection.builder_suffix {
        raw.builder_suffix = builder_suffix.clone();
    }
    if let Some(setter_prefix) = &selection.setter_prefix {
        raw.setter_prefix = setter_prefix.clone();
    }
    if let Some(getter_prefix) = &selection.getter_prefix {
        raw.getter_prefix = getter_prefix.clone();
    }
    if selection.get_and_add {
        raw.get_and_add_enabled = true;
    }
    for pattern in &selection.excludes {
        raw.excludes.push(ExcludeRule {
            class_regex: Some(pattern.clone()),
            ..ExcludeRule::default()
        });
    }
    Ok(GeneratorConfig::from_raw(&raw)?)
}

/// Gather candidate classes from the scanned packages and the explicit class
/// list, then apply the exclusion and buildability filters.
pub fn select_candidates(
    store: &ClasspathStore,
    service: &BuilderMetadataService<'_>,
    selection: &Selection,
) -> anyhow::Result<Vec<Arc<JavaClass>>> {
    let mut candidates: Vec<Arc<JavaClass>> = Vec::new();
    for package in &selection.packages {
        candidates.extend(store.collect_package(package)?);
    }
    for fqn in &selection.classes {
        let class = store
            .load(fqn)?
            .with_context(|| format!("class {} is not on the classpath", fqn))?;
        candidates.push(class);
    }
    candidates.sort_by(|a, b| a.fqn.cmp(&b.fqn));
    candidates.dedup_by(|a, b| a.fqn == b.fqn);

    let candidates = service.filter_out_configured_excludes(candidates);
    Ok(service.filter_out_non_buildable_classes(candidates))
}
