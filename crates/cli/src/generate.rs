use crate::list::select_candidates;
use crate::Selection;
use anyhow::Context;
use builderscope_codegen::generate_builder_source;
use builderscope_core::model::BuilderMetadata;
use builderscope_core::service::BuilderMetadataService;
use builderscope_java::ClasspathStore;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub fn run(selection: &Selection, out: &Path) -> anyhow::Result<()> {
    let config = crate::list::load_config(selection)?;
    let store = ClasspathStore::open(&selection.classpath)?;
    let service = BuilderMetadataService::new(&store, &config);

    let targets = select_candidates(&store, &service, selection)?;
    info!("generating builders for {} classes into {}", targets.len(), out.display());

    // Per-class work is independent; failures skip the class and the run
    // continues.
    let outcomes: Vec<(String, anyhow::Result<PathBuf>)> = targets
        .par_iter()
        .map(|class| {
            let outcome = service
                .collect_builder_metadata(class)
                .map_err(anyhow::Error::from)
                .and_then(|metadata| {
                    let source = generate_builder_source(&metadata);
                    write_builder_source(out, &metadata, &source)
                });
            (class.fqn.clone(), outcome)
        })
        .collect();

    let mut generated = 0usize;
    let mut failed = 0usize;
    for (fqn, outcome) in outcomes {
        match outcome {
            Ok(path) => {
                info!("{} -> {}", fqn, path.display());
                generated += 1;
            }
            Err(err) => {
                warn!("skipping {}: {:#}", fqn, err);
                failed += 1;
            }
        }
    }
    info!("done: {} builders generated, {} classes skipped", generated, failed);

    if generated == 0 && failed > 0 {
        anyhow::bail!("all {} candidate classes failed", failed);
    }
    Ok(())
}

fn write_builder_source(
    out: &Path,
    metadata: &BuilderMetadata,
    source: &str,
) -> anyhow::Result<PathBuf> {
    let mut dir = out.to_path_buf();
    for segment in metadata.package_name.split('.').filter(|s| !s.is_empty()) {
        dir.push(segment);
    }
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("cannot create output directory {}", dir.display()))?;
    let file = dir.join(format!("{}.java", metadata.name));
    std::fs::write(&file, source)
        .with_context(|| format!("cannot write {}", file.display()))?;
    Ok(file)
}
