//! Classpath scanning and lazy class loading.

use crate::builtin::builtin_class;
use crate::convert::convert_class;
use builderscope_core::error::{CoreError, Result};
use builderscope_core::introspect::ClassStore;
use builderscope_core::model::JavaClass;
use dashmap::DashMap;
use ristretto_classfile::ClassFile;
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};
use walkdir::WalkDir;
use zip::ZipArchive;

#[derive(Debug, Clone)]
enum ClassLocation {
    File(PathBuf),
    ArchiveEntry { archive: PathBuf, entry: String },
}

/// A [`ClassStore`] over directory and jar classpath entries.
///
/// The classpath is indexed up front (qualified name to location); class
/// files are parsed lazily and memoized. The cache is immutable after first
/// write, so concurrent per-class metadata collection is safe.
pub struct ClasspathStore {
    index: HashMap<String, ClassLocation>,
    cache: DashMap<String, Arc<JavaClass>>,
}

impl ClasspathStore {
    /// Index the given classpath entries. Directories are walked for
    /// `.class` files; anything else is treated as a zip archive.
    pub fn open(entries: &[PathBuf]) -> Result<Self> {
        let mut index = HashMap::new();
        for entry in entries {
            if entry.is_dir() {
                index_directory(entry, &mut index)?;
            } else {
                index_archive(entry, &mut index)?;
            }
        }
        info!(
            "indexed {} classes from {} classpath entries",
            index.len(),
            entries.len()
        );
        Ok(ClasspathStore {
            index,
            cache: DashMap::new(),
        })
    }

    /// Number of classes on the indexed classpath.
    pub fn class_count(&self) -> usize {
        self.index.len()
    }

    fn parse_class(&self, fqn: &str, location: &ClassLocation) -> Result<Arc<JavaClass>> {
        let bytes = self.read_bytes(location)?;
        let class_file = ClassFile::from_bytes(&mut Cursor::new(bytes)).map_err(|err| {
            CoreError::Reflection(format!("failed to parse class file of {}: {:?}", fqn, err))
        })?;
        debug!("parsed class file of {}", fqn);
        Ok(Arc::new(convert_class(&class_file, fqn)?))
    }

    fn read_bytes(&self, location: &ClassLocation) -> Result<Vec<u8>> {
        match location {
            ClassLocation::File(path) => Ok(std::fs::read(path)?),
            ClassLocation::ArchiveEntry { archive, entry } => {
                let file = File::open(archive)?;
                let mut zip = ZipArchive::new(file)
                    .map_err(|err| archive_error(archive, &err.to_string()))?;
                let mut zip_entry = zip
                    .by_name(entry)
                    .map_err(|err| archive_error(archive, &err.to_string()))?;
                let mut bytes = Vec::with_capacity(zip_entry.size() as usize);
                zip_entry.read_to_end(&mut bytes)?;
                Ok(bytes)
            }
        }
    }
}

impl ClassStore for ClasspathStore {
    fn load(&self, fqn: &str) -> Result<Option<Arc<JavaClass>>> {
        if fqn.is_empty() {
            return Err(CoreError::InvalidArgument(
                "class name to load must not be empty".to_string(),
            ));
        }
        if let Some(cached) = self.cache.get(fqn) {
            return Ok(Some(Arc::clone(cached.value())));
        }
        let Some(location) = self.index.get(fqn) else {
            return Ok(builtin_class(fqn));
        };
        let parsed = self.parse_class(fqn, location)?;
        self.cache.insert(fqn.to_string(), Arc::clone(&parsed));
        Ok(Some(parsed))
    }

    fn collect_package(&self, package: &str) -> Result<Vec<Arc<JavaClass>>> {
        if package.is_empty() {
            return Err(CoreError::InvalidArgument(
                "package to scan must not be empty".to_string(),
            ));
        }
        let prefix = format!("{}.", package);
        let mut fqns: Vec<&String> = self
            .index
            .keys()
            .filter(|fqn| fqn.starts_with(&prefix))
            .collect();
        fqns.sort();
        fqns.into_iter()
            .map(|fqn| {
                self.load(fqn)?.ok_or_else(|| {
                    CoreError::Reflection(format!("indexed class {} disappeared", fqn))
                })
            })
            .collect()
    }
}

fn index_directory(root: &Path, index: &mut HashMap<String, ClassLocation>) -> Result<()> {
    for entry in WalkDir::new(root) {
        let entry =
            entry.map_err(|err| CoreError::Reflection(format!("classpath walk failed: {}", err)))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().is_none_or(|ext| ext != "class") {
            continue;
        }
        let Ok(relative) = path.strip_prefix(root) else {
            continue;
        };
        let fqn = relative
            .with_extension("")
            .components()
            .map(|component| component.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(".");
        if is_metadata_class(&fqn) {
            continue;
        }
        index.insert(fqn, ClassLocation::File(path.to_path_buf()));
    }
    Ok(())
}

fn index_archive(path: &Path, index: &mut HashMap<String, ClassLocation>) -> Result<()> {
    let file = File::open(path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|err| archive_error(path, &err.to_string()))?;
    for i in 0..archive.len() {
        let entry = archive
            .by_index(i)
            .map_err(|err| archive_error(path, &err.to_string()))?;
        let name = entry.name().to_string();
        if !name.ends_with(".class") || name.starts_with("META-INF") {
            continue;
        }
        let fqn = name.trim_end_matches(".class").replace('/', ".");
        if is_metadata_class(&fqn) {
            continue;
        }
        index.insert(
            fqn,
            ClassLocation::ArchiveEntry {
                archive: path.to_path_buf(),
                entry: name,
            },
        );
    }
    Ok(())
}

fn is_metadata_class(fqn: &str) -> bool {
    let simple = fqn.rsplit('.').next().unwrap_or(fqn);
    simple == "module-info" || simple == "package-info"
}

fn archive_error(path: &Path, message: &str) -> CoreError {
    CoreError::Reflection(format!("cannot read archive {}: {}", path.display(), message))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_classpath_still_serves_builtins() {
        let store = ClasspathStore::open(&[]).unwrap();
        assert_eq!(store.class_count(), 0);
        let list = store.load("java.util.List").unwrap().unwrap();
        assert!(list.is_interface());
        assert!(store.load("com.example.Missing").unwrap().is_none());
    }

    #[test]
    fn builtin_hierarchy_supports_assignability() {
        let store = ClasspathStore::open(&[]).unwrap();
        assert!(store.is_assignable("java.util.ArrayList", "java.util.Collection"));
        assert!(store.is_assignable("java.util.TreeMap", "java.util.Map"));
        assert!(store.is_assignable("java.util.LinkedHashSet", "java.util.Collection"));
        assert!(!store.is_assignable("java.lang.String", "java.util.Collection"));
    }

    #[test]
    fn directory_entries_are_indexed_by_relative_path() {
        let temp = tempfile::tempdir().unwrap();
        let class_dir = temp.path().join("com/example");
        std::fs::create_dir_all(&class_dir).unwrap();
        std::fs::write(class_dir.join("Foo.class"), b"\xCA\xFE\xBA\xBEgarbage").unwrap();
        std::fs::write(class_dir.join("Foo$Bar.class"), b"\xCA\xFE\xBA\xBEgarbage").unwrap();
        std::fs::write(class_dir.join("package-info.class"), b"ignored").unwrap();

        let store = ClasspathStore::open(&[temp.path().to_path_buf()]).unwrap();
        assert_eq!(store.class_count(), 2);

        // The bytes are garbage, so loading must fail loudly, not silently.
        let result = store.load("com.example.Foo");
        assert!(matches!(result, Err(CoreError::Reflection(_))));
    }

    #[test]
    fn empty_names_are_invalid_arguments() {
        let store = ClasspathStore::open(&[]).unwrap();
        assert!(matches!(
            store.load(""),
            Err(CoreError::InvalidArgument(_))
        ));
        assert!(matches!(
            store.collect_package(""),
            Err(CoreError::InvalidArgument(_))
        ));
    }
}
