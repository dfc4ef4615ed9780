use std::fs;
use std::path::PathBuf;

use dt_api::TreeSource;
use dt_core::DialogTreeError;

use crate::{map_cli_source_path, map_cli_source_read};

/// Reads the tree payload from a JSON file on disk.
#[derive(Debug, Clone)]
pub(crate) struct FileTreeSource {
    pub(crate) path: String,
}

impl FileTreeSource {
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl TreeSource for FileTreeSource {
    fn fetch(&self) -> Result<String, DialogTreeError> {
        let path = resolve_tree_file(&self.path)?;
        log::debug!("reading tree from {}", path.display());
        fs::read_to_string(&path).map_err(map_cli_source_read)
    }

    fn describe(&self) -> String {
        format!("tree-file:{}", self.path)
    }
}

pub(crate) fn resolve_tree_file(tree_file: &str) -> Result<PathBuf, DialogTreeError> {
    let path = PathBuf::from(tree_file);
    let absolute = if path.is_absolute() {
        path
    } else {
        std::env::current_dir()
            .map_err(map_cli_source_path)?
            .join(path)
    };

    if !absolute.exists() {
        return Err(DialogTreeError::load(
            "CLI_SOURCE_NOT_FOUND",
            format!("tree file does not exist: {}", absolute.display()),
        ));
    }

    if !absolute.is_file() {
        return Err(DialogTreeError::load(
            "CLI_SOURCE_NOT_FILE",
            format!("tree path is not a file: {}", absolute.display()),
        ));
    }

    Ok(absolute)
}

#[cfg(test)]
mod source_loader_tests {
    use super::*;
    use crate::cli_test_support::*;

    #[test]
    fn resolve_tree_file_validates_existence_and_kind() {
        let missing = temp_path("missing-tree.json");
        let missing_err = resolve_tree_file(missing.to_string_lossy().as_ref())
            .expect_err("missing path should fail");
        assert_eq!(missing_err.code, "CLI_SOURCE_NOT_FOUND");

        let dir = temp_path("tree-dir");
        fs::create_dir_all(&dir).expect("dir");
        let dir_err =
            resolve_tree_file(dir.to_string_lossy().as_ref()).expect_err("dir should fail");
        assert_eq!(dir_err.code, "CLI_SOURCE_NOT_FILE");
    }

    #[test]
    fn file_tree_source_reads_payload() {
        let path = temp_path("tree.json");
        write_file(&path, "{\"startNode\":\"a\"}");
        let source = FileTreeSource::new(path.to_string_lossy());
        assert_eq!(source.fetch().expect("fetch"), "{\"startNode\":\"a\"}");
        assert!(source.describe().starts_with("tree-file:"));
    }

    #[test]
    fn file_tree_source_reads_demo_tree() {
        let source = FileTreeSource::new(demo_tree("support"));
        assert!(source.fetch().expect("fetch").contains("startNode"));
    }
}
