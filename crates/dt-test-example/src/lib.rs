use std::path::PathBuf;

pub fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

pub fn trees_root() -> PathBuf {
    workspace_root().join("demos").join("trees")
}

pub fn broken_root() -> PathBuf {
    workspace_root().join("demos").join("broken")
}

pub fn tree_path(name: &str) -> PathBuf {
    trees_root().join(format!("{}.json", name))
}

pub fn broken_tree_path(name: &str) -> PathBuf {
    broken_root().join(format!("{}.json", name))
}
