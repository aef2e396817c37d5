use std::fs;
use std::path::{Path, PathBuf};

/// Absolute path of a file under fixtures/miniprogram/
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join("miniprogram")
        .join(name)
}

/// Fixture path as the string key batch results use for requested files
pub fn fixture_key(name: &str) -> String {
    fixture_path(name).to_string_lossy().into_owned()
}

/// Canonical key of a file discovered through an import
pub fn canonical_key(path: &Path) -> String {
    fs::canonicalize(path)
        .expect("fixture should exist")
        .to_string_lossy()
        .into_owned()
}

/// Write `files` (relative path, content) into `root`, creating directories
pub fn write_files(root: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(relative, content)| {
            let path = root.join(relative);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).expect("create fixture dir");
            }
            fs::write(&path, content).expect("write fixture file");
            path
        })
        .collect()
}
