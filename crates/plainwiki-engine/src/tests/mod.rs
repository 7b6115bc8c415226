use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary pages directory
pub fn create_test_pages_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file in the pages directory with raw content
pub fn create_test_file(pages_dir: &TempDir, filename: &str, content: &str) -> PathBuf {
    let file_path = pages_dir.path().join(filename);
    fs::write(&file_path, content).unwrap();
    file_path
}
