#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Creates a temporary workspace with fixture files for integration tests.
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates a file with the given content, making parent directories.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.dir.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    /// Returns the path to the temp directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Creates a synthetic reflog so git-stats extraction has input.
    pub fn create_reflog(&self, messages: &[&str]) {
        let logs = self.path().join(".git").join("logs");
        fs::create_dir_all(&logs).expect("Failed to create .git/logs");
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_secs();
        let mut text = String::new();
        for (i, message) in messages.iter().enumerate() {
            let ts = now - (i as u64) * 3600;
            text.push_str(&format!(
                "0000000000000000000000000000000000000000 a94a8fe5ccb19ba61c4c0873d391e987982fbbd3 Dev <dev@example.com> {ts} +0000\tcommit: {message}\n"
            ));
        }
        fs::write(logs.join("HEAD"), text).expect("Failed to write reflog");
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}
