use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// An access log inside its own temporary directory.
pub struct TestLogFile {
    _dir: TempDir,
    path: PathBuf,
}

impl TestLogFile {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("access.log");
        File::create(&path).expect("failed to create log file");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, lines: &[String]) {
        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .expect("failed to open log file");
        for line in lines {
            writeln!(file, "{line}").expect("failed to write log line");
        }
        file.flush().expect("failed to flush log file");
    }

    pub fn contents(&self) -> String {
        fs::read_to_string(&self.path).expect("failed to read log file")
    }
}

impl Default for TestLogFile {
    fn default() -> Self {
        Self::new()
    }
}

pub fn clf_line(host: &str, path: &str, size: u64) -> String {
    format!(
        r#"{host} - frank [10/Oct/2000:13:55:36 -0700] "GET {path} HTTP/1.0" 200 {size} "-" "curl/8.0""#
    )
}
