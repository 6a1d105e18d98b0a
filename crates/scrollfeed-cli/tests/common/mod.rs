use std::path::Path;
use std::process::{Command, Output};

use url::Url;

/// Posts used to seed test stores, oldest first.
pub const FIXTURE_POSTS: &str = r#"[
  {"title": "First", "content": "one", "author": {"id": 1, "name": "Ada"}},
  {"title": "Second", "content": "two", "author": {"id": 2, "name": "Brian"}},
  {"title": "Third", "content": "three", "author": {"id": 1, "name": "Ada"}},
  {"title": "Fourth", "content": "four", "author": {"id": 3, "name": "Carmen", "email": "carmen@example.com"}},
  {"title": "Fifth", "content": "five", "author": {"id": 2, "name": "Brian"}}
]"#;

/// Build a `file://` store URL for a directory.
pub fn file_store_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

/// Run the CLI binary against a store, isolated from the user's data dir.
pub fn run_cli(args: &[&str], home: &Path, store: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_scrollfeed"));
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_DATA_HOME", home.join("data"));
    cmd.env("SCROLLFEED_STORE", store);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], home: &Path, store: &str) -> String {
    let output = run_cli(args, home, store);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Parse JSON-lines output.
pub fn json_lines(stdout: &str) -> Vec<serde_json::Value> {
    stdout
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).expect("Invalid JSON line"))
        .collect()
}
