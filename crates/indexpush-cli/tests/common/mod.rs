#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

#[allow(dead_code)]
pub const CMD_TIMEOUT: Duration = Duration::from_secs(15);
#[allow(dead_code)]
pub const KEY: &str = "0123456789abcdef";
#[allow(dead_code)]
pub const BASE_URL: &str = "https://example.org";

/// Create an `indexpush` command isolated from the host environment.
#[allow(dead_code)]
pub fn indexpush_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("indexpush"));
    cmd.timeout(CMD_TIMEOUT);
    cmd.env_remove("INDEXPUSH_BASE_URL");
    cmd.env_remove("INDEXPUSH_KEY");
    cmd.env_remove("INDEXPUSH_CONFIG");
    cmd.env_remove("INDEXPUSH_OUTPUT_FORMAT");
    cmd.env("NO_COLOR", "1");
    cmd
}

/// Write a site config whose targets are `(name, url)` pairs.
#[allow(dead_code)]
pub fn write_config(dir: &TempDir, targets: &[(&str, String)]) -> PathBuf {
    let mut content = format!(
        "base_url = \"{BASE_URL}\"\nkey = \"{KEY}\"\nrequest_timeout_secs = 5\n"
    );
    for (name, url) in targets {
        content.push_str(&format!("\n[[targets]]\nname = \"{name}\"\nurl = \"{url}\"\n"));
    }
    let path = dir.path().join("indexpush.toml");
    std::fs::write(&path, content).expect("write config");
    path
}

/// `indexpush_cmd` pointed at `config`.
#[allow(dead_code)]
pub fn indexpush_with_config(config: &Path) -> Command {
    let mut cmd = indexpush_cmd();
    cmd.arg("--config").arg(config);
    cmd
}

/// A small catalog export with two documents and one institution.
#[allow(dead_code)]
pub fn write_catalog(dir: &TempDir) -> PathBuf {
    let content = r#"{
  "documents": [
    { "slug": "123", "lastModified": "2024-03-01T10:00:00Z" },
    { "slug": "456" }
  ],
  "institutions": ["adalet"]
}"#;
    let path = dir.path().join("catalog.json");
    std::fs::write(&path, content).expect("write catalog");
    path
}
