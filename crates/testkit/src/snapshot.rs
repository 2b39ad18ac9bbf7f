//! Golden-file snapshot assertions.
//!
//! Values are serialized as pretty JSON with object keys sorted, so goldens
//! diff cleanly and do not depend on struct field order. Comparison is
//! byte-exact. Rerun with `CUBIST_UPDATE_SNAPSHOTS=1` to rewrite goldens.

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Environment variable that switches snapshot assertions into update mode.
pub const UPDATE_SNAPSHOTS_ENV: &str = "CUBIST_UPDATE_SNAPSHOTS";

/// Assert that `value` matches the golden JSON at `path`, or rewrite the
/// golden when update mode is on.
pub fn assert_json_snapshot<P: AsRef<Path>, T: Serialize>(path: P, value: &T) -> Result<()> {
    let path = path.as_ref();
    let actual = canonical_json(value)?;

    if update_mode() {
        tracing::info!(path = %path.display(), "updating snapshot");
        return write_snapshot(path, &actual);
    }

    let expected = fs::read_to_string(path).with_context(|| {
        format!(
            "Snapshot missing at {} (run with {}=1 to create it)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        )
    })?;

    // Goldens checked out on Windows may carry CRLF endings.
    let expected = expected.replace("\r\n", "\n");
    if expected != actual {
        let (line, want, got) = first_difference(&expected, &actual);
        anyhow::bail!(
            "Snapshot mismatch at {} line {line}:\n  expected: {want}\n  actual:   {got}\n(run with {}=1 to update)",
            path.display(),
            UPDATE_SNAPSHOTS_ENV
        );
    }

    Ok(())
}

/// Render `value` the way goldens are stored.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let value = serde_json::to_value(value).context("Failed to serialize snapshot value")?;
    let mut out =
        serde_json::to_string_pretty(&sort_keys(value)).context("Failed to format snapshot")?;
    out.push('\n');
    Ok(out)
}

fn update_mode() -> bool {
    std::env::var(UPDATE_SNAPSHOTS_ENV)
        .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

fn write_snapshot(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create snapshot directory {}", parent.display()))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write snapshot {}", path.display()))
}

fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, inner)| (key, sort_keys(inner)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn first_difference<'a>(expected: &'a str, actual: &'a str) -> (usize, &'a str, &'a str) {
    let mut want_lines = expected.lines();
    let mut got_lines = actual.lines();
    let mut line = 1;
    loop {
        match (want_lines.next(), got_lines.next()) {
            (Some(want), Some(got)) if want == got => line += 1,
            (want, got) => return (line, want.unwrap_or("<eof>"), got.unwrap_or("<eof>")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use serde_json::json;

    #[test]
    fn canonical_json_sorts_nested_keys() {
        let rendered = canonical_json(&json!({"b": 1, "a": {"z": true, "c": [{"y": 0, "x": 1}]}}))
            .expect("render");
        assert_eq!(
            rendered,
            "{\n  \"a\": {\n    \"c\": [\n      {\n        \"x\": 1,\n        \"y\": 0\n      }\n    ],\n    \"z\": true\n  },\n  \"b\": 1\n}\n"
        );
    }

    #[test]
    fn matching_snapshot_passes_and_mismatch_reports_line() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("snapshot.json");
        fs::write(&path, canonical_json(&json!({"size": 2})).expect("render")).expect("write");

        assert_json_snapshot(&path, &json!({"size": 2})).expect("matches");

        let err = assert_json_snapshot(&path, &json!({"size": 3})).expect_err("mismatch");
        let message = err.to_string();
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("\"size\": 3"), "{message}");
    }

    #[test]
    fn missing_snapshot_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("missing.json");
        let err = assert_json_snapshot(&path, &json!([])).expect_err("missing");
        assert!(err.to_string().contains(UPDATE_SNAPSHOTS_ENV));
    }
}
