//! Tests for the subs commands

use std::fs;
use tempfile::TempDir;

use crate::helpers::{assert_in_order, kbpack};

#[test]
fn subs_add_preserves_comments_and_creates_the_table() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("kbpack.toml"),
        "# hand-tuned budget\n[budget]\ntarget_bytes = 9216\n",
    )
    .unwrap();

    kbpack(dir.path())
        .args(["subs", "add", "toolbar", "t"])
        .assert()
        .success();

    let written = fs::read_to_string(dir.path().join("kbpack.toml")).unwrap();
    assert!(written.contains("# hand-tuned budget"));
    assert!(written.contains("target_bytes = 9216"));
    assert!(written.contains("[substitutions]"));
    assert!(written.contains("toolbar = \"t\""));
}

#[test]
fn subs_add_rejects_a_duplicate_replacement() {
    let dir = TempDir::new().unwrap();
    let before = "[substitutions]\nnode = \"n\"\n";
    fs::write(dir.path().join("kbpack.toml"), before).unwrap();

    let output = kbpack(dir.path())
        .args(["subs", "add", "nav", "n"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("duplicate replacement"));

    // Nothing was written.
    assert_eq!(
        fs::read_to_string(dir.path().join("kbpack.toml")).unwrap(),
        before
    );
}

#[test]
fn subs_remove_deletes_a_rule_and_rejects_unknown_patterns() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("kbpack.toml"),
        "[substitutions]\nnode = \"n\"\ntoolbar = \"t\"\n",
    )
    .unwrap();

    kbpack(dir.path())
        .args(["subs", "remove", "node"])
        .assert()
        .success();
    let written = fs::read_to_string(dir.path().join("kbpack.toml")).unwrap();
    assert!(!written.contains("node"));
    assert!(written.contains("toolbar"));

    let output = kbpack(dir.path())
        .args(["subs", "remove", "ghost"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("no substitution rule"));
}

#[test]
fn subs_list_prints_rules_in_application_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("kbpack.toml"),
        "[substitutions]\nnode = \"n\"\n\"node-effect\" = \"ne\"\ntoolbar = \"t\"\n",
    )
    .unwrap();

    let output = kbpack(dir.path()).args(["subs", "list"]).output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // Longest pattern first, then by length.
    assert_in_order(&stdout, &["node-effect", "toolbar", "node"]);
}

#[test]
fn subs_check_reports_table_health() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("kbpack.toml"),
        "[substitutions]\nnode = \"n\"\ntoolbar = \"t\"\n",
    )
    .unwrap();
    let output = kbpack(dir.path()).args(["subs", "check"]).output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8(output.stdout)
        .unwrap()
        .contains("Substitution table OK (2 rules)"));

    fs::write(
        dir.path().join("kbpack.toml"),
        "[substitutions]\nnode = \"n\"\nnav = \"n\"\n",
    )
    .unwrap();
    let output = kbpack(dir.path()).args(["subs", "check"]).output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8(output.stderr)
        .unwrap()
        .contains("duplicate replacement"));
}
