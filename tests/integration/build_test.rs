//! End-to-end build tests with deterministic stand-in tools

use std::fs;
use tempfile::TempDir;

use crate::helpers::{assert_in_order, kbpack, project_with, sized_page};

#[test]
fn report_lists_every_stage_size_in_pipeline_order() {
    // 20,000-byte page holding a 5,000-byte script and a 2,000-byte style.
    let page = sized_page(20_000, 5_000, 2_000);
    let dir = project_with(&page, "[substitutions]\ntoolbar = \"t\"\n");

    let output = kbpack(dir.path()).arg("build").output().unwrap();
    assert!(output.status.success(), "build failed: {output:?}");

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_in_order(
        &stdout,
        &[
            "Linting script...",
            "Minifying script...",
            "index.js (5,000 bytes) -> index.min.js (5,000 bytes)",
            "Minifying style...",
            "index.css (2,000 bytes) -> index.min.css (2,000 bytes)",
            "Building compressed markup...",
            "index.html (20,000 bytes) -> build/index.min.html (",
            "Applying substitutions...",
            "dist/index.html (",
            "Building archive...",
            "dist/bundle.zip (",
            "Build succeeded!",
            "to spare!",
        ],
    );

    for artifact in [
        "build/index.js",
        "build/index.min.js",
        "build/index.css",
        "build/index.min.css",
        "build/index.min.html",
        "dist/index.html",
        "dist/bundle.zip",
    ] {
        assert!(dir.path().join(artifact).exists(), "missing {artifact}");
    }

    // The substitution landed in the dist page.
    let dist = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
    assert!(dist.contains("class=\"t\""));
    assert!(!dist.contains("toolbar"));
}

#[test]
fn build_exits_nonzero_when_over_budget() {
    let page = sized_page(20_000, 5_000, 2_000);
    let dir = project_with(&page, "[budget]\ntarget_bytes = 10\n");

    let output = kbpack(dir.path()).arg("build").output().unwrap();
    assert!(!output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("Build failed!"));
    assert!(stdout.contains("over budget"));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("archive exceeds the byte budget"));

    // The artifacts are still produced; only the gate failed.
    assert!(dir.path().join("dist/bundle.zip").exists());
}

#[test]
fn json_report_carries_the_byte_accounting() {
    let page = sized_page(20_000, 5_000, 2_000);
    let dir = project_with(&page, "");

    let output = kbpack(dir.path()).args(["build", "--json"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is the JSON report");
    assert_eq!(report["source_bytes"], 20_000);
    assert_eq!(report["script_bytes"], 5_000);
    assert_eq!(report["style_bytes"], 2_000);
    assert_eq!(report["target_bytes"], 13_312);
    assert_eq!(report["outcome"]["result"], "within");
    assert!(report["outcome"]["margin"].as_u64().unwrap() > 0);
}

#[test]
fn page_without_a_script_block_aborts() {
    let page = "<html><style>a{}</style><body>no script here</body></html>";
    let dir = project_with(page, "");

    let output = kbpack(dir.path()).arg("build").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Malformed input page"));
}

#[test]
fn failing_linter_aborts_the_build() {
    let page = sized_page(2_000, 500, 200);
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), page).unwrap();
    fs::write(
        dir.path().join("kbpack.toml"),
        r#"
[tools.lint]
command = ["sh", "-c", "echo 'parse error' >&2; exit 2"]
output = "in-place"

[tools.script]
command = ["cp", "{input}", "{output}"]
output = "file"

[tools.style]
command = ["cp", "{input}", "{output}"]
output = "file"
"#,
    )
    .unwrap();

    let output = kbpack(dir.path()).arg("build").output().unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Lint stage failed"));
    assert!(stderr.contains("parse error"));
    // Nothing past the lint stage ran.
    assert!(!dir.path().join("dist").exists());
}

#[test]
fn stdout_mode_style_minifier_is_supported() {
    let page = sized_page(2_000, 500, 200);
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("index.html"), page).unwrap();
    fs::write(
        dir.path().join("kbpack.toml"),
        r#"
[tools.lint]
command = ["true"]
output = "in-place"

[tools.script]
command = ["cp", "{input}", "{output}"]
output = "file"

[tools.style]
command = ["cat", "{input}"]
output = "stdout"
"#,
    )
    .unwrap();

    let output = kbpack(dir.path()).arg("build").output().unwrap();
    assert!(output.status.success(), "build failed: {output:?}");
    // The stdout-mode tool's artifact was persisted by the pipeline.
    assert!(dir.path().join("build/index.min.css").exists());
}
