use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const SOURCE: &str = "package a.b;\nimport c.D;\nclass X {\n  int f = 1;\n  void m() { return; }\n}\n";

#[allow(deprecated)]
fn cli() -> Command {
    Command::cargo_bin("class-chunker").expect("binary")
}

fn write_source(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn no_arguments_prints_usage() {
    cli()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn prints_marked_chunks() {
    let temp = tempdir().unwrap();
    let path = write_source(temp.path(), "X.java", SOURCE);

    let expected = "=== EMBEDDING CHUNK START ===\n\
                    package a.b;\n\nimport c.D;\n\nclass X {\n\n  int f = 1;\n\n}\n\n\
                    === EMBEDDING CHUNK END ===\n\n\
                    === EMBEDDING CHUNK START ===\n\
                    package a.b;\n\nclass X {\n\n  void m() { return; }\n\n}\n\n\
                    === EMBEDDING CHUNK END ===\n\n";

    cli()
        .arg("--quiet")
        .arg(&path)
        .assert()
        .success()
        .stdout(expected);
}

#[test]
fn json_lines_output() {
    let temp = tempdir().unwrap();
    let path = write_source(temp.path(), "X.java", SOURCE);

    let output = cli()
        .args(["--quiet", "--format", "jsonl"])
        .arg(&path)
        .output()
        .expect("command run");
    assert!(output.status.success());

    let rows: Vec<Value> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).expect("valid json"))
        .collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["metadata"]["chunk_type"], "class");
    assert_eq!(rows[1]["metadata"]["chunk_type"], "method");
    assert_eq!(rows[1]["metadata"]["qualified_name"], "a.b.X.m");
    assert_eq!(rows[1]["start_line"], 5);
}

#[test]
fn config_file_sets_markers_and_member_imports() {
    let temp = tempdir().unwrap();
    let path = write_source(temp.path(), "X.java", SOURCE);
    let config = write_source(
        temp.path(),
        "chunker.toml",
        "[chunker]\nmember_imports = true\n\n[output.markers]\nstart = \"<<\"\nend = \">>\"\n",
    );

    cli()
        .arg("--quiet")
        .arg("--config")
        .arg(&config)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "<<\npackage a.b;\n\nimport c.D;\n\nclass X {\n\n  void m() { return; }\n\n}\n\n>>\n",
        ));
}

#[test]
fn parse_failure_prints_no_chunks() {
    let temp = tempdir().unwrap();
    let path = write_source(temp.path(), "Broken.java", "class X {\n  void m( {\n}\n");

    cli()
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Parse error"));
}

#[test]
fn missing_file_fails() {
    let temp = tempdir().unwrap();

    cli()
        .arg(temp.path().join("Nope.java"))
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn unsupported_extension_fails() {
    let temp = tempdir().unwrap();
    let path = write_source(temp.path(), "X.txt", SOURCE);

    cli()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported language"));
}
