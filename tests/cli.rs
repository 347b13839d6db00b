//! End-to-end runs of the `monty` binary.

use std::{
    io::Write,
    path::Path,
    process::{Command, Output},
};

use tempfile::NamedTempFile;

fn script(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn monty(args: &[&Path]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_monty"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn runs_script() {
    let file = script("push 1\npush 2\npush 3\npall\nrotl\npall\n");
    let output = monty(&[file.path()]);

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "3\n2\n1\n2\n1\n3\n");
    assert_eq!(stderr(&output), "");
}

#[test]
fn reports_error_with_line_number() {
    let file = script("push 1\n# comment\n\npint\nfoo 3\npall\n");
    let output = monty(&[file.path()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "1\n");
    assert_eq!(stderr(&output), "L5: unknown instruction foo\n");
}

#[test]
fn invalid_push_operand() {
    let file = script("push 1\npush abc\n");
    let output = monty(&[file.path()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "L2: usage: push integer\n");
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.m");
    let output = monty(&[path.as_path()]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stderr(&output),
        format!("Error: Can't open file {}\n", path.display())
    );
}

#[test]
fn usage_without_arguments() {
    let output = monty(&[]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stderr(&output), "USAGE: monty file\n");
}

#[test]
fn queue_flag() {
    let file = script("push 1\npush 2\npush 3\npop\npall\n");
    let output = Command::new(env!("CARGO_BIN_EXE_monty"))
        .arg("--queue")
        .arg(file.path())
        .env_remove("RUST_LOG")
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "3\n2\n");
}
