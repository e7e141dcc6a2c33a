use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

fn tabalign_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_tabalign"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("failed to write fixture");
    path
}

fn compare(args: &[&str]) -> Output {
    tabalign_cmd()
        .arg("compare")
        .args(args)
        .output()
        .expect("failed to run tabalign")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn identical_tables_exit_0() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_fixture(dir.path(), "a.tsv", "x\t1\ny\t2\n");
    let b = write_fixture(dir.path(), "b.tsv", "x\t1\ny\t2\n");

    let output = compare(&[a.to_str().unwrap(), b.to_str().unwrap()]);

    assert!(
        output.status.success(),
        "identical tables should exit 0: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let text = stdout(&output);
    assert!(text.contains("Loaded Data A: 2 rows, 2 columns"));
    assert!(text.contains("2 rows (identical): 2 match, 0 mismatch, 0 only in A, 0 only in B"));
}

#[test]
fn insertion_in_middle_exit_1() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_fixture(dir.path(), "a.tsv", "x\t1\nz\t9\n");
    let b = write_fixture(dir.path(), "b.tsv", "x\t1\ny\t2\nz\t9\n");

    let output = compare(&["--format", "csv", a.to_str().unwrap(), b.to_str().unwrap()]);

    assert_eq!(
        output.status.code(),
        Some(1),
        "differences should exit 1: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        stdout(&output),
        "A_Col_1,A_Col_2,B_Col_1,B_Col_2,Diff_Type\n\
         x,1,x,1,Match\n\
         ,,y,2,Only in B\n\
         z,9,z,9,Match\n"
    );
}

#[test]
fn header_option_names_columns() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_fixture(dir.path(), "a.tsv", "sku\tqty\na\t1\n");
    let b = write_fixture(dir.path(), "b.tsv", "sku\tqty\na\t2\n");

    let output = compare(&[
        "--header",
        "--format",
        "json",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(
        value["columns"],
        serde_json::json!(["A_sku", "A_qty", "B_sku", "B_qty", "Diff_Type"])
    );
    assert_eq!(value["rows"][0]["label"], "Mismatch");
    assert_eq!(value["operations"][0]["kind"], "replace");
}

#[test]
fn empty_input_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_fixture(dir.path(), "a.tsv", "x\t1\n");
    let b = write_fixture(dir.path(), "b.tsv", "\n  \n");

    let output = compare(&[a.to_str().unwrap(), b.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr)
        .contains("Please paste data into both A and B fields."));
}

#[test]
fn malformed_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_fixture(dir.path(), "a.tsv", "x\t1\ny\t2\t3\n");
    let b = write_fixture(dir.path(), "b.tsv", "x\t1\n");

    let output = compare(&[a.to_str().unwrap(), b.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error parsing data A"), "stderr: {}", stderr);
    assert!(stderr.contains("expected 2 fields, saw 3"), "stderr: {}", stderr);
}

#[test]
fn stdin_input_and_xlsx_export() {
    let dir = tempfile::tempdir().unwrap();
    let b = write_fixture(dir.path(), "b.tsv", "x\t1\n");
    let out_path = dir.path().join("comparison_result.xlsx");

    let mut child = tabalign_cmd()
        .args([
            "compare",
            "--quiet",
            "-o",
            out_path.to_str().unwrap(),
            "-",
            b.to_str().unwrap(),
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn tabalign");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"x\t1\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(stdout(&output).lines().count(), 1);
    let bytes = std::fs::read(&out_path).unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[test]
fn only_diff_hides_matches() {
    let dir = tempfile::tempdir().unwrap();
    let a = write_fixture(dir.path(), "a.tsv", "a\t1\nb\t2\n");
    let b = write_fixture(dir.path(), "b.tsv", "a\t1\nc\t3\n");

    let output = compare(&[
        "--only-diff",
        "--format",
        "csv",
        a.to_str().unwrap(),
        b.to_str().unwrap(),
    ]);

    assert_eq!(
        stdout(&output),
        "A_Col_1,A_Col_2,B_Col_1,B_Col_2,Diff_Type\nb,2,c,3,Mismatch\n"
    );
}

#[test]
fn config_file_sets_delimiter() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), "config.toml", "delimiter = \",\"\n");
    let a = write_fixture(dir.path(), "a.csv", "x,1\n");
    let b = write_fixture(dir.path(), "b.csv", "x,1\n");

    let output = tabalign_cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "compare",
            "--format",
            "csv",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout(&output).contains("x,1,x,1,Match"));
}

#[test]
fn no_header_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_fixture(dir.path(), "config.toml", "has_header = true\n");
    let a = write_fixture(dir.path(), "a.tsv", "sku\tqty\na\t1\n");
    let b = write_fixture(dir.path(), "b.tsv", "sku\tqty\na\t1\n");

    let output = tabalign_cmd()
        .args([
            "--config",
            config.to_str().unwrap(),
            "compare",
            "--no-header",
            "--format",
            "csv",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
        ])
        .output()
        .unwrap();

    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(
        stdout(&output),
        "A_Col_1,A_Col_2,B_Col_1,B_Col_2,Diff_Type\n\
         sku,qty,sku,qty,Match\n\
         a,1,a,1,Match\n"
    );
}
