//! Integration tests for the chars command-line tool

use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn binary_fixture() -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"\x7fELF\x02\x01\x00\x00hello world\x00\x01\x02GLIBC_2.34\x00ab\x00")
        .unwrap();
    file.flush().unwrap();
    file
}

fn config_fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ============================================================================
// strings
// ============================================================================

#[test]
fn test_strings_from_file() {
    let file = binary_fixture();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("strings").arg(file.path());

    cmd.assert()
        .success()
        .stdout("hello world\nGLIBC_2.34\n");
}

#[test]
fn test_strings_from_stdin() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("strings")
        .arg("-")
        .write_stdin(&b"\x00\x00abcdef\x00xyz\x00"[..]);

    cmd.assert().success().stdout("abcdef\n");
}

#[test]
fn test_strings_offsets_and_min_length() {
    let file = binary_fixture();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("strings")
        .arg("--offsets")
        .arg("-n")
        .arg("2")
        .arg("--set")
        .arg("alpha")
        .arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("       1 ELF"))
        .stdout(predicate::str::contains("       8 hello"))
        .stdout(predicate::str::contains("      14 world"))
        .stdout(predicate::str::contains("ab"));
}

#[test]
fn test_strings_json_output() {
    let file = binary_fixture();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("strings").arg("--format").arg("json").arg(file.path());

    let output = cmd.output().unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = parsed.as_array().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["offset"], 8);
    assert_eq!(records[0]["length"], 11);
    assert_eq!(records[0]["text"], "hello world");
    assert_eq!(records[1]["text"], "GLIBC_2.34");
}

#[test]
fn test_strings_uses_config_defaults() {
    let file = binary_fixture();
    let config = config_fixture(
        r#"
[scan]
min_length = 2
char_set = "lower"

[sets.lower]
seeds = [{ from = "a", to = "z" }]
"#,
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("--config")
        .arg(config.path())
        .arg("strings")
        .arg(file.path());

    cmd.assert()
        .success()
        .stdout("hello\nworld\nab\n");
}

#[test]
fn test_strings_missing_file() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("strings").arg("/nonexistent/binary");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open file"));
}

#[test]
fn test_strings_unknown_set() {
    let file = binary_fixture();
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("strings").arg("--set").arg("klingon").arg(file.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Unknown character set: klingon"));
}

// ============================================================================
// random
// ============================================================================

#[test]
fn test_random_seeded_is_reproducible() {
    let run = || {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
        cmd.args(["random", "--set", "hex", "--length", "16", "--seed", "42", "--count", "3"]);
        cmd.output().unwrap()
    };

    let first = run();
    let second = run();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let stdout = String::from_utf8(first.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 3);
    for line in lines {
        assert_eq!(line.len(), 16);
        assert!(line.chars().all(|c| c.is_ascii_hexdigit()));
    }
}

#[test]
fn test_random_distinct() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.args(["random", "--set", "octal", "--length", "20", "--distinct"]);

    let output = cmd.output().unwrap();
    assert!(output.status.success());
    let line = String::from_utf8(output.stdout).unwrap();
    let mut chars: Vec<char> = line.trim_end().chars().collect();
    chars.sort_unstable();
    assert_eq!(chars, vec!['0', '1', '2', '3', '4', '5', '6', '7']);
}

#[test]
fn test_random_bad_length() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.args(["random", "--length", "ten"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid length specification"));
}

// ============================================================================
// enumerate
// ============================================================================

#[test]
fn test_enumerate_all() {
    let config = config_fixture(
        r#"
[sets.ab]
seeds = ["ab"]
"#,
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("--config")
        .arg(config.path())
        .args(["enumerate", "--set", "ab", "--length", "1..=2"]);

    cmd.assert()
        .success()
        .stdout("a\nb\naa\nab\nba\nbb\n");
}

#[test]
fn test_enumerate_limit() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.args(["enumerate", "--set", "numeric", "--length", "3", "--limit", "3"]);

    cmd.assert().success().stdout("000\n001\n002\n");
}

// ============================================================================
// sets
// ============================================================================

#[test]
fn test_sets_lists_predefined_and_custom() {
    let config = config_fixture(
        r#"
[sets.vowels]
seeds = ["aeiou"]
"#,
    );

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("sets").arg("--config").arg(config.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("numeric"))
        .stdout(predicate::str::contains("ascii"))
        .stdout(predicate::str::contains(
            r#"vowels                   5  CharSet {"a", "e", "i", "o", "u"}"#,
        ));
}

#[test]
fn test_invalid_config_reports_path() {
    let config = config_fixture("[sets.bad]\nseeds = [true]\n");

    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.arg("--config").arg(config.path()).arg("sets");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("boolean"));
}

#[test]
fn test_debug_flag_writes_to_stderr() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.args(["--debug", "enumerate", "--set", "octal", "--length", "1"]);

    cmd.assert()
        .success()
        .stdout("0\n1\n2\n3\n4\n5\n6\n7\n")
        .stderr(predicate::str::contains("enumerating strings"));
}

#[test]
fn test_enumerate_huge_length_range_with_limit() {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("chars");
    cmd.args(["enumerate", "--set", "octal", "--length", "1..=4000000000", "--limit", "2"]);

    cmd.assert().success().stdout("0\n1\n");
}
