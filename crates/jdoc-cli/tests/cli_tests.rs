//! Integration tests for the `jdoc` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the validate, fmt,
//! get, set, and stats subcommands through the actual binary, including
//! stdin/stdout piping, file I/O, error reporting, and logging.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper: path to the movie.json fixture.
fn movie_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/movie.json")
}

/// Helper: path to the person.json fixture.
fn person_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/person.json")
}

/// Helper: path to the invalid.json fixture (trailing comma).
fn invalid_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/invalid.json")
}

/// Helper: a fresh `jdoc` command with logging left at its default.
fn jdoc() -> Command {
    let mut cmd = Command::cargo_bin("jdoc").unwrap();
    cmd.env_remove("JDOC_LOG");
    cmd
}

/// Helper: a scratch file path unique to one test.
fn temp_path(name: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("jdoc-test-{}-{name}", std::process::id()));
    let _ = std::fs::remove_file(&path);
    path
}

// ─────────────────────────────────────────────────────────────────────────────
// Validate subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn validate_accepts_well_formed_stdin() {
    jdoc()
        .arg("validate")
        .write_stdin(r#"{"a":1,"b":[1,2]}"#)
        .assert()
        .success()
        .stdout("valid\n");
}

#[test]
fn validate_accepts_fixture_file() {
    jdoc()
        .args(["validate", "-i", movie_json_path()])
        .assert()
        .success()
        .stdout("valid\n");
}

#[test]
fn validate_rejects_trailing_comma_with_location() {
    jdoc()
        .args(["validate", "-i", invalid_json_path()])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicate::str::starts_with("invalid: parse error at line 1, column"))
        .stderr(predicate::str::contains("trailing comma"));
}

#[test]
fn validate_rejects_empty_input() {
    jdoc()
        .arg("validate")
        .write_stdin("   \n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("EOF while parsing a value"));
}

#[test]
fn validate_honors_max_depth() {
    jdoc()
        .args(["validate", "--max-depth", "2"])
        .write_stdin("[[[1]]]")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("nesting depth exceeds the limit of 2"));

    jdoc()
        .args(["validate", "--max-depth", "3"])
        .write_stdin("[[[1]]]")
        .assert()
        .success();
}

#[test]
fn zero_max_depth_is_rejected() {
    jdoc()
        .args(["validate", "--max-depth", "0"])
        .write_stdin("1")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--max-depth must be at least 1"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Fmt subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn fmt_defaults_to_two_space_indent() {
    jdoc()
        .arg("fmt")
        .write_stdin(r#"{"a":1,"b":[1,2],"c":{}}"#)
        .assert()
        .success()
        .stdout("{\n  \"a\": 1,\n  \"b\": [\n    1,\n    2\n  ],\n  \"c\": {}\n}\n");
}

#[test]
fn fmt_compact_strips_whitespace() {
    jdoc()
        .args(["fmt", "--indent", "0"])
        .write_stdin("{ \"a\" : [ 1 , 2.0 ] ,\n \"b\" : null }")
        .assert()
        .success()
        .stdout("{\"a\":[1,2.0],\"b\":null}\n");
}

#[test]
fn fmt_keeps_key_order_of_fixture() {
    let output = jdoc()
        .args(["fmt", "--indent", "0", "-i", movie_json_path()])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with(r#"{"movie":"Star wars","released":true,"year":1977,"rating":8.6,"cast":"#));
    assert!(stdout.trim_end().ends_with(r#""other":["Lucie","Mike","John"]}"#));
}

#[test]
fn fmt_file_to_file_roundtrips() {
    let output_path = temp_path("fmt.json");
    let output_str = output_path.to_str().unwrap();

    jdoc()
        .args(["fmt", "--indent", "4", "-i", movie_json_path(), "-o", output_str])
        .assert()
        .success()
        .stdout("");

    let written = std::fs::read_to_string(&output_path).expect("output file must exist");
    assert!(written.contains("\n    \"cast\": [\n        \"Mark Hamill\","));

    let original = jdoc_core::parse(&std::fs::read_to_string(movie_json_path()).unwrap()).unwrap();
    assert_eq!(jdoc_core::parse(&written).unwrap(), original);

    let _ = std::fs::remove_file(&output_path);
}

#[test]
fn fmt_reports_parse_errors() {
    jdoc()
        .args(["fmt", "-i", invalid_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse"))
        .stderr(predicate::str::contains("trailing comma"));
}

#[test]
fn fmt_missing_file_fails() {
    jdoc()
        .args(["fmt", "-i", "/nonexistent/path/movie.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Get subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn get_nested_string() {
    jdoc()
        .args(["get", "director.name", "-i", movie_json_path()])
        .assert()
        .success()
        .stdout("\"George Lucas\"\n");
}

#[test]
fn get_raw_string_drops_quotes() {
    jdoc()
        .args(["get", "similar_movies[1].name", "--raw", "-i", movie_json_path()])
        .assert()
        .success()
        .stdout("Rogue\n");
}

#[test]
fn get_numbers_keep_their_kind() {
    jdoc()
        .args(["get", "year", "-i", movie_json_path()])
        .assert()
        .success()
        .stdout("1977\n");
    jdoc()
        .args(["get", "rating", "-i", movie_json_path()])
        .assert()
        .success()
        .stdout("8.6\n");
}

#[test]
fn get_container_with_indent() {
    jdoc()
        .args(["get", "director", "--indent", "2", "-i", movie_json_path()])
        .assert()
        .success()
        .stdout("{\n  \"name\": \"George Lucas\",\n  \"born\": 1944\n}\n");
}

#[test]
fn get_index_out_of_range_fails() {
    jdoc()
        .args(["get", "cast[5]", "-i", movie_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to resolve path 'cast[5]'"))
        .stderr(predicate::str::contains(
            "index 5 is out of range for array of length 3",
        ));
}

#[test]
fn get_missing_key_fails() {
    jdoc()
        .args(["get", "guild.role", "-i", person_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("key 'role' not found"));
}

#[test]
fn get_missing_key_uses_default() {
    jdoc()
        .args(["get", "guild.role", "--default", r#""Driver""#, "-i", person_json_path()])
        .assert()
        .success()
        .stdout("\"Driver\"\n");
}

#[test]
fn get_default_is_ignored_when_present() {
    jdoc()
        .args(["get", "age", "--default", "0", "-i", person_json_path()])
        .assert()
        .success()
        .stdout("36\n");
}

#[test]
fn get_invalid_default_fails() {
    jdoc()
        .args(["get", "missing", "--default", "{oops", "-i", person_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--default is not valid JSON"));
}

#[test]
fn get_bad_path_syntax_fails_even_with_default() {
    jdoc()
        .args(["get", "a..b", "--default", "1", "-i", person_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("parse error at line 1, column 3"));
}

#[test]
fn get_type_mismatch_fails() {
    jdoc()
        .args(["get", "name.first", "-i", person_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "type mismatch: expected object, found string",
        ));
}

// ─────────────────────────────────────────────────────────────────────────────
// Set subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn set_replaces_value_in_place() {
    jdoc()
        .args(["set", "x", "2", "--indent", "0"])
        .write_stdin(r#"{"x":1}"#)
        .assert()
        .success()
        .stdout("{\"x\":2}\n");
}

#[test]
fn set_appends_new_key() {
    jdoc()
        .args(["set", "y", "3", "--indent", "0"])
        .write_stdin(r#"{"x":1}"#)
        .assert()
        .success()
        .stdout("{\"x\":1,\"y\":3}\n");
}

#[test]
fn set_non_json_value_is_stored_as_string() {
    jdoc()
        .args(["set", "guild.role", "Driver", "--indent", "0", "-i", person_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""guild":{"name":"Reds","role":"Driver"}"#));
}

#[test]
fn set_json_value_keeps_structure() {
    jdoc()
        .args(["set", "similar_movies[0]", r#"{"name":"Alien","year":1979}"#, "--indent", "0", "-i", movie_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""similar_movies":[{"name":"Alien","year":1979},{"name":"Rogue","year":2016}]"#,
        ));
}

#[test]
fn set_builds_document_from_null() {
    jdoc()
        .args(["set", "director.name", "George Lucas", "--indent", "0"])
        .write_stdin("null")
        .assert()
        .success()
        .stdout("{\"director\":{\"name\":\"George Lucas\"}}\n");
}

#[test]
fn set_out_of_range_index_fails() {
    jdoc()
        .args(["set", "cast[3]", r#""Peter Cushing""#, "-i", movie_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to set path 'cast[3]'"))
        .stderr(predicate::str::contains("index 3 is out of range"));
}

#[test]
fn set_into_scalar_fails() {
    jdoc()
        .args(["set", "movie.title", "x", "-i", movie_json_path()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("type mismatch: expected object, found string"));
}

#[test]
fn set_writes_output_file() {
    let output_path = temp_path("set.json");
    let output_str = output_path.to_str().unwrap();

    jdoc()
        .args(["set", "year", "1978", "-i", movie_json_path(), "-o", output_str])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output_path).expect("output file must exist");
    let doc = jdoc_core::parse(&written).unwrap();
    assert_eq!(doc.get_key("year").unwrap().get_typed::<i64>().unwrap(), 1978);
    assert_eq!(doc.get_key("movie").unwrap().as_str(), Some("Star wars"));

    let _ = std::fs::remove_file(&output_path);
}

// ─────────────────────────────────────────────────────────────────────────────
// Stats subcommand
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn stats_counts_nodes_by_kind() {
    jdoc()
        .args(["stats", "-i", movie_json_path()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes:        23"))
        .stdout(predicate::str::contains("  string      10"))
        .stdout(predicate::str::contains("  integer     4"))
        .stdout(predicate::str::contains("  float       1"))
        .stdout(predicate::str::contains("  object      4"))
        .stdout(predicate::str::contains("  array       3"))
        .stdout(predicate::str::contains("null").not())
        .stdout(predicate::str::contains("Max depth:    3"));
}

#[test]
fn stats_reports_sizes() {
    let output = jdoc().arg("stats").write_stdin("[1,2]").output().unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    // "[1,2]" is 5 bytes, "[\n  1,\n  2\n]" is 12.
    assert!(stdout.contains("Compact size: 5 bytes"), "{stdout}");
    assert!(stdout.contains("Pretty size:  12 bytes"), "{stdout}");
    assert!(stdout.contains("Max depth:    1"), "{stdout}");
}

#[test]
fn stats_scalar_document_has_zero_depth() {
    jdoc()
        .arg("stats")
        .write_stdin("\"hello\"")
        .assert()
        .success()
        .stdout(predicate::str::contains("Nodes:        1"))
        .stdout(predicate::str::contains("Max depth:    0"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn default_logging_is_quiet() {
    jdoc()
        .args(["set", "k", "not json", "--indent", "0"])
        .write_stdin("{}")
        .assert()
        .success()
        .stderr("");
}

#[test]
fn verbose_flag_logs_string_fallback() {
    jdoc()
        .args(["-v", "set", "k", "not json", "--indent", "0"])
        .write_stdin("{}")
        .assert()
        .success()
        .stdout("{\"k\":\"not json\"}\n")
        .stderr(predicate::str::contains("value is not JSON"));
}

#[test]
fn env_filter_enables_library_logging() {
    jdoc()
        .arg("validate")
        .env("JDOC_LOG", "jdoc_core=debug")
        .write_stdin("[1,]")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("document rejected"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Help / version
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn help_lists_subcommands() {
    jdoc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("fmt"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("stats"));
}

#[test]
fn version_flag() {
    jdoc()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("jdoc"));
}
