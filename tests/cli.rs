//! Command line tests for the cfgparse binary

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

const OPTIONAL_TAIL: &str = "# optional trailing b\nS -> A B\nA -> a\nB -> b | epsilon\n";

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file
}

#[test]
fn valid_inputs_print_tree_and_exit_zero() {
    let grammar = write_temp(OPTIONAL_TAIL);
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path()).arg("a b");

    cmd.assert().success().stdout(
        "valid: a b\n◆ S\n├─ ◆ A\n│ └─ ◦ a\n└─ ◆ B\n  └─ ◦ b\n",
    );
}

#[test]
fn format_flag_selects_renderer() {
    let grammar = write_temp(OPTIONAL_TAIL);
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path())
        .arg("a")
        .arg("a b")
        .args(["--format", "bracket"]);

    cmd.assert()
        .success()
        .stdout("valid: a\nS(A(a), B(epsilon))\nvalid: a b\nS(A(a), B(b))\n");
}

#[test]
fn invalid_input_exits_one_and_reports_progress() {
    let grammar = write_temp(OPTIONAL_TAIL);
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path())
        .arg("a c")
        .arg("b")
        .args(["-f", "bracket"]);

    cmd.assert()
        .code(1)
        .stdout("invalid: a c (matched 1 of 2 tokens)\ninvalid: b\n");
}

#[test]
fn reads_inputs_from_stdin_when_none_given() {
    let grammar = write_temp(OPTIONAL_TAIL);
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path())
        .args(["-f", "bracket"])
        .write_stdin("a b\n\n   \na\n");

    cmd.assert()
        .success()
        .stdout("valid: a b\nS(A(a), B(b))\nvalid: a\nS(A(a), B(epsilon))\n");
}

#[test]
fn config_file_sets_default_format() {
    let grammar = write_temp("S -> a S | epsilon\n");
    let mut config = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("temp file");
    writeln!(config, "[output]\nformat = \"bracket\"").expect("write config");

    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path())
        .arg("a a")
        .arg("--config")
        .arg(config.path());

    cmd.assert()
        .success()
        .stdout("valid: a a\nS(a, S(a, S(epsilon)))\n");
}

#[test]
fn stats_go_to_stderr() {
    let grammar = write_temp(OPTIONAL_TAIL);
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path()).arg("a b").arg("--stats");

    cmd.assert()
        .success()
        .stdout(predicate::str::starts_with("valid: a b\n"))
        .stderr(predicate::str::contains("stats: calls="));
}

#[test]
fn depth_limit_turns_left_recursion_into_a_verdict() {
    let grammar = write_temp("S -> S a | a\n");
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path()).arg("a a").args(["--max-depth", "50"]);

    cmd.assert()
        .code(1)
        .stdout("invalid: a a (recursion depth limit 50 exceeded)\n")
        .stderr(predicate::str::contains(
            "warning: grammar is left-recursive (S -> S); parsing may not terminate",
        ));
}

#[test]
fn unreachable_rules_are_warned_about() {
    let grammar = write_temp("S -> a\nT -> b\n");
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path()).arg("a");

    cmd.assert().success().stderr(predicate::str::contains(
        "warning: nonterminal 'T' is unreachable from the start symbol",
    ));
}

#[test]
fn malformed_rule_file_exits_two() {
    let grammar = write_temp("S -> a\nS a\n");
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path()).arg("a");

    cmd.assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains(
            "line 2: rule 'S a' is missing the '->' separator",
        ));
}

#[test]
fn oversized_depth_limit_is_a_configuration_error() {
    let grammar = write_temp(OPTIONAL_TAIL);
    let depth = usize::MAX.to_string();
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path()).arg("a").args(["--max-depth", depth.as_str()]);

    cmd.assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains(format!(
            "Error: invalid configuration: --max-depth {depth} is out of range"
        )));
}

#[test]
fn missing_grammar_file_exits_two() {
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg("/nonexistent/grammar.cfg").arg("a");

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Error reading grammar file"));
}

#[test]
fn unknown_format_is_rejected_before_parsing() {
    let grammar = write_temp(OPTIONAL_TAIL);
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg(grammar.path()).arg("a").args(["--format", "svg"]);

    cmd.assert()
        .code(2)
        .stdout("")
        .stderr(predicate::str::contains("Error: unknown format 'svg'"));
}

#[test]
fn list_formats_needs_no_grammar() {
    let mut cmd = cargo_bin_cmd!("cfgparse");
    cmd.arg("--list-formats");

    let listed = ["bracket", "dot", "json", "tag", "treeviz", "yaml"]
        .into_iter()
        .fold(predicate::str::contains("Available formats:").boxed(), |acc, name| {
            acc.and(predicate::str::contains(name)).boxed()
        });
    cmd.assert().success().stdout(listed);
}
