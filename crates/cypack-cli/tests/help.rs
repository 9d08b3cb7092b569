use assert_cmd::cargo::cargo_bin_cmd;

fn help_output(args: &[&str]) -> String {
    let assert = cargo_bin_cmd!("cypack").args(args).assert().success();
    String::from_utf8(assert.get_output().stdout.clone()).expect("utf8 help")
}

#[test]
fn top_level_help_lists_commands() {
    let output = help_output(&["--help"]);
    for command in ["init", "build", "probe"] {
        assert!(output.contains(command), "{command} missing: {output}");
    }
}

#[test]
fn build_help_shows_suite_flag_example() {
    let output = help_output(&["build", "--help"]);
    assert!(
        output.contains("Reset the workspace and register configured suites in order."),
        "build about missing: {output}"
    );
    assert!(
        output.contains("cypack build --suite core=../core-tests"),
        "build example missing: {output}"
    );
}

#[test]
fn malformed_suite_flag_is_rejected_by_the_parser() {
    cargo_bin_cmd!("cypack")
        .args(["build", "--suite", "no-equals-sign"])
        .assert()
        .failure()
        .code(2);
}
