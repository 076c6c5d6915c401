//! Tests for `variables exec`.

use crate::support::*;

#[cfg(unix)]
#[test]
fn test_exec_injects_variables() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    let output = t.exec(&["sh", "-c", "echo $FOO $BAR"]);
    assert_success(&output);
    assert_stdout_contains(&output, "foo bar");
}

#[cfg(unix)]
#[test]
fn test_exec_decrypts_before_running() {
    let t = Test::with_variables(SAMPLE_VARIABLES);
    assert_success(&t.encrypt());

    let output = t.exec(&["sh", "-c", "echo $BAR"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "bar\n");
}

#[cfg(unix)]
#[test]
fn test_exec_interpolates_arguments() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    let output = t.exec(&["sh", "-c", "echo {{ FOO }} [$FOO] $BAR"]);
    assert_success(&output);
    // FOO is consumed by the command line and not exported
    assert_eq!(stdout(&output), "foo [] bar\n");
}

#[cfg(unix)]
#[test]
fn test_exec_file_variable_is_temporary() {
    let t = Test::with_variables(MIXED_VARIABLES);

    let output = t.exec(&["sh", "-c", "echo $CONFIG; cat $CONFIG"]);
    assert_success(&output);

    let out = stdout(&output);
    let mut lines = out.lines();
    let path = lines.next().unwrap().to_string();
    assert_eq!(lines.next(), Some("listen: 8080"));
    assert!(!std::path::Path::new(&path).exists());
}

#[cfg(unix)]
#[test]
fn test_exec_prefixes() {
    let t = Test::new();
    t.write("database.yaml", "variables:\n  - name: HOST\n    value: db.local\n");
    t.write("cache.yaml", "variables:\n  - name: HOST\n    value: cache.local\n");

    let output = t.run(&[
        "exec",
        "-V",
        "database.yaml",
        "-V",
        "REDIS=cache.yaml",
        "--auto-prefixes",
        "--",
        "sh",
        "-c",
        "echo $DATABASE_HOST $REDIS_HOST",
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output), "db.local cache.local\n");
}

#[cfg(unix)]
#[test]
fn test_exec_without_auto_prefixes_keeps_names() {
    let t = Test::new();
    t.write("database.yaml", "variables:\n  - name: HOST\n    value: db.local\n");

    let output = t.run(&[
        "exec",
        "-V",
        "database.yaml",
        "--",
        "sh",
        "-c",
        "echo $HOST",
    ]);
    assert_success(&output);
    assert_eq!(stdout(&output), "db.local\n");
}

#[cfg(unix)]
#[test]
fn test_exec_exit_code_passthrough() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    let output = t.exec(&["sh", "-c", "exit 42"]);
    assert_eq!(output.status.code(), Some(42));
}

#[test]
fn test_exec_missing_variables_file() {
    let t = Test::new();

    let output = t.run(&["exec", "-V", "missing.yaml", "--", "true"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "missing.yaml");
}

#[test]
fn test_exec_without_command_fails() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    let output = t.run(&["exec", "-V", VARIABLES_FILE]);
    assert_failure(&output);
    assert_stderr_contains(&output, "no command specified");
}

#[test]
fn test_exec_unknown_program_fails() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    let output = t.exec(&["definitely-not-a-real-program-4f2a"]);
    assert_failure(&output);
    assert_stderr_contains(&output, "failed to launch");
}
