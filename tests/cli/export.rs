//! Tests for `variables export`.

use crate::support::*;

#[test]
fn test_export_bash() {
    let t = Test::with_variables(SAMPLE_VARIABLES);
    assert_success(&t.encrypt());

    let output = t.export("bash");
    assert_success(&output);
    assert_eq!(stdout(&output), "export FOO=\"foo\"\nexport BAR=\"bar\"\n");
}

#[test]
fn test_export_env_file() {
    let t = Test::with_variables(MIXED_VARIABLES);

    let output = t.export("env_file");
    assert_success(&output);
    assert_stdout_contains(&output, "DATABASE_URL=postgres://localhost/mydb\n");
    assert_stdout_contains(&output, "API_KEY=sk-test-12345\n");
    assert_stdout_excludes(&output, "CONFIG");
    assert_stderr_contains(&output, "CONFIG");
}

#[test]
fn test_export_kubectl() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    let output = t.run(&["export", "-t", "kubectl", "-c", "name=app", VARIABLES_FILE]);
    assert_success(&output);

    let out = stdout(&output);
    assert!(out.starts_with("---\n"));
    assert!(out.contains("kind: ConfigMap"));
    assert!(out.contains("kind: Secret"));
    assert!(out.contains("name: app"));
    assert!(out.contains("FOO: foo"));
    assert!(out.contains("BAR: YmFy"));
}

#[test]
fn test_export_unsupported_target() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    let output = t.export("terraform");
    assert_failure(&output);
    assert_stderr_contains(&output, "unsupported export target: terraform");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_export_stdout_has_no_logs() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    // BAR is a plaintext secret, so a warning is logged
    let output = t.export("bash");
    assert_success(&output);
    assert_stdout_excludes(&output, "WARN");
    assert_stderr_contains(&output, "WARN");
}
