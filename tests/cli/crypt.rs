//! Tests for `variables encrypt` and `variables decrypt`.

use crate::support::*;
use variables::core::variable::{VariableType, Visibility};

#[test]
fn test_encrypt_with_dummy_backend() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    let output = t.encrypt();
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted 1 secret");

    let variables = t.load(VARIABLES_FILE);
    assert_eq!(variables.by_name("FOO").unwrap().value(), "foo");
    // "bar" in base64, the dummy backend leaves bytes alone
    assert_eq!(variables.by_name("BAR").unwrap().value(), "encrypted:YmFy");
}

#[test]
fn test_encrypt_twice_is_stable() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    assert_success(&t.encrypt());
    let once = t.read(VARIABLES_FILE);

    let output = t.encrypt();
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted 0 secrets");
    assert_eq!(t.read(VARIABLES_FILE), once);
}

#[test]
fn test_encrypt_then_decrypt_restores_file() {
    let t = Test::with_variables(SAMPLE_VARIABLES);
    let original = t.load(VARIABLES_FILE);

    assert_success(&t.encrypt());
    let output = t.decrypt();
    assert_success(&output);
    assert_stdout_contains(&output, "decrypted 1 secret");

    assert_eq!(t.load(VARIABLES_FILE), original);
}

#[test]
fn test_written_file_keeps_every_field() {
    let t = Test::with_variables("variables:\n  - name: FOO\n    value: foo\n");

    assert_success(&t.encrypt());

    let content = t.read(VARIABLES_FILE);
    assert!(content.starts_with("---\n"));
    assert!(content.contains("visibility: plain"));
    assert!(content.contains("type: text"));
}

#[test]
fn test_decrypt_strict_rejects_plaintext_secret() {
    let t = Test::with_variables(SAMPLE_VARIABLES);
    let before = t.read(VARIABLES_FILE);

    let output = t.run(&["decrypt", "--strict", VARIABLES_FILE]);
    assert_failure(&output);
    assert_stderr_contains(&output, "BAR");
    assert_eq!(t.read(VARIABLES_FILE), before);
}

#[test]
fn test_decrypt_lenient_passes_plaintext_secret() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    let output = t.decrypt();
    assert_success(&output);
    assert_stderr_contains(&output, "not encrypted");
    assert_eq!(t.load(VARIABLES_FILE).by_name("BAR").unwrap().value(), "bar");
}

#[test]
fn test_age_key_pair_roundtrip() {
    let t = Test::with_variables(MIXED_VARIABLES);
    let (key_file, _) = age_key_file();
    t.write("variables.key", &key_file);
    let original = t.load(VARIABLES_FILE);

    let output = t.run(&[
        "-b",
        "age",
        "-c",
        "key_pair=variables.key",
        "encrypt",
        VARIABLES_FILE,
    ]);
    assert_success(&output);

    let encrypted = t.load(VARIABLES_FILE);
    assert!(encrypted.by_name("API_KEY").unwrap().is_encrypted());
    assert!(encrypted.by_name("CONFIG").unwrap().is_encrypted());
    assert_eq!(
        encrypted.by_name("DATABASE_URL").unwrap().value(),
        "postgres://localhost/mydb"
    );
    let config = encrypted.by_name("CONFIG").unwrap();
    assert_eq!(config.visibility(), Visibility::Secret);
    assert_eq!(config.kind(), VariableType::File);

    // Discovered from the working directory this time
    let output = t.run(&["-b", "age", "decrypt", VARIABLES_FILE]);
    assert_success(&output);
    assert_eq!(t.load(VARIABLES_FILE), original);
}

#[test]
fn test_age_passphrase_roundtrip() {
    let t = Test::with_variables(SAMPLE_VARIABLES);

    assert_success(&t.age(&["encrypt", VARIABLES_FILE]));
    assert!(t.load(VARIABLES_FILE).by_name("BAR").unwrap().is_encrypted());

    let output = t
        .cmd()
        .env("VARIABLES_PASSPHRASE", PASSPHRASE)
        .args(["-b", "age", "decrypt", "--strict", VARIABLES_FILE])
        .output()
        .unwrap();
    assert_success(&output);
    assert_eq!(t.load(VARIABLES_FILE).by_name("BAR").unwrap().value(), "bar");
}

#[test]
fn test_age_wrong_key_fails_without_touching_file() {
    let t = Test::with_variables(SAMPLE_VARIABLES);
    let (first, _) = age_key_file();
    let (second, _) = age_key_file();
    t.write("first.key", &first);
    t.write("second.key", &second);

    assert_success(&t.run(&["-b", "age", "-c", "key_pair=first.key", "encrypt", VARIABLES_FILE]));
    let encrypted = t.read(VARIABLES_FILE);

    let output = t.run(&["-b", "age", "-c", "key_pair=second.key", "decrypt", VARIABLES_FILE]);
    assert_failure(&output);
    assert_stderr_contains(&output, "decryption failed");
    assert_eq!(t.read(VARIABLES_FILE), encrypted);
}
