//! Test fixtures and constants.

/// Default variables file name inside a test directory.
pub const VARIABLES_FILE: &str = "variables.yaml";

/// Passphrase used with the age backend.
pub const PASSPHRASE: &str = "correct horse battery staple";

/// One plain and one secret text variable.
pub const SAMPLE_VARIABLES: &str = r#"---
variables:
- name: FOO
  value: foo
  visibility: plain
  type: text
- name: BAR
  value: bar
  visibility: secret
  type: text
"#;

/// Plain, secret and file variables together.
pub const MIXED_VARIABLES: &str = r#"---
variables:
- name: DATABASE_URL
  value: postgres://localhost/mydb
- name: API_KEY
  value: sk-test-12345
  visibility: secret
- name: CONFIG
  value: "listen: 8080\n"
  visibility: secret
  type: file
"#;

/// Contents of an age key pair file for a fresh identity.
pub fn age_key_file() -> (String, String) {
    use age::secrecy::ExposeSecret;

    let identity = age::x25519::Identity::generate();
    let recipient = identity.to_public().to_string();
    let contents = format!(
        "# created: 2024-01-01T00:00:00Z\n# public key: {}\n{}\n",
        recipient,
        identity.to_string().expose_secret()
    );
    (contents, recipient)
}
