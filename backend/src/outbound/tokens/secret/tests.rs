//! Unit tests for JWT secret loading.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use super::*;
use mockable::MockEnv;
use rstest::rstest;
use std::collections::HashMap;
use std::io::Write;
use tempfile::NamedTempFile;

const STRONG: &str = "0123456789abcdef0123456789abcdef";

fn mock_env(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(name, value)| ((*name).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn secret_file(contents: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(contents).expect("write secret");
    file
}

fn path_of(file: &NamedTempFile) -> String {
    file.path()
        .to_str()
        .expect("temporary path should be valid UTF-8")
        .to_owned()
}

#[rstest]
fn release_reads_secret_from_env() {
    let env = mock_env(&[(SECRET_ENV, STRONG)]);
    let secret = jwt_secret_from_env(&env, BuildMode::Release).expect("secret loads");
    assert_eq!(secret.as_bytes(), STRONG.as_bytes());
}

#[rstest]
fn file_takes_precedence_and_trailing_newline_is_ignored() {
    let file = secret_file(format!("{STRONG}\n").as_bytes());
    let path = path_of(&file);
    let env = mock_env(&[(SECRET_FILE_ENV, path.as_str()), (SECRET_ENV, "ignored")]);

    let secret = jwt_secret_from_env(&env, BuildMode::Release).expect("secret loads");
    assert_eq!(secret.as_bytes(), STRONG.as_bytes());
}

#[rstest]
fn release_rejects_short_secret() {
    let env = mock_env(&[(SECRET_ENV, "short")]);
    let err = jwt_secret_from_env(&env, BuildMode::Release).expect_err("short secret");
    assert!(matches!(
        err,
        JwtSecretError::SecretTooShort {
            length: 5,
            min_len: JWT_SECRET_MIN_LEN
        }
    ));
}

#[rstest]
fn debug_accepts_short_secret() {
    let env = mock_env(&[(SECRET_ENV, "short")]);
    let secret = jwt_secret_from_env(&env, BuildMode::Debug).expect("debug tolerates");
    assert_eq!(secret.as_bytes(), b"short");
}

#[rstest]
fn release_requires_a_secret() {
    let env = mock_env(&[]);
    let err = jwt_secret_from_env(&env, BuildMode::Release).expect_err("missing secret");
    assert!(matches!(err, JwtSecretError::Missing));
}

#[rstest]
fn debug_generates_ephemeral_secret() {
    let env = mock_env(&[]);
    let first = jwt_secret_from_env(&env, BuildMode::Debug).expect("ephemeral");
    let second = jwt_secret_from_env(&env, BuildMode::Debug).expect("ephemeral");
    assert_eq!(first.len(), EPHEMERAL_LEN);
    assert_ne!(first.as_bytes(), second.as_bytes());
}

#[rstest]
fn release_refuses_ephemeral_toggle() {
    let env = mock_env(&[(ALLOW_EPHEMERAL_ENV, "1"), (SECRET_ENV, STRONG)]);
    let err = jwt_secret_from_env(&env, BuildMode::Release).expect_err("toggle refused");
    assert!(matches!(err, JwtSecretError::EphemeralNotAllowed));
}

#[rstest]
#[case(BuildMode::Release, true)]
#[case(BuildMode::Debug, false)]
fn invalid_toggle_only_fails_release(#[case] mode: BuildMode, #[case] should_fail: bool) {
    let env = mock_env(&[(ALLOW_EPHEMERAL_ENV, "maybe"), (SECRET_ENV, STRONG)]);
    let result = jwt_secret_from_env(&env, mode);
    assert_eq!(result.is_err(), should_fail);
}

#[rstest]
fn unreadable_file_fails_in_release() {
    let env = mock_env(&[(SECRET_FILE_ENV, "/nonexistent/authgate/jwt_secret")]);
    let err = jwt_secret_from_env(&env, BuildMode::Release).expect_err("unreadable file");
    assert!(matches!(err, JwtSecretError::SecretRead { .. }));
}

#[rstest]
fn unreadable_file_falls_back_in_debug() {
    let env = mock_env(&[(SECRET_FILE_ENV, "/nonexistent/authgate/jwt_secret")]);
    let secret = jwt_secret_from_env(&env, BuildMode::Debug).expect("fallback");
    assert_eq!(secret.len(), EPHEMERAL_LEN);
}

#[rstest]
fn debug_output_is_redacted() {
    let secret = JwtSecret::from_bytes(STRONG.as_bytes().to_vec());
    assert!(!format!("{secret:?}").contains(STRONG));
}
