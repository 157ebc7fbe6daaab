//! Behaviour tests for the JWT signing secret policy.
//!
//! Release builds must be configured explicitly; debug builds may run with
//! a per-process secret.

#![expect(
    clippy::expect_used,
    reason = "test code uses expect for clear failure messages"
)]

use authgate::outbound::tokens::{JwtSecret, JwtSecretError, jwt_secret_from_env};
use authgate::settings::BuildMode;
use mockable::MockEnv;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

struct SecretWorld {
    vars: RefCell<HashMap<String, String>>,
    mode: RefCell<BuildMode>,
    outcome: RefCell<Option<Result<JwtSecret, JwtSecretError>>>,
    secret_files: RefCell<Vec<NamedTempFile>>,
    scratch: RefCell<Option<TempDir>>,
}

impl SecretWorld {
    fn new() -> Self {
        Self {
            vars: RefCell::new(HashMap::new()),
            mode: RefCell::new(BuildMode::Release),
            outcome: RefCell::new(None),
            secret_files: RefCell::new(Vec::new()),
            scratch: RefCell::new(None),
        }
    }

    fn set_mode(&self, mode: BuildMode) {
        *self.mode.borrow_mut() = mode;
    }

    fn set_env_var(&self, name: &str, value: &str) {
        self.vars
            .borrow_mut()
            .insert(name.to_owned(), value.to_owned());
    }

    fn add_secret_file(&self, len: usize) {
        let mut file = NamedTempFile::new().expect("secret file creation should succeed");
        file.write_all(&vec![b's'; len])
            .expect("secret file write should succeed");
        // Trailing newlines are ignored by the loader.
        file.write_all(b"\n").expect("newline write should succeed");
        let path = file
            .path()
            .to_str()
            .expect("temporary path should be valid UTF-8")
            .to_owned();
        self.set_env_var("JWT_SECRET_FILE", &path);
        self.secret_files.borrow_mut().push(file);
    }

    fn point_at_missing_file(&self) {
        let dir = TempDir::new().expect("temporary directory");
        let path = dir.path().join("absent-secret");
        let path = path
            .to_str()
            .expect("temporary path should be valid UTF-8")
            .to_owned();
        self.set_env_var("JWT_SECRET_FILE", &path);
        *self.scratch.borrow_mut() = Some(dir);
    }

    fn evaluate(&self) {
        let env = mock_env(self.vars.borrow().clone());
        let mode = *self.mode.borrow();
        *self.outcome.borrow_mut() = Some(jwt_secret_from_env(&env, mode));
    }

    fn with_secret<F>(&self, f: F)
    where
        F: FnOnce(&JwtSecret),
    {
        let outcome = self.outcome.borrow();
        let secret = outcome
            .as_ref()
            .expect("evaluation result")
            .as_ref()
            .expect("expected secret load to succeed");
        f(secret);
    }

    fn with_error<F>(&self, f: F)
    where
        F: FnOnce(&JwtSecretError),
    {
        let outcome = self.outcome.borrow();
        let error = match outcome.as_ref().expect("evaluation result") {
            Ok(_) => panic!("expected secret load to fail"),
            Err(error) => error,
        };
        f(error);
    }
}

fn mock_env(vars: HashMap<String, String>) -> MockEnv {
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

#[fixture]
fn world() -> SecretWorld {
    SecretWorld::new()
}

#[given("a release build configuration")]
fn a_release_build_configuration(world: &SecretWorld) {
    world.set_mode(BuildMode::Release);
}

#[given("a debug build configuration")]
fn a_debug_build_configuration(world: &SecretWorld) {
    world.set_mode(BuildMode::Debug);
}

#[given("JWT_SECRET is set to {value}")]
fn jwt_secret_is_set(world: &SecretWorld, value: String) {
    world.set_env_var("JWT_SECRET", &value);
}

#[given("JWT_ALLOW_EPHEMERAL is set to {value}")]
fn jwt_allow_ephemeral_is_set(world: &SecretWorld, value: String) {
    world.set_env_var("JWT_ALLOW_EPHEMERAL", &value);
}

#[given("a JWT secret file with {len} bytes")]
fn a_jwt_secret_file_with_bytes(world: &SecretWorld, len: usize) {
    world.add_secret_file(len);
}

#[given("JWT_SECRET_FILE points at a missing file")]
fn jwt_secret_file_is_missing(world: &SecretWorld) {
    world.point_at_missing_file();
}

#[when("the signing secret is loaded")]
fn the_signing_secret_is_loaded(world: &SecretWorld) {
    world.evaluate();
}

#[then("the secret load succeeds with {len} bytes")]
fn the_secret_load_succeeds(world: &SecretWorld, len: usize) {
    world.with_secret(|secret| assert_eq!(secret.len(), len));
}

#[then("the secret load fails because no secret is configured")]
fn secret_fails_missing(world: &SecretWorld) {
    world.with_error(|error| assert!(matches!(error, JwtSecretError::Missing)));
}

#[then("the secret load fails because the secret is too short")]
fn secret_fails_too_short(world: &SecretWorld) {
    world.with_error(|error| {
        assert!(matches!(
            error,
            JwtSecretError::SecretTooShort {
                length: 12,
                min_len: 32
            }
        ));
    });
}

#[then("the secret load fails because ephemeral secrets are not allowed")]
fn secret_fails_ephemeral(world: &SecretWorld) {
    world.with_error(|error| assert!(matches!(error, JwtSecretError::EphemeralNotAllowed)));
}

#[then("the secret load fails because the secret file is unreadable")]
fn secret_fails_unreadable(world: &SecretWorld) {
    world.with_error(|error| {
        assert!(matches!(error, JwtSecretError::SecretRead { .. }));
        assert!(error.to_string().contains("absent-secret"));
    });
}

#[scenario(
    path = "tests/features/jwt_secret.feature",
    name = "Release builds require a configured secret"
)]
fn release_requires_secret(world: SecretWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/jwt_secret.feature",
    name = "Release builds reject short secrets"
)]
fn release_rejects_short_secret(world: SecretWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/jwt_secret.feature",
    name = "Release builds refuse ephemeral secrets"
)]
fn release_refuses_ephemeral(world: SecretWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/jwt_secret.feature",
    name = "Debug builds fall back to a temporary secret"
)]
fn debug_falls_back(world: SecretWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/jwt_secret.feature",
    name = "A secret file takes precedence over JWT_SECRET"
)]
fn secret_file_takes_precedence(world: SecretWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/jwt_secret.feature",
    name = "A missing secret file fails release startup"
)]
fn missing_secret_file_fails(world: SecretWorld) {
    drop(world);
}
