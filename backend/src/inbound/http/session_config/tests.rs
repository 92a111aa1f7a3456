//! Unit tests for session settings validation.

use std::collections::HashMap;
use std::io::Write;

use mockable::MockEnv;
use rstest::{fixture, rstest};
use tempfile::NamedTempFile;

use super::*;

fn key_file(len: usize) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp key file");
    file.write_all(&vec![b'k'; len]).expect("write key");
    file
}

#[fixture]
fn release_key() -> NamedTempFile {
    key_file(SESSION_KEY_MIN_LEN)
}

fn env_with(vars: &[(&str, &str)]) -> MockEnv {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
        .collect();
    let mut env = MockEnv::new();
    env.expect_string()
        .times(0..)
        .returning(move |key| vars.get(key).cloned());
    env
}

fn release_env(key: &NamedTempFile, overrides: &[(&'static str, &'static str)]) -> MockEnv {
    let path = key.path().to_string_lossy().into_owned();
    let mut vars: Vec<(&str, &str)> = vec![
        (KEY_FILE_ENV, path.as_str()),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ];
    for &(name, value) in overrides {
        vars.retain(|&(existing, _)| existing != name);
        if !value.is_empty() {
            vars.push((name, value));
        }
    }
    env_with(&vars)
}

fn release_error(env: &MockEnv) -> SessionConfigError {
    match session_settings_from_env(env, BuildMode::Release) {
        Ok(_) => panic!("release settings should be rejected"),
        Err(error) => error,
    }
}

#[rstest]
fn release_accepts_complete_settings(release_key: NamedTempFile) {
    let settings = session_settings_from_env(&release_env(&release_key, &[]), BuildMode::Release)
        .expect("valid release settings");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Strict);
    assert_eq!(settings.fingerprint().len(), 16);
}

#[rstest]
#[case(COOKIE_SECURE_ENV)]
#[case(SAMESITE_ENV)]
#[case(ALLOW_EPHEMERAL_ENV)]
fn release_requires_every_toggle(release_key: NamedTempFile, #[case] missing: &'static str) {
    let error = release_error(&release_env(&release_key, &[(missing, "")]));
    assert!(matches!(error, SessionConfigError::MissingEnv { name } if name == missing));
}

#[rstest]
#[case(COOKIE_SECURE_ENV, "maybe")]
#[case(SAMESITE_ENV, "sideways")]
fn release_rejects_invalid_values(
    release_key: NamedTempFile,
    #[case] name: &'static str,
    #[case] value: &'static str,
) {
    let error = release_error(&release_env(&release_key, &[(name, value)]));
    assert!(matches!(error, SessionConfigError::InvalidEnv { name: found, .. } if found == name));
}

#[rstest]
fn release_rejects_ephemeral_keys(release_key: NamedTempFile) {
    let error = release_error(&release_env(&release_key, &[(ALLOW_EPHEMERAL_ENV, "yes")]));
    assert!(matches!(error, SessionConfigError::EphemeralNotAllowed));
}

#[rstest]
fn release_rejects_insecure_same_site_none(release_key: NamedTempFile) {
    let env = release_env(
        &release_key,
        &[(COOKIE_SECURE_ENV, "0"), (SAMESITE_ENV, "None")],
    );
    assert!(matches!(
        release_error(&env),
        SessionConfigError::InsecureSameSiteNone
    ));
}

#[rstest]
fn release_rejects_short_keys() {
    let short = key_file(32);
    assert!(matches!(
        release_error(&release_env(&short, &[])),
        SessionConfigError::KeyTooShort { length: 32, .. }
    ));
}

#[rstest]
fn release_rejects_unreadable_keys() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/standup/session_key"),
        (COOKIE_SECURE_ENV, "1"),
        (SAMESITE_ENV, "Strict"),
        (ALLOW_EPHEMERAL_ENV, "0"),
    ]);
    assert!(matches!(
        release_error(&env),
        SessionConfigError::KeyRead { .. }
    ));
}

#[rstest]
fn debug_falls_back_to_defaults() {
    let env = env_with(&[
        (KEY_FILE_ENV, "/nonexistent/standup/session_key"),
        (SAMESITE_ENV, "sideways"),
    ]);
    let settings =
        session_settings_from_env(&env, BuildMode::Debug).expect("debug defaults apply");
    assert!(settings.cookie_secure);
    assert_eq!(settings.same_site, SameSite::Lax);
}

#[rstest]
fn debug_reads_short_keys() {
    let short = key_file(40);
    let path = short.path().to_string_lossy().into_owned();
    let env = env_with(&[(KEY_FILE_ENV, path.as_str())]);
    let settings = session_settings_from_env(&env, BuildMode::Debug).expect("debug key");
    assert_eq!(
        settings.fingerprint(),
        key_fingerprint(&Key::derive_from(&[b'k'; 40]))
    );
}

#[rstest]
fn debug_replaces_keys_too_short_to_derive() {
    let tiny = key_file(8);
    let path = tiny.path().to_string_lossy().into_owned();
    let env = env_with(&[(KEY_FILE_ENV, path.as_str())]);
    let first = session_settings_from_env(&env, BuildMode::Debug).expect("debug key");
    let second = session_settings_from_env(&env, BuildMode::Debug).expect("debug key");
    assert_ne!(first.fingerprint(), second.fingerprint());
}
