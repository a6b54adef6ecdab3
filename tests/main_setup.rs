use ecowaste_portal::{
    AppConfig,
    config::{Env, UnmatchedRoute},
    error::ConfigError,
};
use serial_test::serial;
use std::{env, panic, path::PathBuf, time::Duration};

const CONFIG_VARS: &[&str] = &[
    "APP_ENV",
    "APP_BIND_ADDR",
    "APP_STORAGE_PATH",
    "APP_SIMULATED_DELAY_MS",
    "APP_UNMATCHED_ROUTE",
];

// --- Setup/Teardown Utilities ---

/// Runs `test` with the given variables set (and every other config variable unset),
/// then restores the original environment.
fn run_with_env<T, R>(vars: &[(&str, &str)], test: T) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(String, Option<String>)> = CONFIG_VARS
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    unsafe {
        for var in CONFIG_VARS {
            env::remove_var(var);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }
    }

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_defaults() {
    let config = run_with_env(&[], AppConfig::load).expect("defaults load");

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
    assert_eq!(
        config.storage_path,
        PathBuf::from(".ecowaste/local_storage.json")
    );
    assert_eq!(config.simulated_delay, Duration::from_millis(600));
    assert_eq!(config.unmatched_route, UnmatchedRoute::RedirectToAnalytics);
}

#[test]
#[serial]
fn test_app_config_overrides() {
    let config = run_with_env(
        &[
            ("APP_ENV", "production"),
            ("APP_BIND_ADDR", "0.0.0.0:8080"),
            ("APP_STORAGE_PATH", "/tmp/eco/store.json"),
            ("APP_SIMULATED_DELAY_MS", "0"),
            ("APP_UNMATCHED_ROUTE", "not-found"),
        ],
        AppConfig::load,
    )
    .expect("overrides load");

    assert_eq!(config.env, Env::Production);
    assert_eq!(config.bind_addr.port(), 8080);
    assert_eq!(config.storage_path, PathBuf::from("/tmp/eco/store.json"));
    assert_eq!(config.simulated_delay, Duration::ZERO);
    assert_eq!(config.unmatched_route, UnmatchedRoute::NotFoundPage);
}

#[test]
#[serial]
fn test_app_config_rejects_bad_delay() {
    let result = run_with_env(&[("APP_SIMULATED_DELAY_MS", "soon")], AppConfig::load);
    match result {
        Err(ConfigError::Invalid { var, value }) => {
            assert_eq!(var, "APP_SIMULATED_DELAY_MS");
            assert_eq!(value, "soon");
        }
        other => panic!("expected invalid delay, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_app_config_rejects_bad_bind_addr() {
    let result = run_with_env(&[("APP_BIND_ADDR", "localhost")], AppConfig::load);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            var: "APP_BIND_ADDR",
            ..
        })
    ));
}

#[test]
#[serial]
fn test_app_config_rejects_unknown_unmatched_policy() {
    let result = run_with_env(&[("APP_UNMATCHED_ROUTE", "home")], AppConfig::load);
    assert!(matches!(
        result,
        Err(ConfigError::Invalid {
            var: "APP_UNMATCHED_ROUTE",
            ..
        })
    ));
}

#[test]
fn test_default_config_is_test_friendly() {
    let config = AppConfig::default();
    assert_eq!(config.simulated_delay, Duration::ZERO);
    assert_eq!(config.bind_addr.port(), 0);
}
