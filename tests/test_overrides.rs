//! Integration tests for the process-wide override registry.
//!
//! The free-function API mutates shared global state, so every test
//! takes the same lock and starts from a cleared registry.

#![cfg(feature = "overrides")]

use lazy_static::lazy_static;
use parking_lot::{Mutex, MutexGuard};
use pretty_assertions::assert_eq;

use devmock::override_path;

lazy_static! {
    static ref GLOBAL_LOCK: Mutex<()> = Mutex::new(());
}

fn exclusive() -> MutexGuard<'static, ()> {
    let guard = GLOBAL_LOCK.lock();
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    devmock::clear_all();
    guard
}

/// Mock environment standing in for a production network dependency.
#[derive(Clone, Debug, PartialEq)]
enum NetworkErrorEnvironment {
    ServerError,
    Timeout,
}

#[derive(Clone, Debug, PartialEq)]
struct FeatureFlags {
    new_checkout: bool,
}

override_path!(API_BASE_URL: String = "environment.api.base_url");
override_path!(RETRY_LIMIT: u32 = "environment.api.retry_limit");

#[test]
fn test_network_error_environment_scenario() {
    let _guard = exclusive();

    devmock::mock_by_type(NetworkErrorEnvironment::ServerError);
    assert_eq!(
        devmock::get::<NetworkErrorEnvironment>(),
        Some(NetworkErrorEnvironment::ServerError)
    );

    devmock::clear_by_type::<NetworkErrorEnvironment>();
    assert_eq!(devmock::get::<NetworkErrorEnvironment>(), None);
}

#[test]
fn test_replacement_takes_effect_on_next_resolution() {
    let _guard = exclusive();

    devmock::mock_by_type(NetworkErrorEnvironment::ServerError);
    devmock::mock_by_type(NetworkErrorEnvironment::Timeout);
    assert_eq!(
        devmock::get::<NetworkErrorEnvironment>(),
        Some(NetworkErrorEnvironment::Timeout)
    );
}

#[test]
fn test_resolution_falls_back_to_production_value() {
    let _guard = exclusive();

    let flags = devmock::resolve_or_else(|| FeatureFlags { new_checkout: false });
    assert_eq!(flags, FeatureFlags { new_checkout: false });

    devmock::mock_by_type(FeatureFlags { new_checkout: true });
    let flags = devmock::resolve_or_else(|| FeatureFlags { new_checkout: false });
    assert_eq!(flags, FeatureFlags { new_checkout: true });

    assert_eq!(
        devmock::resolve_path_or_else(RETRY_LIMIT, || 3),
        3,
        "no path override installed, production retry limit wins"
    );
}

#[test]
fn test_path_overrides_through_the_facade() {
    let _guard = exclusive();

    devmock::mock_by_path(API_BASE_URL, String::from("http://localhost:9999"));
    devmock::mock_by_path(RETRY_LIMIT, 9_u32);

    assert_eq!(
        devmock::get_by_path(API_BASE_URL),
        Some(String::from("http://localhost:9999"))
    );
    assert_eq!(devmock::get_by_path(RETRY_LIMIT), Some(9));

    devmock::clear_by_path(API_BASE_URL);
    assert_eq!(devmock::get_by_path(API_BASE_URL), None);
    assert_eq!(devmock::get_by_path(RETRY_LIMIT), Some(9));
}

#[test]
fn test_active_identifiers_and_clear_all() {
    let _guard = exclusive();

    devmock::mock_by_type(FeatureFlags { new_checkout: true });
    devmock::mock_by_path(API_BASE_URL, String::from("http://localhost:9999"));

    let mut identifiers = devmock::active_identifiers();
    identifiers.sort();
    let mut expected = vec![
        std::any::type_name::<FeatureFlags>().to_string(),
        "environment.api.base_url".to_string(),
    ];
    expected.sort();
    assert_eq!(identifiers, expected);

    devmock::clear_all();
    assert!(devmock::active_identifiers().is_empty());
    assert_eq!(devmock::get::<FeatureFlags>(), None);
    assert_eq!(devmock::get_by_path(API_BASE_URL), None);
}

#[test]
fn test_unit_payload_rejected_through_the_facade() {
    let _guard = exclusive();

    devmock::mock_by_type(());
    assert!(devmock::active_identifiers().is_empty());
    assert_eq!(devmock::get::<()>(), None);

    let err = devmock::try_mock_by_type(()).unwrap_err();
    assert!(matches!(err, devmock::DevmockError::ForbiddenPayload { .. }));
}
