//! Global subscriber installation. Kept in its own test binary so no other
//! test races for the global default.

use idconsole_log::{Format, LogConfig, init};

#[test]
fn test_second_init_is_ignored() {
    let config = LogConfig {
        format: Format::Json,
        timestamps: false,
        ..LogConfig::default()
    };

    assert!(init(&config));
    tracing::info!(path = "/users", "after init");
    assert!(!init(&LogConfig::default()));
}
