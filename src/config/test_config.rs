use super::{Api, Config, Logs, Metrics, SettingsBox, Shutdown, K8S};
use std::time::Duration;

/// Creates a new test configuration.
///
/// Uses the embedded reference seed and port 0; tests bind their own listener.
pub fn new_test_config() -> Config {
    Config {
        directory: SettingsBox {
            env: super::TEST.to_string(),
            logs: Some(Logs {
                level: Some("debug".to_string()),
            }),
            api: Some(Api {
                name: Some("activity-directory-test".to_string()),
                port: Some("0".to_string()),
                timeout: Some(Duration::from_secs(5)),
            }),
            seed: None,
            k8s: Some(K8S {
                probe: super::Probe {
                    timeout: Some(Duration::from_secs(1)),
                },
            }),
            metrics: Some(Metrics { enabled: false }),
            shutdown: Some(Shutdown {
                timeout: Some(Duration::from_secs(2)),
            }),
        },
    }
}
