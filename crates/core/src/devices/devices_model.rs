use serde::{Deserialize, Serialize};

/// Push-token registration of this device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceRegistration {
    /// `key=value` pairs joined with `;` describing the device.
    pub meta: String,
    pub push_token: String,
}

/// Describes the running client, e.g. `os=linux;arch=x86_64;family=unix;app_version=0.4.0`.
pub fn device_meta(app_version: &str) -> String {
    [
        ("os", std::env::consts::OS),
        ("arch", std::env::consts::ARCH),
        ("family", std::env::consts::FAMILY),
        ("app_version", app_version),
    ]
    .iter()
    .map(|(key, value)| format!("{}={}", key, value))
    .collect::<Vec<_>>()
    .join(";")
}
