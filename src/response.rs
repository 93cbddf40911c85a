// Probe response construction module

use serde::Serialize;

use crate::env;

/// Full payload returned to the invoker on every invocation.
///
/// The shape is fixed: a success status code plus one section per injection
/// layer, each listing its variables by their exact environment names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProbeResponse {
    pub status_code: u16,
    pub layer: LayerReport,
    pub second_layer: SecondLayerReport,
}

/// Variables expected from the primary secrets layer, plus the wrapper hook
/// that proves the layer's exec wrapper was installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayerReport {
    #[serde(rename = "EXAMPLE_CONNECTION_TOKEN")]
    pub connection_token: String,
    #[serde(rename = "EXAMPLE_CLUSTER_ID")]
    pub cluster_id: String,
    #[serde(rename = "EXAMPLE_CONNECTION_URL")]
    pub connection_url: String,
    #[serde(rename = "EXAMPLE_TENANT")]
    pub tenant: String,
    #[serde(rename = "AWS_LAMBDA_EXEC_WRAPPER")]
    pub exec_wrapper: String,
}

/// Variable expected from the second, chained secrets layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SecondLayerReport {
    #[serde(rename = "SECOND_LAYER_EXECUTE")]
    pub execute: String,
}

impl ProbeResponse {
    /// Snapshot the six watched variables from the current process
    /// environment. Always succeeds; absent variables report the sentinel.
    pub fn capture() -> Self {
        Self {
            status_code: 200,
            layer: LayerReport::capture(),
            second_layer: SecondLayerReport::capture(),
        }
    }
}

impl LayerReport {
    pub fn capture() -> Self {
        Self {
            connection_token: env::var_or_not_set("EXAMPLE_CONNECTION_TOKEN"),
            cluster_id: env::var_or_not_set("EXAMPLE_CLUSTER_ID"),
            connection_url: env::var_or_not_set("EXAMPLE_CONNECTION_URL"),
            tenant: env::var_or_not_set("EXAMPLE_TENANT"),
            exec_wrapper: env::var_or_not_set("AWS_LAMBDA_EXEC_WRAPPER"),
        }
    }
}

impl SecondLayerReport {
    pub fn capture() -> Self {
        Self {
            execute: env::var_or_not_set("SECOND_LAYER_EXECUTE"),
        }
    }
}

/// Every variable the probe reports, across both sections.
#[cfg(test)]
pub(crate) const WATCHED_VARS: &[&str] = &[
    "EXAMPLE_CONNECTION_TOKEN",
    "EXAMPLE_CLUSTER_ID",
    "EXAMPLE_CONNECTION_URL",
    "EXAMPLE_TENANT",
    "AWS_LAMBDA_EXEC_WRAPPER",
    "SECOND_LAYER_EXECUTE",
];
