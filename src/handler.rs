use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;

use crate::logger;
use crate::response::ProbeResponse;

/// Handle one invocation: log the raw event, then report which of the
/// watched environment variables the injection layers actually delivered.
///
/// The event payload is logged but never parsed, and the invocation context
/// is ignored. There are no failure paths; a variable that was not injected
/// is reported with the sentinel value rather than treated as an error.
pub async fn probe(event: LambdaEvent<Value>) -> Result<ProbeResponse, Error> {
    let (payload, _context) = event.into_parts();
    logger::log_invocation(&payload);

    Ok(ProbeResponse::capture())
}

#[cfg(test)]
mod tests {
    use lambda_runtime::Context;
    use serde_json::json;

    use super::*;
    use crate::env::testenv::EnvGuard;
    use crate::response::WATCHED_VARS;

    fn invocation(payload: Value) -> LambdaEvent<Value> {
        LambdaEvent::new(payload, Context::default())
    }

    #[tokio::test]
    async fn test_empty_environment_reports_all_sentinels() {
        let _guard = EnvGuard::clear(WATCHED_VARS);

        let response = probe(invocation(json!({}))).await.unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "statusCode": 200,
                "layer": {
                    "EXAMPLE_CONNECTION_TOKEN": "Not Set",
                    "EXAMPLE_CLUSTER_ID": "Not Set",
                    "EXAMPLE_CONNECTION_URL": "Not Set",
                    "EXAMPLE_TENANT": "Not Set",
                    "AWS_LAMBDA_EXEC_WRAPPER": "Not Set",
                },
                "secondLayer": {
                    "SECOND_LAYER_EXECUTE": "Not Set",
                },
            })
        );
    }

    #[tokio::test]
    async fn test_single_variable_is_echoed_back() {
        let guard = EnvGuard::clear(WATCHED_VARS);
        guard.set("EXAMPLE_TENANT", "acme");

        let response = probe(invocation(json!({"source": "harness"})))
            .await
            .unwrap();

        assert_eq!(response.layer.tenant, "acme");
        assert_eq!(response.layer.connection_token, "Not Set");
        assert_eq!(response.layer.cluster_id, "Not Set");
        assert_eq!(response.layer.connection_url, "Not Set");
        assert_eq!(response.layer.exec_wrapper, "Not Set");
        assert_eq!(response.second_layer.execute, "Not Set");
    }

    #[tokio::test]
    async fn test_both_layers_are_reported_independently() {
        let guard = EnvGuard::clear(WATCHED_VARS);
        guard.set("EXAMPLE_CONNECTION_TOKEN", "tok-123");
        guard.set("EXAMPLE_CONNECTION_URL", "https://cluster.example:9440");
        guard.set("SECOND_LAYER_EXECUTE", "true");

        let response = probe(invocation(json!(null))).await.unwrap();

        assert_eq!(response.layer.connection_token, "tok-123");
        assert_eq!(
            response.layer.connection_url,
            "https://cluster.example:9440"
        );
        assert_eq!(response.second_layer.execute, "true");
        assert_eq!(response.layer.tenant, "Not Set");
    }

    #[tokio::test]
    async fn test_status_code_is_always_200() {
        let _guard = EnvGuard::clear(WATCHED_VARS);

        for payload in [json!(null), json!({}), json!({"key": [1, 2, 3]})] {
            let response = probe(invocation(payload)).await.unwrap();
            assert_eq!(response.status_code, 200);
        }
    }
}
