use ado_envs::config::ClientConfig;
use ado_envs::devops::DevOpsClient;
use ado_envs::error::{AdoError, Result};
use ado_envs::manager::{DeleteTarget, EnvironmentManager};
use mockito::{Matcher, Server};
use serde_json::json;

#[test]
fn test_error_types() {
    let err = AdoError::ServiceEndpointNotFound {
        name: "prod-eu".to_string(),
        endpoint_type: "kubernetes".to_string(),
    };

    assert!(err.to_string().contains("prod-eu"));
    assert!(err.to_string().contains("kubernetes"));
}

#[test]
fn test_delete_failures_are_listed() {
    let err = AdoError::DeleteResourcesFailed {
        failed: vec!["dev/payments".to_string(), "qa/orders".to_string()],
    };

    assert_eq!(
        err.to_string(),
        "Failed to delete resources: dev/payments, qa/orders"
    );
}

#[test]
fn test_version_const() {
    assert!(!ado_envs::VERSION.is_empty());
}

fn manager_for(server: &Server) -> Result<EnvironmentManager<DevOpsClient, Vec<u8>>> {
    let config = ClientConfig::new("contoso", "platform", "test-pat").with_host(server.url());
    Ok(EnvironmentManager::new(DevOpsClient::new(&config)?, Vec::new()))
}

#[tokio::test]
async fn test_create_environment_with_resource_end_to_end() {
    let mut server = Server::new_async().await;

    let list_envs = server
        .mock("GET", "/contoso/platform/_apis/distributedtask/environments")
        .match_query(Matcher::UrlEncoded("api-version".into(), "7.0".into()))
        .with_status(200)
        .with_body(r#"{"value": []}"#)
        .create_async()
        .await;
    let create_env = server
        .mock("POST", "/contoso/platform/_apis/distributedtask/environments")
        .match_query(Matcher::UrlEncoded("api-version".into(), "7.0".into()))
        .match_body(Matcher::Json(json!({"description": "", "name": "prod"})))
        .with_status(200)
        .with_body(r#"{"id": 5, "name": "prod", "description": ""}"#)
        .create_async()
        .await;
    let endpoints = server
        .mock("GET", "/contoso/platform/_apis/serviceendpoint/endpoints")
        .match_query(Matcher::UrlEncoded(
            "api-version".into(),
            "6.0-preview.4".into(),
        ))
        .with_status(200)
        .with_body(r#"{"value": [{"id": "se-1", "name": "prod", "type": "kubernetes"}]}"#)
        .create_async()
        .await;
    let resources = server
        .mock("GET", "/contoso/platform/_apis/distributedtask/environments/5")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("expands".into(), "resourceReferences".into()),
            Matcher::UrlEncoded("api-version".into(), "6.0-preview.1".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"id": 5, "name": "prod", "resources": []}"#)
        .create_async()
        .await;
    let create_resource = server
        .mock(
            "POST",
            "/contoso/platform/_apis/distributedtask/environments/5/providers/kubernetes",
        )
        .match_query(Matcher::UrlEncoded(
            "api-version".into(),
            "6.0-preview.1".into(),
        ))
        .match_body(Matcher::Json(json!({
            "clusterName": "prod",
            "name": "payments",
            "namespace": "payments",
            "serviceEndpointId": "se-1"
        })))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let mut manager = manager_for(&server).unwrap();
    manager
        .create("prod", &["payments".to_string()])
        .await
        .unwrap();

    list_envs.assert_async().await;
    create_env.assert_async().await;
    endpoints.assert_async().await;
    resources.assert_async().await;
    create_resource.assert_async().await;

    let (_, out) = manager.into_inner();
    let out = String::from_utf8(out).unwrap();
    assert_eq!(out, "Created environment prod\nResource 'payments' created\n");
}

#[tokio::test]
async fn test_delete_environment_when_listing_fails() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/contoso/platform/_apis/distributedtask/environments")
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let mut manager = manager_for(&server).unwrap();
    let target = DeleteTarget {
        environment: Some("prod".to_string()),
        resources: Vec::new(),
    };
    let err = manager.delete(&target).await.unwrap_err();

    assert!(matches!(err, AdoError::StatusError { status: 503, .. }));
    delete.assert_async().await;
}
