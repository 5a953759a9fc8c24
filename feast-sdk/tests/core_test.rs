use feast_sdk::client::{Client, ClientError, NOT_CONNECTED};
use feast_sdk::config::ClientConfig;
use feast_sdk::feature_set::{FeatureSet, FeatureSetError, FieldSpec};
use feast_sdk::marshal::Dtype;
use feast_sdk::proto::feast::core::apply_feature_set_response::Status as ApplyStatus;
use feast_sdk::proto::feast::core::{
    ApplyFeatureSetResponse, GetFeastCoreVersionResponse, GetFeatureSetsResponse,
};
use feast_sdk::proto::feast::serving::GetFeastServingVersionResponse;
use feast_sdk::transport::{Service, TransportError, rpc};
use mock_transport::MockTransport;

mod mock_transport;

fn setup_client() -> Client<MockTransport> {
    let config = ClientConfig::default()
        .with_core_url("core:6565")
        .with_serving_url("serving:6566");
    Client::with_transport(MockTransport::new(), config)
}

fn driver(version: i32) -> FeatureSet {
    FeatureSet::new("driver", version)
        .with_entity("driver_id", Dtype::Int64)
        .with_feature("city", Dtype::String)
}

#[tokio::test]
async fn test_apply_feature_set() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::ApplyFeatureSet>(ApplyFeatureSetResponse {
            feature_set: Some(driver(2).to_proto().unwrap()),
            status: ApplyStatus::Created as i32,
        });

    let applied = client.apply(&driver(1)).await.unwrap();

    // Core assigns the version
    assert_eq!(applied, driver(2));

    let requests = client.transport().requests::<rpc::ApplyFeatureSet>();
    assert_eq!(requests[0].feature_set, Some(driver(1).to_proto().unwrap()));
}

#[tokio::test]
async fn test_apply_error_status() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::ApplyFeatureSet>(ApplyFeatureSetResponse {
            feature_set: None,
            status: ApplyStatus::Error as i32,
        });

    let err = client.apply(&driver(1)).await.unwrap_err();

    assert!(matches!(err, ClientError::ApplyFailed(name) if name == "driver"));
}

#[tokio::test]
async fn test_apply_all_stops_at_first_failure() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::ApplyFeatureSet>(ApplyFeatureSetResponse {
            feature_set: Some(driver(1).to_proto().unwrap()),
            status: ApplyStatus::NoChange as i32,
        })
        .fail::<rpc::ApplyFeatureSet>(tonic::Status::invalid_argument("bad spec"));

    let err = client
        .apply_all([&driver(1), &driver(2), &driver(3)])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Transport(TransportError::Status { service: Service::Core, .. })
    ));
    assert_eq!(client.transport().requests::<rpc::ApplyFeatureSet>().len(), 2);
}

#[tokio::test]
async fn test_apply_unsupported_dtype_sends_nothing() {
    let client = setup_client();
    let feature_set = driver(1).with_feature("active", Dtype::Bool);

    let err = client.apply(&feature_set).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::InvalidFeatureSet(FeatureSetError::UnsupportedDtype { .. })
    ));
    assert!(client.transport().requests::<rpc::ApplyFeatureSet>().is_empty());
}

#[tokio::test]
async fn test_get_feature_set() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::GetFeatureSets>(GetFeatureSetsResponse::default())
        .respond::<rpc::GetFeatureSets>(GetFeatureSetsResponse {
            feature_sets: vec![driver(1).to_proto().unwrap()],
        })
        .respond::<rpc::GetFeatureSets>(GetFeatureSetsResponse {
            feature_sets: vec![driver(1).to_proto().unwrap(), driver(1).to_proto().unwrap()],
        });

    // --- No match ---
    assert_eq!(client.get_feature_set("driver", 1).await.unwrap(), None);

    // --- Exactly one match ---
    assert_eq!(
        client.get_feature_set("  driver ", 1).await.unwrap(),
        Some(driver(1))
    );

    // --- Ambiguous ---
    let err = client.get_feature_set("driver", 1).await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::AmbiguousResourceLookup { count: 2, version: 1, .. }
    ));

    let requests = client.transport().requests::<rpc::GetFeatureSets>();
    let filter = requests[1].filter.as_ref().unwrap();
    assert_eq!(filter.feature_set_name, "driver");
    assert_eq!(filter.feature_set_version, "1");
}

#[tokio::test]
async fn test_entities_are_merged_across_feature_sets() {
    let client = setup_client();
    let rider = FeatureSet::new("rider", 1)
        .with_entity("rider_id", Dtype::Int64)
        .with_entity("driver_id", Dtype::String)
        .with_feature("trips", Dtype::Int32);
    client
        .transport()
        .respond::<rpc::GetFeatureSets>(GetFeatureSetsResponse {
            feature_sets: vec![driver(1).to_proto().unwrap(), rider.to_proto().unwrap()],
        });

    let entities = client.entities().await.unwrap();

    assert_eq!(
        entities,
        vec![
            FieldSpec::new("driver_id", Dtype::String),
            FieldSpec::new("rider_id", Dtype::Int64),
        ]
    );
    assert!(
        client.transport().requests::<rpc::GetFeatureSets>()[0]
            .filter
            .is_none()
    );
}

#[tokio::test]
async fn test_version_with_unreachable_service() {
    let client = setup_client();
    client
        .transport()
        .unreachable(Service::Serving)
        .respond::<rpc::GetFeastCoreVersion>(GetFeastCoreVersionResponse {
            version: "0.3.2".to_string(),
        })
        .respond::<rpc::GetFeastServingVersion>(GetFeastServingVersionResponse {
            version: "0.3.2".to_string(),
        });

    let info = client.version().await;

    assert_eq!(info.core.url.as_deref(), Some("http://core:6565"));
    assert_eq!(info.core.version, "0.3.2");
    assert!(info.core.is_connected());
    assert_eq!(info.serving.url.as_deref(), Some("http://serving:6566"));
    assert_eq!(info.serving.version, NOT_CONNECTED);
    assert!(!info.serving.is_connected());
}
