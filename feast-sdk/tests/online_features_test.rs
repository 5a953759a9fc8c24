use feast_sdk::client::{Client, ClientError, Retrieval, RetrievalMode};
use feast_sdk::config::ClientConfig;
use feast_sdk::marshal::{
    Cell, Column, DATETIME_COLUMN, Dtype, EntityTable, FirstObserved, MarshalError, Table,
    UNTYPED_COLUMN_DTYPE,
};
use feast_sdk::proto::feast::serving::{
    FeatureDataset, FeatureRow, Field, GetOnlineFeaturesResponse,
};
use feast_sdk::proto::{NullValue, Val, Value};
use feast_sdk::transport::rpc;
use mock_transport::MockTransport;

mod mock_transport;

fn setup_client() -> Client<MockTransport> {
    Client::with_transport(MockTransport::new(), ClientConfig::default())
}

fn entities(driver_ids: &[i64]) -> EntityTable {
    let datetime = Column::with_cells(
        DATETIME_COLUMN,
        Dtype::Timestamp,
        driver_ids
            .iter()
            .map(|_| Cell::present(feast_sdk::marshal::Scalar::Timestamp(1_570_000_000_000))),
    )
    .unwrap();
    let driver_id = Column::with_cells(
        "driver_id",
        Dtype::Int64,
        driver_ids.iter().map(|id| Cell::present(*id)),
    )
    .unwrap();

    EntityTable::new(Table::from_columns([datetime, driver_id]).unwrap()).unwrap()
}

fn field(name: &str, val: Option<Val>) -> Field {
    Field {
        name: name.to_string(),
        value: Some(Value { val }),
    }
}

fn dataset(name: &str, version: i32, rows: Vec<Vec<Field>>) -> FeatureDataset {
    FeatureDataset {
        name: name.to_string(),
        version,
        rows: rows.into_iter().map(|fields| FeatureRow { fields }).collect(),
    }
}

#[tokio::test]
async fn test_online_features_are_joined_per_row() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::GetOnlineFeatures>(GetOnlineFeaturesResponse {
            feature_datasets: vec![
                dataset(
                    "driver",
                    1,
                    vec![vec![field("city", Some(Val::StringVal("SF".to_string())))]],
                ),
                dataset(
                    "rider",
                    2,
                    vec![vec![field("trips", Some(Val::Int64Val(12)))]],
                ),
            ],
        });

    let table = client
        .get_online_features(&entities(&[1001]), ["driver:1.city", "rider:2.trips"])
        .await
        .unwrap();

    assert_eq!(table.row_count(), 1);
    let names: Vec<_> = table.column_names().collect();
    assert_eq!(names, vec!["driver.city", "rider.trips"]);
    assert_eq!(
        table.row(0).unwrap(),
        vec![&Cell::present("SF"), &Cell::present(12i64)]
    );
    assert_eq!(table.column("rider.trips").unwrap().dtype(), Dtype::Int64);
}

#[tokio::test]
async fn test_online_request_shape() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::GetOnlineFeatures>(GetOnlineFeaturesResponse::default());

    client
        .get_online_features(
            &entities(&[1001, 1002]),
            ["driver:1.city", "driver:1.rating", "driver:1.city", "rider:2.trips"],
        )
        .await
        .unwrap();

    let requests = client.transport().requests::<rpc::GetOnlineFeatures>();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];

    // --- Feature sets, grouped in first-seen order ---
    assert_eq!(request.feature_sets.len(), 2);
    assert_eq!(request.feature_sets[0].name, "driver");
    assert_eq!(request.feature_sets[0].version, 1);
    assert_eq!(request.feature_sets[0].feature_names, vec!["city", "rating"]);
    assert_eq!(request.feature_sets[0].max_age, None);
    assert_eq!(request.feature_sets[1].name, "rider");
    assert_eq!(request.feature_sets[1].feature_names, vec!["trips"]);

    // --- Entity dataset, without the timestamp column ---
    let dataset = request.entity_dataset.as_ref().unwrap();
    assert_eq!(dataset.entity_names, vec!["driver_id"]);
    assert_eq!(dataset.rows.len(), 2);
    assert_eq!(dataset.rows[1].values, vec![Value { val: Some(Val::Int64Val(1002)) }]);
}

#[tokio::test]
async fn test_row_count_mismatch() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::GetOnlineFeatures>(GetOnlineFeaturesResponse {
            feature_datasets: vec![dataset(
                "driver",
                1,
                vec![vec![field("city", Some(Val::StringVal("SF".to_string())))]],
            )],
        });

    let err = client
        .get_online_features(&entities(&[1001, 1002]), ["driver:1.city"])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Marshal(MarshalError::RowCountMismatch {
            expected: 2,
            actual: 1,
            ..
        })
    ));
}

#[tokio::test]
async fn test_no_datasets_yield_empty_table() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::GetOnlineFeatures>(GetOnlineFeaturesResponse::default());

    let table = client
        .get_online_features(&entities(&[1001, 1002, 1003]), ["driver:1.city"])
        .await
        .unwrap();

    assert_eq!(table.row_count(), 3);
    assert!(table.columns().is_empty());
}

#[tokio::test]
async fn test_null_values_become_missing_cells() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::GetOnlineFeatures>(GetOnlineFeaturesResponse {
            feature_datasets: vec![dataset(
                "driver",
                1,
                vec![
                    vec![field("rating", Some(Val::DoubleVal(4.5)))],
                    vec![field("rating", Some(Val::NullVal(NullValue::Null as i32)))],
                ],
            )],
        });

    let table = client
        .get_online_features(&entities(&[1001, 1002]), ["driver:1.rating"])
        .await
        .unwrap();

    let rating = table.column("driver.rating").unwrap();
    assert_eq!(rating.dtype(), Dtype::Float64);
    assert_eq!(rating.cells(), &[Cell::present(4.5), Cell::Missing]);
}

#[tokio::test]
async fn test_first_entity_without_value() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::GetOnlineFeatures>(GetOnlineFeaturesResponse {
            feature_datasets: vec![dataset(
                "driver",
                1,
                vec![
                    vec![field("city", Some(Val::NullVal(NullValue::Null as i32)))],
                    vec![field("city", Some(Val::StringVal("LA".to_string())))],
                ],
            )],
        });

    let table = client
        .get_online_features(&entities(&[1001, 1002]), ["driver:1.city"])
        .await
        .unwrap();

    let city = table.column("driver.city").unwrap();
    assert_eq!(city.dtype(), Dtype::String);
    assert_eq!(city.cells(), &[Cell::Missing, Cell::present("LA")]);
}

#[tokio::test]
async fn test_feature_without_any_value() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::GetOnlineFeatures>(GetOnlineFeaturesResponse {
            feature_datasets: vec![dataset(
                "driver",
                1,
                vec![
                    vec![
                        field("city", Some(Val::NullVal(NullValue::Null as i32))),
                        field("rating", Some(Val::DoubleVal(4.5))),
                    ],
                    vec![field("city", None), field("rating", Some(Val::DoubleVal(3.0)))],
                ],
            )],
        });

    let table = client
        .get_online_features(&entities(&[1001, 1002]), ["driver:1.city", "driver:1.rating"])
        .await
        .unwrap();

    let names: Vec<_> = table.column_names().collect();
    assert_eq!(names, vec!["driver.city", "driver.rating"]);
    let city = table.column("driver.city").unwrap();
    assert_eq!(city.dtype(), UNTYPED_COLUMN_DTYPE);
    assert_eq!(city.cells(), &[Cell::Missing, Cell::Missing]);
    assert_eq!(
        table.column("driver.rating").unwrap().cells(),
        &[Cell::present(4.5), Cell::present(3.0)]
    );
}

#[tokio::test]
async fn test_custom_dtype_inference() {
    let client = setup_client().with_dtype_inference(FirstObserved);
    client
        .transport()
        .respond::<rpc::GetOnlineFeatures>(GetOnlineFeaturesResponse {
            feature_datasets: vec![dataset(
                "driver",
                1,
                vec![
                    vec![field("city", None)],
                    vec![field("city", Some(Val::StringVal("LA".to_string())))],
                ],
            )],
        });

    let err = client
        .get_online_features(&entities(&[1001, 1002]), ["driver:1.city"])
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Marshal(MarshalError::UndeterminedDtype(column)) if column == "driver.city"
    ));
}

#[tokio::test]
async fn test_malformed_identifier_sends_nothing() {
    let client = setup_client();

    let err = client
        .get(
            &entities(&[1001]),
            ["driver:1.city", "driver:one.rating"],
            RetrievalMode::Online,
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        ClientError::Marshal(MarshalError::MalformedFeatureIdentifier { .. })
    ));
    assert!(client.transport().requests::<rpc::GetOnlineFeatures>().is_empty());
}

#[tokio::test]
async fn test_get_dispatches_online() {
    let client = setup_client();
    client
        .transport()
        .respond::<rpc::GetOnlineFeatures>(GetOnlineFeaturesResponse::default());

    let retrieval = client
        .get(&entities(&[1001]), ["driver:1.city"], RetrievalMode::Online)
        .await
        .unwrap();

    assert!(matches!(retrieval, Retrieval::Online(table) if table.row_count() == 1));
}
