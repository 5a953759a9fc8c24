//! # Feast Client
//!
//! The high-level entry point of the SDK. A [`Client`] registers feature sets with Feast Core
//! and retrieves feature values from Feast Serving, delegating every wire conversion to
//! [`crate::marshal`] and every call to a [`Transport`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use feast_sdk::client::Client;
//! use feast_sdk::config::ClientConfig;
//! use feast_sdk::marshal::{Cell, Column, DATETIME_COLUMN, Dtype, EntityTable, Scalar, Table};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::new(ClientConfig::default().with_serving_url("localhost:6566"));
//!
//! let entities = EntityTable::new(Table::from_columns([
//!     Column::with_cells(DATETIME_COLUMN, Dtype::Timestamp, [Cell::present(Scalar::Timestamp(1_570_000_000_000))])?,
//!     Column::with_cells("driver_id", Dtype::Int64, [Cell::present(1001i64)])?,
//! ])?)?;
//!
//! let table = client
//!     .get_online_features(&entities, ["driver:1.city", "driver:1.rating"])
//!     .await?;
//! # Ok(())
//! # }
//! ```
use crate::config::ClientConfig;
use crate::feature_set::{FeatureSet, FeatureSetError, FieldSpec};
use crate::job::JobHandle;
use crate::marshal::{
    self, DtypeInference, EntityTable, FeatureSetRequests, IdGrammar, MarshalError,
    ResponseAssembler, Table,
};
use crate::proto::feast::core::apply_feature_set_response::Status as ApplyStatus;
use crate::proto::feast::core::{ApplyFeatureSetRequest, GetFeatureSetsRequest, get_feature_sets_request};
use crate::session::Session;
use crate::transport::{Service, Transport, TransportError, rpc};
use tracing::{debug, info, warn};

/// Reported in place of a version when a service cannot be reached.
pub const NOT_CONNECTED: &str = "not connected";

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Marshal(#[from] MarshalError),
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    InvalidFeatureSet(#[from] FeatureSetError),
    #[error("Found {count} feature sets with name '{name}' and version '{version}'")]
    AmbiguousResourceLookup {
        name: String,
        version: i32,
        count: usize,
    },
    #[error("Feast Core failed to apply feature set '{0}'")]
    ApplyFailed(String),
}

/// Which Serving API a retrieval goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetrievalMode {
    /// Low latency lookup of the latest values, answered inline.
    #[default]
    Online,
    /// Point-in-time lookup executed as an asynchronous job.
    Batch,
}

/// The outcome of [`Client::get`].
#[derive(Debug, Clone, PartialEq)]
pub enum Retrieval {
    Online(Table),
    Batch(JobHandle),
}

/// URL and version of one service, as reported by [`Client::version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceVersion {
    pub url: Option<String>,
    /// The version string, or [`NOT_CONNECTED`].
    pub version: String,
}

impl ServiceVersion {
    pub fn is_connected(&self) -> bool {
        self.version != NOT_CONNECTED
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub core: ServiceVersion,
    pub serving: ServiceVersion,
}

/// Client for Feast Core and Feast Serving.
///
/// All methods take `&self`, so one client can be shared between tasks.
#[derive(Debug)]
pub struct Client<T: Transport = Session> {
    transport: T,
    config: ClientConfig,
    assembler: ResponseAssembler,
}

impl Client<Session> {
    /// Creates a client over gRPC. Connections are opened on first use.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(Session::new(config.clone()), config)
    }

    /// Creates a client whose URLs come from `FEAST_CORE_URL` and `FEAST_SERVING_URL`.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T, config: ClientConfig) -> Self {
        Self {
            transport,
            config,
            assembler: ResponseAssembler::default(),
        }
    }

    /// Replaces the strategy that types the columns of online results.
    pub fn with_dtype_inference(
        mut self,
        inference: impl DtypeInference + Send + Sync + 'static,
    ) -> Self {
        self.assembler = ResponseAssembler::new(inference);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Reports the version of both services. Never fails: an unreachable service is reported
    /// as [`NOT_CONNECTED`].
    pub async fn version(&self) -> VersionInfo {
        let core = match self.core_version().await {
            Ok(version) => version,
            Err(err) => {
                warn!(service = %Service::Core, error = %err, "Unable to get version");
                NOT_CONNECTED.to_string()
            }
        };

        let serving = match self.serving_version().await {
            Ok(version) => version,
            Err(err) => {
                warn!(service = %Service::Serving, error = %err, "Unable to get version");
                NOT_CONNECTED.to_string()
            }
        };

        VersionInfo {
            core: ServiceVersion {
                url: self.config.url(Service::Core).map(str::to_string),
                version: core,
            },
            serving: ServiceVersion {
                url: self.config.url(Service::Serving).map(str::to_string),
                version: serving,
            },
        }
    }

    async fn core_version(&self) -> Result<String, TransportError> {
        self.transport
            .ensure_core_connected(self.config.connect_timeout)
            .await?;
        let response = self
            .transport
            .call::<rpc::GetFeastCoreVersion>((), self.config.call_timeout)
            .await?;
        Ok(response.version)
    }

    async fn serving_version(&self) -> Result<String, TransportError> {
        self.transport
            .ensure_serving_connected(self.config.connect_timeout)
            .await?;
        let response = self
            .transport
            .call::<rpc::GetFeastServingVersion>((), self.config.call_timeout)
            .await?;
        Ok(response.version)
    }

    /// Registers `feature_set` with Core and returns it as Core stored it.
    pub async fn apply(&self, feature_set: &FeatureSet) -> Result<FeatureSet, ClientError> {
        let spec = feature_set.to_proto()?;

        let response = self
            .transport
            .call::<rpc::ApplyFeatureSet>(
                ApplyFeatureSetRequest {
                    feature_set: Some(spec),
                },
                self.config.apply_timeout,
            )
            .await?;

        let status = response.status();
        if status == ApplyStatus::Error {
            return Err(ClientError::ApplyFailed(feature_set.name.clone()));
        }

        info!(
            feature_set = %feature_set.reference(),
            status = status.as_str_name(),
            "Applied feature set"
        );

        let applied = response
            .feature_set
            .ok_or(TransportError::IncompleteResponse {
                rpc: "ApplyFeatureSet",
                field: "feature_set",
            })?;

        Ok(FeatureSet::from_proto(applied)?)
    }

    /// Registers every feature set in order, stopping at the first failure.
    pub async fn apply_all(
        &self,
        feature_sets: impl IntoIterator<Item = &FeatureSet>,
    ) -> Result<Vec<FeatureSet>, ClientError> {
        let mut applied = Vec::new();
        for feature_set in feature_sets {
            applied.push(self.apply(feature_set).await?);
        }
        Ok(applied)
    }

    /// Lists every feature set registered with Core.
    pub async fn feature_sets(&self) -> Result<Vec<FeatureSet>, ClientError> {
        self.list_feature_sets(None).await
    }

    /// Looks up one version of one feature set. `Ok(None)` when Core knows no such feature set.
    pub async fn get_feature_set(
        &self,
        name: &str,
        version: i32,
    ) -> Result<Option<FeatureSet>, ClientError> {
        let filter = get_feature_sets_request::Filter {
            feature_set_name: name.trim().to_string(),
            feature_set_version: version.to_string(),
        };

        let mut found = self.list_feature_sets(Some(filter)).await?;

        match found.len() {
            0 | 1 => Ok(found.pop()),
            count => Err(ClientError::AmbiguousResourceLookup {
                name: name.trim().to_string(),
                version,
                count,
            }),
        }
    }

    async fn list_feature_sets(
        &self,
        filter: Option<get_feature_sets_request::Filter>,
    ) -> Result<Vec<FeatureSet>, ClientError> {
        let response = self
            .transport
            .call::<rpc::GetFeatureSets>(GetFeatureSetsRequest { filter }, self.config.call_timeout)
            .await?;

        debug!(count = response.feature_sets.len(), "Listed feature sets");

        response
            .feature_sets
            .into_iter()
            .map(|spec| FeatureSet::from_proto(spec).map_err(ClientError::from))
            .collect()
    }

    /// Every entity declared by a registered feature set, keyed by name in first-seen order.
    /// When two feature sets declare the same entity the later declaration wins.
    pub async fn entities(&self) -> Result<Vec<FieldSpec>, ClientError> {
        let mut entities: Vec<FieldSpec> = Vec::new();

        for feature_set in self.feature_sets().await? {
            for entity in feature_set.entities {
                match entities.iter_mut().find(|e| e.name == entity.name) {
                    Some(existing) => *existing = entity,
                    None => entities.push(entity),
                }
            }
        }

        Ok(entities)
    }

    /// Fetches the latest values of `feature_ids` (`set:version.feature`) for every entity row.
    ///
    /// Row `i` of the result answers row `i` of `entities`; columns are named
    /// `<feature set>.<feature>`.
    pub async fn get_online_features<I, S>(
        &self,
        entities: &EntityTable,
        feature_ids: I,
    ) -> Result<Table, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let features = FeatureSetRequests::parse(feature_ids, IdGrammar::Online)?;
        let request = marshal::build_online_request(entities, &features)?;

        let response = self
            .transport
            .call::<rpc::GetOnlineFeatures>(request, self.config.call_timeout)
            .await?;

        Ok(self
            .assembler
            .assemble(entities, &response.feature_datasets)?)
    }

    /// Submits a point-in-time retrieval of `feature_ids` (`set:version:feature`) and returns
    /// the handle of the job Serving created for it.
    pub async fn get_batch_features<I, S>(
        &self,
        entities: &EntityTable,
        feature_ids: I,
    ) -> Result<JobHandle, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let features = FeatureSetRequests::parse(feature_ids, IdGrammar::Batch)?;
        let request =
            marshal::build_batch_request(entities, &features, self.config.batch_max_age)?;

        let job = self
            .transport
            .submit_batch_job(request, self.config.call_timeout)
            .await?;

        info!(job = %job, "Submitted batch retrieval");

        Ok(job)
    }

    /// Retrieves `feature_ids` through the API selected by `mode`. Identifiers use the grammar
    /// of that API.
    pub async fn get<I, S>(
        &self,
        entities: &EntityTable,
        feature_ids: I,
        mode: RetrievalMode,
    ) -> Result<Retrieval, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        match mode {
            RetrievalMode::Online => self
                .get_online_features(entities, feature_ids)
                .await
                .map(Retrieval::Online),
            RetrievalMode::Batch => self
                .get_batch_features(entities, feature_ids)
                .await
                .map(Retrieval::Batch),
        }
    }
}
