//! # Transport
//!
//! The contract between the high-level [`Client`](crate::client::Client) and whatever carries
//! its requests to Feast Core and Feast Serving.
//!
//! Every RPC is declared as a type implementing [`Rpc`], which pins its request and response
//! messages, its gRPC path and the service that serves it. A [`Transport`] only has to know how
//! to deliver one such call within a deadline. [`Session`](crate::session::Session) is the gRPC
//! implementation.
use crate::BoxError;
use crate::job::JobHandle;
use crate::proto::feast::serving::GetBatchFeaturesRequest;
use std::fmt;
use std::future::Future;
use std::time::Duration;

/// One of the two remote Feast services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Core,
    Serving,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Core => f.write_str("Feast Core"),
            Service::Serving => f.write_str("Feast Serving"),
        }
    }
}

/// A unary RPC of a Feast service.
pub trait Rpc {
    const SERVICE: Service;
    const PATH: &'static str;

    type Request: prost::Message + Default + Send + Sync + 'static;
    type Response: prost::Message + Default + Send + Sync + 'static;
}

/// The RPCs exposed by Feast Core and Feast Serving.
pub mod rpc {
    use super::{Rpc, Service};
    use crate::proto::feast::{core, serving};

    macro_rules! rpc {
        ($name:ident, $service:ident, $path:literal, $request:ty => $response:ty) => {
            #[derive(Debug, Clone, Copy)]
            pub struct $name;

            impl Rpc for $name {
                const SERVICE: Service = Service::$service;
                const PATH: &'static str = $path;

                type Request = $request;
                type Response = $response;
            }
        };
    }

    rpc!(
        GetFeastCoreVersion,
        Core,
        "/feast.core.CoreService/GetFeastCoreVersion",
        () => core::GetFeastCoreVersionResponse
    );
    rpc!(
        GetFeatureSets,
        Core,
        "/feast.core.CoreService/GetFeatureSets",
        core::GetFeatureSetsRequest => core::GetFeatureSetsResponse
    );
    rpc!(
        ApplyFeatureSet,
        Core,
        "/feast.core.CoreService/ApplyFeatureSet",
        core::ApplyFeatureSetRequest => core::ApplyFeatureSetResponse
    );
    rpc!(
        GetFeastServingVersion,
        Serving,
        "/feast.serving.ServingService/GetFeastServingVersion",
        () => serving::GetFeastServingVersionResponse
    );
    rpc!(
        GetOnlineFeatures,
        Serving,
        "/feast.serving.ServingService/GetOnlineFeatures",
        serving::GetOnlineFeaturesRequest => serving::GetOnlineFeaturesResponse
    );
    rpc!(
        GetBatchFeatures,
        Serving,
        "/feast.serving.ServingService/GetBatchFeatures",
        serving::GetBatchFeaturesRequest => serving::GetBatchFeaturesResponse
    );
}

/// Transport-level failures. Only `ConnectionTimeout` and `ServiceUnavailable` are worth a
/// retry; the transport itself never retries.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Please set the {0} URL")]
    MissingUrl(Service),
    #[error("Invalid {service} URL '{url}': {source}")]
    InvalidUrl {
        service: Service,
        url: String,
        #[source]
        source: tonic::transport::Error,
    },
    #[error("Connection timed out while attempting to reach {service} gRPC server {url}")]
    ConnectionTimeout { service: Service, url: String },
    #[error("{service} gRPC server {url} is unavailable: {reason}")]
    ServiceUnavailable {
        service: Service,
        url: String,
        reason: String,
    },
    #[error("Internal error, the client was not ready: '{0}'")]
    ClientNotReady(#[source] BoxError),
    #[error("{service} failed: code={:?} message={:?}", .status.code(), .status.message())]
    Status {
        service: Service,
        #[source]
        status: tonic::Status,
    },
    #[error("{rpc} response is missing '{field}'")]
    IncompleteResponse {
        rpc: &'static str,
        field: &'static str,
    },
}

impl TransportError {
    /// Whether the caller may reasonably try the same call again.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::ConnectionTimeout { .. } | TransportError::ServiceUnavailable { .. }
        )
    }
}

/// Delivers RPCs to Feast Core and Feast Serving.
///
/// Implementations must be shareable between concurrent callers: every method takes `&self`.
pub trait Transport: Send + Sync {
    /// Establishes the Core connection unless it already exists.
    fn ensure_core_connected(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Establishes the Serving connection unless it already exists.
    fn ensure_serving_connected(
        &self,
        timeout: Duration,
    ) -> impl Future<Output = Result<(), TransportError>> + Send;

    /// Performs one unary call, failing if no response arrives within `timeout`.
    fn call<R: Rpc>(
        &self,
        request: R::Request,
        timeout: Duration,
    ) -> impl Future<Output = Result<R::Response, TransportError>> + Send;

    /// Submits a batch retrieval and returns the handle of the job Serving created.
    fn submit_batch_job(
        &self,
        request: GetBatchFeaturesRequest,
        timeout: Duration,
    ) -> impl Future<Output = Result<JobHandle, TransportError>> + Send {
        async move {
            let response = self.call::<rpc::GetBatchFeatures>(request, timeout).await?;

            response
                .job
                .map(JobHandle::from)
                .ok_or(TransportError::IncompleteResponse {
                    rpc: "GetBatchFeatures",
                    field: "job",
                })
        }
    }
}
