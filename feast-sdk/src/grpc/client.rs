//! # Generic gRPC Client
//!
//! This module wraps a standard `tonic` client to provide a generic interface for unary
//! gRPC calls. It is agnostic to the specific Protobuf messages being exchanged.
//!
//! ## How it works
//!
//! The [`GrpcClient`] uses `tonic_prost::ProstCodec` to serialize any `prost::Message`. Callers
//! provide the HTTP/2 path (e.g. `/feast.serving.ServingService/GetOnlineFeatures`) and a
//! deadline, which is both sent to the server as `grpc-timeout` and enforced locally.
use crate::BoxError;
use http_body::Body as HttpBody;
use std::time::Duration;
use tonic::{client::GrpcService, transport::Channel};
use tonic_prost::ProstCodec;

#[derive(thiserror::Error, Debug)]
pub enum GrpcRequestError {
    #[error("Internal error, the client was not ready: '{0}'")]
    ClientNotReady(#[source] BoxError),
    #[error("No response within {0:?}")]
    DeadlineExceeded(Duration),
}

/// A generic client for unary gRPC calls carrying prost messages.
#[derive(Debug, Clone)]
pub struct GrpcClient<S = Channel> {
    client: tonic::client::Grpc<S>,
}

impl<S> GrpcClient<S>
where
    S: GrpcService<tonic::body::Body>,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
{
    pub fn new(service: S) -> Self {
        let client = tonic::client::Grpc::new(service);
        Self { client }
    }

    /// Performs a Unary gRPC call (Single Request -> Single Response).
    ///
    /// # Returns
    ///
    /// * `Ok(Ok(Res))` - Successful RPC execution.
    /// * `Ok(Err(Status))` - RPC executed, but server returned an error.
    /// * `Err(GrpcRequestError)` - The client never became ready or the deadline expired.
    pub async fn unary<Req, Res>(
        &mut self,
        path: &'static str,
        payload: Req,
        timeout: Duration,
    ) -> Result<Result<Res, tonic::Status>, GrpcRequestError>
    where
        Req: prost::Message + Send + Sync + 'static,
        Res: prost::Message + Default + Send + Sync + 'static,
    {
        let call = async {
            if let Err(e) = self.client.ready().await {
                return Err(GrpcRequestError::ClientNotReady(e.into()));
            }

            let codec = ProstCodec::<Req, Res>::default();
            let path = http::uri::PathAndQuery::from_static(path);

            let mut request = tonic::Request::new(payload);
            request.set_timeout(timeout);

            Ok(self
                .client
                .unary(request, path, codec)
                .await
                .map(tonic::Response::into_inner))
        };

        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| GrpcRequestError::DeadlineExceeded(timeout))?
    }
}
