//! # Session
//!
//! The gRPC [`Transport`]: one lazily opened channel per Feast service.
//!
//! Each endpoint is either unconnected or connected. The only transition is
//! *connect-if-absent*, performed through [`OnceCell::get_or_try_init`], so concurrent callers
//! sharing a session never open the same channel twice. A failed attempt leaves the endpoint
//! unconnected and the next call tries again. Once open, a channel is reused for the lifetime of
//! the session.
use crate::config::ClientConfig;
use crate::grpc::client::{GrpcClient, GrpcRequestError};
use crate::transport::{Rpc, Service, Transport, TransportError};
use std::time::Duration;
use tokio::sync::OnceCell;
use tonic::Code;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info};

#[derive(Debug)]
pub struct Session {
    config: ClientConfig,
    core: OnceCell<Channel>,
    serving: OnceCell<Channel>,
}

impl Session {
    /// Creates an unconnected session. No connection is attempted until the first call.
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            core: OnceCell::new(),
            serving: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Whether a channel to `service` has been established.
    pub fn is_connected(&self, service: Service) -> bool {
        self.cell(service).initialized()
    }

    fn cell(&self, service: Service) -> &OnceCell<Channel> {
        match service {
            Service::Core => &self.core,
            Service::Serving => &self.serving,
        }
    }

    fn url(&self, service: Service) -> Result<&str, TransportError> {
        self.config
            .url(service)
            .ok_or(TransportError::MissingUrl(service))
    }

    async fn channel(&self, service: Service, timeout: Duration) -> Result<Channel, TransportError> {
        let cell = self.cell(service);

        if let Some(channel) = cell.get() {
            debug!(%service, "Reusing established channel");
            return Ok(channel.clone());
        }

        let url = self.url(service)?;
        let channel = cell
            .get_or_try_init(|| connect(service, url, timeout))
            .await?;

        Ok(channel.clone())
    }
}

async fn connect(service: Service, url: &str, timeout: Duration) -> Result<Channel, TransportError> {
    let endpoint = Endpoint::new(url.to_string())
        .map_err(|source| TransportError::InvalidUrl {
            service,
            url: url.to_string(),
            source,
        })?
        .connect_timeout(timeout);

    debug!(%service, url, ?timeout, "Connecting");

    match tokio::time::timeout(timeout, endpoint.connect()).await {
        Ok(Ok(channel)) => {
            info!(%service, url, "Connected");
            Ok(channel)
        }
        Ok(Err(err)) => Err(TransportError::ServiceUnavailable {
            service,
            url: url.to_string(),
            reason: err.to_string(),
        }),
        Err(_) => Err(TransportError::ConnectionTimeout {
            service,
            url: url.to_string(),
        }),
    }
}

fn classify_status(service: Service, url: &str, status: tonic::Status) -> TransportError {
    match status.code() {
        Code::DeadlineExceeded => TransportError::ConnectionTimeout {
            service,
            url: url.to_string(),
        },
        Code::Unavailable => TransportError::ServiceUnavailable {
            service,
            url: url.to_string(),
            reason: status.message().to_string(),
        },
        _ => TransportError::Status { service, status },
    }
}

impl Transport for Session {
    async fn ensure_core_connected(&self, timeout: Duration) -> Result<(), TransportError> {
        self.channel(Service::Core, timeout).await.map(|_| ())
    }

    async fn ensure_serving_connected(&self, timeout: Duration) -> Result<(), TransportError> {
        self.channel(Service::Serving, timeout).await.map(|_| ())
    }

    async fn call<R: Rpc>(
        &self,
        request: R::Request,
        timeout: Duration,
    ) -> Result<R::Response, TransportError> {
        let channel = self.channel(R::SERVICE, self.config.connect_timeout).await?;
        let url = self.url(R::SERVICE)?;

        debug!(service = %R::SERVICE, path = R::PATH, ?timeout, "Calling");

        let mut client = GrpcClient::new(channel);

        match client
            .unary::<R::Request, R::Response>(R::PATH, request, timeout)
            .await
        {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(status)) => Err(classify_status(R::SERVICE, url, status)),
            Err(GrpcRequestError::ClientNotReady(err)) => Err(TransportError::ClientNotReady(err)),
            Err(GrpcRequestError::DeadlineExceeded(_)) => Err(TransportError::ConnectionTimeout {
                service: R::SERVICE,
                url: url.to_string(),
            }),
        }
    }
}
