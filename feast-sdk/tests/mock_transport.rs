#![allow(dead_code)]

use feast_sdk::prost::Message;
use feast_sdk::transport::{Rpc, Service, Transport, TransportError};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

/// An in-memory transport replaying canned responses, one queue per RPC path.
///
/// Requests are recorded encoded, exactly as they would go on the wire.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<HashMap<&'static str, VecDeque<Result<Vec<u8>, tonic::Status>>>>,
    requests: Mutex<HashMap<&'static str, Vec<Vec<u8>>>>,
    unreachable: Mutex<Vec<Service>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond<R: Rpc>(&self, response: R::Response) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(R::PATH)
            .or_default()
            .push_back(Ok(response.encode_to_vec()));
        self
    }

    pub fn fail<R: Rpc>(&self, status: tonic::Status) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .entry(R::PATH)
            .or_default()
            .push_back(Err(status));
        self
    }

    /// Makes every connection attempt to `service` fail.
    pub fn unreachable(&self, service: Service) -> &Self {
        self.unreachable.lock().unwrap().push(service);
        self
    }

    /// The requests received for `R`, in order.
    pub fn requests<R: Rpc>(&self) -> Vec<R::Request> {
        self.requests
            .lock()
            .unwrap()
            .get(R::PATH)
            .map(|requests| {
                requests
                    .iter()
                    .map(|bytes| R::Request::decode(bytes.as_slice()).unwrap())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn connect(&self, service: Service) -> Result<(), TransportError> {
        if self.unreachable.lock().unwrap().contains(&service) {
            return Err(TransportError::ServiceUnavailable {
                service,
                url: "mock://".to_string(),
                reason: "unreachable".to_string(),
            });
        }
        Ok(())
    }
}

impl Transport for MockTransport {
    async fn ensure_core_connected(&self, _timeout: Duration) -> Result<(), TransportError> {
        self.connect(Service::Core)
    }

    async fn ensure_serving_connected(&self, _timeout: Duration) -> Result<(), TransportError> {
        self.connect(Service::Serving)
    }

    async fn call<R: Rpc>(
        &self,
        request: R::Request,
        _timeout: Duration,
    ) -> Result<R::Response, TransportError> {
        self.connect(R::SERVICE)?;

        self.requests
            .lock()
            .unwrap()
            .entry(R::PATH)
            .or_default()
            .push(request.encode_to_vec());

        let next = self
            .responses
            .lock()
            .unwrap()
            .get_mut(R::PATH)
            .and_then(VecDeque::pop_front);

        match next {
            Some(Ok(bytes)) => Ok(R::Response::decode(bytes.as_slice()).unwrap()),
            Some(Err(status)) => Err(TransportError::Status {
                service: R::SERVICE,
                status,
            }),
            None => Err(TransportError::ServiceUnavailable {
                service: R::SERVICE,
                url: "mock://".to_string(),
                reason: format!("no response queued for {}", R::PATH),
            }),
        }
    }
}
