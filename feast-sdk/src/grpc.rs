//! # gRPC Transport
//!
//! Low-level building block for unary calls to Feast Core and Feast Serving.
//!
//! There is no generated client for the Feast services: [`client::GrpcClient`] is generic over
//! the request and response messages and only needs the method path, so every RPC is declared
//! once as a [`crate::transport::Rpc`] and dispatched through the same code path.
pub mod client;
