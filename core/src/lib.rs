//! Typed network access for the candidate-tracking API.
//!
//! # Overview
//! Callers describe what they want with an [`Endpoint`] and hand it to a
//! [`NetworkService`]. The service resolves the endpoint to a URL, checks
//! that a bearer token is available, performs the HTTP call and decodes the
//! JSON body into the type the caller asked for. Every failure is reported
//! as one [`NetworkError`] variant.
//!
//! # Design
//! - `Endpoint` resolution is pure; a URL that cannot be built is `None`,
//!   not a panic.
//! - `HttpNetworkService` talks to the real backend through reqwest.
//!   `MockNetworkService` serves preloaded fixtures through the same gating
//!   and decoding code, for tests.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod decode;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod mock;
pub mod service;
pub mod types;

pub use client::HttpNetworkService;
pub use config::{ClientConfig, ConfigError};
pub use endpoint::Endpoint;
pub use error::{user_message, NetworkError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mock::{Fixture, FixtureKey, MockNetworkService};
pub use service::NetworkService;
pub use types::{Candidate, CandidateRequest};
