//! Client binding for the Outscale OAPI.
//!
//! [`models`] holds the request and response records, [`api`] the operation
//! catalog, the [`OapiClient`] contract and a [`Client`] that drives any
//! [`Transport`]. [`service`] exposes the same catalog as untyped JSON.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;

pub use api::{ApiResponse, Client, ErrorStatus, OapiClient, Operation, RawResponse, Transport};
pub use config::Config;
pub use error::{Error, Result};
