mod catalog;
mod client;
mod response;

pub use catalog::{OapiClient, Operation};
pub(crate) use catalog::invoke;
pub use client::{Client, OutgoingRequest, RawResponse, Transport, CONTENT_TYPE};
pub use response::{ApiResponse, ErrorStatus};
