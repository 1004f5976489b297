//! Request description, client construction, and single-attempt dispatch.
mod client;
mod dispatch;
mod outcome;
mod request;

#[cfg(test)]
mod tests;

pub use client::build_client;
pub use dispatch::{Dispatch, HttpDispatcher};
pub use outcome::Outcome;
pub use request::{BodySource, RequestSpec, build_request_spec};
