//! # condohub-upstream
//!
//! The upstream REST API behind the CRUD routes, seen through one small
//! verb interface: [`UpstreamApi`]. [`HttpUpstream`] is the reqwest-backed
//! implementation.

pub mod api;
pub mod http;

pub use api::{QueryPairs, UpstreamApi};
pub use http::HttpUpstream;
