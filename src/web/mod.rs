//! HTTP surface for the search service

pub mod server;
