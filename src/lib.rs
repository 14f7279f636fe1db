//! Task tracking service: a storage port with in-memory and document-store
//! adapters, served over a small REST API.

pub mod application;
pub mod config;
pub mod domain;
pub mod http;
pub mod infrastructure;
