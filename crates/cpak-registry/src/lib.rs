//! Registry access for cpak: the version/dependency query interface the
//! resolver consumes, its HTTP/JSON implementation, archive downloading with
//! checksum verification, the project-local package cache, and an in-memory
//! fixture for tests.

pub mod cache;
pub mod client;
pub mod download;
pub mod fixture;
pub mod http;

pub use client::Registry;
