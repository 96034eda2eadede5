//! Shared test helpers

pub mod backend_mock;

pub use backend_mock::{BackendMockServer, MockResponseConfig};
