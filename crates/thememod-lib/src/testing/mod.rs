//! Test support shared by unit tests and the integration test crate
//!
//! Real-filesystem fixtures backed by `tempfile`; the in-memory providers
//! live in `application::session_mocks`.

pub mod filesystem;

pub use filesystem::TempDirFixture;
