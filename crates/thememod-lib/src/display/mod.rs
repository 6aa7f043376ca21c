//! Terminal display system
//!
//! Separates user-facing output (status lines, tables) from diagnostics,
//! which go through `tracing`.

pub mod live;
pub mod mock;
pub mod providers;
pub mod styling;

pub use live::LiveDisplayProvider;
pub use mock::{DisplayCall, MockDisplayProvider};
pub use providers::{DisplayProvider, StatusProvider, StructuredProvider};
pub use styling::StyleManager;
