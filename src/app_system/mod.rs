//! System orchestration, startup, and shutdown logic.

pub mod logging;
pub mod storefront_system;

pub use logging::*;
pub use storefront_system::*;
