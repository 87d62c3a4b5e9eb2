//! Host-facing session layer: configuration plus the tick-driven driver.

/// JSON configuration.
pub mod config;
/// Tick-driven session.
pub mod flow_session;
