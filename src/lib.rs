//! BookNGo console — session gate in front of the BookNGo management pages.
//!
//! ARCHITECTURE
//! ============
//! Two cooperating guards, deliberately kept apart:
//! - `guard`: edge route guard, a cheap cookie-presence check run as axum
//!   middleware before any page handler.
//! - `session`: per-page-load session context, the authoritative check that
//!   resolves the cookie against the remote identity endpoint.
//!
//! `routes` wires both into an axum router; `state` and `config` carry the
//! process-wide settings.

pub mod config;
pub mod guard;
pub mod routes;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod test_helpers;
