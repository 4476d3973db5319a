//! Returns Desk HTTP API: library crate.
//!
//! Exposes the resolver over REST so the binary (`main.rs`) and
//! `rd-e2e-tests` can build the router against any `AppState`.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
