//! # switchifier
//!
//! Records and reports the open/closed state of a physical switch.
//!
//! A single authorized writer (the sensor bridge) posts observations; only
//! observations that change the state are persisted, each stamped with its
//! time and the interval since the previous observation. Anyone may poll
//! the latest state.
//!
//! ## Architecture
//!
//! ```text
//! Clients (sensor bridge, status pollers)
//!     │
//!     ├── HTTP Handlers (api/)
//!     │
//!     ├── StateRecorder (service/)
//!     ├── value parsing, secret, clock (domain/)
//!     │
//!     └── SQLite state-change log (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
