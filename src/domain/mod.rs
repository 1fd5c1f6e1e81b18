//! Domain layer: switch-state vocabulary shared by the recorder and the API.
//!
//! This module contains the parsing rules for observed switch values, the
//! shared secret guarding the update path, the time source used to stamp
//! state changes, and the read-side view of the latest recorded state.

pub mod clock;
pub mod shared_secret;
pub mod switch_status;
pub mod switch_value;

pub use clock::{Clock, SystemClock};
pub use shared_secret::SharedSecret;
pub use switch_status::SwitchStatus;
pub use switch_value::parse_switch_value;
