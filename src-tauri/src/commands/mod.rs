//! Commands Layer
//!
//! Tauri command handlers that bridge the front end to the REST API.

mod list_cmd;
mod payment_cmd;
mod session_cmd;
mod support_cmd;

pub use list_cmd::*;
pub use payment_cmd::*;
pub use session_cmd::*;
pub use support_cmd::*;
