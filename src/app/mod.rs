// Application layer: transport-facing entry points over the core.

pub mod handler;

pub use handler::{error_response, handle_add_accounts};
