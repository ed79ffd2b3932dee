//! HTTP surface of the driver pay engine.
//!
//! The wire types in [`request`] and [`response`] are shared by the axum
//! handlers serving the API and by the remote store client consuming it.

mod handlers;
pub mod request;
pub mod response;
mod state;

pub use handlers::{create_router, ACCOUNT_ID_HEADER};
pub use state::AppState;
