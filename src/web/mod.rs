//! Web layer for QABOARD.
//!
//! Server-rendered HTML pages for browsing and posting, plus a small
//! read-only JSON API under `/api`.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;
pub mod templates;

pub use error::{ApiError, PageError};
pub use handlers::AppState;
pub use router::{create_app, create_router};
pub use server::WebServer;
pub use templates::Templates;
