// Gatehouse API Library
//
// HTML handlers, form models, page rendering and route configuration for
// the Gatehouse web app.

pub mod error;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod response;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::configure_routes;
pub use state::AppContext;
