pub mod app;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;
