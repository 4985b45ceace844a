//! Browser shell for the demo: one text field, one audio player.

mod page;
mod routes;

pub use routes::{WebState, create_router, serve};
