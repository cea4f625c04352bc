pub mod app;
pub mod auth;
pub mod db;
pub mod notes;
pub mod shared;
pub mod users;

pub use app::{
    config, create_app, ctx,
    errors::{self, Error, Result},
    state,
};
pub use app::state::AppState;
pub use shared::views;
