mod handlers;
mod model;
mod routes;

pub use model::{CreateNoteParameters, Note};
pub use routes::router;
