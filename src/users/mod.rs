use uuid::Uuid;

pub type UserId = Uuid;

pub mod store;
