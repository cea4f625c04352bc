pub mod db;
pub mod migrations;

pub use db::{init_db, init_test_db, Error, Result, DB};
