//! Data module - student persistence and roster import/export

mod models;
mod roster;
mod store;

pub use models::{NewStudent, Student};
pub use roster::{read_csv, write_csv, write_json};
pub use store::{StoreError, StudentStore};
