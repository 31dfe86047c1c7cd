pub mod db;
mod faqs;
mod tables;

pub use db::{Database, DatabaseError};
pub use tables::*;
