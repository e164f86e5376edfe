//! SQLite backend for the match tracker.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
