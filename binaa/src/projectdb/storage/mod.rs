mod config;
mod postgres;
mod rows;
mod sqlite;
mod store_type;

pub use store_type::ProjectStore;
