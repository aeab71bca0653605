mod cache_store;
mod data_store;
mod errors;
mod schema_validation;
mod tag_cache;
mod types;

/// Forces both global stores to initialize so misconfiguration surfaces at startup
pub(crate) async fn init() {
    let _ = &*cache_store::GENERIC_CACHE_STORE;
    let _ = &*data_store::GENERIC_DATA_STORE;
}

pub(crate) use data_store::{DB_TABLE_PREFIX, GENERIC_DATA_STORE};
pub(crate) use schema_validation::{validate_postgres_table_schema, validate_sqlite_table_schema};
pub(crate) use tag_cache::{get_or_fetch, invalidate_tag};
