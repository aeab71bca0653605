use std::sync::LazyLock;

use crate::storage::DB_TABLE_PREFIX;

pub(crate) static DB_TABLE_USERS: LazyLock<String> =
    LazyLock::new(|| format!("{}{}", *DB_TABLE_PREFIX, "users"));
