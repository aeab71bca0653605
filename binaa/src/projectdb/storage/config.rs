use std::sync::LazyLock;

use crate::storage::DB_TABLE_PREFIX;

pub(crate) static DB_TABLE_PROJECTS: LazyLock<String> =
    LazyLock::new(|| format!("{}{}", *DB_TABLE_PREFIX, "projects"));

pub(crate) static DB_TABLE_MILESTONES: LazyLock<String> =
    LazyLock::new(|| format!("{}{}", *DB_TABLE_PREFIX, "milestones"));
