mod user_create_created_at_idx;
mod user_create_email_idx;
mod user_create_role_state_idx;
mod user_create_table;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "main",
    "m0001",
    vec_box![],
    vec_box![
        user_create_table::Operation,
        user_create_email_idx::Operation,
        user_create_role_state_idx::Operation,
        user_create_created_at_idx::Operation
    ]
);
