use sea_query::{Index, IndexCreateStatement, IndexDropStatement};

use crate::table::User;

pub struct Operation;

// Backs the active-privileged-count aggregate behind the last-admin guard.
fn up_statement() -> IndexCreateStatement {
    Index::create()
        .name("idx_user_role_state")
        .table(User::Table)
        .col(User::Role)
        .col(User::State)
        .to_owned()
}

fn down_statement() -> IndexDropStatement {
    Index::drop()
        .name("idx_user_role_state")
        .table(User::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for Operation {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = up_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = down_statement().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
