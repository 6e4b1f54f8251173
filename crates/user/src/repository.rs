use sea_query::{Expr, ExprTrait, Func, LikeExpr, Order, Query, SelectStatement, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::{SqlitePool, prelude::FromRow};

use userdesk_db::table::User;
use userdesk_shared::user::{Role, State};
use userdesk_shared::{fold_name, initial_key};

use crate::store::{UpdateInput, UserRecord, UserStore};

/// Production [`UserStore`] over a sqlite pool.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn select() -> SelectStatement {
        Query::select()
            .columns([
                User::Id,
                User::Email,
                User::Name,
                User::NameFolded,
                User::Initials,
                User::Role,
                User::State,
                User::Password,
                User::CreatedAt,
            ])
            .from(User::Table)
            .to_owned()
    }

    async fn fetch_all(
        &self,
        statement: &SelectStatement,
    ) -> userdesk_shared::Result<Vec<UserRecord>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn fetch_optional(
        &self,
        statement: &SelectStatement,
    ) -> userdesk_shared::Result<Option<UserRecord>> {
        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, UserRow, _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Into::into))
    }
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: Option<String>,
    name_folded: Option<String>,
    initials: Option<String>,
    role: sqlx::types::Text<Role>,
    state: sqlx::types::Text<State>,
    password: String,
    created_at: i64,
}

impl From<UserRow> for UserRecord {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            email: row.email,
            name: row.name,
            name_folded: row.name_folded,
            initials: row.initials,
            role: row.role.0,
            state: row.state.0,
            password: row.password,
            created_at: row.created_at,
        }
    }
}

fn escape_like(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[async_trait::async_trait]
impl UserStore for SqliteStore {
    async fn find_by_id(&self, id: &str) -> userdesk_shared::Result<Option<UserRecord>> {
        let statement = Self::select()
            .and_where(Expr::col(User::Id).eq(id))
            .limit(1)
            .to_owned();

        self.fetch_optional(&statement).await
    }

    async fn find_by_email(&self, email: &str) -> userdesk_shared::Result<Option<UserRecord>> {
        let statement = Self::select()
            .and_where(Expr::col(User::Email).eq(email))
            .limit(1)
            .to_owned();

        self.fetch_optional(&statement).await
    }

    async fn exists_with_role(&self, role: Role) -> userdesk_shared::Result<bool> {
        let statement = Query::select()
            .column(User::Id)
            .from(User::Table)
            .and_where(Expr::col(User::Role).eq(role.to_string()))
            .limit(1)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let row = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }

    async fn count_active(
        &self,
        roles: &[Role],
        excluding_id: &str,
    ) -> userdesk_shared::Result<u64> {
        let statement = Query::select()
            .expr(Func::count(Expr::col(User::Id)))
            .from(User::Table)
            .and_where(Expr::col(User::State).eq(State::Active.to_string()))
            .and_where(Expr::col(User::Role).is_in(roles.iter().map(|role| role.to_string())))
            .and_where(Expr::col(User::Id).ne(excluding_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.pool)
            .await?;

        Ok(count as u64)
    }

    async fn insert(&self, user: &UserRecord) -> userdesk_shared::Result<()> {
        let statement = Query::insert()
            .into_table(User::Table)
            .columns([
                User::Id,
                User::Email,
                User::Name,
                User::NameFolded,
                User::Initials,
                User::Role,
                User::State,
                User::Password,
                User::CreatedAt,
            ])
            .values_panic([
                user.id.to_owned().into(),
                user.email.to_owned().into(),
                user.name.to_owned().into(),
                user.name_folded.to_owned().into(),
                user.initials.to_owned().into(),
                user.role.to_string().into(),
                user.state.to_string().into(),
                user.password.to_owned().into(),
                user.created_at.into(),
            ])
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn update(&self, input: UpdateInput) -> userdesk_shared::Result<()> {
        let mut statement = Query::update()
            .table(User::Table)
            .and_where(Expr::col(User::Id).eq(input.id))
            .to_owned();

        if let Some(name) = input.name {
            statement.value(User::NameFolded, fold_name(&name));
            statement.value(User::Initials, initial_key(&name));
            statement.value(User::Name, name);
        }

        if let Some(password) = input.password {
            statement.value(User::Password, password);
        }

        if let Some(role) = input.role {
            statement.value(User::Role, role.as_ref());
        }

        if let Some(state) = input.state {
            statement.value(User::State, state.as_ref());
        }

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        sqlx::query_with(&sql, values).execute(&self.pool).await?;

        Ok(())
    }

    async fn find_by_email_prefix(
        &self,
        prefix: &str,
        limit: u64,
    ) -> userdesk_shared::Result<Vec<UserRecord>> {
        let pattern = format!("{}%", escape_like(prefix));
        let statement = Self::select()
            .and_where(Expr::col(User::Email).like(LikeExpr::new(pattern).escape('\\')))
            .order_by(User::Email, Order::Asc)
            .limit(limit)
            .to_owned();

        self.fetch_all(&statement).await
    }

    async fn list_recent(&self, limit: u64) -> userdesk_shared::Result<Vec<UserRecord>> {
        let statement = Self::select()
            .order_by(User::CreatedAt, Order::Desc)
            .order_by(User::Id, Order::Desc)
            .limit(limit)
            .to_owned();

        self.fetch_all(&statement).await
    }

    async fn list_by_name(&self, limit: u64) -> userdesk_shared::Result<Vec<UserRecord>> {
        let statement = Self::select()
            .order_by_expr(
                Func::coalesce::<[Expr; 2], _>([
                    Expr::col(User::NameFolded).into(),
                    Expr::col(User::Email).into(),
                ])
                .into(),
                Order::Asc,
            )
            .limit(limit)
            .to_owned();

        self.fetch_all(&statement).await
    }
}
