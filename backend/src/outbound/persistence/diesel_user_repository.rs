//! PostgreSQL-backed `UserRepository` adapter.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{
    EmailAddress, FullName, NewUser, PasswordHash, Role, User, UserId, UserValidationError,
};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Repository over `pool`.
    #[must_use]
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to user persistence errors.
///
/// Unique violations on insert can only come from the email index.
fn map_diesel_error(error: diesel::result::Error, email: Option<&str>) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => UserPersistenceError::query("record not found"),
        DieselError::QueryBuilderError(_) => UserPersistenceError::query("database query error"),
        DieselError::DatabaseError(kind, _) => match (kind, email) {
            (DatabaseErrorKind::UniqueViolation, Some(email)) => {
                UserPersistenceError::duplicate_email(email)
            }
            (DatabaseErrorKind::ClosedConnection, _) => {
                UserPersistenceError::connection("database connection error")
            }
            _ => UserPersistenceError::query("database error"),
        },
        _ => UserPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain [`User`].
fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let corrupt = |err: UserValidationError| {
        UserPersistenceError::query(format!("corrupted user row: {err}"))
    };
    let full_name = FullName::new(&row.full_name).map_err(corrupt)?;
    let email = EmailAddress::new(&row.email).map_err(corrupt)?;
    let role: Role = row.role.parse().map_err(corrupt)?;

    Ok(User::from_new(
        UserId::from(row.id),
        NewUser {
            full_name,
            email,
            password_hash: PasswordHash::from_encoded(row.password_hash),
            role,
        },
        row.created_at,
    ))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn save(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id = UserId::random();
        let row = NewUserRow {
            id: *id.as_uuid(),
            full_name: user.full_name.as_ref(),
            email: user.email.as_ref(),
            password_hash: user.password_hash.expose(),
            role: user.role.as_str(),
        };

        let created_at = diesel::insert_into(users::table)
            .values(&row)
            .returning(users::created_at)
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(user.email.as_ref())))?;

        Ok(User::from_new(id, user, created_at))
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_ref()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;

        row.map(row_to_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;

        let users = rows
            .into_iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = users.len(), "loaded users");
        Ok(users)
    }
}
