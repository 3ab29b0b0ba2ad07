use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::db::models::{ContactUpdate, EmergencyContact, NewContact, NewUser, ProfileUpdate, User};
use crate::error::{AppError, DatabaseError};

const USER_COLUMNS: &str =
    "id, email, username, password_hash, full_name, phone, address, created_at";
const CONTACT_COLUMNS: &str = "id, user_id, name, relationship, phone, email";

#[derive(Clone)]
pub struct DbOperations {
    pool: Arc<PgPool>,
}

impl DbOperations {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    pub async fn new_with_options(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    pub fn pool(&self) -> &PgPool {
        self.pool.as_ref()
    }

    /// Insert a new user. Uniqueness of email and username is enforced by
    /// the unique indexes; violations surface as DuplicateEmail /
    /// DuplicateUsername and leave no row behind.
    pub async fn create_user(&self, new_user: &NewUser) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (email, username, password_hash, full_name, phone, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&new_user.email)
        .bind(&new_user.username)
        .bind(&new_user.password_hash)
        .bind(&new_user.full_name)
        .bind(&new_user.phone)
        .bind(&new_user.address)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(user)
    }

    /// Partial profile update: fields left out of the payload keep their
    /// stored values.
    pub async fn update_user_profile(
        &self,
        id: i64,
        update: &ProfileUpdate,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET full_name = COALESCE($2, full_name),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address)
            WHERE id = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&update.full_name)
        .bind(&update.phone)
        .bind(&update.address)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

        Ok(user)
    }

    pub async fn create_contact(
        &self,
        user_id: i64,
        contact: &NewContact,
    ) -> Result<EmergencyContact, AppError> {
        let contact = sqlx::query_as::<_, EmergencyContact>(&format!(
            r#"
            INSERT INTO emergency_contacts (user_id, name, relationship, phone, email)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(&contact.name)
        .bind(&contact.relationship)
        .bind(&contact.phone)
        .bind(&contact.email)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(contact)
    }

    /// Contacts in insertion order.
    pub async fn list_contacts(&self, user_id: i64) -> Result<Vec<EmergencyContact>, AppError> {
        let contacts = sqlx::query_as::<_, EmergencyContact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM emergency_contacts WHERE user_id = $1 ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(contacts)
    }

    /// Lookup scoped by owner: a contact belonging to another user is
    /// indistinguishable from a missing one.
    pub async fn get_contact(
        &self,
        contact_id: i64,
        user_id: i64,
    ) -> Result<Option<EmergencyContact>, AppError> {
        let contact = sqlx::query_as::<_, EmergencyContact>(&format!(
            "SELECT {CONTACT_COLUMNS} FROM emergency_contacts WHERE id = $1 AND user_id = $2"
        ))
        .bind(contact_id)
        .bind(user_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(contact)
    }

    pub async fn update_contact(
        &self,
        contact_id: i64,
        user_id: i64,
        update: &ContactUpdate,
    ) -> Result<EmergencyContact, AppError> {
        let contact = sqlx::query_as::<_, EmergencyContact>(&format!(
            r#"
            UPDATE emergency_contacts
            SET name = COALESCE($3, name),
                relationship = COALESCE($4, relationship),
                phone = COALESCE($5, phone),
                email = COALESCE($6, email)
            WHERE id = $1 AND user_id = $2
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(contact_id)
        .bind(user_id)
        .bind(&update.name)
        .bind(&update.relationship)
        .bind(&update.phone)
        .bind(&update.email)
        .fetch_optional(self.pool.as_ref())
        .await?
        .ok_or(AppError::DatabaseError(DatabaseError::NotFound))?;

        Ok(contact)
    }

    pub async fn delete_contact(&self, contact_id: i64, user_id: i64) -> Result<(), AppError> {
        let result = sqlx::query(
            "DELETE FROM emergency_contacts WHERE id = $1 AND user_id = $2",
        )
        .bind(contact_id)
        .bind(user_id)
        .execute(self.pool.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::DatabaseError(DatabaseError::NotFound));
        }

        Ok(())
    }
}
