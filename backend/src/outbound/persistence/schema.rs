//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` carries a unique index and is always stored lower-cased.
    users (id) {
        id -> Uuid,
        /// Full name as entered on signup (max 100 characters).
        full_name -> Varchar,
        /// Login identifier (max 254 characters).
        email -> Varchar,
        /// Encoded Argon2id PHC string.
        password_hash -> Text,
        /// `user` or `admin`.
        role -> Varchar,
        created_at -> Timestamptz,
        /// Last modification timestamp (auto-updated by trigger).
        updated_at -> Timestamptz,
    }
}
