//! User persistence adapters.
//!
//! [`DieselUserRepository`] stores users in PostgreSQL through `diesel-async`
//! and a `bb8` pool; [`InMemoryUserRepository`] keeps them in process memory
//! when no database URL is configured. Diesel row structs and the schema are
//! internal and never reach the domain.
//!
//! # Example
//!
//! ```no_run
//! use authgate::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/authgate")).await?;
//! let repo = DieselUserRepository::new(pool);
//! # let _ = repo;
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod in_memory_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use in_memory_user_repository::InMemoryUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
