//! SQLite-backed repository implementations.
//!
//! ## Database setup
//!
//! [`Database`] wraps a `sqlx::SqlitePool` configured with:
//! - **WAL mode**: one writer and concurrent readers.
//! - **Embedded migrations**: `sqlx::migrate!` runs `migrations/001_initial_schema.sql`
//!   when [`Database::open`] is called. The schema is idempotent.
//!
//! Connections are checked out of the pool per statement and returned on
//! every path, including decode and constraint errors.
//!
//! ## Repository types
//!
//! Each `Sqlite*Repository` holds a `SqlitePool` and implements the
//! corresponding trait from [`crate::persistence::traits`]:
//!
//! | Type | Trait | Table |
//! |------|-------|-------|
//! | [`SqliteWotdRepository`] | `WotdRepository` | `wotd` |
//! | [`SqliteDictionaryRepository`] | `DictionaryRepository` | `dictionary` |
//!
//! Dates are stored as `YYYY-MM-DD` text through sqlx's `chrono` support.
//! Every statement binds its values; nothing user-supplied is spliced into SQL.

mod database;
mod dictionary_repo;
mod wotd_repo;

pub use database::Database;
pub use dictionary_repo::SqliteDictionaryRepository;
pub use wotd_repo::SqliteWotdRepository;
