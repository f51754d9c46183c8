//! # vidhub-database
//!
//! PostgreSQL connection management, migrations, and the repositories for
//! every VidHub entity. Joined listings (owner projections, like and
//! subscriber counters) are computed in SQL by the repositories.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
