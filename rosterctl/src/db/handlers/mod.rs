//! Repository implementations for database access.
//!
//! Each repository wraps a SQLx connection or transaction, provides
//! strongly-typed CRUD operations, and returns records from
//! [`crate::db::models`]. The common pattern:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut repo = Employees::new(&mut tx);
//! let employee = repo.create(&request).await?;
//! tx.commit().await?;
//! ```
//!
//! The [`Employees`] repository additionally carries the aggregate queries
//! (distinct departments, average salary, bounded top-N rankings).

pub mod employees;
pub mod members;
pub mod repository;
pub mod teams;

pub use employees::Employees;
pub use members::Members;
pub use repository::Repository;
pub use teams::Teams;
