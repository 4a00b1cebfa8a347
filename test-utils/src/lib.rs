//! Campus Activity Test Utils
//!
//! Provides shared testing utilities for building integration and unit tests for the campus
//! activity server. This crate offers a builder pattern for creating test contexts with
//! in-memory SQLite databases and customizable table schemas.
//!
//! # Overview
//!
//! The test utilities consist of four main components:
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing database connection and session
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Builders that insert entities with sensible defaults
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::{builder::TestBuilder, factory};
//!
//! #[tokio::test]
//! async fn registers_student() -> Result<(), sea_orm::DbErr> {
//!     let test = TestBuilder::new().with_activity_tables().build().await.unwrap();
//!     let db = test.db.as_ref().unwrap();
//!
//!     let student = factory::user::create_user(db).await?;
//!     let activity = factory::helpers::create_activity_with_dependencies(db).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
