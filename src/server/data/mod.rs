//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. Every repository is
//! generic over `ConnectionTrait`, so the same code runs against the pool or inside an
//! open transaction.

pub mod activity;
pub mod category;
pub mod preference;
pub mod recommendation;
pub mod registration;
pub mod schedule;
pub mod user;
