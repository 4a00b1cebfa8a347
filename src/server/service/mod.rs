//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Business Logic**: Implementing core business rules and validation
//! - **Orchestration**: Coordinating multiple repository calls inside one transaction
//! - **Caching**: Reading through and invalidating the shared application cache
//! - **Domain Models**: Working with domain models rather than DTOs or entity models

pub mod activity;
pub mod admin;
pub mod category;
pub mod recommendation;
pub mod schedule;
pub mod user;

#[cfg(test)]
mod test;
