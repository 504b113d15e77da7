//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (Transaction, Category)
//! - Domain value objects (Cents, TransactionDate, Merchant, PageSize)
//! - Domain services (cursor signing)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
