//! Application layer orchestrating domain logic behind the storage port.

pub mod services;
