//! Infrastructure layer implementing domain-defined contracts.

pub mod persistence;
