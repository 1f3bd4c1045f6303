//! Domain layer for Skillcheck
//!
//! Architecture: Domain Model - Pure business logic for skill document validation
//! - Contains the core value objects: severity, issues, and the validation result
//! - Independent of infrastructure concerns like file systems or output formats
//! - Expresses the ubiquitous language of skill schema validation

pub mod issues;

// Re-export main domain types for convenience
pub use issues::*;
