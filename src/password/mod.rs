//! Password strength scoring and random password generation.

pub mod generator;
pub mod strength;

pub use generator::{PasswordOptions, generate_password};
pub use strength::{PasswordStrengthReport, StrengthLevel, evaluate_password_strength};
