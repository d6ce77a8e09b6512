//! formcraft Validation Core
//!
//! Pure value predicates shared by the validation engine. Nothing in here
//! knows about fields, labels or schemas; callers decide which predicate
//! applies and how a failure is worded.

pub mod email;
pub mod file;
pub mod password;
pub mod phone;
pub mod string;

// Re-export all validators
pub use email::*;
pub use file::*;
pub use password::*;
pub use phone::*;
pub use string::*;
