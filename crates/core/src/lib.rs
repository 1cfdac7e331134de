#![forbid(unsafe_code)]

pub mod count;
pub mod error;
pub mod model;

pub use error::QuizModelError;
