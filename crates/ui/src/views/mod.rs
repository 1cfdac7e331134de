mod quiz;

#[cfg(test)]
mod view_smoke;

pub use quiz::{QuizPanel, QuizView};
