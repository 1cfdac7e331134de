use crate::error::QuizModelError;
use crate::model::OptionLabel;

pub const MIN_OPTIONS: usize = 2;
/// One option per label, `A` through `Z`.
pub const MAX_OPTIONS: usize = 26;

/// A single multiple-choice question as received from the question service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    prompt: String,
    options: Vec<String>,
}

impl Question {
    /// Build a question that can be rendered as one choice group.
    ///
    /// Prompt and option text are kept as received, blank or not.
    ///
    /// # Errors
    ///
    /// Returns `QuizModelError` if the option count is outside
    /// `MIN_OPTIONS..=MAX_OPTIONS`.
    pub fn new(prompt: impl Into<String>, options: Vec<String>) -> Result<Self, QuizModelError> {
        let prompt = prompt.into();
        if options.len() < MIN_OPTIONS {
            return Err(QuizModelError::TooFewOptions {
                count: options.len(),
                min: MIN_OPTIONS,
            });
        }
        if options.len() > MAX_OPTIONS {
            return Err(QuizModelError::TooManyOptions {
                count: options.len(),
                max: MAX_OPTIONS,
            });
        }

        Ok(Self { prompt, options })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Options paired with their positional labels.
    pub fn labeled_options(&self) -> impl Iterator<Item = (OptionLabel, &str)> {
        self.options
            .iter()
            .enumerate()
            .filter_map(|(idx, text)| OptionLabel::from_index(idx).map(|l| (l, text.as_str())))
    }

    #[must_use]
    pub fn has_label(&self, label: OptionLabel) -> bool {
        label.index() < self.options.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn rejects_bad_option_counts() {
        assert_eq!(
            Question::new("Q", opts(&["only"])),
            Err(QuizModelError::TooFewOptions { count: 1, min: 2 })
        );
        let past_z: Vec<String> = (0..=MAX_OPTIONS).map(|i| format!("opt {i}")).collect();
        assert_eq!(
            Question::new("Q", past_z),
            Err(QuizModelError::TooManyOptions { count: 27, max: 26 })
        );
    }

    #[test]
    fn keeps_long_option_lists_up_to_z() {
        let seven = opts(&["a", "b", "c", "d", "e", "f", "g"]);
        let question = Question::new("Q", seven).unwrap();
        assert_eq!(question.labeled_options().last().map(|(l, _)| l.as_char()), Some('G'));

        let all: Vec<String> = (0..MAX_OPTIONS).map(|i| format!("opt {i}")).collect();
        let question = Question::new("Q", all).unwrap();
        assert_eq!(question.labeled_options().count(), 26);
        assert_eq!(question.labeled_options().last().map(|(l, _)| l.as_char()), Some('Z'));
    }

    #[test]
    fn keeps_blank_prompt_and_option_text() {
        let question = Question::new("  ", opts(&["a", ""])).unwrap();
        assert_eq!(question.prompt(), "  ");
        assert_eq!(question.options()[1], "");
        assert!(question.has_label(OptionLabel::from_index(1).unwrap()));
    }

    #[test]
    fn labels_ignore_option_text() {
        let question = Question::new("Capital?", opts(&["C. Rome", "A. Paris", "Berlin"])).unwrap();
        let labels: Vec<char> = question.labeled_options().map(|(l, _)| l.as_char()).collect();
        assert_eq!(labels, vec!['A', 'B', 'C']);
        assert!(question.has_label(OptionLabel::from_index(2).unwrap()));
        assert!(!question.has_label(OptionLabel::from_index(3).unwrap()));
    }
}
