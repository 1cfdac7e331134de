use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::model::OptionLabel;

/// Answers for one submission, dense over question indices.
///
/// Built from the current selection state at submit time. Unanswered questions
/// are kept as `None` and serialize to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSet {
    answers: Vec<Option<OptionLabel>>,
}

impl AnswerSet {
    #[must_use]
    pub fn from_selections(selections: &[Option<OptionLabel>]) -> Self {
        Self {
            answers: selections.to_vec(),
        }
    }

    /// An answer set with every question unanswered.
    #[must_use]
    pub fn unanswered(len: usize) -> Self {
        Self {
            answers: vec![None; len],
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<OptionLabel> {
        self.answers.get(index).copied().flatten()
    }

    /// Wire form of a single answer: the label letter, or `""` when unanswered.
    #[must_use]
    pub fn answer_str(&self, index: usize) -> String {
        self.get(index).map(|l| l.to_string()).unwrap_or_default()
    }

    /// Indices of questions without a selection.
    #[must_use]
    pub fn unanswered_indices(&self) -> Vec<usize> {
        self.answers
            .iter()
            .enumerate()
            .filter_map(|(idx, answer)| answer.is_none().then_some(idx))
            .collect()
    }

    #[must_use]
    pub fn is_cleared(&self) -> bool {
        self.answers.iter().all(Option::is_none)
    }
}

impl Serialize for AnswerSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.answers.len()))?;
        for idx in 0..self.answers.len() {
            map.serialize_entry(&idx.to_string(), &self.answer_str(idx))?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_index_keyed_map_with_empty_for_unanswered() {
        let set = AnswerSet::from_selections(&[OptionLabel::from_index(0), None]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json, serde_json::json!({ "0": "A", "1": "" }));
        assert_eq!(set.unanswered_indices(), vec![1]);
        assert!(!set.is_cleared());
    }

    #[test]
    fn unanswered_set_is_cleared() {
        let set = AnswerSet::unanswered(3);
        assert_eq!(set.len(), 3);
        assert!(set.is_cleared());
        assert_eq!(set.answer_str(2), "");
    }
}
