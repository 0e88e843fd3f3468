use alloc::string::String;
use serde::{Deserialize, Serialize};

/// A stored trivia question. Immutable once inserted.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    /// Dangling references are treated as uncategorized.
    pub category: Option<i32>,
    pub difficulty: Option<i32>,
}

/// Acceptable schema for new questions. The text fields are optional here so
/// that their absence is reported as a validation failure rather than a
/// syntax error.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct NewQuestion {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "crate::de::optional_int")]
    pub category: Option<i32>,
    #[serde(default, deserialize_with = "crate::de::optional_int")]
    pub difficulty: Option<i32>,
}

impl NewQuestion {
    /// Returns the trimmed question and answer if both are present and non-empty.
    pub fn texts(&self) -> Option<(&str, &str)> {
        let question = self.question.as_deref().map(str::trim).filter(|text| !text.is_empty())?;
        let answer = self.answer.as_deref().map(str::trim).filter(|text| !text.is_empty())?;
        Some((question, answer))
    }
}

/// Body of a search request.
#[derive(Debug, Default, Deserialize)]
pub struct Search {
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl Search {
    /// The search term, unless it is absent or blank.
    pub fn term(&self) -> Option<&str> {
        self.search_term.as_deref().filter(|term| !term.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::{NewQuestion, Search};

    #[test]
    fn accepts_numeric_strings_for_integers() {
        let new: NewQuestion =
            serde_json::from_str(r#"{"question":"Q","answer":"A","category":"3","difficulty":2}"#).unwrap();
        assert_eq!(new.category, Some(3));
        assert_eq!(new.difficulty, Some(2));
        assert_eq!(new.texts(), Some(("Q", "A")));
    }

    #[test]
    fn missing_text_is_not_a_syntax_error() {
        let new: NewQuestion = serde_json::from_str(r#"{"question":"When was Galileo born"}"#).unwrap();
        assert!(new.answer.is_none());
        assert!(new.texts().is_none());
    }

    #[test]
    fn blank_text_is_rejected() {
        let new: NewQuestion = serde_json::from_str(r#"{"question":"  ","answer":"x"}"#).unwrap();
        assert!(new.texts().is_none());
    }

    #[test]
    fn blank_search_term_is_absent() {
        let search: Search = serde_json::from_str(r#"{"searchTerm":"   "}"#).unwrap();
        assert!(search.term().is_none());
        let search: Search = serde_json::from_str("{}").unwrap();
        assert!(search.term().is_none());
        let search: Search = serde_json::from_str(r#"{"searchTerm":"title"}"#).unwrap();
        assert_eq!(search.term(), Some("title"));
    }
}
