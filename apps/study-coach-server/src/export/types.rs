//! Export request and record types
//!
//! Wire shapes accepted by the export endpoints. Every field is optional on
//! the wire: a missing or `null` value becomes the empty default and unknown
//! fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

/// A single flashcard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlashcardRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(deserialize_with = "null_as_default")]
    pub answer: String,
}

/// A single multiple-choice quiz question
///
/// `answer` is expected to match one of `options` verbatim; the renderer
/// prints it as given either way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(deserialize_with = "null_as_default")]
    pub options: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub answer: String,
}

/// Body of `POST /export_flashcards_pdf`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FlashcardsExportRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub flashcards: Vec<FlashcardRecord>,
}

/// Body of `POST /export_quiz_pdf`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuizExportRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub quiz: Vec<QuizRecord>,
}

/// Renderer input: a title plus records of a single kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportRequest<R> {
    pub title: String,
    pub records: Vec<R>,
}

impl From<FlashcardsExportRequest> for ExportRequest<FlashcardRecord> {
    fn from(request: FlashcardsExportRequest) -> Self {
        Self {
            title: request.title,
            records: request.flashcards,
        }
    }
}

impl From<QuizExportRequest> for ExportRequest<QuizRecord> {
    fn from(request: QuizExportRequest) -> Self {
        Self {
            title: request.title,
            records: request.quiz,
        }
    }
}

/// Which document is being produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Flashcards,
    Quiz,
}

impl ExportKind {
    /// Section label printed under the title
    pub fn section_label(self) -> &'static str {
        match self {
            Self::Flashcards => "Flashcards",
            Self::Quiz => "Quiz",
        }
    }

    /// Suggested download file name
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Flashcards => "flashcards.pdf",
            Self::Quiz => "quiz.pdf",
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_null_fields_default_to_empty() {
        let request: FlashcardsExportRequest =
            serde_json::from_str(r#"{"flashcards": [{"question": null}, {}]}"#).unwrap();

        assert_eq!(request.title, "");
        assert_eq!(request.flashcards.len(), 2);
        assert_eq!(request.flashcards[0], FlashcardRecord::default());
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let request: QuizExportRequest = serde_json::from_str(
            r#"{"title": "T", "extra": 1, "quiz": [{"question": "Q", "options": ["a"], "answer": "a", "hint": "x"}]}"#,
        )
        .unwrap();

        assert_eq!(request.title, "T");
        assert_eq!(request.quiz[0].options, vec!["a"]);
    }

    #[test]
    fn test_request_conversion_keeps_order() {
        let request = QuizExportRequest {
            title: "Order".to_string(),
            quiz: vec![
                QuizRecord {
                    question: "first".to_string(),
                    ..Default::default()
                },
                QuizRecord {
                    question: "second".to_string(),
                    ..Default::default()
                },
            ],
        };

        let converted: ExportRequest<QuizRecord> = request.into();
        assert_eq!(converted.records[0].question, "first");
        assert_eq!(converted.records[1].question, "second");
    }

    #[test]
    fn test_kind_labels() {
        assert_eq!(ExportKind::Flashcards.section_label(), "Flashcards");
        assert_eq!(ExportKind::Quiz.file_name(), "quiz.pdf");
    }
}
