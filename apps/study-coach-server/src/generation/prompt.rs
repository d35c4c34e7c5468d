//! Prompt construction

/// Flashcards and quiz questions requested per generation
pub const EXPECTED_ITEMS: usize = 6;

const INSTRUCTIONS: &str = r#"
You are an AI study assistant. Convert the notes below into structured study material.

RULES:
- Respond ONLY in VALID JSON.
- NO markdown.
- NO backticks.
- EXACTLY 6 flashcards and EXACTLY 6 quiz questions.
- Each quiz must have 4 options and only ONE correct answer.

OUTPUT FORMAT (follow EXACTLY):
"#;

const FLASHCARD_SHAPE: &str = r#"    { "question": "?", "answer": "?" }"#;

const QUIZ_SHAPE: &str = r#"    {
      "question": "?",
      "options": ["A", "B", "C", "D"],
      "answer": "One option exactly as written"
    }"#;

/// Full prompt for `notes`
pub fn build_prompt(notes: &str) -> String {
    let flashcards = vec![FLASHCARD_SHAPE; EXPECTED_ITEMS].join(",\n");
    let quiz = vec![QUIZ_SHAPE; EXPECTED_ITEMS].join(",\n");

    format!(
        "{INSTRUCTIONS}\n{{\n  \"flashcards\": [\n{flashcards}\n  ],\n  \"quiz\": [\n{quiz}\n  ]\n}}\n\nNOTES:\n{notes}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_contains_rules_and_notes() {
        let prompt = build_prompt("Mitochondria are the powerhouse of the cell.");

        assert!(prompt.contains("Respond ONLY in VALID JSON."));
        assert!(prompt.contains("EXACTLY 6 flashcards"));
        assert!(prompt.ends_with("NOTES:\nMitochondria are the powerhouse of the cell.\n"));
    }

    #[test]
    fn test_prompt_shows_six_of_each() {
        let prompt = build_prompt("");

        assert_eq!(prompt.matches(r#"{ "question": "?", "answer": "?" }"#).count(), 6);
        assert_eq!(prompt.matches("One option exactly as written").count(), 6);
    }
}
