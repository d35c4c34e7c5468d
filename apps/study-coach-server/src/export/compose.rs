//! Document assembly
//!
//! Turns a title and a sequence of records into pages: header first, then
//! each record's lines in input order.

use super::layout::{FontSpec, LayoutState, Page, PageGeometry, Paginator};
use super::types::{ExportKind, ExportRequest, FlashcardRecord, QuizRecord};

/// Gap between the title and the section label
const TITLE_GAP: f64 = 20.0;
/// Gap between the section label and the first record
const SECTION_GAP: f64 = 15.0;

/// A record that knows how to lay itself out as plain lines
pub trait ExportRecord {
    /// Document kind this record belongs to
    const KIND: ExportKind;

    /// Lines for the record at 1-based `position`, trailing blank separator included
    fn layout_lines(&self, position: usize) -> Vec<String>;
}

impl ExportRecord for FlashcardRecord {
    const KIND: ExportKind = ExportKind::Flashcards;

    fn layout_lines(&self, position: usize) -> Vec<String> {
        vec![
            format!("Q{}: {}", position, self.question),
            format!("A{}: {}", position, self.answer),
            String::new(),
        ]
    }
}

impl ExportRecord for QuizRecord {
    const KIND: ExportKind = ExportKind::Quiz;

    fn layout_lines(&self, position: usize) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.options.len() + 3);
        lines.push(format!("{}. {}", position, self.question));
        for (index, option) in self.options.iter().enumerate() {
            lines.push(format!("   {}) {}", option_label(index), option));
        }
        lines.push(format!("   Correct Answer: {}", self.answer));
        lines.push(String::new());
        lines
    }
}

/// Label for the option at 0-based `index`: `A`..`Z`, then the 1-based number
pub fn option_label(index: usize) -> String {
    match u8::try_from(index) {
        Ok(offset) if offset < 26 => char::from(b'A' + offset).to_string(),
        _ => (index + 1).to_string(),
    }
}

/// Lay out a full document
pub fn compose<R: ExportRecord>(request: &ExportRequest<R>, geometry: PageGeometry) -> Vec<Page> {
    let mut paginator = Paginator::new(geometry);
    let mut state = header(&request.title, R::KIND, paginator.geometry());

    for (index, record) in request.records.iter().enumerate() {
        for line in record.layout_lines(index + 1) {
            state = paginator.emit_line(state, &line);
        }
    }

    paginator.finish(state)
}

/// Title and section label on the first page, leaving the body font active
fn header(title: &str, kind: ExportKind, geometry: &PageGeometry) -> LayoutState {
    LayoutState::new_page(geometry, 0)
        .with_font(FontSpec::TITLE)
        .place(geometry, format!("Topic: {}", title))
        .skip(TITLE_GAP)
        .with_font(FontSpec::SECTION)
        .place(geometry, kind.section_label())
        .skip(SECTION_GAP)
        .with_font(FontSpec::BODY)
}
