//! Study document export
//!
//! Renders flashcard decks and quizzes into paginated PDF documents.
//!
//! Rendering has two stages:
//! - `compose`: title and records become fixed-position lines on pages,
//!   with a page break checked before every line
//! - `pdf`: pages are serialized into a PDF byte buffer
//!
//! Both stages are pure and synchronous. Each call owns its pages and
//! buffer, so concurrent exports need no coordination.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use study_coach_server::export::{render, ExportRequest, FlashcardRecord};
//!
//! let request = ExportRequest {
//!     title: "Cell Biology".to_string(),
//!     records: vec![FlashcardRecord { question: "Q1".into(), answer: "A1".into() }],
//! };
//! let document = render(&request);
//! let bytes = document.to_pdf()?;
//! ```

mod compose;
mod encoding;
mod layout;
mod pdf;
mod types;

pub use compose::{option_label, ExportRecord};
pub use encoding::encode_win_ansi;
pub use layout::{
    FontSpec, LayoutState, Page, PageGeometry, Paginator, PlacedLine, Typeface, A4_HEIGHT,
    A4_WIDTH,
};
pub use types::{
    ExportKind, ExportRequest, FlashcardRecord, FlashcardsExportRequest, QuizExportRequest,
    QuizRecord,
};

use thiserror::Error;

/// Media type of rendered documents
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Serialization failures. Layout itself cannot fail.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF serialization failed: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Laid-out document, ready to serialize
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedDocument {
    kind: ExportKind,
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl RenderedDocument {
    pub fn kind(&self) -> ExportKind {
        self.kind
    }

    /// Flushed pages in creation order; never empty
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Suggested download file name
    pub fn file_name(&self) -> &'static str {
        self.kind.file_name()
    }

    /// Serialize to PDF bytes
    pub fn to_pdf(&self) -> Result<Vec<u8>, ExportError> {
        pdf::write_pdf(&self.pages, &self.geometry)
    }
}

/// Lay out `request` on A4 pages
pub fn render<R: ExportRecord>(request: &ExportRequest<R>) -> RenderedDocument {
    render_with_geometry(request, PageGeometry::A4)
}

/// Lay out `request` on pages of the given geometry
pub fn render_with_geometry<R: ExportRecord>(
    request: &ExportRequest<R>,
    geometry: PageGeometry,
) -> RenderedDocument {
    let pages = compose::compose(request, geometry);
    tracing::debug!(
        kind = ?R::KIND,
        records = request.records.len(),
        pages = pages.len(),
        "Document laid out"
    );

    RenderedDocument {
        kind: R::KIND,
        geometry,
        pages,
    }
}
