//! Page layout state machine
//!
//! Layout is single-column, top to bottom. A `LayoutState` describes the one
//! open page (its cursor, current font and the lines placed so far) and is
//! threaded by value through each transition. Flushing a page yields an
//! immutable `Page` plus a fresh state for the next one.

/// A4 portrait width in points
pub const A4_WIDTH: f64 = 595.275_590_551_181_2;
/// A4 portrait height in points
pub const A4_HEIGHT: f64 = 841.889_763_779_527_7;

/// Line height as a multiple of the font size
const LEADING_FACTOR: f64 = 1.2;

/// Physical page size and margins, in points from the bottom-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    /// X position of every line
    pub margin_left: f64,
    /// Distance from the top edge to the first baseline
    pub margin_top: f64,
    /// A page is full once the cursor is at or below this height
    pub bottom_limit: f64,
}

impl PageGeometry {
    pub const A4: PageGeometry = PageGeometry {
        width: A4_WIDTH,
        height: A4_HEIGHT,
        margin_left: 40.0,
        margin_top: 60.0,
        bottom_limit: 40.0,
    };

    /// Cursor position of a freshly opened page
    pub fn top(&self) -> f64 {
        self.height - self.margin_top
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// The standard Type1 faces used by exported documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Typeface {
    Helvetica,
    HelveticaBold,
}

impl Typeface {
    pub const ALL: [Typeface; 2] = [Typeface::Helvetica, Typeface::HelveticaBold];

    /// PostScript name of the face
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Helvetica => "Helvetica",
            Self::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Name under which the face is registered in page resources
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Helvetica => "F1",
            Self::HelveticaBold => "F2",
        }
    }
}

/// Face plus point size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub typeface: Typeface,
    pub size: f64,
}

impl FontSpec {
    pub const TITLE: FontSpec = FontSpec {
        typeface: Typeface::HelveticaBold,
        size: 14.0,
    };
    pub const SECTION: FontSpec = FontSpec {
        typeface: Typeface::HelveticaBold,
        size: 12.0,
    };
    pub const BODY: FontSpec = FontSpec {
        typeface: Typeface::Helvetica,
        size: 11.0,
    };

    /// Vertical advance after a line set in this font
    pub fn leading(&self) -> f64 {
        self.size * LEADING_FACTOR
    }
}

/// One line of text at a fixed position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub x: f64,
    /// Baseline height from the bottom edge
    pub y: f64,
    pub font: FontSpec,
    pub text: String,
}

/// A flushed page. Immutable once produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    /// 1-based position in the document
    pub number: usize,
    pub lines: Vec<PlacedLine>,
}

impl Page {
    /// Text of every placed line, blank separators included
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|line| line.text.as_str())
    }
}

/// State of the open page
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    /// 0-based index of the open page
    pub page_index: usize,
    pub cursor_y: f64,
    pub font: FontSpec,
    lines: Vec<PlacedLine>,
}

impl LayoutState {
    /// Open page `page_index` with the cursor at the top margin and body font
    pub fn new_page(geometry: &PageGeometry, page_index: usize) -> Self {
        Self {
            page_index,
            cursor_y: geometry.top(),
            font: FontSpec::BODY,
            lines: Vec::new(),
        }
    }

    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }

    /// Move the cursor down by `gap` points without placing anything
    pub fn skip(mut self, gap: f64) -> Self {
        self.cursor_y -= gap;
        self
    }

    /// Place `text` at the cursor and advance by one line height.
    ///
    /// No page-break check happens here; see [`Paginator::emit_line`].
    pub fn place(mut self, geometry: &PageGeometry, text: impl Into<String>) -> Self {
        self.lines.push(PlacedLine {
            x: geometry.margin_left,
            y: self.cursor_y,
            font: self.font,
            text: text.into(),
        });
        self.cursor_y -= self.font.leading();
        self
    }

    /// True once the cursor has reached the bottom limit
    pub fn is_full(&self, geometry: &PageGeometry) -> bool {
        self.cursor_y <= geometry.bottom_limit
    }

    /// Close the open page and open the next one
    pub fn finalize(self, geometry: &PageGeometry) -> (Page, LayoutState) {
        let page = Page {
            number: self.page_index + 1,
            lines: self.lines,
        };
        (page, LayoutState::new_page(geometry, self.page_index + 1))
    }

    pub fn lines(&self) -> &[PlacedLine] {
        &self.lines
    }
}

/// Collects flushed pages while lines are emitted
#[derive(Debug)]
pub struct Paginator {
    geometry: PageGeometry,
    flushed: Vec<Page>,
}

impl Paginator {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            flushed: Vec::new(),
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Emit one line, flushing the open page first if it is full.
    ///
    /// The check runs before every line, so a line is never split and a
    /// break never happens earlier than the first line that does not fit.
    pub fn emit_line(&mut self, state: LayoutState, line: &str) -> LayoutState {
        let state = if state.is_full(&self.geometry) {
            let (page, next) = state.finalize(&self.geometry);
            tracing::trace!(page = page.number, lines = page.lines.len(), "Page flushed");
            self.flushed.push(page);
            next
        } else {
            state
        };

        state.place(&self.geometry, line)
    }

    /// Flush the open page, even if it holds nothing, and return all pages
    pub fn finish(mut self, state: LayoutState) -> Vec<Page> {
        let (page, _) = state.finalize(&self.geometry);
        self.flushed.push(page);
        self.flushed
    }
}
