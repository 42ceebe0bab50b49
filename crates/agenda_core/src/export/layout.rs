//! Fixed-position page layout for the agenda document.
//!
//! Coordinates are millimetres from the top-left corner of an A4 page. Text
//! `y` values are baselines.
//!
//! # Invariants
//! - Sections appear in a fixed order: banner, details, attendees, agenda
//!   items, notes, follow-up actions.
//! - Body text never starts below `CONTENT_BOTTOM_MM`; the cursor moves to a
//!   fresh page instead.
//! - The footer, when enabled, is placed on every page.

use super::metrics::wrap_text;
use super::sections::SectionContent;

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;

const MARGIN_X_MM: f32 = 10.0;
const SECOND_COLUMN_X_MM: f32 = 110.0;
const TOP_Y_MM: f32 = 20.0;
const CONTENT_BOTTOM_MM: f32 = 280.0;
const WRAP_WIDTH_MM: f32 = 180.0;
const LINE_HEIGHT_MM: f32 = 6.0;
const SECTION_GAP_MM: f32 = 4.0;

const BANNER_TEXT: &str = "Minutes of Meeting";
const BANNER_SIZE_PT: f32 = 18.0;
const BANNER_WIDTH_MM: f32 = 190.0;
const BANNER_HEIGHT_MM: f32 = 12.0;
const BANNER_ADVANCE_MM: f32 = 14.0;

const BODY_SIZE_PT: f32 = 12.0;
const FOOTER_SIZE_PT: f32 = 10.0;
const FOOTER_Y_MM: f32 = 290.0;
const FOOTER_GREY: f32 = 100.0 / 255.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    /// `x_mm` is the horizontal center of the text.
    Center,
}

/// One line of text at a fixed position.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x_mm: f32,
    pub y_mm: f32,
    pub size_pt: f32,
    pub weight: FontWeight,
    pub align: TextAlign,
    /// Fill level from 0.0 (black) to 1.0 (white).
    pub grey: f32,
}

/// Stroked rectangle; `(x_mm, y_mm)` is its top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBox {
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageLayout {
    pub frames: Vec<FrameBox>,
    pub lines: Vec<TextLine>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<PageLayout>,
}

impl DocumentLayout {
    /// All text in drawing order, across pages.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.pages
            .iter()
            .flat_map(|page| page.lines.iter().map(|line| line.text.as_str()))
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Lays out every section of `content`.
pub fn build_layout(content: &SectionContent, footer: Option<&str>) -> DocumentLayout {
    let mut cursor = Cursor::new();

    cursor.banner();
    cursor.details(content);
    cursor.gap();

    cursor.heading("Attendees:");
    cursor.wrapped(&content.attendees.join(", "));
    cursor.gap();

    cursor.heading("Agenda Items:");
    for (position, item) in content.agenda_items.iter().enumerate() {
        cursor.wrapped(&format!(
            "{}. {} ({} mins)",
            position + 1,
            item.topic,
            item.duration
        ));
    }
    cursor.gap();

    cursor.heading("Meeting Notes:");
    cursor.wrapped(&content.notes);
    cursor.gap();

    cursor.heading("Follow-Up Actions:");
    for (position, action) in content.follow_up_actions.iter().enumerate() {
        cursor.wrapped(&format!(
            "{}. {} - [{}]",
            position + 1,
            action.task,
            action.status
        ));
    }

    cursor.finish(footer)
}

struct Cursor {
    done: Vec<PageLayout>,
    page: PageLayout,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Self {
            done: Vec::new(),
            page: PageLayout::default(),
            y: TOP_Y_MM,
        }
    }

    fn banner(&mut self) {
        self.page.frames.push(FrameBox {
            x_mm: MARGIN_X_MM,
            y_mm: self.y - 10.0,
            width_mm: BANNER_WIDTH_MM,
            height_mm: BANNER_HEIGHT_MM,
        });
        self.page.lines.push(TextLine {
            text: BANNER_TEXT.to_string(),
            x_mm: PAGE_WIDTH_MM / 2.0,
            y_mm: self.y,
            size_pt: BANNER_SIZE_PT,
            weight: FontWeight::Bold,
            align: TextAlign::Center,
            grey: 0.0,
        });
        self.y += BANNER_ADVANCE_MM;
    }

    fn details(&mut self, content: &SectionContent) {
        self.heading("Meeting Details:");
        self.row(&[(MARGIN_X_MM, format!("Title: {}", content.title))]);
        self.row(&[
            (MARGIN_X_MM, format!("Date: {}", content.date)),
            (SECOND_COLUMN_X_MM, format!("Time: {}", content.time)),
        ]);
        self.row(&[
            (MARGIN_X_MM, format!("Type: {}", content.meeting_type)),
            (SECOND_COLUMN_X_MM, format!("Priority: {}", content.priority)),
        ]);
    }

    fn heading(&mut self, label: &str) {
        self.break_if_full();
        self.push(MARGIN_X_MM, label.to_string(), FontWeight::Bold);
        self.y += LINE_HEIGHT_MM;
    }

    fn row(&mut self, cells: &[(f32, String)]) {
        self.break_if_full();
        for (x, text) in cells {
            self.push(*x, text.clone(), FontWeight::Regular);
        }
        self.y += LINE_HEIGHT_MM;
    }

    fn wrapped(&mut self, text: &str) {
        for line in wrap_text(text, WRAP_WIDTH_MM, BODY_SIZE_PT) {
            self.break_if_full();
            self.push(MARGIN_X_MM, line, FontWeight::Regular);
            self.y += LINE_HEIGHT_MM;
        }
    }

    fn gap(&mut self) {
        self.y += SECTION_GAP_MM;
    }

    fn push(&mut self, x_mm: f32, text: String, weight: FontWeight) {
        self.page.lines.push(TextLine {
            text,
            x_mm,
            y_mm: self.y,
            size_pt: BODY_SIZE_PT,
            weight,
            align: TextAlign::Left,
            grey: 0.0,
        });
    }

    fn break_if_full(&mut self) {
        if self.y > CONTENT_BOTTOM_MM {
            self.done.push(std::mem::take(&mut self.page));
            self.y = TOP_Y_MM;
        }
    }

    fn finish(mut self, footer: Option<&str>) -> DocumentLayout {
        self.done.push(self.page);
        if let Some(caption) = footer.filter(|caption| !caption.trim().is_empty()) {
            for page in &mut self.done {
                page.lines.push(TextLine {
                    text: caption.to_string(),
                    x_mm: PAGE_WIDTH_MM / 2.0,
                    y_mm: FOOTER_Y_MM,
                    size_pt: FOOTER_SIZE_PT,
                    weight: FontWeight::Regular,
                    align: TextAlign::Center,
                    grey: FOOTER_GREY,
                });
            }
        }
        DocumentLayout { pages: self.done }
    }
}
