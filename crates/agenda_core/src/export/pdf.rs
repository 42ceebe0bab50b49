//! PDF rendering of a computed [`DocumentLayout`] via `printpdf`.

use super::layout::{
    DocumentLayout, FontWeight, FrameBox, PageLayout, TextAlign, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};
use super::metrics::text_width_mm;
use super::{ExportError, ExportResult};
use printpdf::{
    BuiltinFont, Color, Greyscale, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference,
    Point,
};

const LAYER_NAME: &str = "Agenda";
const FRAME_GREY: f32 = 100.0 / 255.0;
const FRAME_STROKE_PT: f32 = 0.5;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl Fonts {
    fn for_weight(&self, weight: FontWeight) -> &IndirectFontRef {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

/// Renders every page of `layout` into PDF bytes.
pub fn render_pdf(layout: &DocumentLayout, document_title: &str) -> ExportResult<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        document_title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_error)?,
    };

    for (number, page) in layout.pages.iter().enumerate() {
        let layer = if number == 0 {
            doc.get_page(first_page).get_layer(first_layer)
        } else {
            let (page_index, layer_index) =
                doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
            doc.get_page(page_index).get_layer(layer_index)
        };
        draw_page(&layer, page, &fonts);
    }

    doc.save_to_bytes().map_err(render_error)
}

fn draw_page(layer: &PdfLayerReference, page: &PageLayout, fonts: &Fonts) {
    for frame in &page.frames {
        draw_frame(layer, frame);
    }

    for line in &page.lines {
        let x_mm = match line.align {
            TextAlign::Left => line.x_mm,
            TextAlign::Center => line.x_mm - text_width_mm(&line.text, line.size_pt) / 2.0,
        };
        layer.set_fill_color(Color::Greyscale(Greyscale::new(line.grey, None)));
        layer.use_text(
            line.text.as_str(),
            line.size_pt,
            Mm(x_mm),
            Mm(PAGE_HEIGHT_MM - line.y_mm),
            fonts.for_weight(line.weight),
        );
    }
}

fn draw_frame(layer: &PdfLayerReference, frame: &FrameBox) {
    let left = frame.x_mm;
    let right = frame.x_mm + frame.width_mm;
    let top = PAGE_HEIGHT_MM - frame.y_mm;
    let bottom = top - frame.height_mm;

    layer.set_outline_color(Color::Greyscale(Greyscale::new(FRAME_GREY, None)));
    layer.set_outline_thickness(FRAME_STROKE_PT);
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(left), Mm(top)), false),
            (Point::new(Mm(right), Mm(top)), false),
            (Point::new(Mm(right), Mm(bottom)), false),
            (Point::new(Mm(left), Mm(bottom)), false),
        ],
        is_closed: true,
    });
}

fn render_error(err: impl std::fmt::Debug) -> ExportError {
    ExportError::Render(format!("{err:?}"))
}
