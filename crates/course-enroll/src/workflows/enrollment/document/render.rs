use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rect, Rgb};

use super::layout::{ConfirmationLayout, DETAILS_HEADING, INSTRUCTIONS_HEADING};
use super::{Branding, DocumentGenerationFailure};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 18.0;
const HEADER_HEIGHT: f32 = 36.0;
const VALUE_COLUMN: f32 = 72.0;
const DETAIL_STEP: f32 = 8.0;
const INSTRUCTION_STEP: f32 = 7.0;

/// Parsed `#RRGGBB` colour asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct AccentColor {
    r: f32,
    g: f32,
    b: f32,
}

impl AccentColor {
    pub(crate) fn parse(raw: &str) -> Result<Self, DocumentGenerationFailure> {
        let malformed = || DocumentGenerationFailure::Asset {
            asset: "accent color",
            reason: format!("expected #RRGGBB, found '{raw}'"),
        };

        let hex = raw.trim().strip_prefix('#').ok_or_else(malformed)?;
        if hex.len() != 6 || !hex.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map(|value| value as f32 / 255.0)
                .map_err(|_| malformed())
        };

        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    fn color(self) -> Color {
        Color::Rgb(Rgb::new(self.r, self.g, self.b, None))
    }
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Render the layout onto a single A4 page and return the PDF bytes.
pub(crate) fn render_pdf(
    layout: &ConfirmationLayout,
    branding: &Branding,
) -> Result<Vec<u8>, DocumentGenerationFailure> {
    let accent = AccentColor::parse(&branding.accent_color)?;

    let (doc, page, layer) = PdfDocument::new(
        format!("{} - {}", layout.title, layout.subtitle),
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Confirmation".to_string(),
    );
    let canvas = doc.get_page(page).get_layer(layer);

    let fonts = Fonts {
        regular: doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|err| DocumentGenerationFailure::Render(err.to_string()))?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|err| DocumentGenerationFailure::Render(err.to_string()))?,
    };

    draw_header(&canvas, &fonts, layout, accent);
    let cursor = draw_details(&canvas, &fonts, layout, accent, PAGE_HEIGHT - HEADER_HEIGHT - 14.0);
    draw_instructions(&canvas, &fonts, layout, accent, cursor - 6.0);

    doc.save_to_bytes()
        .map_err(|err| DocumentGenerationFailure::Render(err.to_string()))
}

fn draw_header(
    canvas: &PdfLayerReference,
    fonts: &Fonts,
    layout: &ConfirmationLayout,
    accent: AccentColor,
) {
    let bottom = PAGE_HEIGHT - HEADER_HEIGHT;
    canvas.set_fill_color(accent.color());
    canvas.add_rect(Rect::new(Mm(0.0), Mm(bottom), Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT)));

    // logo badge
    canvas.set_fill_color(white());
    canvas.add_rect(Rect::new(
        Mm(MARGIN),
        Mm(bottom + 8.0),
        Mm(MARGIN + 20.0),
        Mm(bottom + 28.0),
    ));
    canvas.set_fill_color(accent.color());
    canvas.use_text(
        layout.logo_mark.as_str(),
        16.0,
        Mm(MARGIN + 4.0),
        Mm(bottom + 15.5),
        &fonts.bold,
    );

    canvas.set_fill_color(white());
    canvas.use_text(
        layout.title.as_str(),
        20.0,
        Mm(MARGIN + 27.0),
        Mm(bottom + 19.0),
        &fonts.bold,
    );
    canvas.use_text(
        layout.subtitle.as_str(),
        11.0,
        Mm(MARGIN + 27.0),
        Mm(bottom + 10.0),
        &fonts.regular,
    );
}

fn draw_details(
    canvas: &PdfLayerReference,
    fonts: &Fonts,
    layout: &ConfirmationLayout,
    accent: AccentColor,
    top: f32,
) -> f32 {
    canvas.set_fill_color(accent.color());
    canvas.use_text(DETAILS_HEADING, 14.0, Mm(MARGIN), Mm(top), &fonts.bold);
    canvas.add_rect(Rect::new(
        Mm(MARGIN),
        Mm(top - 3.0),
        Mm(PAGE_WIDTH - MARGIN),
        Mm(top - 2.6),
    ));

    canvas.set_fill_color(black());
    let mut y = top - 4.0 - DETAIL_STEP;
    for line in &layout.details {
        canvas.use_text(format!("{}:", line.label), 11.0, Mm(MARGIN + 2.0), Mm(y), &fonts.bold);
        canvas.use_text(line.value.as_str(), 11.0, Mm(VALUE_COLUMN), Mm(y), &fonts.regular);
        y -= DETAIL_STEP;
    }
    y
}

fn draw_instructions(
    canvas: &PdfLayerReference,
    fonts: &Fonts,
    layout: &ConfirmationLayout,
    accent: AccentColor,
    top: f32,
) {
    canvas.set_fill_color(accent.color());
    canvas.use_text(INSTRUCTIONS_HEADING, 13.0, Mm(MARGIN), Mm(top), &fonts.bold);

    canvas.set_fill_color(black());
    let mut y = top - INSTRUCTION_STEP - 1.0;
    for line in &layout.instructions {
        canvas.use_text(*line, 10.0, Mm(MARGIN + 2.0), Mm(y), &fonts.regular);
        y -= INSTRUCTION_STEP;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_accent_colors() {
        let color = AccentColor::parse("#FF0080").expect("valid color");
        assert_eq!(color.r, 1.0);
        assert_eq!(color.g, 0.0);
        assert!((color.b - 128.0 / 255.0).abs() < f32::EPSILON);
    }

    #[test]
    fn rejects_malformed_accent_colors() {
        for raw in ["1F4E79", "#1F4E7", "#GG0000", ""] {
            match AccentColor::parse(raw) {
                Err(DocumentGenerationFailure::Asset { asset, .. }) => {
                    assert_eq!(asset, "accent color")
                }
                other => panic!("expected asset failure for {raw:?}, got {other:?}"),
            }
        }
    }
}
