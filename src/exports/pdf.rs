//! PDF export functionality
//!
//! Paints a [`ReportLayout`] with printpdf using the builtin Helvetica faces.

use anyhow::Result;
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::io::BufWriter;

use crate::exports::report_layout::{
    DrawOp, PAGE_HEIGHT_MM, PAGE_MARGIN_X_MM, PAGE_WIDTH_MM, REPORT_TITLE, ReportLayout,
    ReportOptions, layout_report,
};
use crate::models::ClientProfile;

fn shade_color() -> Color {
    Color::Rgb(Rgb::new(0.92, 0.94, 0.97, None))
}

fn rule_color() -> Color {
    Color::Rgb(Rgb::new(0.15, 0.25, 0.45, None))
}

fn text_color() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

fn paint_op(
    layer: &PdfLayerReference,
    op: &DrawOp,
    font: &IndirectFontRef,
    font_bold: &IndirectFontRef,
) {
    let left = Mm(PAGE_MARGIN_X_MM);
    let right = Mm(PAGE_WIDTH_MM - PAGE_MARGIN_X_MM);

    match op {
        DrawOp::Text(line) => {
            let face = if line.bold { font_bold } else { font };
            layer.use_text(
                line.text.as_str(),
                line.size_pt,
                Mm(line.x_mm),
                Mm(line.y_mm),
                face,
            );
        }
        DrawOp::Rule { y_mm } => {
            layer.set_outline_color(rule_color());
            layer.set_outline_thickness(0.8);
            layer.add_line(Line {
                points: vec![
                    (Point::new(left, Mm(*y_mm)), false),
                    (Point::new(right, Mm(*y_mm)), false),
                ],
                is_closed: false,
            });
        }
        DrawOp::Band { top_mm, bottom_mm } => {
            layer.set_fill_color(shade_color());
            layer.add_polygon(Polygon {
                rings: vec![vec![
                    (Point::new(left, Mm(*bottom_mm)), false),
                    (Point::new(right, Mm(*bottom_mm)), false),
                    (Point::new(right, Mm(*top_mm)), false),
                    (Point::new(left, Mm(*top_mm)), false),
                ]],
                mode: PaintMode::Fill,
                winding_order: WindingOrder::NonZero,
            });
            layer.set_fill_color(text_color());
        }
    }
}

fn build_pdf_bytes(title: &str, layout: &ReportLayout) -> Result<Vec<u8>> {
    let (doc, page1, layer1) =
        PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");

    let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;
    let font_bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;

    for (idx, ops) in layout.pages.iter().enumerate() {
        let layer = if idx == 0 {
            doc.get_page(page1).get_layer(layer1)
        } else {
            let (page, layer) = doc.add_page(
                Mm(PAGE_WIDTH_MM),
                Mm(PAGE_HEIGHT_MM),
                format!("Page {}", idx + 1),
            );
            doc.get_page(page).get_layer(layer)
        };

        layer.set_fill_color(text_color());
        for op in ops {
            paint_op(&layer, op, &font, &font_bold);
        }
    }

    let mut buf = BufWriter::new(Vec::new());
    doc.save(&mut buf)?;
    let bytes = buf.into_inner()?;

    Ok(bytes)
}

/// Render the paginated report as PDF bytes.
pub fn render_report(
    profile: &ClientProfile,
    advisory: Option<&str>,
    narrative: &str,
    recommendations: &[String],
    options: &ReportOptions,
) -> Result<Vec<u8>> {
    let layout = layout_report(profile, advisory, narrative, recommendations, options);
    crate::log_debug!(
        "Report layout for '{}' spans {} page(s)",
        profile.customer_name,
        layout.page_count()
    );
    build_pdf_bytes(REPORT_TITLE, &layout)
}
