use crate::invoice::record::{coerce_f64, coerce_i64, InvoiceRecord};
use crate::render::layout::{Layout, LETTER};
use crate::types::{AppError, Result};
use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Pt,
    Rect, Rgb,
};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Format a monetary value: dollar-sign-prefixed, two decimals, thousands
/// separated. Used for every monetary value in the table and totals block.
pub fn format_currency(value: f64) -> String {
    let formatted = format!("{value:.2}");
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("${sign}{grouped}.{dec_part}")
}

// Approximate Helvetica advance widths as a fraction of the font size.
// printpdf exposes no metrics for builtin fonts, so right/centered alignment
// works from these estimates; at 13 pt the error stays under a couple of
// points for the strings this template draws.
fn char_factor(c: char) -> f32 {
    match c {
        'i' | 'j' | 'l' | '!' | '\'' | '.' | ',' | ':' | ';' | '|' => 0.25,
        ' ' | 'f' | 't' | 'r' | '(' | ')' | '[' | ']' | '-' | '/' => 0.32,
        'm' | 'w' => 0.82,
        'M' | 'W' => 0.94,
        '+' => 0.58,
        'A'..='Z' => 0.69,
        '0'..='9' | '$' | '#' => 0.56,
        _ => 0.53,
    }
}

fn text_width(text: &str, font_size: f32) -> f32 {
    text.chars().map(char_factor).sum::<f32>() * font_size
}

fn mm(pt: f32) -> Mm {
    Mm::from(Pt(pt))
}

/// Thin wrapper over a printpdf layer working in page points with the
/// alignment helpers the template needs.
struct Canvas<'a> {
    layer: PdfLayerReference,
    font: &'a IndirectFontRef,
    font_bold: &'a IndirectFontRef,
}

impl Canvas<'_> {
    fn font_for(&self, bold: bool) -> &IndirectFontRef {
        if bold {
            self.font_bold
        } else {
            self.font
        }
    }

    fn text(&self, s: &str, size: f32, bold: bool, x: f32, y: f32) {
        self.layer.use_text(s, size, mm(x), mm(y), self.font_for(bold));
    }

    fn text_right(&self, s: &str, size: f32, bold: bool, right_x: f32, y: f32) {
        self.text(s, size, bold, right_x - text_width(s, size), y);
    }

    fn text_centered(&self, s: &str, size: f32, bold: bool, center_x: f32, y: f32) {
        self.text(s, size, bold, center_x - text_width(s, size) / 2.0, y);
    }

    fn rule(&self, x1: f32, y1: f32, x2: f32, y2: f32) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(mm(x1), mm(y1)), false),
                (Point::new(mm(x2), mm(y2)), false),
            ],
            is_closed: false,
        });
    }

    fn fill_rect(&self, x: f32, y: f32, width: f32, height: f32) {
        let rect = Rect::new(mm(x), mm(y), mm(x + width), mm(y + height))
            .with_mode(PaintMode::Fill);
        self.layer.add_rect(rect);
    }

    fn set_fill_gray(&self, level: f32) {
        self.layer
            .set_fill_color(Color::Rgb(Rgb::new(level, level, level, None)));
    }
}

/// Render a single-page invoice document to `path`.
///
/// Line totals are re-derived from each item (`unit_price * quantity`) rather
/// than read from stored aggregates; the totals block, in contrast, trusts
/// `subtotal`/`tax`/`total` verbatim. Collapsing the two into one source of
/// truth would change behavior for pre-aggregated input, so both stay.
///
/// Unlike totals computation, an item with non-numeric fields here is an
/// error, not a skip.
pub fn render_invoice(record: &InvoiceRecord, path: &Path) -> Result<()> {
    let layout = LETTER;
    let (doc, page_idx, layer_idx) = PdfDocument::new(
        "Invoice",
        mm(layout.page_width),
        mm(layout.page_height),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| AppError::Render(e.to_string()))?;
    let font_bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| AppError::Render(e.to_string()))?;

    let canvas = Canvas {
        layer: doc.get_page(page_idx).get_layer(layer_idx),
        font: &font,
        font_bold: &font_bold,
    };

    draw_title_block(&canvas, record, &layout);
    draw_address_block(&canvas, record, &layout);
    draw_items_table(&canvas, record, &layout)?;
    draw_totals_block(&canvas, record, &layout);

    canvas.text_centered(
        "Thank you for your business!",
        layout.body_size,
        false,
        layout.page_width / 2.0,
        layout.footer_y,
    );

    let file = File::create(path)?;
    doc.save(&mut BufWriter::new(file))
        .map_err(|e| AppError::Render(e.to_string()))?;

    tracing::info!(path = %path.display(), "invoice rendered");
    Ok(())
}

fn draw_title_block(canvas: &Canvas<'_>, record: &InvoiceRecord, layout: &Layout) {
    let h = layout.page_height;

    canvas.set_fill_gray(0.3);
    canvas.text(
        "INVOICE",
        layout.title_size,
        true,
        layout.margin,
        h - layout.title_drop,
    );
    canvas.set_fill_gray(0.0);

    let right = layout.right_edge();
    canvas.text_right(
        &format!("Invoice: #{}", record.invoice_number),
        layout.body_size,
        false,
        right,
        h - layout.meta_drop,
    );
    canvas.text_right(
        &format!("Date: {}", record.display_invoice_date()),
        layout.body_size,
        false,
        right,
        h - layout.meta_drop - layout.meta_line_step,
    );
    canvas.text_right(
        &format!("Due Date: {}", record.display_due_date()),
        layout.body_size,
        false,
        right,
        h - layout.meta_drop - 2.0 * layout.meta_line_step,
    );
}

fn draw_address_block(canvas: &Canvas<'_>, record: &InvoiceRecord, layout: &Layout) {
    let top = layout.page_height - layout.address_drop;
    let step = layout.address_line_step;
    let size = layout.body_size;

    let customer = &record.customer_info;
    canvas.text("Billed To:", size, true, layout.margin, top);
    canvas.text(&customer.name, size, false, layout.margin, top - step);
    canvas.text(&customer.phone, size, false, layout.margin, top - 2.0 * step);
    canvas.text(&customer.address, size, false, layout.margin, top - 3.0 * step);
    canvas.text(&customer.email, size, false, layout.margin, top - 4.0 * step);

    let vendor = &record.vendor_info;
    let right = layout.right_edge();
    canvas.text_right("Bill From:", size, true, right, top);
    canvas.text_right(&vendor.name, size, false, right, top - step);
    canvas.text_right(&vendor.phone, size, false, right, top - 2.0 * step);
    canvas.text_right(&vendor.address, size, false, right, top - 3.0 * step);
    canvas.text_right(&vendor.email, size, false, right, top - 4.0 * step);
}

fn draw_items_table(canvas: &Canvas<'_>, record: &InvoiceRecord, layout: &Layout) -> Result<()> {
    let header_top = layout.table_top();
    let header_bottom = layout.header_bottom();
    let header_text_y = (header_top + header_bottom) / 2.0;
    let width = layout.table_right - layout.table_left;

    canvas.set_fill_gray(0.9);
    canvas.fill_rect(layout.table_left, header_bottom, width, layout.row_height);
    canvas.set_fill_gray(0.0);

    let hs = layout.table_header_size;
    canvas.text("Item", hs, true, layout.col_item_x, header_text_y);
    canvas.text(
        "Unit Price",
        hs,
        true,
        layout.col_unit_price_label_x,
        header_text_y,
    );
    canvas.text_centered("Qty", hs, true, layout.col_qty_center, header_text_y);
    canvas.text_right("Price", hs, true, layout.col_price_right, header_text_y);
    canvas.rule(layout.table_left, header_top, layout.table_right, header_top);
    canvas.rule(
        layout.table_left,
        header_bottom,
        layout.table_right,
        header_bottom,
    );

    for (i, item) in record.items.iter().enumerate() {
        let unit_price = coerce_f64(&item.unit_price).ok_or_else(|| {
            AppError::InvalidInput(format!("item {i} has a non-numeric unit_price"))
        })?;
        let quantity = coerce_i64(&item.quantity).ok_or_else(|| {
            AppError::InvalidInput(format!("item {i} has a non-numeric quantity"))
        })?;
        // Re-derived here on purpose; stored aggregates are not consulted.
        let line_total = unit_price * quantity as f64;

        let row_top = header_bottom - layout.row_height * i as f32;
        let row_bottom = row_top - layout.row_height;
        let text_y = (row_top + row_bottom) / 2.0;

        canvas.text(&item.description, layout.body_size, false, layout.col_item_x, text_y);
        canvas.text_right(
            &format_currency(unit_price),
            layout.body_size,
            false,
            layout.col_unit_price_right,
            text_y,
        );
        canvas.text_centered(
            &quantity.to_string(),
            layout.body_size,
            false,
            layout.col_qty_center,
            text_y,
        );
        canvas.text_right(
            &format_currency(line_total),
            layout.body_size,
            false,
            layout.col_price_right,
            text_y,
        );

        canvas.rule(layout.table_left, row_bottom, layout.table_right, row_bottom);
    }

    Ok(())
}

fn draw_totals_block(canvas: &Canvas<'_>, record: &InvoiceRecord, layout: &Layout) {
    let base = layout.totals_base(record.items.len());
    let step = layout.totals_line_step;
    let size = layout.body_size;
    let label_x = layout.totals_label_right;
    let value_x = layout.col_price_right;

    // The aggregates are trusted verbatim here, unlike the per-row totals.
    canvas.text_right("Sub Total : ", size, false, label_x, base - 20.0);
    canvas.text_right(
        &format_currency(record.subtotal),
        size,
        false,
        value_x,
        base - 20.0,
    );
    canvas.rule(
        layout.totals_rule_left,
        base - step,
        layout.totals_rule_right,
        base - step,
    );

    canvas.text_right("Tax : ", size, false, label_x, base - 20.0 - step);
    canvas.text_right(
        &format!("+ {}", format_currency(record.tax)),
        size,
        false,
        value_x,
        base - 20.0 - step,
    );
    canvas.rule(
        layout.totals_rule_left,
        base - 2.0 * step,
        layout.totals_rule_right,
        base - 2.0 * step,
    );

    canvas.text_right("Total : ", layout.total_size, true, label_x, base - 20.0 - 2.0 * step);
    canvas.text_right(
        &format_currency(record.total),
        layout.total_size,
        true,
        value_x,
        base - 20.0 - 2.0 * step,
    );
    canvas.rule(
        layout.totals_rule_left,
        base - 3.0 * step,
        layout.totals_rule_right,
        base - 3.0 * step,
    );
}
