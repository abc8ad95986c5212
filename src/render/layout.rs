/// Measurements of the single-page invoice template, in PDF points.
///
/// The values are a hand-tuned template, not derived geometry; changing one
/// shifts the page visibly. Vertical positions are expressed as drops from
/// the top edge where the template reads that way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layout {
    /// Page width.
    pub page_width: f32,
    /// Page height.
    pub page_height: f32,
    /// Left/right content margin.
    pub margin: f32,

    /// "INVOICE" title font size.
    pub title_size: f32,
    /// Body text font size.
    pub body_size: f32,
    /// Table header font size.
    pub table_header_size: f32,
    /// Grand total font size.
    pub total_size: f32,

    /// Title baseline drop from the top edge.
    pub title_drop: f32,
    /// First metadata line (invoice number) drop from the top edge.
    pub meta_drop: f32,
    /// Vertical step between metadata lines.
    pub meta_line_step: f32,

    /// Address block label drop from the top edge.
    pub address_drop: f32,
    /// Vertical step between address lines.
    pub address_line_step: f32,

    /// Table header top edge drop from the page top.
    pub table_top_drop: f32,
    /// Height of the header row and every item row.
    pub row_height: f32,
    /// Left edge of the item description column text.
    pub col_item_x: f32,
    /// Left edge of the "Unit Price" header label.
    pub col_unit_price_label_x: f32,
    /// Right edge of unit price values.
    pub col_unit_price_right: f32,
    /// Center of the quantity column.
    pub col_qty_center: f32,
    /// Right edge of line totals.
    pub col_price_right: f32,
    /// Left edge of the table frame.
    pub table_left: f32,
    /// Right edge of the table frame.
    pub table_right: f32,

    /// Right edge of the totals block labels.
    pub totals_label_right: f32,
    /// Left end of the rules under the totals lines.
    pub totals_rule_left: f32,
    /// Right end of the rules under the totals lines.
    pub totals_rule_right: f32,
    /// Vertical step between totals lines.
    pub totals_line_step: f32,

    /// Footer baseline from the page bottom.
    pub footer_y: f32,
}

impl Layout {
    /// Right edge of the content area.
    pub fn right_edge(&self) -> f32 {
        self.page_width - self.margin
    }

    /// Top edge of the table header row.
    pub fn table_top(&self) -> f32 {
        self.page_height - self.table_top_drop
    }

    /// Bottom edge of the table header row.
    pub fn header_bottom(&self) -> f32 {
        self.table_top() - self.row_height
    }

    /// Baseline for the totals block given how many item rows were drawn.
    pub fn totals_base(&self, item_count: usize) -> f32 {
        self.header_bottom() - self.row_height * item_count as f32
    }
}

/// The US-letter template used for every invoice.
pub const LETTER: Layout = Layout {
    page_width: 612.0,
    page_height: 792.0,
    margin: 50.0,

    title_size: 65.0,
    body_size: 13.0,
    table_header_size: 12.0,
    total_size: 16.0,

    title_drop: 100.0,
    meta_drop: 80.0,
    meta_line_step: 20.0,

    address_drop: 180.0,
    address_line_step: 20.0,

    table_top_drop: 300.0,
    row_height: 30.0,
    col_item_x: 55.0,
    col_unit_price_label_x: 300.0,
    col_unit_price_right: 340.0,
    col_qty_center: 400.0,
    col_price_right: 550.0,
    table_left: 50.0,
    table_right: 550.0,

    totals_label_right: 480.0,
    totals_rule_left: 380.0,
    totals_rule_right: 556.0,
    totals_line_step: 30.0,

    footer_y: 50.0,
};
