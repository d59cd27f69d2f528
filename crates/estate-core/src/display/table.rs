use crate::api::models::{Property, PropertyPage};
use crate::display::render::{MISSING_SQFT, NO_RESULTS};
use crate::utils::text::{format_decimal, format_number, format_price, truncate_text};
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets};

const DEFAULT_WIDTH: usize = 100;
const MIN_WIDTH: usize = 40;

pub struct TableDisplay {
    max_width: usize,
    use_colors: bool,
}

impl Default for TableDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl TableDisplay {
    pub fn new() -> Self {
        Self {
            max_width: DEFAULT_WIDTH,
            use_colors: true,
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = width.max(MIN_WIDTH);
        self
    }

    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    fn bold_header(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).add_attribute(Attribute::Bold).fg(color)
        } else {
            Cell::new(text).add_attribute(Attribute::Bold)
        }
    }

    fn colored_cell(&self, text: &str, color: Color) -> Cell {
        if self.use_colors {
            Cell::new(text).fg(color)
        } else {
            Cell::new(text)
        }
    }

    fn title_width(&self) -> usize {
        // Remaining space after the fixed-width columns
        self.max_width.saturating_sub(60).max(12)
    }

    /// Table of properties, or the empty state text.
    pub fn render_properties(&self, properties: &[Property]) -> String {
        if properties.is_empty() {
            return NO_RESULTS.to_string();
        }

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_width(self.max_width.min(u16::MAX as usize) as u16);

        let headers: Vec<Cell> = ["ID", "Price", "Title", "Beds", "Baths", "Sqft", "City"]
            .iter()
            .map(|h| self.bold_header(h, Color::Cyan))
            .collect();
        table.set_header(headers);

        for property in properties {
            let sqft = property
                .square_feet
                .filter(|s| *s > 0)
                .map(|s| format_number(s as i64))
                .unwrap_or_else(|| MISSING_SQFT.to_string());
            table.add_row(vec![
                self.colored_cell(&property.id.to_string(), Color::Cyan),
                self.colored_cell(&format_price(property.price), Color::Green),
                Cell::new(truncate_text(&property.title, self.title_width())),
                Cell::new(property.bedrooms.to_string()),
                Cell::new(format_decimal(property.bathrooms)),
                Cell::new(sqft),
                Cell::new(&property.city),
            ]);
        }

        table.to_string()
    }

    /// Table plus a `Page X of Y` footer.
    pub fn render_page(&self, page: &PropertyPage) -> String {
        if page.is_empty() {
            return NO_RESULTS.to_string();
        }
        format!(
            "{}\nPage {} of {} | {} properties found",
            self.render_properties(&page.items),
            page.page,
            page.pages.max(1),
            format_number(page.result_count().min(i64::MAX as u64) as i64)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Property> {
        serde_json::from_value(serde_json::json!([
            {"id": 1, "title": "Modern Downtown Condo", "price": 675000, "city": "San Francisco",
             "bedrooms": 2, "bathrooms": 2.0, "square_feet": 1200},
            {"id": 2, "title": "Lot", "price": 90000, "city": "Austin"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_render_properties() {
        let output = TableDisplay::new().with_colors(false).render_properties(&sample());
        assert!(output.contains("Modern Downtown Condo"));
        assert!(output.contains("$675,000"));
        assert!(output.contains("1,200"));
        assert!(output.contains(MISSING_SQFT));
    }

    #[test]
    fn test_render_empty() {
        let display = TableDisplay::new().with_colors(false);
        assert_eq!(display.render_properties(&[]), NO_RESULTS);
        assert_eq!(display.render_page(&PropertyPage::single(Vec::new())), NO_RESULTS);
    }

    #[test]
    fn test_render_page_footer() {
        let page = PropertyPage {
            items: sample(),
            page: 2,
            pages: 4,
            total: Some(40),
            per_page: Some(12),
        };
        let output = TableDisplay::new()
            .with_colors(false)
            .with_max_width(120)
            .render_page(&page);
        assert!(output.ends_with("Page 2 of 4 | 40 properties found"));
    }
}
