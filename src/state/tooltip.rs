use crate::render::TileView;
use crate::util::escape_html;

/// Contents and placement of the single shared tooltip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TooltipState {
    pub visible: bool,
    pub left: f64,
    pub top: f64,
    pub name: String,
    pub category: String,
    pub value: String,
}

impl TooltipState {
    pub fn show(&mut self, tile: &TileView, page_x: f64, page_y: f64, offset: f64) {
        self.visible = true;
        self.left = page_x + offset;
        self.top = page_y + offset;
        self.name = tile.name.clone();
        self.category = tile.category.clone();
        self.value = tile.value.clone();
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn visibility(&self) -> &'static str {
        if self.visible { "visible" } else { "hidden" }
    }

    pub fn inner_html(&self) -> String {
        format!(
            "<strong>Name:</strong> {}<br><strong>Category:</strong> {}<br><strong>Value:</strong> {}",
            escape_html(&self.name),
            escape_html(&self.category),
            escape_html(&self.value)
        )
    }
}
