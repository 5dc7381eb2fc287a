//! Category colors per dataset.

use crate::model::DatasetKind;

/// Used for any category missing from the active table.
pub const FALLBACK_COLOR: &str = "#F2F2F2";

type ColorTable = &'static [(&'static str, &'static str)];

const PLATFORM_COLORS: ColorTable = &[
    ("2600", "#3366CC"),
    ("Wii", "#54A354"),
    ("DS", "#FF4D61"),
    ("X360", "#808080"),
    ("GB", "#00B3B3"),
    ("PS3", "#9B3B9B"),
    ("NES", "#FFDB73"),
    ("PS2", "#66FF66"),
    ("SNES", "#FF8C4D"),
    ("GBA", "#FF7F80"),
    ("PS4", "#9A66B3"),
    ("3DS", "#FF66B3"),
    ("N64", "#4C914C"),
    ("PS", "#3333CC"),
    ("XB", "#C47A47"),
    ("PC", "#B3B3B3"),
    ("PSP", "#3366FF"),
    ("XOne", "#E57373"),
];

const GENRE_COLORS: ColorTable = &[
    ("Comedy", "#3366CC"),
    ("Action", "#54A354"),
    ("Drama", "#FF4D61"),
    ("Adventure", "#808080"),
    ("Family", "#00B3B3"),
    ("Animation", "#9B3B9B"),
    ("Biography", "#FFDB73"),
];

const KICKSTARTER_COLORS: ColorTable = &[
    ("Product Design", "#3366CC"),
    ("Tabletop Games", "#54A354"),
    ("Gaming Hardware", "#FF4D61"),
    ("Video Games", "#808080"),
    ("Sound", "#00B3B3"),
    ("Television", "#9B3B9B"),
    ("Narrative_film", "#FFDB73"),
    ("Web", "#66FF66"),
    ("Hardware", "#FF8C4D"),
    ("Games", "#FF7F80"),
    ("3D Printing", "#9A66B3"),
    ("Technology", "#FF66B3"),
    ("Wearables", "#4C914C"),
    ("Sculpture", "#3333CC"),
    ("Apparel", "#C47A47"),
    ("Food", "#B3B3B3"),
    ("Art", "#3366FF"),
    ("Gadgets", "#E57373"),
    ("Drinks", "#c8c804"),
    ("Narrative Film", "#606002"),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    table: ColorTable,
}

impl Palette {
    pub fn for_dataset(kind: DatasetKind) -> Self {
        let table = match kind {
            DatasetKind::VideoGames => PLATFORM_COLORS,
            DatasetKind::Movies => GENRE_COLORS,
            DatasetKind::Kickstarter => KICKSTARTER_COLORS,
        };
        Self { table }
    }

    pub fn color_for(&self, category: &str) -> &'static str {
        self.table
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, color)| *color)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Category/color pairs in legend order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.table.iter().copied()
    }
}
