//! Turns a dataset into drawable tiles and paints them onto a surface.

pub mod svg;

use crate::config::ChartConfig;
use crate::error::RenderError;
use crate::hierarchy::{Hierarchy, HierarchyNode};
use crate::layout::TreemapLayout;
use crate::model::{DatasetKind, RawNode};
use crate::palette::Palette;
use crate::util::format_value;

/// One leaf, ready to draw.
#[derive(Clone, Debug, PartialEq)]
pub struct TileView {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Display form of the leaf value.
    pub value: String,
    pub fill: &'static str,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TileView {
    fn from_leaf(leaf: &HierarchyNode, palette: &Palette) -> Self {
        let category = leaf.category.clone().unwrap_or_default();
        Self {
            id: leaf.id.clone(),
            name: leaf.name.clone(),
            fill: palette.color_for(&category),
            category,
            value: format_value(leaf.value),
            x: leaf.x0,
            y: leaf.y0,
            width: leaf.width(),
            height: leaf.height(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendEntry {
    pub category: &'static str,
    pub color: &'static str,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    pub dataset: DatasetKind,
    pub width: f64,
    pub height: f64,
    pub tiles: Vec<TileView>,
    pub legend: Vec<LegendEntry>,
}

/// Builds the hierarchy, lays it out and resolves colors.
pub fn build_scene(root: &RawNode, dataset: DatasetKind, config: &ChartConfig) -> Scene {
    let mut hierarchy = Hierarchy::from_raw(root);
    TreemapLayout::new(config.width, config.height)
        .padding(config.padding)
        .round(config.round)
        .apply(&mut hierarchy);

    let palette = Palette::for_dataset(dataset);
    let tiles: Vec<TileView> = hierarchy
        .leaves()
        .map(|leaf| TileView::from_leaf(leaf, &palette))
        .collect();
    let legend = palette
        .entries()
        .map(|(category, color)| LegendEntry { category, color })
        .collect();
    log::debug!(
        "{}: {} tiles, total value {}",
        dataset.key(),
        tiles.len(),
        format_value(hierarchy.root().value)
    );
    Scene {
        dataset,
        width: config.width,
        height: config.height,
        tiles,
        legend,
    }
}

/// Drawing target for a scene. Implementations own everything they create
/// and must drop it on `clear`.
pub trait ChartSurface {
    fn clear(&mut self) -> Result<(), RenderError>;
    fn resize(&mut self, width: f64, height: f64) -> Result<(), RenderError>;
    fn add_tile(&mut self, tile: &TileView) -> Result<(), RenderError>;
    fn set_legend(&mut self, entries: &[LegendEntry]) -> Result<(), RenderError>;
}

/// Replaces whatever the surface shows with `scene`.
pub fn draw<S: ChartSurface + ?Sized>(surface: &mut S, scene: &Scene) -> Result<(), RenderError> {
    log::debug!("drawing {} ({} tiles)", scene.dataset.key(), scene.tiles.len());
    surface.clear()?;
    surface.resize(scene.width, scene.height)?;
    for tile in &scene.tiles {
        surface.add_tile(tile)?;
    }
    surface.set_legend(&scene.legend)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Datasets;
    use crate::palette::FALLBACK_COLOR;
    use serde_json::json;

    #[derive(Default)]
    struct RecordingSurface {
        size: (f64, f64),
        tiles: Vec<TileView>,
        legend: Vec<LegendEntry>,
        clears: usize,
    }

    impl ChartSurface for RecordingSurface {
        fn clear(&mut self) -> Result<(), RenderError> {
            self.tiles.clear();
            self.legend.clear();
            self.clears += 1;
            Ok(())
        }
        fn resize(&mut self, width: f64, height: f64) -> Result<(), RenderError> {
            self.size = (width, height);
            Ok(())
        }
        fn add_tile(&mut self, tile: &TileView) -> Result<(), RenderError> {
            self.tiles.push(tile.clone());
            Ok(())
        }
        fn set_legend(&mut self, entries: &[LegendEntry]) -> Result<(), RenderError> {
            self.legend = entries.to_vec();
            Ok(())
        }
    }

    fn tree(value: serde_json::Value) -> RawNode {
        serde_json::from_value(value).unwrap()
    }

    fn datasets() -> Datasets {
        Datasets {
            kickstarter: tree(json!({
                "name": "Kickstarter",
                "children": [
                    { "name": "Product Design", "children": [
                        { "name": "Pebble Time", "category": "Product Design", "value": "20338986" },
                        { "name": "COOLEST COOLER", "category": "Product Design", "value": "13285226" }
                    ]},
                    { "name": "Tabletop Games", "children": [
                        { "name": "Kingdom Death : Monster 1.5", "category": "Tabletop Games", "value": "12393139" }
                    ]},
                    { "name": "Crafts", "children": [
                        { "name": "Yarn bombing", "category": "Crafts", "value": "150000" }
                    ]}
                ]
            })),
            movies: tree(json!({
                "name": "Movies",
                "children": [
                    { "name": "Action", "children": [
                        { "name": "Avatar", "category": "Action", "value": "760505847" },
                        { "name": "Jurassic World", "category": "Action", "value": "652177271" },
                        { "name": "The Avengers", "category": "Action", "value": "623279547" }
                    ]},
                    { "name": "Drama", "children": [
                        { "name": "Titanic", "category": "Drama", "value": "658672302" }
                    ]},
                    { "name": "Animation", "children": [
                        { "name": "Shrek 2", "category": "Animation", "value": "436471036" },
                        { "name": "The Lion King", "category": "Animation", "value": "422783777" }
                    ]},
                    { "name": "Family", "children": [
                        { "name": "Star Wars", "category": "Family", "value": "460935665" }
                    ]}
                ]
            })),
            video_games: tree(json!({
                "name": "Video Game Sales Data Top 100",
                "children": [
                    { "name": "Wii", "children": [
                        { "name": "Wii Sports", "category": "Wii", "value": "82.53" },
                        { "name": "Mario Kart Wii", "category": "Wii", "value": "35.52" }
                    ]},
                    { "name": "GB", "children": [
                        { "name": "Pokemon Red/Pokemon Blue", "category": "GB", "value": "31.37" },
                        { "name": "Tetris", "category": "GB", "value": "30.26" }
                    ]},
                    { "name": "NES", "children": [
                        { "name": "Super Mario Bros.", "category": "NES", "value": "40.24" },
                        { "name": "Duck Hunt", "category": "NES", "value": "28.31" }
                    ]}
                ]
            })),
        }
    }

    #[test]
    fn movies_scene_has_one_labelled_genre_colored_tile_per_record() {
        let data = datasets();
        let scene = build_scene(&data.movies, DatasetKind::Movies, &ChartConfig::default());
        assert_eq!(scene.tiles.len(), data.movies.leaf_count());

        let palette = Palette::for_dataset(DatasetKind::Movies);
        let mut names: Vec<&str> = scene.tiles.iter().map(|t| t.name.as_str()).collect();
        names.sort_unstable();
        assert_eq!(
            names,
            vec!["Avatar", "Jurassic World", "Shrek 2", "Star Wars", "The Avengers", "The Lion King", "Titanic"]
        );
        for tile in &scene.tiles {
            assert_eq!(tile.fill, palette.color_for(&tile.category));
            assert_ne!(tile.fill, FALLBACK_COLOR);
        }
        let avatar = scene.tiles.iter().find(|t| t.name == "Avatar").unwrap();
        assert_eq!(avatar.id, "Movies.Action.Avatar");
        assert_eq!(avatar.value, "760505847");
        assert_eq!(avatar.fill, "#54A354");
    }

    #[test]
    fn every_tile_gets_a_fill_with_fallback_for_unknown_categories() {
        let data = datasets();
        let scene = build_scene(&data.kickstarter, DatasetKind::Kickstarter, &ChartConfig::default());
        assert!(scene.tiles.iter().all(|t| !t.fill.is_empty()));
        let yarn = scene.tiles.iter().find(|t| t.category == "Crafts").unwrap();
        assert_eq!(yarn.fill, FALLBACK_COLOR);
        let pebble = scene.tiles.iter().find(|t| t.name == "Pebble Time").unwrap();
        assert_eq!(pebble.fill, "#3366CC");
    }

    #[test]
    fn tile_areas_follow_values_for_all_datasets() {
        let data = datasets();
        let config = ChartConfig::default();
        let canvas = config.width * config.height;
        for kind in DatasetKind::ALL {
            let root = data.get(kind);
            let scene = build_scene(root, kind, &config);
            let total: f64 = scene.tiles.iter().map(|t| t.value.parse::<f64>().unwrap()).sum();
            for tile in &scene.tiles {
                let share = tile.value.parse::<f64>().unwrap() / total;
                let area = tile.width * tile.height / canvas;
                // Padding and rounding shave a few pixels off every tile.
                assert!((share - area).abs() < 0.03, "{:?} {}: {} vs {}", kind, tile.name, share, area);
            }
        }
    }

    #[test]
    fn legend_lists_only_the_active_dataset() {
        let data = datasets();
        let scene = build_scene(&data.movies, DatasetKind::Movies, &ChartConfig::default());
        let categories: Vec<&str> = scene.legend.iter().map(|e| e.category).collect();
        assert_eq!(
            categories,
            vec!["Comedy", "Action", "Drama", "Adventure", "Family", "Animation", "Biography"]
        );
    }

    #[test]
    fn switching_datasets_replaces_every_tile() {
        let data = datasets();
        let config = ChartConfig::default();
        let mut surface = RecordingSurface::default();

        let games = build_scene(&data.video_games, DatasetKind::VideoGames, &config);
        draw(&mut surface, &games).unwrap();
        assert_eq!(surface.tiles.len(), 6);
        assert_eq!(surface.size, (900.0, 600.0));

        let movies = build_scene(&data.movies, DatasetKind::Movies, &config);
        draw(&mut surface, &movies).unwrap();
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.tiles.len(), movies.tiles.len());
        assert!(surface.tiles.iter().all(|t| t.id.starts_with("Movies.")));
        assert!(!surface.tiles.iter().any(|t| t.category == "Wii"));
        assert_eq!(surface.legend.len(), 7);
    }
}
