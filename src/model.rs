//! Data models for the treemap viewer.
//! Raw dataset trees as they come over the wire, the dataset catalogue and
//! the reducer state driving the view.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DatasetKind {
    Kickstarter,
    Movies,
    #[default]
    VideoGames,
}

impl DatasetKind {
    /// Navigation order.
    pub const ALL: [DatasetKind; 3] = [
        DatasetKind::Kickstarter,
        DatasetKind::Movies,
        DatasetKind::VideoGames,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DatasetKind::Kickstarter => "kickstarter",
            DatasetKind::Movies => "movies",
            DatasetKind::VideoGames => "video-games",
        }
    }

    /// Button label: the key with hyphens turned into spaces.
    pub fn label(self) -> String {
        self.key().replace('-', " ")
    }

    pub fn description(self) -> &'static str {
        match self {
            DatasetKind::Kickstarter => {
                "Top 100 Most Funded Kickstarter Projects Grouped by Category"
            }
            DatasetKind::Movies => "Top 100 Highest Grossing Movies Grouped By Genre",
            DatasetKind::VideoGames => "Top 100 Most Sold Video Games Grouped by Platform",
        }
    }

    pub fn default_url(self) -> &'static str {
        match self {
            DatasetKind::Kickstarter => {
                "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/kickstarter-funding-data.json"
            }
            DatasetKind::Movies => {
                "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/movie-data.json"
            }
            DatasetKind::VideoGames => {
                "https://cdn.freecodecamp.org/testable-projects-fcc/data/tree_map/video-game-sales-data.json"
            }
        }
    }
}

/// One node of a dataset tree as published: `{ name, children }` for groups,
/// `{ name, category, value }` for records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Published files carry numbers as strings ("4812"); plain numbers are accepted too.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RawNode>>,
}

impl RawNode {
    pub fn children(&self) -> &[RawNode] {
        self.children.as_deref().unwrap_or(&[])
    }

    pub fn is_leaf(&self) -> bool {
        self.children().is_empty()
    }

    /// Own value as a number. Missing or unparseable values count as zero.
    pub fn numeric_value(&self) -> f64 {
        let v = match &self.value {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
            Some(Value::String(s)) => s.trim().parse::<f64>().unwrap_or(0.0),
            _ => 0.0,
        };
        if v.is_finite() { v } else { 0.0 }
    }

    pub fn leaf_count(&self) -> usize {
        if self.is_leaf() {
            1
        } else {
            self.children().iter().map(RawNode::leaf_count).sum()
        }
    }
}

/// The three dataset trees, fetched together.
#[derive(Clone, Debug, PartialEq)]
pub struct Datasets {
    pub kickstarter: RawNode,
    pub movies: RawNode,
    pub video_games: RawNode,
}

impl Datasets {
    pub fn get(&self, kind: DatasetKind) -> &RawNode {
        match kind {
            DatasetKind::Kickstarter => &self.kickstarter,
            DatasetKind::Movies => &self.movies,
            DatasetKind::VideoGames => &self.video_games,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    Loading,
    Ready,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartState {
    pub datasets: Option<Rc<Datasets>>,
    pub selected: DatasetKind,
    pub status: LoadStatus,
    /// Bumped whenever the chart has to be redrawn.
    pub revision: u64,
}

impl ChartState {
    pub fn new(selected: DatasetKind) -> Self {
        Self {
            datasets: None,
            selected,
            status: LoadStatus::Loading,
            revision: 0,
        }
    }

    pub fn active_tree(&self) -> Option<&RawNode> {
        self.datasets.as_ref().map(|d| d.get(self.selected))
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum ChartAction {
    Loaded(Datasets),
    LoadFailed(String),
    Select(DatasetKind),
}

impl Reducible for ChartState {
    type Action = ChartAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use ChartAction::*;
        let mut new = (*self).clone();
        match action {
            Loaded(datasets) => {
                new.datasets = Some(Rc::new(datasets));
                new.status = LoadStatus::Ready;
                new.revision += 1;
            }
            LoadFailed(reason) => {
                new.datasets = None;
                new.status = LoadStatus::Failed(reason);
            }
            Select(kind) => {
                if kind == new.selected {
                    return self;
                }
                new.selected = kind;
                new.revision += 1;
            }
        }
        Rc::new(new)
    }
}
