//! Scene model: the human-authored description of one concept.
//!
//! These types define *what exists* in a frame and where it sits, not how it
//! is drawn. The renderer reads a single `Frame` and turns it into
//! `Primitive`s.

use serde::{Deserialize, Serialize};

use crate::types::{Color, Point};

// ---------------------------------------------------------------------------
// Agents
// ---------------------------------------------------------------------------

/// The kind of economic actor. Decides which shape an agent is drawn as.
///
/// Kind strings outside the known set are kept as `Unrecognized` and draw nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AgentKind {
    Individual,
    Firm,
    Institution,
    Country,
    Market,
    Unrecognized(String),
}

impl AgentKind {
    pub fn as_str(&self) -> &str {
        match self {
            AgentKind::Individual => "individual",
            AgentKind::Firm => "firm",
            AgentKind::Institution => "institution",
            AgentKind::Country => "country",
            AgentKind::Market => "market",
            AgentKind::Unrecognized(other) => other,
        }
    }
}

impl From<String> for AgentKind {
    fn from(s: String) -> Self {
        match s.as_str() {
            "individual" => AgentKind::Individual,
            "firm" => AgentKind::Firm,
            "institution" => AgentKind::Institution,
            "country" => AgentKind::Country,
            "market" => AgentKind::Market,
            _ => AgentKind::Unrecognized(s),
        }
    }
}

impl From<&str> for AgentKind {
    fn from(s: &str) -> Self {
        AgentKind::from(s.to_string())
    }
}

impl From<AgentKind> for String {
    fn from(kind: AgentKind) -> Self {
        kind.as_str().to_string()
    }
}

fn default_count() -> u32 {
    1
}

fn default_agent_color() -> Color {
    Color::TAN
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub kind: AgentKind,
    pub id: String,
    /// How many actors this marker stands for.
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub position: Point,
    #[serde(default = "default_agent_color")]
    pub color: Color,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Agent {
    pub fn new(kind: impl Into<AgentKind>, id: impl Into<String>) -> Self {
        Agent {
            kind: kind.into(),
            id: id.into(),
            count: default_count(),
            position: Point::default(),
            color: default_agent_color(),
            label: None,
        }
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

// ---------------------------------------------------------------------------
// Goods, flows, labels
// ---------------------------------------------------------------------------

fn default_good_color() -> Color {
    Color::WHITE
}

fn default_good_size() -> f64 {
    0.3
}

/// A unit or batch of a tradeable item, drawn as a small square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Good {
    pub category: String,
    pub count: u32,
    pub position: Point,
    #[serde(default = "default_good_color")]
    pub color: Color,
    #[serde(default = "default_good_size")]
    pub size: f64,
}

impl Good {
    pub fn new(category: impl Into<String>, count: u32, x: f64, y: f64) -> Self {
        Good {
            category: category.into(),
            count,
            position: Point::new(x, y),
            color: default_good_color(),
            size: default_good_size(),
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }
}

fn default_thickness() -> f64 {
    2.0
}

fn default_flow_color() -> Color {
    Color::WHITE
}

/// A directed exchange between two points.
///
/// `from` and `to` must differ; degenerate flows are not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flow {
    pub from: Point,
    pub to: Point,
    #[serde(default)]
    pub label: String,
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    #[serde(default = "default_flow_color")]
    pub color: Color,
}

impl Flow {
    pub fn new(from: impl Into<Point>, to: impl Into<Point>) -> Self {
        Flow {
            from: from.into(),
            to: to.into(),
            label: String::new(),
            thickness: default_thickness(),
            color: default_flow_color(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelStyle {
    #[default]
    Normal,
    Title,
    Subtitle,
}

fn default_font_size() -> f64 {
    11.0
}

/// A text annotation drawn over a glass panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub text: String,
    pub position: Point,
    /// Only honored by `LabelStyle::Normal`; titles and subtitles use fixed sizes.
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default)]
    pub style: LabelStyle,
}

impl Label {
    pub fn new(text: impl Into<String>, x: f64, y: f64) -> Self {
        Label {
            text: text.into(),
            position: Point::new(x, y),
            font_size: default_font_size(),
            style: LabelStyle::Normal,
        }
    }

    pub fn font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn style(mut self, style: LabelStyle) -> Self {
        self.style = style;
        self
    }
}

// ---------------------------------------------------------------------------
// Frames and concepts
// ---------------------------------------------------------------------------

/// The complete visual state at one time index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub t: u32,
    #[serde(default)]
    pub agents: Vec<Agent>,
    #[serde(default)]
    pub goods: Vec<Good>,
    #[serde(default)]
    pub flows: Vec<Flow>,
    #[serde(default)]
    pub labels: Vec<Label>,
}

impl Frame {
    pub fn new(t: u32) -> Self {
        Frame {
            t,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleLevel {
    Micro,
    Meso,
    Macro,
    MultiLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionPattern {
    Isolated,
    Bilateral,
    Oligopolistic,
    Competitive,
    Hierarchical,
    Network,
    MarketMediated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InformationStructure {
    Perfect,
    Imperfect,
    Asymmetric,
    Signaling,
    Learning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeStructure {
    Static,
    Sequential,
    Dynamic,
    Stochastic,
}

/// Categorization of a concept. Carried for authors and catalogs; the
/// renderer never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaCategories {
    pub agent_types: Vec<String>,
    pub scale_level: ScaleLevel,
    pub interaction_pattern: InteractionPattern,
    pub information_structure: InformationStructure,
    pub time_structure: TimeStructure,
    pub decision_scope: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equilibrium_concept: Option<String>,
}

/// A named economic scenario: an ordered sequence of frames plus metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Concept {
    pub name: String,
    pub description: String,
    pub meta: MetaCategories,
    pub frames: Vec<Frame>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_url: Option<String>,
}

impl Concept {
    /// Snake-case file stem: `"Absolute Advantage"` → `absolute_advantage`.
    pub fn file_stem(&self) -> String {
        let mut stem = String::with_capacity(self.name.len());
        for ch in self.name.chars() {
            if ch.is_ascii_alphanumeric() {
                stem.push(ch.to_ascii_lowercase());
            } else if !stem.is_empty() && !stem.ends_with('_') {
                stem.push('_');
            }
        }
        while stem.ends_with('_') {
            stem.pop();
        }
        stem
    }

    /// Title drawn at the top of a rendered frame.
    pub fn title_for(&self, frame: &Frame) -> String {
        format!("{} (t={})", self.name, frame.t)
    }
}
