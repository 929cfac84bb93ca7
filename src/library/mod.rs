//! Concept library: the built-in scenarios and loading authored ones.
//!
//! Built-in concepts are plain data. New ones can be written as JSON and
//! loaded with [`load_concept`].

use std::fs;
use std::path::Path;

use crate::error::{RenderError, Result};
use crate::scene::{
    Agent, Concept, Flow, Frame, Good, InformationStructure, InteractionPattern, Label,
    LabelStyle, MetaCategories, ScaleLevel, TimeStructure,
};
use crate::types::Color;

const WINE: Color = Color::hex(0x8B4513);
const SELLER: Color = Color::hex(0x7FB3D5);
const BUYER: Color = Color::hex(0xF1948A);
const TRADE: Color = Color::hex(0x52BE80);

/// Every built-in concept, in catalog order.
pub fn builtin() -> Vec<Concept> {
    vec![absolute_advantage(), market_equilibrium()]
}

/// Look up a built-in concept by display name or file stem, ignoring case.
pub fn find(name: &str) -> Result<Concept> {
    builtin()
        .into_iter()
        .find(|c| c.name.eq_ignore_ascii_case(name) || c.file_stem().eq_ignore_ascii_case(name))
        .ok_or_else(|| RenderError::UnknownConcept(name.to_string()))
}

/// Read one concept from a JSON file.
pub fn load_concept(path: &Path) -> Result<Concept> {
    let json = fs::read_to_string(path).map_err(|source| RenderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&json).map_err(|source| RenderError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A row of identical goods starting at `(x, y)`, `step` apart.
fn row(category: &str, n: usize, x: f64, y: f64, step: f64, color: Color) -> Vec<Good> {
    (0..n)
        .map(|i| {
            Good::new(category, 1, x + i as f64 * step, y)
                .color(color)
                .size(0.25)
        })
        .collect()
}

fn countries() -> Vec<Agent> {
    vec![
        Agent::new("country", "A").at(-5.0, 0.0),
        Agent::new("country", "B").at(5.0, 0.0),
    ]
}

/// One country produces every good more efficiently, yet both gain from
/// specializing and trading.
pub fn absolute_advantage() -> Concept {
    let meta = MetaCategories {
        agent_types: strings(&["country"]),
        scale_level: ScaleLevel::Macro,
        interaction_pattern: InteractionPattern::Bilateral,
        information_structure: InformationStructure::Perfect,
        time_structure: TimeStructure::Sequential,
        decision_scope: strings(&["production", "trade"]),
        equilibrium_concept: Some("comparative advantage equilibrium".into()),
    };

    // Autarky.
    let mut t0 = Frame::new(0);
    t0.agents = countries();
    t0.goods.extend(row("cloth", 10, -6.0, -2.5, 0.35, Color::WHITE));
    t0.goods.extend(row("wine", 6, -5.5, -3.5, 0.45, WINE));
    t0.goods.extend(row("cloth", 4, 4.5, -2.5, 0.35, Color::WHITE));
    t0.goods.extend(row("wine", 2, 5.0, -3.5, 0.45, WINE));
    t0.labels = vec![
        Label::new("COUNTRY A", -5.0, 1.5).style(LabelStyle::Subtitle),
        Label::new("10 cloth, 6 wine", -5.0, -4.5),
        Label::new("COUNTRY B", 5.0, 1.5).style(LabelStyle::Subtitle),
        Label::new("4 cloth, 2 wine", 5.0, -4.5),
        Label::new("NO TRADE | TOTAL: 14 cloth, 8 wine", 0.0, -6.5)
            .font_size(12.0)
            .style(LabelStyle::Subtitle),
    ];

    // Specialization and trade.
    let mut t1 = Frame::new(1);
    t1.agents = countries();
    t1.goods = (0..20)
        .map(|i| {
            Good::new(
                "cloth",
                1,
                -7.0 + (i % 10) as f64 * 0.35,
                -2.5 + (i / 10) as f64 * 0.35,
            )
            .size(0.25)
        })
        .collect();
    t1.goods.extend(row("wine", 4, 4.5, -2.5, 0.45, WINE));
    t1.flows = vec![
        Flow::new((-3.0, 0.0), (3.0, 0.0))
            .label("8 cloth →")
            .thickness(2.5)
            .color(Color::hex(0x4A90E2)),
        Flow::new((3.0, -1.0), (-3.0, -1.0))
            .label("← 2 wine")
            .thickness(2.5)
            .color(Color::hex(0xE94B3C)),
    ];
    t1.labels = vec![
        Label::new("COUNTRY A", -5.0, 1.5).style(LabelStyle::Subtitle),
        Label::new("Produces: 20 cloth", -5.0, -4.0).font_size(10.0),
        Label::new("Keeps: 12 cloth + 2 wine", -5.0, -4.8).font_size(9.0),
        Label::new("COUNTRY B", 5.0, 1.5).style(LabelStyle::Subtitle),
        Label::new("Produces: 4 wine", 5.0, -4.0).font_size(10.0),
        Label::new("Keeps: 8 cloth + 2 wine", 5.0, -4.8).font_size(9.0),
        Label::new("TRADE", 0.0, 0.8).font_size(10.0),
        Label::new(
            "SPECIALIZATION | Total: 20 cloth, 4 wine | Both better off",
            0.0,
            -6.5,
        )
        .style(LabelStyle::Subtitle),
    ];

    Concept {
        name: "Absolute Advantage".into(),
        description: "One country can produce all goods more efficiently, but trade still \
                      benefits both through specialization"
            .into(),
        meta,
        frames: vec![t0, t1],
        reference_url: Some("https://en.wikipedia.org/wiki/Absolute_advantage".into()),
    }
}

fn trader(id: &str, x: f64, y: f64, color: Color) -> Agent {
    Agent::new("individual", id).at(x, y).color(color)
}

/// Price adjusts until quantity supplied equals quantity demanded.
pub fn market_equilibrium() -> Concept {
    let meta = MetaCategories {
        agent_types: strings(&["individual", "firm"]),
        scale_level: ScaleLevel::Micro,
        interaction_pattern: InteractionPattern::MarketMediated,
        information_structure: InformationStructure::Perfect,
        time_structure: TimeStructure::Dynamic,
        decision_scope: strings(&["consumption", "production", "pricing"]),
        equilibrium_concept: Some("partial equilibrium".into()),
    };

    // Price too high: three sellers, one buyer.
    let mut t0 = Frame::new(0);
    t0.agents = vec![
        trader("S1", -3.0, 2.0, SELLER),
        trader("S2", -3.0, 0.0, SELLER),
        trader("S3", -3.0, -2.0, SELLER),
        trader("B1", 3.0, 0.0, BUYER),
    ];
    t0.flows = vec![Flow::new((-1.0, 0.0), (1.0, 0.0)).color(TRADE)];
    t0.labels = vec![
        Label::new("SUPPLY: 3 units", -3.0, 3.5).style(LabelStyle::Subtitle),
        Label::new("DEMAND: 1 unit", 3.0, 3.5).style(LabelStyle::Subtitle),
        Label::new("PRICE = $10 (TOO HIGH)", 0.0, -3.5)
            .font_size(12.0)
            .style(LabelStyle::Subtitle),
        Label::new("SURPLUS: 2 unsold", 0.0, -5.0),
    ];

    // Equilibrium: one seller exits, one buyer enters.
    let mut t1 = Frame::new(1);
    t1.agents = vec![
        trader("S1", -3.0, 1.0, SELLER),
        trader("S2", -3.0, -1.0, SELLER),
        trader("B1", 3.0, 1.0, BUYER),
        trader("B2", 3.0, -1.0, BUYER),
    ];
    t1.flows = vec![
        Flow::new((-1.0, 1.0), (1.0, 1.0)).color(TRADE),
        Flow::new((-1.0, -1.0), (1.0, -1.0)).color(TRADE),
    ];
    t1.labels = vec![
        Label::new("SUPPLY: 2 units", -3.0, 3.5).style(LabelStyle::Subtitle),
        Label::new("DEMAND: 2 units", 3.0, 3.5).style(LabelStyle::Subtitle),
        Label::new("PRICE = $7 (EQUILIBRIUM)", 0.0, -3.5)
            .font_size(12.0)
            .style(LabelStyle::Subtitle),
        Label::new("SURPLUS: 0", 0.0, -5.0),
    ];

    Concept {
        name: "Market Equilibrium".into(),
        description: "Price adjusts until quantity supplied equals quantity demanded".into(),
        meta,
        frames: vec![t0, t1],
        reference_url: Some("https://en.wikipedia.org/wiki/Economic_equilibrium".into()),
    }
}
