use crate::block::{BlockDefinition, BlockKind, Category, Classification};
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

pub const CATEGORY_TABS: [Category; 5] = [
    Category::Games,
    Category::Events,
    Category::Motion,
    Category::Looks,
    Category::Control,
];

pub fn definitions() -> &'static [BlockDefinition] {
    static CATALOG: OnceLock<Vec<BlockDefinition>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

pub fn definitions_in(category: Category) -> Vec<&'static BlockDefinition> {
    definitions()
        .iter()
        .filter(|def| def.category == category)
        .collect()
}

pub fn find(kind: BlockKind) -> Option<&'static BlockDefinition> {
    definitions().iter().find(|def| def.kind == kind)
}

fn build_catalog() -> Vec<BlockDefinition> {
    vec![
        event(BlockKind::Start, "🏁 When green flag clicked"),
        event(BlockKind::SpriteClicked, "👆 When sprite clicked"),
        event(BlockKind::KeyPressed, "⌨️ When SPACE key pressed"),
        action(
            BlockKind::Move,
            Category::Motion,
            "➡️ Move 10 steps",
            params(&[("steps", json!(10))]),
        ),
        action(
            BlockKind::TurnRight,
            Category::Motion,
            "↻ Turn right 15 degrees",
            params(&[("degrees", json!(15))]),
        ),
        action(
            BlockKind::TurnLeft,
            Category::Motion,
            "↺ Turn left 15 degrees",
            params(&[("degrees", json!(15))]),
        ),
        action(
            BlockKind::GoTo,
            Category::Motion,
            "📍 Go to x:0 y:0",
            params(&[("x", json!(0)), ("y", json!(0))]),
        ),
        action(
            BlockKind::Say,
            Category::Looks,
            "💬 Say \"Hello!\" for 2 seconds",
            params(&[("text", json!("Hello!")), ("duration", json!(2))]),
        ),
        action(
            BlockKind::Think,
            Category::Looks,
            "🤔 Think \"Hmm...\" for 2 seconds",
            params(&[("text", json!("Hmm...")), ("duration", json!(2))]),
        ),
        action(BlockKind::Show, Category::Looks, "👁️ Show", Map::new()),
        action(BlockKind::Hide, Category::Looks, "🙈 Hide", Map::new()),
        control(
            BlockKind::Wait,
            "⏱️ Wait 1 second",
            params(&[("duration", json!(1))]),
            false,
        ),
        control(
            BlockKind::Repeat,
            "🔄 Repeat 10 times",
            params(&[("times", json!(10))]),
            true,
        ),
        action(
            BlockKind::DanceMove,
            Category::Games,
            "💃 Do a dance move!",
            Map::new(),
        ),
        action(
            BlockKind::Jump,
            Category::Games,
            "🦘 Jump up and down!",
            Map::new(),
        ),
        action(
            BlockKind::SpinCrazy,
            Category::Games,
            "🌪️ Spin like crazy!",
            Map::new(),
        ),
    ]
}

fn event(kind: BlockKind, display_label: &'static str) -> BlockDefinition {
    BlockDefinition {
        kind,
        category: Category::Events,
        classification: Classification::Event,
        display_label,
        default_parameters: Map::new(),
        supports_children: false,
    }
}

fn action(
    kind: BlockKind,
    category: Category,
    display_label: &'static str,
    default_parameters: Map<String, Value>,
) -> BlockDefinition {
    BlockDefinition {
        kind,
        category,
        classification: Classification::Action,
        display_label,
        default_parameters,
        supports_children: false,
    }
}

fn control(
    kind: BlockKind,
    display_label: &'static str,
    default_parameters: Map<String, Value>,
    supports_children: bool,
) -> BlockDefinition {
    BlockDefinition {
        kind,
        category: Category::Control,
        classification: Classification::Control,
        display_label,
        default_parameters,
        supports_children,
    }
}

fn params(entries: &[(&str, Value)]) -> Map<String, Value> {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}
