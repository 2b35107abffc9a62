use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Events,
    Motion,
    Looks,
    Control,
    Games,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Events => "Events",
            Category::Motion => "Motion",
            Category::Looks => "Looks",
            Category::Control => "Control",
            Category::Games => "Games",
        }
    }

    pub fn parse(name: &str) -> Option<Category> {
        match name.to_lowercase().as_str() {
            "events" => Some(Category::Events),
            "motion" => Some(Category::Motion),
            "looks" => Some(Category::Looks),
            "control" => Some(Category::Control),
            "games" => Some(Category::Games),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Event,
    Action,
    Control,
    Sensing,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Event => "event",
            Classification::Action => "action",
            Classification::Control => "control",
            Classification::Sensing => "sensing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Start,
    SpriteClicked,
    KeyPressed,
    Move,
    TurnRight,
    TurnLeft,
    GoTo,
    Say,
    Think,
    Show,
    Hide,
    Wait,
    Repeat,
    DanceMove,
    Jump,
    SpinCrazy,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BlockKind::Start => "start",
            BlockKind::SpriteClicked => "click",
            BlockKind::KeyPressed => "key_space",
            BlockKind::Move => "move",
            BlockKind::TurnRight => "turn_right",
            BlockKind::TurnLeft => "turn_left",
            BlockKind::GoTo => "goto",
            BlockKind::Say => "say",
            BlockKind::Think => "think",
            BlockKind::Show => "show",
            BlockKind::Hide => "hide",
            BlockKind::Wait => "wait",
            BlockKind::Repeat => "repeat",
            BlockKind::DanceMove => "dance_move",
            BlockKind::Jump => "jump",
            BlockKind::SpinCrazy => "spin_crazy",
        }
    }

    pub fn parse(name: &str) -> Option<BlockKind> {
        match name {
            "start" => Some(BlockKind::Start),
            "click" => Some(BlockKind::SpriteClicked),
            "key_space" => Some(BlockKind::KeyPressed),
            "move" => Some(BlockKind::Move),
            "turn_right" => Some(BlockKind::TurnRight),
            "turn_left" => Some(BlockKind::TurnLeft),
            "goto" => Some(BlockKind::GoTo),
            "say" => Some(BlockKind::Say),
            "think" => Some(BlockKind::Think),
            "show" => Some(BlockKind::Show),
            "hide" => Some(BlockKind::Hide),
            "wait" => Some(BlockKind::Wait),
            "repeat" => Some(BlockKind::Repeat),
            "dance_move" => Some(BlockKind::DanceMove),
            "jump" => Some(BlockKind::Jump),
            "spin_crazy" => Some(BlockKind::SpinCrazy),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlockDefinition {
    pub kind: BlockKind,
    pub category: Category,
    pub classification: Classification,
    pub display_label: &'static str,
    pub default_parameters: Map<String, Value>,
    pub supports_children: bool,
}

impl BlockDefinition {
    pub fn instantiate(&self, sequence: u64) -> BlockInstance {
        self.instantiate_with(sequence, &Map::new())
    }

    pub fn instantiate_with(&self, sequence: u64, overrides: &Map<String, Value>) -> BlockInstance {
        let mut parameters = self.default_parameters.clone();
        for (name, value) in overrides {
            parameters.insert(name.clone(), value.clone());
        }
        BlockInstance {
            instance_id: format!("{}-{}", self.kind.as_str(), sequence),
            kind: self.kind,
            category: self.category,
            display_label: self.display_label.to_string(),
            parameters,
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct BlockInstance {
    pub instance_id: String,
    pub kind: BlockKind,
    pub category: Category,
    pub display_label: String,
    pub parameters: Map<String, Value>,
    pub children: Vec<BlockInstance>,
}

impl BlockInstance {
    pub fn param_f64(&self, name: &str, fallback: f64) -> f64 {
        match self.parameters.get(name) {
            Some(Value::Number(n)) => n.as_f64().unwrap_or(fallback),
            Some(Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite())
                .unwrap_or(fallback),
            _ => fallback,
        }
    }

    pub fn param_str(&self, name: &str, fallback: &str) -> String {
        match self.parameters.get(name) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => fallback.to_string(),
        }
    }
}
