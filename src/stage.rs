use std::sync::Mutex;

pub const NATURAL_SCALE_PERCENT: f64 = 100.0;
pub const DEFAULT_COSTUME_GLYPH: &str = "🐶";

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActorState {
    pub position: Vec2,
    pub rotation_degrees: f64,
    pub scale_percent: f64,
    pub visible: bool,
    pub costume_glyph: String,
}

impl ActorState {
    pub fn initial() -> Self {
        Self {
            position: Vec2::default(),
            rotation_degrees: 0.0,
            scale_percent: NATURAL_SCALE_PERCENT,
            visible: true,
            costume_glyph: DEFAULT_COSTUME_GLYPH.to_string(),
        }
    }
}

type StageListener = Box<dyn Fn() + Send + Sync>;

pub struct Stage {
    actor: Mutex<ActorState>,
    message: Mutex<Option<String>>,
    listeners: Mutex<Vec<StageListener>>,
}

impl Stage {
    pub fn new() -> Self {
        Self {
            actor: Mutex::new(ActorState::initial()),
            message: Mutex::new(None),
            listeners: Mutex::new(Vec::new()),
        }
    }

    pub fn actor(&self) -> ActorState {
        self.actor.lock().unwrap().clone()
    }

    pub fn message(&self) -> Option<String> {
        self.message.lock().unwrap().clone()
    }

    pub fn subscribe(&self, listener: impl Fn() + Send + Sync + 'static) {
        self.listeners.lock().unwrap().push(Box::new(listener));
    }

    pub(crate) fn reset_pose(&self) {
        {
            let mut actor = self.actor.lock().unwrap();
            let glyph = actor.costume_glyph.clone();
            *actor = ActorState {
                costume_glyph: glyph,
                ..ActorState::initial()
            };
        }
        *self.message.lock().unwrap() = None;
        self.notify();
    }

    pub(crate) fn nudge_x(&self, delta: f64) {
        self.actor.lock().unwrap().position.x += delta;
        self.notify();
    }

    pub(crate) fn rotate_by(&self, degrees: f64) {
        self.actor.lock().unwrap().rotation_degrees += degrees;
        self.notify();
    }

    pub(crate) fn set_message(&self, text: &str) {
        *self.message.lock().unwrap() = Some(text.to_string());
        self.notify();
    }

    pub(crate) fn clear_message(&self) {
        let had_message = {
            let mut message = self.message.lock().unwrap();
            message.take().is_some()
        };
        if had_message {
            self.notify();
        }
    }

    // Called with the actor and message locks released.
    fn notify(&self) {
        let listeners = self.listeners.lock().unwrap();
        for listener in listeners.iter() {
            listener();
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new()
    }
}
