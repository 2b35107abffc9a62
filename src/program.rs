use crate::block::{BlockDefinition, BlockInstance};
use serde_json::{Map, Value};

type StoreListener = Box<dyn Fn() + Send + Sync>;

#[derive(Default)]
pub struct ProgramStore {
    blocks: Vec<BlockInstance>,
    next_sequence: u64,
    listeners: Vec<StoreListener>,
}

impl ProgramStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, definition: &BlockDefinition) -> BlockInstance {
        self.append_with(definition, &Map::new())
    }

    pub fn append_with(
        &mut self,
        definition: &BlockDefinition,
        overrides: &Map<String, Value>,
    ) -> BlockInstance {
        self.next_sequence += 1;
        let instance = definition.instantiate_with(self.next_sequence, overrides);
        self.blocks.push(instance.clone());
        self.notify();
        instance
    }

    pub fn remove(&mut self, instance_id: &str) {
        if let Some(index) = self
            .blocks
            .iter()
            .position(|block| block.instance_id == instance_id)
        {
            self.blocks.remove(index);
            self.notify();
        }
    }

    pub fn clear(&mut self) {
        if !self.blocks.is_empty() {
            self.blocks.clear();
            self.notify();
        }
    }

    pub fn snapshot(&self) -> Vec<BlockInstance> {
        self.blocks.clone()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn subscribe(&mut self, listener: impl Fn() + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self) {
        for listener in &self.listeners {
            listener();
        }
    }
}
