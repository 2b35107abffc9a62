use crate::block::{BlockDefinition, BlockInstance};
use crate::codegen;
use crate::interpreter::{Interpreter, RunOutcome};
use crate::program::ProgramStore;
use crate::stage::{ActorState, Stage};
use serde_json::{Map, Value};
use std::sync::Arc;

pub struct Studio {
    store: ProgramStore,
    stage: Arc<Stage>,
    interpreter: Interpreter,
}

impl Studio {
    pub fn new() -> Self {
        let stage = Arc::new(Stage::new());
        Self {
            store: ProgramStore::new(),
            interpreter: Interpreter::new(stage.clone()),
            stage,
        }
    }

    pub fn add_block(&mut self, definition: &BlockDefinition) -> BlockInstance {
        self.store.append(definition)
    }

    pub fn add_block_with(
        &mut self,
        definition: &BlockDefinition,
        overrides: &Map<String, Value>,
    ) -> BlockInstance {
        self.store.append_with(definition, overrides)
    }

    pub fn remove_block(&mut self, instance_id: &str) {
        self.store.remove(instance_id);
    }

    pub fn clear_program(&mut self) {
        self.store.clear();
    }

    pub fn program(&self) -> Vec<BlockInstance> {
        self.store.snapshot()
    }

    pub fn block_count(&self) -> usize {
        self.store.len()
    }

    pub fn generated_code(&self) -> String {
        codegen::generate(&self.store.snapshot())
    }

    pub fn stage(&self) -> &Arc<Stage> {
        &self.stage
    }

    pub fn actor(&self) -> ActorState {
        self.stage.actor()
    }

    pub fn message(&self) -> Option<String> {
        self.stage.message()
    }

    pub fn is_running(&self) -> bool {
        self.interpreter.is_running()
    }

    pub fn subscribe_program(&mut self, listener: impl Fn() + Send + Sync + 'static) {
        self.store.subscribe(listener);
    }

    pub async fn run(&self) -> RunOutcome {
        let snapshot = self.store.snapshot();
        self.interpreter.run(&snapshot).await
    }

    pub fn stop(&self) {
        self.interpreter.stop();
    }
}

impl Default for Studio {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;
    use crate::registry;
    use serde_json::json;

    #[test]
    fn program_mutations_flow_through_the_store() {
        let mut studio = Studio::new();
        let mover = registry::find(BlockKind::Move).unwrap();
        let say = registry::find(BlockKind::Say).unwrap();

        let first = studio.add_block(mover);
        studio.add_block(say);
        assert_eq!(studio.block_count(), 2);

        studio.remove_block(&first.instance_id);
        let kinds: Vec<BlockKind> = studio.program().iter().map(|b| b.kind).collect();
        assert_eq!(kinds, vec![BlockKind::Say]);

        studio.clear_program();
        assert_eq!(studio.block_count(), 0);
    }

    #[test]
    fn generated_code_reflects_the_current_program() {
        let mut studio = Studio::new();
        assert_eq!(studio.generated_code(), codegen::EMPTY_PROGRAM_PLACEHOLDER);

        let mut overrides = Map::new();
        overrides.insert("steps".to_string(), json!(7));
        studio.add_block_with(registry::find(BlockKind::Move).unwrap(), &overrides);
        assert!(studio.generated_code().contains("sprite.x += 7;"));
    }

    #[tokio::test(start_paused = true)]
    async fn run_drives_the_stage_actor() {
        let mut studio = Studio::new();
        let mut overrides = Map::new();
        overrides.insert("steps".to_string(), json!(25));
        studio.add_block_with(registry::find(BlockKind::Move).unwrap(), &overrides);

        let outcome = studio.run().await;
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(studio.actor().position.x, 25.0);
        assert_eq!(studio.message(), None);
        assert!(!studio.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn run_on_an_empty_program_is_rejected() {
        let studio = Studio::new();
        assert_eq!(studio.run().await, RunOutcome::Rejected);
        assert!(!studio.is_running());
    }
}
