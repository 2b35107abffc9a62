use crate::block::{BlockInstance, BlockKind};
use crate::codegen::{DEFAULT_MESSAGE_SECONDS, DEFAULT_MESSAGE_TEXT, DEFAULT_MOVE_STEPS};
use crate::stage::Stage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

pub const INTER_BLOCK_PAUSE: Duration = Duration::from_millis(300);
pub const SPIN_STEP_PAUSE: Duration = Duration::from_millis(200);
pub const SPIN_STEP_DEGREES: f64 = 90.0;
pub const SPIN_REPETITIONS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
    Rejected,
}

pub struct Interpreter {
    stage: Arc<Stage>,
    running: AtomicBool,
    cancel_requested: AtomicBool,
}

impl Interpreter {
    pub fn new(stage: Arc<Stage>) -> Self {
        Self {
            stage,
            running: AtomicBool::new(false),
            cancel_requested: AtomicBool::new(false),
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    pub fn stop(&self) {
        self.cancel_requested.store(true, Ordering::SeqCst);
    }

    pub async fn run(&self, program: &[BlockInstance]) -> RunOutcome {
        if program.is_empty() {
            return RunOutcome::Rejected;
        }
        if self.running.swap(true, Ordering::SeqCst) {
            return RunOutcome::Rejected;
        }

        self.cancel_requested.store(false, Ordering::SeqCst);
        self.stage.reset_pose();
        let outcome = self.execute(program).await;
        self.running.store(false, Ordering::SeqCst);
        outcome
    }

    async fn execute(&self, program: &[BlockInstance]) -> RunOutcome {
        for block in program {
            if self.cancelled() {
                return RunOutcome::Cancelled;
            }
            match block.kind {
                BlockKind::Move => {
                    self.stage
                        .nudge_x(block.param_f64("steps", DEFAULT_MOVE_STEPS));
                }
                BlockKind::Say | BlockKind::Think => {
                    let text = block.param_str("text", DEFAULT_MESSAGE_TEXT);
                    let seconds = block
                        .param_f64("duration", DEFAULT_MESSAGE_SECONDS)
                        .max(0.0);
                    self.stage.set_message(&text);
                    sleep(Duration::from_secs_f64(seconds)).await;
                    self.stage.clear_message();
                }
                BlockKind::DanceMove | BlockKind::SpinCrazy => {
                    for _ in 0..SPIN_REPETITIONS {
                        self.stage.rotate_by(SPIN_STEP_DEGREES);
                        sleep(SPIN_STEP_PAUSE).await;
                        if self.cancelled() {
                            return RunOutcome::Cancelled;
                        }
                    }
                }
                _ => {}
            }
            if self.cancelled() {
                return RunOutcome::Cancelled;
            }
            sleep(INTER_BLOCK_PAUSE).await;
        }
        RunOutcome::Completed
    }

    fn cancelled(&self) -> bool {
        if self.cancel_requested.load(Ordering::SeqCst) {
            self.stage.clear_message();
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::ProgramStore;
    use crate::registry;
    use serde_json::{json, Map};
    use tokio::task::yield_now;

    fn overrides(entries: &[(&str, serde_json::Value)]) -> Map<String, serde_json::Value> {
        entries
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect()
    }

    fn interpreter() -> (Arc<Interpreter>, Arc<Stage>) {
        let stage = Arc::new(Stage::new());
        (Arc::new(Interpreter::new(stage.clone())), stage)
    }

    #[tokio::test(start_paused = true)]
    async fn move_block_shifts_x_only() {
        let (interp, stage) = interpreter();
        let mut store = ProgramStore::new();
        store.append_with(
            registry::find(BlockKind::Move).unwrap(),
            &overrides(&[("steps", json!(25))]),
        );

        let outcome = interp.run(&store.snapshot()).await;
        assert_eq!(outcome, RunOutcome::Completed);
        let actor = stage.actor();
        assert_eq!(actor.position.x, 25.0);
        assert_eq!(actor.position.y, 0.0);
        assert_eq!(actor.rotation_degrees, 0.0);
        assert!(!interp.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn say_shows_the_message_then_clears_it_before_idle() {
        let (interp, stage) = interpreter();
        let mut store = ProgramStore::new();
        store.append_with(
            registry::find(BlockKind::Say).unwrap(),
            &overrides(&[("text", json!("Hi")), ("duration", json!(1))]),
        );
        let program = store.snapshot();

        let runner = interp.clone();
        let handle = tokio::spawn(async move { runner.run(&program).await });
        for _ in 0..8 {
            yield_now().await;
        }
        assert!(interp.is_running());
        assert_eq!(stage.message(), Some("Hi".to_string()));

        let outcome = handle.await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(stage.message(), None);
        assert!(!interp.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn dance_spins_a_full_turn() {
        let (interp, stage) = interpreter();
        let mut store = ProgramStore::new();
        store.append(registry::find(BlockKind::DanceMove).unwrap());

        let outcome = interp.run(&store.snapshot()).await;
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(stage.actor().rotation_degrees, 360.0);
    }

    #[tokio::test(start_paused = true)]
    async fn spin_crazy_behaves_like_dance() {
        let (interp, stage) = interpreter();
        let mut store = ProgramStore::new();
        store.append(registry::find(BlockKind::SpinCrazy).unwrap());

        interp.run(&store.snapshot()).await;
        assert_eq!(stage.actor().rotation_degrees, 360.0);
    }

    #[tokio::test(start_paused = true)]
    async fn unhandled_kinds_are_paced_no_ops() {
        let (interp, stage) = interpreter();
        let mut store = ProgramStore::new();
        for kind in [BlockKind::Jump, BlockKind::Wait, BlockKind::Repeat] {
            store.append(registry::find(kind).unwrap());
        }

        let started = tokio::time::Instant::now();
        let outcome = interp.run(&store.snapshot()).await;
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(stage.actor(), crate::stage::ActorState::initial());
        assert_eq!(started.elapsed(), INTER_BLOCK_PAUSE * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_program_is_rejected_without_reset() {
        let (interp, stage) = interpreter();
        stage.nudge_x(5.0);

        let outcome = interp.run(&[]).await;
        assert_eq!(outcome, RunOutcome::Rejected);
        assert!(!interp.is_running());
        assert_eq!(stage.actor().position.x, 5.0);
    }

    #[tokio::test(start_paused = true)]
    async fn second_run_is_rejected_while_the_first_is_active() {
        let (interp, stage) = interpreter();
        let mut store = ProgramStore::new();
        store.append_with(
            registry::find(BlockKind::Say).unwrap(),
            &overrides(&[("text", json!("busy")), ("duration", json!(5))]),
        );
        let program = store.snapshot();

        let runner = interp.clone();
        let first = tokio::spawn(async move { runner.run(&program).await });
        for _ in 0..8 {
            yield_now().await;
        }
        assert!(interp.is_running());

        let mut other = ProgramStore::new();
        other.append_with(
            registry::find(BlockKind::Move).unwrap(),
            &overrides(&[("steps", json!(50))]),
        );
        let outcome = interp.run(&other.snapshot()).await;
        assert_eq!(outcome, RunOutcome::Rejected);
        assert_eq!(stage.actor().position.x, 0.0);
        assert_eq!(stage.message(), Some("busy".to_string()));

        assert_eq!(first.await.unwrap(), RunOutcome::Completed);
        assert_eq!(stage.actor().position.x, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn run_uses_the_snapshot_taken_at_start() {
        let (interp, stage) = interpreter();
        let mut store = ProgramStore::new();
        store.append_with(
            registry::find(BlockKind::Move).unwrap(),
            &overrides(&[("steps", json!(5))]),
        );
        let program = store.snapshot();

        let runner = interp.clone();
        let handle = tokio::spawn(async move { runner.run(&program).await });
        for _ in 0..8 {
            yield_now().await;
        }
        store.append_with(
            registry::find(BlockKind::Move).unwrap(),
            &overrides(&[("steps", json!(100))]),
        );
        store.clear();

        assert_eq!(handle.await.unwrap(), RunOutcome::Completed);
        assert_eq!(stage.actor().position.x, 5.0);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_cancels_between_steps() {
        let (interp, stage) = interpreter();
        let mut store = ProgramStore::new();
        store.append_with(
            registry::find(BlockKind::Say).unwrap(),
            &overrides(&[("text", json!("Hi")), ("duration", json!(5))]),
        );
        store.append_with(
            registry::find(BlockKind::Move).unwrap(),
            &overrides(&[("steps", json!(50))]),
        );
        let program = store.snapshot();

        let runner = interp.clone();
        let handle = tokio::spawn(async move { runner.run(&program).await });
        for _ in 0..8 {
            yield_now().await;
        }
        assert!(interp.is_running());
        interp.stop();

        let outcome = handle.await.unwrap();
        assert_eq!(outcome, RunOutcome::Cancelled);
        assert_eq!(stage.actor().position.x, 0.0);
        assert_eq!(stage.message(), None);
        assert!(!interp.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn a_fresh_run_clears_a_stale_stop_request() {
        let (interp, stage) = interpreter();
        interp.stop();

        let mut store = ProgramStore::new();
        store.append(registry::find(BlockKind::DanceMove).unwrap());
        let outcome = interp.run(&store.snapshot()).await;
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(stage.actor().rotation_degrees, 360.0);
    }
}
