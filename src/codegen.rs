use crate::block::{BlockInstance, BlockKind};

pub const EMPTY_PROGRAM_PLACEHOLDER: &str = "// Add blocks to see the generated code!\n// This shows what your visual blocks do in real JavaScript";
pub const PREAMBLE: &str = "// Generated JavaScript code from your blocks:\n\n";

pub const DEFAULT_MOVE_STEPS: f64 = 10.0;
pub const DEFAULT_MESSAGE_TEXT: &str = "Hello!";
pub const DEFAULT_MESSAGE_SECONDS: f64 = 2.0;

pub fn generate(program: &[BlockInstance]) -> String {
    if program.is_empty() {
        return EMPTY_PROGRAM_PLACEHOLDER.to_string();
    }

    let mut code = String::from(PREAMBLE);
    for block in program {
        emit_block(&mut code, block);
        code.push('\n');
    }
    code
}

fn emit_block(code: &mut String, block: &BlockInstance) {
    match block.kind {
        BlockKind::Start => {
            code.push_str("// Event: When program starts\n");
            code.push_str("function startProgram() {\n");
        }
        BlockKind::Move => {
            let steps = format_number(block.param_f64("steps", DEFAULT_MOVE_STEPS));
            code.push_str(&format!("  // Move the sprite {} steps forward\n", steps));
            code.push_str(&format!("  sprite.x += {};\n", steps));
        }
        BlockKind::Say => {
            let text = block.param_str("text", DEFAULT_MESSAGE_TEXT);
            let duration = format_number(block.param_f64("duration", DEFAULT_MESSAGE_SECONDS));
            code.push_str(&format!("  // Say \"{}\" for {} seconds\n", text, duration));
            code.push_str(&format!("  showMessage(\"{}\");\n", text));
        }
        BlockKind::Think => {
            let text = block.param_str("text", DEFAULT_MESSAGE_TEXT);
            let duration = format_number(block.param_f64("duration", DEFAULT_MESSAGE_SECONDS));
            code.push_str(&format!("  // Think \"{}\" for {} seconds\n", text, duration));
            code.push_str(&format!("  showThought(\"{}\");\n", text));
        }
        BlockKind::DanceMove | BlockKind::SpinCrazy => {
            code.push_str("  // Do a dance move (spin 4 times)\n");
            code.push_str("  for (let i = 0; i < 4; i++) {\n");
            code.push_str("    sprite.rotation += 90;\n");
            code.push_str("  }\n");
        }
        _ => {
            code.push_str(&format!("  // {}\n", block.display_label));
        }
    }
}

fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}
