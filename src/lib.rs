pub mod block;
pub mod codegen;
pub mod program;
pub mod registry;
pub mod stage;

#[cfg(not(target_arch = "wasm32"))]
pub mod cli;

#[cfg(not(target_arch = "wasm32"))]
pub mod interpreter;

#[cfg(not(target_arch = "wasm32"))]
pub mod studio;

#[cfg(all(target_arch = "wasm32", feature = "wasm-bindings"))]
pub mod wasm;

use anyhow::{anyhow, bail, Context, Result};
use block::BlockKind;
use program::ProgramStore;
use serde_json::{Map, Value};

#[cfg(not(target_arch = "wasm32"))]
use block::Category;
#[cfg(not(target_arch = "wasm32"))]
use interpreter::RunOutcome;
#[cfg(not(target_arch = "wasm32"))]
use regex::Regex;
#[cfg(not(target_arch = "wasm32"))]
use studio::Studio;

#[cfg(not(target_arch = "wasm32"))]
pub async fn run_cli(args: &cli::Args) -> Result<()> {
    if args.list_blocks {
        return print_palette(args.category.as_deref());
    }
    if args.category.is_some() {
        bail!("--category requires --list-blocks.");
    }

    let specs = parse_block_specs(&args.blocks)?;
    let mut studio = Studio::new();
    for (kind, overrides) in &specs {
        let definition = registry::find(*kind)
            .ok_or_else(|| anyhow!("Block '{}' is not in the palette.", kind.as_str()))?;
        studio.add_block_with(definition, overrides);
    }

    if args.code {
        println!("{}", studio.generated_code());
        return Ok(());
    }

    print_program(&studio);
    if args.trace {
        attach_stage_trace(&studio);
    }
    match studio.run().await {
        RunOutcome::Completed => {
            eprintln!("[Run] complete");
            print_final_pose(&studio);
        }
        RunOutcome::Cancelled => eprintln!("[Run] cancelled before the last block"),
        RunOutcome::Rejected => eprintln!("[Run] nothing to run (empty program)"),
    }
    Ok(())
}

pub fn generate_code_from_json(program_json: &str) -> Result<String> {
    let parsed: Value =
        serde_json::from_str(program_json).context("Program description is not valid JSON.")?;
    let entries = parsed
        .as_array()
        .ok_or_else(|| anyhow!("Program description must be a JSON array."))?;

    let mut store = ProgramStore::new();
    for entry in entries {
        let (kind_name, overrides) = match entry {
            Value::String(name) => (name.as_str(), Map::new()),
            Value::Object(fields) => {
                let name = fields
                    .get("kind")
                    .and_then(Value::as_str)
                    .ok_or_else(|| anyhow!("Program entry is missing a 'kind' string."))?;
                let params = fields
                    .get("params")
                    .and_then(Value::as_object)
                    .cloned()
                    .unwrap_or_default();
                (name, params)
            }
            _ => bail!("Program entries must be kind strings or {{kind, params}} objects."),
        };
        let kind = BlockKind::parse(kind_name)
            .ok_or_else(|| anyhow!("Unknown block kind '{}'.", kind_name))?;
        let definition = registry::find(kind)
            .ok_or_else(|| anyhow!("Block '{}' is not in the palette.", kind_name))?;
        store.append_with(definition, &overrides);
    }
    Ok(codegen::generate(&store.snapshot()))
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_block_specs(specs: &[String]) -> Result<Vec<(BlockKind, Map<String, Value>)>> {
    let spec_re = Regex::new(r"^(?P<kind>[a-z][a-z0-9_]*)(?:\{(?P<params>[^{}]*)\})?$")?;
    let mut parsed = Vec::new();
    for spec in specs {
        let captures = spec_re.captures(spec.trim()).ok_or_else(|| {
            anyhow!(
                "Malformed block spec '{}'. Expected kind or kind{{param=value,...}}.",
                spec
            )
        })?;
        let kind_name = &captures["kind"];
        let kind = BlockKind::parse(kind_name).ok_or_else(|| {
            anyhow!(
                "Unknown block kind '{}'. Use --list-blocks to see the palette.",
                kind_name
            )
        })?;

        let mut overrides = Map::new();
        if let Some(params) = captures.name("params") {
            for pair in params
                .as_str()
                .split(',')
                .map(str::trim)
                .filter(|pair| !pair.is_empty())
            {
                let Some((name, value)) = pair.split_once('=') else {
                    bail!(
                        "Malformed parameter '{}' in block spec '{}'. Expected name=value.",
                        pair,
                        spec
                    );
                };
                overrides.insert(name.trim().to_string(), coerce_param_value(value.trim()));
            }
        }
        parsed.push((kind, overrides));
    }
    Ok(parsed)
}

#[cfg(not(target_arch = "wasm32"))]
fn coerce_param_value(raw: &str) -> Value {
    match raw.parse::<f64>() {
        Ok(number) => serde_json::Number::from_f64(number)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(raw.to_string())),
        Err(_) => Value::String(raw.to_string()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn print_palette(category_filter: Option<&str>) -> Result<()> {
    let categories: Vec<Category> = match category_filter {
        Some(name) => {
            let category = Category::parse(name).ok_or_else(|| {
                anyhow!(
                    "Unknown category '{}'. Valid tabs: Games, Events, Motion, Looks, Control.",
                    name
                )
            })?;
            vec![category]
        }
        None => registry::CATEGORY_TABS.to_vec(),
    };

    for category in categories {
        println!("{}:", category.as_str());
        for definition in registry::definitions_in(category) {
            let mut line = format!("  {:<12} {}", definition.kind.as_str(), definition.display_label);
            if !definition.default_parameters.is_empty() {
                let defaults = definition
                    .default_parameters
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, value))
                    .collect::<Vec<_>>()
                    .join(", ");
                line.push_str(&format!("  [{}]", defaults));
            }
            println!("{}", line);
        }
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn print_program(studio: &Studio) {
    eprintln!("[Program] {} block(s)", studio.block_count());
    for (index, block) in studio.program().iter().enumerate() {
        eprintln!(
            "[Program] {}. {} ({})",
            index + 1,
            block.display_label,
            block.instance_id
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn attach_stage_trace(studio: &Studio) {
    let stage = studio.stage().clone();
    studio.stage().subscribe(move || {
        let actor = stage.actor();
        let saying = match stage.message() {
            Some(message) => format!(" saying {:?}", message),
            None => String::new(),
        };
        eprintln!(
            "[Stage] x={} y={} rotation={} visible={}{}",
            actor.position.x, actor.position.y, actor.rotation_degrees, actor.visible, saying
        );
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn print_final_pose(studio: &Studio) {
    let actor = studio.actor();
    println!(
        "x={} y={} rotation={} size={}% visible={}",
        actor.position.x,
        actor.position.y,
        actor.rotation_degrees,
        actor.scale_percent,
        actor.visible
    );
}
