use atty::Stream;
use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use cypack_core::{
    format_status_message, to_json_response, CommandContext, CommandInfo, CommandStatus,
    ExecutionOutcome, GlobalOptions, SystemFileSystem,
};
use serde_json::Value;

mod cli;
mod dispatch;
mod style;

use cli::CypackCli;
use dispatch::dispatch_command;
use style::Style;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = CypackCli::parse();
    let global = GlobalOptions {
        quiet: cli.quiet,
        verbose: cli.verbose,
        trace: cli.trace,
        json: cli.json,
    };
    init_tracing(&global);

    let ctx = CommandContext::new(&global, SystemFileSystem::shared())
        .map_err(|err| eyre!("{err:?}"))?;
    let (info, outcome) = dispatch_command(&ctx, &cli.command)?;
    let code = emit_output(ctx.global(), cli.no_color, info, &outcome)?;

    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

fn init_tracing(global: &GlobalOptions) {
    let level = if global.trace {
        "trace"
    } else {
        match global.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    let filter = format!("cypack_core={level},cypack_cli={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn emit_output(
    global: &GlobalOptions,
    no_color: bool,
    info: CommandInfo,
    outcome: &ExecutionOutcome,
) -> Result<i32> {
    let code = outcome.status.exit_code();

    if global.json {
        let payload = to_json_response(info, outcome);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(code);
    }

    let message = format_status_message(info, &outcome.message);
    if global.quiet {
        if outcome.status != CommandStatus::Ok {
            eprintln!("{message}");
        }
        return Ok(code);
    }

    let style = Style::new(no_color, atty::is(Stream::Stdout));
    println!("{}", style.status(outcome.status, &message));
    for line in suite_lines(&style, &outcome.details) {
        println!("{line}");
    }
    if let Some(hint) = hint_from_details(&outcome.details) {
        println!("{}", style.info(&format!("Hint: {hint}")));
    }

    Ok(code)
}

fn hint_from_details(details: &Value) -> Option<&str> {
    details
        .as_object()
        .and_then(|map| map.get("hint"))
        .and_then(Value::as_str)
}

fn suite_lines(style: &Style, details: &Value) -> Vec<String> {
    let Some(suites) = details.get("suites").and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut lines: Vec<String> = suites
        .iter()
        .filter_map(|suite| {
            let name = suite.get("name")?.as_str()?;
            let path = suite.get("path")?.as_str()?;
            let parts = contributed_parts(suite.get("capabilities")?);
            Some(style.suite_row(name, path, &parts))
        })
        .collect();
    if let Some(skipped) = details.get("skipped").and_then(Value::as_array) {
        lines.extend(skipped.iter().filter_map(|suite| {
            let name = suite.get("name")?.as_str()?;
            let path = suite.get("path")?.as_str()?;
            Some(style.suite_row(name, path, "skipped (missing)"))
        }));
    }
    lines
}

fn contributed_parts(caps: &Value) -> String {
    let parts: Vec<&str> = [
        ("has_integration", "integration"),
        ("has_shared_steps", "steps"),
        ("has_support", "support"),
        ("has_plugins", "plugins"),
        ("has_manifest", "package.json"),
    ]
    .into_iter()
    .filter(|(key, _)| caps.get(*key).and_then(Value::as_bool).unwrap_or(false))
    .map(|(_, label)| label)
    .collect();
    if parts.is_empty() {
        "link only".to_string()
    } else {
        parts.join(", ")
    }
}
