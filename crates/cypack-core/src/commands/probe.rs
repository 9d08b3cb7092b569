use std::path::PathBuf;

use anyhow::Result;
use cypack_domain::SuiteCapabilities;
use serde_json::json;

use crate::config::context::CommandContext;
use crate::tooling::outcome::ExecutionOutcome;

#[derive(Debug, Clone)]
pub struct ProbeRequest {
    pub path: PathBuf,
}

/// Reports what a suite directory would contribute without touching any workspace.
///
/// # Errors
/// Currently infallible; the `Result` matches the other command handlers.
pub fn suite_probe(ctx: &CommandContext, request: &ProbeRequest) -> Result<ExecutionOutcome> {
    let path = ctx.cwd().join(&request.path);
    let fs = ctx.fs();
    if !fs.exists(&path) {
        return Ok(ExecutionOutcome::user_error(
            format!("suite directory {} does not exist", path.display()),
            json!({
                "reason": "missing_suite",
                "path": path.display().to_string(),
                "hint": "Pass the path of a suite checkout.",
            }),
        ));
    }
    let caps = SuiteCapabilities::probe(&path, |candidate| fs.exists(candidate));
    let message = if caps.is_bare() {
        format!("{} contributes nothing but its own link", path.display())
    } else {
        let found: Vec<&str> = [
            (caps.has_integration, "integration"),
            (caps.has_shared_steps, "steps"),
            (caps.has_support, "support"),
            (caps.has_plugins, "plugins"),
            (caps.has_manifest, "package.json"),
        ]
        .into_iter()
        .filter_map(|(present, label)| present.then_some(label))
        .collect();
        format!("{} provides {}", path.display(), found.join(", "))
    };
    Ok(ExecutionOutcome::success(
        message,
        json!({
            "path": path.display().to_string(),
            "capabilities": caps,
        }),
    ))
}
