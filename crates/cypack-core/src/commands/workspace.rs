use std::path::{Path, PathBuf};

use anyhow::Result;
use cypack_domain::{ProjectConfig, RuntimeOptions, SuiteEntry};
use serde_json::{json, Value};

use crate::config::context::CommandContext;
use crate::package::PackageJsonMerger;
use crate::runtime::{SuiteRuntime, WorkspaceLayout};
use crate::tooling::outcome::ExecutionOutcome;

#[derive(Debug, Clone, Default)]
pub struct InitRequest {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct BuildRequest {
    pub config: Option<PathBuf>,
    pub root: Option<PathBuf>,
    pub base_url: Option<String>,
    /// Registered after the suites listed in the config file.
    pub suites: Vec<SuiteEntry>,
}

struct PreparedWorkspace {
    runtime: SuiteRuntime,
    options: RuntimeOptions,
    suites: Vec<SuiteEntry>,
}

fn prepare(
    ctx: &CommandContext,
    config: Option<&Path>,
    root: Option<&Path>,
    base_url: Option<&str>,
) -> Result<PreparedWorkspace> {
    let project = ctx.project_config(config)?;
    let root = ctx.workspace_root(root, project.as_ref());
    let ProjectConfig {
        package_json,
        mut options,
        suites,
        ..
    } = project.unwrap_or_else(|| ProjectConfig {
        source: PathBuf::new(),
        root: None,
        package_json: None,
        options: RuntimeOptions::default(),
        suites: Vec::new(),
    });
    if let Some(base_url) = base_url
        .map(ToOwned::to_owned)
        .or_else(|| ctx.config().workspace().base_url.clone())
    {
        options.base_url = Some(base_url);
    }
    let manifest = match package_json {
        Some(manifest) => root.join(manifest),
        None => WorkspaceLayout::new(&root).package_manifest(),
    };
    let merger = PackageJsonMerger::new(manifest, ctx.shared_fs());
    Ok(PreparedWorkspace {
        runtime: SuiteRuntime::new(root, ctx.shared_fs(), Box::new(merger)),
        options,
        suites,
    })
}

/// Resets the workspace without registering any suite.
///
/// # Errors
/// Returns an error for unreadable config files or filesystem failures.
pub fn workspace_init(ctx: &CommandContext, request: &InitRequest) -> Result<ExecutionOutcome> {
    let PreparedWorkspace {
        mut runtime,
        options,
        ..
    } = prepare(
        ctx,
        request.config.as_deref(),
        request.root.as_deref(),
        request.base_url.as_deref(),
    )?;
    runtime.initiate(&options)?;
    let root = runtime.root().display().to_string();
    Ok(ExecutionOutcome::success(
        format!("initialized empty workspace at {root}"),
        json!({ "root": root }),
    ))
}

/// Resets the workspace and registers every configured suite in order.
///
/// Suites whose directory is missing are reported as skipped.
///
/// # Errors
/// Returns an error for invalid or duplicate suite names, unreadable config
/// files, and filesystem or manifest merge failures.
pub fn workspace_build(ctx: &CommandContext, request: &BuildRequest) -> Result<ExecutionOutcome> {
    let PreparedWorkspace {
        mut runtime,
        options,
        mut suites,
    } = prepare(
        ctx,
        request.config.as_deref(),
        request.root.as_deref(),
        request.base_url.as_deref(),
    )?;
    suites.extend(request.suites.iter().cloned());
    runtime.initiate(&options)?;

    let mut registered = Vec::new();
    let mut skipped = Vec::new();
    for suite in &suites {
        let path = ctx.cwd().join(&suite.path);
        match runtime.register(&suite.name, &path)? {
            Some(caps) => registered.push(json!({
                "name": suite.name,
                "path": path.display().to_string(),
                "capabilities": caps,
            })),
            None => {
                tracing::warn!(suite = %suite.name, path = %path.display(), "suite path not found; skipping");
                skipped.push(json!({
                    "name": suite.name,
                    "path": path.display().to_string(),
                }));
            }
        }
    }

    let root = runtime.root().display().to_string();
    let contributions = runtime.contributions();
    let message = match (registered.len(), skipped.len()) {
        (count, 0) => format!("registered {count} suite(s) into {root}"),
        (count, missing) => {
            format!("registered {count} suite(s) into {root}; skipped {missing} missing")
        }
    };
    let mut details = json!({
        "root": root,
        "suites": registered,
        "skipped": skipped,
        "support": contributions.support(),
        "plugins": contributions.plugins(),
    });
    if !skipped.is_empty() {
        details["hint"] = Value::String(
            "Skipped suites point at directories that do not exist; check their paths.".to_string(),
        );
    }
    Ok(ExecutionOutcome::success(message, details))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, GlobalOptions, WorkspaceConfig};
    use crate::effects::SystemFileSystem;
    use crate::tooling::outcome::CommandStatus;
    use std::fs;

    fn context<'a>(global: &'a GlobalOptions, cwd: &Path, env: WorkspaceConfig) -> CommandContext<'a> {
        CommandContext::with_config(
            global,
            SystemFileSystem::shared(),
            Config { workspace: env },
            cwd.to_path_buf(),
        )
    }

    fn write(path: &Path, body: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, body).unwrap();
    }

    #[test]
    fn build_registers_config_suites_then_requested_ones() {
        let temp = tempfile::tempdir().unwrap();
        let cwd = temp.path();
        write(
            &cwd.join("cypack.toml"),
            r#"
[runtime]
root = "ws"
base-url = "http://localhost:8888"

[[suite]]
name = "core"
path = "tests/core"

[[suite]]
name = "missing"
path = "tests/missing"
"#,
        );
        write(&cwd.join("tests/core/support/index.js"), "// core");
        write(&cwd.join("tests/extra/support/index.js"), "// extra");
        write(
            &cwd.join("tests/extra/package.json"),
            r#"{"dependencies": {"faker": "5.5.3"}}"#,
        );

        let global = GlobalOptions::default();
        let ctx = context(&global, cwd, WorkspaceConfig::default());
        let outcome = workspace_build(
            &ctx,
            &BuildRequest {
                suites: vec![SuiteEntry {
                    name: "extra".to_string(),
                    path: PathBuf::from("tests/extra"),
                }],
                ..BuildRequest::default()
            },
        )
        .unwrap();

        assert_eq!(outcome.status, CommandStatus::Ok);
        assert_eq!(outcome.details["support"], json!(["core", "extra"]));
        assert_eq!(outcome.details["skipped"][0]["name"], "missing");
        let support = fs::read_to_string(cwd.join("ws/support.js")).unwrap();
        assert!(support.contains("./support/core/index.js"));
        let cypress: Value =
            serde_json::from_str(&fs::read_to_string(cwd.join("ws/cypress.json")).unwrap())
                .unwrap();
        assert_eq!(cypress["baseUrl"], "http://localhost:8888");
        let manifest: Value =
            serde_json::from_str(&fs::read_to_string(cwd.join("ws/package.json")).unwrap())
                .unwrap();
        assert_eq!(manifest["dependencies"]["faker"], "5.5.3");
    }

    #[test]
    fn flags_override_environment_and_config() {
        let temp = tempfile::tempdir().unwrap();
        let cwd = temp.path();
        write(&cwd.join("cypack.toml"), "[runtime]\nroot = \"from-config\"\n");
        let global = GlobalOptions::default();
        let ctx = context(
            &global,
            cwd,
            WorkspaceConfig {
                root: Some(PathBuf::from("from-env")),
                config_file: None,
                base_url: Some("http://env".to_string()),
            },
        );

        workspace_init(&ctx, &InitRequest::default()).unwrap();
        assert!(cwd.join("from-env/cypress.json").exists());

        workspace_init(
            &ctx,
            &InitRequest {
                root: Some(PathBuf::from("from-flag")),
                base_url: Some("http://flag".to_string()),
                ..InitRequest::default()
            },
        )
        .unwrap();
        let cypress: Value = serde_json::from_str(
            &fs::read_to_string(cwd.join("from-flag/cypress.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(cypress["baseUrl"], "http://flag");
        assert!(!cwd.join("from-config").exists());
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn rebuild_replaces_dependencies_from_the_previous_session() {
        let temp = tempfile::tempdir().unwrap();
        let cwd = temp.path();
        let manifest = cwd.join("suites/a/package.json");
        write(
            &manifest,
            r#"{"dependencies": {"faker": "5.0.0", "gone": "1.0.0"}}"#,
        );
        let global = GlobalOptions::default();
        let ctx = context(&global, cwd, WorkspaceConfig::default());
        let request = BuildRequest {
            suites: vec![SuiteEntry {
                name: "a".to_string(),
                path: PathBuf::from("suites/a"),
            }],
            ..BuildRequest::default()
        };
        let shared = cwd.join(".cypress/package.json");

        workspace_build(&ctx, &request).unwrap();
        assert_eq!(read_json(&shared)["dependencies"]["faker"], "5.0.0");

        write(&manifest, r#"{"dependencies": {"faker": "6.0.0"}}"#);
        workspace_build(&ctx, &request).unwrap();
        let rebuilt = read_json(&shared);
        assert_eq!(rebuilt["dependencies"]["faker"], "6.0.0");
        assert!(rebuilt["dependencies"].get("gone").is_none());

        workspace_init(&ctx, &InitRequest::default()).unwrap();
        assert_eq!(read_json(&shared), json!({"private": true}));
    }

    #[test]
    fn package_json_follows_the_root_in_effect() {
        let temp = tempfile::tempdir().unwrap();
        let cwd = temp.path();
        write(
            &cwd.join("cypack.toml"),
            "[runtime]\nroot = \"cfgroot\"\npackage-json = \"deps/package.json\"\n",
        );
        write(
            &cwd.join("suites/a/package.json"),
            r#"{"dependencies": {"faker": "5.0.0"}}"#,
        );
        let global = GlobalOptions::default();
        let ctx = context(&global, cwd, WorkspaceConfig::default());

        workspace_build(
            &ctx,
            &BuildRequest {
                root: Some(PathBuf::from("flagroot")),
                suites: vec![SuiteEntry {
                    name: "a".to_string(),
                    path: PathBuf::from("suites/a"),
                }],
                ..BuildRequest::default()
            },
        )
        .unwrap();

        let shared = read_json(&cwd.join("flagroot/deps/package.json"));
        assert_eq!(shared["dependencies"]["faker"], "5.0.0");
        assert!(!cwd.join("cfgroot").exists());
    }

    #[test]
    fn duplicate_suite_names_surface_as_errors() {
        let temp = tempfile::tempdir().unwrap();
        let cwd = temp.path();
        write(&cwd.join("a/integration/x.feature"), "");
        let global = GlobalOptions::default();
        let ctx = context(&global, cwd, WorkspaceConfig::default());
        let entry = SuiteEntry {
            name: "a".to_string(),
            path: PathBuf::from("a"),
        };
        let err = workspace_build(
            &ctx,
            &BuildRequest {
                suites: vec![entry.clone(), entry],
                ..BuildRequest::default()
            },
        )
        .unwrap_err();
        let outcome = ExecutionOutcome::from_error(&err);
        assert_eq!(outcome.status, CommandStatus::UserError);
    }
}
