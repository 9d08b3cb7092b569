use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use cypack_domain::SuiteEntry;

pub const CYPACK_HELP_TEMPLATE: &str =
    "{before-help}\nUsage:\n    {usage}\n\nGlobal options:\n{options}\n";

pub const CYPACK_BEFORE_HELP: &str = concat!(
    "cypack ",
    env!("CARGO_PKG_VERSION"),
    " – Cypress suite aggregator\n\n",
    "\x1b[1;36mCommands\x1b[0m\n",
    "  init             Reset the workspace to an empty session.\n",
    "  build            Reset, then register every suite from cypack.toml and --suite.\n",
    "  probe            Show what a suite directory would contribute.\n",
);

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    propagate_version = false,
    disable_help_subcommand = true,
    before_help = CYPACK_BEFORE_HELP,
    help_template = CYPACK_HELP_TEMPLATE
)]
#[allow(clippy::struct_excessive_bools)]
pub struct CypackCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (errors still print to stderr)",
        global = true
    )]
    pub quiet: bool,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging (-vv reaches trace)",
        global = true
    )]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: CommandGroupCli,
}

#[derive(Subcommand, Debug)]
pub enum CommandGroupCli {
    #[command(
        about = "Wipe integration/, suites/, support/, plugins/ and rewrite the generated files.",
        override_usage = "cypack init [--config FILE] [--root DIR] [--base-url URL]"
    )]
    Init(InitArgs),
    #[command(
        about = "Reset the workspace and register configured suites in order.",
        override_usage = "cypack build [--config FILE] [--suite NAME=PATH]...",
        after_help = "Examples:\n  cypack build\n  cypack build --suite core=../core-tests --suite shop=../shop-tests"
    )]
    Build(BuildArgs),
    #[command(
        about = "Report which capabilities a suite directory provides.",
        override_usage = "cypack probe <PATH>"
    )]
    Probe(ProbeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct WorkspaceArgs {
    #[arg(
        long,
        value_name = "FILE",
        help = "Project config to read [env: CYPACK_CONFIG] (defaults to ./cypack.toml)"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        value_name = "DIR",
        help = "Workspace root [env: CYPACK_ROOT] (defaults to the config's root, then ./.cypress)"
    )]
    pub root: Option<PathBuf>,
    #[arg(
        long,
        value_name = "URL",
        help = "baseUrl written into cypress.json [env: CYPACK_BASE_URL]"
    )]
    pub base_url: Option<String>,
}

#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,
}

#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub workspace: WorkspaceArgs,
    #[arg(
        long = "suite",
        value_name = "NAME=PATH",
        value_parser = parse_suite,
        help = "Register an extra suite after those in the config (repeatable)"
    )]
    pub suites: Vec<SuiteEntry>,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    #[arg(value_name = "PATH", help = "Suite directory to inspect")]
    pub path: PathBuf,
}

fn parse_suite(raw: &str) -> Result<SuiteEntry, String> {
    let (name, path) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=PATH, got `{raw}`"))?;
    let name = name.trim();
    let path = path.trim();
    if name.is_empty() || path.is_empty() {
        return Err(format!("expected NAME=PATH, got `{raw}`"));
    }
    Ok(SuiteEntry {
        name: name.to_string(),
        path: PathBuf::from(path),
    })
}
