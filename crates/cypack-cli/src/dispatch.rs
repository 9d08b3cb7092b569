use color_eyre::Result;
use cypack_core::{
    suite_probe, workspace_build, workspace_init, BuildRequest, CommandContext, CommandGroup,
    CommandInfo, ExecutionOutcome, InitRequest, ProbeRequest,
};

use crate::cli::{CommandGroupCli, WorkspaceArgs};

pub fn dispatch_command(
    ctx: &CommandContext,
    group: &CommandGroupCli,
) -> Result<(CommandInfo, ExecutionOutcome)> {
    match group {
        CommandGroupCli::Init(args) => {
            let info = CommandInfo::new(CommandGroup::Init, "init");
            let WorkspaceArgs {
                config,
                root,
                base_url,
            } = args.workspace.clone();
            let request = InitRequest {
                config,
                root,
                base_url,
            };
            core_call(info, || workspace_init(ctx, &request))
        }
        CommandGroupCli::Build(args) => {
            let info = CommandInfo::new(CommandGroup::Build, "build");
            let WorkspaceArgs {
                config,
                root,
                base_url,
            } = args.workspace.clone();
            let request = BuildRequest {
                config,
                root,
                base_url,
                suites: args.suites.clone(),
            };
            core_call(info, || workspace_build(ctx, &request))
        }
        CommandGroupCli::Probe(args) => {
            let info = CommandInfo::new(CommandGroup::Probe, "probe");
            let request = ProbeRequest {
                path: args.path.clone(),
            };
            core_call(info, || suite_probe(ctx, &request))
        }
    }
}

fn core_call<F>(info: CommandInfo, action: F) -> Result<(CommandInfo, ExecutionOutcome)>
where
    F: FnOnce() -> anyhow::Result<ExecutionOutcome>,
{
    tracing::debug!(command = %info.group, "running command");
    match action() {
        Ok(outcome) => Ok((info, outcome)),
        Err(err) => {
            tracing::debug!(error = ?err, "command failed");
            Ok((info, ExecutionOutcome::from_error(&err)))
        }
    }
}
