//! Dispatch commands to plugins
//!
//! Handles external subcommands like `docker helloworld` and help topics
//! like `docker help helloworld` by running the matching plugin executable.
//! A plugin that is missing and one that failed validation look the same
//! from here: an unknown command.

use std::ffi::OsString;
use std::process::{Command, ExitCode, ExitStatus};

use anyhow::{Context as _, Result, anyhow};
use tracing::{debug, warn};

use super::Context;

/// Run a plugin for an external subcommand
///
/// Args format: `["helloworld", "--who", "me"]` for `docker helloworld --who me`.
/// The plugin itself receives this process's complete argument list.
pub fn run(args: Vec<OsString>, ctx: &Context) -> Result<ExitCode> {
    let Some(first) = args.first() else {
        return Err(anyhow!("No plugin command specified"));
    };
    let name = first.to_string_lossy();

    let found = first
        .to_str()
        .map(|n| ctx.manager.plugin_run_command(n, &ctx.builtins));

    match found {
        Some(Ok(cmd)) => run_plugin(cmd, &name),
        Some(Err(e)) if !e.is_not_found() => Err(e.into()),
        _ => {
            if wants_help(&args) {
                print!("{}", root_help(ctx));
                return Ok(ExitCode::SUCCESS);
            }
            eprintln!(
                "docker: '{}' is not a docker command.\nSee 'docker --help'",
                name
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Show help for `topic`: root help, a built-in's help, or the plugin's own
pub fn run_help(topic: Option<&str>, ctx: &Context) -> Result<ExitCode> {
    let Some(topic) = topic else {
        print!("{}", root_help(ctx));
        return Ok(ExitCode::SUCCESS);
    };

    let mut root = ctx.root.clone();
    root.build();
    if let Some(builtin) = root.find_subcommand_mut(topic) {
        print!("{}", builtin.render_help());
        return Ok(ExitCode::SUCCESS);
    }

    match ctx.manager.help_command(topic, &ctx.builtins) {
        Ok(cmd) => run_plugin(cmd, topic),
        Err(e) if e.is_not_found() => {
            eprintln!("unknown help topic: {}", topic);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

/// Root help text including the plugins section
pub fn root_help(ctx: &Context) -> String {
    let base_help = ctx.root.clone().render_help().to_string();
    format_top_level_help(&base_help, &plugin_summaries(ctx))
}

/// Get (name, description) for every usable plugin
fn plugin_summaries(ctx: &Context) -> Vec<(String, String)> {
    match ctx.manager.list_plugins(&ctx.builtins) {
        Ok(plugins) => plugins
            .into_iter()
            .filter(|p| p.is_valid().is_ok())
            .map(|p| (p.name, p.metadata.short_description))
            .collect(),
        Err(e) => {
            warn!(error = %e, "Could not list plugins for help");
            Vec::new()
        }
    }
}

/// Format top-level help with plugin commands appended
pub fn format_top_level_help(base_help: &str, plugins: &[(String, String)]) -> String {
    if plugins.is_empty() {
        return base_help.to_string();
    }

    let mut help = base_help.to_string();

    // Insert before Options, or at the end
    let insert_point = help.find("\nOptions:").unwrap_or(help.len());

    let width = plugins.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    let mut plugin_section = String::from("\nPlugins:\n");
    for (name, desc) in plugins {
        let line = format!("  {:width$}  {}", name, desc, width = width);
        plugin_section.push_str(line.trim_end());
        plugin_section.push('\n');
    }

    help.insert_str(insert_point, &plugin_section);
    help
}

fn run_plugin(mut cmd: Command, name: &str) -> Result<ExitCode> {
    debug!(plugin = %name, path = %cmd.get_program().to_string_lossy(), "Running plugin");
    let status = cmd
        .status()
        .with_context(|| format!("failed to run plugin {}", name))?;
    Ok(exit_code(status))
}

/// Map a plugin's exit status onto ours; death by signal counts as failure
fn exit_code(status: ExitStatus) -> ExitCode {
    match status.code().and_then(|c| u8::try_from(c).ok()) {
        Some(code) => ExitCode::from(code),
        None => ExitCode::FAILURE,
    }
}

/// Check if args contain a help flag
fn wants_help(args: &[OsString]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}
