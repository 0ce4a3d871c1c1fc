//! Plugin management commands

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use cliplugins_core::Plugin;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};

use super::Context;

/// Plugin management arguments
#[derive(Args)]
pub struct PluginArgs {
    #[command(subcommand)]
    pub command: PluginCommands,
}

/// Plugin subcommands
#[derive(Subcommand)]
pub enum PluginCommands {
    /// List plugins, including ones that failed validation
    #[command(visible_alias = "list")]
    Ls {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
        /// Also show lower-priority copies hidden by each plugin
        #[arg(long)]
        shadowed: bool,
    },
    /// Show plugin details as JSON
    Inspect {
        /// Plugin name
        name: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Run plugin command
pub fn run(args: PluginArgs, ctx: &Context) -> Result<ExitCode> {
    match args.command {
        PluginCommands::Ls { format, shadowed } => list_plugins(ctx, format, shadowed),
        PluginCommands::Inspect { name } => inspect_plugin(ctx, &name),
    }
}

fn list_plugins(ctx: &Context, format: OutputFormat, shadowed: bool) -> Result<ExitCode> {
    let mut plugins = ctx.manager.list_plugins(&ctx.builtins)?;
    if !shadowed {
        for plugin in &mut plugins {
            plugin.shadowed_paths.clear();
        }
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&plugins)?),
        OutputFormat::Table if plugins.is_empty() => {
            println!("No plugins found");
            println!();
            println!("Searched:");
            for dir in ctx.manager.config().dirs.iter() {
                println!("  {}", dir.display());
            }
        }
        OutputFormat::Table => println!("{}", plugin_table(&plugins, shadowed)),
    }

    Ok(ExitCode::SUCCESS)
}

fn plugin_table(plugins: &[Plugin], shadowed: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("Name").fg(Color::Cyan),
        Cell::new("Description").fg(Color::Cyan),
        Cell::new("Version").fg(Color::Cyan),
        Cell::new("Vendor").fg(Color::Cyan),
        Cell::new("Path").fg(Color::Cyan),
        Cell::new("Error").fg(Color::Cyan),
    ];
    if shadowed {
        header.push(Cell::new("Shadowed").fg(Color::Cyan));
    }
    table.set_header(header);

    for plugin in plugins {
        let error = match plugin.is_valid() {
            Ok(()) => Cell::new(""),
            Err(e) => Cell::new(e).fg(Color::Red),
        };

        let mut row = vec![
            Cell::new(&plugin.name),
            Cell::new(&plugin.metadata.short_description),
            Cell::new(&plugin.metadata.version),
            Cell::new(&plugin.metadata.vendor),
            Cell::new(plugin.path.display()),
            error,
        ];
        if shadowed {
            let paths: Vec<String> = plugin
                .shadowed_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect();
            row.push(Cell::new(paths.join("\n")));
        }
        table.add_row(row);
    }

    table
}

fn inspect_plugin(ctx: &Context, name: &str) -> Result<ExitCode> {
    match ctx.manager.find_plugin(name, &ctx.builtins, true) {
        Ok(plugin) => {
            println!("{}", serde_json::to_string_pretty(&plugin)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_not_found() => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}
