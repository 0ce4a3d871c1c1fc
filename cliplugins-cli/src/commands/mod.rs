pub mod plugin;
pub mod plugin_dispatch;
pub mod version;

use cliplugins_core::{BuiltinCommands, PluginManager};

/// What every command needs to reach plugins
pub struct Context {
    pub manager: PluginManager,
    /// The host's own command tree, for help rendering
    pub root: clap::Command,
    pub builtins: BuiltinCommands,
}

impl Context {
    pub fn new(manager: PluginManager, root: clap::Command) -> Self {
        let builtins = builtin_commands(&root);
        Self {
            manager,
            root,
            builtins,
        }
    }
}

/// Collect the host's built-in commands, aliases included, from its clap tree
pub fn builtin_commands(cmd: &clap::Command) -> BuiltinCommands {
    cmd.get_subcommands()
        .fold(BuiltinCommands::new(), |builtins, sub| {
            builtins.with(sub.get_name(), sub.get_all_aliases())
        })
}
