//! Built-in host commands that plugins may not shadow

/// A built-in command and its aliases
#[derive(Debug, Clone, PartialEq, Eq)]
struct BuiltinCommand {
    name: String,
    aliases: Vec<String>,
}

/// The host's built-in subcommands.
///
/// A plugin whose name equals a built-in's name or any of its aliases is
/// invalid: built-ins always win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltinCommands {
    commands: Vec<BuiltinCommand>,
}

impl BuiltinCommands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a built-in command with its aliases
    pub fn insert<I, S>(&mut self, name: impl Into<String>, aliases: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(BuiltinCommand {
            name: name.into(),
            aliases: aliases.into_iter().map(Into::into).collect(),
        });
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with<I, S>(mut self, name: impl Into<String>, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(name, aliases);
        self
    }

    /// Whether `name` is a built-in command name or alias
    pub fn contains(&self, name: &str) -> bool {
        self.commands
            .iter()
            .any(|c| c.name == name || c.aliases.iter().any(|a| a == name))
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
