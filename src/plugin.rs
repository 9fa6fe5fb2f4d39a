use std::collections::HashSet;

use anyhow::{bail, Context};
use async_trait::async_trait;
use regex::Regex;

use crate::batch::BatchPolicy;
use crate::command::{default_result, CommandDescriptor, CommandType};
use crate::common::split_command;
use crate::matching::match_text;
use crate::results::ResultItem;
use crate::settings::Settings;

/// Optional hooks a plugin implements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Produces rows through [`Plugin::on_input`].
    Input,
    /// Acts on a selected row through [`Plugin::on_enter`].
    Enter,
}

/// What a query produced.
#[derive(Debug, Clone, PartialEq)]
pub enum InputOutcome {
    Items(Vec<ResultItem>),
    /// Replace the query with this text and search again.
    Rewrite(String),
}

/// Shared limits handed to [`Plugin::on_input`].
#[derive(Debug, Clone, Copy)]
pub struct InputContext<'a> {
    pub policy: &'a BatchPolicy,
    pub max_results: usize,
}

/// State of the launcher when a row is entered.
#[derive(Debug, Clone, Copy)]
pub struct EnterContext<'a> {
    pub query: &'a str,
    /// Batch gesture (shift held).
    pub shift_key: bool,
    /// Rows currently displayed, in display order.
    pub list: &'a [ResultItem],
    pub policy: &'a BatchPolicy,
}

#[async_trait]
pub trait Plugin: Send + Sync {
    /// Name of the plugin
    fn name(&self) -> &str;

    fn description(&self) -> &str {
        ""
    }

    /// Commands this plugin answers to. Must not be empty.
    fn commands(&self) -> Vec<CommandDescriptor>;

    fn capabilities(&self) -> &[Capability];

    /// Whether the user may switch the plugin off.
    fn can_disable(&self) -> bool {
        true
    }

    /// Return rows for `query`, already stripped of the command key.
    fn on_input(
        &self,
        _query: &str,
        _command: &CommandDescriptor,
        _ctx: InputContext<'_>,
    ) -> anyhow::Result<InputOutcome> {
        Ok(InputOutcome::Items(Vec::new()))
    }

    async fn on_enter(
        &self,
        _item: &ResultItem,
        _command: &CommandDescriptor,
        _ctx: EnterContext<'_>,
    ) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Result of [`PluginManager::enter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnterOutcome {
    Done,
    Rewrite(String),
}

struct RegisteredCommand {
    descriptor: CommandDescriptor,
    pattern: Option<Regex>,
}

struct Registered {
    plugin: Box<dyn Plugin>,
    commands: Vec<RegisteredCommand>,
    input: bool,
    enter: bool,
}

/// A manager that holds plugins
pub struct PluginManager {
    plugins: Vec<Registered>,
    settings: Settings,
    policy: BatchPolicy,
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginManager {
    pub fn new() -> Self {
        Self::with_settings(&Settings::default())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            plugins: Vec::new(),
            settings: settings.clone(),
            policy: BatchPolicy::from_settings(settings),
        }
    }

    pub fn policy(&self) -> &BatchPolicy {
        &self.policy
    }

    /// Add a plugin after checking its command table.
    ///
    /// Rejects duplicate plugin names, plugins without commands, empty keys
    /// and regexp commands without a valid pattern. Duplicate keys inside one
    /// plugin are only reported.
    pub fn register(&mut self, plugin: Box<dyn Plugin>) -> anyhow::Result<()> {
        let name = plugin.name().to_string();
        if name.is_empty() {
            bail!("plugin name must not be empty");
        }
        if self.plugins.iter().any(|r| r.plugin.name() == name) {
            bail!("plugin `{name}` is already registered");
        }
        let descriptors = plugin.commands();
        if descriptors.is_empty() {
            bail!("plugin `{name}` exposes no commands");
        }

        let mut seen = HashSet::new();
        let mut commands = Vec::with_capacity(descriptors.len());
        for descriptor in descriptors {
            if descriptor.key.is_empty() {
                bail!("plugin `{name}` has a command with an empty key");
            }
            let descriptor = self.apply_key_override(descriptor);
            if !seen.insert(descriptor.key.clone()) {
                tracing::warn!(plugin = %name, key = %descriptor.key, "duplicate command key");
            }
            let pattern = match descriptor.kind {
                CommandType::Regexp => {
                    let source = descriptor.pattern.as_deref().with_context(|| {
                        format!("regexp command `{}` of `{name}` has no pattern", descriptor.orkey)
                    })?;
                    let re = Regex::new(source).with_context(|| {
                        format!("invalid pattern for `{}` of `{name}`", descriptor.orkey)
                    })?;
                    Some(re)
                }
                _ => None,
            };
            commands.push(RegisteredCommand {
                descriptor,
                pattern,
            });
        }

        let caps = plugin.capabilities();
        let input = caps.contains(&Capability::Input);
        let enter = caps.contains(&Capability::Enter);
        tracing::debug!(plugin = %name, commands = commands.len(), input, enter, "registered plugin");
        self.plugins.push(Registered {
            plugin,
            commands,
            input,
            enter,
        });
        Ok(())
    }

    fn apply_key_override(&self, descriptor: CommandDescriptor) -> CommandDescriptor {
        match self.settings.command_keys.get(&descriptor.orkey) {
            Some(key) if descriptor.editable && !key.trim().is_empty() => {
                descriptor.with_key(key.trim())
            }
            Some(_) => {
                tracing::warn!(key = %descriptor.orkey, "ignoring key override");
                descriptor
            }
            None => descriptor,
        }
    }

    fn active(&self) -> impl Iterator<Item = &Registered> {
        self.plugins
            .iter()
            .filter(move |r| {
                !r.plugin.can_disable() || self.settings.is_plugin_enabled(r.plugin.name())
            })
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.iter().map(|r| r.plugin.name()).collect()
    }

    /// `(name, description)` of every enabled plugin.
    pub fn descriptions(&self) -> Vec<(&str, &str)> {
        self.active()
            .map(|r| (r.plugin.name(), r.plugin.description()))
            .collect()
    }

    /// Descriptors of every enabled plugin, with key overrides applied.
    pub fn commands(&self) -> Vec<CommandDescriptor> {
        self.active()
            .flat_map(|r| r.commands.iter().map(|c| c.descriptor.clone()))
            .collect()
    }

    /// Evaluate `query` against every enabled command.
    ///
    /// Keyword commands receive the text after `"<key> "`, regexp commands
    /// the whole query when their pattern matches, search commands every
    /// non-empty query. When no keyword or regexp command claims the query,
    /// its first token is matched against the keyword command keys and each
    /// hit yields a default row.
    pub fn search(&self, query: &str) -> InputOutcome {
        let (token, rest) = split_command(query);
        let trimmed = query.trim();
        let ctx = InputContext {
            policy: &self.policy,
            max_results: self.settings.max_results,
        };
        let mut items = Vec::new();
        let mut claimed = false;

        for reg in self.active() {
            for cmd in &reg.commands {
                let desc = &cmd.descriptor;
                let input = match desc.kind {
                    CommandType::Keyword => rest.filter(|_| token.eq_ignore_ascii_case(&desc.key)),
                    CommandType::Regexp => cmd
                        .pattern
                        .as_ref()
                        .filter(|re| !trimmed.is_empty() && re.is_match(trimmed))
                        .map(|_| trimmed),
                    CommandType::Search => Some(trimmed).filter(|q| !q.is_empty()),
                };
                let Some(input) = input else { continue };
                if desc.kind != CommandType::Search {
                    claimed = true;
                }
                tracing::debug!(plugin = reg.plugin.name(), key = %desc.key, input, "dispatch");
                if !reg.input {
                    items.extend(tag(default_result(desc), reg, desc));
                    continue;
                }
                match reg.plugin.on_input(input, desc, ctx) {
                    Ok(InputOutcome::Items(rows)) => items.extend(tag(rows, reg, desc)),
                    Ok(InputOutcome::Rewrite(next)) => return InputOutcome::Rewrite(next),
                    Err(err) => {
                        tracing::warn!(plugin = reg.plugin.name(), "input failed: {err:#}")
                    }
                }
            }
        }

        if !claimed && rest.is_none() && !token.is_empty() {
            for reg in self.active() {
                for cmd in &reg.commands {
                    let desc = &cmd.descriptor;
                    if desc.kind == CommandType::Keyword && match_text(token, &desc.key) {
                        items.extend(tag(default_result(desc), reg, desc));
                    }
                }
            }
        }

        InputOutcome::Items(items)
    }

    /// Execute `item`, one of the rows in `list`.
    ///
    /// Default rows re-enter their command as `"<key> "`.
    pub async fn enter(
        &self,
        item: &ResultItem,
        query: &str,
        shift_key: bool,
        list: &[ResultItem],
    ) -> anyhow::Result<EnterOutcome> {
        let (reg, desc) = self
            .active()
            .filter(|r| r.plugin.name() == item.plugin)
            .find_map(|r| {
                r.commands
                    .iter()
                    .find(|c| c.descriptor.key == item.key)
                    .map(|c| (r, &c.descriptor))
            })
            .with_context(|| format!("no command `{}` in plugin `{}`", item.key, item.plugin))?;

        if item.is_default {
            return Ok(EnterOutcome::Rewrite(format!("{} ", desc.key)));
        }
        if !reg.enter {
            tracing::debug!(plugin = reg.plugin.name(), "plugin has no enter hook");
            return Ok(EnterOutcome::Done);
        }
        let ctx = EnterContext {
            query,
            shift_key,
            list,
            policy: &self.policy,
        };
        reg.plugin
            .on_enter(item, desc, ctx)
            .await
            .with_context(|| format!("`{}` failed", desc.key))?;
        Ok(EnterOutcome::Done)
    }
}

fn tag(rows: Vec<ResultItem>, reg: &Registered, desc: &CommandDescriptor) -> Vec<ResultItem> {
    rows.into_iter()
        .map(|mut row| {
            row.plugin = reg.plugin.name().to_string();
            if row.key.is_empty() || row.key == desc.orkey {
                row.key = desc.key.clone();
            }
            row
        })
        .collect()
}
