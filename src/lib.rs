//! Command palette core: match a typed query against plugin commands, rank
//! candidates and dispatch the selected command once or in batch.

pub mod batch;
pub mod command;
pub mod common;
pub mod i18n;
pub mod launcher;
pub mod logging;
pub mod matching;
pub mod plugin;
pub mod plugins;
pub mod results;
pub mod settings;

use std::sync::Arc;

use crate::i18n::Localizer;
use crate::launcher::Opener;
use crate::plugin::PluginManager;
use crate::plugins::extensions::{ExtensionSource, ExtensionsPlugin, ExtensionsSettings};
use crate::plugins::openurl::OpenUrlPlugin;
use crate::plugins::tabs::{TabSource, TabsPlugin};
use crate::settings::Settings;

/// Collaborators the built-in plugins talk to.
pub struct Sources {
    pub opener: Arc<dyn Opener>,
    pub tabs: Arc<dyn TabSource>,
    pub extensions: Arc<dyn ExtensionSource>,
}

/// Build a manager with every built-in plugin registered.
pub fn builtin_manager(
    settings: &Settings,
    localizer: &dyn Localizer,
    sources: Sources,
) -> anyhow::Result<PluginManager> {
    let mut manager = PluginManager::with_settings(settings);
    manager.register(Box::new(OpenUrlPlugin::new(
        localizer,
        Arc::clone(&sources.opener),
    )))?;
    manager.register(Box::new(ExtensionsPlugin::new(
        localizer,
        sources.extensions,
        Arc::clone(&sources.opener),
        settings.plugin_config::<ExtensionsSettings>(plugins::extensions::NAME),
    )))?;
    manager.register(Box::new(TabsPlugin::new(
        localizer,
        sources.tabs,
        sources.opener,
    )))?;
    Ok(manager)
}
