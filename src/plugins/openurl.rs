use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use url::Url;

use crate::command::{gen_commands, CommandDescriptor, CommandType, ItemSpec};
use crate::i18n::Localizer;
use crate::launcher::{Focus, Opener};
use crate::plugin::{Capability, EnterContext, InputContext, InputOutcome, Plugin};
use crate::results::ResultItem;

pub const NAME: &str = "openurl";
const KEY: &str = "open";
const ICON: &str = "img/openurl.png";

/// Bare host names, dotted domains, IPv4 addresses and `localhost`, with an
/// optional scheme, port and path.
pub const URL_PATTERN: &str = r"(?i)^(?:(?:https?|ftp)://)?(?:localhost|\d{1,3}(?:\.\d{1,3}){3}|(?:[\w-]+\.)+\p{L}{2,})(?::\d{2,5})?(?:[/?#]\S*)?$";

pub struct OpenUrlPlugin {
    commands: Vec<CommandDescriptor>,
    opener: Arc<dyn Opener>,
}

impl OpenUrlPlugin {
    pub fn new(localizer: &dyn Localizer, opener: Arc<dyn Opener>) -> Self {
        let items = [ItemSpec::new(KEY).editable(false).pattern(URL_PATTERN)];
        Self {
            commands: gen_commands(NAME, ICON, &items, CommandType::Regexp, localizer),
            opener,
        }
    }
}

/// Prefix `http://` when the text carries no `<scheme>://` of its own.
pub fn with_scheme(url: &str) -> String {
    let has_scheme = url.split_once("://").is_some_and(|(scheme, _)| {
        scheme.starts_with(|c: char| c.is_ascii_alphabetic())
            && scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    });
    if has_scheme {
        url.to_string()
    } else {
        format!("http://{url}")
    }
}

#[async_trait]
impl Plugin for OpenUrlPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Open the typed address"
    }

    fn commands(&self) -> Vec<CommandDescriptor> {
        self.commands.clone()
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::Input, Capability::Enter]
    }

    fn can_disable(&self) -> bool {
        false
    }

    fn on_input(
        &self,
        query: &str,
        command: &CommandDescriptor,
        _ctx: InputContext<'_>,
    ) -> anyhow::Result<InputOutcome> {
        Ok(InputOutcome::Items(vec![ResultItem {
            key: command.key.clone(),
            id: Some(NAME.into()),
            icon: command.icon.clone(),
            title: query.to_string(),
            desc: command.subtitle.clone(),
            url: Some(query.to_string()),
            ..Default::default()
        }]))
    }

    async fn on_enter(
        &self,
        item: &ResultItem,
        _command: &CommandDescriptor,
        _ctx: EnterContext<'_>,
    ) -> anyhow::Result<()> {
        let raw = item.url.as_deref().unwrap_or(&item.title);
        let target = with_scheme(raw);
        let url = Url::parse(&target).with_context(|| format!("`{raw}` is not a valid url"))?;
        self.opener.open(url.as_str(), Focus::Foreground).await
    }
}
