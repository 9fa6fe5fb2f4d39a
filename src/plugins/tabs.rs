use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::batch::Operand;
use crate::command::{gen_commands, CommandDescriptor, CommandType, ItemSpec};
use crate::common::read_optional;
use crate::i18n::Localizer;
use crate::launcher::{Focus, Opener};
use crate::matching::rank_with_limit;
use crate::plugin::{Capability, EnterContext, InputContext, InputOutcome, Plugin};
use crate::results::ResultItem;

pub const NAME: &str = "tabs";
const KEY: &str = "tab";
const ICON: &str = "img/tabs.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub id: u64,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub fav_icon_url: Option<String>,
}

/// Lists open tabs.
pub trait TabSource: Send + Sync {
    fn tabs(&self) -> anyhow::Result<Vec<TabInfo>>;
}

/// Tabs exported to a JSON array file.
pub struct JsonTabSource {
    path: PathBuf,
}

impl JsonTabSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TabSource for JsonTabSource {
    fn tabs(&self) -> anyhow::Result<Vec<TabInfo>> {
        let content = read_optional(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("reading tabs from {}", self.path.display()))
    }
}

/// Fuzzy search over open tabs. Shift opens the first rows, up to the batch
/// ceiling, in the background.
pub struct TabsPlugin {
    commands: Vec<CommandDescriptor>,
    source: Arc<dyn TabSource>,
    opener: Arc<dyn Opener>,
}

impl TabsPlugin {
    pub fn new(
        localizer: &dyn Localizer,
        source: Arc<dyn TabSource>,
        opener: Arc<dyn Opener>,
    ) -> Self {
        let items = [ItemSpec::new(KEY).allow_batch().shift_key()];
        Self {
            commands: gen_commands(NAME, ICON, &items, CommandType::Keyword, localizer),
            source,
            opener,
        }
    }
}

async fn open_row(opener: &dyn Opener, row: ResultItem, focus: Focus) -> anyhow::Result<()> {
    let url = row
        .url
        .with_context(|| format!("tab `{}` has no url", row.title))?;
    opener.open(&url, focus).await
}

#[async_trait]
impl Plugin for TabsPlugin {
    fn name(&self) -> &str {
        NAME
    }

    fn description(&self) -> &str {
        "Search open tabs (prefix: `tab`)"
    }

    fn commands(&self) -> Vec<CommandDescriptor> {
        self.commands.clone()
    }

    fn capabilities(&self) -> &[Capability] {
        &[Capability::Input, Capability::Enter]
    }

    fn on_input(
        &self,
        query: &str,
        command: &CommandDescriptor,
        ctx: InputContext<'_>,
    ) -> anyhow::Result<InputOutcome> {
        let keyed: Vec<(String, TabInfo)> = self
            .source
            .tabs()?
            .into_iter()
            .map(|tab| (format!("{} {}", tab.title, tab.url), tab))
            .collect();
        // `tab ` with nothing after it lists every tab in browser order.
        let ranked = if query.trim().is_empty() {
            keyed.into_iter().take(ctx.max_results).collect()
        } else {
            rank_with_limit(keyed, query, |(key, _)| key.as_str(), ctx.max_results)
        };
        let rows = ranked
            .into_iter()
            .enumerate()
            .map(|(i, (_, tab))| {
                let desc = if command.allow_batch {
                    ctx.policy.decorate(&tab, i, |t| t.url.as_str())
                } else {
                    tab.url.clone()
                };
                ResultItem {
                    key: command.key.clone(),
                    icon: tab.fav_icon_url.unwrap_or_else(|| command.icon.clone()),
                    title: tab.title,
                    desc,
                    id: Some(tab.id.to_string()),
                    url: Some(tab.url),
                    ..Default::default()
                }
            })
            .collect();
        Ok(InputOutcome::Items(rows))
    }

    async fn on_enter(
        &self,
        item: &ResultItem,
        command: &CommandDescriptor,
        ctx: EnterContext<'_>,
    ) -> anyhow::Result<()> {
        let batch = ctx.shift_key && command.allow_batch;
        let operand = if batch {
            Operand::Many(
                ctx.list
                    .iter()
                    .filter(|row| row.plugin == item.plugin && row.key == item.key && !row.is_default)
                    .cloned()
                    .collect(),
            )
        } else {
            Operand::Single(item.clone())
        };
        let opener = self.opener.as_ref();
        ctx.policy
            .execute(
                batch,
                operand,
                |row| open_row(opener, row, Focus::Foreground),
                |row| open_row(opener, row, Focus::Background),
            )
            .await
            .into_result()
    }
}
