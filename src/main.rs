use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Context};
use quick_launcher::i18n::{document_url, render_template, MessageCatalog};
use quick_launcher::launcher::SystemOpener;
use quick_launcher::plugin::{EnterOutcome, InputOutcome, PluginManager};
use quick_launcher::plugins::extensions::JsonExtensionSource;
use quick_launcher::plugins::tabs::JsonTabSource;
use quick_launcher::results::ResultItem;
use quick_launcher::settings::Settings;
use quick_launcher::{builtin_manager, logging, Sources};

/// Rewrites chained by a single query before giving up.
const MAX_REWRITES: usize = 4;

struct Args {
    settings: String,
    tabs: String,
    extensions: String,
    shift: bool,
    list: bool,
    format: Option<String>,
    enter: Option<usize>,
    query: String,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        settings: "settings.json".into(),
        tabs: "tabs.json".into(),
        extensions: "extensions.json".into(),
        shift: false,
        list: false,
        format: None,
        enter: None,
        query: String::new(),
    };
    let mut words = Vec::new();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--settings" => args.settings = it.next().context("--settings needs a path")?,
            "--tabs" => args.tabs = it.next().context("--tabs needs a path")?,
            "--extensions" => args.extensions = it.next().context("--extensions needs a path")?,
            "--shift" => args.shift = true,
            "--list" => args.list = true,
            "--format" => args.format = Some(it.next().context("--format needs a template")?),
            "--enter" => {
                let n = it.next().context("--enter needs a row index")?;
                args.enter = Some(n.parse().with_context(|| format!("bad row index `{n}`"))?);
            }
            _ => words.push(arg),
        }
    }
    args.query = words.join(" ");
    Ok(args)
}

fn run_query(manager: &PluginManager, query: &str) -> anyhow::Result<(String, Vec<ResultItem>)> {
    let mut query = query.to_string();
    for _ in 0..=MAX_REWRITES {
        match manager.search(&query) {
            InputOutcome::Items(items) => return Ok((query, items)),
            InputOutcome::Rewrite(next) => {
                tracing::debug!(from = %query, to = %next, "query rewritten");
                query = next;
            }
        }
    }
    bail!("query `{query}` keeps rewriting itself")
}

fn main() -> anyhow::Result<()> {
    let args = parse_args()?;
    let settings = Settings::load(&args.settings)?;
    logging::init(settings.debug_logging, settings.log_file.clone());

    let catalog = match &settings.messages_path {
        Some(path) => MessageCatalog::load(path, settings.locale.clone()).unwrap_or_else(|e| {
            tracing::warn!(error = %format!("{e:#}"), "message catalog unreadable");
            MessageCatalog::new(settings.locale.clone())
        }),
        None => MessageCatalog::new(settings.locale.clone()),
    };
    let manager = builtin_manager(
        &settings,
        &catalog,
        Sources {
            opener: Arc::new(SystemOpener),
            tabs: Arc::new(JsonTabSource::new(&args.tabs)),
            extensions: Arc::new(JsonExtensionSource::new(&args.extensions)),
        },
    )?;

    if args.list {
        for (name, description) in manager.descriptions() {
            println!("{name}\t{description}\t{}", document_url(name, &settings.locale));
        }
        println!("{}", serde_json::to_string_pretty(&manager.commands())?);
        return Ok(());
    }

    let (mut query, mut items) = run_query(&manager, &args.query)?;
    if let Some(index) = args.enter {
        let item = items
            .get(index)
            .with_context(|| format!("no row {index} for `{query}`"))?
            .clone();
        let outcome =
            futures::executor::block_on(manager.enter(&item, &query, args.shift, &items))?;
        if let EnterOutcome::Rewrite(next) = outcome {
            (query, items) = run_query(&manager, &next)?;
        } else {
            return Ok(());
        }
    }

    tracing::debug!(%query, rows = items.len(), "results");
    match &args.format {
        Some(template) => {
            for item in &items {
                println!("{}", render_row(template, item));
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&items)?),
    }
    Ok(())
}

/// One result row through a `{{field}}` template.
fn render_row(template: &str, item: &ResultItem) -> String {
    let data = HashMap::from([
        ("plugin", item.plugin.clone()),
        ("key", item.key.clone()),
        ("title", item.title.clone()),
        ("desc", item.desc.clone()),
        ("url", item.url.clone().unwrap_or_default()),
        ("id", item.id.clone().unwrap_or_default()),
    ]);
    render_template(template, &data)
}
