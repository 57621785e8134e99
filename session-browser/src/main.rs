use std::env;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use session_catalog::{export_ics, Browser, FileStore, OverlapIndex, View};

use crate::cli::Output;
use crate::render::{long_date, TextView};

mod cli;
mod render;
mod source;

#[derive(Serialize)]
struct JsonOutput<'a> {
    #[serde(flatten)]
    view: &'a View<'a>,
    overlaps: &'a OverlapIndex,
}

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "session_browser=info,session_catalog=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::parse(env::args().skip(1).collect());

    setup_logging();

    let catalog = source::load_catalog(&args.source).await;
    let mut browser = Browser::new(catalog, FileStore::new(&args.store));

    for id in &args.toggles {
        let interested = browser
            .toggle_interest(id)
            .with_context(|| format!("Failed to save interests to {}", args.store.display()))?;
        log::info!(
            "{} session `{id}`",
            if interested { "Marked" } else { "Unmarked" }
        );
    }

    let today = args
        .today
        .unwrap_or_else(|| Utc::now().with_timezone(&args.utc_offset).date_naive());
    log::debug!("Reference date is {today}");

    match args.output {
        Output::Dates => {
            for date in browser.catalog().dates() {
                println!("{date}  {}", long_date(date));
            }
        }
        Output::Text => {
            let view = browser.view(&args.filter, today);
            print!(
                "{}",
                TextView {
                    browser: &browser,
                    view: &view,
                }
            );
        }
        Output::Json => {
            let view = browser.view(&args.filter, today);
            let output = JsonOutput {
                view: &view,
                overlaps: browser.overlaps(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Output::Ics => {
            let view = browser.view(&args.filter, today);
            print!("{}", export_ics(env!("CARGO_PKG_NAME"), view.sessions()));
        }
    }

    Ok(())
}
