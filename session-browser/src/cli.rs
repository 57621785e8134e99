use std::env;
use std::path::PathBuf;
use std::process;

use chrono::{FixedOffset, NaiveDate};
use getopts::{Matches, Options};
use session_catalog::{DateFilter, FilterState};

/// Conference local time when no offset is given (PDT).
const DEFAULT_UTC_OFFSET_HOURS: i32 = -7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Text,
    Json,
    Ics,
    Dates,
}

#[derive(Debug)]
pub struct Args {
    pub source: String,
    pub store: PathBuf,
    pub filter: FilterState,
    pub toggles: Vec<String>,
    pub today: Option<NaiveDate>,
    pub utc_offset: FixedOffset,
    pub output: Output,
}

fn opts() -> Options {
    let mut opts = Options::new();
    opts.optflag(
        "h",
        "help",
        concat!("Print the help output of ", env!("CARGO_PKG_NAME")),
    );
    opts.optopt(
        "s",
        "source",
        "Session catalog file or http(s) URL [Default: sessions.json]",
        "PATH_OR_URL",
    );
    opts.optopt(
        "",
        "store",
        "File the interest list is kept in [Default: interests.json]",
        "PATH",
    );
    opts.optflag("m", "microsoft", "Only sessions with a Microsoft speaker");
    opts.optflag("o", "overlaps", "Only sessions that overlap another session");
    opts.optflag("i", "interested", "Only sessions marked as interested");
    opts.optopt(
        "q",
        "search",
        "Match title, description or speaker name",
        "TERM",
    );
    opts.optopt(
        "d",
        "date",
        "Show one day, or all upcoming days [Default: all]",
        "all|YYYY-MM-DD",
    );
    opts.optmulti(
        "t",
        "toggle",
        "Flip interest in a session before showing results",
        "SESSION_ID",
    );
    opts.optopt(
        "",
        "today",
        "Reference date for hiding past sessions [Default: current date]",
        "YYYY-MM-DD",
    );
    opts.optopt(
        "",
        "utc-offset",
        "Conference UTC offset used to determine the current date [Default: -7]",
        "HOURS",
    );
    opts.optflag("", "dates", "List the days present in the catalog");
    opts.optflag("", "json", "Print the filtered view as JSON");
    opts.optflag("", "ics", "Print the filtered sessions as an iCalendar document");
    opts
}

pub fn parse(args: Vec<String>) -> Args {
    let opts = opts();

    let matches = match opts.parse(args) {
        Ok(matches) => matches,
        Err(fail) => {
            eprintln!("{fail}");
            process::exit(1);
        }
    };

    if matches.opt_present("help") {
        println!("{}", opts.usage(&opts.short_usage(env!("CARGO_PKG_NAME"))));
        process::exit(0);
    }

    match from_matches(&matches) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}");
            process::exit(1);
        }
    }
}

fn from_matches(matches: &Matches) -> Result<Args, String> {
    let date_filter = matches
        .opt_get_default("date", DateFilter::All)
        .map_err(|err| format!("Provided value for option 'date' is invalid: {err}"))?;

    let today = matches
        .opt_get::<NaiveDate>("today")
        .map_err(|err| format!("Provided value for option 'today' is invalid: {err}"))?;

    let offset_hours = matches
        .opt_get_default("utc-offset", DEFAULT_UTC_OFFSET_HOURS)
        .map_err(|err| format!("Provided value for option 'utc-offset' is invalid: {err}"))?;

    let utc_offset = offset_hours
        .checked_mul(3600)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| {
            format!("Provided value for option 'utc-offset' is out of range: {offset_hours}")
        })?;

    let output = match (
        matches.opt_present("json"),
        matches.opt_present("ics"),
        matches.opt_present("dates"),
    ) {
        (false, false, false) => Output::Text,
        (true, false, false) => Output::Json,
        (false, true, false) => Output::Ics,
        (false, false, true) => Output::Dates,
        _ => return Err("Options 'json', 'ics' and 'dates' are mutually exclusive".to_string()),
    };

    let filter = FilterState {
        microsoft_only: matches.opt_present("microsoft"),
        overlaps_only: matches.opt_present("overlaps"),
        interested_only: matches.opt_present("interested"),
        search_term: matches.opt_str("search").unwrap_or_default(),
        date_filter,
    };

    Ok(Args {
        source: matches
            .opt_str("source")
            .unwrap_or_else(|| "sessions.json".to_string()),
        store: matches
            .opt_str("store")
            .map_or_else(|| PathBuf::from("interests.json"), PathBuf::from),
        filter,
        toggles: matches.opt_strs("toggle"),
        today,
        utc_offset,
        output,
    })
}
