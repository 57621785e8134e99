use chrono::NaiveDate;
use serde_json::Value;

use crate::{Catalog, Session, Speaker};

/// Which envelope the catalog payload arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `{"result": {"sessions": [...]}}`
    Wrapped,
    /// `{"sessions": [...]}`
    Sessions,
    /// `[...]`
    Array,
    /// Anything else, including invalid JSON. Yields an empty catalog.
    Unrecognized,
}

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub shape: Shape,
    /// Records dropped for missing or invalid required fields, or a repeated id.
    pub skipped: usize,
}

pub fn parse_catalog<S: AsRef<str>>(s: S) -> LoadReport {
    match serde_json::from_str::<Value>(s.as_ref()) {
        Ok(value) => parse_catalog_value(value),
        Err(err) => {
            log::debug!("Catalog payload is not valid JSON: {err}");
            empty_report()
        }
    }
}

pub fn parse_catalog_value(value: Value) -> LoadReport {
    let Some((shape, records)) = unwrap_envelope(value) else {
        log::debug!("Catalog payload has an unrecognized shape");
        return empty_report();
    };

    let total = records.len();
    let sessions = records
        .iter()
        .enumerate()
        .filter_map(|(idx, record)| {
            let session = parse_session(record);
            if session.is_none() {
                log::debug!("Skipping catalog record #{idx}: missing or invalid required field");
            }
            session
        })
        .collect::<Vec<_>>();

    let invalid = total - sessions.len();
    let (catalog, duplicates) = Catalog::from_sessions(sessions);
    let skipped = invalid + duplicates;

    if skipped > 0 {
        log::debug!("Skipped {skipped} of {total} catalog records");
    }

    LoadReport {
        catalog,
        shape,
        skipped,
    }
}

fn empty_report() -> LoadReport {
    LoadReport {
        catalog: Catalog::default(),
        shape: Shape::Unrecognized,
        skipped: 0,
    }
}

fn unwrap_envelope(value: Value) -> Option<(Shape, Vec<Value>)> {
    match value {
        Value::Array(records) => Some((Shape::Array, records)),
        Value::Object(mut object) => {
            if let Some(Value::Array(records)) = object
                .get_mut("result")
                .and_then(|result| result.get_mut("sessions"))
                .map(Value::take)
            {
                return Some((Shape::Wrapped, records));
            }

            match object.remove("sessions") {
                Some(Value::Array(records)) => Some((Shape::Sessions, records)),
                _ => None,
            }
        }
        _ => None,
    }
}

fn parse_session(record: &Value) -> Option<Session> {
    let id = identifier(record.get("id")?)?;
    let title = record.get("title")?.as_str()?.to_string();
    let date = NaiveDate::parse_from_str(record.get("date")?.as_str()?.trim(), "%Y-%m-%d").ok()?;
    let start_unix = epoch(record.get("start_unix")?)?;
    let end_unix = epoch(record.get("end_unix")?)?;

    if start_unix >= end_unix {
        log::debug!("Session `{id}` has an empty time interval and will not overlap anything");
    }

    let speaker_groups = record
        .get("speaker_group")
        .and_then(Value::as_array)
        .map(|groups| groups.iter().map(parse_speaker_group).collect())
        .unwrap_or_default();

    Some(Session {
        id,
        title,
        description: text(record, "desc"),
        date,
        start: text(record, "start").unwrap_or_default(),
        end: text(record, "end").unwrap_or_default(),
        start_unix,
        end_unix,
        location: text(record, "loc"),
        speaker_groups,
    })
}

fn parse_speaker_group(group: &Value) -> Vec<Speaker> {
    group
        .get("list")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(parse_speaker).collect())
        .unwrap_or_default()
}

fn parse_speaker(speaker: &Value) -> Option<Speaker> {
    Some(Speaker {
        name: speaker.get("name")?.as_str()?.to_string(),
        title: text(speaker, "title"),
        affiliation: text(speaker, "aff"),
        location: text(speaker, "loc"),
        photo_url: text(speaker, "pic"),
    })
}

fn identifier(value: &Value) -> Option<String> {
    match value {
        Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}

/// Integer epoch seconds, given either as a JSON integer or a numeric string.
fn epoch(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn text(record: &Value, key: &str) -> Option<String> {
    record.get(key)?.as_str().map(str::to_string)
}
