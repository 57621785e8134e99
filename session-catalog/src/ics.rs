use chrono::{DateTime, Utc};
use ics::{
    escape_text,
    properties::{Description, DtEnd, DtStart, Location, Organizer, Summary},
    ICalendar,
};

use crate::Session;

/// Builds a calendar with one event per session. Sessions whose epochs fall
/// outside the representable range are left out.
#[must_use]
pub fn export_ics<'a, I>(name: &'a str, sessions: I) -> ICalendar<'a>
where
    I: IntoIterator<Item = &'a Session>,
{
    let mut icalendar = ICalendar::new("2.0", name);

    for session in sessions {
        match session.to_ics() {
            Some(event) => icalendar.add_event(event),
            None => log::debug!("Session `{}` has no valid timestamps, not exported", session.id),
        }
    }

    icalendar
}

fn utc_stamp(epoch: i64) -> Option<String> {
    DateTime::<Utc>::from_timestamp(epoch, 0).map(|time| time.format("%Y%m%dT%H%M%SZ").to_string())
}

impl Session {
    #[must_use]
    pub fn to_ics(&self) -> Option<ics::Event<'_>> {
        let start = utc_stamp(self.start_unix)?;
        let end = utc_stamp(self.end_unix)?;

        let id = format!("{}@session-browser", self.id);

        let mut ics_event = ics::Event::new(id, start.clone());

        ics_event.push(DtStart::new(start));
        ics_event.push(DtEnd::new(end));
        ics_event.push(Summary::new(escape_text(self.title.as_str())));

        if let Some(location) = &self.location {
            ics_event.push(Location::new(escape_text(location.as_str())));
        }

        if let Some(description) = &self.description {
            ics_event.push(Description::new(escape_text(description.as_str())));
        }

        let speakers = self
            .speakers()
            .map(|speaker| speaker.name.as_str())
            .collect::<Vec<_>>();

        if !speakers.is_empty() {
            ics_event.push(Organizer::new(speakers.join(", ")));
        }

        Some(ics_event)
    }
}
