use std::fmt;

use chrono::NaiveDate;
use session_catalog::{Browser, KeyValueStore, Session, Speaker, View};

const NO_RESULTS: &str = "No sessions match your filters. Try adjusting your search criteria.";

pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Plain-text rendering of a view, one block per session.
pub struct TextView<'a, S> {
    pub browser: &'a Browser<S>,
    pub view: &'a View<'a>,
}

impl<S: KeyValueStore> fmt::Display for TextView<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.view.is_empty() {
            writeln!(f, "{NO_RESULTS}")?;
        }

        for group in &self.view.groups {
            if self.view.show_date_headers() {
                writeln!(f, "== {} ==", long_date(group.date))?;
                writeln!(f)?;
            }

            for session in &group.sessions {
                self.session(f, session)?;
                writeln!(f)?;
            }
        }

        writeln!(f, "{}", self.view.stats)
    }
}

impl<S: KeyValueStore> TextView<'_, S> {
    fn session(&self, f: &mut fmt::Formatter<'_>, session: &Session) -> fmt::Result {
        let overlap_count = self.browser.overlaps_of(&session.id).len();

        write!(f, "{} - {}  ", session.start, session.end)?;
        if session.has_microsoft_speaker() {
            write!(f, "[MS] ")?;
        }
        if overlap_count > 0 {
            write!(f, "[!{overlap_count}] ")?;
        }
        if self.browser.is_interested(&session.id) {
            write!(f, "* ")?;
        }
        writeln!(f, "{}  ({})", session.title, session.id)?;

        let names = session
            .speakers()
            .map(|speaker| speaker.name.as_str())
            .collect::<Vec<_>>();

        if names.is_empty() {
            writeln!(f, "    No speakers listed")?;
        } else {
            writeln!(f, "    {}", names.join(", "))?;
        }

        writeln!(f, "    {}", session.location.as_deref().unwrap_or("TBA"))?;
        writeln!(
            f,
            "    {}",
            session
                .description
                .as_deref()
                .unwrap_or("No description available.")
        )?;

        if !names.is_empty() {
            writeln!(f, "    Speakers:")?;
            for speaker in session.speakers() {
                speaker_line(f, speaker)?;
            }
        }

        if overlap_count > 0 {
            let details = self.browser.overlap_details(&session.id);
            writeln!(f, "    Overlaps with:")?;
            for other in details.listed {
                writeln!(f, "      - {} ({} - {})", other.title, other.start, other.end)?;
            }
            if details.remaining > 0 {
                writeln!(f, "      ...and {} more", details.remaining)?;
            }
        }

        Ok(())
    }
}

/// Name followed by whichever of title, affiliation and location are known.
fn speaker_line(f: &mut fmt::Formatter<'_>, speaker: &Speaker) -> fmt::Result {
    let details = [&speaker.title, &speaker.affiliation, &speaker.location]
        .into_iter()
        .flatten()
        .map(String::as_str)
        .collect::<Vec<_>>();

    if details.is_empty() {
        writeln!(f, "      - {}", speaker.name)
    } else {
        writeln!(f, "      - {}: {}", speaker.name, details.join(", "))
    }
}
