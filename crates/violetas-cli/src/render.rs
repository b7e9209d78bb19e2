//! Plain-text views in the active display language.

use std::fmt::Write;

use violetas_core::{
    Attendance, BreakoutGroups, Config, Event, Language, MeetingEngine, Phrase, RejectReason,
};

pub fn board(config: &Config, engine: &MeetingEngine) -> String {
    let lang = engine.language();
    let state = engine.session_state();
    let title = lang.pick(&config.club.book_title_en, &config.club.book_title_es);
    let mut out = String::new();

    let _ = writeln!(out, "{}", config.club.name);
    let _ = writeln!(out, "{}", Phrase::BookClub.text(lang));
    let _ = writeln!(out, "{}: {title}", Phrase::CurrentlyReading.text(lang));
    let _ = writeln!(
        out,
        "{}: {}",
        Phrase::CurrentLanguage.text(lang),
        Phrase::LanguageName.text(lang)
    );
    let _ = writeln!(
        out,
        "{}: {}",
        Phrase::CurrentSegment.text(lang),
        Phrase::Segment(state.segment).text(lang)
    );
    let _ = writeln!(out, "{}: {}", Phrase::TimeRemaining.text(lang), state.remaining_min);
    let _ = writeln!(
        out,
        "{}: {}",
        Phrase::NativeEnglishSpeakers.text(lang),
        engine.roster().english().join(", ")
    );
    let _ = writeln!(
        out,
        "{}: {}",
        Phrase::NativeSpanishSpeakers.text(lang),
        engine.roster().spanish().join(", ")
    );
    if let Some(groups) = engine.groups() {
        out.push_str(&self::groups(groups, lang));
    }
    out
}

pub fn groups(groups: &BreakoutGroups, lang: Language) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", Phrase::BreakoutGroups.text(lang));
    for (number, members) in groups.iter() {
        let _ = writeln!(out, "  {} {number}: {}", Phrase::Group.text(lang), members.join(", "));
    }
    out
}

/// One-line description of an event, or `None` for events shown elsewhere.
pub fn event(event: &Event, lang: Language) -> Option<String> {
    match event {
        Event::LanguageChanged { to, .. } => Some(format!(
            "{}: {}",
            Phrase::CurrentLanguage.text(*to),
            Phrase::LanguageName.text(*to)
        )),
        Event::SegmentChanged { to, .. } => Some(format!(
            "{}: {}",
            Phrase::CurrentSegment.text(lang),
            Phrase::Segment(*to).text(lang)
        )),
        Event::GroupsCreated { breakout_session, .. } => Some(format!(
            "{} {}",
            Phrase::Round.text(lang),
            breakout_session.number()
        )),
        Event::GroupsRejected {
            reason: RejectReason::TooFewAttendees { attendees, minimum },
            ..
        } => Some(format!(
            "{} ({attendees}/{minimum})",
            Phrase::NotEnoughAttendees.text(lang)
        )),
        Event::GroupsRejected {
            reason: RejectReason::SessionEnded,
            ..
        } => Some(Phrase::SessionEnding.text(lang).to_string()),
        Event::MemberToggled {
            name, attendance, ..
        } => {
            let label = match attendance {
                Attendance::Present => Phrase::Present,
                Attendance::Absent => Phrase::Absent,
            };
            Some(format!("{name}: {}", label.text(lang)))
        }
        Event::SessionReset { .. } => Some(Phrase::NewSession.text(lang).to_string()),
        Event::StateSnapshot { .. } => None,
    }
}
