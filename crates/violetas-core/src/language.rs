//! Display language and the fixed bilingual phrase table.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::Segment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Es,
}

impl Language {
    /// Pick the variant matching this language.
    pub fn pick<T>(self, english: T, spanish: T) -> T {
        match self {
            Language::En => english,
            Language::Es => spanish,
        }
    }

    pub fn code(self) -> &'static str {
        self.pick("en", "es")
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Every UI string the host shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phrase {
    NewSession,
    BookClub,
    CurrentlyReading,
    CurrentLanguage,
    /// Name of the active language, written in that language.
    LanguageName,
    CurrentSegment,
    TimeRemaining,
    NativeEnglishSpeakers,
    NativeSpanishSpeakers,
    CreateBreakoutGroups,
    BreakoutGroups,
    Group,
    Round,
    NotEnoughAttendees,
    SessionEnding,
    Present,
    Absent,
    Segment(Segment),
}

impl Phrase {
    pub fn text(self, language: Language) -> &'static str {
        let (en, es) = match self {
            Phrase::NewSession => ("New session", "Nueva sesión"),
            Phrase::BookClub => ("Book club", "Club de lectura"),
            Phrase::CurrentlyReading => ("Currently reading", "En la lectura actual"),
            Phrase::CurrentLanguage => ("Current language", "Idioma actual"),
            Phrase::LanguageName => ("English", "español"),
            Phrase::CurrentSegment => ("Current segment", "Segmento en curso"),
            Phrase::TimeRemaining => ("Time remaining in segment", "Tiempo restante en el segmento"),
            Phrase::NativeEnglishSpeakers => ("Native English speakers", "Anglohablantes"),
            Phrase::NativeSpanishSpeakers => ("Native Spanish speakers", "Hispanohablantes"),
            Phrase::CreateBreakoutGroups => ("Create breakout groups", "Crear grupos de discusión"),
            Phrase::BreakoutGroups => ("Breakout groups", "Grupos de discusión"),
            Phrase::Group => ("Group", "Grupo"),
            Phrase::Round => ("Round", "Ronda"),
            Phrase::NotEnoughAttendees => (
                "Not enough attendees for breakout groups",
                "No hay suficientes asistentes para los grupos de discusión",
            ),
            Phrase::SessionEnding => ("The session is ending", "La sesión está terminando"),
            Phrase::Present => ("present", "presente"),
            Phrase::Absent => ("absent", "ausente"),
            Phrase::Segment(Segment::Greetings) => ("greetings", "saludos"),
            Phrase::Segment(Segment::Breakout) => ("breakout groups", "grupos de discusión"),
            Phrase::Segment(Segment::Farewells) => ("farewells", "despedidas"),
        };
        language.pick(en, es)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_follows_language() {
        assert_eq!(Language::En.pick("hello", "hola"), "hello");
        assert_eq!(Language::Es.pick("hello", "hola"), "hola");
    }

    #[test]
    fn segment_labels_are_translated() {
        assert_eq!(Phrase::Segment(Segment::Greetings).text(Language::En), "greetings");
        assert_eq!(Phrase::Segment(Segment::Greetings).text(Language::Es), "saludos");
        assert_eq!(Phrase::Segment(Segment::Farewells).text(Language::Es), "despedidas");
    }

    #[test]
    fn language_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::Es).unwrap(), "\"es\"");
        assert_eq!(Language::En.to_string(), "en");
    }
}
