//! # Verse Projection
//!
//! Turns a `Verse` plus the current language and cross-reference state into
//! exactly what a verse card shows. Pure: the TUI only lays the result out.

use crate::api::{Language, LanguageDescriptor, Verse};
use crate::core::state::CrossReferenceState;

/// A related verse inside an expanded cross-reference block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedVerse<'a> {
    pub citation: String,
    pub text: &'a str,
}

/// Everything a verse card displays.
#[derive(Debug, Clone, PartialEq)]
pub struct VerseView<'a> {
    pub citation: String,
    pub text: &'a str,
    pub transliteration: Option<&'a str>,
    pub commentary: Option<&'a str>,
    pub study_notes: Option<&'a str>,
    /// Whether the cross-reference panel is toggled open (drives the ▶/▼ marker).
    pub cross_references_open: bool,
    /// Present only when the panel is open and its data has been fetched.
    pub cross_references: Option<Vec<RelatedVerse<'a>>>,
    /// Number of citations the record lists, shown before anything is fetched.
    pub reference_count: usize,
    pub descriptor: LanguageDescriptor,
}

impl VerseView<'_> {
    pub fn has_annotations(&self) -> bool {
        self.commentary.is_some() || self.study_notes.is_some()
    }
}

pub fn project<'a>(
    verse: &'a Verse,
    language: Language,
    cross_refs: &'a CrossReferenceState,
) -> VerseView<'a> {
    let descriptor = language.descriptor();

    let transliteration = if descriptor.shows_transliteration {
        verse.transliteration.get(language)
    } else {
        None
    };

    let notes = verse.notes.as_ref();

    let cross_references = cross_refs.expanded(&verse.id).map(|related| {
        related
            .iter()
            .map(|r| RelatedVerse {
                citation: r.citation(),
                text: r.text.resolve(language),
            })
            .collect()
    });

    VerseView {
        citation: verse.citation(),
        text: verse.text.resolve(language),
        transliteration,
        commentary: notes.and_then(|n| n.commentary()),
        study_notes: notes.and_then(|n| n.study_notes()),
        cross_references_open: cross_refs.is_visible(&verse.id),
        cross_references,
        reference_count: verse.cross_references.len(),
        descriptor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LocalizedText, Notes, TextDirection};
    use crate::test_support::sample_verse;

    fn english_only(id: &str) -> Verse {
        Verse {
            text: LocalizedText::from([(Language::English, "For God so loved the world")]),
            transliteration: LocalizedText::default(),
            notes: None,
            ..sample_verse(id, "John", 3, 16)
        }
    }

    #[test]
    fn test_missing_language_falls_back_to_english() {
        let verse = english_only("v1");
        let refs = CrossReferenceState::default();
        let view = project(&verse, Language::Hindi, &refs);
        assert_eq!(view.text, "For God so loved the world");
        assert_eq!(view.citation, "John 3:16");
    }

    #[test]
    fn test_present_language_never_shows_english() {
        let verse = sample_verse("v1", "Genesis", 1, 1);
        let refs = CrossReferenceState::default();
        let view = project(&verse, Language::Greek, &refs);
        assert_eq!(view.text, "Ἐν ἀρχῇ ἐποίησεν ὁ θεὸς");
        assert!(!view.text.contains("beginning"));
    }

    #[test]
    fn test_transliteration_only_for_hebrew_and_greek() {
        let mut verse = sample_verse("v1", "Genesis", 1, 1);
        verse.transliteration = LocalizedText::from([
            (Language::Hebrew, "B'reishit"),
            (Language::Greek, "En archē"),
            (Language::Hindi, "should never show"),
        ]);
        let refs = CrossReferenceState::default();

        assert_eq!(project(&verse, Language::Hebrew, &refs).transliteration, Some("B'reishit"));
        assert_eq!(project(&verse, Language::Greek, &refs).transliteration, Some("En archē"));
        assert_eq!(project(&verse, Language::Hindi, &refs).transliteration, None);
        assert_eq!(project(&verse, Language::English, &refs).transliteration, None);
    }

    #[test]
    fn test_transliteration_hidden_when_missing_for_language() {
        let mut verse = sample_verse("v1", "Genesis", 1, 1);
        verse.transliteration = LocalizedText::from([(Language::Hebrew, "B'reishit")]);
        let refs = CrossReferenceState::default();
        assert_eq!(project(&verse, Language::Greek, &refs).transliteration, None);
    }

    #[test]
    fn test_annotation_fields_are_independent() {
        let mut verse = english_only("v1");
        let refs = CrossReferenceState::default();

        verse.notes = Some(Notes {
            commentary: None,
            study_notes: Some("Logos".into()),
        });
        let view = project(&verse, Language::English, &refs);
        assert!(view.has_annotations());
        assert_eq!(view.commentary, None);
        assert_eq!(view.study_notes, Some("Logos"));

        verse.notes = Some(Notes::default());
        assert!(!project(&verse, Language::English, &refs).has_annotations());
    }

    #[test]
    fn test_cross_references_need_visibility_and_data() {
        let verse = english_only("v1");
        let mut refs = CrossReferenceState::default();

        // Visible but not fetched
        refs.flip("v1");
        let view = project(&verse, Language::English, &refs);
        assert!(view.cross_references_open);
        assert!(view.cross_references.is_none());

        // Visible and fetched
        refs.store("v1", vec![sample_verse("joh-1-1", "John", 1, 1)]);
        let view = project(&verse, Language::Greek, &refs);
        let related = view.cross_references.unwrap();
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].citation, "John 1:1");
        assert_eq!(related[0].text, "Ἐν ἀρχῇ ἐποίησεν ὁ θεὸς");

        // Hidden again: data stays cached but is not shown
        refs.flip("v1");
        assert!(project(&verse, Language::English, &refs).cross_references.is_none());
    }

    #[test]
    fn test_direction_follows_language_not_content() {
        let verse = english_only("v1");
        let refs = CrossReferenceState::default();
        let view = project(&verse, Language::Hebrew, &refs);
        // English fallback text, still laid out right-to-left
        assert_eq!(view.text, "For God so loved the world");
        assert_eq!(view.descriptor.direction, TextDirection::RightToLeft);
    }
}
