//! # Content Records
//!
//! Records returned by the scripture API. The client only reads optional
//! fields; it never validates or reshapes what the server sends.

use std::collections::HashMap;
use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

// ============================================================================
// Languages
// ============================================================================

/// The four languages the reader can display.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Hebrew,
    Greek,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    LeftToRight,
    RightToLeft,
}

/// Typography class for a language's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Typography {
    Serif,
    Sans,
    Monospace,
}

/// Static presentation settings for one language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageDescriptor {
    pub display_name: &'static str,
    pub direction: TextDirection,
    pub typography: Typography,
    /// Whether a transliteration line is shown under the verse text.
    pub shows_transliteration: bool,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::English,
        Language::Hindi,
        Language::Hebrew,
        Language::Greek,
    ];

    /// Key used by the API for this language in multilingual maps and query strings.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Hebrew => "hebrew",
            Language::Greek => "greek",
        }
    }

    pub fn descriptor(self) -> LanguageDescriptor {
        match self {
            Language::English => LanguageDescriptor {
                display_name: "English",
                direction: TextDirection::LeftToRight,
                typography: Typography::Serif,
                shows_transliteration: false,
            },
            Language::Hindi => LanguageDescriptor {
                display_name: "हिन्दी",
                direction: TextDirection::LeftToRight,
                typography: Typography::Sans,
                shows_transliteration: false,
            },
            Language::Hebrew => LanguageDescriptor {
                display_name: "עברית",
                direction: TextDirection::RightToLeft,
                typography: Typography::Monospace,
                shows_transliteration: true,
            },
            Language::Greek => LanguageDescriptor {
                display_name: "Ελληνικά",
                direction: TextDirection::LeftToRight,
                typography: Typography::Serif,
                shows_transliteration: true,
            },
        }
    }

    /// Next language in picker order, wrapping around.
    pub fn next(self) -> Language {
        let idx = Language::ALL.iter().position(|l| *l == self).unwrap_or(0);
        Language::ALL[(idx + 1) % Language::ALL.len()]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// Multilingual text
// ============================================================================

/// Language code → text, exactly as served.
///
/// Unknown codes are kept but never displayed. Empty strings count as absent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(transparent)]
pub struct LocalizedText(pub HashMap<String, String>);

impl LocalizedText {
    pub fn get(&self, language: Language) -> Option<&str> {
        self.0
            .get(language.code())
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Text in `language`, falling back to English, then to an empty string.
    pub fn resolve(&self, language: Language) -> &str {
        self.get(language)
            .or_else(|| self.get(Language::English))
            .unwrap_or("")
    }
}

impl<const N: usize> From<[(Language, &str); N]> for LocalizedText {
    fn from(entries: [(Language, &str); N]) -> Self {
        LocalizedText(
            entries
                .into_iter()
                .map(|(lang, text)| (lang.code().to_string(), text.to_string()))
                .collect(),
        )
    }
}

// ============================================================================
// Books and verses
// ============================================================================

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

impl Testament {
    pub fn label(self) -> &'static str {
        match self {
            Testament::Old => "OT",
            Testament::New => "NT",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Book {
    pub id: String,
    #[serde(default)]
    pub name: LocalizedText,
    #[serde(default)]
    pub testament: Option<Testament>,
    pub chapters: u32,
}

impl Book {
    /// The English name, which is how the API addresses books in paths.
    pub fn english_name(&self) -> &str {
        self.name.resolve(Language::English)
    }

    pub fn display_name(&self, language: Language) -> &str {
        self.name.resolve(language)
    }

    /// Chapter numbers offered for this book.
    pub fn chapter_options(&self) -> std::ops::RangeInclusive<u32> {
        1..=self.chapters
    }
}

/// Commentary attached to a verse. The server sends `{}` when there is none.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Notes {
    #[serde(default)]
    pub commentary: Option<String>,
    #[serde(default)]
    pub study_notes: Option<String>,
}

impl Notes {
    pub fn commentary(&self) -> Option<&str> {
        self.commentary.as_deref().filter(|s| !s.is_empty())
    }

    pub fn study_notes(&self) -> Option<&str> {
        self.study_notes.as_deref().filter(|s| !s.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.commentary().is_none() && self.study_notes().is_none()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Verse {
    #[serde(default)]
    pub id: String,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    #[serde(default)]
    pub text: LocalizedText,
    #[serde(default)]
    pub transliteration: LocalizedText,
    #[serde(default)]
    pub notes: Option<Notes>,
    /// Citations such as "John 1:1". Resolved server-side by `/cross-references`.
    #[serde(default)]
    pub cross_references: Vec<String>,
}

impl Verse {
    /// "John 3:16"
    pub fn citation(&self) -> String {
        format!("{} {}:{}", self.book, self.chapter, self.verse)
    }
}

// ============================================================================
// Response envelopes
// ============================================================================

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    #[serde(default)]
    pub verses: Vec<Verse>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CrossReferences {
    #[serde(default)]
    pub original_verse: Option<Verse>,
    #[serde(default)]
    pub cross_references: Vec<Verse>,
}

// ============================================================================
// Requests
// ============================================================================

/// Optional testament filter applied to searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    #[default]
    All,
    Only(Testament),
}

impl SearchScope {
    pub fn next(self) -> SearchScope {
        match self {
            SearchScope::All => SearchScope::Only(Testament::Old),
            SearchScope::Only(Testament::Old) => SearchScope::Only(Testament::New),
            SearchScope::Only(Testament::New) => SearchScope::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SearchScope::All => "All",
            SearchScope::Only(Testament::Old) => "Old Testament",
            SearchScope::Only(Testament::New) => "New Testament",
        }
    }

    /// Value of the `testament` query parameter, if any.
    pub fn testament_param(self) -> Option<&'static str> {
        match self {
            SearchScope::All => None,
            SearchScope::Only(Testament::Old) => Some("old"),
            SearchScope::Only(Testament::New) => Some("new"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub language: Language,
    pub limit: u32,
    pub scope: SearchScope,
}
