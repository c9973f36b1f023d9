use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifies one extraction run; allocated by the state machine on each trigger.
pub type RunId = u64;

/// Target languages offered by the language selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Fr,
    De,
    Hi,
}

impl Language {
    pub const ALL: [Language; 5] = [
        Language::En,
        Language::Es,
        Language::Fr,
        Language::De,
        Language::Hi,
    ];

    /// Wire code sent to the enrichment service.
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Fr => "fr",
            Language::De => "de",
            Language::Hi => "hi",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Fr => "French",
            Language::De => "German",
            Language::Hi => "Hindi",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language code {0:?} (expected one of en, es, fr, de, hi)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let code = raw.trim();
        Language::ALL
            .into_iter()
            .find(|language| language.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| UnknownLanguage(code.to_string()))
    }
}

/// What the extraction agent captured from the active page.
///
/// Either field being absent means the page had nothing to process.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub content: Option<String>,
    pub html: Option<String>,
}

impl ExtractionResult {
    /// Builds a result, mapping empty strings to absent fields.
    pub fn from_parts(content: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            content: non_empty(content.into()),
            html: non_empty(html.into()),
        }
    }

    pub fn is_empty_capture(&self) -> bool {
        self.clone().into_parts().is_none()
    }

    /// Returns `(content, html)` only when both are present and non-empty.
    pub fn into_parts(self) -> Option<(String, String)> {
        match (
            self.content.and_then(non_empty),
            self.html.and_then(non_empty),
        ) {
            (Some(content), Some(html)) => Some((content, html)),
            _ => None,
        }
    }
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Extraction result paired with the URL of the tab it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabCapture {
    pub url: String,
    pub extraction: ExtractionResult,
}

/// Outbound body of `POST /process`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichmentRequest {
    pub content: String,
    pub html: String,
    pub language: Language,
    pub url: String,
}

/// Body returned by the enrichment service. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrichmentResponse {
    pub summary: Option<String>,
    pub translated: Option<String>,
    pub links: Option<Vec<String>>,
    pub word_freq_data: Option<WordFrequencies>,
    pub graph_url: Option<String>,
    pub error: Option<String>,
    pub batch_id: Option<String>,
}

/// Word to count mapping that keeps the order in which the service sent it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WordFrequencies(Vec<(String, u64)>);

impl WordFrequencies {
    pub fn new(entries: Vec<(String, u64)>) -> Self {
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

impl FromIterator<(String, u64)> for WordFrequencies {
    fn from_iter<T: IntoIterator<Item = (String, u64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Serialize for WordFrequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(word, count)| (word, count)))
    }
}

impl<'de> Deserialize<'de> for WordFrequencies {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = WordFrequencies;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of word to count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                // A repeated word keeps its first position and takes the last count.
                let mut entries: Vec<(String, u64)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                let mut positions: HashMap<String, usize> = HashMap::with_capacity(entries.capacity());
                while let Some((word, count)) = map.next_entry::<String, u64>()? {
                    match positions.get(&word) {
                        Some(&index) => entries[index].1 = count,
                        None => {
                            positions.insert(word.clone(), entries.len());
                            entries.push((word, count));
                        }
                    }
                }
                Ok(WordFrequencies(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
