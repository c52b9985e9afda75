use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::format::scalar_text;

/// One page of the article listing, as confirmed by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticlePage {
    pub page: u32,
    pub pages: u32,
    pub total: u64,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub results: Vec<ArticleSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub source: Option<String>,
    #[serde(default, rename = "_sub_source", deserialize_with = "de::opt_text")]
    pub sub_source: Option<String>,
    #[serde(default)]
    pub metadata: Option<Value>,
}

impl ArticleSummary {
    /// `metadata.title`, falling back to the article id.
    pub fn title(&self) -> String {
        self.metadata
            .as_ref()
            .and_then(|m| m.get("title"))
            .map(scalar_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.id.clone())
    }

    pub fn date(&self) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get("date"))
    }

    /// Source shown in the badge; a sub-source wins over the collection source.
    pub fn badge_source(&self) -> &str {
        [&self.sub_source, &self.source]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Paragraphs {
    #[serde(default, deserialize_with = "de::paragraphs")]
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDetail {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(default)]
    pub metadata: Value,
    #[serde(default)]
    pub original: Option<Paragraphs>,
    #[serde(default)]
    pub translation: Option<Paragraphs>,
    #[serde(default, deserialize_with = "de::truthy")]
    pub has_translation: bool,
}

impl ArticleDetail {
    pub fn original_paragraphs(&self) -> &[String] {
        self.original.as_ref().map(|p| p.paragraphs.as_slice()).unwrap_or(&[])
    }

    pub fn translation_paragraphs(&self) -> &[String] {
        self.translation.as_ref().map(|p| p.paragraphs.as_slice()).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSummary {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "de::count")]
    pub annotation_count: u64,
}

impl SegmentSummary {
    /// Sidebar label: `label`, or the id when the label is missing.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().filter(|l| !l.is_empty()).unwrap_or(&self.id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentIndex {
    #[serde(default)]
    pub segments: Vec<SegmentSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub label: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub ref_text: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub ref_text_ko: Option<String>,
}

impl Segment {
    /// Reference text, falling back to the label.
    pub fn reference(&self) -> &str {
        [&self.ref_text, &self.label]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentDetail {
    pub segment: Segment,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

/// A single commentator's note on a segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    #[serde(default, deserialize_with = "de::opt_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub commentator: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub commentator_name: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub era: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub life_years: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub commentary_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub text: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub translation_ko: Option<String>,
}

impl Annotation {
    pub fn display_name(&self) -> &str {
        [&self.commentator_name, &self.commentator]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }
}

/// Which browser serves a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CollectionKind {
    Articles,
    Threads,
    Other(String),
}

impl Default for CollectionKind {
    fn default() -> Self {
        Self::Articles
    }
}

impl From<String> for CollectionKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "articles" => Self::Articles,
            "threads" => Self::Threads,
            _ => Self::Other(value),
        }
    }
}

impl From<CollectionKind> for String {
    fn from(kind: CollectionKind) -> Self {
        kind.as_str().to_string()
    }
}

impl CollectionKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Articles => "articles",
            Self::Threads => "threads",
            Self::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    #[serde(deserialize_with = "de::text")]
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: CollectionKind,
    #[serde(default, deserialize_with = "de::text")]
    pub title: String,
    #[serde(default, deserialize_with = "de::text")]
    pub description: String,
    #[serde(default, deserialize_with = "de::count")]
    pub record_count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(rename = "type", default)]
    pub kind: CollectionKind,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "de::opt_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_count")]
    pub record_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lenient field decoders: the archive mixes numeric and string scalars,
/// and passes raw record fields through, nulls included.
mod de {
    use super::*;
    use crate::format::is_truthy;

    fn scalar(value: Value) -> Option<String> {
        match value {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(scalar_text(&other)),
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(scalar(Value::deserialize(deserializer)?).unwrap_or_default())
    }

    pub fn opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        Ok(scalar(Value::deserialize(deserializer)?))
    }

    /// Truthiness of any JSON value; null and absent are false.
    pub fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(is_truthy(&Value::deserialize(deserializer)?))
    }

    fn number(value: &Value) -> Option<u64> {
        match value {
            Value::Number(n) => n.as_u64().or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Non-negative count; anything unparseable counts as zero.
    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        Ok(number(&Value::deserialize(deserializer)?).unwrap_or(0))
    }

    pub fn opt_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
        Ok(number(&Value::deserialize(deserializer)?))
    }

    pub fn paragraphs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
        let items = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
        Ok(items.into_iter().map(|v| scalar(v).unwrap_or_default()).collect())
    }
}
