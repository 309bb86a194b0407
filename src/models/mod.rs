use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::Display;

/// Kind of media a favorite belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Movie,
    #[serde(rename = "TV Series")]
    TvSeries,
    Book,
    Music,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Movie => "Movie",
            Category::TvSeries => "TV Series",
            Category::Book => "Book",
            Category::Music => "Music",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A media item the user likes, used as taste input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub category: Category,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl FavoriteItem {
    pub fn new(category: Category, title: impl Into<String>) -> Self {
        Self {
            category,
            title: title.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// A single suggestion decoded from a generation response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub category: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<RecommendationItem>,
}

impl RecommendationResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Response schema sent with recommendation requests.
    ///
    /// Uses the OpenAPI subset accepted by Gemini's `responseSchema`. The
    /// required lists mirror the serde shape of [`RecommendationItem`].
    pub fn response_schema() -> Value {
        json!({
            "type": "OBJECT",
            "properties": {
                "recommendations": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "category": { "type": "STRING" },
                            "title": { "type": "STRING" },
                            "creator": { "type": "STRING" },
                            "reason": { "type": "STRING" }
                        },
                        "required": ["category", "title", "reason"]
                    }
                }
            },
            "required": ["recommendations"]
        })
    }
}

/// Which info-finder template a lookup uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMode {
    /// Streaming platforms and season breakdown for any title
    Streaming,
    /// Israeli broadcast channels and providers
    Israeli,
}

/// Free-text availability lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoQuery {
    #[serde(default)]
    pub query: String,
    pub mode: LookupMode,
    /// Ignore `query` and list series currently airing new episodes
    #[serde(default)]
    pub discover_current_airing: bool,
    #[serde(default)]
    pub check_all_providers: bool,
}
