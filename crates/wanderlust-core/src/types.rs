// SPDX-License-Identifier: AGPL-3.0
// Wanderlust Core - Type definitions

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Stable identifier of a destination, used to derive its storage key
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DestinationId(String);

impl DestinationId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for DestinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DestinationId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for DestinationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Home feed category
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Mountain,
    Beach,
    Camp,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::All,
        Category::Mountain,
        Category::Beach,
        Category::Camp,
    ];

    /// Get display label for this category
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Mountain => "Mountain",
            Self::Beach => "Beach",
            Self::Camp => "Camp",
        }
    }

    /// Whether a destination belongs in this category's feed.
    /// `All` matches everything, including uncategorized destinations.
    pub fn matches(&self, destination: &Destination) -> bool {
        match self {
            Self::All => true,
            other => destination.category == Some(*other),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AppError::InvalidConfig(format!("Unknown category: {}", s)))
    }
}

/// Number of travellers shown next to a destination's avatars.
///
/// Feeds have used both plain numbers and compact display strings such as
/// `"12K"`, so both are accepted when deserializing. It is always written
/// back as a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UserCount(pub u32);

impl UserCount {
    /// Parse a compact display string (`"12K"`, `"1.5M"`, `"+300"`)
    pub fn parse_display(text: &str) -> Option<Self> {
        let trimmed = text.trim().trim_start_matches('+');
        let (digits, multiplier) = match trimmed.chars().last()? {
            'k' | 'K' => (&trimmed[..trimmed.len() - 1], 1_000.0),
            'm' | 'M' => (&trimmed[..trimmed.len() - 1], 1_000_000.0),
            _ => (trimmed, 1.0),
        };

        let value = digits.trim().parse::<f64>().ok()? * multiplier;
        if !value.is_finite() || value < 0.0 || value > u32::MAX as f64 {
            return None;
        }
        Some(Self(value.round() as u32))
    }

    /// Compact representation, e.g. 12000 becomes "12K"
    pub fn compact(&self) -> String {
        fn scaled(value: u32, unit: u32, suffix: &str) -> String {
            let whole = value / unit;
            let tenth = (value % unit) / (unit / 10);
            if tenth == 0 {
                format!("{}{}", whole, suffix)
            } else {
                format!("{}.{}{}", whole, tenth, suffix)
            }
        }

        match self.0 {
            n if n >= 1_000_000 => scaled(n, 1_000_000, "M"),
            n if n >= 1_000 => scaled(n, 1_000, "K"),
            n => n.to_string(),
        }
    }
}

impl fmt::Display for UserCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "+{}", self.compact())
    }
}

impl<'de> Deserialize<'de> for UserCount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Count(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Count(n) => u32::try_from(n)
                .map(UserCount)
                .map_err(|_| serde::de::Error::custom(format!("user count out of range: {}", n))),
            Raw::Text(text) => UserCount::parse_display(&text).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid user count: {:?}", text))
            }),
        }
    }
}

/// Accepts either a JSON string or a JSON number for display-only fields
fn display_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    }))
}

/// A travel destination as shown in feeds and persisted when liked
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// Missing in records written before identifiers existed
    #[serde(default)]
    pub id: DestinationId,
    pub title: String,
    pub image: String,
    pub location: String,
    #[serde(
        default,
        deserialize_with = "display_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub price: Option<String>,
    #[serde(
        default,
        deserialize_with = "display_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub rating: Option<String>,
    #[serde(default)]
    pub description: String,
    /// Avatar URIs of travellers who visited
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub users: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_count: Option<UserCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}

impl Destination {
    /// Create a destination with a freshly generated identifier
    pub fn new(
        title: impl Into<String>,
        image: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: DestinationId::generate(),
            title: title.into(),
            image: image.into(),
            location: location.into(),
            price: None,
            rating: None,
            description: String::new(),
            users: None,
            user_count: None,
            category: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<DestinationId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_users(mut self, users: Vec<String>, count: u32) -> Self {
        self.users = Some(users);
        self.user_count = Some(UserCount(count));
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }
}

/// One onboarding slide of the splash carousel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slide {
    pub title: String,
    pub description: String,
}

impl Slide {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Application settings (frontend-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Delay between splash slides in milliseconds
    #[serde(default = "default_carousel_interval_ms")]
    pub carousel_interval_ms: u64,
    /// Category selected when the home feed opens
    #[serde(default)]
    pub default_category: Category,
    /// Load destinations from this JSON file instead of the built-in feed
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Override the location of the key-value storage file
    #[serde(default)]
    pub storage_path: Option<PathBuf>,
}

fn default_carousel_interval_ms() -> u64 {
    3000
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            carousel_interval_ms: default_carousel_interval_ms(),
            default_category: Category::All,
            catalog_path: None,
            storage_path: None,
        }
    }
}

impl AppSettings {
    pub fn carousel_interval(&self) -> Duration {
        Duration::from_millis(self.carousel_interval_ms.max(1))
    }
}

/// Error types for the application
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileIo(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
