//! Feature and category icons referenced by page content.
//!
//! Content documents name their icons as strings ("leaf", "BookOpen", ...).
//! Those names are resolved once, here, into a closed enum.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    Leaf,
    Users,
    BookOpen,
    ShoppingBag,
    Star,
    Heart,
    Zap,
    Target,
    Eye,
    Calendar,
    MapPin,
    Clock,
    Download,
    Play,
    FileText,
    Video,
    Link,
    Package,
    Award,
    Briefcase,
    Mail,
    Phone,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 22] = [
        FeatureKind::Leaf,
        FeatureKind::Users,
        FeatureKind::BookOpen,
        FeatureKind::ShoppingBag,
        FeatureKind::Star,
        FeatureKind::Heart,
        FeatureKind::Zap,
        FeatureKind::Target,
        FeatureKind::Eye,
        FeatureKind::Calendar,
        FeatureKind::MapPin,
        FeatureKind::Clock,
        FeatureKind::Download,
        FeatureKind::Play,
        FeatureKind::FileText,
        FeatureKind::Video,
        FeatureKind::Link,
        FeatureKind::Package,
        FeatureKind::Award,
        FeatureKind::Briefcase,
        FeatureKind::Mail,
        FeatureKind::Phone,
    ];

    /// Resolve an icon name.
    ///
    /// Case-insensitive; `BookOpen`, `bookopen`, `book-open` and `book_open`
    /// are all accepted. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<FeatureKind> {
        let normalized: String = name
            .trim()
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        let kind = match normalized.as_str() {
            "leaf" => FeatureKind::Leaf,
            "users" => FeatureKind::Users,
            "bookopen" => FeatureKind::BookOpen,
            "shoppingbag" => FeatureKind::ShoppingBag,
            "star" => FeatureKind::Star,
            "heart" => FeatureKind::Heart,
            "zap" => FeatureKind::Zap,
            "target" => FeatureKind::Target,
            "eye" => FeatureKind::Eye,
            "calendar" => FeatureKind::Calendar,
            "mappin" => FeatureKind::MapPin,
            "clock" => FeatureKind::Clock,
            "download" => FeatureKind::Download,
            "play" => FeatureKind::Play,
            "filetext" => FeatureKind::FileText,
            "video" => FeatureKind::Video,
            "link" => FeatureKind::Link,
            "package" => FeatureKind::Package,
            "award" => FeatureKind::Award,
            "briefcase" => FeatureKind::Briefcase,
            "mail" => FeatureKind::Mail,
            "phone" => FeatureKind::Phone,
            _ => return None,
        };
        Some(kind)
    }

    /// Kebab-case icon identifier for the presentation layer.
    pub fn icon(&self) -> &'static str {
        match self {
            FeatureKind::Leaf => "leaf",
            FeatureKind::Users => "users",
            FeatureKind::BookOpen => "book-open",
            FeatureKind::ShoppingBag => "shopping-bag",
            FeatureKind::Star => "star",
            FeatureKind::Heart => "heart",
            FeatureKind::Zap => "zap",
            FeatureKind::Target => "target",
            FeatureKind::Eye => "eye",
            FeatureKind::Calendar => "calendar",
            FeatureKind::MapPin => "map-pin",
            FeatureKind::Clock => "clock",
            FeatureKind::Download => "download",
            FeatureKind::Play => "play",
            FeatureKind::FileText => "file-text",
            FeatureKind::Video => "video",
            FeatureKind::Link => "link",
            FeatureKind::Package => "package",
            FeatureKind::Award => "award",
            FeatureKind::Briefcase => "briefcase",
            FeatureKind::Mail => "mail",
            FeatureKind::Phone => "phone",
        }
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.icon())
    }
}

impl Serialize for FeatureKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.icon())
    }
}

impl<'de> Deserialize<'de> for FeatureKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        FeatureKind::from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown feature icon '{}'", name)))
    }
}

/// A feature card from a page's `features` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureCard {
    pub icon: FeatureKind,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Read the `features` list of a content document.
///
/// Cards that do not parse (unknown icon, missing title) are skipped with a
/// warning so one bad entry does not hide the rest.
pub fn feature_cards(document: &serde_json::Value) -> Vec<FeatureCard> {
    let Some(items) = document.get("features").and_then(|f| f.as_array()) else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match FeatureCard::deserialize(item) {
            Ok(card) => Some(card),
            Err(e) => {
                warn!("Skipping feature card: {}", e);
                None
            }
        })
        .collect()
}
