use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Author shown when the submitter leaves the name field blank.
pub const DEFAULT_AUTHOR: &str = "Innovator";

/// Closed set of idea categories. Serialized as the display names so persisted
/// records and the structured AI schema share one spelling.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum IdeaCategory {
    Technology,
    Community,
    Sustainability,
    Education,
    Health,
    Art,
    Inclusion,
}

impl IdeaCategory {
    /// Fixed enum order, used for tie-breaking in statistics.
    pub const ALL: [IdeaCategory; 7] = [
        IdeaCategory::Technology,
        IdeaCategory::Community,
        IdeaCategory::Sustainability,
        IdeaCategory::Education,
        IdeaCategory::Health,
        IdeaCategory::Art,
        IdeaCategory::Inclusion,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IdeaCategory::Technology => "Technology",
            IdeaCategory::Community => "Community",
            IdeaCategory::Sustainability => "Sustainability",
            IdeaCategory::Education => "Education",
            IdeaCategory::Health => "Health",
            IdeaCategory::Art => "Art",
            IdeaCategory::Inclusion => "Inclusion",
        }
    }

    /// Strict parse, `None` for anything outside the closed set.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Technology" => Some(IdeaCategory::Technology),
            "Community" => Some(IdeaCategory::Community),
            "Sustainability" => Some(IdeaCategory::Sustainability),
            "Education" => Some(IdeaCategory::Education),
            "Health" => Some(IdeaCategory::Health),
            "Art" => Some(IdeaCategory::Art),
            "Inclusion" => Some(IdeaCategory::Inclusion),
            _ => None,
        }
    }
}

/// A user-submitted proposal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: IdeaCategory,
    pub likes: u32,
    pub dislikes: u32,
    pub created_at: DateTime<Utc>,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_response: Option<String>,
}

/// Auto-saved snapshot of the add-idea form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<IdeaCategory>,
    #[serde(default)]
    pub author: Option<String>,
}

impl IdeaDraft {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.author.is_none()
    }
}

/// Sort order for the idea list view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Newest,
    Likes,
}

/// Parameters for a derived view of the collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewQuery {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub sort: SortMode,
    #[serde(default)]
    pub bookmarked_only: bool,
}

/// Everything the frontend needs after startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    pub ideas: Vec<Idea>,
    pub bookmarks: Vec<String>,
    pub draft: IdeaDraft,
    pub selected: Option<String>,
}

/// Demo records adopted when no persisted collection exists yet.
pub fn seed_ideas() -> Vec<Idea> {
    let now = Utc::now();
    vec![
        Idea {
            id: "1".to_string(),
            title: "Smart Energy Tiles".to_string(),
            description: "Stoeptegels die energie opwekken wanneer mensen eroverheen lopen."
                .to_string(),
            category: IdeaCategory::Sustainability,
            likes: 45,
            dislikes: 2,
            created_at: now - Duration::milliseconds(100_000_000),
            author: "Thomas".to_string(),
            admin_response: None,
        },
        Idea {
            id: "2".to_string(),
            title: "VR Inclusion Training".to_string(),
            description: "Empathie training via VR om diversiteit op de werkvloer te vergroten."
                .to_string(),
            category: IdeaCategory::Inclusion,
            likes: 89,
            dislikes: 1,
            created_at: now - Duration::milliseconds(50_000_000),
            author: "Elena".to_string(),
            admin_response: None,
        },
        Idea {
            id: "3".to_string(),
            title: "AI Health Tutor".to_string(),
            description: "Gepersonaliseerde AI assistent voor chronisch zieken.".to_string(),
            category: IdeaCategory::Health,
            likes: 32,
            dislikes: 12,
            created_at: now,
            author: "Marcus".to_string(),
            admin_response: None,
        },
    ]
}
