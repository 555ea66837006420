use serde::{Deserialize, Serialize};

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub(crate) enum BlockKind {
    Text,
    Heading1,
    Heading2,
    Heading3,
    Bullet,
    Numbered,
    Checklist,
    Quote,
    Code,
    Image,
    Video,
    Link,
    Gif,
    Divider,
}

impl BlockKind {
    /// Kinds edited through a contenteditable element (HTML content, toolbar formatting).
    pub fn is_rich_text(self) -> bool {
        matches!(
            self,
            BlockKind::Text
                | BlockKind::Heading1
                | BlockKind::Heading2
                | BlockKind::Heading3
                | BlockKind::Bullet
                | BlockKind::Numbered
                | BlockKind::Quote
        )
    }

    /// Kinds whose `content` is only a caption under some embedded media.
    pub fn is_media(self) -> bool {
        matches!(
            self,
            BlockKind::Image | BlockKind::Video | BlockKind::Link | BlockKind::Gif
        )
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct BlockMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,

    /// Image blocks hold a gallery instead of a single url.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub urls: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Block {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: BlockKind,

    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub checked: bool,

    #[serde(default)]
    pub metadata: BlockMetadata,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_ms: i64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct TaskList {
    pub id: String,
    pub title: String,
    pub tasks: Vec<Task>,
    pub created_ms: i64,

    /// Stamped the first time any task in the list is toggled.
    #[serde(default)]
    pub started_ms: Option<i64>,

    #[serde(default)]
    pub completed_ms: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FreeFormNote {
    pub id: String,
    pub title: String,

    /// HTML preview rendered from `blocks` on save (and the only body of legacy notes).
    #[serde(default)]
    pub content: String,

    #[serde(default)]
    pub blocks: Vec<Block>,

    pub created_ms: i64,
    pub updated_ms: i64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct UserProgress {
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub completed_task_lists: u32,
}

impl Default for UserProgress {
    fn default() -> Self {
        Self {
            level: 0,
            experience: 0,
            experience_to_next: 100,
            completed_task_lists: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ActiveTab {
    #[default]
    Notes,
    Chat,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum ChatRole {
    User,
    Bot,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp_ms: i64,
}

/// Everything persisted under the single application-state key.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct AppData {
    #[serde(default)]
    pub active_tab: ActiveTab,

    #[serde(default)]
    pub task_lists: Vec<TaskList>,

    // Older saves predate free-form notes.
    #[serde(default)]
    pub free_form_notes: Vec<FreeFormNote>,

    #[serde(default)]
    pub user_progress: UserProgress,
}
