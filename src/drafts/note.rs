use crate::models::{Block, FreeFormNote};
use crate::storage::{load_json_from_storage, remove_from_storage, save_json_to_storage};
use serde::{Deserialize, Serialize};

/// Draft slot for a note that has not been saved yet.
pub(crate) const NEW_NOTE_DRAFT_ID: &str = "new";

/// Unsaved editor state of one note.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct NoteDraft {
    pub note_id: String,
    pub title: String,

    #[serde(default)]
    pub blocks: Vec<Block>,

    pub updated_ms: i64,
}

pub(crate) fn draft_key(note_id: &str) -> String {
    format!("mindnotes_draft_note::{note_id}")
}

pub(crate) fn load_note_draft(note_id: &str) -> Option<NoteDraft> {
    if note_id.trim().is_empty() {
        return None;
    }
    load_json_from_storage::<NoteDraft>(&draft_key(note_id)).filter(|d| d.note_id == note_id)
}

pub(crate) fn touch_note_draft(note_id: &str, title: &str, blocks: &[Block], now_ms: i64) {
    if note_id.trim().is_empty() {
        return;
    }

    let d = NoteDraft {
        note_id: note_id.to_string(),
        title: title.to_string(),
        blocks: blocks.to_vec(),
        updated_ms: now_ms,
    };
    save_json_to_storage(&draft_key(note_id), &d);
}

pub(crate) fn clear_note_draft(note_id: &str) {
    if note_id.trim().is_empty() {
        return;
    }
    remove_from_storage(&draft_key(note_id));
}

/// A draft wins over the stored note only when it was written after the note's last save.
pub(crate) fn should_restore(draft: &NoteDraft, note: Option<&FreeFormNote>) -> bool {
    match note {
        Some(n) => draft.updated_ms > n.updated_ms,
        None => {
            !draft.title.trim().is_empty()
                || draft.blocks.iter().any(|b| !b.content.trim().is_empty())
        }
    }
}
