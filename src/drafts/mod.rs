mod note;

pub(crate) use note::{
    clear_note_draft, load_note_draft, should_restore, touch_note_draft, NEW_NOTE_DRAFT_ID,
};
