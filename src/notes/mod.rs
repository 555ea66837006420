use crate::blocks::{blocks_to_html, legacy_content_to_blocks, strip_tags};
use crate::models::{Block, FreeFormNote};

/// Saving needs a title; surrounding whitespace is dropped.
pub(crate) fn clean_title(input: &str) -> Option<String> {
    let t = input.trim();
    (!t.is_empty()).then(|| t.to_string())
}

pub(crate) fn build_note(id: String, title: &str, blocks: Vec<Block>, now_ms: i64) -> FreeFormNote {
    FreeFormNote {
        id,
        title: title.trim().to_string(),
        content: blocks_to_html(&blocks),
        blocks,
        created_ms: now_ms,
        updated_ms: now_ms,
    }
}

pub(crate) fn insert_note(notes: &mut Vec<FreeFormNote>, note: FreeFormNote) {
    notes.insert(0, note);
}

/// Replace title and blocks; the HTML preview is re-rendered from the blocks.
pub(crate) fn update_note(
    notes: &mut [FreeFormNote],
    id: &str,
    title: &str,
    blocks: Vec<Block>,
    now_ms: i64,
) -> bool {
    let Some(n) = notes.iter_mut().find(|n| n.id == id) else {
        return false;
    };
    n.title = title.trim().to_string();
    n.content = blocks_to_html(&blocks);
    n.blocks = blocks;
    n.updated_ms = now_ms;
    true
}

pub(crate) fn delete_note(notes: &mut Vec<FreeFormNote>, id: &str) -> bool {
    let before = notes.len();
    notes.retain(|n| n.id != id);
    notes.len() != before
}

/// Blocks to open in the editor. Legacy notes carry only HTML.
pub(crate) fn editable_blocks(note: &FreeFormNote, block_id: impl FnOnce() -> String) -> Vec<Block> {
    if note.blocks.is_empty() && !note.content.trim().is_empty() {
        legacy_content_to_blocks(&note.content, block_id())
    } else {
        note.blocks.clone()
    }
}

/// Plain-text excerpt for note cards.
pub(crate) fn preview_text(note: &FreeFormNote, max_chars: usize) -> String {
    let text = strip_tags(&note.content);
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if text.chars().count() <= max_chars {
        return text;
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::new_block;
    use crate::models::BlockKind;

    fn text_block(id: &str, content: &str) -> Block {
        let mut b = new_block(id.to_string(), BlockKind::Text);
        b.content = content.to_string();
        b
    }

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title("  Ideias "), Some("Ideias".to_string()));
        assert_eq!(clean_title(" \n "), None);
    }

    #[test]
    fn test_build_renders_preview() {
        let n = build_note("n1".into(), " Diário ", vec![text_block("b", "hoje")], 7);
        assert_eq!(n.title, "Diário");
        assert_eq!(n.content, "<p>hoje</p>");
        assert_eq!(n.created_ms, 7);
        assert_eq!(n.updated_ms, 7);
    }

    #[test]
    fn test_insert_update_delete() {
        let mut notes = vec![build_note("a".into(), "A", vec![], 1)];
        insert_note(&mut notes, build_note("b".into(), "B", vec![], 2));
        assert_eq!(notes[0].id, "b");

        assert!(update_note(&mut notes, "a", "A2", vec![text_block("x", "oi")], 9));
        assert_eq!(notes[1].title, "A2");
        assert_eq!(notes[1].content, "<p>oi</p>");
        assert_eq!(notes[1].updated_ms, 9);
        assert_eq!(notes[1].created_ms, 1);
        assert!(!update_note(&mut notes, "zzz", "x", vec![], 9));

        assert!(delete_note(&mut notes, "b"));
        assert!(!delete_note(&mut notes, "b"));
        assert_eq!(notes.len(), 1);
    }

    #[test]
    fn test_editable_blocks_for_legacy_note() {
        let mut n = build_note("n".into(), "Old", vec![], 1);
        n.content = "<h1>Old</h1><p>body</p>".to_string();
        let blocks = editable_blocks(&n, || "legacy".to_string());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].id, "legacy");
        assert_eq!(blocks[0].content, "Old body");
    }

    #[test]
    fn test_editable_blocks_prefers_blocks() {
        let n = build_note("n".into(), "New", vec![text_block("b", "x")], 1);
        let blocks = editable_blocks(&n, || unreachable!("note has blocks"));
        assert_eq!(blocks, n.blocks);
    }

    #[test]
    fn test_preview_text_truncates() {
        let n = build_note("n".into(), "T", vec![text_block("b", "uma  frase\nlonga aqui")], 1);
        assert_eq!(preview_text(&n, 100), "uma frase longa aqui");
        assert_eq!(preview_text(&n, 9), "uma frase…");
    }

    #[test]
    fn test_preview_text_keeps_blocks_apart() {
        let n = build_note(
            "n".into(),
            "T",
            vec![text_block("a", "Hello"), text_block("b", "World")],
            1,
        );
        assert_eq!(preview_text(&n, 100), "Hello World");
    }

    #[test]
    fn test_preview_text_decodes_entities() {
        let n = build_note("n".into(), "T", vec![text_block("b", "Tom&nbsp;&amp;&nbsp;Ana")], 1);
        assert_eq!(preview_text(&n, 100), "Tom & Ana");
    }
}
