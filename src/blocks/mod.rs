use crate::models::{Block, BlockKind, BlockMetadata};
use crate::toolbar::normalize_link_url;
use regex::Regex;
use std::sync::OnceLock;

pub(crate) fn new_block(id: String, kind: BlockKind) -> Block {
    Block {
        id,
        kind,
        content: String::new(),
        checked: false,
        metadata: BlockMetadata::default(),
    }
}

/// Insert at `index` (clamped to the end). Returns where the block landed.
pub(crate) fn insert_block(blocks: &mut Vec<Block>, index: usize, block: Block) -> usize {
    let index = index.min(blocks.len());
    blocks.insert(index, block);
    index
}

/// Remove the block at `index`. A document never drops its last block.
pub(crate) fn delete_block(blocks: &mut Vec<Block>, index: usize) -> bool {
    if blocks.len() <= 1 || index >= blocks.len() {
        return false;
    }
    blocks.remove(index);
    true
}

pub(crate) fn move_block(blocks: &mut [Block], from: usize, to: usize) -> bool {
    if from >= blocks.len() || to >= blocks.len() || from == to {
        return false;
    }
    if from < to {
        blocks[from..=to].rotate_left(1);
    } else {
        blocks[to..=from].rotate_right(1);
    }
    true
}

pub(crate) fn ensure_non_empty(blocks: &mut Vec<Block>, make_id: impl FnOnce() -> String) {
    if blocks.is_empty() {
        blocks.push(new_block(make_id(), BlockKind::Text));
    }
}

pub(crate) fn block_index(blocks: &[Block], id: &str) -> Option<usize> {
    blocks.iter().position(|b| b.id == id)
}

/// Per-kind content edits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum BlockEdit {
    Content(String),
    ToggleChecked,
    Url(String),
    Alt(String),
    AddImage(String),
    RemoveImage(usize),
    ChangeKind(BlockKind),
}

pub(crate) fn apply_edit(blocks: &mut [Block], id: &str, edit: BlockEdit) -> bool {
    let Some(block) = blocks.iter_mut().find(|b| b.id == id) else {
        return false;
    };

    match edit {
        BlockEdit::Content(content) => block.content = content,
        BlockEdit::ToggleChecked => block.checked = !block.checked,
        BlockEdit::Url(url) => {
            let url = url.trim();
            block.metadata.url = if url.is_empty() {
                None
            } else if block.kind == BlockKind::Link {
                Some(normalize_link_url(url).unwrap_or_else(|| url.to_string()))
            } else {
                Some(url.to_string())
            };
        }
        BlockEdit::Alt(alt) => block.metadata.alt = Some(alt).filter(|a| !a.is_empty()),
        BlockEdit::AddImage(url) => {
            let url = url.trim();
            if url.is_empty() {
                return false;
            }
            block.metadata.urls.push(url.to_string());
        }
        BlockEdit::RemoveImage(i) => {
            if i >= block.metadata.urls.len() {
                return false;
            }
            block.metadata.urls.remove(i);
        }
        BlockEdit::ChangeKind(kind) => {
            // Rich text markup means nothing in a plain-text kind.
            if block.kind.is_rich_text() && !kind.is_rich_text() && !kind.is_media() {
                block.content = strip_tags(&block.content);
            }
            block.kind = kind;
        }
    }
    true
}

/// Kind of the block Enter creates after a block of `kind`.
pub(crate) fn next_kind_on_enter(kind: BlockKind) -> BlockKind {
    match kind {
        BlockKind::Bullet | BlockKind::Numbered | BlockKind::Checklist => kind,
        _ => BlockKind::Text,
    }
}

/// Position of a numbered item within its run of consecutive numbered blocks, from 1.
pub(crate) fn list_number(blocks: &[Block], index: usize) -> usize {
    if index >= blocks.len() {
        return 0;
    }
    blocks[..=index]
        .iter()
        .rev()
        .take_while(|b| b.kind == BlockKind::Numbered)
        .count()
}

fn youtube_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?:youtube\.com/(?:[^/]+/.+/|(?:v|e(?:mbed)?)/|.*[?&]v=)|youtu\.be/)([^"&?/\s]{11})"#)
            .expect("youtube pattern is valid")
    })
}

fn vimeo_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"vimeo\.com/(?:video/)?(\d+)").expect("vimeo pattern is valid"))
}

/// Player URL for a YouTube or Vimeo link.
pub(crate) fn video_embed_url(url: &str) -> Option<String> {
    if let Some(id) = youtube_re().captures(url).and_then(|c| c.get(1)) {
        return Some(format!("https://www.youtube.com/embed/{}", id.as_str()));
    }
    if let Some(id) = vimeo_re().captures(url).and_then(|c| c.get(1)) {
        return Some(format!("https://player.vimeo.com/video/{}", id.as_str()));
    }
    None
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"))
}

fn block_break_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)<br\s*/?>|</(?:p|div|h[1-6]|li|ul|ol|pre|blockquote|figcaption)\s*>")
            .expect("block break pattern is valid")
    })
}

/// Plain text of a markup fragment.
///
/// Line breaks and block-level closing tags become spaces so neighbouring blocks don't run
/// together, and the entities contenteditable emits are decoded.
pub(crate) fn strip_tags(html: &str) -> String {
    let spaced = block_break_re().replace_all(html, " ");
    let text = tag_re().replace_all(&spaced, "");
    decode_entities(&text).trim().to_string()
}

fn decode_entities(s: &str) -> String {
    // `&amp;` last, so "&amp;lt;" stays the literal text "&lt;".
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

/// Legacy notes stored only an HTML body; they open as a single text block.
pub(crate) fn legacy_content_to_blocks(content: &str, id: String) -> Vec<Block> {
    let mut block = new_block(id, BlockKind::Text);
    block.content = strip_tags(content);
    vec![block]
}

/// Flat HTML preview of a document, stored next to the blocks.
pub(crate) fn blocks_to_html(blocks: &[Block]) -> String {
    blocks.iter().map(block_to_html).collect()
}

fn block_to_html(block: &Block) -> String {
    let content = block.content.as_str();
    let url = block.metadata.url.as_deref().unwrap_or("");
    let alt = block.metadata.alt.as_deref().unwrap_or(content);

    match block.kind {
        BlockKind::Heading1 => format!("<h1>{content}</h1>"),
        BlockKind::Heading2 => format!("<h2>{content}</h2>"),
        BlockKind::Heading3 => format!("<h3>{content}</h3>"),
        BlockKind::Quote => format!("<blockquote>{content}</blockquote>"),
        BlockKind::Code => format!("<pre><code>{}</code></pre>", escape_html(content)),
        BlockKind::Bullet => format!("<ul><li>{content}</li></ul>"),
        BlockKind::Numbered => format!("<ol><li>{content}</li></ol>"),
        BlockKind::Checklist => format!(
            "<div>[{}] {}</div>",
            if block.checked { "x" } else { " " },
            escape_html(content)
        ),
        BlockKind::Link => {
            let href = if url.is_empty() { "#" } else { url };
            let label = if url.is_empty() { content } else { url };
            format!("<a href=\"{}\">{}</a>", escape_html(href), escape_html(label))
        }
        BlockKind::Image => format!(
            "<img src=\"{}\" alt=\"{}\" />",
            escape_html(block.metadata.urls.first().map(String::as_str).unwrap_or("")),
            escape_html(alt)
        ),
        BlockKind::Gif => format!(
            "<img src=\"{}\" alt=\"{}\" />",
            escape_html(url),
            escape_html(alt)
        ),
        BlockKind::Video => format!("<p>Vídeo: {}</p>", escape_html(url)),
        BlockKind::Divider => "<hr>".to_string(),
        BlockKind::Text => format!("<p>{content}</p>"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(kinds: &[BlockKind]) -> Vec<Block> {
        kinds
            .iter()
            .enumerate()
            .map(|(i, k)| new_block(format!("b{i}"), *k))
            .collect()
    }

    fn ids(blocks: &[Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.id.as_str()).collect()
    }

    #[test]
    fn test_insert_clamps_index() {
        let mut blocks = doc(&[BlockKind::Text, BlockKind::Text]);
        assert_eq!(insert_block(&mut blocks, 1, new_block("x".into(), BlockKind::Quote)), 1);
        assert_eq!(insert_block(&mut blocks, 99, new_block("y".into(), BlockKind::Code)), 3);
        assert_eq!(ids(&blocks), vec!["b0", "x", "b1", "y"]);
    }

    #[test]
    fn test_delete_keeps_last_block() {
        let mut blocks = doc(&[BlockKind::Text, BlockKind::Bullet]);
        assert!(delete_block(&mut blocks, 0));
        assert!(!delete_block(&mut blocks, 0));
        assert_eq!(ids(&blocks), vec!["b1"]);
        assert!(!delete_block(&mut blocks, 5));
    }

    #[test]
    fn test_move_block_both_directions() {
        let mut blocks = doc(&[BlockKind::Text, BlockKind::Text, BlockKind::Text, BlockKind::Text]);
        assert!(move_block(&mut blocks, 0, 2));
        assert_eq!(ids(&blocks), vec!["b1", "b2", "b0", "b3"]);
        assert!(move_block(&mut blocks, 3, 0));
        assert_eq!(ids(&blocks), vec!["b3", "b1", "b2", "b0"]);
        assert!(!move_block(&mut blocks, 1, 1));
        assert!(!move_block(&mut blocks, 1, 4));
    }

    #[test]
    fn test_ensure_non_empty() {
        let mut blocks = vec![];
        ensure_non_empty(&mut blocks, || "fresh".to_string());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Text);

        ensure_non_empty(&mut blocks, || unreachable!("document is not empty"));
        assert_eq!(blocks.len(), 1);
    }

    #[test]
    fn test_enter_continues_lists_only() {
        assert_eq!(next_kind_on_enter(BlockKind::Bullet), BlockKind::Bullet);
        assert_eq!(next_kind_on_enter(BlockKind::Numbered), BlockKind::Numbered);
        assert_eq!(next_kind_on_enter(BlockKind::Checklist), BlockKind::Checklist);
        assert_eq!(next_kind_on_enter(BlockKind::Heading1), BlockKind::Text);
        assert_eq!(next_kind_on_enter(BlockKind::Quote), BlockKind::Text);
        assert_eq!(next_kind_on_enter(BlockKind::Text), BlockKind::Text);
    }

    #[test]
    fn test_list_number_counts_consecutive_run() {
        let blocks = doc(&[
            BlockKind::Numbered,
            BlockKind::Numbered,
            BlockKind::Text,
            BlockKind::Numbered,
        ]);
        assert_eq!(list_number(&blocks, 0), 1);
        assert_eq!(list_number(&blocks, 1), 2);
        assert_eq!(list_number(&blocks, 3), 1);
    }

    #[test]
    fn test_edits() {
        let mut blocks = doc(&[BlockKind::Checklist, BlockKind::Image, BlockKind::Link]);

        assert!(apply_edit(&mut blocks, "b0", BlockEdit::ToggleChecked));
        assert!(blocks[0].checked);

        assert!(apply_edit(&mut blocks, "b1", BlockEdit::AddImage("https://i/a.png".into())));
        assert!(apply_edit(&mut blocks, "b1", BlockEdit::AddImage("https://i/b.png".into())));
        assert!(!apply_edit(&mut blocks, "b1", BlockEdit::AddImage("  ".into())));
        assert!(apply_edit(&mut blocks, "b1", BlockEdit::RemoveImage(0)));
        assert_eq!(blocks[1].metadata.urls, vec!["https://i/b.png".to_string()]);
        assert!(!apply_edit(&mut blocks, "b1", BlockEdit::RemoveImage(3)));

        assert!(apply_edit(&mut blocks, "b2", BlockEdit::Url("rust-lang.org".into())));
        assert_eq!(blocks[2].metadata.url.as_deref(), Some("https://rust-lang.org"));

        assert!(!apply_edit(&mut blocks, "missing", BlockEdit::ToggleChecked));
    }

    #[test]
    fn test_change_kind_to_code_strips_markup() {
        let mut blocks = doc(&[BlockKind::Text]);
        apply_edit(&mut blocks, "b0", BlockEdit::Content("<b>hi</b> there".into()));
        apply_edit(&mut blocks, "b0", BlockEdit::ChangeKind(BlockKind::Heading2));
        assert_eq!(blocks[0].content, "<b>hi</b> there");
        apply_edit(&mut blocks, "b0", BlockEdit::ChangeKind(BlockKind::Code));
        assert_eq!(blocks[0].content, "hi there");
        assert_eq!(blocks[0].kind, BlockKind::Code);
    }

    #[test]
    fn test_video_embed_urls() {
        assert_eq!(
            video_embed_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=10"),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            video_embed_url("https://youtu.be/dQw4w9WgXcQ"),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            video_embed_url("https://vimeo.com/76979871"),
            Some("https://player.vimeo.com/video/76979871".to_string())
        );
        assert_eq!(video_embed_url("https://example.com/clip.mp4"), None);
    }

    #[test]
    fn test_strip_tags_separates_blocks_and_decodes_entities() {
        assert_eq!(strip_tags("<p>Hello</p><p>World</p>"), "Hello World");
        assert_eq!(strip_tags("one<br>two<br/>three"), "one two three");
        assert_eq!(strip_tags("a&nbsp;b &amp; c"), "a b & c");
        assert_eq!(strip_tags("&lt;div&gt; &quot;x&quot; &amp;lt;"), "<div> \"x\" &lt;");
        assert_eq!(strip_tags("<b>bold</b>face"), "boldface");
    }

    #[test]
    fn test_change_kind_decodes_rich_text_entities() {
        let mut blocks = doc(&[BlockKind::Text]);
        apply_edit(&mut blocks, "b0", BlockEdit::Content("x&nbsp;&lt;&nbsp;y".into()));
        apply_edit(&mut blocks, "b0", BlockEdit::ChangeKind(BlockKind::Checklist));
        assert_eq!(blocks[0].content, "x < y");
    }

    #[test]
    fn test_image_alt_text_is_edited_and_rendered() {
        let mut blocks = doc(&[BlockKind::Image]);
        apply_edit(&mut blocks, "b0", BlockEdit::AddImage("https://img.dev/a.png".into()));
        apply_edit(&mut blocks, "b0", BlockEdit::Content("Sunset".into()));
        assert!(blocks_to_html(&blocks).contains("alt=\"Sunset\""));

        apply_edit(&mut blocks, "b0", BlockEdit::Alt("Orange sky".into()));
        assert_eq!(blocks[0].metadata.alt.as_deref(), Some("Orange sky"));
        assert!(blocks_to_html(&blocks).contains("alt=\"Orange sky\""));

        apply_edit(&mut blocks, "b0", BlockEdit::Alt(String::new()));
        assert_eq!(blocks[0].metadata.alt, None);
    }

    #[test]
    fn test_legacy_content_becomes_text_block() {
        let blocks = legacy_content_to_blocks("<p>Hello <b>world</b></p>", "b".into());
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].kind, BlockKind::Text);
        assert_eq!(blocks[0].content, "Hello world");
    }

    #[test]
    fn test_blocks_to_html_preview() {
        let mut blocks = doc(&[
            BlockKind::Heading1,
            BlockKind::Checklist,
            BlockKind::Code,
            BlockKind::Link,
            BlockKind::Divider,
            BlockKind::Text,
        ]);
        blocks[0].content = "Title".into();
        blocks[1].content = "milk".into();
        blocks[1].checked = true;
        blocks[2].content = "a < b".into();
        blocks[3].metadata.url = Some("https://a.dev".into());
        blocks[5].content = "<i>end</i>".into();

        assert_eq!(
            blocks_to_html(&blocks),
            "<h1>Title</h1><div>[x] milk</div><pre><code>a &lt; b</code></pre>\
             <a href=\"https://a.dev\">https://a.dev</a><hr><p><i>end</i></p>"
        );
    }
}
