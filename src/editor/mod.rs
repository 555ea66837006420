mod block;
mod note;

pub(crate) use note::FreeFormEditor;

use crate::blocks::{
    apply_edit, block_index, delete_block, insert_block, new_block, next_kind_on_enter, BlockEdit,
};
use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::i18n::{block_kind_label, t, Msg};
use crate::models::{Block, BlockKind};
use crate::selection::SelectionController;
use crate::state::AppContext;
use crate::toolbar::{ColorPicker, FormattingToolbar, LinkDialog};
use crate::util::new_id;
use block::BlockRow;
use leptos::ev;
use leptos::html;
use leptos::portal::Portal;
use leptos::prelude::*;
use leptos_dom::helpers::{set_timeout, window_event_listener};
use std::time::Duration;
use strum::IntoEnumIterator;
use wasm_bindgen::JsCast;

/// What a key press inside a block asks the editor to do.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum KeyAction {
    InsertAfter(BlockKind),
    DeleteCurrent,
}

pub(crate) fn key_action(key: &str, shift: bool, kind: BlockKind, is_empty: bool) -> Option<KeyAction> {
    match key {
        "Enter" if !shift => Some(KeyAction::InsertAfter(next_kind_on_enter(kind))),
        "Backspace" if is_empty => Some(KeyAction::DeleteCurrent),
        _ => None,
    }
}

/// Block to focus on the next tick, and whether the caret goes to its end.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct FocusRequest {
    pub block_id: String,
    pub at_end: bool,
}

/// Shared by every row of one editor.
#[derive(Clone, Copy)]
pub(crate) struct EditorCtx {
    pub blocks: RwSignal<Vec<Block>>,
    pub focus: RwSignal<Option<FocusRequest>>,
}

impl EditorCtx {
    pub fn edit(&self, id: &str, edit: BlockEdit) {
        self.blocks.update(|bs| {
            apply_edit(bs, id, edit);
        });
    }

    /// Memoized projection of block `id`; `None` once the block is gone.
    pub fn field<T>(
        &self,
        id: StoredValue<String>,
        f: impl Fn(&Block) -> T + Send + Sync + 'static,
    ) -> Memo<Option<T>>
    where
        T: PartialEq + Send + Sync + 'static,
    {
        let blocks = self.blocks;
        Memo::new(move |_| {
            blocks.with(|bs| id.with_value(|id| bs.iter().find(|b| b.id == *id).map(&f)))
        })
    }

    /// Insert a block of `kind` after `after_id` (or at the end) and focus it.
    pub fn insert_after(&self, after_id: Option<&str>, kind: BlockKind) {
        let block = new_block(new_id("block"), kind);
        let id = block.id.clone();
        self.blocks.update(|bs| {
            let at = after_id
                .and_then(|a| block_index(bs, a))
                .map_or(bs.len(), |i| i + 1);
            insert_block(bs, at, block);
        });
        self.focus.set(Some(FocusRequest {
            block_id: id,
            at_end: false,
        }));
    }

    /// Delete a block and put the caret at the end of the one before it.
    pub fn remove(&self, id: &str) {
        let mut previous = None;
        self.blocks.update(|bs| {
            let Some(i) = block_index(bs, id) else {
                return;
            };
            if delete_block(bs, i) {
                previous = bs.get(i.saturating_sub(1)).map(|b| b.id.clone());
            }
        });
        if let Some(block_id) = previous {
            self.focus.set(Some(FocusRequest {
                block_id,
                at_end: true,
            }));
        }
    }
}

fn place_caret_at_end(el: &web_sys::HtmlElement) {
    let Some(sel) = web_sys::window().and_then(|w| w.get_selection().ok().flatten()) else {
        return;
    };
    if sel.select_all_children(el).is_ok() {
        let _ = sel.collapse_to_end();
    }
}

fn focus_block(root: &web_sys::HtmlElement, req: &FocusRequest) {
    let selector = format!("[data-block-id=\"{}\"] [data-block-input]", req.block_id);
    let Some(el) = root
        .query_selector(&selector)
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok())
    else {
        return;
    };
    let _ = el.focus();
    if req.at_end && el.is_content_editable() {
        place_caret_at_end(&el);
    }
}

#[component]
pub(crate) fn BlockEditor(blocks: RwSignal<Vec<Block>>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;

    let selection = SelectionController::new();
    provide_context(selection);

    let ctx = EditorCtx {
        blocks,
        focus: RwSignal::new(None),
    };
    provide_context(ctx);

    let color_open = RwSignal::new(false);
    let link_open = RwSignal::new(false);
    let add_menu_open = RwSignal::new(false);
    let root_ref: NodeRef<html::Div> = NodeRef::new();

    // Focus on next tick so a freshly inserted row is mounted.
    Effect::new(move |_| {
        let Some(req) = ctx.focus.get() else {
            return;
        };
        set_timeout(
            move || {
                if let Some(root) = root_ref.get_untracked() {
                    focus_block(&root, &req);
                }
                ctx.focus.set(None);
            },
            Duration::ZERO,
        );
    });

    // Clicking anywhere outside the editor and its floating panels drops the saved selection.
    let outside_handle = window_event_listener(ev::mousedown, move |ev: web_sys::MouseEvent| {
        let Some(target) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
        else {
            return;
        };
        if target.closest("[data-keep-selection]").ok().flatten().is_some() {
            return;
        }
        if let Some(root) = root_ref.get_untracked() {
            if root.contains(Some(target.as_ref())) {
                return;
            }
        }
        color_open.set(false);
        selection.dismiss();
    });
    on_cleanup(move || outside_handle.remove());

    view! {
        <div node_ref=root_ref data-name="BlockEditor" class="space-y-1">
            <For
                each=move || blocks.with(|bs| bs.iter().map(|b| b.id.clone()).collect::<Vec<_>>())
                key=|id| id.clone()
                children=move |id| view! { <BlockRow id=id /> }
            />
        </div>

        <div class="relative mt-3">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Sm
                class="text-muted-foreground"
                on:click=move |_| add_menu_open.update(|v| *v = !*v)
            >
                "+ "
                {move || t(lang.get(), Msg::AddBlock)}
            </Button>

            <Show when=move || add_menu_open.get() fallback=|| ().into_view()>
                <div class="mt-2 grid grid-cols-2 gap-1 rounded-lg border border-border bg-popover p-2 shadow-md sm:grid-cols-4">
                    {BlockKind::iter()
                        .map(|kind| {
                            view! {
                                <button
                                    type="button"
                                    class="rounded px-2 py-1.5 text-left text-xs hover:bg-accent"
                                    on:click=move |_| {
                                        add_menu_open.set(false);
                                        ctx.insert_after(None, kind);
                                    }
                                >
                                    {move || block_kind_label(lang.get(), kind)}
                                </button>
                            }
                        })
                        .collect_view()}
                </div>
            </Show>
        </div>

        <Portal>
            <FormattingToolbar color_open=color_open link_open=link_open />
            <ColorPicker open=color_open />
            <LinkDialog open=link_open />
        </Portal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_continues_lists() {
        assert_eq!(
            key_action("Enter", false, BlockKind::Bullet, false),
            Some(KeyAction::InsertAfter(BlockKind::Bullet))
        );
        assert_eq!(
            key_action("Enter", false, BlockKind::Checklist, true),
            Some(KeyAction::InsertAfter(BlockKind::Checklist))
        );
        assert_eq!(
            key_action("Enter", false, BlockKind::Heading1, false),
            Some(KeyAction::InsertAfter(BlockKind::Text))
        );
    }

    #[test]
    fn test_shift_enter_is_a_line_break() {
        assert_eq!(key_action("Enter", true, BlockKind::Text, false), None);
    }

    #[test]
    fn test_backspace_only_deletes_empty_blocks() {
        assert_eq!(
            key_action("Backspace", false, BlockKind::Text, true),
            Some(KeyAction::DeleteCurrent)
        );
        assert_eq!(key_action("Backspace", false, BlockKind::Text, false), None);
        assert_eq!(key_action("a", false, BlockKind::Text, true), None);
    }

    #[test]
    fn test_code_block_follows_the_key_contract() {
        assert_eq!(
            key_action("Enter", false, BlockKind::Code, false),
            Some(KeyAction::InsertAfter(BlockKind::Text))
        );
        assert_eq!(key_action("Enter", true, BlockKind::Code, false), None);
        assert_eq!(
            key_action("Backspace", false, BlockKind::Code, true),
            Some(KeyAction::DeleteCurrent)
        );
        assert_eq!(key_action("Backspace", false, BlockKind::Code, false), None);
    }
}
