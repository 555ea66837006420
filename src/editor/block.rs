use super::{key_action, EditorCtx, KeyAction};
use crate::blocks::{block_index, list_number, move_block, video_embed_url, BlockEdit};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input};
use crate::i18n::{block_kind_label, t, Msg};
use crate::models::BlockKind;
use crate::selection::SelectionController;
use crate::state::AppContext;
use icons::{ChevronDown, ChevronUp, X};
use leptos::html;
use leptos::prelude::*;
use strum::IntoEnumIterator;

fn rich_text_class(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Heading1 => "text-3xl font-bold",
        BlockKind::Heading2 => "text-2xl font-semibold",
        BlockKind::Heading3 => "text-xl font-semibold",
        BlockKind::Quote => "border-l-4 border-border pl-3 italic text-muted-foreground",
        _ => "text-base",
    }
}

/// Run the Enter/Backspace contract for the block `id`.
fn handle_block_key(
    ev: &web_sys::KeyboardEvent,
    ctx: EditorCtx,
    id: StoredValue<String>,
    kind: BlockKind,
    is_empty: bool,
) {
    if ev.is_composing() {
        return;
    }
    match key_action(&ev.key(), ev.shift_key(), kind, is_empty) {
        Some(KeyAction::InsertAfter(next)) => {
            ev.prevent_default();
            id.with_value(|id| ctx.insert_after(Some(id), next));
        }
        Some(KeyAction::DeleteCurrent) => {
            if ctx.blocks.with_untracked(|bs| bs.len() > 1) {
                ev.prevent_default();
                id.with_value(|id| ctx.remove(id));
            }
        }
        None => {}
    }
}

#[component]
pub(super) fn BlockRow(id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let ctx = expect_context::<EditorCtx>();
    let blocks = ctx.blocks;
    let id = StoredValue::new(id);

    let kind = ctx.field(id, |b| b.kind);
    let index = Memo::new(move |_| blocks.with(|bs| id.with_value(|id| block_index(bs, id))));
    let count = Memo::new(move |_| blocks.with(|bs| bs.len()));

    let shift = move |delta: isize| {
        blocks.update(|bs| {
            let Some(from) = id.with_value(|id| block_index(bs, id)) else {
                return;
            };
            if let Some(to) = from.checked_add_signed(delta) {
                move_block(bs, from, to);
            }
        });
    };

    // Re-rendered only when the kind changes; content edits flow through the DOM.
    let body = move || {
        let Some(kind) = kind.get() else {
            return ().into_any();
        };
        match kind {
            BlockKind::Text
            | BlockKind::Heading1
            | BlockKind::Heading2
            | BlockKind::Heading3
            | BlockKind::Bullet
            | BlockKind::Numbered
            | BlockKind::Quote => view! { <RichTextBody id=id kind=kind /> }.into_any(),
            BlockKind::Checklist => view! { <ChecklistBody id=id /> }.into_any(),
            BlockKind::Code => view! { <CodeBody id=id /> }.into_any(),
            BlockKind::Image => view! { <ImageBody id=id /> }.into_any(),
            BlockKind::Video | BlockKind::Link | BlockKind::Gif => {
                view! { <UrlMediaBody id=id kind=kind /> }.into_any()
            }
            BlockKind::Divider => view! { <hr class="my-3 border-border" /> }.into_any(),
        }
    };

    view! {
        <div
            data-block-id=id.get_value()
            data-kind=move || kind.get().map(|k| k.to_string())
            class="group relative flex items-start gap-1 rounded-md px-1 py-0.5 hover:bg-accent/30"
        >
            <div class="flex shrink-0 items-center gap-0.5 pt-1 opacity-0 transition-opacity group-hover:opacity-100 group-focus-within:opacity-100">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::IconSm
                    attr:title=move || t(lang.get(), Msg::AddBlock)
                    on:click=move |_| id.with_value(|id| ctx.insert_after(Some(id), BlockKind::Text))
                >
                    "+"
                </Button>
                <select
                    class="h-7 rounded border border-border bg-background px-1 text-xs"
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        if let Some(k) = BlockKind::iter().find(|k| k.as_ref() == value) {
                            id.with_value(|id| ctx.edit(id, BlockEdit::ChangeKind(k)));
                        }
                    }
                >
                    {BlockKind::iter()
                        .map(|k| {
                            view! {
                                <option value=k.to_string() prop:selected=move || kind.get() == Some(k)>
                                    {move || block_kind_label(lang.get(), k)}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
            </div>

            <div class="min-w-0 flex-1">{body}</div>

            <div class="flex shrink-0 items-center pt-1 opacity-0 transition-opacity group-hover:opacity-100 group-focus-within:opacity-100">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::IconSm
                    attr:title=move || t(lang.get(), Msg::MoveUp)
                    attr:disabled=move || index.get().map_or(true, |i| i == 0)
                    on:click=move |_| shift(-1)
                >
                    <ChevronUp />
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::IconSm
                    attr:title=move || t(lang.get(), Msg::MoveDown)
                    attr:disabled=move || index.get().map_or(true, |i| i + 1 >= count.get())
                    on:click=move |_| shift(1)
                >
                    <ChevronDown />
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::IconSm
                    class="hover:text-destructive"
                    attr:title=move || t(lang.get(), Msg::Delete)
                    attr:disabled=move || count.get() <= 1
                    on:click=move |_| id.with_value(|id| ctx.remove(id))
                >
                    <X />
                </Button>
            </div>
        </div>
    }
}

#[component]
fn RichTextBody(id: StoredValue<String>, kind: BlockKind) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let ctx = expect_context::<EditorCtx>();
    let selection = expect_context::<SelectionController>();
    let blocks = ctx.blocks;

    let content_ref: NodeRef<html::Div> = NodeRef::new();
    let initial = blocks.with_untracked(|bs| {
        id.with_value(|id| bs.iter().find(|b| b.id == *id).map(|b| b.content.clone()))
    });

    // The element owns its markup after mount; writing it again would reset the caret.
    Effect::new(move |_| {
        if let Some(el) = content_ref.get() {
            el.set_inner_html(initial.as_deref().unwrap_or_default());
        }
    });

    let marker = move || match kind {
        BlockKind::Bullet => Some("•".to_string()),
        BlockKind::Numbered => blocks.with(|bs| {
            id.with_value(|id| block_index(bs, id))
                .map(|i| format!("{}.", list_number(bs, i)))
        }),
        _ => None,
    };

    let is_empty = move || {
        content_ref
            .get_untracked()
            .map_or(true, |el| el.text_content().unwrap_or_default().is_empty())
    };

    view! {
        <div class="flex items-baseline gap-2">
            {move || marker().map(|m| view! { <span class="select-none text-muted-foreground">{m}</span> })}
            <div
                node_ref=content_ref
                data-block-input="true"
                contenteditable="true"
                data-placeholder=move || t(lang.get(), Msg::TypeSomething)
                class=format!(
                    "min-h-[1.75rem] w-full whitespace-pre-wrap break-words px-1 py-0.5 outline-none empty:before:text-muted-foreground/60 empty:before:content-[attr(data-placeholder)] {}",
                    rich_text_class(kind),
                )
                on:input=move |_| {
                    if let Some(el) = content_ref.get_untracked() {
                        id.with_value(|id| ctx.edit(id, BlockEdit::Content(el.inner_html())));
                    }
                }
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    handle_block_key(&ev, ctx, id, kind, is_empty());
                }
                on:mouseup=move |_| selection.on_pointer_up()
                on:keyup=move |_| selection.on_key_up()
                on:focus=move |_| selection.on_focus()
                on:blur=move |_| selection.on_blur()
            />
        </div>
    }
}

#[component]
fn ChecklistBody(id: StoredValue<String>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let ctx = expect_context::<EditorCtx>();

    let checked = ctx.field(id, |b| b.checked);
    let text = ctx.field(id, |b| b.content.clone());

    view! {
        <div class="flex items-center gap-2 py-0.5">
            <input
                type="checkbox"
                class="size-4 cursor-pointer accent-primary"
                prop:checked=move || checked.get().unwrap_or(false)
                on:change=move |_| id.with_value(|id| ctx.edit(id, BlockEdit::ToggleChecked))
            />
            <input
                type="text"
                data-block-input="true"
                class=move || {
                    if checked.get().unwrap_or(false) {
                        "w-full bg-transparent text-muted-foreground line-through outline-none"
                    } else {
                        "w-full bg-transparent outline-none"
                    }
                }
                placeholder=move || t(lang.get(), Msg::TypeSomething)
                prop:value=move || text.get().unwrap_or_default()
                on:input=move |ev| {
                    id.with_value(|id| ctx.edit(id, BlockEdit::Content(event_target_value(&ev))));
                }
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    let empty = text.get_untracked().map_or(true, |s| s.is_empty());
                    handle_block_key(&ev, ctx, id, BlockKind::Checklist, empty);
                }
            />
        </div>
    }
}

#[component]
fn CodeBody(id: StoredValue<String>) -> impl IntoView {
    let ctx = expect_context::<EditorCtx>();
    let code = ctx.field(id, |b| b.content.clone());

    view! {
        <textarea
            data-block-input="true"
            spellcheck="false"
            rows=4
            class="w-full resize-y rounded-md border border-border bg-muted px-3 py-2 font-mono text-sm outline-none focus-visible:ring-2 focus-visible:ring-ring/50"
            prop:value=move || code.get().unwrap_or_default()
            on:input=move |ev| {
                id.with_value(|id| ctx.edit(id, BlockEdit::Content(event_target_value(&ev))));
            }
            // Shift+Enter for a newline inside the snippet.
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                let empty = code.get_untracked().map_or(true, |s| s.is_empty());
                handle_block_key(&ev, ctx, id, BlockKind::Code, empty);
            }
        />
    }
}

#[component]
fn CaptionInput(id: StoredValue<String>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let ctx = expect_context::<EditorCtx>();
    let caption = ctx.field(id, |b| b.content.clone());

    view! {
        <input
            type="text"
            class="w-full bg-transparent text-center text-xs text-muted-foreground outline-none"
            placeholder=move || t(lang.get(), Msg::Caption)
            prop:value=move || caption.get().unwrap_or_default()
            on:input=move |ev| {
                id.with_value(|id| ctx.edit(id, BlockEdit::Content(event_target_value(&ev))));
            }
        />
    }
}

#[component]
fn ImageBody(id: StoredValue<String>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let ctx = expect_context::<EditorCtx>();

    let urls = ctx.field(id, |b| b.metadata.urls.clone());
    let alt = ctx.field(id, |b| b.metadata.alt.clone().unwrap_or_default());
    let draft = RwSignal::new(String::new());

    let add = move || {
        let url = draft.get_untracked();
        if url.trim().is_empty() {
            return;
        }
        id.with_value(|id| ctx.edit(id, BlockEdit::AddImage(url)));
        draft.set(String::new());
    };

    view! {
        <div class="space-y-2 py-1">
            <div class="grid grid-cols-2 gap-2 sm:grid-cols-3">
                {move || {
                    urls.get()
                        .unwrap_or_default()
                        .into_iter()
                        .enumerate()
                        .map(|(i, src)| {
                            view! {
                                <div class="group/img relative overflow-hidden rounded-md border border-border">
                                    <img
                                        src=src
                                        alt=move || alt.get().unwrap_or_default()
                                        class="h-32 w-full object-cover"
                                    />
                                    <button
                                        type="button"
                                        class="absolute right-1 top-1 rounded bg-background/80 p-0.5 opacity-0 group-hover/img:opacity-100"
                                        title=move || t(lang.get(), Msg::Delete)
                                        on:click=move |_| {
                                            id.with_value(|id| ctx.edit(id, BlockEdit::RemoveImage(i)))
                                        }
                                    >
                                        <X />
                                    </button>
                                </div>
                            }
                        })
                        .collect_view()
                }}
            </div>

            <div class="flex items-center gap-2">
                <Input
                    bind_value=draft
                    attr:data-block-input="true"
                    placeholder=Signal::derive(move || t(lang.get(), Msg::PasteUrl).to_string())
                    class="h-8 text-xs"
                    on_enter=Callback::new(move |_| add())
                />
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| add()>
                    {move || t(lang.get(), Msg::Add)}
                </Button>
            </div>

            <input
                type="text"
                class="w-full bg-transparent text-xs text-muted-foreground outline-none"
                placeholder=move || t(lang.get(), Msg::AltText)
                prop:value=move || alt.get().unwrap_or_default()
                on:input=move |ev| {
                    id.with_value(|id| ctx.edit(id, BlockEdit::Alt(event_target_value(&ev))));
                }
            />
            <CaptionInput id=id />
        </div>
    }
}

/// Video, link and GIF blocks: one URL plus a caption.
#[component]
fn UrlMediaBody(id: StoredValue<String>, kind: BlockKind) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let ctx = expect_context::<EditorCtx>();

    let url = ctx.field(id, |b| b.metadata.url.clone().unwrap_or_default());
    let caption = ctx.field(id, |b| b.content.clone());
    let draft = RwSignal::new(url.get_untracked().unwrap_or_default());

    let commit = move || {
        let value = draft.get_untracked();
        id.with_value(|id| ctx.edit(id, BlockEdit::Url(value)));
        // Link urls come back normalized.
        draft.set(url.get_untracked().unwrap_or_default());
    };

    let preview = move || {
        let src = url.get().unwrap_or_default();
        if src.is_empty() {
            return ().into_any();
        }
        match kind {
            BlockKind::Video => match video_embed_url(&src) {
                Some(embed) => view! {
                    <div class="aspect-video w-full overflow-hidden rounded-md border border-border">
                        <iframe
                            src=embed
                            class="h-full w-full"
                            allow="accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture"
                            allowfullscreen="true"
                        />
                    </div>
                }
                .into_any(),
                None => view! {
                    <div class="text-xs text-destructive">{move || t(lang.get(), Msg::InvalidVideoUrl)}</div>
                }
                .into_any(),
            },
            BlockKind::Link => {
                let fallback = src.clone();
                let label = move || {
                    caption
                        .get()
                        .filter(|c| !c.trim().is_empty())
                        .unwrap_or_else(|| fallback.clone())
                };
                view! {
                    <a
                        href=src
                        target="_blank"
                        rel="noopener noreferrer"
                        class="block truncate rounded-md border border-border px-3 py-2 text-sm text-primary underline-offset-4 hover:underline"
                    >
                        {label}
                    </a>
                }
                .into_any()
            }
            _ => view! {
                <img src=src alt="" class="max-h-72 rounded-md border border-border object-contain" />
            }
            .into_any(),
        }
    };

    view! {
        <div class="space-y-2 py-1">
            <Input
                bind_value=draft
                attr:data-block-input="true"
                placeholder=Signal::derive(move || t(lang.get(), Msg::PasteUrl).to_string())
                class="h-8 text-xs"
                on_enter=Callback::new(move |_| commit())
                on:blur=move |_| commit()
            />
            {preview}
            <CaptionInput id=id />
        </div>
    }
}
