use super::BlockEditor;
use crate::blocks::ensure_non_empty;
use crate::components::ui::{Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input};
use crate::drafts::{
    clear_note_draft, load_note_draft, should_restore, touch_note_draft, NEW_NOTE_DRAFT_ID,
};
use crate::i18n::{t, Msg};
use crate::models::FreeFormNote;
use crate::notes::{clean_title, editable_blocks};
use crate::state::AppContext;
use crate::util::{new_id, now_ms};
use leptos::logging::log;
use leptos::prelude::*;

/// Title plus block document for one note; `note: None` starts a new one.
///
/// Every change is mirrored into a local draft. Save or cancel drops it.
#[component]
pub(crate) fn FreeFormEditor(note: Option<FreeFormNote>, on_close: Callback<()>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;

    let note_id = note.as_ref().map(|n| n.id.clone());
    let draft_id = StoredValue::new(
        note_id
            .clone()
            .unwrap_or_else(|| NEW_NOTE_DRAFT_ID.to_string()),
    );
    let note_id = StoredValue::new(note_id);

    let (initial_title, mut initial_blocks, restored) = match load_note_draft(&draft_id.get_value())
        .filter(|d| should_restore(d, note.as_ref()))
    {
        Some(d) => {
            log!("restoring draft for note {}", d.note_id);
            (d.title, d.blocks, true)
        }
        None => match &note {
            Some(n) => (n.title.clone(), editable_blocks(n, || new_id("block")), false),
            None => (String::new(), vec![], false),
        },
    };
    ensure_non_empty(&mut initial_blocks, || new_id("block"));

    let title = RwSignal::new(initial_title);
    let blocks = RwSignal::new(initial_blocks);
    let draft_restored = RwSignal::new(restored);

    // Skip the first run so opening a note doesn't write a draft.
    Effect::new(move |prev: Option<()>| {
        let current_title = title.get();
        blocks.with(|bs| {
            if prev.is_some() {
                draft_id.with_value(|id| touch_note_draft(id, &current_title, bs, now_ms()));
            }
        });
    });

    let can_save = move || title.with(|t| clean_title(t).is_some());

    let save = move || {
        let Some(clean) = clean_title(&title.get_untracked()) else {
            return;
        };
        let bs = blocks.get_untracked();
        match note_id.get_value() {
            Some(id) => {
                app_state.0.update_note(&id, &clean, bs);
            }
            None => {
                app_state.0.create_note(&clean, bs);
            }
        }
        draft_id.with_value(|id| clear_note_draft(id));
        on_close.run(());
    };

    let cancel = move || {
        draft_id.with_value(|id| clear_note_draft(id));
        on_close.run(());
    };

    let delete = move || {
        if let Some(id) = note_id.get_value() {
            app_state.0.delete_note(&id);
        }
        draft_id.with_value(|id| clear_note_draft(id));
        on_close.run(());
    };

    view! {
        <div
            data-name="FreeFormEditor"
            class="space-y-4 rounded-xl border border-border bg-card p-4 shadow-sm"
            on:keydown=move |ev: web_sys::KeyboardEvent| {
                let is_meta = ev.meta_key() || ev.ctrl_key();
                if is_meta && ev.key().to_lowercase() == "s" {
                    ev.prevent_default();
                    save();
                }
            }
        >
            <Show when=move || draft_restored.get() fallback=|| ().into_view()>
                <Alert class="border-amber-300 bg-amber-50 text-amber-900 dark:bg-amber-950/40 dark:text-amber-200">
                    <AlertDescription>{move || t(lang.get(), Msg::DraftRestored)}</AlertDescription>
                    <button
                        type="button"
                        class="ml-auto text-xs underline-offset-4 hover:underline"
                        on:click=move |_| draft_restored.set(false)
                    >
                        {move || t(lang.get(), Msg::Close)}
                    </button>
                </Alert>
            </Show>

            <Input
                bind_value=title
                placeholder=Signal::derive(move || t(lang.get(), Msg::EnterTitle).to_string())
                class="h-11 border-none px-1 text-2xl font-bold shadow-none focus-visible:ring-0"
                on_escape=Callback::new(move |_| cancel())
            />

            <BlockEditor blocks=blocks />

            <div class="flex items-center justify-end gap-2 border-t border-border pt-3">
                <Show when=move || note_id.with_value(|id| id.is_some()) fallback=|| ().into_view()>
                    <Button
                        variant=ButtonVariant::Destructive
                        size=ButtonSize::Sm
                        class="mr-auto"
                        on:click=move |_| delete()
                    >
                        {move || t(lang.get(), Msg::Delete)}
                    </Button>
                </Show>
                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| cancel()>
                    {move || t(lang.get(), Msg::Cancel)}
                </Button>
                <Button size=ButtonSize::Sm attr:disabled=move || !can_save() on:click=move |_| save()>
                    {move || t(lang.get(), Msg::Save)}
                </Button>
            </div>
        </div>
    }
}
