use crate::blocks::video_embed_url;
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Card, CardContent, CardDescription, CardFooter, CardHeader,
    CardTitle, Input, Label, Textarea,
};
use crate::drafts::{load_note_draft, should_restore, NEW_NOTE_DRAFT_ID};
use crate::editor::FreeFormEditor;
use crate::i18n::{t, Language, Msg};
use crate::notes::preview_text;
use crate::state::AppContext;
use icons::X;
use leptos::prelude::*;

const PREVIEW_CHARS: usize = 140;

#[derive(Clone, Debug, PartialEq, Eq)]
enum EditorTarget {
    New,
    Existing(String),
}

fn format_date(ms: i64, lang: Language) -> String {
    let locale = match lang {
        Language::Pt => "pt-BR",
        Language::En => "en-US",
    };
    let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_f64(ms as f64));
    String::from(date.to_locale_date_string(locale, &wasm_bindgen::JsValue::UNDEFINED))
}

/// Split the form's textarea into task texts.
fn task_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[component]
pub fn NotesPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let task_lists = app_state.0.task_lists;
    let notes = app_state.0.free_form_notes;

    let form_open = RwSignal::new(false);

    // An unsaved new note survives a reload.
    let pending_new = load_note_draft(NEW_NOTE_DRAFT_ID)
        .filter(|d| should_restore(d, None))
        .map(|_| EditorTarget::New);
    let editing: RwSignal<Option<EditorTarget>> = RwSignal::new(pending_new);

    let editor = move || {
        let target = editing.get()?;
        let note = match &target {
            EditorTarget::New => None,
            // A note deleted meanwhile closes the editor.
            EditorTarget::Existing(id) => {
                Some(notes.with_untracked(|ns| ns.iter().find(|n| n.id == *id).cloned())?)
            }
        };
        Some(view! { <FreeFormEditor note=note on_close=Callback::new(move |_| editing.set(None)) /> })
    };

    view! {
        <div data-name="NotesPage" class="mx-auto max-w-5xl space-y-10 px-4 py-6">
            <section class="space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-semibold">{move || t(lang.get(), Msg::TaskLists)}</h2>
                    <Button size=ButtonSize::Sm on:click=move |_| form_open.update(|v| *v = !*v)>
                        "+ "
                        {move || t(lang.get(), Msg::NewTaskList)}
                    </Button>
                </div>

                <Show when=move || form_open.get() fallback=|| ().into_view()>
                    <NewTaskListForm open=form_open />
                </Show>

                <Show
                    when=move || task_lists.with(|ls| !ls.is_empty())
                    fallback=move || view! {
                        <div class="rounded-lg border border-dashed border-border p-6 text-center text-sm text-muted-foreground">
                            {move || t(lang.get(), Msg::NoTaskLists)}
                        </div>
                    }
                >
                    <div class="grid gap-4 md:grid-cols-2">
                        <For
                            each=move || task_lists.with(|ls| ls.iter().map(|l| l.id.clone()).collect::<Vec<_>>())
                            key=|id| id.clone()
                            children=move |id| view! { <TaskListCard list_id=id /> }
                        />
                    </div>
                </Show>
            </section>

            <section class="space-y-4">
                <div class="flex items-center justify-between">
                    <h2 class="text-lg font-semibold">{move || t(lang.get(), Msg::FreeFormNotes)}</h2>
                    <Button
                        size=ButtonSize::Sm
                        variant=ButtonVariant::Outline
                        attr:disabled=move || editing.with(|e| e.is_some())
                        on:click=move |_| editing.set(Some(EditorTarget::New))
                    >
                        "+ "
                        {move || t(lang.get(), Msg::NewNote)}
                    </Button>
                </div>

                {editor}

                <Show
                    when=move || notes.with(|ns| !ns.is_empty())
                    fallback=move || view! {
                        <div class="text-sm text-muted-foreground">{move || t(lang.get(), Msg::NoNotes)}</div>
                    }
                >
                    <div class="grid gap-3 sm:grid-cols-2 lg:grid-cols-3">
                        {move || {
                            notes
                                .get()
                                .into_iter()
                                .map(|note| {
                                    let id = note.id.clone();
                                    let title = note.title.clone();
                                    let preview = preview_text(&note, PREVIEW_CHARS);
                                    let updated_ms = note.updated_ms;
                                    view! {
                                        <Card
                                            class="cursor-pointer"
                                            on:click=move |_| editing.set(Some(EditorTarget::Existing(id.clone())))
                                        >
                                            <CardHeader>
                                                <CardTitle class="truncate">
                                                    {move || {
                                                        if title.trim().is_empty() {
                                                            t(lang.get(), Msg::Untitled).to_string()
                                                        } else {
                                                            title.clone()
                                                        }
                                                    }}
                                                </CardTitle>
                                            </CardHeader>
                                            <CardContent class="line-clamp-3 text-sm text-muted-foreground">
                                                {preview}
                                            </CardContent>
                                            <CardFooter>
                                                <CardDescription>{move || format_date(updated_ms, lang.get())}</CardDescription>
                                            </CardFooter>
                                        </Card>
                                    }
                                })
                                .collect_view()
                        }}
                    </div>
                </Show>
            </section>
        </div>
    }
}

#[component]
fn NewTaskListForm(open: RwSignal<bool>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;

    let title = RwSignal::new(String::new());
    let tasks_text = RwSignal::new(String::new());
    let video_url = RwSignal::new(String::new());

    let can_create = move || {
        title.with(|t| !t.trim().is_empty()) && tasks_text.with(|t| !task_lines(t).is_empty())
    };

    let create = move || {
        let tasks = task_lines(&tasks_text.get_untracked());
        let video = Some(video_url.get_untracked()).filter(|v| !v.trim().is_empty());
        if app_state
            .0
            .create_task_list(&title.get_untracked(), &tasks, video)
            .is_some()
        {
            title.set(String::new());
            tasks_text.set(String::new());
            video_url.set(String::new());
            open.set(false);
        }
    };

    view! {
        <Card attr:data-name="NewTaskListForm">
            <CardContent class="space-y-3">
                <div class="space-y-1.5">
                    <Label html_for="task-list-title">{move || t(lang.get(), Msg::TaskListTitle)}</Label>
                    <Input
                        id="task-list-title"
                        bind_value=title
                        on_escape=Callback::new(move |_| open.set(false))
                    />
                </div>
                <div class="space-y-1.5">
                    <Textarea
                        bind_value=tasks_text
                        rows=5
                        placeholder=Signal::derive(move || t(lang.get(), Msg::TaskPlaceholder).to_string())
                        on_escape=Callback::new(move |_| open.set(false))
                    />
                </div>
                <Input
                    bind_value=video_url
                    placeholder=Signal::derive(move || t(lang.get(), Msg::VideoUrlOptional).to_string())
                />
                <div class="flex justify-end gap-2">
                    <Button variant=ButtonVariant::Outline size=ButtonSize::Sm on:click=move |_| open.set(false)>
                        {move || t(lang.get(), Msg::Cancel)}
                    </Button>
                    <Button size=ButtonSize::Sm attr:disabled=move || !can_create() on:click=move |_| create()>
                        {move || t(lang.get(), Msg::Add)}
                    </Button>
                </div>
            </CardContent>
        </Card>
    }
}

#[component]
fn TaskListCard(list_id: String) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let task_lists = app_state.0.task_lists;
    let list_id = StoredValue::new(list_id);

    let list = Memo::new(move |_| {
        task_lists.with(|ls| list_id.with_value(|id| ls.iter().find(|l| l.id == *id).cloned()))
    });
    let done_count = Memo::new(move |_| {
        list.with(|l| l.as_ref().map_or(0, |l| l.tasks.iter().filter(|t| t.completed).count()))
    });
    let total = Memo::new(move |_| list.with(|l| l.as_ref().map_or(0, |l| l.tasks.len())));
    let is_completed = Memo::new(move |_| list.with(|l| l.as_ref().is_some_and(|l| l.completed_ms.is_some())));

    let tasks_view = move || {
        list.get()
            .map(|l| l.tasks)
            .unwrap_or_default()
            .into_iter()
            .map(|task| {
                let toggle_id = task.id.clone();
                let delete_id = task.id.clone();
                let text_class = if task.completed {
                    "flex-1 text-sm text-muted-foreground line-through"
                } else {
                    "flex-1 text-sm"
                };
                view! {
                    <li class="group flex items-center gap-2 rounded px-1 py-1 hover:bg-accent/40">
                        <input
                            type="checkbox"
                            class="size-4 cursor-pointer accent-primary"
                            prop:checked=task.completed
                            on:change=move |_| {
                                list_id.with_value(|lid| app_state.0.toggle_task(lid, &toggle_id))
                            }
                        />
                        <span class=text_class>{task.text}</span>
                        <button
                            type="button"
                            class="opacity-0 transition-opacity group-hover:opacity-100"
                            title=move || t(lang.get(), Msg::Delete)
                            on:click=move |_| {
                                list_id.with_value(|lid| app_state.0.delete_task(lid, &delete_id))
                            }
                        >
                            <X class="size-3.5 text-muted-foreground" />
                        </button>
                    </li>
                }
            })
            .collect_view()
    };

    let video = move || {
        let embed = list.with(|l| l.as_ref()?.video_url.as_deref().and_then(video_embed_url))?;
        Some(view! {
            <div class="aspect-video w-full overflow-hidden rounded-md border border-border">
                <iframe src=embed class="h-full w-full" allowfullscreen="true" />
            </div>
        })
    };

    view! {
        <Card
            attr:data-name="TaskListCard"
            attr:data-completed=move || is_completed.get().to_string()
            class="data-[completed=true]:border-emerald-400/60"
        >
            <CardHeader>
                <div class="min-w-0">
                    <CardTitle class="truncate">
                        {move || list.with(|l| l.as_ref().map(|l| l.title.clone()).unwrap_or_default())}
                    </CardTitle>
                    <CardDescription>
                        {move || format!("{}/{} {}", done_count.get(), total.get(), t(lang.get(), Msg::Tasks))}
                    </CardDescription>
                </div>
                <div class="flex shrink-0 items-center gap-1">
                    <Show when=move || is_completed.get() fallback=|| ().into_view()>
                        <span class="rounded-full bg-emerald-100 px-2 py-0.5 text-xs font-medium text-emerald-700 dark:bg-emerald-900/40 dark:text-emerald-300">
                            {move || t(lang.get(), Msg::Completed)}
                        </span>
                    </Show>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::IconSm
                        class="hover:text-destructive"
                        attr:title=move || t(lang.get(), Msg::Delete)
                        on:click=move |_| list_id.with_value(|id| app_state.0.delete_task_list(id))
                    >
                        <X />
                    </Button>
                </div>
            </CardHeader>
            <CardContent class="space-y-3">
                <div class="h-1.5 w-full overflow-hidden rounded-full bg-muted">
                    <div
                        class="h-full rounded-full bg-emerald-500 transition-all"
                        style=move || {
                            let pct = if total.get() == 0 { 0 } else { done_count.get() * 100 / total.get() };
                            format!("width: {pct}%;")
                        }
                    />
                </div>
                {video}
                <ul class="space-y-0.5">{tasks_view}</ul>
            </CardContent>
        </Card>
    }
}
