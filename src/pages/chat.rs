use crate::components::ui::{Button, ButtonSize, Input, Spinner};
use crate::i18n::{t, Msg};
use crate::models::ChatRole;
use crate::state::{send_chat_prompt, AppContext};
use leptos::html;
use leptos::prelude::*;
use leptos_router::hooks::use_navigate;
use leptos_router::NavigateOptions;

const SUGGESTIONS: [Msg; 4] = [
    Msg::Suggestion1,
    Msg::Suggestion2,
    Msg::Suggestion3,
    Msg::Suggestion4,
];

/// Navigation to run once the reply's task list has been created.
///
/// The chat page may be gone by then, so the router handle is cloned out of its
/// `StoredValue` up front.
fn open_notes_later<N>(navigate: StoredValue<N>) -> impl FnOnce() + 'static
where
    N: Fn(&str, NavigateOptions) + Clone + Send + Sync + 'static,
{
    let navigate = navigate.get_value();
    move || navigate("/", NavigateOptions::default())
}

#[component]
pub fn ChatPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let messages = app_state.0.chat_messages;
    let loading = app_state.0.chat_loading;

    let navigate = StoredValue::new(use_navigate());
    let prompt = RwSignal::new(String::new());
    let input_ref: NodeRef<html::Input> = NodeRef::new();
    let scroll_ref: NodeRef<html::Div> = NodeRef::new();

    // Keep the newest message in view.
    Effect::new(move |_| {
        let _ = messages.with(|m| m.len());
        let _ = loading.get();
        if let Some(el) = scroll_ref.get() {
            el.set_scroll_top(el.scroll_height());
        }
    });

    let send = move || {
        let text = prompt.get_untracked();
        let sent = send_chat_prompt(app_state.0, &text, open_notes_later(navigate));
        if sent {
            prompt.set(String::new());
        }
    };

    let pick_suggestion = move |msg: Msg| {
        prompt.set(t(lang.get_untracked(), msg).to_string());
        if let Some(el) = input_ref.get_untracked() {
            let _ = el.focus();
        }
    };

    view! {
        <div data-name="ChatPage" class="mx-auto flex h-full max-w-3xl flex-col px-4">
            <div class="shrink-0 py-4">
                <h2 class="text-lg font-semibold">{move || t(lang.get(), Msg::AiChat)}</h2>
                <p class="text-sm text-muted-foreground">{move || t(lang.get(), Msg::ChatSubtitle)}</p>
            </div>

            <div node_ref=scroll_ref class="min-h-0 flex-1 space-y-3 overflow-y-auto pb-4">
                <Show
                    when=move || messages.with(|m| !m.is_empty())
                    fallback=move || view! {
                        <div class="flex flex-col items-center gap-4 py-12 text-center">
                            <div class="text-4xl">"🤖"</div>
                            <div>
                                <div class="text-xl font-semibold">{move || t(lang.get(), Msg::ChatWelcomeTitle)}</div>
                                <div class="mt-1 text-sm text-muted-foreground">
                                    {move || t(lang.get(), Msg::ChatWelcomeSubtitle)}
                                </div>
                            </div>
                            <div class="grid w-full gap-2 sm:grid-cols-2">
                                {SUGGESTIONS
                                    .into_iter()
                                    .map(|msg| {
                                        view! {
                                            <button
                                                type="button"
                                                class="rounded-lg border border-border px-3 py-2 text-left text-sm transition-colors hover:bg-accent"
                                                on:click=move |_| pick_suggestion(msg)
                                            >
                                                {move || t(lang.get(), msg)}
                                            </button>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                        </div>
                    }
                >
                    <For
                        each=move || messages.get()
                        key=|m| m.id.clone()
                        children=move |m| {
                            let is_user = m.role == ChatRole::User;
                            view! {
                                <div class=if is_user { "flex justify-end" } else { "flex justify-start" }>
                                    <div class=if is_user {
                                        "max-w-[80%] whitespace-pre-wrap rounded-2xl rounded-br-sm bg-primary px-4 py-2 text-sm text-primary-foreground"
                                    } else {
                                        "max-w-[80%] whitespace-pre-wrap rounded-2xl rounded-bl-sm bg-muted px-4 py-2 text-sm"
                                    }>
                                        {m.content}
                                    </div>
                                </div>
                            }
                        }
                    />
                </Show>

                <Show when=move || loading.get() fallback=|| ().into_view()>
                    <div class="flex items-center gap-2 text-sm text-muted-foreground">
                        <Spinner label=Signal::derive(move || t(lang.get(), Msg::Thinking).to_string()) />
                        <span>{move || t(lang.get(), Msg::Thinking)}</span>
                    </div>
                </Show>
            </div>

            <div class="flex shrink-0 items-center gap-2 border-t border-border py-3">
                <Input
                    node_ref=input_ref
                    bind_value=prompt
                    placeholder=Signal::derive(move || t(lang.get(), Msg::AskAi).to_string())
                    disabled=loading
                    on_enter=Callback::new(move |_| send())
                />
                <Button
                    size=ButtonSize::Default
                    attr:disabled=move || loading.get() || prompt.with(|p| p.trim().is_empty())
                    on:click=move |_| send()
                >
                    {move || t(lang.get(), Msg::SendPrompt)}
                </Button>
            </div>
        </div>
    }
}
