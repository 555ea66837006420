use super::progress::{LevelIndicator, LevelUpCelebration};
use crate::components::ui::{
    Button, ButtonSize, ButtonVariant, Label, Separator, SeparatorOrientation,
};
use crate::i18n::{t, Language, Msg};
use crate::models::ActiveTab;
use crate::state::AppContext;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};
use std::str::FromStr;
use strum::IntoEnumIterator;

fn tab_for_path(path: &str) -> ActiveTab {
    if path.trim_end_matches('/').ends_with("/chat") {
        ActiveTab::Chat
    } else {
        ActiveTab::Notes
    }
}

fn path_for_tab(tab: ActiveTab) -> &'static str {
    match tab {
        ActiveTab::Notes => "/",
        ActiveTab::Chat => "/chat",
    }
}

#[component]
pub fn AppLayout(children: ChildrenFn) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let active_tab = app_state.0.active_tab;

    let navigate = use_navigate();
    let pathname = use_location().pathname;

    // Reopen the tab the user left, then let the route drive it.
    let stored_tab = active_tab.get_untracked();
    Effect::new(move |prev: Option<()>| {
        if prev.is_none() && pathname.get_untracked() == "/" && stored_tab != ActiveTab::Notes {
            navigate(path_for_tab(stored_tab), Default::default());
        }
    });

    Effect::new(move |_| {
        let tab = tab_for_path(&pathname.get());
        app_state.0.set_active_tab(tab);
    });

    let tab_button = move |tab: ActiveTab, icon: &'static str, label: Msg| {
        view! {
            <Button
                variant=ButtonVariant::Tab
                size=ButtonSize::Sm
                href=path_for_tab(tab)
                attr:aria-current=move || (active_tab.get() == tab).then_some("page")
            >
                <span aria-hidden="true">{icon}</span>
                <span>{move || t(lang.get(), label)}</span>
            </Button>
        }
    };

    view! {
        <div data-name="AppLayout" class="flex h-screen flex-col bg-background text-foreground">
            <header class="flex h-14 shrink-0 items-center justify-between gap-4 border-b border-border px-4">
                <div class="flex items-center gap-2">
                    <span class="text-xl" aria-hidden="true">"🧠"</span>
                    <span class="font-semibold tracking-tight">"Mind Notes"</span>
                </div>

                <div class="flex items-center gap-4">
                    <LevelIndicator />
                    <Separator orientation=SeparatorOrientation::Vertical class="h-8" />
                    <div class="flex items-center gap-2">
                        <Label html_for="language-select" class="sr-only">
                            {move || t(lang.get(), Msg::LanguageLabel)}
                        </Label>
                        <select
                            id="language-select"
                            class="h-8 rounded-md border border-input bg-transparent px-2 text-sm"
                            on:change=move |ev| {
                                if let Ok(l) = Language::from_str(&event_target_value(&ev)) {
                                    app_state.0.set_language(l);
                                }
                            }
                        >
                            {Language::iter()
                                .map(|l| {
                                    view! {
                                        <option value=l.as_ref().to_string() prop:selected=move || lang.get() == l>
                                            {l.label()}
                                        </option>
                                    }
                                })
                                .collect_view()}
                        </select>
                    </div>
                </div>
            </header>

            <div class="flex min-h-0 flex-1">
                <nav class="hidden w-52 shrink-0 flex-col gap-1 border-r border-border p-3 sm:flex">
                    {tab_button(ActiveTab::Notes, "📝", Msg::Notes)}
                    {tab_button(ActiveTab::Chat, "💬", Msg::AiChat)}
                </nav>

                <main class="min-h-0 min-w-0 flex-1 overflow-y-auto">{children()}</main>
            </div>

            // Bottom tabs on narrow screens.
            <nav class="flex shrink-0 gap-1 border-t border-border p-2 sm:hidden">
                {tab_button(ActiveTab::Notes, "📝", Msg::Notes)}
                {tab_button(ActiveTab::Chat, "💬", Msg::AiChat)}
            </nav>

            <LevelUpCelebration />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_for_path() {
        assert_eq!(tab_for_path("/"), ActiveTab::Notes);
        assert_eq!(tab_for_path("/chat"), ActiveTab::Chat);
        assert_eq!(tab_for_path("/chat/"), ActiveTab::Chat);
        assert_eq!(tab_for_path("/unknown"), ActiveTab::Notes);
    }

    #[test]
    fn test_tab_paths_round_trip() {
        for tab in [ActiveTab::Notes, ActiveTab::Chat] {
            assert_eq!(tab_for_path(path_for_tab(tab)), tab);
        }
    }
}
