use crate::components::ui::{Button, ButtonVariant};
use crate::i18n::{t, Msg};
use crate::leveling::{level_progress_percent, mascot_mood, MascotMood, XP_PER_LEVEL};
use crate::state::AppContext;
use leptos::prelude::*;

fn mascot_face(mood: MascotMood) -> &'static str {
    match mood {
        MascotMood::Neutral => "🙂",
        MascotMood::Happy => "😄",
        MascotMood::Excellent => "🤩",
    }
}

/// Mascot, level and progress bar shown in the top bar.
#[component]
pub(super) fn LevelIndicator() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let progress = app_state.0.user_progress;

    let mood = Memo::new(move |_| mascot_mood(progress.with(|p| p.level)));
    let percent = Memo::new(move |_| progress.with(level_progress_percent));

    view! {
        <div data-name="LevelIndicator" class="flex items-center gap-3">
            <span
                class="text-2xl leading-none"
                data-mood=move || mood.get().as_ref().to_string()
                aria-hidden="true"
            >
                {move || mascot_face(mood.get())}
            </span>
            <div class="min-w-[140px]">
                <div class="flex items-baseline justify-between gap-2 text-xs">
                    <span class="font-semibold">
                        {move || format!("{} {}", t(lang.get(), Msg::Level), progress.with(|p| p.level))}
                    </span>
                    <span class="text-muted-foreground">
                        {move || format!("{}/{} XP", percent.get(), XP_PER_LEVEL)}
                    </span>
                </div>
                <div class="mt-1 h-1.5 w-full overflow-hidden rounded-full bg-muted">
                    <div
                        class="h-full rounded-full bg-gradient-to-r from-amber-400 to-orange-500 transition-all duration-500"
                        style=move || format!("width: {}%;", percent.get())
                    />
                </div>
                <div class="mt-0.5 text-[11px] text-muted-foreground">
                    {move || {
                        format!(
                            "{} {}",
                            progress.with(|p| p.completed_task_lists),
                            t(lang.get(), Msg::ListsCompleted),
                        )
                    }}
                </div>
            </div>
        </div>
    }
}

#[component]
pub(super) fn LevelUpCelebration() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let celebrating = app_state.0.celebrating_level;

    view! {
        <Show when=move || celebrating.get().is_some() fallback=|| ().into_view()>
            <div
                data-name="LevelUpCelebration"
                class="fixed inset-0 z-[200] flex items-center justify-center bg-black/40 px-4"
                on:click=move |_| celebrating.set(None)
            >
                <div class="animate-in zoom-in-95 rounded-2xl bg-background px-10 py-8 text-center shadow-2xl">
                    <div class="text-5xl">"🎉"</div>
                    <div class="mt-3 text-2xl font-bold">{move || t(lang.get(), Msg::LevelUp)}</div>
                    <div class="mt-1 text-muted-foreground">
                        {move || {
                            format!(
                                "{} {}",
                                t(lang.get(), Msg::ReachedLevel),
                                celebrating.get().unwrap_or_default(),
                            )
                        }}
                    </div>
                    <div class="mt-4 text-4xl">{move || mascot_face(mascot_mood(celebrating.get().unwrap_or_default()))}</div>
                    <Button variant=ButtonVariant::Reward class="mt-6" on:click=move |_| celebrating.set(None)>
                        {move || t(lang.get(), Msg::Close)}
                    </Button>
                </div>
            </div>
        </Show>
    }
}
