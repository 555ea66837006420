use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input, Label};
use crate::i18n::{t, Msg};
use crate::selection::{FormatCommand, SelectionController};
use crate::state::AppContext;
use leptos::html;
use leptos::prelude::*;

/// Normalize user input into an absolute `http(s)` URL.
///
/// Input without a scheme gets `https://`. Returns `None` when the result doesn't parse
/// as a URL with a host.
pub(crate) fn normalize_link_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    let lower = trimmed.to_ascii_lowercase();
    let candidate = if lower.starts_with("http://") || lower.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let parsed = url::Url::parse(&candidate).ok()?;
    if parsed.host_str().map_or(true, |h| h.is_empty()) {
        return None;
    }
    Some(candidate)
}

/// Modal asking for the target of a link over the saved selection.
#[component]
pub(crate) fn LinkDialog(open: RwSignal<bool>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let selection = expect_context::<SelectionController>();

    let url_value = RwSignal::new(String::new());
    let selected_text = RwSignal::new(String::new());
    let url_ref: NodeRef<html::Input> = NodeRef::new();

    Effect::new(move |_| {
        if open.get() {
            url_value.set(String::new());
            selected_text.set(selection.selected_text());
        }
    });

    // The input mounts with the dialog.
    Effect::new(move |_| {
        if let Some(el) = url_ref.get() {
            let _ = el.focus();
        }
    });

    let normalized = Memo::new(move |_| url_value.with(|v| normalize_link_url(v)));
    let show_invalid = move || !url_value.with(|v| v.trim().is_empty()) && normalized.with(|n| n.is_none());

    let submit = move || {
        let Some(url) = normalized.get_untracked() else {
            return;
        };
        let _ = selection.apply(FormatCommand::CreateLink(url));
        open.set(false);
    };

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                class="fixed inset-0 z-[100] flex items-center justify-center bg-black/50 px-4"
                data-keep-selection="true"
                on:mousedown=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                on:click=move |_| open.set(false)
            >
                <div
                    class="w-full max-w-md rounded-xl border border-border bg-background p-6 shadow-2xl"
                    on:click=move |ev: web_sys::MouseEvent| ev.stop_propagation()
                >
                    <div class="mb-4 text-lg font-semibold">{move || t(lang.get(), Msg::AddLink)}</div>

                    <Show
                        when=move || selected_text.with(|s| !s.trim().is_empty())
                        fallback=|| ().into_view()
                    >
                        <div class="mb-3 space-y-1">
                            <Label class="text-xs text-muted-foreground">
                                {move || t(lang.get(), Msg::SelectedText)}
                            </Label>
                            <div class="rounded-md border border-border bg-muted px-3 py-2 text-sm">
                                {move || selected_text.get()}
                            </div>
                        </div>
                    </Show>

                    <Input
                        node_ref=url_ref
                        bind_value=url_value
                        placeholder="https://exemplo.com"
                        class="text-sm"
                        on_enter=Callback::new(move |_| submit())
                        on_escape=Callback::new(move |_| open.set(false))
                    />

                    <Show when=show_invalid fallback=|| ().into_view()>
                        <div class="mt-2 text-xs text-destructive">{move || t(lang.get(), Msg::InvalidUrl)}</div>
                    </Show>

                    <div class="flex items-center justify-end gap-2 pt-4">
                        <Button
                            variant=ButtonVariant::Outline
                            size=ButtonSize::Sm
                            on:click=move |_| open.set(false)
                        >
                            {move || t(lang.get(), Msg::Cancel)}
                        </Button>
                        <Button
                            size=ButtonSize::Sm
                            attr:disabled=move || normalized.with(|n| n.is_none())
                            on:click=move |_| submit()
                        >
                            {move || t(lang.get(), Msg::Apply)}
                        </Button>
                    </div>
                </div>
            </div>
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adds_https_when_scheme_missing() {
        assert_eq!(normalize_link_url("example.com"), Some("https://example.com".to_string()));
        assert_eq!(
            normalize_link_url("  docs.rs/leptos  "),
            Some("https://docs.rs/leptos".to_string())
        );
    }

    #[test]
    fn test_keeps_existing_scheme() {
        assert_eq!(normalize_link_url("http://a.dev"), Some("http://a.dev".to_string()));
        assert_eq!(
            normalize_link_url("HTTPS://Example.com/x"),
            Some("HTTPS://Example.com/x".to_string())
        );
    }

    #[test]
    fn test_rejects_empty_and_hostless() {
        assert_eq!(normalize_link_url("   "), None);
        assert_eq!(normalize_link_url("https://"), None);
        assert_eq!(normalize_link_url("exa mple.com"), None);
    }
}
