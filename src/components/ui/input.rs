use leptos::html;
use leptos::prelude::*;
use tw_merge::tw_merge;
use wasm_bindgen::JsCast;

const FIELD_CLASS: &str = "placeholder:text-muted-foreground selection:bg-primary selection:text-primary-foreground border-input w-full min-w-0 rounded-md border bg-transparent px-3 py-1 text-base shadow-xs transition-[color,box-shadow] outline-none disabled:pointer-events-none disabled:opacity-50 md:text-sm focus-visible:border-ring focus-visible:ring-2 focus-visible:ring-ring/50";

/// Route Enter and Escape to the optional callbacks. Shift+Enter is left alone.
fn handle_submit_keys(
    ev: &web_sys::KeyboardEvent,
    on_enter: Option<Callback<()>>,
    on_escape: Option<Callback<()>>,
) {
    match ev.key().as_str() {
        "Enter" if !ev.shift_key() => {
            if let Some(cb) = on_enter {
                ev.prevent_default();
                cb.run(());
            }
        }
        "Escape" => {
            if let Some(cb) = on_escape {
                ev.prevent_default();
                cb.run(());
            }
        }
        _ => {}
    }
}

#[component]
pub fn Input(
    #[prop(into, optional)] class: String,
    #[prop(into, default = "text")] r#type: &'static str,
    #[prop(into, optional)] placeholder: Signal<String>,
    #[prop(into, optional)] id: String,
    #[prop(optional, into)] disabled: Signal<bool>,

    // Manual value wiring keeps the signal as the single source of truth.
    #[prop(into)] bind_value: RwSignal<String>,

    #[prop(optional, into)] on_enter: Option<Callback<()>>,
    #[prop(optional, into)] on_escape: Option<Callback<()>>,
    #[prop(optional)] node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    let merged_class = tw_merge!("flex h-9", FIELD_CLASS, class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(input) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok())
        {
            bind_value.set(input.value());
        }
    };

    view! {
        <input
            data-name="Input"
            type=r#type
            class=merged_class
            placeholder=move || placeholder.get()
            id=id
            disabled=move || disabled.get()
            prop:value=move || bind_value.get()
            on:input=on_input
            on:keydown=move |ev: web_sys::KeyboardEvent| handle_submit_keys(&ev, on_enter, on_escape)
            node_ref=node_ref
        />
    }
}

/// Multi-line field; one entry per line in the task-list form.
#[component]
pub fn Textarea(
    #[prop(into, optional)] class: String,
    #[prop(into, optional)] placeholder: Signal<String>,
    #[prop(default = 4)] rows: u32,
    #[prop(into)] bind_value: RwSignal<String>,
    #[prop(optional, into)] on_escape: Option<Callback<()>>,
) -> impl IntoView {
    let merged_class = tw_merge!("min-h-16 py-2 resize-y", FIELD_CLASS, class);

    let on_input = move |ev: web_sys::Event| {
        if let Some(area) = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::HtmlTextAreaElement>().ok())
        {
            bind_value.set(area.value());
        }
    };

    view! {
        <textarea
            data-name="Textarea"
            class=merged_class
            rows=rows
            placeholder=move || placeholder.get()
            prop:value=move || bind_value.get()
            on:input=on_input
            on:keydown=move |ev: web_sys::KeyboardEvent| handle_submit_keys(&ev, None, on_escape)
        />
    }
}
