use super::{color_picker_position, hsb_to_hex, hue_pick, square_pick, Point, Size, SWATCHES};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Separator, SeparatorOrientation};
use crate::i18n::{t, Msg};
use crate::selection::{page_scroll, FormatCommand, SelectionController};
use crate::state::AppContext;
use icons::X;
use leptos::html;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

fn viewport_size() -> Size {
    let Some(w) = web_sys::window() else {
        return Size::default();
    };
    Size {
        width: w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
        height: w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0),
    }
}

/// Pointer offset inside the element the handler is attached to, plus that element's size.
fn pointer_in_target(ev: &web_sys::MouseEvent) -> Option<(f64, f64, f64, f64)> {
    let el = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let r = el.get_bounding_client_rect();
    Some((
        ev.client_x() as f64 - r.left(),
        ev.client_y() as f64 - r.top(),
        r.width(),
        r.height(),
    ))
}

/// Keep the editor's selection (and focus) when pressing anything inside a floating panel.
fn hold_selection(ev: &web_sys::MouseEvent) {
    ev.prevent_default();
    ev.stop_propagation();
}

#[component]
pub(crate) fn FormattingToolbar(color_open: RwSignal<bool>, link_open: RwSignal<bool>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let selection = expect_context::<SelectionController>();

    let style = move || {
        selection
            .toolbar_at()
            .map(|p| format!("left: {}px; top: {}px;", p.x, p.y))
            .unwrap_or_default()
    };

    let format = move |command: FormatCommand| {
        let _ = selection.apply(command);
    };

    view! {
        <Show when=move || selection.is_visible() fallback=|| ().into_view()>
            <div
                data-name="FormattingToolbar"
                data-keep-selection="true"
                class="absolute z-50 flex items-center gap-1 rounded-lg border border-border bg-background px-2 py-1.5 shadow-lg"
                style=style
                on:mousedown=move |ev: web_sys::MouseEvent| hold_selection(&ev)
            >
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="h-8 w-8 font-bold"
                    attr:title=move || t(lang.get(), Msg::Bold)
                    on:click=move |_| format(FormatCommand::Bold)
                >
                    "B"
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="h-8 w-8 italic"
                    attr:title=move || t(lang.get(), Msg::Italic)
                    on:click=move |_| format(FormatCommand::Italic)
                >
                    "I"
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="h-8 w-8 underline"
                    attr:title=move || t(lang.get(), Msg::Underline)
                    on:click=move |_| format(FormatCommand::Underline)
                >
                    "U"
                </Button>

                <Separator orientation=SeparatorOrientation::Vertical class="mx-1 h-6" />

                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="h-8 w-8"
                    attr:title=move || t(lang.get(), Msg::TextColor)
                    on:click=move |_| color_open.update(|open| *open = !*open)
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="16"
                        height="16"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        aria-hidden="true"
                    >
                        <circle cx="13.5" cy="6.5" r=".5" fill="currentColor" />
                        <circle cx="17.5" cy="10.5" r=".5" fill="currentColor" />
                        <circle cx="8.5" cy="7.5" r=".5" fill="currentColor" />
                        <circle cx="6.5" cy="12.5" r=".5" fill="currentColor" />
                        <path d="M12 2C6.5 2 2 6.5 2 12s4.5 10 10 10c.926 0 1.648-.746 1.648-1.688 0-.437-.18-.835-.437-1.125-.29-.289-.438-.652-.438-1.125a1.64 1.64 0 0 1 1.668-1.668h1.996c3.051 0 5.555-2.503 5.555-5.554C21.965 6.012 17.461 2 12 2z" />
                    </svg>
                </Button>

                <Separator orientation=SeparatorOrientation::Vertical class="mx-1 h-6" />

                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="h-8 w-8"
                    attr:title=move || t(lang.get(), Msg::AddLink)
                    on:click=move |_| {
                        color_open.set(false);
                        link_open.set(true);
                    }
                >
                    <svg
                        xmlns="http://www.w3.org/2000/svg"
                        width="16"
                        height="16"
                        viewBox="0 0 24 24"
                        fill="none"
                        stroke="currentColor"
                        stroke-width="2"
                        stroke-linecap="round"
                        stroke-linejoin="round"
                        aria-hidden="true"
                    >
                        <path d="M10 13a5 5 0 0 0 7.54.54l3-3a5 5 0 0 0-7.07-7.07l-1.72 1.71" />
                        <path d="M14 11a5 5 0 0 0-7.54-.54l-3 3a5 5 0 0 0 7.07 7.07l1.71-1.71" />
                    </svg>
                </Button>
            </div>
        </Show>
    }
}

#[component]
pub(crate) fn ColorPicker(open: RwSignal<bool>) -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let lang = app_state.0.language;
    let selection = expect_context::<SelectionController>();

    let hue = RwSignal::new(0.0_f64);
    let saturation = RwSignal::new(100.0_f64);
    let brightness = RwSignal::new(100.0_f64);
    let position = RwSignal::new(None::<Point>);
    let picker_ref: NodeRef<html::Div> = NodeRef::new();

    // A hidden toolbar takes the picker with it.
    Effect::new(move |_| {
        if !selection.is_visible() {
            open.set(false);
        }
    });

    // Placement needs the rendered picker size, so measure once it is mounted.
    Effect::new(move |_| {
        if !open.get() {
            position.set(None);
            return;
        }
        let Some(el) = picker_ref.get() else {
            return;
        };
        let Some(rect) = selection.selection_rect() else {
            return;
        };
        let picker = Size {
            width: el.offset_width() as f64,
            height: el.offset_height() as f64,
        };
        if let Some(p) = color_picker_position(&rect, picker, viewport_size(), page_scroll()) {
            position.set(Some(p));
        }
    });

    let apply_color = move |hex: String| {
        let _ = selection.apply(FormatCommand::ForeColor(hex));
    };

    let style = move || match position.get() {
        Some(p) => format!("left: {}px; top: {}px;", p.x, p.y),
        None => "left: 0px; top: 0px; visibility: hidden;".to_string(),
    };

    let square_background = move || {
        format!(
            "background: linear-gradient(to top, #000, transparent), linear-gradient(to right, #fff, hsl({}, 100%, 50%));",
            hue.get()
        )
    };

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                node_ref=picker_ref
                data-name="ColorPicker"
                data-keep-selection="true"
                class="absolute z-[60] w-[300px] rounded-xl border border-border bg-popover p-4 shadow-2xl"
                style=style
                on:mousedown=move |ev: web_sys::MouseEvent| hold_selection(&ev)
            >
                <div class="mb-4 flex items-center justify-between">
                    <div class="text-sm font-semibold text-foreground">
                        {move || t(lang.get(), Msg::ColorPicker)}
                    </div>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="h-6 w-6"
                        attr:title=move || t(lang.get(), Msg::Close)
                        on:click=move |_| open.set(false)
                    >
                        <X />
                    </Button>
                </div>

                <div class="flex gap-3">
                    <div
                        class="relative h-32 w-full cursor-crosshair overflow-hidden rounded border border-border"
                        style=square_background
                        on:mousedown=move |ev: web_sys::MouseEvent| {
                            hold_selection(&ev);
                            let Some((x, y, w, h)) = pointer_in_target(&ev) else {
                                return;
                            };
                            let (s, b) = square_pick(x, y, w, h);
                            saturation.set(s);
                            brightness.set(b);
                            apply_color(hsb_to_hex(hue.get_untracked(), s, b));
                        }
                    >
                        <div
                            class="pointer-events-none absolute h-2 w-2 -translate-x-1 -translate-y-1 rounded-full border border-white"
                            style=move || {
                                format!(
                                    "left: {}%; top: {}%; box-shadow: 0 0 0 1px rgba(0,0,0,0.5);",
                                    saturation.get(),
                                    100.0 - brightness.get(),
                                )
                            }
                        />
                    </div>

                    <div
                        class="relative h-32 w-4 cursor-pointer overflow-hidden rounded border border-border"
                        style="background: linear-gradient(to bottom, #ff0000 0%, #ffff00 17%, #00ff00 33%, #00ffff 50%, #0000ff 67%, #ff00ff 83%, #ff0000 100%);"
                        on:mousedown=move |ev: web_sys::MouseEvent| {
                            hold_selection(&ev);
                            let Some((_, y, _, h)) = pointer_in_target(&ev) else {
                                return;
                            };
                            let h = hue_pick(y, h);
                            hue.set(h);
                            apply_color(
                                hsb_to_hex(h, saturation.get_untracked(), brightness.get_untracked()),
                            );
                        }
                    >
                        <div
                            class="pointer-events-none absolute h-1 w-full border-b border-t border-white"
                            style=move || format!("top: {}%;", hue.get() / 360.0 * 100.0)
                        />
                    </div>
                </div>

                <div class="mt-3 grid grid-cols-6 gap-2">
                    {SWATCHES
                        .iter()
                        .map(|hex| {
                            let hex = *hex;
                            view! {
                                <button
                                    type="button"
                                    class="h-6 w-full rounded border border-border transition-transform hover:scale-110"
                                    style=format!("background-color: {hex};")
                                    title=hex
                                    on:mousedown=move |ev: web_sys::MouseEvent| {
                                        hold_selection(&ev);
                                        apply_color(hex.to_string());
                                    }
                                />
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </Show>
    }
}
