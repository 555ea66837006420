use leptos::prelude::*;
use tw_merge::*;

#[component]
pub fn Separator(
    #[prop(into, optional)] orientation: Signal<SeparatorOrientation>,
    #[prop(into, optional)] class: String,
) -> impl IntoView {
    let merged_class = move || {
        SeparatorClass {
            orientation: orientation.get(),
        }
        .with_class(class.clone())
    };

    view! { <div class=merged_class role="separator" aria-orientation=move || orientation.get().aria() /> }
}

#[derive(TwClass, Default)]
#[tw(class = "shrink-0 bg-border")]
pub struct SeparatorClass {
    orientation: SeparatorOrientation,
}

#[derive(TwVariant)]
pub enum SeparatorOrientation {
    #[tw(default, class = "h-px w-full")]
    Horizontal,
    #[tw(class = "w-px self-stretch")]
    Vertical,
}

impl SeparatorOrientation {
    fn aria(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}
