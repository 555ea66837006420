use leptos::prelude::*;
use leptos_ui::clx;

mod components {
    use super::*;
    clx! {Card, div, "bg-card text-card-foreground flex flex-col gap-3 rounded-xl border py-4 shadow-sm transition-shadow hover:shadow-md"}
    clx! {CardHeader, div, "flex items-start justify-between gap-2 px-4"}
    clx! {CardTitle, h3, "leading-snug font-semibold"}
    clx! {CardDescription, p, "text-muted-foreground text-xs"}
    clx! {CardContent, div, "px-4"}
    clx! {CardFooter, footer, "flex items-center gap-2 border-t px-4 pt-3"}
}

pub use components::*;
