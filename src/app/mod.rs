use crate::pages::{AppLayout, ChatPage, NotesPage};
use crate::state::{AppContext, AppState};
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

#[component]
pub fn App() -> impl IntoView {
    provide_context(AppContext(AppState::new()));

    view! {
        <Router>
            <Routes fallback=|| view! {
                <AppLayout>
                    <NotesPage />
                </AppLayout>
            }>
                <Route path=path!("chat") view=move || view! {
                    <AppLayout>
                        <ChatPage />
                    </AppLayout>
                } />
                <Route path=path!("") view=move || view! {
                    <AppLayout>
                        <NotesPage />
                    </AppLayout>
                } />
            </Routes>
        </Router>
    }
}
