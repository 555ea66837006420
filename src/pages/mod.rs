mod chat;
mod layout;
mod notes;
mod progress;

pub use chat::ChatPage;
pub use layout::AppLayout;
pub use notes::NotesPage;
