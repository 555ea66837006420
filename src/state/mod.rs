mod chat;

pub(crate) use chat::send_chat_prompt;

use crate::api::{ChatClient, EnvConfig};
use crate::assistant::ParsedTaskList;
use crate::i18n::{load_language, save_language, Language};
use crate::models::{
    ActiveTab, AppData, Block, ChatMessage, ChatRole, FreeFormNote, TaskList, UserProgress,
};
use crate::notes::{build_note, delete_note, insert_note, update_note};
use crate::storage::{load_app_data, save_app_data};
use crate::tasks::{
    all_tasks_done, build_task_list, complete_task_list, delete_task, delete_task_list,
    insert_task_list, toggle_task,
};
use crate::util::{new_id, now_ms};
use leptos::logging::log;
use leptos::prelude::*;
use leptos_dom::helpers::set_timeout;
use std::time::Duration;

const CELEBRATION_MS: u64 = 3000;

#[derive(Clone, Copy)]
pub(crate) struct AppState {
    pub chat_client: RwSignal<ChatClient>,
    pub language: RwSignal<Language>,

    /// Persisted with the rest of the data; routing keeps it in sync.
    pub active_tab: RwSignal<ActiveTab>,

    pub task_lists: RwSignal<Vec<TaskList>>,
    pub free_form_notes: RwSignal<Vec<FreeFormNote>>,
    pub user_progress: RwSignal<UserProgress>,

    /// Chat history lives for the session only.
    pub chat_messages: RwSignal<Vec<ChatMessage>>,
    pub chat_loading: RwSignal<bool>,

    /// Level shown by the level-up overlay while it is up.
    pub celebrating_level: RwSignal<Option<u32>>,
}

impl AppState {
    pub fn new() -> Self {
        let data = load_app_data();

        Self {
            chat_client: RwSignal::new(ChatClient::new(EnvConfig::new())),
            language: RwSignal::new(load_language()),
            active_tab: RwSignal::new(data.active_tab),
            task_lists: RwSignal::new(data.task_lists),
            free_form_notes: RwSignal::new(data.free_form_notes),
            user_progress: RwSignal::new(data.user_progress),
            chat_messages: RwSignal::new(vec![]),
            chat_loading: RwSignal::new(false),
            celebrating_level: RwSignal::new(None),
        }
    }

    fn snapshot(&self) -> AppData {
        AppData {
            active_tab: self.active_tab.get_untracked(),
            task_lists: self.task_lists.get_untracked(),
            free_form_notes: self.free_form_notes.get_untracked(),
            user_progress: self.user_progress.get_untracked(),
        }
    }

    fn persist(&self) {
        save_app_data(&self.snapshot());
    }

    pub fn set_language(&self, lang: Language) {
        self.language.set(lang);
        save_language(lang);
    }

    pub fn set_active_tab(&self, tab: ActiveTab) {
        if self.active_tab.get_untracked() != tab {
            self.active_tab.set(tab);
            self.persist();
        }
    }

    pub fn create_task_list(
        &self,
        title: &str,
        tasks: &[String],
        video_url: Option<String>,
    ) -> Option<String> {
        if title.trim().is_empty() || tasks.iter().all(|t| t.trim().is_empty()) {
            return None;
        }

        let list = build_task_list(new_id("list"), title, tasks, video_url, now_ms(), || {
            new_id("task")
        });
        let id = list.id.clone();
        self.task_lists.update(|lists| insert_task_list(lists, list));
        self.persist();
        Some(id)
    }

    /// Store a list the assistant produced and bring the user to it.
    pub fn create_task_list_from_ai(&self, parsed: &ParsedTaskList) -> Option<String> {
        let id = self.create_task_list(&parsed.title, &parsed.tasks, None)?;
        self.set_active_tab(ActiveTab::Notes);
        log!("assistant created task list {id} with {} tasks", parsed.tasks.len());
        Some(id)
    }

    /// Toggle a task; checking the last open one completes the list.
    pub fn toggle_task(&self, list_id: &str, task_id: &str) {
        let now = now_ms();
        let mut finished = false;
        self.task_lists.update(|lists| {
            if toggle_task(lists, list_id, task_id, now) {
                finished = lists
                    .iter()
                    .find(|l| l.id == list_id)
                    .is_some_and(|l| l.completed_ms.is_none() && all_tasks_done(l));
            }
        });

        if finished {
            self.complete_task_list(list_id);
        } else {
            self.persist();
        }
    }

    pub fn delete_task(&self, list_id: &str, task_id: &str) {
        self.task_lists.update(|lists| {
            delete_task(lists, list_id, task_id);
        });
        self.persist();
    }

    pub fn delete_task_list(&self, list_id: &str) {
        self.task_lists.update(|lists| {
            delete_task_list(lists, list_id);
        });
        self.persist();
    }

    pub fn complete_task_list(&self, list_id: &str) {
        let progress = self.user_progress.get_untracked();
        let now = now_ms();
        let mut change = None;
        self.task_lists.update(|lists| {
            change = complete_task_list(lists, progress, list_id, now);
        });

        let Some(change) = change else {
            return;
        };

        log!(
            "task list {list_id} completed: {} xp, level {} -> {}",
            change.progress.experience,
            change.previous_level,
            change.progress.level
        );
        self.user_progress.set(change.progress);
        if change.leveled_up {
            self.celebrate(change.progress.level);
        }
        self.persist();
    }

    fn celebrate(&self, level: u32) {
        self.celebrating_level.set(Some(level));
        let celebrating = self.celebrating_level;
        set_timeout(
            move || {
                // A newer level-up restarts the overlay with its own timer.
                if celebrating.get_untracked() == Some(level) {
                    celebrating.set(None);
                }
            },
            Duration::from_millis(CELEBRATION_MS),
        );
    }

    pub fn create_note(&self, title: &str, blocks: Vec<Block>) -> String {
        let note = build_note(new_id("note"), title, blocks, now_ms());
        let id = note.id.clone();
        self.free_form_notes.update(|notes| insert_note(notes, note));
        self.persist();
        id
    }

    pub fn update_note(&self, id: &str, title: &str, blocks: Vec<Block>) -> bool {
        let now = now_ms();
        let mut updated = false;
        self.free_form_notes.update(|notes| {
            updated = update_note(notes, id, title, blocks, now);
        });
        if updated {
            self.persist();
        }
        updated
    }

    pub fn delete_note(&self, id: &str) {
        self.free_form_notes.update(|notes| {
            delete_note(notes, id);
        });
        self.persist();
    }

    pub fn push_chat_message(&self, role: ChatRole, content: String) {
        let msg = ChatMessage {
            id: new_id("msg"),
            role,
            content,
            timestamp_ms: now_ms(),
        };
        self.chat_messages.update(|m| m.push(msg));
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub(crate) struct AppContext(pub AppState);
