use super::AppState;
use crate::api::ApiResult;
use crate::assistant::{interpret_reply, AssistantReply, ParsedTaskList};
use crate::i18n::{error_message, t, task_list_created_message, Language, Msg};
use crate::models::ChatRole;
use leptos::logging::warn;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::set_timeout;
use std::time::Duration;

/// Pause between announcing a generated list and switching to it.
const CHAT_TASK_LIST_DELAY_MS: u64 = 500;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct BotTurn {
    pub text: String,
    pub task_list: Option<ParsedTaskList>,
}

/// Turn one proxy result into the bot message, plus the list to create when the reply had one.
pub(crate) fn bot_turn(lang: Language, result: ApiResult<Option<String>>) -> BotTurn {
    match result {
        Ok(Some(reply)) => match interpret_reply(&reply) {
            AssistantReply::TaskList(list) => BotTurn {
                text: task_list_created_message(lang, &list.title, list.tasks.len()),
                task_list: Some(list),
            },
            AssistantReply::Display(text) => BotTurn {
                text,
                task_list: None,
            },
        },
        Ok(None) => BotTurn {
            text: t(lang, Msg::CouldNotProcess).to_string(),
            task_list: None,
        },
        Err(e) => BotTurn {
            text: error_message(lang, &e.to_string()),
            task_list: None,
        },
    }
}

/// Send `prompt` unless it is blank or a request is already in flight.
///
/// `on_task_list` runs after a generated list has been stored.
pub(crate) fn send_chat_prompt(
    app_state: AppState,
    prompt: &str,
    on_task_list: impl FnOnce() + 'static,
) -> bool {
    let prompt = prompt.trim().to_string();
    if prompt.is_empty() || app_state.chat_loading.get_untracked() {
        return false;
    }

    app_state.push_chat_message(ChatRole::User, prompt.clone());
    app_state.chat_loading.set(true);
    let client = app_state.chat_client.get_untracked();

    spawn_local(async move {
        let result = client.send_prompt(&prompt).await;
        if let Err(e) = &result {
            warn!("chat request failed: {e}");
        }

        let turn = bot_turn(app_state.language.get_untracked(), result);
        app_state.push_chat_message(ChatRole::Bot, turn.text);
        app_state.chat_loading.set(false);

        if let Some(list) = turn.task_list {
            set_timeout(
                move || {
                    if app_state.create_task_list_from_ai(&list).is_some() {
                        on_task_list();
                    }
                },
                Duration::from_millis(CHAT_TASK_LIST_DELAY_MS),
            );
        }
    });

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind};

    #[test]
    fn test_task_list_reply_is_announced() {
        let turn = bot_turn(
            Language::En,
            Ok(Some("TITULO: Gym\nTAREFAS:\n1. Warm up\n2. Squats".to_string())),
        );
        let list = turn.task_list.expect("list");
        assert_eq!(list.title, "Gym");
        assert_eq!(list.tasks.len(), 2);
        assert!(turn.text.contains("\"Gym\""));
        assert!(turn.text.contains('2'));
    }

    #[test]
    fn test_plain_reply_is_shown_verbatim() {
        let turn = bot_turn(Language::Pt, Ok(Some("Olá! Como posso ajudar?".to_string())));
        assert_eq!(turn.text, "Olá! Como posso ajudar?");
        assert_eq!(turn.task_list, None);
    }

    #[test]
    fn test_empty_reply_uses_fallback() {
        let turn = bot_turn(Language::En, Ok(None));
        assert_eq!(turn.text, t(Language::En, Msg::CouldNotProcess));
    }

    #[test]
    fn test_error_is_prefixed() {
        let err = ApiError {
            kind: ApiErrorKind::Remote,
            message: "quota exceeded".to_string(),
        };
        let turn = bot_turn(Language::Pt, Err(err));
        assert_eq!(turn.text, error_message(Language::Pt, "quota exceeded"));
        assert!(turn.text.starts_with("❌"));
    }
}
