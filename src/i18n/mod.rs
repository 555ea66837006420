use crate::models::BlockKind;
use crate::storage::{load_string_from_storage, save_string_to_storage, LANGUAGE_KEY};
use std::str::FromStr;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, strum::AsRefStr, strum::EnumString, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum Language {
    #[default]
    Pt,
    En,
}

impl Language {
    pub fn label(self) -> &'static str {
        match self {
            Language::Pt => "Português",
            Language::En => "English",
        }
    }
}

pub(crate) fn load_language() -> Language {
    load_string_from_storage(LANGUAGE_KEY)
        .and_then(|s| Language::from_str(&s).ok())
        .unwrap_or_default()
}

pub(crate) fn save_language(lang: Language) {
    save_string_to_storage(LANGUAGE_KEY, lang.as_ref());
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::EnumIter)]
pub(crate) enum Msg {
    Notes,
    AiChat,
    ChatSubtitle,
    ChatWelcomeTitle,
    ChatWelcomeSubtitle,
    Suggestion1,
    Suggestion2,
    Suggestion3,
    Suggestion4,
    AskAi,
    SendPrompt,
    Thinking,
    CreatedTaskList,
    WithTasks,
    Tasks,
    ForYou,
    CouldNotProcess,
    Error,
    LevelUp,
    ReachedLevel,
    Level,
    ListsCompleted,
    Bold,
    Italic,
    Underline,
    TextColor,
    AddLink,
    ColorPicker,
    SelectedText,
    InvalidUrl,
    Apply,
    Save,
    Cancel,
    Add,
    Delete,
    Close,
    Edit,
    EnterTitle,
    TaskLists,
    NewTaskList,
    TaskListTitle,
    TaskPlaceholder,
    VideoUrlOptional,
    NoTaskLists,
    Completed,
    FreeFormNotes,
    NewNote,
    NoNotes,
    Untitled,
    AddBlock,
    TypeSomething,
    Caption,
    AltText,
    PasteUrl,
    InvalidVideoUrl,
    MoveUp,
    MoveDown,
    DraftRestored,
    LanguageLabel,
}

/// Localized text for `msg`.
pub(crate) fn t(lang: Language, msg: Msg) -> &'static str {
    use Language::*;
    use Msg::*;

    match (msg, lang) {
        (Notes, Pt) => "Notas",
        (Notes, En) => "Notes",
        (AiChat, Pt) => "Chat com IA",
        (AiChat, En) => "AI Chat",
        (ChatSubtitle, Pt) => "Seu assistente de produtividade",
        (ChatSubtitle, En) => "Your productivity assistant",
        (ChatWelcomeTitle, Pt) => "Como posso ajudar hoje?",
        (ChatWelcomeTitle, En) => "How can I help today?",
        (ChatWelcomeSubtitle, Pt) => "Peça um plano e eu crio uma lista de tarefas para você.",
        (ChatWelcomeSubtitle, En) => "Ask for a plan and I'll turn it into a task list for you.",
        (Suggestion1, Pt) => "Crie uma rotina de estudos para a semana",
        (Suggestion1, En) => "Create a study routine for the week",
        (Suggestion2, Pt) => "Me ajude a organizar uma mudança de casa",
        (Suggestion2, En) => "Help me organize a house move",
        (Suggestion3, Pt) => "Monte um plano de treino para iniciantes",
        (Suggestion3, En) => "Put together a beginner workout plan",
        (Suggestion4, Pt) => "Quais são as etapas para lançar um blog?",
        (Suggestion4, En) => "What are the steps to launch a blog?",
        (AskAi, Pt) => "Pergunte à IA...",
        (AskAi, En) => "Ask the AI...",
        (SendPrompt, Pt) => "Enviar",
        (SendPrompt, En) => "Send",
        (Thinking, Pt) => "Pensando...",
        (Thinking, En) => "Thinking...",
        (CreatedTaskList, Pt) => "Criei a lista de tarefas",
        (CreatedTaskList, En) => "Created task list",
        (WithTasks, Pt) => "com",
        (WithTasks, En) => "with",
        (Tasks, Pt) => "tarefas",
        (Tasks, En) => "tasks",
        (ForYou, Pt) => "para você!",
        (ForYou, En) => "for you!",
        (CouldNotProcess, Pt) => "Desculpe, não consegui processar sua solicitação agora.",
        (CouldNotProcess, En) => "Sorry, I couldn't process your request right now.",
        (Error, Pt) => "Erro",
        (Error, En) => "Error",
        (LevelUp, Pt) => "Subiu de nível!",
        (LevelUp, En) => "Level up!",
        (ReachedLevel, Pt) => "Você alcançou o nível",
        (ReachedLevel, En) => "You reached level",
        (Level, Pt) => "Nível",
        (Level, En) => "Level",
        (ListsCompleted, Pt) => "listas concluídas",
        (ListsCompleted, En) => "lists completed",
        (Bold, Pt) => "Negrito",
        (Bold, En) => "Bold",
        (Italic, Pt) => "Itálico",
        (Italic, En) => "Italic",
        (Underline, Pt) => "Sublinhado",
        (Underline, En) => "Underline",
        (TextColor, Pt) => "Cor do texto",
        (TextColor, En) => "Text color",
        (AddLink, Pt) => "Adicionar link",
        (AddLink, En) => "Add link",
        (ColorPicker, Pt) => "Seletor de cores",
        (ColorPicker, En) => "Color picker",
        (SelectedText, Pt) => "Texto selecionado",
        (SelectedText, En) => "Selected text",
        (InvalidUrl, Pt) => "Digite uma URL válida",
        (InvalidUrl, En) => "Enter a valid URL",
        (Apply, Pt) => "Aplicar",
        (Apply, En) => "Apply",
        (Save, Pt) => "Salvar",
        (Save, En) => "Save",
        (Cancel, Pt) => "Cancelar",
        (Cancel, En) => "Cancel",
        (Add, Pt) => "Adicionar",
        (Add, En) => "Add",
        (Delete, Pt) => "Excluir",
        (Delete, En) => "Delete",
        (Close, Pt) => "Fechar",
        (Close, En) => "Close",
        (Edit, Pt) => "Editar",
        (Edit, En) => "Edit",
        (EnterTitle, Pt) => "Digite um título...",
        (EnterTitle, En) => "Enter a title...",
        (TaskLists, Pt) => "Listas de tarefas",
        (TaskLists, En) => "Task lists",
        (NewTaskList, Pt) => "Nova lista",
        (NewTaskList, En) => "New list",
        (TaskListTitle, Pt) => "Título da lista",
        (TaskListTitle, En) => "List title",
        (TaskPlaceholder, Pt) => "Uma tarefa por linha",
        (TaskPlaceholder, En) => "One task per line",
        (VideoUrlOptional, Pt) => "URL de vídeo (opcional)",
        (VideoUrlOptional, En) => "Video URL (optional)",
        (NoTaskLists, Pt) => "Nenhuma lista ainda. Crie uma ou peça ao chat.",
        (NoTaskLists, En) => "No lists yet. Create one or ask the chat.",
        (Completed, Pt) => "Concluída",
        (Completed, En) => "Completed",
        (FreeFormNotes, Pt) => "Notas livres",
        (FreeFormNotes, En) => "Free-form notes",
        (NewNote, Pt) => "Nova nota",
        (NewNote, En) => "New note",
        (NoNotes, Pt) => "Nenhuma nota ainda.",
        (NoNotes, En) => "No notes yet.",
        (Untitled, Pt) => "Sem título",
        (Untitled, En) => "Untitled",
        (AddBlock, Pt) => "Adicionar bloco",
        (AddBlock, En) => "Add block",
        (TypeSomething, Pt) => "Digite algo...",
        (TypeSomething, En) => "Type something...",
        (Caption, Pt) => "Legenda",
        (Caption, En) => "Caption",
        (AltText, Pt) => "Texto alternativo",
        (AltText, En) => "Alt text",
        (PasteUrl, Pt) => "Cole uma URL e pressione Enter",
        (PasteUrl, En) => "Paste a URL and press Enter",
        (InvalidVideoUrl, Pt) => "Só vídeos do YouTube ou Vimeo",
        (InvalidVideoUrl, En) => "Only YouTube or Vimeo videos",
        (MoveUp, Pt) => "Mover para cima",
        (MoveUp, En) => "Move up",
        (MoveDown, Pt) => "Mover para baixo",
        (MoveDown, En) => "Move down",
        (DraftRestored, Pt) => "Rascunho não salvo restaurado",
        (DraftRestored, En) => "Unsaved draft restored",
        (LanguageLabel, Pt) => "Idioma",
        (LanguageLabel, En) => "Language",
    }
}

pub(crate) fn block_kind_label(lang: Language, kind: BlockKind) -> &'static str {
    use Language::*;

    match (kind, lang) {
        (BlockKind::Text, Pt) => "Texto",
        (BlockKind::Text, En) => "Text",
        (BlockKind::Heading1, Pt) => "Título 1",
        (BlockKind::Heading1, En) => "Heading 1",
        (BlockKind::Heading2, Pt) => "Título 2",
        (BlockKind::Heading2, En) => "Heading 2",
        (BlockKind::Heading3, Pt) => "Título 3",
        (BlockKind::Heading3, En) => "Heading 3",
        (BlockKind::Bullet, Pt) => "Lista",
        (BlockKind::Bullet, En) => "Bulleted list",
        (BlockKind::Numbered, Pt) => "Lista numerada",
        (BlockKind::Numbered, En) => "Numbered list",
        (BlockKind::Checklist, Pt) => "Checklist",
        (BlockKind::Checklist, En) => "Checklist",
        (BlockKind::Quote, Pt) => "Citação",
        (BlockKind::Quote, En) => "Quote",
        (BlockKind::Code, Pt) => "Código",
        (BlockKind::Code, En) => "Code",
        (BlockKind::Image, Pt) => "Imagem",
        (BlockKind::Image, En) => "Image",
        (BlockKind::Video, Pt) => "Vídeo",
        (BlockKind::Video, En) => "Video",
        (BlockKind::Link, _) => "Link",
        (BlockKind::Gif, _) => "GIF",
        (BlockKind::Divider, Pt) => "Divisor",
        (BlockKind::Divider, En) => "Divider",
    }
}

/// `Created task list: "<title>" with <n> tasks for you!`
pub(crate) fn task_list_created_message(lang: Language, title: &str, count: usize) -> String {
    format!(
        "{}: \"{}\" {} {} {} {}",
        t(lang, Msg::CreatedTaskList),
        title,
        t(lang, Msg::WithTasks),
        count,
        t(lang, Msg::Tasks),
        t(lang, Msg::ForYou)
    )
}

pub(crate) fn error_message(lang: Language, detail: &str) -> String {
    format!("❌ {}: {}", t(lang, Msg::Error), detail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_every_message_is_translated() {
        for lang in Language::iter() {
            for msg in Msg::iter() {
                assert!(!t(lang, msg).trim().is_empty(), "{msg:?} missing for {lang:?}");
            }
            for kind in BlockKind::iter() {
                assert!(!block_kind_label(lang, kind).is_empty());
            }
        }
    }

    #[test]
    fn test_language_codes() {
        assert_eq!(Language::default(), Language::Pt);
        assert_eq!(Language::En.as_ref(), "en");
        assert_eq!(Language::from_str("pt"), Ok(Language::Pt));
        assert!(Language::from_str("fr").is_err());
    }

    #[test]
    fn test_task_list_created_message() {
        assert_eq!(
            task_list_created_message(Language::En, "Plan trip", 2),
            "Created task list: \"Plan trip\" with 2 tasks for you!"
        );
        assert_eq!(
            task_list_created_message(Language::Pt, "Viagem", 3),
            "Criei a lista de tarefas: \"Viagem\" com 3 tarefas para você!"
        );
    }

    #[test]
    fn test_error_message_prefix() {
        assert_eq!(error_message(Language::Pt, "timeout"), "❌ Erro: timeout");
    }
}
