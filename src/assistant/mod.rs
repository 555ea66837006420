use regex::Regex;
use std::sync::OnceLock;

/// A task list recovered from a model reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct ParsedTaskList {
    pub title: String,
    pub tasks: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum AssistantReply {
    TaskList(ParsedTaskList),
    /// The reply did not follow the task-list format; show it as-is.
    Display(String),
}

fn task_list_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // CRLF mode: `\r`, `\n` and `\r\n` all end a line, here and in `numbering_re`.
    // Title runs to the end of its line; the task block is one or more `N.` lines,
    // each optionally followed by blank lines. Anything after the last numbered line is
    // left out of the capture.
    RE.get_or_init(|| {
        Regex::new(
            r"(?iR)TITULO:[ \t]*(.+?)[ \t]*(?:\r\n|\n|\r)\s*TAREFAS:\s*((?:[ \t]*\d+\.\s*.+(?:\r\n|\n|\r)*)+)",
        )
        .expect("task list pattern is valid")
    })
}

fn numbering_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?mR)^[ \t]*\d+\.[ \t]*").expect("numbering pattern is valid"))
}

/// Extract `TITULO:` / `TAREFAS:` task lists (case-insensitive).
///
/// Returns `None` when the markers are missing or no non-empty task survives splitting.
pub(crate) fn parse_task_list(reply: &str) -> Option<ParsedTaskList> {
    let caps = task_list_re().captures(reply)?;
    let title = caps.get(1)?.as_str().trim().to_string();
    let block = caps.get(2)?.as_str();

    let tasks = numbering_re()
        .split(block)
        .map(|t| t.trim().replace(['\r', '\n'], ""))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>();

    if title.is_empty() || tasks.is_empty() {
        return None;
    }

    Some(ParsedTaskList { title, tasks })
}

pub(crate) fn interpret_reply(reply: &str) -> AssistantReply {
    match parse_task_list(reply) {
        Some(list) => AssistantReply::TaskList(list),
        None => AssistantReply::Display(reply.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tasks(list: &ParsedTaskList) -> Vec<&str> {
        list.tasks.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn test_parses_basic_reply() {
        let list = parse_task_list("TITULO: Plan trip\nTAREFAS:\n1. Book flight\n2. Pack bags\n")
            .expect("should parse");
        assert_eq!(list.title, "Plan trip");
        assert_eq!(tasks(&list), vec!["Book flight", "Pack bags"]);
    }

    #[test]
    fn test_free_text_falls_back_to_display() {
        let reply = "Sure, here's some advice...";
        assert_eq!(parse_task_list(reply), None);
        assert_eq!(interpret_reply(reply), AssistantReply::Display(reply.to_string()));
    }

    #[test]
    fn test_windows_line_endings() {
        let reply = "TITULO: Estudar Rust\r\nTAREFAS:\r\n1. Ler o livro\r\n2. Fazer exercícios\r\n3. Escrever um projeto\r\n";
        let list = parse_task_list(reply).expect("should parse");
        assert_eq!(list.title, "Estudar Rust");
        assert_eq!(
            tasks(&list),
            vec!["Ler o livro", "Fazer exercícios", "Escrever um projeto"]
        );
    }

    #[test]
    fn test_bare_carriage_returns_split_tasks() {
        let list = parse_task_list("TITULO: X\rTAREFAS:\r1. A\r2. B").expect("should parse");
        assert_eq!(list.title, "X");
        assert_eq!(tasks(&list), vec!["A", "B"]);
    }

    #[test]
    fn test_case_insensitive_markers_and_extra_whitespace() {
        let reply = "titulo:    Limpar a casa   \ntarefas:   \n1.   Varrer  \n2.Lavar louça\n\n3.  Tirar o lixo";
        let list = parse_task_list(reply).expect("should parse");
        assert_eq!(list.title, "Limpar a casa");
        assert_eq!(tasks(&list), vec!["Varrer", "Lavar louça", "Tirar o lixo"]);
    }

    #[test]
    fn test_trailing_commentary_is_ignored() {
        let reply = "TITULO: Treino\nTAREFAS:\n1. Alongar\n2. Correr 5km\n\nBoa sorte com o treino!";
        let list = parse_task_list(reply).expect("should parse");
        assert_eq!(tasks(&list), vec!["Alongar", "Correr 5km"]);
    }

    #[test]
    fn test_leading_commentary_is_ignored() {
        let reply = "Claro! Aqui está:\nTITULO: Mudança\nTAREFAS:\n1. Encaixotar livros";
        let list = parse_task_list(reply).expect("should parse");
        assert_eq!(list.title, "Mudança");
        assert_eq!(tasks(&list), vec!["Encaixotar livros"]);
    }

    #[test]
    fn test_missing_tasks_marker_is_not_a_list() {
        let reply = "TITULO: Algo\n1. Primeiro\n2. Segundo";
        assert_eq!(parse_task_list(reply), None);
    }

    #[test]
    fn test_zero_numbered_lines_is_not_a_list() {
        let reply = "TITULO: Algo\nTAREFAS:\n- Primeiro\n- Segundo";
        assert_eq!(parse_task_list(reply), None);
        assert_eq!(interpret_reply(reply), AssistantReply::Display(reply.to_string()));
    }

    #[test]
    fn test_inline_numbers_do_not_split_a_task() {
        let reply = "TITULO: Finanças\nTAREFAS:\n1. Guardar 2. salário do mês\n2. Pagar 1.5k de contas";
        let list = parse_task_list(reply).expect("should parse");
        assert_eq!(
            tasks(&list),
            vec!["Guardar 2. salário do mês", "Pagar 1.5k de contas"]
        );
    }

    #[test]
    fn test_task_count_matches_numbered_lines() {
        for n in 1..=8usize {
            let mut reply = String::from("TITULO: Lista\nTAREFAS:\n");
            for i in 1..=n {
                reply.push_str(&format!("{i}. tarefa {i}\n"));
            }
            let list = parse_task_list(&reply).expect("should parse");
            assert_eq!(list.tasks.len(), n);
            assert_eq!(list.tasks[n - 1], format!("tarefa {n}"));
        }
    }
}
