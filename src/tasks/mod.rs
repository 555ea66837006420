use crate::leveling::{add_experience, experience_for_completion, LevelChange};
use crate::models::{Task, TaskList, UserProgress};
use crate::util::minutes_between;

pub(crate) fn build_task_list(
    id: String,
    title: &str,
    task_texts: &[String],
    video_url: Option<String>,
    now_ms: i64,
    mut task_id: impl FnMut() -> String,
) -> TaskList {
    let tasks = task_texts
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|text| Task {
            id: task_id(),
            text: text.to_string(),
            completed: false,
            created_ms: now_ms,
        })
        .collect();

    TaskList {
        id,
        title: title.trim().to_string(),
        tasks,
        created_ms: now_ms,
        started_ms: None,
        completed_ms: None,
        video_url: video_url.filter(|u| !u.trim().is_empty()),
    }
}

/// New lists go to the top.
pub(crate) fn insert_task_list(lists: &mut Vec<TaskList>, list: TaskList) {
    lists.insert(0, list);
}

/// Flip a task. The first toggle on a list marks when work on it started.
pub(crate) fn toggle_task(lists: &mut [TaskList], list_id: &str, task_id: &str, now_ms: i64) -> bool {
    let Some(list) = lists.iter_mut().find(|l| l.id == list_id) else {
        return false;
    };
    let Some(task) = list.tasks.iter_mut().find(|t| t.id == task_id) else {
        return false;
    };

    task.completed = !task.completed;
    if list.started_ms.is_none() {
        list.started_ms = Some(now_ms);
    }
    true
}

pub(crate) fn delete_task(lists: &mut [TaskList], list_id: &str, task_id: &str) -> bool {
    let Some(list) = lists.iter_mut().find(|l| l.id == list_id) else {
        return false;
    };
    let before = list.tasks.len();
    list.tasks.retain(|t| t.id != task_id);
    list.tasks.len() != before
}

pub(crate) fn delete_task_list(lists: &mut Vec<TaskList>, list_id: &str) -> bool {
    let before = lists.len();
    lists.retain(|l| l.id != list_id);
    lists.len() != before
}

pub(crate) fn all_tasks_done(list: &TaskList) -> bool {
    !list.tasks.is_empty() && list.tasks.iter().all(|t| t.completed)
}

/// Mark a list completed and award XP.
///
/// Returns `None` for unknown or already completed lists; XP is only ever awarded once
/// per list.
pub(crate) fn complete_task_list(
    lists: &mut [TaskList],
    progress: UserProgress,
    list_id: &str,
    now_ms: i64,
) -> Option<LevelChange> {
    let list = lists.iter_mut().find(|l| l.id == list_id)?;
    if list.completed_ms.is_some() {
        return None;
    }

    let started = list.started_ms.unwrap_or(list.created_ms);
    let xp = experience_for_completion(list.tasks.len(), minutes_between(started, now_ms));
    list.completed_ms = Some(now_ms);

    let mut change = add_experience(progress, xp);
    change.progress.completed_task_lists = progress.completed_task_lists.saturating_add(1);
    Some(change)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(now_ms: i64) -> TaskList {
        let mut n = 0;
        build_task_list(
            "list-1".to_string(),
            "  Viagem ",
            &[
                "Comprar passagem".to_string(),
                "   ".to_string(),
                "Fazer as malas".to_string(),
            ],
            Some(String::new()),
            now_ms,
            || {
                n += 1;
                format!("task-{n}")
            },
        )
    }

    #[test]
    fn test_build_task_list_trims_and_skips_blank_tasks() {
        let list = sample(1_000);
        assert_eq!(list.title, "Viagem");
        assert_eq!(list.tasks.len(), 2);
        assert_eq!(list.tasks[0].id, "task-1");
        assert_eq!(list.tasks[1].text, "Fazer as malas");
        assert!(list.video_url.is_none());
        assert!(list.started_ms.is_none());
    }

    #[test]
    fn test_insert_puts_newest_first() {
        let mut lists = vec![sample(1)];
        let mut newer = sample(2);
        newer.id = "list-2".to_string();
        insert_task_list(&mut lists, newer);
        assert_eq!(lists[0].id, "list-2");
    }

    #[test]
    fn test_toggle_stamps_start_once() {
        let mut lists = vec![sample(1_000)];
        assert!(toggle_task(&mut lists, "list-1", "task-1", 5_000));
        assert!(lists[0].tasks[0].completed);
        assert_eq!(lists[0].started_ms, Some(5_000));

        assert!(toggle_task(&mut lists, "list-1", "task-1", 9_000));
        assert!(!lists[0].tasks[0].completed);
        assert_eq!(lists[0].started_ms, Some(5_000));
    }

    #[test]
    fn test_toggle_unknown_ids() {
        let mut lists = vec![sample(1_000)];
        assert!(!toggle_task(&mut lists, "nope", "task-1", 5_000));
        assert!(!toggle_task(&mut lists, "list-1", "nope", 5_000));
        assert!(lists[0].started_ms.is_none());
    }

    #[test]
    fn test_delete_task_and_list() {
        let mut lists = vec![sample(1_000)];
        assert!(delete_task(&mut lists, "list-1", "task-2"));
        assert!(!delete_task(&mut lists, "list-1", "task-2"));
        assert_eq!(lists[0].tasks.len(), 1);

        assert!(delete_task_list(&mut lists, "list-1"));
        assert!(lists.is_empty());
    }

    #[test]
    fn test_all_tasks_done() {
        let mut list = sample(0);
        assert!(!all_tasks_done(&list));
        for t in list.tasks.iter_mut() {
            t.completed = true;
        }
        assert!(all_tasks_done(&list));
        list.tasks.clear();
        assert!(!all_tasks_done(&list));
    }

    #[test]
    fn test_complete_awards_xp_once() {
        let mut lists = vec![sample(0)];
        toggle_task(&mut lists, "list-1", "task-1", 60_000);

        // Ten minutes after starting: 2 tasks * 10 XP + 50% bonus.
        let change = complete_task_list(&mut lists, UserProgress::default(), "list-1", 660_000)
            .expect("first completion awards xp");
        assert_eq!(change.progress.experience, 30);
        assert_eq!(change.progress.completed_task_lists, 1);
        assert_eq!(lists[0].completed_ms, Some(660_000));

        assert!(complete_task_list(&mut lists, change.progress, "list-1", 700_000).is_none());
    }

    #[test]
    fn test_complete_without_start_uses_creation_time() {
        let mut lists = vec![sample(0)];
        let change = complete_task_list(&mut lists, UserProgress::default(), "list-1", 2 * 3_600_000)
            .expect("should complete");
        assert_eq!(change.progress.experience, 20);
    }
}
