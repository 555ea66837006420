use crate::models::UserProgress;

pub(crate) const XP_PER_LEVEL: u32 = 100;
const XP_PER_TASK: u32 = 10;

/// XP for finishing a task list of `task_count` tasks in `minutes`.
///
/// Quick finishes earn a bonus on top of the per-task base: +50% under 15 minutes,
/// +25% under an hour.
pub(crate) fn experience_for_completion(task_count: usize, minutes: u32) -> u32 {
    let base = (task_count as u32).saturating_mul(XP_PER_TASK);
    let bonus = if minutes < 15 {
        base / 2
    } else if minutes < 60 {
        base / 4
    } else {
        0
    };
    base.saturating_add(bonus)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct LevelChange {
    pub progress: UserProgress,
    pub previous_level: u32,
    pub leveled_up: bool,
}

pub(crate) fn level_for_experience(experience: u32) -> u32 {
    experience / XP_PER_LEVEL
}

pub(crate) fn add_experience(progress: UserProgress, xp: u32) -> LevelChange {
    let experience = progress.experience.saturating_add(xp);
    let level = level_for_experience(experience);

    LevelChange {
        progress: UserProgress {
            level,
            experience,
            experience_to_next: XP_PER_LEVEL - experience % XP_PER_LEVEL,
            completed_task_lists: progress.completed_task_lists,
        },
        previous_level: progress.level,
        leveled_up: level > progress.level,
    }
}

/// Fill of the level bar, 0..=99.
pub(crate) fn level_progress_percent(progress: &UserProgress) -> u32 {
    progress.experience % XP_PER_LEVEL
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum MascotMood {
    Neutral,
    Happy,
    Excellent,
}

pub(crate) fn mascot_mood(level: u32) -> MascotMood {
    if level >= 5 {
        MascotMood::Excellent
    } else if level >= 2 {
        MascotMood::Happy
    } else {
        MascotMood::Neutral
    }
}
