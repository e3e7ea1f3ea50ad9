use chrono::NaiveDate;

use crate::config::Palette;
use crate::datetime::days_until;
use crate::task::{Category, Priority, Task, TaskDraft, TaskId};

/// Which rule picked a card's accent color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Done,
    Overdue,
    Priority(Priority),
}

impl Accent {
    /// Completed wins over overdue, overdue wins over priority.
    pub fn for_task(task: &Task, today: NaiveDate) -> Self {
        if task.completed {
            Accent::Done
        } else if task.is_overdue(today) {
            Accent::Overdue
        } else {
            Accent::Priority(task.priority)
        }
    }

    pub fn color(self, palette: &Palette) -> &str {
        match self {
            Accent::Done => &palette.done,
            Accent::Overdue => &palette.overdue,
            Accent::Priority(priority) => palette.priority(priority),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    Overdue,
    Today,
    Tomorrow,
    InDays(i64),
}

impl DueStatus {
    pub fn for_date(due: NaiveDate, today: NaiveDate) -> Self {
        match days_until(due, today) {
            n if n < 0 => DueStatus::Overdue,
            0 => DueStatus::Today,
            1 => DueStatus::Tomorrow,
            n => DueStatus::InDays(n),
        }
    }

    pub fn label(self) -> String {
        match self {
            DueStatus::Overdue => "Overdue".to_string(),
            DueStatus::Today => "Due Today".to_string(),
            DueStatus::Tomorrow => "Due Tomorrow".to_string(),
            DueStatus::InDays(n) => format!("{n} days"),
        }
    }

    pub fn is_overdue(self) -> bool {
        self == DueStatus::Overdue
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DueBadge {
    pub status: DueStatus,
    pub label: String,
}

/// Everything needed to draw one task, computed from a read-only snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    pub id: TaskId,
    pub title: String,
    pub description: Option<String>,
    pub category: Category,
    pub priority: Priority,
    pub completed: bool,
    pub accent: Accent,
    pub accent_color: String,
    pub due: Option<DueBadge>,
    /// Present while the card is in inline edit mode.
    pub editing: Option<TaskDraft>,
}

impl TaskCard {
    pub fn build(task: &Task, today: NaiveDate, palette: &Palette, editing: Option<&TaskDraft>) -> Self {
        let accent = Accent::for_task(task, today);
        let description = if task.description.is_empty() {
            None
        } else {
            Some(task.description.clone())
        };
        let due = task.due_date.map(|date| {
            let status = DueStatus::for_date(date, today);
            DueBadge {
                status,
                label: status.label(),
            }
        });

        Self {
            id: task.id,
            title: task.title.clone(),
            description,
            category: task.category,
            priority: task.priority,
            completed: task.completed,
            accent,
            accent_color: accent.color(palette).to_string(),
            due,
            editing: editing.cloned(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
    }

    fn task(priority: Priority, due: Option<NaiveDate>, completed: bool) -> Task {
        Task {
            id: TaskId(1),
            title: "Finish report".to_string(),
            description: String::new(),
            category: Category::Work,
            priority,
            due_date: due,
            completed,
            created_at: Utc
                .with_ymd_and_hms(2026, 3, 1, 8, 0, 0)
                .single()
                .expect("valid timestamp"),
        }
    }

    fn days(n: i64) -> Option<NaiveDate> {
        Some(today() + chrono::Duration::days(n))
    }

    #[test]
    fn accent_precedence_is_done_then_overdue_then_priority() {
        let palette = Palette::default();

        let done_and_late = task(Priority::Low, days(-3), true);
        assert_eq!(Accent::for_task(&done_and_late, today()), Accent::Done);

        let late = task(Priority::Medium, days(-1), false);
        let card = TaskCard::build(&late, today(), &palette, None);
        assert_eq!(card.accent, Accent::Overdue);
        assert_eq!(card.accent_color, "#EF4444");

        let due_today = task(Priority::High, days(0), false);
        let card = TaskCard::build(&due_today, today(), &palette, None);
        assert_eq!(card.accent, Accent::Priority(Priority::High));
        assert_eq!(card.accent_color, "#F97316");
    }

    #[test]
    fn due_badge_labels() {
        assert_eq!(DueStatus::for_date(today() - chrono::Duration::days(1), today()).label(), "Overdue");
        assert_eq!(DueStatus::for_date(today(), today()).label(), "Due Today");
        assert_eq!(
            DueStatus::for_date(today() + chrono::Duration::days(1), today()).label(),
            "Due Tomorrow"
        );
        assert_eq!(DueStatus::for_date(today() + chrono::Duration::days(5), today()).label(), "5 days");
        assert!(DueStatus::Overdue.is_overdue());
        assert!(!DueStatus::Today.is_overdue());
    }

    #[test]
    fn empty_description_and_missing_due_date_are_omitted() {
        let card = TaskCard::build(&task(Priority::Low, None, false), today(), &Palette::default(), None);
        assert_eq!(card.description, None);
        assert_eq!(card.due, None);
        assert!(!card.is_editing());

        let mut described = task(Priority::Low, days(2), false);
        described.description = "quarterly numbers".to_string();
        let draft = described.to_draft();
        let card = TaskCard::build(&described, today(), &Palette::default(), Some(&draft));
        assert_eq!(card.description.as_deref(), Some("quarterly numbers"));
        assert_eq!(card.due.as_ref().map(|d| d.label.as_str()), Some("2 days"));
        assert!(card.is_editing());
    }
}
