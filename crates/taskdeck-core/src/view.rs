use std::cmp::Ordering;

use crate::task::{
  Category,
  Task
};

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
)]
pub enum Filter {
  #[default]
  All,
  Active,
  Completed,
  Category(Category)
}

impl Filter {
  /// Every selectable filter, in button
  /// order.
  pub fn all() -> Vec<Filter> {
    let mut filters = vec![
      Filter::All,
      Filter::Active,
      Filter::Completed,
    ];
    filters.extend(
      Category::ALL
        .into_iter()
        .map(Filter::Category)
    );
    filters
  }

  pub fn as_key(self) -> &'static str {
    match self {
      | Filter::All => "All",
      | Filter::Active => "Active",
      | Filter::Completed => "Completed",
      | Filter::Category(category) => {
        category.as_key()
      }
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    match key {
      | "All" => Some(Filter::All),
      | "Active" => Some(Filter::Active),
      | "Completed" => {
        Some(Filter::Completed)
      }
      | other => {
        Category::from_key(other)
          .map(Filter::Category)
      }
    }
  }

  pub fn matches(
    self,
    task: &Task
  ) -> bool {
    match self {
      | Filter::All => true,
      | Filter::Active => !task.completed,
      | Filter::Completed => task.completed,
      | Filter::Category(category) => {
        task.category == category
      }
    }
  }
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
  Hash,
)]
pub enum SortKey {
  #[default]
  Created,
  Priority,
  DueDate
}

impl SortKey {
  pub const ALL: [SortKey; 3] = [
    SortKey::Created,
    SortKey::Priority,
    SortKey::DueDate
  ];

  pub fn as_key(self) -> &'static str {
    match self {
      | SortKey::Created => "created",
      | SortKey::Priority => "priority",
      | SortKey::DueDate => "dueDate"
    }
  }

  pub fn from_key(
    key: &str
  ) -> Option<Self> {
    Self::ALL
      .into_iter()
      .find(|sort| sort.as_key() == key)
  }

  pub fn label(self) -> &'static str {
    match self {
      | SortKey::Created => {
        "Date Created"
      }
      | SortKey::Priority => "Priority",
      | SortKey::DueDate => "Due Date"
    }
  }

  /// Primary ordering for this key. Ties
  /// fall through to newest id first.
  fn compare(
    self,
    a: &Task,
    b: &Task
  ) -> Ordering {
    let primary = match self {
      | SortKey::Priority => {
        b.priority.rank().cmp(
          &a.priority.rank()
        )
      }
      | SortKey::DueDate => {
        match (a.due_date, b.due_date) {
          | (Some(x), Some(y)) => x.cmp(&y),
          | (Some(_), None) => {
            Ordering::Less
          }
          | (None, Some(_)) => {
            Ordering::Greater
          }
          | (None, None) => {
            Ordering::Equal
          }
        }
      }
      | SortKey::Created => {
        b.created_at.cmp(&a.created_at)
      }
    };

    primary.then_with(|| b.id.cmp(&a.id))
  }
}

/// Tasks matching `filter`, in `sort`
/// order. Never touches the source list.
pub fn visible_tasks<'a>(
  tasks: &'a [Task],
  filter: Filter,
  sort: SortKey
) -> Vec<&'a Task> {
  let mut visible: Vec<&Task> = tasks
    .iter()
    .filter(|task| filter.matches(task))
    .collect();
  visible.sort_by(|a, b| {
    sort.compare(a, b)
  });
  visible
}

#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct Progress {
  pub completed: usize,
  pub total:     usize
}

impl Progress {
  pub fn of(tasks: &[Task]) -> Self {
    Self {
      completed: tasks
        .iter()
        .filter(|task| task.completed)
        .count(),
      total:     tasks.len()
    }
  }

  pub fn summary(&self) -> String {
    format!(
      "{} of {} tasks completed",
      self.completed, self.total
    )
  }

  /// Completed share in `0.0..=100.0`.
  pub fn percent(&self) -> f64 {
    if self.total == 0 {
      return 0.0;
    }
    self.completed as f64 * 100.0
      / self.total as f64
  }
}

/// Match count for every filter button.
pub fn filter_counts(
  tasks: &[Task]
) -> Vec<(Filter, usize)> {
  Filter::all()
    .into_iter()
    .map(|filter| {
      let count = tasks
        .iter()
        .filter(|task| filter.matches(task))
        .count();
      (filter, count)
    })
    .collect()
}
