use std::collections::BTreeMap;

use chrono::{
  DateTime,
  NaiveDate,
  Utc
};
use tracing::{
  debug,
  error,
  info,
  warn
};

use crate::config::Config;
use crate::datetime::today_in;
use crate::render::TaskCard;
use crate::storage::KeyValueStore;
use crate::store::TaskStore;
use crate::task::{
  Task,
  TaskDraft,
  TaskId
};
use crate::view::{
  Filter,
  Progress,
  SortKey,
  filter_counts,
  visible_tasks
};

/// Everything the UI draws after a
/// refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
  pub cards:         Vec<TaskCard>,
  pub progress:      Progress,
  pub filter:        Filter,
  pub sort:          SortKey,
  pub counts:        Vec<(Filter, usize)>,
  pub empty_message: String,
  pub notice:        Option<String>
}

impl Board {
  pub fn is_empty(&self) -> bool {
    self.cards.is_empty()
  }
}

/// Application state for one running UI:
/// the store plus the transient view and
/// form selections.
#[derive(Debug)]
pub struct Session<S> {
  store:   TaskStore<S>,
  config:  Config,
  filter:  Filter,
  sort:    SortKey,
  draft:   TaskDraft,
  editing: BTreeMap<TaskId, TaskDraft>,
  notice:  Option<String>
}

impl<S: KeyValueStore> Session<S> {
  #[tracing::instrument(skip(
    backend, config
  ))]
  pub fn open(
    backend: S,
    config: Config
  ) -> Self {
    let store = TaskStore::load(
      backend,
      &config.storage.tasks_key
    );

    let mut filter = Filter::default();
    let mut sort = config.default_sort();
    if config.view.remember_selection {
      if let Some(saved) = read_key(
        store.backend(),
        &config.storage.filter_key
      )
      .and_then(|raw| {
        Filter::from_key(raw.trim())
      }) {
        filter = saved;
      }
      if let Some(saved) = read_key(
        store.backend(),
        &config.storage.sort_key
      )
      .and_then(|raw| {
        SortKey::from_key(raw.trim())
      }) {
        sort = saved;
      }
    }

    info!(
      tasks = store.tasks().len(),
      filter = filter.as_key(),
      sort = sort.as_key(),
      "opened session"
    );

    Self {
      store,
      config,
      filter,
      sort,
      draft: TaskDraft::default(),
      editing: BTreeMap::new(),
      notice: None
    }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn tasks(&self) -> &[Task] {
    self.store.tasks()
  }

  pub fn store(&self) -> &TaskStore<S> {
    &self.store
  }

  pub fn filter(&self) -> Filter {
    self.filter
  }

  pub fn sort(&self) -> SortKey {
    self.sort
  }

  pub fn notice(&self) -> Option<&str> {
    self.notice.as_deref()
  }

  pub fn draft(&self) -> &TaskDraft {
    &self.draft
  }

  pub fn draft_mut(
    &mut self
  ) -> &mut TaskDraft {
    &mut self.draft
  }

  /// Adds a task from the form. Clears
  /// the form on success; a blank title
  /// leaves it untouched.
  pub fn submit_draft(
    &mut self,
    now: DateTime<Utc>
  ) -> Option<TaskId> {
    let result =
      self.store.add(&self.draft, now);
    let added = self.settle(
      "add task",
      result
    )
    .flatten();
    if added.is_some() {
      self.draft = TaskDraft::default();
    }
    added
  }

  pub fn select_filter(
    &mut self,
    filter: Filter
  ) {
    debug!(
      filter = filter.as_key(),
      "filter selected"
    );
    self.filter = filter;
    if self.config.view.remember_selection {
      let key =
        self.config.storage.filter_key.clone();
      self.remember(&key, filter.as_key());
    }
  }

  pub fn select_sort(
    &mut self,
    sort: SortKey
  ) {
    debug!(
      sort = sort.as_key(),
      "sort selected"
    );
    self.sort = sort;
    if self.config.view.remember_selection {
      let key =
        self.config.storage.sort_key.clone();
      self.remember(&key, sort.as_key());
    }
  }

  pub fn toggle(
    &mut self,
    id: TaskId
  ) -> bool {
    let result =
      self.store.toggle_complete(id);
    self
      .settle("toggle task", result)
      .unwrap_or(false)
  }

  pub fn delete(
    &mut self,
    id: TaskId
  ) -> bool {
    self.editing.remove(&id);
    let result = self.store.delete(id);
    self
      .settle("delete task", result)
      .unwrap_or(false)
  }

  /// Puts the card into edit mode with the
  /// task's current values.
  pub fn begin_edit(
    &mut self,
    id: TaskId
  ) -> bool {
    let Some(task) = self.store.get(id)
    else {
      return false;
    };
    let draft = task.to_draft();
    self.editing.insert(id, draft);
    true
  }

  pub fn is_editing(
    &self,
    id: TaskId
  ) -> bool {
    self.editing.contains_key(&id)
  }

  pub fn edit_draft_mut(
    &mut self,
    id: TaskId
  ) -> Option<&mut TaskDraft> {
    self.editing.get_mut(&id)
  }

  /// Applies all five edited fields and
  /// leaves edit mode.
  pub fn save_edit(
    &mut self,
    id: TaskId
  ) -> bool {
    let Some(draft) =
      self.editing.remove(&id)
    else {
      return false;
    };
    let result = self
      .store
      .update(id, draft.into_patch());
    self
      .settle("save edit", result)
      .unwrap_or(false)
  }

  pub fn cancel_edit(
    &mut self,
    id: TaskId
  ) {
    if self.editing.remove(&id).is_some() {
      debug!(%id, "edit cancelled");
    }
  }

  pub fn dismiss_notice(&mut self) {
    self.notice = None;
  }

  /// Recomputes the whole view from the
  /// current list and selections.
  pub fn board(
    &self,
    today: NaiveDate
  ) -> Board {
    let tasks = self.store.tasks();
    let palette = &self.config.palette;
    let cards = visible_tasks(
      tasks,
      self.filter,
      self.sort
    )
    .into_iter()
    .map(|task| {
      TaskCard::build(
        task,
        today,
        palette,
        self.editing.get(&task.id)
      )
    })
    .collect();

    Board {
      cards,
      progress: Progress::of(tasks),
      filter: self.filter,
      sort: self.sort,
      counts: filter_counts(tasks),
      empty_message: self
        .config
        .view
        .empty_message
        .clone(),
      notice: self.notice.clone()
    }
  }

  /// Calendar date used for due badges.
  pub fn today(
    &self,
    now: DateTime<Utc>
  ) -> NaiveDate {
    today_in(self.config.timezone(), now)
  }

  fn settle<T>(
    &mut self,
    action: &str,
    result: anyhow::Result<T>
  ) -> Option<T> {
    match result {
      | Ok(value) => {
        self.notice = None;
        Some(value)
      }
      | Err(err) => {
        error!(
          action,
          error = %format!("{err:#}"),
          "failed to save tasks"
        );
        self.notice = Some(
          "Changes could not be saved to \
           browser storage. They will be \
           lost when this page closes."
            .to_string()
        );
        None
      }
    }
  }

  fn remember(
    &mut self,
    key: &str,
    value: &str
  ) {
    if let Err(err) =
      self.store.backend_mut().set(key, value)
    {
      warn!(
        key,
        error = %err,
        "failed to remember view selection"
      );
    }
  }
}

fn read_key<S: KeyValueStore>(
  backend: &S,
  key: &str
) -> Option<String> {
  match backend.get(key) {
    | Ok(value) => value,
    | Err(err) => {
      warn!(
        key,
        error = %err,
        "failed to read view selection"
      );
      None
    }
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;
  use std::rc::Rc;

  use chrono::TimeZone;

  use super::*;
  use crate::storage::MemoryStore;
  use crate::task::{
    Category,
    Priority
  };

  fn now() -> DateTime<Utc> {
    Utc
      .with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
      .single()
      .expect("valid timestamp")
  }

  fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2)
      .expect("valid date")
  }

  fn session() -> Session<MemoryStore> {
    Session::open(
      MemoryStore::new(),
      Config::default()
    )
  }

  fn add(
    session: &mut Session<MemoryStore>,
    title: &str
  ) -> TaskId {
    session.draft_mut().title =
      title.to_string();
    session
      .submit_draft(now())
      .expect("task added")
  }

  #[test]
  fn submit_resets_form_to_defaults() {
    let mut session = session();
    {
      let draft = session.draft_mut();
      draft.title = "Buy milk".to_string();
      draft.description =
        "oat".to_string();
      draft.category = Category::Shopping;
      draft.priority = Priority::Low;
      draft.due_date = Some(today());
    }

    assert!(
      session.submit_draft(now()).is_some()
    );
    assert_eq!(
      session.draft(),
      &TaskDraft::default()
    );
    assert_eq!(
      session.draft().category,
      Category::Personal
    );
    assert_eq!(
      session.draft().priority,
      Priority::Medium
    );
  }

  #[test]
  fn blank_submit_keeps_form() {
    let mut session = session();
    session.draft_mut().title =
      "   ".to_string();
    session.draft_mut().description =
      "notes".to_string();

    assert!(
      session.submit_draft(now()).is_none()
    );
    assert_eq!(
      session.draft().description,
      "notes"
    );
    assert!(session.tasks().is_empty());
  }

  #[test]
  fn edit_save_applies_patch_and_cancel_discards()
  {
    let mut session = session();
    let id = add(&mut session, "Draft");

    assert!(session.begin_edit(id));
    if let Some(draft) =
      session.edit_draft_mut(id)
    {
      draft.title = "Renamed".to_string();
      draft.priority = Priority::Urgent;
    }
    let board = session.board(today());
    assert!(board.cards[0].is_editing());
    assert_eq!(
      board.cards[0].title,
      "Draft"
    );

    assert!(session.save_edit(id));
    assert!(!session.is_editing(id));
    let task = &session.tasks()[0];
    assert_eq!(task.title, "Renamed");
    assert_eq!(
      task.priority,
      Priority::Urgent
    );

    assert!(session.begin_edit(id));
    if let Some(draft) =
      session.edit_draft_mut(id)
    {
      draft.title = "Discarded".to_string();
    }
    session.cancel_edit(id);
    assert!(!session.is_editing(id));
    assert_eq!(
      session.tasks()[0].title,
      "Renamed"
    );
  }

  #[test]
  fn begin_edit_on_unknown_id_is_rejected()
  {
    let mut session = session();
    assert!(!session.begin_edit(TaskId(42)));
    assert!(!session.save_edit(TaskId(42)));
  }

  #[test]
  fn selections_are_remembered_across_sessions()
  {
    let mut first = session();
    first.select_filter(Filter::Category(
      Category::Health
    ));
    first.select_sort(SortKey::DueDate);

    let backend =
      first.store().backend().clone();
    let second = Session::open(
      backend,
      Config::default()
    );
    assert_eq!(
      second.filter(),
      Filter::Category(Category::Health)
    );
    assert_eq!(
      second.sort(),
      SortKey::DueDate
    );
  }

  #[test]
  fn forgetful_config_ignores_stored_selection()
  {
    let mut config = Config::default();
    config.view.remember_selection = false;
    config.view.default_sort =
      "priority".to_string();
    let backend = MemoryStore::with_entry(
      &config.storage.filter_key,
      "Completed"
    );

    let session =
      Session::open(backend, config);
    assert_eq!(session.filter(), Filter::All);
    assert_eq!(
      session.sort(),
      SortKey::Priority
    );
  }

  #[test]
  fn empty_board_reports_placeholder() {
    let session = session();
    let board = session.board(today());
    assert!(board.is_empty());
    assert_eq!(
      board.empty_message,
      "No tasks found. Add your first \
       task above!"
    );
    assert_eq!(
      board.progress.summary(),
      "0 of 0 tasks completed"
    );
  }

  #[test]
  fn deleting_an_edited_task_drops_its_draft()
  {
    let mut session = session();
    let id = add(&mut session, "Temp");
    assert!(session.begin_edit(id));
    assert!(session.delete(id));
    assert!(!session.is_editing(id));
    assert!(session.board(today()).is_empty());
  }

  /// Memory backend whose writes can be
  /// switched off from outside the session.
  struct FlakyStore {
    inner:   MemoryStore,
    failing: Rc<Cell<bool>>
  }

  impl KeyValueStore for FlakyStore {
    fn get(
      &self,
      key: &str
    ) -> anyhow::Result<Option<String>> {
      self.inner.get(key)
    }

    fn set(
      &mut self,
      key: &str,
      value: &str
    ) -> anyhow::Result<()> {
      if self.failing.get() {
        anyhow::bail!("quota exceeded");
      }
      self.inner.set(key, value)
    }
  }

  #[test]
  fn write_failure_raises_notice_until_next_good_write()
  {
    let failing = Rc::new(Cell::new(false));
    let mut session = Session::open(
      FlakyStore {
        inner:   MemoryStore::new(),
        failing: failing.clone()
      },
      Config::default()
    );
    session.draft_mut().title =
      "Buy milk".to_string();
    let id = session
      .submit_draft(now())
      .expect("task added");
    assert_eq!(
      session.board(today()).notice,
      None
    );

    failing.set(true);
    assert!(!session.toggle(id));
    assert!(session.tasks()[0].completed);
    assert!(
      session.board(today()).notice.is_some()
    );

    failing.set(false);
    assert!(session.toggle(id));
    assert_eq!(
      session.board(today()).notice,
      None
    );

    failing.set(true);
    session.delete(id);
    assert!(session.notice().is_some());
    session.dismiss_notice();
    assert_eq!(
      session.board(today()).notice,
      None
    );
  }
}
