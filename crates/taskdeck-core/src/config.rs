use anyhow::Context;
use chrono_tz::Tz;
use serde::Deserialize;
use tracing::{
  debug,
  warn
};

use crate::datetime::parse_timezone;
use crate::task::Priority;
use crate::view::SortKey;

pub const DEFAULT_TASKS_KEY: &str =
  "todo-tasks";
pub const DEFAULT_FILTER_KEY: &str =
  "taskdeck.filter";
pub const DEFAULT_SORT_KEY: &str =
  "taskdeck.sort";
pub const DEFAULT_EMPTY_MESSAGE: &str =
  "No tasks found. Add your first task \
   above!";

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Deserialize,
)]
#[serde(default)]
pub struct Config {
  pub storage: StorageConfig,
  pub view:    ViewConfig,
  pub palette: Palette
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct StorageConfig {
  pub tasks_key:  String,
  pub filter_key: String,
  pub sort_key:   String
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct ViewConfig {
  pub default_sort:       String,
  pub remember_selection: bool,
  pub empty_message:      String,
  pub timezone:           Option<String>
}

/// Accent colors for task cards.
#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default)]
pub struct Palette {
  pub done:    String,
  pub overdue: String,
  pub urgent:  String,
  pub high:    String,
  pub medium:  String,
  pub low:     String
}

impl Default for StorageConfig {
  fn default() -> Self {
    Self {
      tasks_key:  DEFAULT_TASKS_KEY
        .to_string(),
      filter_key: DEFAULT_FILTER_KEY
        .to_string(),
      sort_key:   DEFAULT_SORT_KEY
        .to_string()
    }
  }
}

impl Default for ViewConfig {
  fn default() -> Self {
    Self {
      default_sort:       SortKey::Created
        .as_key()
        .to_string(),
      remember_selection: true,
      empty_message:
        DEFAULT_EMPTY_MESSAGE.to_string(),
      timezone:           None
    }
  }
}

impl Default for Palette {
  fn default() -> Self {
    Self {
      done:    "#34D399".to_string(),
      overdue: "#EF4444".to_string(),
      urgent:  "#EF4444".to_string(),
      high:    "#F97316".to_string(),
      medium:  "#3B82F6".to_string(),
      low:     "#34D399".to_string()
    }
  }
}

impl Palette {
  pub fn priority(
    &self,
    priority: Priority
  ) -> &str {
    match priority {
      | Priority::Urgent => &self.urgent,
      | Priority::High => &self.high,
      | Priority::Medium => &self.medium,
      | Priority::Low => &self.low
    }
  }
}

impl Config {
  /// Parses a TOML document and repairs
  /// any unusable values.
  #[tracing::instrument(skip(raw))]
  pub fn from_toml_str(
    raw: &str
  ) -> anyhow::Result<Self> {
    let mut cfg: Config =
      toml::from_str(raw).context(
        "failed to parse taskdeck config"
      )?;
    cfg.sanitize();
    debug!(
      tasks_key = %cfg.storage.tasks_key,
      default_sort = %cfg.view.default_sort,
      remember = cfg.view.remember_selection,
      "loaded config"
    );
    Ok(cfg)
  }

  pub fn sanitize(&mut self) {
    let defaults = Config::default();

    repair_blank(
      &mut self.storage.tasks_key,
      &defaults.storage.tasks_key
    );
    repair_blank(
      &mut self.storage.filter_key,
      &defaults.storage.filter_key
    );
    repair_blank(
      &mut self.storage.sort_key,
      &defaults.storage.sort_key
    );
    repair_blank(
      &mut self.view.empty_message,
      &defaults.view.empty_message
    );

    if SortKey::from_key(
      self.view.default_sort.trim()
    )
    .is_none()
    {
      warn!(
        default_sort = %self.view.default_sort,
        "unknown default sort; using created"
      );
      self.view.default_sort =
        defaults.view.default_sort;
    }

    if self
      .view
      .timezone
      .as_deref()
      .is_some_and(|tz| {
        parse_timezone(tz).is_none()
      })
    {
      self.view.timezone = None;
    }

    let palette = &mut self.palette;
    let fallback = defaults.palette;
    repair_color(
      &mut palette.done,
      &fallback.done
    );
    repair_color(
      &mut palette.overdue,
      &fallback.overdue
    );
    repair_color(
      &mut palette.urgent,
      &fallback.urgent
    );
    repair_color(
      &mut palette.high,
      &fallback.high
    );
    repair_color(
      &mut palette.medium,
      &fallback.medium
    );
    repair_color(
      &mut palette.low,
      &fallback.low
    );
  }

  pub fn default_sort(&self) -> SortKey {
    SortKey::from_key(
      self.view.default_sort.trim()
    )
    .unwrap_or_default()
  }

  pub fn timezone(&self) -> Option<Tz> {
    self
      .view
      .timezone
      .as_deref()
      .and_then(parse_timezone)
  }
}

fn repair_blank(
  value: &mut String,
  fallback: &str
) {
  if value.trim().is_empty() {
    *value = fallback.to_string();
  } else {
    *value = value.trim().to_string();
  }
}

fn repair_color(
  value: &mut String,
  fallback: &str
) {
  match normalize_hex_color(value) {
    | Some(color) => *value = color,
    | None => {
      warn!(
        color = %value,
        fallback,
        "invalid palette color"
      );
      *value = fallback.to_string();
    }
  }
}

/// Accepts `#RGB` or `#RRGGBB` and returns
/// the upper-case six-digit form.
fn normalize_hex_color(
  raw: &str
) -> Option<String> {
  let hex = raw.trim().strip_prefix('#')?;
  if !hex
    .chars()
    .all(|c| c.is_ascii_hexdigit())
  {
    return None;
  }

  let expanded = match hex.len() {
    | 3 => hex
      .chars()
      .flat_map(|c| [c, c])
      .collect::<String>(),
    | 6 => hex.to_string(),
    | _ => return None
  };

  Some(format!(
    "#{}",
    expanded.to_ascii_uppercase()
  ))
}
