use chrono::{
  DateTime,
  Local,
  NaiveDate,
  Utc
};
use chrono_tz::Tz;

/// Date format of `<input type="date">`
/// values and of persisted due dates.
pub const INPUT_DATE_FORMAT: &str =
  "%Y-%m-%d";

/// Parses a date-picker value. Blank or
/// malformed input means "no due date".
pub fn parse_input_date(
  raw: &str
) -> Option<NaiveDate> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }

  match NaiveDate::parse_from_str(
    trimmed,
    INPUT_DATE_FORMAT
  ) {
    | Ok(date) => Some(date),
    | Err(error) => {
      tracing::debug!(
        raw = %trimmed,
        %error,
        "ignoring malformed date input"
      );
      None
    }
  }
}

pub fn format_input_date(
  date: Option<NaiveDate>
) -> String {
  date
    .map(|d| {
      d.format(INPUT_DATE_FORMAT)
        .to_string()
    })
    .unwrap_or_default()
}

pub fn parse_timezone(
  raw: &str
) -> Option<Tz> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return None;
  }

  match trimmed.parse::<Tz>() {
    | Ok(tz) => Some(tz),
    | Err(error) => {
      tracing::error!(
        timezone = %trimmed,
        error = %error,
        "invalid timezone id"
      );
      None
    }
  }
}

/// Calendar date of `now` in `timezone`,
/// or in the host's local zone.
pub fn today_in(
  timezone: Option<Tz>,
  now: DateTime<Utc>
) -> NaiveDate {
  match timezone {
    | Some(tz) => {
      now.with_timezone(&tz).date_naive()
    }
    | None => now
      .with_timezone(&Local)
      .date_naive()
  }
}

/// Whole days from `today` to `due`.
/// Negative when `due` has passed.
pub fn days_until(
  due: NaiveDate,
  today: NaiveDate
) -> i64 {
  due.signed_duration_since(today)
    .num_days()
}

/// Due dates are stored as `YYYY-MM-DD`,
/// with `""` for "no due date". `null` or
/// a missing field also read as none.
pub mod due_date_serde {
  use chrono::NaiveDate;
  use serde::{
    Deserialize,
    Deserializer,
    Serializer
  };

  use super::INPUT_DATE_FORMAT;

  pub fn serialize<S>(
    date: &Option<NaiveDate>,
    serializer: S
  ) -> Result<S::Ok, S::Error>
  where
    S: Serializer
  {
    match date {
      | Some(value) => {
        serializer.serialize_str(
          &value
            .format(INPUT_DATE_FORMAT)
            .to_string()
        )
      }
      | None => {
        serializer.serialize_str("")
      }
    }
  }

  pub fn deserialize<'de, D>(
    deserializer: D
  ) -> Result<Option<NaiveDate>, D::Error>
  where
    D: Deserializer<'de>
  {
    let raw =
      Option::<String>::deserialize(
        deserializer
      )?;
    match raw.as_deref().map(str::trim) {
      | None | Some("") => Ok(None),
      | Some(value) => {
        NaiveDate::parse_from_str(
          value,
          INPUT_DATE_FORMAT
        )
        .map(Some)
        .map_err(serde::de::Error::custom)
      }
    }
  }
}
