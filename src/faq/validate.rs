use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use super::models::{FaqPayload, ValidFaq};

pub const QUESTION_MIN_LEN: usize = 5;
pub const ANSWER_MIN_LEN: usize = 10;
pub const CATEGORY_MIN_LEN: usize = 3;

/// Check a payload against the FAQ rules.
///
/// Fields are checked in a fixed order and the first violation is returned as
/// the client-facing message. Nothing is aggregated. A client `img_name` is
/// accepted here (empty included) but never carried forward: only an upload
/// sets the stored image. Keys outside the schema are rejected last.
pub fn validate(payload: &FaqPayload) -> Result<ValidFaq, String> {
    let question = required_text("question", payload.question.as_deref(), QUESTION_MIN_LEN)?;
    let answer = required_text("answer", payload.answer.as_deref(), ANSWER_MIN_LEN)?;
    let related_services = payload
        .related_services
        .clone()
        .map(|r| r.into_vec())
        .unwrap_or_default();
    let category = required_text("category", payload.category.as_deref(), CATEGORY_MIN_LEN)?;
    let updated_date = payload
        .updated_date
        .as_deref()
        .map(|raw| {
            parse_date(raw).ok_or_else(|| "\"updated_date\" must be a valid date".to_string())
        })
        .transpose()?;

    if let Some(key) = payload.unknown.keys().next() {
        return Err(format!("\"{key}\" is not allowed"));
    }

    Ok(ValidFaq {
        question,
        answer,
        related_services,
        category,
        updated_date,
    })
}

fn required_text(field: &str, value: Option<&str>, min_len: usize) -> Result<String, String> {
    let value = value.ok_or_else(|| format!("\"{field}\" is required"))?;
    if value.is_empty() {
        return Err(format!("\"{field}\" is not allowed to be empty"));
    }
    if value.chars().count() < min_len {
        return Err(format!(
            "\"{field}\" length must be at least {min_len} characters long"
        ));
    }
    Ok(value.to_string())
}

/// Accepts RFC 3339 timestamps, ISO datetimes without an offset (read as
/// UTC), bare `YYYY-MM-DD` dates (midnight UTC) and integer milliseconds
/// since the Unix epoch.
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(millis) = raw.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}
