use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use super::errors::ExtractionError;
use super::model::ExpenseDraft;
use crate::domain::shared::amount::{Amount, AmountError};
use crate::domain::shared::category::ExpenseCategory;

/// Textual markers models use for "no date".
const ABSENT_DATE_MARKERS: [&str; 6] = ["null", "none", "unknown", "n/a", "desconocida", "sin fecha"];

static FENCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"```[A-Za-z0-9_-]*").expect("fence pattern is valid"));

#[derive(Debug, Deserialize)]
struct ReceiptPayload {
    #[serde(alias = "descripcion")]
    description: String,
    #[serde(alias = "monto")]
    amount: AmountField,
    #[serde(default, alias = "fecha")]
    date: Option<Value>,
    #[serde(default, alias = "categoria")]
    category: Option<Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AmountField {
    Number(serde_json::Number),
    Text(String),
}

/// Turns a model reply into a validated draft.
///
/// The reply may be fenced or surrounded by prose; the first balanced `{...}`
/// span that is well-formed JSON is taken as the payload.
pub fn parse_draft(reply: &str) -> Result<ExpenseDraft, ExtractionError> {
    let unparseable = || ExtractionError::UnparseableResponse {
        raw: reply.to_string(),
    };

    let cleaned = strip_fences(reply);
    let payload = object_spans(&cleaned)
        .find_map(|span| serde_json::from_str::<Value>(span).ok().filter(Value::is_object))
        .ok_or_else(unparseable)?;
    let payload: ReceiptPayload = serde_json::from_value(payload).map_err(|_| unparseable())?;

    validate(payload)
}

/// Removes markdown code-fence markers, keeping what they enclose.
pub fn strip_fences(reply: &str) -> String {
    FENCE.replace_all(reply, "").into_owned()
}

/// Candidate object spans: for each `{`, the balanced span starting there,
/// honoring string literals and escapes. Unbalanced starts are skipped.
pub fn object_spans(text: &str) -> impl Iterator<Item = &str> {
    text.match_indices('{')
        .filter_map(move |(start, _)| balanced_end(&text[start..]).map(|end| &text[start..start + end]))
}

fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}

fn validate(payload: ReceiptPayload) -> Result<ExpenseDraft, ExtractionError> {
    let description = payload.description.trim();
    if description.is_empty() {
        return Err(invalid("description", "description.empty"));
    }

    let amount = match payload.amount {
        AmountField::Number(n) => BigDecimal::from_str(&n.to_string())
            .map_err(|_| AmountError::NotNumeric)
            .and_then(Amount::new),
        AmountField::Text(text) => Amount::parse(&text),
    }
    .map_err(|e| invalid("amount", &e.to_string()))?;

    let date = parse_date(payload.date.as_ref())?;

    let category = payload
        .category
        .as_ref()
        .and_then(Value::as_str)
        .and_then(ExpenseCategory::from_label)
        .unwrap_or(ExpenseCategory::Other);

    Ok(ExpenseDraft {
        description: description.to_string(),
        amount,
        date,
        category,
    })
}

fn parse_date(value: Option<&Value>) -> Result<Option<NaiveDate>, ExtractionError> {
    let text = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(text)) => text.trim(),
        Some(_) => return Err(invalid("date", "date.not_a_string")),
    };

    if text.is_empty() || ABSENT_DATE_MARKERS.contains(&text.to_lowercase().as_str()) {
        return Ok(None);
    }

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Ok(Some(date));
    }

    // "2024-03-18T00:00:00Z" or "2024-03-18 10:41"
    let has_time_part = matches!(text.as_bytes().get(10), Some(b'T') | Some(b' '));
    text.get(..10)
        .filter(|_| has_time_part)
        .and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
        .map(Some)
        .ok_or_else(|| invalid("date", "date.not_iso"))
}

fn invalid(field: &'static str, reason: &str) -> ExtractionError {
    ExtractionError::InvalidField {
        field,
        reason: reason.to_string(),
    }
}
