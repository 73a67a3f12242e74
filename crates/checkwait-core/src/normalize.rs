//! Parsing of loosely typed list inputs.
//!
//! List options arrive as strings. A value that is already a JSON array is
//! used as is; anything else is wrapped in `[...]` and parsed again, so
//! `"build", "lint"` and `["build", "lint"]` are equivalent. An absent or
//! empty value is an empty list.

use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;

use crate::domain::{CheckConclusion, CheckStatus};
use crate::error::{CheckWaitError, Result};

/// Parse a raw option into a list of strings.
pub fn parse_string_list(field: &'static str, raw: Option<&str>) -> Result<Vec<String>> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    let value = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(_) => serde_json::from_str::<Value>(&format!("[{raw}]"))
            .map_err(|_| CheckWaitError::invalid_input(field, "must be an array of strings"))?,
    };

    let Value::Array(items) = value else {
        return Err(CheckWaitError::invalid_input(
            field,
            "must be an array of strings",
        ));
    };

    items
        .into_iter()
        .map(|item| match item {
            Value::String(s) => Ok(s),
            other => Err(CheckWaitError::invalid_input(
                field,
                format!("must be an array of strings, found element {other}"),
            )),
        })
        .collect()
}

/// Parse a raw option into a list of closed-set members.
pub fn parse_member_list<T>(field: &'static str, raw: Option<&str>) -> Result<Vec<T>>
where
    T: FromStr,
    T::Err: Display,
{
    parse_string_list(field, raw)?
        .iter()
        .map(|item| {
            item.parse::<T>()
                .map_err(|e| CheckWaitError::invalid_input(field, e.to_string()))
        })
        .collect()
}

pub fn parse_statuses(raw: Option<&str>) -> Result<Vec<CheckStatus>> {
    parse_member_list("statuses", raw)
}

/// Parse expected conclusions; only [`CheckConclusion::EXPECTABLE`] members are accepted.
pub fn parse_conclusions(raw: Option<&str>) -> Result<Vec<CheckConclusion>> {
    let conclusions: Vec<CheckConclusion> = parse_member_list("conclusions", raw)?;
    if let Some(rejected) = conclusions.iter().find(|c| !c.is_expectable()) {
        let allowed = CheckConclusion::EXPECTABLE
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(CheckWaitError::invalid_input(
            "conclusions",
            format!("'{rejected}' cannot be expected (expected one of: {allowed})"),
        ));
    }
    Ok(conclusions)
}
