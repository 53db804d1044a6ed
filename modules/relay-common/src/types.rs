use std::fmt;

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Reddit search time window (`orderBy` on the wire, `time` for the actor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 6] = [
        TimeWindow::Hour,
        TimeWindow::Day,
        TimeWindow::Week,
        TimeWindow::Month,
        TimeWindow::Year,
        TimeWindow::All,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeWindow::Hour => "hour",
            TimeWindow::Day => "day",
            TimeWindow::Week => "week",
            TimeWindow::Month => "month",
            TimeWindow::Year => "year",
            TimeWindow::All => "all",
        }
    }
}

/// Reddit search result ordering (`sortBy` on the wire, `sort` for the actor).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Relevance,
    Hot,
    Top,
    New,
    Comments,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Relevance,
        SortOrder::Hot,
        SortOrder::Top,
        SortOrder::New,
        SortOrder::Comments,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Relevance => "relevance",
            SortOrder::Hot => "hot",
            SortOrder::Top => "top",
            SortOrder::New => "new",
            SortOrder::Comments => "comments",
        }
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated search request, as accepted by `POST /scrape`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeRequest {
    pub query_string: String,
    pub order_by: TimeWindow,
    pub search_type: String,
    pub max_result: u32,
    pub sort_by: SortOrder,
}

impl ScrapeRequest {
    /// Validate a raw JSON body. Every field is required.
    pub fn from_json(body: Value) -> Result<Self, ValidationError> {
        let obj = body.as_object().ok_or(ValidationError::NotAnObject)?;

        let query_string = required_str(obj, "queryString")?;
        if query_string.trim().is_empty() {
            return Err(invalid("queryString", "must not be empty"));
        }

        let search_type = required_str(obj, "searchType")?;
        if search_type.trim().is_empty() {
            return Err(invalid("searchType", "must not be empty"));
        }

        let order_by = parse_token(obj, "orderBy", &TimeWindow::ALL, TimeWindow::as_str)?;
        let sort_by = parse_token(obj, "sortBy", &SortOrder::ALL, SortOrder::as_str)?;

        let max_result = match obj.get("maxResult") {
            None | Some(Value::Null) => return Err(ValidationError::Missing("maxResult")),
            Some(v) => v
                .as_u64()
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .ok_or_else(|| invalid("maxResult", "must be a positive integer"))?,
        };

        Ok(Self {
            query_string: query_string.to_string(),
            order_by,
            search_type: search_type.to_string(),
            max_result,
            sort_by,
        })
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ValidationError {
    ValidationError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn required_str<'a>(
    obj: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, ValidationError> {
    match obj.get(field) {
        None | Some(Value::Null) => Err(ValidationError::Missing(field)),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(invalid(field, "must be a string")),
    }
}

fn parse_token<T: Copy>(
    obj: &Map<String, Value>,
    field: &'static str,
    allowed: &[T],
    name: fn(&T) -> &'static str,
) -> Result<T, ValidationError> {
    let raw = required_str(obj, field)?;
    let wanted = raw.trim().to_ascii_lowercase();
    allowed
        .iter()
        .find(|t| name(t) == wanted)
        .copied()
        .ok_or_else(|| {
            let names: Vec<&str> = allowed.iter().map(name).collect();
            invalid(field, format!("must be one of: {}", names.join(", ")))
        })
}
