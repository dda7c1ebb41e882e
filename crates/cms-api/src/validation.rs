use std::collections::{BTreeSet, HashMap};
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::errors::ErrorCode;
use crate::models::ContentStatus;

/// Query parameters exactly as they arrived from the transport.
pub type RawParams = HashMap<String, String>;

pub type ValidationResult = Result<ListParams, ValidationErrors>;

pub const DEFAULT_LIMIT: u32 = 20;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    PublishedAt,
    Title,
}

impl SortField {
    pub const ALL: [SortField; 4] = [
        SortField::CreatedAt,
        SortField::UpdatedAt,
        SortField::PublishedAt,
        SortField::Title,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            SortField::CreatedAt => "createdAt",
            SortField::UpdatedAt => "updatedAt",
            SortField::PublishedAt => "publishedAt",
            SortField::Title => "title",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// List parameters after defaulting and coercion. Nothing past the validator
/// sees raw strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    /// guaranteed within `MIN_LIMIT..=MAX_LIMIT`
    pub limit: u32,
    pub offset: u64,
    pub status: Option<ContentStatus>,
    pub category: Option<String>,
    /// trimmed, non-empty tokens
    pub tags: BTreeSet<String>,
    pub search: Option<String>,
    pub sort: SortField,
    pub order: SortDirection,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
            status: None,
            category: None,
            tags: BTreeSet::new(),
            search: None,
            sort: SortField::default(),
            order: SortDirection::default(),
        }
    }
}

/// One violated parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field: String,
    pub code: ErrorCode,
    pub message: String,
    pub received_value: Option<String>,
    pub expected_format: String,
}

impl FieldError {
    fn new(field: &str, code: ErrorCode, received: Option<&str>, expected: &str) -> Self {
        let message = match received {
            Some(value) => format!("Invalid value '{value}' for '{field}': expected {expected}"),
            None => format!("Missing required parameter '{field}': expected {expected}"),
        };

        FieldError {
            field: field.to_string(),
            code,
            message,
            received_value: received.map(str::to_string),
            expected_format: expected.to_string(),
        }
    }
}

/// Every violation found in one request, in rule order. Never empty.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Invalid request parameters: {}",
    .0.iter().map(|err| err.field.as_str()).collect::<Vec<_>>().join(", ")
)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Envelope-level code: the code of the first violated rule.
    pub fn code(&self) -> ErrorCode {
        self.0
            .first()
            .map(|err| err.code)
            .unwrap_or(ErrorCode::InvalidParameter)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.0.iter().map(|err| err.field.as_str()).collect()
    }
}

const LIMIT_FORMAT: &str = "an integer between 1 and 100";
const OFFSET_FORMAT: &str = "a non-negative integer";
const STATUS_FORMAT: &str = "one of: draft, published, archived";
const SORT_FORMAT: &str = "one of: createdAt, updatedAt, publishedAt, title";
const ORDER_FORMAT: &str = "one of: asc, desc";
const ID_FORMAT: &str = "a non-empty content identifier";

/// Checks and normalizes raw list parameters.
///
/// All rules run even after a failure so the caller sees every problem in a
/// single response. Unknown keys are ignored.
pub fn validate(raw: &RawParams) -> ValidationResult {
    let mut errors = Vec::new();

    let limit = match raw.get("limit") {
        None => DEFAULT_LIMIT,
        Some(value) => match value
            .parse::<u32>()
            .ok()
            .filter(|limit| (MIN_LIMIT..=MAX_LIMIT).contains(limit))
        {
            Some(limit) => limit,
            None => {
                errors.push(FieldError::new(
                    "limit",
                    ErrorCode::InvalidParameter,
                    Some(value),
                    LIMIT_FORMAT,
                ));
                DEFAULT_LIMIT
            }
        },
    };

    let offset = match raw.get("offset") {
        None => 0,
        Some(value) => value.parse::<u64>().unwrap_or_else(|_| {
            errors.push(FieldError::new(
                "offset",
                ErrorCode::InvalidParameter,
                Some(value),
                OFFSET_FORMAT,
            ));
            0
        }),
    };

    let status = raw.get("status").and_then(|value| {
        let status = ContentStatus::from_name(value);
        if status.is_none() {
            errors.push(FieldError::new(
                "status",
                ErrorCode::InvalidFormat,
                Some(value),
                STATUS_FORMAT,
            ));
        }
        status
    });

    let sort = match raw.get("sort") {
        None => SortField::default(),
        Some(value) => SortField::from_name(value).unwrap_or_else(|| {
            errors.push(FieldError::new(
                "sort",
                ErrorCode::InvalidFormat,
                Some(value),
                SORT_FORMAT,
            ));
            SortField::default()
        }),
    };

    let order = match raw.get("order") {
        None => SortDirection::default(),
        Some(value) => SortDirection::from_name(value).unwrap_or_else(|| {
            errors.push(FieldError::new(
                "order",
                ErrorCode::InvalidFormat,
                Some(value),
                ORDER_FORMAT,
            ));
            SortDirection::default()
        }),
    };

    let tags = raw.get("tags").map(|value| split_tags(value)).unwrap_or_default();

    if !errors.is_empty() {
        return Err(ValidationErrors(errors));
    }

    Ok(ListParams {
        limit,
        offset,
        status,
        category: non_empty(raw.get("category")),
        tags,
        search: non_empty(raw.get("search")),
        sort,
        order,
    })
}

/// Validates the identifier of a detail request.
pub fn validate_content_id(raw: &str) -> Result<String, ValidationErrors> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(ValidationErrors(vec![FieldError::new(
            "id",
            ErrorCode::MissingParameter,
            None,
            ID_FORMAT,
        )]));
    }

    Ok(id.to_string())
}

fn split_tags(value: &str) -> BTreeSet<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

// An empty filter string is the same as no filter.
fn non_empty(value: Option<&String>) -> Option<String> {
    value.filter(|v| !v.is_empty()).cloned()
}
