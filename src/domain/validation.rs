// Complaint schema validation
use crate::domain::complaint::Complaint;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

const REQUIRED_FIELDS: [&str; 3] = ["location", "issue", "urgency"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldProblem {
    Missing,
    NotText,
    Blank,
    Unknown,
}

impl FieldProblem {
    fn describe(&self) -> &'static str {
        match self {
            FieldProblem::Missing => "is required",
            FieldProblem::NotText => "must be a string",
            FieldProblem::Blank => "must not be blank",
            FieldProblem::Unknown => "is not accepted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub problem: FieldProblem,
}

impl FieldIssue {
    fn new(field: &str, problem: FieldProblem) -> Self {
        Self {
            field: field.to_string(),
            problem,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("request body must be a JSON object: {0}")]
    MalformedBody(String),

    #[error("invalid complaint: {}", describe_issues(.0))]
    InvalidFields(Vec<FieldIssue>),
}

impl ValidationError {
    /// Names of the offending fields, empty for a malformed body.
    pub fn field_names(&self) -> Vec<&str> {
        match self {
            ValidationError::MalformedBody(_) => Vec::new(),
            ValidationError::InvalidFields(issues) => {
                issues.iter().map(|issue| issue.field.as_str()).collect()
            }
        }
    }

    pub fn issues(&self) -> &[FieldIssue] {
        match self {
            ValidationError::MalformedBody(_) => &[],
            ValidationError::InvalidFields(issues) => issues,
        }
    }
}

fn describe_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| format!("`{}` {}", issue.field, issue.problem.describe()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a raw request body and validate it as a complaint.
pub fn parse_complaint(body: &[u8]) -> Result<Complaint, ValidationError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;
    validate_complaint(&value)
}

/// Validate an arbitrary JSON value as a complaint.
///
/// All problems are collected before failing: required fields first in
/// declaration order, then unknown fields in name order.
pub fn validate_complaint(input: &Value) -> Result<Complaint, ValidationError> {
    let object = input.as_object().ok_or_else(|| {
        ValidationError::MalformedBody(format!("expected an object, found {}", kind_of(input)))
    })?;

    let mut issues = Vec::new();
    let mut field = |name: &str| match required_text(object, name) {
        Ok(text) => Some(text),
        Err(problem) => {
            issues.push(FieldIssue::new(name, problem));
            None
        }
    };
    let location = field("location");
    let issue = field("issue");
    let urgency = field("urgency");

    let mut unknown: Vec<&String> = object
        .keys()
        .filter(|key| !REQUIRED_FIELDS.contains(&key.as_str()))
        .collect();
    unknown.sort();
    issues.extend(
        unknown
            .into_iter()
            .map(|key| FieldIssue::new(key, FieldProblem::Unknown)),
    );

    match (location, issue, urgency) {
        (Some(location), Some(issue), Some(urgency)) if issues.is_empty() => {
            Ok(Complaint::new(location, issue, urgency))
        }
        _ => Err(ValidationError::InvalidFields(issues)),
    }
}

fn required_text(object: &Map<String, Value>, field: &str) -> Result<String, FieldProblem> {
    match object.get(field) {
        None | Some(Value::Null) => Err(FieldProblem::Missing),
        Some(Value::String(text)) if text.trim().is_empty() => Err(FieldProblem::Blank),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(FieldProblem::NotText),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
