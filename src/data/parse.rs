use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::util::json_body;

use super::model::Comment;

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawPaper {
    #[serde(default)]
    pub(super) id: Option<Value>,
    #[serde(default)]
    pub(super) safe_id: Option<String>,
    #[serde(default)]
    pub(super) title: Option<String>,
    #[serde(default, alias = "authors_string")]
    pub(super) authors: Option<String>,
    #[serde(default)]
    pub(super) published_in: Option<String>,
    #[serde(default)]
    pub(super) year: Option<Value>,
    #[serde(default)]
    pub(super) paper_abstract: Option<String>,
    #[serde(default)]
    pub(super) resulttype: Option<Value>,
    #[serde(default)]
    pub(super) oa: Option<Value>,
    #[serde(default)]
    pub(super) free_access: Option<Value>,
    #[serde(default)]
    pub(super) citation_count: Option<Value>,
    #[serde(default, rename = "readers.mendeley")]
    pub(super) readers_mendeley: Option<Value>,
    #[serde(default)]
    pub(super) cited_by_tweeters_count: Option<Value>,
    #[serde(default)]
    pub(super) num_readers: Option<Value>,
    #[serde(default)]
    pub(super) area_uri: Option<Value>,
    #[serde(default)]
    pub(super) area: Option<String>,
    #[serde(default)]
    pub(super) x: Option<Value>,
    #[serde(default)]
    pub(super) y: Option<Value>,
    #[serde(default)]
    pub(super) subject: Option<Value>,
    #[serde(default)]
    pub(super) url: Option<String>,
    #[serde(default)]
    pub(super) doi: Option<String>,
    #[serde(default, alias = "pdf_url")]
    pub(super) link: Option<String>,
    #[serde(default)]
    pub(super) comments: Option<Value>,
    #[serde(default)]
    pub(super) tags: Option<Value>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawArea {
    #[serde(default)]
    pub(super) area_uri: Option<Value>,
    #[serde(default)]
    pub(super) title: Option<String>,
    #[serde(default)]
    pub(super) x: Option<Value>,
    #[serde(default)]
    pub(super) y: Option<Value>,
    #[serde(default)]
    pub(super) size: Option<Value>,
}

#[derive(Debug, Default)]
pub(super) struct RawPayload {
    pub(super) papers: Vec<Value>,
    pub(super) areas: Option<Vec<Value>>,
    pub(super) timestamp: Option<String>,
    pub(super) service: Option<String>,
    pub(super) query: Option<String>,
}

pub(super) fn parse_payload(raw: &str) -> Result<RawPayload> {
    let body = json_body(raw);
    let parsed: Value = serde_json::from_str(body).context("invalid JSON in data file")?;

    match parsed {
        Value::Array(papers) => Ok(RawPayload {
            papers,
            ..RawPayload::default()
        }),
        Value::Object(object) => parse_payload_object(object),
        _ => Err(anyhow!("unexpected JSON type in data file")),
    }
}

fn parse_payload_object(object: Map<String, Value>) -> Result<RawPayload> {
    let context = object.get("context").and_then(Value::as_object);
    let lookup = |key: &str| {
        object
            .get(key)
            .or_else(|| context.and_then(|context| context.get(key)))
            .and_then(value_as_string)
    };

    let timestamp = lookup("timestamp");
    let service = lookup("service");
    let query = lookup("query");

    let documents = object
        .get("documents")
        .or_else(|| object.get("data"))
        .cloned()
        .ok_or_else(|| anyhow!("data file has no documents"))?;

    // The search API wraps the document list as a JSON-encoded string.
    let documents = match documents {
        Value::String(encoded) => serde_json::from_str::<Value>(&encoded)
            .context("invalid JSON in embedded document string")?,
        other => other,
    };

    let Value::Array(papers) = documents else {
        return Err(anyhow!("documents in data file are not a list"));
    };

    let areas = match object.get("areas") {
        Some(Value::Array(areas)) => Some(areas.clone()),
        _ => None,
    };

    Ok(RawPayload {
        papers,
        areas,
        timestamp,
        service,
        query,
    })
}

pub(super) fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => {
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_owned())
        }
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

pub(super) fn value_as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|number| number.is_finite())
}

pub(super) fn value_as_count(value: &Value) -> Option<u64> {
    value_as_f64(value)
        .filter(|number| *number >= 0.0)
        .map(|number| number.round() as u64)
}

pub(super) fn value_as_flag(value: &Value) -> bool {
    match value {
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|number| number != 0.0),
        Value::String(text) => matches!(
            text.trim().to_ascii_lowercase().as_str(),
            "true" | "1" | "yes"
        ),
        _ => false,
    }
}

/// Splits a `subject` field into trimmed, non-empty keywords.
pub(super) fn parse_keywords(value: &Value) -> Vec<String> {
    let mut keywords = match value {
        Value::String(text) => text
            .split([';', ','])
            .map(str::trim)
            .filter(|keyword| !keyword.is_empty())
            .map(str::to_owned)
            .collect::<Vec<_>>(),
        Value::Array(items) => items.iter().filter_map(value_as_string).collect(),
        _ => Vec::new(),
    };

    let mut seen = std::collections::HashSet::new();
    keywords.retain(|keyword| seen.insert(keyword.to_lowercase()));
    keywords
}

pub(super) fn parse_comments(value: &Value) -> Vec<Comment> {
    let Value::Array(items) = value else {
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match item {
            Value::String(text) if !text.trim().is_empty() => Some(Comment {
                comment: text.trim().to_owned(),
                author: None,
            }),
            Value::Object(object) => {
                let comment = object.get("comment").and_then(value_as_string)?;
                Some(Comment {
                    comment,
                    author: object.get("author").and_then(value_as_string),
                })
            }
            _ => None,
        })
        .collect()
}

pub(super) fn parse_tags(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.iter().filter_map(value_as_string).collect(),
        Value::String(text) => text
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(str::to_owned)
            .collect(),
        _ => Vec::new(),
    }
}

pub(super) fn make_safe_id(id: &str) -> String {
    id.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '-' })
        .collect()
}
