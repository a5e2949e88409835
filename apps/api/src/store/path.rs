//! Path Resolver / Mutator: single-leaf edits against a document snapshot.
//!
//! A path is a dot-separated list of segments (`experience.0.roles.1.title`).
//! Segments address object keys or, when the container is an array, indices.
//! Keys containing dots cannot be addressed.
//!
//! Every edit deep-clones the input and returns a new tree with exactly one
//! changed leaf. Missing or falsy intermediates are replaced by empty objects
//! (never arrays). On top of that, the mutator rejects edits that would index
//! past the end of an array, descend through a scalar, or change the kind of
//! an existing non-null leaf.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("Path must not be empty")]
    Empty,

    #[error("Path '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("'{at}' is not an object or array")]
    NotAContainer { at: String },

    #[error("'{at}' is an array; segment '{segment}' is not an index")]
    ExpectedIndex { at: String, segment: String },

    #[error("Index {index} is out of range at '{at}' (length {len})")]
    IndexOutOfRange { at: String, index: usize, len: usize },

    #[error("Cannot assign {found} to '{at}' which holds {expected}")]
    TypeMismatch {
        at: String,
        expected: &'static str,
        found: &'static str,
    },
}

/// A validated, dot-separated document path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditPath {
    raw: String,
    segments: Vec<String>,
}

impl EditPath {
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(|s| s.is_empty()) {
            return Err(PathError::EmptySegment(raw.to_string()));
        }
        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Joined prefix up to and including `depth`, used in error messages.
    fn prefix(&self, depth: usize) -> String {
        self.segments[..=depth].join(".")
    }
}

impl FromStr for EditPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditPath::parse(s)
    }
}

impl fmt::Display for EditPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Typed edit input. Deserializes from a bare JSON string, number, boolean
/// or array of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EditValue {
    Flag(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl EditValue {
    /// Converts the input into the JSON value to store, shaped after the
    /// leaf currently at the target path: text aimed at a number is parsed,
    /// text aimed at a list is split on commas and newlines, text aimed at a
    /// flag accepts `true`/`false`.
    pub fn transform_for(self, existing: Option<&Value>) -> Result<Value, &'static str> {
        match (self, existing) {
            (EditValue::Text(text), Some(Value::Number(_))) => text
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(number_value)
                .ok_or("text that is not a number"),
            (EditValue::Text(text), Some(Value::Array(_))) => Ok(Value::Array(
                split_list(&text).into_iter().map(Value::String).collect(),
            )),
            (EditValue::Text(text), Some(Value::Bool(_))) => match text.trim() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err("text that is not a boolean"),
            },
            (EditValue::Text(text), _) => Ok(Value::String(text)),
            (EditValue::Number(n), _) => number_value(n).ok_or("a non-finite number"),
            (EditValue::Flag(b), _) => Ok(Value::Bool(b)),
            (EditValue::List(items), _) => {
                Ok(Value::Array(items.into_iter().map(Value::String).collect()))
            }
        }
    }
}

/// Whole numbers are stored as JSON integers so `2018` does not become `2018.0`.
fn number_value(n: f64) -> Option<Value> {
    if !n.is_finite() {
        return None;
    }
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        return Some(Value::from(n as i64));
    }
    serde_json::Number::from_f64(n).map(Value::Number)
}

fn split_list(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Absent-equivalent values: replaced by `{}` when walked through.
pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Reads the value at `path`, if every segment resolves.
pub fn get<'a>(doc: &'a Value, path: &EditPath) -> Option<&'a Value> {
    path.segments().iter().try_fold(doc, |current, seg| match current {
        Value::Object(map) => map.get(seg),
        Value::Array(items) => seg.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Returns a deep copy of `doc` with `value` assigned at `path`.
pub fn apply_edit(doc: &Value, path: &EditPath, value: Value) -> Result<Value, PathError> {
    let mut root = doc.clone();
    let Some((last, parents)) = path.segments().split_last() else {
        return Err(PathError::Empty);
    };

    let mut current = &mut root;
    for (depth, segment) in parents.iter().enumerate() {
        current = descend(current, segment, path, depth)?;
    }
    assign(current, last, value, path)?;

    Ok(root)
}

fn descend<'a>(
    current: &'a mut Value,
    segment: &str,
    path: &EditPath,
    depth: usize,
) -> Result<&'a mut Value, PathError> {
    let slot = match current {
        Value::Object(map) => map.entry(segment.to_string()).or_insert(Value::Null),
        Value::Array(items) => {
            let index = parse_index(segment, path, depth)?;
            let len = items.len();
            items.get_mut(index).ok_or_else(|| PathError::IndexOutOfRange {
                at: path.prefix(depth),
                index,
                len,
            })?
        }
        _ => {
            return Err(PathError::NotAContainer {
                at: parent_label(path, depth),
            })
        }
    };

    if is_falsy(slot) {
        *slot = Value::Object(Map::new());
    } else if !slot.is_object() && !slot.is_array() {
        return Err(PathError::NotAContainer {
            at: path.prefix(depth),
        });
    }
    Ok(slot)
}

fn assign(current: &mut Value, segment: &str, value: Value, path: &EditPath) -> Result<(), PathError> {
    let depth = path.segments().len() - 1;
    match current {
        Value::Object(map) => {
            if let Some(existing) = map.get(segment) {
                check_kind(existing, &value, path)?;
            }
            map.insert(segment.to_string(), value);
            Ok(())
        }
        Value::Array(items) => {
            let index = parse_index(segment, path, depth)?;
            let len = items.len();
            if index < len {
                check_kind(&items[index], &value, path)?;
                items[index] = value;
                Ok(())
            } else if index == len {
                items.push(value);
                Ok(())
            } else {
                Err(PathError::IndexOutOfRange {
                    at: path.as_str().to_string(),
                    index,
                    len,
                })
            }
        }
        _ => Err(PathError::NotAContainer {
            at: parent_label(path, depth),
        }),
    }
}

fn parse_index(segment: &str, path: &EditPath, depth: usize) -> Result<usize, PathError> {
    segment
        .parse::<usize>()
        .map_err(|_| PathError::ExpectedIndex {
            at: parent_label(path, depth),
            segment: segment.to_string(),
        })
}

fn parent_label(path: &EditPath, depth: usize) -> String {
    if depth == 0 {
        "<root>".to_string()
    } else {
        path.prefix(depth - 1)
    }
}

fn check_kind(existing: &Value, incoming: &Value, path: &EditPath) -> Result<(), PathError> {
    if existing.is_null() || std::mem::discriminant(existing) == std::mem::discriminant(incoming) {
        return Ok(());
    }
    Err(PathError::TypeMismatch {
        at: path.as_str().to_string(),
        expected: kind_of(existing),
        found: kind_of(incoming),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn p(raw: &str) -> EditPath {
        EditPath::parse(raw).unwrap()
    }

    fn sample() -> Value {
        json!({
            "basics": { "name": "Ada", "experienceYears": 7, "openToRelocation": true },
            "skills": { "frontend": ["React", "TypeScript"] },
            "experience": [
                { "company": "Acme", "roles": [
                    { "title": "Engineer", "responsibilities": ["Built things"] },
                    { "title": "Senior Engineer", "responsibilities": [] }
                ]}
            ],
            "achievements": ["First"]
        })
    }

    #[test]
    fn test_parse_rejects_empty_and_blank_segments() {
        assert_eq!(EditPath::parse("  "), Err(PathError::Empty));
        assert!(matches!(EditPath::parse("a..b"), Err(PathError::EmptySegment(_))));
        assert!(matches!(EditPath::parse(".a"), Err(PathError::EmptySegment(_))));
        assert_eq!(p("experience.0.roles").segments().len(), 3);
    }

    #[test]
    fn test_edit_sets_leaf_and_leaves_everything_else_untouched() {
        let doc = sample();
        let path = p("experience.0.roles.1.title");
        let edited = apply_edit(&doc, &path, json!("Staff Engineer")).unwrap();

        assert_eq!(get(&edited, &path), Some(&json!("Staff Engineer")));

        let mut expected = doc.clone();
        expected["experience"][0]["roles"][1]["title"] = json!("Staff Engineer");
        assert_eq!(edited, expected);
        // input snapshot is not mutated
        assert_eq!(doc["experience"][0]["roles"][1]["title"], "Senior Engineer");
    }

    #[test]
    fn test_missing_intermediates_become_empty_objects() {
        let edited = apply_edit(&json!({}), &p("a.b.c"), json!("v")).unwrap();
        assert_eq!(edited, json!({ "a": { "b": { "c": "v" } } }));
    }

    #[test]
    fn test_numeric_segment_under_missing_parent_creates_object_not_array() {
        let edited = apply_edit(&json!({}), &p("list.0"), json!("x")).unwrap();
        assert_eq!(edited, json!({ "list": { "0": "x" } }));
    }

    #[test]
    fn test_falsy_intermediate_is_replaced_by_object() {
        let doc = json!({ "labels": null, "summary": "" });
        let edited = apply_edit(&doc, &p("labels.experience.title"), json!("Career")).unwrap();
        assert_eq!(edited["labels"], json!({ "experience": { "title": "Career" } }));

        let edited = apply_edit(&doc, &p("summary.x"), json!(1)).unwrap();
        assert_eq!(edited["summary"], json!({ "x": 1 }));
    }

    #[test]
    fn test_edit_is_idempotent() {
        let doc = sample();
        let path = p("basics.name");
        let once = apply_edit(&doc, &path, json!("Grace")).unwrap();
        let twice = apply_edit(&once, &path, json!("Grace")).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_index_out_of_range_is_rejected() {
        let err = apply_edit(&sample(), &p("experience.3.company"), json!("X")).unwrap_err();
        assert_eq!(
            err,
            PathError::IndexOutOfRange {
                at: "experience.3".to_string(),
                index: 3,
                len: 1
            }
        );
    }

    #[test]
    fn test_final_index_may_append_but_not_skip() {
        let doc = sample();
        let appended = apply_edit(&doc, &p("achievements.1"), json!("Second")).unwrap();
        assert_eq!(appended["achievements"], json!(["First", "Second"]));

        let err = apply_edit(&doc, &p("achievements.5"), json!("Gap")).unwrap_err();
        assert!(matches!(err, PathError::IndexOutOfRange { index: 5, len: 1, .. }));
    }

    #[test]
    fn test_non_numeric_segment_into_array_is_rejected() {
        let err = apply_edit(&sample(), &p("experience.first.company"), json!("X")).unwrap_err();
        assert!(matches!(err, PathError::ExpectedIndex { ref segment, .. } if segment == "first"));
    }

    #[test]
    fn test_descending_through_scalar_is_rejected() {
        let err = apply_edit(&sample(), &p("basics.name.first"), json!("A")).unwrap_err();
        assert_eq!(
            err,
            PathError::NotAContainer {
                at: "basics.name".to_string()
            }
        );
    }

    #[test]
    fn test_leaf_kind_change_is_rejected() {
        let err = apply_edit(&sample(), &p("basics.name"), json!({ "first": "A" })).unwrap_err();
        assert!(matches!(err, PathError::TypeMismatch { expected: "a string", found: "an object", .. }));
    }

    #[test]
    fn test_null_leaf_accepts_any_kind() {
        let doc = json!({ "basics": { "workMode": null } });
        let edited = apply_edit(&doc, &p("basics.workMode"), json!(["Remote"])).unwrap();
        assert_eq!(edited["basics"]["workMode"], json!(["Remote"]));
    }

    #[test]
    fn test_edit_value_deserializes_untagged() {
        let v: EditValue = serde_json::from_value(json!("hi")).unwrap();
        assert_eq!(v, EditValue::Text("hi".into()));
        let v: EditValue = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(v, EditValue::Number(3.0));
        let v: EditValue = serde_json::from_value(json!(false)).unwrap();
        assert_eq!(v, EditValue::Flag(false));
        let v: EditValue = serde_json::from_value(json!(["a", "b"])).unwrap();
        assert_eq!(v, EditValue::List(vec!["a".into(), "b".into()]));
    }

    #[test]
    fn test_text_is_transformed_after_existing_leaf() {
        let years = json!(7);
        assert_eq!(
            EditValue::Text(" 8 ".into()).transform_for(Some(&years)),
            Ok(json!(8))
        );
        assert!(EditValue::Text("eight".into()).transform_for(Some(&years)).is_err());

        let list = json!(["React"]);
        assert_eq!(
            EditValue::Text("Rust, Go\nZig,  ".into()).transform_for(Some(&list)),
            Ok(json!(["Rust", "Go", "Zig"]))
        );

        let flag = json!(true);
        assert_eq!(
            EditValue::Text("false".into()).transform_for(Some(&flag)),
            Ok(json!(false))
        );

        assert_eq!(EditValue::Text("x".into()).transform_for(None), Ok(json!("x")));
    }

    #[test]
    fn test_whole_numbers_stay_integers() {
        assert_eq!(EditValue::Number(2018.0).transform_for(None), Ok(json!(2018)));
        assert_eq!(EditValue::Number(1.5).transform_for(None), Ok(json!(1.5)));
        assert!(EditValue::Number(f64::NAN).transform_for(None).is_err());
    }

    #[test]
    fn test_get_walks_objects_and_arrays() {
        let doc = sample();
        assert_eq!(get(&doc, &p("skills.frontend.1")), Some(&json!("TypeScript")));
        assert_eq!(get(&doc, &p("skills.backend")), None);
        assert_eq!(get(&doc, &p("basics.name.x")), None);
    }
}
