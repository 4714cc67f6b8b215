//! Document Generators
//!
//! Two mirrored folds over a field tree: one produces a JSON Schema style
//! description, the other a sample document that conforms to it. Both share
//! the same skip rule, so their property sets always line up:
//!
//! - a field whose key is blank is skipped, together with its subtree;
//! - a nested field without children is skipped.
//!
//! Sibling fields with the same key share one property slot; the last one
//! in tree order provides the value.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

use super::field::{FieldKind, FieldNode, FieldShape, FieldTree};
use super::heuristic::{default_for, json_number};

/// The two generated documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Schema,
    Sample,
}

impl DocumentKind {
    pub fn generate(&self, tree: &FieldTree) -> Value {
        match self {
            DocumentKind::Schema => generate_schema(tree.roots()),
            DocumentKind::Sample => generate_sample(tree.roots()),
        }
    }

    pub fn default_filename(&self) -> &'static str {
        match self {
            DocumentKind::Schema => "schema.json",
            DocumentKind::Sample => "sample-data.json",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentKind::Schema => f.write_str("schema"),
            DocumentKind::Sample => f.write_str("sample"),
        }
    }
}

/// What a field contributes to either document.
enum Projection<'a> {
    Object(&'a [FieldNode]),
    Scalar { kind: FieldKind, literal: &'a str },
}

fn project(node: &FieldNode) -> Option<Projection<'_>> {
    if node.has_blank_key() {
        return None;
    }
    match &node.shape {
        FieldShape::Nested { children } if children.is_empty() => None,
        FieldShape::Nested { children } => Some(Projection::Object(children)),
        FieldShape::String { value } => Some(Projection::Scalar {
            kind: FieldKind::String,
            literal: value,
        }),
        FieldShape::Number { value } => Some(Projection::Scalar {
            kind: FieldKind::Number,
            literal: value,
        }),
    }
}

/// Build `{"type": "object", "properties": {..}, "required": [..]}`.
///
/// `required` lists every emitted key once and is left out when empty.
/// Scalar defaults always come from the heuristic.
pub fn generate_schema(fields: &[FieldNode]) -> Value {
    let mut properties = Map::new();
    let mut required: Vec<String> = Vec::new();

    for field in fields {
        let Some(projection) = project(field) else {
            continue;
        };
        let property = match projection {
            Projection::Object(children) => generate_schema(children),
            Projection::Scalar { kind, .. } => json!({
                "type": kind.as_str(),
                "default": default_for(kind, &field.key),
                "description": format!("{} field of type {}", field.key, kind),
            }),
        };
        properties.insert(field.key.clone(), property);
        if !required.contains(&field.key) {
            required.push(field.key.clone());
        }
    }

    let mut schema = Map::new();
    schema.insert("type".to_string(), json!("object"));
    schema.insert("properties".to_string(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".to_string(), json!(required));
    }
    Value::Object(schema)
}

/// Build the sample document: explicit literals where given, heuristic
/// defaults otherwise.
pub fn generate_sample(fields: &[FieldNode]) -> Value {
    let mut data = Map::new();

    for field in fields {
        let Some(projection) = project(field) else {
            continue;
        };
        let value = match projection {
            Projection::Object(children) => generate_sample(children),
            Projection::Scalar { kind, literal } if literal.is_empty() => {
                default_for(kind, &field.key)
            }
            Projection::Scalar {
                kind: FieldKind::Number,
                literal,
            } => coerce_number(literal),
            Projection::Scalar { literal, .. } => json!(literal),
        };
        data.insert(field.key.clone(), value);
    }

    Value::Object(data)
}

/// Parse a user literal as a number. Anything unparsable is `0`.
pub fn coerce_number(literal: &str) -> Value {
    match literal.trim().parse::<f64>() {
        Ok(n) if n.is_finite() => json_number(n),
        _ => json!(0),
    }
}

/// Pretty-printed text with two-space indentation, as used for copy and export.
pub fn render_pretty(document: &Value) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_tree() -> FieldTree {
        FieldTree::from(vec![FieldNode::nested(
            "user",
            vec![
                FieldNode::string("name"),
                FieldNode::number("age").with_value("30"),
            ],
        )])
    }

    fn top_level_keys(document: &Value) -> Vec<String> {
        document.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_user_example_sample() {
        let sample = generate_sample(user_tree().roots());
        assert_eq!(sample, json!({"user": {"name": "John Doe", "age": 30}}));
    }

    #[test]
    fn test_user_example_schema() {
        let schema = generate_schema(user_tree().roots());
        assert_eq!(
            schema,
            json!({
                "type": "object",
                "properties": {
                    "user": {
                        "type": "object",
                        "properties": {
                            "name": {
                                "type": "string",
                                "default": "John Doe",
                                "description": "name field of type string"
                            },
                            "age": {
                                "type": "number",
                                "default": 25,
                                "description": "age field of type number"
                            }
                        },
                        "required": ["name", "age"]
                    }
                },
                "required": ["user"]
            })
        );
    }

    #[test]
    fn test_unmatched_keys_use_fallbacks() {
        let tree = FieldTree::from(vec![FieldNode::nested(
            "item",
            vec![FieldNode::string("label"), FieldNode::number("score")],
        )]);
        assert_eq!(
            generate_sample(tree.roots()),
            json!({"item": {"label": "sample text", "score": 42}})
        );
        let schema = generate_schema(tree.roots());
        assert_eq!(schema["properties"]["item"]["properties"]["score"]["default"], json!(42));
    }

    #[test]
    fn test_empty_tree() {
        let schema = generate_schema(&[]);
        assert_eq!(schema, json!({"type": "object", "properties": {}}));
        assert!(schema.get("required").is_none());
        assert_eq!(generate_sample(&[]), json!({}));
    }

    #[test]
    fn test_property_order_follows_tree_order() {
        let tree = FieldTree::from(vec![
            FieldNode::string("zeta"),
            FieldNode::string("alpha"),
            FieldNode::number("mid"),
        ]);
        assert_eq!(
            top_level_keys(&generate_sample(tree.roots())),
            vec!["zeta", "alpha", "mid"]
        );
        assert_eq!(
            top_level_keys(&generate_schema(tree.roots())["properties"]),
            vec!["zeta", "alpha", "mid"]
        );
        assert_eq!(
            serde_json::to_string(&generate_sample(tree.roots())).unwrap(),
            r#"{"zeta":"sample text","alpha":"sample text","mid":42}"#
        );
    }

    #[test]
    fn test_blank_keys_skipped_at_any_depth() {
        let tree = FieldTree::from(vec![
            FieldNode::string("   "),
            FieldNode::nested("", vec![FieldNode::string("hidden")]),
            FieldNode::nested(
                "outer",
                vec![FieldNode::string(""), FieldNode::string("kept")],
            ),
        ]);

        let sample = generate_sample(tree.roots());
        assert_eq!(sample, json!({"outer": {"kept": "sample text"}}));

        let schema = generate_schema(tree.roots());
        assert_eq!(top_level_keys(&schema["properties"]), vec!["outer"]);
        assert_eq!(schema["required"], json!(["outer"]));
        assert_eq!(schema["properties"]["outer"]["required"], json!(["kept"]));
    }

    #[test]
    fn test_empty_nested_group_skipped() {
        let tree = FieldTree::from(vec![
            FieldNode::nested("empty", vec![]),
            FieldNode::string("title"),
        ]);

        assert_eq!(generate_sample(tree.roots()), json!({"title": "Sample Title"}));
        let schema = generate_schema(tree.roots());
        assert!(schema["properties"].get("empty").is_none());
        assert_eq!(schema["required"], json!(["title"]));
    }

    #[test]
    fn test_group_with_only_blank_children_is_emitted_empty() {
        let tree = FieldTree::from(vec![FieldNode::nested("meta", vec![FieldNode::string("")])]);
        assert_eq!(generate_sample(tree.roots()), json!({"meta": {}}));
        assert_eq!(
            generate_schema(tree.roots()),
            json!({
                "type": "object",
                "properties": {"meta": {"type": "object", "properties": {}}},
                "required": ["meta"]
            })
        );
    }

    #[test]
    fn test_schema_and_sample_share_keys() {
        let tree = FieldTree::from(vec![
            FieldNode::string("a"),
            FieldNode::string(" "),
            FieldNode::nested("b", vec![]),
            FieldNode::nested("c", vec![FieldNode::number("d")]),
            FieldNode::number("e").with_value("nope"),
        ]);
        let sample = generate_sample(tree.roots());
        let schema = generate_schema(tree.roots());
        assert_eq!(top_level_keys(&sample), top_level_keys(&schema["properties"]));
        assert_eq!(top_level_keys(&sample), vec!["a", "c", "e"]);
    }

    #[test]
    fn test_explicit_literals() {
        let tree = FieldTree::from(vec![
            FieldNode::string("name").with_value("Ada"),
            FieldNode::string("padded").with_value("  spaced  "),
            FieldNode::number("pi").with_value("3.14"),
            FieldNode::number("bad").with_value("abc"),
            FieldNode::number("trimmed").with_value(" 7 "),
            FieldNode::number("huge").with_value("inf"),
        ]);
        let sample = generate_sample(tree.roots());

        assert_eq!(sample["name"], json!("Ada"));
        assert_eq!(sample["padded"], json!("  spaced  "));
        assert_eq!(serde_json::to_string(&sample["pi"]).unwrap(), "3.14");
        assert_eq!(sample["bad"], json!(0));
        assert_eq!(sample["trimmed"], json!(7));
        assert_eq!(sample["huge"], json!(0));

        // literals never leak into the schema defaults
        let schema = generate_schema(tree.roots());
        assert_eq!(schema["properties"]["name"]["default"], json!("John Doe"));
    }

    #[test]
    fn test_duplicate_keys_last_wins() {
        let tree = FieldTree::from(vec![
            FieldNode::string("dup").with_value("first"),
            FieldNode::string("other"),
            FieldNode::number("dup").with_value("2"),
        ]);

        let sample = generate_sample(tree.roots());
        assert_eq!(sample["dup"], json!(2));
        assert_eq!(top_level_keys(&sample), vec!["dup", "other"]);

        let schema = generate_schema(tree.roots());
        assert_eq!(schema["properties"]["dup"]["type"], json!("number"));
        assert_eq!(schema["required"], json!(["dup", "other"]));
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("30"), json!(30));
        assert_eq!(coerce_number("-1.5"), json!(-1.5));
        assert_eq!(coerce_number("1e3"), json!(1000));
        assert_eq!(coerce_number(""), json!(0));
        assert_eq!(coerce_number("NaN"), json!(0));
        assert_eq!(coerce_number("12abc"), json!(0));
    }

    #[test]
    fn test_document_kind() {
        let tree = user_tree();
        assert_eq!(DocumentKind::Sample.generate(&tree), generate_sample(tree.roots()));
        assert_eq!(DocumentKind::Schema.generate(&tree), generate_schema(tree.roots()));
        assert_eq!(DocumentKind::Schema.default_filename(), "schema.json");
        assert_eq!(DocumentKind::Sample.default_filename(), "sample-data.json");
        assert_eq!(
            serde_json::from_str::<DocumentKind>("\"sample\"").unwrap(),
            DocumentKind::Sample
        );
    }

    #[test]
    fn test_render_pretty_uses_two_spaces() {
        let text = render_pretty(&json!({"a": {"b": 1}})).unwrap();
        assert_eq!(text, "{\n  \"a\": {\n    \"b\": 1\n  }\n}");
    }
}
