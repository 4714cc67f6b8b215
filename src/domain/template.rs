//! Prebuilt field trees that can replace the current tree in one step.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::field::{FieldNode, FieldTree};

pub const USER_PROFILE: &str = "user-profile";

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("Template not found: {0}")]
    NotFound(String),
}

/// A named tree, either built in or loaded from the templates directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: FieldTree,
}

impl Template {
    /// A copy of the template's tree with fresh identifiers.
    pub fn instantiate(&self) -> FieldTree {
        self.fields.reissue_ids()
    }
}

/// User record with a nested address and coordinates.
pub fn user_profile() -> Template {
    Template {
        name: USER_PROFILE.to_string(),
        description: Some("User with contact details and a nested address".to_string()),
        fields: FieldTree::from(vec![FieldNode::nested(
            "user",
            vec![
                FieldNode::string("name"),
                FieldNode::string("email"),
                FieldNode::number("age"),
                FieldNode::nested(
                    "address",
                    vec![
                        FieldNode::string("street"),
                        FieldNode::string("city"),
                        FieldNode::nested(
                            "coordinates",
                            vec![FieldNode::number("lat"), FieldNode::number("lng")],
                        ),
                    ],
                ),
            ],
        )]),
    }
}

/// Templates available for loading, looked up by name.
#[derive(Debug, Clone, Default)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn builtin() -> Self {
        Self {
            templates: vec![user_profile()],
        }
    }

    /// Add templates; one with the name of an existing entry replaces it in place.
    pub fn extend(&mut self, templates: impl IntoIterator<Item = Template>) {
        for template in templates {
            match self.templates.iter_mut().find(|t| t.name == template.name) {
                Some(existing) => *existing = template,
                None => self.templates.push(template),
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn instantiate(&self, name: &str) -> Result<FieldTree, TemplateError> {
        self.get(name)
            .map(Template::instantiate)
            .ok_or_else(|| TemplateError::NotFound(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
