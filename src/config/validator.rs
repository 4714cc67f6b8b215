use std::collections::HashMap;
use thiserror::Error;

use crate::config::{ExportSettings, ServerSettings, Settings};
use crate::domain::Template;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Duplicate entry: {0}")]
    Duplicate(String),
}

pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(settings: &Settings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_server(&settings.server) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_export(&settings.export) {
            errors.extend(e);
        }

        if let Err(e) = Self::validate_templates(&settings.templates) {
            errors.extend(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_server(server: &ServerSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if server.host.is_empty() {
            errors.push(ValidationError::MissingField("server.host".to_string()));
        }

        if server.port == 0 {
            errors.push(ValidationError::InvalidValue {
                field: "server.port".to_string(),
                reason: "Port must be greater than 0".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_export(export: &ExportSettings) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if export.directory.as_os_str().is_empty() {
            errors.push(ValidationError::MissingField("export.directory".to_string()));
        }

        for (field, filename) in [
            ("export.schema_filename", &export.schema_filename),
            ("export.sample_filename", &export.sample_filename),
        ] {
            if filename.trim().is_empty() {
                errors.push(ValidationError::MissingField(field.to_string()));
            } else if filename.contains(&['/', '\\'][..]) || filename == ".." {
                errors.push(ValidationError::InvalidValue {
                    field: field.to_string(),
                    reason: "Must be a plain file name".to_string(),
                });
            }
        }

        if !export.schema_filename.is_empty() && export.schema_filename == export.sample_filename {
            errors.push(ValidationError::InvalidValue {
                field: "export.sample_filename".to_string(),
                reason: "Must differ from export.schema_filename".to_string(),
            });
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_templates(templates: &[Template]) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();
        let mut seen_names = HashMap::new();

        for (idx, template) in templates.iter().enumerate() {
            if let Some(prev_idx) = seen_names.insert(&template.name, idx) {
                errors.push(ValidationError::Duplicate(format!(
                    "Template name '{}' appears at indices {} and {}",
                    template.name, prev_idx, idx
                )));
            }

            if template.name.trim().is_empty() {
                errors.push(ValidationError::MissingField(format!("templates[{}].name", idx)));
            }

            for id in template.fields.duplicate_ids() {
                errors.push(ValidationError::Duplicate(format!(
                    "Field id '{}' appears more than once in templates[{}]",
                    id, idx
                )));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
