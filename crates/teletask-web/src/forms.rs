//! Typed task form shared by the create and update pages.

use serde::{Deserialize, Serialize};

use teletask_core::models::Task;

/// Maximum accepted title length, counted in characters on trimmed input.
pub const TITLE_MAX_LEN: usize = 200;

/// Raw values as submitted by the browser. `complete` follows HTML checkbox
/// semantics: the field is present (usually `"on"`) when ticked and absent
/// otherwise.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub complete: Option<String>,
}

/// Validation messages, one slot per field.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FormErrors {
    pub title: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
    }
}

/// Cleaned values from a form that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTask {
    pub title: String,
    pub complete: bool,
}

impl TaskForm {
    /// Pre-fills the form from an existing task for the edit page.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            complete: task.complete.then(|| "on".to_string()),
        }
    }

    pub fn is_complete_checked(&self) -> bool {
        self.complete.is_some()
    }

    /// Checks the submitted values, returning cleaned data or the per-field
    /// messages the form should be re-rendered with.
    pub fn validate(&self) -> Result<ValidTask, FormErrors> {
        let title = self.title.trim();
        let mut errors = FormErrors::default();

        if title.is_empty() {
            errors.title = Some("Ce champ est obligatoire.".to_string());
        } else if title.chars().count() > TITLE_MAX_LEN {
            errors.title = Some(format!(
                "Assurez-vous que ce champ comporte au plus {TITLE_MAX_LEN} caracteres."
            ));
        }

        if errors.is_empty() {
            Ok(ValidTask {
                title: title.to_string(),
                complete: self.complete.is_some(),
            })
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    fn form(title: &str, complete: Option<&str>) -> TaskForm {
        TaskForm {
            title: title.to_string(),
            complete: complete.map(|s| s.to_string()),
        }
    }

    #[test]
    fn valid_input_is_trimmed() {
        let valid = form("  Watch The Wire  ", None).validate().unwrap();
        assert_eq!(valid.title, "Watch The Wire");
        assert!(!valid.complete);
    }

    #[test]
    fn checkbox_presence_sets_complete() {
        assert!(form("x", Some("on")).validate().unwrap().complete);
        // Browsers send whatever value the input declares; presence is what counts.
        assert!(form("x", Some("")).validate().unwrap().complete);
        assert!(!form("x", None).validate().unwrap().complete);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case(" \t\n ")]
    fn blank_titles_are_rejected(#[case] title: &str) {
        let errors = form(title, None).validate().unwrap_err();
        assert_eq!(errors.title.as_deref(), Some("Ce champ est obligatoire."));
    }

    #[test]
    fn title_length_boundary() {
        let exactly_200 = "a".repeat(200);
        assert!(form(&exactly_200, None).validate().is_ok());

        let too_long = "a".repeat(201);
        let errors = form(&too_long, None).validate().unwrap_err();
        assert!(errors.title.as_deref().unwrap().contains("200"));
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        // 200 two-byte characters: valid even though it is 400 bytes.
        let title = "é".repeat(200);
        assert!(form(&title, None).validate().is_ok());
    }

    #[test]
    fn from_task_prefills_fields() {
        let task = Task {
            id: 7,
            title: "Dark".to_string(),
            complete: true,
            provider_slug: None,
            provider_service_id: None,
            tmdb_series_id: None,
            created: Utc::now(),
        };
        let form = TaskForm::from_task(&task);
        assert_eq!(form.title, "Dark");
        assert!(form.is_complete_checked());
    }
}
