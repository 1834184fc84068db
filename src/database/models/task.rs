use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

use crate::error::ApiError;

pub const TITLE_MAX_LEN: usize = 255;
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// A single to-do item. `id`, `user_id` and `created_at` are immutable after
/// creation; `updated_at` is refreshed on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    pub description: Option<String>,
}

impl TaskCreate {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if self.title.trim().is_empty() {
            field_errors.insert("title".to_string(), "Title is required".to_string());
        } else if self.title.chars().count() > TITLE_MAX_LEN {
            field_errors.insert(
                "title".to_string(),
                format!("Title must be at most {} characters", TITLE_MAX_LEN),
            );
        }

        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                field_errors.insert(
                    "description".to_string(),
                    format!("Description must be at most {} characters", DESCRIPTION_MAX_LEN),
                );
            }
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid task data", Some(field_errors)))
        }
    }
}

/// Partial update: absent fields keep their prior values.
#[derive(Debug, Default, Deserialize)]
pub struct TaskUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl TaskUpdate {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut field_errors = HashMap::new();

        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                field_errors.insert("title".to_string(), "Title cannot be empty".to_string());
            } else if title.chars().count() > TITLE_MAX_LEN {
                field_errors.insert(
                    "title".to_string(),
                    format!("Title must be at most {} characters", TITLE_MAX_LEN),
                );
            }
        }

        if let Some(description) = &self.description {
            if description.chars().count() > DESCRIPTION_MAX_LEN {
                field_errors.insert(
                    "description".to_string(),
                    format!("Description must be at most {} characters", DESCRIPTION_MAX_LEN),
                );
            }
        }

        if field_errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation_error("Invalid task data", Some(field_errors)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_rejects_empty_title() {
        let input = TaskCreate { title: "".to_string(), description: None };
        assert_eq!(input.validate().unwrap_err().status_code(), 400);
    }

    #[test]
    fn create_rejects_whitespace_title() {
        let input = TaskCreate { title: "   ".to_string(), description: None };
        assert!(input.validate().is_err());
    }

    #[test]
    fn create_accepts_title_at_bound() {
        let input = TaskCreate { title: "a".repeat(255), description: None };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn create_rejects_title_over_bound() {
        let input = TaskCreate { title: "a".repeat(256), description: None };
        assert!(input.validate().is_err());
    }

    #[test]
    fn create_checks_description_bound() {
        let ok = TaskCreate { title: "t".to_string(), description: Some("d".repeat(1000)) };
        assert!(ok.validate().is_ok());

        let too_long = TaskCreate { title: "t".to_string(), description: Some("d".repeat(1001)) };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn update_allows_absent_fields() {
        assert!(TaskUpdate::default().validate().is_ok());
    }

    #[test]
    fn update_rejects_empty_title_when_supplied() {
        let input = TaskUpdate { title: Some("".to_string()), ..Default::default() };
        assert!(input.validate().is_err());
    }

    #[test]
    fn update_accepts_completed_only() {
        let input = TaskUpdate { completed: Some(true), ..Default::default() };
        assert!(input.validate().is_ok());
    }
}
