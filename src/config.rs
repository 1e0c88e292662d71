//! Application-level configuration constants and edit-target resolution.

use crate::error::EditorError;

// Editing behavior
pub const AUTOSAVE_INTERVAL_MS: u32 = 15_000;
pub const FLOAT_DISPLAY_PRECISION: usize = 7;
pub const UNSPECIFIED: &str = "UNSPECIFIED";

// Remote endpoints
pub const REACTION_BY_ID_PATH: &str = "/reaction/id";
pub const DATASET_READ_PATH: &str = "/dataset/proto/read";
pub const DATASET_WRITE_PATH: &str = "/dataset/proto/write";
pub const DATASET_COMPARE_PATH: &str = "/dataset/proto/compare";
pub const VALIDATE_PATH: &str = "/dataset/proto/validate";
pub const RENDER_REACTION_PATH: &str = "/render/reaction";
pub const DOWNLOAD_REACTION_PATH: &str = "/reaction/download";
pub const DOWNLOAD_FILENAME: &str = "reaction.pbtxt";
pub const RECORD_CONTENT_TYPE: &str = "application/json";

// Page query parameters
pub const QUERY_DATASET: &str = "dataset";
pub const QUERY_INDEX: &str = "index";
pub const QUERY_REACTION_ID: &str = "reaction_id";

/// Which reaction the page is editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// A reaction slot inside a named dataset; commits write the whole dataset back.
    Dataset { name: String, index: usize },
    /// A standalone reaction fetched by id; there is no dataset to commit to.
    ReactionId(String),
}

impl EditTarget {
    /// Resolve the target from raw query values. A dataset name wins over a
    /// reaction id when both are present.
    pub fn resolve(
        dataset: Option<String>,
        index: Option<String>,
        reaction_id: Option<String>,
    ) -> Result<Self, EditorError> {
        if let Some(name) = dataset.filter(|n| !n.trim().is_empty()) {
            let raw = index.unwrap_or_default();
            let index = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| EditorError::InvalidTarget(format!("bad reaction index '{}'", raw)))?;
            return Ok(EditTarget::Dataset { name, index });
        }
        match reaction_id.filter(|id| !id.trim().is_empty()) {
            Some(id) => Ok(EditTarget::ReactionId(id)),
            None => Err(EditorError::InvalidTarget(
                "expected ?dataset=<name>&index=<n> or ?reaction_id=<id>".to_string(),
            )),
        }
    }
}

pub fn validate_url(type_name: &str) -> String {
    format!("{}/{}", VALIDATE_PATH, type_name)
}

pub fn reaction_url(reaction_id: &str) -> String {
    format!("{}/{}/proto", REACTION_BY_ID_PATH, reaction_id)
}

pub fn dataset_read_url(name: &str) -> String {
    format!("{}/{}", DATASET_READ_PATH, name)
}

pub fn dataset_write_url(name: &str) -> String {
    format!("{}/{}", DATASET_WRITE_PATH, name)
}

pub fn dataset_compare_url(name: &str) -> String {
    format!("{}/{}", DATASET_COMPARE_PATH, name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_target_needs_a_numeric_index() {
        let target = EditTarget::resolve(Some("nielsen".into()), Some("3".into()), None).unwrap();
        assert_eq!(
            target,
            EditTarget::Dataset {
                name: "nielsen".into(),
                index: 3
            }
        );
        assert!(EditTarget::resolve(Some("nielsen".into()), Some("x".into()), None).is_err());
        assert!(EditTarget::resolve(Some("nielsen".into()), None, None).is_err());
    }

    #[test]
    fn reaction_id_is_used_without_dataset() {
        let target = EditTarget::resolve(None, None, Some("ord-123".into())).unwrap();
        assert_eq!(target, EditTarget::ReactionId("ord-123".into()));
    }

    #[test]
    fn empty_query_is_rejected() {
        assert!(EditTarget::resolve(Some("  ".into()), None, Some(String::new())).is_err());
    }

    #[test]
    fn endpoint_paths() {
        assert_eq!(validate_url("Reaction"), "/dataset/proto/validate/Reaction");
        assert_eq!(reaction_url("abc"), "/reaction/id/abc/proto");
        assert_eq!(dataset_write_url("d"), "/dataset/proto/write/d");
    }
}
