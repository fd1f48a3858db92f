use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::app::get_config_dir;
use crate::constants::PLACEHOLDER_STUDENT_ID;

/// Student identity that persists between runs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentStore {
    pub student_id: Option<String>,
    pub last_course: Option<u32>,
    pub last_part: Option<u32>,
}

impl StudentStore {
    /// Get the path to the store file
    pub fn default_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("student.toml"))
    }

    /// Load the store, or an empty one if the file does not exist yet
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn set_student(&mut self, id: String) {
        self.student_id = Some(id);
    }

    pub fn set_last_position(&mut self, course: u32, part: u32) {
        self.last_course = Some(course);
        self.last_part = Some(part);
    }
}

/// Course and part for a quiz: explicit values first, then the position
/// of the last quiz taken. `None` when neither is known.
pub fn resolve_position(
    course: Option<u32>,
    part: Option<u32>,
    store: &StudentStore,
) -> Option<(u32, u32)> {
    Some((course.or(store.last_course)?, part.or(store.last_part)?))
}

/// Pick the student id for a session: explicit flag, then config, then the
/// stored id, then the shared placeholder.
///
/// Nothing here verifies the id against the backend.
pub fn resolve_student_id(
    flag: Option<&str>,
    configured: Option<&str>,
    store: &StudentStore,
) -> String {
    fn usable(id: Option<&str>) -> Option<&str> {
        id.map(str::trim).filter(|id| !id.is_empty())
    }

    let candidate = usable(flag)
        .or_else(|| usable(configured))
        .or_else(|| usable(store.student_id.as_deref()));

    match candidate {
        Some(id) => id.to_string(),
        None => {
            warn!(
                "No student id configured, falling back to shared placeholder {}",
                PLACEHOLDER_STUDENT_ID
            );
            PLACEHOLDER_STUDENT_ID.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_store_round_trips_through_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("student.toml");

        assert_eq!(StudentStore::load_from(&path).unwrap(), StudentStore::default());

        let mut store = StudentStore::default();
        store.set_student("E2024-17".to_string());
        store.set_last_position(2, 3);
        store.save_to(&path).unwrap();

        let loaded = StudentStore::load_from(&path).unwrap();
        assert_eq!(loaded.student_id.as_deref(), Some("E2024-17"));
        assert_eq!(loaded.last_course, Some(2));
        assert_eq!(loaded.last_part, Some(3));
    }

    #[test]
    fn test_resolution_order() {
        let store = StudentStore {
            student_id: Some("stored".to_string()),
            ..Default::default()
        };

        assert_eq!(resolve_student_id(Some("flag"), Some("cfg"), &store), "flag");
        assert_eq!(resolve_student_id(None, Some("cfg"), &store), "cfg");
        assert_eq!(resolve_student_id(None, None, &store), "stored");
    }

    #[test]
    fn test_blank_values_are_skipped() {
        let store = StudentStore {
            student_id: Some("stored".to_string()),
            ..Default::default()
        };
        assert_eq!(resolve_student_id(Some(""), Some("  "), &store), "stored");
    }

    #[test]
    fn test_position_falls_back_to_last_quiz() {
        let mut store = StudentStore::default();
        assert_eq!(resolve_position(None, None, &store), None);
        assert_eq!(resolve_position(Some(4), Some(1), &store), Some((4, 1)));
        assert_eq!(resolve_position(Some(4), None, &store), None);

        store.set_last_position(2, 3);
        assert_eq!(resolve_position(None, None, &store), Some((2, 3)));
        assert_eq!(resolve_position(None, Some(5), &store), Some((2, 5)));
        assert_eq!(resolve_position(Some(4), Some(1), &store), Some((4, 1)));
    }

    #[test]
    fn test_placeholder_when_nothing_known() {
        let id = resolve_student_id(None, Some("   "), &StudentStore::default());
        assert_eq!(id, PLACEHOLDER_STUDENT_ID);
    }
}
