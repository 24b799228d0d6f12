use std::path::{Path, PathBuf};

use crate::ChatterError;

/// File holding the mission statement.
pub const MISSION_FILE: &str = "mission_statement.txt";
/// File holding the team role roster.
pub const ROLES_FILE: &str = "team_roles.txt";

/// The two static text inputs every opening prompt is built from.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Templates {
    /// The mission statement, trimmed.
    pub mission: String,
    /// The role roster, trimmed.
    pub roles: String,
}

impl Templates {
    /// Load the mission statement and role roster from `dir`.
    ///
    /// Either file being absent is fatal; there is nothing to prompt with.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ChatterError> {
        let dir = dir.as_ref();
        let roles = read_template(dir.join(ROLES_FILE))?;
        let mission = read_template(dir.join(MISSION_FILE))?;
        tracing::debug!(
            dir = %dir.display(),
            mission_chars = mission.len(),
            roles_chars = roles.len(),
            "loaded templates"
        );
        Ok(Self { mission, roles })
    }
}

fn read_template(path: PathBuf) -> Result<String, ChatterError> {
    match std::fs::read_to_string(&path) {
        Ok(text) => Ok(text.trim().to_string()),
        Err(err) => Err(ChatterError::Template {
            path,
            what: err.to_string(),
        }),
    }
}
