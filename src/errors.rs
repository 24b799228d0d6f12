use std::path::PathBuf;

/// Errors that can occur while brainstorming.
#[derive(Debug)]
pub enum ChatterError {
    /// The credential for the selected service is not set in the environment.
    MissingCredential {
        /// The environment variable that is not set.
        variable: String,
    },
    /// A template file could not be read.
    Template {
        /// The template path.
        path: PathBuf,
        /// What went wrong.
        what: String,
    },
    /// The options do not describe a runnable configuration.
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
    /// Transport-level failure talking to an OpenAI-compatible endpoint.
    Http(reqwest::Error),
    /// The OpenAI-compatible endpoint answered with a non-success status.
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body.
        body: String,
    },
    /// An error occurred while communicating with Anthropic.
    Claudius(claudius::Error),
    /// The service answered, but not with usable text.
    InvalidResponse {
        /// Description of the problem.
        message: String,
        /// A suggestion for resolving it.
        suggestion: String,
    },
    /// The output directory or an idea file could not be written.
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// What went wrong.
        what: String,
    },
}

impl ChatterError {
    /// Create a MissingCredential error for the named environment variable.
    pub fn missing_credential(variable: impl Into<String>) -> Self {
        Self::MissingCredential {
            variable: variable.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an InvalidResponse error with a suggestion.
    pub fn invalid_response(message: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Wrap an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            what: err.to_string(),
        }
    }
}

impl std::fmt::Display for ChatterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatterError::MissingCredential { variable } => {
                write!(f, "Missing {variable} in .env.")
            }
            ChatterError::Template { path, what } => {
                write!(f, "could not read template {}: {what}\nSuggestion: Run from the directory holding mission_statement.txt and team_roles.txt, or pass --templates", path.display())
            }
            ChatterError::InvalidConfig { message } => {
                write!(f, "invalid configuration: {message}")
            }
            ChatterError::Http(err) => write!(f, "LLM communication error: {err}"),
            ChatterError::Status { status, body } => {
                write!(f, "LLM service returned status {status}: {body}")
            }
            ChatterError::Claudius(err) => write!(f, "LLM communication error: {err}"),
            ChatterError::InvalidResponse {
                message,
                suggestion,
            } => {
                write!(f, "Invalid LLM response: {message}\nSuggestion: {suggestion}")
            }
            ChatterError::Io { path, what } => {
                write!(f, "could not write {}: {what}", path.display())
            }
        }
    }
}

impl std::error::Error for ChatterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChatterError::Http(err) => Some(err),
            ChatterError::Claudius(err) => Some(err),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ChatterError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err)
    }
}

impl From<claudius::Error> for ChatterError {
    fn from(err: claudius::Error) -> Self {
        Self::Claudius(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_credential_names_variable() {
        let err = ChatterError::missing_credential("XAI_KEY");
        assert_eq!("Missing XAI_KEY in .env.", err.to_string());
    }

    #[test]
    fn invalid_response_carries_suggestion() {
        let err = ChatterError::invalid_response("empty completion", "try a larger max-tokens");
        let shown = err.to_string();
        assert!(shown.starts_with("Invalid LLM response: empty completion"));
        assert!(shown.contains("Suggestion: try a larger max-tokens"));
    }

    #[test]
    fn io_keeps_path() {
        let err = ChatterError::io(
            "ideas/idea_deadbeef.md",
            std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists"),
        );
        match &err {
            ChatterError::Io { path, .. } => {
                assert_eq!(PathBuf::from("ideas/idea_deadbeef.md"), *path);
            }
            _ => panic!("expected Io"),
        }
        assert!(err.to_string().contains("ideas/idea_deadbeef.md"));
    }

    #[test]
    fn status_has_no_source() {
        let err = ChatterError::Status {
            status: 429,
            body: "slow down".to_string(),
        };
        assert!(std::error::Error::source(&err).is_none());
        assert!(err.to_string().contains("429"));
    }
}
