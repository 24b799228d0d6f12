//! Turns, conversations, and the idea files they are saved to.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::vocabulary::RoleLabel;
use crate::ChatterError;

/// The timestamp format of an idea file's header.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const IDEA_ID_LEN: usize = 8;
const MAX_ID_ATTEMPTS: usize = 8;

/////////////////////////////////////////////// Turn ///////////////////////////////////////////////

/// One role-labeled response from the model.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Turn {
    /// Who was asked.
    pub role: RoleLabel,
    /// What the model said.
    pub text: String,
}

impl std::fmt::Display for Turn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.role, self.text)
    }
}

/////////////////////////////////////////// Conversation ///////////////////////////////////////////

/// The ordered turns of one round.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Append a turn.
    pub fn push(&mut self, role: RoleLabel, text: impl Into<String>) {
        self.turns.push(Turn {
            role,
            text: text.into(),
        });
    }

    /// The most recent turn, if any.
    pub fn last(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// The number of turns so far.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// True if no turn has been taken.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Iterate the turns in order.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Render the conversation as it is saved to disk.
    pub fn render(&self, id: &IdeaId, timestamp: &NaiveDateTime) -> String {
        let mut out = format!("# Idea {id} - {}\n\n", timestamp.format(TIMESTAMP_FORMAT));
        let body = self
            .turns
            .iter()
            .map(Turn::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        out += &body;
        out.push('\n');
        out
    }
}

////////////////////////////////////////////// IdeaId //////////////////////////////////////////////

/// A short random identifier naming one idea file.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct IdeaId(String);

impl IdeaId {
    /// Take the first eight hex digits of a fresh v4 UUID.
    pub fn generate() -> Self {
        let uuid = uuid::Uuid::new_v4().simple().to_string();
        Self(uuid[..IDEA_ID_LEN].to_string())
    }

    /// Accept exactly eight lowercase hex digits.
    pub fn parse(s: &str) -> Option<Self> {
        if s.len() == IDEA_ID_LEN
            && s
                .chars()
                .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
        {
            Some(Self(s.to_string()))
        } else {
            None
        }
    }

    /// The identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The file name for this identifier.
    pub fn file_name(&self) -> String {
        format!("idea_{}.md", self.0)
    }
}

impl std::fmt::Display for IdeaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

///////////////////////////////////////////// IdeaWriter ///////////////////////////////////////////

/// Where a conversation landed on disk.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdeaFile {
    /// The identifier in the header and file name.
    pub id: IdeaId,
    /// The full path of the written file.
    pub path: PathBuf,
}

/// Writes each conversation to its own never-overwritten file.
#[derive(Clone, Debug)]
pub struct IdeaWriter {
    dir: PathBuf,
}

impl IdeaWriter {
    /// Create the output directory if it does not exist.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ChatterError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|err| ChatterError::io(&dir, err))?;
        Ok(Self { dir })
    }

    /// The output directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The path an identifier maps to.
    pub fn path_for(&self, id: &IdeaId) -> PathBuf {
        self.dir.join(id.file_name())
    }

    /// Write `conversation` under a fresh identifier.
    pub fn write(
        &self,
        conversation: &Conversation,
        timestamp: &NaiveDateTime,
    ) -> Result<IdeaFile, ChatterError> {
        self.write_with(conversation, timestamp, IdeaId::generate)
    }

    fn write_with(
        &self,
        conversation: &Conversation,
        timestamp: &NaiveDateTime,
        mut next_id: impl FnMut() -> IdeaId,
    ) -> Result<IdeaFile, ChatterError> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            let id = next_id();
            let path = self.path_for(&id);
            let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(err)
                    if err.kind() == std::io::ErrorKind::AlreadyExists
                        && attempts < MAX_ID_ATTEMPTS =>
                {
                    tracing::warn!(path = %path.display(), "idea file exists; drawing a new id");
                    continue;
                }
                Err(err) => return Err(ChatterError::io(&path, err)),
            };
            file.write_all(conversation.render(&id, timestamp).as_bytes())
                .map_err(|err| ChatterError::io(&path, err))?;
            return Ok(IdeaFile { id, path });
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 14)
            .unwrap()
            .and_hms_opt(15, 9, 26)
            .unwrap()
    }

    fn two_turns() -> Conversation {
        let mut conversation = Conversation::default();
        conversation.push(RoleLabel::initiating(), "a pitch");
        conversation.push(RoleLabel::from("DELTA ETHICS"), "a critique");
        conversation
    }

    #[test]
    fn generated_ids_parse() {
        for _ in 0..32 {
            let id = IdeaId::generate();
            assert_eq!(Some(id.clone()), IdeaId::parse(id.as_str()));
        }
    }

    #[test]
    fn parse_rejects_bad_ids() {
        assert!(IdeaId::parse("").is_none());
        assert!(IdeaId::parse("deadbee").is_none());
        assert!(IdeaId::parse("deadbeef0").is_none());
        assert!(IdeaId::parse("DEADBEEF").is_none());
        assert!(IdeaId::parse("deadbeeg").is_none());
        assert!(IdeaId::parse("deadbeef").is_some());
    }

    #[test]
    fn render_header_then_turns() {
        let id = IdeaId::parse("0badcafe").unwrap();
        assert_eq!(
            "# Idea 0badcafe - 2025-03-14 15:09:26\n\nALPHA IDEA_GEN: a pitch\nDELTA ETHICS: a critique\n",
            two_turns().render(&id, &at())
        );
    }

    #[test]
    fn conversation_tracks_last() {
        let conversation = two_turns();
        assert_eq!(2, conversation.len());
        assert!(!conversation.is_empty());
        assert_eq!("a critique", conversation.last().unwrap().text);
        assert!(Conversation::default().last().is_none());
    }

    #[test]
    fn distinct_ids_distinct_paths() {
        let dir = tempfile::tempdir().unwrap();
        let writer = IdeaWriter::new(dir.path()).unwrap();
        let a = IdeaId::parse("00000001").unwrap();
        let b = IdeaId::parse("00000002").unwrap();
        assert_ne!(writer.path_for(&a), writer.path_for(&b));
        assert_eq!(dir.path().join("idea_00000001.md"), writer.path_for(&a));
    }

    #[test]
    fn write_creates_nested_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = IdeaWriter::new(dir.path().join("out").join("ideas")).unwrap();
        let file = writer.write(&two_turns(), &at()).unwrap();
        assert!(file.path.starts_with(writer.dir()));
        let text = std::fs::read_to_string(&file.path).unwrap();
        assert!(text.starts_with(&format!("# Idea {} - 2025-03-14 15:09:26\n\n", file.id)));
    }

    #[test]
    fn collision_draws_a_new_id_and_keeps_old_file() {
        let dir = tempfile::tempdir().unwrap();
        let writer = IdeaWriter::new(dir.path()).unwrap();
        let taken = IdeaId::parse("aaaaaaaa").unwrap();
        std::fs::write(writer.path_for(&taken), "keep me").unwrap();
        let mut ids = vec![IdeaId::parse("bbbbbbbb").unwrap(), taken.clone()];
        let file = writer
            .write_with(&two_turns(), &at(), || ids.pop().unwrap())
            .unwrap();
        assert_eq!("bbbbbbbb", file.id.as_str());
        assert_eq!(
            "keep me",
            std::fs::read_to_string(writer.path_for(&taken)).unwrap()
        );
    }

    #[test]
    fn gives_up_after_repeated_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let writer = IdeaWriter::new(dir.path()).unwrap();
        let taken = IdeaId::parse("cccccccc").unwrap();
        std::fs::write(writer.path_for(&taken), "").unwrap();
        let result = writer.write_with(&two_turns(), &at(), || taken.clone());
        assert!(matches!(result, Err(ChatterError::Io { .. })));
    }
}
