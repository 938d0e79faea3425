//! File binding and dirty tracking for the live session.

use std::path::{Path, PathBuf};

use ember_model::Session;
use ember_project::{FileKind, ProjectError, load_session, save_session};

use crate::SessionError;

/// Answer to "the session has changes, save it?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Nothing had changed, no question asked
    NotNeeded,
    Saved,
    Discarded,
    Cancelled,
}

impl SaveOutcome {
    /// Whether the operation that asked may go ahead.
    pub fn should_proceed(&self) -> bool {
        !matches!(self, SaveOutcome::Cancelled)
    }

    pub fn is_saved(&self) -> bool {
        matches!(self, SaveOutcome::Saved)
    }
}

/// User-facing questions a document may need answered.
pub trait SavePrompt {
    fn confirm_save_changes(&mut self) -> SaveChoice;

    /// Pick a target for "save as". `None` cancels.
    fn choose_save_path(&mut self, current: Option<&Path>) -> Option<PathBuf>;
}

/// A session's backing file plus the revision it was last saved at.
///
/// The document does not own the session; the controller passes the live
/// session into each call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDocument {
    file: Option<PathBuf>,
    saved_revision: u64,
}

impl SessionDocument {
    /// An untitled document, clean as of the session's current revision.
    pub fn new(session: &Session) -> Self {
        Self {
            file: None,
            saved_revision: session.revision(),
        }
    }

    pub fn with_file(session: &Session, file: PathBuf) -> Self {
        Self {
            file: Some(absolute_path(&file)),
            saved_revision: session.revision(),
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn has_changed_since_saved(&self, session: &Session) -> bool {
        session.revision() != self.saved_revision
    }

    pub fn mark_saved(&mut self, session: &Session) {
        self.saved_revision = session.revision();
    }

    /// Save to the bound file, or ask for one if the document is untitled.
    ///
    /// Returns `Ok(false)` when the user declined to pick a path.
    pub fn save(
        &mut self,
        session: &Session,
        prompt: &mut dyn SavePrompt,
    ) -> Result<bool, SessionError> {
        match self.file.clone() {
            Some(file) => {
                self.save_to(session, file)?;
                Ok(true)
            }
            None => self.save_as(session, prompt),
        }
    }

    pub fn save_as(
        &mut self,
        session: &Session,
        prompt: &mut dyn SavePrompt,
    ) -> Result<bool, SessionError> {
        let Some(file) = prompt.choose_save_path(self.file()) else {
            log::debug!(target: "session", "save as cancelled");
            return Ok(false);
        };
        self.save_to(session, file)?;
        Ok(true)
    }

    /// Write the session to `file` and rebind the document to its absolute
    /// path. Targets without the session extension get it.
    pub fn save_to(&mut self, session: &Session, mut file: PathBuf) -> Result<(), SessionError> {
        if FileKind::from_path(&file) != Some(FileKind::Session) {
            file.set_extension(FileKind::Session.extension());
        }
        save_session(&file, session)?;
        self.file = Some(absolute_path(&file));
        self.mark_saved(session);
        Ok(())
    }

    /// Replace `session` with the contents of `file`.
    ///
    /// On error nothing changes: neither the session nor the binding.
    pub fn load_from(&mut self, file: &Path, session: &mut Session) -> Result<(), ProjectError> {
        let loaded = load_session(file)?;
        *session = loaded;
        self.file = Some(absolute_path(file));
        self.mark_saved(session);
        Ok(())
    }

    /// Ask whether to save unsaved changes and act on the answer.
    pub fn save_if_needed_and_user_agrees(
        &mut self,
        session: &Session,
        prompt: &mut dyn SavePrompt,
    ) -> Result<SaveOutcome, SessionError> {
        if !self.has_changed_since_saved(session) {
            return Ok(SaveOutcome::NotNeeded);
        }

        match prompt.confirm_save_changes() {
            SaveChoice::Save => {
                if self.save(session, prompt)? {
                    Ok(SaveOutcome::Saved)
                } else {
                    Ok(SaveOutcome::Cancelled)
                }
            }
            SaveChoice::Discard => Ok(SaveOutcome::Discarded),
            SaveChoice::Cancel => Ok(SaveOutcome::Cancelled),
        }
    }
}

/// Documents are always bound to absolute paths so they survive a change
/// of working directory.
fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ember_model::Graph;
    use tempfile::tempdir;

    struct ScriptedPrompt {
        choice: SaveChoice,
        path: Option<PathBuf>,
        asked: usize,
    }

    impl ScriptedPrompt {
        fn new(choice: SaveChoice, path: Option<PathBuf>) -> Self {
            Self {
                choice,
                path,
                asked: 0,
            }
        }
    }

    impl SavePrompt for ScriptedPrompt {
        fn confirm_save_changes(&mut self) -> SaveChoice {
            self.asked += 1;
            self.choice
        }

        fn choose_save_path(&mut self, _current: Option<&Path>) -> Option<PathBuf> {
            self.path.clone()
        }
    }

    fn dirty_session() -> Session {
        let mut session = Session::new("Dirty");
        session.add_graph(Graph::default_graph(), true);
        session
    }

    #[test]
    fn test_new_document_is_clean() {
        let session = dirty_session();
        let document = SessionDocument::new(&session);
        assert!(!document.has_changed_since_saved(&session));
        assert!(document.file().is_none());
    }

    #[test]
    fn test_changes_after_creation_are_detected() {
        let mut session = dirty_session();
        let document = SessionDocument::new(&session);
        session.add_graph(Graph::new("More"), false);
        assert!(document.has_changed_since_saved(&session));
    }

    #[test]
    fn test_clean_document_does_not_prompt() {
        let session = dirty_session();
        let mut document = SessionDocument::new(&session);
        let mut prompt = ScriptedPrompt::new(SaveChoice::Save, None);

        let outcome = document
            .save_if_needed_and_user_agrees(&session, &mut prompt)
            .expect("outcome");
        assert_eq!(outcome, SaveOutcome::NotNeeded);
        assert_eq!(prompt.asked, 0);
    }

    #[test]
    fn test_untitled_save_asks_for_path_and_appends_extension() {
        let dir = tempdir().expect("tempdir");
        let mut session = Session::default();
        let mut document = SessionDocument::new(&session);
        session.set_name("Untitled");

        let mut prompt = ScriptedPrompt::new(SaveChoice::Save, Some(dir.path().join("song")));
        let outcome = document
            .save_if_needed_and_user_agrees(&session, &mut prompt)
            .expect("outcome");

        assert_eq!(outcome, SaveOutcome::Saved);
        let expected = dir.path().join("song.els");
        assert_eq!(document.file(), Some(expected.as_path()));
        assert!(expected.exists());
        assert!(!document.has_changed_since_saved(&session));
    }

    #[test]
    fn test_declining_save_path_cancels() {
        let mut session = Session::default();
        let mut document = SessionDocument::new(&session);
        session.set_name("Changed");

        let mut prompt = ScriptedPrompt::new(SaveChoice::Save, None);
        let outcome = document
            .save_if_needed_and_user_agrees(&session, &mut prompt)
            .expect("outcome");

        assert_eq!(outcome, SaveOutcome::Cancelled);
        assert!(!outcome.should_proceed());
        assert!(document.has_changed_since_saved(&session));
    }

    #[test]
    fn test_discard_leaves_document_dirty() {
        let mut session = Session::default();
        let mut document = SessionDocument::new(&session);
        session.set_name("Changed");

        let mut prompt = ScriptedPrompt::new(SaveChoice::Discard, None);
        let outcome = document
            .save_if_needed_and_user_agrees(&session, &mut prompt)
            .expect("outcome");
        assert_eq!(outcome, SaveOutcome::Discarded);
        assert!(outcome.should_proceed());
        assert!(document.file().is_none());
    }

    #[test]
    fn test_bound_document_saves_without_prompt() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("bound.els");
        let mut session = Session::new("Bound");
        let mut document = SessionDocument::with_file(&session, path.clone());
        session.set_name("Renamed");

        let mut prompt = ScriptedPrompt::new(SaveChoice::Save, None);
        assert!(document.save(&session, &mut prompt).expect("save"));
        assert!(path.is_file());
        assert_eq!(document.file(), Some(path.as_path()));
        assert!(!document.has_changed_since_saved(&session));
    }

    #[test]
    fn test_relative_paths_are_bound_absolute() {
        let dir = tempfile::Builder::new().tempdir_in(".").expect("tempdir");
        let relative = dir.path().join("rel.els");
        assert!(relative.is_relative());
        save_session(&relative, &dirty_session()).expect("save");

        let mut session = Session::default();
        let mut document = SessionDocument::new(&session);
        document.load_from(&relative, &mut session).expect("load");
        let bound = document.file().expect("file");
        assert!(bound.is_absolute());
        assert!(bound.is_file());

        document.save_to(&session, dir.path().join("copy")).expect("save");
        let copy = document.file().expect("file");
        assert!(copy.is_absolute());
        assert!(copy.ends_with("copy.els"));
    }

    #[test]
    fn test_load_from_replaces_session_and_binds_file() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("other.els");
        save_session(&path, &dirty_session()).expect("save");

        let mut session = Session::new("Current");
        let mut document = SessionDocument::new(&session);
        document.load_from(&path, &mut session).expect("load");

        assert_eq!(session.name(), "Dirty");
        assert_eq!(document.file(), Some(path.as_path()));
        assert!(!document.has_changed_since_saved(&session));
    }

    #[test]
    fn test_failed_load_leaves_everything_untouched() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("broken.els");
        std::fs::write(&path, b"{ not a session").expect("write");

        let mut session = dirty_session();
        let mut document = SessionDocument::new(&session);
        let before_doc = document.clone();
        let before_revision = session.revision();

        assert!(document.load_from(&path, &mut session).is_err());
        assert_eq!(document, before_doc);
        assert_eq!(session.name(), "Dirty");
        assert_eq!(session.revision(), before_revision);
    }
}
