//! The editing context owned by the orchestrator.

use crate::config::EditTarget;
use crate::error::EditorError;
use crate::record::{Dataset, Reaction};
use crate::tracking;
use std::rc::Rc;

/// Cloned on every editor action, so the dataset is shared rather than copied.
#[derive(Debug, Clone, PartialEq)]
pub struct EditingSession {
    target: EditTarget,
    dataset: Option<Rc<Dataset>>,
    dirty: bool,
    saving: bool,
    /// An edit landed after the in-flight save took its snapshot.
    edited_while_saving: bool,
    autosave: bool,
    frozen: bool,
    ready: bool,
}

impl EditingSession {
    /// Autosave starts enabled; it only fires once the session is ready.
    pub fn new(target: EditTarget) -> Self {
        Self {
            target,
            dataset: None,
            dirty: false,
            saving: false,
            edited_while_saving: false,
            autosave: true,
            frozen: false,
            ready: false,
        }
    }

    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    pub fn dataset(&self) -> Option<&Rc<Dataset>> {
        self.dataset.as_ref()
    }

    /// Keep the fetched dataset and return the reaction this session edits.
    pub fn attach_dataset(&mut self, dataset: Dataset) -> Result<Reaction, EditorError> {
        let index = match &self.target {
            EditTarget::Dataset { index, .. } => *index,
            EditTarget::ReactionId(id) => {
                return Err(EditorError::InvalidTarget(format!(
                    "reaction {} is not edited through a dataset",
                    id
                )))
            }
        };
        let reaction = dataset
            .reactions
            .get(index)
            .cloned()
            .ok_or(EditorError::MissingReaction {
                index,
                len: dataset.reactions.len(),
            })?;
        self.dataset = Some(Rc::new(dataset));
        Ok(reaction)
    }

    pub fn mark_ready(&mut self) {
        self.ready = true;
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn mark_dirty(&mut self) {
        if self.frozen {
            return;
        }
        self.dirty = true;
        if self.saving {
            self.edited_while_saving = true;
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosave
    }

    /// Returns the new autosave state.
    pub fn toggle_autosave(&mut self) -> bool {
        self.autosave = !self.autosave;
        self.autosave
    }

    pub fn autosave_due(&self) -> bool {
        tracking::autosave_due(
            self.autosave && self.ready && !self.frozen && self.dataset.is_some(),
            self.dirty,
            self.saving,
        )
    }

    /// The save control shows while there are unsaved changes.
    pub fn save_visible(&self) -> bool {
        self.dirty && !self.frozen
    }

    pub fn save_label(&self) -> &'static str {
        if self.saving {
            "saving"
        } else {
            "save"
        }
    }

    /// Irreversible read-only mode.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    /// Write `reaction` into its dataset slot and hand back what to persist.
    /// `None` without a dataset, while frozen, or while a save is in flight.
    pub fn commit(&mut self, reaction: Reaction) -> Option<(String, Rc<Dataset>)> {
        if self.frozen || self.saving {
            return None;
        }
        let (name, index) = match &self.target {
            EditTarget::Dataset { name, index } => (name.clone(), *index),
            EditTarget::ReactionId(_) => return None,
        };
        let mut dataset = Dataset::clone(self.dataset.as_ref()?);
        *dataset.reactions.get_mut(index)? = reaction;
        let dataset = Rc::new(dataset);
        self.dataset = Some(Rc::clone(&dataset));
        self.saving = true;
        self.edited_while_saving = false;
        Some((name, dataset))
    }

    /// A save completed. The page turns clean only when it succeeded and
    /// nothing was edited in the meantime.
    pub fn finish_save(&mut self, ok: bool) {
        self.saving = false;
        if ok && !self.edited_while_saving {
            self.dirty = false;
        }
        self.edited_while_saving = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset_session() -> (EditingSession, Reaction) {
        let mut session = EditingSession::new(EditTarget::Dataset {
            name: "test".into(),
            index: 1,
        });
        let dataset = Dataset {
            name: "test".into(),
            reactions: vec![
                Reaction {
                    reaction_id: "a".into(),
                    ..Default::default()
                },
                Reaction {
                    reaction_id: "b".into(),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let reaction = session.attach_dataset(dataset).unwrap();
        session.mark_ready();
        (session, reaction)
    }

    #[test]
    fn attach_picks_the_indexed_reaction() {
        let (_, reaction) = dataset_session();
        assert_eq!(reaction.reaction_id, "b");

        let mut session = EditingSession::new(EditTarget::Dataset {
            name: "test".into(),
            index: 5,
        });
        let err = session.attach_dataset(Dataset::default()).unwrap_err();
        assert!(matches!(err, EditorError::MissingReaction { index: 5, len: 0 }));
    }

    #[test]
    fn commit_overwrites_only_this_slot() {
        let (mut session, mut reaction) = dataset_session();
        reaction.reaction_id = "b2".into();
        session.mark_dirty();
        let (name, dataset) = session.commit(reaction).unwrap();
        assert_eq!(name, "test");
        assert_eq!(dataset.reactions[0].reaction_id, "a");
        assert_eq!(dataset.reactions[1].reaction_id, "b2");
        assert_eq!(session.save_label(), "saving");
        assert!(!session.autosave_due());

        session.finish_save(true);
        assert!(!session.is_dirty());
        assert!(!session.save_visible());
    }

    #[test]
    fn copies_share_the_dataset_until_a_commit() {
        let (mut session, mut reaction) = dataset_session();
        let before = session.clone();
        assert!(Rc::ptr_eq(
            before.dataset().unwrap(),
            session.dataset().unwrap()
        ));

        reaction.reaction_id = "b2".into();
        let (_, committed) = session.commit(reaction).unwrap();
        assert!(Rc::ptr_eq(&committed, session.dataset().unwrap()));
        assert_eq!(before.dataset().unwrap().reactions[1].reaction_id, "b");
        assert_eq!(session.dataset().unwrap().reactions[1].reaction_id, "b2");
    }

    #[test]
    fn commit_without_dataset_is_a_no_op() {
        let mut session = EditingSession::new(EditTarget::ReactionId("ord-1".into()));
        session.mark_ready();
        session.mark_dirty();
        assert!(session.commit(Reaction::default()).is_none());
        assert!(!session.is_saving());
        assert!(!session.autosave_due());
    }

    #[test]
    fn edits_during_a_save_keep_the_page_dirty() {
        let (mut session, reaction) = dataset_session();
        session.mark_dirty();
        session.commit(reaction).unwrap();
        session.mark_dirty();
        session.finish_save(true);
        assert!(session.is_dirty());
        assert!(session.autosave_due());
    }

    #[test]
    fn failed_save_stays_dirty() {
        let (mut session, reaction) = dataset_session();
        session.mark_dirty();
        session.commit(reaction).unwrap();
        session.finish_save(false);
        assert!(session.is_dirty());
        assert_eq!(session.save_label(), "save");
    }

    #[test]
    fn autosave_toggle_and_freeze() {
        let (mut session, reaction) = dataset_session();
        session.mark_dirty();
        assert!(session.autosave_due());
        assert!(!session.toggle_autosave());
        assert!(!session.autosave_due());
        assert!(session.toggle_autosave());

        session.freeze();
        assert!(!session.autosave_due());
        assert!(!session.save_visible());
        assert!(session.commit(reaction).is_none());
    }
}
