//! The orchestrator's state machine.
//!
//! `EditorState::apply` takes one action at a time and never touches the
//! network. Work that needs the browser (validation calls, the render preview,
//! saving) is queued as [`Job`]s; the app drains the queue after each render
//! and reports back with further actions.

use crate::codec::Message;
use crate::config::EditTarget;
use crate::form::{sections, Edit, SectionForm, SectionId, SectionIds, SectionKey};
use crate::reaction::ReactionForm;
use crate::record::{Dataset, Reaction};
use crate::session::EditingSession;
use crate::sidebar::SidebarState;
use crate::validation::{RequestSequencer, ValidationOutput, ValidationReport};
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum Job {
    Validate { key: SectionKey, request_id: u64 },
    Render,
    Save { name: String, dataset: Rc<Dataset> },
}

#[derive(Debug, Clone)]
pub enum EditorAction {
    DatasetLoaded(Dataset),
    ReactionLoaded(Reaction),
    LoadFailed(String),
    Edit(Edit<ReactionForm>),
    Remove(SectionId),
    Undo,
    /// Manual validate button. `Reaction` revalidates everything.
    Validate(SectionKey),
    ValidationFinished {
        key: SectionKey,
        request_id: u64,
        invalid_fields: Vec<&'static str>,
        result: Result<ValidationOutput, String>,
    },
    Rendered(Result<String, String>),
    Save,
    AutosaveTick,
    SaveFinished(Result<(), String>),
    ToggleAutosave,
    Freeze,
    SectionVisibility { anchor: String, visible: bool },
    /// Jobs up to and including this sequence number were dispatched.
    JobsTaken(u64),
}

#[derive(Debug, Clone)]
pub struct EditorState {
    pub form: ReactionForm,
    pub ids: SectionIds,
    pub session: EditingSession,
    pub reports: BTreeMap<SectionKey, ValidationReport>,
    pub preview: Option<String>,
    pub sidebar: SidebarState,
    pub load_error: Option<String>,
    sequencer: RequestSequencer,
    /// A removed section is held for undo.
    undo_buffered: bool,
    jobs: Vec<(u64, Job)>,
    next_job: u64,
}

impl EditorState {
    pub fn new(target: EditTarget) -> Self {
        Self {
            form: ReactionForm::default(),
            ids: SectionIds::default(),
            session: EditingSession::new(target),
            reports: BTreeMap::new(),
            preview: None,
            sidebar: SidebarState::default(),
            load_error: None,
            sequencer: RequestSequencer::default(),
            undo_buffered: false,
            jobs: Vec::new(),
            next_job: 0,
        }
    }

    /// Jobs queued after sequence number `after`.
    pub fn jobs_after(&self, after: u64) -> impl Iterator<Item = &(u64, Job)> + '_ {
        self.jobs.iter().filter(move |(seq, _)| *seq > after)
    }

    pub fn can_undo(&self) -> bool {
        self.undo_buffered && !self.session.is_frozen()
    }

    pub fn report(&self, key: SectionKey) -> Option<&ValidationReport> {
        self.reports.get(&key)
    }

    pub fn reaction(&self) -> Reaction {
        self.form.unload()
    }

    fn push_job(&mut self, job: Job) {
        self.next_job += 1;
        self.jobs.push((self.next_job, job));
    }

    fn queue_validation(&mut self, key: SectionKey) {
        let request_id = self.sequencer.issue(key);
        self.reports.insert(key, ValidationReport::pending());
        self.push_job(Job::Validate { key, request_id });
    }

    /// Reaction-level validation: the whole record, every live section and
    /// the render preview.
    fn validate_everything(&mut self) {
        for key in self.form.all_keys() {
            self.queue_validation(key);
        }
        self.push_job(Job::Render);
    }

    fn load(&mut self, reaction: &Reaction) {
        self.form.load(reaction, &mut self.ids);
        let form = &self.form;
        self.sequencer.retain(|key| form.contains(*key));
        self.reports.clear();
        self.undo_buffered = false;
        self.sidebar.retain(&self.form.sidebar_entries());
        self.load_error = None;
        self.validate_everything();
        self.session.mark_ready();
        info!(
            "loaded reaction '{}' for {:?}",
            self.form.reaction_id(),
            self.session.target()
        );
    }

    fn save(&mut self) {
        match self.session.commit(self.form.unload()) {
            Some((name, dataset)) => {
                debug!("saving {} reactions to '{}'", dataset.reactions.len(), name);
                self.push_job(Job::Save { name, dataset });
            }
            None => debug!("nothing to save"),
        }
    }

    pub fn apply(&mut self, action: EditorAction) {
        match action {
            EditorAction::DatasetLoaded(dataset) => match self.session.attach_dataset(dataset) {
                Ok(reaction) => self.load(&reaction),
                Err(e) => {
                    warn!("{}", e);
                    self.load_error = Some(e.to_string());
                }
            },
            EditorAction::ReactionLoaded(reaction) => self.load(&reaction),
            EditorAction::LoadFailed(message) => {
                warn!("load failed: {}", message);
                self.load_error = Some(message);
            }
            EditorAction::Edit(edit) => {
                if self.session.is_frozen() || !self.session.is_ready() {
                    return;
                }
                if !edit.apply(&mut self.form, &mut self.ids) {
                    debug!("edit target is gone: {:?}", edit);
                    return;
                }
                if edit.change.is_edit() {
                    self.session.mark_dirty();
                    for key in edit.scope.iter().rev() {
                        self.queue_validation(*key);
                    }
                }
            }
            EditorAction::Remove(id) => {
                if self.session.is_frozen() {
                    return;
                }
                let live = self.form.all_keys();
                if let Some(path) = sections::remove(&mut self.form, id) {
                    // Sections under the evicted undo buffer were not live.
                    self.sequencer.retain(|key| live.contains(key));
                    self.reports.retain(|key, _| live.contains(key));
                    self.undo_buffered = true;
                    self.session.mark_dirty();
                    for key in path {
                        self.queue_validation(key);
                    }
                    self.sidebar.retain(&self.form.sidebar_entries());
                }
            }
            EditorAction::Undo => {
                if !self.session.is_frozen() && sections::undo(&mut self.form) {
                    self.undo_buffered = false;
                    self.session.mark_dirty();
                    self.sidebar.retain(&self.form.sidebar_entries());
                }
            }
            EditorAction::Validate(SectionKey::Reaction) => self.validate_everything(),
            EditorAction::Validate(key) => {
                if self.form.contains(key) {
                    self.queue_validation(key);
                }
            }
            EditorAction::ValidationFinished {
                key,
                request_id,
                invalid_fields,
                result,
            } => {
                if !self.sequencer.is_latest(key, request_id) {
                    debug!("dropping stale {} validation #{}", key.type_name(), request_id);
                    return;
                }
                let report = match result {
                    Ok(output) => ValidationReport::from_output(output, &invalid_fields),
                    Err(message) => {
                        warn!("{} validation failed: {}", key.type_name(), message);
                        ValidationReport::unavailable(message)
                    }
                };
                self.reports.insert(key, report);
            }
            EditorAction::Rendered(Ok(html)) => self.preview = Some(html),
            EditorAction::Rendered(Err(message)) => {
                warn!("{} render failed: {}", Reaction::TYPE_NAME, message)
            }
            EditorAction::Save => self.save(),
            EditorAction::AutosaveTick => {
                if self.session.autosave_due() {
                    self.save();
                }
            }
            EditorAction::SaveFinished(result) => {
                if let Err(message) = &result {
                    warn!("save failed: {}", message);
                }
                self.session.finish_save(result.is_ok());
            }
            EditorAction::ToggleAutosave => {
                let on = self.session.toggle_autosave();
                info!("autosave {}", if on { "on" } else { "off" });
            }
            EditorAction::Freeze => self.session.freeze(),
            EditorAction::SectionVisibility { anchor, visible } => {
                self.sidebar.set_visibility(&anchor, visible);
            }
            EditorAction::JobsTaken(upto) => self.jobs.retain(|(seq, _)| *seq > upto),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Lens;
    use crate::record::{ReactionObservation, ReactionOutcome};
    use crate::sections::OutcomeForm;
    use crate::tracking::ChangeKind;
    use crate::validation::ValidationStatus;

    fn dataset_state() -> EditorState {
        let mut state = EditorState::new(EditTarget::Dataset {
            name: "ds".into(),
            index: 0,
        });
        state.apply(EditorAction::DatasetLoaded(Dataset {
            reactions: vec![Reaction {
                observations: vec![ReactionObservation {
                    comment: "turned blue".into(),
                    ..Default::default()
                }],
                outcomes: vec![ReactionOutcome::default()],
                ..Default::default()
            }],
            ..Default::default()
        }));
        state
    }

    fn take_all(state: &mut EditorState) -> Vec<Job> {
        let jobs: Vec<_> = state.jobs_after(0).cloned().collect();
        if let Some((last, _)) = jobs.last() {
            state.apply(EditorAction::JobsTaken(*last));
        }
        jobs.into_iter().map(|(_, job)| job).collect()
    }

    fn validated(jobs: &[Job]) -> Vec<SectionKey> {
        jobs.iter()
            .filter_map(|job| match job {
                Job::Validate { key, .. } => Some(*key),
                _ => None,
            })
            .collect()
    }

    fn outcome_lens(state: &EditorState) -> Lens<ReactionForm, OutcomeForm> {
        let (id, _) = state.form.outcomes.live().next().unwrap();
        Lens::root().section(SectionKey::Outcome(id), move |form: &mut ReactionForm| {
            form.outcomes.get_mut(id)
        })
    }

    #[test]
    fn load_validates_every_section_and_renders() {
        let mut state = dataset_state();
        assert!(state.session.is_ready());
        let jobs = take_all(&mut state);
        assert_eq!(validated(&jobs), state.form.all_keys());
        assert!(jobs.contains(&Job::Render));
        assert_eq!(state.jobs_after(0).count(), 0);
        assert_eq!(
            state.report(SectionKey::Notes).map(|r| &r.status),
            Some(&ValidationStatus::Pending)
        );
    }

    #[test]
    fn missing_reaction_is_a_load_error() {
        let mut state = EditorState::new(EditTarget::Dataset {
            name: "ds".into(),
            index: 3,
        });
        state.apply(EditorAction::DatasetLoaded(Dataset::default()));
        assert!(state.load_error.is_some());
        assert!(!state.session.is_ready());
    }

    #[test]
    fn typing_changes_text_without_dirtying() {
        let mut state = dataset_state();
        take_all(&mut state);
        let lens = outcome_lens(&state).field(|o: &mut OutcomeForm| &mut o.conversion.value);

        state.apply(EditorAction::Edit(
            lens.edit(ChangeKind::Input, |f| f.set_text("5")),
        ));
        assert!(!state.session.is_dirty());
        assert!(take_all(&mut state).is_empty());

        state.apply(EditorAction::Edit(lens.edit(ChangeKind::Blur, |f| f.blur())));
        assert!(state.session.is_dirty());
        let (id, _) = state.form.outcomes.live().next().unwrap();
        assert_eq!(validated(&take_all(&mut state)), vec![SectionKey::Outcome(id)]);
    }

    #[test]
    fn stale_validation_responses_are_ignored() {
        let mut state = dataset_state();
        take_all(&mut state);
        state.apply(EditorAction::Validate(SectionKey::Notes));
        state.apply(EditorAction::Validate(SectionKey::Notes));
        let ids: Vec<u64> = take_all(&mut state)
            .into_iter()
            .filter_map(|job| match job {
                Job::Validate { request_id, .. } => Some(request_id),
                _ => None,
            })
            .collect();

        state.apply(EditorAction::ValidationFinished {
            key: SectionKey::Notes,
            request_id: ids[1],
            invalid_fields: vec![],
            result: Ok(ValidationOutput::default()),
        });
        state.apply(EditorAction::ValidationFinished {
            key: SectionKey::Notes,
            request_id: ids[0],
            invalid_fields: vec![],
            result: Err("timeout".into()),
        });
        assert_eq!(
            state.report(SectionKey::Notes).map(|r| &r.status),
            Some(&ValidationStatus::Passed)
        );
    }

    #[test]
    fn remove_revalidates_ancestors_and_undo_does_not() {
        let mut state = dataset_state();
        let lens = outcome_lens(&state);
        state.apply(EditorAction::Edit(lens.edit_with_ids(
            ChangeKind::Click,
            |outcome: &mut OutcomeForm, ids| {
                outcome.analyses.add(ids);
            },
        )));
        take_all(&mut state);
        let (outcome, analysis) = {
            let (oid, o) = state.form.outcomes.live().next().unwrap();
            (oid, o.analyses.live().next().unwrap().0)
        };

        state.apply(EditorAction::Remove(analysis));
        assert_eq!(
            validated(&take_all(&mut state)),
            vec![SectionKey::Outcome(outcome)]
        );
        state.apply(EditorAction::Undo);
        assert!(take_all(&mut state).is_empty());
        assert!(state.form.contains(SectionKey::Analysis(analysis)));
    }

    #[test]
    fn undo_is_offered_only_while_a_section_is_buffered() {
        let mut state = dataset_state();
        take_all(&mut state);
        assert!(!state.can_undo());
        let (obs, _) = state.form.observations.live().next().unwrap();
        state.apply(EditorAction::Remove(obs));
        assert!(state.can_undo());
        state.apply(EditorAction::Undo);
        assert!(!state.can_undo());
        assert_eq!(state.form.observations.live_count(), 1);
    }

    #[test]
    fn evicted_sections_lose_their_reports_and_request_ids() {
        let mut state = dataset_state();
        take_all(&mut state);
        let root: Lens<ReactionForm, ReactionForm> = Lens::root();
        state.apply(EditorAction::Edit(
            root.field(|f: &mut ReactionForm| &mut f.observations)
                .edit_with_ids(ChangeKind::Click, |list, ids| {
                    list.add(ids);
                }),
        ));
        let ids: Vec<_> = state.form.observations.live().map(|(id, _)| id).collect();
        let (first, second) = (ids[0], ids[1]);

        state.apply(EditorAction::Validate(SectionKey::Observation(first)));
        let request_id = take_all(&mut state)
            .into_iter()
            .find_map(|job| match job {
                Job::Validate { key, request_id } if key == SectionKey::Observation(first) => {
                    Some(request_id)
                }
                _ => None,
            })
            .unwrap();

        state.apply(EditorAction::Remove(first));
        assert!(state.report(SectionKey::Observation(first)).is_some());
        state.apply(EditorAction::Remove(second));
        assert!(state.report(SectionKey::Observation(first)).is_none());
        assert!(state.report(SectionKey::Observation(second)).is_some());

        state.apply(EditorAction::ValidationFinished {
            key: SectionKey::Observation(first),
            request_id,
            invalid_fields: vec![],
            result: Ok(ValidationOutput::default()),
        });
        assert!(state.report(SectionKey::Observation(first)).is_none());
    }

    #[test]
    fn save_and_autosave_go_through_the_session() {
        let mut state = dataset_state();
        take_all(&mut state);
        state.apply(EditorAction::AutosaveTick);
        assert!(take_all(&mut state).is_empty());

        let (obs, _) = state.form.observations.live().next().unwrap();
        state.apply(EditorAction::Remove(obs));
        state.apply(EditorAction::AutosaveTick);
        let jobs = take_all(&mut state);
        let Some(Job::Save { name, dataset }) = jobs.last() else {
            panic!("expected a save job, got {:?}", jobs);
        };
        assert_eq!(name, "ds");
        assert!(dataset.reactions[0].observations.is_empty());

        state.apply(EditorAction::AutosaveTick);
        assert!(take_all(&mut state).is_empty());
        state.apply(EditorAction::SaveFinished(Ok(())));
        assert!(!state.session.is_dirty());
    }

    #[test]
    fn frozen_editor_ignores_edits() {
        let mut state = dataset_state();
        take_all(&mut state);
        state.apply(EditorAction::Freeze);
        let (obs, _) = state.form.observations.live().next().unwrap();
        state.apply(EditorAction::Remove(obs));
        assert_eq!(state.form.observations.live_count(), 1);
        assert!(!state.session.is_dirty());
        state.apply(EditorAction::Save);
        assert!(take_all(&mut state).is_empty());
    }

    #[test]
    fn rendered_preview_is_kept() {
        let mut state = dataset_state();
        state.apply(EditorAction::Rendered(Ok("<p>x</p>".into())));
        assert_eq!(state.preview.as_deref(), Some("<p>x</p>"));
        state.apply(EditorAction::SectionVisibility {
            anchor: "section_notes".into(),
            visible: true,
        });
        assert!(state.sidebar.is_highlighted("section_notes"));
    }
}
