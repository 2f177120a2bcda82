use crate::areas::repository::Repository;
use crate::areas::state::RepositoryState;
use crate::artifacts::checkout::migration::ensure_no_untracked_overwrite;
use crate::artifacts::core::error::TwigError;
use crate::artifacts::merge::conflict::render_conflict;
use crate::artifacts::merge::merge_plan::{FileAction, MergePlan};
use crate::artifacts::merge::outcome::MergeOutcome;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::io::Write;

impl Repository {
    pub fn merge(&self, given: &str) -> anyhow::Result<MergeOutcome> {
        let mut state = self.load_state()?;

        let outcome = self.merge_into(&mut state, given)?;
        self.persist_state(&state)?;
        self.report_merge(&outcome)?;

        Ok(outcome)
    }

    /// Merge branch `given` into the current branch, mutating `state` in memory only
    pub fn merge_into(
        &self,
        state: &mut RepositoryState,
        given: &str,
    ) -> anyhow::Result<MergeOutcome> {
        let given_oid = state.refs().branch(given)?.clone();
        if state.refs().is_current_branch(given) {
            return Err(TwigError::SelfMerge.into());
        }
        if !state.index().is_empty() {
            return Err(TwigError::UncommittedChangesPresent.into());
        }

        let current_oid = state.refs().head()?.clone();
        let split_oid = self.commit_graph().split_point(&current_oid, &given_oid)?;
        tracing::debug!(current = %current_oid, given = %given_oid, split = %split_oid, "merge base found");

        if split_oid == given_oid {
            state.refs_mut().update_branch(given, current_oid);
            return Ok(MergeOutcome::AncestorNoop);
        }

        let given_commit = self.database().load_commit(&given_oid)?;

        if split_oid == current_oid {
            let migration = self.plan_checkout(state, &given_commit)?;
            self.apply_migration(&migration)?;
            state.refs_mut().update_head(given_oid);
            state.index_mut().clear();
            return Ok(MergeOutcome::FastForward);
        }

        let current_commit = self.database().load_commit(&current_oid)?;
        let split_commit = self.database().load_commit(&split_oid)?;
        let plan = MergePlan::compute(
            split_commit.files(),
            current_commit.files(),
            given_commit.files(),
        );

        ensure_no_untracked_overwrite(
            &Self::tracked_files(state, &current_commit),
            plan.written_files(),
            &self.workspace().list_files()?,
        )?;

        for (filename, action) in plan.actions() {
            match action {
                FileAction::TakeGiven(blob_oid) => {
                    let blob = self.database().load_blob(blob_oid)?;
                    self.workspace().write_file(filename, blob.content())?;
                    state.index_mut().stage_addition(filename, blob_oid.clone());
                }
                FileAction::Remove => {
                    self.workspace().remove_file(filename)?;
                    state.index_mut().stage_removal(filename);
                }
                FileAction::Conflict {
                    current: current_blob,
                    given: given_blob,
                } => {
                    let current_content = self.blob_content(current_blob.as_ref())?;
                    let given_content = self.blob_content(given_blob.as_ref())?;
                    let rendered =
                        render_conflict(current_content.as_deref(), given_content.as_deref());

                    let blob = Blob::new(filename.clone(), rendered)?;
                    self.database().store(&blob)?;
                    self.workspace().write_file(filename, blob.content())?;
                    state
                        .index_mut()
                        .stage_addition(filename, blob.object_id().clone());
                }
            }
        }

        let message = format!(
            "Merged {} into {}.",
            given,
            state.refs().current_branch()
        );
        let commit = self.write_commit(state, message, vec![current_oid, given_oid])?;

        Ok(MergeOutcome::Merged {
            commit: commit.object_id().clone(),
            conflicts: plan.conflicted_files(),
        })
    }

    pub(crate) fn report_merge(&self, outcome: &MergeOutcome) -> anyhow::Result<()> {
        if let MergeOutcome::Merged { conflicts, .. } = outcome
            && outcome.has_conflicts()
        {
            tracing::warn!(files = ?conflicts, "merge left conflicts");
        }

        let report = outcome.to_string();
        if !report.is_empty() {
            writeln!(self.writer(), "{}", report)?;
        }

        Ok(())
    }

    fn blob_content(&self, oid: Option<&ObjectId>) -> anyhow::Result<Option<Bytes>> {
        match oid {
            Some(oid) => Ok(Some(self.database().load_blob(oid)?.content().clone())),
            None => Ok(None),
        }
    }
}
