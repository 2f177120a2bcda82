//! Commit graph walks
//!
//! The graph is never materialized. Every walk pulls commits on demand through a
//! loader function, so the same code runs against the object database and against
//! in-memory fixtures.
//!
//! ## Split point
//!
//! The split point of two heads A and B is found in two passes:
//!
//! 1. Collect every ancestor of B (B included)
//! 2. Walk breadth-first from A through both parents, returning the first commit
//!    that is also an ancestor of B
//!
//! The result is the common ancestor nearest to A in BFS order. Under criss-cross
//! histories this is not necessarily a lowest common ancestor; twig only produces
//! simple two-parent merges, where it is.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let graph = CommitGraph::new(|oid| Ok(database.load_commit(oid)?.slim()));
//! let base = graph.split_point(&head, &other)?;
//! ```

use crate::artifacts::core::error::TwigError;
use crate::artifacts::objects::commit::SlimCommit;
use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, HashSet, VecDeque};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    struct VisitState: u8 {
        const NONE = 0b00;
        const ANCESTOR_OF_TARGET = 0b01;
        const QUEUED_FROM_SOURCE = 0b10;
    }
}

/// Walks a commit graph through a commit loader
pub struct CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    commit_loader: CommitLoaderFn,
}

impl<CommitLoaderFn> CommitGraph<CommitLoaderFn>
where
    CommitLoaderFn: Fn(&ObjectId) -> anyhow::Result<SlimCommit>,
{
    pub fn new(commit_loader: CommitLoaderFn) -> Self {
        Self { commit_loader }
    }

    /// Every commit reachable from `head` through any parent, `head` included
    pub fn ancestors(&self, head: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut ancestors = HashSet::from([head.clone()]);
        let mut worklist = vec![head.clone()];

        while let Some(commit_id) = worklist.pop() {
            let commit = (self.commit_loader)(&commit_id)?;

            for parent_id in commit.parents {
                if ancestors.insert(parent_id.clone()) {
                    worklist.push(parent_id);
                }
            }
        }

        Ok(ancestors)
    }

    /// Whether `ancestor` is reachable from `descendant` (or equal to it)
    pub fn is_ancestor(&self, ancestor: &ObjectId, descendant: &ObjectId) -> anyhow::Result<bool> {
        if ancestor == descendant {
            return Ok(true);
        }

        Ok(self.ancestors(descendant)?.contains(ancestor))
    }

    /// Common ancestor of `source` and `target` nearest to `source` in BFS order
    pub fn split_point(&self, source: &ObjectId, target: &ObjectId) -> anyhow::Result<ObjectId> {
        let mut states = self
            .ancestors(target)?
            .into_iter()
            .map(|oid| (oid, VisitState::ANCESTOR_OF_TARGET))
            .collect::<HashMap<_, _>>();

        let mut queue = VecDeque::from([source.clone()]);
        *states.entry(source.clone()).or_insert(VisitState::NONE) |=
            VisitState::QUEUED_FROM_SOURCE;

        while let Some(commit_id) = queue.pop_front() {
            let state = states.get(&commit_id).copied().unwrap_or(VisitState::NONE);
            tracing::trace!(commit = %commit_id, ?state, "visiting commit");

            if state.contains(VisitState::ANCESTOR_OF_TARGET) {
                tracing::debug!(%source, %target, split_point = %commit_id, "found split point");
                return Ok(commit_id);
            }

            let commit = (self.commit_loader)(&commit_id)?;
            for parent_id in commit.parents {
                let parent_state = states.entry(parent_id.clone()).or_insert(VisitState::NONE);

                if !parent_state.contains(VisitState::QUEUED_FROM_SOURCE) {
                    *parent_state |= VisitState::QUEUED_FROM_SOURCE;
                    queue.push_back(parent_id);
                }
            }
        }

        Err(TwigError::NoCommonAncestor.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    /// In-memory commit store for testing
    #[derive(Debug, Clone, Default)]
    struct InMemoryCommitStore {
        commits: HashMap<ObjectId, Vec<ObjectId>>,
    }

    impl InMemoryCommitStore {
        fn add_commit(&mut self, name: &str, parents: &[&str]) {
            self.commits
                .insert(oid(name), parents.iter().map(|parent| oid(parent)).collect());
        }

        fn graph(&self) -> CommitGraph<impl Fn(&ObjectId) -> anyhow::Result<SlimCommit> + '_> {
            CommitGraph::new(|commit_id: &ObjectId| {
                let parents = self
                    .commits
                    .get(commit_id)
                    .cloned()
                    .ok_or_else(|| anyhow::anyhow!("unknown commit {}", commit_id))?;
                Ok(SlimCommit {
                    oid: commit_id.clone(),
                    parents,
                })
            })
        }
    }

    /// Readable names mapped onto ids: "a" -> "aaaa...", "b1" -> "b1b1..."
    fn oid(name: &str) -> ObjectId {
        let hex = name
            .bytes()
            .map(|byte| format!("{:02x}", byte))
            .collect::<String>();
        ObjectId::try_parse(format!("{:0<40}", hex)).unwrap()
    }

    //     a
    //    / \
    //   b   c
    //   |   |
    //   d   e
    //    \ /
    //     f   (merge of d and e)
    //     |
    //     g
    #[fixture]
    fn diamond() -> InMemoryCommitStore {
        let mut store = InMemoryCommitStore::default();
        store.add_commit("a", &[]);
        store.add_commit("b", &["a"]);
        store.add_commit("c", &["a"]);
        store.add_commit("d", &["b"]);
        store.add_commit("e", &["c"]);
        store.add_commit("f", &["d", "e"]);
        store.add_commit("g", &["f"]);
        store
    }

    #[rstest]
    fn ancestors_follow_both_parents(diamond: InMemoryCommitStore) -> anyhow::Result<()> {
        let ancestors = diamond.graph().ancestors(&oid("f"))?;

        let expected = ["a", "b", "c", "d", "e", "f"]
            .iter()
            .map(|name| oid(name))
            .collect::<HashSet<_>>();
        assert_eq!(ancestors, expected);
        Ok(())
    }

    #[rstest]
    #[case::siblings("d", "e", "a")]
    #[case::linear("g", "b", "b")]
    #[case::descendant_first("b", "g", "b")]
    #[case::same_commit("e", "e", "e")]
    #[case::merge_side("g", "c", "c")]
    fn split_points(
        diamond: InMemoryCommitStore,
        #[case] source: &str,
        #[case] target: &str,
        #[case] expected: &str,
    ) -> anyhow::Result<()> {
        let split_point = diamond.graph().split_point(&oid(source), &oid(target))?;

        assert_eq!(split_point, oid(expected));
        Ok(())
    }

    #[rstest]
    fn disconnected_histories_have_no_split_point(mut diamond: InMemoryCommitStore) {
        diamond.add_commit("z", &[]);

        let error = diamond.graph().split_point(&oid("g"), &oid("z")).unwrap_err();
        assert_eq!(
            error.downcast_ref::<TwigError>(),
            Some(&TwigError::NoCommonAncestor)
        );
    }

    #[rstest]
    fn ancestry_checks(diamond: InMemoryCommitStore) -> anyhow::Result<()> {
        let graph = diamond.graph();

        assert!(graph.is_ancestor(&oid("a"), &oid("g"))?);
        assert!(graph.is_ancestor(&oid("e"), &oid("e"))?);
        assert!(!graph.is_ancestor(&oid("d"), &oid("e"))?);
        Ok(())
    }

    /// Random histories: commit i picks one or two parents among commits before it
    fn random_history() -> impl Strategy<Value = Vec<Vec<usize>>> {
        (2usize..24).prop_flat_map(|size| {
            let parents = (1..size)
                .map(|index| proptest::collection::vec(0..index, 1..=2))
                .collect::<Vec<_>>();
            parents.prop_map(|mut parents| {
                parents.insert(0, vec![]);
                parents
                    .into_iter()
                    .map(|mut choice| {
                        choice.dedup();
                        choice
                    })
                    .collect()
            })
        })
    }

    fn store_from(history: &[Vec<usize>]) -> InMemoryCommitStore {
        let mut store = InMemoryCommitStore::default();
        for (index, parents) in history.iter().enumerate() {
            let parents = parents.iter().map(|parent| format!("c{}", parent)).collect::<Vec<_>>();
            let parents = parents.iter().map(String::as_str).collect::<Vec<_>>();
            store.add_commit(&format!("c{}", index), &parents);
        }
        store
    }

    proptest! {
        #[test]
        fn ancestors_are_reflexive_and_transitive(history in random_history()) {
            let store = store_from(&history);
            let graph = store.graph();
            let head = oid(&format!("c{}", history.len() - 1));

            let ancestors = graph.ancestors(&head).unwrap();
            prop_assert!(ancestors.contains(&head));
            for ancestor in &ancestors {
                prop_assert!(graph.ancestors(ancestor).unwrap().is_subset(&ancestors));
            }
        }

        #[test]
        fn split_point_is_a_common_ancestor(
            history in random_history(),
            picks in (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
        ) {
            let store = store_from(&history);
            let graph = store.graph();
            let source = oid(&format!("c{}", picks.0.index(history.len())));
            let target = oid(&format!("c{}", picks.1.index(history.len())));

            let split_point = graph.split_point(&source, &target).unwrap();
            prop_assert!(graph.ancestors(&source).unwrap().contains(&split_point));
            prop_assert!(graph.ancestors(&target).unwrap().contains(&split_point));
        }
    }
}
