use crate::artifacts::objects::object_id::ObjectId;
use std::fmt;

/// Result of a successful merge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The given branch was already an ancestor; only its ref moved
    AncestorNoop,
    /// The current branch moved forward to the given head
    FastForward,
    /// A merge commit was created, possibly with conflicted files
    Merged {
        commit: ObjectId,
        conflicts: Vec<String>,
    },
}

impl MergeOutcome {
    pub fn has_conflicts(&self) -> bool {
        matches!(self, MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty())
    }
}

impl fmt::Display for MergeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeOutcome::AncestorNoop => {
                write!(f, "Given branch is an ancestor of the current branch.")
            }
            MergeOutcome::FastForward => write!(f, "Current branch fast-forwarded."),
            MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty() => {
                write!(f, "Encountered a merge conflict.")
            }
            // a clean merge commit needs no report
            MergeOutcome::Merged { .. } => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn merged(conflicts: &[&str]) -> MergeOutcome {
        MergeOutcome::Merged {
            commit: ObjectId::try_parse("a".repeat(40)).unwrap(),
            conflicts: conflicts.iter().map(|name| name.to_string()).collect(),
        }
    }

    #[rstest]
    #[case::ancestor(MergeOutcome::AncestorNoop, "Given branch is an ancestor of the current branch.")]
    #[case::fast_forward(MergeOutcome::FastForward, "Current branch fast-forwarded.")]
    #[case::conflicted(merged(&["x"]), "Encountered a merge conflict.")]
    #[case::clean(merged(&[]), "")]
    fn reports(#[case] outcome: MergeOutcome, #[case] expected: &str) {
        assert_eq!(outcome.to_string(), expected);
    }
}
