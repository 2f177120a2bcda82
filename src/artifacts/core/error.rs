//! User-facing failure kinds
//!
//! Every precondition an operation checks surfaces as one of these. Plumbing keeps
//! returning `anyhow::Result`; callers classify with `downcast_ref::<TwigError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TwigError {
    #[error("A twig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Not in an initialized twig directory.")]
    NotInitialized,

    #[error("object not found: {0}")]
    ObjectNotFound(String),

    #[error("File does not exist.")]
    FileNotFoundInWorkingCopy(String),

    #[error("Please enter a commit message.")]
    EmptyCommitMessage,

    #[error("No changes added to the commit.")]
    NothingStagedToCommit,

    #[error("No commit with that id exists.")]
    UnknownOrAmbiguousCommitId(String),

    #[error("File does not exist in that commit.")]
    FileNotInCommit(String),

    #[error("A branch with that name does not exist.")]
    UnknownBranch(String),

    #[error("A branch with that name already exists.")]
    BranchAlreadyExists(String),

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("No need to checkout the current branch.")]
    CannotCheckoutCurrentBranch,

    #[error("No reason to remove the file.")]
    NothingToRemove(String),

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedFileWouldBeOverwritten(String),

    #[error("You have uncommitted changes.")]
    UncommittedChangesPresent,

    #[error("Cannot merge a branch with itself.")]
    SelfMerge,

    #[error("No common ancestor.")]
    NoCommonAncestor,

    #[error("A remote with that name does not exist.")]
    RemoteNotFound(String),

    #[error("Remote directory not found.")]
    RemoteDirectoryNotFound(PathBuf),

    #[error("A remote with that name already exists.")]
    RemoteAlreadyExists(String),

    #[error("That remote does not have that branch.")]
    RemoteMissingBranch(String),

    #[error("Please pull down remote changes before pushing.")]
    RemoteNeedsPull,

    #[error("Found no commit with that message.")]
    NoCommitWithMessage,

    #[error("corrupted repository state: {0}")]
    CorruptedState(String),
}

/// Extension for classifying `anyhow` errors raised by repository operations
pub trait TwigErrorExt {
    fn twig_error(&self) -> Option<&TwigError>;
}

impl TwigErrorExt for anyhow::Error {
    fn twig_error(&self) -> Option<&TwigError> {
        self.downcast_ref::<TwigError>()
    }
}
