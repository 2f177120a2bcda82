use anyhow::Result;
use clap::{Parser, Subcommand};
use minus::Pager;
use std::io::Write;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::core::error::TwigErrorExt;
use twig::artifacts::core::{PagerWriter, pager_enabled};

/// Environment variable holding the tracing filter
const LOG_ENV: &str = "TWIG_LOG";

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version control system",
    long_about = "twig keeps snapshots of the files in a flat working directory, \
    with branches, three-way merges and replication between repositories on the same machine.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<String>,
    },
    #[command(name = "add", about = "Stage the current content of a file")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command creates a new commit from the staged changes with the specified commit message."
    )]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file, or stage its removal if it is tracked"
    )]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit in the repository")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of the commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and working tree changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore a file or switch branches",
        long_about = "`checkout -- <file>` restores a file from HEAD, \
        `checkout <commit> -- <file>` restores it from a commit and \
        `checkout <branch>` switches to a branch."
    )]
    Checkout {
        #[arg(index = 1, help = "Branch name, or commit id when a file follows")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Move the current branch to a commit and check it out")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
    #[command(name = "add-remote", about = "Register another repository's .twig directory")]
    AddRemote {
        #[arg(index = 1)]
        name: String,
        #[arg(index = 2)]
        path: String,
    },
    #[command(name = "rm-remote", about = "Forget a remote")]
    RmRemote {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "push", about = "Send the current branch to a remote branch")]
    Push {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "fetch", about = "Copy a remote branch into <remote>/<branch>")]
    Fetch {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
    #[command(name = "pull", about = "Fetch a remote branch and merge it")]
    Pull {
        #[arg(index = 1)]
        remote: String,
        #[arg(index = 2)]
        branch: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(&cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.twig_error() {
                Some(twig_error) => eprintln!("{}", twig_error),
                None => eprintln!("fatal: {:#}", error),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Init { path } => {
            let repository = match path {
                Some(path) => Repository::new(path, Box::new(std::io::stdout()))?,
                None => open_current(Box::new(std::io::stdout()))?,
            };

            repository.init()?
        }
        Commands::Add { file } => open_current(Box::new(std::io::stdout()))?.add(file)?,
        Commands::Commit { message } => {
            open_current(Box::new(std::io::stdout()))?.commit(message)?;
        }
        Commands::Rm { file } => open_current(Box::new(std::io::stdout()))?.remove(file)?,
        Commands::Log => paged(|repository| repository.log())?,
        Commands::GlobalLog => paged(|repository| repository.global_log())?,
        Commands::Find { message } => open_current(Box::new(std::io::stdout()))?.find(message)?,
        Commands::Status => {
            open_current(Box::new(std::io::stdout()))?.status()?;
        }
        Commands::Checkout { target, file } => {
            let repository = open_current(Box::new(std::io::stdout()))?;

            match (target, file) {
                (None, Some(file)) => repository.checkout_file(file)?,
                (Some(commit), Some(file)) => repository.checkout_file_from_commit(commit, file)?,
                (Some(branch), None) => repository.checkout_branch(branch)?,
                (None, None) => anyhow::bail!("checkout needs a branch or `-- <file>`"),
            }
        }
        Commands::Branch { name } => open_current(Box::new(std::io::stdout()))?.branch(name)?,
        Commands::RmBranch { name } => {
            open_current(Box::new(std::io::stdout()))?.remove_branch(name)?
        }
        Commands::Reset { commit } => open_current(Box::new(std::io::stdout()))?.reset(commit)?,
        Commands::Merge { branch } => {
            open_current(Box::new(std::io::stdout()))?.merge(branch)?;
        }
        Commands::AddRemote { name, path } => {
            open_current(Box::new(std::io::stdout()))?.add_remote(name, path)?
        }
        Commands::RmRemote { name } => {
            open_current(Box::new(std::io::stdout()))?.remove_remote(name)?
        }
        Commands::Push { remote, branch } => {
            open_current(Box::new(std::io::stdout()))?.push(remote, branch)?
        }
        Commands::Fetch { remote, branch } => {
            open_current(Box::new(std::io::stdout()))?.fetch(remote, branch)?
        }
        Commands::Pull { remote, branch } => {
            open_current(Box::new(std::io::stdout()))?.pull(remote, branch)?;
        }
    }

    Ok(())
}

fn open_current(writer: Box<dyn Write>) -> Result<Repository> {
    let pwd = std::env::current_dir()?;
    Repository::new(&pwd.to_string_lossy(), writer)
}

/// Run a history command through the pager when stdout is a terminal
fn paged(command: impl FnOnce(&Repository) -> Result<()>) -> Result<()> {
    if !pager_enabled() {
        return command(&open_current(Box::new(std::io::stdout()))?);
    }

    let pager = Pager::new();
    command(&open_current(Box::new(PagerWriter::new(pager.clone())))?)?;
    minus::page_all(pager)?;

    Ok(())
}
