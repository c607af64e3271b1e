use thiserror::Error;

use shared::{Direction, VoteOutcome};
use crate::directory::AdminDirectory;
use crate::error::DirectoryResult;
use crate::registry::{on_full_connect, AdminRegistry};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Connect { auth: String },
    Vote { voter: String, target: String, want_like: bool },
    Contact { auth: String, text: String },
    Show { auth: String },
    Lookup { voter: String, target: String },
    Reload,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command: {0}")]
    Unknown(String),
    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (name, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();
    let args: Vec<&str> = rest.split_whitespace().collect();

    match (name.to_lowercase().as_str(), args.as_slice()) {
        ("", _) => Err(ParseError::Empty),
        ("connect", [auth]) => Ok(Command::Connect { auth: auth.to_string() }),
        ("connect", _) => Err(ParseError::Usage("connect <auth>")),
        (verb @ ("like" | "dislike"), [voter, target]) => Ok(Command::Vote {
            voter: voter.to_string(),
            target: target.to_string(),
            want_like: verb == "like",
        }),
        ("like", _) => Err(ParseError::Usage("like <voter> <target>")),
        ("dislike", _) => Err(ParseError::Usage("dislike <voter> <target>")),
        ("contact", [auth, ..]) => {
            let text = rest[auth.len()..].trim();
            if text.is_empty() {
                return Err(ParseError::Usage("contact <auth> <text...>"));
            }
            Ok(Command::Contact { auth: auth.to_string(), text: text.to_string() })
        }
        ("contact", _) => Err(ParseError::Usage("contact <auth> <text...>")),
        ("show", [auth]) => Ok(Command::Show { auth: auth.to_string() }),
        ("show", _) => Err(ParseError::Usage("show <auth>")),
        ("vote", [voter, target]) => Ok(Command::Lookup {
            voter: voter.to_string(),
            target: target.to_string(),
        }),
        ("vote", _) => Err(ParseError::Usage("vote <voter> <target>")),
        ("reload", []) => Ok(Command::Reload),
        ("quit" | "exit", []) => Ok(Command::Quit),
        (other, _) => Err(ParseError::Unknown(other.to_string())),
    }
}

/// Runs one command and renders its result as plain text.
pub async fn execute(
    directory: &AdminDirectory,
    registry: &dyn AdminRegistry,
    command: &Command,
) -> DirectoryResult<String> {
    let reply = match command {
        Command::Connect { auth } => match on_full_connect(directory, registry, auth).await? {
            true => format!("{auth}: registered"),
            false if directory.is_listed(auth) => format!("{auth}: already listed"),
            false => format!("{auth}: not an admin"),
        },
        Command::Vote { voter, target, .. } if voter == target => {
            format!("{voter} -> {target}: admins cannot vote for themselves")
        }
        Command::Vote { voter, target, want_like } => {
            match directory.apply_vote(voter, target, *want_like).await? {
                VoteOutcome::Applied => format!("{voter} -> {target}: applied"),
                VoteOutcome::AlreadyVoted => format!("{voter} -> {target}: already voted"),
            }
        }
        Command::Contact { auth, text } => {
            directory.set_contact(auth, text).await?;
            format!("{auth}: contact updated")
        }
        Command::Show { auth } => match directory.snapshot(auth) {
            Some(admin) => format!(
                "{}: likes={} dislikes={} contact={}",
                admin.auth,
                admin.likes,
                admin.dislikes,
                admin.contact.as_deref().unwrap_or("-"),
            ),
            None => format!("{auth}: not listed"),
        },
        Command::Lookup { voter, target } => match directory.vote_direction(voter, target).await? {
            Some(Direction::Like) => format!("{voter} -> {target}: like"),
            Some(Direction::Dislike) => format!("{voter} -> {target}: dislike"),
            None => format!("{voter} -> {target}: no vote"),
        },
        Command::Reload => format!("reloaded {} admins", directory.reload_all().await?),
        Command::Quit => "bye".to_string(),
    };
    Ok(reply)
}
