use roster_types::{Command, CommandResult};
use thiserror::Error;

use crate::UserRegistry;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScriptError {
    #[error("line {line}: unknown command `{command}`")]
    UnknownCommand { line: usize, command: String },
    #[error("line {line}: `{command}` expects {expected}")]
    WrongArguments {
        line: usize,
        command: &'static str,
        expected: &'static str,
    },
}

/// Parses one command per line. Blank lines and `#` comments are skipped.
/// The first malformed line aborts parsing.
pub fn parse_script(input: &str) -> Result<Vec<Command>, ScriptError> {
    let mut commands = Vec::new();

    for (idx, raw) in input.lines().enumerate() {
        let text = raw.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        commands.push(parse_line(idx + 1, text)?);
    }

    Ok(commands)
}

fn parse_line(line: usize, text: &str) -> Result<Command, ScriptError> {
    let mut words = text.split_whitespace();
    let keyword = words.next().unwrap_or_default().to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let wrong = |command, expected| ScriptError::WrongArguments {
        line,
        command,
        expected,
    };

    match keyword.as_str() {
        "create" => match args.as_slice() {
            [username, email] => Ok(Command::Create {
                username: username.to_string(),
                email: email.to_string(),
            }),
            _ => Err(wrong("create", "<username> <email>")),
        },
        "find" => match args.as_slice() {
            [username] => Ok(Command::Find {
                username: username.to_string(),
            }),
            _ => Err(wrong("find", "<username>")),
        },
        "delete" => match args.as_slice() {
            [username] => Ok(Command::Delete {
                username: username.to_string(),
            }),
            _ => Err(wrong("delete", "<username>")),
        },
        "list" if args.is_empty() => Ok(Command::List),
        "list" => Err(wrong("list", "no arguments")),
        "count" if args.is_empty() => Ok(Command::Count),
        "count" => Err(wrong("count", "no arguments")),
        _ => Err(ScriptError::UnknownCommand {
            line,
            command: keyword,
        }),
    }
}

impl UserRegistry {
    pub fn execute(&mut self, command: &Command) -> CommandResult {
        match command {
            Command::Create { username, email } => CommandResult::Create {
                username: username.clone(),
                created: self.create(username, email),
            },
            Command::Find { username } => CommandResult::Find {
                username: username.clone(),
                user: self.find(username).cloned(),
            },
            Command::Delete { username } => CommandResult::Delete {
                username: username.clone(),
                deleted: self.delete(username),
            },
            Command::List => {
                let list = self.list();
                CommandResult::List {
                    users: list.users,
                    total: list.total,
                }
            }
            Command::Count => CommandResult::Count { total: self.len() },
        }
    }

    pub fn execute_all(&mut self, commands: &[Command]) -> Vec<CommandResult> {
        commands.iter().map(|c| self.execute(c)).collect()
    }
}
