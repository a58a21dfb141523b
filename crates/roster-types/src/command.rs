use serde::{Deserialize, Serialize};

use crate::User;

// ============================================================================
// Commands
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Create { username: String, email: String },
    Find { username: String },
    Delete { username: String },
    List,
    Count,
}

// ============================================================================
// Results
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandResult {
    Create {
        username: String,
        created: bool,
    },
    Find {
        username: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        user: Option<User>,
    },
    Delete {
        username: String,
        deleted: bool,
    },
    List {
        #[serde(default)]
        users: Vec<User>,
        total: usize,
    },
    Count {
        total: usize,
    },
}

impl CommandResult {
    /// False for the soft failures: duplicate create, missing delete, absent find.
    pub fn is_success(&self) -> bool {
        match self {
            CommandResult::Create { created, .. } => *created,
            CommandResult::Find { user, .. } => user.is_some(),
            CommandResult::Delete { deleted, .. } => *deleted,
            CommandResult::List { .. } | CommandResult::Count { .. } => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_tagging() {
        let cmd = Command::Create {
            username: "john_doe".to_string(),
            email: "john@example.com".to_string(),
        };
        let value = serde_json::to_value(&cmd).unwrap();
        assert_eq!(value["command"], "create");
        assert_eq!(value["username"], "john_doe");
    }

    #[test]
    fn test_find_miss_omits_user() {
        let result = CommandResult::Find {
            username: "ghost".to_string(),
            user: None,
        };
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"command":"find","username":"ghost"}"#);
        assert!(!result.is_success());

        let back: CommandResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_soft_failures() {
        assert!(!CommandResult::Create {
            username: "john_doe".to_string(),
            created: false
        }
        .is_success());
        assert!(CommandResult::Count { total: 0 }.is_success());
    }
}
