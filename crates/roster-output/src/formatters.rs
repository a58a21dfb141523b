use roster_types::*;

pub fn format_user(user: &User) -> String {
    format!("User: {} created {}", user, user.created_at_iso())
}

pub fn format_user_list(users: &[User]) -> String {
    let mut lines = vec![format!("Listing all users ({} total):", users.len())];
    for user in users {
        lines.push(format!("User: {}", user));
    }
    lines.join("\n")
}

pub fn format_count(total: usize) -> String {
    format!("Total users: {}", total)
}

/// Text rendering of a command outcome. Create and delete report through
/// diagnostics only, so they have nothing to print.
pub fn format_command_result(result: &CommandResult) -> Option<String> {
    match result {
        CommandResult::Create { .. } | CommandResult::Delete { .. } => None,
        CommandResult::Find {
            user: Some(user), ..
        } => Some(format_user(user)),
        CommandResult::Find {
            username,
            user: None,
        } => Some(format!("User {} not found", username)),
        CommandResult::List { users, .. } => Some(format_user_list(users)),
        CommandResult::Count { total } => Some(format_count(*total)),
    }
}

pub fn format_command_result_json(result: &CommandResult) -> serde_json::Result<String> {
    serde_json::to_string(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn user(name: &str, email: &str) -> User {
        let ts = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        User::new(name, email, ts)
    }

    #[test]
    fn test_format_find() {
        let hit = CommandResult::Find {
            username: "john_doe".to_string(),
            user: Some(user("john_doe", "john@example.com")),
        };
        assert_eq!(
            format_command_result(&hit).unwrap(),
            "User: john_doe (john@example.com) created 2024-01-15T10:30:00.000000Z"
        );

        let miss = CommandResult::Find {
            username: "ghost".to_string(),
            user: None,
        };
        assert_eq!(format_command_result(&miss).unwrap(), "User ghost not found");
    }

    #[test]
    fn test_format_list() {
        let users = vec![
            user("john_doe", "john@example.com"),
            user("jane_smith", "jane@example.com"),
        ];
        let result = CommandResult::List {
            total: users.len(),
            users,
        };
        assert_eq!(
            format_command_result(&result).unwrap(),
            "Listing all users (2 total):\nUser: john_doe (john@example.com)\nUser: jane_smith (jane@example.com)"
        );
        assert_eq!(format_user_list(&[]), "Listing all users (0 total):");
    }

    #[test]
    fn test_mutations_print_nothing() {
        let create = CommandResult::Create {
            username: "john_doe".to_string(),
            created: true,
        };
        let delete = CommandResult::Delete {
            username: "john_doe".to_string(),
            deleted: false,
        };
        assert!(format_command_result(&create).is_none());
        assert!(format_command_result(&delete).is_none());
        assert_eq!(
            format_command_result(&CommandResult::Count { total: 3 }).unwrap(),
            "Total users: 3"
        );
    }

    #[test]
    fn test_json_output() {
        let result = CommandResult::Delete {
            username: "john_doe".to_string(),
            deleted: true,
        };
        assert_eq!(
            format_command_result_json(&result).unwrap(),
            r#"{"command":"delete","username":"john_doe","deleted":true}"#
        );
    }
}
