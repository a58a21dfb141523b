use chrono::Utc;
use roster_types::{User, UserList};
use tracing::{debug, error, info, warn};

/// In-memory collection of users, kept in insertion order.
///
/// At most one record exists per username: `create` refuses duplicates.
/// Nothing survives the owning process; `database_url` is carried as
/// configuration only.
#[derive(Debug)]
pub struct UserRegistry {
    database_url: String,
    users: Vec<User>,
}

impl UserRegistry {
    pub fn new(database_url: impl Into<String>) -> Self {
        let database_url = database_url.into();
        debug!("UserRegistry initialized ({})", database_url);
        Self {
            database_url,
            users: Vec::new(),
        }
    }

    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Adds a user stamped with the current time. Returns false, leaving the
    /// registry untouched, if the username is already taken.
    pub fn create(&mut self, username: &str, email: &str) -> bool {
        if self.users.iter().any(|u| u.username == username) {
            error!("User {} already exists", username);
            return false;
        }

        self.users.push(User::new(username, email, Utc::now()));
        info!("Created user {}", username);
        true
    }

    pub fn find(&self, username: &str) -> Option<&User> {
        let found = self.users.iter().find(|u| u.username == username);
        if found.is_none() {
            debug!("User {} not found", username);
        }
        found
    }

    pub fn delete(&mut self, username: &str) -> bool {
        let Some(index) = self.users.iter().position(|u| u.username == username) else {
            warn!("User {} not found", username);
            return false;
        };

        self.users.remove(index);
        info!("Deleted user {}", username);
        true
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn list(&self) -> UserList {
        UserList::new(self.users.clone())
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}
