use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::store::KvStore;

const USERS_KEY: &str = "users";
const CURRENT_USER_KEY: &str = "currentUser";
const MIN_PASSWORD_LEN: usize = 6;

/// A registered user. Passwords are stored in plaintext in the same local
/// store as everything else; this is convenience sign-in for a single-user
/// local app, not real authentication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct UserRecord {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password: String,
}

pub(crate) struct Auth<'a> {
    kv: &'a KvStore,
}

impl<'a> Auth<'a> {
    pub(crate) fn new(kv: &'a KvStore) -> Self {
        Self { kv }
    }

    fn users(&self) -> Result<Vec<UserRecord>> {
        Ok(self.kv.get_json(USERS_KEY)?.unwrap_or_default())
    }

    pub(crate) fn sign_up(
        &self,
        name: &str,
        email: &str,
        password: &str,
        confirm: &str,
    ) -> Result<()> {
        let name = name.trim();
        let email = email.trim().to_lowercase();

        if name.is_empty() || email.is_empty() || password.is_empty() {
            anyhow::bail!("Please fill in all fields");
        }
        if password.len() < MIN_PASSWORD_LEN {
            anyhow::bail!("Password must be at least {MIN_PASSWORD_LEN} characters long");
        }
        if password != confirm {
            anyhow::bail!("Passwords do not match");
        }

        let mut users = self.users()?;
        if users.iter().any(|u| u.email == email) {
            anyhow::bail!("An account with this email already exists");
        }

        users.push(UserRecord {
            name: name.to_string(),
            email: email.clone(),
            password: password.to_string(),
        });
        self.kv.set_json(USERS_KEY, &users)?;
        self.set_current_user(&email)?;
        Ok(())
    }

    pub(crate) fn log_in(&self, email: &str, password: &str) -> Result<()> {
        let email = email.trim().to_lowercase();
        let users = self.users()?;
        let found = users
            .iter()
            .any(|u| u.email == email && u.password == password);
        if !found {
            anyhow::bail!("Invalid email or password");
        }
        self.set_current_user(&email)
    }

    pub(crate) fn current_user(&self) -> Result<Option<String>> {
        self.kv.get(CURRENT_USER_KEY)
    }

    pub(crate) fn set_current_user(&self, email: &str) -> Result<()> {
        self.kv.set(CURRENT_USER_KEY, email)
    }

    pub(crate) fn clear_current_user(&self) -> Result<()> {
        self.kv.remove(CURRENT_USER_KEY)
    }

    pub(crate) fn is_logged_in(&self) -> Result<bool> {
        Ok(self.current_user()?.is_some())
    }

    pub(crate) fn user_name(&self, email: &str) -> Result<Option<String>> {
        Ok(self
            .users()?
            .into_iter()
            .find(|u| u.email == email)
            .map(|u| u.name))
    }
}
