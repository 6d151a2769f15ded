use std::collections::HashMap;
use subtle::ConstantTimeEq;

/// Decides whether a username/password pair is a known account.
pub trait AccountDirectory: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> bool;
}

/// Read-only account table built once at startup from configuration.
#[derive(Debug, Clone)]
pub struct StaticAccounts {
    accounts: HashMap<String, String>,
}

impl StaticAccounts {
    pub fn new(accounts: HashMap<String, String>) -> Self {
        Self { accounts }
    }
}

impl Default for StaticAccounts {
    fn default() -> Self {
        Self::new(default_accounts())
    }
}

impl AccountDirectory for StaticAccounts {
    fn verify(&self, username: &str, password: &str) -> bool {
        self.accounts
            .get(username)
            .is_some_and(|expected| bool::from(expected.as_bytes().ct_eq(password.as_bytes())))
    }
}

/// Demonstration accounts used when no table is configured.
pub fn default_accounts() -> HashMap<String, String> {
    HashMap::from([
        ("demo1".to_string(), "1234".to_string()),
        ("demo2".to_string(), "1234".to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_accepts_demo_accounts() {
        let accounts = StaticAccounts::default();
        assert!(accounts.verify("demo1", "1234"));
        assert!(accounts.verify("demo2", "1234"));
    }

    #[test]
    fn rejects_unknown_user_and_wrong_password() {
        let accounts = StaticAccounts::default();
        assert!(!accounts.verify("demo3", "1234"));
        assert!(!accounts.verify("demo1", "12345"));
        assert!(!accounts.verify("demo1", ""));
        assert!(!accounts.verify("", ""));
    }
}
