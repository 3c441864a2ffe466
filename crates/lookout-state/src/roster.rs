use parking_lot::RwLock;

use lookout_core::models::Account;

/// Client mirror of the backend's account list. Always replaced wholesale
/// from a fresh listing, never edited in place, so server-assigned fields
/// can't drift.
#[derive(Default)]
pub struct AccountRoster {
    accounts: RwLock<Vec<Account>>,
}

impl AccountRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in the backend's current list. Returns the new size.
    pub fn replace_all(&self, accounts: Vec<Account>) -> usize {
        let mut slot = self.accounts.write();
        *slot = accounts;
        slot.len()
    }

    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.read().clone()
    }

    /// Distinct monitored user ids in first-seen order. The bulk content
    /// load walks these, one listing call per id.
    pub fn user_ids(&self) -> Vec<String> {
        let accounts = self.accounts.read();
        let mut seen: Vec<String> = Vec::new();
        for account in accounts.iter() {
            if !seen.contains(&account.user_id) {
                seen.push(account.user_id.clone());
            }
        }
        seen
    }

    pub fn len(&self) -> usize {
        self.accounts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use lookout_core::ids::AccountId;

    fn account(id: &str, username: &str, user_id: &str) -> Account {
        Account {
            account_id: AccountId::from_raw(id),
            username: username.into(),
            user_id: user_id.into(),
            status: "active".into(),
            created_at: String::new(),
        }
    }

    #[test]
    fn replace_all_swaps_wholesale() {
        let roster = AccountRoster::new();
        assert!(roster.is_empty());

        let count = roster.replace_all(vec![
            account("a1", "ops", "u100"),
            account("a2", "backup", "u200"),
        ]);
        assert_eq!(count, 2);

        roster.replace_all(vec![account("a3", "fresh", "u300")]);
        let accounts = roster.accounts();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].username, "fresh");
    }

    #[test]
    fn user_ids_distinct_in_first_seen_order() {
        let roster = AccountRoster::new();
        // Two credentials monitoring the same user: one listing call, not two.
        roster.replace_all(vec![
            account("a1", "ops", "u200"),
            account("a2", "backup", "u100"),
            account("a3", "spare", "u200"),
        ]);
        assert_eq!(roster.user_ids(), vec!["u200", "u100"]);
    }

    #[test]
    fn empty_roster_has_no_user_ids() {
        let roster = AccountRoster::new();
        assert!(roster.user_ids().is_empty());
    }
}
