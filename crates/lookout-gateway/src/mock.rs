use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use lookout_core::errors::DashboardError;
use lookout_core::ids::{AccountId, NoteId};
use lookout_core::models::{Account, ContentItem, FetchRequest, NewAccount, StatisticsSnapshot};

use crate::Gateway;

type Script<T> = Mutex<VecDeque<Result<T, DashboardError>>>;

fn pop<T>(script: &Script<T>, op: &'static str) -> Result<T, DashboardError> {
    script.lock().pop_front().unwrap_or_else(|| {
        Err(DashboardError::transport(format!(
            "MockGateway: no scripted response for {op}"
        )))
    })
}

/// Per-operation call tally, loaded as a plain snapshot for assertions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub list_accounts: usize,
    pub add_account: usize,
    pub delete_account: usize,
    pub trigger_fetch: usize,
    pub list_user_contents: usize,
    pub get_content: usize,
    pub convert_content: usize,
    pub get_statistics: usize,
}

#[derive(Default)]
struct Counters {
    list_accounts: AtomicUsize,
    add_account: AtomicUsize,
    delete_account: AtomicUsize,
    trigger_fetch: AtomicUsize,
    list_user_contents: AtomicUsize,
    get_content: AtomicUsize,
    convert_content: AtomicUsize,
    get_statistics: AtomicUsize,
}

#[derive(Default)]
struct Scripts {
    list_accounts: Script<Vec<Account>>,
    add_account: Script<()>,
    delete_account: Script<()>,
    trigger_fetch: Script<String>,
    list_user_contents: Script<Vec<ContentItem>>,
    get_content: Script<ContentItem>,
    convert_content: Script<ContentItem>,
    get_statistics: Script<StatisticsSnapshot>,
}

/// Gateway returning pre-scripted responses in sequence, for deterministic
/// tests without a backend. An unscripted call yields a transport error, so
/// a test that issues more calls than it scripted fails loudly.
#[derive(Default)]
pub struct MockGateway {
    scripts: Scripts,
    counters: Counters,
    fetch_requests: Mutex<Vec<FetchRequest>>,
    added_accounts: Mutex<Vec<NewAccount>>,
    deleted_ids: Mutex<Vec<AccountId>>,
    converted_ids: Mutex<Vec<NoteId>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_list_accounts(&self, result: Result<Vec<Account>, DashboardError>) {
        self.scripts.list_accounts.lock().push_back(result);
    }

    pub fn script_add_account(&self, result: Result<(), DashboardError>) {
        self.scripts.add_account.lock().push_back(result);
    }

    pub fn script_delete_account(&self, result: Result<(), DashboardError>) {
        self.scripts.delete_account.lock().push_back(result);
    }

    pub fn script_trigger_fetch(&self, result: Result<String, DashboardError>) {
        self.scripts.trigger_fetch.lock().push_back(result);
    }

    pub fn script_list_user_contents(&self, result: Result<Vec<ContentItem>, DashboardError>) {
        self.scripts.list_user_contents.lock().push_back(result);
    }

    pub fn script_get_content(&self, result: Result<ContentItem, DashboardError>) {
        self.scripts.get_content.lock().push_back(result);
    }

    pub fn script_convert_content(&self, result: Result<ContentItem, DashboardError>) {
        self.scripts.convert_content.lock().push_back(result);
    }

    pub fn script_get_statistics(&self, result: Result<StatisticsSnapshot, DashboardError>) {
        self.scripts.get_statistics.lock().push_back(result);
    }

    pub fn call_counts(&self) -> CallCounts {
        CallCounts {
            list_accounts: self.counters.list_accounts.load(Ordering::Relaxed),
            add_account: self.counters.add_account.load(Ordering::Relaxed),
            delete_account: self.counters.delete_account.load(Ordering::Relaxed),
            trigger_fetch: self.counters.trigger_fetch.load(Ordering::Relaxed),
            list_user_contents: self.counters.list_user_contents.load(Ordering::Relaxed),
            get_content: self.counters.get_content.load(Ordering::Relaxed),
            convert_content: self.counters.convert_content.load(Ordering::Relaxed),
            get_statistics: self.counters.get_statistics.load(Ordering::Relaxed),
        }
    }

    /// Fetch payloads in the order they were issued.
    pub fn fetch_requests(&self) -> Vec<FetchRequest> {
        self.fetch_requests.lock().clone()
    }

    pub fn added_accounts(&self) -> Vec<NewAccount> {
        self.added_accounts.lock().clone()
    }

    pub fn deleted_ids(&self) -> Vec<AccountId> {
        self.deleted_ids.lock().clone()
    }

    pub fn converted_ids(&self) -> Vec<NoteId> {
        self.converted_ids.lock().clone()
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn list_accounts(&self) -> Result<Vec<Account>, DashboardError> {
        self.counters.list_accounts.fetch_add(1, Ordering::Relaxed);
        pop(&self.scripts.list_accounts, "list_accounts")
    }

    async fn add_account(&self, account: &NewAccount) -> Result<(), DashboardError> {
        self.counters.add_account.fetch_add(1, Ordering::Relaxed);
        self.added_accounts.lock().push(account.clone());
        pop(&self.scripts.add_account, "add_account")
    }

    async fn delete_account(&self, account_id: &AccountId) -> Result<(), DashboardError> {
        self.counters.delete_account.fetch_add(1, Ordering::Relaxed);
        self.deleted_ids.lock().push(account_id.clone());
        pop(&self.scripts.delete_account, "delete_account")
    }

    async fn trigger_fetch(&self, request: &FetchRequest) -> Result<String, DashboardError> {
        self.counters.trigger_fetch.fetch_add(1, Ordering::Relaxed);
        self.fetch_requests.lock().push(request.clone());
        pop(&self.scripts.trigger_fetch, "trigger_fetch")
    }

    async fn list_user_contents(&self, _user_id: &str) -> Result<Vec<ContentItem>, DashboardError> {
        self.counters.list_user_contents.fetch_add(1, Ordering::Relaxed);
        pop(&self.scripts.list_user_contents, "list_user_contents")
    }

    async fn get_content(&self, _note_id: &NoteId) -> Result<ContentItem, DashboardError> {
        self.counters.get_content.fetch_add(1, Ordering::Relaxed);
        pop(&self.scripts.get_content, "get_content")
    }

    async fn convert_content(&self, note_id: &NoteId) -> Result<ContentItem, DashboardError> {
        self.counters.convert_content.fetch_add(1, Ordering::Relaxed);
        self.converted_ids.lock().push(note_id.clone());
        pop(&self.scripts.convert_content, "convert_content")
    }

    async fn get_statistics(&self) -> Result<StatisticsSnapshot, DashboardError> {
        self.counters.get_statistics.fetch_add(1, Ordering::Relaxed);
        pop(&self.scripts.get_statistics, "get_statistics")
    }
}
