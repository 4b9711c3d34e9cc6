// Scripted in-memory stand-in for the GitHub API, shared by the
// integration tests. Behavior is driven entirely by the public fields;
// every call is recorded so tests can assert on what was issued.
#![allow(dead_code)]

use gitflock_cli::api::{Account, ApiError, FollowApi, SearchResults};
use std::cell::RefCell;
use std::collections::HashSet;

pub fn account(id: u64, login: &str) -> Account {
    Account {
        id,
        login: login.to_string(),
        avatar_url: String::new(),
        html_url: String::new(),
        name: None,
        bio: None,
        followers: 0,
        following: 0,
        public_repos: 0,
        created_at: None,
    }
}

pub fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        body: "scripted failure".to_string(),
    }
}

#[derive(Default)]
pub struct FakeApi {
    /// Account resolved by `current_user`; `None` makes the call fail.
    pub viewer: Option<Account>,
    /// Returned for every search call.
    pub search_results: Vec<Account>,
    pub fail_search: bool,
    /// Following-list pages fetched in order; pages beyond the script
    /// are empty.
    pub following_pages: Vec<Vec<Account>>,
    pub fail_following: bool,
    /// Logins the viewer already follows.
    pub already_following: HashSet<String>,
    /// Logins that follow the viewer back.
    pub follows_back: HashSet<String>,
    /// Logins whose relationship checks error.
    pub fail_check: HashSet<String>,
    /// Logins whose follow/unfollow calls error.
    pub fail_mutate: HashSet<String>,

    pub follow_calls: RefCell<Vec<String>>,
    pub unfollow_calls: RefCell<Vec<String>>,
    pub search_calls: RefCell<Vec<(String, u32)>>,
    pub following_calls: RefCell<Vec<u32>>,
}

impl FollowApi for FakeApi {
    fn current_user(&self) -> Result<Account, ApiError> {
        self.viewer.clone().ok_or_else(server_error)
    }

    fn following(&self, _login: &str, page: u32) -> Result<Vec<Account>, ApiError> {
        self.following_calls.borrow_mut().push(page);
        if self.fail_following {
            return Err(server_error());
        }
        Ok(self
            .following_pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }

    fn is_following(&self, login: &str) -> Result<bool, ApiError> {
        if self.fail_check.contains(login) {
            return Err(server_error());
        }
        Ok(self.already_following.contains(login))
    }

    fn is_user_following(&self, source: &str, _target: &str) -> Result<bool, ApiError> {
        if self.fail_check.contains(source) {
            return Err(server_error());
        }
        Ok(self.follows_back.contains(source))
    }

    fn follow(&self, login: &str) -> Result<(), ApiError> {
        self.follow_calls.borrow_mut().push(login.to_string());
        if self.fail_mutate.contains(login) {
            return Err(server_error());
        }
        Ok(())
    }

    fn unfollow(&self, login: &str) -> Result<(), ApiError> {
        self.unfollow_calls.borrow_mut().push(login.to_string());
        if self.fail_mutate.contains(login) {
            return Err(server_error());
        }
        Ok(())
    }

    fn search_users(&self, query: &str, page: u32) -> Result<SearchResults, ApiError> {
        self.search_calls.borrow_mut().push((query.to_string(), page));
        if self.fail_search {
            return Err(server_error());
        }
        Ok(SearchResults {
            total_count: self.search_results.len() as u64,
            incomplete_results: false,
            items: self.search_results.clone(),
        })
    }
}
