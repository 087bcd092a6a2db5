//! Core client for the tracker's user/group administration REST API.
//!
//! The [`Connector`] owns a transport, a base URL, the fixed endpoint
//! table, and a bounded [`PageCache`] for group search results. Every
//! operation builds one request, issues it through the transport, and
//! checks the upstream status against the documented expected value.

pub mod cache;
pub mod error;

use std::sync::Arc;

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::ports::{HttpRequest, HttpResponse, HttpTransport, Method};

pub use cache::PageCache;
pub use error::ConnectorError;

/// Group that every account belongs to, used by [`Connector::all_users`].
const DEFAULT_ALL_GROUP: &str = "jira-users";

/// Upper bound on rows pre-fetched for one group search query.
const DEFAULT_SEARCH_RANGE: usize = 5000;

/// Default number of distinct queries the page cache retains.
const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Logical operation names mapped to URL path suffixes.
///
/// Fixed at construction, never mutated. `UserPicker` is part of the table
/// even though no operation currently uses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Session create/delete (login, logout).
    Session,
    /// Group CRUD.
    Group,
    /// Group membership.
    UserGroup,
    /// User CRUD.
    User,
    /// User search.
    Users,
    /// User picker search.
    UserPicker,
    /// Group picker search.
    GroupPicker,
}

impl Endpoint {
    /// URL path suffix for this operation, relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Session => "/rest/auth/1/session",
            Self::Group => "/rest/api/2/group",
            Self::UserGroup => "/rest/api/2/group/user",
            Self::User => "/rest/api/2/user",
            Self::Users => "/rest/api/2/user/search",
            Self::UserPicker => "/rest/api/2/user/picker",
            Self::GroupPicker => "/rest/api/2/groups/picker",
        }
    }
}

/// Raw upstream reply for an operation that completed with the expected
/// status: the status itself plus the unparsed body text.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The status code upstream returned.
    pub status: u16,
    /// The raw response body.
    pub body: String,
}

/// One row of a group search result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    /// The group name.
    pub name: String,
    /// The highlighted HTML label upstream renders for this match.
    pub html: String,
}

/// Shape of the group-picker response body.
#[derive(Deserialize)]
struct PickerResponse {
    groups: Vec<PickerGroup>,
}

/// One group inside a picker response.
#[derive(Deserialize)]
struct PickerGroup {
    name: String,
    html: String,
}

/// Client for the tracker's user/group administration API.
///
/// Holds one persistent session for the life of the process. Not designed
/// for concurrent use; group search mutates the page cache.
pub struct Connector {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    all_group: String,
    search_range: usize,
    cache: PageCache,
}

impl Connector {
    /// Creates a connector for the tracker at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>, transport: Arc<dyn HttpTransport>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            transport,
            base_url,
            all_group: DEFAULT_ALL_GROUP.to_string(),
            search_range: DEFAULT_SEARCH_RANGE,
            cache: PageCache::new(DEFAULT_CACHE_CAPACITY),
        }
    }

    /// Overrides the name of the group that holds every account.
    #[must_use]
    pub fn with_all_group(mut self, name: impl Into<String>) -> Self {
        self.all_group = name.into();
        self
    }

    /// Overrides the pre-fetch size for group searches.
    #[must_use]
    pub fn with_search_range(mut self, range: usize) -> Self {
        self.search_range = range;
        self
    }

    /// Replaces the page cache, e.g. to change its capacity.
    #[must_use]
    pub fn with_cache(mut self, cache: PageCache) -> Self {
        self.cache = cache;
        self
    }

    fn url(&self, endpoint: Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint.path())
    }

    fn expect(expected: u16, response: HttpResponse) -> Result<ApiResponse, ConnectorError> {
        if response.status == expected {
            Ok(ApiResponse { status: response.status, body: response.body })
        } else {
            Err(ConnectorError::UnexpectedStatus { status: response.status, body: response.body })
        }
    }

    // --- authentication ---

    /// Stores credentials on the session and re-validates them upstream.
    ///
    /// The POST body repeats the credentials already set on the transport;
    /// the server validates them either way.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 200.
    pub fn login(&self, username: &str, password: &str) -> Result<ApiResponse, ConnectorError> {
        self.transport.set_basic_auth(username, password);
        let request = HttpRequest::new(Method::Post, self.url(Endpoint::Session))
            .with_body(json!({ "username": username, "password": password }));
        let response = self.transport.execute(&request)?;
        Self::expect(200, response)
    }

    /// Tears down the upstream session and drops stored credentials.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 204. Credentials are cleared even on
    /// failure.
    pub fn logout(&self) -> Result<ApiResponse, ConnectorError> {
        let request = HttpRequest::new(Method::Delete, self.url(Endpoint::Session));
        let result = self.transport.execute(&request);
        self.transport.clear_basic_auth();
        Self::expect(204, result?)
    }

    // --- user CRUD ---

    /// Creates a user account.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 201.
    pub fn create_user(
        &self,
        name: &str,
        email: &str,
        display_name: &str,
        password: &str,
    ) -> Result<ApiResponse, ConnectorError> {
        let request = HttpRequest::new(Method::Post, self.url(Endpoint::User)).with_body(json!({
            "name": name,
            "password": password,
            "emailAddress": email,
            "displayName": display_name,
        }));
        let response = self.transport.execute(&request)?;
        Self::expect(201, response)
    }

    /// Fetches a user by username.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 200.
    pub fn get_user(&self, username: &str) -> Result<ApiResponse, ConnectorError> {
        let request = HttpRequest::new(Method::Get, self.url(Endpoint::User))
            .with_query("username", username);
        let response = self.transport.execute(&request)?;
        Self::expect(200, response)
    }

    /// Updates the account identified by `username`.
    ///
    /// `display_name` is optional; when `None` the field is left out of the
    /// request body and upstream keeps the current value.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 200.
    pub fn update_user(
        &self,
        username: &str,
        name: &str,
        email: &str,
        display_name: Option<&str>,
    ) -> Result<ApiResponse, ConnectorError> {
        let mut body = json!({ "name": name, "emailAddress": email });
        if let Some(display_name) = display_name {
            body["displayName"] = json!(display_name);
        }
        let request = HttpRequest::new(Method::Put, self.url(Endpoint::User))
            .with_query("username", username)
            .with_body(body);
        let response = self.transport.execute(&request)?;
        Self::expect(200, response)
    }

    /// Deletes a user account.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 204.
    pub fn delete_user(&self, username: &str) -> Result<ApiResponse, ConnectorError> {
        let request = HttpRequest::new(Method::Delete, self.url(Endpoint::User))
            .with_query("username", username);
        let response = self.transport.execute(&request)?;
        Self::expect(204, response)
    }

    /// Searches users matching `query`. Pages are 1-indexed; upstream does
    /// the paging via `startAt`/`maxResults`.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 200.
    pub fn search_user(
        &self,
        query: &str,
        exclude: &str,
        page: usize,
        limit: usize,
    ) -> Result<ApiResponse, ConnectorError> {
        let start = page.saturating_sub(1) * limit;
        let request = HttpRequest::new(Method::Get, self.url(Endpoint::Users))
            .with_query("username", query)
            .with_query("exclude", exclude)
            .with_query("startAt", &start.to_string())
            .with_query("maxResults", &limit.to_string());
        let response = self.transport.execute(&request)?;
        Self::expect(200, response)
    }

    /// Lists one page of the group that holds every account, using the
    /// `expand=users[start:end]` range syntax. Pages are 1-indexed.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 200.
    pub fn all_users(&self, page: usize, limit: usize) -> Result<ApiResponse, ConnectorError> {
        let start = page.saturating_sub(1) * limit;
        let end = (page * limit).saturating_sub(1);
        let request = HttpRequest::new(Method::Get, self.url(Endpoint::Group))
            .with_query("groupname", &self.all_group)
            .with_query("expand", &format!("users[{start}:{end}]"));
        let response = self.transport.execute(&request)?;
        Self::expect(200, response)
    }

    // --- group CRUD ---

    /// Creates a group.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 201.
    pub fn create_group(&self, name: &str) -> Result<ApiResponse, ConnectorError> {
        let request = HttpRequest::new(Method::Post, self.url(Endpoint::Group))
            .with_body(json!({ "name": name }));
        let response = self.transport.execute(&request)?;
        Self::expect(201, response)
    }

    /// Fetches a group by name.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 200.
    pub fn get_group(&self, name: &str) -> Result<ApiResponse, ConnectorError> {
        let request = HttpRequest::new(Method::Get, self.url(Endpoint::Group))
            .with_query("groupname", name);
        let response = self.transport.execute(&request)?;
        Self::expect(200, response)
    }

    /// Adds a user to a group.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 201.
    pub fn add_user_to_group(
        &self,
        username: &str,
        groupname: &str,
    ) -> Result<ApiResponse, ConnectorError> {
        let request = HttpRequest::new(Method::Post, self.url(Endpoint::UserGroup))
            .with_query("groupname", groupname)
            .with_body(json!({ "name": username }));
        let response = self.transport.execute(&request)?;
        Self::expect(201, response)
    }

    /// Removes a user from a group.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 200.
    pub fn remove_user_from_group(
        &self,
        username: &str,
        groupname: &str,
    ) -> Result<ApiResponse, ConnectorError> {
        let request = HttpRequest::new(Method::Delete, self.url(Endpoint::UserGroup))
            .with_query("groupname", groupname)
            .with_query("username", username);
        let response = self.transport.execute(&request)?;
        Self::expect(200, response)
    }

    /// Deletes a group.
    ///
    /// # Errors
    ///
    /// Fails unless upstream answers 200.
    pub fn delete_group(&self, name: &str) -> Result<ApiResponse, ConnectorError> {
        let request = HttpRequest::new(Method::Delete, self.url(Endpoint::Group))
            .with_query("groupname", name);
        let response = self.transport.execute(&request)?;
        Self::expect(200, response)
    }

    // --- group search ---

    /// Searches groups matching `query`. Delegates to [`Connector::page_group`].
    ///
    /// # Errors
    ///
    /// Fails when the initial pre-fetch for this query fails; later pages
    /// of a cached query cannot fail.
    pub fn search_group(
        &mut self,
        query: &str,
        exclude: &str,
        page: usize,
        limit: usize,
    ) -> Result<Vec<GroupEntry>, ConnectorError> {
        self.page_group(query, exclude, page, limit)
    }

    /// Returns one page of group search results, pre-fetching up to
    /// `search_range` rows on the first call for a query and serving later
    /// pages from the cache.
    ///
    /// The cache key is the lowercased query, so differently-cased repeats
    /// of the same search hit one entry. Pages are 1-indexed and the slice
    /// end is exclusive, so each full page yields `limit - 1` rows; pages
    /// past the cached rows come back empty without a refetch.
    ///
    /// # Errors
    ///
    /// Fails when the pre-fetch gets a non-200 answer or an unparsable
    /// body. A failed pre-fetch leaves the cache untouched, so the next
    /// call retries upstream.
    pub fn page_group(
        &mut self,
        query: &str,
        exclude: &str,
        page: usize,
        limit: usize,
    ) -> Result<Vec<GroupEntry>, ConnectorError> {
        let key = format!("g_{}", query.to_lowercase());
        if self.cache.get(&key).is_none() {
            debug!("group cache miss for {key}, fetching up to {} rows", self.search_range);
            let request = HttpRequest::new(Method::Get, self.url(Endpoint::GroupPicker))
                .with_query("query", query)
                .with_query("exclude", exclude)
                .with_query("maxResults", &self.search_range.to_string());
            let response = self.transport.execute(&request)?;
            if response.status != 200 {
                return Err(ConnectorError::UnexpectedStatus {
                    status: response.status,
                    body: response.body,
                });
            }
            let parsed: PickerResponse = serde_json::from_str(&response.body)?;
            let rows = parsed
                .groups
                .into_iter()
                .map(|g| GroupEntry { name: g.name, html: g.html })
                .collect();
            self.cache.insert(key.clone(), rows);
        } else {
            debug!("group cache hit for {key}");
        }

        let rows = self.cache.get(&key).unwrap_or(&[]);
        let start = (page.saturating_sub(1) * limit).min(rows.len());
        let end = (page * limit).saturating_sub(1).clamp(start, rows.len());
        Ok(rows[start..end].to_vec())
    }
}
