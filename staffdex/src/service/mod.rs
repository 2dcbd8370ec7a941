//! The consistency engine.
//!
//! [`DirectoryService`] mediates between the cache store and the
//! upstream client. The cache is only trusted when it is provably
//! complete: the identifier index names every key a full cache must
//! hold, and a read that recovers fewer entries than the index promises
//! triggers a full discard-and-repopulate refresh (the
//! population-count check). That trades an occasional cheap refresh for
//! never serving a silently truncated collection.
//!
//! # Concurrency
//!
//! Many callers share one service through `Arc`; nothing serializes
//! `get_all` across them. Two concurrent refreshes each run their own
//! clear-index / delete-keys / repopulate sequence - the last writer
//! wins, and a reader interleaved between the clear and the repopulate
//! can observe a transiently empty or partial cache. That state is
//! stale, not corrupt: the next population-count check repairs it.
//!
//! # Delete ordering
//!
//! `delete_by_id` evicts local state only after the upstream delete
//! succeeds. There is no compensation if the process dies between the
//! two steps; the next full refresh reconciles. Known limitation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::cache::CacheStore;
use crate::client::DirectoryClient;
use crate::error::DirectoryError;
use crate::model::{CreateEmployeeInput, Employee};
use crate::query;
use crate::telemetry::DirectoryMetrics;

/// Number of names the top-earners endpoint reports.
pub const TOP_EARNER_LIMIT: usize = 10;

/// Read-through / write-through facade over the employee directory.
///
/// Collaborators are injected at construction; the service holds no
/// ambient state, so independent instances (and tests) are isolated.
pub struct DirectoryService {
    store: Arc<dyn CacheStore>,
    client: DirectoryClient,
    metrics: Arc<DirectoryMetrics>,
}

impl DirectoryService {
    /// Creates a service over the given store and client.
    pub fn new(
        store: Arc<dyn CacheStore>,
        client: DirectoryClient,
        metrics: Arc<DirectoryMetrics>,
    ) -> Self {
        Self {
            store,
            client,
            metrics,
        }
    }

    /// Counters recorded by this service and its client.
    pub fn metrics(&self) -> &DirectoryMetrics {
        &self.metrics
    }

    /// Returns every employee, from cache when the cache is complete.
    ///
    /// The cache is authoritative iff the set of readable entries is
    /// non-empty and its count equals the index cardinality. Anything
    /// else - empty index, evicted values, undecodable entries - falls
    /// through to a full refresh. Upstream ambiguity on the refresh
    /// path (rate limiting, transport faults) is absorbed: the call
    /// logs a warning and returns an empty collection, leaving any
    /// existing cache state untouched for a later repair.
    pub async fn get_all(&self) -> Result<Vec<Employee>, DirectoryError> {
        let ids = self.index_members().await;

        let mut cached = Vec::with_capacity(ids.len());
        for id in &ids {
            if let Some(employee) = self.read_entry(id).await {
                cached.push(employee);
            }
        }

        if !cached.is_empty() && cached.len() == ids.len() {
            info!(count = cached.len(), "serving employees from cache");
            self.metrics.cache_hit();
            return Ok(cached);
        }

        info!(
            indexed = ids.len(),
            readable = cached.len(),
            "cache empty or incomplete; refreshing from upstream"
        );
        self.metrics.cache_miss();
        self.refresh(ids).await
    }

    /// Returns one employee, from cache when present.
    ///
    /// A miss fetches from upstream; "not found" (or a record served
    /// without an id) maps to [`DirectoryError::NotFound`] and is never
    /// cached as a negative result. A successful fetch populates both
    /// the entry and the index.
    pub async fn get_by_id(&self, id: &str) -> Result<Employee, DirectoryError> {
        if let Some(employee) = self.read_entry(id).await {
            debug!(id, "employee served from cache");
            self.metrics.cache_hit();
            return Ok(employee);
        }

        info!(id, "cache miss; fetching employee from upstream");
        self.metrics.cache_miss();
        let employee = self
            .client
            .fetch_by_id(id)
            .await
            .map_err(|e| DirectoryError::from_client(e, Some(id)))?;

        let Some(employee_id) = employee.id.clone() else {
            warn!(id, "upstream returned a record without an id");
            return Err(DirectoryError::NotFound { id: id.to_string() });
        };

        self.write_entry(&employee_id, &employee).await?;
        info!(id = %employee_id, "employee fetched and cached");
        Ok(employee)
    }

    /// Employees whose name contains `query` as a substring.
    ///
    /// Empty query returns the full collection.
    pub async fn search_by_name(&self, query: &str) -> Result<Vec<Employee>, DirectoryError> {
        let employees = self.get_all().await?;
        let matched = query::search_by_name(&employees, query);
        info!(query, count = matched.len(), "name search complete");
        Ok(matched)
    }

    /// The highest salary across the directory.
    ///
    /// Fails with [`DirectoryError::Invariant`] when the collection is
    /// empty or no record carries a salary.
    pub async fn highest_salary(&self) -> Result<i64, DirectoryError> {
        let employees = self.get_all().await?;
        if employees.is_empty() {
            warn!("no employees available for salary computation");
            return Err(DirectoryError::Invariant(
                "no employees available".to_string(),
            ));
        }

        let max = query::highest_salary(&employees).ok_or_else(|| {
            DirectoryError::Invariant("no valid salaries found".to_string())
        })?;
        info!(max, "computed highest salary");
        Ok(max)
    }

    /// Names of the top earners, descending by salary.
    ///
    /// An empty directory yields an empty list, not a failure. Records
    /// lacking a name or salary are skipped.
    pub async fn top_earning_names(&self, limit: usize) -> Result<Vec<String>, DirectoryError> {
        let employees = self.get_all().await?;
        let names = query::top_earning_names(&employees, limit);
        info!(limit, count = names.len(), "computed top earners");
        Ok(names)
    }

    /// Creates an employee upstream and writes it through to the cache.
    ///
    /// Validation happens before any I/O. A created record lacking an
    /// id means the create did not durably happen upstream - that is a
    /// hard failure and nothing is cached.
    pub async fn create(&self, input: &CreateEmployeeInput) -> Result<Employee, DirectoryError> {
        input.validate()?;

        let created = self
            .client
            .create(input)
            .await
            .map_err(|e| DirectoryError::from_client(e, None))?;

        let Some(id) = created.id.clone() else {
            warn!(name = %input.name, "upstream create returned a record without an id");
            return Err(DirectoryError::Invariant(
                "failed to create employee".to_string(),
            ));
        };

        self.write_entry(&id, &created).await?;
        info!(%id, "employee created and cached");
        Ok(created)
    }

    /// Deletes an employee, resolving it first to learn the name the
    /// upstream delete endpoint addresses by.
    ///
    /// Order matters: upstream delete, then entry eviction, then index
    /// removal - a failed upstream delete must leave local state
    /// matching upstream state.
    pub async fn delete_by_id(&self, id: &str) -> Result<Employee, DirectoryError> {
        let employee = self.get_by_id(id).await?;

        let Some(name) = employee.name.clone() else {
            warn!(id, "cannot delete employee without a name");
            return Err(DirectoryError::Invariant(format!(
                "cannot delete employee {}: record has no name",
                id
            )));
        };

        self.client
            .delete_by_name(&name)
            .await
            .map_err(|e| DirectoryError::from_client(e, Some(id)))?;

        self.store.delete(id).await?;
        self.store.index_remove(id).await?;
        info!(id, "employee deleted and evicted from cache");
        Ok(employee)
    }

    /// Full refresh: discard the previous snapshot, then repopulate
    /// from the upstream collection.
    ///
    /// `stale_ids` are the keys the old index promised; they are
    /// deleted even if the new collection no longer contains them. The
    /// sequence is not transactional (see module docs).
    async fn refresh(&self, stale_ids: Vec<String>) -> Result<Vec<Employee>, DirectoryError> {
        self.metrics.full_refresh();

        let employees = match self.client.fetch_all().await {
            Ok(employees) => employees,
            Err(e) => {
                warn!(error = %e, "upstream refresh failed; serving empty collection");
                return Ok(Vec::new());
            }
        };

        self.store.index_clear().await?;
        for id in &stale_ids {
            self.store.delete(id).await?;
        }

        let mut populated = 0usize;
        for employee in &employees {
            match employee.id.as_deref() {
                Some(id) => {
                    self.write_entry(id, employee).await?;
                    populated += 1;
                    debug!(id, "cached employee");
                }
                None => {
                    warn!(?employee, "skipping employee record without an id");
                }
            }
        }

        info!(
            fetched = employees.len(),
            populated, "cache repopulated from upstream"
        );
        Ok(employees)
    }

    /// Index members, treating a store failure as an empty index.
    /// A broken index reads as incomplete, which routes to refresh.
    async fn index_members(&self) -> Vec<String> {
        match self.store.index_members().await {
            Ok(ids) => ids,
            Err(e) => {
                warn!(error = %e, "failed to read identifier index");
                Vec::new()
            }
        }
    }

    /// Reads and decodes one cached entry. Store failures and
    /// undecodable bytes both count as "unreadable", which the caller
    /// sees as a miss.
    async fn read_entry(&self, id: &str) -> Option<Employee> {
        let bytes = match self.store.get(id).await {
            Ok(bytes) => bytes?,
            Err(e) => {
                warn!(id, error = %e, "cache read failed");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(employee) => Some(employee),
            Err(e) => {
                warn!(id, error = %e, "cached entry is undecodable; treating as missing");
                None
            }
        }
    }

    /// Encodes and writes one entry, then records it in the index.
    async fn write_entry(&self, id: &str, employee: &Employee) -> Result<(), DirectoryError> {
        let bytes = serde_json::to_vec(employee)
            .map_err(|e| DirectoryError::Invariant(format!("failed to encode cache entry: {}", e)))?;
        self.store.set(id, bytes).await?;
        self.store.index_add(id).await?;
        Ok(())
    }
}
