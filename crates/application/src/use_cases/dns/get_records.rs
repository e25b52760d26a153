use crate::ports::PageGetter;
use crate::services::SchemeTable;
use djdns_domain::{scheme_name, AliasTable, BranchAction, DomainError, Page, Record};
use futures::future::BoxFuture;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

pub const DEFAULT_RESOLUTION_TIMEOUT: Duration = Duration::from_secs(1);
pub const DEFAULT_MAX_DEPTH: usize = 16;

/// Resolves a query string by walking the page graph from the `<ROOT>` alias.
///
/// One deadline is fixed when `execute` starts and is carried, unchanged,
/// through every delegation hop. A fetch still pending when it expires is
/// dropped, which cancels it.
pub struct GetRecordsUseCase {
    aliases: Arc<AliasTable>,
    schemes: Arc<SchemeTable>,
    root_uri: String,
    timeout: Duration,
    max_depth: usize,
}

impl GetRecordsUseCase {
    pub fn new(aliases: Arc<AliasTable>, schemes: Arc<SchemeTable>) -> Result<Self, DomainError> {
        let root_uri = aliases
            .root()
            .ok_or(DomainError::MissingRootAlias)?
            .to_string();

        Ok(Self {
            aliases,
            schemes,
            root_uri,
            timeout: DEFAULT_RESOLUTION_TIMEOUT,
            max_depth: DEFAULT_MAX_DEPTH,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Records for `query`, or an empty list when no branch matches.
    pub async fn execute(&self, query: &str) -> Result<Vec<Record>, DomainError> {
        let deadline = Instant::now() + self.timeout;
        self.resolve(&self.root_uri, query, deadline, 0).await
    }

    fn resolve<'a>(
        &'a self,
        uri: &'a str,
        query: &'a str,
        deadline: Instant,
        depth: usize,
    ) -> BoxFuture<'a, Result<Vec<Record>, DomainError>> {
        Box::pin(async move {
            if depth > self.max_depth {
                return Err(DomainError::DelegationTooDeep(self.max_depth));
            }

            let page = self.fetch_page(uri, deadline).await?;
            let Some(branch) = page.find_match(query) else {
                return Ok(Vec::new());
            };

            match &branch.action {
                BranchAction::Records(records) => Ok(records.clone()),
                BranchAction::Empty => Ok(Vec::new()),
                // Only the first target is consulted; its failure is final.
                BranchAction::Targets(targets) => match targets.first() {
                    Some(target) => {
                        let target_uri = self.aliases.resolve_target(target)?.to_string();
                        self.resolve(&target_uri, query, deadline, depth + 1).await
                    }
                    None => Ok(Vec::new()),
                },
            }
        })
    }

    async fn fetch_page(&self, uri: &str, deadline: Instant) -> Result<Arc<Page>, DomainError> {
        let getter = self.getter_for(uri)?;

        if Instant::now() >= deadline {
            return Err(DomainError::TimedOut);
        }

        match tokio::time::timeout_at(deadline, getter.fetch_page()).await {
            Ok(result) => result,
            Err(_) => Err(DomainError::TimedOut),
        }
    }

    fn getter_for(&self, uri: &str) -> Result<&Arc<dyn PageGetter>, DomainError> {
        let scheme = scheme_name(uri)?;
        self.schemes
            .get(scheme)
            .ok_or_else(|| DomainError::UnknownScheme(scheme.to_string()))
    }
}
