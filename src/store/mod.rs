use std::collections::HashMap;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use reqwest::Client;
use thiserror::Error;
use tokio::sync::watch;

use crate::model::{BaseListEntry, ListResponse, Pokemon, PokemonDetail};

pub const DEFAULT_API_BASE: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_LIMIT: u32 = 151;

#[derive(Clone, Debug)]
pub struct StoreOptions {
    pub api_base: String,
    pub limit: u32,
    pub timeout_seconds: usize,
    /// Maximum in-flight detail fetches. 0 fires the whole collection at
    /// once, which is the original contract.
    pub concurrency: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            limit: DEFAULT_LIMIT,
            timeout_seconds: 10,
            concurrency: 0,
        }
    }
}

/// Failures that sink the whole pipeline. A failed base list means no
/// records can be derived at all; the only recovery is a fresh run.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to fetch the base list: {source}")]
    ListFetch {
        #[source]
        source: reqwest::Error,
    },

    #[error("base list request returned HTTP {status}")]
    ListStatus { status: u16 },

    #[error("failed to decode the base list: {source}")]
    ListDecode {
        #[source]
        source: reqwest::Error,
    },
}

/// One record's detail fetch failing is captured as state, not propagated:
/// the record is omitted and the catalog flags itself incomplete.
#[derive(Clone, Debug)]
pub struct DetailFailure {
    pub name: String,
    pub reason: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

/// Session-scoped record store, keyed by name. No eviction: the collection
/// is small and fixed, so everything fetched stays for the session.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: HashMap<String, Pokemon>,
    failures: Vec<DetailFailure>,
    total: usize,
}

impl Catalog {
    pub fn new(total: usize) -> Self {
        Catalog {
            records: HashMap::new(),
            failures: Vec::new(),
            total,
        }
    }

    /// Folds one detail outcome into the catalog. Only successes count
    /// toward `loaded`.
    pub fn absorb(&mut self, name: String, outcome: Result<Pokemon, String>) {
        match outcome {
            Ok(pokemon) => {
                self.records.insert(name, pokemon);
            }
            Err(reason) => self.failures.push(DetailFailure { name, reason }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Pokemon> {
        self.records.get(name)
    }

    /// Successfully loaded records, in no particular order; ordering is
    /// imposed downstream by the sort stage.
    pub fn records(&self) -> Vec<Pokemon> {
        self.records.values().cloned().collect()
    }

    pub fn loaded(&self) -> usize {
        self.records.len()
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn failures(&self) -> &[DetailFailure] {
        &self.failures
    }

    pub fn has_error(&self) -> bool {
        !self.failures.is_empty()
    }
}

pub struct CatalogLoader {
    client: Client,
    options: StoreOptions,
    progress_tx: watch::Sender<LoadProgress>,
}

impl CatalogLoader {
    pub fn new(options: StoreOptions) -> Result<Self, StoreError> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static(concat!(
                "dexview/",
                env!("CARGO_PKG_VERSION")
            )),
        );
        let timeout = Duration::from_secs(options.timeout_seconds.try_into().unwrap_or(10));
        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| StoreError::ClientBuild { source: e })?;
        let (progress_tx, _) = watch::channel(LoadProgress::default());
        Ok(Self {
            client,
            options,
            progress_tx,
        })
    }

    /// Live `loaded`/`total` counts as individual fetches resolve; the
    /// counter increases monotonically and failed entries never increment
    /// it.
    pub fn progress(&self) -> watch::Receiver<LoadProgress> {
        self.progress_tx.subscribe()
    }

    pub async fn fetch_list(&self) -> Result<Vec<BaseListEntry>, StoreError> {
        let url = format!(
            "{}/pokemon?limit={}",
            self.options.api_base.trim_end_matches('/'),
            self.options.limit
        );
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StoreError::ListFetch { source: e })?;
        if !resp.status().is_success() {
            return Err(StoreError::ListStatus {
                status: resp.status().as_u16(),
            });
        }
        let list: ListResponse = resp
            .json()
            .await
            .map_err(|e| StoreError::ListDecode { source: e })?;
        Ok(list.results)
    }

    /// Fetches the base list, then fans out one detail request per entry.
    /// A failed entry is terminal for that entry only; siblings keep
    /// running and the catalog reports the gap. There is no retry and no
    /// cancellation short of dropping the loader.
    pub async fn load(&self) -> Result<Catalog, StoreError> {
        let entries = self.fetch_list().await?;
        let total = entries.len();
        let mut catalog = Catalog::new(total);
        self.progress_tx.send_replace(LoadProgress { loaded: 0, total });

        let cap = if self.options.concurrency == 0 {
            total.max(1)
        } else {
            self.options.concurrency
        };

        let client = self.client.clone();
        let mut fetches = stream::iter(entries.into_iter().map(|entry| {
            let client = client.clone();
            async move {
                let outcome = fetch_pokemon(&client, &entry.url).await;
                (entry.name, outcome)
            }
        }))
        .buffer_unordered(cap);

        while let Some((name, outcome)) = fetches.next().await {
            catalog.absorb(name, outcome);
            self.progress_tx.send_replace(LoadProgress {
                loaded: catalog.loaded(),
                total,
            });
        }

        Ok(catalog)
    }

    /// Single-record fetch for the detail view, used when the record is not
    /// already in a loaded catalog.
    pub async fn fetch_by_name(&self, name: &str) -> Result<Pokemon, String> {
        let url = format!(
            "{}/pokemon/{}",
            self.options.api_base.trim_end_matches('/'),
            name.trim().to_lowercase()
        );
        fetch_pokemon(&self.client, &url).await
    }
}

async fn fetch_pokemon(client: &Client, url: &str) -> Result<Pokemon, String> {
    let resp = client
        .get(url)
        .send()
        .await
        .map_err(|e| format!("request failed: {e}"))?;
    if !resp.status().is_success() {
        return Err(format!("HTTP {}", resp.status().as_u16()));
    }
    let detail: PokemonDetail = resp
        .json()
        .await
        .map_err(|e| format!("decode failed: {e}"))?;
    Pokemon::try_from(detail).map_err(|e| e.to_string())
}
