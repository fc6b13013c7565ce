#![allow(dead_code)]

use std::collections::{BTreeSet, HashMap};
use std::net::IpAddr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use http::{HeaderMap, HeaderName, HeaderValue};
use ssibox::{HostResolver, IncludeConfig, Includer};
use ssibox_core::{FetchOptions, FetchResult, Fetcher};
use ssibox_moka::MokaBackend;

/// Fetcher answering from a fixed table and recording every call.
#[derive(Default)]
pub struct StubFetcher {
    responses: HashMap<String, FetchResult>,
    calls: Mutex<Vec<(String, FetchOptions)>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, url: &str, body: &str, headers: &[(&'static str, &'static str)]) -> Self {
        let mut map = HeaderMap::new();
        for &(name, value) in headers {
            map.insert(
                HeaderName::from_static(name),
                HeaderValue::from_static(value),
            );
        }
        self.responses
            .insert(url.to_owned(), FetchResult::success(body.to_owned(), map));
        self
    }

    pub fn calls(&self) -> Vec<(String, FetchOptions)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn urls(&self) -> Vec<String> {
        self.calls().into_iter().map(|(url, _)| url).collect()
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str, options: FetchOptions) -> FetchResult {
        self.calls.lock().unwrap().push((url.to_owned(), options));
        self.responses.get(url).cloned().unwrap_or_default()
    }
}

/// Host resolver answering from a fixed table.
#[derive(Default, Clone)]
pub struct StaticResolver {
    hosts: HashMap<String, BTreeSet<IpAddr>>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, host: &str, addr: &str) -> Self {
        self.hosts
            .entry(host.to_owned())
            .or_default()
            .insert(addr.parse().unwrap());
        self
    }
}

#[async_trait]
impl HostResolver for StaticResolver {
    async fn lookup(&self, host: &str) -> Option<BTreeSet<IpAddr>> {
        self.hosts.get(host).cloned()
    }
}

pub type TestIncluder = Includer<Arc<StubFetcher>, MokaBackend, StaticResolver>;

pub fn includer(fetcher: &Arc<StubFetcher>, shared: &MokaBackend) -> TestIncluder {
    includer_with(IncludeConfig::default(), StaticResolver::new(), fetcher, shared)
}

pub fn includer_with(
    config: IncludeConfig,
    resolver: StaticResolver,
    fetcher: &Arc<StubFetcher>,
    shared: &MokaBackend,
) -> TestIncluder {
    Includer::builder()
        .config(config)
        .fetcher(Arc::clone(fetcher))
        .shared(shared.clone())
        .resolver(resolver)
        .build()
}

pub fn shared() -> MokaBackend {
    MokaBackend::builder().max_entries(100).build()
}

/// Replacement block the engine emits for `url`.
pub fn block(url: &str, content: &str) -> String {
    format!("\n<!-- Begin content from {url} -->\n{content}\n<!-- End content from {url} -->\n")
}
