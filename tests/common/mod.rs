#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use shorturl::AppError;
use shorturl::domain::entities::{NewUrlRecord, UrlRecord};
use shorturl::domain::repositories::UrlRepository;
use shorturl::domain::resolver::{HostResolver, ResolveError};
use shorturl::infrastructure::cache::NullCache;
use shorturl::routes::app_router;
use shorturl::state::AppState;
use shorturl::utils::code_generator::CodeGenerator;

pub const TEST_SEED: u64 = 2024;

/// Hosts the test resolver knows about.
pub const KNOWN_HOSTS: &[&str] = &["www.example.com", "example.com", "forum.freecodecamp.org"];

/// Map-backed repository with the same check-and-insert semantics as the
/// Postgres one.
pub struct InMemoryUrlRepository {
    records: Mutex<HashMap<String, UrlRecord>>,
    next_id: AtomicI64,
    healthy: AtomicBool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            next_id: AtomicI64::new(1),
            healthy: AtomicBool::new(true),
        }
    }

    pub fn insert(&self, code: &str, url: &str) {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.records.lock().unwrap().insert(
            code.to_string(),
            UrlRecord::new(id, code.to_string(), url.to_string(), Utc::now()),
        );
    }

    pub fn get(&self, code: &str) -> Option<UrlRecord> {
        self.records.lock().unwrap().get(code).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn set_healthy(&self, healthy: bool) {
        self.healthy.store(healthy, Ordering::SeqCst);
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn create(&self, new_record: NewUrlRecord) -> Result<UrlRecord, AppError> {
        let mut records = self.records.lock().unwrap();

        match records.entry(new_record.code.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(json!({ "code": new_record.code }))),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let record = UrlRecord::new(id, new_record.code, new_record.original_url, Utc::now());
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        Ok(self.get(code))
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.len() as i64)
    }

    async fn health_check(&self) -> bool {
        self.healthy.load(Ordering::SeqCst)
    }
}

/// Resolver answering only for [`KNOWN_HOSTS`].
pub struct StaticResolver;

#[async_trait]
impl HostResolver for StaticResolver {
    async fn lookup(&self, host: &str) -> Result<Vec<IpAddr>, ResolveError> {
        if KNOWN_HOSTS.contains(&host) {
            Ok(vec![IpAddr::V4(Ipv4Addr::new(93, 184, 216, 34))])
        } else {
            Err(ResolveError::Lookup {
                host: host.to_string(),
                reason: "Name or service not known".to_string(),
            })
        }
    }
}

pub fn create_test_state(repo: Arc<InMemoryUrlRepository>) -> AppState {
    create_test_state_with(repo, CodeGenerator::seeded(7, TEST_SEED))
}

pub fn create_test_state_with(
    repo: Arc<InMemoryUrlRepository>,
    generator: CodeGenerator,
) -> AppState {
    AppState::new(
        repo,
        Arc::new(StaticResolver),
        Arc::new(NullCache),
        Arc::new(generator),
        5,
    )
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(app_router(state)).unwrap()
}
