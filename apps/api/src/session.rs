use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::session::SessionState;

/// Sessions untouched for this long are dropped by the sweeper.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

struct Entry {
    state: SessionState,
    touched: Instant,
}

/// In-memory session registry. Sessions are independent of each other and
/// vanish with the process, on `DELETE`, or after sitting idle for the TTL.
///
/// Callers take a snapshot, do slow work (PDF decode, LLM call) without the
/// lock, then write back through [`SessionStore::update`].
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Entry>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_TTL)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    pub async fn create(&self) -> SessionState {
        let session = SessionState::new();
        self.inner.write().await.insert(
            session.id,
            Entry {
                state: session.clone(),
                touched: Instant::now(),
            },
        );
        session
    }

    /// Snapshot of the session. Reading counts as activity.
    pub async fn get(&self, id: Uuid) -> Result<SessionState, AppError> {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        entry.touched = Instant::now();
        Ok(entry.state.clone())
    }

    /// Applies `mutate` to the session and returns whatever it returns.
    pub async fn update<F, R>(&self, id: Uuid, mutate: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut SessionState) -> R,
    {
        let mut sessions = self.inner.write().await;
        let entry = sessions.get_mut(&id).ok_or_else(|| session_not_found(id))?;
        entry.touched = Instant::now();
        Ok(mutate(&mut entry.state))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| session_not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    /// Drops every session idle for longer than the TTL. Returns how many
    /// were removed.
    pub async fn evict_idle(&self) -> usize {
        let ttl = self.ttl;
        let mut evicted = 0usize;
        self.inner.write().await.retain(|_, entry| {
            if entry.touched.elapsed() > ttl {
                evicted += 1;
                false
            } else {
                true
            }
        });
        if evicted > 0 {
            debug!("Evicted {evicted} idle sessions");
        }
        evicted
    }

    /// Runs [`SessionStore::evict_idle`] on a fixed period for the life of
    /// the process.
    pub fn spawn_sweeper(&self, period: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        info!(
            "Session sweeper started (ttl {}s, every {}s)",
            store.ttl.as_secs(),
            period.as_secs()
        );
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                store.evict_idle().await;
            }
        })
    }
}

fn session_not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
