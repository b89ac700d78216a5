//! Fail-open cache capability
//!
//! [`CacheHandle`] owns the active backend. The first transport fault swaps
//! it for a [`NullCache`] and the swap is never undone: from then on every
//! operation behaves as if no cache had been configured.

use crate::backend::CacheBackend;
use crate::errors::CacheError;
use crate::memory::MemoryCache;
use crate::null::NullCache;
use crate::redis_cache::RedisCache;
use config::CacheConfig;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::{Arc, RwLock};
use std::time::Duration;

const MEMORY_SCHEME: &str = "memory://";

/// Shared, cloneable cache capability
#[derive(Clone)]
pub struct CacheHandle {
    backend: Arc<RwLock<Arc<dyn CacheBackend>>>,
}

impl Debug for CacheHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CacheHandle")
            .field("backend", &self.backend_name())
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

impl CacheHandle {
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            backend: Arc::new(RwLock::new(backend)),
        }
    }

    /// Handle that never caches
    pub fn disabled() -> Self {
        Self::new(Arc::new(NullCache))
    }

    /// Build the backend named by the configuration and check that it answers.
    /// Any failure here yields a disabled handle instead of an error.
    pub async fn connect(config: &CacheConfig) -> Self {
        let Some(url) = config.url.as_deref() else {
            tracing::info!("No cache configured, serving every read from the store");
            return Self::disabled();
        };

        let backend: Arc<dyn CacheBackend> = if url.starts_with(MEMORY_SCHEME) {
            Arc::new(MemoryCache::new())
        } else {
            match RedisCache::from_config(config) {
                Ok(redis) => Arc::new(redis),
                Err(e) => {
                    tracing::warn!(error = %e, "Invalid cache configuration, caching disabled");
                    return Self::disabled();
                }
            }
        };

        let handle = Self::new(backend);
        match handle.ping().await {
            Ok(()) => tracing::info!(backend = handle.backend_name(), "Cache connected"),
            // A backend that cannot answer PING is never used
            Err(e) => handle.disable(&e),
        }
        handle
    }

    fn current(&self) -> Arc<dyn CacheBackend> {
        match self.backend.read() {
            Ok(backend) => backend.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Whether a real backend is still in place
    pub fn is_enabled(&self) -> bool {
        !self.current().is_null()
    }

    pub fn backend_name(&self) -> &'static str {
        self.current().name()
    }

    /// Permanently replace the backend with [`NullCache`]
    pub fn disable(&self, reason: &CacheError) {
        let mut backend = match self.backend.write() {
            Ok(backend) => backend,
            Err(poisoned) => poisoned.into_inner(),
        };

        if backend.is_null() {
            return;
        }

        tracing::warn!(
            backend = backend.name(),
            error = %reason,
            "Cache transport failure, caching disabled for the rest of the process"
        );
        *backend = Arc::new(NullCache);
    }

    fn observe<T>(&self, result: Result<T, CacheError>) -> Result<T, CacheError> {
        if let Err(e) = &result {
            if e.is_transport() {
                self.disable(e);
            }
        }
        result
    }

    pub async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let backend = self.current();
        let result = backend.get(key).await;
        self.observe(result)
    }

    pub async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        let backend = self.current();
        let result = backend.set(key, value, ttl).await;
        self.observe(result)
    }

    pub async fn delete(&self, key: &str) -> Result<bool, CacheError> {
        let backend = self.current();
        let result = backend.delete(key).await;
        self.observe(result)
    }

    pub async fn ping(&self) -> Result<(), CacheError> {
        let backend = self.current();
        let result = backend.ping().await;
        self.observe(result)
    }

    /// Get a JSON payload and deserialize it
    pub async fn get_json<T>(&self, key: &str) -> Result<Option<T>, CacheError>
    where
        T: DeserializeOwned,
    {
        match self.get(key).await? {
            Some(json_str) => Ok(Some(serde_json::from_str(&json_str)?)),
            None => Ok(None),
        }
    }

    /// Serialize `value` to JSON and store it
    pub async fn set_json<T>(&self, key: &str, value: &T, ttl: Duration) -> Result<(), CacheError>
    where
        T: Serialize + ?Sized,
    {
        let json_str = serde_json::to_string(value)?;
        self.set(key, &json_str, ttl).await
    }
}

impl Default for CacheHandle {
    fn default() -> Self {
        Self::disabled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn read_line<'a>(buf: &'a [u8], pos: &mut usize) -> Option<&'a str> {
        let rest = &buf[*pos..];
        let end = rest.windows(2).position(|w| w == b"\r\n")?;
        let line = std::str::from_utf8(&rest[..end]).ok()?;
        *pos += end + 2;
        Some(line)
    }

    /// One complete RESP command from the front of `buf` and its length
    fn parse_command(buf: &[u8]) -> Option<(Vec<String>, usize)> {
        let mut pos = 0;
        let count: usize = read_line(buf, &mut pos)?.strip_prefix('*')?.parse().ok()?;
        let mut args = Vec::with_capacity(count);
        for _ in 0..count {
            let len: usize = read_line(buf, &mut pos)?.strip_prefix('$')?.parse().ok()?;
            if buf.len() < pos + len + 2 {
                return None;
            }
            args.push(String::from_utf8_lossy(&buf[pos..pos + len]).into_owned());
            pos += len + 2;
        }
        Some((args, pos))
    }

    /// Redis stand-in that answers PING and rejects every other command
    /// with a WRONGTYPE error reply
    async fn spawn_wrongtype_server() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = Vec::new();
                    let mut chunk = [0u8; 1024];
                    loop {
                        let n = match socket.read(&mut chunk).await {
                            Ok(0) | Err(_) => return,
                            Ok(n) => n,
                        };
                        buf.extend_from_slice(&chunk[..n]);

                        while let Some((args, used)) = parse_command(&buf) {
                            buf.drain(..used);
                            let reply: &[u8] = if args
                                .first()
                                .is_some_and(|cmd| cmd.eq_ignore_ascii_case("PING"))
                            {
                                &b"+PONG\r\n"[..]
                            } else {
                                &b"-WRONGTYPE Operation against a key holding the wrong kind of value\r\n"[..]
                            };
                            if socket.write_all(reply).await.is_err() {
                                return;
                            }
                        }
                    }
                });
            }
        });

        format!("redis://{}", addr)
    }

    fn memory_handle() -> (Arc<MemoryCache>, CacheHandle) {
        let memory = Arc::new(MemoryCache::new());
        let handle = CacheHandle::new(memory.clone());
        (memory, handle)
    }

    #[tokio::test]
    async fn test_json_round_trip_through_handle() {
        let (_, handle) = memory_handle();
        handle
            .set_json("data", &vec!["a", "b"], Duration::from_secs(60))
            .await
            .unwrap();

        let cached: Option<Vec<String>> = handle.get_json("data").await.unwrap();
        assert_eq!(cached, Some(vec!["a".to_string(), "b".to_string()]));
    }

    #[tokio::test]
    async fn test_transport_fault_disables_permanently() {
        let (memory, handle) = memory_handle();
        assert!(handle.is_enabled());
        assert_eq!(handle.backend_name(), "memory");

        memory.simulate_outage();
        let err = handle.get("data").await.unwrap_err();
        assert!(err.is_transport());

        assert!(!handle.is_enabled());
        assert_eq!(handle.backend_name(), "null");

        // Afterwards the handle behaves like an unconfigured cache
        assert_eq!(handle.get("data").await.unwrap(), None);
        handle
            .set("data", "[]", Duration::from_secs(60))
            .await
            .unwrap();
        assert!(!handle.delete("data").await.unwrap());
    }

    #[tokio::test]
    async fn test_disable_is_shared_between_clones() {
        let (memory, handle) = memory_handle();
        let clone = handle.clone();

        memory.simulate_outage();
        let _ = clone.delete("data").await;

        assert!(!handle.is_enabled());
    }

    #[tokio::test]
    async fn test_corrupt_payload_does_not_disable() {
        let (_, handle) = memory_handle();
        handle
            .set("data", "not json", Duration::from_secs(60))
            .await
            .unwrap();

        let result: Result<Option<Vec<u32>>, _> = handle.get_json("data").await;
        assert!(matches!(result, Err(CacheError::Serialization(_))));
        assert!(handle.is_enabled());
    }

    #[tokio::test]
    async fn test_connect_without_url_is_disabled() {
        let handle = CacheHandle::connect(&CacheConfig::default()).await;
        assert!(!handle.is_enabled());
    }

    #[tokio::test]
    async fn test_connect_memory_url() {
        let handle = CacheHandle::connect(&CacheConfig::new("memory://")).await;
        assert!(handle.is_enabled());
        assert_eq!(handle.backend_name(), "memory");
    }

    #[tokio::test]
    async fn test_connect_with_unsupported_url_is_disabled() {
        let handle = CacheHandle::connect(&CacheConfig::new("ftp://cache.local")).await;
        assert!(!handle.is_enabled());
    }

    #[tokio::test]
    async fn test_error_replies_do_not_disable() {
        let url = spawn_wrongtype_server().await;
        let handle = CacheHandle::connect(&CacheConfig::new(url)).await;
        assert!(handle.is_enabled());
        assert_eq!(handle.backend_name(), "redis");

        let err = handle.get("data").await.unwrap_err();
        assert!(matches!(err, CacheError::Command(_)), "unexpected error: {err}");
        assert!(!err.is_transport());

        let err = handle
            .set("data", "[]", Duration::from_secs(60))
            .await
            .unwrap_err();
        assert!(!err.is_transport());
        assert!(handle.delete("data").await.is_err());

        assert!(handle.is_enabled());
    }

    #[tokio::test]
    async fn test_connect_to_unreachable_redis_fails_open() {
        let mut config = CacheConfig::new("redis://127.0.0.1:1");
        config.connection_timeout_ms = 200;
        config.timeout_ms = 200;

        let handle = CacheHandle::connect(&config).await;
        assert!(!handle.is_enabled());
    }
}
