//! Gateway meant to validate requests and mediate access to storage.

use super::{
    error::ServiceError,
    types::{GetResponse, HealthResponse, Request, Response, WriteResponse},
};
use crate::storage::{types::StoreError, Store};
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{debug, info, warn};

pub const HEALTHY: &str = "healthy";
pub const UNHEALTHY: &str = "unhealthy";

#[derive(Debug, Clone)]
pub struct KeyValueService<S> {
    store: S,
}

impl<S> KeyValueService<S>
where
    S: Store,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn process(&self, req: Request) -> Result<Response, ServiceError> {
        match req {
            Request::Get { key } => self.get(&key).await.map(Response::Get),
            Request::Set { key, value } => self.set(key, value).await.map(Response::Set),
            Request::Delete { key } => self.delete(&key).await.map(Response::Delete),
            Request::Health => Ok(Response::Health(self.health().await)),
        }
    }

    pub async fn get(&self, key: &str) -> Result<GetResponse, ServiceError> {
        validate_key(key)?;
        info!(key, "get");

        match self.store.get(key).await {
            Ok(Some(value)) => Ok(GetResponse::found(value)),
            Ok(None) => Ok(GetResponse::missing()),
            Err(e) => {
                warn!(key, reason = %e, "get failed");
                Err(ServiceError::Internal(format!(
                    "service failed to get value: {}",
                    e
                )))
            }
        }
    }

    pub async fn set(&self, key: String, value: String) -> Result<WriteResponse, ServiceError> {
        validate_key(&key)?;
        info!(key = %key, "set");
        debug!(key = %key, value = %value, "set value");

        let outcome = self.store.set(key.clone(), value).await;
        write_outcome(&key, "set", outcome)
    }

    pub async fn delete(&self, key: &str) -> Result<WriteResponse, ServiceError> {
        validate_key(key)?;
        info!(key, "delete");

        let outcome = self.store.delete(key).await;
        write_outcome(key, "delete", outcome)
    }

    pub async fn health(&self) -> HealthResponse {
        let status = match self.store.ping().await {
            Ok(()) => HEALTHY,
            Err(e) => {
                warn!(reason = %e, "store unreachable");
                UNHEALTHY
            }
        };

        HealthResponse {
            status: status.into(),
            timestamp: unix_timestamp(),
        }
    }
}

fn validate_key(key: &str) -> Result<(), ServiceError> {
    if key.is_empty() {
        return Err(ServiceError::InvalidArgument("key cannot be empty".into()));
    }
    Ok(())
}

fn write_outcome(
    key: &str,
    op: &str,
    outcome: Result<(), StoreError>,
) -> Result<WriteResponse, ServiceError> {
    match outcome {
        Ok(()) => Ok(WriteResponse::succeeded()),
        Err(StoreError::Rejected(reason)) => {
            info!(key, op, reason = %reason, "write rejected");
            Ok(WriteResponse::failed(reason))
        }
        Err(e @ StoreError::Unavailable(_)) => {
            warn!(key, op, reason = %e, "write failed");
            Err(ServiceError::Internal(format!(
                "service failed to {} value: {}",
                op, e
            )))
        }
    }
}

fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs() as i64)
        .unwrap_or_default()
}
