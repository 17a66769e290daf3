//! Remote habit store.
//!
//! The repository talks to the backing store only through [`RemoteStore`].
//! Implementations hold no client state; every call is a single
//! request/response.

pub mod http;
pub mod memory;

use async_trait::async_trait;

use crate::habit::{Habit, HabitUpdate, NewHabitRecord};

pub use http::HttpRemoteStore;
pub use memory::InMemoryRemoteStore;

/// Remote store failures. Messages are human-readable only.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("habit {0} not found")]
    NotFound(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("server returned {status}: {message}")]
    Http { status: u16, message: String },

    #[error("could not decode response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RemoteError::Decode(err.to_string())
        } else {
            RemoteError::Request(err.to_string())
        }
    }
}

/// CRUD over habit records keyed by user and id.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// All habits owned by `user_id`.
    async fn list(&self, user_id: &str) -> Result<Vec<Habit>, RemoteError>;

    async fn create(&self, record: &NewHabitRecord) -> Result<(), RemoteError>;

    async fn update(&self, id: &str, update: &HabitUpdate) -> Result<(), RemoteError>;

    async fn delete(&self, id: &str) -> Result<(), RemoteError>;
}

#[async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for Box<T> {
    async fn list(&self, user_id: &str) -> Result<Vec<Habit>, RemoteError> {
        (**self).list(user_id).await
    }

    async fn create(&self, record: &NewHabitRecord) -> Result<(), RemoteError> {
        (**self).create(record).await
    }

    async fn update(&self, id: &str, update: &HabitUpdate) -> Result<(), RemoteError> {
        (**self).update(id, update).await
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        (**self).delete(id).await
    }
}

#[async_trait]
impl<T: RemoteStore + ?Sized> RemoteStore for std::sync::Arc<T> {
    async fn list(&self, user_id: &str) -> Result<Vec<Habit>, RemoteError> {
        (**self).list(user_id).await
    }

    async fn create(&self, record: &NewHabitRecord) -> Result<(), RemoteError> {
        (**self).create(record).await
    }

    async fn update(&self, id: &str, update: &HabitUpdate) -> Result<(), RemoteError> {
        (**self).update(id, update).await
    }

    async fn delete(&self, id: &str) -> Result<(), RemoteError> {
        (**self).delete(id).await
    }
}
