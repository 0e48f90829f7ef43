//! Fakes shared by the unit tests.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;
use std::collections::VecDeque;

use hotel_favorites_core::FavoriteSlug;

use crate::remote::{RemoteError, RemoteFavorites};
use crate::storage::{KeyValueStore, StorageError};

pub fn slug(s: &str) -> FavoriteSlug {
    FavoriteSlug::parse(s).unwrap()
}

/// A request received by [`ScriptedRemote`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Toggle(FavoriteSlug),
    Merge(Vec<FavoriteSlug>),
}

/// Remote service answering from queued responses.
///
/// Every call yields to the executor once before answering, so concurrent
/// calls interleave the way real network calls do.
#[derive(Debug, Default)]
pub struct ScriptedRemote {
    toggles: RefCell<VecDeque<Result<bool, RemoteError>>>,
    merges: RefCell<VecDeque<Result<bool, RemoteError>>>,
    calls: RefCell<Vec<Call>>,
}

impl ScriptedRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toggle(self, response: Result<bool, RemoteError>) -> Self {
        self.push_toggle(response);
        self
    }

    pub fn with_merge(self, response: Result<bool, RemoteError>) -> Self {
        self.merges.borrow_mut().push_back(response);
        self
    }

    pub fn push_toggle(&self, response: Result<bool, RemoteError>) {
        self.toggles.borrow_mut().push_back(response);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl RemoteFavorites for ScriptedRemote {
    async fn toggle(&self, slug: &FavoriteSlug) -> Result<bool, RemoteError> {
        self.calls.borrow_mut().push(Call::Toggle(slug.clone()));
        tokio::task::yield_now().await;
        self.toggles
            .borrow_mut()
            .pop_front()
            .expect("unexpected toggle call")
    }

    async fn merge(&self, slugs: &[FavoriteSlug]) -> Result<bool, RemoteError> {
        self.calls.borrow_mut().push(Call::Merge(slugs.to_vec()));
        tokio::task::yield_now().await;
        self.merges
            .borrow_mut()
            .pop_front()
            .expect("unexpected merge call")
    }
}

/// Store whose writes always fail. Reads see nothing.
#[derive(Debug, Default)]
pub struct FailingStore;

impl KeyValueStore for FailingStore {
    fn read(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }

    fn clear(&self, _key: &str) -> Result<(), StorageError> {
        Err(StorageError::Io(std::io::Error::other("disk full")))
    }
}
