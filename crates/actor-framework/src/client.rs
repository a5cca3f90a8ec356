//! # Generic Client
//!
//! The sending half of a resource actor.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::future::Future;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for interacting with a `ResourceActor`.
///
/// Holds only a channel sender, so clones are cheap and can be handed to other actors as
/// context. Every call returns `Result<_, FrameworkError>`.
///
/// A client built with [`with_timeout`](Self::with_timeout) bounds both the mailbox send
/// and the wait for the reply. A request that exceeds the bound fails with
/// [`FrameworkError::Timeout`]; note the actor may still process it later.
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
    timeout: Option<Duration>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            timeout: self.timeout,
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self {
            sender,
            timeout: None,
        }
    }

    /// Returns a copy of this client whose requests give up after `timeout`.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        Self {
            sender: self.sender.clone(),
            timeout: Some(timeout),
        }
    }

    /// Returns a copy of this client that waits for replies indefinitely.
    pub fn without_timeout(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            timeout: None,
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn bounded<F, R>(&self, fut: F) -> Result<R, FrameworkError>
    where
        F: Future<Output = Result<R, FrameworkError>>,
    {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| FrameworkError::Timeout(limit))?,
            None => fut.await,
        }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, FrameworkError>>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        let message = build(respond_to);
        self.bounded(async move {
            self.sender
                .send(message)
                .await
                .map_err(|_| FrameworkError::ActorClosed)?;
            response.await.map_err(|_| FrameworkError::ActorDropped)?
        })
        .await
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self, query: T::Query) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { query, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    /// Removes all of `ids` atomically; ids not in the store are skipped.
    pub async fn delete_many(&self, ids: Vec<T::Id>) -> Result<Vec<T::Id>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::DeleteMany { ids, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }
}
