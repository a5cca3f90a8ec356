//! # Mock Clients
//!
//! `MockClient<T>` hands out a real [`ResourceClient<T>`] whose requests are answered from
//! a queue of expectations instead of a running actor. Use it to test code that *calls*
//! an actor (a domain client, or another actor's hooks) without spawning the dependency.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | **State** | none, replies are scripted | real store |
//! | **Failure injection** | `return_err` | needs the right store state |
//! | **Use for** | logic around a client | the actor itself, full flows |
//!
//! Expectations are consumed in order across all request kinds. An expectation created
//! with an id also checks that the request targets that id. Mismatches are recorded and
//! reported by [`MockClient::verify`], and the offending request sees
//! [`FrameworkError::ActorDropped`].
//!
//! ```rust
//! use actor_framework::mock::MockClient;
//! use actor_framework::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Bin { id: u32, items: u32 }
//! #[derive(Debug)] struct BinCreate;
//! #[derive(Debug)] struct BinUpdate;
//! #[derive(Debug)] enum BinAction {}
//! #[derive(Debug, thiserror::Error)] #[error("bin error")] struct BinError;
//!
//! #[async_trait]
//! impl ActorEntity for Bin {
//!     type Id = u32; type Create = BinCreate; type Update = BinUpdate; type Query = ();
//!     type Action = BinAction; type ActionResult = (); type Context = (); type Error = BinError;
//!     fn from_create_params(id: u32, _: BinCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, items: 0 })
//!     }
//!     async fn on_update(&mut self, _: BinUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: BinAction, _: &()) -> Result<(), Self::Error> {
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Bin>::new();
//!     mock.expect_get(7).return_ok(Some(Bin { id: 7, items: 3 }));
//!     mock.expect_list().return_err(FrameworkError::ActorClosed);
//!
//!     let client = mock.client();
//!     assert_eq!(client.get(7).await.unwrap().unwrap().items, 3);
//!     assert!(matches!(client.list(()).await, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

type Reply<R> = Result<R, FrameworkError>;

/// A scripted reply, tagged with the request kind it answers.
enum Scripted<T: ActorEntity> {
    Get(Reply<Option<T>>),
    Create(Reply<T::Id>),
    List(Reply<Vec<T>>),
    Update(Reply<T>),
    Delete(Reply<()>),
    DeleteMany(Reply<Vec<T::Id>>),
    Action(Reply<T::ActionResult>),
}

struct Expectation<T: ActorEntity> {
    id: Option<T::Id>,
    reply: Scripted<T>,
}

struct Ledger<T: ActorEntity> {
    pending: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

impl<T: ActorEntity> Ledger<T> {
    fn check_id(&mut self, kind: &str, expected: Option<&T::Id>, actual: &T::Id) {
        if let Some(expected) = expected {
            if expected != actual {
                self.failures
                    .push(format!("{kind}: expected id {expected}, got {actual}"));
            }
        }
    }
}

/// A mock client with expectation tracking.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    ledger: Arc<Mutex<Ledger<T>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn answer<R>(respond_to: oneshot::Sender<Reply<R>>, reply: Reply<R>) {
    let _ = respond_to.send(reply);
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime: the replies are served by a spawned task.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let ledger = Arc::new(Mutex::new(Ledger {
            pending: VecDeque::new(),
            failures: Vec::new(),
        }));
        let served = ledger.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let mut ledger = served.lock().unwrap();
                let Some(Expectation { id, reply }) = ledger.pending.pop_front() else {
                    ledger
                        .failures
                        .push(format!("unexpected request: {request:?}"));
                    continue;
                };

                match (request, reply) {
                    (ResourceRequest::Get { id: actual, respond_to }, Scripted::Get(r)) => {
                        ledger.check_id("get", id.as_ref(), &actual);
                        answer(respond_to, r);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Scripted::Create(r)) => {
                        answer(respond_to, r);
                    }
                    (ResourceRequest::List { respond_to, .. }, Scripted::List(r)) => {
                        answer(respond_to, r);
                    }
                    (
                        ResourceRequest::Update {
                            id: actual,
                            respond_to,
                            ..
                        },
                        Scripted::Update(r),
                    ) => {
                        ledger.check_id("update", id.as_ref(), &actual);
                        answer(respond_to, r);
                    }
                    (ResourceRequest::Delete { id: actual, respond_to }, Scripted::Delete(r)) => {
                        ledger.check_id("delete", id.as_ref(), &actual);
                        answer(respond_to, r);
                    }
                    (ResourceRequest::DeleteMany { respond_to, .. }, Scripted::DeleteMany(r)) => {
                        answer(respond_to, r);
                    }
                    (
                        ResourceRequest::Action {
                            id: actual,
                            respond_to,
                            ..
                        },
                        Scripted::Action(r),
                    ) => {
                        ledger.check_id("action", id.as_ref(), &actual);
                        answer(respond_to, r);
                    }
                    (request, _) => {
                        // Dropping the request drops its responder: the caller sees ActorDropped.
                        ledger
                            .failures
                            .push(format!("request did not match next expectation: {request:?}"));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            ledger,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn builder<R>(
        &self,
        id: Option<T::Id>,
        wrap: fn(Reply<R>) -> Scripted<T>,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            id,
            wrap,
            ledger: self.ledger.clone(),
        }
    }

    /// Expects a `get` for `id`.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(Some(id), Scripted::Get)
    }

    /// Expects a `create`.
    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        self.builder(None, Scripted::Create)
    }

    /// Expects a `list` with any query.
    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(None, Scripted::List)
    }

    /// Expects an `update` of `id`.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(Some(id), Scripted::Update)
    }

    /// Expects a `delete` of `id`.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(Some(id), Scripted::Delete)
    }

    /// Expects a `delete_many` with any ids.
    pub fn expect_delete_many(&mut self) -> ExpectationBuilder<T, Vec<T::Id>> {
        self.builder(None, Scripted::DeleteMany)
    }

    /// Expects an action on `id`.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        self.builder(Some(id), Scripted::Action)
    }

    /// Panics unless every expectation was consumed by a matching request.
    pub fn verify(&self) {
        let ledger = self.ledger.lock().unwrap();
        if !ledger.failures.is_empty() {
            panic!("Mock received unexpected requests: {:#?}", ledger.failures);
        }
        if !ledger.pending.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                ledger.pending.len()
            );
        }
    }
}

/// Queues one scripted reply.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    id: Option<T::Id>,
    wrap: fn(Reply<R>) -> Scripted<T>,
    ledger: Arc<Mutex<Ledger<T>>>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, reply: Reply<R>) {
        let mut ledger = self.ledger.lock().unwrap();
        ledger.pending.push_back(Expectation {
            id: self.id,
            reply: (self.wrap)(reply),
        });
    }
}

// =============================================================================
// RAW CHANNEL HELPERS
// =============================================================================

/// Creates a client and the receiving end of its mailbox.
///
/// The test plays the actor: it pulls requests with [`expect_create`], [`expect_get`],
/// [`expect_list`] or [`expect_action`], asserts on their payload and answers through
/// the returned responder. Prefer [`MockClient`] unless the payload itself matters.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next message, if it is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Reply<T::Id>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Reply<Option<T>>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Next message, if it is a List request.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Query, oneshot::Sender<Reply<Vec<T>>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::List { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Next message, if it is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, oneshot::Sender<Reply<T::ActionResult>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
