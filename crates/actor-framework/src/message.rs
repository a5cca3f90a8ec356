//! # Generic Messages
//!
//! The request envelope carried from [`ResourceClient`](crate::ResourceClient) to
//! [`ResourceActor`](crate::ResourceActor). Each variant owns a oneshot sender for its reply.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants are the standard resource operations (create, read, list, update,
/// delete, batch delete) plus `Action` for anything resource-specific. Payload types come
/// from the entity's associated types, so the compiler rejects a payload meant for a
/// different resource.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        query: T::Query,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    /// Removes every listed entity or none of them.
    DeleteMany {
        ids: Vec<T::Id>,
        respond_to: Response<Vec<T::Id>>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
