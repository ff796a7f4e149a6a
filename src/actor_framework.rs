use std::fmt::{Debug, Display};
use std::hash::Hash;

use indexmap::IndexMap;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION (Traits with Hooks, DTOs, and Actions)
// =============================================================================

/// Trait that any record kept in a [`ResourceActor`] store must implement.
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type Patch: Send + Sync + Debug;
    type Action: Send + Sync + Debug;
    type ActionResult: Send + Sync + Debug;
    /// Domain error raised by the hooks below.
    type Error: std::error::Error + Clone + Send + Sync + 'static;

    fn id(&self) -> &Self::Id;

    /// Construct the full Entity from the ID and Payload
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks ---

    fn on_create(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
    fn on_update(&mut self, patch: Self::Patch) -> Result<(), Self::Error>;
    fn on_delete(&self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Handle a domain-specific action against a stored record.
    fn handle_action(&mut self, action: Self::Action) -> Result<Self::ActionResult, Self::Error>;
}

/// Failures of the store plumbing, or a domain error from an entity hook.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError<E: std::error::Error> {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Entity(E),
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T, E> = oneshot::Sender<Result<T, FrameworkError<E>>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T::Id, T::Error>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>, T::Error>,
    },
    List {
        respond_to: Response<Vec<T>, T::Error>,
    },
    Update {
        id: T::Id,
        patch: T::Patch,
        respond_to: Response<T, T::Error>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<(), T::Error>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult, T::Error>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

/// Owns an insertion-ordered store of `T` and serves requests one at a time.
pub struct ResourceActor<T: Entity> {
    name: &'static str,
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: IndexMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        name: &'static str,
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        Self::with_seed(name, buffer_size, Vec::new(), next_id_fn)
    }

    /// Starts with `seed` already stored, in the given order.
    pub fn with_seed(
        name: &'static str,
        buffer_size: usize,
        seed: impl IntoIterator<Item = T>,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = seed
            .into_iter()
            .map(|item| (item.id().clone(), item))
            .collect();
        let actor = Self {
            name,
            receiver,
            store,
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, ResourceClient::new(sender))
    }

    pub async fn run(mut self) {
        info!(store = self.name, records = self.store.len(), "Store starting");
        while let Some(msg) = self.receiver.recv().await {
            self.handle(msg);
        }
        info!(store = self.name, "Store stopped");
    }

    fn handle(&mut self, msg: ResourceRequest<T>) {
        match msg {
            ResourceRequest::Create { payload, respond_to } => {
                let id = (self.next_id_fn)();
                let result = T::from_create(id.clone(), payload).and_then(|mut item| {
                    item.on_create()?;
                    Ok(item)
                });
                match result {
                    Ok(item) => {
                        debug!(store = self.name, id = %id, "Created");
                        self.store.insert(id.clone(), item);
                        let _ = respond_to.send(Ok(id));
                    }
                    Err(e) => {
                        warn!(store = self.name, error = %e, "Create rejected");
                        let _ = respond_to.send(Err(FrameworkError::Entity(e)));
                    }
                }
            }
            ResourceRequest::Get { id, respond_to } => {
                let _ = respond_to.send(Ok(self.store.get(&id).cloned()));
            }
            ResourceRequest::List { respond_to } => {
                let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
            }
            ResourceRequest::Update { id, patch, respond_to } => {
                let result = match self.store.get_mut(&id) {
                    Some(item) => {
                        // Patch a copy so a rejected update leaves the record intact.
                        let mut updated = item.clone();
                        match updated.on_update(patch) {
                            Ok(()) => {
                                *item = updated.clone();
                                Ok(updated)
                            }
                            Err(e) => Err(FrameworkError::Entity(e)),
                        }
                    }
                    None => Err(FrameworkError::NotFound(id.to_string())),
                };
                let _ = respond_to.send(result);
            }
            ResourceRequest::Delete { id, respond_to } => {
                let result = match self.store.get(&id) {
                    Some(item) => match item.on_delete() {
                        Ok(()) => {
                            self.store.shift_remove(&id);
                            debug!(store = self.name, id = %id, "Deleted");
                            Ok(())
                        }
                        Err(e) => Err(FrameworkError::Entity(e)),
                    },
                    None => Err(FrameworkError::NotFound(id.to_string())),
                };
                let _ = respond_to.send(result);
            }
            ResourceRequest::Action { id, action, respond_to } => {
                let result = match self.store.get_mut(&id) {
                    Some(item) => item.handle_action(action).map_err(FrameworkError::Entity),
                    None => Err(FrameworkError::NotFound(id.to_string())),
                };
                let _ = respond_to.send(result);
            }
        }
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

// Manual impl: a derive would demand `T: Clone` bounds on the sender.
impl<T: Entity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R, T::Error>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError<T::Error>> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T::Id, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Create { payload, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Update { id, patch, respond_to })
            .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError<T::Error>> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    // --- Domain Definition ---

    #[derive(Clone, Debug, PartialEq)]
    struct Wishlist {
        id: String,
        owner: String,
        product_ids: Vec<String>,
        locked: bool,
    }

    #[derive(Debug)]
    struct WishlistCreate {
        owner: String,
    }

    #[derive(Debug)]
    struct WishlistPatch {
        owner: Option<String>,
    }

    #[derive(Debug)]
    enum WishlistAction {
        Save(String),
        Lock,
    }

    #[derive(Debug, Clone, Error, PartialEq)]
    enum WishlistError {
        #[error("owner required")]
        MissingOwner,
        #[error("wishlist locked")]
        Locked,
    }

    impl Entity for Wishlist {
        type Id = String;
        type CreatePayload = WishlistCreate;
        type Patch = WishlistPatch;
        type Action = WishlistAction;
        type ActionResult = usize;
        type Error = WishlistError;

        fn id(&self) -> &String {
            &self.id
        }

        fn from_create(id: String, payload: WishlistCreate) -> Result<Self, WishlistError> {
            if payload.owner.is_empty() {
                return Err(WishlistError::MissingOwner);
            }
            Ok(Self {
                id,
                owner: payload.owner,
                product_ids: Vec::new(),
                locked: false,
            })
        }

        fn on_update(&mut self, patch: WishlistPatch) -> Result<(), WishlistError> {
            if let Some(owner) = patch.owner {
                if owner.is_empty() {
                    return Err(WishlistError::MissingOwner);
                }
                self.owner = owner;
            }
            Ok(())
        }

        fn on_delete(&self) -> Result<(), WishlistError> {
            if self.locked {
                return Err(WishlistError::Locked);
            }
            Ok(())
        }

        fn handle_action(&mut self, action: WishlistAction) -> Result<usize, WishlistError> {
            match action {
                WishlistAction::Save(product_id) => {
                    if self.locked {
                        return Err(WishlistError::Locked);
                    }
                    self.product_ids.push(product_id);
                    Ok(self.product_ids.len())
                }
                WishlistAction::Lock => {
                    self.locked = true;
                    Ok(self.product_ids.len())
                }
            }
        }
    }

    fn counter(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
        let counter = Arc::new(AtomicU64::new(1));
        move || format!("{}_{}", prefix, counter.fetch_add(1, Ordering::SeqCst))
    }

    fn seeded(owner: &str, id: &str) -> Wishlist {
        Wishlist {
            id: id.to_string(),
            owner: owner.to_string(),
            product_ids: Vec::new(),
            locked: false,
        }
    }

    // --- Test ---

    #[tokio::test]
    async fn test_resource_actor_with_actions() {
        let (actor, client) = ResourceActor::<Wishlist>::new("wishlists", 10, counter("wl"));
        tokio::spawn(actor.run());

        let id = client
            .create(WishlistCreate { owner: "John".into() })
            .await
            .unwrap();
        assert_eq!(id, "wl_1");

        let saved = client
            .perform_action(id.clone(), WishlistAction::Save("3".into()))
            .await
            .unwrap();
        assert_eq!(saved, 1);

        client.perform_action(id.clone(), WishlistAction::Lock).await.unwrap();
        let err = client
            .perform_action(id.clone(), WishlistAction::Save("4".into()))
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::Entity(WishlistError::Locked));

        let err = client.delete(id.clone()).await.unwrap_err();
        assert_eq!(err, FrameworkError::Entity(WishlistError::Locked));
        assert!(client.get(id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_seed_order_survives_deletes() {
        let seed = vec![seeded("a", "1"), seeded("b", "2"), seeded("c", "3")];
        let (actor, client) = ResourceActor::with_seed("wishlists", 10, seed, counter("wl"));
        tokio::spawn(actor.run());

        client.delete("2".to_string()).await.unwrap();
        client.create(WishlistCreate { owner: "d".into() }).await.unwrap();

        let owners: Vec<String> = client.list().await.unwrap().into_iter().map(|w| w.owner).collect();
        assert_eq!(owners, vec!["a", "c", "d"]);
    }

    #[tokio::test]
    async fn test_rejected_update_leaves_record_untouched() {
        let (actor, client) =
            ResourceActor::with_seed("wishlists", 10, vec![seeded("John", "1")], counter("wl"));
        tokio::spawn(actor.run());

        let err = client
            .update("1".to_string(), WishlistPatch { owner: Some(String::new()) })
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::Entity(WishlistError::MissingOwner));
        assert_eq!(client.get("1".to_string()).await.unwrap().unwrap().owner, "John");

        let err = client
            .update("9".to_string(), WishlistPatch { owner: None })
            .await
            .unwrap_err();
        assert_eq!(err, FrameworkError::NotFound("9".into()));
    }

    #[tokio::test]
    async fn test_closed_actor_reports_communication_error() {
        let (actor, client) = ResourceActor::<Wishlist>::new("wishlists", 1, counter("wl"));
        drop(actor);
        let err = client.list().await.unwrap_err();
        assert_eq!(err, FrameworkError::ActorClosed);
    }
}
