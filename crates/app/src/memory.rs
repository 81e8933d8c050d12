//! In-memory port implementations shared by the service tests.

use std::future::Future;
use std::sync::Mutex;

use foodhub_domain::error::{FoodHubError, NotFoundError, ValidationError};
use foodhub_domain::id::UserId;
use foodhub_domain::resource::Resource;
use foodhub_domain::user::User;

use crate::ports::{Repository, UserRepository};

/// Vec-backed repository keeping insertion order.
pub(crate) struct InMemoryRepo<T> {
    store: Mutex<Vec<T>>,
}

impl<T> Default for InMemoryRepo<T> {
    fn default() -> Self {
        Self {
            store: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Resource> Repository<T> for InMemoryRepo<T> {
    fn create(&self, item: T) -> impl Future<Output = Result<T, FoodHubError>> + Send {
        let mut store = self.store.lock().unwrap();
        store.push(item.clone());
        async { Ok(item) }
    }

    fn get_by_id(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, FoodHubError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.iter().find(|item| item.id() == id).cloned();
        async { Ok(result) }
    }

    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, FoodHubError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.clone();
        async { Ok(result) }
    }

    fn update(&self, item: T) -> impl Future<Output = Result<T, FoodHubError>> + Send {
        let mut store = self.store.lock().unwrap();
        let result = match store.iter_mut().find(|slot| slot.id() == item.id()) {
            Some(slot) => {
                *slot = item.clone();
                Ok(item)
            }
            None => Err(missing::<T>(item.id())),
        };
        async { result }
    }

    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), FoodHubError>> + Send {
        let mut store = self.store.lock().unwrap();
        let before = store.len();
        store.retain(|item| item.id() != id);
        let result = if store.len() == before {
            Err(missing::<T>(id))
        } else {
            Ok(())
        };
        async { result }
    }
}

fn missing<T: Resource>(id: T::Id) -> FoodHubError {
    NotFoundError {
        entity: T::NAME,
        id: id.to_string(),
    }
    .into()
}

/// Vec-backed user repository enforcing username uniqueness.
#[derive(Default)]
pub(crate) struct InMemoryUserRepo {
    store: Mutex<Vec<User>>,
}

impl InMemoryUserRepo {
    pub(crate) fn len(&self) -> usize {
        self.store.lock().unwrap().len()
    }
}

impl UserRepository for InMemoryUserRepo {
    fn create(&self, user: User) -> impl Future<Output = Result<User, FoodHubError>> + Send {
        let mut store = self.store.lock().unwrap();
        let result = if store.iter().any(|u| u.username == user.username) {
            Err(ValidationError::UsernameTaken.into())
        } else {
            store.push(user.clone());
            Ok(user)
        };
        async { result }
    }

    fn get_by_id(
        &self,
        id: UserId,
    ) -> impl Future<Output = Result<Option<User>, FoodHubError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.iter().find(|u| u.id == id).cloned();
        async { Ok(result) }
    }

    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, FoodHubError>> + Send {
        let store = self.store.lock().unwrap();
        let result = store.iter().find(|u| u.username == username).cloned();
        async { Ok(result) }
    }
}
