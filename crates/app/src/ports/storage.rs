//! Storage port: repository traits for persistence.

use std::future::Future;

use foodhub_domain::error::FoodHubError;
use foodhub_domain::id::UserId;
use foodhub_domain::resource::Resource;
use foodhub_domain::user::User;

/// Repository for persisting and querying a [`Resource`].
///
/// `get_all` returns records in the store's default order (insertion order
/// unless the resource says otherwise).
pub trait Repository<T: Resource> {
    /// Insert a new record.
    fn create(&self, item: T) -> impl Future<Output = Result<T, FoodHubError>> + Send;

    /// Get a record by its unique identifier.
    fn get_by_id(&self, id: T::Id) -> impl Future<Output = Result<Option<T>, FoodHubError>> + Send;

    /// Get every record.
    fn get_all(&self) -> impl Future<Output = Result<Vec<T>, FoodHubError>> + Send;

    /// Overwrite an existing record.
    ///
    /// Fails with [`FoodHubError::NotFound`] when the record is gone.
    fn update(&self, item: T) -> impl Future<Output = Result<T, FoodHubError>> + Send;

    /// Hard-delete a record by its unique identifier.
    ///
    /// Fails with [`FoodHubError::NotFound`] when nothing was deleted.
    fn delete(&self, id: T::Id) -> impl Future<Output = Result<(), FoodHubError>> + Send;
}

/// Repository for user accounts.
pub trait UserRepository {
    /// Insert a new user.
    ///
    /// Fails with [`ValidationError::UsernameTaken`] when the username is
    /// already in use.
    ///
    /// [`ValidationError::UsernameTaken`]: foodhub_domain::error::ValidationError::UsernameTaken
    fn create(&self, user: User) -> impl Future<Output = Result<User, FoodHubError>> + Send;

    /// Get a user by id.
    fn get_by_id(&self, id: UserId)
    -> impl Future<Output = Result<Option<User>, FoodHubError>> + Send;

    /// Get a user by exact username.
    fn get_by_username(
        &self,
        username: &str,
    ) -> impl Future<Output = Result<Option<User>, FoodHubError>> + Send;
}
