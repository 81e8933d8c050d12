//! Resource service: the collection and detail use-cases shared by every
//! catalogue resource.
//!
//! Each operation runs the permission predicate first, then (for detail
//! operations) loads the record so a missing id is reported as not-found
//! before the record-level permission is consulted. Payloads are handed in
//! undecoded and only decoded once every check has passed.

use std::marker::PhantomData;

use foodhub_domain::comment::Comment;
use foodhub_domain::error::{FoodHubError, NotFoundError, ValidationError};
use foodhub_domain::food::Food;
use foodhub_domain::food_type::FoodType;
use foodhub_domain::permission::{Action, AllowAny, IsAdminUser, IsCreator, Permission};
use foodhub_domain::requester::Requester;
use foodhub_domain::resource::Resource;

use crate::ports::Repository;

/// Food endpoints: administrators only.
pub type FoodService<R> = ResourceService<Food, R, IsAdminUser>;

/// Food type endpoints: open to everyone.
pub type FoodTypeService<R> = ResourceService<FoodType, R, AllowAny>;

/// Comment endpoints: readable by all, writable by the author.
pub type CommentService<R> = ResourceService<Comment, R, IsCreator>;

/// Application service for list/create/retrieve/update/delete of `T`.
pub struct ResourceService<T, R, P> {
    repo: R,
    permission: P,
    _resource: PhantomData<fn() -> T>,
}

impl<T, R, P> ResourceService<T, R, P>
where
    T: Resource,
    R: Repository<T>,
    P: Permission<T>,
{
    /// Create a new service backed by `repo` and guarded by `permission`.
    pub fn new(repo: R, permission: P) -> Self {
        Self {
            repo,
            permission,
            _resource: PhantomData,
        }
    }

    /// List every record.
    ///
    /// # Errors
    ///
    /// Returns an authentication/permission error when refused, or a storage
    /// error propagated from the repository.
    pub async fn list(&self, requester: &Requester) -> Result<Vec<T>, FoodHubError> {
        self.authorize(requester, Action::List)?;
        self.repo.get_all().await
    }

    /// Build a record from the decoded `draft`, validate it and persist it.
    ///
    /// `draft` is not called when the requester is refused.
    ///
    /// # Errors
    ///
    /// Returns an authentication/permission error when refused,
    /// [`FoodHubError::Validation`] if the draft cannot be decoded or is
    /// invalid, or a storage error from the repository. Nothing is stored on
    /// error.
    pub async fn create<D>(&self, requester: &Requester, draft: D) -> Result<T, FoodHubError>
    where
        D: FnOnce() -> Result<T::Draft, ValidationError> + Send,
    {
        self.authorize(requester, Action::Create)?;
        let item = T::from_draft(draft()?, requester)?;
        let created = self.repo.create(item).await?;
        tracing::info!(resource = T::NAME, id = %created.id(), "created");
        Ok(created)
    }

    /// Look up a record by id.
    ///
    /// # Errors
    ///
    /// Returns an authentication/permission error when refused,
    /// [`FoodHubError::NotFound`] when no record with `id` exists, or a
    /// storage error from the repository.
    pub async fn retrieve(&self, requester: &Requester, id: T::Id) -> Result<T, FoodHubError> {
        self.authorize(requester, Action::Retrieve)?;
        self.load(requester, id, Action::Retrieve).await
    }

    /// Apply the fields present in the decoded `patch` to an existing record.
    ///
    /// `patch` is not called unless the record exists and the requester may
    /// change it.
    ///
    /// # Errors
    ///
    /// Returns an authentication/permission error when refused,
    /// [`FoodHubError::NotFound`] when no record with `id` exists,
    /// [`FoodHubError::Validation`] if the patch cannot be decoded or the
    /// patched record is invalid, or a storage error from the repository.
    /// The record is unchanged on error.
    pub async fn update<D>(
        &self,
        requester: &Requester,
        id: T::Id,
        patch: D,
    ) -> Result<T, FoodHubError>
    where
        D: FnOnce() -> Result<T::Patch, ValidationError> + Send,
    {
        self.authorize(requester, Action::Update)?;
        let mut item = self.load(requester, id, Action::Update).await?;
        item.apply(patch()?);
        item.validate()?;
        let updated = self.repo.update(item).await?;
        tracing::info!(resource = T::NAME, %id, "updated");
        Ok(updated)
    }

    /// Delete a record by id.
    ///
    /// # Errors
    ///
    /// Returns an authentication/permission error when refused,
    /// [`FoodHubError::NotFound`] when no record with `id` exists, or a
    /// storage error from the repository.
    pub async fn delete(&self, requester: &Requester, id: T::Id) -> Result<(), FoodHubError> {
        self.authorize(requester, Action::Delete)?;
        self.load(requester, id, Action::Delete).await?;
        self.repo.delete(id).await?;
        tracing::info!(resource = T::NAME, %id, "deleted");
        Ok(())
    }

    /// Run the collection-level permission check for `action` on its own.
    ///
    /// # Errors
    ///
    /// Returns [`FoodHubError::Unauthenticated`] or
    /// [`FoodHubError::PermissionDenied`] when refused.
    pub fn authorize(&self, requester: &Requester, action: Action) -> Result<(), FoodHubError> {
        self.permission
            .has_permission(requester, action)
            .inspect_err(|_| {
                tracing::debug!(resource = T::NAME, action = action.as_str(), "refused");
            })
    }

    async fn load(
        &self,
        requester: &Requester,
        id: T::Id,
        action: Action,
    ) -> Result<T, FoodHubError> {
        let item = self.repo.get_by_id(id).await?.ok_or_else(|| NotFoundError {
            entity: T::NAME,
            id: id.to_string(),
        })?;
        self.permission
            .has_object_permission(requester, action, &item)
            .inspect_err(|_| {
                let action = action.as_str();
                tracing::debug!(resource = T::NAME, action, %id, "refused on record");
            })?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;
    use crate::memory::InMemoryRepo;
    use foodhub_domain::comment::{CommentDraft, CommentPatch};
    use foodhub_domain::error::AuthError;
    use foodhub_domain::food::{FoodDraft, FoodPatch};
    use foodhub_domain::food_type::{FoodTypeDraft, FoodTypePatch};
    use foodhub_domain::id::{CommentId, FoodId, FoodTypeId, UserId};
    use foodhub_domain::requester::Principal;

    fn user(is_admin: bool) -> Requester {
        Requester::User(Principal {
            id: UserId::new(),
            username: if is_admin { "root" } else { "alice" }.to_string(),
            is_admin,
        })
    }

    /// Payload that is already decoded.
    fn ready<D: Send>(payload: D) -> impl FnOnce() -> Result<D, ValidationError> + Send {
        move || Ok(payload)
    }

    fn food_types() -> FoodTypeService<InMemoryRepo<FoodType>> {
        ResourceService::new(InMemoryRepo::default(), AllowAny)
    }

    fn foods() -> FoodService<InMemoryRepo<Food>> {
        ResourceService::new(InMemoryRepo::default(), IsAdminUser)
    }

    fn comments() -> CommentService<InMemoryRepo<Comment>> {
        ResourceService::new(InMemoryRepo::default(), IsCreator)
    }

    fn food_type_draft(name: &str) -> FoodTypeDraft {
        FoodTypeDraft {
            name: Some(name.to_string()),
        }
    }

    fn food_draft() -> FoodDraft {
        FoodDraft {
            name: Some("Pizza".to_string()),
            description: Some("Margherita".to_string()),
            price: Some(9.5),
            food_type: Some(FoodTypeId::new()),
        }
    }

    fn comment_draft(body: &str) -> CommentDraft {
        CommentDraft {
            body: Some(body.to_string()),
        }
    }

    #[tokio::test]
    async fn should_create_and_list_food_types_when_anonymous() {
        let svc = food_types();
        let anon = Requester::Anonymous;

        let soup = svc
            .create(&anon, ready(food_type_draft("Soup")))
            .await
            .unwrap();
        svc.create(&anon, ready(food_type_draft("Dessert")))
            .await
            .unwrap();

        let all = svc.list(&anon).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0], soup);
        assert_eq!(all[1].name, "Dessert");
    }

    #[tokio::test]
    async fn should_store_nothing_when_draft_invalid() {
        let svc = food_types();
        let result = svc
            .create(&Requester::Anonymous, ready(food_type_draft("")))
            .await;

        assert!(matches!(
            result,
            Err(FoodHubError::Validation(ValidationError::Blank { field: "name" }))
        ));
        assert!(svc.list(&Requester::Anonymous).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_store_nothing_when_draft_cannot_be_decoded() {
        let svc = food_types();
        let result = svc
            .create(&Requester::Anonymous, || {
                Err(ValidationError::InvalidValue {
                    field: "name".to_string(),
                })
            })
            .await;

        assert!(matches!(
            result,
            Err(FoodHubError::Validation(ValidationError::InvalidValue { .. }))
        ));
        assert!(svc.list(&Requester::Anonymous).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_return_stored_record_when_created() {
        let svc = foods();
        let admin = user(true);

        let created = svc.create(&admin, ready(food_draft())).await.unwrap();
        let fetched = svc.retrieve(&admin, created.id).await.unwrap();
        assert_eq!(created, fetched);
    }

    #[tokio::test]
    async fn should_refuse_every_food_operation_when_not_admin() {
        let svc = foods();
        let admin = user(true);
        let existing = svc.create(&admin, ready(food_draft())).await.unwrap();

        for requester in [user(false), Requester::Anonymous] {
            let expect_denied = |result: Result<(), FoodHubError>| match (&requester, result) {
                (
                    Requester::Anonymous,
                    Err(FoodHubError::Unauthenticated(AuthError::NotAuthenticated)),
                )
                | (Requester::User(_), Err(FoodHubError::PermissionDenied)) => {}
                (_, other) => panic!("unexpected outcome: {other:?}"),
            };

            expect_denied(svc.list(&requester).await.map(|_| ()));
            expect_denied(svc.create(&requester, ready(food_draft())).await.map(|_| ()));
            expect_denied(svc.retrieve(&requester, existing.id).await.map(|_| ()));
            let patch = FoodPatch {
                price: Some(0.0),
                ..FoodPatch::default()
            };
            expect_denied(
                svc.update(&requester, existing.id, ready(patch))
                    .await
                    .map(|_| ()),
            );
            expect_denied(svc.delete(&requester, existing.id).await);
        }

        let all = svc.list(&admin).await.unwrap();
        assert_eq!(all, vec![existing]);
    }

    #[tokio::test]
    async fn should_not_decode_payload_when_refused() {
        let svc = foods();
        let existing = svc.create(&user(true), ready(food_draft())).await.unwrap();
        let decoded = AtomicBool::new(false);

        let result = svc
            .create(&user(false), || {
                decoded.store(true, Ordering::SeqCst);
                Ok(food_draft())
            })
            .await;
        assert!(matches!(result, Err(FoodHubError::PermissionDenied)));

        let result = svc
            .update(&Requester::Anonymous, existing.id, || {
                decoded.store(true, Ordering::SeqCst);
                Ok(FoodPatch::default())
            })
            .await;
        assert!(matches!(result, Err(FoodHubError::Unauthenticated(_))));

        assert!(!decoded.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn should_not_decode_patch_for_someone_elses_comment() {
        let svc = comments();
        let created = svc
            .create(&user(false), ready(comment_draft("Lovely")))
            .await
            .unwrap();

        let result = svc
            .update(&user(false), created.id, || {
                Err(ValidationError::InvalidValue {
                    field: "body".to_string(),
                })
            })
            .await;

        assert!(matches!(result, Err(FoodHubError::PermissionDenied)));
    }

    #[tokio::test]
    async fn should_keep_unspecified_fields_when_patching() {
        let svc = foods();
        let admin = user(true);
        let created = svc.create(&admin, ready(food_draft())).await.unwrap();

        let patch = FoodPatch {
            name: Some("Calzone".to_string()),
            ..FoodPatch::default()
        };
        let updated = svc.update(&admin, created.id, ready(patch)).await.unwrap();

        assert_eq!(updated.name, "Calzone");
        assert_eq!(updated.price, created.price);
        assert_eq!(updated.description, created.description);
        assert_eq!(updated.food_type, created.food_type);
        assert_eq!(svc.retrieve(&admin, created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn should_leave_record_unchanged_when_patch_invalid() {
        let svc = food_types();
        let anon = Requester::Anonymous;
        let created = svc
            .create(&anon, ready(food_type_draft("Soup")))
            .await
            .unwrap();

        let patch = FoodTypePatch {
            name: Some("  ".to_string()),
        };
        let result = svc.update(&anon, created.id, ready(patch)).await;

        assert!(matches!(result, Err(FoodHubError::Validation(_))));
        assert_eq!(svc.retrieve(&anon, created.id).await.unwrap().name, "Soup");
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_record() {
        let admin = user(true);

        let result = food_types().delete(&admin, FoodTypeId::new()).await;
        assert!(matches!(result, Err(FoodHubError::NotFound(_))));

        let result = foods().delete(&admin, FoodId::new()).await;
        assert!(matches!(result, Err(FoodHubError::NotFound(_))));

        let result = comments().delete(&admin, CommentId::new()).await;
        assert!(matches!(result, Err(FoodHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_delete_record_when_exists() {
        let svc = food_types();
        let anon = Requester::Anonymous;
        let created = svc
            .create(&anon, ready(food_type_draft("Soup")))
            .await
            .unwrap();

        svc.delete(&anon, created.id).await.unwrap();

        let result = svc.retrieve(&anon, created.id).await;
        assert!(matches!(result, Err(FoodHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_assign_requester_as_comment_author() {
        let svc = comments();
        let alice = user(false);

        let created = svc
            .create(&alice, ready(comment_draft("Lovely")))
            .await
            .unwrap();
        assert_eq!(created.author, alice.principal().unwrap().id);
    }

    #[tokio::test]
    async fn should_refuse_anonymous_comment_creation() {
        let svc = comments();
        let result = svc
            .create(&Requester::Anonymous, ready(comment_draft("Hi")))
            .await;
        assert!(matches!(result, Err(FoodHubError::Unauthenticated(_))));
        assert!(svc.list(&Requester::Anonymous).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_let_anyone_read_comments() {
        let svc = comments();
        let alice = user(false);
        let created = svc
            .create(&alice, ready(comment_draft("Lovely")))
            .await
            .unwrap();

        let anon = Requester::Anonymous;
        assert_eq!(svc.list(&anon).await.unwrap().len(), 1);
        assert_eq!(svc.retrieve(&anon, created.id).await.unwrap(), created);
        assert_eq!(svc.retrieve(&user(false), created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn should_refuse_mutating_someone_elses_comment() {
        let svc = comments();
        let alice = user(false);
        let mallory = user(false);
        let created = svc
            .create(&alice, ready(comment_draft("Lovely")))
            .await
            .unwrap();

        let patch = CommentPatch {
            body: Some("Awful".to_string()),
        };
        let result = svc.update(&mallory, created.id, ready(patch)).await;
        assert!(matches!(result, Err(FoodHubError::PermissionDenied)));

        let result = svc.delete(&mallory, created.id).await;
        assert!(matches!(result, Err(FoodHubError::PermissionDenied)));

        assert_eq!(svc.retrieve(&alice, created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn should_report_missing_comment_before_permission() {
        let svc = comments();
        let result = svc
            .update(&user(false), CommentId::new(), ready(CommentPatch::default()))
            .await;
        assert!(matches!(result, Err(FoodHubError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_let_author_edit_and_delete_comment() {
        let svc = comments();
        let alice = user(false);
        let created = svc
            .create(&alice, ready(comment_draft("Lovely")))
            .await
            .unwrap();

        let patch = CommentPatch {
            body: Some("Even better".to_string()),
        };
        let updated = svc.update(&alice, created.id, ready(patch)).await.unwrap();
        assert_eq!(updated.body, "Even better");
        assert_eq!(updated.author, created.author);
        assert_eq!(updated.created_at, created.created_at);

        svc.delete(&alice, created.id).await.unwrap();
        assert!(svc.list(&alice).await.unwrap().is_empty());
    }
}
