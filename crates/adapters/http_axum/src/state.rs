//! Shared application state for axum handlers.

use std::sync::Arc;

use foodhub_app::ports::{PasswordHasher, Repository, TokenIssuer, UserRepository};
use foodhub_app::services::{
    AuthService, CommentService, FoodService, FoodTypeService, ResourceService,
};
use foodhub_domain::comment::Comment;
use foodhub_domain::food::Food;
use foodhub_domain::food_type::FoodType;
use foodhub_domain::permission::{AllowAny, IsAdminUser, IsCreator, Permission};
use foodhub_domain::resource::Resource;

/// Application state shared across all axum handlers.
///
/// Generic over the three catalogue repositories, the user repository, the
/// password hasher and the token issuer to avoid dynamic dispatch.
/// `Clone` is implemented manually so the underlying types themselves do not
/// need to be `Clone`, only the `Arc` wrappers are cloned.
pub struct AppState<FTR, FR, CR, UR, PH, TI> {
    pub food_type_service: Arc<FoodTypeService<FTR>>,
    pub food_service: Arc<FoodService<FR>>,
    pub comment_service: Arc<CommentService<CR>>,
    /// Registration, token issuance and request authentication.
    pub auth_service: Arc<AuthService<UR, PH, TI>>,
}

impl<FTR, FR, CR, UR, PH, TI> Clone for AppState<FTR, FR, CR, UR, PH, TI> {
    fn clone(&self) -> Self {
        Self {
            food_type_service: Arc::clone(&self.food_type_service),
            food_service: Arc::clone(&self.food_service),
            comment_service: Arc::clone(&self.comment_service),
            auth_service: Arc::clone(&self.auth_service),
        }
    }
}

impl<FTR, FR, CR, UR, PH, TI> AppState<FTR, FR, CR, UR, PH, TI>
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    /// Create a new application state from service instances.
    pub fn new(
        food_type_service: FoodTypeService<FTR>,
        food_service: FoodService<FR>,
        comment_service: CommentService<CR>,
        auth_service: AuthService<UR, PH, TI>,
    ) -> Self {
        Self {
            food_type_service: Arc::new(food_type_service),
            food_service: Arc::new(food_service),
            comment_service: Arc::new(comment_service),
            auth_service: Arc::new(auth_service),
        }
    }

    /// Create a new application state from pre-wrapped `Arc` services.
    ///
    /// Use this when the auth service is also needed outside the HTTP layer,
    /// e.g. for the admin bootstrap at startup.
    pub fn from_arcs(
        food_type_service: Arc<FoodTypeService<FTR>>,
        food_service: Arc<FoodService<FR>>,
        comment_service: Arc<CommentService<CR>>,
        auth_service: Arc<AuthService<UR, PH, TI>>,
    ) -> Self {
        Self {
            food_type_service,
            food_service,
            comment_service,
            auth_service,
        }
    }
}

/// State that can hand out the service for resource `T`.
///
/// Lets one set of handlers serve every catalogue resource.
pub trait ResourceState<T: Resource>: Clone + Send + Sync + 'static {
    type Repo: Repository<T> + Send + Sync + 'static;
    type Permission: Permission<T> + Send + Sync + 'static;

    fn resource_service(&self) -> &ResourceService<T, Self::Repo, Self::Permission>;
}

impl<FTR, FR, CR, UR, PH, TI> ResourceState<FoodType> for AppState<FTR, FR, CR, UR, PH, TI>
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    type Repo = FTR;
    type Permission = AllowAny;

    fn resource_service(&self) -> &FoodTypeService<FTR> {
        &self.food_type_service
    }
}

impl<FTR, FR, CR, UR, PH, TI> ResourceState<Food> for AppState<FTR, FR, CR, UR, PH, TI>
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    type Repo = FR;
    type Permission = IsAdminUser;

    fn resource_service(&self) -> &FoodService<FR> {
        &self.food_service
    }
}

impl<FTR, FR, CR, UR, PH, TI> ResourceState<Comment> for AppState<FTR, FR, CR, UR, PH, TI>
where
    FTR: Repository<FoodType> + Send + Sync + 'static,
    FR: Repository<Food> + Send + Sync + 'static,
    CR: Repository<Comment> + Send + Sync + 'static,
    UR: UserRepository + Send + Sync + 'static,
    PH: PasswordHasher + Send + Sync + 'static,
    TI: TokenIssuer + Send + Sync + 'static,
{
    type Repo = CR;
    type Permission = IsCreator;

    fn resource_service(&self) -> &CommentService<CR> {
        &self.comment_service
    }
}
