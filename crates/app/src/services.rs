//! Application services: use-case implementations.
//!
//! Each service struct accepts port trait implementations via generic parameters
//! (constructor injection), keeping this layer decoupled from concrete adapters.

pub mod auth_service;
pub mod resource_service;

pub use auth_service::AuthService;
pub use resource_service::{CommentService, FoodService, FoodTypeService, ResourceService};
