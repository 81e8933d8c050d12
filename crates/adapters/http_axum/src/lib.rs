//! # foodhub-adapter-http-axum
//!
//! HTTP adapter built on [axum](https://docs.rs/axum).
//!
//! ## Responsibilities
//! - Serve the **JSON REST API** (`/api/foods`, `/api/food-types`,
//!   `/api/comments`, `/api/register`, `/api/token`, …)
//! - Resolve the bearer token of every request into a
//!   [`Requester`](foodhub_domain::requester::Requester)
//! - Map HTTP requests into application service calls (driving adapter)
//! - Map application results and errors into HTTP responses
//!
//! ## Dependency rule
//! Depends on `foodhub-app` (for port traits and services) and `foodhub-domain`
//! (for domain types used in request/response mapping). Never leaks axum types
//! into the domain.

pub mod api;
pub mod auth;
pub mod error;
pub mod extract;
pub mod router;
pub mod state;
