//! # foodhub-domain
//!
//! Pure domain model for the foodhub catalogue service.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define the catalogue records (**food types** and **foods**)
//! - Define **comments** and the **users** that author them
//! - Describe who is calling (**requester**) and what they may do
//!   (**permission** predicates)
//! - Contain all field validation and partial-update logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod comment;
pub mod food;
pub mod food_type;
pub mod permission;
pub mod requester;
pub mod resource;
pub mod user;

mod serde_ext;
