//! Route-specific response types.
//!
//! Each submodule holds the DTOs for one dashboard endpoint. The types are
//! re-exported through [`crate::api`] so the HTTP layer and tests share a
//! single surface.

pub mod events;
pub mod landing;
pub mod transitions;
