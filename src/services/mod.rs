//! Service layer: resolution and link management business logic, shared by
//! whatever interface fronts the core.

mod link_service;
mod resolver;

pub use link_service::{CreateLinkRequest, LinkCreateResult, LinkService, UpdateLinkRequest};
pub use resolver::{Resolution, Resolver};
