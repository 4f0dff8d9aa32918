//! The `IdGenerator` collaborator the core consumes for trade ids (and,
//! typically, for order ids at the boundary that calls into the core).

use uuid::Uuid;

/// Source of unique, opaque, collision-free ids under concurrent callers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> String;
}

/// The default [`IdGenerator`], backed by random (v4) UUIDs.
#[derive(Debug, Default)]
pub struct UuidIdGenerator;

impl UuidIdGenerator {
    pub fn new() -> Self {
        UuidIdGenerator
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
