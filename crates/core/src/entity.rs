//! Entity trait: identity + continuity across state changes.

/// Marker for domain objects that have a stable identity.
///
/// Two entities with the same id are the same entity, regardless of the
/// values of their other attributes. Ids are assigned once and never change.
pub trait Entity {
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> Self::Id;
}
