//! Entity trait: records that keep their identity while their attributes change.

/// A domain object identified by id rather than by value.
///
/// An inventory record stays the same record when its quantity, price or
/// tags change; repositories key on [`Entity::id`].
pub trait Entity {
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;
}
