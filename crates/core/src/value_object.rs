//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have **no identity**: two instances with the same attribute
/// values are equal. They are immutable; "changing" one means building a new
/// value.
///
/// - **Value Object**: `Price(1299)` equals any other `Price(1299)`
/// - **Entity**: an inventory record stays the same record when its quantity changes
///
/// ```ignore
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// struct Price(u64);
///
/// impl ValueObject for Price {}
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
