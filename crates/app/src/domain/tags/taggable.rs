//! Taggable

use crate::uuids::TypedUuid;

/// Records that tags can be attached to.
pub(crate) trait Taggable {
    fn type_as_str() -> &'static str;
}

impl<T> Taggable for TypedUuid<T>
where
    T: Taggable,
{
    fn type_as_str() -> &'static str {
        T::type_as_str()
    }
}
