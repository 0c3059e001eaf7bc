use crate::artifacts::objects::object::ObjectBox;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;

/// Source of decoded objects for tree entries
///
/// Implementations return the object stored under `oid`, tagged with the kind
/// found in the store. A missing object is `ObjectNotFound`, anything that
/// cannot be read or decoded is `CorruptObject`.
pub trait Repository {
    fn lookup(&self, oid: &ObjectId) -> Result<ObjectBox>;
}

impl<R: Repository + ?Sized> Repository for std::sync::Arc<R> {
    fn lookup(&self, oid: &ObjectId) -> Result<ObjectBox> {
        (**self).lookup(oid)
    }
}
