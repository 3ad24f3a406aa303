use mongodb::bson::oid::ObjectId;

pub mod cart_repo;
pub mod product_repo;

pub use cart_repo::CartRepo;
pub use product_repo::ProductRepo;

/// Parse a caller-supplied id into an ObjectId.
///
/// A string that is not a valid ObjectId yields `None`, and the repositories
/// treat that exactly like a lookup miss: callers cannot distinguish "bad id
/// syntax" from "no such document".
pub(crate) fn parse_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
