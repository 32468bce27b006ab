//! User records.

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A user, identified by their email address.
///
/// Created lazily the first time any event operation references the email;
/// never updated or deleted by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub email: String,
}
