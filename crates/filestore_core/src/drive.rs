//! Cloud-drive parameters.

use serde::{Deserialize, Serialize};

/// Parameters carried in the structured complement of a `GOOGLEDRIVE` definition.
///
/// The service-account credential is never part of these parameters; it
/// travels in the definition's credential complement.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_setters::Setters,
)]
#[serde(rename_all = "camelCase")]
#[setters(prefix = "with_", strip_option, into)]
pub struct DriveParameters {
    /// Folder uploads are placed in; drive root when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    folder_id: Option<String>,
}
