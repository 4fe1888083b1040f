//! Connection parameters for content-management repositories.

use serde::{Deserialize, Serialize};

/// Parameters carried in the structured complement of a `CMIS` definition.
///
/// The password is serialized (it is part of the definition string) but is
/// never shown by `Debug` or by [`crate::StorageDefinition::describe`].
///
/// # Examples
///
/// ```
/// use filestore_core::CmisParameters;
///
/// let params = CmisParameters::builder()
///     .url("http://cmis.local/atom")
///     .repository_name("archive")
///     .user_name("svc")
///     .password("hunter2")
///     .build()
///     .unwrap();
///
/// assert_eq!(params.repository_name(), "archive");
/// assert!(!format!("{:?}", params).contains("hunter2"));
/// ```
#[derive(
    Clone,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    derive_getters::Getters,
    derive_builder::Builder,
)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct CmisParameters {
    /// Repository endpoint URL
    url: String,
    /// Repository name (or id)
    repository_name: String,
    /// User to authenticate as
    user_name: String,
    /// Password for `user_name`
    password: String,
    /// Folder path inside the repository; root when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    folder: Option<String>,
}

impl CmisParameters {
    /// Creates a new parameters builder.
    pub fn builder() -> CmisParametersBuilder {
        CmisParametersBuilder::default()
    }

    /// Human-readable summary without the password.
    pub fn describe(&self) -> String {
        format!(
            "url=[{}] repository=[{}] userName=[{}]",
            self.url, self.repository_name, self.user_name
        )
    }
}

impl std::fmt::Debug for CmisParameters {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmisParameters")
            .field("url", &self.url)
            .field("repository_name", &self.repository_name)
            .field("user_name", &self.user_name)
            .field("password", &"***")
            .field("folder", &self.folder)
            .finish()
    }
}
