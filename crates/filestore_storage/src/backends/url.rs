//! Read-only storage over URLs.

use super::{FROM_STORAGE, TO_STORAGE, content_key, failure, loaded_variable};
use crate::clients::UrlFetcher;
use crate::storage::{Storage, sealed};
use filestore_core::{FileVariable, FileVariableReference, StorageDefinition, StorageType};
use filestore_error::{
    BackendError, BackendErrorKind, DefinitionError, DefinitionErrorKind, FilestoreResult,
    UnsupportedOperationError,
};
use reqwest::Url;
use std::sync::Arc;

const NAME: &str = "Url";

pub(crate) struct UrlStorage {
    definition: StorageDefinition,
    base: Option<Url>,
    fetcher: Arc<dyn UrlFetcher>,
}

impl UrlStorage {
    pub(crate) fn new(
        definition: StorageDefinition,
        fetcher: Arc<dyn UrlFetcher>,
    ) -> FilestoreResult<Self> {
        let base = match definition.complement().as_deref().filter(|c| !c.is_empty()) {
            Some(raw) => Some(directory_base(raw)?),
            None => None,
        };
        Ok(Self {
            definition,
            base,
            fetcher,
        })
    }

    /// Resolve a content token to the URL to fetch.
    ///
    /// Only `http` and `https` tokens count as absolute. Everything else is
    /// joined onto the base and must stay under it.
    fn locate(&self, token: &str) -> FilestoreResult<Url> {
        if let Some(absolute) = Url::parse(token).ok().filter(is_web) {
            return Ok(absolute);
        }
        let Some(base) = &self.base else {
            return Err(invalid_token(token, &"not an http(s) URL and no base is configured"));
        };
        let joined = base
            .join(token.trim_start_matches('/'))
            .map_err(|e| invalid_token(token, &e))?;
        if !joined.as_str().starts_with(base.as_str()) {
            return Err(invalid_token(token, &"resolves outside the base URL"));
        }
        Ok(joined)
    }
}

fn is_web(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

// The base always ends in a slash and carries no query or fragment.
fn directory_base(raw: &str) -> FilestoreResult<Url> {
    let mut base = Url::parse(raw).map_err(|e| {
        DefinitionError::new(DefinitionErrorKind::InvalidComplement {
            storage_type: StorageType::Url.to_string(),
            reason: format!("{}: {}", raw, e),
        })
    })?;
    base.set_query(None);
    base.set_fragment(None);
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

fn invalid_token(token: &str, e: &dyn std::fmt::Display) -> filestore_error::FilestoreError {
    BackendError::new(
        NAME,
        FROM_STORAGE,
        BackendErrorKind::InvalidToken(format!("{}: {}", token, e)),
    )
    .into()
}

fn file_name_of(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .or_else(|| url.host_str().map(str::to_string))
        .unwrap_or_else(|| "download".to_string())
}

impl sealed::Sealed for UrlStorage {}

impl Storage for UrlStorage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn storage_type(&self) -> StorageType {
        StorageType::Url
    }

    fn to_storage(&self, _variable: &FileVariable) -> FilestoreResult<FileVariableReference> {
        Err(UnsupportedOperationError::new(NAME, TO_STORAGE).into())
    }

    #[tracing::instrument(skip_all)]
    fn from_storage(&self, reference: &FileVariableReference) -> FilestoreResult<FileVariable> {
        let token = content_key(NAME, FROM_STORAGE, reference)?;
        let url = self.locate(token)?;
        tracing::debug!(url = %url, "Fetching");

        let value = self
            .fetcher
            .get(&url)
            .map_err(failure(NAME, FROM_STORAGE))?;
        Ok(loaded_variable(
            &self.definition,
            file_name_of(&url),
            None,
            value,
        ))
    }

    // The resource is not ours to delete.
    fn purge_storage(&self, _reference: &FileVariableReference) -> FilestoreResult<bool> {
        Ok(false)
    }
}
