use crate::normalize::error::NormalizeError;
use crate::query::error::WfsError;
use crate::resolver::error::ResolveError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DwdError {
    #[error(transparent)]
    Wfs(#[from] WfsError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("Layer '{layer}' returned a feature without a usable '{field}' field")]
    MalformedLayer {
        layer: &'static str,
        field: &'static str,
    },
}
