use crate::resolver::identifier::Identifier;
use crate::resolver::layers::Domain;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Identifier {0} is not a valid id, name or location")]
    InvalidIdentifier(Identifier),

    #[error("Identifier {identifier} cannot be used for {domain}")]
    UnsupportedIdentifier {
        identifier: Identifier,
        domain: Domain,
    },

    #[error("No {domain} cell matches identifier {identifier}")]
    NoMatch {
        identifier: Identifier,
        domain: Domain,
    },

    #[error("Layer '{layer}' returned a match without a usable '{field}' field")]
    MalformedMatch {
        layer: &'static str,
        field: &'static str,
    },
}
