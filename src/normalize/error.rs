use thiserror::Error;

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("Feature collection is not a JSON object")]
    NotAnObject,

    #[error("Feature collection is missing required field '{0}'")]
    MissingField(&'static str),

    #[error("Field '{field}' of feature {index} is missing or malformed")]
    MalformedFeature { index: usize, field: &'static str },
}
