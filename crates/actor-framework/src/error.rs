//! # Framework Errors
//!
//! Errors raised by the actor plumbing itself. Domain errors travel inside
//! [`FrameworkError::EntityError`] and can be recovered with [`FrameworkError::downcast_entity`].

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(Box<dyn std::error::Error + Send + Sync>),
}

impl FrameworkError {
    /// Recovers the concrete entity error if this is an `EntityError` of type `E`.
    ///
    /// Returns the original error untouched when it is a plumbing error or a different type.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::EntityError(boxed) => match boxed.downcast::<E>() {
                Ok(err) => Ok(*err),
                Err(other) => Err(FrameworkError::EntityError(other)),
            },
            other => Err(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error, PartialEq)]
    #[error("out of gumdrops")]
    struct OutOfGumdrops;

    #[test]
    fn downcast_recovers_entity_error() {
        let err = FrameworkError::EntityError(Box::new(OutOfGumdrops));
        assert_eq!(err.downcast_entity::<OutOfGumdrops>().unwrap(), OutOfGumdrops);
    }

    #[test]
    fn downcast_leaves_other_errors_alone() {
        let err = FrameworkError::NotFound("candy_9".into());
        match err.downcast_entity::<OutOfGumdrops>() {
            Err(FrameworkError::NotFound(id)) => assert_eq!(id, "candy_9"),
            other => panic!("unexpected: {:?}", other),
        }

        let err = FrameworkError::EntityError(Box::new(std::io::Error::other("disk")));
        assert!(matches!(
            err.downcast_entity::<OutOfGumdrops>(),
            Err(FrameworkError::EntityError(_))
        ));
    }
}
