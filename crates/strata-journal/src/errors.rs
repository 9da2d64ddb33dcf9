strata::unit! {
    interactor;

    /// Use case failures
    #[derive(Debug, thiserror::Error)]
    pub enum InteractorError {
        #[error("Rejected note: {0}")]
        Rejected(#[from] entity::EntityError),
        #[error("Storage failed: {0}")]
        Storage(#[from] gateway::GatewayError),
        #[error("No note titled `{0}`")]
        NotFound(String),
    }
}
