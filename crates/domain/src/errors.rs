use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Ran out of time")]
    TimedOut,

    #[error("Page fetch failed: {0}")]
    BackendError(String),

    #[error("Unknown Rtype: {0}")]
    UnknownRecordType(String),

    #[error("Invalid rdata for {rtype} record: {reason}")]
    InvalidRdata { rtype: String, reason: String },

    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("No page getter registered for scheme '{0}'")]
    UnknownScheme(String),

    #[error("Unknown alias: {0}")]
    UnknownAlias(String),

    #[error("Invalid target URI: {0}")]
    InvalidTarget(String),

    #[error("Alias table has no <ROOT> entry")]
    MissingRootAlias,

    #[error("Delegation chain exceeded {0} hops")]
    DelegationTooDeep(usize),

    #[error("Invalid branch '{0}': records and targets are mutually exclusive")]
    InvalidBranch(String),

    #[error("Query has no question section")]
    EmptyQuestion,

    #[error("Unsupported opcode: {0}")]
    UnsupportedOpcode(String),
}

impl DomainError {
    /// Failures caused by operator-authored record data rather than by
    /// timing or backend conditions.
    pub fn is_malformed_record(&self) -> bool {
        matches!(
            self,
            DomainError::UnknownRecordType(_)
                | DomainError::InvalidRdata { .. }
                | DomainError::InvalidDomainName(_)
        )
    }
}
