#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Password not provided. Use -p <password>")]
    MissingPassword,

    #[error("Cannot use --password and --hash together")]
    InvalidArgs,

    #[error(transparent)]
    InvalidHash(hibp_range::Error),

    #[error("checking hash failed: {0}")]
    Lookup(#[source] hibp_range::Error),

    #[error("could not set up HTTP client: {0}")]
    Client(#[source] hibp_range::Error),
}

impl Error {
    /// Process exit status: 2 for usage errors, 1 when the lookup itself failed.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::MissingPassword | Error::InvalidArgs | Error::InvalidHash(_) => 2,
            Error::Lookup(_) | Error::Client(_) => 1,
        }
    }
}
