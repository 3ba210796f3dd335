use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read manifest: {0}")]
    ManifestRead(#[from] std::io::Error),

    #[error("{0}")]
    Manifest(#[from] loccat::ManifestError),

    #[error("invalid locale tag '{0}'")]
    InvalidLocale(String),

    #[error("{0}")]
    Render(#[from] loccat::RenderError),

    #[error("found {fatal} fatal error(s), {errors} error(s), {warnings} warning(s)")]
    Validation {
        fatal: usize,
        errors: usize,
        warnings: usize,
    },
}
