use anyhow::{Context, Result};
use tracing_subscriber::fmt;

/// Installs a stderr subscriber when `verbose` is set.
///
/// Fails if another global subscriber is already installed.
pub fn init(verbose: bool) -> Result<()> {
    if !verbose {
        return Ok(());
    }
    fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(tracing::Level::DEBUG)
        .try_init()
        .map_err(anyhow::Error::from_boxed)
        .context("failed to install tracing subscriber")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_install_is_reported() {
        assert!(init(false).is_ok());
        assert!(init(true).is_ok());
        let err = init(true).unwrap_err();
        assert!(err.to_string().contains("tracing subscriber"), "{err}");
    }
}
