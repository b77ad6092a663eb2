// Host identity

use tracing::warn;

/// System host name, or an empty string when it cannot be read
pub fn host_name() -> String {
    #[cfg(unix)]
    {
        match nix::unistd::gethostname() {
            Ok(name) => name.to_string_lossy().into_owned(),
            Err(e) => {
                warn!(error = %e, "Failed to read host name");
                String::new()
            }
        }
    }

    #[cfg(not(unix))]
    {
        std::env::var("COMPUTERNAME").unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(unix)]
    fn test_host_name_is_readable() {
        assert!(!host_name().is_empty());
    }
}
