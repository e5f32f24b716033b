//! Hostname resolution through named resolvers.
//!
//! Resolution shells out to the system `dig` utility so that each query
//! can be pointed at a specific recursive resolver, the same way the
//! interactive checks do. Every failure mode (missing binary, non-zero
//! exit, timeout) degrades to an empty address list.

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

/// Default timeout for a single DNS query in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 7;

/// Hostname resolution seam.
///
/// Implemented by [`DigResolver`] for real queries; report assembly is
/// generic over this trait so it can be driven without network access.
#[async_trait]
pub trait Resolver {
    /// Resolve `host` through the given resolver address.
    ///
    /// `resolver` of `None` uses the system default resolver. Returns the
    /// addresses in the order the resolver answered them; a failed query
    /// returns an empty list.
    async fn resolve(&self, resolver: Option<&str>, host: &str) -> Vec<String>;
}

/// Resolver backed by the system `dig` utility.
///
/// # Example
///
/// ```ignore
/// let resolver = DigResolver::new();
/// let ips = resolver.resolve(Some("8.8.8.8"), "armmf.adobe.com").await;
/// ```
pub struct DigResolver {
    command: String,
    timeout: Duration,
}

impl DigResolver {
    /// Create a resolver with the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a resolver with a custom per-query timeout.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            command: "dig".to_string(),
            timeout,
        }
    }

    #[cfg(test)]
    fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for DigResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Resolver for DigResolver {
    async fn resolve(&self, resolver: Option<&str>, host: &str) -> Vec<String> {
        let mut cmd = Command::new(&self.command);
        cmd.arg("+short");
        if let Some(addr) = resolver {
            cmd.arg(format!("@{addr}"));
        }
        cmd.arg(host)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            // a query that outlives the timeout must not linger
            .kill_on_drop(true);

        let output = match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                tracing::debug!(resolver = ?resolver, "dig failed to run: {e}");
                return Vec::new();
            }
            Err(_) => {
                tracing::debug!(resolver = ?resolver, "dig timed out");
                return Vec::new();
            }
        };

        if !output.status.success() {
            tracing::debug!(resolver = ?resolver, status = ?output.status, "dig exited non-zero");
            return Vec::new();
        }

        parse_addresses(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Extract addresses from `dig +short` output.
///
/// `+short` output interleaves CNAME targets and diagnostic lines with
/// the answers; only lines starting with an ASCII digit are addresses.
pub(crate) fn parse_addresses(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| line.chars().next().is_some_and(|c| c.is_ascii_digit()))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_addresses_skips_cname_lines() {
        let output = "armmf.adobe.com.edgesuite.net.\n\
                      a1953.d.akamai.net.\n\
                      23.11.224.68\n\
                      23.11.224.75\n";
        assert_eq!(
            parse_addresses(output),
            vec!["23.11.224.68".to_string(), "23.11.224.75".to_string()]
        );
    }

    #[test]
    fn test_parse_addresses_trims_and_skips_blank() {
        let output = "  184.24.77.9  \n\n;; connection timed out\n";
        assert_eq!(parse_addresses(output), vec!["184.24.77.9".to_string()]);
    }

    #[test]
    fn test_parse_addresses_empty_output() {
        assert!(parse_addresses("").is_empty());
    }

    #[tokio::test]
    async fn test_missing_binary_yields_empty() {
        let resolver = DigResolver::with_command("edgemap-no-such-binary");
        let ips = resolver.resolve(Some("8.8.8.8"), "example.com").await;
        assert!(ips.is_empty());
    }

    #[tokio::test]
    async fn test_nonzero_exit_yields_empty() {
        let resolver = DigResolver::with_command("false");
        let ips = resolver.resolve(None, "example.com").await;
        assert!(ips.is_empty());
    }
}
