use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::{path::PathBuf, str::FromStr};

/// TLS configuration carried by a connection string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TlsConfig {
    pub mode: TlsMode,
    pub ca: Option<PathBuf>,
    pub cert: Option<PathBuf>,
    pub key: Option<PathBuf>,
}

/// libpq `sslmode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    /// No TLS encryption
    Disable,
    /// Plain first, TLS if the server insists
    Allow,
    /// TLS first, plain if the server does not support it
    #[default]
    Prefer,
    /// TLS required, but no certificate verification
    Require,
    /// Verify server certificate against CA
    VerifyCA,
    /// Verify certificate and hostname
    VerifyFull,
}

impl FromStr for TlsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "disable" => Ok(Self::Disable),
            "allow" => Ok(Self::Allow),
            "prefer" => Ok(Self::Prefer),
            "require" => Ok(Self::Require),
            "verify-ca" => Ok(Self::VerifyCA),
            "verify-full" => Ok(Self::VerifyFull),
            _ => Err(format!("Invalid TLS mode: {s}")),
        }
    }
}

impl From<TlsMode> for PgSslMode {
    fn from(mode: TlsMode) -> Self {
        match mode {
            TlsMode::Disable => Self::Disable,
            TlsMode::Allow => Self::Allow,
            TlsMode::Prefer => Self::Prefer,
            TlsMode::Require => Self::Require,
            TlsMode::VerifyCA => Self::VerifyCa,
            TlsMode::VerifyFull => Self::VerifyFull,
        }
    }
}

impl TlsConfig {
    /// Extract TLS configuration from connection string parameters
    ///
    /// - sslmode
    /// - sslrootcert: Path to CA certificate
    /// - sslcert: Path to client certificate
    /// - sslkey: Path to client private key
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS mode is not recognized, or if only one of
    /// `sslcert` and `sslkey` is given
    pub fn from_params<'a, F>(param: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let mode = param("sslmode")
            .map(str::parse::<TlsMode>)
            .transpose()?
            .unwrap_or_default();

        let ca = param("sslrootcert").map(PathBuf::from);
        let cert = param("sslcert").map(PathBuf::from);
        let key = param("sslkey").map(PathBuf::from);

        if cert.is_some() != key.is_some() {
            return Err("sslcert and sslkey must be given together".to_string());
        }

        Ok(Self {
            mode,
            ca,
            cert,
            key,
        })
    }

    /// Apply the configuration to connect options
    #[must_use]
    pub fn apply(&self, options: PgConnectOptions) -> PgConnectOptions {
        let mut options = options.ssl_mode(self.mode.into());

        if let Some(ca_path) = &self.ca {
            options = options.ssl_root_cert(ca_path);
        }

        if let (Some(cert_path), Some(key_path)) = (&self.cert, &self.key) {
            options = options.ssl_client_cert(cert_path).ssl_client_key(key_path);
        }

        options
    }
}
