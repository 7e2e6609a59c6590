//! Extraction configuration.

use std::fmt;

/// Password for encrypted zip entries.
///
/// The `Debug` implementation never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Wraps a password, returning `None` for the empty string.
    ///
    /// An empty password is treated the same as no password at all.
    ///
    /// # Examples
    ///
    /// ```
    /// use unpacker_core::config::Password;
    ///
    /// assert!(Password::new("secret").is_some());
    /// assert!(Password::new("").is_none());
    /// ```
    #[must_use]
    pub fn new(password: impl Into<String>) -> Option<Self> {
        let password = password.into();
        if password.is_empty() {
            None
        } else {
            Some(Self(password))
        }
    }

    /// Returns the password text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the password bytes as passed to zip decryption.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Configuration for one extraction run.
///
/// Built once at the entry point and passed by reference into the core; the
/// library never reads process arguments or environment on its own.
///
/// # Examples
///
/// ```
/// use unpacker_core::ExtractConfig;
///
/// let config = ExtractConfig::default()
///     .with_password("secret")
///     .with_system_unzip(false);
///
/// assert!(config.password.is_some());
/// assert!(!config.allow_system_unzip);
/// ```
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Password for encrypted zip entries. Ignored by other formats.
    pub password: Option<Password>,

    /// Allow retrying a failed in-process zip extraction with the system
    /// `unzip` binary.
    pub allow_system_unzip: bool,

    /// Create extracted files with the mode recorded in the archive. When
    /// disabled, files are created with `0o644`.
    pub preserve_permissions: bool,
}

impl Default for ExtractConfig {
    /// Default values:
    /// - `password`: none
    /// - `allow_system_unzip`: true
    /// - `preserve_permissions`: true
    fn default() -> Self {
        Self {
            password: None,
            allow_system_unzip: true,
            preserve_permissions: true,
        }
    }
}

impl ExtractConfig {
    /// Sets the zip password. An empty string clears it.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Password::new(password);
        self
    }

    /// Enables or disables the system `unzip` fallback.
    #[must_use]
    pub fn with_system_unzip(mut self, allow: bool) -> Self {
        self.allow_system_unzip = allow;
        self
    }

    /// Enables or disables applying archived permission modes.
    #[must_use]
    pub fn with_preserve_permissions(mut self, preserve: bool) -> Self {
        self.preserve_permissions = preserve;
        self
    }
}
