//! Zip extraction by running the system `unzip` binary.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process::Command;
use std::process::Stdio;

use log::debug;
use log::info;

use crate::ExtractConfig;
use crate::ExtractionError;
use crate::ExtractionReport;
use crate::Result;
use crate::config::Password;
use crate::types::DestDir;

use super::zip::ZipExtractor;

/// Name looked up on `PATH`.
const UNZIP_PROGRAM: &str = "unzip";

/// Answer to the "replace?" prompt: all.
const REPLACE_ALL: &[u8] = b"A\n";

/// Runs Info-ZIP `unzip` as a subprocess.
///
/// Its combined stdout and stderr is returned in
/// `ExtractionError::FallbackFailed` when it exits unsuccessfully.
///
/// With a password the archive is extracted with `unzip -P <password>`.
/// That form asks before replacing an existing file, so `A` ("all") is
/// written to its stdin up front and stdin is then closed; existing files
/// are overwritten and any later prompt reads end of input. Without a
/// password, `-q -n` is used and existing files are kept.
#[derive(Debug, Clone, Default)]
pub struct SystemUnzip {
    program: Option<PathBuf>,
}

impl SystemUnzip {
    /// Uses `unzip` from `PATH`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses an explicit binary instead of searching `PATH`.
    #[must_use]
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: Some(program.into()),
        }
    }

    /// Returns `true` if an `unzip` binary can be found.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.locate().is_ok()
    }

    fn locate(&self) -> Result<PathBuf> {
        match &self.program {
            Some(program) if program.is_file() => Ok(program.clone()),
            Some(_) => Err(ExtractionError::FallbackUnavailable),
            None => which::which(UNZIP_PROGRAM).map_err(|_| ExtractionError::FallbackUnavailable),
        }
    }
}

/// Builds the `unzip` argument vector.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use unpacker_core::config::Password;
/// use unpacker_core::formats::system_unzip::unzip_args;
///
/// let args = unzip_args(Path::new("a.zip"), Path::new("out"), None);
/// assert_eq!(args, ["-q", "-n", "a.zip", "-d", "out"]);
///
/// let password = Password::new("secret");
/// let args = unzip_args(Path::new("a.zip"), Path::new("out"), password.as_ref());
/// assert_eq!(args, ["-P", "secret", "a.zip", "-d", "out"]);
/// ```
#[must_use]
pub fn unzip_args(archive: &Path, dest: &Path, password: Option<&Password>) -> Vec<OsString> {
    let mut args: Vec<OsString> = match password {
        Some(password) => vec!["-P".into(), password.as_str().into()],
        None => vec!["-q".into(), "-n".into()],
    };
    args.push(archive.into());
    args.push("-d".into());
    args.push(dest.into());
    args
}

impl ZipExtractor for SystemUnzip {
    fn extract(
        &self,
        archive: &Path,
        dest: &DestDir,
        config: &ExtractConfig,
    ) -> Result<ExtractionReport> {
        let program = self.locate()?;
        info!(
            "running {} on {}",
            program.display(),
            archive.display()
        );

        let mut child = Command::new(&program)
            .args(unzip_args(archive, dest.as_path(), config.password.as_ref()))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => ExtractionError::FallbackUnavailable,
                _ => ExtractionError::Io(e),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            // unzip may exit without reading; a broken pipe is not an error.
            if let Err(e) = stdin.write_all(REPLACE_ALL) {
                debug!("unzip stdin not written: {e}");
            }
        }
        let output = child.wait_with_output()?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        debug!("unzip output:\n{combined}");

        if !output.status.success() {
            return Err(ExtractionError::FallbackFailed {
                status: output.status.to_string(),
                output: combined,
            });
        }

        Ok(ExtractionReport {
            used_system_unzip: true,
            ..ExtractionReport::default()
        })
    }

    fn name(&self) -> &'static str {
        "system unzip"
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_args_without_password() {
        let args = unzip_args(Path::new("/a/b.zip"), Path::new("/out"), None);
        assert_eq!(args, ["-q", "-n", "/a/b.zip", "-d", "/out"]);
    }

    #[test]
    fn test_args_with_password() {
        let password = Password::new("p@ss word");
        let args = unzip_args(Path::new("b.zip"), Path::new("out"), password.as_ref());
        assert_eq!(args, ["-P", "p@ss word", "b.zip", "-d", "out"]);
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let temp = TempDir::new().expect("failed to create temp dir");
        let dest = DestDir::new(temp.path()).unwrap();
        let unzip = SystemUnzip::with_program(temp.path().join("no-such-unzip"));

        assert!(!unzip.is_available());
        let result = unzip.extract(Path::new("a.zip"), &dest, &ExtractConfig::default());
        assert!(matches!(result, Err(ExtractionError::FallbackUnavailable)));
    }

    #[test]
    #[cfg(unix)]
    fn test_failure_carries_output() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("failed to create temp dir");
        let script = temp.path().join("fake-unzip");
        std::fs::write(&script, "#!/bin/sh\necho \"bad archive: $3\" >&2\nexit 9\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let out = temp.path().join("out");
        let dest = DestDir::create(&out).unwrap();
        let result = SystemUnzip::with_program(&script).extract(
            Path::new("broken.zip"),
            &dest,
            &ExtractConfig::default(),
        );

        match result {
            Err(ExtractionError::FallbackFailed { status, output }) => {
                assert!(status.contains('9'), "status: {status}");
                assert!(output.contains("bad archive: broken.zip"), "output: {output}");
            }
            other => panic!("expected FallbackFailed, got {other:?}"),
        }
    }

    #[test]
    #[cfg(unix)]
    fn test_replace_prompt_answered_with_all() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("failed to create temp dir");
        let script = temp.path().join("fake-unzip");
        std::fs::write(
            &script,
            "#!/bin/sh\nread answer\n[ \"$answer\" = \"A\" ] || exit 3\necho replaced > \"$5/a.txt\"\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let out = temp.path().join("out");
        let dest = DestDir::create(&out).unwrap();
        std::fs::write(out.join("a.txt"), "old").unwrap();
        let config = ExtractConfig::default().with_password("secret");

        let report = SystemUnzip::with_program(&script)
            .extract(Path::new("x.zip"), &dest, &config)
            .unwrap();

        assert!(report.used_system_unzip);
        assert_eq!(std::fs::read_to_string(out.join("a.txt")).unwrap(), "replaced\n");
    }

    #[test]
    #[cfg(unix)]
    fn test_success_sets_flag() {
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("failed to create temp dir");
        let script = temp.path().join("fake-unzip");
        std::fs::write(&script, "#!/bin/sh\ntouch \"$5/a.txt\"\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let out = temp.path().join("out");
        let dest = DestDir::create(&out).unwrap();
        let report = SystemUnzip::with_program(&script)
            .extract(Path::new("x.zip"), &dest, &ExtractConfig::default())
            .unwrap();

        assert!(report.used_system_unzip);
        assert!(out.join("a.txt").is_file());
    }
}
