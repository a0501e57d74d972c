//! Credential lookup from sops-encrypted secrets files.
//!
//! Decryption is delegated to an external command through the [`Decrypt`]
//! trait. The decrypted payload only ever lives in memory.

use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};
use tracing::info;

mod error;

pub use error::DecryptError;

pub const API_KEY_FIELD: &str = "api_key";

pub trait Decrypt {
    /// Returns the plaintext of the encrypted file at `path`.
    fn decrypt(&self, path: &Path) -> Result<String, DecryptError>;
}

/// Runs `<program> <args...> <path>` and captures its stdout.
#[derive(Clone, Debug)]
pub struct SopsDecryptor {
    program: OsString,
    args: Vec<OsString>,
}

impl Default for SopsDecryptor {
    fn default() -> Self {
        Self::new("sops", ["-d"])
    }
}

impl SopsDecryptor {
    pub fn new<I, S>(program: impl Into<OsString>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    fn command_line(&self, path: &Path) -> String {
        std::iter::once(self.program.as_os_str())
            .chain(self.args.iter().map(OsString::as_os_str))
            .chain(std::iter::once(path.as_os_str()))
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Decrypt for SopsDecryptor {
    fn decrypt(&self, path: &Path) -> Result<String, DecryptError> {
        info!("Starting decryption for file: {}", path.display());

        let command = self.command_line(path);
        info!("Executing command: {}", command);

        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .map_err(|source| DecryptError::Spawn {
                command: command.clone(),
                source,
            })?;

        info!("Reading decrypted content...");
        if !output.status.success() {
            return Err(DecryptError::ExitStatus {
                command,
                status: output.status,
            });
        }

        String::from_utf8(output.stdout).map_err(DecryptError::InvalidUtf8)
    }
}

/// Decrypts `path` and returns the `api_key` field of the JSON payload.
pub fn resolve_api_key(decryptor: &dyn Decrypt, path: &Path) -> Result<String, DecryptError> {
    let content = decryptor.decrypt(path)?;

    if content.is_empty() {
        return Err(DecryptError::Empty);
    }
    info!(
        "Successfully decrypted content: Length: {} bytes",
        content.len()
    );

    info!("Parsing JSON...");
    let secrets: serde_json::Value =
        serde_json::from_str(&content).map_err(DecryptError::InvalidJson)?;

    secrets
        .get(API_KEY_FIELD)
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .ok_or(DecryptError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    struct FixedDecryptor(&'static str);

    impl Decrypt for FixedDecryptor {
        fn decrypt(&self, _path: &Path) -> Result<String, DecryptError> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn resolve_api_key_returns_field() {
        let key = resolve_api_key(
            &FixedDecryptor(r#"{"api_key":"X"}"#),
            Path::new("secrets.json.enc"),
        )
        .unwrap();

        assert_eq!(key, "X");
    }

    #[test]
    fn resolve_api_key_ignores_other_fields() {
        let key = resolve_api_key(
            &FixedDecryptor(r#"{"org":"acme","api_key":"sk-test","sops":{"version":"3.8.1"}}"#),
            Path::new("secrets.json.enc"),
        )
        .unwrap();

        assert_eq!(key, "sk-test");
    }

    #[test]
    fn resolve_api_key_rejects_empty_output() {
        let err = resolve_api_key(&FixedDecryptor(""), Path::new("secrets.json.enc")).unwrap_err();

        assert!(matches!(err, DecryptError::Empty));
    }

    #[test]
    fn resolve_api_key_rejects_non_json_output() {
        let err = resolve_api_key(&FixedDecryptor("api_key: X"), Path::new("secrets.json.enc"))
            .unwrap_err();

        assert!(matches!(err, DecryptError::InvalidJson(_)));
    }

    #[test]
    fn resolve_api_key_rejects_missing_field() {
        let err = resolve_api_key(&FixedDecryptor(r#"{"token":"X"}"#), Path::new("s"))
            .unwrap_err();

        assert!(matches!(err, DecryptError::MissingApiKey));
    }

    #[test]
    fn resolve_api_key_rejects_non_string_field() {
        let err = resolve_api_key(&FixedDecryptor(r#"{"api_key":42}"#), Path::new("s"))
            .unwrap_err();

        assert!(matches!(err, DecryptError::MissingApiKey));
    }

    #[test]
    fn command_line_appends_path() {
        let decryptor = SopsDecryptor::default();

        assert_eq!(
            decryptor.command_line(Path::new("/work/secrets.json.enc")),
            "sops -d /work/secrets.json.enc"
        );
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn resolve_api_key_logs_byte_length() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        // 15 characters, 16 bytes.
        let payload = r#"{"api_key":"é"}"#;
        let key = tracing::subscriber::with_default(subscriber, || {
            resolve_api_key(&FixedDecryptor(payload), Path::new("s"))
        })
        .unwrap();

        assert_eq!(key, "é");
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Length: 16 bytes"), "logs: {output}");
    }
}
