use std::{error::Error, fmt, io, process::ExitStatus, string::FromUtf8Error};

#[derive(Debug)]
pub enum DecryptError {
    Spawn { command: String, source: io::Error },
    ExitStatus { command: String, status: ExitStatus },
    Empty,
    InvalidUtf8(FromUtf8Error),
    InvalidJson(serde_json::Error),
    MissingApiKey,
}

impl fmt::Display for DecryptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecryptError::Spawn { command, .. } => {
                write!(f, "Failed to run decryption command `{command}`")
            }
            DecryptError::ExitStatus { command, status } => {
                write!(f, "Decryption command `{command}` failed with {status}")
            }
            DecryptError::Empty => write!(
                f,
                "Decrypted content is empty. Ensure the file is valid and sops is configured properly"
            ),
            DecryptError::InvalidUtf8(_) => write!(f, "Decrypted content is not valid UTF-8"),
            DecryptError::InvalidJson(_) => write!(f, "Error parsing decrypted JSON"),
            DecryptError::MissingApiKey => {
                write!(f, "Decrypted secrets do not contain a string `api_key` field")
            }
        }
    }
}

impl Error for DecryptError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DecryptError::Spawn { source, .. } => Some(source),
            DecryptError::InvalidUtf8(e) => Some(e),
            DecryptError::InvalidJson(e) => Some(e),
            _ => None,
        }
    }
}
