// ABOUTME: Credential loading from a KEY=VALUE auth file
// ABOUTME: Env vars fill in keys the file leaves out

use crate::{Error, Result};
use std::env;
use std::fs;
use std::path::Path;

pub const DEFAULT_ACCOUNT_SERVER_URL: &str = "https://accounts.zoho.com";

/// Zoho OAuth credentials. Immutable once loaded.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    pub account_server_url: String,
}

impl Credentials {
    /// Loads credentials from a line-based `KEY=VALUE` file. Blank lines and
    /// lines starting with `#` are ignored. Keys missing from the file fall
    /// back to environment variables of the same name.
    pub fn load(path: &Path) -> Result<Self> {
        let mut values = std::collections::HashMap::new();

        if path.exists() {
            let content = fs::read_to_string(path)?;
            for line in content.lines() {
                let trimmed = line.trim();
                if trimmed.is_empty() || trimmed.starts_with('#') {
                    continue;
                }
                if let Some((key, value)) = trimmed.split_once('=') {
                    values.insert(key.trim().to_string(), value.trim().to_string());
                }
            }
        }

        let get = |key: &str| -> Option<String> {
            values
                .get(key)
                .cloned()
                .filter(|v| !v.is_empty())
                .or_else(|| env::var(key).ok().filter(|v| !v.is_empty()))
        };

        let client_id = get("CLIENT_ID").ok_or_else(|| missing_key(path, "CLIENT_ID"))?;
        let client_secret =
            get("CLIENT_SECRET").ok_or_else(|| missing_key(path, "CLIENT_SECRET"))?;
        let refresh_token =
            get("REFRESH_TOKEN").ok_or_else(|| missing_key(path, "REFRESH_TOKEN"))?;
        let account_server_url = get("ACCOUNT_SERVER_URL")
            .unwrap_or_else(|| DEFAULT_ACCOUNT_SERVER_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Credentials {
            client_id,
            client_secret,
            refresh_token,
            account_server_url,
        })
    }
}

fn missing_key(path: &Path, key: &str) -> Error {
    Error::Config(format!(
        "{} not set (checked {} and environment)",
        key,
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_auth_file(dir: &TempDir, content: &str) -> std::path::PathBuf {
        let path = dir.path().join("auth.conf");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_complete_file() {
        let temp = TempDir::new().unwrap();
        let path = write_auth_file(
            &temp,
            "# Zoho credentials\n\nCLIENT_ID=id123\nCLIENT_SECRET = sec456\nREFRESH_TOKEN=rt789\n",
        );

        let creds = Credentials::load(&path).unwrap();
        assert_eq!(creds.client_id, "id123");
        assert_eq!(creds.client_secret, "sec456");
        assert_eq!(creds.refresh_token, "rt789");
        assert_eq!(creds.account_server_url, DEFAULT_ACCOUNT_SERVER_URL);
    }

    #[test]
    fn test_load_custom_account_server_trims_slash() {
        let temp = TempDir::new().unwrap();
        let path = write_auth_file(
            &temp,
            "CLIENT_ID=a\nCLIENT_SECRET=b\nREFRESH_TOKEN=c\nACCOUNT_SERVER_URL=https://accounts.zoho.eu/\n",
        );

        let creds = Credentials::load(&path).unwrap();
        assert_eq!(creds.account_server_url, "https://accounts.zoho.eu");
    }

    #[test]
    fn test_load_missing_key_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = write_auth_file(&temp, "CLIENT_ID=a\nCLIENT_SECRET=b\n");

        let err = Credentials::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("REFRESH_TOKEN"));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.conf");

        let err = Credentials::load(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_comments_and_blank_values_ignored() {
        let temp = TempDir::new().unwrap();
        let path = write_auth_file(
            &temp,
            "#CLIENT_ID=commented\nCLIENT_ID=real\nCLIENT_SECRET=s\nREFRESH_TOKEN=\n",
        );

        let err = Credentials::load(&path).unwrap_err();
        assert!(err.to_string().contains("REFRESH_TOKEN"));
    }
}
