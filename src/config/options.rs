// src/config/options.rs
use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};

use super::consts::*;
use crate::error::Result;
use crate::log::LogOptions;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppOptions {
    pub account: String,
    /// Overrides the per-user config file location.
    pub config_path: Option<PathBuf>,
    pub format: OutputFormat,
    pub extract: ExtractOptions,
    pub log: LogOptions,
    pub timeout_secs: u64,
    pub endpoints: Endpoints,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            account: s!(DEFAULT_ACCOUNT),
            config_path: None,
            format: OutputFormat::Table,
            extract: ExtractOptions::default(),
            log: LogOptions::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            endpoints: Endpoints::default(),
        }
    }
}

impl AppOptions {
    pub fn config_path(&self) -> Option<PathBuf> {
        self.config_path.clone().or_else(default_config_path)
    }

    pub fn load_credentials(&self) -> Result<Credentials> {
        load_credentials(self.config_path().as_deref(), &self.account)
    }
}

/// Knobs passed into card extraction.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Write the raw account page here before parsing it.
    pub debug_capture: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub login_url: String,
    pub account_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self { login_url: s!(LOGIN_URL), account_url: s!(ACCOUNT_URL) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Tsv,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "csv" => Some(OutputFormat::Csv),
            "tsv" => Some(OutputFormat::Tsv),
            _ => None,
        }
    }

    pub fn delim(&self) -> Option<char> {
        match self {
            OutputFormat::Table => None,
            OutputFormat::Csv => Some(','),
            OutputFormat::Tsv => Some('\t'),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// `<config_dir>/clippercard/clippercard.cfg`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Credentials for `account`: `CLIPPER_USERNAME` / `CLIPPER_PASSWORD` first,
/// then the `[account]` section of the INI file at `path` (which may be absent).
pub fn load_credentials(path: Option<&Path>, account: &str) -> Result<Credentials> {
    let mut builder = Config::builder();
    if let Some(p) = path {
        builder = builder.add_source(File::from(p).format(FileFormat::Ini).required(false));
    }
    let settings = builder
        .add_source(Environment::with_prefix(ENV_PREFIX))
        .build()?;
    credentials_from(&settings, account)
}

fn credentials_from(settings: &Config, account: &str) -> Result<Credentials> {
    let lookup = |key: &str| -> std::result::Result<String, ConfigError> {
        let scoped = format!("{account}.{key}");
        settings
            .get_string(key)
            .or_else(|_| settings.get_string(&scoped))
            .map_err(|_| ConfigError::NotFound(scoped))
    };
    Ok(Credentials { username: lookup("username")?, password: lookup("password")? })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ini(text: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new().suffix(".cfg").tempfile().unwrap();
        f.write_all(text.as_bytes()).unwrap();
        f
    }

    fn from_file(path: &Path, account: &str) -> Result<Credentials> {
        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Ini))
            .build()?;
        credentials_from(&settings, account)
    }

    #[test]
    fn reads_named_section() {
        let f = ini("[default]\nusername = a@example.org\npassword = one\n\n[work]\nusername = b@example.org\npassword = two\n");
        let c = from_file(f.path(), "work").unwrap();
        assert_eq!(c.username, "b@example.org");
        assert_eq!(c.password, "two");
    }

    #[test]
    fn missing_section_is_config_error() {
        let f = ini("[default]\nusername = a@example.org\npassword = one\n");
        let err = from_file(f.path(), "nobody").unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
        assert!(err.to_string().contains("nobody.username"));
    }

    #[test]
    fn debug_redacts_password() {
        let c = Credentials { username: s!("u"), password: s!("hunter2") };
        assert!(!format!("{c:?}").contains("hunter2"));
    }

    #[test]
    fn output_format_parse() {
        assert_eq!(OutputFormat::parse("CSV"), Some(OutputFormat::Csv));
        assert_eq!(OutputFormat::parse("tsv").and_then(|f| f.delim()), Some('\t'));
        assert_eq!(OutputFormat::Table.delim(), None);
        assert_eq!(OutputFormat::parse("xml"), None);
    }
}
