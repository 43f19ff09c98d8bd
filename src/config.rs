use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};

/// Environment variable prefix; nested keys use `__`.
pub const ENV_PREFIX: &str = "QUEST_EDITOR_";

/// Default config file, looked up in the working directory.
pub const CONFIG_FILE: &str = "quest-editor.toml";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub server: ServerConfig,
    pub paths: PathsConfig,
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address. Keep this on loopback; the API has no authentication.
    pub host: IpAddr,
    pub port: u16,
    /// Permissive CORS for local development.
    pub cors: bool,
}

/// Project layout. Unset entries are derived from `base_dir`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Project root; defaults to the working directory.
    pub base_dir: Option<PathBuf>,
    pub data_dir: Option<PathBuf>,
    pub template: Option<PathBuf>,
    pub output: Option<PathBuf>,
    /// Page served at `/`, relative to the project root.
    pub editor_entry: String,
}

/// Log output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Override the default log directory.
    pub directory: Option<PathBuf>,
    /// Filter directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 5001,
            cors: true,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            data_dir: None,
            template: None,
            output: None,
            editor_entry: "editor.html".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: None,
            filter: "info".to_string(),
        }
    }
}

/// Filesystem locations resolved once at startup and shared by every handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub base_dir: PathBuf,
    pub data_dir: PathBuf,
    pub character_file: PathBuf,
    pub template_file: PathBuf,
    pub output_file: PathBuf,
    pub editor_entry: PathBuf,
}

impl Paths {
    /// Standard layout under a project root.
    pub fn from_base(base_dir: impl Into<PathBuf>) -> Self {
        PathsConfig::default().resolve(&base_dir.into())
    }
}

impl PathsConfig {
    fn resolve(&self, base_dir: &Path) -> Paths {
        let under_base = |p: &Option<PathBuf>, default: &str| match p {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => base_dir.join(p),
            None => base_dir.join(default),
        };

        let data_dir = under_base(&self.data_dir, "data");
        Paths {
            base_dir: base_dir.to_path_buf(),
            character_file: data_dir.join("character.json"),
            data_dir,
            template_file: under_base(&self.template, "index.template.html"),
            output_file: under_base(&self.output, "index.html"),
            editor_entry: base_dir.join(&self.editor_entry),
        }
    }
}

impl EditorConfig {
    /// Layer defaults, the TOML file, then `QUEST_EDITOR_*` variables.
    ///
    /// A missing file is fine; a file or variable that fails to parse is an
    /// error.
    pub fn load() -> Result<Self, figment::Error> {
        let path = std::env::var_os(format!("{ENV_PREFIX}CONFIG"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(CONFIG_FILE));
        Self::figment(&path).extract()
    }

    pub fn figment(config_file: &Path) -> Figment {
        Figment::from(Serialized::defaults(EditorConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&["CONFIG"]).split("__"))
    }

    /// Resolve all filesystem locations, anchoring relative ones at the
    /// project root.
    pub fn resolve_paths(&self) -> std::io::Result<Paths> {
        let cwd = std::env::current_dir()?;
        let base_dir = match &self.paths.base_dir {
            Some(dir) if dir.is_absolute() => dir.clone(),
            Some(dir) => cwd.join(dir),
            None => cwd,
        };
        Ok(self.paths.resolve(&base_dir))
    }

    /// Resolved log directory (override or platform data dir).
    pub fn log_dir(&self) -> PathBuf {
        self.logging.directory.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("quest-editor").join("logs"))
                .unwrap_or_else(|| PathBuf::from("logs"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = EditorConfig::default();
        assert_eq!(
            config.server.bind_addr(),
            "127.0.0.1:5001".parse::<SocketAddr>().unwrap()
        );
        assert!(config.server.cors);
        assert_eq!(config.paths.editor_entry, "editor.html");
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_standard_layout() {
        let paths = Paths::from_base("/srv/guide");
        assert_eq!(paths.data_dir, PathBuf::from("/srv/guide/data"));
        assert_eq!(paths.character_file, PathBuf::from("/srv/guide/data/character.json"));
        assert_eq!(paths.template_file, PathBuf::from("/srv/guide/index.template.html"));
        assert_eq!(paths.output_file, PathBuf::from("/srv/guide/index.html"));
        assert_eq!(paths.editor_entry, PathBuf::from("/srv/guide/editor.html"));
    }

    #[test]
    fn test_overrides_relative_to_base() {
        let config = PathsConfig {
            data_dir: Some(PathBuf::from("content")),
            output: Some(PathBuf::from("/var/www/guide.html")),
            ..PathsConfig::default()
        };
        let paths = config.resolve(Path::new("/srv/guide"));
        assert_eq!(paths.data_dir, PathBuf::from("/srv/guide/content"));
        assert_eq!(
            paths.character_file,
            PathBuf::from("/srv/guide/content/character.json")
        );
        assert_eq!(paths.output_file, PathBuf::from("/var/www/guide.html"));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        Jail::expect_with(|_jail| {
            let config: EditorConfig = EditorConfig::figment(Path::new("absent.toml")).extract()?;
            assert_eq!(config.server.port, 5001);
            Ok(())
        });
    }

    #[test]
    fn test_toml_and_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "quest-editor.toml",
                r#"
                    [server]
                    port = 6000
                    cors = false

                    [paths]
                    base_dir = "/srv/guide"
                "#,
            )?;
            jail.set_env("QUEST_EDITOR_SERVER__PORT", "7000");

            let config: EditorConfig =
                EditorConfig::figment(Path::new("quest-editor.toml")).extract()?;
            assert_eq!(config.server.port, 7000);
            assert!(!config.server.cors);
            assert_eq!(config.paths.base_dir, Some(PathBuf::from("/srv/guide")));
            assert_eq!(config.paths.editor_entry, "editor.html");
            Ok(())
        });
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        Jail::expect_with(|jail| {
            jail.create_file("quest-editor.toml", "[server]\nport = \"many\"\n")?;
            let result: Result<EditorConfig, _> =
                EditorConfig::figment(Path::new("quest-editor.toml")).extract();
            assert!(result.is_err());
            Ok(())
        });
    }

    #[test]
    fn test_log_dir_override() {
        let mut config = EditorConfig::default();
        config.logging.directory = Some(PathBuf::from("/tmp/quest-logs"));
        assert_eq!(config.log_dir(), PathBuf::from("/tmp/quest-logs"));
    }
}
