use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub accelerator: AcceleratorConfig,
    #[serde(default)]
    pub client: ClientConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

/// Where to look for accelerator memory counters.
#[derive(Debug, Clone, Deserialize)]
pub struct AcceleratorConfig {
    #[serde(default)]
    pub device_index: u32,
    /// nvidia-smi executable (name on PATH or absolute path).
    #[serde(default = "default_nvidia_smi")]
    pub nvidia_smi: String,
    /// DRM class directory scanned for amdgpu `mem_info_vram_*` files.
    #[serde(default = "default_drm_root")]
    pub drm_root: String,
}

impl Default for AcceleratorConfig {
    fn default() -> Self {
        Self {
            device_index: 0,
            nvidia_smi: default_nvidia_smi(),
            drm_root: default_drm_root(),
        }
    }
}

fn default_nvidia_smi() -> String {
    "nvidia-smi".into()
}

fn default_drm_root() -> String {
    "/sys/class/drm".into()
}

/// Widget side: where nodes poll for status.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_status_url")]
    pub status_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            status_url: default_status_url(),
        }
    }
}

fn default_status_url() -> String {
    "http://127.0.0.1:8188/vram_watcher/status".into()
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            !self.accelerator.nvidia_smi.is_empty(),
            "accelerator.nvidia_smi must be non-empty"
        );
        anyhow::ensure!(
            !self.accelerator.drm_root.is_empty(),
            "accelerator.drm_root must be non-empty"
        );
        anyhow::ensure!(
            self.client.status_url.starts_with("http://")
                || self.client.status_url.starts_with("https://"),
            "client.status_url must be an http(s) URL, got {:?}",
            self.client.status_url
        );
        Ok(())
    }
}
