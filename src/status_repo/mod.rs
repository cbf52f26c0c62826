// Memory status via /proc, amdgpu sysfs, nvidia-smi, with sysinfo as the RAM fallback

mod linux;
mod nvidia;

use crate::config::AcceleratorConfig;
use crate::models::*;
use std::path::PathBuf;
use std::sync::Arc;
use sysinfo::System;
use tracing::instrument;

pub struct StatusRepo {
    sys: Arc<std::sync::Mutex<System>>,
    accelerator: AcceleratorConfig,
}

impl Default for StatusRepo {
    fn default() -> Self {
        Self::new(AcceleratorConfig::default())
    }
}

impl StatusRepo {
    pub fn new(accelerator: AcceleratorConfig) -> Self {
        Self {
            sys: Arc::new(std::sync::Mutex::new(System::new())),
            accelerator,
        }
    }

    /// Full report for GET /vram_watcher/status. Never fails: each resource carries
    /// its own availability and reason.
    #[instrument(skip(self), fields(repo = "status", operation = "get_status"))]
    pub async fn get_status(&self) -> StatusReport {
        let (accelerator, ram) = tokio::join!(self.get_accelerator_status(), self.get_ram_status());
        let ram = ram.unwrap_or_else(|e| RamStatus::unavailable(format!("exception: {e}")));
        StatusReport {
            accelerator,
            ram,
            timestamp: Some(chrono::Utc::now().timestamp_millis() as f64 / 1000.0),
        }
    }

    #[instrument(skip(self), fields(repo = "status", operation = "get_ram_status"))]
    pub async fn get_ram_status(&self) -> anyhow::Result<RamStatus> {
        let sys = self.sys.clone();
        tokio::task::spawn_blocking(move || {
            if let Some(ram) = linux::read_ram_linux() {
                return Ok(ram);
            }
            let mut sys = sys
                .lock()
                .map_err(|e| anyhow::anyhow!("sysinfo lock poisoned: {}", e))?;
            sys.refresh_memory();
            let total = sys.total_memory();
            if total == 0 {
                return Ok(RamStatus::unavailable("sysinfo reported no memory"));
            }
            let used = total.saturating_sub(sys.available_memory());
            Ok(RamStatus::measured(used, total))
        })
        .await
        .map_err(|e| anyhow::anyhow!("status task join: {}", e))?
    }

    /// amdgpu sysfs first, then nvidia-smi. When neither yields the configured device,
    /// the reason names both failures.
    #[instrument(skip(self), fields(repo = "status", operation = "get_accelerator_status"))]
    pub async fn get_accelerator_status(&self) -> AcceleratorStatus {
        let index = self.accelerator.device_index;
        let drm_root = PathBuf::from(&self.accelerator.drm_root);
        let drm = tokio::task::spawn_blocking(move || linux::scan_drm_vram(&drm_root))
            .await
            .map_err(|e| anyhow::anyhow!("status task join: {}", e))
            .and_then(|r| r.map_err(anyhow::Error::from));

        let drm_reason = match drm {
            Ok(cards) => match cards.into_iter().nth(index as usize) {
                Some(card) => {
                    return AcceleratorStatus::measured(index, card.name, card.used, card.total);
                }
                None => format!("no amdgpu VRAM counters for device {index}"),
            },
            Err(e) => format!("drm: {e}"),
        };

        match nvidia::query_gpu(&self.accelerator.nvidia_smi, index).await {
            Ok(gpu) => AcceleratorStatus::measured(gpu.index, gpu.name, gpu.used_bytes, gpu.total_bytes),
            Err(e) => {
                tracing::debug!(error = %e, "nvidia-smi query failed");
                AcceleratorStatus::unavailable(format!("{drm_reason}; nvidia-smi: {e}"))
            }
        }
    }
}
