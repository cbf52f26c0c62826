// Linux sources: /proc/meminfo for system RAM, amdgpu sysfs counters for VRAM.

use std::collections::HashMap;
use std::path::Path;

use crate::models::RamStatus;

/// Parse /proc/meminfo into byte counts. "kB" values are scaled by 1024, other units
/// are kept raw; lines that don't parse are skipped.
pub(crate) fn parse_meminfo(content: &str) -> HashMap<String, u64> {
    let mut out = HashMap::new();
    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let mut tokens = rest.split_whitespace();
        let Some(Ok(value)) = tokens.next().map(str::parse::<u64>) else {
            continue;
        };
        let value = match tokens.next().unwrap_or("kB") {
            "kB" => value.saturating_mul(1024),
            _ => value,
        };
        out.insert(key.trim().to_string(), value);
    }
    out
}

/// RAM usage from parsed meminfo. Used = MemTotal - MemAvailable, or MemTotal - MemFree
/// on kernels without MemAvailable.
pub(crate) fn ram_from_meminfo(meminfo: &HashMap<String, u64>) -> RamStatus {
    let total = meminfo.get("MemTotal").copied().unwrap_or(0);
    if total == 0 {
        return RamStatus::unavailable("MemTotal missing");
    }
    let free = match meminfo.get("MemAvailable").copied() {
        Some(available) if available > 0 => available,
        _ => meminfo.get("MemFree").copied().unwrap_or(0),
    };
    RamStatus::measured(total.saturating_sub(free), total)
}

pub(crate) fn read_ram_linux() -> Option<RamStatus> {
    #[cfg(target_os = "linux")]
    {
        let content = std::fs::read_to_string("/proc/meminfo").ok()?;
        Some(ram_from_meminfo(&parse_meminfo(&content)))
    }
    #[cfg(not(target_os = "linux"))]
    None
}

/// VRAM counters of one amdgpu card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DrmVram {
    pub card: String,
    pub name: String,
    pub used: u64,
    pub total: u64,
}

fn is_card_dir(name: &str) -> bool {
    name.strip_prefix("card")
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

fn read_u64(path: &Path) -> Option<u64> {
    std::fs::read_to_string(path).ok()?.trim().parse().ok()
}

/// Cards under `drm_root` exposing `device/mem_info_vram_{used,total}`, ordered by card number.
pub(crate) fn scan_drm_vram(drm_root: &Path) -> std::io::Result<Vec<DrmVram>> {
    let mut cards: Vec<(u32, String)> = std::fs::read_dir(drm_root)?
        .filter_map(|e| e.ok())
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| is_card_dir(name))
        .filter_map(|name| Some((name[4..].parse().ok()?, name)))
        .collect();
    cards.sort();

    let mut found = Vec::new();
    for (_, card) in cards {
        let device = drm_root.join(&card).join("device");
        let (Some(used), Some(total)) = (
            read_u64(&device.join("mem_info_vram_used")),
            read_u64(&device.join("mem_info_vram_total")),
        ) else {
            continue;
        };
        let name = std::fs::read_to_string(device.join("product_name"))
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("amdgpu {card}"));
        found.push(DrmVram {
            card,
            name,
            used,
            total,
        });
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "MemTotal:       16303428 kB\n\
MemFree:         1234567 kB\n\
MemAvailable:    8151714 kB\n\
HugePages_Total:       0\n\
garbage line\n";

    #[test]
    fn parse_meminfo_scales_kb_and_keeps_raw_units() {
        let m = parse_meminfo(MEMINFO);
        assert_eq!(m["MemTotal"], 16303428 * 1024);
        assert_eq!(m["MemAvailable"], 8151714 * 1024);
        assert!(!m.contains_key("garbage line"));
    }

    #[test]
    fn ram_uses_mem_available() {
        let ram = ram_from_meminfo(&parse_meminfo(MEMINFO));
        assert!(ram.available);
        assert_eq!(ram.total_bytes, Some(16303428 * 1024));
        assert_eq!(ram.used_bytes, Some((16303428 - 8151714) * 1024));
        let p = ram.percent.unwrap();
        assert!((p - 50.0).abs() < 0.01, "percent {p}");
    }

    #[test]
    fn ram_falls_back_to_mem_free() {
        let ram = ram_from_meminfo(&parse_meminfo(
            "MemTotal: 1000 kB\nMemFree: 250 kB\n",
        ));
        assert_eq!(ram.used_bytes, Some(750 * 1024));
    }

    #[test]
    fn ram_without_total_is_unavailable() {
        let ram = ram_from_meminfo(&parse_meminfo("MemFree: 250 kB\n"));
        assert!(!ram.available);
        assert_eq!(ram.reason.as_deref(), Some("MemTotal missing"));
    }

    #[test]
    fn scan_drm_vram_reads_card_counters() {
        let dir = tempfile::TempDir::new().unwrap();
        let dev = dir.path().join("card1").join("device");
        std::fs::create_dir_all(&dev).unwrap();
        std::fs::write(dev.join("mem_info_vram_used"), "1073741824\n").unwrap();
        std::fs::write(dev.join("mem_info_vram_total"), "8589934592\n").unwrap();
        // connector dirs and cards without counters are skipped
        std::fs::create_dir_all(dir.path().join("card1-DP-1")).unwrap();
        std::fs::create_dir_all(dir.path().join("card0").join("device")).unwrap();

        let cards = scan_drm_vram(dir.path()).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].card, "card1");
        assert_eq!(cards[0].name, "amdgpu card1");
        assert_eq!(cards[0].used, 1 << 30);
        assert_eq!(cards[0].total, 8 << 30);
    }
}
