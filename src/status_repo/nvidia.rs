// NVIDIA VRAM via nvidia-smi CSV query

/// One GPU row from `nvidia-smi --query-gpu=index,name,memory.used,memory.total`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NvidiaGpu {
    pub index: u32,
    pub name: String,
    pub used_bytes: u64,
    pub total_bytes: u64,
}

pub(crate) const QUERY_ARGS: [&str; 2] = [
    "--query-gpu=index,name,memory.used,memory.total",
    "--format=csv,noheader,nounits",
];

const MIB: u64 = 1024 * 1024;

/// Parse `noheader,nounits` CSV output; memory columns are MiB. Malformed rows are skipped.
pub(crate) fn parse_query_output(output: &str) -> Vec<NvidiaGpu> {
    output
        .lines()
        .filter_map(|line| {
            let cols: Vec<&str> = line.split(',').map(str::trim).collect();
            let [index, name, used, total] = cols.as_slice() else {
                return None;
            };
            Some(NvidiaGpu {
                index: index.parse().ok()?,
                name: name.to_string(),
                used_bytes: used.parse::<u64>().ok()?.saturating_mul(MIB),
                total_bytes: total.parse::<u64>().ok()?.saturating_mul(MIB),
            })
        })
        .collect()
}

/// Run nvidia-smi and return the row for `device_index`.
pub(crate) async fn query_gpu(nvidia_smi: &str, device_index: u32) -> anyhow::Result<NvidiaGpu> {
    let output = tokio::process::Command::new(nvidia_smi)
        .args(QUERY_ARGS)
        .output()
        .await
        .map_err(|e| anyhow::anyhow!("{nvidia_smi}: {e}"))?;
    anyhow::ensure!(
        output.status.success(),
        "{nvidia_smi} exited with {}",
        output.status
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    parse_query_output(&stdout)
        .into_iter()
        .find(|g| g.index == device_index)
        .ok_or_else(|| anyhow::anyhow!("no GPU with index {device_index}"))
}
