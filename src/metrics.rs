use std::sync::{Mutex, OnceLock, PoisonError};
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

/// Process-wide memory snapshot in MiB, attached to progress updates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStats {
    pub total_mb: u64,
    pub used_mb: u64,
    pub avail_mb: u64,
}

static SYS: OnceLock<Mutex<System>> = OnceLock::new();

fn sys_handle() -> &'static Mutex<System> {
    SYS.get_or_init(|| {
        Mutex::new(System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
        ))
    })
}

pub fn memory_stats_mb() -> MemoryStats {
    let mut sys = sys_handle().lock().unwrap_or_else(PoisonError::into_inner);
    sys.refresh_memory();
    let total_mb = sys.total_memory() / (1024 * 1024);
    let avail_mb = sys.available_memory() / (1024 * 1024);
    MemoryStats {
        total_mb,
        used_mb: total_mb.saturating_sub(avail_mb),
        avail_mb,
    }
}
