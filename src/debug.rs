use std::sync::OnceLock;

static DEBUG_ENABLED: OnceLock<bool> = OnceLock::new();

/// Returns `true` when `QRMATRIX_DEBUG` is set; read once per process.
pub(crate) fn debug_enabled() -> bool {
    *DEBUG_ENABLED.get_or_init(|| std::env::var("QRMATRIX_DEBUG").is_ok())
}
