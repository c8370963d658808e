//! INI serialization logic for converting `ConfigFile` → INI string.

use std::path::Path;

use super::settings::ConfigFile;
use super::size::format_size;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    format!(
        r#"[pattern]
; Pattern the target starts with. A prefix (0x, 0o or 0b) followed by digits
; in that base, e.g. 0xff, 0o17 or 0b10. Change it at runtime with the
; seq.config control message.
spec = {}

[device]
; Bytes per sector for sector-addressed reads (power of two, e.g. 512 or 4K)
sector_size = {}

[logging]
; Log file location
file = {}
"#,
        config.pattern.spec,
        format_size(config.device.sector_size),
        path_to_string(&config.logging.file),
    )
}

/// Convert a path to a string, collapsing the home directory to `~`.
pub(super) fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}
