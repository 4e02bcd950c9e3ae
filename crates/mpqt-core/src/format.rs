//! Size-column labels.

const UNITS: [&str; 3] = ["KiB", "MiB", "GiB"];

/// Formats a byte count the way the size column shows it:
/// `"512 B"`, `"1.5 KiB"`, `"3.0 MiB"`; anything past a thousand TiB
/// stays in TiB.
pub fn human_size(bytes: u64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    for unit in UNITS {
        if value < 1024.0 {
            return format!("{value:3.1} {unit}");
        }
        value /= 1024.0;
    }
    format!("{value:3.1} TiB")
}

/// Formats a directory's child count: `"1 item"`, `"N items"`.
pub fn item_count(count: usize) -> String {
    if count == 1 {
        "1 item".to_string()
    } else {
        format!("{count} items")
    }
}
