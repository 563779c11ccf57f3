pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Human readable size, e.g. `117.19 KB` for 120000 bytes.
    pub fn format_size(size: usize) -> String {
        const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
        let mut value = size as f64;
        let mut unit_index = 0;

        while value >= 1024.0 && unit_index < UNITS.len() - 1 {
            value /= 1024.0;
            unit_index += 1;
        }

        if unit_index == 0 {
            format!("{} {}", size, UNITS[0])
        } else {
            format!("{:.2} {}", value, UNITS[unit_index])
        }
    }

    /// Byte length of the document a padded base64 string decodes to.
    pub fn decoded_len(encoded: &str) -> usize {
        let padding = encoded.bytes().rev().take_while(|b| *b == b'=').count();
        (encoded.len() / 4 * 3).saturating_sub(padding.min(2))
    }
}
