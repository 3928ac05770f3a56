//! Folder serial number formatting.
//!
//! Every folder gets a human-readable serial of the form
//! `PREFIX/YEAR/DEPTCODE/SEQ`, e.g. `SGV/2025/ENG/001`. The sequence number
//! is allocated per department by the repository layer; this module only
//! formats.

/// Organisation prefix used for all folder serials.
pub const SERIAL_PREFIX: &str = "SGV";

/// Derive the three-letter department code from a department name.
///
/// Takes the first three alphanumeric characters, uppercased. Departments
/// with shorter names produce shorter codes.
pub fn department_code(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .take(3)
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Format a folder serial number.
///
/// ```
/// use filetrail_core::serial::folder_serial;
///
/// assert_eq!(folder_serial(2025, "Engineering", 1), "SGV/2025/ENG/001");
/// assert_eq!(folder_serial(2025, "Human Resources", 42), "SGV/2025/HUM/042");
/// ```
pub fn folder_serial(year: i32, department_name: &str, seq: u32) -> String {
    format!(
        "{SERIAL_PREFIX}/{year}/{}/{seq:03}",
        department_code(department_name)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_serial() {
        assert_eq!(folder_serial(2025, "Engineering", 1), "SGV/2025/ENG/001");
    }

    #[test]
    fn sequence_is_zero_padded() {
        assert_eq!(folder_serial(2025, "Engineering", 7), "SGV/2025/ENG/007");
        assert_eq!(folder_serial(2025, "Engineering", 42), "SGV/2025/ENG/042");
    }

    #[test]
    fn sequence_beyond_three_digits_is_not_truncated() {
        assert_eq!(folder_serial(2025, "Engineering", 1234), "SGV/2025/ENG/1234");
    }

    #[test]
    fn department_code_skips_non_alphanumerics() {
        assert_eq!(department_code("H.R. & Admin"), "HRA");
        assert_eq!(department_code("it services"), "ITS");
    }

    #[test]
    fn short_department_name() {
        assert_eq!(department_code("IT"), "IT");
        assert_eq!(folder_serial(2026, "IT", 3), "SGV/2026/IT/003");
    }

    #[test]
    fn empty_department_name() {
        assert_eq!(department_code(""), "");
        assert_eq!(folder_serial(2026, "", 1), "SGV/2026//001");
    }
}
