/// Converts a key character to a Windows virtual key code.
///
/// Supports letters (A–Z) and digits (0–9), whose virtual key codes equal
/// their uppercase ASCII values. Matching is case-insensitive.
pub fn vk_from_char(key: char) -> Option<u32> {
    let upper = key.to_ascii_uppercase();
    if upper.is_ascii_uppercase() || upper.is_ascii_digit() {
        return Some(u32::from(upper));
    }
    None
}
