/// Collection ids become path segments on the server, so only a conservative
/// alphabet is allowed: an alphanumeric first character, then `[A-Za-z0-9._-]`,
/// and never `..`.
pub fn is_safe_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphanumeric() => {}
        _ => return false,
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-')) {
        return false;
    }
    !name.contains("..")
}
