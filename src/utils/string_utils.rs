/// Utilitários de string para logs (tokens, codes, states)

/// Trunca uma string sem cortar um caractere UTF-8 no meio
///
/// # Exemplo
/// ```
/// use hubspot_integration_middleware::utils::truncate_safe;
///
/// assert_eq!(truncate_safe("Olá, mundo", 3), "Ol");
/// ```
pub fn truncate_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }

    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }

    &s[..end]
}

/// Mascara um segredo para log: mantém só os primeiros `visible` bytes
///
/// Segredos curtos demais para mostrar algo útil viram apenas `***`.
pub fn mask_secret(secret: &str, visible: usize) -> String {
    if secret.len() <= visible * 2 {
        return "***".to_string();
    }
    format!("{}...", truncate_safe(secret, visible))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_safe_ascii() {
        assert_eq!(truncate_safe("Hello, World!", 5), "Hello");
        assert_eq!(truncate_safe("Hello", 100), "Hello");
    }

    #[test]
    fn test_truncate_safe_utf8() {
        // "á" ocupa 2 bytes
        assert_eq!(truncate_safe("Olá, mundo!", 3), "Ol");
        assert_eq!(truncate_safe("Olá, mundo!", 4), "Olá");
    }

    #[test]
    fn test_mask_secret() {
        assert_eq!(mask_secret("CNy2xxxxxxxxxxxxxxxx", 4), "CNy2...");
        assert_eq!(mask_secret("short", 4), "***");
    }
}
