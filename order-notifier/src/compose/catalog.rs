//! Status code to customer-facing phrase mapping.

/// Status code that earns the extra thank-you sentence.
pub const DELIVERED_STATUS: &str = "Доставлен";

/// Phrase used for any status code not in [`STATUS_CATALOG`].
pub const DEFAULT_STATUS_PHRASE: &str = "обновлен";

/// Known status codes and the phrase completing "Ваш заказ ...".
pub const STATUS_CATALOG: [(&str, &str); 5] = [
    ("Новый", "принят и находится в обработке"),
    ("В обработке", "обрабатывается нашими менеджерами"),
    ("В пути", "передан в доставку и уже в пути к вам"),
    (DELIVERED_STATUS, "успешно доставлен"),
    ("Отменен", "отменен"),
];

/// Look up the phrase for a status code.
///
/// Matching is exact and case-sensitive; unknown codes get the generic phrase.
pub fn status_phrase(status: &str) -> &'static str {
    STATUS_CATALOG
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, phrase)| *phrase)
        .unwrap_or(DEFAULT_STATUS_PHRASE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_statuses() {
        assert_eq!(status_phrase("Новый"), "принят и находится в обработке");
        assert_eq!(status_phrase("В пути"), "передан в доставку и уже в пути к вам");
        assert_eq!(status_phrase("Доставлен"), "успешно доставлен");
        assert_eq!(status_phrase("Отменен"), "отменен");
    }

    #[test]
    fn test_unknown_status_falls_back() {
        assert_eq!(status_phrase("Возврат"), DEFAULT_STATUS_PHRASE);
        assert_eq!(status_phrase(""), DEFAULT_STATUS_PHRASE);
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(status_phrase("доставлен"), DEFAULT_STATUS_PHRASE);
        assert_eq!(status_phrase("Доставлен "), DEFAULT_STATUS_PHRASE);
        assert_eq!(status_phrase("в обработке"), DEFAULT_STATUS_PHRASE);
    }
}
