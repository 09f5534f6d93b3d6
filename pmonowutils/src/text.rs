//! Préparation des textes pour l'affichage dans un panneau étroit.

/// Longueur maximale d'un titre ou d'un nom d'artiste avant troncature.
const MAX_TEXT_CHARS: usize = 25;

/// Marqueur ajouté en fin de texte tronqué.
const ELLIPSIS: &str = "...";

/// Tronque un texte trop long pour le panneau.
///
/// Un texte de plus de 25 caractères est coupé à 25 caractères puis
/// suffixé de `"..."` (28 caractères au total). Un texte de 25 caractères
/// ou moins est retourné inchangé. La coupe se fait sur des caractères,
/// jamais au milieu d'une séquence UTF-8.
///
/// # Examples
///
/// ```
/// use pmonowutils::ellipsize;
///
/// assert_eq!(ellipsize("Short title"), "Short title");
/// assert_eq!(
///     ellipsize("A very very very long song title"),
///     "A very very very long son..."
/// );
/// ```
pub fn ellipsize(text: &str) -> String {
    if text.chars().count() <= MAX_TEXT_CHARS {
        return text.to_string();
    }
    let truncated: String = text.chars().take(MAX_TEXT_CHARS).collect();
    format!("{truncated}{ELLIPSIS}")
}

/// Borne une valeur dans l'intervalle `[0, 1]`.
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(ellipsize(""), "");
        assert_eq!(ellipsize("Song"), "Song");
        let exactly_25 = "a".repeat(25);
        assert_eq!(ellipsize(&exactly_25), exactly_25);
    }

    #[test]
    fn long_text_is_truncated_to_28_chars() {
        let thirty = "b".repeat(30);
        let out = ellipsize(&thirty);
        assert_eq!(out.chars().count(), 28);
        assert!(out.ends_with("..."));
        assert!(out.starts_with(&"b".repeat(25)));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let accented = "é".repeat(30);
        let out = ellipsize(&accented);
        assert_eq!(out.chars().count(), 28);
    }

    #[test]
    fn clamps_into_unit_interval() {
        assert_eq!(clamp01(-0.5), 0.0);
        assert_eq!(clamp01(0.25), 0.25);
        assert_eq!(clamp01(1.5), 1.0);
    }
}
