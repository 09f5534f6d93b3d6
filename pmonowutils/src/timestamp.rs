//! Conversion entre timestamps textuels et secondes.
//!
//! Le point de terminaison `media_info` expose les positions de lecture
//! sous forme textuelle (`H:MM:SS.sss` ou `M:SS.sss`). Ces fonctions
//! convertissent dans les deux sens sans jamais échouer.

/// Sentinelle renvoyée par certains lecteurs quand la durée est inconnue.
const UNKNOWN_SENTINEL: &str = "(unknown)";

/// Convertit un timestamp textuel en secondes.
///
/// Formats acceptés (délimités par `:`) :
/// - `H:MM:SS.sss` (3 composantes)
/// - `M:SS.sss` (2 composantes)
///
/// Toute entrée absente, vide, mal formée ou égale à la sentinelle
/// `"(unknown)"` produit `0.0`. La fonction ne retourne jamais d'erreur :
/// l'appelant n'a pas à distinguer "pas de donnée" de "donnée invalide".
///
/// # Examples
///
/// ```
/// use pmonowutils::parse_time_to_seconds;
///
/// assert_eq!(parse_time_to_seconds(Some("1:02:03")), 3723.0);
/// assert_eq!(parse_time_to_seconds(Some("2:05")), 125.0);
/// assert_eq!(parse_time_to_seconds(Some("(unknown)")), 0.0);
/// assert_eq!(parse_time_to_seconds(None), 0.0);
/// ```
pub fn parse_time_to_seconds(text: Option<&str>) -> f64 {
    let Some(text) = text else {
        return 0.0;
    };
    if text.is_empty() || text.eq_ignore_ascii_case(UNKNOWN_SENTINEL) {
        return 0.0;
    }

    let parts: Vec<&str> = text.split(':').collect();
    let parsed = match parts.as_slice() {
        [hours, minutes, seconds] => {
            let hours: Option<i64> = hours.parse().ok();
            let minutes: Option<i64> = minutes.parse().ok();
            let seconds: Option<f64> = seconds.parse().ok();
            match (hours, minutes, seconds) {
                (Some(h), Some(m), Some(s)) => Some(h as f64 * 3600.0 + m as f64 * 60.0 + s),
                _ => None,
            }
        }
        [minutes, seconds] => {
            let minutes: Option<i64> = minutes.parse().ok();
            let seconds: Option<f64> = seconds.parse().ok();
            match (minutes, seconds) {
                (Some(m), Some(s)) => Some(m as f64 * 60.0 + s),
                _ => None,
            }
        }
        _ => None,
    };

    parsed.unwrap_or(0.0)
}

/// Formate une durée en secondes pour l'affichage.
///
/// - valeur négative ou NaN : `"0:00"`
/// - heures présentes : `H:MM:SS`
/// - sinon : `M:SS`
///
/// Minutes et secondes sont toujours complétées à deux chiffres, la
/// valeur est arrondie à la seconde entière la plus proche.
///
/// # Examples
///
/// ```
/// use pmonowutils::format_timestamp;
///
/// assert_eq!(format_timestamp(3723.0), "1:02:03");
/// assert_eq!(format_timestamp(125.0), "2:05");
/// assert_eq!(format_timestamp(-3.0), "0:00");
/// ```
pub fn format_timestamp(seconds: f64) -> String {
    if seconds.is_nan() || seconds < 0.0 {
        return "0:00".to_string();
    }

    let total = seconds.round() as i64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_three_components() {
        assert_eq!(parse_time_to_seconds(Some("1:02:03")), 3723.0);
        assert_eq!(parse_time_to_seconds(Some("0:00:00")), 0.0);
        assert_eq!(parse_time_to_seconds(Some("2:00:30.5")), 7230.5);
    }

    #[test]
    fn parses_two_components() {
        assert_eq!(parse_time_to_seconds(Some("2:05")), 125.0);
        assert_eq!(parse_time_to_seconds(Some("0:30.25")), 30.25);
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(parse_time_to_seconds(Some("abc")), 0.0);
        assert_eq!(parse_time_to_seconds(Some("1:2:3:4")), 0.0);
        assert_eq!(parse_time_to_seconds(Some("1:xx")), 0.0);
        assert_eq!(parse_time_to_seconds(Some("42")), 0.0);
    }

    #[test]
    fn sentinels_yield_zero() {
        assert_eq!(parse_time_to_seconds(None), 0.0);
        assert_eq!(parse_time_to_seconds(Some("")), 0.0);
        assert_eq!(parse_time_to_seconds(Some("(unknown)")), 0.0);
        assert_eq!(parse_time_to_seconds(Some("(Unknown)")), 0.0);
    }

    #[test]
    fn formats_with_and_without_hours() {
        assert_eq!(format_timestamp(3723.0), "1:02:03");
        assert_eq!(format_timestamp(125.0), "2:05");
        assert_eq!(format_timestamp(0.0), "0:00");
        assert_eq!(format_timestamp(59.6), "1:00");
    }

    #[test]
    fn formats_invalid_values_as_zero() {
        assert_eq!(format_timestamp(-1.0), "0:00");
        assert_eq!(format_timestamp(f64::NAN), "0:00");
    }

    #[test]
    fn round_trips_integral_seconds() {
        for text in ["1:02:03", "2:05", "0:00", "12:34:56"] {
            let seconds = parse_time_to_seconds(Some(text));
            assert_eq!(format_timestamp(seconds), text);
        }
    }
}
