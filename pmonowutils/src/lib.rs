//! # pmonowutils - Utilitaires pour PMONowPlaying
//!
//! Petites fonctions pures partagées par les crates de PMONowPlaying :
//! conversion de timestamps textuels, formatage pour l'affichage et
//! troncature des textes trop longs.
//!
//! Toutes les fonctions de cette crate sont totales : une entrée mal
//! formée produit une valeur sûre (0.0, chaîne vide, ...) et jamais une
//! erreur.

mod text;
mod timestamp;

pub use text::{clamp01, ellipsize};
pub use timestamp::{format_timestamp, parse_time_to_seconds};
