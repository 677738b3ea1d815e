//! Noyau calculatrice valeur absolue
//!
//! Organisation interne :
//! - erreur.rs    : erreurs typées (validation + évaluation)
//! - valider.rs   : bonne formation structurelle (parenthèses, barres)
//! - jetons.rs    : tokenisation + normalisation des notations
//! - rpn.rs       : shunting-yard (jetons -> RPN)
//! - lecture.rs   : évaluateur sûr (RPN -> f64, liste blanche)
//! - reduction.rs : réduction pas à pas (racines, puissances, valeurs absolues)
//! - calcul.rs    : pipeline complet, deux branches (approchée / exacte)

pub mod calcul;
pub mod erreur;
pub mod jetons;
pub mod lecture;
pub mod reduction;
pub mod rpn;
pub mod valider;

#[cfg(test)]
mod tests_scenarios;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use calcul::{calculer, ResultatCalcul};
pub use erreur::ErreurCalcul;
pub use reduction::Etape;
