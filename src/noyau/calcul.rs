//! Noyau — calcul (pipeline réel)
//!
//! valider -> tokenize (normalisation) -> réduction branche approchée
//!        -> réduction branche exacte -> deux lectures finales
//!
//! Deux branches indépendantes, chacune repartant des jetons normalisés :
//! - approchée : |x| -> magnitude ; son échec de lecture finale est fatal
//! - exacte    : |x| -> (x) signe conservé ; son échec dégrade en `None`
//!   (ex: sqrt(|1-5|) dont la branche exacte tombe sur sqrt(-4))
//!
//! Chaque appel est une fonction pure de son entrée : aucun état ne
//! survit entre deux calculs.

use super::erreur::ErreurCalcul;
use super::jetons::{format_nombre_etape, tokenize};
use super::lecture::lire;
use super::reduction::{Etape, Journal, Reducteur, RegleAbs};
use super::valider::valider;

#[derive(Clone, Debug)]
pub struct ResultatCalcul {
    /// Démarche ordonnée ; contient toujours au moins l'étape
    /// "Expression originale".
    pub etapes: Vec<Etape>,
    /// Résultat avec valeurs absolues appliquées (magnitude).
    pub approche: f64,
    /// Résultat "sans valeur absolue" (barres lues comme des parenthèses).
    /// `None` si cette branche n'est pas évaluable.
    pub exact: Option<f64>,
}

/// API publique : évalue une expression et retourne la démarche complète
/// plus les deux résultats (précision f64 pleine ; l'arrondi à 4 décimales
/// est un choix d'affichage, pas un contrat du noyau).
pub fn calculer(expression: &str) -> Result<ResultatCalcul, ErreurCalcul> {
    let s = expression.trim();

    // 1) Validation structurelle (fail fast, aucune étape émise sur erreur)
    valider(s)?;

    // 2) Jetons (la normalisation des notations se fait ici)
    let jetons = tokenize(s)?;

    // 3) Démarche : l'entrée intacte d'abord
    let mut journal = Journal::default();
    journal.ajouter("Expression originale", s);

    // 4) Branche approchée (narration complète)
    let etat_approche =
        Reducteur::new(jetons.clone(), RegleAbs::Magnitude, true, &mut journal).reduire();
    let approche = lire(&etat_approche)?;

    // 5) Branche exacte (ne re-narre que les valeurs absolues)
    let etat_exact = Reducteur::new(jetons, RegleAbs::SansBarres, false, &mut journal).reduire();
    let exact = lire(&etat_exact).ok();

    // 6) Étapes de résultat
    journal.ajouter("Résultat approché", format_nombre_etape(approche));
    match exact {
        Some(v) => journal.ajouter(
            "Résultat exact (sans valeur absolue)",
            format_nombre_etape(v),
        ),
        None => journal.ajouter("Résultat exact (sans valeur absolue)", "indisponible"),
    }

    Ok(ResultatCalcul {
        etapes: journal.into_etapes(),
        approche,
        exact,
    })
}
