// src/noyau/valider.rs
//
// Validation structurelle AVANT toute réduction (fail fast).
// Ordre des contrôles :
// 1) entrée vide / espaces seulement     -> EntreeVide
// 2) profondeur de parenthèses (gauche->droite,
//    jamais négative, nulle à la fin)    -> ParenthesesDesequilibrees
// 3) nombre de barres '|' pair           -> BarresNonAppariees
//
// Aucune évaluation ici : une expression équilibrée mais mal formée
// ("2++3") passe, l'erreur sera levée par l'évaluateur.

use super::erreur::ErreurCalcul;

/// Vérifie la bonne formation structurelle de l'entrée brute.
/// Invariant garanti en sortie : toute chaîne passée aux boucles de
/// réduction contient un nombre pair de barres '|'.
pub fn valider(s: &str) -> Result<(), ErreurCalcul> {
    if s.trim().is_empty() {
        return Err(ErreurCalcul::EntreeVide);
    }

    let mut profondeur: i64 = 0;
    for c in s.chars() {
        match c {
            '(' => profondeur += 1,
            ')' => {
                profondeur -= 1;
                // fermante sans ouvrante : inutile de lire la suite
                if profondeur < 0 {
                    return Err(ErreurCalcul::ParenthesesDesequilibrees);
                }
            }
            _ => {}
        }
    }
    if profondeur != 0 {
        return Err(ErreurCalcul::ParenthesesDesequilibrees);
    }

    let barres = s.chars().filter(|&c| c == '|').count();
    if barres % 2 != 0 {
        return Err(ErreurCalcul::BarresNonAppariees);
    }

    Ok(())
}
