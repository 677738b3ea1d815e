// src/noyau/erreur.rs
//
// Erreurs typées du noyau.
// Chaque variante correspond à un message utilisateur distinct :
// - EntreeVide               : entrée vide / seulement des espaces
// - ParenthesesDesequilibrees: '(' / ')' non appariées
// - BarresNonAppariees       : nombre impair de barres '|'
// - Evaluation               : échec de l'évaluateur sûr (syntaxe, ÷0, non fini…)
//
// La validation échoue AVANT toute réduction (fail fast) ;
// Evaluation peut survenir en fin de pipeline.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErreurCalcul {
    EntreeVide,
    ParenthesesDesequilibrees,
    BarresNonAppariees,
    Evaluation(String),
}

impl fmt::Display for ErreurCalcul {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErreurCalcul::EntreeVide => write!(f, "Entrée vide"),
            ErreurCalcul::ParenthesesDesequilibrees => {
                write!(f, "Parenthèses non équilibrées")
            }
            ErreurCalcul::BarresNonAppariees => {
                write!(f, "Barres de valeur absolue non appariées")
            }
            ErreurCalcul::Evaluation(msg) => write!(f, "Erreur de calcul : {msg}"),
        }
    }
}

impl ErreurCalcul {
    /// Raccourci pour construire une erreur d'évaluation.
    pub fn eval(msg: impl Into<String>) -> Self {
        ErreurCalcul::Evaluation(msg.into())
    }
}
