// src/noyau/lecture.rs
//
// Lecture numérique (évaluateur sûr).
//
// Grammaire restreinte : nombres, + - * / ^, parenthèses, et une liste
// blanche fixe de fonctions + constantes. AUCUNE évaluation dynamique :
// les jetons passent par le shunting-yard (rpn.rs) puis la RPN est pliée
// sur une pile de f64.
//
// Politique d'erreurs (ErreurCalcul::Evaluation) :
// - identifiant hors liste blanche
// - RPN mal formée (arité, pile non vide à la fin)
// - division par zéro (rejet explicite, pas d'infini IEEE)
// - résultat final non fini (NaN / ±inf, ex: sqrt d'un négatif)

use super::erreur::ErreurCalcul;
use super::jetons::Tok;
use super::rpn::to_rpn;

/// Arité des fonctions admises. `None` = identifiant inconnu.
pub fn arite(nom: &str) -> Option<usize> {
    match nom {
        "sqrt" | "abs" | "sin" | "cos" | "tan" | "log" | "exp" => Some(1),
        "pow" => Some(2),
        _ => None,
    }
}

fn applique_fonction(nom: &str, args: &[f64]) -> f64 {
    match (nom, args) {
        ("sqrt", [x]) => x.sqrt(),
        ("abs", [x]) => x.abs(),
        ("sin", [x]) => x.sin(),
        ("cos", [x]) => x.cos(),
        ("tan", [x]) => x.tan(),
        ("log", [x]) => x.ln(),
        ("exp", [x]) => x.exp(),
        ("pow", [a, b]) => a.powf(*b),
        // arite() a déjà filtré : on ne passe jamais ici
        _ => f64::NAN,
    }
}

/// Plie une RPN sur une pile de f64.
fn eval_rpn(rpn: &[Tok]) -> Result<f64, ErreurCalcul> {
    let mut st: Vec<f64> = Vec::new();

    for tok in rpn {
        match tok {
            Tok::Num(v) => st.push(*v),
            Tok::Pi => st.push(std::f64::consts::PI),
            Tok::Euler => st.push(std::f64::consts::E),

            Tok::Plus | Tok::Minus | Tok::Star | Tok::Slash | Tok::Caret => {
                let b = st.pop().ok_or_else(|| ErreurCalcul::eval("expression invalide"))?;
                let a = st.pop().ok_or_else(|| ErreurCalcul::eval("expression invalide"))?;

                let v = match tok {
                    Tok::Plus => a + b,
                    Tok::Minus => a - b,
                    Tok::Star => a * b,
                    Tok::Slash => {
                        if b == 0.0 {
                            return Err(ErreurCalcul::eval("division par zéro"));
                        }
                        a / b
                    }
                    Tok::Caret => a.powf(b),
                    _ => unreachable!(),
                };

                st.push(v);
            }

            Tok::Ident(nom) => {
                let n = arite(nom)
                    .ok_or_else(|| ErreurCalcul::eval(format!("fonction inconnue: {nom}")))?;
                if st.len() < n {
                    return Err(ErreurCalcul::eval(format!("{nom}: argument manquant")));
                }
                let args: Vec<f64> = st.split_off(st.len() - n);
                st.push(applique_fonction(nom, &args));
            }

            Tok::Virgule | Tok::Barre | Tok::LPar | Tok::RPar => {
                return Err(ErreurCalcul::eval("jeton inattendu en RPN"));
            }
        }
    }

    if st.len() != 1 {
        return Err(ErreurCalcul::eval("expression invalide"));
    }
    Ok(st[0])
}

/// Lecture d'une suite de jetons : shunting-yard puis pliage RPN.
/// Rejette tout résultat non fini (politique explicite, voir en-tête).
pub fn lire(jetons: &[Tok]) -> Result<f64, ErreurCalcul> {
    if jetons.is_empty() {
        return Err(ErreurCalcul::eval("expression invalide"));
    }

    let rpn = to_rpn(jetons)?;
    let v = eval_rpn(&rpn)?;

    if !v.is_finite() {
        return Err(ErreurCalcul::eval("résultat non fini"));
    }
    Ok(v)
}
