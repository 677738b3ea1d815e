// src/noyau/rpn.rs
//
// Shunting-yard : suite de Tok -> RPN (postfix)
//
// Règles:
// - Ident(name):
//    - si name est dans la liste blanche de lecture.rs => fonction (postfixée en RPN)
//    - sinon => laissé en sortie, lecture.rs lèvera "fonction inconnue"
// - Virgule: dépile jusqu'à '(' (séparateur d'arguments de pow(a,b))
// - Moins unaire:
//    - si '-' arrive quand on n'attend PAS une valeur, on injecte 0 : "-x" => "0 x -"
// - Barre '|' : jamais admise ici — une barre encore présente signifie
//   qu'une valeur absolue n'a pas été résolue par la réduction.
//
// NOTE:
// - Les fonctions sont traitées comme des opérateurs "collés" à leur argument
//   et sont sorties après la parenthèse fermante.

use super::erreur::ErreurCalcul;
use super::jetons::Tok;
use super::lecture::arite;

fn precedence(t: &Tok) -> i32 {
    match t {
        Tok::Plus | Tok::Minus => 1,
        Tok::Star | Tok::Slash => 2,
        Tok::Caret => 3,
        _ => 0,
    }
}

fn is_right_associative(t: &Tok) -> bool {
    matches!(t, Tok::Caret)
}

fn is_fonction_ident(name: &str) -> bool {
    arite(name).is_some()
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   tokens: [Ident("sqrt"), LPar, Num(9), RPar]
///   rpn:    [Num(9), Ident("sqrt")]
pub fn to_rpn(tokens: &[Tok]) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out: Vec<Tok> = Vec::new();
    let mut ops: Vec<Tok> = Vec::new();

    // "valeur" = un atome ou une expression fermée.
    // Sert à détecter le moins unaire.
    let mut prev_was_value = false;

    for tok in tokens.iter().cloned() {
        match tok {
            Tok::Num(_) | Tok::Pi | Tok::Euler => {
                out.push(tok);
                prev_was_value = true;
            }

            Tok::Ident(name) => {
                if is_fonction_ident(&name) {
                    // fonction : on la garde sur la pile (elle sortira après son argument)
                    ops.push(Tok::Ident(name));
                    prev_was_value = false;
                } else {
                    // nom inconnu : sortie directe, l'erreur sera levée à la lecture
                    out.push(Tok::Ident(name));
                    prev_was_value = true;
                }
            }

            Tok::LPar => {
                ops.push(tok);
                prev_was_value = false;
            }

            Tok::RPar => {
                // dépile jusqu'à '('
                let mut ouvrante_vue = false;
                while let Some(top) = ops.pop() {
                    if matches!(top, Tok::LPar) {
                        ouvrante_vue = true;
                        break;
                    }
                    out.push(top);
                }
                if !ouvrante_vue {
                    return Err(ErreurCalcul::eval("parenthèse fermante inattendue"));
                }

                // si une fonction est au sommet, on la sort aussi
                if let Some(Tok::Ident(name)) = ops.last() {
                    if is_fonction_ident(name.as_str()) {
                        out.push(ops.pop().unwrap());
                    }
                }

                prev_was_value = true;
            }

            Tok::Virgule => {
                // sépare les arguments : dépile jusqu'à '(' (qui reste en place)
                loop {
                    match ops.last() {
                        Some(Tok::LPar) => break,
                        Some(_) => out.push(ops.pop().unwrap()),
                        None => {
                            return Err(ErreurCalcul::eval(
                                "virgule hors d'un appel de fonction",
                            ))
                        }
                    }
                }
                prev_was_value = false;
            }

            Tok::Plus | Tok::Star | Tok::Slash | Tok::Caret => {
                // dépile tant que:
                // - on n'est pas bloqué par '('
                // - et on ne traverse pas une fonction (fonction reste collée à son argument)
                // - et la précédence/associativité exige de sortir l'opérateur du haut
                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    if let Tok::Ident(name) = top {
                        if is_fonction_ident(name.as_str()) {
                            break;
                        }
                    }

                    let p_top = precedence(top);
                    let p_tok = precedence(&tok);

                    let doit_pop = if is_right_associative(&tok) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if doit_pop {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(tok);
                prev_was_value = false;
            }

            Tok::Minus => {
                if !prev_was_value {
                    // moins unaire : injecte 0 et reste collé à son opérande
                    // (pas de dépilage : "2*-3" doit donner 2*(0-3))
                    out.push(Tok::Num(0.0));
                    ops.push(Tok::Minus);
                    continue;
                }

                while let Some(top) = ops.last() {
                    if matches!(top, Tok::LPar) {
                        break;
                    }
                    if let Tok::Ident(name) = top {
                        if is_fonction_ident(name.as_str()) {
                            break;
                        }
                    }
                    if precedence(top) >= precedence(&Tok::Minus) {
                        out.push(ops.pop().unwrap());
                    } else {
                        break;
                    }
                }

                ops.push(Tok::Minus);
                prev_was_value = false;
            }

            Tok::Barre => {
                return Err(ErreurCalcul::eval(
                    "barre de valeur absolue non résolue",
                ));
            }
        }
    }

    // vide la pile ops
    while let Some(op) = ops.pop() {
        if matches!(op, Tok::LPar) {
            return Err(ErreurCalcul::eval("parenthèses non fermées"));
        }
        out.push(op);
    }

    Ok(out)
}
