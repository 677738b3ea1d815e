// src/noyau/jetons.rs

use super::erreur::ErreurCalcul;

#[derive(Clone, Debug, PartialEq)]
pub enum Tok {
    Num(f64),
    Pi,
    Euler,

    // Fonctions (sqrt/pow/abs/...) — la lecture décidera si le nom est connu.
    Ident(String),

    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^

    Virgule, // , (séparateur d'arguments : pow(a,b))
    Barre,   // | (valeur absolue, ouvrante/fermante indiscernables)

    LPar,
    RPar,
}

/// Tokenize une chaîne en jetons. C'est aussi la passe de normalisation :
/// les variantes de notation sont ramenées à une forme canonique unique.
/// Supporte :
/// - décimaux (ex: 12, 3.5, .25)
/// - opérateurs + - * / ^ , et barres |
/// - variantes normalisées : × -> *, ÷ -> /, ** -> ^, ² -> ^2, √ -> sqrt
/// - parenthèses ( )
/// - π ou pi, e (constante d'Euler)
/// - identifiants [a-zA-Z_][a-zA-Z0-9_]* (normalisés en minuscules)
pub fn tokenize(s: &str) -> Result<Vec<Tok>, ErreurCalcul> {
    let mut out = Vec::new();
    let chars: Vec<char> = s.chars().collect();
    let mut i: usize = 0;

    while i < chars.len() {
        let c = chars[i];

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        // Parenthèses
        if c == '(' {
            out.push(Tok::LPar);
            i += 1;
            continue;
        }
        if c == ')' {
            out.push(Tok::RPar);
            i += 1;
            continue;
        }

        // Opérateurs (et leurs variantes de glyphe)
        match c {
            '+' => {
                out.push(Tok::Plus);
                i += 1;
                continue;
            }
            '-' => {
                out.push(Tok::Minus);
                i += 1;
                continue;
            }
            '*' => {
                // "**" est l'exponentiation : normalisé en ^
                if i + 1 < chars.len() && chars[i + 1] == '*' {
                    out.push(Tok::Caret);
                    i += 2;
                } else {
                    out.push(Tok::Star);
                    i += 1;
                }
                continue;
            }
            '×' => {
                out.push(Tok::Star);
                i += 1;
                continue;
            }
            '/' | '÷' => {
                out.push(Tok::Slash);
                i += 1;
                continue;
            }
            '^' => {
                out.push(Tok::Caret);
                i += 1;
                continue;
            }
            ',' => {
                out.push(Tok::Virgule);
                i += 1;
                continue;
            }
            '|' => {
                out.push(Tok::Barre);
                i += 1;
                continue;
            }
            _ => {}
        }

        // ² : raccourci "au carré" => ^2
        if c == '²' {
            out.push(Tok::Caret);
            out.push(Tok::Num(2.0));
            i += 1;
            continue;
        }

        // π : "π" (le mot "pi" est traité avec les identifiants)
        if c == 'π' {
            out.push(Tok::Pi);
            i += 1;
            continue;
        }

        // Racine carrée unicode : √  => ident("sqrt")
        if c == '√' {
            out.push(Tok::Ident("sqrt".to_string()));
            i += 1;
            continue;
        }

        // Identifiants ASCII : [a-zA-Z_][a-zA-Z0-9_]*
        if c.is_ascii_alphabetic() || c == '_' {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            let w = word.to_lowercase();

            // Constantes nommées
            match w.as_str() {
                "pi" => out.push(Tok::Pi),
                "e" => out.push(Tok::Euler),
                _ => out.push(Tok::Ident(w)),
            }
            continue;
        }

        // Nombre décimal : 12, 3.5, .25
        if c.is_ascii_digit() || (c == '.' && i + 1 < chars.len() && chars[i + 1].is_ascii_digit())
        {
            let start = i;
            let mut point_vu = false;
            while i < chars.len() {
                let ch = chars[i];
                if ch.is_ascii_digit() {
                    i += 1;
                } else if ch == '.' && !point_vu {
                    point_vu = true;
                    i += 1;
                } else {
                    break;
                }
            }
            let num_str: String = chars[start..i].iter().collect();
            let v: f64 = num_str
                .parse()
                .map_err(|_| ErreurCalcul::eval(format!("nombre invalide: {num_str:?}")))?;
            out.push(Tok::Num(v));
            continue;
        }

        return Err(ErreurCalcul::eval(format!("caractère inattendu: '{c}'")));
    }

    Ok(out)
}

/// Affiche une valeur numérique pour la démarche / la ré-sérialisation.
/// Entier => sans décimales ; sinon Display de f64 (précision complète,
/// l'arrondi à 4 décimales est réservé aux textes d'étape).
pub fn format_nombre(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}

/// Arrondi "présentation" (4 décimales), comme l'affichage des étapes.
/// Les entiers restent sans décimales pour garder une démarche lisible.
pub fn format_nombre_etape(v: f64) -> String {
    if v == v.trunc() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v:.4}")
    }
}

/// Ré-sérialisation d'une suite de jetons en texte (démarche seulement :
/// l'état de réduction reste la liste de jetons, jamais re-scannée).
pub fn format_jetons(tokens: &[Tok]) -> String {
    let mut out = String::new();

    for (idx, t) in tokens.iter().enumerate() {
        let s = match t {
            Tok::Num(v) => format_nombre(*v),
            Tok::Pi => "π".to_string(),
            Tok::Euler => "e".to_string(),
            Tok::Ident(name) => name.clone(),

            Tok::Plus => "+".to_string(),
            Tok::Minus => "-".to_string(),
            Tok::Star => "*".to_string(),
            Tok::Slash => "/".to_string(),
            Tok::Caret => "^".to_string(),

            Tok::Virgule => ",".to_string(),
            Tok::Barre => "|".to_string(),

            Tok::LPar => "(".to_string(),
            Tok::RPar => ")".to_string(),
        };

        // collage naturel : pas d'espace après un nom de fonction ni avant ')' / ','
        let coller = idx == 0
            || matches!(t, Tok::RPar | Tok::Virgule)
            || matches!(tokens.get(idx - 1), Some(Tok::Ident(_)) | Some(Tok::LPar));
        if !coller {
            out.push(' ');
        }
        out.push_str(&s);
    }

    out
}
