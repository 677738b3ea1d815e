//! Tests scénarios (campagne) : propriétés contractuelles du pipeline.
//!
//! But : verrouiller le comportement observable de `calculer` :
//! - erreurs typées de validation (fail fast, aucune étape émise)
//! - double résultat approché / exact et leur égalité sans barres
//! - ordre de réduction (valeur absolue avant la puissance qu'elle expose)
//! - terminaison sous plafond de substitutions
//! - pureté / idempotence (même entrée => même démarche, mêmes résultats)

use std::time::{Duration, Instant};

use super::calcul::{calculer, ResultatCalcul};
use super::erreur::ErreurCalcul;

fn ok(s: &str) -> ResultatCalcul {
    calculer(s).unwrap_or_else(|e| panic!("calculer({s:?}) erreur: {e}"))
}

fn assert_proche(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "attendu {b}, obtenu {a}");
}

/// Budget global anti-gel.
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Validation ------------------------ */

#[test]
fn erreurs_de_validation_typees() {
    assert_eq!(calculer("").unwrap_err(), ErreurCalcul::EntreeVide);
    assert_eq!(calculer("  \t ").unwrap_err(), ErreurCalcul::EntreeVide);
    assert_eq!(
        calculer("(1+2").unwrap_err(),
        ErreurCalcul::ParenthesesDesequilibrees
    );
    assert_eq!(
        calculer("1+2)").unwrap_err(),
        ErreurCalcul::ParenthesesDesequilibrees
    );
    assert_eq!(
        calculer("|1+2").unwrap_err(),
        ErreurCalcul::BarresNonAppariees
    );
}

#[test]
fn messages_utilisateur_distincts() {
    let a = calculer("").unwrap_err().to_string();
    let b = calculer("(1").unwrap_err().to_string();
    let c = calculer("|1").unwrap_err().to_string();
    let d = calculer("1/0").unwrap_err().to_string();
    assert!(a != b && a != c && a != d && b != c && b != d && c != d);
}

/* ------------------------ Scénarios contractuels ------------------------ */

#[test]
fn scenario_racine() {
    let r = ok("sqrt(9)+1");
    assert_proche(r.approche, 4.0);
    assert_eq!(r.exact, Some(4.0));

    let etape = r
        .etapes
        .iter()
        .find(|e| e.titre == "Calcul de racine")
        .expect("étape racine absente");
    assert!(etape.contenu.contains("√(9)"));
    assert!(etape.contenu.contains("3"));
}

#[test]
fn scenario_valeur_absolue() {
    let r = ok("|3-5|");
    assert_proche(r.approche, 2.0);
    assert_eq!(r.exact, Some(-2.0));
}

#[test]
fn scenario_abs_puis_puissance() {
    // ordre choisi et verrouillé : la puissance n'a de base littérale
    // qu'après substitution de la valeur absolue
    let r = ok("|3-5|^2");
    assert_proche(r.approche, 4.0);
    assert_eq!(r.exact, Some(4.0)); // (-2)^2

    let pos_abs = r
        .etapes
        .iter()
        .position(|e| e.titre == "Valeur absolue")
        .expect("étape valeur absolue absente");
    let pos_pow = r
        .etapes
        .iter()
        .position(|e| e.titre == "Calcul de puissance")
        .expect("étape puissance absente");
    assert!(pos_abs < pos_pow, "l'abs doit précéder la puissance");
}

#[test]
fn scenario_pow_deux_arguments() {
    let r = ok("pow(2,10)-24");
    assert_proche(r.approche, 1000.0);
    assert_eq!(r.exact, Some(1000.0));
}

#[test]
fn scenario_combine() {
    // sqrt puis abs puis arithmétique : |sqrt(16)-7| = 3
    let r = ok("|sqrt(16)-7|");
    assert_proche(r.approche, 3.0);
    assert_eq!(r.exact, Some(-3.0));
}

/* ------------------------ Propriétés générales ------------------------ */

#[test]
fn sans_barres_approche_egale_exact() {
    let t0 = Instant::now();
    let max = Duration::from_millis(250);

    for s in [
        "1",
        "1+2*3",
        "(1+2)*(3+4)",
        "sqrt(2)",
        "sqrt(sqrt(16))",
        "2^3^2",
        "pow(2,0.5)",
        "10/4",
        "-3+5",
        "2*pi",
        "exp(0)+log(e)",
    ] {
        budget(t0, max);
        let r = ok(s);
        assert_eq!(Some(r.approche), r.exact, "expr={s:?}");
    }
}

#[test]
fn au_moins_une_etape_et_numerotation_continue() {
    for s in ["7", "sqrt(4)", "|1-3|*2"] {
        let r = ok(s);
        assert!(!r.etapes.is_empty());
        for (i, e) in r.etapes.iter().enumerate() {
            assert_eq!(e.numero, i + 1, "numérotation discontinue pour {s:?}");
        }
        assert_eq!(r.etapes[0].titre, "Expression originale");
        assert_eq!(r.etapes[0].contenu, s);
    }
}

#[test]
fn idempotence() {
    let s = "sqrt(9)+|3-5|^2";
    let a = ok(s);
    let b = ok(s);
    assert_eq!(a.approche, b.approche);
    assert_eq!(a.exact, b.exact);
    assert_eq!(a.etapes, b.etapes);
}

#[test]
fn plafond_termine_et_rend_un_resultat() {
    let t0 = Instant::now();
    let max = Duration::from_secs(2);

    // 80 motifs réductibles : bien plus que le plafond de 50 substitutions ;
    // la lecture finale évalue les racines restées en l'état
    let expr = vec!["sqrt(4)"; 80].join("+");
    let r = ok(&expr);
    budget(t0, max);
    assert_proche(r.approche, 160.0);
    assert_eq!(r.exact, Some(160.0));
}

#[test]
fn erreur_evaluation_finale_typee() {
    for s in ["1/0", "2++3", "foo(1)", "sqrt(0-9)"] {
        match calculer(s) {
            Err(ErreurCalcul::Evaluation(_)) => {}
            autre => panic!("attendu Evaluation pour {s:?}, obtenu {autre:?}"),
        }
    }
}

#[test]
fn barres_vides_surfacent_a_la_lecture_finale() {
    // "||" passe la validation (nombre pair) ; le motif vide est sauté
    // par la réduction et l'erreur sort à l'évaluation finale
    match calculer("||") {
        Err(ErreurCalcul::Evaluation(_)) => {}
        autre => panic!("attendu Evaluation, obtenu {autre:?}"),
    }
}

#[test]
fn notation_libre_normalisee() {
    let r = ok("√(25)×2÷5");
    assert_proche(r.approche, 2.0);

    let r = ok("3²+4²");
    assert_proche(r.approche, 25.0);

    let r = ok("2**3");
    assert_proche(r.approche, 8.0);
}
