// src/noyau/reduction.rs
//
// Réduction pas à pas.
//
// L'état de réduction est une liste de jetons réécrite par épissage de
// plages (jamais de réécriture textuelle : un littéral substitué ne peut
// pas être confondu avec un fragment voisin). La ré-sérialisation ne sert
// qu'aux textes de la démarche.
//
// Ordre documenté (et verrouillé par les tests) :
//   boucle externe {
//       point fixe racines + puissances ;
//       point fixe valeurs absolues ;
//   } tant qu'un tour complet a changé quelque chose.
// La substitution d'une valeur absolue peut exposer une nouvelle puissance
// ("|3-5|^2" : d'abord l'étape valeur absolue, ensuite l'étape puissance).
//
// Politique de recherche : premier motif (le plus à gauche) par catégorie,
// l'intérieur d'un motif ne doit pas contenir de '(' imbriquée — ce qui
// approxime "le plus interne d'abord".
//
// Un échec de lecture sur un fragment candidat saute CE motif (l'état reste
// inchangé pour ce motif) ; le fragment reste tel quel et ne ressortira
// qu'à l'évaluation finale.

use super::jetons::{format_jetons, format_nombre_etape, Tok};
use super::lecture::lire;

/// Soupape de sécurité : nombre maximal de substitutions par branche.
/// Garantit la terminaison sur entrée pathologique ; au plafond, on rend
/// l'état tel quel (meilleur effort, la lecture finale sait encore évaluer).
pub const MAX_SUBSTITUTIONS: usize = 50;

#[derive(Clone, Debug, PartialEq)]
pub struct Etape {
    pub numero: usize,
    pub titre: String,
    pub contenu: String,
}

/// Journal d'étapes : numérotation continue, ajout seulement.
#[derive(Default, Clone, Debug)]
pub struct Journal {
    etapes: Vec<Etape>,
}

impl Journal {
    pub fn ajouter(&mut self, titre: &str, contenu: impl Into<String>) {
        self.etapes.push(Etape {
            numero: self.etapes.len() + 1,
            titre: titre.to_string(),
            contenu: contenu.into(),
        });
    }

    pub fn etapes(&self) -> &[Etape] {
        &self.etapes
    }

    pub fn into_etapes(self) -> Vec<Etape> {
        self.etapes
    }
}

/// Règle appliquée au contenu d'une paire de barres.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegleAbs {
    /// |x| -> magnitude (branche approchée)
    Magnitude,
    /// |x| -> (x), signe conservé (branche exacte "sans valeur absolue")
    SansBarres,
}

pub struct Reducteur<'a> {
    jetons: Vec<Tok>,
    regle_abs: RegleAbs,
    // branche exacte : racines/puissances déjà narrées par la branche
    // approchée, on ne les raconte pas une deuxième fois
    narration_complete: bool,
    journal: &'a mut Journal,
    substitutions: usize,
}

impl<'a> Reducteur<'a> {
    pub fn new(
        jetons: Vec<Tok>,
        regle_abs: RegleAbs,
        narration_complete: bool,
        journal: &'a mut Journal,
    ) -> Self {
        Self {
            jetons,
            regle_abs,
            narration_complete,
            journal,
            substitutions: 0,
        }
    }

    /// Boucle de point fixe complète ; rend l'état final (jetons).
    pub fn reduire(mut self) -> Vec<Tok> {
        loop {
            let mut tour_a_change = false;

            // Boucle A : racines puis puissances, jusqu'au point fixe.
            let mut boucle_a_change = false;
            while !self.plafond_atteint() {
                if self.passe_racine() || self.passe_puissance() {
                    boucle_a_change = true;
                    continue;
                }
                break;
            }
            if boucle_a_change {
                tour_a_change = true;
                self.instantane();
            }

            // Boucle B : valeurs absolues, jusqu'au point fixe.
            let mut boucle_b_change = false;
            while !self.plafond_atteint() {
                if self.passe_abs() {
                    boucle_b_change = true;
                    continue;
                }
                break;
            }
            if boucle_b_change {
                tour_a_change = true;
                self.instantane();
            }

            if self.plafond_atteint() || !tour_a_change {
                return self.jetons;
            }
        }
    }

    fn plafond_atteint(&self) -> bool {
        self.substitutions >= MAX_SUBSTITUTIONS
    }

    /// Cliché "Nouvelle expression" après une boucle qui a substitué.
    fn instantane(&mut self) {
        if self.narration_complete {
            self.journal
                .ajouter("Nouvelle expression", format_jetons(&self.jetons));
        }
    }

    fn substituer(&mut self, debut: usize, fin_incluse: usize, valeur: f64) {
        self.jetons
            .splice(debut..=fin_incluse, std::iter::once(Tok::Num(valeur)));
        self.substitutions += 1;
    }

    /* ------------------------ Passe racine ------------------------ */

    /// Première occurrence de `sqrt( ... )` sans '(' imbriquée à l'intérieur.
    fn passe_racine(&mut self) -> bool {
        let mut i = 0;
        while i + 1 < self.jetons.len() {
            let est_sqrt = matches!(&self.jetons[i], Tok::Ident(n) if n == "sqrt")
                && matches!(self.jetons[i + 1], Tok::LPar);
            if !est_sqrt {
                i += 1;
                continue;
            }

            // cherche la fermante ; une ouvrante avant elle => pas interne
            let mut j = i + 2;
            let mut interne = true;
            while j < self.jetons.len() {
                match self.jetons[j] {
                    Tok::RPar => break,
                    Tok::LPar => {
                        interne = false;
                        break;
                    }
                    _ => j += 1,
                }
            }
            if j >= self.jetons.len() || !interne || j == i + 2 {
                i += 1;
                continue;
            }

            let interieur = self.jetons[i + 2..j].to_vec();
            let valeur = match lire(&interieur) {
                Ok(v) => v,
                Err(_) => {
                    // fragment non évaluable : on saute ce motif
                    i = j + 1;
                    continue;
                }
            };
            let racine = valeur.sqrt();
            if !racine.is_finite() {
                i = j + 1;
                continue;
            }

            let interieur_txt = format_jetons(&interieur);
            if self.narration_complete {
                self.journal.ajouter(
                    "Calcul de racine",
                    format!(
                        "√({interieur_txt}) = √({}) ≈ {}",
                        format_nombre_etape(valeur),
                        format_nombre_etape(racine)
                    ),
                );
            }
            self.substituer(i, j, racine);
            return true;
        }
        false
    }

    /* ------------------------ Passe puissance ------------------------ */

    /// Première occurrence d'une exponentiation à base littérale :
    /// `Num ^ [−] Num` ou `pow(a, b)` sans '(' imbriquée.
    fn passe_puissance(&mut self) -> bool {
        let mut i = 0;
        while i < self.jetons.len() {
            if self.puissance_caret(i) || self.puissance_pow(i) {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Motif `Num ^ [−] Num` à la position i. `true` = substitué.
    fn puissance_caret(&mut self, i: usize) -> bool {
        let base = match (self.jetons.get(i), self.jetons.get(i + 1)) {
            (Some(Tok::Num(b)), Some(Tok::Caret)) => *b,
            _ => return false,
        };

        let (exposant, fin) = match self.jetons.get(i + 2) {
            Some(Tok::Num(e)) => (*e, i + 2),
            Some(Tok::Minus) => match self.jetons.get(i + 3) {
                Some(Tok::Num(e)) => (-*e, i + 3),
                _ => return false,
            },
            _ => return false,
        };

        // associativité à droite : dans "2^3^2" on réduit d'abord "3^2"
        if matches!(self.jetons.get(fin + 1), Some(Tok::Caret)) {
            return false;
        }

        let resultat = base.powf(exposant);
        if !resultat.is_finite() {
            return false;
        }

        if self.narration_complete {
            self.journal.ajouter(
                "Calcul de puissance",
                format!(
                    "{}^{} = {}",
                    format_nombre_etape(base),
                    format_nombre_etape(exposant),
                    format_nombre_etape(resultat)
                ),
            );
        }
        self.substituer(i, fin, resultat);
        true
    }

    /// Motif `pow( a , b )` à la position i, sans '(' imbriquée.
    /// `true` = substitué ; sinon pas de motif ici, ou fragment sauté.
    fn puissance_pow(&mut self, i: usize) -> bool {
        let est_pow = matches!(self.jetons.get(i), Some(Tok::Ident(n)) if n == "pow")
            && matches!(self.jetons.get(i + 1), Some(Tok::LPar));
        if !est_pow {
            return false;
        }

        let mut j = i + 2;
        let mut virgule = None;
        while j < self.jetons.len() {
            match self.jetons[j] {
                Tok::RPar => break,
                Tok::LPar => return false, // pas interne : laissé à la lecture finale
                Tok::Virgule => {
                    if virgule.is_some() {
                        return false;
                    }
                    virgule = Some(j);
                }
                _ => {}
            }
            j += 1;
        }
        let v = match virgule {
            Some(v) => v,
            None => return false,
        };
        if j >= self.jetons.len() || v == i + 2 || v + 1 == j {
            return false;
        }

        let gauche = self.jetons[i + 2..v].to_vec();
        let droite = self.jetons[v + 1..j].to_vec();
        let (base, exposant) = match (lire(&gauche), lire(&droite)) {
            (Ok(a), Ok(b)) => (a, b),
            _ => return false, // fragment non évaluable : sauté
        };

        let resultat = base.powf(exposant);
        if !resultat.is_finite() {
            return false;
        }

        if self.narration_complete {
            self.journal.ajouter(
                "Calcul de puissance",
                format!(
                    "pow({}, {}) = {}^{} = {}",
                    format_jetons(&gauche),
                    format_jetons(&droite),
                    format_nombre_etape(base),
                    format_nombre_etape(exposant),
                    format_nombre_etape(resultat)
                ),
            );
        }
        self.substituer(i, j, resultat);
        true
    }

    /* ------------------------ Passe valeur absolue ------------------------ */

    /// Première paire de barres à intérieur non vide (les barres étant
    /// indiscernables, la paire est "première barre, barre suivante" —
    /// donc sans barre imbriquée par construction).
    fn passe_abs(&mut self) -> bool {
        let mut i = 0;
        while i < self.jetons.len() {
            if !matches!(self.jetons[i], Tok::Barre) {
                i += 1;
                continue;
            }
            let j = match self.jetons[i + 1..]
                .iter()
                .position(|t| matches!(t, Tok::Barre))
            {
                Some(p) => i + 1 + p,
                None => return false, // barre isolée : la validation l'exclut en amont
            };
            if j == i + 1 {
                // "||" vide : motif sauté, la lecture finale lèvera l'erreur
                i = j;
                continue;
            }

            let interieur = self.jetons[i + 1..j].to_vec();
            let valeur = match lire(&interieur) {
                Ok(v) => v,
                Err(_) => {
                    i = j;
                    continue;
                }
            };
            let interieur_txt = format_jetons(&interieur);

            match self.regle_abs {
                RegleAbs::Magnitude => {
                    let magnitude = valeur.abs();
                    if self.narration_complete {
                        self.journal.ajouter(
                            "Valeur absolue",
                            format!(
                                "|{interieur_txt}| = |{}| = {}",
                                format_nombre_etape(valeur),
                                format_nombre_etape(magnitude)
                            ),
                        );
                    }
                    self.substituer(i, j, magnitude);
                }
                RegleAbs::SansBarres => {
                    self.journal.ajouter(
                        "Calcul dans la valeur absolue",
                        format!("{interieur_txt} = {}", format_nombre_etape(valeur)),
                    );
                    let v_txt = format_nombre_etape(valeur);
                    if valeur >= 0.0 {
                        self.journal.ajouter(
                            "Sans valeur absolue",
                            format!("comme {v_txt} ≥ 0 : |{interieur_txt}| = {interieur_txt}"),
                        );
                    } else {
                        self.journal.ajouter(
                            "Sans valeur absolue",
                            format!(
                                "comme {v_txt} < 0, les barres sont lues comme des parenthèses : \
                                 |{interieur_txt}| = ({interieur_txt}) = {v_txt}"
                            ),
                        );
                    }
                    self.substituer(i, j, valeur);
                }
            }
            return true;
        }
        false
    }
}
