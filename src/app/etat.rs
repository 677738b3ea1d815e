//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l'état de la calculatrice (entrée, résultats, erreur,
//! démarche) et offrir des opérations simples (C/CLR/AC) sans logique
//! d'affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (pas de noyau, pas de parsing).
//! - Actions déterministes, sans effet de bord caché.
//! - Aucun état ne survit entre deux calculs hormis l'entrée.

/// Une ligne de la démarche, prête à afficher.
#[derive(Clone, Debug)]
pub struct LigneDemarche {
    pub numero: usize,
    pub titre: String,
    pub contenu: String,
}

#[derive(Clone, Debug, Default)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub approche: String,    // résultat approché (|x| -> magnitude), 4 décimales
    pub exact: String,       // résultat exact (sans valeur absolue), 4 décimales
    pub exact_dispo: bool,   // false si la branche exacte est inévaluable
    pub erreur: String,      // message d'erreur (si validation/éval échoue)
    pub resultats_dispo: bool,

    // --- démarche (panneau d'explication) ---
    pub demarche: Vec<LigneDemarche>,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l'entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl AppCalc {
    /* ------------------------ Actions "boutons" (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrée + résultats).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.clear_resultats();
        self.focus_entree = true;
    }

    /// C : effacer seulement l'entrée (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultats + erreur + démarche (sans toucher à l'entrée).
    pub fn clear_resultats(&mut self) {
        self.approche.clear();
        self.exact.clear();
        self.exact_dispo = false;
        self.erreur.clear();
        self.resultats_dispo = false;
        self.demarche.clear();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX : pas de résultats ni de démarche sur erreur (le pipeline
    /// échoue en bloc, conformément au contrat du noyau).
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.approche.clear();
        self.exact.clear();
        self.exact_dispo = false;
        self.resultats_dispo = false;
        self.demarche.clear();
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat complet (deux branches + démarche).
    pub fn set_resultats(
        &mut self,
        approche: impl Into<String>,
        exact: Option<String>,
        demarche: Vec<LigneDemarche>,
    ) {
        self.erreur.clear();
        self.approche = approche.into();
        self.demarche = demarche;
        self.resultats_dispo = true;

        if let Some(v) = exact {
            self.exact_dispo = true;
            self.exact = v;
        } else {
            self.exact_dispo = false;
            self.exact.clear();
        }

        self.focus_entree = true;
    }
}
