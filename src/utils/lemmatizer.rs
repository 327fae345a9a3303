//! Portuguese lemmatizer
//!
//! Reduces an inflected word to its dictionary form:
//! 1. Exact lookup in the lexicon (base forms plus listed inflections)
//! 2. Snowball Portuguese stem, repeated until stable, mapped back to the
//!    first lexicon lemma sharing that stem
//! 3. No lexicon match → the stable stem itself
//!
//! Every lemma produced is a fixed point: `lemmatize(lemmatize(w)) ==
//! lemmatize(w)`. Normalizing already-normalized text relies on this.
//! Lexicon lemmas map to themselves, and a stable stem that misses the
//! stem index is never a lexicon key (every key's stem is indexed).

use rust_stemmers::{Algorithm, Stemmer};
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Snowball stemmer for Portuguese
static STEMMER: OnceLock<Stemmer> = OnceLock::new();

fn get_stemmer() -> &'static Stemmer {
    STEMMER.get_or_init(|| Stemmer::create(Algorithm::Portuguese))
}

/// Snowball converges in two or three passes on real words.
const MAX_STEM_PASSES: usize = 8;

/// Words known in their dictionary form.
///
/// Order matters for the stem index: when two entries share a stem, the
/// earlier one wins ("mancha" over "manchado", "murcha" over "murchar").
static BASE_FORMS: &[&str] = &[
    // Plant parts
    "folha", "caule", "raiz", "colo", "nervura", "limbo", "ramo", "vaso",
    "fibra", "maçã", "capulho", "planta", "plântula", "broto", "semente",
    "flor", "haste", "pecíolo", "face", "borda", "centro", "margem", "entrenós",
    "algodoeiro",
    // Symptoms and agents
    "mancha", "lesão", "murcha", "podridão", "desfolha", "galha", "mosaico",
    "nanismo", "crescimento", "amarelecimento", "escurecimento",
    "espessamento", "superbrotamento", "coloração", "redução", "micélio",
    "escleródio", "esporo", "pústula", "anel", "reboleira", "inseto", "praga",
    "fungo", "bactéria", "vírus", "doença", "sintoma", "patógeno", "ferrugem",
    "necrose", "clorose", "clorótico", "deformação", "enrolamento",
    "necrosamento", "tortuosidade", "míldio", "verticilium",
    // Descriptive adjectives
    "amarelo", "amarelado", "escuro", "seco", "branco", "preto", "marrom",
    "verde", "claro", "esbranquiçado", "aquoso", "necrosado", "enrolado",
    "deformado", "retorcido", "manchado", "queimado", "avermelhado", "azulado",
    "enrugado", "estrelado", "arredondado", "apodrecido", "podre", "jovem",
    "velho", "pequeno", "curto", "raquítico", "pulverulento", "progressivo",
    "angular", "circular", "concêntrico", "inferior", "superior",
    "internerval", "foliar", "úmido", "precoce", "fúngico", "bacteriano",
    "viral",
    // Verbs
    "apresentar", "murchar", "secar", "cair", "ficar", "enrolar", "amarelar",
    "aparecer", "morrer", "tombar", "crescer", "apodrecer",
    // Everyday words common in off-topic questions
    "bahia", "capital", "cachorro", "doente", "pipoca", "salgado", "idade",
    "filme", "música", "brasileiro", "notícia", "hoje", "celular", "novo",
    "computador", "rápido", "bater", "futebol", "jogar", "bola", "receita",
    "comida", "carro", "clima", "animal",
];

/// Inflected form → lemma, for forms whose stem is shared with another
/// lemma or differs from their own lemma's stem.
static INFLECTED_FORMS: &[(&str, &str)] = &[
    // Verbs
    ("apresenta", "apresentar"),
    ("apresentam", "apresentar"),
    ("apresentou", "apresentar"),
    ("murcham", "murchar"),
    ("murchou", "murchar"),
    ("murchando", "murchar"),
    ("secam", "secar"),
    ("secou", "secar"),
    ("secando", "secar"),
    ("caem", "cair"),
    ("caiu", "cair"),
    ("cai", "cair"),
    ("caindo", "cair"),
    ("ficam", "ficar"),
    ("ficou", "ficar"),
    ("enrolam", "enrolar"),
    ("enrolando", "enrolar"),
    ("amarelou", "amarelar"),
    ("amarelam", "amarelar"),
    ("amarelando", "amarelar"),
    ("aparecem", "aparecer"),
    ("apareceu", "aparecer"),
    ("morrem", "morrer"),
    ("morreu", "morrer"),
    ("morrendo", "morrer"),
    ("tombam", "tombar"),
    ("tombaram", "tombar"),
    ("tombando", "tombar"),
    ("crescendo", "crescer"),
    ("apodrecendo", "apodrecer"),
    // Adjectives (feminine / plural → masculine singular)
    ("amarela", "amarelo"),
    ("amarelas", "amarelo"),
    ("amarelos", "amarelo"),
    ("amarelada", "amarelado"),
    ("amareladas", "amarelado"),
    ("amarelados", "amarelado"),
    ("escura", "escuro"),
    ("escuras", "escuro"),
    ("escuros", "escuro"),
    ("seca", "seco"),
    ("secas", "seco"),
    ("secos", "seco"),
    ("branca", "branco"),
    ("brancas", "branco"),
    ("brancos", "branco"),
    ("esbranquiçada", "esbranquiçado"),
    ("esbranquiçadas", "esbranquiçado"),
    ("aquosa", "aquoso"),
    ("aquosas", "aquoso"),
    ("necrosada", "necrosado"),
    ("necrosadas", "necrosado"),
    ("necrosados", "necrosado"),
    ("enrolada", "enrolado"),
    ("enroladas", "enrolado"),
    ("deformada", "deformado"),
    ("deformadas", "deformado"),
    ("retorcida", "retorcido"),
    ("retorcidas", "retorcido"),
    ("manchada", "manchado"),
    ("manchadas", "manchado"),
    ("manchados", "manchado"),
    ("queimada", "queimado"),
    ("queimadas", "queimado"),
    ("avermelhada", "avermelhado"),
    ("avermelhadas", "avermelhado"),
    ("azulada", "azulado"),
    ("enrugadas", "enrugado"),
    ("estreladas", "estrelado"),
    ("arredondadas", "arredondado"),
    ("apodrecidas", "apodrecido"),
    ("podres", "podre"),
    ("marrons", "marrom"),
    ("jovens", "jovem"),
    ("úmida", "úmido"),
    ("salgada", "salgado"),
    ("brasileira", "brasileiro"),
    // Irregular plurals
    ("lesões", "lesão"),
    ("raízes", "raiz"),
    ("maçãs", "maçã"),
    ("anéis", "anel"),
    ("deformações", "deformação"),
    ("reduções", "redução"),
];

/// Lexicon + Snowball lemmatizer for Portuguese
#[derive(Debug, Clone)]
pub struct Lemmatizer {
    lexicon: FxHashMap<String, String>,
    stem_index: FxHashMap<String, String>,
}

impl Default for Lemmatizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Lemmatizer {
    pub fn new() -> Self {
        Self::with_vocabulary(std::iter::empty::<String>())
    }

    /// Lemmatizer whose lexicon also knows `extra` words as base forms
    ///
    /// Extra words are appended after the built-in tables, so they never
    /// displace a built-in entry in the stem index.
    pub fn with_vocabulary<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries: Vec<(String, String)> = BASE_FORMS
            .iter()
            .map(|word| (word.to_string(), word.to_string()))
            .chain(
                INFLECTED_FORMS
                    .iter()
                    .map(|(form, lemma)| (form.to_string(), lemma.to_string())),
            )
            .chain(extra.into_iter().map(|word| {
                let word: String = word.into();
                (word.clone(), word)
            }))
            .collect();

        let mut lexicon: FxHashMap<String, String> = entries.iter().cloned().collect();
        // Lemmas map to themselves even if also listed as a form
        for (_, lemma) in &entries {
            lexicon.insert(lemma.clone(), lemma.clone());
        }

        let mut stem_index = FxHashMap::default();
        for (form, lemma) in &entries {
            for key in [form, lemma] {
                stem_index
                    .entry(stable_stem(key))
                    .or_insert_with(|| lemma.clone());
            }
        }

        Self { lexicon, stem_index }
    }

    /// Lemmatize a single lowercased word
    pub fn lemmatize(&self, word: &str) -> String {
        if let Some(lemma) = self.lexicon.get(word) {
            return lemma.clone();
        }

        let stem = stable_stem(word);
        match self.stem_index.get(&stem) {
            Some(lemma) => lemma.clone(),
            None => stem,
        }
    }

    /// Dictionary forms the lexicon resolves to
    pub fn lexicon_lemmas(&self) -> impl Iterator<Item = &str> + '_ {
        self.lexicon
            .iter()
            .filter(|(form, lemma)| form == lemma)
            .map(|(_, lemma)| lemma.as_str())
    }
}

/// Snowball stem, re-applied until it stops changing
pub fn stable_stem(word: &str) -> String {
    let stemmer = get_stemmer();
    let mut current = word.to_string();

    for _ in 0..MAX_STEM_PASSES {
        let next = stemmer.stem(&current);
        if next == current.as_str() {
            break;
        }
        current = next.into_owned();
    }

    current
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_inflected_forms() {
        let lem = Lemmatizer::new();
        assert_eq!(lem.lemmatize("amarelas"), "amarelo");
        assert_eq!(lem.lemmatize("amareladas"), "amarelado");
        assert_eq!(lem.lemmatize("lesões"), "lesão");
        assert_eq!(lem.lemmatize("raízes"), "raiz");
        assert_eq!(lem.lemmatize("jovens"), "jovem");
        assert_eq!(lem.lemmatize("apresentam"), "apresentar");
        assert_eq!(lem.lemmatize("secando"), "secar");
        assert_eq!(lem.lemmatize("tombando"), "tombar");
    }

    #[test]
    fn test_base_forms_untouched() {
        let lem = Lemmatizer::new();
        for word in ["folha", "colo", "vírus", "clorótico", "necrose", "marrom", "capital"] {
            assert_eq!(lem.lemmatize(word), word);
        }
    }

    #[test]
    fn test_unlisted_inflections_recover_lemma() {
        let lem = Lemmatizer::new();
        assert_eq!(lem.lemmatize("folhas"), "folha");
        assert_eq!(lem.lemmatize("manchas"), "mancha");
        assert_eq!(lem.lemmatize("plantas"), "planta");
        assert_eq!(lem.lemmatize("nervuras"), "nervura");
        assert_eq!(lem.lemmatize("plântulas"), "plântula");
        assert_eq!(lem.lemmatize("apresentas"), "apresentar");
    }

    #[test]
    fn test_unknown_words_fall_back_to_stable_stem() {
        let lem = Lemmatizer::new();
        let lemma = lem.lemmatize("comandos");
        assert_eq!(lemma, stable_stem("comandos"));
        assert!("comandos".starts_with(&lemma));
        assert_eq!(lem.lemmatize(&lemma), lemma);
    }

    #[test]
    fn test_stable_stem_is_stable() {
        for word in ["comandos", "tortuosidades", "necrosamentos", "brasileira", "aquosas", "micélio"] {
            let stem = stable_stem(word);
            assert_eq!(stable_stem(&stem), stem, "stem of '{}' still changes", word);
        }
    }

    #[test]
    fn test_extra_vocabulary() {
        let lem = Lemmatizer::with_vocabulary(["amarelão"]);
        assert_eq!(lem.lemmatize("amarelão"), "amarelão");
        assert_eq!(lem.lemmatize("amarelas"), "amarelo");
        assert!(lem.lexicon_lemmas().any(|lemma| lemma == "amarelão"));
        assert!(!Lemmatizer::new().lexicon_lemmas().any(|lemma| lemma == "amarelão"));
    }

    #[test]
    fn test_lexicon_has_no_chains() {
        let lemmas: HashSet<&str> = BASE_FORMS
            .iter()
            .copied()
            .chain(INFLECTED_FORMS.iter().map(|(_, lemma)| *lemma))
            .collect();
        let mut forms = HashSet::new();

        for (form, lemma) in INFLECTED_FORMS {
            assert_ne!(form, lemma);
            assert!(!lemmas.contains(form), "'{}' is both a form and a lemma", form);
            assert!(forms.insert(*form), "'{}' listed twice", form);
        }
    }

    #[test]
    fn test_lemmas_are_fixed_points() {
        let lem = Lemmatizer::new();
        let mut words: Vec<&str> = BASE_FORMS.to_vec();
        words.extend(INFLECTED_FORMS.iter().flat_map(|(a, b)| [*a, *b]));
        words.extend([
            "folhas", "lesões", "angulares", "secando", "vegetais", "papéis",
            "anzóis", "visíveis", "jovens", "raízes", "plântulas", "esporos",
            "comandos", "comando", "apresentas", "andos", "tortuosidades",
            "necrosamentos", "cloróticos", "cloróticas", "folhagens", "amarelão",
            "pulverulentas", "quilométricas", "capitais", "bahias",
        ]);

        for word in words {
            let once = lem.lemmatize(word);
            let twice = lem.lemmatize(&once);
            assert_eq!(once, twice, "lemma of '{}' is not stable", word);
        }
    }
}
