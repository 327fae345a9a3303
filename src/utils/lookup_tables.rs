//! Static Lookup Tables
//!
//! Hand-curated Portuguese vocabulary used by the normalizer and the
//! relevance gate. Everything here is read-only and compiled in.
//!
//! Tables:
//! - TECHNICAL_TERMS: surface spelling → canonical technical term
//! - STOPWORDS: Portuguese function words dropped during normalization
//! - NUMBER_WORDS: spelled-out numerals treated like digits
//! - AGRONOMIC_FRAGMENTS / OFF_DOMAIN_FRAGMENTS: substring indicators
//! - OFF_DOMAIN_PHRASES: negative examples for the relevance model

// ============================================================================
// Term Canonicalization
// ============================================================================

/// Surface term → canonical technical term.
///
/// Matched against the lowercased token text before stopword filtering and
/// lemmatization, so a listed term always survives normalization unchanged.
pub static TECHNICAL_TERMS: &[(&str, &str)] = &[
    ("clorose", "clorose"),
    ("clorótico", "clorose"),
    ("deformação", "deformação"),
    ("enrolamento", "enrolamento"),
    ("necrosamento", "necrose"),
    ("tortuosidade", "deformação"),
    ("míldio", "míldio"),
    ("verticilium", "verticilium"),
];

// ============================================================================
// Stopwords
// ============================================================================

pub static STOPWORDS: &[&str] = &[
    "a", "à", "às", "acerca", "ademais", "adeus", "agora", "ainda", "algo",
    "algumas", "alguns", "ali", "além", "ambas", "ambos", "antes", "ao", "aos",
    "apenas", "apoia", "apoio", "após", "aquela", "aquelas", "aquele",
    "aqueles", "aqui", "aquilo", "as", "assim", "através", "atrás", "até", "aí",
    "baixo", "bastante", "bem", "boa", "bom", "breve", "cada", "catorze",
    "cedo", "cento", "certamente", "certeza", "cima", "coisa", "com", "como",
    "contra", "contudo", "cuja", "cujo", "cá", "da", "daquela", "daquele",
    "dar", "das", "de", "debaixo", "demais", "dentro", "depois", "desde",
    "dessa", "desse", "desta", "deste", "deve", "devem", "deverá", "diante",
    "disso", "diz", "dizem", "dizer", "do", "dos", "dá", "dão", "e", "é", "és",
    "ela", "elas", "ele", "eles", "em", "embora", "enquanto", "entre", "então",
    "era", "essa", "essas", "esse", "esses", "esta", "estar", "estará",
    "estas", "estava", "este", "estes", "esteve", "estive", "estivemos",
    "estiveram", "estou", "está", "estás", "estão", "eu", "exemplo", "falta",
    "fará", "favor", "faz", "fazem", "fazemos", "fazer", "fazes", "fazia",
    "faço", "fez", "fim", "final", "foi", "fomos", "for", "fora", "foram",
    "forma", "foste", "fui", "geral", "grande", "grandes", "inclusive", "ir",
    "irá", "isso", "isto", "já", "lado", "lhe", "local", "logo", "longe",
    "lugar", "lá", "maior", "maioria", "mais", "mal", "mas", "me", "meio",
    "menor", "menos", "mesmo", "meu", "meus", "minha", "minhas", "momento",
    "muito", "muitos", "máximo", "na", "nada", "naquela", "naquele", "nas",
    "nem", "nenhuma", "nessa", "nesse", "nesta", "neste", "no", "nos", "nossa",
    "nossas", "nosso", "nossos", "num", "numa", "nunca", "nuns", "não", "nós",
    "o", "onde", "ontem", "ora", "os", "ou", "outra", "outras", "outro",
    "outros", "para", "parece", "parte", "pela", "pelas", "pelo", "pelos",
    "perto", "pode", "podem", "poder", "poderá", "podia", "pois", "por",
    "porque", "porquê", "portanto", "porém", "posso", "pouca", "pouco",
    "próprio", "próxima", "próximo", "pôde", "quais", "qual", "qualquer",
    "quando", "quanto", "que", "quem", "quer", "querem", "quero", "quê",
    "sabe", "saber", "se", "sei", "sem", "sempre", "ser", "seria", "seu",
    "seus", "sim", "sob", "sobre", "somente", "somos", "sou", "sua", "suas",
    "são", "só", "tais", "tal", "talvez", "também", "tanta", "tanto", "tarde",
    "te", "tem", "temos", "tempo", "tenho", "tens", "ter", "teu", "teus",
    "teve", "tipo", "tive", "tivemos", "tiveram", "toda", "todas", "todo",
    "todos", "tu", "tua", "tuas", "tudo", "tão", "têm", "um", "uma", "umas",
    "uns", "usa", "usar", "vai", "vais", "veja", "vem", "ver", "vez", "vezes",
    "você", "vocês", "vos", "vão", "vêm", "vós",
];

// ============================================================================
// Numerals
// ============================================================================

/// Spelled-out numerals. Tokens in this list count as numbers and are dropped.
pub static NUMBER_WORDS: &[&str] = &[
    "zero", "um", "dois", "duas", "três", "tres", "quatro", "cinco", "seis",
    "sete", "oito", "nove", "dez", "onze", "doze", "dúzia", "dúzias", "treze",
    "catorze", "quatorze", "quinze", "dezesseis", "dezasseis", "dezessete",
    "dezassete", "dezoito", "dezenove", "dezanove", "vinte", "trinta",
    "quarenta", "cinquenta", "sessenta", "setenta", "oitenta", "noventa",
    "cem", "cento", "duzentos", "trezentos", "quatrocentos", "quinhentos",
    "seiscentos", "setecentos", "oitocentos", "novecentos", "mil", "milhão",
    "milhões", "bilhão", "bilhões",
];

// ============================================================================
// Relevance Keyword Fragments
// ============================================================================

/// Substring fragments indicating an agronomic complaint.
///
/// Fragments are matched by containment against normalized tokens, so
/// stems such as "amarel" or "murch" cover every inflection.
pub static AGRONOMIC_FRAGMENTS: &[&str] = &[
    "folha", "mancha", "fungo", "bactéria", "vírus", "praga", "inseto",
    "descolor", "amarel", "murch", "sec", "podr", "lesão", "crescimento",
    "algodoeiro", "planta", "cultivo", "raiz", "caule", "sintoma",
    "doença", "infect", "patógeno", "necrose", "clorose", "enrug", "desfolha",
    "deformação", "tortuosidade", "enrolamento", "distorção", "clorótico",
    "amarelecimento", "necrosamento", "míldio", "ferrugem", "verticilium",
    "tombamento", "angular", "aquoso", "nervura", "esporo", "plântula",
    "colo", "internerval", "esbranquiçado", "viral", "fúngico", "bacteriano",
];

/// Substring fragments indicating off-domain chatter.
pub static OFF_DOMAIN_FRAGMENTS: &[&str] = &[
    "futebol", "jogar", "bola", "filme", "música", "receita", "comida",
    "carro", "celular", "computador", "notícia", "clima", "tempo", "animal",
];

/// Negative training examples for the relevance model.
///
/// Kept raw (not normalized) to match how the model was originally fitted.
pub static OFF_DOMAIN_PHRASES: &[&str] = &[
    "qual é a capital da bahia",
    "vou te bater",
    "quanto é 2 + 2",
    "como está o tempo",
    "meu cachorro está doente",
    "pipoca salgada",
    "qual sua idade",
    "filme bom",
    "música brasileira",
    "notícias de hoje",
    "celular novo",
    "computador rápido",
];
