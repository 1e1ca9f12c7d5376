// src/lexicon.rs
//! Lexicon store: ESG category keyword tables, sentiment word sets and the
//! negative-indicator phrase list used by the snippet miner.
//!
//! The lexicon is built once per process (built-in tables or `config/lexicon.toml`)
//! and only ever read afterwards.

use once_cell::sync::OnceCell;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

// --- env defaults & names ---
pub const DEFAULT_LEXICON_PATH: &str = "config/lexicon.toml";
pub const ENV_LEXICON_PATH: &str = "ESG_LEXICON_PATH";

/// Weight applied to keywords without an explicit entry in the weight table.
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 1.0;
pub const MAX_KEYWORD_WEIGHT: f64 = 1.5;

/// The three fixed analysis categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Environmental,
    Social,
    Governance,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Environmental,
        Category::Social,
        Category::Governance,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Environmental => "environmental",
            Category::Social => "social",
            Category::Governance => "governance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/* ----------------------------
Built-in tables
---------------------------- */

const ENVIRONMENTAL_KEYWORDS: &[&str] = &[
    "climate",
    "carbon",
    "emissions",
    "renewable",
    "energy",
    "waste",
    "recycling",
    "sustainability",
    "environmental",
    "green",
    "pollution",
    "conservation",
    "biodiversity",
    "water",
    "footprint",
];

const SOCIAL_KEYWORDS: &[&str] = &[
    "diversity",
    "inclusion",
    "employee",
    "community",
    "health",
    "safety",
    "human rights",
    "labor",
    "training",
    "development",
    "equality",
    "workplace",
    "social responsibility",
    "stakeholder",
    "engagement",
];

const GOVERNANCE_KEYWORDS: &[&str] = &[
    "board",
    "compliance",
    "transparency",
    "ethics",
    "risk",
    "management",
    "accountability",
    "shareholder",
    "audit",
    "compensation",
    "disclosure",
    "policy",
    "regulation",
    "corruption",
    "governance",
];

// Only the stronger signals are listed; everything else weighs DEFAULT_KEYWORD_WEIGHT.
const ENVIRONMENTAL_WEIGHTS: &[(&str, f64)] = &[
    ("climate", 1.3),
    ("carbon", 1.5),
    ("emissions", 1.5),
    ("renewable", 1.4),
    ("sustainability", 1.2),
    ("pollution", 1.3),
    ("biodiversity", 1.2),
    ("footprint", 1.1),
];

const SOCIAL_WEIGHTS: &[(&str, f64)] = &[
    ("diversity", 1.3),
    ("inclusion", 1.3),
    ("human rights", 1.5),
    ("safety", 1.2),
    ("labor", 1.2),
    ("equality", 1.2),
    ("training", 1.1),
    ("social responsibility", 1.4),
];

const GOVERNANCE_WEIGHTS: &[(&str, f64)] = &[
    ("board", 1.2),
    ("compliance", 1.4),
    ("transparency", 1.3),
    ("ethics", 1.3),
    ("audit", 1.2),
    ("disclosure", 1.2),
    ("corruption", 1.5),
    ("governance", 1.4),
];

const POSITIVE_WORDS: &[&str] = &[
    "commitment", "excellence", "strong", "improve", "increase", "achieve",
    "innovation", "transparency", "accountability", "sustainability",
    "renewable", "diversity", "inclusion", "engagement", "development",
    "training", "safety", "rights", "equality", "fairness", "justice",
    "award", "recognition", "certification", "standard", "benchmark",
    "goal", "objective", "strategy", "initiative", "program", "project",
    "investment", "funding", "saving", "efficiency", "performance",
    "metric", "kpi", "indicator", "measure", "assessment", "audit",
    "review", "evaluation", "analysis", "report", "disclosure",
    "communication", "stakeholder", "shareholder", "investor", "customer",
    "employee", "supplier", "partner", "community", "society",
    "leadership", "team", "organization", "company", "corporation",
    "enterprise", "business", "industry", "sector", "market", "economy",
    "global", "local", "regional", "national", "international",
    "worldwide", "world", "planet", "earth", "future", "present",
    "legacy", "heritage", "tradition", "culture", "value", "principle",
    "belief", "mission", "vision", "purpose", "success", "growth",
    "progress", "advancement", "enhancement", "optimization", "maximization",
    "minimization", "reduction", "elimination", "prevention", "protection",
    "conservation", "preservation", "restoration", "rehabilitation",
    "empowerment", "enablement", "facilitation", "support", "assistance",
    "collaboration", "cooperation", "partnership", "alliance", "network",
    "integration", "coordination", "alignment", "harmonization", "unification",
];

const NEGATIVE_WORDS: &[&str] = &[
    "failure", "decline", "decrease", "violation", "penalty", "fine",
    "corruption", "fraud", "misconduct", "non-compliance", "breach",
    "negligence", "irresponsibility", "unethical", "unlawful", "illegal",
    "harmful", "damaging", "destructive", "polluting", "contaminating",
    "wasting", "inefficient", "ineffective", "inadequate", "insufficient",
    "deficient", "weak", "poor", "bad", "negative", "problematic",
    "concerning", "worrisome", "troubling", "alarming", "disturbing",
    "disappointing", "unsatisfactory", "substandard", "below", "under",
    "lack", "absence", "missing", "omitted", "ignored", "overlooked",
    "neglected", "abandoned", "discarded", "rejected", "denied",
    "refused", "blocked", "prevented", "hindered", "obstructed",
    "impeded", "delayed", "postponed", "cancelled", "terminated",
    "discontinued", "suspended", "banned", "prohibited", "restricted",
    "limited", "constrained", "reduced", "cut", "slashed", "eliminated",
    "removed", "withdrawn", "retracted", "recalled", "recanted",
];

const INTENSIFIERS: &[&str] = &[
    "very", "extremely", "highly", "significantly", "substantially",
    "considerably", "greatly", "massively", "enormously", "tremendously",
    "exceptionally", "outstandingly", "remarkably", "notably", "particularly",
    "especially", "specifically", "exclusively", "completely", "totally",
    "absolutely", "entirely", "thoroughly", "comprehensively", "extensively",
    "intensively", "aggressively", "proactively", "actively", "dynamically",
    "vigorously", "energetically", "enthusiastically", "passionately",
    "dedicatedly", "committedly", "devotedly", "loyally", "faithfully",
    "reliably", "consistently", "steadily", "continuously", "persistently",
    "determinedly", "resolutely", "firmly", "strongly", "robustly",
    "solidly", "securely", "safely", "confidently", "assuredly",
];

// Snippet mining runs on raw substrings, so very short stems ("ban", "fine", "cut")
// are spelled out to keep them from firing inside unrelated words.
const NEGATIVE_INDICATORS: &[&str] = &[
    "failure", "failed", "fails to", "violation", "violated", "penalty",
    "penalties", "fined", "fines", "lawsuit", "litigation", "sued",
    "settlement", "corruption", "bribery", "bribe", "fraud", "misconduct",
    "non-compliance", "noncompliance", "breach", "data leak", "negligence",
    "negligent", "unethical", "unlawful", "illegal", "harmful", "damaging",
    "destructive", "polluting", "contamination", "contaminated", "toxic",
    "spill", "hazardous", "deforestation", "scandal", "controversy",
    "investigation", "probe", "indictment", "sanction", "recall",
    "accident", "fatality", "fatalities", "injury", "injuries", "explosion",
    "protest", "boycott", "discrimination", "harassment", "abuse",
    "child labor", "forced labor", "exploitation", "unsafe", "layoffs",
    "wage theft", "underpaid", "inequality", "misreporting", "misstatement",
    "restatement", "greenwashing", "whistleblower", "conflict of interest",
    "insider trading", "money laundering", "embezzlement", "mismanagement",
    "lack of transparency", "undisclosed", "concealed", "cover-up",
    "misleading", "deceptive", "inadequate", "insufficient", "deficient",
    "weak", "poor", "decline", "decrease", "worsened", "deterioration",
    "shortfall", "missed", "downgrade", "liability", "liabilities",
    "problematic", "concerning", "alarming", "troubling", "disappointing",
    "unsatisfactory", "substandard", "neglected", "ignored", "overlooked",
    "abandoned", "suspended", "banned", "prohibited", "revoked", "rejected",
    "halted", "shut down", "bankruptcy", "insolvency", "losses", "deficit",
    "crisis", "disaster", "catastrophe", "damage", "extinction",
    "endangered", "depletion", "illegal dumping", "overfishing", "poaching",
];

/* ----------------------------
Config schema (from TOML)
---------------------------- */

/// Raw, uncompiled lexicon tables. Mirrors the layout of `config/lexicon.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct LexiconConfig {
    pub categories: CategoriesCfg,
    pub sentiment: SentimentCfg,
    pub snippets: SnippetsCfg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesCfg {
    pub environmental: CategoryCfg,
    pub social: CategoryCfg,
    pub governance: CategoryCfg,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryCfg {
    pub keywords: Vec<String>,
    #[serde(default)]
    pub weights: HashMap<String, f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentCfg {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
    #[serde(default)]
    pub intensifiers: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SnippetsCfg {
    pub negative_indicators: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

fn category_cfg(keywords: &[&str], weights: &[(&str, f64)]) -> CategoryCfg {
    CategoryCfg {
        keywords: owned(keywords),
        weights: weights.iter().map(|(k, w)| (k.to_string(), *w)).collect(),
    }
}

impl LexiconConfig {
    /// The tables shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            categories: CategoriesCfg {
                environmental: category_cfg(ENVIRONMENTAL_KEYWORDS, ENVIRONMENTAL_WEIGHTS),
                social: category_cfg(SOCIAL_KEYWORDS, SOCIAL_WEIGHTS),
                governance: category_cfg(GOVERNANCE_KEYWORDS, GOVERNANCE_WEIGHTS),
            },
            sentiment: SentimentCfg {
                positive: owned(POSITIVE_WORDS),
                negative: owned(NEGATIVE_WORDS),
                intensifiers: owned(INTENSIFIERS),
            },
            snippets: SnippetsCfg {
                negative_indicators: owned(NEGATIVE_INDICATORS),
            },
        }
    }
}

/* ----------------------------
Compiled lexicon
---------------------------- */

/// A category keyword with its weight and a literal (escaped) match pattern.
#[derive(Debug)]
pub struct Keyword {
    pub term: String,
    pub weight: f64,
    pattern: Regex,
}

impl Keyword {
    /// Non-overlapping literal occurrences in already lower-cased text.
    pub fn count_in(&self, lowered: &str) -> usize {
        self.pattern.find_iter(lowered).count()
    }

    pub fn is_in(&self, lowered: &str) -> bool {
        self.pattern.is_match(lowered)
    }
}

#[derive(Debug)]
pub struct Lexicon {
    environmental: Vec<Keyword>,
    social: Vec<Keyword>,
    governance: Vec<Keyword>,
    positive: HashSet<String>,
    negative: HashSet<String>,
    intensifiers: HashSet<String>,
    negative_indicators: Vec<String>,
    indicator_re: Regex,
}

impl Lexicon {
    /// Compile the built-in tables.
    pub fn builtin() -> Self {
        Self::from_config(LexiconConfig::builtin()).expect("built-in lexicon is valid")
    }

    /// Load from a TOML string.
    pub fn from_toml_str(toml_str: &str) -> anyhow::Result<Self> {
        let cfg: LexiconConfig = toml::from_str(toml_str)?;
        Self::from_config(cfg)
    }

    /// Validate and compile raw tables.
    pub fn from_config(cfg: LexiconConfig) -> anyhow::Result<Self> {
        let cats = &cfg.categories;
        let environmental = compile_category(Category::Environmental, &cats.environmental)?;
        let social = compile_category(Category::Social, &cats.social)?;
        let governance = compile_category(Category::Governance, &cats.governance)?;

        let indicators: Vec<String> = cfg
            .snippets
            .negative_indicators
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if indicators.is_empty() {
            anyhow::bail!("snippets.negative_indicators must not be empty");
        }
        let alternation = indicators
            .iter()
            .map(|s| regex::escape(s))
            .collect::<Vec<_>>()
            .join("|");
        let indicator_re = Regex::new(&alternation)
            .map_err(|e| anyhow::anyhow!("negative indicator regex error: {}", e))?;

        Ok(Self {
            environmental,
            social,
            governance,
            positive: word_set(&cfg.sentiment.positive),
            negative: word_set(&cfg.sentiment.negative),
            intensifiers: word_set(&cfg.sentiment.intensifiers),
            negative_indicators: indicators,
            indicator_re,
        })
    }

    /// Load from `ESG_LEXICON_PATH` (or `config/lexicon.toml`).
    ///
    /// A missing default file falls back to the built-in tables; a missing file named
    /// explicitly through the env var is an error.
    pub fn from_env() -> anyhow::Result<Self> {
        let explicit = std::env::var(ENV_LEXICON_PATH).ok().map(PathBuf::from);
        let path = explicit
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LEXICON_PATH));

        match fs::read_to_string(&path) {
            Ok(content) => {
                let lex = Self::from_toml_str(&content).map_err(|e| {
                    anyhow::anyhow!("Invalid lexicon config at {}: {}", path.display(), e)
                })?;
                info!(path = %path.display(), "lexicon loaded from file");
                Ok(lex)
            }
            Err(e) if explicit.is_some() => Err(anyhow::anyhow!(
                "Failed to read lexicon config at {}: {}",
                path.display(),
                e
            )),
            Err(_) => Ok(Self::builtin()),
        }
    }

    pub fn keywords(&self, category: Category) -> &[Keyword] {
        match category {
            Category::Environmental => &self.environmental,
            Category::Social => &self.social,
            Category::Governance => &self.governance,
        }
    }

    pub fn is_positive(&self, word: &str) -> bool {
        self.positive.contains(word)
    }

    pub fn is_negative(&self, word: &str) -> bool {
        self.negative.contains(word)
    }

    pub fn is_intensifier(&self, word: &str) -> bool {
        self.intensifiers.contains(word)
    }

    pub fn negative_word_count(&self) -> usize {
        self.negative.len()
    }

    pub fn negative_indicators(&self) -> &[String] {
        &self.negative_indicators
    }

    /// True if the lower-cased text contains any negative-indicator phrase.
    pub fn has_negative_indicator(&self, lowered: &str) -> bool {
        self.indicator_re.is_match(lowered)
    }
}

fn word_set(words: &[String]) -> HashSet<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

fn compile_category(category: Category, cfg: &CategoryCfg) -> anyhow::Result<Vec<Keyword>> {
    if cfg.keywords.is_empty() {
        anyhow::bail!("category `{}` has no keywords", category);
    }

    for (term, w) in &cfg.weights {
        if !(*w > DEFAULT_KEYWORD_WEIGHT && *w <= MAX_KEYWORD_WEIGHT) {
            anyhow::bail!(
                "category `{}` keyword `{}` weight {} outside (1.0, 1.5]",
                category,
                term,
                w
            );
        }
    }

    cfg.keywords
        .iter()
        .map(|raw| {
            let term = raw.trim().to_lowercase();
            if term.is_empty() {
                anyhow::bail!("category `{}` contains an empty keyword", category);
            }
            let weight = cfg
                .weights
                .get(raw)
                .or_else(|| cfg.weights.get(&term))
                .copied()
                .unwrap_or(DEFAULT_KEYWORD_WEIGHT);
            let pattern = Regex::new(&regex::escape(&term))
                .map_err(|e| anyhow::anyhow!("keyword `{}` regex error: {}", term, e))?;
            Ok(Keyword {
                term,
                weight,
                pattern,
            })
        })
        .collect()
}

/* ----------------------------
Process-wide instance
---------------------------- */

static GLOBAL: OnceCell<Lexicon> = OnceCell::new();

/// The process-wide lexicon. Falls back to the built-in tables when nothing was
/// installed at startup.
pub fn global() -> &'static Lexicon {
    GLOBAL.get_or_init(Lexicon::builtin)
}

/// Install the process-wide lexicon once. Later calls keep the first instance.
pub fn install_global(lexicon: Lexicon) -> &'static Lexicon {
    if GLOBAL.set(lexicon).is_err() {
        warn!("lexicon already initialised; keeping the existing instance");
    }
    global()
}
