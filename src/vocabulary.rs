use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;
use strsim::damerau_levenshtein;
use unicode_normalization::UnicodeNormalization;

/// Skill alias → canonical form mapping (O(1) lookup).
///
/// Canonical names are the vocabulary the extractor and the skill scorer
/// agree on; every alias resolves to exactly one canonical term.
static ALIAS_TO_CANONICAL: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let aliases: &[(&str, &[&str])] = &[
        // Languages
        ("python", &["python", "python3", "python 3", "py"]),
        ("javascript", &["javascript", "js", "java script", "ecmascript", "es6"]),
        ("typescript", &["typescript", "ts", "type script"]),
        ("java", &["java", "java8", "java11", "java17", "openjdk"]),
        ("csharp", &["c#", "c sharp", "csharp", ".net", "dotnet"]),
        ("cplusplus", &["c++", "cpp", "c plus plus"]),
        ("golang", &["go", "golang", "go lang"]),
        ("rust", &["rust", "rust lang", "rust language"]),
        ("ruby", &["ruby", "ruby on rails", "rails", "ror"]),
        ("php", &["php", "php7", "php8"]),
        ("kotlin", &["kotlin", "kotlin jvm"]),
        ("swift", &["swift", "ios swift"]),
        ("scala", &["scala", "scala lang"]),
        ("r", &["r"]),
        // Web frameworks
        ("django", &["django", "django rest framework", "drf", "django framework"]),
        ("flask", &["flask", "python flask", "flask framework"]),
        ("fastapi", &["fastapi", "fast api"]),
        ("spring", &["spring", "spring boot", "springboot", "spring framework"]),
        ("express", &["express", "express.js", "expressjs", "express js"]),
        ("react", &["react", "reactjs", "react.js", "react js"]),
        ("angular", &["angular", "angularjs", "angular.js", "angular2"]),
        ("vue", &["vue", "vue.js", "vuejs", "vue js"]),
        ("nextjs", &["next.js", "nextjs", "next js"]),
        ("laravel", &["laravel", "php laravel"]),
        // Data stores
        ("sql", &["sql", "structured query language"]),
        ("postgresql", &["postgresql", "postgres", "pg", "postgre sql"]),
        ("mysql", &["mysql", "my sql", "mariadb"]),
        ("mongodb", &["mongodb", "mongo", "mongo db"]),
        ("redis", &["redis", "redis cache"]),
        ("elasticsearch", &["elasticsearch", "elastic search"]),
        ("sqlite", &["sqlite", "sqlite3", "sql lite"]),
        ("oracle", &["oracle", "oracle db", "oracle database"]),
        // Cloud / infrastructure
        ("aws", &["aws", "amazon web services", "amazon aws", "aws cloud"]),
        ("gcp", &["gcp", "google cloud platform", "google cloud"]),
        ("azure", &["azure", "microsoft azure", "ms azure"]),
        ("docker", &["docker", "docker container", "containerization"]),
        ("kubernetes", &["kubernetes", "k8s", "kube"]),
        ("terraform", &["terraform", "infrastructure as code", "iac"]),
        ("jenkins", &["jenkins", "jenkins ci"]),
        ("git", &["git", "github", "gitlab", "version control"]),
        ("linux", &["linux", "unix", "gnu/linux"]),
        ("ansible", &["ansible", "configuration management"]),
        // Data / ML
        ("machine-learning", &["machine learning", "ml", "machine-learning"]),
        ("deep-learning", &["deep learning", "deep-learning", "neural networks"]),
        ("tensorflow", &["tensorflow", "tensor flow", "tf"]),
        ("pytorch", &["pytorch", "torch", "py torch"]),
        ("pandas", &["pandas", "python pandas"]),
        ("numpy", &["numpy", "numerical python"]),
        ("spark", &["spark", "apache spark", "pyspark"]),
        ("kafka", &["kafka", "apache kafka"]),
        ("hadoop", &["hadoop", "apache hadoop"]),
        ("nlp", &["nlp", "natural language processing"]),
        ("data-analysis", &["data analysis", "data analytics", "data-analysis"]),
        // APIs / practices
        ("rest", &["rest", "rest api", "restful", "restful api"]),
        ("graphql", &["graphql", "graph ql"]),
        ("api", &["api", "apis", "web api"]),
        ("microservices", &["microservices", "micro services", "microservice"]),
        ("ci-cd", &["ci/cd", "cicd", "continuous integration", "continuous delivery"]),
        ("agile", &["agile", "scrum", "kanban"]),
        ("tdd", &["tdd", "test driven development", "unit testing"]),
        ("html", &["html", "html5"]),
        ("css", &["css", "css3", "sass", "scss"]),
        // Soft skills
        ("communication", &["communication", "communication skills"]),
        ("leadership", &["leadership", "team lead", "team leadership"]),
        ("teamwork", &["teamwork", "team work", "collaboration"]),
        ("problem-solving", &["problem solving", "problem-solving", "analytical skills"]),
        ("project-management", &["project management", "project-management"]),
        ("mentoring", &["mentoring", "mentorship", "coaching"]),
    ];

    let mut map = HashMap::new();
    for (canonical, alias_list) in aliases {
        map.insert(*canonical, *canonical);
        for alias in *alias_list {
            map.insert(*alias, *canonical);
        }
    }
    map
});

/// Canonical terms that count as technical for the fallback scorer's
/// technical-term overlap. Soft skills are deliberately excluded.
static SOFT_SKILL_CANONICALS: &[&str] = &[
    "communication",
    "leadership",
    "teamwork",
    "problem-solving",
    "project-management",
    "mentoring",
    "agile",
];

static TECHNICAL_TERMS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    ALIAS_TO_CANONICAL
        .values()
        .copied()
        .filter(|canonical| !SOFT_SKILL_CANONICALS.contains(canonical))
        .collect()
});

/// Compact keys (separator-free, NFKC-lowered) for tolerating light
/// formatting variation in alias lookups.
static COMPACT_ALIAS_TO_CANONICAL: LazyLock<HashMap<String, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for (alias, canonical) in ALIAS_TO_CANONICAL.iter() {
        let compact = compact_key(alias);
        map.entry(compact).or_insert(*canonical);
    }
    map
});

fn nfkc_lower_trim(input: &str) -> String {
    input.nfkc().collect::<String>().trim().to_lowercase()
}

fn compact_key(input: &str) -> String {
    input
        .nfkc()
        .collect::<String>()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '-' | '_' | '/' | ','))
        .collect()
}

fn match_canonical_token(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }

    if let Some(canonical) = ALIAS_TO_CANONICAL.get(token) {
        return Some(canonical.to_string());
    }

    let compact = compact_key(token);
    if let Some(canonical) = COMPACT_ALIAS_TO_CANONICAL.get(&compact) {
        return Some((*canonical).to_string());
    }

    fuzzy_match_canonical(&compact)
}

fn split_segments(input: &str) -> impl Iterator<Item = String> + '_ {
    input
        .split(|c: char| matches!(c, '/' | ',' | ';' | '|' | '+'))
        .map(nfkc_lower_trim)
        .filter(|s| !s.is_empty())
}

fn fuzzy_match_canonical(compact: &str) -> Option<String> {
    if compact.len() < 4 {
        return None;
    }

    let mut best: Option<(&str, usize)> = None;
    for (alias, canonical) in COMPACT_ALIAS_TO_CANONICAL.iter() {
        // Short aliases and short canonical targets (go, java, sql, r) are
        // only matched via exact/alias lookups; fuzzing them produces too
        // many false positives on brief inputs.
        if alias.len() < 5 || compact.len() < 5 || canonical.len() < 5 {
            continue;
        }

        let distance = damerau_levenshtein(compact, alias);
        if distance == 0 {
            return Some((*canonical).to_string());
        }

        let len = compact.len().max(alias.len());
        let acceptable = distance == 1 || (len >= 8 && distance == 2);
        if !acceptable {
            continue;
        }

        match best {
            None => best = Some((*canonical, distance)),
            Some((_, best_dist)) if distance < best_dist => best = Some((*canonical, distance)),
            _ => {}
        }
    }

    best.map(|(canonical, _)| canonical.to_string())
}

/// Normalize a single skill string to its canonical form. Unknown skills
/// are passed through lowercased and trimmed.
pub fn normalize_skill(skill: &str) -> String {
    let normalized = nfkc_lower_trim(skill);
    if let Some(canonical) = match_canonical_token(&normalized) {
        return canonical;
    }

    for segment in split_segments(skill) {
        if let Some(canonical) = match_canonical_token(&segment) {
            return canonical;
        }
    }

    normalized
}

/// Normalize a skill list into a canonical set. Blank entries are dropped.
pub fn normalize_skill_set(skills: &[String]) -> HashSet<String> {
    skills
        .iter()
        .filter(|s| !s.trim().is_empty())
        .map(|s| normalize_skill(s))
        .collect()
}

/// All known (alias, canonical) pairs, for scanning free text.
pub fn aliases() -> impl Iterator<Item = (&'static str, &'static str)> {
    ALIAS_TO_CANONICAL.iter().map(|(a, c)| (*a, *c))
}

/// Exact alias lookup for a single token (no fuzzing, no splitting).
pub fn canonical_for(token: &str) -> Option<&'static str> {
    ALIAS_TO_CANONICAL.get(token).copied()
}

/// Whether a canonical term counts as technical (vs a soft skill).
pub fn is_technical_term(canonical: &str) -> bool {
    TECHNICAL_TERMS.contains(canonical)
}
