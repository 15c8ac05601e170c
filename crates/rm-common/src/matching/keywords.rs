use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Standard English stop-word list.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// Words that show up in nearly every posting and carry no signal for ranking.
const RESUME_NOISE_WORDS: &[&str] = &[
    "experience",
    "years",
    "skills",
    "education",
    "work",
    "job",
    "position",
];

/// Minimum keyword length (in chars) kept by [`extract_keywords`].
pub const MIN_KEYWORD_CHARS: usize = 3;

static DEFAULT_STOP_WORDS: Lazy<StopWords> = Lazy::new(|| {
    StopWords::from_words(ENGLISH_STOP_WORDS.iter().chain(RESUME_NOISE_WORDS))
});

/// Lower-cased stop-word set. Built once and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// English stop words plus the resume noise words.
    pub fn english() -> &'static StopWords {
        &DEFAULT_STOP_WORDS
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Copy of `self` extended with extra words.
    pub fn with_extra<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = self.words.clone();
        words.extend(
            extra
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty()),
        );
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Contractions split off the end of a word, Treebank style: `team's` -> `team`, `'s`.
const CLITICS: &[&str] = &["n't", "'ll", "'re", "'ve", "'s", "'m", "'d"];

/// Lower-cases `text` and splits it into word tokens.
///
/// Whitespace and punctuation separate tokens. An apostrophe or hyphen between two
/// alphanumeric chars stays inside the token (`full-time`, `o'neil`), except that a trailing
/// clitic (`'s`, `n't`, `'ll`, ...) becomes its own token and leaves the stem intact.
/// Curly apostrophes are read as `'`.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase().replace('’', "'");
    let chars: Vec<char> = lowered.chars().collect();
    let mut tokens = Vec::new();
    let mut current = String::new();

    for (idx, &ch) in chars.iter().enumerate() {
        if ch.is_alphanumeric() {
            current.push(ch);
            continue;
        }

        let joins_word = matches!(ch, '\'' | '-')
            && !current.is_empty()
            && chars.get(idx + 1).is_some_and(|next| next.is_alphanumeric());
        if joins_word {
            current.push(ch);
        } else if !current.is_empty() {
            push_token(&mut tokens, std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        push_token(&mut tokens, current);
    }

    tokens
}

fn push_token(tokens: &mut Vec<String>, mut token: String) {
    let clitic = CLITICS
        .iter()
        .find(|clitic| token.len() > clitic.len() && token.ends_with(*clitic));
    match clitic {
        Some(clitic) => {
            let suffix = token.split_off(token.len() - clitic.len());
            tokens.push(token);
            tokens.push(suffix);
        }
        None => tokens.push(token),
    }
}

/// Most salient keywords of a job description, most frequent first.
///
/// Keeps purely alphabetic tokens of at least [`MIN_KEYWORD_CHARS`] chars that are not stop
/// words, and returns at most `limit` of them. Equal counts keep first-seen order.
pub fn extract_keywords(job_description: &str, stop_words: &StopWords, limit: usize) -> Vec<String> {
    // token -> (count, first position)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();

    for token in tokenize(job_description) {
        if !is_keyword_candidate(&token, stop_words) {
            continue;
        }
        let next_position = counts.len();
        counts.entry(token).or_insert((0, next_position)).0 += 1;
    }

    let mut ranked: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(token, (count, first))| (token, count, first))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    ranked.truncate(limit);

    ranked.into_iter().map(|(token, _, _)| token).collect()
}

fn is_keyword_candidate(token: &str, stop_words: &StopWords) -> bool {
    token.chars().all(char::is_alphabetic)
        && token.chars().count() >= MIN_KEYWORD_CHARS
        && !stop_words.contains(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_strips_punctuation() {
        assert_eq!(
            tokenize("Python, SQL. (Docker)/Kubernetes!"),
            vec!["python", "sql", "docker", "kubernetes"]
        );
        assert_eq!(tokenize("full-time C# dev's"), vec!["full-time", "c", "dev", "'s"]);
        assert!(tokenize("  ... ,,, ").is_empty());
    }

    #[test]
    fn tokenize_splits_clitics_off_the_stem() {
        assert_eq!(tokenize("team's"), vec!["team", "'s"]);
        assert_eq!(tokenize("don't"), vec!["do", "n't"]);
        assert_eq!(tokenize("We’ll ship"), vec!["we", "'ll", "ship"]);
        assert_eq!(tokenize("O'Neil"), vec!["o'neil"]);
    }

    #[test]
    fn possessive_keeps_the_stem_as_keyword() {
        let keywords = extract_keywords("The team's platform uses Kafka", StopWords::english(), 20);
        assert_eq!(keywords, vec!["team", "platform", "uses", "kafka"]);
    }

    #[test]
    fn extracts_frequent_non_stopword_tokens() {
        let keywords = extract_keywords(
            "We need Rust. Rust and Kafka experience; Kafka, Rust, AWS.",
            StopWords::english(),
            20,
        );
        assert_eq!(keywords, vec!["rust", "kafka", "need", "aws"]);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let keywords = extract_keywords("zebra apple mango apple zebra mango", StopWords::english(), 20);
        assert_eq!(keywords, vec!["zebra", "apple", "mango"]);
    }

    #[test]
    fn drops_short_numeric_and_noise_tokens() {
        let keywords = extract_keywords(
            "5 years experience in Go, JS and C++ 2024 skills education position python3",
            StopWords::english(),
            20,
        );
        assert!(keywords.is_empty());
    }

    #[test]
    fn respects_limit() {
        let text = "alpha beta gamma delta epsilon zeta theta iota kappa lambda omicron sigma \
                    upsilon omega xenon argon helium neon radon krypton boron carbon omega";
        let keywords = extract_keywords(text, StopWords::english(), 20);
        assert_eq!(keywords.len(), 20);
        assert_eq!(keywords[0], "omega");
        assert_eq!(keywords[1], "alpha");
        assert!(!keywords.contains(&"carbon".to_string()));
    }

    #[test]
    fn empty_or_stopword_text_yields_nothing() {
        assert!(extract_keywords("", StopWords::english(), 20).is_empty());
        assert!(extract_keywords("the and of with years", StopWords::english(), 20).is_empty());
    }

    #[test]
    fn custom_stop_words_extend_defaults() {
        let stop = StopWords::english().with_extra(["Python"]);
        assert!(stop.contains("python"));
        assert!(stop.contains("experience"));
        let keywords = extract_keywords("python golang python", &stop, 20);
        assert_eq!(keywords, vec!["golang"]);
    }
}
