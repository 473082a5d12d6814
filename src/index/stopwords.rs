//! Stopword List
//!
//! Common English words excluded from indexing. The list is keyed by first
//! letter so a lookup only scans the handful of candidates sharing the
//! token's initial.
//!
//! Word list from https://kb.yoast.com/kb/list-stop-words/

const A: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at",
];
const B: &[&str] = &[
    "be", "because", "been", "before", "being", "below", "between", "both", "but", "by",
];
const C: &[&str] = &["could"];
const D: &[&str] = &["did", "do", "does", "doing", "down", "during"];
const E: &[&str] = &["each"];
const F: &[&str] = &["few", "for", "from", "further"];
const H: &[&str] = &[
    "had", "has", "have", "having", "he", "hed", "hell", "hes", "her", "here", "heres", "hers",
    "herself", "him", "himself", "his", "how", "hows",
];
const I: &[&str] = &[
    "i", "id", "ill", "ive", "im", "if", "in", "into", "is", "it", "its", "itself",
];
const L: &[&str] = &["lets"];
const M: &[&str] = &["me", "more", "most", "my", "myself"];
const N: &[&str] = &["nor"];
const O: &[&str] = &[
    "of", "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out", "over",
    "own",
];
const S: &[&str] = &["she", "shed", "shell", "shes", "should", "so", "some", "such"];
const T: &[&str] = &[
    "than", "that", "thats", "the", "their", "theirs", "them", "themselves", "then", "there",
    "theres", "these", "they", "theyd", "theyll", "theyre", "theyve", "this", "those", "through",
    "to", "too",
];
const U: &[&str] = &["under", "until", "up"];
const V: &[&str] = &["very"];
const W: &[&str] = &[
    "was", "we", "wed", "well", "were", "weve", "what", "whats", "when", "whens", "where",
    "wheres", "which", "while", "who", "whos", "whom", "why", "whys", "with", "would",
];
const Y: &[&str] = &[
    "you", "youll", "youd", "youre", "youve", "your", "yours", "yourself", "yourselves",
];

/// Whether a (stemmed) token is excluded from the index.
pub fn is_stopword(token: &str) -> bool {
    let Some(first) = token.chars().next() else {
        return false;
    };
    let bucket: &[&str] = match first {
        'a' => A,
        'b' => B,
        'c' => C,
        'd' => D,
        'e' => E,
        'f' => F,
        'h' => H,
        'i' => I,
        'l' => L,
        'm' => M,
        'n' => N,
        'o' => O,
        's' => S,
        't' => T,
        'u' => U,
        'v' => V,
        'w' => W,
        'y' => Y,
        _ => return false,
    };
    bucket.contains(&token)
}
