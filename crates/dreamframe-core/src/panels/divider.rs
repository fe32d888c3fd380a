//! Splits one narrative prompt into per-panel text fragments.
//!
//! Sentences are distributed evenly across panels in order. Panels left
//! without usable text (more panels than sentences) fall back to the whole
//! prompt tagged with a narrative phase label.

/// Fragments shorter than this are considered degenerate.
const MIN_FRAGMENT_CHARS: usize = 10;

/// Narrative phase labels keyed by total panel count (1..=4).
const PHASES: [&[&str]; 4] = [
    &["single scene"],
    &["setup", "payoff"],
    &["beginning", "middle", "ending"],
    &["beginning", "rising action", "climax", "resolution"],
];

/// Split text into sentences on `.`, `!` and `?`.
///
/// A run of terminators ends a single sentence and stays attached to it.
/// A trailing sentence without a terminator is kept. Fragments made only
/// of punctuation or whitespace are dropped.
pub fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        current.push(c);
        if is_terminator(c) && !chars.peek().copied().is_some_and(is_terminator) {
            push_sentence(&mut sentences, &current);
            current.clear();
        }
    }
    push_sentence(&mut sentences, &current);

    sentences
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if trimmed.chars().any(|c| !is_terminator(c)) {
        sentences.push(trimmed.to_string());
    }
}

/// Phase label for a panel at `index` (zero-based) of `total`.
///
/// Totals outside 1..=4 clamp to the nearest table; indices past the end
/// of the table get a generic `part N` label.
pub fn phase_label(index: usize, total: usize) -> String {
    let row = PHASES[total.clamp(1, PHASES.len()) - 1];
    match row.get(index) {
        Some(label) => (*label).to_string(),
        None => format!("part {}", index + 1),
    }
}

/// Divide `prompt` into exactly `count` non-empty panel fragments.
///
/// Deterministic: the same input always yields the same fragments.
pub fn divide(prompt: &str, count: usize) -> Vec<String> {
    let mut sentences = split_sentences(prompt);
    if sentences.is_empty() {
        sentences.push(prompt.trim().to_string());
    }
    let total = sentences.len();
    let degenerate = total < count;

    let mut fragments = Vec::with_capacity(count);
    let mut prev_end = 0;
    for i in 0..count {
        // Groups never overlap: each starts where the previous ended.
        let start = (i * total / count).max(prev_end);
        let end = ((i + 1) * total / count).max(start + 1).min(total);
        prev_end = end.max(start);

        let text = if start < end {
            sentences[start..end].join(" ")
        } else {
            String::new()
        };

        let missing = text.trim().is_empty();
        let too_short = degenerate && text.chars().count() < MIN_FRAGMENT_CHARS;
        if missing || too_short {
            let filled = format!("{} ({})", prompt.trim(), phase_label(i, count));
            fragments.push(filled.trim().to_string());
        } else {
            fragments.push(text);
        }
    }

    fragments
}
