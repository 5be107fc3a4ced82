//! Radar document parser
//!
//! Radar documents are a small markdown dialect:
//!
//! ```text
//! # Observere
//! - Go [Lang] (1) - Statically typed language
//! - Rust
//!
//! # Bruke
//! - React [FW] (1)
//! ```
//!
//! Parsing is best-effort and never fails: lines that match no known shape
//! are skipped, unknown headers leave the current phase unchanged, and items
//! listed before the first recognised header are dropped.

use std::iter;

use super::{Category, MaturityScore, Phase, PhaseHeaders, RadarDocument, TechItem};

/// Parses a radar document using the default (Norwegian) phase headers
pub fn parse(text: &str) -> RadarDocument {
    parse_with(text, &PhaseHeaders::default())
}

/// Parses a radar document with custom phase headers
pub fn parse_with(text: &str, headers: &PhaseHeaders) -> RadarDocument {
    let mut document = RadarDocument::new();
    let mut current: Option<Phase> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(header) = trimmed.strip_prefix('#') {
            if let Some(phase) = headers.phase_for(header.trim()) {
                current = Some(phase);
            }
            continue;
        }

        let (Some(phase), Some(entry)) = (current, trimmed.strip_prefix('-')) else {
            continue;
        };

        if let Some(item) = parse_entry(entry, phase) {
            document.push(item);
        }
    }

    document
}

/// Parses the text after a list marker: `Name [Category] (Score) - Description`
///
/// Returns `None` only when nothing but whitespace remains.
pub fn parse_entry(entry: &str, phase: Phase) -> Option<TechItem> {
    let entry = entry.trim();
    if entry.is_empty() {
        return None;
    }

    // The name is the shortest non-empty prefix whose remainder is a valid tail.
    // An empty remainder always is, so the loop always returns.
    let splits = entry
        .char_indices()
        .skip(1)
        .map(|(i, _)| i)
        .chain(iter::once(entry.len()));

    for split in splits {
        let Some(tail) = EntryTail::parse(&entry[split..]) else {
            continue;
        };

        let mut item = TechItem::new(entry[..split].trim(), phase);
        item.category = tail.category.and_then(|c| c.parse::<Category>().ok());
        item.maturity = tail
            .score
            .map(|digits| digits.parse::<u32>().map_or(MaturityScore::MAX, MaturityScore::clamped));
        item.description = tail
            .description
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        return Some(item);
    }

    None
}

/// Optional groups following an item name
#[derive(Debug, Default, PartialEq)]
struct EntryTail<'a> {
    category: Option<&'a str>,
    score: Option<&'a str>,
    description: Option<&'a str>,
}

impl<'a> EntryTail<'a> {
    /// Matches `\s*(\[[^\]]+\])?\s*(\(\d+\)(\s*-\s*.*)?)?` against the whole input
    fn parse(tail: &'a str) -> Option<Self> {
        let mut parsed = EntryTail::default();
        let mut rest = tail.trim_start();

        if let Some(after) = rest.strip_prefix('[') {
            let close = after.find(']')?;
            if close == 0 {
                return None;
            }
            parsed.category = Some(after[..close].trim());
            rest = after[close + 1..].trim_start();
        }

        if rest.is_empty() {
            return Some(parsed);
        }

        let after = rest.strip_prefix('(')?;
        let close = after.find(')')?;
        let digits = &after[..close];
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        parsed.score = Some(digits);

        rest = after[close + 1..].trim_start();
        if !rest.is_empty() {
            parsed.description = Some(rest.strip_prefix('-')?.trim());
        }

        Some(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(doc: &RadarDocument, phase: Phase) -> Vec<&str> {
        doc.items(phase).iter().map(|i| i.name.as_str()).collect()
    }

    #[test]
    fn parse_basic_document() {
        let content = "# Observere
- Rust
- Deno

# Prøve
- TypeScript

# Bruke
- JavaScript
- React

# Unngå
- jQuery";

        let doc = parse(content);

        assert_eq!(names(&doc, Phase::Observe), ["Rust", "Deno"]);
        assert_eq!(names(&doc, Phase::Trial), ["TypeScript"]);
        assert_eq!(names(&doc, Phase::Adopt), ["JavaScript", "React"]);
        assert_eq!(names(&doc, Phase::Avoid), ["jQuery"]);
        assert_eq!(doc.items(Phase::Observe)[0], TechItem::new("Rust", Phase::Observe));
    }

    #[test]
    fn empty_lines_are_skipped() {
        let doc = parse("# Observere\n\n- Rust\n\n- Deno\n\n# Prøve\n- TypeScript");
        assert_eq!(doc.items(Phase::Observe).len(), 2);
        assert_eq!(doc.items(Phase::Trial).len(), 1);
    }

    #[test]
    fn empty_phases_are_present() {
        let doc = parse("# Observere\n\n# Prøve\n- TypeScript\n\n# Bruke\n\n# Unngå");
        assert!(doc.items(Phase::Observe).is_empty());
        assert_eq!(doc.items(Phase::Trial).len(), 1);
        assert!(doc.items(Phase::Adopt).is_empty());
        assert!(doc.items(Phase::Avoid).is_empty());
    }

    #[test]
    fn empty_content() {
        let doc = parse("");
        assert!(doc.is_empty());
        assert_eq!(doc.iter().count(), 4);
    }

    #[test]
    fn names_are_trimmed() {
        let doc = parse("# Observere\n-    Rust\n- Rust\n-  Rust  ");
        assert_eq!(names(&doc, Phase::Observe), ["Rust", "Rust", "Rust"]);
    }

    #[test]
    fn orphan_items_are_dropped() {
        let doc = parse("- Orphan\n# Observere\n- Rust");
        assert_eq!(names(&doc, Phase::Observe), ["Rust"]);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn unknown_header_keeps_current_phase() {
        let doc = parse("# Bruke\n- Git\n# Notes\n- Docker\n## Bruke\n- Maven");
        assert_eq!(names(&doc, Phase::Adopt), ["Git", "Docker", "Maven"]);
    }

    #[test]
    fn empty_list_items_are_dropped() {
        let doc = parse("# Bruke\n-\n-   \n- Git");
        assert_eq!(names(&doc, Phase::Adopt), ["Git"]);
    }

    #[test]
    fn other_lines_are_ignored() {
        let doc = parse("# Bruke\nSome prose\n* Star item\n- Git");
        assert_eq!(names(&doc, Phase::Adopt), ["Git"]);
    }

    #[test]
    fn windows_line_endings() {
        let doc = parse("# Bruke\r\n- Git\r\n- Docker\r\n");
        assert_eq!(names(&doc, Phase::Adopt), ["Git", "Docker"]);
    }

    #[test]
    fn full_entry_extraction() {
        let item = parse_entry("Go [Lang] (1) - Statically typed language", Phase::Observe).unwrap();
        assert_eq!(item.name, "Go");
        assert_eq!(item.category, Some(Category::Lang));
        assert_eq!(item.maturity, MaturityScore::new(1).ok());
        assert_eq!(item.description.as_deref(), Some("Statically typed language"));
    }

    #[test]
    fn plain_name_entry() {
        let item = parse_entry("React", Phase::Adopt).unwrap();
        assert_eq!(item, TechItem::new("React", Phase::Adopt));
    }

    #[test]
    fn category_only_entry() {
        let item = parse_entry("GitHub Actions [Tool]", Phase::Adopt).unwrap();
        assert_eq!(item.name, "GitHub Actions");
        assert_eq!(item.category, Some(Category::Tool));
        assert_eq!(item.maturity, None);
    }

    #[test]
    fn score_without_category() {
        let item = parse_entry("Deno 2.0 (3) - Runtime", Phase::Observe).unwrap();
        assert_eq!(item.name, "Deno 2.0");
        assert_eq!(item.category, None);
        assert_eq!(item.maturity.map(|s| s.get()), Some(3));
        assert_eq!(item.description.as_deref(), Some("Runtime"));
    }

    #[test]
    fn hyphen_without_score_stays_in_name() {
        let item = parse_entry("Shell-scripting", Phase::Adopt).unwrap();
        assert_eq!(item.name, "Shell-scripting");
        assert_eq!(item.description, None);

        let item = parse_entry("OAuth2/OIDC - auth", Phase::Adopt).unwrap();
        assert_eq!(item.name, "OAuth2/OIDC - auth");
    }

    #[test]
    fn description_may_contain_brackets_and_hyphens() {
        let item = parse_entry("Kafka [Infra] (2) - Event log (distributed) - [fast]", Phase::Adopt).unwrap();
        assert_eq!(item.name, "Kafka");
        assert_eq!(item.description.as_deref(), Some("Event log (distributed) - [fast]"));
    }

    #[test]
    fn non_numeric_parens_stay_in_name() {
        let item = parse_entry("Node.js (LTS)", Phase::Adopt).unwrap();
        assert_eq!(item.name, "Node.js (LTS)");
        assert_eq!(item.maturity, None);
    }

    #[test]
    fn out_of_range_scores_are_clamped() {
        let low = parse_entry("A (0)", Phase::Adopt).unwrap();
        let high = parse_entry("B (9)", Phase::Adopt).unwrap();
        let huge = parse_entry("C (99999999999999)", Phase::Adopt).unwrap();
        assert_eq!(low.maturity, Some(MaturityScore::MIN));
        assert_eq!(high.maturity, Some(MaturityScore::MAX));
        assert_eq!(huge.maturity, Some(MaturityScore::MAX));
    }

    #[test]
    fn unknown_category_is_unset() {
        let item = parse_entry("Htmx [Widget] (2)", Phase::Trial).unwrap();
        assert_eq!(item.name, "Htmx");
        assert_eq!(item.category, None);
        assert_eq!(item.maturity.map(|s| s.get()), Some(2));
    }

    #[test]
    fn empty_description_is_unset() {
        let item = parse_entry("Git [Tool] (1) -", Phase::Adopt).unwrap();
        assert_eq!(item.description, None);
    }

    #[test]
    fn custom_headers() {
        let headers = PhaseHeaders {
            observe: "Assess".to_string(),
            trial: "Trial".to_string(),
            adopt: "Adopt".to_string(),
            avoid: "Hold".to_string(),
        };
        let doc = parse_with("# Hold\n- jQuery\n# Bruke\n- Git", &headers);
        assert_eq!(names(&doc, Phase::Avoid), ["jQuery", "Git"]);
    }
}
