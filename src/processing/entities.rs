//! Rule-based named entity recognition and displaCy-style rendering
//!
//! Spans are collected in tiers: numeric and temporal patterns first, then
//! institutional proper-noun runs ("Bank of America", "Acme Corp"), then
//! gazetteer hits, then the remaining proper-noun runs. A later tier never
//! overrides an earlier one.

use crate::error::{NlpLensError, Result};
use crate::processing::pipeline::Token;
use crate::processing::pos_tagger::PosTag;
use aho_corasick::{AhoCorasick, MatchKind};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const HTML_WRAPPER: &str = r#"<div style="overflow-x: auto; border: 1px solid #e6e9ef; border-radius: 0.25rem; padding: 1rem">{}</div>"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    /// Byte offsets into the analyzed text
    pub start: usize,
    pub end: usize,
}

const GPE: &[&str] = &[
    "United States", "United States of America", "USA", "U.S.", "US", "America", "United Kingdom",
    "U.K.", "UK", "Britain", "Great Britain", "England", "Scotland", "Wales", "Ireland", "France",
    "Germany", "Italy", "Spain", "Portugal", "Netherlands", "Belgium", "Switzerland", "Austria",
    "Sweden", "Norway", "Denmark", "Finland", "Poland", "Greece", "Turkey", "Russia", "Ukraine",
    "China", "Japan", "India", "Pakistan", "Bangladesh", "Indonesia", "Vietnam", "Thailand",
    "Korea", "South Korea", "North Korea", "Singapore", "Malaysia", "Philippines", "Australia",
    "New Zealand", "Canada", "Mexico", "Brazil", "Argentina", "Chile", "Peru", "Colombia", "Egypt",
    "Nigeria", "Kenya", "Ghana", "South Africa", "Ethiopia", "Israel", "Iran", "Iraq",
    "Saudi Arabia", "Qatar", "Dubai", "London", "Paris", "Berlin", "Madrid", "Rome", "Moscow",
    "Beijing", "Shanghai", "Tokyo", "Delhi", "New Delhi", "Mumbai", "Sydney", "Toronto",
    "New York", "New York City", "Los Angeles", "San Francisco", "Chicago", "Boston", "Seattle",
    "Washington", "Texas", "California", "Florida", "Hong Kong", "Lagos", "Accra", "Nairobi",
    "Cairo", "Amsterdam", "Dublin", "Vienna", "Stockholm", "Seoul", "Bangkok", "Jakarta",
];

const NORP: &[&str] = &[
    "American", "Americans", "British", "English", "French", "German", "Germans", "Italian",
    "Italians", "Spanish", "Chinese", "Japanese", "Indian", "Indians", "Russian", "Russians",
    "European", "Europeans", "African", "Africans", "Asian", "Asians", "Canadian", "Canadians",
    "Mexican", "Mexicans", "Brazilian", "Australian", "Nigerian", "Ghanaian", "Kenyan", "Korean",
    "Christian", "Christians", "Muslim", "Muslims", "Jewish", "Jews", "Hindu", "Hindus",
    "Buddhist", "Catholic", "Protestant", "Democrat", "Democrats", "Republican", "Republicans",
    "Democratic", "Conservative", "Conservatives", "Liberal", "Liberals", "Arab", "Arabs",
];

const ORG: &[&str] = &[
    "Apple", "Google", "Alphabet", "Microsoft", "Amazon", "Facebook", "Meta", "Tesla", "SpaceX",
    "Netflix", "Twitter", "IBM", "Intel", "Nvidia", "NVIDIA", "Samsung", "Sony", "Toyota",
    "Oracle", "Uber", "Airbnb", "OpenAI", "Adobe", "Salesforce", "Spotify", "Walmart", "Disney",
    "Coca-Cola", "Pepsi", "McDonald's", "Boeing", "Ford", "BMW", "Volkswagen", "Huawei",
    "Alibaba", "Tencent", "Baidu", "Reuters", "BBC", "CNN", "NASA", "FBI", "CIA", "NATO", "WHO",
    "UN", "United Nations", "EU", "European Union", "World Bank", "IMF", "Congress", "Senate",
    "Parliament", "Harvard", "Stanford", "MIT", "Oxford", "Cambridge", "Udacity", "Wikipedia",
    "GitHub", "LinkedIn", "YouTube", "Instagram", "WhatsApp",
];

const LOC: &[&str] = &[
    "Europe", "Asia", "Africa", "North America", "South America", "Latin America", "Antarctica",
    "Middle East", "Atlantic", "Atlantic Ocean", "Pacific", "Pacific Ocean", "Indian Ocean",
    "Mediterranean", "Sahara", "Amazon River", "Nile", "Alps", "Himalayas", "Mount Everest",
    "Silicon Valley", "West Africa", "East Africa", "Southeast Asia", "Arctic", "Caribbean",
];

const EVENT: &[&str] = &[
    "World War I", "World War II", "World War One", "World War Two", "Olympics",
    "Olympic Games", "World Cup", "Super Bowl", "Cold War", "Holocaust", "Renaissance",
    "Christmas", "Easter", "Thanksgiving", "Ramadan", "Brexit",
];

const PERSON_TITLES: &[&str] = &[
    "Mr", "Mrs", "Ms", "Miss", "Dr", "Prof", "Professor", "Sir", "Dame", "Lord", "Lady", "President",
    "CEO", "Senator", "Governor", "Judge", "Minister", "King", "Queen", "Prince", "Princess",
    "Pope", "Captain", "General", "Chancellor", "Mayor", "Rev", "Saint", "St",
];

const ORG_SUFFIXES: &[&str] = &[
    "Inc", "Corp", "Corporation", "Ltd", "LLC", "Co", "Company", "Group", "Holdings", "Bank",
    "University", "College", "Institute", "School", "Foundation", "Association", "Agency",
    "Department", "Ministry", "Council", "Committee", "Commission", "Club", "Party", "Society",
    "Labs", "Technologies", "Systems", "Industries", "Airlines", "Motors", "Press", "Times",
    "News", "Post", "Journal", "Hospital", "Museum", "Studios", "Network", "Services",
];

const FIRST_NAMES: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Daniel", "Matthew", "Anthony", "Mark", "Steven", "Paul", "Andrew", "Joshua",
    "Kevin", "Brian", "George", "Edward", "Peter", "Jesse", "Barack", "Donald", "Joe", "Bill",
    "Elon", "Jeff", "Tim", "Steve", "Larry", "Sergey", "Satya", "Sundar", "Sebastian", "Mary",
    "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah",
    "Karen", "Nancy", "Lisa", "Margaret", "Emily", "Emma", "Olivia", "Sophia", "Anna", "Maria",
    "Hillary", "Michelle", "Angela", "Oprah", "Taylor", "Kwame", "Ama", "Kofi", "Ada", "Alan",
    "Grace", "Marie", "Albert", "Isaac", "Charles", "Ali", "Mohammed", "Wei", "Li", "Hiroshi",
];

const CONNECTORS: &[&str] = &["of", "&", "for"];

/// Pattern labels in precedence order
const PATTERN_LABELS: &[&str] = &["MONEY", "PERCENT", "DATE", "TIME", "ORDINAL", "CARDINAL"];

pub struct EntityRecognizer {
    gazetteer: AhoCorasick,
    gazetteer_labels: Vec<&'static str>,
    patterns: Vec<(&'static str, Regex)>,
}

impl EntityRecognizer {
    pub fn new() -> Result<Self> {
        let mut phrases: Vec<(&'static str, &'static str)> = Vec::new();
        for (label, list) in [("GPE", GPE), ("NORP", NORP), ("ORG", ORG), ("LOC", LOC), ("EVENT", EVENT)] {
            phrases.extend(list.iter().map(|phrase| (*phrase, label)));
        }
        // Longest first so "New York City" wins over "New York"
        phrases.sort_by(|a, b| b.0.len().cmp(&a.0.len()));

        let gazetteer = AhoCorasick::builder()
            .match_kind(MatchKind::LeftmostLongest)
            .build(phrases.iter().map(|(phrase, _)| *phrase))
            .map_err(|e| NlpLensError::Analysis(format!("Failed to build gazetteer: {}", e)))?;

        Ok(Self {
            gazetteer,
            gazetteer_labels: phrases.into_iter().map(|(_, label)| label).collect(),
            patterns: Self::compile_patterns()?,
        })
    }

    fn compile_patterns() -> Result<Vec<(&'static str, Regex)>> {
        const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December";
        const PLAIN_MONTHS: &str = "January|February|April|June|July|August|September|October|November|December";
        const VERB_MONTHS: &str = "March|May";
        let sources = [
            ("MONEY", r"[$€£]\s?\d[\d,]*(?:\.\d+)?(?:\s(?:hundred|thousand|million|billion|trillion)\b)?".to_string()),
            ("MONEY", r"\b\d[\d,]*(?:\.\d+)?\s(?:(?:hundred|thousand|million|billion|trillion)\s)?(?:dollars|euros|pounds|cents|yen|rupees|cedis)\b".to_string()),
            ("PERCENT", r"\b\d+(?:\.\d+)?(?:\s?%|\s?percent\b|\sper\scent\b)".to_string()),
            ("DATE", format!(r"\b\d{{1,2}}(?:st|nd|rd|th)?\s(?:{m})(?:,?\s\d{{4}})?\b", m = MONTHS)),
            ("DATE", format!(r"\b(?:{m})(?:\s\d{{1,2}}(?:st|nd|rd|th)?)?(?:,?\s\d{{4}})?\b", m = PLAIN_MONTHS)),
            // "May" and "March" double as a modal and a verb, so they need a day, a year or a preposition
            ("DATE", format!(r"\b(?:{m})(?:\s\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s\d{{4}})?|,?\s\d{{4}})\b", m = VERB_MONTHS)),
            ("DATE", format!(r"\b(?:in|since|by|during|until|before|after|from|of|early|late|mid|this|next|last)\s((?:{m}))\b", m = VERB_MONTHS)),
            ("DATE", r"\b\d{4}-\d{2}-\d{2}\b|\b\d{1,2}/\d{1,2}/\d{2,4}\b".to_string()),
            ("DATE", r"\b(?:Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday)s?\b".to_string()),
            ("DATE", r"(?i)\b(?:today|yesterday|tomorrow|(?:last|next|this)\s(?:week|month|year|decade|century))\b".to_string()),
            ("DATE", r"\b(?:1[6-9]|20)\d0s\b".to_string()),
            ("DATE", r"\b(?:in|since|by|during|from|until|of|before|after)\s((?:1[6-9]|20)\d{2})\b".to_string()),
            ("TIME", r"(?i)\b\d{1,2}(?::\d{2})?\s?(?:a\.m\.|p\.m\.|am\b|pm\b)|\b\d{1,2}:\d{2}\b".to_string()),
            ("TIME", r"(?i)\b(?:tonight|midnight|noon|this\s(?:morning|afternoon|evening))\b".to_string()),
            ("ORDINAL", r"(?i)\b(?:first|second|third|fourth|fifth|sixth|seventh|eighth|ninth|tenth|\d+(?:st|nd|rd|th))\b".to_string()),
            ("CARDINAL", r"\b\d{1,3}(?:,\d{3})+(?:\.\d+)?(?:\s(?:hundred|thousand|million|billion|trillion)\b)?|\b\d+(?:\.\d+)?(?:\s(?:hundred|thousand|million|billion|trillion)\b)?".to_string()),
            ("CARDINAL", r"(?i)\b(?:one|two|three|four|five|six|seven|eight|nine|ten|eleven|twelve|twenty|thirty|forty|fifty|hundred|thousand|million|billion|dozen)\b".to_string()),
        ];

        sources
            .into_iter()
            .map(|(label, source)| {
                Regex::new(&source)
                    .map(|regex| (label, regex))
                    .map_err(|e| NlpLensError::Analysis(format!("Invalid {} pattern: {}", label, e)))
            })
            .collect()
    }

    /// Entities in text order, non-overlapping
    pub fn recognize(&self, text: &str, tokens: &[Token]) -> Vec<Entity> {
        let mut accepted: Vec<Entity> = Vec::new();

        for label in PATTERN_LABELS {
            for (_, regex) in self.patterns.iter().filter(|(l, _)| l == label) {
                for caps in regex.captures_iter(text) {
                    let Some(m) = caps.get(1).or_else(|| caps.get(0)) else {
                        continue;
                    };
                    push_if_free(&mut accepted, text, m.start(), m.end(), label);
                }
            }
        }

        for (start, end) in name_runs(tokens, &accepted) {
            if is_institutional(&tokens[start..=end]) {
                push_if_free(&mut accepted, text, tokens[start].start, tokens[end].end, "ORG");
            }
        }

        for m in self.gazetteer.find_iter(text) {
            let (start, end) = (m.start(), m.end());
            if !on_word_boundary(text, start, end) {
                continue;
            }
            push_if_free(&mut accepted, text, start, end, self.gazetteer_labels[m.pattern().as_usize()]);
        }

        for (start, end) in name_runs(tokens, &accepted) {
            if let Some((first, label)) = classify_run(&tokens[start..=end]) {
                let first = start + first;
                push_if_free(&mut accepted, text, tokens[first].start, tokens[end].end, label);
            }
        }

        accepted.sort_by_key(|entity| entity.start);
        accepted
    }
}

fn push_if_free(accepted: &mut Vec<Entity>, text: &str, start: usize, end: usize, label: &str) {
    if start >= end || accepted.iter().any(|e| start < e.end && e.start < end) {
        return;
    }
    accepted.push(Entity {
        text: text[start..end].to_string(),
        label: label.to_string(),
        start,
        end,
    });
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
}

fn is_name_token(token: &Token) -> bool {
    if token.pos == PosTag::Propn || is_title(token) {
        return true;
    }
    token.sentence_start && FIRST_NAMES.contains(&token.text.as_str())
}

fn is_title(token: &Token) -> bool {
    PERSON_TITLES.contains(&token.text.as_str())
}

/// Maximal runs of name-like tokens not already covered by an entity.
/// Connectors may join two name tokens, and "." may follow a title.
fn name_runs(tokens: &[Token], accepted: &[Entity]) -> Vec<(usize, usize)> {
    let covered = |token: &Token| accepted.iter().any(|e| token.start < e.end && e.start < token.end);
    let mut runs = Vec::new();
    let mut current: Option<(usize, usize)> = None;
    let mut i = 0;

    while i < tokens.len() {
        let token = &tokens[i];
        let usable = !token.is_space && !covered(token);

        if usable && is_name_token(token) {
            current = Some(match current {
                Some((start, _)) => (start, i),
                None => (i, i),
            });
            i += 1;
            continue;
        }

        if let Some((start, end)) = current {
            let joins = usable
                && (CONNECTORS.contains(&token.text.as_str()) || (token.text == "." && is_title(&tokens[end])))
                && tokens
                    .get(i + 1)
                    .is_some_and(|next| !next.is_space && !covered(next) && is_name_token(next));
            if joins {
                current = Some((start, i));
                i += 1;
                continue;
            }
            runs.push((start, end));
            current = None;
        }
        i += 1;
    }
    if let Some(run) = current {
        runs.push(run);
    }
    runs
}

fn is_institutional(run: &[Token]) -> bool {
    let last = run.last().map(|t| t.text.trim_end_matches('.')).unwrap_or_default();
    let joined_by_connector = run.len() >= 3 && run.iter().any(|t| CONNECTORS.contains(&t.text.as_str()));
    (ORG_SUFFIXES.contains(&last) && run.len() >= 2) || joined_by_connector
}

/// Returns the index within the run where the entity starts, plus its label
fn classify_run(run: &[Token]) -> Option<(usize, &'static str)> {
    let mut first = 0;
    while first < run.len() && (is_title(&run[first]) || run[first].text == ".") {
        first += 1;
    }
    if first == run.len() {
        return None;
    }
    let names = &run[first..];
    if names.len() == 1 && names[0].text == "I" {
        return None;
    }
    if first > 0 {
        return Some((first, "PERSON"));
    }
    let last = names.last().map(|t| t.text.as_str()).unwrap_or_default();
    if ORG_SUFFIXES.contains(&last) {
        return Some((first, "ORG"));
    }
    if FIRST_NAMES.contains(&names[0].text.as_str()) {
        return Some((first, "PERSON"));
    }
    let all_caps = names.iter().all(|t| {
        t.text.chars().count() >= 2 && t.text.chars().all(|c| !c.is_lowercase())
    });
    if all_caps {
        return Some((first, "ORG"));
    }
    if names.len() >= 2 {
        return Some((first, "PERSON"));
    }
    Some((first, "ORG"))
}

/// Background colour per label, matching displaCy's defaults
pub fn label_color(label: &str) -> &'static str {
    match label {
        "ORG" => "#7aecec",
        "PRODUCT" => "#bfeeb7",
        "GPE" => "#feca74",
        "LOC" => "#ff9561",
        "PERSON" => "#aa9cfc",
        "NORP" => "#c887fb",
        "FAC" => "#9cc9cc",
        "EVENT" => "#ffeb80",
        "LAW" => "#ff8197",
        "LANGUAGE" => "#ff8197",
        "WORK_OF_ART" => "#f0d0ff",
        "DATE" | "TIME" => "#bfe1d9",
        "MONEY" | "QUANTITY" | "ORDINAL" | "CARDINAL" | "PERCENT" => "#e4e7d2",
        _ => "#ddd",
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn escape_fragment(s: &str) -> String {
    html_escape(s).replace('\n', "</br>")
}

/// Highlight entities as `<mark>` elements and wrap the result in a scrollable box
pub fn render_entities_html(text: &str, entities: &[Entity]) -> String {
    let mut html = String::from(r#"<div class="entities" style="line-height: 2.5; direction: ltr">"#);
    let mut offset = 0;
    for entity in entities {
        if entity.start < offset {
            continue;
        }
        html.push_str(&escape_fragment(&collapse_blank_lines(&text[offset..entity.start])));
        html.push_str(&format!(
            r#"<mark class="entity" style="background: {}; padding: 0.45em 0.6em; margin: 0 0.25em; line-height: 1; border-radius: 0.35em;">{}<span style="font-size: 0.8em; font-weight: bold; line-height: 1; border-radius: 0.35em; vertical-align: middle; margin-left: 0.5rem">{}</span></mark>"#,
            label_color(&entity.label),
            escape_fragment(&entity.text),
            entity.label
        ));
        offset = entity.end;
    }
    html.push_str(&escape_fragment(&collapse_blank_lines(&text[offset..])));
    html.push_str("</div>");
    HTML_WRAPPER.replace("{}", &html)
}

fn collapse_blank_lines(s: &str) -> String {
    let mut collapsed = s.to_string();
    while collapsed.contains("\n\n") {
        collapsed = collapsed.replace("\n\n", "\n");
    }
    collapsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_colors() {
        assert_eq!(label_color("ORG"), "#7aecec");
        assert_eq!(label_color("PERSON"), "#aa9cfc");
        assert_eq!(label_color("MONEY"), "#e4e7d2");
        assert_eq!(label_color("SOMETHING"), "#ddd");
    }

    #[test]
    fn test_render_wraps_and_escapes() {
        let text = "A <b> & Apple\n\n\nnext";
        let entities = vec![Entity {
            text: "Apple".to_string(),
            label: "ORG".to_string(),
            start: 8,
            end: 13,
        }];
        let html = render_entities_html(text, &entities);
        assert!(html.starts_with(r#"<div style="overflow-x: auto; border: 1px solid #e6e9ef"#));
        assert!(html.contains("A &lt;b&gt; &amp; "));
        assert!(html.contains("background: #7aecec"));
        assert!(html.contains(">ORG</span></mark>"));
        assert!(html.contains("</br>next"));
        assert!(!html.contains("</br></br>"));
    }

    #[test]
    fn test_pattern_entities_without_tokens() {
        let recognizer = EntityRecognizer::new().unwrap();
        let text = "It cost $5 million on March 3, 2021 and rose 12% by 10:30 am.";
        let entities = recognizer.recognize(text, &[]);
        let labels: Vec<(&str, &str)> = entities
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert!(labels.contains(&("$5 million", "MONEY")));
        assert!(labels.contains(&("March 3, 2021", "DATE")));
        assert!(labels.contains(&("12%", "PERCENT")));
        assert!(labels.contains(&("10:30 am", "TIME")));
    }

    #[test]
    fn test_modal_months_need_context() {
        let recognizer = EntityRecognizer::new().unwrap();
        let dates = |text: &str| -> Vec<String> {
            recognizer
                .recognize(text, &[])
                .into_iter()
                .filter(|e| e.label == "DATE")
                .map(|e| e.text)
                .collect()
        };
        assert!(dates("May I ask why we March forward?").is_empty());
        assert_eq!(dates("We met in May."), vec!["May"]);
        assert_eq!(dates("It opened May 4 and closed March 2024."), vec!["May 4", "March 2024"]);
        assert_eq!(dates("See you in June."), vec!["June"]);
    }

    #[test]
    fn test_gazetteer_is_case_sensitive_and_bounded() {
        let recognizer = EntityRecognizer::new().unwrap();
        let entities = recognizer.recognize("an apple from Japan, not Japanese-ish Japanology", &[]);
        let texts: Vec<&str> = entities.iter().map(|e| e.text.as_str()).collect();
        assert!(texts.contains(&"Japan"));
        assert!(!texts.contains(&"apple"));
        assert!(!texts.iter().any(|t| t.starts_with("Japanolog")));
    }
}
