//! Word cloud layout and SVG rendering
//!
//! Words are sized by relative frequency and placed along an Archimedean
//! spiral from the canvas centre. A word that collides with an earlier one or
//! leaves the canvas at every spiral position is retried one point smaller,
//! down to the minimum font size.

use crate::config::WordCloudConfig;
use crate::error::{NlpLensError, Result};
use crate::processing::entities::html_escape;
use crate::processing::stopwords::StopwordFilter;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Viridis samples, dark to light
const PALETTE: &[&str] = &[
    "#440154", "#482878", "#3e4989", "#31688e", "#26828e", "#1f9e89", "#35b779", "#6ece58",
    "#b5de2b", "#fde725",
];

/// Average glyph advance as a fraction of the font size
const GLYPH_WIDTH: f32 = 0.6;
const SPIRAL_STEP: f32 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedWord {
    pub word: String,
    pub frequency: f32,
    pub font_size: f32,
    /// Top-left corner of the bounding box
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: String,
}

impl PlacedWord {
    pub fn overlaps(&self, other: &PlacedWord) -> bool {
        boxes_overlap(
            (self.x, self.y, self.width, self.height),
            (other.x, other.y, other.width, other.height),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordCloudLayout {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub words: Vec<PlacedWord>,
}

impl WordCloudLayout {
    pub fn to_svg(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
            w = self.width,
            h = self.height
        );
        svg.push_str(&format!(
            r#"<rect width="100%" height="100%" fill="{}"/>"#,
            html_escape(&self.background)
        ));
        for word in &self.words {
            // Baseline sits at roughly 80% of the box height
            svg.push_str(&format!(
                r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" fill="{}">{}</text>"#,
                word.x,
                word.y + word.height * 0.8,
                word.font_size,
                word.color,
                html_escape(&word.word)
            ));
        }
        svg.push_str("</svg>");
        svg
    }
}

pub struct WordCloud {
    config: WordCloudConfig,
    stopwords: StopwordFilter,
    token_pattern: Regex,
}

impl WordCloud {
    pub fn new(config: WordCloudConfig, stopwords: StopwordFilter) -> Self {
        Self {
            config,
            stopwords,
            token_pattern: Regex::new(r"\w[\w']+").expect("Invalid word cloud token regex"),
        }
    }

    /// Word frequencies after stopword removal and case/plural merging,
    /// most frequent first
    pub fn process_text(&self, text: &str) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: HashMap<String, usize> = HashMap::new();

        for (position, m) in self.token_pattern.find_iter(text).enumerate() {
            let word = m.as_str();
            let word = word
                .strip_suffix("'s")
                .or_else(|| word.strip_suffix("'S"))
                .unwrap_or(word);
            if word.is_empty() || word.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            if self.stopwords.is_stopword(word) {
                continue;
            }
            *counts.entry(word.to_string()).or_insert(0) += 1;
            first_seen.entry(word.to_string()).or_insert(position);
        }

        // Merge case variants under the most common spelling
        let mut by_lower: HashMap<String, Vec<(String, usize)>> = HashMap::new();
        for (word, count) in counts {
            by_lower.entry(word.to_lowercase()).or_default().push((word, count));
        }
        let mut merged: HashMap<String, (String, usize)> = HashMap::new();
        for (lower, mut variants) in by_lower {
            variants.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
            let total: usize = variants.iter().map(|(_, c)| c).sum();
            merged.insert(lower, (variants[0].0.clone(), total));
        }

        // Fold "cats" into "cat" when both occur
        let plurals: Vec<String> = merged
            .keys()
            .filter(|key| key.ends_with('s') && !key.ends_with("ss"))
            .filter(|key| merged.contains_key(&key[..key.len() - 1]))
            .cloned()
            .collect();
        for plural in plurals {
            if let Some((_, count)) = merged.remove(&plural) {
                if let Some(entry) = merged.get_mut(&plural[..plural.len() - 1]) {
                    entry.1 += count;
                }
            }
        }

        let mut frequencies: Vec<(String, usize)> = merged.into_values().collect();
        let first = |word: &str| first_seen.get(word).copied().unwrap_or(usize::MAX);
        frequencies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| first(&a.0).cmp(&first(&b.0))));
        frequencies
    }

    pub fn generate(&self, text: &str) -> Result<WordCloudLayout> {
        let frequencies = self.process_text(text);
        if frequencies.is_empty() {
            return Err(NlpLensError::Rendering(
                "Need at least one word to plot a word cloud".to_string(),
            ));
        }
        self.layout(&frequencies)
    }

    pub fn layout(&self, frequencies: &[(String, usize)]) -> Result<WordCloudLayout> {
        let config = &self.config;
        let (width, height) = (config.width as f32, config.height as f32);
        let max_count = frequencies.first().map(|(_, c)| *c).unwrap_or(0);
        if max_count == 0 || width <= 0.0 || height <= 0.0 {
            return Err(NlpLensError::Rendering("Nothing to lay out".to_string()));
        }

        let mut placed: Vec<PlacedWord> = Vec::new();
        let mut font_size = config.max_font_size.min(height);
        let mut last_freq = 1.0f32;
        let rs = config.relative_scaling;

        for (rank, (word, count)) in frequencies.iter().take(config.max_words).enumerate() {
            let freq = *count as f32 / max_count as f32;
            if rs != 0.0 {
                font_size = ((rs * (freq / last_freq) + (1.0 - rs)) * font_size).round();
            }

            let mut position = None;
            while font_size >= config.min_font_size {
                let (w, h) = measure(word, font_size);
                if let Some((x, y)) = self.find_position(w, h, &placed) {
                    position = Some((x, y, w, h));
                    break;
                }
                font_size -= 1.0;
            }
            let Some((x, y, w, h)) = position else {
                debug!("Word cloud full after {} words", placed.len());
                break;
            };

            placed.push(PlacedWord {
                word: word.clone(),
                frequency: freq,
                font_size,
                x,
                y,
                width: w,
                height: h,
                color: PALETTE[rank % PALETTE.len()].to_string(),
            });
            last_freq = freq;
        }

        if placed.is_empty() {
            return Err(NlpLensError::Rendering(
                "No word fits on the canvas".to_string(),
            ));
        }

        Ok(WordCloudLayout {
            width: config.width,
            height: config.height,
            background: config.background.clone(),
            words: placed,
        })
    }

    fn find_position(&self, w: f32, h: f32, placed: &[PlacedWord]) -> Option<(f32, f32)> {
        let (width, height) = (self.config.width as f32, self.config.height as f32);
        if w > width || h > height {
            return None;
        }
        let (cx, cy) = (width / 2.0, height / 2.0);
        let aspect = width / height;
        let max_radius = (width * width + height * height).sqrt() / 2.0;

        let mut theta = 0.0f32;
        loop {
            let radius = theta;
            if radius > max_radius {
                return None;
            }
            let x = cx + radius * theta.cos() * aspect - w / 2.0;
            let y = cy + radius * theta.sin() - h / 2.0;
            theta += SPIRAL_STEP;

            if x < 0.0 || y < 0.0 || x + w > width || y + h > height {
                continue;
            }
            let candidate = (x, y, w, h);
            if placed
                .iter()
                .all(|p| !boxes_overlap(candidate, (p.x, p.y, p.width, p.height)))
            {
                return Some((x, y));
            }
        }
    }
}

fn measure(word: &str, font_size: f32) -> (f32, f32) {
    (word.chars().count() as f32 * font_size * GLYPH_WIDTH, font_size)
}

fn boxes_overlap(a: (f32, f32, f32, f32), b: (f32, f32, f32, f32)) -> bool {
    a.0 < b.0 + b.2 && b.0 < a.0 + a.2 && a.1 < b.1 + b.3 && b.1 < a.1 + a.3
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn cloud() -> WordCloud {
        WordCloud::new(
            Config::default().wordcloud,
            StopwordFilter::from_list(&["the", "and", "of"]),
        )
    }

    #[test]
    fn test_process_text_merges_variants() {
        let freqs = cloud().process_text("The Cat and the cat's cats. Dog dog 2024");
        let get = |w: &str| freqs.iter().find(|(word, _)| word == w).map(|(_, c)| *c);
        assert_eq!(get("Cat"), Some(3));
        assert_eq!(get("cats"), None);
        assert_eq!(get("Dog").or(get("dog")), Some(2));
        assert_eq!(get("2024"), None);
        assert_eq!(get("the"), None);
    }

    #[test]
    fn test_possessive_of_stopword_is_dropped() {
        let cloud = WordCloud::new(Config::default().wordcloud, StopwordFilter::from_list(&["it"]));
        let freqs = cloud.process_text("It's sunny and it's warm. Maria's garden.");
        let words: Vec<&str> = freqs.iter().map(|(word, _)| word.as_str()).collect();
        assert!(!words.iter().any(|w| w.eq_ignore_ascii_case("it")));
        assert!(words.contains(&"sunny"));
        assert!(words.contains(&"Maria"));
    }

    #[test]
    fn test_layout_inside_canvas_without_overlap() {
        let text = "rust cargo crate trait borrow lifetime rust cargo rust async tokio \
                    serde regex clap parser token lexer rust cargo trait trait";
        let layout = cloud().generate(text).unwrap();
        assert!(!layout.words.is_empty());
        for (i, a) in layout.words.iter().enumerate() {
            assert!(a.x >= 0.0 && a.y >= 0.0);
            assert!(a.x + a.width <= layout.width as f32);
            assert!(a.y + a.height <= layout.height as f32);
            for b in &layout.words[i + 1..] {
                assert!(!a.overlaps(b), "{} overlaps {}", a.word, b.word);
            }
        }
        assert_eq!(layout.words[0].word, "rust");
        assert!(layout.words[0].font_size >= layout.words.last().unwrap().font_size);
    }

    #[test]
    fn test_empty_text_fails() {
        assert!(cloud().generate("the and of").is_err());
        assert!(cloud().generate("").is_err());
    }

    #[test]
    fn test_svg_output() {
        let layout = cloud().generate("alpha beta gamma alpha").unwrap();
        let svg = layout.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(">alpha</text>"));
        assert_eq!(svg.matches("<text").count(), layout.words.len());
    }
}
