use std::collections::HashMap;
use std::iter;
use std::sync::LazyLock;

use regex::Regex;

use crate::catalog::{Catalog, EntryId};

static SHORTHAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([a-zA-Z0-9_+\-]+):").expect("shorthand pattern is valid"));

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// `source` is the exact input that was recognized.
    Emoji { id: EntryId, source: String },
}

/// Lookup tables from shorthand, emoticons and native glyphs to catalog
/// entries. When two entries claim the same key the earlier one in catalog
/// order wins.
#[derive(Clone, Debug)]
pub struct Converter {
    short_names: HashMap<String, EntryId>,
    emoticons: HashMap<String, EntryId>,
    glyphs: HashMap<String, EntryId>,
    max_glyph_chars: usize,
    allow_native: bool,
}

impl Converter {
    pub fn new(catalog: &Catalog) -> Self {
        let mut short_names = HashMap::new();
        let mut emoticons = HashMap::new();
        let mut glyphs = HashMap::new();

        for (id, record) in catalog.ids().zip(catalog.records()) {
            for name in iter::once(&record.short_name).chain(&record.short_names) {
                short_names.entry(name.clone()).or_insert(id);
            }
            for emoticon in &record.emoticons {
                emoticons.entry(emoticon.clone()).or_insert(id);
            }
            if let Some(glyph) = record.glyph() {
                // Native text often omits the emoji presentation selector.
                if let Some(bare) = glyph.strip_suffix(VARIATION_SELECTOR_16)
                    && !bare.is_empty()
                {
                    glyphs.entry(bare.to_string()).or_insert(id);
                }
                glyphs.entry(glyph).or_insert(id);
            }
        }

        let max_glyph_chars = glyphs.keys().map(|g| g.chars().count()).max().unwrap_or(0);

        Self {
            short_names,
            emoticons,
            glyphs,
            max_glyph_chars,
            allow_native: false,
        }
    }

    /// Leave native glyphs in the text instead of turning them into emoji
    /// segments.
    pub fn allow_native(mut self, allow: bool) -> Self {
        self.allow_native = allow;
        self
    }

    /// Resolve a short name or alias, without colons.
    pub fn lookup(&self, short_name: &str) -> Option<EntryId> {
        self.short_names.get(short_name).copied()
    }

    /// Split `text` into plain text and recognized emoji. Native glyphs are
    /// recognized first, then emoticons, then `:shorthand:`.
    pub fn convert(&self, text: &str) -> Vec<Segment> {
        let mut segments = vec![Segment::Text(text.to_string())];
        if !self.allow_native {
            segments = self.apply(segments, Self::split_glyphs);
        }
        segments = self.apply(segments, Self::split_emoticons);
        self.apply(segments, Self::split_shorthand)
    }

    fn apply(
        &self,
        segments: Vec<Segment>,
        pass: fn(&Self, &str, &mut Vec<Segment>),
    ) -> Vec<Segment> {
        let mut out = Vec::with_capacity(segments.len());
        for segment in segments {
            match segment {
                Segment::Text(text) => pass(self, &text, &mut out),
                emoji => out.push(emoji),
            }
        }
        out
    }

    /// Longest match first, so `#` + VS16 + keycap wins over a bare `#`.
    fn split_glyphs(&self, text: &str, out: &mut Vec<Segment>) {
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(b, _)| b)
            .chain(iter::once(text.len()))
            .collect();
        let chars = bounds.len() - 1;
        let mut plain_start = 0;
        let mut i = 0;

        while i < chars {
            let longest = self.max_glyph_chars.min(chars - i);
            let hit = (1..=longest).rev().find_map(|n| {
                self.glyphs
                    .get(&text[bounds[i]..bounds[i + n]])
                    .map(|id| (n, *id))
            });
            match hit {
                Some((n, id)) => {
                    push_text(out, &text[plain_start..bounds[i]]);
                    out.push(Segment::Emoji {
                        id,
                        source: text[bounds[i]..bounds[i + n]].to_string(),
                    });
                    i += n;
                    plain_start = bounds[i];
                }
                None => i += 1,
            }
        }
        push_text(out, &text[plain_start..]);
    }

    /// Only whole whitespace-delimited words count, so `a:)b` is left alone.
    fn split_emoticons(&self, text: &str, out: &mut Vec<Segment>) {
        let mut plain_start = 0;
        let mut word_start: Option<usize> = None;

        for (b, ch) in text.char_indices().chain(iter::once((text.len(), ' '))) {
            match (ch.is_whitespace(), word_start) {
                (false, None) => word_start = Some(b),
                (true, Some(start)) => {
                    word_start = None;
                    if let Some(id) = self.emoticons.get(&text[start..b]) {
                        push_text(out, &text[plain_start..start]);
                        out.push(Segment::Emoji {
                            id: *id,
                            source: text[start..b].to_string(),
                        });
                        plain_start = b;
                    }
                }
                _ => {}
            }
        }
        push_text(out, &text[plain_start..]);
    }

    fn split_shorthand(&self, text: &str, out: &mut Vec<Segment>) {
        let mut plain_start = 0;
        for caps in SHORTHAND.captures_iter(text) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if let Some(id) = self.lookup(name.as_str()) {
                push_text(out, &text[plain_start..whole.start()]);
                out.push(Segment::Emoji {
                    id,
                    source: whole.as_str().to_string(),
                });
                plain_start = whole.end();
            }
        }
        push_text(out, &text[plain_start..]);
    }
}

fn push_text(out: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Segment::Text(prev)) = out.last_mut() {
        prev.push_str(text);
    } else {
        out.push(Segment::Text(text.to_string()));
    }
}

/// Flatten segments to text, painting each emoji as its native glyph.
/// Entries without a code point sequence keep their source text.
pub fn glyph_text(segments: &[Segment], catalog: &Catalog) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Emoji { id, source } => {
                match catalog.get(*id).and_then(|r| r.glyph()) {
                    Some(glyph) => out.push_str(&glyph),
                    None => out.push_str(source),
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::tests::raw;
    use crate::catalog::{BuildOptions, SectionOrders, build};

    fn catalog() -> Catalog {
        let mut thumbs = raw("+1", "People", 1);
        thumbs.unified = Some("1F44D".to_string());
        thumbs.short_names = Some(vec!["+1".to_string(), "thumbsup".to_string()]);

        let mut smiley = raw("smiley", "People", 2);
        smiley.unified = Some("1F603".to_string());
        smiley.text = Some(":)".to_string());

        let mut heart = raw("heart", "Symbols", 1);
        heart.unified = Some("2764-FE0F".to_string());
        heart.texts = Some(vec!["<3".to_string()]);

        let mut hash = raw("hash", "Symbols", 2);
        hash.unified = Some("0023-FE0F-20E3".to_string());

        let no_glyph = raw("party_parrot", "Symbols", 3);

        build(
            &[thumbs, smiley, heart, hash, no_glyph],
            &SectionOrders::default(),
            &BuildOptions::default(),
        )
        .unwrap()
    }

    fn emoji(id: usize, source: &str) -> Segment {
        Segment::Emoji {
            id: EntryId(id),
            source: source.to_string(),
        }
    }

    fn text(s: &str) -> Segment {
        Segment::Text(s.to_string())
    }

    #[test]
    fn shorthand_and_aliases() {
        let catalog = catalog();
        let converter = Converter::new(&catalog);
        assert_eq!(
            converter.convert("nice :thumbsup: and :+1:!"),
            vec![
                text("nice "),
                emoji(0, ":thumbsup:"),
                text(" and "),
                emoji(0, ":+1:"),
                text("!"),
            ]
        );
    }

    #[test]
    fn unknown_shorthand_stays_text() {
        let catalog = catalog();
        let converter = Converter::new(&catalog);
        assert_eq!(
            converter.convert("at 10:30:00 :nope:"),
            vec![text("at 10:30:00 :nope:")]
        );
    }

    #[test]
    fn emoticons_need_word_boundaries() {
        let catalog = catalog();
        let converter = Converter::new(&catalog);
        assert_eq!(
            converter.convert("hi :) a:)b <3"),
            vec![text("hi "), emoji(1, ":)"), text(" a:)b "), emoji(2, "<3")]
        );
    }

    #[test]
    fn native_glyphs_longest_match() {
        let catalog = catalog();
        let converter = Converter::new(&catalog);
        assert_eq!(
            converter.convert("#\u{FE0F}\u{20E3}1 #2 \u{2764}"),
            vec![
                emoji(3, "#\u{FE0F}\u{20E3}"),
                text("1 #2 "),
                emoji(2, "\u{2764}"),
            ]
        );
    }

    #[test]
    fn allow_native_keeps_glyphs_as_text() {
        let catalog = catalog();
        let converter = Converter::new(&catalog).allow_native(true);
        assert_eq!(
            converter.convert("\u{1F44D} :heart:"),
            vec![text("\u{1F44D} "), emoji(2, ":heart:")]
        );
    }

    #[test]
    fn glyph_text_paints_emoji() {
        let catalog = catalog();
        let converter = Converter::new(&catalog);
        let segments = converter.convert(":+1: :party_parrot: :)");
        assert_eq!(
            glyph_text(&segments, &catalog),
            "\u{1F44D} :party_parrot: \u{1F603}"
        );
    }

    #[test]
    fn empty_input_has_no_segments() {
        let catalog = catalog();
        assert!(Converter::new(&catalog).convert("").is_empty());
    }
}
