use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{PickerError, Result};

/// Image set used to paint a glyph.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Twitter,
    Apple,
    Google,
    Emojione,
    Facebook,
    Messenger,
}

impl Provider {
    pub const ALL: [Provider; 6] = [
        Provider::Twitter,
        Provider::Apple,
        Provider::Google,
        Provider::Emojione,
        Provider::Facebook,
        Provider::Messenger,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Provider::Twitter => "twitter",
            Provider::Apple => "apple",
            Provider::Google => "google",
            Provider::Emojione => "emojione",
            Provider::Facebook => "facebook",
            Provider::Messenger => "messenger",
        }
    }
}

impl FromStr for Provider {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        Provider::ALL
            .into_iter()
            .find(|p| p.as_str() == key)
            .ok_or_else(|| PickerError::UnknownProvider(s.to_string()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-provider `has_img_*` flags of one record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAvailability {
    pub twitter: bool,
    pub apple: bool,
    pub google: bool,
    pub emojione: bool,
    pub facebook: bool,
    pub messenger: bool,
}

impl ImageAvailability {
    pub fn has(self, provider: Provider) -> bool {
        match provider {
            Provider::Twitter => self.twitter,
            Provider::Apple => self.apple,
            Provider::Google => self.google,
            Provider::Emojione => self.emojione,
            Provider::Facebook => self.facebook,
            Provider::Messenger => self.messenger,
        }
    }

    pub fn any(self) -> bool {
        Provider::ALL.into_iter().any(|p| self.has(p))
    }
}

/// A dataset entry as it appears on disk (emoji-datasource layout).
///
/// Every attribute is optional here so that a missing one surfaces as
/// [`PickerError::InvalidRecord`] from [`RawEmojiRecord::validate`] instead of
/// failing the whole JSON parse.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RawEmojiRecord {
    pub name: Option<String>,
    pub unified: Option<String>,
    pub short_name: Option<String>,
    pub short_names: Option<Vec<String>>,
    pub text: Option<String>,
    pub texts: Option<Vec<String>>,
    pub category: Option<String>,
    pub sort_order: Option<i64>,
    pub has_img_twitter: Option<bool>,
    pub has_img_apple: Option<bool>,
    pub has_img_google: Option<bool>,
    pub has_img_emojione: Option<bool>,
    pub has_img_facebook: Option<bool>,
    pub has_img_messenger: Option<bool>,
}

fn required<T: Clone>(value: &Option<T>, index: usize, attribute: &'static str) -> Result<T> {
    value
        .clone()
        .ok_or(PickerError::InvalidRecord { index, attribute })
}

impl RawEmojiRecord {
    /// Copy this record into a validated [`EmojiRecord`]. `index` is the
    /// record's position in the input, used for error reporting only.
    pub fn validate(&self, index: usize) -> Result<EmojiRecord> {
        let images = ImageAvailability {
            twitter: required(&self.has_img_twitter, index, "has_img_twitter")?,
            apple: required(&self.has_img_apple, index, "has_img_apple")?,
            google: required(&self.has_img_google, index, "has_img_google")?,
            emojione: required(&self.has_img_emojione, index, "has_img_emojione")?,
            facebook: required(&self.has_img_facebook, index, "has_img_facebook")?,
            messenger: required(&self.has_img_messenger, index, "has_img_messenger")?,
        };

        let mut emoticons: Vec<String> = Vec::new();
        for text in self.text.iter().chain(self.texts.iter().flatten()) {
            if !text.is_empty() && !emoticons.contains(text) {
                emoticons.push(text.clone());
            }
        }

        Ok(EmojiRecord {
            name: required(&self.name, index, "name")?,
            short_name: required(&self.short_name, index, "short_name")?,
            short_names: required(&self.short_names, index, "short_names")?,
            category: required(&self.category, index, "category")?,
            sort_order: required(&self.sort_order, index, "sort_order")?,
            images,
            unified: self.unified.clone(),
            emoticons,
        })
    }
}

/// One selectable glyph. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EmojiRecord {
    pub name: String,
    pub short_name: String,
    pub short_names: Vec<String>,
    pub category: String,
    pub sort_order: i64,
    pub images: ImageAvailability,
    /// Dash separated hex code points, e.g. `0023-FE0F-20E3`.
    pub unified: Option<String>,
    pub emoticons: Vec<String>,
}

impl EmojiRecord {
    pub fn has_image(&self, provider: Provider) -> bool {
        self.images.has(provider)
    }

    /// The native glyph, if the record carries a valid code point sequence.
    pub fn glyph(&self) -> Option<String> {
        let unified = self.unified.as_deref()?;
        unified
            .split('-')
            .map(|cp| u32::from_str_radix(cp, 16).ok().and_then(char::from_u32))
            .collect()
    }

    /// `:short_name:`
    pub fn shorthand(&self) -> String {
        format!(":{}:", self.short_name)
    }

    /// All aliases in colon-wrapped form, e.g. `:thumbsup: :+1:`.
    pub fn aliases(&self) -> String {
        if self.short_names.is_empty() {
            return String::new();
        }
        format!(":{}:", self.short_names.join(": :"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_thumbsup() -> RawEmojiRecord {
        RawEmojiRecord {
            name: Some("THUMBS UP SIGN".to_string()),
            unified: Some("1F44D".to_string()),
            short_name: Some("+1".to_string()),
            short_names: Some(vec!["+1".to_string(), "thumbsup".to_string()]),
            text: None,
            texts: None,
            category: Some("People".to_string()),
            sort_order: Some(95),
            has_img_twitter: Some(true),
            has_img_apple: Some(true),
            has_img_google: Some(false),
            has_img_emojione: Some(true),
            has_img_facebook: Some(false),
            has_img_messenger: Some(false),
        }
    }

    #[test]
    fn provider_parses_case_insensitively() {
        assert_eq!("Twitter".parse::<Provider>().unwrap(), Provider::Twitter);
        assert_eq!(" emojione ".parse::<Provider>().unwrap(), Provider::Emojione);
        assert!(matches!(
            "myspace".parse::<Provider>(),
            Err(PickerError::UnknownProvider(name)) if name == "myspace"
        ));
    }

    #[test]
    fn validate_copies_attributes() {
        let record = raw_thumbsup().validate(0).unwrap();
        assert_eq!(record.short_name, "+1");
        assert_eq!(record.sort_order, 95);
        assert!(record.has_image(Provider::Apple));
        assert!(!record.has_image(Provider::Google));
        assert_eq!(record.aliases(), ":+1: :thumbsup:");
        assert_eq!(record.shorthand(), ":+1:");
    }

    #[test]
    fn validate_reports_missing_attribute() {
        let mut raw = raw_thumbsup();
        raw.sort_order = None;
        let err = raw.validate(7).unwrap_err();
        assert!(matches!(
            err,
            PickerError::InvalidRecord { index: 7, attribute: "sort_order" }
        ));

        let mut raw = raw_thumbsup();
        raw.has_img_messenger = None;
        assert!(matches!(
            raw.validate(0),
            Err(PickerError::InvalidRecord { attribute: "has_img_messenger", .. })
        ));
    }

    #[test]
    fn glyph_from_code_point_sequence() {
        let mut record = raw_thumbsup().validate(0).unwrap();
        assert_eq!(record.glyph().as_deref(), Some("\u{1F44D}"));

        record.unified = Some("0023-FE0F-20E3".to_string());
        assert_eq!(record.glyph().as_deref(), Some("#\u{FE0F}\u{20E3}"));

        record.unified = Some("ZZZZ".to_string());
        assert_eq!(record.glyph(), None);
    }

    #[test]
    fn emoticons_merge_text_and_texts() {
        let mut raw = raw_thumbsup();
        raw.text = Some(":)".to_string());
        raw.texts = Some(vec!["=)".to_string(), ":)".to_string()]);
        let record = raw.validate(0).unwrap();
        assert_eq!(record.emoticons, vec![":)".to_string(), "=)".to_string()]);
    }

    #[test]
    fn dataset_json_with_nulls_deserializes() {
        let json = r#"{"name":"PIZZA","unified":"1F355","short_name":"pizza",
            "short_names":["pizza"],"text":null,"texts":null,"category":"Foods",
            "sort_order":60,"has_img_twitter":true,"has_img_apple":true,
            "has_img_google":true,"has_img_emojione":true,"has_img_facebook":true,
            "has_img_messenger":true,"image":"1f355.png"}"#;
        let raw: RawEmojiRecord = serde_json::from_str(json).unwrap();
        let record = raw.validate(0).unwrap();
        assert_eq!(record.category, "Foods");
        assert!(record.emoticons.is_empty());
    }
}
