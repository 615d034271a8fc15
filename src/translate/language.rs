use std::fmt;

use crate::error::{Result, TranslationError};

/// ISO 639-1 codes and the English names the models understand best.
pub const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("af", "Afrikaans"),
    ("am", "Amharic"),
    ("ar", "Arabic"),
    ("as", "Assamese"),
    ("az", "Azerbaijani"),
    ("be", "Belarusian"),
    ("bg", "Bulgarian"),
    ("bn", "Bengali"),
    ("ca", "Catalan"),
    ("cs", "Czech"),
    ("cy", "Welsh"),
    ("da", "Danish"),
    ("de", "German"),
    ("el", "Greek"),
    ("en", "English"),
    ("es", "Spanish"),
    ("et", "Estonian"),
    ("eu", "Basque"),
    ("fa", "Persian"),
    ("fi", "Finnish"),
    ("fr", "French"),
    ("ga", "Irish"),
    ("gl", "Galician"),
    ("gu", "Gujarati"),
    ("he", "Hebrew"),
    ("hi", "Hindi"),
    ("hr", "Croatian"),
    ("hu", "Hungarian"),
    ("hy", "Armenian"),
    ("id", "Indonesian"),
    ("is", "Icelandic"),
    ("it", "Italian"),
    ("ja", "Japanese"),
    ("ka", "Georgian"),
    ("kk", "Kazakh"),
    ("km", "Khmer"),
    ("kn", "Kannada"),
    ("ko", "Korean"),
    ("ky", "Kyrgyz"),
    ("lo", "Lao"),
    ("lt", "Lithuanian"),
    ("lv", "Latvian"),
    ("mk", "Macedonian"),
    ("ml", "Malayalam"),
    ("mr", "Marathi"),
    ("ms", "Malay"),
    ("mt", "Maltese"),
    ("my", "Burmese"),
    ("ne", "Nepali"),
    ("nl", "Dutch"),
    ("no", "Norwegian"),
    ("or", "Odia"),
    ("pa", "Punjabi"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ro", "Romanian"),
    ("ru", "Russian"),
    ("si", "Sinhala"),
    ("sk", "Slovak"),
    ("sl", "Slovenian"),
    ("sq", "Albanian"),
    ("sr", "Serbian"),
    ("sv", "Swedish"),
    ("sw", "Swahili"),
    ("ta", "Tamil"),
    ("te", "Telugu"),
    ("tg", "Tajik"),
    ("th", "Thai"),
    ("tr", "Turkish"),
    ("uk", "Ukrainian"),
    ("ur", "Urdu"),
    ("uz", "Uzbek"),
    ("vi", "Vietnamese"),
    ("zh", "Chinese"),
];

/// Target language resolved from a user designator.
///
/// `fr`, `FR`, `french` and `French` all resolve to the same value. Designators
/// outside [`KNOWN_LANGUAGES`] are kept as given so that models can still be
/// asked for languages or variants not listed here ("Brazilian Portuguese").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetLanguage {
    code: Option<&'static str>,
    name: String,
}

impl TargetLanguage {
    pub fn parse(designator: &str) -> Result<Self> {
        let designator = designator.trim();
        if designator.chars().count() < 2 {
            return Err(TranslationError::InvalidLanguage(designator.to_string()));
        }

        let known = KNOWN_LANGUAGES.iter().find(|(code, name)| {
            code.eq_ignore_ascii_case(designator) || name.eq_ignore_ascii_case(designator)
        });

        Ok(match known {
            Some((code, name)) => Self {
                code: Some(code),
                name: name.to_string(),
            },
            None => Self {
                code: None,
                name: designator.to_string(),
            },
        })
    }

    pub fn code(&self) -> Option<&'static str> {
        self.code
    }

    /// Name used in prompts.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "{} ({})", self.name, code),
            None => write!(f, "{}", self.name),
        }
    }
}
