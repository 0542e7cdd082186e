//! DeepL target languages

use std::fmt;
use std::str::FromStr;

/// Languages DeepL can translate into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TargetLang {
    Bulgarian,
    Czech,
    Danish,
    German,
    Greek,
    English,
    EnglishGb,
    EnglishUs,
    Spanish,
    Estonian,
    Finnish,
    French,
    Hungarian,
    Italian,
    Japanese,
    Lithuanian,
    Latvian,
    Dutch,
    Polish,
    Portuguese,
    PortugueseBr,
    PortuguesePt,
    Romanian,
    Russian,
    Slovak,
    Slovenian,
    Swedish,
    Chinese,
    #[default]
    Korean,
}

impl TargetLang {
    const ALL: [TargetLang; 29] = [
        Self::Bulgarian,
        Self::Czech,
        Self::Danish,
        Self::German,
        Self::Greek,
        Self::English,
        Self::EnglishGb,
        Self::EnglishUs,
        Self::Spanish,
        Self::Estonian,
        Self::Finnish,
        Self::French,
        Self::Hungarian,
        Self::Italian,
        Self::Japanese,
        Self::Lithuanian,
        Self::Latvian,
        Self::Dutch,
        Self::Polish,
        Self::Portuguese,
        Self::PortugueseBr,
        Self::PortuguesePt,
        Self::Romanian,
        Self::Russian,
        Self::Slovak,
        Self::Slovenian,
        Self::Swedish,
        Self::Chinese,
        Self::Korean,
    ];

    /// Code sent in the `target_lang` request field
    pub fn code(&self) -> &'static str {
        match self {
            Self::Bulgarian => "BG",
            Self::Czech => "CS",
            Self::Danish => "DA",
            Self::German => "DE",
            Self::Greek => "EL",
            Self::English => "EN",
            Self::EnglishGb => "EN-GB",
            Self::EnglishUs => "EN-US",
            Self::Spanish => "ES",
            Self::Estonian => "ET",
            Self::Finnish => "FI",
            Self::French => "FR",
            Self::Hungarian => "HU",
            Self::Italian => "IT",
            Self::Japanese => "JA",
            Self::Lithuanian => "LT",
            Self::Latvian => "LV",
            Self::Dutch => "NL",
            Self::Polish => "PL",
            Self::Portuguese => "PT",
            Self::PortugueseBr => "PT-BR",
            Self::PortuguesePt => "PT-PT",
            Self::Romanian => "RO",
            Self::Russian => "RU",
            Self::Slovak => "SK",
            Self::Slovenian => "SL",
            Self::Swedish => "SV",
            Self::Chinese => "ZH",
            Self::Korean => "KO",
        }
    }

    /// English name, as used in chat prompts
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bulgarian => "Bulgarian",
            Self::Czech => "Czech",
            Self::Danish => "Danish",
            Self::German => "German",
            Self::Greek => "Greek",
            Self::English => "English",
            Self::EnglishGb => "British English",
            Self::EnglishUs => "American English",
            Self::Spanish => "Spanish",
            Self::Estonian => "Estonian",
            Self::Finnish => "Finnish",
            Self::French => "French",
            Self::Hungarian => "Hungarian",
            Self::Italian => "Italian",
            Self::Japanese => "Japanese",
            Self::Lithuanian => "Lithuanian",
            Self::Latvian => "Latvian",
            Self::Dutch => "Dutch",
            Self::Polish => "Polish",
            Self::Portuguese => "Portuguese",
            Self::PortugueseBr => "Brazilian Portuguese",
            Self::PortuguesePt => "European Portuguese",
            Self::Romanian => "Romanian",
            Self::Russian => "Russian",
            Self::Slovak => "Slovak",
            Self::Slovenian => "Slovenian",
            Self::Swedish => "Swedish",
            Self::Chinese => "Chinese",
            Self::Korean => "Korean",
        }
    }
}

impl fmt::Display for TargetLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TargetLang {
    type Err = String;

    /// Accepts a code (`ko`, `EN-GB`) or an English name (`Korean`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .find(|lang| {
                lang.code().eq_ignore_ascii_case(wanted) || lang.name().eq_ignore_ascii_case(wanted)
            })
            .copied()
            .ok_or_else(|| format!("Unsupported DeepL target language: {}", s))
    }
}
