use serde::Serialize;

/// Key under which the chosen language code is persisted
pub const STORAGE_KEY: &str = "ai-lazy-pack-language";

/// A selectable locale and its native display name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LanguageOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// Languages offered by the policy page, in display order.
/// The first entry is the fallback selection.
pub const AVAILABLE_LANGUAGES: &[LanguageOption] = &[
    LanguageOption {
        code: "zh-Hant",
        label: "繁體中文",
    },
    LanguageOption {
        code: "en",
        label: "English",
    },
    LanguageOption {
        code: "ms",
        label: "Bahasa Melayu",
    },
    LanguageOption {
        code: "id",
        label: "Bahasa Indonesia",
    },
    LanguageOption {
        code: "tl",
        label: "Filipino",
    },
    LanguageOption {
        code: "vi",
        label: "Tiếng Việt",
    },
    LanguageOption {
        code: "th",
        label: "ไทย",
    },
    LanguageOption {
        code: "hi",
        label: "हिन्दी",
    },
];

/// Pick the initial language: the stored code when it is offered,
/// otherwise the first declared option.
///
/// Returns `None` only for an empty option set.
pub fn resolve_initial<'a>(
    options: &'a [LanguageOption],
    stored: Option<&str>,
) -> Option<&'a LanguageOption> {
    stored
        .and_then(|code| options.iter().find(|l| l.code == code))
        .or_else(|| options.first())
}

pub fn find_language<'a>(options: &'a [LanguageOption], code: &str) -> Option<&'a LanguageOption> {
    options.iter().find(|l| l.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_code_is_used_when_offered() {
        let initial = resolve_initial(AVAILABLE_LANGUAGES, Some("vi")).unwrap();
        assert_eq!(initial.code, "vi");
    }

    #[test]
    fn test_unknown_or_missing_code_falls_back_to_first() {
        assert_eq!(
            resolve_initial(AVAILABLE_LANGUAGES, Some("fr")).unwrap().code,
            "zh-Hant"
        );
        assert_eq!(resolve_initial(AVAILABLE_LANGUAGES, None).unwrap().code, "zh-Hant");
        // Matching is exact, not case-insensitive
        assert_eq!(
            resolve_initial(AVAILABLE_LANGUAGES, Some("VI")).unwrap().code,
            "zh-Hant"
        );
    }

    #[test]
    fn test_membership_holds_for_every_subset() {
        // Every prefix of the declared set behaves the same way
        for len in 1..=AVAILABLE_LANGUAGES.len() {
            let options = &AVAILABLE_LANGUAGES[..len];
            for candidate in AVAILABLE_LANGUAGES {
                let picked = resolve_initial(options, Some(candidate.code)).unwrap();
                if options.contains(candidate) {
                    assert_eq!(picked, candidate);
                } else {
                    assert_eq!(picked, &options[0]);
                }
            }
        }
    }

    #[test]
    fn test_empty_option_set() {
        assert!(resolve_initial(&[], Some("en")).is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, a) in AVAILABLE_LANGUAGES.iter().enumerate() {
            for b in &AVAILABLE_LANGUAGES[i + 1..] {
                assert_ne!(a.code, b.code);
            }
        }
        assert!(find_language(AVAILABLE_LANGUAGES, "th").is_some());
    }
}
