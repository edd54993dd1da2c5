//! Working out which locale `sort` should collate by, when the command line
//! doesn't say. The engine itself never looks at the environment; this is
//! for front ends.

/// Environment variables consulted for the collation locale, in POSIX
/// precedence order
pub const LOCALE_VARIABLES: [&str; 3] = ["LC_ALL", "LC_COLLATE", "LANG"];

/// The locale to sort by: `explicit` if given, otherwise the process's
/// collation locale. Either way the result is converted with
/// `posix_to_bcp47`.
#[must_use]
pub fn resolve(explicit: Option<String>) -> Option<String> {
    explicit
        .or_else(|| from_lookup(|name| std::env::var(name).ok()))
        .map(|name| posix_to_bcp47(&name))
}

/// The value of the first of `LOCALE_VARIABLES` for which `lookup` returns
/// a non-empty string.
#[must_use]
pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
    LOCALE_VARIABLES.iter().find_map(|name| lookup(name).filter(|value| !value.is_empty()))
}

/// Turn a POSIX locale name like `de_DE.UTF-8@euro` into a BCP-47 tag like
/// `de-DE` by dropping the codeset and modifier and replacing `_` with `-`.
/// BCP-47 tags pass through unchanged.
#[must_use]
pub fn posix_to_bcp47(name: &str) -> String {
    let name = name.trim();
    let language_and_territory = name.split(|c| c == '.' || c == '@').next().unwrap_or(name);
    language_and_territory.replace('_', "-")
}

#[cfg(test)]
mod test {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn posix_names_become_language_tags() {
        assert_eq!(posix_to_bcp47("de_DE.UTF-8@euro"), "de-DE");
        assert_eq!(posix_to_bcp47("sr_RS@latin"), "sr-RS");
        assert_eq!(posix_to_bcp47("zh_CN.GB18030"), "zh-CN");
        assert_eq!(posix_to_bcp47("C.UTF-8"), "C");
        assert_eq!(posix_to_bcp47("en-US"), "en-US");
    }

    fn lookup_in(vars: &[(&str, &str)]) -> Option<String> {
        let vars: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn lc_all_beats_lc_collate_beats_lang() {
        let all = [("LANG", "en_US.UTF-8"), ("LC_COLLATE", "sv_SE"), ("LC_ALL", "de_DE")];
        assert_eq!(lookup_in(&all).as_deref(), Some("de_DE"));
        assert_eq!(lookup_in(&all[..2]).as_deref(), Some("sv_SE"));
        assert_eq!(lookup_in(&all[..1]).as_deref(), Some("en_US.UTF-8"));
    }

    #[test]
    fn empty_variables_are_skipped() {
        assert_eq!(lookup_in(&[("LC_ALL", ""), ("LANG", "fr_FR")]).as_deref(), Some("fr_FR"));
        assert_eq!(lookup_in(&[]), None);
    }

    #[test]
    fn an_explicit_locale_wins() {
        assert_eq!(resolve(Some("sv_SE.UTF-8".to_string())).as_deref(), Some("sv-SE"));
    }
}
