//! The `LineComparator` decides how two sort keys compare. It's chosen once,
//! before sorting starts, and used for every comparison of that sort.
use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;

/// How `sort_lines` compares lines.
///
/// * `LocaleCollation` orders keys by the collation rules of a locale, so that
///   (for instance) accented letters sort next to their unaccented versions,
///   or after `z`, as the locale's readers expect.
/// * `CodePoint` compares keys code point by code point, case-sensitively.
///   That's what collation means in the `C`/`POSIX` locale.
/// * `CaseInsensitiveOrdinal` lower-cases keys and compares them code point
///   by code point. It's the fallback when there's no usable locale.
///
/// Either way the key is the line with leading and trailing whitespace
/// trimmed.
#[derive(Default)]
pub enum LineComparator {
    /// Compare with a locale's collation rules
    LocaleCollation {
        /// The locale whose rules `collator` implements
        locale: Locale,
        /// ICU collator for `locale`
        collator: Box<Collator>,
    },
    /// Compare keys by code point, as the `C` locale does
    CodePoint,
    /// Compare lower-cased keys by code point
    #[default]
    CaseInsensitiveOrdinal,
}

/// True for the names of the `C` locale: `C`, `POSIX`, and `C` with a
/// codeset such as `C.UTF-8`.
fn is_posix_locale(tag: &str) -> bool {
    let name = tag.split(|c| c == '.' || c == '@').next().unwrap_or(tag);
    name.eq_ignore_ascii_case("c") || name.eq_ignore_ascii_case("posix")
}

impl LineComparator {
    /// Returns the comparator for the BCP-47 language tag `tag`:
    /// `CodePoint` for the `C`/`POSIX` locale, `LocaleCollation` for any
    /// other locale ICU can collate, and `CaseInsensitiveOrdinal` if there's
    /// no tag, the tag doesn't parse, or no collator can be built for it.
    #[must_use]
    pub fn for_locale(tag: Option<&str>) -> Self {
        let Some(tag) = tag.map(str::trim).filter(|t| !t.is_empty()) else {
            tracing::debug!("no locale configured; comparing case-insensitively");
            return LineComparator::CaseInsensitiveOrdinal;
        };
        if is_posix_locale(tag) {
            tracing::debug!(locale = tag, "POSIX locale; comparing by code point");
            return LineComparator::CodePoint;
        }
        let locale = match tag.parse::<Locale>() {
            Ok(locale) => locale,
            Err(e) => {
                tracing::warn!(
                    locale = tag,
                    error = %e,
                    "unusable locale; comparing case-insensitively"
                );
                return LineComparator::CaseInsensitiveOrdinal;
            }
        };
        match Collator::try_new(&(&locale).into(), CollatorOptions::new()) {
            Ok(collator) => {
                tracing::debug!(%locale, "using locale collation");
                LineComparator::LocaleCollation { locale, collator: Box::new(collator) }
            }
            Err(e) => {
                tracing::warn!(
                    %locale,
                    error = %e,
                    "no collator for locale; comparing case-insensitively"
                );
                LineComparator::CaseInsensitiveOrdinal
            }
        }
    }

    /// The key `line` is sorted by
    #[must_use]
    pub fn sort_key<'a>(&self, line: &'a str) -> Cow<'a, str> {
        let trimmed = line.trim();
        match self {
            LineComparator::LocaleCollation { .. } | LineComparator::CodePoint => {
                Cow::Borrowed(trimmed)
            }
            LineComparator::CaseInsensitiveOrdinal => Cow::Owned(trimmed.to_lowercase()),
        }
    }

    /// Compare two keys previously returned by `sort_key`
    #[must_use]
    pub fn compare_keys(&self, a: &str, b: &str) -> Ordering {
        match self {
            LineComparator::LocaleCollation { collator, .. } => collator.compare(a, b),
            LineComparator::CodePoint | LineComparator::CaseInsensitiveOrdinal => a.cmp(b),
        }
    }

    /// Compare two lines
    #[must_use]
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.compare_keys(&self.sort_key(a), &self.sort_key(b))
    }
}

impl fmt::Debug for LineComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineComparator::LocaleCollation { locale, .. } => {
                f.debug_tuple("LocaleCollation").field(&locale.to_string()).finish()
            }
            LineComparator::CodePoint => f.write_str("CodePoint"),
            LineComparator::CaseInsensitiveOrdinal => f.write_str("CaseInsensitiveOrdinal"),
        }
    }
}
