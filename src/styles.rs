//! Coloring for the summary line printed after an operation
use clap::ValueEnum;
use once_cell::sync::Lazy;

/// The `--color` option
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[allow(missing_docs)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// ANSI escape sequences wrapped around the parts of a summary line
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    operation_start: &'static str,
    count_start: &'static str,
    path_start: &'static str,
    end: &'static str,
}

#[allow(missing_docs)]
impl StyleSheet {
    #[must_use]
    pub fn operation(&self, s: &str) -> String {
        format!("{}{}{}", self.operation_start, s, self.end)
    }
    #[must_use]
    pub fn count(&self, n: usize) -> String {
        format!("{}{}{}", self.count_start, n, self.end)
    }
    #[must_use]
    pub fn path(&self, p: &std::path::Path) -> String {
        format!("{}{}{}", self.path_start, p.display(), self.end)
    }
}

const BOLD_GREEN: &str = "\x1B[32;1m";
const YELLOW: &str = "\x1B[33m";
const CYAN: &str = "\x1B[36m";
const RESET: &str = "\x1B[m";
const ALWAYS: StyleSheet = StyleSheet {
    operation_start: BOLD_GREEN,
    count_start: YELLOW,
    path_start: CYAN,
    end: RESET,
};
const NEVER: StyleSheet = StyleSheet {
    operation_start: "",
    count_start: "",
    path_start: "",
    end: "",
};
static AUTO: Lazy<StyleSheet> = Lazy::new(|| {
    use enable_ansi_support::enable_ansi_support;
    use supports_color::Stream;
    let use_color = enable_ansi_support().is_ok() && supports_color::on(Stream::Stdout).is_some();
    if use_color {
        ALWAYS
    } else {
        NEVER
    }
});

/// Decide (once) whether `ColorChoice::Auto` means color
pub fn init() {
    Lazy::force(&AUTO);
}

/// The `StyleSheet` for `cc`. Call `init` first, or `Auto` means no color.
#[must_use]
pub fn colored(cc: ColorChoice) -> &'static StyleSheet {
    match cc {
        ColorChoice::Always => &ALWAYS,
        ColorChoice::Never => &NEVER,
        ColorChoice::Auto => Lazy::<StyleSheet>::get(&AUTO).unwrap_or(&NEVER),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::path::Path;

    #[test]
    fn never_adds_nothing() {
        let style = colored(ColorChoice::Never);
        assert_eq!(style.operation("sorted"), "sorted");
        assert_eq!(style.count(42), "42");
        assert_eq!(style.path(Path::new("a_sorted.txt")), "a_sorted.txt");
    }

    #[test]
    fn always_wraps_each_part_and_resets() {
        let style = colored(ColorChoice::Always);
        assert_eq!(style.operation("dedup"), "\x1B[32;1mdedup\x1B[m");
        assert_eq!(style.count(3), "\x1B[33m3\x1B[m");
        assert!(style.path(Path::new("x")).ends_with(RESET));
    }
}
