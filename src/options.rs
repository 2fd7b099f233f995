//! Parsing of the short options string accepted by
//! [`Matcher::reset`](crate::Matcher::reset) and the constructors.
//!
//! Recognized letters: `A`, `N`, `T` optionally followed by `=d`. Any other
//! character is ignored by [`Options::parse`] -- per this crate's error
//! taxonomy, a malformed option string is not fatal, it just leaves the
//! offending flag at its default. [`Options::parse_strict`] is the same
//! parser with reporting turned on, for hosts that would rather reject a
//! typo than silently ignore it.

use crate::error::{Error, InvalidOption};

/// Default tab width used when the `T` option is absent.
pub const DEFAULT_TAB_WIDTH: u8 = 8;

/// Parsed option flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Options {
    /// `A` -- admit "any/all" negated patterns. Engine-defined; this layer
    /// only records it.
    pub admit_any: bool,
    /// `N` -- allow empty matches during a `FIND` discipline.
    pub allow_empty_find: bool,
    /// `T=d` -- tab width, `d` in `1..=9`.
    pub tab_width: u8,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            admit_any: false,
            allow_empty_find: false,
            tab_width: DEFAULT_TAB_WIDTH,
        }
    }
}

impl Options {
    /// Parse an options string, ignoring anything unrecognized.
    ///
    /// `"A;T=4"` sets `admit_any` and a tab width of 4; the `;` separator is
    /// just another ignored character, as is any other punctuation or
    /// whitespace a caller happens to use to make the string readable.
    pub fn parse(spec: &str) -> Options {
        let mut opts = Options::default();
        let _ = parse_into(spec, &mut opts, false);
        opts
    }

    /// Parse an options string, returning [`Error::InvalidOption`] on the
    /// first unrecognized flag or malformed `T=d`.
    pub fn parse_strict(spec: &str) -> Result<Options, Error> {
        let mut opts = Options::default();
        parse_into(spec, &mut opts, true)?;
        Ok(opts)
    }
}

/// One-pass parse with enumerated effects. Returns `Err` only when
/// `strict` is true and an anomaly is found; in lenient mode anomalies are
/// swallowed and the loop continues so later, valid flags still take
/// effect.
fn parse_into(spec: &str, opts: &mut Options, strict: bool) -> Result<(), Error> {
    let mut chars = spec.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            'A' => opts.admit_any = true,
            'N' => opts.allow_empty_find = true,
            'T' => {
                if chars.peek() == Some(&'=') {
                    chars.next();
                    match chars.peek().copied() {
                        Some(d) if d.is_ascii_digit() && d != '0' => {
                            chars.next();
                            opts.tab_width = d as u8 - b'0';
                        }
                        Some(d) => {
                            if strict {
                                return Err(Error::InvalidOption(InvalidOption::TabWidth(
                                    d.to_string(),
                                )));
                            }
                        }
                        None => {
                            if strict {
                                return Err(Error::InvalidOption(InvalidOption::TabWidth(
                                    String::new(),
                                )));
                            }
                        }
                    }
                } else if strict {
                    return Err(Error::InvalidOption(InvalidOption::TabWidth(String::new())));
                }
            }
            // Separators and whitespace are deliberately silent even in
            // strict mode: `;` is the documented separator, not a flag.
            ';' | ',' | ' ' | '\t' => {}
            other => {
                if strict {
                    return Err(Error::InvalidOption(InvalidOption::UnknownFlag(other)));
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let o = Options::default();
        assert!(!o.admit_any);
        assert!(!o.allow_empty_find);
        assert_eq!(o.tab_width, 8);
    }

    #[test]
    fn parses_example_from_spec() {
        let o = Options::parse("A;T=4");
        assert!(o.admit_any);
        assert!(!o.allow_empty_find);
        assert_eq!(o.tab_width, 4);
    }

    #[test]
    fn unknown_chars_are_ignored() {
        let o = Options::parse("AxNyT=3z");
        assert!(o.admit_any);
        assert!(o.allow_empty_find);
        assert_eq!(o.tab_width, 3);
    }

    #[test]
    fn bad_tab_width_falls_back_to_default() {
        let o = Options::parse("T=0");
        assert_eq!(o.tab_width, DEFAULT_TAB_WIDTH);
        let o = Options::parse("T=");
        assert_eq!(o.tab_width, DEFAULT_TAB_WIDTH);
    }

    #[test]
    fn strict_rejects_unknown_flag() {
        let err = Options::parse_strict("Q").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidOption(InvalidOption::UnknownFlag('Q'))
        ));
    }

    #[test]
    fn strict_rejects_bad_tab_width() {
        assert!(Options::parse_strict("T=0").is_err());
        assert!(Options::parse_strict("T=x").is_err());
        assert!(Options::parse_strict("T").is_err());
    }

    #[test]
    fn strict_accepts_well_formed() {
        assert_eq!(Options::parse_strict("A;N;T=9").unwrap(), Options {
            admit_any: true,
            allow_empty_find: true,
            tab_width: 9,
        });
    }
}
