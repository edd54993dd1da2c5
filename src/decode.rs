//! Provides `read_lines`, which reads a whole file into memory, guesses its
//! encoding, and splits it into lines.
//!
//! The guess is made by trying each entry of `CANDIDATES` in turn and keeping
//! the first one that decodes the file without error. The last entry, Latin-1,
//! maps every byte to a character, so it never fails: a file in some encoding
//! we don't know about will come back as plausible-looking but wrong text
//! rather than as an error. That's a deliberate choice to favor getting *some*
//! result over refusing the file.
use encoding_rs::{GB18030, GBK, UTF_8};
use memchr::memchr2;
use std::borrow::Cow;
use std::fs;
use std::path::Path;

use crate::error::{LineError, Result};

/// A named decoder. `decode` returns `None` if the bytes aren't valid in its
/// encoding.
#[derive(Clone, Copy)]
pub struct EncodingCandidate {
    /// The encoding's conventional label
    pub name: &'static str,
    decode: for<'a> fn(&'a [u8]) -> Option<Cow<'a, str>>,
}

impl EncodingCandidate {
    /// Try to decode `bytes`
    #[must_use]
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Option<Cow<'a, str>> {
        (self.decode)(bytes)
    }
}

impl std::fmt::Debug for EncodingCandidate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("EncodingCandidate").field(&self.name).finish()
    }
}

/// The encodings `read_lines` tries, in priority order.
pub const CANDIDATES: &[EncodingCandidate] = &[
    EncodingCandidate { name: "utf-8", decode: utf8_strict },
    EncodingCandidate { name: "utf-8-sig", decode: utf8_without_bom },
    EncodingCandidate { name: "gbk", decode: gbk_strict },
    EncodingCandidate { name: "gb18030", decode: gb18030_strict },
    EncodingCandidate { name: "latin-1", decode: latin1 },
];

const BOM_BYTES: &[u8] = b"\xEF\xBB\xBF";

/// Plain UTF-8. A leading Byte Order Mark is left for `utf8_without_bom`, so
/// that it doesn't end up glued to the first line.
fn utf8_strict(bytes: &[u8]) -> Option<Cow<'_, str>> {
    if bytes.starts_with(BOM_BYTES) {
        return None;
    }
    UTF_8.decode_without_bom_handling_and_without_replacement(bytes)
}

fn utf8_without_bom(bytes: &[u8]) -> Option<Cow<'_, str>> {
    let body = bytes.strip_prefix(BOM_BYTES).unwrap_or(bytes);
    UTF_8.decode_without_bom_handling_and_without_replacement(body)
}

/// `encoding_rs` decodes GBK with the full GB18030 decoder, so we reject
/// text that needs GB18030's four-byte sequences by checking that GBK can
/// encode everything we decoded.
fn gbk_strict(bytes: &[u8]) -> Option<Cow<'_, str>> {
    if has_single_byte_euro(bytes) {
        return None;
    }
    let text = GBK.decode_without_bom_handling_and_without_replacement(bytes)?;
    let (_, _, had_unmappable) = GBK.encode(&text);
    if had_unmappable {
        None
    } else {
        Some(text)
    }
}

fn gb18030_strict(bytes: &[u8]) -> Option<Cow<'_, str>> {
    if has_single_byte_euro(bytes) {
        return None;
    }
    GB18030.decode_without_bom_handling_and_without_replacement(bytes)
}

/// Whether `bytes` has a `0x80` where a character starts. The WHATWG decoders
/// in `encoding_rs` read that as `€`, but it isn't a character in GBK or
/// GB18030 proper, so we leave such files to a later candidate.
fn has_single_byte_euro(bytes: &[u8]) -> bool {
    let mut i = 0;
    while let Some(&lead) = bytes.get(i) {
        i += match lead {
            0x00..=0x7F => 1,
            0x80 => return true,
            _ => match bytes.get(i + 1) {
                Some(0x30..=0x39) => 4,
                _ => 2,
            },
        };
    }
    false
}

/// Lossy but total: byte `b` becomes `char::from(b)`
#[allow(clippy::unnecessary_wraps)]
fn latin1(bytes: &[u8]) -> Option<Cow<'_, str>> {
    Some(encoding_rs::mem::decode_latin1(bytes))
}

/// The result of decoding a file: the lines, and the name of the candidate
/// encoding that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    /// Label of the `EncodingCandidate` that succeeded
    pub encoding: &'static str,
    /// The file's lines, terminators stripped
    pub lines: Vec<String>,
}

/// Return the lines of the file at `path`, with line terminators removed.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    read_decoded(path).map(|decoded| decoded.lines)
}

/// Like `read_lines`, but also reports which encoding was used.
pub fn read_decoded(path: &Path) -> Result<Decoded> {
    let metadata = fs::metadata(path).map_err(|e| LineError::reading(path, e))?;
    if !metadata.is_file() {
        return Err(LineError::NotAFile { path: path.to_owned() });
    }
    let bytes = fs::read(path).map_err(|e| LineError::reading(path, e))?;
    let Some((candidate, text)) = decode_bytes(&bytes) else {
        return Err(LineError::DecodeExhausted { path: path.to_owned() });
    };
    tracing::debug!(path = %path.display(), encoding = candidate.name, "decoded");
    let lines = lines_of(&text).map(str::to_owned).collect();
    Ok(Decoded { encoding: candidate.name, lines })
}

/// Decode `bytes` with the first candidate in `CANDIDATES` that accepts them.
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> Option<(EncodingCandidate, Cow<'_, str>)> {
    for candidate in CANDIDATES {
        if let Some(text) = candidate.decode(bytes) {
            return Some((*candidate, text));
        }
    }
    None
}

/// Iterate over the lines of `text`. A line ends at `\r\n`, `\n`, or a lone
/// `\r`; the terminator isn't part of the line. A final line needn't be
/// terminated, and an empty `text` has no lines.
#[must_use]
pub fn lines_of(text: &str) -> Lines<'_> {
    Lines { rest: text }
}

/// The iterator returned by `lines_of`
pub struct Lines<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Lines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        if self.rest.is_empty() {
            return None;
        }
        let bytes = self.rest.as_bytes();
        let Some(end) = memchr2(b'\n', b'\r', bytes) else {
            return Some(std::mem::take(&mut self.rest));
        };
        let line = &self.rest[..end];
        let crlf = bytes[end] == b'\r' && bytes.get(end + 1) == Some(&b'\n');
        let terminator_len = if crlf { 2 } else { 1 };
        self.rest = &self.rest[end + terminator_len..];
        Some(line)
    }
}

#[allow(clippy::pedantic)]
#[cfg(test)]
mod test {
    use super::*;
    use assert_fs::{prelude::*, TempDir};

    fn split(text: &str) -> Vec<&str> {
        lines_of(text).collect()
    }

    #[test]
    fn every_terminator_style_ends_a_line() {
        assert_eq!(split("a\nb\r\nc\rd"), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn empty_lines_and_surrounding_blanks_survive() {
        assert_eq!(split("  a \n\n\tb\n"), vec!["  a ", "", "\tb"]);
        assert_eq!(split("\n"), vec![""]);
        assert_eq!(split("\r\n\r\n"), vec!["", ""]);
    }

    #[test]
    fn an_empty_text_has_no_lines() {
        assert!(split("").is_empty());
    }

    #[test]
    fn a_missing_final_terminator_still_ends_the_last_line() {
        assert_eq!(split("x\ny"), vec!["x", "y"]);
        assert_eq!(split("x\ny\n"), vec!["x", "y"]);
    }

    fn encoding_of(bytes: &[u8]) -> &'static str {
        decode_bytes(bytes).unwrap().0.name
    }

    #[test]
    fn candidates_are_tried_in_priority_order() {
        let names: Vec<_> = CANDIDATES.iter().map(|c| c.name).collect();
        assert_eq!(names, ["utf-8", "utf-8-sig", "gbk", "gb18030", "latin-1"]);
    }

    #[test]
    fn plain_utf8_is_utf8() {
        assert_eq!(encoding_of("naïve 中文\n".as_bytes()), "utf-8");
        assert_eq!(encoding_of(b""), "utf-8");
    }

    #[test]
    fn a_utf8_bom_is_stripped() {
        let (candidate, text) = decode_bytes(b"\xEF\xBB\xBFhello\nworld\n").unwrap();
        assert_eq!(candidate.name, "utf-8-sig");
        assert_eq!(text, "hello\nworld\n");
    }

    #[test]
    fn gbk_text_is_recognized() {
        let (bytes, _, _) = GBK.encode("中文\n排序\n");
        assert_eq!(encoding_of(&bytes), "gbk");
        assert_eq!(decode_bytes(&bytes).unwrap().1, "中文\n排序\n");
    }

    #[test]
    fn text_outside_gbk_falls_through_to_gb18030() {
        let (bytes, _, _) = GB18030.encode("中文😀\n");
        assert_eq!(encoding_of(&bytes), "gb18030");
        assert_eq!(decode_bytes(&bytes).unwrap().1, "中文😀\n");
    }

    #[test]
    fn a_lone_0x80_is_not_gbk() {
        let (candidate, text) = decode_bytes(b"5\x80\n").unwrap();
        assert_eq!(candidate.name, "latin-1");
        assert_eq!(text, "5\u{80}\n");
        // 0x80 as a trail byte is fine
        assert_eq!(encoding_of(b"\x81\x80\n"), "gbk");
    }

    #[test]
    fn anything_else_is_latin1() {
        let (candidate, text) = decode_bytes(b"caf\xe9\n").unwrap();
        assert_eq!(candidate.name, "latin-1");
        assert_eq!(text, "café\n");
    }

    #[test]
    fn read_lines_decodes_and_splits_a_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.child("mixed.txt");
        file.write_binary(b"\xEF\xBB\xBFone\r\ntwo\n\nthree").unwrap();
        let decoded = read_decoded(file.path()).unwrap();
        assert_eq!(decoded.encoding, "utf-8-sig");
        assert_eq!(decoded.lines, vec!["one", "two", "", "three"]);
    }

    #[test]
    fn read_lines_rejects_missing_files_and_directories() {
        let temp = TempDir::new().unwrap();
        let missing = temp.child("missing.txt");
        assert!(matches!(read_lines(missing.path()), Err(LineError::NotFound { .. })));
        assert!(matches!(read_lines(temp.path()), Err(LineError::NotAFile { .. })));
    }
}
