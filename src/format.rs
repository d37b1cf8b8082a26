//! Textual representations of UUIDs.

#[cfg(not(feature = "std"))]
use core as std;

use std::{fmt, ops, str};

use fstr::FStr;

use crate::{Error, Uuid};

const DIGITS: &[u8; 16] = b"0123456789abcdef";

/// String representation styles, each with the single-letter specifier accepted by
/// [`Format::from_str`](str::FromStr).
///
/// | Specifier | Style             | Example                                         |
/// | --------- | ----------------- | ----------------------------------------------- |
/// | `N`       | [`Simple`]        | `382c74c3721d4f3480e557657b6cbc27`              |
/// | `D`       | [`Hyphenated`]    | `382c74c3-721d-4f34-80e5-57657b6cbc27`          |
/// | `B`       | [`Braced`]        | `{382c74c3-721d-4f34-80e5-57657b6cbc27}`        |
/// | `P`       | [`Parenthesized`] | `(382c74c3-721d-4f34-80e5-57657b6cbc27)`        |
/// | `U`       | [`Urn`]           | `urn:uuid:382c74c3-721d-4f34-80e5-57657b6cbc27` |
///
/// [`Simple`]: Format::Simple
/// [`Hyphenated`]: Format::Hyphenated
/// [`Braced`]: Format::Braced
/// [`Parenthesized`]: Format::Parenthesized
/// [`Urn`]: Format::Urn
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum Format {
    /// 32 hexadecimal digits.
    Simple,
    /// The 8-4-4-4-12 canonical form.
    #[default]
    Hyphenated,
    /// The canonical form enclosed in braces.
    Braced,
    /// The canonical form enclosed in parentheses.
    Parenthesized,
    /// The canonical form prefixed by `urn:uuid:`.
    Urn,
}

impl Format {
    /// Returns the single-letter specifier of the style.
    pub const fn specifier(self) -> char {
        match self {
            Self::Simple => 'N',
            Self::Hyphenated => 'D',
            Self::Braced => 'B',
            Self::Parenthesized => 'P',
            Self::Urn => 'U',
        }
    }

    /// Returns the length of the string representation in this style.
    pub const fn encoded_len(self) -> usize {
        match self {
            Self::Simple => 32,
            Self::Hyphenated => 36,
            Self::Braced | Self::Parenthesized => 38,
            Self::Urn => 45,
        }
    }

    /// Returns the prefix and suffix around the hexadecimal digits.
    const fn delimiters(self) -> (&'static str, &'static str) {
        match self {
            Self::Simple | Self::Hyphenated => ("", ""),
            Self::Braced => ("{", "}"),
            Self::Parenthesized => ("(", ")"),
            Self::Urn => ("urn:uuid:", ""),
        }
    }

    /// Detects the style of a string from its length and delimiters.
    fn detect(src: &str) -> Option<Self> {
        match (src.len(), src.as_bytes().first()) {
            (32, _) => Some(Self::Simple),
            (36, _) => Some(Self::Hyphenated),
            (38, Some(b'{')) => Some(Self::Braced),
            (38, Some(b'(')) => Some(Self::Parenthesized),
            (45, _) => Some(Self::Urn),
            _ => None,
        }
    }
}

impl str::FromStr for Format {
    type Err = Error;

    /// Creates an object from a single-letter specifier (`N`, `D`, `B`, `P`, or `U`) in either
    /// case.
    fn from_str(src: &str) -> Result<Self, Self::Err> {
        match src {
            "N" | "n" => Ok(Self::Simple),
            "D" | "d" => Ok(Self::Hyphenated),
            "B" | "b" => Ok(Self::Braced),
            "P" | "p" => Ok(Self::Parenthesized),
            "U" | "u" => Ok(Self::Urn),
            _ => Err(Error::UnknownFormat),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.specifier())
    }
}

impl Uuid {
    /// Returns the 8-4-4-4-12 hexadecimal string representation stored in a stack-allocated
    /// structure that can be dereferenced as `str` and [`Display`](fmt::Display)ed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::Uuid;
    ///
    /// let x = "382c74c3-721d-4f34-80e5-57657b6cbc27".parse::<Uuid>()?;
    /// let y = x.encode();
    /// assert_eq!(&y as &str, "382c74c3-721d-4f34-80e5-57657b6cbc27");
    /// assert_eq!(format!("{}", y), "382c74c3-721d-4f34-80e5-57657b6cbc27");
    /// # Ok::<(), uuid1::Error>(())
    /// ```
    pub fn encode(&self) -> FStr<36> {
        let mut buffer = [0u8; 36];
        write_hex(&mut buffer, self.as_bytes(), true);
        debug_assert!(buffer.is_ascii());
        // SAFETY: `write_hex` fills the buffer with ASCII characters only.
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Returns the 32-digit hexadecimal string representation without hyphens.
    pub fn encode_simple(&self) -> FStr<32> {
        let mut buffer = [0u8; 32];
        write_hex(&mut buffer, self.as_bytes(), false);
        debug_assert!(buffer.is_ascii());
        // SAFETY: `write_hex` fills the buffer with ASCII characters only.
        unsafe { FStr::from_inner_unchecked(buffer) }
    }

    /// Returns the string representation in the specified style.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::{Format, Uuid};
    ///
    /// let x = Uuid::NAMESPACE_URL;
    /// assert_eq!(&*x.format(Format::Braced), "{6ba7b811-9dad-11d1-80b4-00c04fd430c8}");
    /// assert_eq!(x.format(Format::Simple).to_string(), "6ba7b8119dad11d180b400c04fd430c8");
    /// ```
    pub fn format(&self, format: Format) -> Formatted {
        let (prefix, suffix) = format.delimiters();
        let len = format.encoded_len();
        let mut buffer = [0u8; 45];
        buffer[..prefix.len()].copy_from_slice(prefix.as_bytes());
        write_hex(
            &mut buffer[prefix.len()..len - suffix.len()],
            self.as_bytes(),
            format != Format::Simple,
        );
        buffer[len - suffix.len()..len].copy_from_slice(suffix.as_bytes());
        Formatted { buffer, len }
    }

    /// Creates an object from any of the supported string representations.
    ///
    /// Hexadecimal digits are accepted in either case. Surrounding whitespace is not allowed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedText`] if the string matches none of the [`Format`] styles.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use uuid1::{Error, Uuid};
    ///
    /// let x = Uuid::parse("{6BA7B810-9DAD-11D1-80B4-00C04FD430C8}")?;
    /// assert_eq!(x, Uuid::NAMESPACE_DNS);
    /// assert_eq!(Uuid::parse("not-a-guid"), Err(Error::MalformedText));
    /// # Ok::<(), uuid1::Error>(())
    /// ```
    pub fn parse(src: &str) -> Result<Self, Error> {
        let format = Format::detect(src).ok_or(Error::MalformedText)?;
        Self::parse_exact(src, format)
    }

    /// Creates an object from the string representation in the specified style only.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedText`] if the string does not conform to the style.
    pub fn parse_exact(src: &str, format: Format) -> Result<Self, Error> {
        const ERR: Error = Error::MalformedText;
        if src.len() != format.encoded_len() {
            return Err(ERR);
        }

        let (prefix, suffix) = format.delimiters();
        let (head, rest) = src.as_bytes().split_at(prefix.len());
        let (digits, tail) = rest.split_at(rest.len() - suffix.len());
        if !head.eq_ignore_ascii_case(prefix.as_bytes()) || tail != suffix.as_bytes() {
            return Err(ERR);
        }

        read_hex(digits, format != Format::Simple)
            .map(Self::from)
            .ok_or(ERR)
    }

    /// Creates an object from any of the supported string representations, returning `None` on
    /// failure.
    pub fn try_parse(src: &str) -> Option<Self> {
        Self::parse(src).ok()
    }

    /// Creates an object from the string representation in the specified style, returning `None`
    /// on failure.
    pub fn try_parse_exact(src: &str, format: Format) -> Option<Self> {
        Self::parse_exact(src, format).ok()
    }
}

/// Writes hexadecimal digits of `bytes` to `dst`, inserting hyphens in the 8-4-4-4-12 positions if
/// `hyphenated` is true.
fn write_hex(dst: &mut [u8], bytes: &[u8; 16], hyphenated: bool) {
    let mut dst_iter = dst.iter_mut();
    for (i, e) in bytes.iter().enumerate() {
        if let Some(d) = dst_iter.next() {
            *d = DIGITS[(e >> 4) as usize];
        }
        if let Some(d) = dst_iter.next() {
            *d = DIGITS[(e & 15) as usize];
        }
        if hyphenated && (i == 3 || i == 5 || i == 7 || i == 9) {
            if let Some(d) = dst_iter.next() {
                *d = b'-';
            }
        }
    }
    debug_assert!(dst_iter.next().is_none());
}

/// Reads 32 hexadecimal digits, expecting hyphens in the 8-4-4-4-12 positions if `hyphenated` is
/// true.
fn read_hex(src: &[u8], hyphenated: bool) -> Option<[u8; 16]> {
    let mut dst = [0u8; 16];
    let mut iter = src.iter();
    for (i, e) in dst.iter_mut().enumerate() {
        let hi = (*iter.next()? as char).to_digit(16)? as u8;
        let lo = (*iter.next()? as char).to_digit(16)? as u8;
        *e = (hi << 4) | lo;
        if hyphenated && (i == 3 || i == 5 || i == 7 || i == 9) && *iter.next()? != b'-' {
            return None;
        }
    }
    iter.next().is_none().then_some(dst)
}

/// Concrete return type of [`Uuid::format()`] containing a stack-allocated string representation.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Formatted {
    buffer: [u8; 45],
    len: usize,
}

impl ops::Deref for Formatted {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        let bytes = &self.buffer[..self.len];
        debug_assert!(bytes.is_ascii());
        // SAFETY: `Uuid::format` writes ASCII characters only.
        unsafe { str::from_utf8_unchecked(bytes) }
    }
}

impl AsRef<str> for Formatted {
    fn as_ref(&self) -> &str {
        self
    }
}

impl fmt::Display for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self)
    }
}

impl fmt::Debug for Formatted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}
