//! Nom-based splitting of a raw line into prefix, command and trailing text.
//!
//! The splitter never rejects a line. Anything it cannot make sense of comes
//! back with empty fields, and the caller decides how to classify it.

use nom::{
    bytes::complete::take_till,
    character::complete::char,
    combinator::opt,
    error::{context, VerboseError},
    sequence::preceded,
    IResult,
};

type ParseResult<I, O> = IResult<I, O, VerboseError<I>>;

/// Parse the message prefix (after `:`, up to the first space).
fn parse_prefix(input: &str) -> ParseResult<&str, &str> {
    context(
        "parsing message prefix",
        preceded(char(':'), take_till(|c| c == ' ')),
    )(input)
}

/// Parse the command token.
fn parse_command(input: &str) -> ParseResult<&str, &str> {
    context("parsing IRC command", take_till(|c| c == ' '))(input)
}

/// Split a line into `[:prefix] command rest`.
///
/// ```text
/// :nick!ident@host PRIVMSG #chan :hello there
///  ^^^^^^^^^^^^^^^ ^^^^^^^ ^^^^^^^^^^^^^^^^^^^
///  prefix          command rest
/// ```
pub(crate) fn parse_line(input: &str) -> ParseResult<&str, LineParts<'_>> {
    let (input, prefix) = context("parsing optional prefix", opt(parse_prefix))(input)?;
    let (input, _) = opt(char::<_, VerboseError<&str>>(' '))(input)?;
    let (rest, command) = parse_command(input)?;

    Ok((
        rest,
        LineParts {
            prefix,
            command,
            trailing: None,
        },
    ))
}

/// The coarse pieces of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct LineParts<'a> {
    /// Prefix without the leading `:`.
    pub prefix: Option<&'a str>,
    /// Command token (textual or numeric).
    pub command: &'a str,
    /// Text after the first `" :"`.
    pub trailing: Option<&'a str>,
}

impl<'a> LineParts<'a> {
    pub fn split(line: &'a str) -> Self {
        let mut parts = match parse_line(line) {
            Ok((_rest, parts)) => parts,
            Err(_) => LineParts {
                prefix: None,
                command: line.split(' ').next().unwrap_or(""),
                trailing: None,
            },
        };
        parts.trailing = line.find(" :").map(|pos| &line[pos + 2..]);
        parts
    }
}

/// The decomposed `nick!ident@host` origin of a prefixed line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Origin<'a> {
    /// Text before `!`, present only if `!` is.
    pub nick: Option<&'a str>,
    /// Text between `!` and `@`, present only if both are.
    pub ident: Option<&'a str>,
    /// Text after `@`, present only if `@` is.
    pub host: Option<&'a str>,
}

impl<'a> Origin<'a> {
    /// Decompose a prefix. A bare server name yields an empty origin.
    pub fn parse(prefix: &'a str) -> Self {
        let bang = prefix.find('!');
        let at = prefix.find('@');

        let nick = bang.map(|b| &prefix[..b]);
        let host = at.map(|a| &prefix[a + 1..]);
        let ident = match (bang, at) {
            (Some(b), Some(a)) if a > b => Some(&prefix[b + 1..a]),
            _ => None,
        };

        Origin { nick, ident, host }
    }
}
