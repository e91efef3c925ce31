//! The op-code boundary consumed by scripted test drivers.
//!
//! A script is a sequence of whitespace-separated tokens, each one a
//! single-character op-code with an optional one-character operand:
//!
//! | token | operation         |
//! |-------|-------------------|
//! | `+c`  | `insert(c)`       |
//! | `-`   | `remove()`        |
//! | `=c`  | `replace(c)`      |
//! | `#`   | `goto_beginning()`|
//! | `*`   | `goto_end()`      |
//! | `>`   | `goto_next()`     |
//! | `<`   | `goto_prev()`     |
//! | `~`   | `clear()`         |
//!
//! Unknown op-codes are silently ignored. A bare `+` is an attempt to
//! insert an absent element and parses to [`ListError::InvalidElement`];
//! a bare `=` is a replace with an absent element, which is a no-op.
//!
//! [`run_script`] replays a whole script against one list, dumping the
//! structure after every line; replaying the same script against all three
//! variants must produce byte-identical output, which is how the
//! cross-variant equivalence tests below are written.

use std::io;

use crate::list::{CursorList, ListError};

/// One decoded script operation over a `char` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Insert(char),
    Remove,
    Replace(char),
    GotoBeginning,
    GotoEnd,
    GotoNext,
    GotoPrev,
    Clear,
}

impl Command {
    /// Decode one script token.
    ///
    /// Returns `Ok(None)` for tokens to ignore (empty, unknown op-code, or
    /// an operand-less `=`), and `Err(ListError::InvalidElement)` for a
    /// bare `+`. Characters past the operand are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use cursor_list::script::Command;
    /// use cursor_list::ListError;
    ///
    /// assert_eq!(Command::parse("+x"), Ok(Some(Command::Insert('x'))));
    /// assert_eq!(Command::parse("%"), Ok(None));
    /// assert_eq!(Command::parse("+"), Err(ListError::InvalidElement));
    /// ```
    pub fn parse(token: &str) -> Result<Option<Command>, ListError> {
        let mut chars = token.chars();
        let op = match chars.next() {
            Some(op) => op,
            None => return Ok(None),
        };
        let operand = chars.next();
        Ok(Some(match op {
            // A bare `+` is deliberately an error, not an ignored token:
            // this is the one boundary where inserting an absent element
            // can be expressed at all, so it is reported instead of
            // skipped.
            '+' => Command::Insert(operand.ok_or(ListError::InvalidElement)?),
            '-' => Command::Remove,
            '=' => match operand {
                Some(c) => Command::Replace(c),
                // Replacing with an absent element is a no-op, not an error.
                None => return Ok(None),
            },
            '#' => Command::GotoBeginning,
            '*' => Command::GotoEnd,
            '>' => Command::GotoNext,
            '<' => Command::GotoPrev,
            '~' => Command::Clear,
            _ => return Ok(None),
        }))
    }

    /// Execute the command against `list`.
    ///
    /// Only `Insert` can fail; the boolean and `Option` results of the
    /// other operations are discarded, since a replay only observes the
    /// list through its structure dumps.
    pub fn apply<L: CursorList<char>>(self, list: &mut L) -> Result<(), ListError> {
        match self {
            Command::Insert(c) => list.insert(c)?,
            Command::Remove => {
                list.remove();
            }
            Command::Replace(c) => {
                list.replace(c);
            }
            Command::GotoBeginning => {
                list.goto_beginning();
            }
            Command::GotoEnd => {
                list.goto_end();
            }
            Command::GotoNext => {
                list.goto_next();
            }
            Command::GotoPrev => {
                list.goto_prev();
            }
            Command::Clear => list.clear(),
        }
        Ok(())
    }
}

/// Apply every token of `line` to `list`, then dump the list's structure
/// to `sink`. Failed inserts write an `Error: ...` line and the replay
/// continues with the next token.
pub fn run_line<L, W>(list: &mut L, line: &str, sink: &mut W) -> io::Result<()>
where
    L: CursorList<char>,
    W: io::Write,
{
    for token in line.split_whitespace() {
        let command = match Command::parse(token) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(sink, "Error: {}", e)?;
                continue;
            }
        };
        if let Err(e) = command.apply(list) {
            writeln!(sink, "Error: {}", e)?;
        }
    }
    list.show_structure(sink)
}

/// Replay a multi-line script. Blank lines are skipped; list state carries
/// over from line to line, so a script is one continuous session with a
/// structure dump after every line.
///
/// # Examples
///
/// ```
/// use cursor_list::script::run_script;
/// use cursor_list::ArrayList;
///
/// let mut list = ArrayList::new(4);
/// let mut out = Vec::new();
/// run_script(&mut list, "+a +b\n# -", &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "a b {capacity = 4, length = 2, cursor = 1}\n\
///      b {capacity = 4, length = 1, cursor = 0}\n",
/// );
/// ```
pub fn run_script<L, W>(list: &mut L, script: &str, sink: &mut W) -> io::Result<()>
where
    L: CursorList<char>,
    W: io::Write,
{
    for line in script.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        run_line(list, line, sink)?;
    }
    Ok(())
}
