use std::io::{self, BufRead};

/// Sentence boundary marker of the tagger and the dependency parser.
pub const EOS: &str = "EOS";

/// Prefix of chunk lines.
pub const CHUNK_MARKER: char = '*';

/// Read a line without its line terminator.
///
/// Returns `false` at the end of the input.
pub(crate) fn read_line(read: &mut impl BufRead, line: &mut String) -> io::Result<bool> {
    line.clear();

    if read.read_line(line)? == 0 {
        return Ok(false);
    }

    let len = line.trim_end_matches(&['\n', '\r'][..]).len();
    line.truncate(len);

    Ok(true)
}

pub(crate) fn is_eos(line: &str) -> bool {
    line.eq_ignore_ascii_case(EOS)
}
