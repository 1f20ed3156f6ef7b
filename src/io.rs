use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::error::VmError;
use crate::stats::Statistics;
use crate::translation::Translation;

/// Lazily yields one logical address per non-blank line.
pub struct AddressReader<R> {
    lines: io::Lines<R>,
    line: usize,
}

impl<R: BufRead> AddressReader<R> {
    pub fn new(reader: R) -> Self {
        AddressReader {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl AddressReader<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, VmError> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for AddressReader<R> {
    type Item = Result<u32, VmError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let next = self.lines.next()?;
            self.line += 1;
            let line = match next {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(VmError::AddressRead {
                        line: self.line,
                        source,
                    }));
                }
            };

            let token = line.trim();
            if token.is_empty() {
                continue;
            }
            return Some(token.parse().map_err(|_| VmError::InvalidAddress {
                line: self.line,
                token: token.to_string(),
            }));
        }
    }
}

/// Emit one translation: the bare value, or the full
/// `Virtual address: .. Physical address: .. Value: ..` line when `detail`.
pub fn write_translation<W: Write>(
    out: &mut W,
    translation: &Translation,
    detail: bool,
) -> io::Result<()> {
    if detail {
        writeln!(out, "{}", translation)
    } else {
        writeln!(out, "{}", translation.value)
    }
}

pub fn write_report<W: Write>(out: &mut W, stats: &Statistics) -> io::Result<()> {
    writeln!(out, "{}", stats)
}
