use crate::error::{Error, Result};
use std::io::{ErrorKind, Write};
use std::path::Path;

/// Writes the report as UTF-8, creating missing parent directories.
pub fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, content).map_err(|e| Error::io(path, e))
}

/// Echoes the report to `out`. When the sink rejects the bytes, the part it has
/// not yet taken is written as an ASCII rendition instead.
pub fn echo_report<W: Write>(out: &mut W, content: &str) -> std::io::Result<()> {
    let line = format!("{}\n", content);
    let bytes = line.as_bytes();
    let mut written = 0;

    while written < bytes.len() {
        match out.write(&bytes[written..]) {
            Ok(0) => return Err(ErrorKind::WriteZero.into()),
            Ok(n) => written += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(_) => {
                let rest = String::from_utf8_lossy(&bytes[written..]);
                out.write_all(to_ascii_lossy(&rest).as_bytes())?;
                break;
            }
        }
    }

    out.flush()
}

pub fn to_ascii_lossy(content: &str) -> String {
    content
        .chars()
        .map(|c| if c.is_ascii() { c } else { '?' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AsciiOnly(Vec<u8>);

    impl Write for AsciiOnly {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if !buf.is_ascii() {
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "non-ascii"));
            }
            self.0.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Takes the ASCII prefix of every buffer and fails on a non-ASCII start.
    struct AsciiPrefix(Vec<u8>);

    impl Write for AsciiPrefix {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            let accepted = buf.iter().take_while(|b| b.is_ascii()).count();
            if accepted == 0 && !buf.is_empty() {
                return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, "non-ascii"));
            }
            self.0.extend_from_slice(&buf[..accepted]);
            Ok(accepted)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_echo_partial_write_is_not_repeated() {
        let mut sink = AsciiPrefix(Vec::new());
        echo_report(&mut sink, "Gare de Genève\nEND OF REPORT").unwrap();
        assert_eq!(
            String::from_utf8(sink.0).unwrap(),
            "Gare de Gen?ve\nEND OF REPORT\n"
        );
    }

    #[test]
    fn test_to_ascii_lossy() {
        assert_eq!(to_ascii_lossy("Station Zürich ✓"), "Station Z?rich ?");
        assert_eq!(to_ascii_lossy("plain"), "plain");
    }

    #[test]
    fn test_echo_falls_back_to_ascii() {
        let mut sink = AsciiOnly(Vec::new());
        echo_report(&mut sink, "Gare de Genève").unwrap();
        assert_eq!(String::from_utf8(sink.0).unwrap(), "Gare de Gen?ve\n");

        let mut plain = Vec::new();
        echo_report(&mut plain, "Genève").unwrap();
        assert_eq!(String::from_utf8(plain).unwrap(), "Genève\n");
    }

    #[test]
    fn test_write_report_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reports/nested/run.log");
        write_report(&path, "END OF REPORT").unwrap();
        assert_eq!(std::fs::read_to_string(path).unwrap(), "END OF REPORT");
    }
}
