use std::io::{self, Read};

/// Adapts a [`Read`] into a single-pass iterator over its bytes.
///
/// Iteration ends at EOF or at the first read error. The error is kept and can
/// be retrieved with [`take_error`](IoReadIterator::take_error) once the
/// consumer is done.
pub struct IoReadIterator<R> {
    reader: R,
    buf: Vec<u8>,
    valid_slice_start: usize,
    valid_slice_end: usize,
    error: Option<io::Error>,
}

impl<R> IoReadIterator<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: vec![0; 4096],
            valid_slice_start: 0,
            valid_slice_end: 0,
            error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

impl<R: Read> Iterator for IoReadIterator<R> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        if self.valid_slice_start != self.valid_slice_end {
            let b = self.buf[self.valid_slice_start];
            self.valid_slice_start += 1;
            return Some(b);
        }
        if self.error.is_some() {
            return None;
        }
        loop {
            match self.reader.read(&mut self.buf) {
                Ok(0) => return None,
                Ok(read_len) => {
                    self.valid_slice_start = 1;
                    self.valid_slice_end = read_len;
                    return Some(self.buf[0]);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    struct Chunked<'a> {
        chunks: Vec<&'a [u8]>,
    }

    impl Read for Chunked<'_> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let chunk = self.chunks.remove(0);
            buf[..chunk.len()].copy_from_slice(chunk);
            Ok(chunk.len())
        }
    }

    struct Failing;

    impl Read for Failing {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("disk on fire"))
        }
    }

    #[test]
    fn yields_bytes_across_reads() {
        let reader = Chunked {
            chunks: vec![b"[1,".as_slice(), b" 2".as_slice(), b"]".as_slice()],
        };
        let bytes: Vec<u8> = IoReadIterator::new(reader).collect();
        assert_eq!(bytes, b"[1, 2]");
    }

    #[test]
    fn reads_larger_than_buffer() {
        let data = vec![b'7'; 10_000];
        let bytes: Vec<u8> = IoReadIterator::new(&data[..]).collect();
        assert_eq!(bytes.len(), 10_000);
    }

    #[test]
    fn keeps_read_error() {
        let mut it = IoReadIterator::new(Failing);
        assert_eq!(it.next(), None);
        assert_eq!(it.take_error().map(|e| e.to_string()), Some("disk on fire".into()));
    }
}
