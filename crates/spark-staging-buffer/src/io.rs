//! `std::io` 适配层：让暂存缓冲可以直接挂在任意 `Write` 管道之下。
//!
//! - `write` 写入 `min(buf.len(), remaining())` 字节并返回实际写入数；
//!   缓冲写满时返回 `Ok(0)`，`write_all` 会据此报告 `WriteZero`；
//! - `flush` 为空操作，数据写入即可见。

use std::io;

use crate::{
    contiguous::GrowableContiguousBuffer, error::BufferError, growable::GrowableBuffer,
    segmented::SegmentedGrowableBuffer, staging::StagingBuffer,
};

impl From<BufferError> for io::Error {
    fn from(err: BufferError) -> Self {
        let kind = match err {
            BufferError::BufferFull { .. } => io::ErrorKind::WriteZero,
            BufferError::InvalidArgument { .. } | BufferError::IndexOutOfRange { .. } => {
                io::ErrorKind::InvalidInput
            }
        };
        io::Error::new(kind, err)
    }
}

/// 写入不超过剩余容量的前缀，返回写入字节数。
fn write_prefix<B: GrowableBuffer + ?Sized>(buffer: &mut B, buf: &[u8]) -> io::Result<usize> {
    let n = buf.len().min(buffer.remaining());
    if n == 0 {
        return Ok(0);
    }
    buffer.put_range(buf, 0, n)?;
    Ok(n)
}

macro_rules! impl_io_write {
    ($($ty:ty),+ $(,)?) => {$(
        impl io::Write for $ty {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                write_prefix(self, buf)
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }
    )+};
}

impl_io_write!(GrowableContiguousBuffer, SegmentedGrowableBuffer, StagingBuffer);

#[cfg(test)]
mod tests {
    use std::io::{Read, Write};

    use super::*;

    #[test]
    fn write_all_fills_then_reports_write_zero() {
        let mut buffer = SegmentedGrowableBuffer::with_min_segment(6, 2).unwrap();
        buffer.write_all(b"abcd").unwrap();
        assert_eq!(buffer.write(b"efgh").unwrap(), 2);
        assert_eq!(buffer.write(b"i").unwrap(), 0);
        let err = buffer.write_all(b"j").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WriteZero);
        buffer.flush().unwrap();

        let mut out = String::new();
        buffer.read_stream().read_to_string(&mut out).unwrap();
        assert_eq!(out, "abcdef");
    }

    #[test]
    fn io_copy_streams_into_contiguous_buffer() {
        let mut buffer = GrowableContiguousBuffer::with_initial_size(1024, 16).unwrap();
        let source = vec![42u8; 700];
        let copied = io::copy(&mut source.as_slice(), &mut buffer).unwrap();
        assert_eq!(copied, 700);
        assert_eq!(buffer.as_slice(), source.as_slice());
    }

    #[test]
    fn buffer_errors_map_to_io_kinds() {
        let full: io::Error = BufferError::BufferFull {
            requested: 1,
            remaining: 0,
        }
        .into();
        assert_eq!(full.kind(), io::ErrorKind::WriteZero);
        let range: io::Error = BufferError::IndexOutOfRange {
            offset: 3,
            length: 1,
            source_len: 2,
        }
        .into();
        assert_eq!(range.kind(), io::ErrorKind::InvalidInput);
    }
}
