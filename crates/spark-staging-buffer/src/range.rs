use core::ops::Range;

use crate::error::{BufferError, Result};

/// 校验 `offset`/`length` 是否落在长度为 `source_len` 的源切片内，并返回对应区间。
///
/// `offset + length` 溢出或越过 `source_len` 均视为越界；校验发生在任何数据搬运之前。
pub(crate) fn checked_range(offset: usize, length: usize, source_len: usize) -> Result<Range<usize>> {
    match offset.checked_add(length) {
        Some(end) if end <= source_len => Ok(offset..end),
        _ => {
            tracing::trace!(offset, length, source_len, "rejected out-of-range source slice");
            Err(BufferError::IndexOutOfRange {
                offset,
                length,
                source_len,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ranges_inside_source() {
        assert_eq!(checked_range(0, 0, 0), Ok(0..0));
        assert_eq!(checked_range(2, 3, 5), Ok(2..5));
        assert_eq!(checked_range(5, 0, 5), Ok(5..5));
    }

    #[test]
    fn rejects_ranges_past_the_end() {
        assert!(checked_range(6, 0, 5).is_err());
        assert!(checked_range(1, 5, 5).is_err());
    }

    #[test]
    fn rejects_overflowing_sum() {
        let err = checked_range(usize::MAX, 2, 8).unwrap_err();
        assert_eq!(
            err,
            BufferError::IndexOutOfRange {
                offset: usize::MAX,
                length: 2,
                source_len: 8
            }
        );
    }
}
