use alloc::{boxed::Box, vec, vec::Vec};

use bytes::BytesMut;

use crate::{
    error::{BufferError, Result},
    growable::GrowableBuffer,
    range::checked_range,
    stream::ReadStream,
};

/// 首段的默认大小（128 KiB）。
pub const MIN_SEGMENT: usize = 128 * 1024;

/// 相邻两段的大小倍数。
pub const SEGMENT_GROWTH_FACTOR: usize = 4;

/// `SegmentedGrowableBuffer` 是“写满即追加新段”的多段暂存缓冲。
///
/// # 设计动机（Why）
/// - 单段倍增在每次扩容时都要复制全部已写字节，对接近上限的大对象代价明显；
/// - 多段布局从不搬运已写字节，只在物化读视图且存在多段时合并一次。
///
/// # 结构设计（How）
/// - `segments` 按写入顺序保存各段，最后一段为活动段，`active_offset` 为其写入游标；
/// - 活动段写满且仍有容量时追加新段，大小为 `min(上一段 * 4, capacity - total_allocated)`；
///   首段大小为 `min(min_segment, capacity)`；
/// - 段以 `Vec<Box<[u8]>>` 按插入顺序索引，没有指针链或回指。
///
/// # 契约说明（What）
/// - 除活动段外每一段都已写满；`sum(len(segments)) == total_allocated <= capacity`；
/// - 批量写入先整体校验剩余容量，超出时原子失败，不写入任何字节；
/// - `clear` 只保留首段并复用其存储，与 [`GrowableContiguousBuffer`](crate::GrowableContiguousBuffer)
///   可能整体重建的策略不同。
///
/// 相等比较只看逻辑状态：`capacity`、`min_segment` 与已写入的字节，不比较段布局与陈旧字节。
#[derive(Debug, Clone)]
pub struct SegmentedGrowableBuffer {
    capacity: usize,
    min_segment: usize,
    position: usize,
    segments: Vec<Box<[u8]>>,
    active_offset: usize,
    total_allocated: usize,
}

impl SegmentedGrowableBuffer {
    /// 以默认首段大小 [`MIN_SEGMENT`] 创建缓冲。
    ///
    /// `capacity` 为 0 时返回 [`BufferError::InvalidArgument`]。
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_min_segment(capacity, MIN_SEGMENT)
    }

    /// 以指定首段大小创建缓冲，首段在构造时即分配。
    pub fn with_min_segment(capacity: usize, min_segment: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::InvalidArgument {
                detail: "capacity must be greater than zero",
            });
        }
        if min_segment == 0 {
            return Err(BufferError::InvalidArgument {
                detail: "minimum segment size must be greater than zero",
            });
        }
        let mut buffer = Self {
            capacity,
            min_segment,
            position: 0,
            segments: Vec::new(),
            active_offset: 0,
            total_allocated: 0,
        };
        buffer.add_segment();
        Ok(buffer)
    }

    /// 当前持有的段数。
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    /// 按写入顺序返回各段的长度。
    pub fn segment_lens(&self) -> impl Iterator<Item = usize> + '_ {
        self.segments.iter().map(|segment| segment.len())
    }

    /// 配置的首段大小。
    pub fn min_segment(&self) -> usize {
        self.min_segment
    }

    fn next_segment_size(&self) -> usize {
        next_segment_size(
            self.segments.last().map(|segment| segment.len()),
            self.min_segment,
            self.capacity - self.total_allocated,
        )
    }

    /// 追加一个新段并切换为活动段；容量已耗尽时返回 `false`。
    fn add_segment(&mut self) -> bool {
        let size = self.next_segment_size();
        if size == 0 {
            return false;
        }
        self.segments.push(vec![0u8; size].into_boxed_slice());
        self.active_offset = 0;
        self.total_allocated += size;
        tracing::debug!(
            index = self.segments.len() - 1,
            size,
            total_allocated = self.total_allocated,
            capacity = self.capacity,
            "allocated staging buffer segment"
        );
        true
    }

    /// 返回活动段中尚未写入的尾部，必要时先追加新段。
    fn writable_tail(&mut self, requested: usize) -> Result<&mut [u8]> {
        let active_len = self.segments.last().map_or(0, |segment| segment.len());
        if self.active_offset == active_len && !self.add_segment() {
            return Err(self.reject_full(requested));
        }
        let offset = self.active_offset;
        let remaining = self.remaining();
        self.segments
            .last_mut()
            .map(|segment| &mut segment[offset..])
            .ok_or_else(|| BufferError::BufferFull {
                requested,
                remaining,
            })
    }

    /// 按写入顺序返回已写入的字节块：已满的段，以及活动段的 `[0, active_offset)`。
    fn written_chunks(&self) -> impl Iterator<Item = &[u8]> + '_ {
        let (active, full) = match self.segments.split_last() {
            Some((active, full)) => (&active[..self.active_offset], full),
            None => (&[][..], &[][..]),
        };
        full.iter()
            .map(|segment| &segment[..])
            .chain(core::iter::once(active))
    }

    fn reject_full(&self, requested: usize) -> BufferError {
        tracing::trace!(
            requested,
            remaining = self.remaining(),
            capacity = self.capacity,
            "rejected append on full segmented buffer"
        );
        BufferError::BufferFull {
            requested,
            remaining: self.remaining(),
        }
    }
}

/// 段增长规则：首段取 `min_segment`，之后取上一段的 4 倍，且不超过剩余未分配容量。
///
/// 返回 0 表示容量已全部分配，不应再追加新段。
fn next_segment_size(last: Option<usize>, min_segment: usize, unallocated: usize) -> usize {
    let candidate = match last {
        None => min_segment,
        Some(len) => len.saturating_mul(SEGMENT_GROWTH_FACTOR),
    };
    candidate.min(unallocated)
}

impl PartialEq for SegmentedGrowableBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity
            && self.min_segment == other.min_segment
            && self.position == other.position
            && self
                .written_chunks()
                .flatten()
                .eq(other.written_chunks().flatten())
    }
}

impl Eq for SegmentedGrowableBuffer {}

impl GrowableBuffer for SegmentedGrowableBuffer {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn position(&self) -> usize {
        self.position
    }

    fn allocated(&self) -> usize {
        self.total_allocated
    }

    fn put_u8(&mut self, byte: u8) -> Result<()> {
        if self.position >= self.capacity {
            return Err(self.reject_full(1));
        }
        let tail = self.writable_tail(1)?;
        tail[0] = byte;
        self.active_offset += 1;
        self.position += 1;
        Ok(())
    }

    fn put_range(&mut self, src: &[u8], offset: usize, length: usize) -> Result<()> {
        let range = checked_range(offset, length, src.len())?;
        if length > self.remaining() {
            return Err(self.reject_full(length));
        }

        let mut pending = &src[range];
        while !pending.is_empty() {
            let tail = self.writable_tail(pending.len())?;
            let n = tail.len().min(pending.len());
            tail[..n].copy_from_slice(&pending[..n]);
            self.active_offset += n;
            self.position += n;
            pending = &pending[n..];
        }
        Ok(())
    }

    fn clear(&mut self) {
        if self.segments.len() > 1 {
            tracing::debug!(
                dropped = self.segments.len() - 1,
                released = self.total_allocated - self.segments[0].len(),
                "dropped trailing staging buffer segments"
            );
        }
        self.segments.truncate(1);
        self.active_offset = 0;
        self.position = 0;
        self.total_allocated = self.segments.first().map_or(0, |segment| segment.len());
    }

    fn read_stream(&self) -> ReadStream<'_> {
        match self.segments.as_slice() {
            // 构造时总会分配首段，clear 也只截断到一段，此分支不会出现。
            [] => ReadStream::borrowed(&[]),
            [only] => ReadStream::borrowed(&only[..self.position]),
            [full @ .., active] => {
                let mut merged = BytesMut::with_capacity(self.position);
                for segment in full {
                    merged.extend_from_slice(segment);
                }
                merged.extend_from_slice(&active[..self.active_offset]);
                ReadStream::owned(merged.freeze())
            }
        }
    }
}
