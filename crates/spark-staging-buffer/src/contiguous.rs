use alloc::{boxed::Box, vec};

use crate::{
    error::{BufferError, Result},
    growable::GrowableBuffer,
    range::checked_range,
    stream::ReadStream,
};

/// 单段缓冲的默认初始物理大小（128 KiB）。
pub const INIT_SIZE: usize = 128 * 1024;

/// 每次扩容的倍数。
const GROWTH_FACTOR: usize = 2;

/// `GrowableContiguousBuffer` 是“写满即倍增”的单段暂存缓冲。
///
/// # 设计动机（Why）
/// - 下游需要一块连续内存时（例如直接交给签名或校验计算），单段布局读取零成本；
/// - 以 `min(capacity, INIT_SIZE)` 起步、每次翻倍，整个生命周期最多重新分配
///   `log2(capacity / INIT_SIZE)` 次，每个字节摊还只复制常数次。
///
/// # 结构设计（How）
/// - `buf` 是唯一的物理存储，长度即物理容量；
/// - 写入发现物理空间已满时调用 `expand`：新长度为 `min(capacity, len << 1)`，
///   左移溢出时直接取 `capacity`，随后整体复制旧内容；
/// - 批量写入按“扩容 → 填满剩余物理空间 → 推进源游标”循环，直到请求全部写完。
///
/// # 契约说明（What）
/// - 始终满足 `position <= buf.len() <= capacity`；
/// - [`raw_view`](Self::raw_view) 返回整个物理数组，`position` 之后的字节是陈旧数据。
///
/// # 清空策略（Trade-offs）
/// - 从未扩容（`buf.len() <= initial_size`）时 `clear` 只回拨 `position`，保留分配以便复用；
/// - 扩容过则整体重建到初始大小，主动释放超大分配。
///   这是显式的时空权衡：常见的小对象不反复分配，偶发的大对象不长期占用内存。
///
/// 相等比较只看逻辑状态：`capacity`、`initial_size` 与 `[0, position)` 的内容。
#[derive(Debug, Clone)]
pub struct GrowableContiguousBuffer {
    capacity: usize,
    initial_size: usize,
    position: usize,
    buf: Box<[u8]>,
}

impl GrowableContiguousBuffer {
    /// 以默认初始大小 [`INIT_SIZE`] 创建缓冲。
    ///
    /// `capacity` 为 0 时返回 [`BufferError::InvalidArgument`]。
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_initial_size(capacity, INIT_SIZE)
    }

    /// 以指定初始物理大小创建缓冲。
    ///
    /// # 契约说明
    /// - `capacity` 与 `initial_size` 都必须大于 0；
    /// - 实际初始分配为 `min(capacity, initial_size)`；
    /// - `initial_size` 同时是 `clear` 判断“是否扩容过”的阈值。
    pub fn with_initial_size(capacity: usize, initial_size: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(BufferError::InvalidArgument {
                detail: "capacity must be greater than zero",
            });
        }
        if initial_size == 0 {
            return Err(BufferError::InvalidArgument {
                detail: "initial size must be greater than zero",
            });
        }
        Ok(Self {
            capacity,
            initial_size,
            position: 0,
            buf: initial_allocation(capacity, initial_size),
        })
    }

    /// 整个物理数组；只有 `[0, position)` 是有效数据。
    pub fn raw_view(&self) -> &[u8] {
        &self.buf
    }

    /// 已写入的有效字节。
    pub fn as_slice(&self) -> &[u8] {
        &self.buf[..self.position]
    }

    /// 配置的初始物理大小。
    pub fn initial_size(&self) -> usize {
        self.initial_size
    }

    fn physical_remaining(&self) -> usize {
        self.buf.len() - self.position
    }

    fn expand(&mut self) {
        let current = self.buf.len();
        let new_len = grown_len(current, self.capacity);

        let mut grown = vec![0u8; new_len].into_boxed_slice();
        grown[..current].copy_from_slice(&self.buf);
        self.buf = grown;
        tracing::debug!(
            from = current,
            to = new_len,
            capacity = self.capacity,
            "expanded contiguous staging buffer"
        );
    }

    fn reject_full(&self, requested: usize) -> BufferError {
        tracing::trace!(
            requested,
            remaining = self.remaining(),
            capacity = self.capacity,
            "rejected append on full contiguous buffer"
        );
        BufferError::BufferFull {
            requested,
            remaining: self.remaining(),
        }
    }
}

impl PartialEq for GrowableContiguousBuffer {
    fn eq(&self, other: &Self) -> bool {
        self.capacity == other.capacity
            && self.initial_size == other.initial_size
            && self.as_slice() == other.as_slice()
    }
}

impl Eq for GrowableContiguousBuffer {}

/// 倍增后的物理长度，封顶为 `capacity`；乘法溢出时直接取 `capacity`。
fn grown_len(current: usize, capacity: usize) -> usize {
    current
        .checked_mul(GROWTH_FACTOR)
        .map_or(capacity, |doubled| doubled.min(capacity))
}

fn initial_allocation(capacity: usize, initial_size: usize) -> Box<[u8]> {
    vec![0u8; capacity.min(initial_size)].into_boxed_slice()
}

impl GrowableBuffer for GrowableContiguousBuffer {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn position(&self) -> usize {
        self.position
    }

    fn allocated(&self) -> usize {
        self.buf.len()
    }

    fn put_u8(&mut self, byte: u8) -> Result<()> {
        if !self.has_remaining() {
            return Err(self.reject_full(1));
        }
        if self.physical_remaining() == 0 {
            self.expand();
        }
        self.buf[self.position] = byte;
        self.position += 1;
        Ok(())
    }

    fn put_range(&mut self, src: &[u8], offset: usize, length: usize) -> Result<()> {
        let range = checked_range(offset, length, src.len())?;
        // 完全写满时即使空写入也拒绝；超出剩余容量的请求整体失败，不做部分写入。
        if !self.has_remaining() || length > self.remaining() {
            return Err(self.reject_full(length));
        }

        let mut pending = &src[range];
        while !pending.is_empty() {
            if self.physical_remaining() == 0 {
                self.expand();
            }
            let n = pending.len().min(self.physical_remaining());
            self.buf[self.position..self.position + n].copy_from_slice(&pending[..n]);
            self.position += n;
            pending = &pending[n..];
        }
        Ok(())
    }

    fn clear(&mut self) {
        if self.buf.len() <= self.initial_size {
            self.position = 0;
            return;
        }
        tracing::debug!(
            released = self.buf.len(),
            retained = self.capacity.min(self.initial_size),
            "reinitialized grown contiguous staging buffer"
        );
        self.buf = initial_allocation(self.capacity, self.initial_size);
        self.position = 0;
    }

    fn read_stream(&self) -> ReadStream<'_> {
        ReadStream::borrowed(self.as_slice())
    }
}
