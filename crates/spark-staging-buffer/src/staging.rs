use crate::{
    contiguous::GrowableContiguousBuffer, error::Result, growable::GrowableBuffer,
    segmented::SegmentedGrowableBuffer, stream::ReadStream,
};

/// 运行期选定策略的暂存缓冲。
///
/// - 由 [`BufferConfig::build`](crate::BufferConfig::build) 构造，也可直接从具体缓冲转换；
/// - 所有 [`GrowableBuffer`] 操作按变体委派，不引入动态分发；
/// - 相等比较沿用各变体的逻辑相等，不同策略的缓冲即使内容相同也不相等。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StagingBuffer {
    Contiguous(GrowableContiguousBuffer),
    Segmented(SegmentedGrowableBuffer),
}

impl From<GrowableContiguousBuffer> for StagingBuffer {
    fn from(buffer: GrowableContiguousBuffer) -> Self {
        StagingBuffer::Contiguous(buffer)
    }
}

impl From<SegmentedGrowableBuffer> for StagingBuffer {
    fn from(buffer: SegmentedGrowableBuffer) -> Self {
        StagingBuffer::Segmented(buffer)
    }
}

macro_rules! delegate {
    ($self:expr, $buffer:ident => $call:expr) => {
        match $self {
            StagingBuffer::Contiguous($buffer) => $call,
            StagingBuffer::Segmented($buffer) => $call,
        }
    };
}

impl GrowableBuffer for StagingBuffer {
    fn capacity(&self) -> usize {
        delegate!(self, buffer => buffer.capacity())
    }

    fn position(&self) -> usize {
        delegate!(self, buffer => buffer.position())
    }

    fn allocated(&self) -> usize {
        delegate!(self, buffer => buffer.allocated())
    }

    fn put_u8(&mut self, byte: u8) -> Result<()> {
        delegate!(self, buffer => buffer.put_u8(byte))
    }

    fn put_range(&mut self, src: &[u8], offset: usize, length: usize) -> Result<()> {
        delegate!(self, buffer => buffer.put_range(src, offset, length))
    }

    fn clear(&mut self) {
        delegate!(self, buffer => buffer.clear())
    }

    fn read_stream(&self) -> ReadStream<'_> {
        delegate!(self, buffer => buffer.read_stream())
    }
}
