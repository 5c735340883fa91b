use crate::{error::Result, stream::ReadStream};

/// `GrowableBuffer` 描述按需增长、上限固定的暂存缓冲契约。
///
/// # 设计背景（Why）
/// - 上传编排层只关心“追加字节、查询进度、读回全部字节、清空复用”四件事，
///   不应感知底层是单段倍增还是多段追加；
/// - 以 trait 表达共同能力，两种增长策略各自实现，避免继承式的共享基类。
///
/// # 契约说明（What）
/// - **容量模型**：`capacity()` 在构造后不变；始终满足
///   `position() <= allocated() <= capacity()`；
/// - **写入**：`put_u8`/`put_range` 失败时不修改任何状态；
/// - **读取**：`read_stream` 恰好产出 `position()` 个字节，顺序与写入顺序一致；
/// - **前置条件**：单写者顺序写入，调用方如需并发生产者须在外部串行化。
///
/// # 设计考量（Trade-offs）
/// - 不提供随机访问与缩容到初始大小以下的能力；
/// - `clear` 的内存回收策略由实现决定，详见各实现的文档。
pub trait GrowableBuffer {
    /// 构造时给定的逻辑容量。
    fn capacity(&self) -> usize;

    /// 已写入的字节数，同时也是读回时的有效长度边界。
    fn position(&self) -> usize;

    /// 当前实际持有的物理字节数。
    fn allocated(&self) -> usize;

    /// 剩余逻辑容量。
    fn remaining(&self) -> usize {
        self.capacity() - self.position()
    }

    /// 是否还能继续写入。
    fn has_remaining(&self) -> bool {
        self.position() < self.capacity()
    }

    /// 追加单个字节。
    fn put_u8(&mut self, byte: u8) -> Result<()>;

    /// 追加 `src[offset..offset + length]`。
    fn put_range(&mut self, src: &[u8], offset: usize, length: usize) -> Result<()>;

    /// 追加整个切片。
    fn put_slice(&mut self, src: &[u8]) -> Result<()> {
        self.put_range(src, 0, src.len())
    }

    /// 丢弃已写内容，回到初始占用以便复用。
    fn clear(&mut self);

    /// 物化一个只读顺序视图，覆盖 `[0, position())`。
    fn read_stream(&self) -> ReadStream<'_>;
}
