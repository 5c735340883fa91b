use bytes::{Buf, Bytes};

/// 视图背后的字节来源。
///
/// - `Borrowed`：零拷贝借用缓冲内部存储，生命周期绑定在缓冲的不可变借用上；
/// - `Owned`：多段合并后的独立快照，与缓冲再无关联。
#[derive(Debug, Clone)]
enum Source<'a> {
    Borrowed(&'a [u8]),
    Owned(Bytes),
}

impl Source<'_> {
    fn as_slice(&self) -> &[u8] {
        match self {
            Source::Borrowed(slice) => slice,
            Source::Owned(bytes) => bytes.as_ref(),
        }
    }
}

/// `ReadStream` 是暂存缓冲物化出的只读顺序视图。
///
/// # 设计动机（Why）
/// - 上传客户端只需要按顺序把 part 字节读完，不需要随机访问；
/// - 单段场景直接借用底层存储，多段场景只在此处付出唯一一次合并拷贝。
///
/// # 契约说明（What）
/// - 创建时恰好覆盖缓冲的 `[0, position)`；之后对缓冲的写入不会影响已物化的视图
///   （借用态下借用检查器禁止写入，拥有态本就是独立副本）；
/// - 实现 [`bytes::Buf`]，启用 `std` 时还实现 `std::io::Read` 与 `std::io::BufRead`。
#[derive(Debug, Clone)]
pub struct ReadStream<'a> {
    source: Source<'a>,
    cursor: usize,
}

impl<'a> ReadStream<'a> {
    pub(crate) fn borrowed(slice: &'a [u8]) -> Self {
        Self {
            source: Source::Borrowed(slice),
            cursor: 0,
        }
    }

    pub(crate) fn owned(bytes: Bytes) -> Self {
        Self {
            source: Source::Owned(bytes),
            cursor: 0,
        }
    }

    /// 尚未读取的字节数。
    pub fn len(&self) -> usize {
        self.source.as_slice().len() - self.cursor
    }

    /// 是否已读空。
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 视图是否直接借用缓冲存储（未发生合并拷贝）。
    pub fn is_zero_copy(&self) -> bool {
        matches!(self.source, Source::Borrowed(_))
    }

    /// 尚未读取的字节。
    pub fn as_slice(&self) -> &[u8] {
        &self.source.as_slice()[self.cursor..]
    }

    /// 转换为拥有所有权的 [`Bytes`]，只有借用态需要复制。
    pub fn into_bytes(self) -> Bytes {
        match self.source {
            Source::Borrowed(slice) => Bytes::copy_from_slice(&slice[self.cursor..]),
            Source::Owned(bytes) => bytes.slice(self.cursor..),
        }
    }
}

impl Buf for ReadStream<'_> {
    fn remaining(&self) -> usize {
        self.len()
    }

    fn chunk(&self) -> &[u8] {
        self.as_slice()
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.len(),
            "cannot advance past the end of a read stream: {cnt} > {}",
            self.len()
        );
        self.cursor += cnt;
    }
}

#[cfg(feature = "std")]
impl std::io::Read for ReadStream<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = buf.len().min(self.len());
        buf[..n].copy_from_slice(&self.as_slice()[..n]);
        self.cursor += n;
        Ok(n)
    }
}

#[cfg(feature = "std")]
impl std::io::BufRead for ReadStream<'_> {
    fn fill_buf(&mut self) -> std::io::Result<&[u8]> {
        Ok(self.as_slice())
    }

    fn consume(&mut self, amt: usize) {
        self.cursor += amt.min(self.len());
    }
}
