//! 暂存缓冲的配置模型。
//!
//! # 设计动机（Why）
//! - 上传连接器通过配置决定是否启用按需增长的缓冲、part 上限以及初始分配大小；
//! - 配置以 `serde` 建模，宿主可从 TOML/JSON 等任意格式反序列化后调用 [`BufferConfig::build`]。
//!
//! # 契约说明（What）
//! - 缺省字段取默认值，未知字段直接拒绝，避免拼写错误被静默忽略；
//! - `initial_size` 对单段缓冲表示初始物理大小，对多段缓冲表示首段大小。

use serde::{Deserialize, Serialize};

use crate::{
    contiguous::{GrowableContiguousBuffer, INIT_SIZE},
    error::{BufferError, Result},
    segmented::SegmentedGrowableBuffer,
    staging::StagingBuffer,
};

/// 默认逻辑容量，与分段上传的默认 part 大小（25 MiB）一致。
pub const DEFAULT_CAPACITY: usize = 25 * 1024 * 1024;

/// 默认初始大小（128 KiB），两种策略共用。
pub const DEFAULT_INITIAL_SIZE: usize = INIT_SIZE;

/// 增长策略。
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BufferStrategy {
    /// 单段倍增，对应 [`GrowableContiguousBuffer`]。
    #[default]
    Contiguous,
    /// 多段追加，对应 [`SegmentedGrowableBuffer`]。
    Segmented,
}

/// 暂存缓冲配置。
///
/// # 教案式说明
/// - **意图 (Why)**：把“选哪种策略、上限多大、从多大起步”收敛到一个可序列化的结构，
///   让宿主的配置层与缓冲实现解耦；
/// - **契约 (What)**：[`validate`](Self::validate) 拒绝为 0 的 `capacity` 与 `initial_size`；
///   [`build`](Self::build) 内部先校验再构造。
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BufferConfig {
    pub strategy: BufferStrategy,
    pub capacity: usize,
    pub initial_size: usize,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            strategy: BufferStrategy::default(),
            capacity: DEFAULT_CAPACITY,
            initial_size: DEFAULT_INITIAL_SIZE,
        }
    }
}

impl BufferConfig {
    /// 以默认初始大小构造指定策略与容量的配置。
    pub fn new(strategy: BufferStrategy, capacity: usize) -> Self {
        Self {
            strategy,
            capacity,
            ..Self::default()
        }
    }

    /// 覆盖初始大小。
    pub fn with_initial_size(mut self, initial_size: usize) -> Self {
        self.initial_size = initial_size;
        self
    }

    /// 校验配置取值。
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(BufferError::InvalidArgument {
                detail: "capacity must be greater than zero",
            });
        }
        if self.initial_size == 0 {
            return Err(BufferError::InvalidArgument {
                detail: "initial size must be greater than zero",
            });
        }
        Ok(())
    }

    /// 按配置构造缓冲。
    pub fn build(&self) -> Result<StagingBuffer> {
        self.validate()?;
        tracing::debug!(
            strategy = ?self.strategy,
            capacity = self.capacity,
            initial_size = self.initial_size,
            "building staging buffer"
        );
        let buffer = match self.strategy {
            BufferStrategy::Contiguous => StagingBuffer::Contiguous(
                GrowableContiguousBuffer::with_initial_size(self.capacity, self.initial_size)?,
            ),
            BufferStrategy::Segmented => StagingBuffer::Segmented(
                SegmentedGrowableBuffer::with_min_segment(self.capacity, self.initial_size)?,
            ),
        };
        Ok(buffer)
    }
}
