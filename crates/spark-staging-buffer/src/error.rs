//! # error 模块说明
//!
//! ## 角色定位（Why）
//! - 集中定义暂存缓冲对调用方暴露的全部失败语义；
//! - 所有错误都在调用点同步检测并返回，缓冲内部不做重试或恢复。
//!
//! ## 设计要求（What）
//! - 错误类型派生 `thiserror::Error`，兼容 `core::error::Error`；
//! - 每个变体携带足以排障的上下文，并通过 [`BufferError::code`] 暴露稳定错误码。

use thiserror::Error;

/// 暂存缓冲的错误域。
///
/// # 教案式说明
/// - **意图 (Why)**：区分“构造参数非法”“容量耗尽”“源切片越界”三类失败，
///   让上传编排层可以决定是换参数重试、先提交当前 part，还是直接终止。
/// - **契约 (What)**：
///   - 错误只终止本次调用，缓冲保持最后一个合法状态，可修正参数后重试或 `clear` 后复用；
///   - 所有变体均为 `Clone + Eq`，便于测试直接断言。
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum BufferError {
    /// 构造参数非法，例如逻辑容量或初始大小为 0。
    #[error("invalid buffer argument: {detail}")]
    InvalidArgument { detail: &'static str },

    /// 写入会越过逻辑容量。
    ///
    /// - `requested`：本次调用希望写入的字节数；
    /// - `remaining`：调用前剩余的逻辑容量。
    #[error("buffer full: requested {requested} bytes but only {remaining} remain")]
    BufferFull { requested: usize, remaining: usize },

    /// `offset`/`length` 超出源切片范围。
    #[error("range {offset}+{length} is out of bounds for source of {source_len} bytes")]
    IndexOutOfRange {
        offset: usize,
        length: usize,
        source_len: usize,
    },
}

impl BufferError {
    /// 返回稳定错误码，便于日志聚合与告警分类。
    pub fn code(&self) -> &'static str {
        match self {
            BufferError::InvalidArgument { .. } => "buffer.invalid_argument",
            BufferError::BufferFull { .. } => "buffer.full",
            BufferError::IndexOutOfRange { .. } => "buffer.index_out_of_range",
        }
    }

    /// 判断是否为容量耗尽。
    ///
    /// 上传编排层通常据此决定“先提交当前 part 再继续写”。
    pub fn is_full(&self) -> bool {
        matches!(self, BufferError::BufferFull { .. })
    }
}

/// crate 统一的结果别名。
pub type Result<T, E = BufferError> = core::result::Result<T, E>;
