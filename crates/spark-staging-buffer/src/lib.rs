#![cfg_attr(not(feature = "std"), no_std)]

//! `spark-staging-buffer` 提供上传前暂存对象字节的两种按需增长缓冲。
//!
//! # 模块定位（Why）
//! - 分段上传客户端在提交一个 part 之前，需要把变长字节流完整暂存在内存里，
//!   但 part 的上限（逻辑容量）往往远大于多数对象的真实大小；
//! - 一次性按上限分配会让大量空闲内存常驻，本 crate 只在写入推进时才申请物理空间。
//!
//! # 设计概要（How）
//! - [`GrowableContiguousBuffer`]：单段缓冲，写满后按倍数重新分配并复制，读取时直接暴露连续切片；
//! - [`SegmentedGrowableBuffer`]：多段缓冲，写满后追加约 4 倍大小的新段，从不复制已写字节，
//!   仅在物化读视图且存在多段时做一次合并拷贝；
//! - 两者共同实现 [`GrowableBuffer`] 契约，[`StagingBuffer`] 以枚举形式封装运行期选择，
//!   [`BufferConfig`] 负责从配置构造具体策略。
//!
//! # 契约说明（What）
//! - 单写者、写完后单读者；所有操作都是同步内存操作，不涉及 I/O 与锁；
//! - 任何写入都不会越过构造时给定的逻辑容量，失败时缓冲保持调用前状态。

extern crate alloc;

mod config;
mod contiguous;
mod error;
mod growable;
#[cfg(feature = "std")]
mod io;
mod range;
mod segmented;
mod staging;
mod stream;

pub use config::{BufferConfig, BufferStrategy, DEFAULT_CAPACITY, DEFAULT_INITIAL_SIZE};
pub use contiguous::{GrowableContiguousBuffer, INIT_SIZE};
pub use error::{BufferError, Result};
pub use growable::GrowableBuffer;
pub use segmented::{MIN_SEGMENT, SEGMENT_GROWTH_FACTOR, SegmentedGrowableBuffer};
pub use staging::StagingBuffer;
pub use stream::ReadStream;
