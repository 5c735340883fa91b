//! `contiguous_contract` 集成测试：从公开 API 视角验证 `GrowableContiguousBuffer` 的契约。
//!
//! # 测试目标（Why）
//! - 覆盖“写满即失败”“倍增扩容”“清空复用”三条主路径；
//! - 以外部 crate 身份调用，避免测试依赖内部字段。

use bytes::Buf;
use spark_staging_buffer::{BufferError, GrowableBuffer, GrowableContiguousBuffer, INIT_SIZE};

fn pattern(len: usize, seed: u8) -> Vec<u8> {
    (0..len)
        .map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed))
        .collect()
}

/// 容量为 10 的缓冲：先写 1 字节再写 9 字节后恰好写满，继续写入失败，清空后恢复全部容量。
#[test]
fn small_capacity_fills_rejects_and_clears() {
    let mut buffer = GrowableContiguousBuffer::new(10).expect("容量为正应构造成功");
    assert_eq!(buffer.remaining(), 10);
    assert!(buffer.has_remaining());
    assert_eq!(buffer.position(), 0);

    buffer.put_u8(0x11).unwrap();
    buffer.put_slice(&[0x22; 9]).unwrap();
    assert_eq!(buffer.position(), 10);
    assert!(!buffer.has_remaining());

    assert!(matches!(
        buffer.put_u8(0x44),
        Err(BufferError::BufferFull { requested: 1, remaining: 0 })
    ));
    assert!(buffer.put_slice(&[0x55, 0x55]).unwrap_err().is_full());

    buffer.clear();
    assert_eq!(buffer.position(), 0);
    assert_eq!(buffer.remaining(), 10);
    assert!(buffer.read_stream().is_empty());
}

/// 容量 300000、初始 128 KiB，一次写入 200000 字节：物理数组倍增到 262144，内容完整读回。
#[test]
fn large_bulk_append_doubles_once_and_round_trips() {
    let mut buffer = GrowableContiguousBuffer::new(300_000).unwrap();
    assert_eq!(buffer.allocated(), INIT_SIZE);

    let data = pattern(200_000, 7);
    buffer.put_slice(&data).unwrap();
    assert_eq!(buffer.allocated(), 262_144);
    assert_eq!(&buffer.raw_view()[..200_000], data.as_slice());

    // 再写 70000 字节会越过 262144，第二次扩容封顶为逻辑容量。
    buffer.put_slice(&pattern(70_000, 9)).unwrap();
    assert_eq!(buffer.allocated(), 300_000);
    assert_eq!(buffer.position(), 270_000);
}

/// 清空后按相同序列重放，位置序列与读回内容都与首次一致。
#[test]
fn clear_and_replay_reproduces_stream() {
    let mut buffer = GrowableContiguousBuffer::with_initial_size(4096, 64).unwrap();
    let chunks = [pattern(10, 1), pattern(300, 2), pattern(1000, 3)];

    let run = |buffer: &mut GrowableContiguousBuffer| {
        let mut positions = Vec::new();
        for chunk in &chunks {
            buffer.put_slice(chunk).unwrap();
            positions.push(buffer.position());
        }
        (positions, buffer.read_stream().into_bytes())
    };

    let first = run(&mut buffer);
    buffer.clear();
    let second = run(&mut buffer);
    assert_eq!(first, second);
    assert_eq!(first.0, [10, 310, 1310]);
}

/// 源切片越界在任何数据搬运之前被拒绝，缓冲保持原状。
#[test]
fn out_of_range_source_is_rejected_without_side_effects() {
    let mut buffer = GrowableContiguousBuffer::new(32).unwrap();
    buffer.put_slice(b"keep").unwrap();
    let err = buffer.put_range(b"abc", 1, 5).unwrap_err();
    assert_eq!(
        err,
        BufferError::IndexOutOfRange {
            offset: 1,
            length: 5,
            source_len: 3
        }
    );
    assert_eq!(buffer.as_slice(), b"keep");
}

/// 读流按 `Buf` 语义逐段消费。
#[test]
fn read_stream_is_consumable_as_buf() {
    let mut buffer = GrowableContiguousBuffer::new(16).unwrap();
    buffer.put_slice(&[0, 0, 1, 0xff]).unwrap();
    let mut stream = buffer.read_stream();
    assert!(stream.is_zero_copy());
    assert_eq!(stream.get_u16(), 0);
    assert_eq!(stream.get_u16(), 0x01ff);
    assert!(!stream.has_remaining());
}
