//! `config_toml` 集成测试：验证 `BufferConfig` 能从宿主的 TOML 配置片段反序列化并构造缓冲。

use spark_staging_buffer::{
    BufferConfig, BufferStrategy, DEFAULT_CAPACITY, DEFAULT_INITIAL_SIZE, GrowableBuffer,
    StagingBuffer,
};

#[test]
fn empty_table_uses_defaults() {
    let config: BufferConfig = toml::from_str("").expect("空配置应使用默认值");
    assert_eq!(config, BufferConfig::default());
    assert_eq!(config.capacity, DEFAULT_CAPACITY);
    assert_eq!(config.initial_size, DEFAULT_INITIAL_SIZE);
}

#[test]
fn segmented_strategy_is_parsed_and_built() {
    let config: BufferConfig = toml::from_str(
        r#"
            strategy = "segmented"
            capacity = 4096
            initial_size = 16
        "#,
    )
    .unwrap();
    assert_eq!(config.strategy, BufferStrategy::Segmented);

    let mut buffer = config.build().unwrap();
    buffer.put_slice(&[1; 100]).unwrap();
    match &buffer {
        StagingBuffer::Segmented(inner) => assert_eq!(inner.segment_count(), 3),
        StagingBuffer::Contiguous(_) => panic!("配置要求多段策略"),
    }
}

#[test]
fn unknown_fields_and_strategies_are_rejected() {
    assert!(toml::from_str::<BufferConfig>("capacty = 10").is_err());
    assert!(toml::from_str::<BufferConfig>(r#"strategy = "ring""#).is_err());
}

#[test]
fn zero_capacity_fails_at_build_time() {
    let config: BufferConfig = toml::from_str("capacity = 0").unwrap();
    assert_eq!(
        config.build().unwrap_err().code(),
        "buffer.invalid_argument"
    );
}

#[test]
fn config_round_trips_through_toml() {
    let config = BufferConfig::new(BufferStrategy::Segmented, 1 << 20).with_initial_size(512);
    let encoded = toml::to_string(&config).unwrap();
    assert!(encoded.contains("strategy = \"segmented\""));
    let decoded: BufferConfig = toml::from_str(&encoded).unwrap();
    assert_eq!(decoded, config);
}
