#[cfg(test)]
mod tests {
    use crate::config::{ConfigBuilder, KinshipConfig, LogLevel, validation};
    use crate::storage::config::SurrealDBEngine;
    use std::path::PathBuf;

    #[test]
    fn test_default_config() {
        let config = KinshipConfig::default();
        assert_eq!(config.storage.surrealdb.engine, SurrealDBEngine::Memory);
        assert_eq!(config.storage.surrealdb.namespace, "kinship");
        assert_eq!(config.logging.level, LogLevel::Info);
    }

    #[test]
    fn test_config_builder() {
        let config = ConfigBuilder::new()
            .with_data_dir("/tmp/test_data")
            .with_log_level(LogLevel::Debug)
            .build()
            .unwrap();

        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/test_data"));
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn test_memory_storage_builder() {
        let config = ConfigBuilder::new().with_memory_storage().build().unwrap();

        assert_eq!(config.storage.surrealdb.engine, SurrealDBEngine::Memory);
        assert_eq!(config.storage.surrealdb.connection, "memory");
    }

    #[test]
    fn test_validation() {
        let valid = ConfigBuilder::new().build();
        assert!(valid.is_ok());

        let config = KinshipConfig::default();
        let result = validation::validate_config(&config);
        assert!(result.is_ok());
    }

    #[test]
    fn test_predefined_configs() {
        let dev = ConfigBuilder::development().build().unwrap();
        let test = ConfigBuilder::testing().build().unwrap();

        assert_eq!(dev.storage.surrealdb.engine, SurrealDBEngine::Memory);
        assert_eq!(dev.logging.level, LogLevel::Debug);

        assert_eq!(test.storage.data_dir, PathBuf::from("./test_data"));
    }

    #[test]
    fn test_predefined_configs_production() {
        let prod = ConfigBuilder::production().build().unwrap();

        assert_eq!(prod.storage.surrealdb.engine, SurrealDBEngine::RocksDB);
        assert_eq!(prod.logging.level, LogLevel::Info);
        assert!(!prod.storage.surrealdb.connection.is_empty());
    }

    #[test]
    fn test_config_serialization() {
        let config = ConfigBuilder::new()
            .with_data_dir("/tmp/test_data")
            .build()
            .unwrap();

        let json = serde_json::to_string(&config).unwrap();
        let deserialized: KinshipConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.storage.data_dir, deserialized.storage.data_dir);
        assert_eq!(
            config.storage.surrealdb.namespace,
            deserialized.storage.surrealdb.namespace
        );
    }
}
