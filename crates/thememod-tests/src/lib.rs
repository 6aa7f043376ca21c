pub mod test_env;

// Re-export key testing utilities
pub use test_env::{
    ConditionalRule, HermeticSessionBuilder, MockBehavior, TestEnvironment, go_mock,
    main_module_json, module_json, write_component_config,
};
