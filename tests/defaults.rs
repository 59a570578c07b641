use std::time::Duration;

use formpack::util::PackId;
use formpack::DeliveryConfig;

#[test]
fn run_test() {
    let config = DeliveryConfig::default();
    assert!(!config.enabled);
    assert_eq!(config.default_pack, Some(PackId::from("ui_enhanced")));
    assert_eq!(config.max_retry_attempts, 3);
    assert_eq!(config.join_delay, Duration::from_millis(2000));
    assert_eq!(config.retry_delay, Duration::from_millis(1000));
    assert_eq!(config.load_timeout, Duration::from_millis(30_000));
    assert_eq!(config.max_packs_per_player, 10);
    assert_eq!(config.max_pack_size, 100 * 1024 * 1024);
}
