use zone_sweep_tool::config::ConfigData;
use zone_sweep_tool::registry::{OrderConflict, ZoneId, ZoneRegistry, DEFAULT_ZONES};
use zone_sweep_tool::state::State;
use zone_sweep_tool::util::{clamp_time, format_elapsed, TIME_MAX, TIME_MIN};

#[test]
fn test_registry_defaults() {
    // Every zone starts at time 1 with orders 1..=4 in declaration order
    let registry = ZoneRegistry::default();

    let expected = [
        (ZoneId::Front, 1),
        (ZoneId::Back, 2),
        (ZoneId::Right, 3),
        (ZoneId::Left, 4),
    ];
    for (zone, order) in expected {
        let cfg = registry.get(zone);
        assert_eq!(cfg.time, 1);
        assert_eq!(cfg.order, order);
    }
}

#[test]
fn test_zone_display_names() {
    assert_eq!(format!("{}", ZoneId::Front), "front");
    assert_eq!(format!("{}", ZoneId::Back), "back");
    assert_eq!(format!("{}", ZoneId::Right), "right");
    assert_eq!(format!("{}", ZoneId::Left), "left");
}

#[test]
fn test_save_and_get() {
    let mut registry = ZoneRegistry::default();

    registry.save(ZoneId::Right, 7, 1);
    let cfg = registry.get(ZoneId::Right);
    assert_eq!(cfg.time, 7);
    assert_eq!(cfg.order, 1);

    // Other zones untouched
    assert_eq!(registry.get(ZoneId::Front).order, 1);
    assert_eq!(registry.get(ZoneId::Back).order, 2);
}

#[test]
fn test_unique_orders_pass() {
    let mut registry = ZoneRegistry::default();
    registry.save(ZoneId::Front, 3, 4);
    registry.save(ZoneId::Left, 2, 1);

    assert_eq!(registry.check_unique_orders(), Ok(()));
    // A passing check changes nothing
    assert_eq!(registry.get(ZoneId::Front).time, 3);
    assert_eq!(registry.get(ZoneId::Left).order, 1);
}

#[test]
fn test_duplicate_orders_reset_all_zones() {
    let mut registry = ZoneRegistry::default();
    registry.save(ZoneId::Front, 5, 2); // collides with back's default order 2
    registry.save(ZoneId::Left, 9, 9); // unrelated edit, must reset too

    let conflict = registry
        .check_unique_orders()
        .expect_err("duplicate orders must be reported");

    // Exactly the colliding zones are named, in ALL-iteration order
    assert_eq!(
        conflict,
        OrderConflict {
            groups: vec![vec![ZoneId::Front, ZoneId::Back]],
        }
    );
    assert_eq!(
        format!("{}", conflict),
        "The following zones have the same order: front, back"
    );

    // All-or-nothing recovery: every zone is back at factory settings
    assert_eq!(registry.table(), DEFAULT_ZONES);
    assert_eq!(registry.check_unique_orders(), Ok(()));
}

#[test]
fn test_multiple_conflict_groups_listed() {
    let mut registry = ZoneRegistry::default();
    registry.save(ZoneId::Front, 1, 5);
    registry.save(ZoneId::Back, 1, 5);
    registry.save(ZoneId::Right, 1, 6);
    registry.save(ZoneId::Left, 1, 6);

    let conflict = registry.check_unique_orders().expect_err("two groups collide");
    assert_eq!(
        format!("{}", conflict),
        "The following zones have the same order: front, back and right, left"
    );
}

#[test]
fn test_reset_to_default() {
    let mut registry = ZoneRegistry::default();
    registry.save(ZoneId::Back, 15, 1);
    registry.save(ZoneId::Front, 4, 2);

    registry.reset_to_default();
    assert_eq!(registry.table(), DEFAULT_ZONES);
}

#[test]
fn test_config_data_default() {
    let config = ConfigData::default();
    assert_eq!(config.zones, DEFAULT_ZONES);
}

#[test]
fn test_format_elapsed() {
    assert_eq!(format_elapsed(0), "00 : 00");
    assert_eq!(format_elapsed(9), "00 : 09");
    assert_eq!(format_elapsed(59), "00 : 59");
    assert_eq!(format_elapsed(60), "01 : 00");
    assert_eq!(format_elapsed(61), "01 : 01");
    assert_eq!(format_elapsed(600), "10 : 00");
    assert_eq!(format_elapsed(3599), "59 : 59");
}

#[test]
fn test_clamp_time_bounds() {
    assert_eq!(clamp_time(0), TIME_MIN);
    assert_eq!(clamp_time(1), 1);
    assert_eq!(clamp_time(8), 8);
    assert_eq!(clamp_time(15), 15);
    assert_eq!(clamp_time(99), TIME_MAX);
}

#[test]
fn test_state_enum() {
    let initialising = State::Initialising;
    let about = State::About;
    let running = State::Running;

    assert_ne!(initialising, about);
    assert_ne!(initialising, running);
    assert_ne!(about, running);

    assert_eq!(initialising, State::Initialising);
    assert_eq!(about, State::About);
    assert_eq!(running, State::Running);
}
