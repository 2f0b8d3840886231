use phindi::appearance::{ResolvedTheme, SystemScheme, ThemeController, ThemeMode};

#[test]
fn test_explicit_modes() {
    let scheme = SystemScheme::new(true);
    let mut controller = ThemeController::new(ThemeMode::Light, scheme.clone());
    assert_eq!(controller.resolved(), ResolvedTheme::Light);
    assert!(!controller.is_following_system());

    assert!(controller.set_mode(ThemeMode::Dark));
    assert_eq!(controller.resolved(), ResolvedTheme::Dark);
    assert!(!controller.set_mode(ThemeMode::Dark));
}

#[test]
fn test_system_mode_tracks_scheme() {
    let scheme = SystemScheme::new(false);
    let mut controller = ThemeController::new(ThemeMode::System, scheme.clone());
    assert!(controller.is_following_system());
    assert_eq!(controller.resolved(), ResolvedTheme::Light);
    assert!(!controller.poll_system());

    scheme.set(true);
    assert!(controller.poll_system());
    assert_eq!(controller.resolved(), ResolvedTheme::Dark);
    assert!(!controller.poll_system());

    scheme.set(false);
    assert!(controller.poll_system());
    assert_eq!(controller.resolved(), ResolvedTheme::Light);
}

#[test]
fn test_leaving_system_mode_stops_tracking() {
    let scheme = SystemScheme::new(false);
    let mut controller = ThemeController::new(ThemeMode::System, scheme.clone());
    controller.set_mode(ThemeMode::Light);
    assert!(!controller.is_following_system());

    scheme.set(true);
    assert!(!controller.poll_system());
    assert_eq!(controller.resolved(), ResolvedTheme::Light);
}

#[test]
fn test_switching_to_system_picks_current_scheme() {
    let scheme = SystemScheme::new(true);
    let mut controller = ThemeController::new(ThemeMode::Light, scheme.clone());
    assert!(controller.set_mode(ThemeMode::System));
    assert_eq!(controller.resolved(), ResolvedTheme::Dark);
    assert!(controller.resolved().is_dark());
}

#[test]
fn test_mode_strings() {
    let names: Vec<_> = ThemeMode::ALL.iter().map(|mode| mode.name()).collect();
    assert_eq!(names, vec!["light", "dark", "system"]);
    assert_eq!(ThemeMode::default(), ThemeMode::System);
    assert_eq!(
        serde_json::to_string(&ThemeMode::Dark).expect("serialize"),
        "\"dark\""
    );
}
