use phindi::ui::core::Route;

#[test]
fn test_paths_round_trip() {
    for route in Route::ALL {
        assert_eq!(Route::from_path(route.path()), Some(route));
    }
}

#[test]
fn test_path_normalization() {
    assert_eq!(Route::from_path("/contacts/"), Some(Route::Contacts));
    assert_eq!(Route::from_path(" /voice-call "), Some(Route::VoiceCall));
    assert_eq!(Route::from_path("/"), Some(Route::Chats));
    assert_eq!(Route::from_path("/unknown"), None);
    assert_eq!(Route::from_path(""), None);
}

#[test]
fn test_call_routes_hide_navigation() {
    let calls: Vec<_> = Route::ALL.into_iter().filter(Route::is_call).collect();
    assert_eq!(calls, vec![Route::VoiceCall, Route::VideoCall]);
    assert!(Route::NAVIGATION.iter().all(|route| !route.is_call()));
}
