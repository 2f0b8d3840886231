use phindi::audio::{RingbackPlayer, TonePattern};

#[tokio::test]
async fn test_ringback_player_creation() {
    let player = RingbackPlayer::new();
    assert!(!player.is_playing(), "New player should not be playing");
}

#[tokio::test]
async fn test_ringback_player_start_stop() {
    let mut player = RingbackPlayer::new();
    player.start().expect("start should not fail synchronously");
    // Without an output device the tone stops on its own, so only the stop
    // side is checked.
    player.stop();
    assert!(!player.is_playing(), "Player should not be playing after stop");
}

#[tokio::test]
async fn test_ringback_player_multiple_starts() {
    let mut player = RingbackPlayer::new();
    assert!(player.start().is_ok());
    assert!(player.start().is_ok());
    player.stop();
    player.stop();
    assert!(!player.is_playing());
}

#[test]
fn test_ringback_pattern_period() {
    assert_eq!(TonePattern::RINGBACK.period(), 6.0);
    assert!(TonePattern::RINGBACK.sample_at(1.0).abs() <= 2.0 * TonePattern::RINGBACK.gain);
}
