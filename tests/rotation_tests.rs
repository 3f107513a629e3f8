use chrono::{DateTime, Duration, Utc};
use smart_display::playlist::{MAX_DURATION_SECS, Playlist, SlideEntry};
use smart_display::rotation::RotationState;

fn t0() -> DateTime<Utc> {
    "2026-01-01T00:00:00Z".parse().unwrap()
}

fn secs(n: i64) -> Duration {
    Duration::seconds(n)
}

fn two_slides() -> Playlist {
    Playlist::new(vec![
        SlideEntry::new("http://pics/a.jpg", 10),
        SlideEntry::new("http://pics/b.jpg", 10),
    ])
}

#[test]
fn stays_on_slide_before_deadline() {
    let playlist = two_slides();
    let mut state = RotationState::start(t0());
    state.advance(&playlist, t0() + secs(9));
    assert_eq!(state.current_index, 0);
    assert_eq!(state.activated_at, t0());
}

#[test]
fn advances_exactly_at_deadline_and_keeps_cadence() {
    let playlist = two_slides();
    let mut state = RotationState::start(t0());
    // activated_at lands on the deadline, not the poll time
    state.advance(&playlist, t0() + secs(11));
    assert_eq!(state.current_index, 1);
    assert_eq!(state.activated_at, t0() + secs(10));
}

#[test]
fn advance_is_idempotent_within_a_window() {
    let playlist = two_slides();
    let mut once = RotationState::start(t0());
    once.advance(&playlist, t0() + secs(11));
    let mut twice = once;
    twice.advance(&playlist, t0() + secs(11));
    assert_eq!(once, twice);
}

#[test]
fn one_step_per_call_after_suspension() {
    // list = [A(10s), B(10s)], polls at t0+5, t0+11, t0+25
    let playlist = two_slides();
    let mut state = RotationState::start(t0());

    state.advance(&playlist, t0() + secs(5));
    assert_eq!(state.query(&playlist).unwrap().image_url, "http://pics/a.jpg");

    state.advance(&playlist, t0() + secs(11));
    assert_eq!(state.query(&playlist).unwrap().image_url, "http://pics/b.jpg");
    assert_eq!(state.activated_at, t0() + secs(10));

    // 25s elapsed, but only one step is taken per call
    state.advance(&playlist, t0() + secs(25));
    assert_eq!(state.query(&playlist).unwrap().image_url, "http://pics/a.jpg");
    assert_eq!(state.activated_at, t0() + secs(20));
}

#[test]
fn wraps_around_after_full_cycle() {
    let playlist = Playlist::new(vec![
        SlideEntry::new("http://pics/a.jpg", 5),
        SlideEntry::new("http://pics/b.jpg", 5),
        SlideEntry::new("http://pics/c.jpg", 5),
    ]);
    let mut state = RotationState::start(t0());
    for step in 1..=3 {
        state.advance(&playlist, t0() + secs(5 * step));
    }
    assert_eq!(state.current_index, 0);
    assert_eq!(state.activated_at, t0() + secs(15));
}

#[test]
fn index_stays_in_bounds_over_many_advances() {
    let playlist = Playlist::new(vec![
        SlideEntry::new("http://pics/a.jpg", 1),
        SlideEntry::new("http://pics/b.jpg", 1),
        SlideEntry::new("http://pics/c.jpg", 1),
    ]);
    let mut state = RotationState::start(t0());
    for tick in 0..100 {
        state.advance(&playlist, t0() + secs(tick));
        assert!(state.query(&playlist).is_some());
        assert!(state.current_index < playlist.len());
    }
}

#[test]
fn longest_allowed_duration_keeps_deadline_arithmetic_sound() {
    let entry = SlideEntry::new("http://pics/a.jpg", MAX_DURATION_SECS);
    entry.validate().expect("cap is a valid duration");
    let playlist = Playlist::new(vec![entry]);
    let mut state = RotationState::start(t0());
    // far from the deadline: repeated polls at the same instant must not
    // move the state
    state.advance(&playlist, t0() + secs(30));
    state.advance(&playlist, t0() + secs(30));
    assert_eq!(state, RotationState::start(t0()));
}

#[test]
fn empty_playlist_is_a_no_op() {
    let playlist = Playlist::default();
    let mut state = RotationState::start(t0());
    state.advance(&playlist, t0() + secs(1000));
    assert_eq!(state, RotationState::start(t0()));
    assert!(state.query(&playlist).is_none());
}

#[test]
fn insert_before_current_shifts_pointer_right() {
    let mut state = RotationState::start(t0());
    state.jump_to(2, t0());
    state.slide_inserted(0);
    assert_eq!(state.current_index, 3);
    // timer untouched, same slide still displayed
    assert_eq!(state.activated_at, t0());
}

#[test]
fn insert_after_current_leaves_pointer_alone() {
    let mut state = RotationState::start(t0());
    state.jump_to(1, t0());
    state.slide_inserted(2);
    assert_eq!(state.current_index, 1);
}

#[test]
fn remove_before_current_follows_the_slide() {
    let mut state = RotationState::start(t0());
    state.jump_to(2, t0());
    state.slide_removed(0, 2, t0() + secs(3));
    assert_eq!(state.current_index, 1);
    assert_eq!(state.activated_at, t0());
}

#[test]
fn remove_current_points_at_successor_and_restarts_timer() {
    let mut state = RotationState::start(t0());
    state.jump_to(1, t0());
    state.slide_removed(1, 2, t0() + secs(3));
    assert_eq!(state.current_index, 1);
    assert_eq!(state.activated_at, t0() + secs(3));
}

#[test]
fn remove_current_at_end_wraps_to_zero() {
    let mut state = RotationState::start(t0());
    state.jump_to(2, t0());
    state.slide_removed(2, 2, t0() + secs(3));
    assert_eq!(state.current_index, 0);
    assert_eq!(state.activated_at, t0() + secs(3));
}

#[test]
fn remove_last_slide_parks_the_rotation() {
    let mut state = RotationState::start(t0());
    state.slide_removed(0, 0, t0() + secs(3));
    assert_eq!(state.current_index, 0);
    assert_eq!(state.activated_at, t0() + secs(3));
}
