mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use common::{approx, approx_vec, AudioEvent};
use nomlib_actions::{
    Action, ActionError, ActionExt, ActionPlayer, CallbackAction, MoveAction, NamePolicy,
    PlayAudioSource, PlayerConfig, PlayerState, RunOptions, RunState, SequenceAction,
    TimingCurve, Vec2, WaitForDurationAction,
};
use nomlib_test_fixtures::player_configs;

fn wait(seconds: f32) -> Box<dyn Action> {
    WaitForDurationAction::new(seconds).boxed()
}

fn counter() -> (Rc<Cell<u32>>, impl Fn() + Clone + 'static) {
    let hits = Rc::new(Cell::new(0));
    let handle = hits.clone();
    (hits, move || handle.set(handle.get() + 1))
}

#[test]
fn replace_policy_cancels_older_runs_silently() {
    let mut player = ActionPlayer::new();
    let (hits, bump) = counter();
    let first = player.run(
        wait(1.0),
        RunOptions::new().with_name("a").with_on_complete(bump.clone()),
    );
    let second = player.run(wait(1.0), RunOptions::new().with_name("a").with_on_complete(bump));

    assert_eq!(player.num_actions(), 1);
    assert_eq!(player.run_state(first), None);
    assert_eq!(player.run_state(second), Some(RunState::Queued));
    assert_eq!(player.metrics().runs_cancelled, 1);

    player.update(1.0);
    assert_eq!(hits.get(), 1);
}

#[test]
fn coexist_fixture_keeps_duplicates() {
    let json = player_configs::json("coexist").expect("coexist fixture");
    let config = PlayerConfig::from_json(&json).expect("valid config");
    assert_eq!(config.name_policy, NamePolicy::Coexist);
    assert_eq!(config.default_timing_curve, TimingCurve::QuadInOut);

    let mut player = ActionPlayer::with_config(config).expect("player");
    player.run_named(wait(1.0), "a");
    player.run_named(wait(1.0), "a");
    assert_eq!(player.num_actions(), 2);

    let id = player.run(wait(1.0), RunOptions::new().with_name("a").with_exclusive(true));
    assert_eq!(player.num_actions(), 1);
    assert_eq!(player.run_name(id), Some("a"));

    let unnamed = player.enqueue(wait(1.0));
    assert_eq!(player.run_name(unnamed), Some(format!("fx-{unnamed}").as_str()));
    assert!(player.stop("a"));
    assert_eq!(player.num_actions(), 1);
}

#[test]
fn default_fixture_matches_default_config() {
    let config: PlayerConfig = player_configs::load("default").expect("default fixture");
    assert_eq!(config, PlayerConfig::default());

    let strict: PlayerConfig = player_configs::load("strict").expect("strict fixture");
    assert_eq!(strict, PlayerConfig::strict());
}

#[test]
fn invalid_fixture_is_rejected() {
    let json = player_configs::json("invalid-delta").expect("invalid-delta fixture");
    let err = PlayerConfig::from_json(&json).unwrap_err();
    assert!(matches!(err, ActionError::InvalidConfig { .. }));

    let config: PlayerConfig = player_configs::load("invalid-delta").expect("parses");
    assert!(ActionPlayer::with_config(config).is_err());
}

#[test]
fn strict_player_clamps_large_deltas() {
    let mut player = ActionPlayer::with_config(PlayerConfig::strict()).expect("player");
    player.run_named(wait(1.0), "slow");
    player.update(10.0);
    assert_eq!(player.metrics().last_delta, 0.25);
    assert!(player.action_running("slow"));

    player.update(f32::NAN);
    assert_eq!(player.metrics().last_delta, 0.0);
}

#[test]
fn root_trees_inherit_the_default_curve() {
    let config = PlayerConfig::default().with_default_timing_curve(TimingCurve::CubicOut);
    let mut player = ActionPlayer::with_config(config).expect("player");
    let (_sprite, target) = common::sprite();
    player.run_named(MoveAction::move_by(&target, (1.0, 0.0), 1.0).boxed(), "inherits");
    player.run_named(
        MoveAction::move_by(&target, (1.0, 0.0), 1.0)
            .with_timing_curve(TimingCurve::Linear)
            .boxed(),
        "explicit",
    );

    assert_eq!(
        player.action("inherits").map(|a| a.timing_curve()),
        Some(TimingCurve::CubicOut)
    );
    assert_eq!(
        player.action("explicit").map(|a| a.timing_curve()),
        Some(TimingCurve::Linear)
    );
}

#[test]
fn runs_are_stepped_in_insertion_order() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut player = ActionPlayer::new();
    for tag in ["first", "second", "third"] {
        let log = log.clone();
        player.enqueue(CallbackAction::new(move || log.borrow_mut().push(tag)).boxed());
    }
    assert!(!player.update(0.0));
    assert_eq!(*log.borrow(), vec!["first", "second", "third"]);
}

#[test]
fn reversed_runs_play_backward() {
    let (sprite, target) = common::sprite();
    let mut player = ActionPlayer::new();
    player.run(
        MoveAction::move_by(&target, (10.0, 0.0), 1.0).boxed(),
        RunOptions::new().with_reversed(true),
    );
    player.update(1.0);
    approx_vec(sprite.borrow().position, Vec2::new(-10.0, 0.0), 1e-4);
    assert!(player.idle());
}

#[test]
fn pause_and_resume_by_name() {
    let (sprite, target) = common::sprite();
    let mut player = ActionPlayer::new();
    let id = player.run_named(MoveAction::move_by(&target, (10.0, 0.0), 1.0).boxed(), "mover");

    player.update(0.5);
    assert!(player.pause("mover"));
    assert_eq!(player.run_state(id), Some(RunState::Paused));
    player.update(0.5);
    approx(sprite.borrow().position.x, 5.0, 1e-4);

    assert!(player.resume("mover"));
    assert_eq!(player.run_state(id), Some(RunState::Running));
    player.update(0.5);
    approx(sprite.borrow().position.x, 10.0, 1e-4);
    assert_eq!(player.run_state(id), None);
}

#[test]
fn resuming_an_unstarted_run_leaves_it_queued() {
    let mut player = ActionPlayer::new();
    let id = player.run_named(wait(1.0), "w");
    player.pause("w");
    player.resume("w");
    assert_eq!(player.run_state(id), Some(RunState::Queued));
}

#[test]
fn rewind_by_name_replays_from_the_start() {
    let (sprite, target) = common::sprite();
    let mut player = ActionPlayer::new();
    let id = player.run_named(MoveAction::move_by(&target, (10.0, 0.0), 1.0).boxed(), "mover");
    player.update(0.5);
    assert!(player.rewind("mover"));
    approx(sprite.borrow().position.x, 0.0, 1e-4);
    assert_eq!(player.run_state(id), Some(RunState::Queued));

    player.update(0.5);
    approx(sprite.borrow().position.x, 5.0, 1e-4);
}

#[test]
fn global_pause_freezes_everything() {
    let mut player = ActionPlayer::new();
    player.run_named(wait(0.5), "w");
    player.pause_all();
    assert_eq!(player.player_state(), PlayerState::Paused);
    assert!(player.update(5.0));
    assert_eq!(player.action("w").map(|a| a.base().elapsed()), Some(0.0));
    player.resume_all();
    assert!(!player.update(0.5));
}

#[test]
fn global_pause_suspends_sounds() {
    let (source, shared) = common::audio(2.0);
    let mut player = ActionPlayer::new();
    player.run_named(PlayAudioSource::new(&shared).boxed(), "music");
    player.update(0.5);

    player.pause_all();
    player.pause_all();
    player.update(0.5);
    assert_eq!(source.borrow().events, vec![AudioEvent::Play, AudioEvent::Pause]);

    player.resume_all();
    assert_eq!(
        source.borrow().events,
        vec![AudioEvent::Play, AudioEvent::Pause, AudioEvent::Resume]
    );
    assert!(player.update(1.0));
    assert!(!player.update(0.5));
}

#[test]
fn resume_all_keeps_runs_paused_by_name() {
    let (source, shared) = common::audio(2.0);
    let mut player = ActionPlayer::new();
    let id = player.run_named(PlayAudioSource::new(&shared).boxed(), "music");
    player.update(0.5);
    player.pause("music");
    player.pause_all();
    player.resume_all();

    assert_eq!(player.run_state(id), Some(RunState::Paused));
    assert_eq!(source.borrow().events, vec![AudioEvent::Play, AudioEvent::Pause]);

    player.pause_all();
    player.resume("music");
    assert_eq!(source.borrow().events, vec![AudioEvent::Play, AudioEvent::Pause]);
    player.resume_all();
    assert_eq!(
        source.borrow().events,
        vec![AudioEvent::Play, AudioEvent::Pause, AudioEvent::Resume]
    );
}

#[test]
fn stop_run_and_stop_all() {
    let mut player = ActionPlayer::new();
    let (hits, bump) = counter();
    let a = player.run(wait(1.0), RunOptions::new().with_on_complete(bump.clone()));
    player.run(wait(1.0), RunOptions::new().with_on_complete(bump));
    assert!(player.stop_run(a));
    assert!(!player.stop_run(a));
    assert_eq!(player.num_actions(), 1);

    player.spawner().enqueue(wait(1.0));
    player.stop_all();
    assert!(player.idle());
    assert!(!player.update(1.0));
    assert_eq!(hits.get(), 0);
    assert_eq!(player.metrics().runs_cancelled, 2);
}

#[test]
fn completion_callback_can_schedule_follow_up() {
    let mut player = ActionPlayer::new();
    let spawner = player.spawner();
    let (hits, bump) = counter();
    player.run(
        wait(0.5),
        RunOptions::new().with_on_complete(move || {
            spawner.run(
                CallbackAction::new(bump).boxed(),
                RunOptions::new().with_name("follow-up"),
            );
        }),
    );

    assert!(player.update(0.5));
    assert!(player.action_running("follow-up"));
    assert_eq!(hits.get(), 0);

    assert!(!player.update(0.0));
    assert_eq!(hits.get(), 1);
}

#[test]
fn callback_action_can_stop_another_run() {
    let mut player = ActionPlayer::new();
    let spawner = player.spawner();
    player.run_named(wait(10.0), "victim");
    player.enqueue(CallbackAction::new(move || spawner.stop("victim")).boxed());

    player.update(0.1);
    assert!(!player.action_running("victim"));
    assert!(player.idle());
}

#[test]
fn metrics_track_the_lifecycle() {
    let mut player = ActionPlayer::new();
    player.run_named(SequenceAction::new(vec![wait(0.25), wait(0.25)]).boxed(), "seq");
    player.run_named(wait(5.0), "long");
    player.update(0.25);
    player.update(0.25);
    player.stop("long");

    let metrics = player.metrics();
    assert_eq!(metrics.ticks, 2);
    assert_eq!(metrics.runs_started, 2);
    assert_eq!(metrics.runs_completed, 1);
    assert_eq!(metrics.runs_cancelled, 1);
    assert_eq!(metrics.active_runs, 0);
}
