//! End-to-end tests driving a game through the runtime handle.

use std::sync::Arc;
use std::time::Duration;

use rail_core::{Action, GameConfig, PlayerId, PrivateId, RoundKind};
use rail_runtime::{
    Event, GameStateEvent, InMemoryStateRepo, Runtime, RuntimeConfig, RuntimeError, Topic,
};
use tokio::sync::broadcast::Receiver;

fn names(count: usize) -> Vec<String> {
    (1..=count).map(|seat| format!("Player {seat}")).collect()
}

fn config(pacing: Duration) -> RuntimeConfig {
    RuntimeConfig {
        game_config: GameConfig::with_notification_stagger(0),
        auction_pacing: pacing,
        autosave: false,
        ..RuntimeConfig::default()
    }
}

async fn next_game_event(events: &mut Receiver<Event>) -> GameStateEvent {
    match events.recv().await.expect("event bus open") {
        Event::GameState(event) => event,
        other => panic!("unexpected event on game-state topic: {other:?}"),
    }
}

#[tokio::test]
async fn actions_require_a_seated_game() {
    let runtime = Runtime::builder()
        .config(config(Duration::ZERO))
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();

    let error = handle
        .execute(Action::pass_private_auction(PlayerId(0)))
        .await
        .unwrap_err();
    assert!(matches!(error, RuntimeError::NoActiveGame));

    let error = handle.new_game(names(2)).await.unwrap_err();
    assert!(matches!(error, RuntimeError::NewGame(_)));

    drop(handle);
    runtime.shutdown().await.expect("worker stops cleanly");
}

#[tokio::test]
async fn committed_and_rejected_actions_are_published() {
    let runtime = Runtime::builder()
        .config(config(Duration::ZERO))
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    let mut events = runtime.subscribe(Topic::GameState);

    handle.new_game(names(3)).await.expect("three seats");
    assert!(matches!(
        next_game_event(&mut events).await,
        GameStateEvent::GameStarted { generation: 1, ref players } if players.len() == 3
    ));

    let error = handle
        .execute(Action::bid_on_private(PlayerId(0), PrivateId(1), 41))
        .await
        .unwrap_err();
    assert!(error.is_rejection());
    match next_game_event(&mut events).await {
        GameStateEvent::ActionFailed { code, .. } => assert_eq!(code, "AUCTION_BID_TOO_LOW"),
        other => panic!("expected a rejection, got {other:?}"),
    }

    let outcome = handle
        .execute(Action::buy_cheapest_private(PlayerId(0)))
        .await
        .expect("cheapest private is affordable");
    assert_eq!(outcome.nonce, 1);
    assert!(matches!(
        next_game_event(&mut events).await,
        GameStateEvent::ActionExecuted { nonce: 1, .. }
    ));
    // Zero pacing resumes the completion check inline.
    assert!(matches!(
        next_game_event(&mut events).await,
        GameStateEvent::ActionExecuted { nonce: 2, .. }
    ));

    let state = handle.query_state().await.expect("game seated");
    assert!(!state.completion_check_pending());
    assert_eq!(state.current_player(), Some(PlayerId(1)));
}

#[tokio::test]
async fn selling_every_private_announces_the_summary_round() {
    let runtime = Runtime::builder()
        .config(config(Duration::ZERO))
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    let mut rounds = runtime.subscribe(Topic::Round);

    handle.new_game(names(3)).await.expect("three seats");
    for _ in 0..6 {
        let state = handle.query_state().await.expect("game seated");
        let player = state.current_player().expect("a seat is on turn");
        handle
            .execute(Action::buy_cheapest_private(player))
            .await
            .expect("cheapest private is affordable");
    }

    match rounds.recv().await.expect("round event") {
        Event::Round(event) => {
            assert_eq!(event.from, RoundKind::PrivateAuction);
            assert_eq!(event.to, RoundKind::AuctionSummary);
        }
        other => panic!("unexpected event on round topic: {other:?}"),
    }

    handle
        .execute(Action::begin_stock_round())
        .await
        .expect("stock round opens");
    let state = handle.query_state().await.expect("game seated");
    assert_eq!(state.round, RoundKind::StockRound);
    assert_eq!(state.stock_round_number, 1);
}

#[tokio::test(start_paused = true)]
async fn completion_check_waits_for_the_pacing_delay() {
    let runtime = Runtime::builder()
        .config(config(Duration::from_millis(1_000)))
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();

    handle.new_game(names(3)).await.expect("three seats");
    handle
        .execute(Action::buy_cheapest_private(PlayerId(0)))
        .await
        .expect("cheapest private is affordable");

    let state = handle.query_state().await.expect("game seated");
    assert!(state.completion_check_pending());

    tokio::time::sleep(Duration::from_millis(1_100)).await;

    let state = handle.query_state().await.expect("game seated");
    assert!(!state.completion_check_pending());
    assert_eq!(state.current_player(), Some(PlayerId(1)));
    assert_eq!(state.action_nonce, 2);
}

#[tokio::test(start_paused = true)]
async fn new_game_discards_a_scheduled_check() {
    let runtime = Runtime::builder()
        .config(config(Duration::from_millis(1_000)))
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();

    handle.new_game(names(3)).await.expect("three seats");
    handle
        .execute(Action::buy_cheapest_private(PlayerId(0)))
        .await
        .expect("cheapest private is affordable");
    handle.new_game(names(4)).await.expect("four seats");

    tokio::time::sleep(Duration::from_millis(2_000)).await;

    let state = handle.query_state().await.expect("game seated");
    assert_eq!(state.players.len(), 4);
    assert_eq!(state.action_nonce, 0);
    assert_eq!(state.current_player(), Some(PlayerId(0)));
}

#[tokio::test]
async fn autosave_restores_the_game_on_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = RuntimeConfig {
        autosave: true,
        save_dir: dir.path().to_path_buf(),
        ..config(Duration::ZERO)
    };

    let runtime = Runtime::builder()
        .config(config.clone())
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    handle.new_game(names(4)).await.expect("four seats");
    handle
        .execute(Action::buy_cheapest_private(PlayerId(0)))
        .await
        .expect("cheapest private is affordable");
    let saved = handle.query_state().await.expect("game seated");
    drop(handle);
    runtime.shutdown().await.expect("worker stops cleanly");

    let restarted = Runtime::builder()
        .config(config)
        .build()
        .await
        .expect("runtime restores");
    let restored = restarted.handle().query_state().await.expect("game restored");
    assert_eq!(restored, saved);
    assert_eq!(restored.current_player(), Some(PlayerId(1)));
}

#[tokio::test]
async fn explicit_save_goes_to_the_configured_repository() {
    let repository = Arc::new(InMemoryStateRepo::new());
    let runtime = Runtime::builder()
        .config(config(Duration::ZERO))
        .repository(repository.clone())
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();

    assert!(matches!(
        handle.save().await.unwrap_err(),
        RuntimeError::NoActiveGame
    ));

    handle.new_game(names(3)).await.expect("three seats");
    // Autosave is off, so nothing is written until asked.
    assert!(!rail_runtime::StateRepository::exists(repository.as_ref()));

    handle.save().await.expect("save succeeds");
    let stored = rail_runtime::StateRepository::load(repository.as_ref())
        .expect("load succeeds")
        .expect("a game was saved");
    assert_eq!(stored, handle.query_state().await.expect("game seated"));
}

#[tokio::test]
async fn dismissing_a_notification_removes_it_once() {
    let runtime = Runtime::builder()
        .config(config(Duration::ZERO))
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();

    handle.new_game(names(3)).await.expect("three seats");
    let outcome = handle
        .execute(Action::buy_cheapest_private(PlayerId(0)))
        .await
        .expect("cheapest private is affordable");
    let id = outcome.notifications[0].id;

    assert!(handle.dismiss_notification(id).await.expect("game seated"));
    assert!(!handle.dismiss_notification(id).await.expect("game seated"));
}

#[tokio::test]
async fn dismissal_survives_a_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let config = RuntimeConfig {
        autosave: true,
        save_dir: dir.path().to_path_buf(),
        ..config(Duration::ZERO)
    };

    let runtime = Runtime::builder()
        .config(config.clone())
        .build()
        .await
        .expect("runtime builds");
    let handle = runtime.handle();
    handle.new_game(names(3)).await.expect("three seats");
    let outcome = handle
        .execute(Action::buy_cheapest_private(PlayerId(0)))
        .await
        .expect("cheapest private is affordable");
    let id = outcome.notifications[0].id;
    assert!(handle.dismiss_notification(id).await.expect("game seated"));
    let live = handle.query_state().await.expect("game seated");
    drop(handle);
    runtime.shutdown().await.expect("worker stops cleanly");

    let restarted = Runtime::builder()
        .config(config)
        .build()
        .await
        .expect("runtime restores");
    let restored = restarted.handle().query_state().await.expect("game restored");
    assert_eq!(restored, live);
    assert!(restored.notifications.iter().all(|notification| notification.id != id));
}
