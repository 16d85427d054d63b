//! End-to-end tests against a spawned jukeboxd.

mod common;

use common::{CHANNEL, TestPlayer, TestServer};
use jukebox_proto::{EventData, PlayerState};
use serde_json::{Value, json};
use std::time::Duration;

async fn slack(server: &TestServer, channel_id: &str, command: &str, text: &str) -> Value {
    reqwest::Client::new()
        .post(server.http_url("/commands/slack"))
        .form(&[
            ("channel_id", channel_id),
            ("command", command),
            ("text", text),
            ("user_name", "alice"),
        ])
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

async fn connected_player(server: &TestServer) -> TestPlayer {
    let player = TestPlayer::connect(&server.ws_address()).await.unwrap();
    // Give the hub a moment to register the connection.
    tokio::time::sleep(Duration::from_millis(100)).await;
    player
}

#[tokio::test]
async fn slack_command_reaches_the_player() {
    let server = TestServer::spawn().await.unwrap();
    let mut player = connected_player(&server).await;

    let body = slack(&server, CHANNEL, "/fm", "pause").await;
    assert_eq!(body["response_type"], "in_channel");
    assert_eq!(body["blocks"][0]["text"]["text"], "Paused");
    assert_eq!(player.recv_event().await.unwrap(), EventData::Pause);

    let body = slack(&server, CHANNEL, "/skip", "2").await;
    assert_eq!(body["blocks"][0]["text"]["text"], "Skipped 2 songs");
    assert_eq!(
        player.recv_event().await.unwrap(),
        EventData::Skip { count: 2, all: false }
    );
}

#[tokio::test]
async fn unauthorized_channel_is_rejected_before_parsing() {
    let server = TestServer::spawn().await.unwrap();
    let mut player = connected_player(&server).await;

    let body = slack(&server, "C-ELSEWHERE", "/fm", "pause").await;
    assert_eq!(body["response_type"], "ephemeral");
    assert_eq!(
        body["blocks"][0]["text"]["text"],
        "Commands are only accepted in the jukebox channel."
    );
    player.expect_silence().await.unwrap();

    let response = reqwest::Client::new()
        .post(server.http_url("/commands"))
        .json(&json!({"channelId": "C-ELSEWHERE", "text": "pause", "user": "bob"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn json_commands_and_player_state() {
    let server = TestServer::spawn().await.unwrap();
    let mut player = connected_player(&server).await;

    let body: Value = reqwest::Client::new()
        .post(server.http_url("/commands"))
        .json(&json!({
            "channelId": CHANNEL,
            "command": "volume",
            "text": "30",
            "user": "bob",
            "issuerOnly": true
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["messages"][0]["text"], "Volume set to 30");
    assert_eq!(body["isVisibleToIssuerOnly"], true);
    assert_eq!(
        player.recv_event().await.unwrap(),
        EventData::ChangeVolume { next_volume: 30 }
    );

    let live = PlayerState {
        volume: 30,
        playing: false,
        ..PlayerState::default()
    };
    let (state, answered) = tokio::join!(
        async {
            reqwest::get(server.http_url("/player/state"))
                .await
                .unwrap()
                .json::<PlayerState>()
                .await
                .unwrap()
        },
        player.answer_state_request(&live)
    );
    answered.unwrap();
    assert_eq!(state, live);

    let history: Value = reqwest::get(server.http_url("/history"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(history["entries"], json!([]));
}
