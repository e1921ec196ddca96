use std::path::Path;

use vibematcher::console::{CLEARED_SCREEN, EMPTY_VIBE_SCREEN, IDLE_SCREEN};
use vibematcher::{
    load_matcher, Console, ConsoleCommand, ConsoleReply, SemanticConfig, VibeConfig, VibeMatcher,
};

async fn matcher() -> VibeMatcher {
    let mut config = VibeConfig {
        semantic: SemanticConfig::fast(),
        ..VibeConfig::default()
    };
    config.catalog.path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/catalog.json");
    load_matcher(&config).await.expect("fast matcher")
}

#[tokio::test]
async fn empty_vibe_shows_error_screen() {
    let matcher = matcher().await;
    let mut console = Console::new();
    assert_eq!(console.screen(), IDLE_SCREEN);
    assert_eq!(console.find(&matcher, 3).unwrap(), EMPTY_VIBE_SCREEN);
}

#[tokio::test]
async fn find_renders_requested_number_of_matches() {
    let matcher = matcher().await;
    let mut console = Console::new();
    console.set_vibe("cozy rainy day book");
    let screen = console.find(&matcher, 2).unwrap().to_string();

    assert!(screen.starts_with("> QUERY: 'cozy rainy day book'\n> FOUND 2 MATCH(ES):\n"));
    assert!(screen.contains("=== MATCH 1 / SCORE: "));
    assert!(screen.contains("% === 🧣\nNAME: Cozy Knit Cardigan\nDESC: An oversized"));
    assert!(screen.contains("=== MATCH 2 / SCORE: "));
    assert!(!screen.contains("=== MATCH 3"));
}

#[tokio::test]
async fn selector_is_clamped_to_catalog() {
    let matcher = matcher().await;
    let mut console = Console::new();
    console.set_vibe("anything");
    let screen = console.find(&matcher, 99).unwrap();
    assert!(screen.contains("> FOUND 7 MATCH(ES):"));

    let screen = console.find(&matcher, 0).unwrap();
    assert!(screen.contains("> FOUND 1 MATCH(ES):"));
}

#[tokio::test]
async fn example_then_clear() {
    let matcher = matcher().await;
    let mut console = Console::new();
    console.pick_example(1).unwrap();
    let screen = console.find(&matcher, 1).unwrap();
    assert!(screen.contains("> QUERY: 'Cyberpunk street market'"));
    assert!(screen.contains("NAME: Cyber-Punk Bomber Jacket"));

    console.clear();
    assert_eq!(console.screen(), CLEARED_SCREEN);
    assert_eq!(console.vibe(), "");
}

#[tokio::test]
async fn example_command_loads_vibe_without_searching() {
    let matcher = matcher().await;
    let mut console = Console::new();
    let mut top_n = 3;

    let reply = console
        .handle(ConsoleCommand::parse(":example 2"), &matcher, &mut top_n)
        .unwrap();
    assert_eq!(reply, ConsoleReply::Note("> Cyberpunk street market".into()));
    assert_eq!(console.vibe(), "Cyberpunk street market");
    assert_eq!(console.screen(), IDLE_SCREEN);

    let reply = console
        .handle(ConsoleCommand::parse(""), &matcher, &mut top_n)
        .unwrap();
    assert_eq!(reply, ConsoleReply::Screen);
    assert!(console
        .screen()
        .starts_with("> QUERY: 'Cyberpunk street market'\n> FOUND 3 MATCH(ES):"));
}

#[tokio::test]
async fn top_command_clamps_and_applies_to_next_search() {
    let matcher = matcher().await;
    let mut console = Console::new();
    let mut top_n = 3;

    let reply = console
        .handle(ConsoleCommand::parse(":top 50"), &matcher, &mut top_n)
        .unwrap();
    assert_eq!(reply, ConsoleReply::Note("showing up to 7 matches".into()));
    assert_eq!(top_n, 7);

    console
        .handle(ConsoleCommand::parse("futuristic cyberpunk"), &matcher, &mut top_n)
        .unwrap();
    assert!(console.screen().contains("> FOUND 7 MATCH(ES):"));
}

#[tokio::test]
async fn clear_blank_and_quit_commands() {
    let matcher = matcher().await;
    let mut console = Console::new();
    let mut top_n = 3;

    console
        .handle(ConsoleCommand::parse("cozy rainy day book"), &matcher, &mut top_n)
        .unwrap();
    let reply = console
        .handle(ConsoleCommand::parse(":clear"), &matcher, &mut top_n)
        .unwrap();
    assert_eq!(reply, ConsoleReply::Screen);
    assert_eq!(console.screen(), CLEARED_SCREEN);

    console
        .handle(ConsoleCommand::parse("   "), &matcher, &mut top_n)
        .unwrap();
    assert_eq!(console.screen(), EMPTY_VIBE_SCREEN);

    let reply = console
        .handle(ConsoleCommand::parse(":example 9"), &matcher, &mut top_n)
        .unwrap();
    assert!(matches!(reply, ConsoleReply::Note(_)));
    assert_eq!(console.vibe(), "");

    let reply = console
        .handle(ConsoleCommand::parse(":quit"), &matcher, &mut top_n)
        .unwrap();
    assert_eq!(reply, ConsoleReply::Quit);
}
