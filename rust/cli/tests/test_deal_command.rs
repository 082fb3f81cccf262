mod helpers;

use helpers::run_cli;

#[test]
fn deal_prints_hands_top_and_deck() {
    let res = run_cli(&["deal", "--seed", "1"], "");
    assert_eq!(res.exit_code, 0, "stderr: {}", res.stderr);
    let lines: Vec<&str> = res.stdout.lines().collect();
    assert_eq!(lines[0], "Seed: 1");
    assert!(lines[1].starts_with("Player: [1] "));
    assert!(lines[2].starts_with("CPU: [1] "));
    assert!(lines[3].starts_with("Top: "));
    assert_eq!(lines[4], "Deck: 37 cards");
}

#[test]
fn same_seed_deals_the_same_cards() {
    let a = run_cli(&["deal", "--seed", "2024"], "");
    let b = run_cli(&["deal", "--seed", "2024"], "");
    assert_eq!(a.stdout, b.stdout);

    let c = run_cli(&["deal", "--seed", "2025"], "");
    assert_ne!(a.stdout, c.stdout);
}

#[test]
fn deal_without_seed_reports_the_one_used() {
    let res = run_cli(&["deal"], "");
    assert_eq!(res.exit_code, 0);
    let seed: u64 = res
        .stdout
        .lines()
        .next()
        .and_then(|l| l.strip_prefix("Seed: "))
        .and_then(|s| s.parse().ok())
        .expect("first line names the seed");

    let replay = run_cli(&["deal", "--seed", &seed.to_string()], "");
    assert_eq!(res.stdout, replay.stdout);
}

#[test]
fn deal_shows_the_hand_play_starts_with() {
    let dealt = run_cli(&["deal", "--seed", "42"], "");
    let hand = dealt
        .stdout
        .lines()
        .find_map(|l| l.strip_prefix("Player: "))
        .expect("deal prints the player hand")
        .to_string();

    let played = run_cli(
        &["play", "--seed", "42", "--cpu-delay-ms", "0", "--exhaustion", "forfeit"],
        "q\n",
    );
    assert_eq!(played.exit_code, 0, "stderr: {}", played.stderr);
    assert!(
        played.stdout.contains(&format!("Your hand: {hand}\n")),
        "deal hand {hand} missing from:\n{}",
        played.stdout
    );
}
