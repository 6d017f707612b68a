use assert_cmd::Command;
use predicates::prelude::*;

fn duelsim() -> Command {
    Command::cargo_bin("duelsim").unwrap()
}

#[test]
fn roster_lists_builtin_species() {
    duelsim()
        .arg("roster")
        .assert()
        .success()
        .stdout(predicate::str::contains("pikachu"))
        .stdout(predicate::str::contains("#25"));
}

#[test]
fn unknown_creature_fails_setup() {
    duelsim()
        .args(["play", "missingno", "--seed", "1", "--pace-ms", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("setup failed"))
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn interactive_match_plays_to_a_verdict() {
    duelsim()
        .args(["play", "pikachu", "--seed", "7", "--pace-ms", "0"])
        .write_stdin("1\n".repeat(3000))
        .assert()
        .success()
        .stdout(predicate::str::contains("You chose pikachu."))
        .stdout(predicate::str::contains("Choose an attack:"))
        .stdout(
            predicate::str::contains("You win!")
                .or(predicate::str::contains("You lose!"))
                .or(predicate::str::contains("Draw!")),
        );
}

#[test]
fn invalid_choice_is_prompted_again() {
    let mut input = String::from("banana\n0\n");
    input.push_str(&"2\n".repeat(3000));
    duelsim()
        .args(["play", "25", "--seed", "3", "--pace-ms", "0"])
        .write_stdin(input)
        .assert()
        .success()
        .stdout(predicate::str::contains("'banana' is not one of the options."))
        .stdout(predicate::str::contains("'0' is not one of the options."));
}

#[test]
fn closed_input_aborts_the_match() {
    duelsim()
        .args(["play", "pikachu", "--seed", "7", "--pace-ms", "0"])
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("input closed"));
}

#[test]
fn duel_prints_json_report() {
    duelsim()
        .args(["duel", "--a", "pikachu", "--b", "geodude", "--seed", "3", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"result\""))
        .stdout(predicate::str::contains("\"log\""));
}

#[test]
fn simulate_vs_reports_rates() {
    Command::cargo_bin("simulate-vs")
        .unwrap()
        .args(["--a", "mewtwo", "--b", "pidgey", "--trials", "20"])
        .assert()
        .success()
        .stdout(predicate::str::contains("simulate-vs results"))
        .stdout(predicate::str::contains("avg turns:"));
}
