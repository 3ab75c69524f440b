// Integration tests for kickoff.
//
// These drive the public service API against an in-memory SQLite database:
// edition creation for every format, result entry feeding the standings,
// match lifecycle rules, events, contracts and power scoring.

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use uuid::Uuid;

use kickoff_app::config::Config;
use kickoff_app::db::Database;
use kickoff_app::edition::*;
use kickoff_core::domain::{MatchEventKind, MatchStatus, Strategy, TeamId};
use kickoff_core::store::MatchStore;
use kickoff_core::EngineError;

// ===========================================================================
// Test helpers
// ===========================================================================

fn setup(seed: u64) -> (Database, Config) {
    let mut config = Config::in_memory();
    config.random.seed = Some(seed);
    let db = Database::open(":memory:").expect("in-memory database should open");
    (db, config)
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 9, 5, 11, 42, 0).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 9, 5).unwrap()
}

fn make_teams(svc: &EditionService<'_>, names: &[&str]) -> Vec<TeamId> {
    names.iter().map(|n| svc.insert_team(n).unwrap().id).collect()
}

fn request(strategy: Strategy, team_ids: &[TeamId]) -> EditionRequest {
    EditionRequest {
        name: "2026".into(),
        strategy,
        team_ids: team_ids.to_vec(),
    }
}

fn player(svc: &EditionService<'_>, team: TeamId, last: &str, position: &str) -> Uuid {
    svc.insert_player(&NewPlayer {
        first_name: "Test".into(),
        last_name: last.into(),
        position: Some(position.into()),
        date_of_birth: NaiveDate::from_ymd_opt(1999, 5, 1),
        team_id: Some(team),
    })
    .unwrap()
    .id
}

// ===========================================================================
// Edition creation
// ===========================================================================

#[test]
fn round_robin_edition_gets_fixtures_and_zeroed_table() {
    let (db, config) = setup(1);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["Alpha", "Bravo", "Charlie", "Delta"]);

    let (competition, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();
    assert_eq!(edition.competition_id, competition.id);

    let dash = svc.dashboard(edition.id).unwrap();
    assert_eq!(dash.competition_name, "League");
    assert_eq!(dash.strategy, Strategy::RoundRobin);
    assert_eq!(dash.rounds.len(), 3);
    assert!(dash.rounds.iter().all(|r| r.fixtures.len() == 2));
    assert_eq!(dash.standings.len(), 4);
    assert!(dash.standings.iter().all(|r| r.points == 0 && r.played == 0));

    // first round three hours out, on the hour; then weekly
    let first = dash.rounds[0].fixtures[0].kickoff;
    assert_eq!(first, Utc.with_ymd_and_hms(2026, 9, 5, 14, 0, 0).unwrap());
    let second = dash.rounds[1].fixtures[0].kickoff;
    assert_eq!(second - first, chrono::Duration::days(7));
}

#[test]
fn double_round_robin_has_two_legs() {
    let (db, config) = setup(2);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B", "C", "D", "E", "F"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobinDouble, &teams), now())
        .unwrap();

    let dash = svc.dashboard(edition.id).unwrap();
    assert_eq!(dash.rounds.len(), 10);
    let total: usize = dash.rounds.iter().map(|r| r.fixtures.len()).sum();
    assert_eq!(total, 30);
    for k in 0..5 {
        let first: Vec<_> = dash.rounds[k]
            .fixtures
            .iter()
            .map(|f| (f.home_team.clone(), f.away_team.clone()))
            .collect();
        let second: Vec<_> = dash.rounds[k + 5]
            .fixtures
            .iter()
            .map(|f| (f.away_team.clone(), f.home_team.clone()))
            .collect();
        assert_eq!(first, second);
    }
}

#[test]
fn knockout_edition_has_bracket_and_no_table() {
    let (db, config) = setup(3);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B", "C", "D", "E", "F", "G", "H"]);
    let (_, edition) = svc
        .create_competition_at("Cup", &request(Strategy::Knockout, &teams), now())
        .unwrap();

    let dash = svc.dashboard(edition.id).unwrap();
    let sizes: Vec<usize> = dash.rounds.iter().map(|r| r.fixtures.len()).collect();
    assert_eq!(sizes, vec![4, 2, 1]);
    assert!(dash.standings.is_empty());
    assert!(dash
        .rounds
        .iter()
        .flat_map(|r| &r.fixtures)
        .all(|f| f.home_goals.is_none() && f.status == MatchStatus::Scheduled));
}

#[test]
fn same_seed_draws_the_same_bracket() {
    let draw = || {
        let (db, config) = setup(99);
        let svc = EditionService::new(&db, &config);
        let teams = make_teams(&svc, &["A", "B", "C", "D", "E", "F", "G"]);
        let (_, edition) = svc
            .create_competition_at("Cup", &request(Strategy::Knockout, &teams), now())
            .unwrap();
        svc.dashboard(edition.id)
            .unwrap()
            .rounds
            .into_iter()
            .map(|r| {
                r.fixtures
                    .into_iter()
                    .map(|f| (f.home_team, f.away_team))
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(draw(), draw());
}

#[test]
fn odd_round_robin_is_rejected_atomically() {
    let (db, config) = setup(4);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B", "C"]);
    let err = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap_err();
    assert!(err.to_string().contains("invalid team count for format"));
    assert!(svc.editions().unwrap().is_empty());
}

#[test]
fn unknown_references_are_not_found() {
    let (db, config) = setup(5);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);

    let err = svc
        .create_edition_at(Uuid::new_v4(), &request(Strategy::RoundRobin, &teams), now())
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "competition", .. }));

    let (competition, _) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();
    let err = svc
        .create_edition_at(
            competition.id,
            &request(Strategy::RoundRobin, &[teams[0], Uuid::new_v4()]),
            now(),
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "team", .. }));

    assert!(matches!(
        svc.dashboard(Uuid::new_v4()),
        Err(EngineError::NotFound { entity: "edition", .. })
    ));
    assert!(matches!(
        svc.record_result(Uuid::new_v4(), 1, 0),
        Err(EngineError::NotFound { entity: "match", .. })
    ));
}

#[test]
fn duplicate_team_ids_are_rejected() {
    let (db, config) = setup(6);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);
    let err = svc
        .create_competition_at(
            "League",
            &request(Strategy::Knockout, &[teams[0], teams[1], teams[0]]),
            now(),
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicateTeam(id) if id == teams[0]));
}

#[test]
fn rename_and_delete_edition() {
    let (db, config) = setup(7);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();

    svc.rename_edition(edition.id, "Spring").unwrap();
    assert_eq!(svc.dashboard(edition.id).unwrap().edition_name, "Spring");

    svc.delete_edition(edition.id).unwrap();
    assert!(svc.editions().unwrap().is_empty());
    assert!(matches!(
        svc.delete_edition(edition.id),
        Err(EngineError::NotFound { .. })
    ));
    assert!(matches!(
        svc.rename_edition(edition.id, "x"),
        Err(EngineError::NotFound { .. })
    ));
}

#[test]
fn seeded_edition_after_delete_gets_fresh_ids() {
    let (db, config) = setup(42);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B", "C", "D"]);
    let (competition, first) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();
    let second = svc
        .create_edition_at(competition.id, &request(Strategy::RoundRobin, &teams), now())
        .unwrap();

    svc.delete_edition(first.id).unwrap();
    let third = svc
        .create_edition_at(competition.id, &request(Strategy::Knockout, &teams), now())
        .unwrap();

    assert_ne!(third.id, first.id);
    assert_ne!(third.id, second.id);
    let ids = |edition| -> Vec<Uuid> {
        svc.dashboard(edition)
            .unwrap()
            .rounds
            .into_iter()
            .flat_map(|r| r.fixtures)
            .map(|f| f.id)
            .collect()
    };
    let kept = ids(second.id);
    assert!(ids(third.id).iter().all(|id| !kept.contains(id)));
    assert_eq!(svc.editions_for_competition(competition.id).unwrap().len(), 2);
}

// ===========================================================================
// Results and standings
// ===========================================================================

#[test]
fn single_result_flows_into_the_table() {
    let (db, config) = setup(8);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();

    let dash = svc.dashboard(edition.id).unwrap();
    let fixture = &dash.rounds[0].fixtures[0];
    // team A is at slot 0 and always hosts the only fixture
    assert_eq!(fixture.home_team, "A");
    svc.record_result(fixture.id, 2, 1).unwrap();

    let dash = svc.dashboard(edition.id).unwrap();
    let a = &dash.standings[0];
    let b = &dash.standings[1];
    assert_eq!(a.team_name, "A");
    assert_eq!((a.wins, a.draws, a.losses), (1, 0, 0));
    assert_eq!((a.goals_for, a.goals_against, a.points), (2, 1, 3));
    assert_eq!(a.goal_difference, 1);
    assert_eq!(b.team_name, "B");
    assert_eq!((b.wins, b.draws, b.losses), (0, 0, 1));
    assert_eq!((b.goals_for, b.goals_against, b.points), (1, 2, 0));
    assert_eq!(b.goal_difference, -1);

    // asking again recomputes to the same table
    let again = svc.dashboard(edition.id).unwrap();
    assert_eq!(again.standings[0].points, 3);
    assert_eq!(again.standings[1].points, 0);
}

#[test]
fn one_result_in_a_four_team_league() {
    let (db, config) = setup(17);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B", "C", "D"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();

    let a_vs_b = svc
        .dashboard(edition.id)
        .unwrap()
        .rounds
        .into_iter()
        .flat_map(|r| r.fixtures)
        .find(|f| f.home_team == "A" && f.away_team == "B")
        .expect("A hosts B once");
    svc.record_result(a_vs_b.id, 2, 1).unwrap();

    let rows = svc.dashboard(edition.id).unwrap().standings;
    let names: Vec<&str> = rows.iter().map(|r| r.team_name.as_str()).collect();
    assert_eq!(names, vec!["A", "C", "D", "B"]);

    let row = |name: &str| rows.iter().find(|r| r.team_name == name).unwrap();
    let a = row("A");
    assert_eq!((a.wins, a.draws, a.losses, a.goals_for, a.goals_against), (1, 0, 0, 2, 1));
    assert_eq!((a.points, a.goal_difference), (3, 1));
    let b = row("B");
    assert_eq!((b.wins, b.draws, b.losses, b.goals_for, b.goals_against), (0, 0, 1, 1, 2));
    assert_eq!((b.points, b.goal_difference), (0, -1));
    for idle in ["C", "D"] {
        let r = row(idle);
        assert_eq!(
            (r.played, r.wins, r.draws, r.losses, r.goals_for, r.goals_against, r.points),
            (0, 0, 0, 0, 0, 0, 0)
        );
        assert_eq!(r.goal_difference, 0);
    }
}

#[test]
fn live_matches_do_not_count() {
    let (db, config) = setup(9);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();
    let id = svc.dashboard(edition.id).unwrap().rounds[0].fixtures[0].id;

    let live = svc
        .update_match(
            id,
            &MatchUpdate {
                status: Some(MatchStatus::Live),
                kickoff: None,
            },
        )
        .unwrap();
    assert_eq!((live.home_goals, live.away_goals), (Some(0), Some(0)));

    let dash = svc.dashboard(edition.id).unwrap();
    assert!(dash.standings.iter().all(|r| r.played == 0));
}

#[test]
fn match_lifecycle_is_enforced() {
    let (db, config) = setup(10);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();
    let id = svc.dashboard(edition.id).unwrap().rounds[0].fixtures[0].id;

    let to = |status| MatchUpdate {
        status: Some(status),
        kickoff: None,
    };
    svc.update_match(id, &to(MatchStatus::Live)).unwrap();
    assert!(matches!(
        svc.update_match(id, &to(MatchStatus::Scheduled)),
        Err(EngineError::InvalidTransition { .. })
    ));
    svc.record_result(id, 0, 0).unwrap();
    assert!(matches!(
        svc.record_result(id, 1, 0),
        Err(EngineError::InvalidTransition { .. })
    ));
    assert!(matches!(
        svc.update_match(id, &to(MatchStatus::Live)),
        Err(EngineError::InvalidTransition { .. })
    ));

    let f = db.read(|s| s.fixture(id)).unwrap().unwrap();
    assert_eq!(f.status, MatchStatus::Finished);
    assert_eq!((f.home_goals, f.away_goals), (Some(0), Some(0)));
}

#[test]
fn kickoff_can_be_moved() {
    let (db, config) = setup(11);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();
    let id = svc.dashboard(edition.id).unwrap().rounds[0].fixtures[0].id;

    let moved = Utc.with_ymd_and_hms(2026, 9, 20, 19, 45, 0).unwrap();
    let f = svc
        .update_match(
            id,
            &MatchUpdate {
                status: None,
                kickoff: Some(moved),
            },
        )
        .unwrap();
    assert_eq!(f.kickoff, moved);
    assert_eq!(f.status, MatchStatus::Scheduled);
    assert_eq!(svc.dashboard(edition.id).unwrap().rounds[0].fixtures[0].kickoff, moved);
}

// ===========================================================================
// Events
// ===========================================================================

#[test]
fn goals_credit_the_scorers_side() {
    let (db, config) = setup(12);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();
    let id = svc.dashboard(edition.id).unwrap().rounds[0].fixtures[0].id;
    let home_striker = player(&svc, teams[0], "Home", "Striker");
    let away_striker = player(&svc, teams[1], "Away", "Striker");

    svc.update_match(
        id,
        &MatchUpdate {
            status: Some(MatchStatus::Live),
            kickoff: None,
        },
    )
    .unwrap();

    let goal = |minute, scorer| NewMatchEvent {
        kind: MatchEventKind::Goal,
        minute,
        primary_player: Some(scorer),
        secondary_player: None,
        detail: None,
    };
    svc.record_event(id, &goal(70, away_striker)).unwrap();
    svc.record_event(id, &goal(12, home_striker)).unwrap();
    svc.record_event(id, &goal(55, home_striker)).unwrap();
    svc.record_event(
        id,
        &NewMatchEvent {
            kind: MatchEventKind::YellowCard,
            minute: 30,
            primary_player: Some(away_striker),
            secondary_player: None,
            detail: Some("dissent".into()),
        },
    )
    .unwrap();

    let f = db.read(|s| s.fixture(id)).unwrap().unwrap();
    assert_eq!((f.home_goals, f.away_goals), (Some(2), Some(1)));

    let minutes: Vec<u32> = svc
        .events_for_match(id)
        .unwrap()
        .iter()
        .map(|e| e.minute)
        .collect();
    assert_eq!(minutes, vec![12, 30, 55, 70]);

    // finishing with the running score feeds the table
    svc.update_match(
        id,
        &MatchUpdate {
            status: Some(MatchStatus::Finished),
            kickoff: None,
        },
    )
    .unwrap();
    let dash = svc.dashboard(edition.id).unwrap();
    assert_eq!(dash.standings[0].team_name, "A");
    assert_eq!(dash.standings[0].points, 3);
}

#[test]
fn event_with_unknown_player_is_rejected() {
    let (db, config) = setup(13);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();
    let id = svc.dashboard(edition.id).unwrap().rounds[0].fixtures[0].id;

    let err = svc
        .record_event(
            id,
            &NewMatchEvent {
                kind: MatchEventKind::Goal,
                minute: 3,
                primary_player: Some(Uuid::new_v4()),
                secondary_player: None,
                detail: None,
            },
        )
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound { entity: "player", .. }));
    assert!(svc.events_for_match(id).unwrap().is_empty());
    assert!(matches!(
        svc.events_for_match(Uuid::new_v4()),
        Err(EngineError::NotFound { entity: "match", .. })
    ));
}

// ===========================================================================
// Contracts and power
// ===========================================================================

#[test]
fn contracts_are_validated_and_move_the_player() {
    let (db, config) = setup(14);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B"]);
    let p = player(&svc, teams[0], "Mover", "Midfielder");
    let d = |y, m, day| NaiveDate::from_ymd_opt(y, m, day).unwrap();

    let backwards = svc.sign_contract(&NewContract {
        player_id: p,
        team_id: teams[0],
        salary_per_year: 1,
        start_date: d(2026, 7, 1),
        end_date: d(2025, 7, 1),
    });
    assert!(matches!(backwards, Err(EngineError::InvalidContract(_))));

    svc.sign_contract(&NewContract {
        player_id: p,
        team_id: teams[0],
        salary_per_year: 2_000_000,
        start_date: d(2024, 7, 1),
        end_date: d(2026, 6, 30),
    })
    .unwrap();

    let earlier = svc.sign_contract(&NewContract {
        player_id: p,
        team_id: teams[1],
        salary_per_year: 3_000_000,
        start_date: d(2023, 1, 1),
        end_date: d(2027, 6, 30),
    });
    assert!(matches!(earlier, Err(EngineError::InvalidContract(_))));

    svc.sign_contract(&NewContract {
        player_id: p,
        team_id: teams[1],
        salary_per_year: 3_000_000,
        start_date: d(2026, 7, 1),
        end_date: d(2028, 6, 30),
    })
    .unwrap();

    use kickoff_core::store::RosterSource;
    let moved = db.read(|s| s.player(p)).unwrap().unwrap();
    assert_eq!(moved.team_id, Some(teams[1]));
    assert!(db.read(|s| s.roster(teams[0])).unwrap().is_empty());

    // financial score reads the latest contract only
    let b = svc.score_team_on(teams[1], today()).unwrap();
    assert!((b.financial - 1.5).abs() < 1e-9);
}

#[test]
fn power_breakdown_for_a_balanced_squad() {
    let (db, config) = setup(15);
    let svc = EditionService::new(&db, &config);
    let team = make_teams(&svc, &["Deep"])[0];
    let positions = [
        "Goalkeeper",
        "Goalkeeper",
        "Centre Back",
        "Left Back",
        "Right Back",
        "Midfielder",
        "Midfielder",
        "Midfielder",
        "Striker",
        "Forward",
    ];
    for (i, pos) in positions.iter().enumerate() {
        let p = player(&svc, team, &format!("P{i}"), pos);
        svc.sign_contract(&NewContract {
            player_id: p,
            team_id: team,
            salary_per_year: 10_000_000,
            start_date: NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2028, 6, 30).unwrap(),
        })
        .unwrap();
    }

    let b = svc.score_team_on(team, today()).unwrap();
    assert!((b.financial - 50.0).abs() < 1e-9);
    assert_eq!(b.tactical, 100.0);
    assert_eq!(b.depth, 40.0);
    assert_eq!(b.age_fit, 100.0);
    assert!(b.composite > 0.0 && b.composite <= 100.0);

    assert!(matches!(
        svc.score_team(Uuid::new_v4()),
        Err(EngineError::NotFound { entity: "team", .. })
    ));
}

#[test]
fn dashboard_serializes_to_json() {
    let (db, config) = setup(16);
    let svc = EditionService::new(&db, &config);
    let teams = make_teams(&svc, &["A", "B", "C", "D"]);
    let (_, edition) = svc
        .create_competition_at("League", &request(Strategy::RoundRobin, &teams), now())
        .unwrap();

    let json = serde_json::to_value(svc.dashboard(edition.id).unwrap()).unwrap();
    assert_eq!(json["strategy"], "RoundRobin");
    assert_eq!(json["standings"].as_array().unwrap().len(), 4);
    assert_eq!(json["rounds"][0]["fixtures"][0]["status"], "Scheduled");
}
