use analytics::AnalyticsEngine;
use configuration::ModelSettings;
use forecaster::predict_future_stats;
use rust_decimal::Decimal;
use std::fmt::Write as _;
use std::path::Path;

const HEADER: &str = "Rk,Gtm,Date,Team,,Opp,Result,GS,MP,FG,FGA,FG%,3P,3PA,3P%,2P,2PA,2P%,eFG%,FT,FTA,FT%,ORB,DRB,TRB,AST,STL,BLK,TOV,PF,PTS,GmSc,+/-";

const OPPONENTS: [&str; 12] = [
    "ATL", "BOS", "CHO", "DAL", "DEN", "LAL", "MEM", "MIA", "NYK", "PHO", "SAC", "UTA",
];

/// A box-score line where points, assists and rebounds vary with `seed`.
fn game_row(rank: usize, opponent: &str, seed: usize) -> String {
    let points = 14 + (seed * 7) % 25;
    let assists = 3 + seed % 7;
    let rebounds = 2 + (seed * 3) % 6;
    format!(
        "{rank},{rank},2022-01-{day:02},GSW,,{opponent},W 110-100,1,33:10,9,19,.474,4,11,.364,5,8,.625,.579,3,3,1.000,1,{drb},{rebounds},{assists},1,0,3,2,{points},19.4,+5",
        day = rank % 28 + 1,
        drb = rebounds - 1,
    )
}

fn write_season(dir: &Path, file_name: &str, offset: usize, inactive_every: usize) {
    let mut csv = String::from(HEADER);
    for (i, opponent) in OPPONENTS.iter().cycle().take(36).enumerate() {
        csv.push('\n');
        if i % inactive_every == inactive_every - 1 {
            write!(
                csv,
                "{rank},{rank},2022-02-01,GSW,@,{opponent},L 99-101,Inactive,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac,Inac",
                rank = i + 1
            )
            .unwrap();
        } else {
            csv.push_str(&game_row(i + 1, opponent, i + offset));
        }
    }
    // A trailing blank row is dropped on load.
    csv.push('\n');
    csv.push_str(&",".repeat(HEADER.matches(',').count()));
    csv.push('\n');
    std::fs::write(dir.join(file_name), csv).unwrap();
}

#[test]
fn loads_aggregates_and_forecasts() {
    let dir = tempfile::tempdir().unwrap();
    let files = vec![
        "curry_2021-22_reg_season.csv".to_string(),
        "curry_2022-23_reg_season.csv".to_string(),
    ];
    write_season(dir.path(), &files[0], 0, 9);
    write_season(dir.path(), &files[1], 5, 12);

    let games = loader::load_seasons(dir.path(), &files).unwrap();
    assert_eq!(games.len(), 72);
    assert_eq!(games[0].season, "2021-22");
    assert_eq!(games[71].season, "2022-23");
    assert!(
        games
            .iter()
            .all(|g| !matches!(g.opponent.as_deref(), Some("PHO") | Some("CHO")))
    );

    let report = AnalyticsEngine::new().run(&games).unwrap();
    // 36 / 9 + 36 / 12 inactive rows.
    assert_eq!(report.inactive.len(), 7);
    assert_eq!(report.active_games + report.inactive.len(), games.len());
    assert_eq!(report.ranking.len(), OPPONENTS.len());

    let codes: Vec<_> = report.summaries.iter().map(|s| s.opponent.as_str()).collect();
    assert!(codes.contains(&"PHX") && codes.contains(&"CHA"));
    assert!(!codes.contains(&"PHO") && !codes.contains(&"CHO"));

    let games_counted: usize = report.summaries.iter().map(|s| s.games).sum();
    assert_eq!(games_counted, report.active_games);

    let points: Vec<Decimal> = report.ranking.iter().filter_map(|r| r.points).collect();
    assert!(points.windows(2).all(|w| w[0] >= w[1]));
    for row in &report.ranking {
        assert_eq!(
            row.points_assists,
            Some(row.points.unwrap() + row.assists.unwrap())
        );
    }

    let settings = ModelSettings {
        n_trees: 15,
        ..ModelSettings::default()
    };
    let forecast = predict_future_stats(&report.ranking, "PHO", &settings)
        .unwrap()
        .expect("PHX has active games");
    assert_eq!(forecast.opponent, "PHX");
    assert_eq!(forecast.evaluation.test_rows, 3);
    assert_eq!(forecast.evaluation.train_rows, 9);
    assert!(forecast.projection.points.is_finite());

    assert!(
        predict_future_stats(&report.ranking, "TOR", &settings)
            .unwrap()
            .is_none()
    );
}

#[test]
fn missing_season_file_aborts() {
    let dir = tempfile::tempdir().unwrap();
    write_season(dir.path(), "curry_2021-22_reg_season.csv", 0, 9);
    let files = vec![
        "curry_2021-22_reg_season.csv".to_string(),
        "curry_2022-23_reg_season.csv".to_string(),
    ];

    assert!(matches!(
        loader::load_seasons(dir.path(), &files),
        Err(loader::LoadError::Io { .. })
    ));
}
