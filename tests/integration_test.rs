use cafeteria_management::cli::CliApp;
use cafeteria_management::{AppConfig, Cafeteria, CafeteriaError, FeedbackForm, Rating};
use chrono::NaiveDate;
use std::path::Path;
use tempfile::TempDir;

fn config_in(dir: &Path) -> AppConfig {
    let mut config = AppConfig::default();
    config.data.data_dir = dir.join("data");
    config.data.images_dir = dir.join("images");
    config.theme.config_path = dir.join("theme.json");
    config.theme.content_root = dir.join("site");
    config.theme.output_path = dir.join("dist/theme.css");
    config.theme.stylesheet_dir = dir.join("css");
    config.export.export_dir = dir.join("exports");
    config.export.reports_dir = dir.join("reports");
    config
}

fn rate_all(app: &Cafeteria, item_id: u32, value: u8) -> FeedbackForm {
    let item = app.database().menu_item(item_id).unwrap().unwrap();
    let mut form = FeedbackForm::new(&item);
    for component in &item.components {
        form.rate(component.id, Rating::new(value).unwrap()).unwrap();
    }
    form
}

#[tokio::test]
async fn test_feedback_to_export_workflow() {
    let temp_dir = TempDir::new().unwrap();
    let app = Cafeteria::new(config_in(temp_dir.path())).unwrap();

    // The store is seeded on first open
    let items = app.database().all_menu_items().unwrap();
    assert_eq!(items.len(), 2);

    let day = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let served = cafeteria_management::menu::items_for_date(&items, day);
    assert_eq!(served.len(), 1);
    assert_eq!(served[0].name, "Curry Chawal");

    let form = rate_all(&app, 1, 4);
    app.database().add_feedback(form.submit().unwrap()).unwrap();
    let form = rate_all(&app, 2, 2);
    app.database().add_feedback(form.submit().unwrap()).unwrap();

    let csv_path = temp_dir.path().join("out/feedback.csv");
    app.exporter().export_to_file(&csv_path).unwrap();

    let csv = std::fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "Timestamp,Item ID,Item Name,Curry,Rice,Pakoda,Dal,Rice,Ghee"
    );
    assert_eq!(lines.len(), 3);
    assert!(lines[1].ends_with(",1,Curry Chawal,4,4,4,,,"));

    let stats = app.analytics().component_stats().unwrap();
    assert_eq!(stats.len(), 6);
    assert!(stats.iter().all(|s| s.count == 1 && s.std_dev.is_none()));
}

#[tokio::test]
async fn test_incomplete_feedback_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let app = Cafeteria::new(config_in(temp_dir.path())).unwrap();

    let item = app.database().menu_item(2).unwrap().unwrap();
    let mut form = FeedbackForm::new(&item);
    form.rate(4, Rating::new(5).unwrap()).unwrap();

    let err = form.submit().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Please rate the following components: Rice, Ghee"
    );
    assert!(app.database().all_feedback().unwrap().is_empty());
}

#[tokio::test]
async fn test_report_files_written() {
    let temp_dir = TempDir::new().unwrap();
    let app = Cafeteria::new(config_in(temp_dir.path())).unwrap();

    let at = |d: u32| {
        NaiveDate::from_ymd_opt(2023, 6, d)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap()
    };
    app.database()
        .add_feedback_at(rate_all(&app, 1, 5).submit().unwrap(), at(1))
        .unwrap();
    app.database()
        .add_feedback_at(rate_all(&app, 1, 3).submit().unwrap(), at(3))
        .unwrap();

    let reports = app.config().reports_dir();
    let prefix = app.analytics().save_report(&reports, at(4)).unwrap();
    assert_eq!(
        prefix.file_name().unwrap().to_str().unwrap(),
        "feedback_report_20230604_130000"
    );

    for suffix in ["summary", "trends", "histogram", "heatmap"] {
        let path = reports.join(format!("feedback_report_20230604_130000_{suffix}.csv"));
        assert!(path.exists(), "missing {suffix} report");
    }

    let trends =
        std::fs::read_to_string(reports.join("feedback_report_20230604_130000_trends.csv"))
            .unwrap();
    // June 2nd has no feedback but still gets a row
    assert_eq!(trends.lines().count(), 4);
    assert!(trends.contains("2023-06-02,,,"));
}

#[tokio::test]
async fn test_export_without_feedback_fails() {
    let temp_dir = TempDir::new().unwrap();
    let app = Cafeteria::new(config_in(temp_dir.path())).unwrap();

    let err = app
        .exporter()
        .export_to_dir(&app.config().export_dir(), chrono::Local::now().naive_local())
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CafeteriaError>(),
        Some(CafeteriaError::NoFeedback)
    ));
}

#[tokio::test]
async fn test_cli_submit_and_list() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafeteria.yaml");
    config_in(temp_dir.path()).save_to_file(&config_path).unwrap();
    let config_arg = config_path.to_str().unwrap();

    let matches = CliApp::app()
        .try_get_matches_from([
            "cafeteria", "feedback", "--config", config_arg, "submit", "--item", "1", "-r",
            "1=5", "-r", "2=4", "-r", "3=3",
        ])
        .unwrap();
    CliApp::run(&matches).await.unwrap();

    let app = Cafeteria::new(AppConfig::from_file(&config_path).unwrap()).unwrap();
    let stored = app.database().feedback_for_item(1).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].rating(2), Some(4));

    let matches = CliApp::app()
        .try_get_matches_from(["cafeteria", "feedback", "--config", config_arg, "list"])
        .unwrap();
    CliApp::run(&matches).await.unwrap();
}

#[tokio::test]
async fn test_cli_unknown_item() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafeteria.yaml");
    config_in(temp_dir.path()).save_to_file(&config_path).unwrap();

    let matches = CliApp::app()
        .try_get_matches_from([
            "cafeteria",
            "feedback",
            "--config",
            config_path.to_str().unwrap(),
            "submit",
            "--item",
            "9",
        ])
        .unwrap();
    let err = CliApp::run(&matches).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CafeteriaError>(),
        Some(CafeteriaError::UnknownMenuItem(9))
    ));
}

#[tokio::test]
async fn test_cli_use_preset_updates_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafeteria.yaml");
    config_in(temp_dir.path()).save_to_file(&config_path).unwrap();

    let matches = CliApp::app()
        .try_get_matches_from([
            "cafeteria",
            "theme",
            "use",
            "dark.css",
            "--config",
            config_path.to_str().unwrap(),
        ])
        .unwrap();
    CliApp::run(&matches).await.unwrap();

    let config = AppConfig::from_file(&config_path).unwrap();
    assert_eq!(config.theme.stylesheet, "dark.css");
    assert!(temp_dir.path().join("css/dark.css").exists());
}

#[tokio::test]
async fn test_cli_theme_commands_do_not_create_store() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("cafeteria.yaml");
    config_in(temp_dir.path()).save_to_file(&config_path).unwrap();
    let config_arg = config_path.to_str().unwrap();

    for sub in ["install", "build", "check"] {
        let matches = CliApp::app()
            .try_get_matches_from(["cafeteria", "theme", sub, "--config", config_arg])
            .unwrap();
        CliApp::run(&matches).await.unwrap();
    }

    assert!(temp_dir.path().join("css/default.css").exists());
    assert!(temp_dir.path().join("dist/theme.css").exists());
    assert!(!temp_dir.path().join("data").exists());
}
