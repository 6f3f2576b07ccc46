use std::time::Duration;

const REPO_RAW: &str =
    "https://raw.githubusercontent.com/Zhu-lele/Chemical-Hazard-Database-for-marine-ecological-risk-assessment/main";

/// Static settings for a dashboard session.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Where the hazard table is loaded from (URL or local path).
    pub dataset_source: String,
    pub logo_url: String,
    pub diagram_url: String,
    /// Upper bound on the initial HTTP fetch.
    pub request_timeout: Duration,
    /// Columns the user may filter on, when present in the data.
    pub filter_columns: Vec<String>,
    /// Column used as the x axis of both charts.
    pub identifier_column: String,
    pub window_title: String,
    pub window_size: [f32; 2],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            dataset_source: format!("{REPO_RAW}/Chemical-hazard-database-20250314.csv"),
            logo_url: format!("{REPO_RAW}/dlut_logo.jpg"),
            diagram_url: format!("{REPO_RAW}/model_diagram.png"),
            request_timeout: Duration::from_secs(30),
            filter_columns: vec!["CAS".into(), "Name".into(), "SMILES".into()],
            identifier_column: "CAS".into(),
            window_title: "Chemical Hazard Database".into(),
            window_size: [1280.0, 900.0],
        }
    }
}
