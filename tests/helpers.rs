use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use tempfile::TempDir;

use contact_form::config::{AppSettings, Configuration};
use contact_form::domain::Submission;
use contact_form::startup::AppServer;
use contact_form::telemetry::{get_subscriber, init_subscriber};

static TRACING: Lazy<()> = Lazy::new(|| {
    let installed = if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber("test", "debug", std::io::stdout))
    } else {
        init_subscriber(get_subscriber("test", "debug", std::io::sink))
    };
    installed.expect("Failed to install the test subscriber");
});

pub struct TestApp {
    pub addr: String,
    pub data_file: PathBuf,
    pub api_client: reqwest::Client,
    // removed together with the backing file when the test ends.
    _workspace: TempDir,
}

impl TestApp {
    pub async fn get_form(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/", &self.addr))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn post_form(&self, body: String) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/", &self.addr))
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_data(&self) -> reqwest::Response {
        self.api_client
            .get(&format!("{}/data", &self.addr))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn request(&self, method: reqwest::Method, path: &str) -> reqwest::Response {
        self.api_client
            .request(method, &format!("{}{}", &self.addr, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub fn stored_submissions(&self) -> Vec<Submission> {
        let contents = std::fs::read(&self.data_file).expect("Failed to read the backing file");
        serde_json::from_slice(&contents).expect("Backing file is not a submission array")
    }
}

/// How the backing file looks before the server starts.
pub enum BackingFile {
    Contents(&'static str),
    Missing,
}

pub fn shipped_templates() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("templates")
}

pub fn test_configuration(workspace: &Path, templates_dir: PathBuf) -> Configuration {
    Configuration {
        port: 0,
        app: AppSettings {
            host: "127.0.0.1".into(),
            data_file: workspace.join("forms.json"),
            templates_dir,
            ..AppSettings::default()
        },
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(BackingFile::Contents("[]"), shipped_templates()).await
}

pub async fn spawn_app_with(backing_file: BackingFile, templates_dir: PathBuf) -> TestApp {
    Lazy::force(&TRACING);

    let workspace = TempDir::new().expect("Failed to create a temporary directory");
    let configuration = test_configuration(workspace.path(), templates_dir);
    let data_file = configuration.app.data_file.clone();

    if let BackingFile::Contents(contents) = backing_file {
        std::fs::write(&data_file, contents).expect("Failed to seed the backing file");
    }

    let server = AppServer::build(configuration)
        .await
        .expect("should have created server");
    let addr = format!("http://127.0.0.1:{}", server.port());
    let _ = tokio::spawn(server.run_until_stopped());

    TestApp {
        addr,
        data_file,
        api_client: reqwest::Client::new(),
        _workspace: workspace,
    }
}
